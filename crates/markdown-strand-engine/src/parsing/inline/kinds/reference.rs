/// Links and images: `[title](value)`, `[title][key]`, `[title][]`,
/// `[title]`, each optionally prefixed with `!`.
pub struct Reference;

impl Reference {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const IMAGE: u8 = b'!';
    pub const VALUE_OPEN: u8 = b'(';
    pub const VALUE_CLOSE: u8 = b')';
}
