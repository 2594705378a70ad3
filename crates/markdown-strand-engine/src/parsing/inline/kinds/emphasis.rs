/// Emphasis delimiters. A run's length becomes the node's level.
pub struct Emphasis;

impl Emphasis {
    pub const STAR: u8 = b'*';
    pub const UNDERSCORE: u8 = b'_';

    pub fn is_symbol(b: u8) -> bool {
        b == Self::STAR || b == Self::UNDERSCORE
    }
}
