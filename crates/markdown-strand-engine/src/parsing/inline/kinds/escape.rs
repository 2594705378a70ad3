/// Backslash escapes and backslash hard breaks.
pub struct Escape;

impl Escape {
    pub const BACKSLASH: u8 = b'\\';
}
