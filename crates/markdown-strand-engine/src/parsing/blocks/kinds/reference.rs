use crate::parsing::references::reference_key;

/// A `[title]: value` line. Never part of the output tree; merged into the
/// reference store once the whole document has been read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDefinition {
    pub title: String,
    pub value: String,
}

impl ReferenceDefinition {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const SEPARATOR: u8 = b':';

    /// The store key for this definition.
    pub fn key(&self) -> String {
        reference_key(&self.title)
    }
}
