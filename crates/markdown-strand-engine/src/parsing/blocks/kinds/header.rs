use crate::parsing::source::span::Span;

/// An ATX header. Single line, so it is closed as soon as it exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub level: u8,
    /// The leading `#` run.
    pub opening: Span,
    pub title: Span,
    /// An optional trailing `#` run.
    pub closing: Option<Span>,
}

impl Header {
    pub const MARKER: u8 = b'#';
    pub const MAX_LEVEL: usize = 6;

    pub fn markers(&self) -> Vec<Span> {
        std::iter::once(self.opening).chain(self.closing).collect()
    }
}
