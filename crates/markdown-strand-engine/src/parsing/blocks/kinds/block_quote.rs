use crate::parsing::source::span::Position;

/// An open block quote.
///
/// The `>` prefix constant lives here, not scattered in classifier code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockQuote {
    /// Position of every `>` this quote consumed, one per line.
    pub markers: Vec<Position>,
    pub closed: bool,
    /// Whether a line without `>` may still continue the quote, i.e. its open
    /// descendant is a paragraph.
    pub lazy: bool,
}

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: u8 = b'>';

    pub fn new(marker: Position) -> Self {
        Self {
            markers: vec![marker],
            closed: false,
            lazy: false,
        }
    }
}
