use crate::parsing::source::span::Span;

/// An open paragraph.
///
/// Paragraphs have no delimiters - they are the default leaf block when no
/// other block opener matches. They are the only blocks that accept lazy
/// continuation lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// One span per line, indentation excluded.
    pub lines: Vec<Span>,
    pub closed: bool,
}

impl Paragraph {
    pub fn new(first: Span) -> Self {
        Self {
            lines: vec![first],
            closed: false,
        }
    }

    pub fn push(&mut self, line: Span) {
        debug_assert!(!self.closed, "line pushed to a closed paragraph");
        self.lines.push(line);
    }
}
