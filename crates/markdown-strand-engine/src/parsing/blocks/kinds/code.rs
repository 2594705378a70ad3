use crate::parsing::source::span::Span;

/// An open indented code block.
///
/// Blank lines are held back until more code arrives, so a code block never
/// ends with blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentedCode {
    pub lines: Vec<Span>,
    pub trailing_blanks: Vec<Span>,
}

impl IndentedCode {
    pub fn new(first: Span) -> Self {
        Self {
            lines: vec![first],
            trailing_blanks: Vec::new(),
        }
    }

    pub fn push_blank(&mut self, line: Span) {
        self.trailing_blanks.push(line);
    }

    /// Commits buffered blanks, then `line`.
    pub fn push_line(&mut self, line: Span) {
        self.lines.append(&mut self.trailing_blanks);
        self.lines.push(line);
    }
}
