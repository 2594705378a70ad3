use crate::parsing::blocks::types::{CODE_INDENT, FenceStyle, Line, LineKind};
use crate::parsing::source::span::Span;

/// An open fenced code block.
///
/// Fences are raw zones: body lines are recorded verbatim and never reach
/// inline parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedCode {
    pub style: FenceStyle,
    /// Length of the opening run; a closer must be at least this long.
    pub run: usize,
    /// Indentation of the opening fence, stripped from every body line.
    pub indent: usize,
    pub opening: Span,
    pub name: Span,
    pub body: Vec<Span>,
    pub closing: Option<Span>,
    pub closed: bool,
}

impl FencedCode {
    pub const MIN_RUN: usize = 3;

    /// If `line` (already stripped of the fence's indentation) closes this
    /// fence, returns the closing marker span.
    pub fn closed_by(&self, line: &Line) -> Option<Span> {
        match &line.kind {
            LineKind::Fence {
                style, run, marker, name,
            } if *style == self.style
                && line.indent < CODE_INDENT
                && name.is_empty()
                && *run >= self.run =>
            {
                Some(*marker)
            }
            _ => None,
        }
    }
}
