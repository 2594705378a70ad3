use crate::parsing::blocks::types::{CODE_INDENT, Line, ListKind};
use crate::parsing::source::span::Span;

/// Where a list is in its blank-line lifecycle.
///
/// `Normal -> FollowedByBlank` on a blank that does not end the list,
/// `FollowedByBlank -> Normal` on the next accepted non-blank line, and
/// `* -> Closed` on a second consecutive blank outside a fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Normal,
    FollowedByBlank,
    Closed,
}

/// An open list. Its children in the block tree are [`ListItem`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    /// Kind of the first marker; later markers only need to be compatible.
    pub kind: ListKind,
    /// Columns a line needs to belong to the current item's content.
    pub min_indent: usize,
    pub state: ListState,
    /// A blank line was followed by more content of this list.
    pub loose: bool,
}

impl List {
    /// Longest digit run accepted for an ordered marker.
    pub const MAX_DIGITS: usize = 9;

    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            min_indent: 0,
            state: ListState::Normal,
            loose: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state == ListState::Closed
    }
}

/// One list item. Its children are the item's content blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub marker: Span,
}

/// Columns between a list marker and its item's content.
///
/// The whitespace after the marker counts, unless the item is empty or
/// starts with indented code, in which case only the single required space
/// does.
pub fn content_gap(rest: &Line) -> usize {
    if rest.is_empty() || rest.indent > CODE_INDENT {
        1
    } else {
        rest.indent.max(1)
    }
}

/// Indentation required for lines continuing an item whose marker starts at
/// `marker_indent`.
pub fn item_indent(marker_indent: usize, marker: Span, rest: &Line) -> usize {
    marker_indent + marker.len() + content_gap(rest)
}
