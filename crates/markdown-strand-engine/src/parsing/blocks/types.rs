use crate::parsing::source::span::{Position, Span};

/// Columns of indentation that turn a line into indented code.
pub const CODE_INDENT: usize = 4;

/// One classified physical line (or the remainder of one after a container
/// marker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    /// Accumulated indentation width in columns.
    pub indent: usize,
    /// Where the indentation begins.
    pub start: Position,
    /// The content after indentation, up to the end of the line.
    pub span: Span,
}

impl Line {
    pub fn is_empty(&self) -> bool {
        matches!(self.kind, LineKind::Empty)
    }

    /// The line including whatever indentation is still attached to it.
    pub fn indented_span(&self) -> Span {
        Span::new(self.start, self.span.end)
    }

    /// The same line with its kind forced to plain text.
    pub fn as_text(&self) -> Line {
        Line {
            kind: LineKind::Text,
            ..self.clone()
        }
    }
}

/// What a line looks like on its own, before any container context is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Text,
    Empty,
    Header {
        level: u8,
        /// The `#` run.
        opening: Span,
        title: Span,
        /// An optional trailing `#` run.
        closing: Option<Span>,
    },
    ThematicBreak,
    Fence {
        style: FenceStyle,
        /// Length of the backtick/tilde run.
        run: usize,
        marker: Span,
        name: Span,
    },
    ListMarker {
        kind: ListKind,
        marker: Span,
        rest: Box<Line>,
    },
    QuoteMarker {
        /// Position of the `>`.
        marker: Position,
        rest: Box<Line>,
    },
    ReferenceDefinition {
        title: String,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FenceStyle {
    Backtick,
    Tilde,
}

impl FenceStyle {
    pub fn from_marker(b: u8) -> Option<Self> {
        match b {
            b'`' => Some(Self::Backtick),
            b'~' => Some(Self::Tilde),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulletSymbol {
    Hyphen,
    Star,
    Plus,
}

impl BulletSymbol {
    pub fn from_marker(b: u8) -> Option<Self> {
        match b {
            b'-' => Some(Self::Hyphen),
            b'*' => Some(Self::Star),
            b'+' => Some(Self::Plus),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separator {
    Dot,
    Paren,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Bullet(BulletSymbol),
    Ordered { separator: Separator, start: u32 },
}

impl ListKind {
    /// Whether a marker of kind `other` continues a list of this kind.
    ///
    /// Start numbers are irrelevant; only the bullet symbol or the ordered
    /// separator must agree.
    pub fn continues(&self, other: &ListKind) -> bool {
        match (self, other) {
            (ListKind::Bullet(a), ListKind::Bullet(b)) => a == b,
            (
                ListKind::Ordered { separator: a, .. },
                ListKind::Ordered { separator: b, .. },
            ) => a == b,
            _ => false,
        }
    }
}
