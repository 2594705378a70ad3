use crate::parsing::source::span::Position;

/// A maximal run of `*` or `_` with its flanking classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmphasisRun {
    pub symbol: u8,
    /// Units of the run not yet consumed by a match.
    pub len: usize,
    pub can_open: bool,
    pub can_close: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterKind {
    LineStart,
    LineEnd,
    Emphasis(EmphasisRun),
    CodeRun(usize),
    RefOpen,
    RefOpenImage,
    RefClose,
    /// The `(` directly after a `]`.
    RefValueOpen,
    LeftParen,
    RightParen,
    /// A character escaped by the backslash just before it.
    Ignored,
    /// A line break whose node runs from this delimiter to `next`, the start
    /// of the following line's text.
    SoftBreak {
        next: Position,
    },
    HardBreak {
        next: Position,
    },
}

/// One punctuation event found by the scanner.
///
/// Positions point at the first unit of the construct: the first unit of a
/// run, the `!` of an image opener, the escaped character of an escape, the
/// end of the trimmed line for line ends and breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter {
    pub position: Position,
    pub kind: DelimiterKind,
}

impl Delimiter {
    pub fn new(position: Position, kind: DelimiterKind) -> Self {
        Self { position, kind }
    }

    pub fn emphasis(&self) -> Option<EmphasisRun> {
        match self.kind {
            DelimiterKind::Emphasis(run) => Some(run),
            _ => None,
        }
    }
}

/// The delimiter stream of one block. Resolution passes tombstone slots they
/// consume (`None`) instead of removing them, so indices stay stable.
pub type Delimiters = Vec<Option<Delimiter>>;
