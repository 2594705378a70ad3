/// An index into the source code-unit sequence.
///
/// Positions are opaque to everything but arithmetic: the engine never looks
/// at what a unit *is* except through a [`Codec`](super::Codec).
pub type Position = usize;

/// A half-open range `[start, end)` of code units in the source.
///
/// All parsed nodes store spans rather than copied text, enabling lossless
/// round-trip: slicing the source with any span reproduces the exact units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    /// Inclusive start position.
    pub start: Position,
    /// Exclusive end position.
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start <= end, "inverted span {start}..{end}");
        Self { start, end }
    }

    /// An empty span at `at`.
    pub fn empty(at: Position) -> Self {
        Self { start: at, end: at }
    }

    /// Returns the length in units. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// True when `other` lies entirely within `self`.
    #[must_use]
    pub fn contains(self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Shrinks the span by `n` units on each side.
    #[must_use]
    pub fn shrink(self, n: usize) -> Span {
        let start = (self.start + n).min(self.end);
        let end = self.end.saturating_sub(n).max(start);
        Span { start, end }
    }

    /// The units covered by this span.
    pub fn slice<T>(self, units: &[T]) -> &[T] {
        &units[self.start..self.end]
    }
}
