use super::{codec::Codec, span::Position};

/// A cursor for unit-by-unit parsing with position tracking.
///
/// Operates over a window `[i, end)` of the source. Markers are compared
/// through the codec, so the same cursor walks bytes, UTF-16 or graphemes.
/// The cursor is `Copy`: speculative parses take it by value and the
/// caller's cursor is untouched when they give up.
pub struct Cursor<'a, C: Codec> {
    units: &'a [C::Unit],
    codec: &'a C,
    /// Current absolute position.
    i: Position,
    /// Exclusive end of the window.
    end: Position,
}

impl<C: Codec> Clone for Cursor<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: Codec> Copy for Cursor<'_, C> {}

impl<'a, C: Codec> Cursor<'a, C> {
    /// Creates a cursor over `units[start..end]`.
    pub fn new(units: &'a [C::Unit], codec: &'a C, start: Position, end: Position) -> Self {
        debug_assert!(start <= end && end <= units.len());
        Self {
            units,
            codec,
            i: start,
            end,
        }
    }

    /// Returns the current absolute position.
    pub fn pos(&self) -> Position {
        self.i
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Returns true if at end of the window.
    pub fn eof(&self) -> bool {
        self.i >= self.end
    }

    /// Peeks at the current unit without advancing.
    pub fn peek_unit(&self) -> Option<C::Unit> {
        (self.i < self.end).then(|| self.units[self.i])
    }

    /// Peeks at the current unit as ASCII. `None` at end of window or for
    /// non-ASCII units.
    pub fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Peeks `offset` units ahead as ASCII.
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        let at = self.i + offset;
        (at < self.end).then(|| self.codec.ascii(self.units[at])).flatten()
    }

    /// True when the current unit is a space or tab.
    pub fn at_blank(&self) -> bool {
        matches!(self.peek(), Some(b' ' | b'\t'))
    }

    /// Advances by one unit, returning the consumed unit.
    pub fn bump(&mut self) -> Option<C::Unit> {
        let u = self.peek_unit()?;
        self.i += 1;
        Some(u)
    }

    /// Advances by `n` units, stopping at the end of the window.
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.end);
    }

    /// Consumes `b` if it is next.
    pub fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.i += 1;
            true
        } else {
            false
        }
    }

    /// Consumes a run of `b`, returning its length.
    pub fn run_of(&mut self, b: u8) -> usize {
        let start = self.i;
        while self.peek() == Some(b) {
            self.i += 1;
        }
        self.i - start
    }

    /// Consumes spaces and tabs, returning how many units were skipped.
    pub fn skip_blanks(&mut self) -> usize {
        let start = self.i;
        while self.at_blank() {
            self.i += 1;
        }
        self.i - start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::source::codec::{Utf8, Utf16, utf16};

    fn cursor(s: &str) -> Cursor<'_, Utf8> {
        Cursor::new(s.as_bytes(), &Utf8, 0, s.len())
    }

    #[test]
    fn cursor_basics() {
        let mut cur = cursor("hello");
        assert_eq!(cur.pos(), 0);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.bump(), Some(b'h'));
        assert_eq!(cur.pos(), 1);
    }

    #[test]
    fn empty_string_input() {
        let cur = cursor("");
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn window_limits_peeking() {
        let src = b"abcdef";
        let mut cur = Cursor::new(src, &Utf8, 2, 4);
        assert_eq!(cur.peek(), Some(b'c'));
        assert_eq!(cur.peek_at(2), None);
        cur.bump_n(10);
        assert!(cur.eof());
        assert_eq!(cur.pos(), 4);
    }

    #[test]
    fn run_and_blanks() {
        let mut cur = cursor("***  \tx");
        assert_eq!(cur.run_of(b'*'), 3);
        assert_eq!(cur.skip_blanks(), 3);
        assert!(cur.eat(b'x'));
        assert!(cur.eof());
        assert!(!cur.eat(b'x'));
    }

    #[test]
    fn copies_are_independent() {
        let cur = cursor("abc");
        let mut ahead = cur;
        ahead.bump_n(2);
        assert_eq!(cur.pos(), 0);
        assert_eq!(ahead.pos(), 2);
    }

    #[test]
    fn non_ascii_units_peek_as_none() {
        let src = utf16("é!");
        let cur = Cursor::new(&src, &Utf16, 0, src.len());
        assert_eq!(cur.peek(), None);
        assert!(cur.peek_unit().is_some());
        assert!(!cur.eof());
        assert_eq!(cur.peek_at(1), Some(b'!'));
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = cursor("x");
        assert_eq!(cur.bump(), Some(b'x'));
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.bump(), None);
    }
}
