use crate::parsing::source::{Codec, Position, Span};

use super::delimiter::{Delimiter, DelimiterKind, Delimiters, EmphasisRun};
use super::kinds::{CodeSpan, Emphasis, Escape, Reference};

/// What sits on either side of an emphasis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flank {
    Whitespace,
    Punctuation,
    Neither,
}

/// Output of [`scan`]: the delimiter stream plus the literal text ranges
/// (one per line, trimmed) that everything not consumed becomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub delimiters: Delimiters,
    pub text: Vec<Span>,
}

/// Walks the text lines of one block left to right, emitting delimiters.
///
/// Line positions are kept distinct; consecutive lines are joined by a soft
/// or hard break delimiter.
pub fn scan<C: Codec>(
    source: &[C::Unit],
    codec: &C,
    lines: &[Span],
    hard_break_spaces: usize,
) -> Scan {
    let mut scanner = Scanner {
        source,
        codec,
        out: Vec::new(),
    };
    for (k, line) in lines.iter().enumerate() {
        scanner.line(*line, lines.get(k + 1).map(|next| next.start), hard_break_spaces);
    }
    let text = text_ranges(&scanner.out);
    Scan {
        delimiters: scanner.out.into_iter().map(Some).collect(),
        text,
    }
}

/// Pairs each `LineStart` with the following `LineEnd`.
pub fn text_ranges(delimiters: &[Delimiter]) -> Vec<Span> {
    let mut ranges = Vec::new();
    let mut start = None;
    for d in delimiters {
        match d.kind {
            DelimiterKind::LineStart => start = Some(d.position),
            DelimiterKind::LineEnd => {
                if let Some(s) = start.take().filter(|&s| s < d.position) {
                    ranges.push(Span::new(s, d.position));
                }
            }
            _ => {}
        }
    }
    ranges
}

struct Scanner<'a, C: Codec> {
    source: &'a [C::Unit],
    codec: &'a C,
    out: Vec<Delimiter>,
}

impl<C: Codec> Scanner<'_, C> {
    fn push(&mut self, position: Position, kind: DelimiterKind) {
        self.out.push(Delimiter::new(position, kind));
    }

    fn ascii(&self, pos: Position) -> Option<u8> {
        self.codec.ascii(self.source[pos])
    }

    fn line(&mut self, line: Span, next: Option<Position>, hard_break_spaces: usize) {
        self.push(line.start, DelimiterKind::LineStart);

        let mut end = line.end;
        while end > line.start && matches!(self.ascii(end - 1), Some(b' ' | b'\t')) {
            end -= 1;
        }
        let trailing = line.end - end;
        let backslash_break = next.is_some()
            && trailing == 0
            && end > line.start
            && self.ascii(end - 1) == Some(Escape::BACKSLASH)
            && !self.escaped(line.start, end - 1);
        let text_end = if backslash_break { end - 1 } else { end };

        let mut i = line.start;
        while i < text_end {
            i = self.unit(i, line, text_end);
        }

        self.push(text_end, DelimiterKind::LineEnd);
        if let Some(next) = next {
            let kind = if backslash_break || trailing >= hard_break_spaces {
                DelimiterKind::HardBreak { next }
            } else {
                DelimiterKind::SoftBreak { next }
            };
            self.push(text_end, kind);
        }
    }

    /// Whether the unit at `pos` is itself escaped by an odd run of
    /// backslashes before it.
    fn escaped(&self, start: Position, pos: Position) -> bool {
        let mut k = pos;
        while k > start && self.ascii(k - 1) == Some(Escape::BACKSLASH) {
            k -= 1;
        }
        (pos - k) % 2 == 1
    }

    /// Scans the construct starting at `i`, returning where scanning resumes.
    fn unit(&mut self, i: Position, line: Span, end: Position) -> Position {
        let Some(b) = self.ascii(i) else {
            return i + 1;
        };
        match b {
            Escape::BACKSLASH => {
                let escaped = (i + 1 < end)
                    .then(|| self.source[i + 1])
                    .filter(|&u| self.codec.is_punctuation(u));
                match escaped {
                    Some(u) => {
                        self.push(i + 1, DelimiterKind::Ignored);
                        // An escaped backtick still forms a run, it just
                        // cannot open a code span.
                        if self.codec.ascii(u) == Some(CodeSpan::TICK) {
                            i + 1
                        } else {
                            i + 2
                        }
                    }
                    None => i + 1,
                }
            }
            CodeSpan::TICK => {
                let j = self.run_end(i, end, b);
                self.push(i, DelimiterKind::CodeRun(j - i));
                j
            }
            _ if Emphasis::is_symbol(b) => {
                let j = self.run_end(i, end, b);
                self.emphasis(b, i, j, line);
                j
            }
            Reference::IMAGE if i + 1 < end && self.ascii(i + 1) == Some(Reference::OPEN) => {
                self.push(i, DelimiterKind::RefOpenImage);
                i + 2
            }
            Reference::OPEN => {
                self.push(i, DelimiterKind::RefOpen);
                i + 1
            }
            Reference::CLOSE => {
                self.push(i, DelimiterKind::RefClose);
                if i + 1 < end && self.ascii(i + 1) == Some(Reference::VALUE_OPEN) {
                    self.push(i + 1, DelimiterKind::RefValueOpen);
                    i + 2
                } else {
                    i + 1
                }
            }
            Reference::VALUE_OPEN => {
                self.push(i, DelimiterKind::LeftParen);
                i + 1
            }
            Reference::VALUE_CLOSE => {
                self.push(i, DelimiterKind::RightParen);
                i + 1
            }
            _ => i + 1,
        }
    }

    fn run_end(&self, mut j: Position, end: Position, b: u8) -> Position {
        while j < end && self.ascii(j) == Some(b) {
            j += 1;
        }
        j
    }

    fn flank(&self, pos: Option<Position>) -> Flank {
        match pos.map(|p| self.source[p]) {
            None => Flank::Whitespace,
            Some(u) if self.codec.is_whitespace(u) => Flank::Whitespace,
            Some(u) if self.codec.is_punctuation(u) => Flank::Punctuation,
            Some(_) => Flank::Neither,
        }
    }

    /// Classifies the run `[i, j)` and records it if it can open or close.
    fn emphasis(&mut self, symbol: u8, i: Position, j: Position, line: Span) {
        let prev = self.flank((i > line.start).then(|| i - 1));
        let next = self.flank((j < line.end).then_some(j));

        let left = next != Flank::Whitespace
            && (next != Flank::Punctuation || prev != Flank::Neither);
        let right = prev != Flank::Whitespace
            && (prev != Flank::Punctuation || next != Flank::Neither);

        let (can_open, can_close) = if symbol == Emphasis::UNDERSCORE {
            (
                left && (!right || next == Flank::Punctuation),
                right && (!left || prev == Flank::Punctuation),
            )
        } else {
            (left, right)
        };

        if can_open || can_close {
            self.push(
                i,
                DelimiterKind::Emphasis(EmphasisRun {
                    symbol,
                    len: j - i,
                    can_open,
                    can_close,
                }),
            );
        }
    }
}
