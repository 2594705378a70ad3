use crate::parsing::source::{Codec, Cursor, Position, Span};

use super::kinds::{BlockQuote, FencedCode, Header, List, ReferenceDefinition};
use super::types::{BulletSymbol, FenceStyle, Line, LineKind, ListKind, Separator};

/// Classifies individual lines for the block parsing phase.
///
/// Classification only looks at the line itself; container context is the
/// builder's business. Every speculative parse is an attempt that takes the
/// cursor by value and returns `None` on failure, so a rejected attempt
/// leaves nothing half-consumed and the line falls back to [`LineKind::Text`].
pub struct MarkdownLineClassifier<'a, C: Codec> {
    source: &'a [C::Unit],
    codec: &'a C,
    tab_width: usize,
}

impl<'a, C: Codec> MarkdownLineClassifier<'a, C> {
    pub fn new(source: &'a [C::Unit], codec: &'a C, tab_width: usize) -> Self {
        Self {
            source,
            codec,
            tab_width: tab_width.max(1),
        }
    }

    /// Classifies the line content `span` (terminator excluded).
    pub fn classify(&self, span: Span) -> Line {
        self.classify_from(Cursor::new(self.source, self.codec, span.start, span.end))
    }

    fn classify_from(&self, mut cur: Cursor<'a, C>) -> Line {
        let start = cur.pos();
        let indent = self.consume_indent(&mut cur);
        let span = Span::new(cur.pos(), cur.end());

        let kind = if cur.eof() {
            LineKind::Empty
        } else {
            match cur.peek() {
                Some(BlockQuote::PREFIX) => Some(self.quote(cur)),
                Some(b @ (b'-' | b'*')) => {
                    Self::thematic_break(cur, b).or_else(|| self.bullet(cur, b))
                }
                Some(b @ b'+') => self.bullet(cur, b),
                Some(b @ b'_') => Self::thematic_break(cur, b),
                Some(b'0'..=b'9') => self.ordered(cur),
                Some(Header::MARKER) => self.header(cur),
                Some(b @ (b'`' | b'~')) => self.fence(cur, b),
                Some(ReferenceDefinition::OPEN) => self.reference_definition(cur),
                _ => None,
            }
            .unwrap_or(LineKind::Text)
        };

        Line {
            kind,
            indent,
            start,
            span,
        }
    }

    /// Removes up to `cols` columns of leading indentation from `line`.
    ///
    /// A tab that would overshoot is left in place; the columns it
    /// represents are still subtracted from the indent.
    pub fn dedent(&self, line: &Line, cols: usize) -> Line {
        let mut pos = line.start;
        let mut consumed = 0;
        while pos < line.span.start && consumed < cols {
            let width = match self.codec.ascii(self.source[pos]) {
                Some(b'\t') => self.tab_width,
                _ => 1,
            };
            if consumed + width > cols {
                break;
            }
            consumed += width;
            pos += 1;
        }
        Line {
            kind: line.kind.clone(),
            indent: line.indent.saturating_sub(cols),
            start: pos,
            span: line.span,
        }
    }

    fn consume_indent(&self, cur: &mut Cursor<'a, C>) -> usize {
        let mut width = 0;
        loop {
            match cur.peek() {
                Some(b' ') => width += 1,
                Some(b'\t') => width += self.tab_width,
                _ => return width,
            }
            cur.bump();
        }
    }

    fn quote(&self, mut cur: Cursor<'a, C>) -> LineKind {
        let marker = cur.pos();
        cur.bump();
        cur.eat(b' ');
        LineKind::QuoteMarker {
            marker,
            rest: Box::new(self.classify_from(cur)),
        }
    }

    /// Three or more `symbol`s, interleaved only with blanks.
    fn thematic_break(mut cur: Cursor<'a, C>, symbol: u8) -> Option<LineKind> {
        let mut count = 0;
        while !cur.eof() {
            match cur.peek() {
                Some(b) if b == symbol => count += 1,
                Some(b' ' | b'\t') => {}
                _ => return None,
            }
            cur.bump();
        }
        (count >= 3).then_some(LineKind::ThematicBreak)
    }

    fn bullet(&self, mut cur: Cursor<'a, C>, symbol: u8) -> Option<LineKind> {
        let bullet = BulletSymbol::from_marker(symbol)?;
        let start = cur.pos();
        cur.bump();
        self.list_marker(cur, ListKind::Bullet(bullet), start)
    }

    fn ordered(&self, mut cur: Cursor<'a, C>) -> Option<LineKind> {
        let start_pos = cur.pos();
        let mut number: u32 = 0;
        let mut digits = 0;
        while let Some(d) = cur.peek_unit().and_then(|u| self.codec.digit(u)) {
            digits += 1;
            if digits > List::MAX_DIGITS {
                return None;
            }
            number = number * 10 + d;
            cur.bump();
        }
        let separator = match cur.peek()? {
            b'.' => Separator::Dot,
            b')' => Separator::Paren,
            _ => return None,
        };
        cur.bump();
        self.list_marker(
            cur,
            ListKind::Ordered {
                separator,
                start: number,
            },
            start_pos,
        )
    }

    /// Finishes a list marker whose symbol ends just before `cur`.
    fn list_marker(&self, cur: Cursor<'a, C>, kind: ListKind, start: Position) -> Option<LineKind> {
        if !(cur.eof() || cur.at_blank()) {
            return None;
        }
        Some(LineKind::ListMarker {
            kind,
            marker: Span::new(start, cur.pos()),
            rest: Box::new(self.classify_from(cur)),
        })
    }

    fn header(&self, mut cur: Cursor<'a, C>) -> Option<LineKind> {
        let open_start = cur.pos();
        let level = cur.run_of(Header::MARKER);
        if level > Header::MAX_LEVEL || !(cur.eof() || cur.at_blank()) {
            return None;
        }
        let opening = Span::new(open_start, cur.pos());
        cur.skip_blanks();

        let title_start = cur.pos();
        let mut end = self.trim_end(title_start, cur.end());
        let mut closing = None;
        let mut run_start = end;
        while run_start > title_start && self.ascii_at(run_start - 1) == Some(Header::MARKER) {
            run_start -= 1;
        }
        if run_start < end
            && (run_start == title_start || self.is_blank_at(run_start - 1))
        {
            closing = Some(Span::new(run_start, end));
            end = self.trim_end(title_start, run_start);
        }

        Some(LineKind::Header {
            level: level as u8,
            opening,
            title: Span::new(title_start, end),
            closing,
        })
    }

    fn fence(&self, mut cur: Cursor<'a, C>, symbol: u8) -> Option<LineKind> {
        let style = FenceStyle::from_marker(symbol)?;
        let marker_start = cur.pos();
        let run = cur.run_of(symbol);
        if run < FencedCode::MIN_RUN {
            return None;
        }
        let marker = Span::new(marker_start, cur.pos());
        if style == FenceStyle::Backtick {
            let mut rest = cur;
            while !rest.eof() {
                if rest.peek() == Some(b'`') {
                    return None;
                }
                rest.bump();
            }
        }
        cur.skip_blanks();
        let name_start = cur.pos();
        while !cur.eof() && !cur.at_blank() {
            cur.bump();
        }
        Some(LineKind::Fence {
            style,
            run,
            marker,
            name: Span::new(name_start, cur.pos()),
        })
    }

    /// `[title]: value`. Backslash escapes one unit inside the title, and an
    /// unescaped `[` rejects the line.
    fn reference_definition(&self, mut cur: Cursor<'a, C>) -> Option<LineKind> {
        cur.bump();
        let title_start = cur.pos();
        loop {
            match cur.peek() {
                _ if cur.eof() => return None,
                Some(b'\\') => {
                    cur.bump_n(2);
                }
                Some(ReferenceDefinition::OPEN) => return None,
                Some(ReferenceDefinition::CLOSE) => break,
                _ => {
                    cur.bump();
                }
            }
        }
        let title = Span::new(title_start, cur.pos());
        cur.bump();
        if title.is_empty() || !cur.eat(ReferenceDefinition::SEPARATOR) {
            return None;
        }
        cur.skip_blanks();
        let value = Span::new(cur.pos(), self.trim_end(cur.pos(), cur.end()));
        if value.is_empty() {
            return None;
        }
        Some(LineKind::ReferenceDefinition {
            title: self.codec.decode_span(self.source, title),
            value: self.codec.decode_span(self.source, value),
        })
    }

    fn ascii_at(&self, pos: Position) -> Option<u8> {
        self.source.get(pos).and_then(|&u| self.codec.ascii(u))
    }

    fn is_blank_at(&self, pos: Position) -> bool {
        matches!(self.ascii_at(pos), Some(b' ' | b'\t'))
    }

    /// `end` moved back over trailing blanks, never before `start`.
    fn trim_end(&self, start: Position, mut end: Position) -> Position {
        while end > start && self.is_blank_at(end - 1) {
            end -= 1;
        }
        end
    }
}
