use std::collections::HashSet;

use log::trace;

use crate::parsing::references::{ReferenceStore, reference_key};
use crate::parsing::source::{Codec, Position, Span};

use super::delimiter::{Delimiter, DelimiterKind, Delimiters};
use super::kinds::Emphasis;
use super::types::{InlineNode, ReferenceKind};

/// A matched construct, before nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Emphasis {
        level: usize,
        span: Span,
    },
    CodeSpan {
        marker_level: usize,
        span: Span,
    },
    Reference {
        kind: ReferenceKind,
        span: Span,
        title: Span,
        value: String,
    },
    Escape(Position),
    SoftBreak(Span),
    HardBreak(Span),
}

impl Resolved {
    pub fn span(&self) -> Span {
        match self {
            Resolved::Emphasis { span, .. }
            | Resolved::CodeSpan { span, .. }
            | Resolved::Reference { span, .. }
            | Resolved::SoftBreak(span)
            | Resolved::HardBreak(span) => *span,
            Resolved::Escape(at) => Span::new(*at, at + 1),
        }
    }

    /// Where children go; `None` for leaves.
    pub fn content(&self) -> Option<Span> {
        match self {
            Resolved::Emphasis { level, span } => Some(span.shrink(*level)),
            Resolved::CodeSpan { marker_level, span } => Some(span.shrink(*marker_level)),
            Resolved::Reference { title, .. } => Some(*title),
            _ => None,
        }
    }

    pub fn into_node(self, children: Vec<InlineNode>) -> InlineNode {
        match self {
            Resolved::Emphasis { level, span } => InlineNode::Emphasis {
                level,
                span,
                children,
            },
            Resolved::CodeSpan { marker_level, span } => InlineNode::CodeSpan {
                marker_level,
                span,
                children,
            },
            Resolved::Reference {
                kind,
                span,
                title,
                value,
            } => InlineNode::Reference {
                kind,
                span,
                title,
                value,
                children,
            },
            Resolved::Escape(at) => InlineNode::EscapingBackslash(at),
            Resolved::SoftBreak(span) => InlineNode::SoftBreak(span),
            Resolved::HardBreak(span) => InlineNode::HardBreak(span),
        }
    }
}

/// Matches delimiters in three passes: code spans, references, emphasis.
///
/// Each pass tombstones what it consumes, so later passes only see what is
/// left. Nothing here fails: unmatched delimiters stay literal text.
pub struct Resolver<'a, C: Codec, S: ReferenceStore + ?Sized> {
    source: &'a [C::Unit],
    codec: &'a C,
    store: &'a S,
    delims: Delimiters,
    nodes: Vec<Resolved>,
    /// Link values and keys; anything resolved inside them is dropped.
    consumed: Vec<Span>,
    /// For each opening paren, the index of its balancing `)`.
    parens: Vec<Option<usize>>,
}

impl<'a, C: Codec, S: ReferenceStore + ?Sized> Resolver<'a, C, S> {
    pub fn new(source: &'a [C::Unit], codec: &'a C, store: &'a S, delims: Delimiters) -> Self {
        Self {
            source,
            codec,
            store,
            delims,
            nodes: Vec::new(),
            consumed: Vec::new(),
            parens: Vec::new(),
        }
    }

    pub fn resolve(mut self) -> Vec<Resolved> {
        let all = self.delims.len();
        self.code_spans();
        self.references();
        self.emphasis(0, all);
        self.leftovers(0, all);
        self.drop_consumed();
        trace!(
            "resolved {} inline nodes from {all} delimiters",
            self.nodes.len()
        );
        self.nodes
    }

    fn kind_at(&self, ix: usize) -> Option<DelimiterKind> {
        self.delims.get(ix).copied().flatten().map(|d| d.kind)
    }

    fn position_at(&self, ix: usize) -> Option<Position> {
        self.delims.get(ix).copied().flatten().map(|d| d.position)
    }

    fn tombstone(&mut self, lo: usize, hi: usize) {
        for slot in &mut self.delims[lo..hi] {
            *slot = None;
        }
    }

    /// Pairs backtick runs of exactly equal length.
    ///
    /// A length with no closer left is remembered, so each failed search
    /// costs at most one scan per distinct run length.
    fn code_spans(&mut self) {
        let mut exhausted = HashSet::new();
        let mut i = 0;
        while i < self.delims.len() {
            let Some(Delimiter {
                position,
                kind: DelimiterKind::CodeRun(len),
            }) = self.delims[i]
            else {
                i += 1;
                continue;
            };
            if self.escaped_run(i, position) || exhausted.contains(&len) {
                i += 1;
                continue;
            }
            let closer = (i + 1..self.delims.len())
                .find(|&j| self.kind_at(j) == Some(DelimiterKind::CodeRun(len)));
            match closer.and_then(|j| Some((j, self.position_at(j)?))) {
                Some((j, close)) => {
                    self.nodes.push(Resolved::CodeSpan {
                        marker_level: len,
                        span: Span::new(position, close + len),
                    });
                    self.tombstone(i, j + 1);
                    i = j + 1;
                }
                None => {
                    exhausted.insert(len);
                    i += 1;
                }
            }
        }
    }

    /// A run whose first backtick was escaped cannot open a code span.
    fn escaped_run(&self, i: usize, position: Position) -> bool {
        i > 0
            && self.delims[i - 1]
                .is_some_and(|d| d.kind == DelimiterKind::Ignored && d.position == position)
    }

    /// Pairs each closer with the nearest unresolved opener before it.
    fn references(&mut self) {
        self.parens = self.balance_parens();
        let mut openers = Vec::new();
        let mut i = 0;
        while i < self.delims.len() {
            match self.kind_at(i) {
                Some(DelimiterKind::RefOpen | DelimiterKind::RefOpenImage) => openers.push(i),
                Some(DelimiterKind::RefClose) => {
                    if let Some(open) = openers.pop() {
                        if let Some(last) = self.reference(open, i) {
                            i = last + 1;
                            continue;
                        }
                        self.delims[open] = None;
                    }
                    self.delims[i] = None;
                }
                _ => {}
            }
            i += 1;
        }
    }

    /// Tries every reference form for the bracket pair `open..=close`.
    /// Returns the index of the last delimiter consumed.
    fn reference(&mut self, open: usize, close: usize) -> Option<usize> {
        let op = self.delims[open]?;
        let cl = self.delims[close]?;
        let (kind, marker) = match op.kind {
            DelimiterKind::RefOpenImage => (ReferenceKind::Image, 2),
            _ => (ReferenceKind::Normal, 1),
        };
        let title = Span::new(op.position + marker, cl.position);

        if self.kind_at(close + 1) == Some(DelimiterKind::RefValueOpen) {
            let value_open = self.position_at(close + 1)?;
            if let Some(r) = self.matching_paren(close + 1) {
                let value_close = self.position_at(r)?;
                let value = self
                    .codec
                    .decode_span(self.source, Span::new(value_open + 1, value_close))
                    .trim()
                    .to_string();
                return Some(self.emit(ReferenceMatch {
                    open,
                    close,
                    last: r,
                    kind,
                    span: Span::new(op.position, value_close + 1),
                    title,
                    value,
                    consumed: Span::new(value_open, value_close + 1),
                }));
            }
        }

        if self.kind_at(close + 1) == Some(DelimiterKind::RefOpen)
            && self.position_at(close + 1) == Some(cl.position + 1)
        {
            if let Some(k) = self.key_closer(close + 2) {
                let key_open = cl.position + 1;
                let key_close = self.position_at(k)?;
                let key = Span::new(key_open + 1, key_close);
                let value = self.lookup(if key.is_empty() { title } else { key })?;
                return Some(self.emit(ReferenceMatch {
                    open,
                    close,
                    last: k,
                    kind,
                    span: Span::new(op.position, key_close + 1),
                    title,
                    value,
                    consumed: Span::new(key_open, key_close + 1),
                }));
            }
        }

        let value = self.lookup(title)?;
        Some(self.emit(ReferenceMatch {
            open,
            close,
            last: close,
            kind,
            span: Span::new(op.position, cl.position + 1),
            title,
            value,
            consumed: Span::empty(cl.position + 1),
        }))
    }

    fn lookup(&self, label: Span) -> Option<String> {
        let key = reference_key(&self.codec.decode_span(self.source, label));
        self.store.lookup(&key).map(str::to_string)
    }

    /// Pairs every paren in one pass. Code spans are already tombstoned and
    /// the reference pass never touches parens past its cursor, so the
    /// pairing stays valid for the whole pass.
    fn balance_parens(&self) -> Vec<Option<usize>> {
        let mut parens = vec![None; self.delims.len()];
        let mut open = Vec::new();
        for k in 0..self.delims.len() {
            match self.kind_at(k) {
                Some(DelimiterKind::LeftParen | DelimiterKind::RefValueOpen) => open.push(k),
                Some(DelimiterKind::RightParen) => {
                    if let Some(o) = open.pop() {
                        parens[o] = Some(k);
                    }
                }
                _ => {}
            }
        }
        parens
    }

    /// The `)` balancing the value opened at `value_open`, honouring nested
    /// parens.
    fn matching_paren(&self, value_open: usize) -> Option<usize> {
        self.parens.get(value_open).copied().flatten()
    }

    /// The `]` ending a reference key; keys cannot contain brackets.
    fn key_closer(&self, from: usize) -> Option<usize> {
        for k in from..self.delims.len() {
            match self.kind_at(k) {
                Some(DelimiterKind::RefClose) => return Some(k),
                Some(DelimiterKind::RefOpen | DelimiterKind::RefOpenImage) => return None,
                _ => {}
            }
        }
        None
    }

    fn emit(&mut self, m: ReferenceMatch) -> usize {
        self.emphasis(m.open + 1, m.close);
        self.leftovers(m.open + 1, m.close);
        self.tombstone(m.open, m.last + 1);
        if !m.consumed.is_empty() {
            self.consumed.push(m.consumed);
        }
        self.nodes.push(Resolved::Reference {
            kind: m.kind,
            span: m.span,
            title: m.title,
            value: m.value,
        });
        m.last
    }

    /// Matches emphasis runs in `lo..hi` against the nearest compatible
    /// opener, consuming `min(l1, l2)` units from the inner edges each step.
    fn emphasis(&mut self, lo: usize, hi: usize) {
        let mut openers: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
        let slot = |symbol: u8| usize::from(symbol == Emphasis::UNDERSCORE);

        for i in lo..hi {
            let Some(mut closer) = self.delims[i] else {
                continue;
            };
            let Some(mut run) = closer.emphasis() else {
                continue;
            };
            let same = slot(run.symbol);

            if run.can_close {
                while run.len > 0 {
                    let Some(&o) = openers[same].last() else {
                        break;
                    };
                    let Some((mut opener, mut orun)) =
                        self.delims[o].and_then(|d| Some((d, d.emphasis()?)))
                    else {
                        openers[same].pop();
                        continue;
                    };

                    let n = orun.len.min(run.len);
                    self.nodes.push(Resolved::Emphasis {
                        level: n,
                        span: Span::new(opener.position + orun.len - n, closer.position + n),
                    });

                    // Openers of the other symbol inside the match can no
                    // longer pair with anything outside it.
                    let other = &mut openers[1 - same];
                    while other.last().is_some_and(|&k| k > o) {
                        if let Some(k) = other.pop() {
                            self.delims[k] = None;
                        }
                    }

                    orun.len -= n;
                    if orun.len == 0 {
                        self.delims[o] = None;
                        openers[same].pop();
                    } else {
                        opener.kind = DelimiterKind::Emphasis(orun);
                        self.delims[o] = Some(opener);
                    }
                    run.len -= n;
                    closer.position += n;
                    closer.kind = DelimiterKind::Emphasis(run);
                }
                if run.len == 0 {
                    self.delims[i] = None;
                    continue;
                }
                self.delims[i] = Some(closer);
            }

            if run.can_open {
                openers[same].push(i);
            }
        }
    }

    /// Turns surviving escapes and line breaks in `lo..hi` into nodes.
    fn leftovers(&mut self, lo: usize, hi: usize) {
        for k in lo..hi {
            let Some(d) = self.delims[k] else {
                continue;
            };
            let node = match d.kind {
                DelimiterKind::Ignored => Resolved::Escape(d.position.saturating_sub(1)),
                DelimiterKind::SoftBreak { next } => {
                    Resolved::SoftBreak(Span::new(d.position, next))
                }
                DelimiterKind::HardBreak { next } => {
                    Resolved::HardBreak(Span::new(d.position, next))
                }
                _ => continue,
            };
            self.nodes.push(node);
            self.delims[k] = None;
        }
    }

    fn drop_consumed(&mut self) {
        if self.consumed.is_empty() {
            return;
        }
        let mut consumed = std::mem::take(&mut self.consumed);
        consumed.sort();
        self.nodes.retain(|node| {
            let span = node.span();
            let after = consumed.partition_point(|c| c.start <= span.start);
            after == 0 || !consumed[after - 1].contains(span)
        });
    }
}

struct ReferenceMatch {
    open: usize,
    close: usize,
    last: usize,
    kind: ReferenceKind,
    span: Span,
    title: Span,
    value: String,
    consumed: Span,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::inline::scanner::scan;
    use crate::parsing::references::MemoryReferenceStore;
    use crate::parsing::source::Utf8;
    use pretty_assertions::assert_eq;

    fn resolve_with(text: &str, store: &MemoryReferenceStore) -> Vec<Resolved> {
        let src = text.as_bytes();
        let scanned = scan(src, &Utf8, &[Span::new(0, src.len())], 2);
        let mut nodes = Resolver::new(src, &Utf8, store, scanned.delimiters).resolve();
        nodes.sort_by_key(|n| n.span());
        nodes
    }

    fn resolve(text: &str) -> Vec<Resolved> {
        resolve_with(text, &MemoryReferenceStore::new())
    }

    #[test]
    fn code_span_needs_exact_length() {
        assert_eq!(resolve("`a``b"), vec![]);
        assert_eq!(
            resolve("`a``b`"),
            vec![Resolved::CodeSpan {
                marker_level: 1,
                span: Span::new(0, 6)
            }]
        );
        assert_eq!(
            resolve("``a`b``"),
            vec![Resolved::CodeSpan {
                marker_level: 2,
                span: Span::new(0, 7)
            }]
        );
    }

    #[test]
    fn code_span_swallows_emphasis() {
        assert_eq!(
            resolve("`*a*`"),
            vec![Resolved::CodeSpan {
                marker_level: 1,
                span: Span::new(0, 5)
            }]
        );
    }

    #[test]
    fn escaped_backtick_cannot_open_but_can_close() {
        assert_eq!(resolve(r"\`a`"), vec![Resolved::Escape(0)]);
        assert_eq!(
            resolve(r"`a\`"),
            vec![Resolved::CodeSpan {
                marker_level: 1,
                span: Span::new(0, 4)
            }]
        );
    }

    #[test]
    fn equal_runs_make_one_node() {
        assert_eq!(
            resolve("**a**"),
            vec![Resolved::Emphasis {
                level: 2,
                span: Span::new(0, 5)
            }]
        );
    }

    #[test]
    fn longer_opener_keeps_outer_remainder() {
        assert_eq!(
            resolve("**a*"),
            vec![Resolved::Emphasis {
                level: 1,
                span: Span::new(1, 4)
            }]
        );
    }

    #[test]
    fn longer_closer_keeps_outer_remainder() {
        assert_eq!(
            resolve("*a**"),
            vec![Resolved::Emphasis {
                level: 1,
                span: Span::new(0, 3)
            }]
        );
    }

    #[test]
    fn remainder_matches_again() {
        assert_eq!(
            resolve("***a** b*"),
            vec![
                Resolved::Emphasis {
                    level: 1,
                    span: Span::new(0, 9)
                },
                Resolved::Emphasis {
                    level: 2,
                    span: Span::new(1, 6)
                },
            ]
        );
    }

    #[test]
    fn crossing_symbols_drop_inner_opener() {
        assert_eq!(
            resolve("*a _b* c_"),
            vec![Resolved::Emphasis {
                level: 1,
                span: Span::new(0, 6)
            }]
        );
    }

    #[test]
    fn inline_reference_with_nested_parens() {
        assert_eq!(
            resolve("[a](b(c))"),
            vec![Resolved::Reference {
                kind: ReferenceKind::Normal,
                span: Span::new(0, 9),
                title: Span::new(1, 2),
                value: "b(c)".into(),
            }]
        );
    }

    #[test]
    fn unclosed_values_only_match_the_innermost_paren() {
        let text = format!("{})", "[a](".repeat(5_000));
        let last = 4 * 4_999;
        assert_eq!(
            resolve(&text),
            vec![Resolved::Reference {
                kind: ReferenceKind::Normal,
                span: Span::new(last, text.len()),
                title: Span::new(last + 1, last + 2),
                value: String::new(),
            }]
        );
    }

    #[test]
    fn unclosed_values_stay_literal() {
        assert_eq!(resolve(&"[a](".repeat(20_000)), vec![]);
        assert_eq!(resolve("[a](b (c)"), vec![]);
    }

    #[test]
    fn undefined_shortcut_is_literal() {
        assert_eq!(resolve("[a]"), vec![]);
    }

    #[test]
    fn full_and_collapsed_forms_use_store() {
        let mut store = MemoryReferenceStore::new();
        store.insert_if_absent("k".into(), "kv".into());
        store.insert_if_absent("t".into(), "tv".into());

        let full = resolve_with("![x][K]", &store);
        assert_eq!(
            full,
            vec![Resolved::Reference {
                kind: ReferenceKind::Image,
                span: Span::new(0, 7),
                title: Span::new(2, 3),
                value: "kv".into(),
            }]
        );

        let collapsed = resolve_with("[T][]", &store);
        assert_eq!(
            collapsed,
            vec![Resolved::Reference {
                kind: ReferenceKind::Normal,
                span: Span::new(0, 5),
                title: Span::new(1, 2),
                value: "tv".into(),
            }]
        );

        assert_eq!(resolve_with("[t][missing]", &store), vec![]);
    }

    #[test]
    fn emphasis_inside_title_resolves_first() {
        assert_eq!(
            resolve("*[*a*](u)"),
            vec![
                Resolved::Reference {
                    kind: ReferenceKind::Normal,
                    span: Span::new(1, 9),
                    title: Span::new(2, 5),
                    value: "u".into(),
                },
                Resolved::Emphasis {
                    level: 1,
                    span: Span::new(2, 5)
                },
            ]
        );
    }

    #[test]
    fn code_span_in_value_is_dropped() {
        assert_eq!(
            resolve("[a](`x`)"),
            vec![Resolved::Reference {
                kind: ReferenceKind::Normal,
                span: Span::new(0, 8),
                title: Span::new(1, 2),
                value: "`x`".into(),
            }]
        );
    }
}
