use std::cmp::Reverse;

use crate::parsing::source::Span;

use super::resolve::Resolved;
use super::types::InlineNode;

struct Entry {
    resolved: Option<Resolved>,
    span: Span,
    content: Option<Span>,
    children: Vec<usize>,
}

/// Nests resolved nodes by range containment and fills the gaps with text.
///
/// Nodes are placed in start order (outermost first on ties) while keeping
/// the path of open containers: a node goes under the deepest open node
/// whose content range holds it. Text comes from `text` (sorted, disjoint
/// ranges) wherever no node covers it, split across levels as needed.
pub fn assemble(mut resolved: Vec<Resolved>, text: &[Span], bounds: Span) -> Vec<InlineNode> {
    resolved.sort_by_key(|r| {
        let span = r.span();
        (span.start, Reverse(span.end))
    });

    let mut arena: Vec<Entry> = Vec::with_capacity(resolved.len());
    let mut roots = Vec::new();
    let mut path: Vec<usize> = Vec::new();
    for r in resolved {
        let span = r.span();
        while let Some(&top) = path.last() {
            if arena[top].content.is_some_and(|c| c.contains(span)) {
                break;
            }
            path.pop();
        }
        let ix = arena.len();
        match path.last() {
            Some(&parent) => arena[parent].children.push(ix),
            None => roots.push(ix),
        }
        let content = r.content();
        arena.push(Entry {
            resolved: Some(r),
            span,
            content,
            children: Vec::new(),
        });
        if content.is_some() {
            path.push(ix);
        }
    }

    Filler { arena, text }.fill(&roots, bounds)
}

struct Filler<'t> {
    arena: Vec<Entry>,
    text: &'t [Span],
}

impl Filler<'_> {
    fn fill(&mut self, ids: &[usize], within: Span) -> Vec<InlineNode> {
        let mut out = Vec::new();
        let mut cursor = within.start;
        for &id in ids {
            let span = self.arena[id].span;
            self.text_between(&mut out, cursor, span.start.min(within.end));
            let children = std::mem::take(&mut self.arena[id].children);
            let inner = match self.arena[id].content {
                Some(content) => self.fill(&children, content),
                None => Vec::new(),
            };
            if let Some(r) = self.arena[id].resolved.take() {
                out.push(r.into_node(inner));
            }
            cursor = cursor.max(span.end);
        }
        self.text_between(&mut out, cursor, within.end);
        out
    }

    fn text_between(&self, out: &mut Vec<InlineNode>, lo: usize, hi: usize) {
        if lo >= hi {
            return;
        }
        let first = self.text.partition_point(|t| t.end <= lo);
        for t in &self.text[first..] {
            if t.start >= hi {
                break;
            }
            let piece = Span::new(t.start.max(lo), t.end.min(hi));
            if !piece.is_empty() {
                out.push(InlineNode::Text(piece));
            }
        }
    }
}
