use crate::parsing::ast::BlockNode;
use crate::parsing::inline::InlineNode;
use crate::parsing::source::Span;

/// Panics unless `blocks` is well-formed over a source of `len` units.
pub fn check(len: usize, blocks: &[BlockNode]) {
    let mut previous: Option<Span> = None;
    for b in blocks {
        for sp in b.ranges() {
            assert!(
                sp.start <= sp.end && sp.end <= len,
                "block range out of bounds: {sp:?} (source len: {len})"
            );
            if let Some(prev) = previous {
                assert!(
                    prev.end <= sp.start,
                    "block ranges out of order: {prev:?} then {sp:?}"
                );
            }
            previous = Some(sp);
        }
        check_block(len, b);
    }
}

fn check_block(len: usize, b: &BlockNode) {
    match b {
        BlockNode::Paragraph { lines, inlines } => {
            if let (Some(first), Some(last)) = (lines.first(), lines.last()) {
                check_inlines(len, Span::new(first.start, last.end), inlines);
            }
        }
        BlockNode::Header { title, inlines, .. } => check_inlines(len, *title, inlines),
        _ => {}
    }
    for child in b.children() {
        check_block(len, child);
    }
}

fn check_inlines(len: usize, parent: Span, nodes: &[InlineNode]) {
    let mut previous: Option<Span> = None;
    for n in nodes {
        let sp = n.span();
        assert!(
            sp.start <= sp.end && sp.end <= len,
            "inline span out of bounds: {sp:?} (source len: {len})"
        );
        assert!(
            parent.contains(sp),
            "inline span not contained in parent: {sp:?}, parent {parent:?}"
        );
        if let Some(prev) = previous {
            assert!(
                prev.end <= sp.start,
                "inline siblings overlap: {prev:?} then {sp:?}"
            );
        }
        previous = Some(sp);

        if let InlineNode::CodeSpan { children, .. } = n {
            assert!(
                children.iter().all(|c| matches!(c, InlineNode::Text(_))),
                "code span at {sp:?} holds structured children: {children:?}"
            );
        }
        if let Some(content) = n.content_span() {
            check_inlines(len, content, n.children());
        }
    }
}
