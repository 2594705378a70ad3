use log::trace;

use crate::parsing::source::{Codec, Span};
use crate::parsing::tree::Tree;

use super::{
    classify::MarkdownLineClassifier,
    kinds::{
        BlockQuote, FencedCode, Header, IndentedCode, List, ListItem, ListState, Paragraph,
        ReferenceDefinition, list,
    },
    open::OpenBlock,
    types::{CODE_INDENT, Line, LineKind},
};

/// Grows the block tree one classified line at a time.
///
/// Every line is first offered to the open strand from the root down; each
/// container either consumes it (possibly recursing into its own open child)
/// or rejects it. A line nobody takes starts a new top-level block.
///
/// Containers are addressed by strand depth: a quote at depth `d` keeps its
/// content at `d + 1`, a list at `d` keeps its items at `d + 1` and the last
/// item's content at `d + 2`.
pub struct BlockBuilder<'a, C: Codec> {
    classifier: MarkdownLineClassifier<'a, C>,
    tree: Tree<OpenBlock>,
}

impl<'a, C: Codec> BlockBuilder<'a, C> {
    pub fn new(classifier: MarkdownLineClassifier<'a, C>) -> Self {
        Self {
            classifier,
            tree: Tree::new(),
        }
    }

    /// Feeds one physical line (terminator excluded).
    pub fn push_line(&mut self, span: Span) {
        let line = self.classifier.classify(span);
        if self.add_line(0, &line) || line.is_empty() {
            return;
        }
        self.open(&line, 0);
    }

    pub fn finish(self) -> Tree<OpenBlock> {
        self.tree
    }

    /// Offers `line` to the open node at `depth`. Returns whether it was
    /// consumed.
    fn add_line(&mut self, depth: usize, line: &Line) -> bool {
        let Some(ix) = self.tree.index_at(depth) else {
            return false;
        };
        match &self.tree[ix] {
            OpenBlock::Paragraph(_) => self.add_to_paragraph(ix, line),
            OpenBlock::Fence(_) => self.add_to_fence(ix, line),
            OpenBlock::Code(_) => self.add_to_code(ix, line),
            OpenBlock::Quote(_) => self.add_to_quote(depth, ix, line),
            OpenBlock::List(_) => self.add_to_list(depth, ix, line),
            OpenBlock::ListItem(_) => {
                debug_assert!(false, "lines reach list items through their list");
                false
            }
            OpenBlock::Header(_)
            | OpenBlock::ThematicBreak(_)
            | OpenBlock::ReferenceDefinition(_) => false,
        }
    }

    fn add_to_paragraph(&mut self, ix: usize, line: &Line) -> bool {
        let OpenBlock::Paragraph(p) = &mut self.tree[ix] else {
            return false;
        };
        if p.closed {
            return false;
        }
        match line.kind {
            LineKind::Empty => {
                p.closed = true;
                true
            }
            LineKind::Text | LineKind::ReferenceDefinition { .. } => {
                p.push(line.span);
                true
            }
            _ if line.indent >= CODE_INDENT => {
                p.push(line.span);
                true
            }
            _ => false,
        }
    }

    fn add_to_fence(&mut self, ix: usize, line: &Line) -> bool {
        let indent = match &self.tree[ix] {
            OpenBlock::Fence(f) if !f.closed => f.indent,
            _ => return false,
        };
        if !line.is_empty() && line.indent < indent {
            return false;
        }
        let line = self.classifier.dedent(line, indent);
        let OpenBlock::Fence(fence) = &mut self.tree[ix] else {
            return false;
        };
        if let Some(marker) = fence.closed_by(&line) {
            trace!("fence closed at {marker:?}");
            fence.closing = Some(marker);
            fence.closed = true;
        } else {
            fence.body.push(line.indented_span());
        }
        true
    }

    fn add_to_code(&mut self, ix: usize, line: &Line) -> bool {
        let empty = line.is_empty();
        if !empty && line.indent < CODE_INDENT {
            return false;
        }
        let line = self.classifier.dedent(line, CODE_INDENT);
        let OpenBlock::Code(code) = &mut self.tree[ix] else {
            return false;
        };
        if empty {
            code.push_blank(line.indented_span());
        } else {
            code.push_line(line.indented_span());
        }
        true
    }

    fn add_to_quote(&mut self, depth: usize, ix: usize, line: &Line) -> bool {
        let OpenBlock::Quote(quote) = &self.tree[ix] else {
            return false;
        };
        if quote.closed {
            return false;
        }
        let lazy = quote.lazy;

        let accepted = if lazy && line.indent >= CODE_INDENT {
            self.add_line(depth + 1, &line.as_text())
        } else {
            match &line.kind {
                LineKind::Empty => {
                    if let OpenBlock::Quote(quote) = &mut self.tree[ix] {
                        quote.closed = true;
                    }
                    trace!("quote closed by blank line");
                    return true;
                }
                LineKind::QuoteMarker { marker, rest } if line.indent < CODE_INDENT => {
                    if let OpenBlock::Quote(quote) = &mut self.tree[ix] {
                        quote.markers.push(*marker);
                    }
                    if !self.add_line(depth + 1, rest) && !rest.is_empty() {
                        self.open(rest, depth + 1);
                    }
                    true
                }
                LineKind::Text if lazy => self.add_line(depth + 1, line),
                _ => false,
            }
        };

        if accepted {
            let lazy = self.paragraph_open_below(depth);
            if let OpenBlock::Quote(quote) = &mut self.tree[ix] {
                quote.lazy = lazy;
            }
        }
        accepted
    }

    fn add_to_list(&mut self, depth: usize, ix: usize, line: &Line) -> bool {
        let OpenBlock::List(l) = &self.tree[ix] else {
            return false;
        };
        if l.is_closed() {
            return false;
        }
        let (kind, min_indent, state) = (l.kind, l.min_indent, l.state);
        let content_depth = depth + 2;

        if line.is_empty() {
            let next = if state == ListState::FollowedByBlank && !self.fence_open_below(depth) {
                trace!("list closed by second blank line");
                ListState::Closed
            } else {
                let blank = self.classifier.dedent(line, min_indent);
                self.add_line(content_depth, &blank);
                ListState::FollowedByBlank
            };
            if let Some(l) = self.list_mut(ix) {
                l.state = next;
            }
            return true;
        }

        let after_blank = state == ListState::FollowedByBlank;
        let accepted = if line.indent >= min_indent && self.tree.index_at(depth + 1).is_some() {
            let content = self.classifier.dedent(line, min_indent);
            if !self.add_line(content_depth, &content) {
                self.open(&content, content_depth);
                if after_blank {
                    self.mark_loose(ix);
                }
            }
            true
        } else {
            match &line.kind {
                LineKind::ListMarker { kind: other, .. }
                    if line.indent < CODE_INDENT && kind.continues(other) =>
                {
                    if after_blank {
                        self.mark_loose(ix);
                    }
                    self.open_item(depth, line);
                    true
                }
                LineKind::Text if self.paragraph_open_below(depth) => {
                    self.add_line(content_depth, line)
                }
                _ => false,
            }
        };

        if accepted && after_blank {
            if let Some(l) = self.list_mut(ix) {
                l.state = ListState::Normal;
            }
        }
        accepted
    }

    /// Starts a block for `line` at `depth`, recursing through container
    /// markers.
    fn open(&mut self, line: &Line, depth: usize) {
        if line.indent >= CODE_INDENT {
            let code = self.classifier.dedent(line, CODE_INDENT);
            self.append(
                OpenBlock::Code(IndentedCode::new(code.indented_span())),
                depth,
            );
            return;
        }
        match &line.kind {
            LineKind::Empty => {}
            LineKind::Text => {
                self.append(OpenBlock::Paragraph(Paragraph::new(line.span)), depth);
            }
            LineKind::Header {
                level,
                opening,
                title,
                closing,
            } => {
                self.append(
                    OpenBlock::Header(Header {
                        level: *level,
                        opening: *opening,
                        title: *title,
                        closing: *closing,
                    }),
                    depth,
                );
            }
            LineKind::ThematicBreak => {
                self.append(OpenBlock::ThematicBreak(line.span), depth);
            }
            LineKind::Fence {
                style,
                run,
                marker,
                name,
            } => {
                self.append(
                    OpenBlock::Fence(FencedCode {
                        style: *style,
                        run: *run,
                        indent: line.indent,
                        opening: *marker,
                        name: *name,
                        body: Vec::new(),
                        closing: None,
                        closed: false,
                    }),
                    depth,
                );
            }
            LineKind::ReferenceDefinition { title, value } => {
                self.append(
                    OpenBlock::ReferenceDefinition(ReferenceDefinition {
                        title: title.clone(),
                        value: value.clone(),
                    }),
                    depth,
                );
            }
            LineKind::QuoteMarker { marker, rest } => {
                let ix = self.append(OpenBlock::Quote(BlockQuote::new(*marker)), depth);
                if !rest.is_empty() {
                    self.open(rest, depth + 1);
                }
                let lazy = self.paragraph_open_below(depth);
                if let OpenBlock::Quote(quote) = &mut self.tree[ix] {
                    quote.lazy = lazy;
                }
            }
            LineKind::ListMarker { kind, .. } => {
                self.append(OpenBlock::List(List::new(*kind)), depth);
                self.open_item(depth, line);
            }
        }
    }

    /// Appends a new item to the list at `depth` for the marker `line`.
    fn open_item(&mut self, depth: usize, line: &Line) {
        let LineKind::ListMarker { marker, rest, .. } = &line.kind else {
            debug_assert!(false, "list item opened without a marker");
            return;
        };
        let Some(ix) = self.tree.index_at(depth) else {
            return;
        };
        let min_indent = list::item_indent(line.indent, *marker, rest);
        if let Some(l) = self.list_mut(ix) {
            l.min_indent = min_indent;
        }
        self.append(OpenBlock::ListItem(ListItem { marker: *marker }), depth + 1);
        if !rest.is_empty() {
            let content = self.classifier.dedent(rest, list::content_gap(rest));
            self.open(&content, depth + 2);
        }
    }

    fn append(&mut self, block: OpenBlock, depth: usize) -> usize {
        trace!("open {} at depth {depth}", block.name());
        self.tree.append(block, depth)
    }

    fn list_mut(&mut self, ix: usize) -> Option<&mut List> {
        match self.tree.get_mut(ix) {
            Some(OpenBlock::List(l)) => Some(l),
            _ => None,
        }
    }

    fn mark_loose(&mut self, ix: usize) {
        if let Some(l) = self.list_mut(ix) {
            l.loose = true;
        }
    }

    /// Whether the deepest open block strictly below `depth` is an open
    /// paragraph.
    fn paragraph_open_below(&self, depth: usize) -> bool {
        self.tree.depth() > depth + 1 && self.tree.leaf().is_some_and(OpenBlock::is_open_paragraph)
    }

    fn fence_open_below(&self, depth: usize) -> bool {
        self.tree.depth() > depth + 1
            && matches!(self.tree.leaf(), Some(OpenBlock::Fence(f)) if !f.closed)
    }
}
