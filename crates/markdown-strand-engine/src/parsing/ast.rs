//! # Output Tree
//!
//! The immutable block forest handed to callers, and the end-of-document
//! pass that produces it from the open-block tree: reference definitions are
//! merged into the store first, then every inline-bearing block is resolved.

use crate::config::ParseOptions;
use crate::parsing::blocks::{FenceStyle, ListKind, OpenBlock};
use crate::parsing::inline::{InlineNode, parse_inline};
use crate::parsing::references::ReferenceStore;
use crate::parsing::source::{Codec, Position, Span};
use crate::parsing::tree::{Node, Tree};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockNode {
    Paragraph {
        /// One span per line, indentation excluded.
        lines: Vec<Span>,
        inlines: Vec<InlineNode>,
    },
    Header {
        level: u8,
        title: Span,
        /// The opening `#` run, then the closing run if any.
        markers: Vec<Span>,
        inlines: Vec<InlineNode>,
    },
    Quote {
        /// Every `>` that belongs to this quote.
        markers: Vec<Position>,
        children: Vec<BlockNode>,
    },
    List {
        kind: ListKind,
        /// No blank line separates the items or their blocks.
        tight: bool,
        items: Vec<ListItem>,
    },
    Fence {
        style: FenceStyle,
        /// Length of the opening run.
        level: usize,
        opening: Span,
        name: Span,
        /// Body lines, stripped of the fence's own indentation only.
        body: Vec<Span>,
        closing: Option<Span>,
    },
    Code {
        lines: Vec<Span>,
    },
    ThematicBreak(Span),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub marker: Span,
    pub children: Vec<BlockNode>,
}

impl BlockNode {
    /// The source ranges of this block's literal content, recursively and in
    /// document order. Container markers are not included.
    pub fn ranges(&self) -> Vec<Span> {
        let mut out = Vec::new();
        self.collect_ranges(&mut out);
        out
    }

    fn collect_ranges(&self, out: &mut Vec<Span>) {
        match self {
            BlockNode::Paragraph { lines, .. } | BlockNode::Code { lines } => {
                out.extend_from_slice(lines)
            }
            BlockNode::Header { title, .. } => out.push(*title),
            BlockNode::Quote { children, .. } => {
                children.iter().for_each(|c| c.collect_ranges(out))
            }
            BlockNode::List { items, .. } => items
                .iter()
                .flat_map(|item| &item.children)
                .for_each(|c| c.collect_ranges(out)),
            BlockNode::Fence { body, .. } => out.extend_from_slice(body),
            BlockNode::ThematicBreak(span) => out.push(*span),
        }
    }

    /// Inline content of paragraphs and headers.
    pub fn inlines(&self) -> &[InlineNode] {
        match self {
            BlockNode::Paragraph { inlines, .. } | BlockNode::Header { inlines, .. } => inlines,
            _ => &[],
        }
    }

    pub fn children(&self) -> Vec<&BlockNode> {
        match self {
            BlockNode::Quote { children, .. } => children.iter().collect(),
            BlockNode::List { items, .. } => items.iter().flat_map(|i| &i.children).collect(),
            _ => Vec::new(),
        }
    }
}

/// Freezes the open-block tree into the output forest.
///
/// Reference definitions are inserted in document order (first one wins)
/// before any inline content is resolved.
pub fn materialize<C: Codec, S: ReferenceStore + ?Sized>(
    tree: &Tree<OpenBlock>,
    source: &[C::Unit],
    codec: &C,
    store: &mut S,
    options: &ParseOptions,
) -> Vec<BlockNode> {
    for block in tree.iter() {
        if let OpenBlock::ReferenceDefinition(def) = block {
            store.insert_if_absent(def.key(), def.value.clone());
        }
    }
    let m = Materializer {
        source,
        codec,
        store: &*store,
        options,
    };
    tree.roots().filter_map(|node| m.block(node)).collect()
}

struct Materializer<'a, C: Codec, S: ReferenceStore + ?Sized> {
    source: &'a [C::Unit],
    codec: &'a C,
    store: &'a S,
    options: &'a ParseOptions,
}

impl<C: Codec, S: ReferenceStore + ?Sized> Materializer<'_, C, S> {
    fn inlines(&self, lines: &[Span]) -> Vec<InlineNode> {
        parse_inline(self.source, self.codec, lines, self.store, self.options)
    }

    fn blocks(&self, node: Node<'_, OpenBlock>) -> Vec<BlockNode> {
        node.children().filter_map(|c| self.block(c)).collect()
    }

    fn block(&self, node: Node<'_, OpenBlock>) -> Option<BlockNode> {
        let block = match node.data() {
            OpenBlock::Paragraph(p) => BlockNode::Paragraph {
                lines: p.lines.clone(),
                inlines: self.inlines(&p.lines),
            },
            OpenBlock::Header(h) => {
                let title = if h.title.is_empty() { &[][..] } else { std::slice::from_ref(&h.title) };
                BlockNode::Header {
                    level: h.level,
                    title: h.title,
                    markers: h.markers(),
                    inlines: self.inlines(title),
                }
            }
            OpenBlock::Quote(q) => BlockNode::Quote {
                markers: q.markers.clone(),
                children: self.blocks(node),
            },
            OpenBlock::List(l) => BlockNode::List {
                kind: l.kind,
                tight: !l.loose,
                items: node
                    .children()
                    .filter_map(|item| match item.data() {
                        OpenBlock::ListItem(i) => Some(ListItem {
                            marker: i.marker,
                            children: self.blocks(item),
                        }),
                        _ => None,
                    })
                    .collect(),
            },
            OpenBlock::Fence(f) => BlockNode::Fence {
                style: f.style,
                level: f.run,
                opening: f.opening,
                name: f.name,
                body: f.body.clone(),
                closing: f.closing,
            },
            OpenBlock::Code(c) => BlockNode::Code {
                lines: c.lines.clone(),
            },
            OpenBlock::ThematicBreak(span) => BlockNode::ThematicBreak(*span),
            OpenBlock::ListItem(_) => {
                debug_assert!(false, "list item outside a list");
                return None;
            }
            OpenBlock::ReferenceDefinition(_) => return None,
        };
        Some(block)
    }
}
