use std::fmt::Write;

use crate::parsing::ast::BlockNode;
use crate::parsing::inline::InlineNode;
use crate::parsing::source::{Codec, Span, slice_to_string};

/// Renders `blocks` as one node per line, children indented two spaces.
///
/// ```text
/// Paragraph
///   Text "a "
///   Emphasis(1)
///     Text "b"
/// ```
pub fn outline<C: Codec>(source: &[C::Unit], codec: &C, blocks: &[BlockNode]) -> String {
    let mut out = Outline {
        source,
        codec,
        buf: String::new(),
    };
    for b in blocks {
        out.block(b, 0);
    }
    out.buf
}

struct Outline<'a, C: Codec> {
    source: &'a [C::Unit],
    codec: &'a C,
    buf: String,
}

impl<C: Codec> Outline<'_, C> {
    fn text(&self, sp: Span) -> String {
        slice_to_string(self.source, self.codec, sp)
    }

    fn line(&mut self, depth: usize, label: std::fmt::Arguments<'_>) {
        // Writing into a String cannot fail.
        let _ = writeln!(self.buf, "{:width$}{label}", "", width = depth * 2);
    }

    fn block(&mut self, b: &BlockNode, depth: usize) {
        match b {
            BlockNode::Paragraph { inlines, .. } => {
                self.line(depth, format_args!("Paragraph"));
                self.inlines(inlines, depth + 1);
            }
            BlockNode::Header { level, inlines, .. } => {
                self.line(depth, format_args!("Header({level})"));
                self.inlines(inlines, depth + 1);
            }
            BlockNode::Quote { children, .. } => {
                self.line(depth, format_args!("Quote"));
                children.iter().for_each(|c| self.block(c, depth + 1));
            }
            BlockNode::List { kind, tight, items } => {
                let spacing = if *tight { "tight" } else { "loose" };
                self.line(depth, format_args!("List({kind:?}, {spacing})"));
                for item in items {
                    let marker = self.text(item.marker);
                    self.line(depth + 1, format_args!("Item {marker:?}"));
                    item.children.iter().for_each(|c| self.block(c, depth + 2));
                }
            }
            BlockNode::Fence {
                style,
                level,
                name,
                body,
                closing,
                ..
            } => {
                let name = self.text(*name);
                let open = if closing.is_none() { " unclosed" } else { "" };
                self.line(
                    depth,
                    format_args!("Fence({style:?}, {level}) {name:?}{open}"),
                );
                self.raw_lines(body, depth + 1);
            }
            BlockNode::Code { lines } => {
                self.line(depth, format_args!("Code"));
                self.raw_lines(lines, depth + 1);
            }
            BlockNode::ThematicBreak(_) => self.line(depth, format_args!("ThematicBreak")),
        }
    }

    fn raw_lines(&mut self, lines: &[Span], depth: usize) {
        for sp in lines {
            let text = self.text(*sp);
            self.line(depth, format_args!("Line {text:?}"));
        }
    }

    fn inlines(&mut self, nodes: &[InlineNode], depth: usize) {
        for n in nodes {
            match n {
                InlineNode::Text(sp) => {
                    let text = self.text(*sp);
                    self.line(depth, format_args!("Text {text:?}"));
                }
                InlineNode::SoftBreak(_) => self.line(depth, format_args!("SoftBreak")),
                InlineNode::HardBreak(_) => self.line(depth, format_args!("HardBreak")),
                InlineNode::Emphasis { level, .. } => {
                    self.line(depth, format_args!("Emphasis({level})"))
                }
                InlineNode::CodeSpan { marker_level, .. } => {
                    self.line(depth, format_args!("CodeSpan({marker_level})"))
                }
                InlineNode::Reference { kind, value, .. } => {
                    self.line(depth, format_args!("Reference({kind:?}) {value:?}"))
                }
                InlineNode::EscapingBackslash(_) => self.line(depth, format_args!("Escape")),
            }
            self.inlines(n.children(), depth + 1);
        }
    }
}
