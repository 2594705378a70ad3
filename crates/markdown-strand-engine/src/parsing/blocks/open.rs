use crate::parsing::source::span::Span;

use super::kinds::{
    BlockQuote, FencedCode, Header, IndentedCode, List, ListItem, Paragraph, ReferenceDefinition,
};

/// A block while the document is still being read.
///
/// Only nodes on the tree's open strand are ever mutated; everything else is
/// effectively frozen until materialisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenBlock {
    Paragraph(Paragraph),
    Header(Header),
    Quote(BlockQuote),
    List(List),
    ListItem(ListItem),
    Fence(FencedCode),
    Code(IndentedCode),
    ThematicBreak(Span),
    ReferenceDefinition(ReferenceDefinition),
}

impl OpenBlock {
    pub fn name(&self) -> &'static str {
        match self {
            OpenBlock::Paragraph(_) => "paragraph",
            OpenBlock::Header(_) => "header",
            OpenBlock::Quote(_) => "quote",
            OpenBlock::List(_) => "list",
            OpenBlock::ListItem(_) => "list item",
            OpenBlock::Fence(_) => "fence",
            OpenBlock::Code(_) => "code",
            OpenBlock::ThematicBreak(_) => "thematic break",
            OpenBlock::ReferenceDefinition(_) => "reference definition",
        }
    }

    /// An open paragraph, the only block lazy lines may continue.
    pub fn is_open_paragraph(&self) -> bool {
        matches!(self, OpenBlock::Paragraph(p) if !p.closed)
    }
}
