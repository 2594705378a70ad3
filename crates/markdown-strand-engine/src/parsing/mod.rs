pub mod ast;
pub mod blocks;
pub mod inline;
pub mod references;
pub mod snapshot;
pub mod source;
pub mod tree;

#[cfg(test)]
mod tests;

use crate::config::ParseOptions;
use ast::{BlockNode, materialize};
use blocks::{BlockBuilder, MarkdownLineClassifier};
use references::{MemoryReferenceStore, ReferenceStore};
use source::{Codec, Utf8, lines_with_spans};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDoc {
    pub blocks: Vec<BlockNode>,
}

/// Parses `source` with default options and a fresh reference store.
pub fn parse<C: Codec>(source: &[C::Unit], codec: &C) -> ParsedDoc {
    let mut store = MemoryReferenceStore::new();
    parse_with(source, &mut store, codec, &ParseOptions::default())
}

/// Parses `source`, merging its reference definitions into `store`.
///
/// Definitions already in the store win over the document's own, so a store
/// shared across documents keeps the first value seen for each key.
pub fn parse_with<C: Codec, S: ReferenceStore + ?Sized>(
    source: &[C::Unit],
    store: &mut S,
    codec: &C,
    options: &ParseOptions,
) -> ParsedDoc {
    let classifier = MarkdownLineClassifier::new(source, codec, options.tab_width.max(1));
    let mut builder = BlockBuilder::new(classifier);

    let mut line_count = 0usize;
    for line in lines_with_spans(source, codec) {
        builder.push_line(line.span);
        line_count += 1;
    }

    let tree = builder.finish();
    let blocks = materialize(&tree, source, codec, store, options);
    log::debug!(
        "parsed {line_count} lines into {} open blocks, {} top-level",
        tree.len(),
        blocks.len()
    );

    ParsedDoc { blocks }
}

/// Convenience: parse UTF-8 text as bytes.
pub fn parse_str(text: &str) -> ParsedDoc {
    parse(text.as_bytes(), &Utf8)
}
