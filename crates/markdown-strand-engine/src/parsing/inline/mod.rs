//! # Inline Parsing
//!
//! Delimiter-based inline parsing over the text lines of one block.
//!
//! ## Architecture
//!
//! Inline parsing is separate from block parsing and runs once the whole
//! document has been read, so every reference definition is known:
//!
//! 1. **Scan** (`scanner`): one left-to-right walk emits a flat stream of
//!    [`Delimiter`]s (punctuation runs, brackets, escapes, line boundaries)
//!    and the trimmed text range of each line.
//! 2. **Resolve** (`resolve`): code spans, then references, then emphasis,
//!    each pass tombstoning the delimiters it consumes.
//! 3. **Assemble** (`assemble`): resolved nodes are nested by containment and
//!    the uncovered text ranges become [`InlineNode::Text`] leaves.
//!
//! ## Raw Zone Precedence
//!
//! Code spans take precedence: `` `[not a link]` `` parses as a single
//! CodeSpan, not as text containing a reference.

pub mod assemble;
pub mod delimiter;
pub mod kinds;
pub mod resolve;
pub mod scanner;
pub mod types;

use crate::config::ParseOptions;
use crate::parsing::references::ReferenceStore;
use crate::parsing::source::{Codec, Span};

pub use delimiter::{Delimiter, DelimiterKind};
pub use types::{InlineNode, ReferenceKind};

/// Parses the text `lines` of one block into nested inline nodes.
///
/// `lines` are the block's per-line spans in document order; consecutive
/// lines are joined by break nodes.
pub fn parse_inline<C: Codec, S: ReferenceStore + ?Sized>(
    source: &[C::Unit],
    codec: &C,
    lines: &[Span],
    store: &S,
    options: &ParseOptions,
) -> Vec<InlineNode> {
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return Vec::new();
    };
    let scanned = scanner::scan(source, codec, lines, options.hard_break_spaces);
    let resolved = resolve::Resolver::new(source, codec, store, scanned.delimiters).resolve();
    assemble::assemble(resolved, &scanned.text, Span::new(first.start, last.end))
}
