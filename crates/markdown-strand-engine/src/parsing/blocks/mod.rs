//! # Block Parsing
//!
//! Two-phase block parsing over an append-only tree of open containers.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each physical line becomes a
//!    [`Line`] carrying only local facts (indent, marker kind, the classified
//!    remainder after a quote or list marker).
//!
//! 2. **Block Construction** (`builder`): a [`BlockBuilder`] offers each line
//!    to the open strand, deepest container last, and opens new blocks for
//!    whatever nobody accepts.
//!
//! ## Modules
//!
//! - **`types`**: `Line`, `LineKind`, `ListKind`, `FenceStyle`
//! - **`kinds`**: per-kind open state with owned delimiters
//! - **`classify`**: `MarkdownLineClassifier`
//! - **`open`**: `OpenBlock`, the tree payload while reading
//! - **`builder`**: `BlockBuilder`
//!
//! ## Key Invariants
//!
//! - Nesting depth is unbounded (lists in blockquotes in lists, etc.)
//! - Only nodes on the open strand are mutated
//! - Fenced and indented code are raw zones: no inline parsing inside
//! - All spans index the original code-unit sequence

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod open;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::MarkdownLineClassifier;
pub use open::OpenBlock;
pub use types::{BulletSymbol, CODE_INDENT, FenceStyle, Line, LineKind, ListKind, Separator};
