//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`outline`**: Renders a parsed document as a stable, indented text tree
//!   for `insta` inline snapshots
//! - **`invariants`**: Runtime checks for parser correctness (spans in bounds,
//!   children contained in their parent, siblings in order, raw zones free of
//!   inline structure)
//!
//! Parsing behavior is pinned by snapshot tests rather than a separate formal
//! grammar. Outlines show block/inline kinds with their decoded text, so one
//! snapshot holds for every codec.

pub mod invariants;
pub mod outline;

pub use invariants::check as invariants;
pub use outline::outline;
