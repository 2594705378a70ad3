//! # Block Kinds
//!
//! Per-kind open block state. Each type owns the delimiter constants and
//! small rules of its syntax; the builder owns the container recursion.

pub mod block_quote;
pub mod code;
pub mod code_fence;
pub mod header;
pub mod list;
pub mod paragraph;
pub mod reference;

pub use block_quote::BlockQuote;
pub use code::IndentedCode;
pub use code_fence::FencedCode;
pub use header::Header;
pub use list::{List, ListItem, ListState};
pub use paragraph::Paragraph;
pub use reference::ReferenceDefinition;
