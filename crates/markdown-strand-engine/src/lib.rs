pub mod config;
pub mod parsing;

// Re-export key types for easier usage
pub use config::{ConfigError, ParseOptions};
pub use parsing::ast::{BlockNode, ListItem};
pub use parsing::inline::{InlineNode, ReferenceKind};
pub use parsing::references::{MemoryReferenceStore, ReferenceStore};
pub use parsing::source::{Codec, Position, Span};
pub use parsing::{ParsedDoc, parse, parse_str, parse_with};
