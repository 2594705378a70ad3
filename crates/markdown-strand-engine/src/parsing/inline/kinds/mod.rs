//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters.
//!
//! ## Types
//!
//! - **`CodeSpan`**: `TICK` - raw zone that suppresses other parsing
//! - **`Emphasis`**: `STAR`, `UNDERSCORE`
//! - **`Reference`**: brackets, the image `!` and value parentheses
//! - **`Escape`**: `BACKSLASH`
//!
//! ## Design Principle
//!
//! All delimiter constants live here, not scattered in scanner code.

pub mod code_span;
pub mod emphasis;
pub mod escape;
pub mod reference;

pub use code_span::CodeSpan;
pub use emphasis::Emphasis;
pub use escape::Escape;
pub use reference::Reference;
