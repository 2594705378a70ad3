//! # Source Access
//!
//! Everything the parser knows about its input: positions and spans into a
//! code-unit slice, the [`Codec`] that classifies those units, and line
//! iteration.

pub mod codec;
pub mod cursor;
pub mod lines;
pub mod slice;
pub mod span;

pub use codec::{Codec, Graphemes, Scalars, Utf8, Utf16, graphemes, scalars, utf16};
pub use cursor::Cursor;
pub use lines::{LineRef, lines_with_spans};
pub use slice::slice_to_string;
pub use span::{Position, Span};
