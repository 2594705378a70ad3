use super::{codec::Codec, span::Span};

/// Extracts the text for a span as an owned String.
///
/// This allocates; prefer working with spans where possible.
pub fn slice_to_string<C: Codec>(source: &[C::Unit], codec: &C, sp: Span) -> String {
    codec.decode_span(source, sp)
}
