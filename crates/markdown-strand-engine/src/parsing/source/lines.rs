use super::{codec::Codec, span::Span};

/// A reference to a single physical line of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRef {
    /// The line's content, excluding the `\n` (and a preceding `\r`).
    pub span: Span,
}

/// Returns an iterator over the physical lines of `source`.
///
/// A trailing newline does not produce an extra empty line, so `"a\n"` and
/// `"a"` both yield exactly one line.
pub fn lines_with_spans<'a, C: Codec>(
    source: &'a [C::Unit],
    codec: &'a C,
) -> impl Iterator<Item = LineRef> + 'a {
    let mut start = 0usize;
    std::iter::from_fn(move || {
        if start >= source.len() {
            return None;
        }
        let newline = source[start..]
            .iter()
            .position(|&u| codec.ascii(u) == Some(b'\n'))
            .map(|p| start + p);
        let end = newline.unwrap_or(source.len());
        let next = newline.map_or(source.len(), |p| p + 1);
        let content_end = if end > start && codec.ascii(source[end - 1]) == Some(b'\r') {
            end - 1
        } else {
            end
        };
        let line = LineRef {
            span: Span::new(start, content_end),
        };
        start = next;
        Some(line)
    })
}
