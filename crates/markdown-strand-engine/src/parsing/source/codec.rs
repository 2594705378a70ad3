//! # Code-Unit Codecs
//!
//! The parser never assumes what a "character" is. A [`Codec`] tells it how
//! to spot ASCII markers (`#`, `*`, backtick...) among the source units and
//! how to turn a run of units back into a displayable string.
//!
//! Four codecs ship with the engine:
//!
//! - [`Utf8`]: raw bytes (`u8`)
//! - [`Utf16`]: UTF-16 code units (`u16`)
//! - [`Scalars`]: Unicode scalar values (`char`)
//! - [`Graphemes`]: extended grapheme clusters (`&str`), via `unicode-segmentation`

use std::fmt;
use std::marker::PhantomData;

use unicode_segmentation::UnicodeSegmentation;

use super::span::Span;

/// Maps between source code units and the ASCII markers Markdown is built on.
pub trait Codec {
    /// A single source code unit.
    type Unit: Copy + Eq + fmt::Debug;

    /// The unit representing the ASCII byte `byte`.
    ///
    /// The parser itself never calls this: it compares through [`Codec::ascii`],
    /// which also folds a grapheme `"\r\n"` into `\n`. It is here for callers
    /// building or searching unit sequences of their own.
    fn unit(&self, byte: u8) -> Self::Unit;

    /// The ASCII byte this unit represents, if it is one.
    fn ascii(&self, unit: Self::Unit) -> Option<u8>;

    /// Converts units back into text. Must not fail on malformed input.
    fn decode(&self, units: &[Self::Unit]) -> String;

    /// ASCII punctuation, as used for flanking and escapes.
    fn is_punctuation(&self, unit: Self::Unit) -> bool {
        self.ascii(unit).is_some_and(|b| b.is_ascii_punctuation())
    }

    fn is_whitespace(&self, unit: Self::Unit) -> bool {
        matches!(
            self.ascii(unit),
            Some(b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
        )
    }

    /// Decimal value of an ASCII digit unit.
    fn digit(&self, unit: Self::Unit) -> Option<u32> {
        self.ascii(unit)
            .filter(u8::is_ascii_digit)
            .map(|b| u32::from(b - b'0'))
    }

    /// Decodes the units covered by `span`.
    fn decode_span(&self, source: &[Self::Unit], span: Span) -> String {
        self.decode(span.slice(source))
    }
}

/// UTF-8 bytes. Non-ASCII bytes are never markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8;

impl Codec for Utf8 {
    type Unit = u8;

    fn unit(&self, byte: u8) -> u8 {
        byte
    }

    fn ascii(&self, unit: u8) -> Option<u8> {
        unit.is_ascii().then_some(unit)
    }

    fn decode(&self, units: &[u8]) -> String {
        String::from_utf8_lossy(units).into_owned()
    }
}

/// UTF-16 code units. Unpaired surrogates decode to U+FFFD.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf16;

impl Codec for Utf16 {
    type Unit = u16;

    fn unit(&self, byte: u8) -> u16 {
        u16::from(byte)
    }

    fn ascii(&self, unit: u16) -> Option<u8> {
        u8::try_from(unit).ok().filter(u8::is_ascii)
    }

    fn decode(&self, units: &[u16]) -> String {
        String::from_utf16_lossy(units)
    }
}

/// Unicode scalar values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scalars;

impl Codec for Scalars {
    type Unit = char;

    fn unit(&self, byte: u8) -> char {
        char::from(byte)
    }

    fn ascii(&self, unit: char) -> Option<u8> {
        unit.is_ascii().then_some(unit as u8)
    }

    fn decode(&self, units: &[char]) -> String {
        units.iter().collect()
    }
}

static ASCII: [u8; 128] = {
    let mut table = [0u8; 128];
    let mut i = 0;
    while i < 128 {
        table[i] = i as u8;
        i += 1;
    }
    table
};

/// Extended grapheme clusters borrowed from a source string.
///
/// A `"\r\n"` cluster is reported as a newline so line splitting still works.
#[derive(Debug, Clone, Copy, Default)]
pub struct Graphemes<'s>(PhantomData<&'s str>);

impl<'s> Graphemes<'s> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<'s> Codec for Graphemes<'s> {
    type Unit = &'s str;

    fn unit(&self, byte: u8) -> &'s str {
        let i = usize::from(byte & 0x7f);
        std::str::from_utf8(&ASCII[i..=i]).unwrap_or("")
    }

    fn ascii(&self, unit: &'s str) -> Option<u8> {
        match unit.as_bytes() {
            [b] if b.is_ascii() => Some(*b),
            b"\r\n" => Some(b'\n'),
            _ => None,
        }
    }

    fn decode(&self, units: &[&'s str]) -> String {
        units.concat()
    }
}

/// Splits `text` into UTF-16 code units.
pub fn utf16(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Splits `text` into Unicode scalars.
pub fn scalars(text: &str) -> Vec<char> {
    text.chars().collect()
}

/// Splits `text` into extended grapheme clusters.
pub fn graphemes(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_markers_round_trip() {
        assert_eq!(Utf8.ascii(Utf8.unit(b'#')), Some(b'#'));
        assert_eq!(Utf8.ascii(0xc3), None);
        assert!(Utf8.is_punctuation(b'*'));
        assert!(!Utf8.is_punctuation(b'a'));
        assert_eq!(Utf8.digit(b'7'), Some(7));
        assert_eq!(Utf8.digit(b'x'), None);
    }

    #[test]
    fn utf8_decode_is_lossy_not_fatal() {
        assert_eq!(Utf8.decode(&[b'a', 0xff, b'b']), "a\u{fffd}b");
    }

    #[test]
    fn utf16_ignores_non_ascii_units() {
        let units = utf16("é*");
        assert_eq!(Utf16.ascii(units[0]), None);
        assert_eq!(Utf16.ascii(units[1]), Some(b'*'));
        assert_eq!(Utf16.decode(&units), "é*");
    }

    #[test]
    fn utf16_unpaired_surrogate_decodes() {
        assert_eq!(Utf16.decode(&[0xd800, u16::from(b'a')]), "\u{fffd}a");
    }

    #[test]
    fn scalars_round_trip() {
        let units = scalars("a→b");
        assert_eq!(units.len(), 3);
        assert_eq!(Scalars.ascii(units[1]), None);
        assert_eq!(Scalars.decode(&units), "a→b");
    }

    #[test]
    fn graphemes_treat_crlf_as_newline() {
        let units = graphemes("e\u{301}\r\nx");
        assert_eq!(units.len(), 3);
        let codec = Graphemes::new();
        assert_eq!(codec.ascii(units[0]), None);
        assert_eq!(codec.ascii(units[1]), Some(b'\n'));
        assert_eq!(codec.unit(b'#'), "#");
        assert_eq!(codec.decode(&units), "e\u{301}\r\nx");
    }

    #[test]
    fn unit_is_the_inverse_of_ascii() {
        let markers = b"#>-+*_`~[]()!\\ \t\n";
        let codec = Graphemes::new();
        for &b in markers {
            assert_eq!(Utf8.ascii(Utf8.unit(b)), Some(b));
            assert_eq!(Utf16.ascii(Utf16.unit(b)), Some(b));
            assert_eq!(Scalars.ascii(Scalars.unit(b)), Some(b));
            assert_eq!(codec.ascii(codec.unit(b)), Some(b));
        }
    }

    #[test]
    fn decode_span_slices_source() {
        let src = b"hello world";
        assert_eq!(Utf8.decode_span(src, Span::new(6, 11)), "world");
    }
}
