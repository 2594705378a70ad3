//! End-to-end tests for the parsing module.
//!
//! Documents go through the public entry points; structure is asserted with
//! `insta` inline snapshots of the text outline, and every parse is run
//! through the invariant checks.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::config::ParseOptions;
use crate::parsing::{
    ParsedDoc,
    ast::BlockNode,
    inline::InlineNode,
    parse, parse_str, parse_with,
    references::{MemoryReferenceStore, ReferenceStore},
    snapshot,
    source::{Graphemes, Scalars, Utf8, Utf16, graphemes, scalars, slice_to_string, utf16},
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Parses as UTF-8, checks invariants and returns the outline.
fn outline(text: &str) -> String {
    init();
    let doc = parse_str(text);
    snapshot::invariants(text.len(), &doc.blocks);
    snapshot::outline(text.as_bytes(), &Utf8, &doc.blocks)
}

fn emphasis_levels(nodes: &[InlineNode]) -> usize {
    nodes
        .iter()
        .map(|n| {
            let own = match n {
                InlineNode::Emphasis { level, .. } => *level,
                _ => 0,
            };
            own + emphasis_levels(n.children())
        })
        .sum()
}

fn first_inlines(doc: &ParsedDoc) -> &[InlineNode] {
    doc.blocks.first().map(BlockNode::inlines).unwrap_or(&[])
}

#[test]
fn mixed_document() {
    let text = "# Notes\n\n> quoted *text*\nlazy line\n\n1. first\n2. second\n\n---\n    indented\n";
    insta::assert_snapshot!(outline(text), @r#"
    Header(1)
      Text "Notes"
    Quote
      Paragraph
        Text "quoted "
        Emphasis(1)
          Text "text"
        SoftBreak
        Text "lazy line"
    List(Ordered { separator: Dot, start: 1 }, tight)
      Item "1."
        Paragraph
          Text "first"
      Item "2."
        Paragraph
          Text "second"
    ThematicBreak
    Code
      Line "indented"
    "#);
}

#[rstest]
#[case::empty("")]
#[case::whitespace("   \t  ")]
#[case::blank_lines("\n\n\n")]
#[case::control_units("\u{0}\u{1}\u{7f}")]
#[case::lone_markers("#\n>\n-\n1.\n*\n`\n[\n!\n\\")]
#[case::unbalanced_brackets("[a](b\n![c]]]((\n)")]
#[case::unclosed_fence("```\n> x")]
#[case::crlf("a\r\n\r\n- b\r\n")]
#[case::deep_nesting("> - > 1. > - x\n> - > 1. > - y")]
#[case::tabs("\t-\t\t>\tx")]
#[case::emphasis_soup("*_**__*_***___")]
fn parse_is_total(#[case] text: &str) {
    outline(text);

    let wide = utf16(text);
    snapshot::invariants(wide.len(), &parse(&wide[..], &Utf16).blocks);
    let clusters = graphemes(text);
    snapshot::invariants(clusters.len(), &parse(&clusters[..], &Graphemes::new()).blocks);
}

#[test]
fn ranges_rerender_block_content() {
    let text = "> # Title\n> para *x*\n\n- item\n  more\n\n```\ncode\n```\n";
    let doc = parse_str(text);
    let pieces: Vec<String> = doc
        .blocks
        .iter()
        .flat_map(BlockNode::ranges)
        .map(|sp| text[sp.start..sp.end].to_string())
        .collect();
    assert_eq!(pieces, vec!["Title", "para *x*", "item", "more", "code"]);
}

#[rstest]
#[case::three_then_two("***a**", 2)]
#[case::two_then_one("**a*", 1)]
#[case::one_then_two("*a**", 1)]
#[case::equal_runs("***a***", 3)]
#[case::nested("*a **b** c*", 3)]
fn emphasis_consumes_at_most_the_shorter_run(#[case] text: &str, #[case] consumed: usize) {
    let doc = parse_str(text);
    assert_eq!(emphasis_levels(first_inlines(&doc)), consumed);
}

#[test]
fn emphasis_leftover_opener_is_text() {
    insta::assert_snapshot!(outline("***a**"), @r#"
    Paragraph
      Text "*"
      Emphasis(2)
        Text "a"
    "#);
}

#[test]
fn emphasis_leftover_closer_is_text() {
    insta::assert_snapshot!(outline("*a**"), @r#"
    Paragraph
      Emphasis(1)
        Text "a"
      Text "*"
    "#);
}

#[test]
fn emphasis_closer_takes_nearest_opener() {
    insta::assert_snapshot!(outline("*a *b* c*"), @r#"
    Paragraph
      Emphasis(1)
        Text "a "
        Emphasis(1)
          Text "b"
        Text " c"
    "#);
}

#[test]
fn code_span_needs_exact_run_length() {
    insta::assert_snapshot!(outline("`a``b"), @r#"
    Paragraph
      Text "`a``b"
    "#);
    insta::assert_snapshot!(outline("`a``b`"), @r#"
    Paragraph
      CodeSpan(1)
        Text "a``b"
    "#);
}

#[test]
fn reference_resolves_forward() {
    insta::assert_snapshot!(outline("[x]\n\n[x]: value\n"), @r#"
    Paragraph
      Reference(Normal) "value"
        Text "x"
    "#);
}

#[test]
fn reference_forms() {
    let text = "[a](u) [b][k] [K][] ![c]\n\n[k]: key\n[c]: img\n";
    insta::assert_snapshot!(outline(text), @r#"
    Paragraph
      Reference(Normal) "u"
        Text "a"
      Text " "
      Reference(Normal) "key"
        Text "b"
      Text " "
      Reference(Normal) "key"
        Text "K"
      Text " "
      Reference(Image) "img"
        Text "c"
    "#);
}

#[test]
fn undefined_reference_stays_text() {
    insta::assert_snapshot!(outline("[nope] and [x][nope]"), @r#"
    Paragraph
      Text "[nope] and [x][nope]"
    "#);
}

#[test]
fn shared_store_keeps_first_definition() {
    let text = "[x]\n\n[x]: from document\n[y]: also document\n";
    let mut store = MemoryReferenceStore::new();
    store.insert_if_absent("x".into(), "from store".into());

    let doc = parse_with(text.as_bytes(), &mut store, &Utf8, &ParseOptions::default());

    let InlineNode::Reference { value, .. } = &first_inlines(&doc)[0] else {
        panic!("expected a reference, got {:?}", doc.blocks);
    };
    assert_eq!(value, "from store");
    assert_eq!(store.lookup("y"), Some("also document"));
}

#[test]
fn list_tightness() {
    insta::assert_snapshot!(outline("- a\n- b\n"), @r#"
    List(Bullet(Hyphen), tight)
      Item "-"
        Paragraph
          Text "a"
      Item "-"
        Paragraph
          Text "b"
    "#);
    insta::assert_snapshot!(outline("- a\n\n- b\n"), @r#"
    List(Bullet(Hyphen), loose)
      Item "-"
        Paragraph
          Text "a"
      Item "-"
        Paragraph
          Text "b"
    "#);
}

#[test]
fn fence_keeps_overindented_marker() {
    insta::assert_snapshot!(outline("```rust\nlet x = 1;\n    ```\n```\n"), @r#"
    Fence(Backtick, 3) "rust"
      Line "let x = 1;"
      Line "    ```"
    "#);
}

#[test]
fn lazy_quote_continuation() {
    insta::assert_snapshot!(outline("> a\nb\n"), @r#"
    Quote
      Paragraph
        Text "a"
        SoftBreak
        Text "b"
    "#);
}

#[test]
fn escapes_and_breaks() {
    insta::assert_snapshot!(outline("\\*a*  \nb\\\nc"), @r#"
    Paragraph
      Escape
      Text "*a*"
      HardBreak
      Text "b"
      HardBreak
      Text "c"
    "#);
}

#[test]
fn codecs_agree() {
    let text = "> é *ü* [ß](x)\n- 日本\n";
    let expected = outline(text);

    let wide = utf16(text);
    let doc = parse(&wide[..], &Utf16);
    assert_eq!(snapshot::outline(&wide[..], &Utf16, &doc.blocks), expected);

    let chars = scalars(text);
    let doc = parse(&chars[..], &Scalars);
    assert_eq!(snapshot::outline(&chars[..], &Scalars, &doc.blocks), expected);

    let clusters = graphemes(text);
    let codec = Graphemes::new();
    let doc = parse(&clusters[..], &codec);
    assert_eq!(snapshot::outline(&clusters[..], &codec, &doc.blocks), expected);
}

#[rstest]
#[case::default_width(4, "Code")]
#[case::narrow_width(2, "Paragraph")]
fn tab_width_option(#[case] tab_width: usize, #[case] first: &str) {
    let text = "\tcode";
    let options = ParseOptions {
        tab_width,
        ..ParseOptions::default()
    };
    let doc = parse_with(text.as_bytes(), &mut MemoryReferenceStore::new(), &Utf8, &options);
    let rendered = snapshot::outline(text.as_bytes(), &Utf8, &doc.blocks);
    assert_eq!(rendered.lines().next(), Some(first));
}

#[test]
fn hard_break_spaces_option() {
    let text = "a \nb";
    let options = ParseOptions {
        hard_break_spaces: 1,
        ..ParseOptions::default()
    };
    let doc = parse_with(text.as_bytes(), &mut MemoryReferenceStore::new(), &Utf8, &options);
    assert!(matches!(first_inlines(&doc)[1], InlineNode::HardBreak(_)));

    let doc = parse_str(text);
    assert!(matches!(first_inlines(&doc)[1], InlineNode::SoftBreak(_)));
}

#[test]
fn fence_name_and_markers_are_spans() {
    let text = "  ~~~~ sh extra\n  echo\n  ~~~~~\n";
    let doc = parse_str(text);
    let BlockNode::Fence {
        level,
        opening,
        name,
        body,
        closing,
        ..
    } = &doc.blocks[0]
    else {
        panic!("expected fence, got {:?}", doc.blocks);
    };
    assert_eq!(*level, 4);
    assert_eq!(slice_to_string(text.as_bytes(), &Utf8, *opening), "~~~~");
    assert_eq!(slice_to_string(text.as_bytes(), &Utf8, *name), "sh");
    assert_eq!(slice_to_string(text.as_bytes(), &Utf8, body[0]), "echo");
    assert_eq!(
        closing.map(|c| slice_to_string(text.as_bytes(), &Utf8, c)),
        Some("~~~~~".to_string())
    );
}

#[test]
fn quote_markers_are_recorded() {
    let text = "> a\n> b\n>\n> c";
    let doc = parse_str(text);
    let BlockNode::Quote { markers, children } = &doc.blocks[0] else {
        panic!("expected quote, got {:?}", doc.blocks);
    };
    assert_eq!(markers, &vec![0, 4, 8, 10]);
    assert_eq!(children.len(), 2);
}
