use markdown_strand_engine::parsing::{
    parse, snapshot,
    source::{Graphemes, Scalars, Utf8, Utf16, graphemes, scalars, utf16},
};
use markdown_strand_engine::{BlockNode, MemoryReferenceStore, ParseOptions, parse_str, parse_with};
use pretty_assertions::assert_eq;

#[test]
fn fixture_nested_containers() {
    insta::assert_snapshot!(assert_fixture("nested_containers"), @r#"
    Quote
      List(Bullet(Hyphen), loose)
        Item "-"
          Paragraph
            Text "one"
            SoftBreak
            Text "continued"
        Item "-"
          Paragraph
            Text "two"
          Quote
            Paragraph
              Text "inner"
    "#);
}

#[test]
fn fixture_inline_mix() {
    insta::assert_snapshot!(assert_fixture("inline_mix"), @r#"
    Paragraph
      Text "Some "
      Emphasis(2)
        Text "strong "
        Emphasis(1)
          Text "and em"
      Text " text with "
      CodeSpan(1)
        Text "code [not a link]"
      Text ","
      SoftBreak
      Text "an "
      Reference(Image) "pic.png \"title\""
        Text "image"
      Text " and a "
      Reference(Normal) "https://example.com"
        Text "link "
        Emphasis(1)
          Text "with"
        Text " style"
      Text "."
      SoftBreak
      Text "Trailing backslash"
      HardBreak
      Text "hard break, escaped "
      Escape
      Text "[bracket"
      Escape
      Text "]."
    "#);
}

#[test]
fn fixture_fences_and_code() {
    insta::assert_snapshot!(assert_fixture("fences_and_code"), @r#"
    Fence(Tilde, 3) "toml"
      Line "[parse]"
      Line "tab_width = 4"
    Code
      Line "indented"
      Line "  more"
    List(Bullet(Hyphen), loose)
      Item "-"
        Paragraph
          Text "item"
        Code
          Line "code in item"
    "#);
}

#[test]
fn fixture_headers() {
    insta::assert_snapshot!(assert_fixture("headers"), @r########"
    Header(1)
      Text "One"
    Header(2)
      Text "Two"
    Header(6)
      Text "Six"
    Paragraph
      Text "####### Seven"
      SoftBreak
      Text "#Hashless"
    "########);
}

/// Parses a fixture with every codec, checks invariants and that all codecs
/// agree, and returns the outline.
fn assert_fixture(name: &str) -> String {
    let md = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();

    let doc = parse(md.as_bytes(), &Utf8);
    snapshot::invariants(md.len(), &doc.blocks);
    let expected = snapshot::outline(md.as_bytes(), &Utf8, &doc.blocks);

    let wide = utf16(&md);
    let doc = parse(&wide[..], &Utf16);
    snapshot::invariants(wide.len(), &doc.blocks);
    assert_eq!(snapshot::outline(&wide[..], &Utf16, &doc.blocks), expected, "utf16");

    let chars = scalars(&md);
    let doc = parse(&chars[..], &Scalars);
    snapshot::invariants(chars.len(), &doc.blocks);
    assert_eq!(snapshot::outline(&chars[..], &Scalars, &doc.blocks), expected, "scalars");

    let clusters = graphemes(&md);
    let codec = Graphemes::new();
    let doc = parse(&clusters[..], &codec);
    snapshot::invariants(clusters.len(), &doc.blocks);
    assert_eq!(snapshot::outline(&clusters[..], &codec, &doc.blocks), expected, "graphemes");

    expected
}

/// Slicing the source with any block range reproduces the exact text.
#[test]
fn lossless_ranges() {
    let md = "> *a* b\n\n- `c`\n\n```\n  d\n```\n";
    let doc = parse_str(md);

    for block in &doc.blocks {
        for range in block.ranges() {
            let piece = &md[range.start..range.end];
            assert!(md.contains(piece));
        }
    }
    let all: Vec<&str> = doc
        .blocks
        .iter()
        .flat_map(BlockNode::ranges)
        .map(|r| &md[r.start..r.end])
        .collect();
    assert_eq!(all, vec!["*a* b", "`c`", "  d"]);
}

#[test]
fn options_from_config_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("strand.toml");
    std::fs::write(&path, "[parse]\ntab_width = 2\n").unwrap();

    let options = ParseOptions::load_from_path(&path).unwrap().unwrap();
    let md = "\tnot code";
    let doc = parse_with(md.as_bytes(), &mut MemoryReferenceStore::new(), &Utf8, &options);

    assert!(matches!(doc.blocks[0], BlockNode::Paragraph { .. }));
}
