// Shared by every bench target; each one only uses part of it.
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with *some* content and a [link](https://example.com).\n\n- Bullet point\n  - Nested item\n- Another `item`\n\n> quoted **strong** text\ncontinued lazily\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n[ref]: https://example.com/ref\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_nested_lists(depth: usize, width: usize) -> String {
    let mut content = String::new();
    for level in 0..depth {
        let indent = "  ".repeat(level);
        for i in 0..width {
            content.push_str(&format!("{indent}- item {i} at *level* {level}\n"));
        }
    }
    content
}

#[allow(dead_code)]
pub fn generate_inline_heavy(paragraphs: usize) -> String {
    let line = "a *b* __c__ `d` [e][ref] ![f](g \"h\") \\*i\\* ***j*** k  \n";
    let mut content = String::new();
    for _ in 0..paragraphs {
        content.push_str(&line.repeat(8));
        content.push('\n');
    }
    content.push_str("[ref]: https://example.com\n");
    content
}
