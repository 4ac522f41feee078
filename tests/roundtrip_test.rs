use markliff::{
    XliffDocument, html_to_xliff, markdown_to_xliff, xliff_to_html, xliff_to_markdown,
};

#[test]
fn test_markdown_roundtrip_headings_and_text() {
    let content = "# Title\n\nFirst paragraph.\n\n## Section\n\nSecond paragraph.";
    let xliff = markdown_to_xliff(content, "en", "es").unwrap();
    let back = xliff_to_markdown(&xliff).unwrap();

    assert!(back.contains("# Title"));
    assert!(back.contains("## Section"));
    assert!(back.contains("First paragraph."));
    assert!(back.contains("Second paragraph."));
}

#[test]
fn test_markdown_roundtrip_inline_formatting() {
    let content = "Text with **bold** and *italic* and `code`.";
    let xliff = markdown_to_xliff(content, "en", "es").unwrap();
    let back = xliff_to_markdown(&xliff).unwrap();

    assert!(back.contains("**bold**"));
    assert!(back.contains("*italic*"));
    assert!(back.contains("`code`"));
}

#[test]
fn test_markdown_roundtrip_links_and_lists() {
    let content = "[site](https://example.com)\n\n- one\n- two";
    let xliff = markdown_to_xliff(content, "en", "es").unwrap();
    let back = xliff_to_markdown(&xliff).unwrap();

    assert!(back.contains("[site](https://example.com)"));
    assert!(back.contains("- one"));
    assert!(back.contains("- two"));
}

#[test]
fn test_html_roundtrip_preserves_structure() {
    let content = r#"<h1>Title</h1>
<p>go <a href="https://example.com">here</a> now</p>"#;
    let xliff = html_to_xliff(content, "en", "es").unwrap();
    let back = xliff_to_html(&xliff).unwrap();

    assert!(back.contains("<h1>Title</h1>"));
    assert!(back.contains(r#"<a href="https://example.com">here</a>"#));
}

#[test]
fn test_html_roundtrip_table_preserved_verbatim() {
    let content = "<p>Intro</p><table><tr><td>A</td><td>B</td></tr></table>";
    let xliff = html_to_xliff(content, "en", "es").unwrap();
    let back = xliff_to_html(&xliff).unwrap();

    assert!(back.contains("<p>Intro</p>"));
    assert!(back.contains("<td>A</td>"));
    assert!(back.contains("<td>B</td>"));
}

#[test]
fn test_inline_svg_roundtrip_keeps_subtree() {
    let content = r#"<p>Chart: <svg viewBox="0 0 10 10"><circle cx="5" cy="5" r="4"></circle></svg> done</p>"#;
    let xliff = html_to_xliff(content, "en", "es").unwrap();
    let back = xliff_to_html(&xliff).unwrap();

    assert!(back.contains("<circle"), "html: {back}");
    assert!(back.contains("viewBox=\"0 0 10 10\""));
    assert!(back.contains("Chart:"));
    assert!(back.contains("done"));
}

#[test]
fn test_code_block_roundtrip_keeps_newlines() {
    let content = "```rust\nfn main() {\n    body();\n}\n```";
    let xliff = markdown_to_xliff(content, "en", "es").unwrap();
    let back = xliff_to_markdown(&xliff).unwrap();

    assert!(
        back.contains("fn main() {\n    body();\n}"),
        "markdown: {back}"
    );
    assert!(back.contains("```rust"));
}

#[test]
fn test_translated_targets_flow_into_reconstruction() {
    let xliff = html_to_xliff("<h1>Hello</h1><p>World</p>", "en", "de").unwrap();
    let mut doc = XliffDocument::from_xml(&xliff).unwrap();
    doc.files[0].units[0].set_target_text("Hallo");
    doc.files[0].units[1].set_target_text("Welt");

    let html = xliff_to_html(&doc.to_xml()).unwrap();
    assert!(html.contains("<h1>Hallo</h1>"));
    assert!(html.contains("<p>Welt</p>"));
}

#[test]
fn test_unicode_roundtrip() {
    let content = "# 中文标题\n\n独立段落 with emoji 🦀.";
    let xliff = markdown_to_xliff(content, "zh", "en").unwrap();
    let back = xliff_to_markdown(&xliff).unwrap();

    assert!(back.contains("中文标题"));
    assert!(back.contains("独立段落"));
    assert!(back.contains("🦀"));
}

#[test]
fn test_line_break_roundtrip() {
    let xliff = markdown_to_xliff("line one\nline two", "en", "es").unwrap();
    let html = xliff_to_html(&xliff).unwrap();
    assert!(html.contains("<br/>"));
    assert!(html.contains("line one"));
    assert!(html.contains("line two"));
}

#[test]
fn test_attribute_heavy_html_roundtrip() {
    let content = r#"<p class="lead" data-info="a,b\c">styled <span class="hl">span</span></p>"#;
    let xliff = html_to_xliff(content, "en", "es").unwrap();
    let back = xliff_to_html(&xliff).unwrap();

    assert!(back.contains(r#"class="lead""#));
    assert!(back.contains(r#"data-info="a,b\c""#));
    assert!(back.contains(r#"<span class="hl">span</span>"#));
}
