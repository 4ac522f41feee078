//! HTML → Markdown rendering for the reverse conversion path.
//!
//! Pure string transformation: the reconstructed HTML is parsed back into
//! an element tree and walked block by block. Fidelity is intentionally
//! loose for constructs Markdown cannot express cleanly (tables, forms);
//! those pass through as raw HTML blocks.

use crate::element::{Category, classify};
use crate::html::{self, Element, serialize_element};
use crate::util::normalize_whitespace;

/// Render an HTML string to Markdown.
pub fn html_to_markdown(html_content: &str) -> String {
    let root = html::parse(html_content);
    let mut blocks: Vec<String> = Vec::new();

    if let Some(text) = &root.text {
        push_text_block(&mut blocks, text);
    }
    for child in &root.children {
        render_block(child, &mut blocks);
        if let Some(tail) = &child.tail {
            push_text_block(&mut blocks, tail);
        }
    }

    let mut out = blocks.join("\n\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn push_text_block(blocks: &mut Vec<String>, text: &str) {
    let normalized = normalize_whitespace(text);
    if !normalized.is_empty() {
        blocks.push(escape_markdown(&normalized));
    }
}

fn render_block(el: &Element, blocks: &mut Vec<String>) {
    match el.tag.as_str() {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = el.tag[1..].parse::<usize>().unwrap_or(1);
            blocks.push(format!("{} {}", "#".repeat(level), render_inline(el).trim()));
        }
        "p" => {
            let inline = render_inline(el);
            let trimmed = inline.trim();
            if !trimmed.is_empty() {
                blocks.push(trimmed.to_string());
            }
        }
        "ul" | "ol" => {
            let rendered = render_list(el, 0);
            if !rendered.is_empty() {
                blocks.push(rendered);
            }
        }
        "li" => {
            // A list item arriving outside its list (decomposed unit).
            blocks.push(format!("- {}", render_inline(el).trim()));
        }
        "blockquote" => {
            let mut inner: Vec<String> = Vec::new();
            for child in &el.children {
                render_block(child, &mut inner);
            }
            if inner.is_empty() {
                let text = render_inline(el);
                if !text.trim().is_empty() {
                    inner.push(text.trim().to_string());
                }
            }
            let quoted = inner
                .join("\n\n")
                .lines()
                .map(|line| format!("> {line}"))
                .collect::<Vec<_>>()
                .join("\n");
            blocks.push(quoted);
        }
        "pre" => blocks.push(render_code_block(el)),
        "hr" => blocks.push("---".to_string()),
        _ => match classify(&el.tag) {
            Category::Structural | Category::Embedded => {
                // Markdown has no equivalent; keep the markup.
                blocks.push(serialize_element(el));
            }
            Category::Void => blocks.push(render_void(el)),
            _ => {
                let inline = render_inline(el);
                let trimmed = inline.trim();
                if !trimmed.is_empty() {
                    blocks.push(trimmed.to_string());
                }
            }
        },
    }
}

fn render_list(el: &Element, depth: usize) -> String {
    let ordered = el.tag == "ol";
    let indent = "    ".repeat(depth);
    let mut lines: Vec<String> = Vec::new();
    let mut counter = 0usize;

    for child in &el.children {
        match child.tag.as_str() {
            "li" => {
                counter += 1;
                let marker = if ordered {
                    format!("{counter}. ")
                } else {
                    "- ".to_string()
                };
                lines.push(format!("{indent}{marker}{}", render_inline_shallow(child).trim()));
                // Nested lists inside the item
                for nested in &child.children {
                    if matches!(nested.tag.as_str(), "ul" | "ol") {
                        let rendered = render_list(nested, depth + 1);
                        if !rendered.is_empty() {
                            lines.push(rendered);
                        }
                    }
                }
            }
            "ul" | "ol" => {
                let rendered = render_list(child, depth + 1);
                if !rendered.is_empty() {
                    lines.push(rendered);
                }
            }
            _ => {}
        }
    }
    lines.join("\n")
}

fn render_code_block(el: &Element) -> String {
    // <pre><code class="language-x">...</code></pre> or bare <pre>
    let (code, language) = match el.children.first() {
        Some(code_el) if code_el.tag == "code" => {
            let language = code_el
                .attrs
                .get("class")
                .and_then(|class| class.strip_prefix("language-"))
                .unwrap_or("")
                .to_string();
            (code_el.text.clone().unwrap_or_default(), language)
        }
        _ => (el.text.clone().unwrap_or_default(), String::new()),
    };
    let code = code.trim_end_matches('\n');
    format!("```{language}\n{code}\n```")
}

fn render_void(el: &Element) -> String {
    match el.tag.as_str() {
        "img" => {
            let alt = el.attrs.get("alt").map(String::as_str).unwrap_or("");
            let src = el.attrs.get("src").map(String::as_str).unwrap_or("");
            format!("![{alt}]({src})")
        }
        "br" => String::new(),
        _ => serialize_element(el),
    }
}

/// Render the inline content of an element, recursing into children.
fn render_inline(el: &Element) -> String {
    let mut out = String::new();
    if let Some(text) = &el.text {
        out.push_str(&escape_markdown(text));
    }
    for child in &el.children {
        out.push_str(&render_inline_element(child));
        if let Some(tail) = &child.tail {
            out.push_str(&escape_markdown(tail));
        }
    }
    out
}

/// Like [`render_inline`] but skipping nested lists, which the list
/// renderer emits separately.
fn render_inline_shallow(el: &Element) -> String {
    let mut out = String::new();
    if let Some(text) = &el.text {
        out.push_str(&escape_markdown(text));
    }
    for child in &el.children {
        if !matches!(child.tag.as_str(), "ul" | "ol") {
            out.push_str(&render_inline_element(child));
        }
        if let Some(tail) = &child.tail {
            out.push_str(&escape_markdown(tail));
        }
    }
    out
}

fn render_inline_element(el: &Element) -> String {
    match el.tag.as_str() {
        "strong" | "b" => format!("**{}**", render_inline(el)),
        "em" | "i" => format!("*{}*", render_inline(el)),
        "code" => format!("`{}`", el.text.clone().unwrap_or_default()),
        "del" | "s" | "strike" => format!("~~{}~~", render_inline(el)),
        "a" => {
            let href = el.attrs.get("href").map(String::as_str).unwrap_or("");
            format!("[{}]({href})", render_inline(el))
        }
        "img" => render_void(el),
        "br" => "\n".to_string(),
        _ => render_inline(el),
    }
}

/// Escape characters that would otherwise trigger Markdown formatting.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '*' | '_' | '[' | ']' | '`' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
