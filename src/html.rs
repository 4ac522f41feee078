//! HTML fragment parsing facade.
//!
//! Wraps [`scraper`] (html5ever) behind the narrow element view the
//! segmentation pipeline consumes: tag name, attribute map, leading text,
//! trailing text (`tail`), and ordered children. The `text`/`tail` split
//! mirrors the classic tree-walking model where text between sibling
//! elements belongs to the preceding sibling.

use std::collections::BTreeMap;

use ego_tree::NodeRef;
use scraper::{Html, Node};

use crate::element::{Category, classify};
use crate::util::escape_xml;

/// A parsed HTML element.
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Lowercase tag name. The synthetic document root uses `"root"`.
    pub tag: String,
    /// Attribute name/value pairs in deterministic order.
    pub attrs: BTreeMap<String, String>,
    /// Text immediately inside the element, before the first child.
    pub text: Option<String>,
    /// Text immediately after the element, before the next sibling.
    pub tail: Option<String>,
    /// Child elements in document order.
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_string(),
            ..Default::default()
        }
    }
}

/// Parse an HTML fragment into an element tree.
///
/// Tolerates fragments without a `<html>`/`<body>` wrapper; the parser's
/// own wrapper elements are made transparent so the returned synthetic
/// root holds the fragment's top-level nodes directly.
pub fn parse(html: &str) -> Element {
    let document = Html::parse_fragment(html);
    let mut root = Element::new("root");
    collect_root(&mut root, document.tree.root());
    root
}

/// Collect top-level nodes, looking through parser-inserted wrappers.
fn collect_root(parent: &mut Element, node: NodeRef<'_, Node>) {
    for child in node.children() {
        match child.value() {
            Node::Element(el) if matches!(el.name(), "html" | "head" | "body") => {
                collect_root(parent, child);
            }
            Node::Element(el) => {
                let built = build_element(child, el);
                parent.children.push(built);
            }
            Node::Text(t) => append_text(parent, &t.text),
            _ => {}
        }
    }
}

fn build_element(node: NodeRef<'_, Node>, el: &scraper::node::Element) -> Element {
    let mut element = Element::new(&el.name().to_ascii_lowercase());
    for (name, value) in el.attrs() {
        element.attrs.insert(name.to_string(), value.to_string());
    }
    for child in node.children() {
        match child.value() {
            Node::Element(child_el) => {
                let built = build_element(child, child_el);
                element.children.push(built);
            }
            Node::Text(t) => append_text(&mut element, &t.text),
            _ => {}
        }
    }
    element
}

/// Attach character data either as the parent's leading text or as the
/// tail of the most recent child.
fn append_text(parent: &mut Element, text: &str) {
    if let Some(last) = parent.children.last_mut() {
        match &mut last.tail {
            Some(tail) => tail.push_str(text),
            None => last.tail = Some(text.to_string()),
        }
    } else {
        match &mut parent.text {
            Some(existing) => existing.push_str(text),
            None => parent.text = Some(text.to_string()),
        }
    }
}

/// Serialize an element subtree back to markup.
///
/// Used by the skeleton generator to record verbatim fragments for
/// placeholder reinsertion. Void elements self-close; text and attribute
/// values are XML-escaped. The element's own `tail` is not included.
pub fn serialize_element(el: &Element) -> String {
    let mut out = String::new();
    write_element(&mut out, el);
    out
}

/// Serialize only an element's contents: leading text, children, and
/// their tails, without the element's own tags.
pub fn serialize_inner(el: &Element) -> String {
    let mut out = String::new();
    write_inner(&mut out, el);
    out
}

fn write_element(out: &mut String, el: &Element) {
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_xml(value));
        out.push('"');
    }

    if classify(&el.tag) == Category::Void && el.children.is_empty() && el.text.is_none() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    write_inner(out, el);
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

fn write_inner(out: &mut String, el: &Element) {
    if let Some(text) = &el.text {
        out.push_str(&escape_xml(text));
    }
    for child in &el.children {
        write_element(out, child);
        if let Some(tail) = &child.tail {
            out.push_str(&escape_xml(tail));
        }
    }
}
