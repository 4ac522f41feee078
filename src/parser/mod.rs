//! Markdown and HTML parsing into the structured intermediate form.
//!
//! [`MarkdownParser`] renders Markdown to HTML (pulldown-cmark, CommonMark
//! with tables and strikethrough, soft breaks as `<br>`) and delegates to
//! [`HtmlParser`], which walks the element tree and produces
//! [`ParsedContent`]: the ordered translatable segments, the document
//! structure summary, and the skeleton's original-data table.
//!
//! Both parsers also run the reverse direction, rebuilding HTML or
//! Markdown from a `ParsedContent` (typically recovered from an XLIFF
//! document).

mod segment;

use std::collections::HashMap;

use pulldown_cmark::{Event as MdEvent, Options, Parser as MdParser, html as md_html};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};
use crate::html;
use crate::markdown;
use crate::util::escape_xml;
use crate::xliff::fs::{AttributeMap, deserialize_attributes};
use crate::xliff::skeleton::DataEntry;

pub use segment::SegmentCollector;

/// One translatable (or skeleton) segment extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// XML fragment: escaped text with literal `mrk`/`ph` inline codes.
    pub content: String,
    /// Source element name, or `"text"` for stray character data.
    pub element: String,
    /// Whether the segment carries translatable text.
    pub translatable: bool,
    /// The source element's attributes.
    pub attrs: AttributeMap,
}

/// Document structure summary kept alongside the segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureInfo {
    pub tag: String,
    pub attributes: AttributeMap,
    pub children_count: usize,
}

/// Structured representation of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedContent {
    pub segments: Vec<Segment>,
    pub structure: StructureInfo,
    /// Verbatim markup fragments referenced by placeholder codes.
    pub original_data: Vec<DataEntry>,
}

/// Parser for Markdown content.
#[derive(Debug, Default)]
pub struct MarkdownParser {
    _private: (),
}

impl MarkdownParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render Markdown to HTML, then parse the HTML for structure.
    pub fn parse(&self, content: &str) -> Result<ParsedContent> {
        if content.trim().is_empty() {
            return Err(Error::Validation("Content cannot be empty".to_string()));
        }

        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        // Soft line breaks render as <br>, matching the renderer contract.
        let events = MdParser::new_ext(content, options).map(|event| match event {
            MdEvent::SoftBreak => MdEvent::Html("<br />\n".into()),
            other => other,
        });

        let mut html_content = String::with_capacity(content.len() * 2);
        md_html::push_html(&mut html_content, events);
        tracing::debug!(html_len = html_content.len(), "rendered markdown to html");

        HtmlParser::new().parse(&html_content)
    }

    /// Reconstruct Markdown from structured content.
    ///
    /// Fidelity is loose for exotic constructs: the content is rebuilt as
    /// HTML first and then rendered to Markdown.
    pub fn reconstruct(&self, content: &ParsedContent) -> Result<String> {
        let html_content = HtmlParser::new().reconstruct(content)?;
        Ok(markdown::html_to_markdown(&html_content))
    }
}

/// Parser for HTML content.
#[derive(Debug, Default)]
pub struct HtmlParser {
    _private: (),
}

impl HtmlParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse HTML into segments, structure, and skeleton data.
    pub fn parse(&self, content: &str) -> Result<ParsedContent> {
        if content.trim().is_empty() {
            return Err(Error::Validation("Content cannot be empty".to_string()));
        }

        let root = html::parse(content);
        let children_count = root.children.len();
        let (segments, original_data) = SegmentCollector::new().collect(&root);
        tracing::debug!(
            segments = segments.len(),
            skeleton_entries = original_data.len(),
            "parsed html content"
        );

        Ok(ParsedContent {
            segments,
            structure: StructureInfo {
                tag: "document".to_string(),
                attributes: AttributeMap::new(),
                children_count,
            },
            original_data,
        })
    }

    /// Reconstruct HTML from structured content.
    ///
    /// Translatable segments are re-wrapped in their recorded element with
    /// inline codes expanded back to source markup; skeleton segments are
    /// reinserted verbatim from the original-data table.
    pub fn reconstruct(&self, content: &ParsedContent) -> Result<String> {
        let data: HashMap<&str, &str> = content
            .original_data
            .iter()
            .map(|entry| (entry.id.as_str(), entry.content.as_str()))
            .collect();

        let mut parts = Vec::with_capacity(content.segments.len());
        for segment in &content.segments {
            let restored = restore_fragment(&segment.content, &data)?;
            if !segment.translatable || segment.element == "text" {
                parts.push(restored);
                continue;
            }

            let mut part = String::new();
            part.push('<');
            part.push_str(&segment.element);
            for (name, value) in &segment.attrs {
                part.push(' ');
                part.push_str(name);
                part.push_str("=\"");
                part.push_str(&escape_xml(value));
                part.push('"');
            }
            part.push('>');
            part.push_str(&restored);
            part.push_str("</");
            part.push_str(&segment.element);
            part.push('>');
            parts.push(part);
        }
        Ok(parts.join("\n"))
    }
}

/// Expand a unit-content fragment back to source markup: `mrk` spans
/// become their original inline elements, `ph` codes are replaced by the
/// referenced original-data markup, text passes through still escaped.
pub fn restore_fragment(fragment: &str, data: &HashMap<&str, &str>) -> Result<String> {
    let wrapped = format!("<frag>{fragment}</frag>");
    let mut reader = Reader::from_str(&wrapped);
    let mut out = String::with_capacity(fragment.len());
    let mut open_tags: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"frag" => {}
                b"mrk" => {
                    let (tag, attrs) = marker_source(&e)?;
                    out.push('<');
                    out.push_str(&tag);
                    for (name, value) in &attrs {
                        out.push(' ');
                        out.push_str(name);
                        out.push_str("=\"");
                        out.push_str(&escape_xml(value));
                        out.push('"');
                    }
                    out.push('>');
                    open_tags.push(tag);
                }
                other => {
                    // Pass through unexpected markup untouched.
                    out.push('<');
                    out.push_str(&String::from_utf8_lossy(other));
                    push_raw_attributes(&mut out, &e);
                    out.push('>');
                }
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"frag" => {}
                b"mrk" => {
                    if let Some(tag) = open_tags.pop() {
                        out.push_str("</");
                        out.push_str(&tag);
                        out.push('>');
                    }
                }
                other => {
                    out.push_str("</");
                    out.push_str(&String::from_utf8_lossy(other));
                    out.push('>');
                }
            },
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"ph" {
                    if let Some(data_ref) = attribute_value(&e, b"dataRef")?
                        && let Some(markup) = data.get(data_ref.as_str())
                    {
                        out.push_str(markup);
                    }
                } else {
                    out.push('<');
                    out.push_str(&String::from_utf8_lossy(e.name().as_ref()));
                    push_raw_attributes(&mut out, &e);
                    out.push_str("/>");
                }
            }
            Ok(Event::Text(e)) => out.push_str(&String::from_utf8_lossy(e.as_ref())),
            Ok(Event::GeneralRef(e)) => {
                out.push('&');
                out.push_str(&String::from_utf8_lossy(e.as_ref()));
                out.push(';');
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Parsing(format!("malformed unit content: {e}")));
            }
            _ => {}
        }
    }
    Ok(out)
}

/// Re-emit a tag's attributes with their raw (still escaped) values.
fn push_raw_attributes(out: &mut String, e: &BytesStart) {
    for attr in e.attributes().flatten() {
        out.push(' ');
        out.push_str(&String::from_utf8_lossy(attr.key.as_ref()));
        out.push_str("=\"");
        out.push_str(&String::from_utf8_lossy(&attr.value));
        out.push('"');
    }
}

/// Extract the original tag and attributes from a `mrk` element's Format
/// Style attributes.
fn marker_source(e: &BytesStart) -> Result<(String, AttributeMap)> {
    let tag = attribute_value(e, b"fs:fs")?.unwrap_or_else(|| "span".to_string());
    let attrs = match attribute_value(e, b"fs:subFs")? {
        Some(sub_fs) => deserialize_attributes(&sub_fs),
        None => AttributeMap::new(),
    };
    Ok((tag, attrs))
}

fn attribute_value(e: &BytesStart, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|err| Error::Parsing(format!("bad attribute value: {err}")))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
