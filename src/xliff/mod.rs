//! XLIFF 2.1 document model and XML serialization.
//!
//! [`XliffDocument`] owns an ordered sequence of [`XliffFile`]s, each
//! holding translation units in document order plus the original-data
//! table used for skeleton-based reconstruction. Serialization writes the
//! XLIFF 2.1 namespace (`urn:oasis:names:tc:xliff:document:2.1`) with the
//! Format Style extension namespace (`urn:oasis:names:tc:xliff:fs:2.0`)
//! for recorded tag/attribute information.

pub mod fs;
pub mod inline;
pub mod skeleton;

use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};
use crate::parser::{ParsedContent, Segment, StructureInfo};
use crate::util::{escape_xml, resolve_entity};
use crate::xliff::fs::{AttributeMap, deserialize_attributes, serialize_attributes};
use crate::xliff::skeleton::DataEntry;

pub const XLIFF_NAMESPACE: &str = "urn:oasis:names:tc:xliff:document:2.1";
pub const FORMAT_STYLE_NAMESPACE: &str = "urn:oasis:names:tc:xliff:fs:2.0";

/// Translation state of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    New,
    Translated,
    Reviewed,
    Final,
}

impl State {
    pub fn as_str(self) -> &'static str {
        match self {
            State::New => "new",
            State::Translated => "translated",
            State::Reviewed => "reviewed",
            State::Final => "final",
        }
    }

    /// Parse a state string; unknown values default to `new`.
    pub fn parse(s: &str) -> State {
        match s {
            "translated" => State::Translated,
            "reviewed" => State::Reviewed,
            "final" => State::Final,
            _ => State::New,
        }
    }
}

/// The atomic segment of source/target text exchanged with a translation
/// tool.
///
/// `source` and `target` are XLIFF inline-content fragments: escaped text
/// possibly containing literal `<mrk>`/`<ph/>` codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    pub id: String,
    pub source: String,
    pub target: Option<String>,
    pub state: State,
    /// False for skeleton placeholder units that must not be translated.
    pub translate: bool,
    /// Format Style: original element name.
    pub fs_fs: Option<String>,
    /// Format Style: serialized original attributes.
    pub fs_sub_fs: Option<String>,
    /// Unrecognized attributes, preserved on round trip.
    pub extensions: BTreeMap<String, String>,
}

impl TranslationUnit {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        TranslationUnit {
            id: id.into(),
            source: source.into(),
            target: None,
            state: State::New,
            translate: true,
            fs_fs: None,
            fs_sub_fs: None,
            extensions: BTreeMap::new(),
        }
    }

    /// The source as plain text: inline codes stripped, entities resolved.
    pub fn source_text(&self) -> String {
        plain_text(&self.source)
    }

    /// The target as plain text, if present.
    pub fn target_text(&self) -> Option<String> {
        self.target.as_deref().map(plain_text)
    }

    /// Set the target from plain text, escaping as needed.
    pub fn set_target_text(&mut self, text: &str) {
        self.target = Some(escape_xml(text));
        self.state = State::Translated;
    }
}

/// One `<file>` element: a source document's worth of units.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XliffFile {
    pub id: String,
    pub source_language: String,
    pub target_language: String,
    /// Reference to the original document (filename), when known.
    pub original: Option<String>,
    /// Units in document order; reconstruction depends on this order.
    pub units: Vec<TranslationUnit>,
    /// Verbatim markup fragments referenced by `ph` codes in the units.
    pub original_data: Vec<DataEntry>,
    pub extensions: BTreeMap<String, String>,
}

impl XliffFile {
    /// Structured view of this file's units for reconstruction. Targets
    /// take precedence over sources when present. Data ids are scoped to
    /// the file, so reconstruction resolves placeholders against this
    /// file's table only.
    pub fn content(&self) -> ParsedContent {
        let segments: Vec<Segment> = self
            .units
            .iter()
            .map(|unit| Segment {
                content: unit.target.clone().unwrap_or_else(|| unit.source.clone()),
                element: unit.fs_fs.clone().unwrap_or_else(|| "p".to_string()),
                translatable: unit.translate,
                attrs: unit
                    .fs_sub_fs
                    .as_deref()
                    .map(deserialize_attributes)
                    .unwrap_or_default(),
            })
            .collect();
        let children_count = segments.len();
        ParsedContent {
            segments,
            structure: StructureInfo {
                tag: "document".to_string(),
                attributes: AttributeMap::new(),
                children_count,
            },
            original_data: self.original_data.clone(),
        }
    }
}

/// Root aggregate: a complete XLIFF 2.1 document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XliffDocument {
    pub version: String,
    pub files: Vec<XliffFile>,
}

impl Default for XliffDocument {
    fn default() -> Self {
        XliffDocument {
            version: "2.1".to_string(),
            files: Vec::new(),
        }
    }
}

impl XliffDocument {
    /// Create an empty document.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a document from parsed content: one file, one unit per
    /// segment, ids assigned positionally (`unit_1`, `unit_2`, ...) in
    /// source order.
    pub fn new(source_lang: &str, target_lang: &str, content: &ParsedContent) -> Self {
        let mut units = Vec::with_capacity(content.segments.len());
        for (index, segment) in content.segments.iter().enumerate() {
            let mut unit = TranslationUnit::new(format!("unit_{}", index + 1), segment.content.clone());
            unit.translate = segment.translatable;
            if segment.element != "text" {
                unit.fs_fs = Some(segment.element.clone());
            }
            if !segment.attrs.is_empty() {
                unit.fs_sub_fs = Some(serialize_attributes(&segment.attrs));
            }
            units.push(unit);
        }

        let file = XliffFile {
            id: "file_1".to_string(),
            source_language: source_lang.to_string(),
            target_language: target_lang.to_string(),
            original: None,
            units,
            original_data: content.original_data.clone(),
            extensions: BTreeMap::new(),
        };

        XliffDocument {
            version: "2.1".to_string(),
            files: vec![file],
        }
    }

    /// Structured content view over all files. Data ids are only unique
    /// within one file, so reconstruction of multi-file documents must go
    /// through [`XliffFile::content`] per file; this merged view is for
    /// inspecting segments.
    pub fn content(&self) -> ParsedContent {
        let mut segments = Vec::new();
        let mut original_data = Vec::new();
        for file in &self.files {
            let file_content = file.content();
            segments.extend(file_content.segments);
            original_data.extend(file_content.original_data);
        }
        let children_count = segments.len();
        ParsedContent {
            segments,
            structure: StructureInfo {
                tag: "document".to_string(),
                attributes: AttributeMap::new(),
                children_count,
            },
            original_data,
        }
    }

    /// Serialize to XLIFF 2.1 XML.
    ///
    /// A document with zero files serializes to a valid empty `<xliff>`
    /// root. Units without a target omit the `<target>` element entirely.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!(
            "<xliff version=\"{}\" xmlns=\"{}\" xmlns:fs=\"{}\"",
            escape_xml(&self.version),
            XLIFF_NAMESPACE,
            FORMAT_STYLE_NAMESPACE
        ));
        if let Some(first) = self.files.first() {
            xml.push_str(&format!(
                " source-language=\"{}\" target-language=\"{}\"",
                escape_xml(&first.source_language),
                escape_xml(&first.target_language)
            ));
        }
        xml.push_str(">\n");

        for file in &self.files {
            xml.push_str(&format!(
                "  <file id=\"{}\" source-language=\"{}\" target-language=\"{}\"",
                escape_xml(&file.id),
                escape_xml(&file.source_language),
                escape_xml(&file.target_language)
            ));
            if let Some(original) = &file.original {
                xml.push_str(&format!(" original=\"{}\"", escape_xml(original)));
            }
            for (name, value) in &file.extensions {
                xml.push_str(&format!(" {}=\"{}\"", name, escape_xml(value)));
            }
            xml.push_str(">\n");

            if !file.original_data.is_empty() {
                xml.push_str("    <originalData>\n");
                for entry in &file.original_data {
                    xml.push_str(&format!(
                        "      <data id=\"{}\">{}</data>\n",
                        escape_xml(&entry.id),
                        escape_xml(&entry.content)
                    ));
                }
                xml.push_str("    </originalData>\n");
            }

            for unit in &file.units {
                xml.push_str(&format!(
                    "    <trans-unit id=\"{}\" state=\"{}\"",
                    escape_xml(&unit.id),
                    unit.state.as_str()
                ));
                if !unit.translate {
                    xml.push_str(" translate=\"no\"");
                }
                if let Some(fs_fs) = &unit.fs_fs {
                    xml.push_str(&format!(" fs:fs=\"{}\"", escape_xml(fs_fs)));
                }
                if let Some(sub_fs) = &unit.fs_sub_fs {
                    xml.push_str(&format!(" fs:subFs=\"{}\"", escape_xml(sub_fs)));
                }
                for (name, value) in &unit.extensions {
                    xml.push_str(&format!(" {}=\"{}\"", name, escape_xml(value)));
                }
                xml.push_str(">\n");

                // Source/target content is already a well-formed fragment.
                xml.push_str("      <source>");
                xml.push_str(&unit.source);
                xml.push_str("</source>\n");
                if let Some(target) = &unit.target {
                    xml.push_str("      <target>");
                    xml.push_str(target);
                    xml.push_str("</target>\n");
                }
                xml.push_str("    </trans-unit>\n");
            }
            xml.push_str("  </file>\n");
        }
        xml.push_str("</xliff>\n");
        xml
    }

    /// Parse an XLIFF document from XML.
    ///
    /// Missing `id`/`state` attributes default positionally; malformed XML
    /// or a non-XLIFF root yields [`Error::Validation`].
    pub fn from_xml(xml: &str) -> Result<XliffDocument> {
        if xml.trim().is_empty() {
            return Err(Error::Validation("XLIFF content cannot be empty".to_string()));
        }

        let mut reader = Reader::from_str(xml);
        let mut document = XliffDocument::empty();
        let mut saw_root = false;
        let mut current_file: Option<XliffFile> = None;
        let mut current_unit: Option<TranslationUnit> = None;
        let mut capture: Capture = Capture::None;
        let mut buffer = String::new();
        let mut data_id = String::new();

        loop {
            let event = reader
                .read_event()
                .map_err(|e| Error::Validation(format!("Invalid XLIFF XML: {e}")))?;

            // Inside <source>/<target>, re-emit events verbatim into the
            // fragment buffer.
            if let Capture::Content { depth } = capture {
                match &event {
                    Event::Start(e) => {
                        capture = Capture::Content { depth: depth + 1 };
                        append_markup(&mut buffer, e, false);
                        continue;
                    }
                    Event::Empty(e) => {
                        append_markup(&mut buffer, e, true);
                        continue;
                    }
                    Event::End(e) => {
                        if depth == 0 {
                            let is_target = e.name().as_ref() == b"target";
                            if let Some(unit) = current_unit.as_mut() {
                                if is_target {
                                    unit.target = Some(std::mem::take(&mut buffer));
                                } else {
                                    unit.source = std::mem::take(&mut buffer);
                                }
                            }
                            buffer.clear();
                            capture = Capture::None;
                        } else {
                            capture = Capture::Content { depth: depth - 1 };
                            buffer.push_str("</");
                            buffer.push_str(&String::from_utf8_lossy(e.name().as_ref()));
                            buffer.push('>');
                        }
                        continue;
                    }
                    Event::Text(e) => {
                        buffer.push_str(&String::from_utf8_lossy(e.as_ref()));
                        continue;
                    }
                    Event::GeneralRef(e) => {
                        buffer.push('&');
                        buffer.push_str(&String::from_utf8_lossy(e.as_ref()));
                        buffer.push(';');
                        continue;
                    }
                    Event::Eof => {
                        return Err(Error::Validation(
                            "Invalid XLIFF XML: unterminated source/target".to_string(),
                        ));
                    }
                    _ => continue,
                }
            }

            match event {
                Event::Start(e) | Event::Empty(e) if !saw_root => {
                    if e.name().as_ref() != b"xliff" {
                        return Err(Error::Validation(
                            "Invalid XLIFF XML: root element is not <xliff>".to_string(),
                        ));
                    }
                    if let Some(version) = find_attribute(&e, b"version")? {
                        document.version = version;
                    }
                    saw_root = true;
                }
                Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                    b"file" => {
                        let mut file = XliffFile {
                            id: format!("file_{}", document.files.len() + 1),
                            source_language: "en".to_string(),
                            target_language: "es".to_string(),
                            ..Default::default()
                        };
                        for attr in e.attributes().flatten() {
                            let value = attr
                                .unescape_value()
                                .map_err(|err| Error::Validation(format!("Invalid XLIFF XML: {err}")))?
                                .into_owned();
                            match attr.key.as_ref() {
                                b"id" => file.id = value,
                                b"source-language" => file.source_language = value,
                                b"target-language" => file.target_language = value,
                                b"original" => file.original = Some(value),
                                other => {
                                    file.extensions
                                        .insert(String::from_utf8_lossy(other).into_owned(), value);
                                }
                            }
                        }
                        current_file = Some(file);
                    }
                    b"trans-unit" | b"unit" => {
                        let unit_count = current_file.as_ref().map_or(0, |f| f.units.len());
                        let mut unit = TranslationUnit::new(format!("unit_{}", unit_count + 1), String::new());
                        for attr in e.attributes().flatten() {
                            let value = attr
                                .unescape_value()
                                .map_err(|err| Error::Validation(format!("Invalid XLIFF XML: {err}")))?
                                .into_owned();
                            match attr.key.as_ref() {
                                b"id" => unit.id = value,
                                b"state" => unit.state = State::parse(&value),
                                b"translate" => unit.translate = value != "no",
                                b"fs:fs" => unit.fs_fs = Some(value),
                                b"fs:subFs" => unit.fs_sub_fs = Some(value),
                                other => {
                                    unit.extensions
                                        .insert(String::from_utf8_lossy(other).into_owned(), value);
                                }
                            }
                        }
                        current_unit = Some(unit);
                    }
                    b"source" if current_unit.is_some() => {
                        buffer.clear();
                        capture = Capture::Content { depth: 0 };
                    }
                    b"target" if current_unit.is_some() => {
                        buffer.clear();
                        capture = Capture::Content { depth: 0 };
                    }
                    b"data" => {
                        data_id = find_attribute(&e, b"id")?
                            .unwrap_or_else(|| {
                                let count =
                                    current_file.as_ref().map_or(0, |f| f.original_data.len());
                                format!("d{}", count + 1)
                            });
                        buffer.clear();
                        capture = Capture::Data;
                    }
                    _ => {}
                },
                Event::Text(e) => {
                    if capture == Capture::Data {
                        buffer.push_str(&String::from_utf8_lossy(e.as_ref()));
                    }
                }
                Event::GeneralRef(e) => {
                    if capture == Capture::Data {
                        let entity = String::from_utf8_lossy(e.as_ref());
                        if let Some(resolved) = resolve_entity(&entity) {
                            buffer.push_str(&resolved);
                        }
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"data" => {
                        if let Some(file) = current_file.as_mut() {
                            file.original_data.push(DataEntry {
                                id: std::mem::take(&mut data_id),
                                content: std::mem::take(&mut buffer),
                            });
                        }
                        capture = Capture::None;
                    }
                    b"trans-unit" | b"unit" => {
                        if let (Some(file), Some(unit)) = (current_file.as_mut(), current_unit.take()) {
                            file.units.push(unit);
                        }
                    }
                    b"file" => {
                        if let Some(file) = current_file.take() {
                            document.files.push(file);
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        if !saw_root {
            return Err(Error::Validation(
                "Invalid XLIFF XML: no <xliff> root element".to_string(),
            ));
        }
        Ok(document)
    }
}

/// Capture mode while streaming the XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    None,
    /// Inside `<source>`/`<target>`, tracking nesting depth of inline codes.
    Content { depth: usize },
    /// Inside `<data>`, accumulating decoded markup.
    Data,
}

/// Append a start or empty tag, with raw (still escaped) attribute values,
/// to a fragment buffer.
fn append_markup(buffer: &mut String, e: &BytesStart, empty: bool) {
    buffer.push('<');
    buffer.push_str(&String::from_utf8_lossy(e.name().as_ref()));
    for attr in e.attributes().flatten() {
        buffer.push(' ');
        buffer.push_str(&String::from_utf8_lossy(attr.key.as_ref()));
        buffer.push_str("=\"");
        buffer.push_str(&String::from_utf8_lossy(&attr.value));
        buffer.push('"');
    }
    if empty {
        buffer.push('/');
    }
    buffer.push('>');
}

fn find_attribute(e: &BytesStart, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|err| Error::Validation(format!("Invalid XLIFF XML: {err}")))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Strip inline codes and resolve entities, yielding plain text.
fn plain_text(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut chars = fragment.chars();
    while let Some(c) = chars.next() {
        match c {
            '<' => {
                for inner in chars.by_ref() {
                    if inner == '>' {
                        break;
                    }
                }
            }
            '&' => {
                let mut entity = String::new();
                for inner in chars.by_ref() {
                    if inner == ';' {
                        break;
                    }
                    entity.push(inner);
                }
                match resolve_entity(&entity) {
                    Some(resolved) => out.push_str(&resolved),
                    None => {
                        out.push('&');
                        out.push_str(&entity);
                        out.push(';');
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_content() -> ParsedContent {
        ParsedContent {
            segments: vec![
                Segment {
                    content: "Hello World".to_string(),
                    element: "h1".to_string(),
                    translatable: true,
                    attrs: AttributeMap::new(),
                },
                Segment {
                    content: "This is a test.".to_string(),
                    element: "p".to_string(),
                    translatable: true,
                    attrs: AttributeMap::new(),
                },
            ],
            structure: StructureInfo {
                tag: "document".to_string(),
                attributes: AttributeMap::new(),
                children_count: 2,
            },
            original_data: Vec::new(),
        }
    }

    #[test]
    fn test_new_assigns_positional_ids() {
        let doc = XliffDocument::new("en", "es", &sample_content());
        assert_eq!(doc.files.len(), 1);
        let file = &doc.files[0];
        assert_eq!(file.id, "file_1");
        assert_eq!(file.units[0].id, "unit_1");
        assert_eq!(file.units[1].id, "unit_2");
        assert_eq!(file.units[0].fs_fs.as_deref(), Some("h1"));
    }

    #[test]
    fn test_to_xml_structure() {
        let doc = XliffDocument::new("en", "es", &sample_content());
        let xml = doc.to_xml();
        assert!(xml.contains("version=\"2.1\""));
        assert!(xml.contains(XLIFF_NAMESPACE));
        assert!(xml.contains("source-language=\"en\""));
        assert!(xml.contains("target-language=\"es\""));
        assert!(xml.contains("<source>Hello World</source>"));
        assert!(xml.contains("<source>This is a test.</source>"));
        assert!(!xml.contains("<target>"));
    }

    #[test]
    fn test_to_xml_empty_document() {
        let xml = XliffDocument::empty().to_xml();
        assert!(xml.contains("<xliff"));
        assert!(xml.contains("</xliff>"));
        assert!(!xml.contains("<file"));
    }

    #[test]
    fn test_roundtrip_preserves_order_and_text() {
        let mut doc = XliffDocument::new("en", "de", &sample_content());
        doc.files[0].units[1].set_target_text("Dies ist ein Test.");
        let xml = doc.to_xml();

        let parsed = XliffDocument::from_xml(&xml).unwrap();
        assert_eq!(parsed.files.len(), 1);
        let file = &parsed.files[0];
        assert_eq!(file.source_language, "en");
        assert_eq!(file.target_language, "de");
        assert_eq!(file.units.len(), 2);
        assert_eq!(file.units[0].id, "unit_1");
        assert_eq!(file.units[0].source, "Hello World");
        assert_eq!(file.units[1].target.as_deref(), Some("Dies ist ein Test."));
        assert_eq!(file.units[1].state, State::Translated);
    }

    #[test]
    fn test_from_xml_defaults() {
        let xml = r#"<?xml version="1.0"?>
<xliff version="2.1" xmlns="urn:oasis:names:tc:xliff:document:2.1">
  <file>
    <trans-unit><source>abc</source></trans-unit>
  </file>
</xliff>"#;
        let doc = XliffDocument::from_xml(xml).unwrap();
        let file = &doc.files[0];
        assert_eq!(file.id, "file_1");
        assert_eq!(file.source_language, "en");
        assert_eq!(file.units[0].id, "unit_1");
        assert_eq!(file.units[0].state, State::New);
    }

    #[test]
    fn test_from_xml_rejects_malformed() {
        assert!(matches!(
            XliffDocument::from_xml("not xml at all <"),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            XliffDocument::from_xml(""),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            XliffDocument::from_xml("<root><child/></root>"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_source_with_inline_codes_roundtrips() {
        let mut content = sample_content();
        content.segments[1].content =
            "go <mrk translate=\"yes\" fs:fs=\"a\" fs:subFs=\"href,x\">there</mrk> now".to_string();
        let doc = XliffDocument::new("en", "es", &content);
        let xml = doc.to_xml();
        let parsed = XliffDocument::from_xml(&xml).unwrap();
        assert_eq!(parsed.files[0].units[1].source, content.segments[1].content);
    }

    #[test]
    fn test_original_data_roundtrips() {
        let mut content = sample_content();
        content.original_data.push(DataEntry {
            id: "d1".to_string(),
            content: "<br/>".to_string(),
        });
        let doc = XliffDocument::new("en", "es", &content);
        let xml = doc.to_xml();
        assert!(xml.contains("<originalData>"));
        assert!(xml.contains("&lt;br/&gt;"));

        let parsed = XliffDocument::from_xml(&xml).unwrap();
        assert_eq!(parsed.files[0].original_data.len(), 1);
        assert_eq!(parsed.files[0].original_data[0].content, "<br/>");
    }

    #[test]
    fn test_plain_text_helpers() {
        let mut unit = TranslationUnit::new("u1", "a &amp; <mrk fs:fs=\"em\">b</mrk>");
        assert_eq!(unit.source_text(), "a & b");
        unit.set_target_text("x < y");
        assert_eq!(unit.target.as_deref(), Some("x &lt; y"));
        assert_eq!(unit.target_text().as_deref(), Some("x < y"));
    }

    #[test]
    fn test_state_parse_defaults_to_new() {
        assert_eq!(State::parse("translated"), State::Translated);
        assert_eq!(State::parse("bogus"), State::New);
        assert_eq!(State::parse(""), State::New);
    }

    #[test]
    fn test_content_view_prefers_target() {
        let mut doc = XliffDocument::new("en", "es", &sample_content());
        doc.files[0].units[0].set_target_text("Hola Mundo");
        let content = doc.content();
        assert_eq!(content.segments[0].content, "Hola Mundo");
        assert_eq!(content.segments[1].content, "This is a test.");
        assert_eq!(content.segments[0].element, "h1");
    }
}
