use quick_xml::Reader;
use quick_xml::events::Event;

use markliff::{HtmlParser, State, XliffDocument, markdown_to_xliff, xliff_to_html};

/// Count `trans-unit` elements by re-parsing the XML, which doubles as a
/// well-formedness check.
fn count_trans_units(xml: &str) -> usize {
    let mut reader = Reader::from_str(xml);
    let mut count = 0;
    loop {
        match reader.read_event().expect("output XML should be well-formed") {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"trans-unit" => count += 1,
            Event::Eof => break,
            _ => {}
        }
    }
    count
}

#[test]
fn test_to_xml_is_well_formed_with_matching_unit_count() {
    let parsed = HtmlParser::new()
        .parse("<h1>A</h1><p>B</p><ul><li>C</li><li>D</li></ul>")
        .unwrap();
    let doc = XliffDocument::new("en", "es", &parsed);
    let expected: usize = doc.files.iter().map(|f| f.units.len()).sum();

    let xml = doc.to_xml();
    assert_eq!(count_trans_units(&xml), expected);
}

#[test]
fn test_zero_file_document_serializes_to_empty_root() {
    let xml = XliffDocument::empty().to_xml();
    assert_eq!(count_trans_units(&xml), 0);

    let parsed = XliffDocument::from_xml(&xml).unwrap();
    assert!(parsed.files.is_empty());
    assert_eq!(parsed.version, "2.1");
}

#[test]
fn test_absent_target_omits_element() {
    let xml = markdown_to_xliff("plain paragraph", "en", "es").unwrap();
    assert!(!xml.contains("<target"));
}

#[test]
fn test_from_xml_two_units_in_document_order() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="2.1" xmlns="urn:oasis:names:tc:xliff:document:2.1">
  <file id="f1" source-language="en" target-language="de">
    <trans-unit id="first" state="translated">
      <source>One &amp; two</source>
      <target>Eins &amp; zwei</target>
    </trans-unit>
    <trans-unit id="second" state="new">
      <source>Second unit</source>
    </trans-unit>
  </file>
</xliff>"#;

    let doc = XliffDocument::from_xml(xml).unwrap();
    assert_eq!(doc.files.len(), 1);
    let file = &doc.files[0];
    assert_eq!(file.id, "f1");
    assert_eq!(file.units.len(), 2);

    assert_eq!(file.units[0].id, "first");
    assert_eq!(file.units[0].state, State::Translated);
    assert_eq!(file.units[0].source_text(), "One & two");
    assert_eq!(file.units[0].target_text().as_deref(), Some("Eins & zwei"));

    assert_eq!(file.units[1].id, "second");
    assert_eq!(file.units[1].state, State::New);
    assert_eq!(file.units[1].source_text(), "Second unit");
    assert_eq!(file.units[1].target, None);
}

#[test]
fn test_unknown_attributes_preserved_as_extensions() {
    let xml = r#"<xliff version="2.1" xmlns="urn:oasis:names:tc:xliff:document:2.1">
  <file id="f1" source-language="en" target-language="es" custom="yes">
    <trans-unit id="u1" priority="high"><source>text</source></trans-unit>
  </file>
</xliff>"#;

    let doc = XliffDocument::from_xml(xml).unwrap();
    let file = &doc.files[0];
    assert_eq!(file.extensions.get("custom").map(String::as_str), Some("yes"));
    assert_eq!(
        file.units[0].extensions.get("priority").map(String::as_str),
        Some("high")
    );

    // And they survive re-serialization.
    let rewritten = doc.to_xml();
    assert!(rewritten.contains("custom=\"yes\""));
    assert!(rewritten.contains("priority=\"high\""));
}

#[test]
fn test_multi_file_data_ids_resolve_per_file() {
    // Both files use data id d1 for different fragments; each file's
    // placeholders must resolve against its own table.
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="2.1" xmlns="urn:oasis:names:tc:xliff:document:2.1" xmlns:fs="urn:oasis:names:tc:xliff:fs:2.0">
  <file id="f1" source-language="en" target-language="es">
    <originalData><data id="d1">&lt;br/&gt;</data></originalData>
    <trans-unit id="u1" fs:fs="p">
      <source>a<ph id="ph1" dataRef="d1" fs:fs="br"/>b</source>
    </trans-unit>
  </file>
  <file id="f2" source-language="en" target-language="es">
    <originalData><data id="d1">&lt;hr/&gt;</data></originalData>
    <trans-unit id="u1" fs:fs="p">
      <source>c<ph id="ph1" dataRef="d1" fs:fs="hr"/>d</source>
    </trans-unit>
  </file>
</xliff>"#;

    let html = xliff_to_html(xml).unwrap();
    assert!(html.contains("<p>a<br/>b</p>"), "html: {html}");
    assert!(html.contains("<p>c<hr/>d</p>"), "html: {html}");
}

#[test]
fn test_serialize_parse_serialize_is_stable() {
    let parsed = HtmlParser::new()
        .parse("<p>alpha <em>beta</em></p><table><tr><td>x</td></tr></table>")
        .unwrap();
    let first = XliffDocument::new("en", "es", &parsed).to_xml();
    let second = XliffDocument::from_xml(&first).unwrap().to_xml();
    assert_eq!(first, second);
}

#[test]
fn test_escaped_characters_in_source() {
    let xml = markdown_to_xliff("AT&T says 1 < 2", "en", "es").unwrap();
    assert!(xml.contains("AT&amp;T"));
    assert!(xml.contains("1 &lt; 2"));
    // Still well-formed
    count_trans_units(&xml);
}
