//! Inline code construction: `mrk` marker spans and `ph` placeholders.
//!
//! Markers wrap contiguous runs of translatable text with the original
//! inline tag recorded through the Format Style module; placeholders stand
//! in for void inline elements, delegating id and original-data handling
//! to the [`SkeletonGenerator`].
//!
//! The produced fragments are well-formed XML: text is already escaped,
//! markup is literal. Callers emit markers in a single depth-first pass
//! over the inline subtree so spans nest exactly as the source did.

use crate::util::escape_xml;
use crate::xliff::fs::{AttributeMap, serialize_inline_attributes};
use crate::xliff::skeleton::SkeletonGenerator;

/// Build a `<mrk>` span around already-escaped inline content.
pub fn create_mrk_element(tag: &str, attrs: Option<&AttributeMap>, content: &str) -> String {
    let mut out = String::from("<mrk translate=\"yes\" fs:fs=\"");
    let (fs_tag, sub_fs) = match attrs {
        Some(attrs) => serialize_inline_attributes(tag, attrs),
        None => (tag.to_ascii_lowercase(), String::new()),
    };
    out.push_str(&fs_tag);
    out.push('"');
    if !sub_fs.is_empty() {
        out.push_str(" fs:subFs=\"");
        out.push_str(&escape_xml(&sub_fs));
        out.push('"');
    }
    out.push('>');
    out.push_str(content);
    out.push_str("</mrk>");
    out
}

/// Build a `<ph/>` placeholder for a void inline element, registering its
/// verbatim markup with the skeleton generator.
pub fn create_ph_element(
    skeleton: &mut SkeletonGenerator,
    tag: &str,
    attrs: Option<&AttributeMap>,
) -> String {
    let placeholder = skeleton.generate_placeholder(tag, attrs);
    let mut out = String::from("<ph id=\"");
    out.push_str(&placeholder.ph_id);
    out.push_str("\" dataRef=\"");
    out.push_str(&placeholder.data_id);
    out.push_str("\" fs:fs=\"");
    out.push_str(&tag.to_ascii_lowercase());
    out.push('"');
    if let Some(attrs) = attrs
        && !attrs.is_empty()
    {
        let (_, sub_fs) = serialize_inline_attributes(tag, attrs);
        out.push_str(" fs:subFs=\"");
        out.push_str(&escape_xml(&sub_fs));
        out.push('"');
    }
    out.push_str("/>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> AttributeMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_mrk_without_attributes() {
        let mrk = create_mrk_element("strong", None, "bold text");
        assert_eq!(mrk, "<mrk translate=\"yes\" fs:fs=\"strong\">bold text</mrk>");
    }

    #[test]
    fn test_mrk_with_attributes() {
        let attrs = map(&[("href", "https://example.com")]);
        let mrk = create_mrk_element("a", Some(&attrs), "link");
        assert_eq!(
            mrk,
            "<mrk translate=\"yes\" fs:fs=\"a\" fs:subFs=\"href,https://example.com\">link</mrk>"
        );
    }

    #[test]
    fn test_nested_mrk_spans() {
        let inner = create_mrk_element("em", None, "both");
        let outer = create_mrk_element("strong", None, &inner);
        assert_eq!(
            outer,
            "<mrk translate=\"yes\" fs:fs=\"strong\"><mrk translate=\"yes\" fs:fs=\"em\">both</mrk></mrk>"
        );
    }

    #[test]
    fn test_ph_element_references_skeleton() {
        let mut skeleton = SkeletonGenerator::new();
        let attrs = map(&[("src", "pic.png")]);
        let ph = create_ph_element(&mut skeleton, "img", Some(&attrs));
        assert_eq!(
            ph,
            "<ph id=\"ph1\" dataRef=\"d1\" fs:fs=\"img\" fs:subFs=\"src,pic.png\"/>"
        );
        assert_eq!(skeleton.data().len(), 1);
        assert_eq!(skeleton.data()[0].content, r#"<img src="pic.png"/>"#);
    }

    #[test]
    fn test_ph_element_without_attributes() {
        let mut skeleton = SkeletonGenerator::new();
        let ph = create_ph_element(&mut skeleton, "br", None);
        assert_eq!(ph, "<ph id=\"ph1\" dataRef=\"d1\" fs:fs=\"br\"/>");
    }
}
