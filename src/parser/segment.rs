//! Segmentation walker: element tree → translation segments.
//!
//! One depth-first pass over the parsed HTML tree. Leaf text containers
//! become single segments whose content carries inline `mrk`/`ph` codes;
//! opaque structural elements are stored verbatim in the skeleton and
//! replaced by placeholder segments; decomposable containers recurse.

use crate::element::{Category, classify, preserves_whitespace, should_preserve_structure};
use crate::html::{Element, serialize_element, serialize_inner};
use crate::util::{collapse_whitespace, escape_xml, normalize_whitespace};
use crate::xliff::inline::{create_mrk_element, create_ph_element};
use crate::xliff::skeleton::{DataEntry, SkeletonGenerator};

use super::Segment;

/// Walks an element tree, accumulating segments and skeleton data.
pub struct SegmentCollector {
    skeleton: SkeletonGenerator,
    segments: Vec<Segment>,
}

impl SegmentCollector {
    pub fn new() -> Self {
        SegmentCollector {
            skeleton: SkeletonGenerator::new(),
            segments: Vec::new(),
        }
    }

    /// Consume the collector, walking the tree rooted at `root`.
    pub fn collect(mut self, root: &Element) -> (Vec<Segment>, Vec<DataEntry>) {
        self.walk_children(root);
        (self.segments, self.skeleton.into_data())
    }

    fn walk_children(&mut self, el: &Element) {
        if let Some(text) = &el.text {
            self.push_text_segment(text);
        }
        for child in &el.children {
            self.walk_block(child);
            if let Some(tail) = &child.tail {
                self.push_text_segment(tail);
            }
        }
    }

    fn walk_block(&mut self, el: &Element) {
        match classify(&el.tag) {
            Category::TextContainer | Category::Inline => self.push_container(el),
            Category::Void | Category::Embedded => self.push_skeleton(el),
            Category::Structural => {
                if should_preserve_structure(&el.tag) {
                    self.push_skeleton(el);
                } else {
                    self.walk_children(el);
                }
            }
            Category::Unknown => {
                if el.children.is_empty() {
                    if let Some(text) = &el.text {
                        self.push_text_segment(text);
                    }
                } else {
                    self.walk_children(el);
                }
            }
        }
    }

    /// Emit one segment for a leaf text container (or stray inline element),
    /// with inline children folded into the content as `mrk`/`ph` codes.
    fn push_container(&mut self, el: &Element) {
        let preserve = preserves_whitespace(&el.tag);
        let content = self.inline_content(el, preserve);
        if content.trim().is_empty() {
            return;
        }
        let content = if preserve {
            content
        } else {
            content.trim().to_string()
        };
        self.segments.push(Segment {
            content,
            element: el.tag.clone(),
            translatable: true,
            attrs: el.attrs.clone(),
        });
    }

    /// Emit a non-translatable placeholder segment for an element whose
    /// markup is preserved verbatim.
    fn push_skeleton(&mut self, el: &Element) {
        let markup = if classify(&el.tag) == Category::Void {
            serialize_element(el)
        } else {
            SkeletonGenerator::create_skeleton_element(&el.tag, &el.attrs, &serialize_inner(el))
        };
        let ph = self.ph_for_markup(&el.tag, markup);
        self.segments.push(Segment {
            content: ph,
            element: el.tag.clone(),
            translatable: false,
            attrs: el.attrs.clone(),
        });
    }

    fn push_text_segment(&mut self, text: &str) {
        let normalized = normalize_whitespace(text);
        if normalized.is_empty() {
            return;
        }
        self.segments.push(Segment {
            content: escape_xml(&normalized),
            element: "text".to_string(),
            translatable: true,
            attrs: Default::default(),
        });
    }

    /// Build the inline content of an element: escaped text runs with
    /// nested markers and placeholders, in source order. `preserve` keeps
    /// whitespace intact for `pre`-like subtrees.
    fn inline_content(&mut self, el: &Element, preserve: bool) -> String {
        let mut out = String::new();
        if let Some(text) = &el.text {
            out.push_str(&escape_inline_text(text, preserve));
        }
        for child in &el.children {
            let attrs = (!child.attrs.is_empty()).then_some(&child.attrs);
            match classify(&child.tag) {
                Category::Inline => {
                    let inner = self.inline_content(child, preserve);
                    out.push_str(&create_mrk_element(&child.tag, attrs, &inner));
                }
                Category::Void => {
                    out.push_str(&create_ph_element(&mut self.skeleton, &child.tag, attrs));
                }
                Category::Embedded | Category::Structural => {
                    // A block or embedded subtree nested inside running
                    // text: keep the whole subtree verbatim rather than
                    // tearing its layout apart.
                    let markup = serialize_element(child);
                    let ph = self.ph_for_markup(&child.tag, markup);
                    out.push_str(&ph);
                }
                Category::TextContainer | Category::Unknown => {
                    // Flatten nested text blocks (e.g. `li > p`) into the
                    // surrounding segment.
                    let inner_preserve = preserve || preserves_whitespace(&child.tag);
                    out.push_str(&self.inline_content(child, inner_preserve));
                }
            }
            if let Some(tail) = &child.tail {
                out.push_str(&escape_inline_text(tail, preserve));
            }
        }
        out
    }

    fn ph_for_markup(&mut self, tag: &str, markup: String) -> String {
        let placeholder = self.skeleton.store(markup);
        format!(
            "<ph id=\"{}\" dataRef=\"{}\" fs:fs=\"{}\"/>",
            placeholder.ph_id,
            placeholder.data_id,
            tag.to_ascii_lowercase()
        )
    }
}

fn escape_inline_text(text: &str, preserve: bool) -> String {
    if preserve {
        escape_xml(text)
    } else {
        escape_xml(&collapse_whitespace(text))
    }
}
