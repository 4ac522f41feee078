//! Placeholder id generation and original-data storage.
//!
//! Non-translatable markup (void elements, opaque structural subtrees) is
//! replaced by `<ph/>` inline codes during segmentation. The verbatim
//! markup fragment is stored here, keyed by a generated data id, so
//! reconstruction can reinsert it.

use crate::util::escape_xml;
use crate::xliff::fs::AttributeMap;

/// A stored verbatim-markup fragment, referenced by placeholder codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEntry {
    /// Data id (`d1`, `d2`, ...), unique within a document.
    pub id: String,
    /// The original markup fragment.
    pub content: String,
}

/// Reference pairing a placeholder id with its original-data entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderRef {
    /// Placeholder id (`ph1`, `ph2`, ...), embedded in unit content.
    pub ph_id: String,
    /// Data id indexing the original-data table.
    pub data_id: String,
}

/// Generates placeholder ids and records original markup fragments.
///
/// Per-conversion state: ids are unique and monotonically increasing
/// within one generator instance. Instances must not be shared across
/// concurrent conversions.
#[derive(Debug, Default)]
pub struct SkeletonGenerator {
    next_id: usize,
    data: Vec<DataEntry>,
}

impl SkeletonGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a placeholder for a void or opaque element, storing its
    /// serialized markup in the original-data table.
    pub fn generate_placeholder(&mut self, tag: &str, attrs: Option<&AttributeMap>) -> PlaceholderRef {
        let markup = render_void_markup(tag, attrs);
        self.store(markup)
    }

    /// Store an arbitrary verbatim markup fragment, returning its
    /// placeholder reference.
    pub fn store(&mut self, markup: String) -> PlaceholderRef {
        self.next_id += 1;
        let ph_id = format!("ph{}", self.next_id);
        let data_id = format!("d{}", self.next_id);
        // Monotonic counter makes collisions impossible; a duplicate here
        // means the generator state was corrupted.
        assert!(
            self.data.iter().all(|entry| entry.id != data_id),
            "duplicate data id {data_id}"
        );
        self.data.push(DataEntry {
            id: data_id.clone(),
            content: markup,
        });
        PlaceholderRef {
            ph_id,
            data_id,
        }
    }

    /// Wrap an entire structural subtree as an opaque skeleton fragment.
    pub fn create_skeleton_element(tag: &str, attrs: &AttributeMap, inner: &str) -> String {
        let mut out = String::new();
        out.push('<');
        out.push_str(&tag.to_ascii_lowercase());
        for (name, value) in attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_xml(value));
            out.push('"');
        }
        out.push('>');
        out.push_str(inner);
        out.push_str("</");
        out.push_str(&tag.to_ascii_lowercase());
        out.push('>');
        out
    }

    /// Consume the generator, yielding the accumulated original-data table.
    pub fn into_data(self) -> Vec<DataEntry> {
        self.data
    }

    pub fn data(&self) -> &[DataEntry] {
        &self.data
    }
}

fn render_void_markup(tag: &str, attrs: Option<&AttributeMap>) -> String {
    let mut out = String::new();
    out.push('<');
    out.push_str(&tag.to_ascii_lowercase());
    if let Some(attrs) = attrs {
        for (name, value) in attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_xml(value));
            out.push('"');
        }
    }
    out.push_str("/>");
    out
}
