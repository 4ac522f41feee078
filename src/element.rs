//! Maps HTML elements to translation-model categories.
//!
//! This module defines the static classification of HTML element names used
//! by the segmentation pipeline: which elements carry translatable text,
//! which are inline formatting, which are void placeholders, and which
//! structural containers must be preserved verbatim versus decomposed into
//! individual translation units.
//!
//! Classification is total and case-insensitive: every tag name, including
//! unrecognized ones, maps to a defined default.

/// Semantic category of an HTML element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Block-level container whose children are processed individually
    /// or preserved as a unit (`table`, `div`, `ul`, ...).
    Structural,
    /// Inline formatting wrapped as a `mrk` span (`strong`, `a`, `code`, ...).
    Inline,
    /// Void element with no content, represented as a placeholder
    /// (`img`, `br`, `hr`, ...).
    Void,
    /// Leaf block element holding translatable text (`p`, `h1`, `li`, ...).
    TextContainer,
    /// Embedded external content (`iframe`, `svg`, ...).
    Embedded,
    /// Unrecognized element, treated as translatable content.
    Unknown,
}

/// How an element is represented in XLIFF inline content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XliffKind {
    /// Translatable text content.
    Content,
    /// Placeholder inline code (`<ph/>`).
    Ph,
    /// Marker span (`<mrk>`).
    Mrk,
    /// Opaque skeleton fragment, reinserted verbatim.
    Skeleton,
}

/// Whether a structural element can be decomposed into translation units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    /// Simple container of block content; each leaf text container becomes
    /// its own translation unit.
    Decomposable,
    /// Internal layout carries meaning that segmentation would destroy;
    /// preserved verbatim via the skeleton.
    Opaque,
    /// Not a structural element.
    Unknown,
}

/// Classify an HTML element name into its semantic category.
pub fn classify(tag: &str) -> Category {
    match tag.to_ascii_lowercase().as_str() {
        // Void elements (no content model)
        "img" | "br" | "hr" | "input" | "source" | "wbr" | "meta" | "link" | "col" | "area"
        | "base" | "embed" | "track" | "param" => Category::Void,

        // Inline formatting and semantics
        "strong" | "em" | "b" | "i" | "code" | "mark" | "kbd" | "abbr" | "a" | "span" | "sub"
        | "sup" | "small" | "cite" | "q" | "time" | "u" | "s" | "del" | "ins" | "samp" | "var"
        | "dfn" | "bdi" | "bdo" | "data" | "ruby" | "rt" | "rp" => Category::Inline,

        // Block/structural containers
        "table" | "form" | "video" | "audio" | "figure" | "fieldset" | "select" | "ul" | "ol"
        | "dl" | "blockquote" | "div" | "section" | "article" | "header" | "footer" | "aside"
        | "nav" | "main" | "details" | "thead" | "tbody" | "tfoot" | "tr" | "optgroup"
        | "picture" | "hgroup" | "address" => Category::Structural,

        // Leaf text containers
        "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "li" | "td" | "th" | "caption"
        | "figcaption" | "label" | "legend" | "option" | "textarea" | "dt" | "dd" | "pre"
        | "summary" | "title" | "button" => Category::TextContainer,

        // Embedded external content
        "iframe" | "object" | "canvas" | "svg" | "math" | "map" | "noscript" | "script"
        | "style" | "template" => Category::Embedded,

        _ => Category::Unknown,
    }
}

/// Map an HTML element name to its XLIFF inline representation.
pub fn xliff_kind(tag: &str) -> XliffKind {
    match classify(tag) {
        Category::Void | Category::Embedded => XliffKind::Ph,
        Category::Inline => XliffKind::Mrk,
        Category::Structural => {
            if should_preserve_structure(tag) {
                XliffKind::Skeleton
            } else {
                XliffKind::Content
            }
        }
        Category::TextContainer | Category::Unknown => XliffKind::Content,
    }
}

/// Classify a structural element by how it may be segmented.
pub fn classify_structure(tag: &str) -> StructureKind {
    match tag.to_ascii_lowercase().as_str() {
        // Layout-bearing elements: segmenting their text would destroy the
        // relationships between cells, controls, and tracks.
        "table" | "form" | "video" | "audio" | "select" | "fieldset" | "picture" | "optgroup"
        | "thead" | "tbody" | "tfoot" | "tr" => StructureKind::Opaque,

        // Simple containers of block content
        "div" | "article" | "section" | "ul" | "ol" | "dl" | "blockquote" | "header" | "footer"
        | "aside" | "nav" | "figure" | "main" | "details" | "hgroup" | "address" => {
            StructureKind::Decomposable
        }

        _ => StructureKind::Unknown,
    }
}

/// Whether an element's internal structure must be kept verbatim.
pub fn should_preserve_structure(tag: &str) -> bool {
    classify_structure(tag) == StructureKind::Opaque
}

/// Whether whitespace inside an element is significant and must not be
/// collapsed during segmentation.
pub fn preserves_whitespace(tag: &str) -> bool {
    matches!(tag.to_ascii_lowercase().as_str(), "pre" | "textarea")
}
