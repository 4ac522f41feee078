//! # markliff
//!
//! Bidirectional conversion between Markdown/HTML documents and XLIFF 2.1,
//! the OASIS XML Localization Interchange File Format.
//!
//! ## Features
//!
//! - Convert Markdown or HTML to XLIFF 2.1 translation units
//! - Reconstruct Markdown or HTML from (translated) XLIFF documents
//! - Inline formatting preserved as `mrk` spans via the Format Style
//!   module (`fs:fs`/`fs:subFs`)
//! - Void elements and opaque structures (tables, forms) preserved
//!   verbatim through `ph` placeholders and an original-data skeleton
//!
//! ## Quick Start
//!
//! ```
//! use markliff::{markdown_to_xliff, xliff_to_html};
//!
//! let xliff = markdown_to_xliff("# Hello\n\nSome **bold** text.", "en", "de").unwrap();
//! assert!(xliff.contains("<trans-unit"));
//!
//! let html = xliff_to_html(&xliff).unwrap();
//! assert!(html.contains("<h1>"));
//! ```
//!
//! ## Working with documents
//!
//! The [`XliffDocument`] struct is the central data type: a parsed or
//! freshly built XLIFF document whose files hold [`TranslationUnit`]s in
//! document order.
//!
//! ```
//! use markliff::{HtmlParser, XliffDocument};
//!
//! let parsed = HtmlParser::new().parse("<p>Hello</p>").unwrap();
//! let mut doc = XliffDocument::new("en", "fr", &parsed);
//! doc.files[0].units[0].set_target_text("Bonjour");
//! let xml = doc.to_xml();
//! assert!(xml.contains("<target>Bonjour</target>"));
//! ```

pub mod config;
pub mod converter;
pub mod element;
pub mod error;
pub mod html;
pub mod markdown;
pub mod parser;
pub mod xliff;
pub(crate) mod util;

pub use config::ConversionConfig;
pub use converter::{
    Converter, html_to_xliff, markdown_to_xliff, xliff_to_html, xliff_to_markdown,
};
pub use error::{Error, Result};
pub use parser::{HtmlParser, MarkdownParser, ParsedContent, Segment};
pub use xliff::{State, TranslationUnit, XliffDocument, XliffFile};
