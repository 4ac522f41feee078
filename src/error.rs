//! Error types for markliff operations.

use thiserror::Error;

/// Errors that can occur during conversion between Markdown/HTML and XLIFF.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input: empty content, invalid language codes, or XLIFF XML
    /// that does not parse.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The Markdown/HTML parser encountered structurally unrecoverable input.
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// A failure inside the parse/segment/serialize pipeline, carrying the
    /// causing error's message.
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// Invalid configuration values supplied at setup time.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
