//! Conversion orchestrator.
//!
//! Drives the parse → segment → serialize pipeline in each direction.
//! Validation failures (empty content, bad language codes, malformed
//! XLIFF) surface as [`Error::Validation`] directly; any other pipeline
//! failure is wrapped as [`Error::Conversion`] with the causing message.

use crate::config::ConversionConfig;
use crate::error::{Error, Result};
use crate::markdown;
use crate::parser::{HtmlParser, MarkdownParser, ParsedContent, Segment};
use crate::util::{split_sentences, validate_language_code};
use crate::xliff::XliffDocument;

/// Bidirectional Markdown/HTML ⇄ XLIFF 2.1 converter.
///
/// Each conversion call is a self-contained pipeline over its own input;
/// a `Converter` holds no per-call state and is safe to share.
#[derive(Debug, Default)]
pub struct Converter {
    config: Option<ConversionConfig>,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConversionConfig) -> Self {
        Converter {
            config: Some(config),
        }
    }

    /// Convert Markdown content to XLIFF 2.1.
    pub fn markdown_to_xliff(&self, content: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        validate_input(content, source_lang, target_lang)?;

        let parsed = MarkdownParser::new()
            .parse(content)
            .map_err(wrap_conversion("Failed to convert Markdown to XLIFF"))?;
        let parsed = self.apply_sentence_splitting(parsed);
        Ok(XliffDocument::new(source_lang, target_lang, &parsed).to_xml())
    }

    /// Convert HTML content to XLIFF 2.1.
    pub fn html_to_xliff(&self, content: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        validate_input(content, source_lang, target_lang)?;

        let parsed = HtmlParser::new()
            .parse(content)
            .map_err(wrap_conversion("Failed to convert HTML to XLIFF"))?;
        let parsed = self.apply_sentence_splitting(parsed);
        Ok(XliffDocument::new(source_lang, target_lang, &parsed).to_xml())
    }

    /// Convert XLIFF content back to Markdown.
    pub fn xliff_to_markdown(&self, xliff_content: &str) -> Result<String> {
        let html = reconstruct_html(xliff_content, "Failed to convert XLIFF to Markdown")?;
        Ok(markdown::html_to_markdown(&html))
    }

    /// Convert XLIFF content back to HTML.
    pub fn xliff_to_html(&self, xliff_content: &str) -> Result<String> {
        reconstruct_html(xliff_content, "Failed to convert XLIFF to HTML")
    }

    /// When configured, split plain multi-sentence segments into one
    /// segment per sentence, preserving document order.
    fn apply_sentence_splitting(&self, parsed: ParsedContent) -> ParsedContent {
        let split = self.config.as_ref().is_some_and(|c| c.split_sentences);
        if !split {
            return parsed;
        }

        let mut segments = Vec::with_capacity(parsed.segments.len());
        for segment in parsed.segments {
            // Only plain text is split; segments carrying inline codes
            // keep their markup intact.
            if segment.translatable && !segment.content.contains('<') {
                let sentences = split_sentences(&segment.content);
                if sentences.len() > 1 {
                    for sentence in sentences {
                        segments.push(Segment {
                            content: sentence,
                            ..segment.clone()
                        });
                    }
                    continue;
                }
            }
            segments.push(segment);
        }

        ParsedContent {
            segments,
            ..parsed
        }
    }
}

/// Convert Markdown content to XLIFF 2.1 with default settings.
pub fn markdown_to_xliff(content: &str, source_lang: &str, target_lang: &str) -> Result<String> {
    Converter::new().markdown_to_xliff(content, source_lang, target_lang)
}

/// Convert HTML content to XLIFF 2.1 with default settings.
pub fn html_to_xliff(content: &str, source_lang: &str, target_lang: &str) -> Result<String> {
    Converter::new().html_to_xliff(content, source_lang, target_lang)
}

/// Convert XLIFF content back to Markdown.
pub fn xliff_to_markdown(xliff_content: &str) -> Result<String> {
    Converter::new().xliff_to_markdown(xliff_content)
}

/// Convert XLIFF content back to HTML.
pub fn xliff_to_html(xliff_content: &str) -> Result<String> {
    Converter::new().xliff_to_html(xliff_content)
}

fn validate_input(content: &str, source_lang: &str, target_lang: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(Error::Validation("Content cannot be empty".to_string()));
    }
    if !validate_language_code(source_lang) {
        return Err(Error::Validation(format!(
            "Invalid source language code: {source_lang}"
        )));
    }
    if !validate_language_code(target_lang) {
        return Err(Error::Validation(format!(
            "Invalid target language code: {target_lang}"
        )));
    }
    Ok(())
}

fn parse_xliff(xliff_content: &str) -> Result<XliffDocument> {
    if xliff_content.trim().is_empty() {
        return Err(Error::Validation("XLIFF content cannot be empty".to_string()));
    }
    XliffDocument::from_xml(xliff_content)
}

/// Rebuild the HTML of each file separately, so placeholder references
/// resolve against the file's own original-data table, then join the
/// files in document order.
fn reconstruct_html(xliff_content: &str, context: &'static str) -> Result<String> {
    let document = parse_xliff(xliff_content)?;
    let parser = HtmlParser::new();
    let mut parts = Vec::with_capacity(document.files.len());
    for file in &document.files {
        let part = parser
            .reconstruct(&file.content())
            .map_err(wrap_conversion(context))?;
        if !part.is_empty() {
            parts.push(part);
        }
    }
    Ok(parts.join("\n"))
}

/// Wrap a pipeline failure as a conversion error, letting validation
/// errors propagate untouched.
fn wrap_conversion(context: &'static str) -> impl Fn(Error) -> Error {
    move |e| match e {
        Error::Validation(_) => e,
        other => {
            tracing::error!(error = %other, "{context}");
            Error::Conversion(format!("{context}: {other}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_xliff_scenario() {
        let xml = markdown_to_xliff("# Hello World\n\nThis is a test.", "en", "es").unwrap();
        assert!(xml.contains("source-language=\"en\""));
        assert!(xml.contains("target-language=\"es\""));
        assert!(xml.matches("<trans-unit").count() >= 2);
        assert!(xml.contains("Hello World"));
        assert!(xml.contains("This is a test."));
    }

    #[test]
    fn test_empty_content_rejected() {
        assert!(matches!(
            markdown_to_xliff("", "en", "es"),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            html_to_xliff("   \n\t", "en", "es"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_language_codes_validated() {
        assert!(matches!(
            markdown_to_xliff("# T", "english", "es"),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            markdown_to_xliff("# T", "EN", "es"),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            markdown_to_xliff("# T", "en", "ES"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_xliff_to_html_empty_rejected() {
        assert!(matches!(xliff_to_html(""), Err(Error::Validation(_))));
        assert!(matches!(xliff_to_markdown(" "), Err(Error::Validation(_))));
    }

    #[test]
    fn test_sentence_splitting_config() {
        let config = ConversionConfig::new("en", "es", true).unwrap();
        let converter = Converter::with_config(config);
        let xml = converter
            .html_to_xliff("<p>First sentence. Second sentence.</p>", "en", "es")
            .unwrap();
        assert!(xml.contains("<source>First sentence.</source>"));
        assert!(xml.contains("<source>Second sentence.</source>"));
    }

    #[test]
    fn test_no_splitting_by_default() {
        let xml = html_to_xliff("<p>First sentence. Second sentence.</p>", "en", "es").unwrap();
        assert!(xml.contains("<source>First sentence. Second sentence.</source>"));
    }
}
