//! Shared pure helper functions.

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.trim().chars() {
        if c.is_whitespace() {
            in_whitespace = true;
        } else {
            if in_whitespace {
                result.push(' ');
                in_whitespace = false;
            }
            result.push(c);
        }
    }
    result
}

/// Collapse runs of whitespace to single spaces without trimming.
///
/// Used for inline text runs where the spaces adjacent to markup carry
/// meaning (`some <em>word</em> here`).
pub fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.chars() {
        if c.is_whitespace() {
            in_whitespace = true;
        } else {
            if in_whitespace {
                result.push(' ');
                in_whitespace = false;
            }
            result.push(c);
        }
    }
    if in_whitespace {
        result.push(' ');
    }
    result
}

/// Validate an ISO 639-1 language code: exactly two lowercase ASCII letters.
pub fn validate_language_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_lowercase())
}

/// Split text into sentences at terminal punctuation, keeping the
/// punctuation with its sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.trim().chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            // Consume any run of terminal punctuation
            while let Some(&next) = chars.peek() {
                if matches!(next, '.' | '!' | '?') {
                    current.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            // Sentence boundary only if followed by whitespace or end
            if chars.peek().is_none_or(|next| next.is_whitespace()) {
                let sentence = current.trim().to_string();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                current.clear();
                // Skip the separating whitespace
                while chars.peek().is_some_and(|next| next.is_whitespace()) {
                    chars.next();
                }
            }
        }
    }

    let rest = current.trim().to_string();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

/// Escape XML special characters in text or attribute content.
pub fn escape_xml(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            _ => result.push(c),
        }
    }
    result
}

/// Resolve XML entity references.
pub fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x") {
        if let Ok(code) = u32::from_str_radix(hex, 16)
            && let Some(c) = char::from_u32(code)
        {
            return Some(c.to_string());
        }
    } else if let Some(dec) = entity.strip_prefix('#')
        && let Ok(code) = dec.parse::<u32>()
        && let Some(c) = char::from_u32(code)
    {
        return Some(c.to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  hello   world \n"), "hello world");
        assert_eq!(normalize_whitespace("\t\n"), "");
        assert_eq!(normalize_whitespace("one"), "one");
    }

    #[test]
    fn test_collapse_whitespace_keeps_edges() {
        assert_eq!(collapse_whitespace("some \n "), "some ");
        assert_eq!(collapse_whitespace(" word"), " word");
    }

    #[test]
    fn test_validate_language_code() {
        assert!(validate_language_code("en"));
        assert!(validate_language_code("zh"));
        assert!(!validate_language_code("EN"));
        assert!(!validate_language_code("english"));
        assert!(!validate_language_code("e1"));
        assert!(!validate_language_code(""));
    }

    #[test]
    fn test_split_sentences() {
        assert_eq!(
            split_sentences("First one. Second one! Third?"),
            vec!["First one.", "Second one!", "Third?"]
        );
        assert_eq!(split_sentences("No terminal punctuation"), vec!["No terminal punctuation"]);
        assert_eq!(split_sentences("Version 2.1 is out."), vec!["Version 2.1 is out."]);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & c > \"d\""), "a &lt; b &amp; c &gt; &quot;d&quot;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_resolve_entity() {
        assert_eq!(resolve_entity("amp").as_deref(), Some("&"));
        assert_eq!(resolve_entity("#x4E2D").as_deref(), Some("中"));
        assert_eq!(resolve_entity("#65").as_deref(), Some("A"));
        assert_eq!(resolve_entity("nbsp"), None);
    }
}
