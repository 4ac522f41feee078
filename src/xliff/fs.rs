//! XLIFF 2.1 Format Style (`fs:fs` / `fs:subFs`) attribute serialization.
//!
//! The Format Style module records the original HTML tag and attributes on
//! translation units and inline codes so the source markup can be
//! reconstructed. `fs:fs` carries the tag name; `fs:subFs` carries the
//! attribute map in a compact string form:
//!
//! - each pair is `name,value` with `,` separating name from value;
//! - pairs are joined with `\`;
//! - literal `,` and `\` inside names and values are escaped as `\,` and
//!   `\\`;
//! - an attribute with an empty value serializes as the bare name and
//!   decodes back to the empty string.
//!
//! `deserialize_attributes(serialize_attributes(m)) == m` holds for any
//! map free of NUL and newline characters.

use std::collections::BTreeMap;

/// Ordered attribute name → value mapping.
pub type AttributeMap = BTreeMap<String, String>;

/// Serialize an attribute map into the `fs:subFs` string form.
pub fn serialize_attributes(attrs: &AttributeMap) -> String {
    let mut out = String::new();
    for (i, (name, value)) in attrs.iter().enumerate() {
        if i > 0 {
            out.push('\\');
        }
        escape_into(&mut out, name);
        if !value.is_empty() {
            out.push(',');
            escape_into(&mut out, value);
        }
    }
    out
}

/// Parse a `fs:subFs` string back into an attribute map.
///
/// Scans left to right: `\` followed by `,` or `\` is an escape for the
/// literal character; `\` followed by anything else separates pairs; an
/// unescaped `,` separates a name from its value.
pub fn deserialize_attributes(s: &str) -> AttributeMap {
    let mut attrs = AttributeMap::new();
    if s.is_empty() {
        return attrs;
    }

    let mut name = String::new();
    let mut value = String::new();
    let mut in_value = false;
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek() {
                Some(&escaped @ (',' | '\\')) => {
                    chars.next();
                    if in_value {
                        value.push(escaped);
                    } else {
                        name.push(escaped);
                    }
                }
                _ => {
                    // Pair separator
                    if !name.is_empty() {
                        attrs.insert(std::mem::take(&mut name), std::mem::take(&mut value));
                    } else {
                        value.clear();
                    }
                    in_value = false;
                }
            },
            ',' if !in_value => in_value = true,
            _ => {
                if in_value {
                    value.push(c);
                } else {
                    name.push(c);
                }
            }
        }
    }

    if !name.is_empty() {
        attrs.insert(name, value);
    }
    attrs
}

/// Build the Format Style attributes for an element: always `fs:fs` with
/// the tag name, plus `fs:subFs` only when the map is non-empty.
pub fn format_fs_element(tag: &str, attrs: &AttributeMap) -> Vec<(String, String)> {
    let mut result = vec![("fs:fs".to_string(), tag.to_ascii_lowercase())];
    if !attrs.is_empty() {
        result.push(("fs:subFs".to_string(), serialize_attributes(attrs)));
    }
    result
}

/// Pair a tag name with its serialized attributes for marker/placeholder
/// construction.
pub fn serialize_inline_attributes(tag: &str, attrs: &AttributeMap) -> (String, String) {
    (tag.to_ascii_lowercase(), serialize_attributes(attrs))
}

/// Inverse of [`serialize_inline_attributes`].
pub fn deserialize_inline_attributes(tag: &str, sub_fs: &str) -> (String, AttributeMap) {
    (tag.to_ascii_lowercase(), deserialize_attributes(sub_fs))
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            ',' => out.push_str("\\,"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
}
