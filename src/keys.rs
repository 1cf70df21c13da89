//! Extracting and rendering the top-level keys of a JSON document.

use crate::Error;
use serde_json::Value;
use std::fmt::{self, Write};
use unicode_general_category::{get_general_category, GeneralCategory};

/// Byte order mark some servers put in front of UTF-8 bodies.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse a response body as JSON.
///
/// A leading UTF-8 byte order mark is skipped. Only strict JSON is accepted:
/// `NaN`, `Infinity` and escapes of lone surrogates are parse errors.
pub fn parse_body(body: &[u8]) -> Result<Value, Error> {
    let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);

    Ok(serde_json::from_slice(body)?)
}

/// Take up to `limit` top-level keys of a JSON object, in document order.
///
/// Returns [`Error::NotAnObject`] for any other kind of JSON value.
pub fn top_level_keys(value: &Value, limit: usize) -> Result<KeyList, Error> {
    let object = value.as_object().ok_or(Error::NotAnObject)?;

    Ok(KeyList(object.keys().take(limit).cloned().collect()))
}

/// An ordered list of object keys.
///
/// Displays as a list literal of quoted strings, such as `['a', 'b']`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyList(Vec<String>);

impl KeyList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for KeyList {
    fn from(keys: Vec<String>) -> Self {
        Self(keys)
    }
}

impl fmt::Display for KeyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;

        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_quoted(f, key)?;
        }

        f.write_char(']')
    }
}

/// Write a string literal, preferring single quotes unless the string contains
/// a single quote and no double quote.
fn write_quoted(f: &mut impl Write, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    f.write_char(quote)?;

    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\t' => f.write_str("\\t")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c if !is_printable(c) => {
                let code = u32::from(c);
                if code < 0x100 {
                    write!(f, "\\x{:02x}", code)?;
                } else if code < 0x10000 {
                    write!(f, "\\u{:04x}", code)?;
                } else {
                    write!(f, "\\U{:08x}", code)?;
                }
            }
            c => f.write_char(c)?,
        }
    }

    f.write_char(quote)
}

/// Whether a character is written as-is inside a string literal. Separators
/// other than the ASCII space, and control, format, private-use and unassigned
/// code points are escaped.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }

    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
            | GeneralCategory::SpaceSeparator
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn render(keys: &[&str]) -> String {
        KeyList::from(keys.iter().map(|k| k.to_string()).collect::<Vec<_>>()).to_string()
    }

    #[test]
    fn truncates_to_limit_in_document_order() {
        let value = parse_body(br#"{"f":6,"e":5,"d":4,"c":3,"b":2,"a":1}"#).unwrap();
        let keys = top_level_keys(&value, 5).unwrap();

        assert_eq!(keys.to_string(), "['f', 'e', 'd', 'c', 'b']");
    }

    #[test]
    fn fewer_keys_than_limit() {
        let keys = top_level_keys(&json!({"x": 1}), 5).unwrap();

        assert_eq!(keys.len(), 1);
        assert_eq!(keys.to_string(), "['x']");
    }

    #[test]
    fn empty_object() {
        let keys = top_level_keys(&json!({}), 5).unwrap();

        assert!(keys.is_empty());
        assert_eq!(keys.to_string(), "[]");
    }

    #[test]
    fn repeated_key_keeps_first_position() {
        let value = parse_body(br#"{"a":1,"b":2,"a":3}"#).unwrap();

        assert_eq!(top_level_keys(&value, 5).unwrap().to_string(), "['a', 'b']");
    }

    #[test_case(json!([1, 2]) ; "array")]
    #[test_case(json!("text") ; "string")]
    #[test_case(json!(null) ; "null")]
    fn non_objects_have_no_keys(value: Value) {
        assert!(matches!(top_level_keys(&value, 5), Err(Error::NotAnObject)));
    }

    #[test]
    fn byte_order_mark_is_skipped() {
        let value = parse_body(b"\xEF\xBB\xBF{\"x\":1}").unwrap();

        assert_eq!(value, json!({"x": 1}));
    }

    #[test]
    fn invalid_body_is_a_json_error() {
        assert!(matches!(parse_body(b"<html></html>"), Err(Error::Json(_))));
        assert!(matches!(parse_body(b""), Err(Error::Json(_))));
    }

    #[test_case(br#"{"a": NaN}"# ; "nan")]
    #[test_case(br#"{"b": Infinity}"# ; "infinity")]
    #[test_case(br#"{"\ud800": 1}"# ; "lone_surrogate_key")]
    fn non_standard_json_is_rejected(body: &[u8]) {
        assert!(matches!(parse_body(body), Err(Error::Json(_))));
    }

    #[test_case(&["plain"], "['plain']" ; "plain")]
    #[test_case(&["it's"], r#"["it's"]"# ; "single_quote_switches_to_double")]
    #[test_case(&[r#"both ' and ""#], r#"['both \' and "']"# ; "both_quotes_escape_single")]
    #[test_case(&["say \"hi\""], r#"['say "hi"']"# ; "double_quotes_kept")]
    #[test_case(&["back\\slash"], r"['back\\slash']" ; "backslash")]
    #[test_case(&["line\nbreak\ttab"], r"['line\nbreak\ttab']" ; "whitespace_escapes")]
    #[test_case(&["bell\u{7}"], r"['bell\x07']" ; "control_character")]
    #[test_case(&["naïve"], "['naïve']" ; "non_ascii_verbatim")]
    #[test_case(&["a b"], "['a b']" ; "ascii_space_verbatim")]
    #[test_case(&["a\u{a0}b"], r"['a\xa0b']" ; "no_break_space")]
    #[test_case(&["s\u{ad}h"], r"['s\xadh']" ; "soft_hyphen")]
    #[test_case(&["z\u{200b}w"], r"['z\u200bw']" ; "zero_width_space")]
    #[test_case(&["x\u{2028}y"], r"['x\u2028y']" ; "line_separator")]
    #[test_case(&["\u{feff}bom"], r"['\ufeffbom']" ; "byte_order_mark_in_key")]
    #[test_case(&["p\u{e000}"], r"['p\ue000']" ; "private_use")]
    #[test_case(&["t\u{e0001}"], r"['t\U000e0001']" ; "astral_format_character")]
    #[test_case(&["emoji \u{1f600}"], "['emoji \u{1f600}']" ; "astral_printable_verbatim")]
    fn quoting(keys: &[&str], expected: &str) {
        assert_eq!(render(keys), expected);
    }
}
