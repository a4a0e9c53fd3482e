// Author: Dustin Pilgrim
// License: MIT

//! Value quoting shared by the three formats.
//!
//! VyOS is not consistent about quoting. `show` double-quotes a value only
//! when it contains something outside a small safe set, `show | commands`
//! single-quotes every leaf value but only some tag values, and
//! `config.boot` double-quotes every leaf value. The helpers here reproduce
//! those choices so output matches VyOS byte for byte.

use once_cell::sync::Lazy;
use regex::Regex;

static SET_UNQUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-_.:/+@a-zA-Z0-9]+$").expect("valid regex"));

static SHOW_UNQUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-_.:/+@$a-zA-Z0-9]+$").expect("valid regex"));

/// Whether a tag value can appear bare in `set` output.
pub fn is_set_safe(value: &str) -> bool {
    SET_UNQUOTED.is_match(value)
}

/// Whether a value can appear bare in `show` output. Unlike `set`, `$` is
/// allowed.
pub fn is_show_safe(value: &str) -> bool {
    SHOW_UNQUOTED.is_match(value)
}

/// Double-quote `value`, escaping backslashes, double quotes and
/// non-printable characters.
pub fn double_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    push_escaped(&mut out, value);
    out.push('"');
    out
}

fn push_escaped(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0b}' => out.push_str("\\v"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
}

/// Quote a value for `show` output when it is not safe bare.
pub fn show_quote_if_needed(value: &str) -> String {
    if is_show_safe(value) {
        value.to_string()
    } else {
        double_quote(value)
    }
}

/// Quote a tag value for `set` output when it is not safe bare.
pub fn set_quote_if_needed(value: &str) -> String {
    if is_set_safe(value) {
        value.to_string()
    } else {
        single_quote(value)
    }
}

/// Single-quote `value` the way `set` output does.
///
/// The escaped body keeps its backslash escapes except for double quotes,
/// which appear literally, and single quotes get a backslash. The `set`
/// lexer decodes the same escapes.
pub fn single_quote(value: &str) -> String {
    let mut body = String::with_capacity(value.len());
    push_escaped(&mut body, value);
    let body = body.replace("\\\"", "\"").replace('\'', "\\'");
    format!("'{}'", body)
}

/// Undo [`double_quote`]. The input must start and end with `"` and contain
/// nothing after the closing quote.
pub fn unquote_double(quoted: &str) -> Result<String, String> {
    let inner = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| format!("'{}' is not a double-quoted string", quoted))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => return Err(format!("unescaped '\"' inside {}", quoted)),
            '\n' => return Err("newline inside quoted string".into()),
            '\\' => {
                let escaped = chars.next().ok_or("trailing backslash in quoted string")?;
                match escaped {
                    'a' => out.push('\u{07}'),
                    'b' => out.push('\u{08}'),
                    'f' => out.push('\u{0c}'),
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    'v' => out.push('\u{0b}'),
                    '\\' | '"' | '\'' => out.push(escaped),
                    'x' => out.push(hex_escape(&mut chars, 2)?),
                    'u' => out.push(hex_escape(&mut chars, 4)?),
                    'U' => out.push(hex_escape(&mut chars, 8)?),
                    '0'..='7' => {
                        let mut code = escaped.to_digit(8).unwrap_or(0);
                        for _ in 0..2 {
                            let digit = chars
                                .next()
                                .and_then(|d| d.to_digit(8))
                                .ok_or("invalid octal escape")?;
                            code = code * 8 + digit;
                        }
                        out.push(char::from_u32(code).ok_or("octal escape out of range")?);
                    }
                    other => return Err(format!("unknown escape '\\{}'", other)),
                }
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

fn hex_escape(chars: &mut std::str::Chars<'_>, digits: usize) -> Result<char, String> {
    let mut code = 0u32;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|d| d.to_digit(16))
            .ok_or("invalid hex escape")?;
        code = code * 16 + digit;
    }
    char::from_u32(code).ok_or_else(|| format!("escape U+{:X} is not a valid character", code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_safe_values_stay_bare() {
        assert_eq!(set_quote_if_needed("eth0"), "eth0");
        assert_eq!(set_quote_if_needed("0.0.0.0/0"), "0.0.0.0/0");
        assert_eq!(set_quote_if_needed("user@example.net"), "user@example.net");
        assert_eq!(set_quote_if_needed("2001:db8::1/64"), "2001:db8::1/64");
    }

    #[test]
    fn test_set_quotes_unsafe_values() {
        assert_eq!(set_quote_if_needed("LAN HOSTS"), "'LAN HOSTS'");
        assert_eq!(set_quote_if_needed("a$b"), "'a$b'");
        assert_eq!(set_quote_if_needed(""), "''");
    }

    #[test]
    fn test_set_quote_escaping_convention() {
        assert_eq!(set_quote_if_needed("it's"), r"'it\'s'");
        assert_eq!(set_quote_if_needed(r#"say "hi""#), r#"'say "hi"'"#);
        assert_eq!(set_quote_if_needed(r"a\b"), r"'a\\b'");
        assert_eq!(set_quote_if_needed("tab\there"), r"'tab\there'");
    }

    #[test]
    fn test_single_quote_always_quotes() {
        assert_eq!(single_quote("22"), "'22'");
        assert_eq!(single_quote("it's"), r"'it\'s'");
        assert_eq!(single_quote(r"C:\temp"), r"'C:\\temp'");
        assert_eq!(single_quote("two\nlines"), r"'two\nlines'");
    }

    #[test]
    fn test_show_quoting() {
        assert_eq!(show_quote_if_needed("192.168.1.1/24"), "192.168.1.1/24");
        assert_eq!(show_quote_if_needed("$6$salt$hash"), "$6$salt$hash");
        assert_eq!(show_quote_if_needed("Outbound NAT"), "\"Outbound NAT\"");
        assert_eq!(show_quote_if_needed("a=b"), "\"a=b\"");
    }

    #[test]
    fn test_double_quote_escapes() {
        assert_eq!(double_quote(r#"a"b\c"#), r#""a\"b\\c""#);
        assert_eq!(double_quote("line\nbreak"), r#""line\nbreak""#);
        assert_eq!(double_quote("\u{01}"), r#""\x01""#);
        assert_eq!(double_quote("héllo"), "\"héllo\"");
    }

    #[test]
    fn test_unquote_double() {
        assert_eq!(unquote_double(r#""Outbound NAT""#).unwrap(), "Outbound NAT");
        assert_eq!(unquote_double(r#""a\"b\\c""#).unwrap(), r#"a"b\c"#);
        assert_eq!(unquote_double(r#""\x41é\101""#).unwrap(), "AéA");
        assert_eq!(unquote_double(r#""""#).unwrap(), "");
    }

    #[test]
    fn test_unquote_double_rejects_malformed() {
        assert!(unquote_double("\"unterminated").is_err());
        assert!(unquote_double("\"").is_err());
        assert!(unquote_double(r#""a" trailing"#).is_err());
        assert!(unquote_double(r#""bad \q escape""#).is_err());
        assert!(unquote_double("bare").is_err());
    }

    #[test]
    fn test_double_quote_round_trips() {
        for value in ["plain", "with space", "q\"uote", "back\\slash", "ctl\u{02}", "tab\t"] {
            assert_eq!(unquote_double(&double_quote(value)).unwrap(), value);
        }
    }
}
