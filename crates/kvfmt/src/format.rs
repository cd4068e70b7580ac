//! Rendering key/value lists into `key="value"` text.

use std::fmt::Write;

use unicode_general_category::{GeneralCategory as Gc, get_general_category};

use crate::Value;

/// Placeholder rendered for a trailing key that has no value.
pub const MISSING_VALUE: &str = "(MISSING)";

/// Append every key/value pair in `items` to `buf`.
///
/// Each pair is preceded by a single space, including the first one, so a
/// caller building a line from an empty buffer strips the leading space.
/// Text, errors, bytes and stringers are quoted; everything else is written
/// in its default form. A trailing key without a value gets
/// [`MISSING_VALUE`] as its (quoted) value.
pub fn kv_list_format(buf: &mut String, items: &[Value]) {
    for pair in items.chunks(2) {
        let Some(key) = pair.first() else { continue };
        buf.push(' ');
        let _ignored = write!(buf, "{key}=");
        match pair.get(1) {
            Some(value) => write_value(buf, value),
            None => push_quoted(buf, MISSING_VALUE, false),
        }
    }
}

/// Write a single value using the per-kind quoting policy.
fn write_value(buf: &mut String, value: &Value) {
    match value {
        Value::Str(s) => push_quoted(buf, s, false),
        Value::Error(e) => push_quoted(buf, &e.to_string(), false),
        Value::Bytes(b) => push_quoted_bytes(buf, b),
        Value::Stringer(s) => push_quoted(buf, &s.to_string(), false),
        other => {
            let _ignored = write!(buf, "{other}");
        }
    }
}

/// Double-quote `s`, escaping quotes, backslashes and non-printable
/// characters. Printable non-ASCII characters are kept as they are.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    push_quoted(&mut out, s, false);
    out
}

/// Double-quote a byte string using only ASCII output. Non-ASCII characters
/// become `\u`/`\U` escapes and bytes that are not valid UTF-8 become `\x`
/// escapes.
pub fn quote_ascii_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    push_quoted_bytes(&mut out, bytes);
    out
}

/// Append the quoted form of `s` to `buf`.
fn push_quoted(buf: &mut String, s: &str, ascii_only: bool) {
    buf.push('"');
    for c in s.chars() {
        push_escaped(buf, c, ascii_only);
    }
    buf.push('"');
}

/// Append the ASCII-only quoted form of `bytes` to `buf`.
fn push_quoted_bytes(buf: &mut String, bytes: &[u8]) {
    buf.push('"');
    for chunk in bytes.utf8_chunks() {
        for c in chunk.valid().chars() {
            push_escaped(buf, c, true);
        }
        for b in chunk.invalid() {
            let _ignored = write!(buf, "\\x{b:02x}");
        }
    }
    buf.push('"');
}

/// Append one character, escaped if needed.
fn push_escaped(buf: &mut String, c: char, ascii_only: bool) {
    match c {
        '"' => buf.push_str("\\\""),
        '\\' => buf.push_str("\\\\"),
        '\u{07}' => buf.push_str("\\a"),
        '\u{08}' => buf.push_str("\\b"),
        '\u{0c}' => buf.push_str("\\f"),
        '\n' => buf.push_str("\\n"),
        '\r' => buf.push_str("\\r"),
        '\t' => buf.push_str("\\t"),
        '\u{0b}' => buf.push_str("\\v"),
        c if is_printable(c) && (c.is_ascii() || !ascii_only) => buf.push(c),
        c if c < ' ' || c == '\u{7f}' => {
            let _ignored = write!(buf, "\\x{:02x}", u32::from(c));
        }
        c if u32::from(c) < 0x1_0000 => {
            let _ignored = write!(buf, "\\u{:04x}", u32::from(c));
        }
        c => {
            let _ignored = write!(buf, "\\U{:08x}", u32::from(c));
        }
    }
}

/// Printable means a letter, mark, number, punctuation or symbol, or the
/// ASCII space. Format, private-use and unassigned code points are not.
fn is_printable(c: char) -> bool {
    c == ' '
        || matches!(
            get_general_category(c),
            Gc::UppercaseLetter
                | Gc::LowercaseLetter
                | Gc::TitlecaseLetter
                | Gc::ModifierLetter
                | Gc::OtherLetter
                | Gc::NonspacingMark
                | Gc::SpacingMark
                | Gc::EnclosingMark
                | Gc::DecimalNumber
                | Gc::LetterNumber
                | Gc::OtherNumber
                | Gc::ConnectorPunctuation
                | Gc::DashPunctuation
                | Gc::OpenPunctuation
                | Gc::ClosePunctuation
                | Gc::InitialPunctuation
                | Gc::FinalPunctuation
                | Gc::OtherPunctuation
                | Gc::MathSymbol
                | Gc::CurrencySymbol
                | Gc::ModifierSymbol
                | Gc::OtherSymbol
        )
}

/// Shortest float form, switching to an exponent below 1e-4 and from 1e6
/// upward (`1e+06`, `1.5e-07`).
pub(crate) fn float(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    let sci = format!("{x:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if x == 0.0 || (-4..6).contains(&exp) {
        return format!("{x}");
    }
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
}
