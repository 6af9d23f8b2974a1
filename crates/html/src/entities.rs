//! Entity decoding for text and attribute values, and the matching escapes.
//!
//! Decoding is deliberately narrow: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`,
//! and semicolon-terminated decimal or hex character references naming a Unicode scalar.
//! Anything else is kept as written.

use memchr::memchr;

const NAMED: [(&str, char); 6] = [
    ("amp;", '&'),
    ("lt;", '<'),
    ("gt;", '>'),
    ("quot;", '"'),
    ("apos;", '\''),
    ("nbsp;", '\u{00A0}'),
];

/// `0x10FFFF` needs six hex digits, `1114111` seven decimal ones.
const MAX_HEX_DIGITS: usize = 6;
const MAX_DEC_DIGITS: usize = 7;

/// Character reference at the start of `rest` (the text after `&`) and its length.
fn reference(rest: &str) -> Option<(char, usize)> {
    if let Some(&(name, ch)) = NAMED.iter().find(|(name, _)| rest.starts_with(name)) {
        return Some((ch, name.len()));
    }
    let numeric = rest.strip_prefix('#')?;
    let (digits, radix, max, prefix) = match numeric.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16, MAX_HEX_DIGITS, 2),
        None => (numeric, 10, MAX_DEC_DIGITS, 1),
    };
    // bounded so runs of unterminated references stay linear
    let end = digits.bytes().take(max + 1).position(|b| b == b';')?;
    let body = &digits[..end];
    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let ch = u32::from_str_radix(body, radix).ok().and_then(char::from_u32)?;
    Some((ch, prefix + end + 1))
}

pub(crate) fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut pos = 0;
    while let Some(offset) = memchr(b'&', &bytes[pos..]) {
        let amp = pos + offset;
        out.push_str(&s[pos..amp]);
        match reference(&s[amp + 1..]) {
            Some((ch, len)) => {
                out.push(ch);
                pos = amp + 1 + len;
            }
            None => {
                out.push('&');
                pos = amp + 1;
            }
        }
    }
    out.push_str(&s[pos..]);
    out
}

/// Escape text-node content for serialization (`&`, `<`, `>`, NBSP).
pub(crate) fn escape_text(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

/// Escape a double-quoted attribute value for serialization.
pub(crate) fn escape_attr(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}
