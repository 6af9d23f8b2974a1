//! Small HTML tokenizer for inline rich content.
//!
//! Supported tag-name characters (ASCII only): `[A-Za-z0-9:_-]`.
//! Attribute names use the same ASCII character class.
//!
//! This is not an HTML5 state machine: region contents are short, author-controlled
//! fragments (text, inline formatting, `<img>`, `<br>`, `<div>` lines), so the scanner
//! trades parse-error recovery for a linear, allocation-light pass.
//!
//! Known limitations:
//! - No HTML5 parse-error recovery.
//! - Rawtext close-tag scanning accepts only ASCII whitespace before `>`.
use crate::entities::decode_entities;
use crate::types::Token;
use memchr::memchr;

const HTML_COMMENT_START: &str = "<!--";
const HTML_COMMENT_END: &str = "-->";

// it only attempts matches starting at ASCII <
// < cannot appear in UTF-8 continuation bytes
const SCRIPT_CLOSE_TAG: &[u8] = b"</script";
const STYLE_CLOSE_TAG: &[u8] = b"</style";

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

fn find_rawtext_close_tag(haystack: &str, close_tag: &[u8]) -> Option<(usize, usize)> {
    let hay_bytes = haystack.as_bytes();
    let len = hay_bytes.len();
    let n = close_tag.len();
    debug_assert!(n >= 2 && close_tag[0] == b'<' && close_tag[1] == b'/');
    if len < n {
        return None;
    }
    let mut i = 0;
    while i + n <= len {
        let rel = memchr(b'<', &hay_bytes[i..])?;
        i += rel;
        if i + n > len {
            return None;
        }
        if hay_bytes[i + 1] == b'/' && starts_with_ignore_ascii_case_at(hay_bytes, i, close_tag) {
            let mut k = i + n;
            while k < len && hay_bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && hay_bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

#[inline]
fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':'
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut i = 0;
    let bytes = input.as_bytes();
    // Invariant: we scan by byte, but any slice endpoints must be UTF-8 char boundaries.
    // We only cut slices at ASCII structural bytes, so slice endpoints remain boundaries.
    while i < bytes.len() {
        if bytes[i] != b'<' {
            let start = i;
            i = memchr(b'<', &bytes[i..]).map_or(bytes.len(), |rel| i + rel);
            let decoded = decode_entities(&input[start..i]);
            if !decoded.is_empty() {
                out.push(Token::Text(decoded));
            }
            continue;
        }
        if input[i..].starts_with(HTML_COMMENT_START) {
            let body_start = i + HTML_COMMENT_START.len();
            if let Some(end) = input[body_start..].find(HTML_COMMENT_END) {
                out.push(Token::Comment(input[body_start..body_start + end].to_string()));
                i = body_start + end + HTML_COMMENT_END.len();
                continue;
            }
            out.push(Token::Comment(input[body_start..].to_string()));
            break;
        }
        if starts_with_ignore_ascii_case_at(bytes, i, b"<!doctype") {
            let rest = &input[i + 2..];
            let Some(end) = rest.find('>') else {
                break;
            };
            out.push(Token::Doctype(rest[..end].trim().to_string()));
            i += 2 + end + 1;
            continue;
        }
        if !opens_tag(bytes, i) {
            // A '<' that does not open a tag (`<3`, `a < b`, `</3`) is text.
            out.push(Token::Text("<".to_string()));
            i += 1;
            continue;
        }
        if bytes[i + 1] == b'/' {
            let start = i + 2;
            let mut j = start;
            while j < bytes.len() && is_name_char(bytes[j]) {
                j += 1;
            }
            let name = input[start..j].to_ascii_lowercase();
            while j < bytes.len() && bytes[j] != b'>' {
                j += 1;
            }
            if j < bytes.len() {
                j += 1;
            }
            out.push(Token::EndTag(name));
            i = j;
            continue;
        }

        let start = i + 1;
        let mut j = start;
        while j < bytes.len() && is_name_char(bytes[j]) {
            j += 1;
        }
        let name = input[start..j].to_ascii_lowercase();
        let (attributes, mut self_closing, content_start) = scan_attributes(input, j);
        if is_void_element(&name) {
            self_closing = true;
        }
        let rawtext = (name == "script" || name == "style") && !self_closing;
        out.push(Token::StartTag {
            name: name.clone(),
            attributes,
            self_closing,
        });

        if rawtext {
            let close_tag = if name == "script" {
                SCRIPT_CLOSE_TAG
            } else {
                STYLE_CLOSE_TAG
            };
            let body = &input[content_start..];
            if let Some((rel_start, rel_end)) = find_rawtext_close_tag(body, close_tag) {
                if rel_start > 0 {
                    out.push(Token::Text(body[..rel_start].to_string()));
                }
                out.push(Token::EndTag(name));
                i = content_start + rel_end;
                continue;
            }
            // Missing close tag: the remainder is rawtext with an implicit end tag.
            if !body.is_empty() {
                out.push(Token::Text(body.to_string()));
            }
            out.push(Token::EndTag(name));
            break;
        }
        i = content_start;
    }
    out
}

/// `<x` and `</x` open a tag only when `x` is an ASCII letter.
fn opens_tag(bytes: &[u8], lt: usize) -> bool {
    match bytes.get(lt + 1) {
        Some(b'/') => bytes.get(lt + 2).is_some_and(u8::is_ascii_alphabetic),
        Some(b) => b.is_ascii_alphabetic(),
        None => false,
    }
}

type Attributes = Vec<(String, Option<String>)>;

fn scan_attributes(input: &str, mut k: usize) -> (Attributes, bool, usize) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut attributes = Vec::new();
    let mut self_closing = false;

    let skip_whitespace = |k: &mut usize| {
        while *k < len && bytes[*k].is_ascii_whitespace() {
            *k += 1;
        }
    };

    loop {
        skip_whitespace(&mut k);
        if k >= len {
            break;
        }
        if bytes[k] == b'>' {
            k += 1;
            break;
        }
        if bytes[k] == b'/' {
            if k + 1 < len && bytes[k + 1] == b'>' {
                self_closing = true;
                k += 2;
                break;
            }
            k += 1;
            continue;
        }
        let name_start = k;
        while k < len && is_name_char(bytes[k]) {
            k += 1;
        }
        if name_start == k {
            k += 1;
            continue;
        }
        let attribute_name = input[name_start..k].to_ascii_lowercase();

        skip_whitespace(&mut k);
        let value = if k < len && bytes[k] == b'=' {
            k += 1;
            skip_whitespace(&mut k);
            if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                let quote = bytes[k];
                k += 1;
                let vstart = k;
                while k < len && bytes[k] != quote {
                    k += 1;
                }
                let raw = &input[vstart..k];
                if k < len {
                    k += 1;
                }
                Some(decode_entities(raw))
            } else {
                let vstart = k;
                while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                    if bytes[k] == b'/' && k + 1 < len && bytes[k + 1] == b'>' {
                        break;
                    }
                    k += 1;
                }
                Some(decode_entities(&input[vstart..k]))
            }
        } else {
            None
        };
        attributes.push((attribute_name, value));
    }
    (attributes, self_closing, k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_preserves_utf8_text_nodes() {
        let tokens = tokenize("<p>120×32 😊</p>");
        assert!(
            tokens
                .iter()
                .any(|t| matches!(t, Token::Text(s) if s == "120×32 😊")),
            "expected UTF-8 text token, got: {tokens:?}"
        );
    }

    #[test]
    fn tokenize_decodes_entities_in_text_and_attributes() {
        let tokens = tokenize(r#"<img title="a &amp; b">&lt;3"#);
        assert_eq!(
            tokens,
            vec![
                Token::StartTag {
                    name: "img".to_string(),
                    attributes: vec![("title".to_string(), Some("a & b".to_string()))],
                    self_closing: true,
                },
                Token::Text("<3".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_keeps_valueless_attributes() {
        let tokens = tokenize("<img class=openmoji scaled>");
        let Token::StartTag { attributes, .. } = &tokens[0] else {
            panic!("expected start tag, got: {tokens:?}");
        };
        assert_eq!(
            attributes,
            &vec![
                ("class".to_string(), Some("openmoji".to_string())),
                ("scaled".to_string(), None),
            ]
        );
    }

    #[test]
    fn tokenize_treats_stray_lt_as_text() {
        let tokens = tokenize("a < b");
        let text: String = tokens
            .iter()
            .map(|t| match t {
                Token::Text(s) => s.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(text, "a < b");
    }

    #[test]
    fn tokenize_keeps_emoticons_as_text() {
        let tokens = tokenize("x <3 </3");
        assert!(tokens.iter().all(|t| matches!(t, Token::Text(_))), "got: {tokens:?}");
    }

    #[test]
    fn tokenize_finds_style_end_tag_case_insensitive() {
        let tokens = tokenize("<style>.a{}</StYlE >x");
        assert_eq!(
            tokens,
            vec![
                Token::StartTag {
                    name: "style".to_string(),
                    attributes: Vec::new(),
                    self_closing: false,
                },
                Token::Text(".a{}".to_string()),
                Token::EndTag("style".to_string()),
                Token::Text("x".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_handles_comments_and_doctype() {
        let tokens = tokenize("<!DOCTYPE html><!-- hi -->x");
        assert_eq!(
            tokens,
            vec![
                Token::Doctype("DOCTYPE html".to_string()),
                Token::Comment(" hi ".to_string()),
                Token::Text("x".to_string()),
            ]
        );
    }
}
