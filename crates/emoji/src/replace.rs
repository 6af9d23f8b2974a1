//! Boundary-aware find-and-replace over text runs.
//!
//! A token only matches when followed by a boundary: whitespace, `<`, `>`, `&`, optionally `:`,
//! or the end of the run. Within a run split into [`Piece`]s, the end of every text piece is a
//! boundary too, since it is followed by a rendered emoji or the end of the run.
//!
//! Every replacement is re-applied until nothing changes, so occurrences exposed by an earlier
//! substitution are picked up as well. A glued run like `😀😀😀` exposes one occurrence per
//! substitution; a single pass follows such a run leftwards instead of leaving it to the next.
//!
//! Glyph matches additionally must not start inside an emoji sequence, so the skin-tone
//! modifier of `👍🏻` or the tail of a ZWJ family is never picked out on its own.

use memchr::memmem::Finder;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Piece {
    Text(String),
    /// Rendered emoji, by catalog record index.
    Emoji(usize),
}

/// Matching rules for one kind of token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rule {
    /// A following `:` counts as a boundary, so `:a::b:` style runs convert.
    pub colon_joiner: bool,
    /// Reject matches that start inside an emoji sequence.
    pub glyph: bool,
}

pub(crate) const EMOTICON: Rule = Rule {
    colon_joiner: false,
    glyph: false,
};
pub(crate) const SHORTHAND: Rule = Rule {
    colon_joiner: true,
    glyph: false,
};
pub(crate) const GLYPH: Rule = Rule {
    colon_joiner: true,
    glyph: true,
};

#[inline]
fn is_boundary(c: char, colon_joiner: bool) -> bool {
    c.is_whitespace() || matches!(c, '<' | '>' | '&') || (colon_joiner && c == ':')
}

#[inline]
fn followed_by_boundary(rest: &str, colon_joiner: bool) -> bool {
    rest.chars().next().is_none_or(|c| is_boundary(c, colon_joiner))
}

/// ZWJ, variation selector 16, keycap, skin-tone modifiers and tag characters.
fn continues_sequence(c: char) -> bool {
    matches!(
        c,
        '\u{200D}' | '\u{FE0F}' | '\u{20E3}' | '\u{1F3FB}'..='\u{1F3FF}' | '\u{E0020}'..='\u{E007F}'
    )
}

/// Whether `glyph` placed right after `prev` would be refused as the inside of a sequence.
pub(crate) fn cuts_sequence(prev: Option<char>, glyph: &str) -> bool {
    match prev {
        None => false,
        Some('\u{200D}') => true,
        Some(prev) => !prev.is_whitespace() && glyph.chars().next().is_some_and(continues_sequence),
    }
}

fn splits_sequence(text: &str, start: usize) -> bool {
    cuts_sequence(text[..start].chars().next_back(), &text[start..])
}

/// Byte ranges of the occurrences one pass rewrites, in ascending order.
///
/// Occurrences followed by a boundary are taken left to right without overlap. Then every taken
/// match extends leftwards over glued occurrences ending exactly where it starts, as long as the
/// replacement `dst` begins with a boundary. `None` stands for a rendered emoji, which always
/// ends the text before it.
fn bounded_matches(text: &str, finder: &Finder<'_>, dst: Option<&str>, rule: Rule) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let needle = finder.needle();
    let len = needle.len();
    let accepts = |start: usize| !(rule.glyph && splits_sequence(text, start));

    let mut found = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let Some(offset) = finder.find(&bytes[pos..]) else {
            break;
        };
        let start = pos + offset;
        let end = start + len;
        if followed_by_boundary(&text[end..], rule.colon_joiner) && accepts(start) {
            found.push((start, end));
            pos = end;
        } else {
            // step over one scalar; matches of valid UTF-8 needles start on char boundaries
            pos = start + text[start..].chars().next().map_or(1, char::len_utf8);
        }
    }

    let exposes = dst
        .and_then(|dst| dst.chars().next())
        .is_none_or(|c| is_boundary(c, rule.colon_joiner));
    if found.is_empty() || !exposes {
        return found;
    }

    let mut glued = Vec::new();
    let mut floor = 0;
    for &(start, end) in &found {
        let mut at = start;
        // a byte-equal needle starts on a char boundary
        while at >= floor + len && &bytes[at - len..at] == needle && accepts(at - len) {
            glued.push((at - len, at));
            at -= len;
        }
        floor = end;
    }
    if !glued.is_empty() {
        found.extend(glued);
        found.sort_unstable();
    }
    found
}

fn replace_pass(text: &str, finder: &Finder<'_>, dst: &str, rule: Rule) -> Option<String> {
    let matches = bounded_matches(text, finder, Some(dst), rule);
    if matches.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(text.len() + matches.len() * dst.len());
    let mut last = 0;
    for (start, end) in matches {
        out.push_str(&text[last..start]);
        out.push_str(dst);
        last = end;
    }
    out.push_str(&text[last..]);
    Some(out)
}

/// Replace bounded `src` with `dst` until a fixed point. Returns whether anything changed.
pub(crate) fn replace_until_stable(text: &mut String, src: &str, dst: &str, rule: Rule) -> bool {
    if src.is_empty() || src == dst {
        return false;
    }
    let finder = Finder::new(src.as_bytes());
    // when dst contains src, re-scanning would never settle
    let once = dst.contains(src);
    let mut changed = false;
    while let Some(next) = replace_pass(text, &finder, dst, rule) {
        *text = next;
        changed = true;
        if once {
            break;
        }
    }
    changed
}

/// [`replace_until_stable`] applied to every text piece.
pub(crate) fn replace_in_pieces(pieces: &mut [Piece], src: &str, dst: &str, rule: Rule) -> bool {
    let mut changed = false;
    for piece in pieces.iter_mut() {
        if let Piece::Text(text) = piece {
            changed |= replace_until_stable(text, src, dst, rule);
        }
    }
    changed
}

/// Split text pieces around every bounded `token`, putting `Piece::Emoji(index)` in its place.
/// Rendering a token makes the text before it end at a boundary, so glued occurrences before a
/// rendered one are split off in the same pass.
pub(crate) fn render_in_pieces(pieces: &mut Vec<Piece>, token: &str, index: usize, rule: Rule) -> bool {
    if token.is_empty() {
        return false;
    }
    let finder = Finder::new(token.as_bytes());
    let present = pieces
        .iter()
        .any(|p| matches!(p, Piece::Text(t) if finder.find(t.as_bytes()).is_some()));
    if !present {
        return false;
    }
    let mut changed = false;
    let mut next = Vec::with_capacity(pieces.len());
    for piece in pieces.drain(..) {
        let text = match piece {
            Piece::Text(text) => text,
            emoji => {
                next.push(emoji);
                continue;
            }
        };
        let matches = bounded_matches(&text, &finder, None, rule);
        if matches.is_empty() {
            next.push(Piece::Text(text));
            continue;
        }
        changed = true;
        let mut last = 0;
        for (start, end) in matches {
            if start > last {
                next.push(Piece::Text(text[last..start].to_string()));
            }
            next.push(Piece::Emoji(index));
            last = end;
        }
        if last < text.len() {
            next.push(Piece::Text(text[last..].to_string()));
        }
    }
    *pieces = next;
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replaced(text: &str, src: &str, dst: &str, rule: Rule) -> String {
        let mut s = text.to_string();
        replace_until_stable(&mut s, src, dst, rule);
        s
    }

    #[test]
    fn requires_trailing_boundary() {
        assert_eq!(replaced(":smiley:ing", ":smiley:", "X", SHORTHAND), ":smiley:ing");
        assert_eq!(replaced(":smiley: ", ":smiley:", "X", SHORTHAND), "X ");
        assert_eq!(replaced("a:smiley:", ":smiley:", "X", SHORTHAND), "aX");
        assert_eq!(replaced(":smiley:<", ":smiley:", "X", SHORTHAND), "X<");
    }

    #[test]
    fn colon_joiner_is_optional() {
        assert_eq!(replaced("ab:", "ab", "X", SHORTHAND), "X:");
        assert_eq!(replaced("ab:", "ab", "X", EMOTICON), "ab:");
    }

    #[test]
    fn exposed_occurrences_are_replaced() {
        // the first "ab" is only followed by a boundary once the second is rewritten
        assert_eq!(replaced("abab", "ab", ":x:", SHORTHAND), ":x::x:");
    }

    #[test]
    fn glued_run_resolves_in_one_pass() {
        let run = "ab".repeat(1000);
        let finder = Finder::new(b"ab");
        assert_eq!(bounded_matches(&run, &finder, Some(":x:"), SHORTHAND).len(), 1000);
        // an emoticon's replacement starts with ':', which does not end one
        assert_eq!(bounded_matches(&run, &finder, Some(":x:"), EMOTICON).len(), 1);
    }

    #[test]
    fn bounded_neighbours_are_taken_left_to_right() {
        // '<' ends the first occurrence, and the longer token wins before the rest is looked at
        assert_eq!(replaced("ab<ab", "ab", "X", EMOTICON), "X<X");
        assert_eq!(replaced("<3<3<3<3 ", "<3<3<3", "T", EMOTICON), "T<3 ");
    }

    #[test]
    fn overlapping_candidate_is_found() {
        assert_eq!(replaced(":a:a: ", ":a:", "X", SHORTHAND), ":aX ");
    }

    #[test]
    fn self_containing_replacement_terminates() {
        assert_eq!(replaced("a a", "a", "aa", SHORTHAND), "aa aa");
    }

    #[test]
    fn glyphs_inside_sequences_are_left_alone() {
        // skin-tone modifier of a toned thumbs up
        assert_eq!(replaced("👍🏻 ", "🏻", ":tone:", GLYPH), "👍🏻 ");
        // tail of a ZWJ sequence
        assert_eq!(replaced("👨\u{200D}👧", "👧", ":girl:", GLYPH), "👨\u{200D}👧");
        // a lone modifier after whitespace is still matched
        assert_eq!(replaced("a 🏻", "🏻", ":tone:", GLYPH), "a :tone:");
    }

    #[test]
    fn rendering_splits_text_pieces() {
        let mut pieces = vec![Piece::Text("hi :x::x: there".to_string())];
        assert!(render_in_pieces(&mut pieces, ":x:", 7, SHORTHAND));
        assert_eq!(
            pieces,
            vec![
                Piece::Text("hi ".to_string()),
                Piece::Emoji(7),
                Piece::Emoji(7),
                Piece::Text(" there".to_string()),
            ]
        );
    }

    #[test]
    fn rendering_splits_long_glued_runs() {
        let mut pieces = vec![Piece::Text(format!("{} end", ":x:".repeat(700)))];
        assert!(render_in_pieces(&mut pieces, ":x:", 3, SHORTHAND));
        assert_eq!(pieces.len(), 701);
        assert!(pieces[..700].iter().all(|p| *p == Piece::Emoji(3)));
        assert_eq!(pieces[700], Piece::Text(" end".to_string()));
    }

    #[test]
    fn cut_sequences_follow_the_previous_char() {
        assert!(cuts_sequence(Some('\u{200D}'), "🍕"));
        assert!(cuts_sequence(Some('a'), "🏻"));
        assert!(!cuts_sequence(Some(' '), "🏻"));
        assert!(!cuts_sequence(Some('a'), "🍕"));
        assert!(!cuts_sequence(None, "🏻"));
    }

    #[test]
    fn rendering_needs_boundary() {
        let mut pieces = vec![Piece::Text(":x:y".to_string())];
        assert!(!render_in_pieces(&mut pieces, ":x:", 0, SHORTHAND));
        assert_eq!(pieces, vec![Piece::Text(":x:y".to_string())]);
    }
}
