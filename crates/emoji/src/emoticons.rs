//! Emoticon → shorthand expansion.

use crate::replace::{EMOTICON, replace_until_stable};

/// Emoticons and the shorthand sequences they expand to. Matching is done on decoded text.
const EMOTICONS: &[(&str, &str)] = &[
    (
        "<3<3<3",
        ":dizzy::sparkling-heart::sparkling-heart::sparkling-heart::dizzy:",
    ),
    ("<3", ":red-heart:"),
    ("</3", ":broken-heart:"),
    (":)", ":slightly-smiling-face:"),
    ("=)", ":slightly-smiling-face:"),
    (":*", ":kissing-face-with-closed-eyes:"),
    (";*", ":face-blowing-a-kiss:"),
    ("^^", ":smiling-face-with-smiling-eyes:"),
    ("^_^", ":smiling-face-with-smiling-eyes:"),
    (":D", ":grinning-face-with-smiling-eyes:"),
    ("=D", ":grinning-face-with-smiling-eyes:"),
    ("8)", ":smiling-face-with-sunglasses:"),
    (";)", ":winking-face:"),
    (":P", ":face-savoring-food:"),
    (":p", ":face-with-tongue:"),
    (";p", ":winking-face-with-tongue:"),
    (":/", ":confused-face:"),
    ("=/", ":confused-face:"),
    (":\\", ":confused-face:"),
    ("=\\", ":confused-face:"),
    (":|", ":neutral-face:"),
    ("=|", ":neutral-face:"),
    ("-_-", ":expressionless-face:"),
    (":o", ":face-with-open-mouth:"),
    (":O", ":exploding-head:"),
    (":'(", ":crying-face:"),
    ("='(", ":crying-face:"),
    (">:(", ":pouting-face:"),
    (">=(", ":pouting-face:"),
    (":(", ":frowning-face:"),
    ("=(", ":frowning-face:"),
    (")D>-", ":tongue::victory-hand:"),
    (":o)", ":clown-face:"),
    ("=o)", ":clown-face:"),
    ("(:", ":upside-down-face:"),
    ("(=", ":upside-down-face:"),
];

/// The table ordered longest first (stable within equal lengths), so `<3<3<3` wins over `<3`.
pub fn emoticon_table() -> Vec<(&'static str, &'static str)> {
    let mut table = EMOTICONS.to_vec();
    table.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
    table
}

/// Replace emoticons followed by whitespace, `<`, `>`, `&` or the end of the text.
///
/// A following `:` is deliberately not a boundary here: `:):` is left alone.
pub fn emoticons_to_shorthands(text: &str) -> String {
    let mut out = text.to_string();
    for (emoticon, shorthand) in emoticon_table() {
        replace_until_stable(&mut out, emoticon, shorthand, EMOTICON);
    }
    out
}
