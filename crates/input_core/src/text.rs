//! UTF-8 helpers for mapping logical caret offsets onto byte indices.

/// Byte index of the `offset`-th Unicode scalar value, clamped to `s.len()`.
fn byte_index_for_char_offset(s: &str, offset: usize) -> usize {
    s.char_indices()
        .nth(offset)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

/// Split `s` at a character offset (clamped), returning both halves.
///
/// ```
/// use input_core::split_at_char_offset;
///
/// assert_eq!(split_at_char_offset("a😀b", 2), ("a😀", "b"));
/// ```
pub fn split_at_char_offset(s: &str, offset: usize) -> (&str, &str) {
    s.split_at(byte_index_for_char_offset(s, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_multibyte_scalars_whole() {
        assert_eq!(split_at_char_offset("héllo!", 3), ("hél", "lo!"));
        assert_eq!(split_at_char_offset("ab", 0), ("", "ab"));
        assert_eq!(split_at_char_offset("ab", 5), ("ab", ""));
    }

    #[test]
    fn byte_index_counts_scalars() {
        let s = "a😀b";
        assert_eq!(byte_index_for_char_offset(s, 2), 5);
        assert_eq!(byte_index_for_char_offset(s, 9), s.len());
    }
}
