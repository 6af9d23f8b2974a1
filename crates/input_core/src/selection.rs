//! Logical caret position inside an editable region.

/// Caret recorded against a tagged element rather than a node handle, so it survives
/// edits that keep the tagged element in place.
///
/// - `anchor_element_id` is the `id` attribute of the caret node's parent element.
/// - `child_offset` is the caret node's index among that parent's children.
/// - `character_offset` is the offset inside the caret node: Unicode scalar values for text
///   nodes, a child index for elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaretSelection {
    pub anchor_element_id: String,
    pub child_offset: usize,
    pub character_offset: usize,
}

impl CaretSelection {
    pub fn new(anchor_element_id: impl Into<String>, child_offset: usize, character_offset: usize) -> Self {
        Self {
            anchor_element_id: anchor_element_id.into(),
            child_offset,
            character_offset,
        }
    }
}
