//! Selection capture: turn a DOM selection point into a [`CaretSelection`] that survives
//! until the next content rewrite.

use html::{Document, Id};
use input_core::CaretSelection;

/// Suffix of the id given to the focus node's parent when it has none of its own.
pub const FOCUS_SUFFIX: &str = "-focus";

/// Capture the caret at `focus`/`offset` for the region whose input element is `input`.
///
/// Returns `None` when `focus` lies outside the input or has no parent. The tag id left on a
/// previous anchor of the same input is removed first, so at most one element carries it.
pub fn capture_selection(
    doc: &mut Document,
    input: Id,
    input_dom_id: &str,
    focus: Id,
    offset: usize,
) -> Option<CaretSelection> {
    if !doc.is_descendant(focus, input) {
        return None;
    }
    let (parent, child_offset) = doc.parent_of(focus)?;
    let tag = format!("{input_dom_id}{FOCUS_SUFFIX}");

    if let Some(previous) = doc.element_by_dom_id(&tag) {
        if let Some(node) = doc.get_mut(previous) {
            node.remove_attr("id");
        }
    }

    let parent_node = doc.get_mut(parent)?;
    let anchor = match parent_node.attr("id") {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            parent_node.set_attr("id", Some(tag.clone()));
            tag
        }
    };
    Some(CaretSelection::new(anchor, child_offset, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_child(doc: &Document, parent: Id, index: usize) -> Id {
        doc.get(parent)
            .and_then(|n| n.children())
            .and_then(|c| c.get(index))
            .map(|n| n.id())
            .expect("child")
    }

    #[test]
    fn parent_without_id_gets_tagged() {
        let mut doc = Document::parse(r#"<div id="in"><p>hello <b>you</b></p></div>"#);
        let input = doc.element_by_dom_id("in").expect("input");
        let p = doc.first_element_named("p").expect("p");
        let focus = text_child(&doc, p, 0);

        let caret = capture_selection(&mut doc, input, "in", focus, 3).expect("caret");
        assert_eq!(caret, CaretSelection::new("in-focus", 0, 3));
        assert_eq!(doc.element_by_dom_id("in-focus"), Some(p));
    }

    #[test]
    fn existing_id_is_reused_and_old_tag_dropped() {
        let mut doc = Document::parse(r#"<div id="in"><p>a</p><p id="keep">b</p></div>"#);
        let input = doc.element_by_dom_id("in").expect("input");
        let first = doc.first_element_named("p").expect("p");
        let keep = doc.element_by_dom_id("keep").expect("keep");

        let a = text_child(&doc, first, 0);
        capture_selection(&mut doc, input, "in", a, 1).expect("first");
        assert_eq!(doc.element_by_dom_id("in-focus"), Some(first));

        let b = text_child(&doc, keep, 0);
        let caret = capture_selection(&mut doc, input, "in", b, 0).expect("second");
        assert_eq!(caret.anchor_element_id, "keep");
        assert_eq!(doc.element_by_dom_id("in-focus"), None);
    }

    #[test]
    fn focus_outside_input_is_ignored() {
        let mut doc = Document::parse(r#"<div id="in">x</div><p>y</p>"#);
        let input = doc.element_by_dom_id("in").expect("input");
        let p = doc.first_element_named("p").expect("p");
        let outside = text_child(&doc, p, 0);
        assert_eq!(capture_selection(&mut doc, input, "in", outside, 0), None);
        assert_eq!(doc.element_by_dom_id("in-focus"), None);
    }
}
