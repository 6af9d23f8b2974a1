//! Placing a rendered emoji into an editable region.

use html::{Document, Id, Node};
use input_core::{CaretSelection, split_at_char_offset};
use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Inserted at the recorded caret.
    AtCaret,
    /// No usable caret; appended at the end of the content.
    AtEnd,
}

/// Insert `emoji` at `caret`, or at the end of `input` when the caret is missing or stale.
///
/// Returns `None` only when `input` itself is no longer in the document.
pub fn insert_emoji(
    doc: &mut Document,
    input: Id,
    caret: Option<&CaretSelection>,
    emoji: Node,
) -> Option<InsertOutcome> {
    let emoji = match caret {
        Some(caret) => match insert_at_caret(doc, caret, emoji) {
            Ok(()) => {
                debug!(target: "picker.insert", "inserted at {}", caret.anchor_element_id);
                return Some(InsertOutcome::AtCaret);
            }
            Err(emoji) => {
                debug!(
                    target: "picker.insert",
                    "caret anchored at {} is stale, appending",
                    caret.anchor_element_id
                );
                emoji
            }
        },
        None => emoji,
    };
    insert_at_end(doc, input, emoji)?;
    debug!(target: "picker.insert", "appended at end");
    Some(InsertOutcome::AtEnd)
}

enum Target {
    Text(String, String),
    Element,
}

/// Hands the node back when the caret no longer resolves.
fn insert_at_caret(doc: &mut Document, caret: &CaretSelection, emoji: Node) -> Result<(), Node> {
    let Some(anchor) = doc.element_by_dom_id(&caret.anchor_element_id) else {
        return Err(emoji);
    };
    let Some(children) = doc.get_mut(anchor).and_then(Node::children_mut) else {
        return Err(emoji);
    };
    let index = caret.child_offset;
    let offset = caret.character_offset;

    let target = match children.get(index) {
        Some(Node::Text { text, .. }) => {
            let (before, after) = split_at_char_offset(text, offset);
            Target::Text(before.to_string(), after.to_string())
        }
        Some(Node::Element { .. }) => Target::Element,
        _ => return Err(emoji),
    };
    match target {
        Target::Text(before, after) => {
            // both halves stay, even when empty
            children.splice(index..=index, [Node::text(before), emoji, Node::text(after)]);
        }
        Target::Element => {
            let Some(inner) = children[index].children_mut() else {
                return Err(emoji);
            };
            let at = offset.min(inner.len());
            inner.insert(at, emoji);
        }
    }
    doc.adopt(anchor);
    Ok(())
}

fn insert_at_end(doc: &mut Document, input: Id, emoji: Node) -> Option<()> {
    let children = doc.get_mut(input)?.children_mut()?;
    let last_is_div = children.last().is_some_and(|n| n.is_element_named("div"));
    let target = if last_is_div {
        children.last_mut()?.children_mut()?
    } else {
        children
    };
    if target.last().is_some_and(|n| n.is_element_named("br")) {
        target.pop();
    }
    target.push(emoji);
    doc.adopt(input);
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker() -> Node {
        Node::element("img", vec![("class".to_string(), Some("openmoji".to_string()))])
    }

    fn input_of(doc: &Document) -> Id {
        doc.element_by_dom_id("in").expect("input")
    }

    #[test]
    fn splits_text_at_caret() {
        let mut doc = Document::parse(r#"<div id="in">abcdef</div>"#);
        let input = input_of(&doc);
        let caret = CaretSelection::new("in", 0, 3);
        let outcome = insert_emoji(&mut doc, input, Some(&caret), marker());
        assert_eq!(outcome, Some(InsertOutcome::AtCaret));

        let node = doc.get(input).expect("input");
        let children = node.children().expect("children");
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].text_content(), "abc");
        assert!(children[1].has_class("openmoji"));
        assert_eq!(children[2].text_content(), "def");
        assert!(children.iter().all(|c| c.id() != Id::UNASSIGNED));
    }

    #[test]
    fn offset_counts_characters() {
        let mut doc = Document::parse(r#"<div id="in">héllo</div>"#);
        let input = input_of(&doc);
        let caret = CaretSelection::new("in", 0, 2);
        insert_emoji(&mut doc, input, Some(&caret), marker());
        assert_eq!(
            doc.inner_html(input).as_deref(),
            Some(r#"hé<img class="openmoji">llo"#)
        );
    }

    #[test]
    fn element_child_receives_node_at_offset() {
        let mut doc = Document::parse(r#"<div id="in"><p>a<b>b</b></p></div>"#);
        let input = input_of(&doc);
        let caret = CaretSelection::new("in", 0, 1);
        insert_emoji(&mut doc, input, Some(&caret), marker());
        assert_eq!(
            doc.inner_html(input).as_deref(),
            Some(r#"<p>a<img class="openmoji"><b>b</b></p>"#)
        );
    }

    #[test]
    fn stale_caret_falls_back_to_end() {
        let mut doc = Document::parse(r#"<div id="in">text</div>"#);
        let input = input_of(&doc);
        let caret = CaretSelection::new("gone-focus", 0, 1);
        let outcome = insert_emoji(&mut doc, input, Some(&caret), marker());
        assert_eq!(outcome, Some(InsertOutcome::AtEnd));
        assert_eq!(
            doc.inner_html(input).as_deref(),
            Some(r#"text<img class="openmoji">"#)
        );

        let caret = CaretSelection::new("in", 9, 0);
        let outcome = insert_emoji(&mut doc, input, Some(&caret), marker());
        assert_eq!(outcome, Some(InsertOutcome::AtEnd));
    }

    #[test]
    fn end_insertion_targets_last_div_and_drops_trailing_br() {
        let mut doc = Document::parse(r#"<div id="in">x<div>line<br></div></div>"#);
        let input = input_of(&doc);
        insert_emoji(&mut doc, input, None, marker());
        assert_eq!(
            doc.inner_html(input).as_deref(),
            Some(r#"x<div>line<img class="openmoji"></div>"#)
        );
    }

    #[test]
    fn end_insertion_into_input_drops_trailing_br() {
        let mut doc = Document::parse(r#"<div id="in"><br></div>"#);
        let input = input_of(&doc);
        insert_emoji(&mut doc, input, None, marker());
        assert_eq!(doc.inner_html(input).as_deref(), Some(r#"<img class="openmoji">"#));
    }

    #[test]
    fn missing_input_reports_none() {
        let mut doc = Document::parse("<p></p>");
        assert_eq!(insert_emoji(&mut doc, Id(999), None, marker()), None);
    }
}
