mod common;

use common::{child, loaded_page, only_editable, page, rendered_indices};
use html::Node;
use input_core::RegionId;
use picker::{InsertOutcome, PageError, Rect, SelectionChange, Viewport};

fn at(focus: html::Id, offset: usize) -> SelectionChange {
    SelectionChange {
        focus,
        offset,
        body_active: false,
    }
}

#[test]
fn inserts_between_split_text_at_caret() {
    let mut page = loaded_page(r#"<div class="openmoji-editable">abcdef</div>"#);
    let region = only_editable(&page);
    let text = child(&page, region.input(), 0);

    assert_eq!(page.selection_changed(at(text, 3)), Some(region.id()));
    let caret = page.caret(region.id()).expect("caret");
    assert_eq!(Some(caret.anchor_element_id.as_str()), region.input_dom_id());
    assert_eq!((caret.child_offset, caret.character_offset), (0, 3));

    assert_eq!(page.insert_emoji(region.id(), 0), Ok(InsertOutcome::AtCaret));
    let input = page.document().get(region.input()).expect("input");
    let children = input.children().expect("children");
    assert_eq!(children.len(), 3);
    assert_eq!(children[0].text_content(), "abc");
    assert_eq!(children[1].attr("data-index"), Some("0"));
    assert_eq!(children[2].text_content(), "def");

    // the caret is consumed by the insertion
    assert!(page.caret(region.id()).is_none());
    assert_eq!(page.insert_emoji(region.id(), 2), Ok(InsertOutcome::AtEnd));
    let value = page.text_value(region.id()).expect("value");
    assert_eq!(rendered_indices(&value), vec![0, 2]);
}

#[test]
fn stale_caret_appends_at_end() {
    let mut page = loaded_page(r#"<div class="openmoji-editable"><p>hello</p></div>"#);
    let region = only_editable(&page);
    let p = child(&page, region.input(), 0);
    let text = child(&page, p, 0);
    page.selection_changed(at(text, 2)).expect("recorded");

    // the host replaced the paragraph content behind our back
    assert!(page.document_mut().set_inner_html(p, ""));
    assert_eq!(page.insert_emoji(region.id(), 24), Ok(InsertOutcome::AtEnd));
    let value = page.text_value(region.id()).expect("value");
    assert!(value.starts_with("<p"), "{value}");
    assert!(value.ends_with(r#"alt="❤" scaled>"#), "{value}");
}

#[test]
fn trailing_break_is_replaced() {
    let mut page = loaded_page(r#"<div class="openmoji-editable">line<div>next<br></div></div>"#);
    let region = only_editable(&page);
    assert_eq!(page.insert_emoji(region.id(), 34), Ok(InsertOutcome::AtEnd));
    let value = page.text_value(region.id()).expect("value");
    assert!(!value.contains("<br>"), "{value}");
    assert!(value.starts_with("line<div>next<img"), "{value}");
    assert!(value.ends_with("</div>"), "{value}");
}

#[test]
fn changed_content_invalidates_caret_on_blur() {
    let mut page = loaded_page(r#"<div class="openmoji-editable">abc</div>"#);
    let region = only_editable(&page);
    let text = child(&page, region.input(), 0);
    page.selection_changed(at(text, 1)).expect("recorded");

    // unchanged content keeps the caret
    assert!(!page.blurred(region.id()).expect("editable"));
    assert!(page.caret(region.id()).is_some());

    assert!(page.document_mut().set_inner_html(region.input(), "abc :)"));
    assert!(page.blurred(region.id()).expect("editable"));
    assert!(page.caret(region.id()).is_none());
    let value = page.text_value(region.id()).expect("value");
    assert_eq!(rendered_indices(&value), vec![4]);
}

#[test]
fn selections_are_dropped_while_converting() {
    let mut page = page(r#"<div class="openmoji-editable">abc</div>"#);
    let region = only_editable(&page);
    let text = child(&page, region.input(), 0);
    assert_eq!(page.selection_changed(at(text, 1)), None);
    assert!(page.caret(region.id()).is_none());
    assert!(matches!(
        page.insert_emoji(region.id(), 0),
        Err(PageError::CatalogPending)
    ));
}

#[test]
fn body_focus_is_ignored() {
    let mut page = loaded_page(r#"<div class="openmoji-editable">abc</div>"#);
    let region = only_editable(&page);
    let text = child(&page, region.input(), 0);
    let change = SelectionChange {
        focus: text,
        offset: 1,
        body_active: true,
    };
    assert_eq!(page.selection_changed(change), None);
    assert!(page.caret(region.id()).is_none());
}

#[test]
fn selection_goes_to_innermost_region() {
    let mut page = loaded_page(
        r#"<div class="openmoji-editable">outer <div class="openmoji-editable">inner</div></div>"#,
    );
    let hosts = page.document().elements_by_class("openmoji-editable");
    assert_eq!(hosts.len(), 2);
    let inner = page.region_for_host(hosts[1]).expect("inner region").clone();
    let text = child(&page, inner.input(), 0);

    assert_eq!(page.selection_changed(at(text, 2)), Some(inner.id()));
    let outer = page.region_for_host(hosts[0]).expect("outer region").id();
    assert!(page.caret(outer).is_none());
}

#[test]
fn unknown_targets_are_errors() {
    let mut page = loaded_page(
        r#"<div class="openmoji-editable">abc</div><p class="openmoji-readonly">x</p>"#,
    );
    let region = only_editable(&page);
    assert!(matches!(
        page.insert_emoji(region.id(), 10_000),
        Err(PageError::UnknownEmoji(10_000))
    ));
    let missing = RegionId::from_raw(9_999);
    assert!(matches!(
        page.insert_emoji(missing, 0),
        Err(PageError::UnknownRegion(_))
    ));
    let readonly = page.regions().iter().find(|r| r.id() != region.id()).expect("readonly").id();
    assert!(matches!(page.blurred(readonly), Err(PageError::UnknownRegion(_))));
}

#[test]
fn picker_panel_lifecycle() {
    let mut page = loaded_page(r#"<div class="openmoji-editable with-openmoji-picker">hi</div>"#);
    let region = only_editable(&page);
    let origin = Rect {
        left: 10.0,
        top: 10.0,
        width: 24.0,
        height: 24.0,
    };
    let viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    assert_eq!(page.click_picker_button(0, origin, viewport), Some(true));
    let panel = page.buttons()[0].panel().expect("panel");
    assert_eq!(panel.placement().map(|p| p.as_str()), Some("top-left"));

    let entries = page.panel_entries(0);
    assert!(entries.contains(&0));
    assert!(page.select_group(0, 2));
    assert!(page.panel_entries(0).contains(&34));

    assert_eq!(page.pick(0, 34), Ok(InsertOutcome::AtEnd));
    assert!(!page.buttons()[0].panel().expect("panel").is_shown());
    let value = page.text_value(region.id()).expect("value");
    assert_eq!(rendered_indices(&value), vec![34]);

    // clicks on the button keep the panel, clicks elsewhere close it
    page.click_picker_button(0, origin, viewport);
    let button = page.buttons()[0].element();
    page.document_clicked(button);
    assert!(page.buttons()[0].panel().expect("panel").is_shown());
    let body = page.document().first_element_named("body").expect("body");
    page.document_clicked(body);
    assert!(!page.buttons()[0].panel().expect("panel").is_shown());
}

#[test]
fn inserted_emoji_survive_reconversion() {
    let mut page = loaded_page(r#"<div class="openmoji-editable">a</div>"#);
    let region = only_editable(&page);
    page.insert_emoji(region.id(), 26).expect("insert");
    let before = page.text_value(region.id());
    assert!(!page.blurred(region.id()).expect("editable"));
    assert_eq!(page.text_value(region.id()), before);

    let input = page.document().get(region.input()).expect("input");
    let rendered: Vec<&Node> = input
        .children()
        .expect("children")
        .iter()
        .filter(|n| n.is_element_named("img"))
        .collect();
    assert_eq!(rendered.len(), 1);
}
