#![allow(dead_code)]

use std::sync::Arc;

use emoji::EMOJI_CLASS;
use emoji::fixtures::sample_catalog;
use html::{Id, Node, parse_fragment};
use picker::{Page, PageConfig, Region, RegionKind};

pub fn page(body: &str) -> Page {
    let doc = html::Document::parse(&format!("<html><head></head><body>{body}</body></html>"));
    Page::new(doc, PageConfig::default()).expect("default config is valid")
}

/// Page with the sample catalog attached.
pub fn loaded_page(body: &str) -> Page {
    let mut page = page(body);
    page.attach_catalog(Arc::new(sample_catalog()));
    page
}

pub fn regions_of(page: &Page, kind: RegionKind) -> Vec<Region> {
    page.regions()
        .iter()
        .filter(|r| r.kind() == kind)
        .cloned()
        .collect()
}

pub fn only_editable(page: &Page) -> Region {
    let mut editable = regions_of(page, RegionKind::Editable);
    assert_eq!(editable.len(), 1, "expected exactly one editable region");
    editable.remove(0)
}

/// Id of the `index`-th child of `parent`.
pub fn child(page: &Page, parent: Id, index: usize) -> Id {
    page.document()
        .get(parent)
        .and_then(|n| n.children())
        .and_then(|c| c.get(index))
        .map(|n| n.id())
        .expect("child exists")
}

/// `data-index` of every rendered emoji in a serialized fragment, in document order.
pub fn rendered_indices(html: &str) -> Vec<usize> {
    fn walk(node: &Node, out: &mut Vec<usize>) {
        if node.has_class(EMOJI_CLASS) {
            if let Some(index) = node.attr("data-index").and_then(|i| i.parse().ok()) {
                out.push(index);
            }
            return;
        }
        for child in node.children().unwrap_or_default() {
            walk(child, out);
        }
    }
    let mut out = Vec::new();
    for node in parse_fragment(html) {
        walk(&node, &mut out);
    }
    out
}
