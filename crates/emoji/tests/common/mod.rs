#![allow(dead_code)]

use std::sync::Arc;

use emoji::{Catalog, Codec, CodecConfig, EMOJI_CLASS};
use html::{Node, parse_fragment};

pub const SAMPLE_JSON: &str = include_str!("../../fixtures/openmoji_sample.json");

pub fn catalog() -> Catalog {
    Catalog::from_json(SAMPLE_JSON).expect("fixture dataset parses")
}

pub fn codec(config: CodecConfig) -> Codec {
    Codec::new(Arc::new(catalog()), config)
}

pub fn shorthand_mode() -> CodecConfig {
    CodecConfig::default()
}

pub fn glyph_mode() -> CodecConfig {
    CodecConfig {
        convert_to_shorthands: false,
        ..CodecConfig::default()
    }
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
