//! Conversion between emoji glyphs, `:shorthand:` tokens and rendered `<img>` markup.
//!
//! Invariants:
//! - Rendered emoji are elements carrying the [`EMOJI_CLASS`] class; nothing else is stripped
//!   by [`Codec::to_plain_text`].
//! - [`Codec::convert`] always strips before rendering, so converting already-converted content
//!   yields the same tree.

use std::sync::Arc;

use html::traverse::normalize_text;
use html::{Node, inner_html, parse_fragment};
use log::{debug, trace};

use crate::assets::{AssetPaths, Palette};
use crate::catalog::Catalog;
use crate::config::CodecConfig;
use crate::emoticons::emoticons_to_shorthands;
use crate::error::CodecError;
use crate::replace::{
    GLYPH, Piece, SHORTHAND, cuts_sequence, render_in_pieces, replace_in_pieces, replace_until_stable,
};

/// Class every rendered emoji carries.
pub const EMOJI_CLASS: &str = "openmoji";
/// Extra class for flags, which render slightly smaller.
pub const SMALLER_CLASS: &str = "openmoji-smaller";

#[derive(Clone, Debug)]
pub struct Codec {
    catalog: Arc<Catalog>,
    config: CodecConfig,
    assets: AssetPaths,
}

impl Codec {
    pub fn new(catalog: Arc<Catalog>, config: CodecConfig) -> Self {
        let assets = config.asset_paths();
        Self {
            catalog,
            config,
            assets,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn assets(&self) -> &AssetPaths {
        &self.assets
    }

    pub fn emoticons_to_shorthands(&self, text: &str) -> String {
        emoticons_to_shorthands(text)
    }

    /// Rendered markup node for a catalog record, with an unassigned id.
    pub fn emoji_node(&self, index: usize) -> Option<Node> {
        let record = self.catalog.record(index)?;
        let shorthand = record.shorthand();

        let mut class = EMOJI_CLASS.to_string();
        if shorthand.contains("flag") {
            class.push(' ');
            class.push_str(SMALLER_CLASS);
        }
        let alt = if self.config.alt_as_shorthands {
            shorthand
        } else {
            record.glyph().unwrap_or(shorthand)
        };

        let mut attributes = vec![
            ("class".to_string(), Some(class)),
            ("data-shorthand".to_string(), Some(shorthand.to_string())),
        ];
        if let Some(glyph) = record.glyph() {
            attributes.push(("data-emoji".to_string(), Some(glyph.to_string())));
        }
        attributes.extend([
            ("data-index".to_string(), Some(index.to_string())),
            (
                "src".to_string(),
                Some(self.assets.svg_url(&record.hexcode, Palette::Color)),
            ),
            ("title".to_string(), Some(record.annotation.clone())),
            ("alt".to_string(), Some(alt.to_string())),
        ]);
        if self.config.scale_emojis {
            attributes.push(("scaled".to_string(), None));
        }
        Some(Node::element("img", attributes))
    }

    /// Replace every rendered emoji under `node` by its textual form and merge the resulting
    /// adjacent text. Returns the number of emoji stripped.
    pub fn to_plain_text(&self, node: &mut Node) -> usize {
        let stripped = self.strip_children(node);
        normalize_text(node);
        if stripped > 0 {
            trace!(target: "emoji.codec", "stripped {stripped} rendered emoji");
        }
        stripped
    }

    fn strip_children(&self, node: &mut Node) -> usize {
        let Some(children) = node.children_mut() else {
            return 0;
        };
        let mut stripped = 0;
        // last char of the text run the next child joins
        let mut prev = None;
        for child in children.iter_mut() {
            if child.has_class(EMOJI_CLASS) {
                let text = self.fallback_text(child, prev);
                prev = text.chars().next_back().or(prev);
                *child = Node::text(text);
                stripped += 1;
                continue;
            }
            stripped += self.strip_children(child);
            prev = match child {
                Node::Text { text, .. } => text.chars().next_back().or(prev),
                _ => None,
            };
        }
        stripped
    }

    /// Textual form of a rendered emoji following `prev`. In glyph mode the shorthand is kept
    /// where the glyph would be read back as part of the preceding sequence.
    fn fallback_text(&self, node: &Node, prev: Option<char>) -> String {
        let indexed = node
            .attr("data-index")
            .and_then(|i| i.parse::<usize>().ok())
            .and_then(|i| self.catalog.record(i));
        let shorthand = node
            .attr("data-shorthand")
            .filter(|s| !s.is_empty())
            .or_else(|| indexed.map(|r| r.shorthand()));
        let glyph = node
            .attr("data-emoji")
            .filter(|g| !g.is_empty())
            .or_else(|| indexed.and_then(|r| r.glyph()));

        let text = match (shorthand, glyph) {
            (Some(shorthand), Some(glyph))
                if self.config.convert_to_shorthands || cuts_sequence(prev, glyph) =>
            {
                shorthand
            }
            (_, Some(glyph)) => glyph,
            (Some(shorthand), None) => shorthand,
            (None, None) => node.attr("alt").unwrap_or_default(),
        };
        text.to_string()
    }

    /// Render emoticons, glyphs and shorthands found in the text under `node`.
    ///
    /// Call [`Codec::to_plain_text`] first (or use [`Codec::convert`]) when `node` may already
    /// contain rendered emoji.
    pub fn to_markup(&self, node: &mut Node) -> Result<(), CodecError> {
        if node.is_element_named("input") {
            return Err(CodecError::InputField);
        }
        normalize_text(node);
        let rendered = self.markup_children(node);
        if rendered > 0 {
            trace!(target: "emoji.codec", "rendered {rendered} emoji");
        }
        Ok(())
    }

    fn markup_children(&self, node: &mut Node) -> usize {
        if matches!(node.tag_name(), Some("script" | "style")) {
            return 0;
        }
        let Some(children) = node.children_mut() else {
            return 0;
        };
        let mut rendered = 0;
        let old = std::mem::take(children);
        for mut child in old {
            let pieces = match &child {
                Node::Text { text, .. } => self.markup_run(text),
                _ => None,
            };
            match pieces {
                Some(pieces) => {
                    for piece in pieces {
                        match piece {
                            Piece::Text(text) if text.is_empty() => {}
                            Piece::Text(text) => children.push(Node::text(text)),
                            Piece::Emoji(index) => {
                                if let Some(emoji) = self.emoji_node(index) {
                                    children.push(emoji);
                                    rendered += 1;
                                }
                            }
                        }
                    }
                }
                None => {
                    if !child.has_class(EMOJI_CLASS) {
                        rendered += self.markup_children(&mut child);
                    }
                    children.push(child);
                }
            }
        }
        rendered
    }

    /// Pieces for one text run, or `None` when nothing in it converts.
    fn markup_run(&self, original: &str) -> Option<Vec<Piece>> {
        let text = if self.config.allow_emoticons {
            emoticons_to_shorthands(original)
        } else {
            original.to_string()
        };
        // glyphs are never plain ASCII and shorthands need a colon
        if text.is_ascii() && !text.contains(':') {
            return (text != original).then(|| vec![Piece::Text(text)]);
        }

        let mut pieces = vec![Piece::Text(text)];
        let mut sweeps = 0;
        while self.sweep(&mut pieces) {
            sweeps += 1;
        }
        if sweeps > 1 {
            trace!(target: "emoji.codec", "text run settled after {sweeps} sweeps");
        }
        match pieces.as_slice() {
            [Piece::Text(out)] if out == original => None,
            _ => Some(pieces),
        }
    }

    /// One pass over the catalog in reverse order: glyph to shorthand, then shorthand to markup.
    fn sweep(&self, pieces: &mut Vec<Piece>) -> bool {
        let mut changed = false;
        for (index, record) in self.catalog.records().iter().enumerate().rev() {
            let shorthand = record.shorthand();
            if let Some(glyph) = record.glyph().filter(|g| !shorthand.contains(g)) {
                if replace_in_pieces(pieces, glyph, shorthand, GLYPH) {
                    trace!(target: "emoji.codec", "{glyph} -> {shorthand}");
                    changed = true;
                }
            }
            if render_in_pieces(pieces, shorthand, index, SHORTHAND) {
                trace!(target: "emoji.codec", "{shorthand} -> <img data-index={index}>");
                changed = true;
            }
        }
        changed
    }

    /// Strip then render. Returns whether the serialized content changed.
    pub fn convert(&self, node: &mut Node) -> Result<bool, CodecError> {
        if node.is_element_named("input") {
            return Err(CodecError::InputField);
        }
        let before = inner_html(node);
        self.to_plain_text(node);
        self.to_markup(node)?;
        let changed = inner_html(node) != before;
        debug!(target: "emoji.codec", "converted content (changed: {changed})");
        Ok(changed)
    }

    /// Convert an HTML fragment and serialize it back.
    pub fn render_html(&self, fragment: &str) -> Result<String, CodecError> {
        let mut host = fragment_host(fragment);
        self.convert(&mut host)?;
        Ok(inner_html(&host))
    }

    /// Strip rendered emoji from an HTML fragment.
    pub fn plain_html(&self, fragment: &str) -> String {
        let mut host = fragment_host(fragment);
        self.to_plain_text(&mut host);
        inner_html(&host)
    }

    /// Plain text with emoticons and glyphs replaced by shorthand tokens, without rendering.
    pub fn to_shorthand_text(&self, text: &str) -> String {
        let mut text = if self.config.allow_emoticons {
            emoticons_to_shorthands(text)
        } else {
            text.to_string()
        };
        loop {
            let mut changed = false;
            for record in self.catalog.records().iter().rev() {
                let shorthand = record.shorthand();
                if let Some(glyph) = record.glyph().filter(|g| !shorthand.contains(g)) {
                    changed |= replace_until_stable(&mut text, glyph, shorthand, GLYPH);
                }
            }
            if !changed {
                break text;
            }
        }
    }
}

fn fragment_host(fragment: &str) -> Node {
    let mut host = Node::element("div", Vec::new());
    if let Some(children) = host.children_mut() {
        *children = parse_fragment(fragment);
    }
    host
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_codec;

    #[test]
    fn emoji_node_carries_fallbacks() {
        let codec = sample_codec(CodecConfig::default());
        let node = codec.emoji_node(0).expect("record 0");
        assert_eq!(
            html::outer_html(&node),
            concat!(
                r#"<img class="openmoji" data-shorthand=":grinning-face:" data-emoji="😀" "#,
                r#"data-index="0" src="openmoji/color/svg/1F600.svg" title="grinning face" "#,
                r#"alt="😀" scaled>"#
            )
        );
    }

    #[test]
    fn flags_render_smaller_and_alt_follows_config() {
        let codec = sample_codec(CodecConfig {
            alt_as_shorthands: true,
            scale_emojis: false,
            ..CodecConfig::default()
        });
        let germany = codec.catalog().by_shorthand(":flag-germany:").expect("germany");
        let node = codec.emoji_node(germany).expect("node");
        assert_eq!(node.attr("class"), Some("openmoji openmoji-smaller"));
        assert_eq!(node.attr("alt"), Some(":flag-germany:"));
        assert!(!node.has_attr("scaled"));
    }

    #[test]
    fn glyphless_record_has_no_data_emoji() {
        let codec = sample_codec(CodecConfig::default());
        let flat = codec.catalog().by_shorthand(":flat-white-flag:").expect("flat");
        let node = codec.emoji_node(flat).expect("node");
        assert!(!node.has_attr("data-emoji"));
        assert_eq!(node.attr("alt"), Some(":flat-white-flag:"));
    }

    #[test]
    fn plain_text_falls_back_to_indexed_glyph() {
        let codec = sample_codec(CodecConfig {
            convert_to_shorthands: false,
            ..CodecConfig::default()
        });
        let out = codec.plain_html(r#"a<img class="openmoji" data-index="0">b"#);
        assert_eq!(out, "a😀b");
    }

    #[test]
    fn plain_text_merges_adjacent_text() {
        let codec = sample_codec(CodecConfig::default());
        let mut host = Node::element("div", Vec::new());
        if let Some(children) = host.children_mut() {
            *children = parse_fragment("x ");
            children.push(codec.emoji_node(0).expect("node"));
            children.push(Node::text(" y"));
        }
        assert_eq!(codec.to_plain_text(&mut host), 1);
        assert_eq!(host.children().map(<[Node]>::len), Some(1));
        assert_eq!(host.text_content(), "x :grinning-face: y");
    }

    #[test]
    fn input_fields_are_refused_untouched() {
        let codec = sample_codec(CodecConfig::default());
        let mut input = Node::element("input", vec![("value".to_string(), Some("😀".to_string()))]);
        let before = input.clone();
        assert_eq!(codec.to_markup(&mut input), Err(CodecError::InputField));
        assert_eq!(codec.convert(&mut input), Err(CodecError::InputField));
        assert_eq!(input, before);
    }

    #[test]
    fn script_contents_are_not_converted() {
        let codec = sample_codec(CodecConfig::default());
        let out = codec.render_html("<script>let a = ':grinning-face:';</script>");
        assert_eq!(out.as_deref(), Ok("<script>let a = ':grinning-face:';</script>"));
    }

    #[test]
    fn shorthand_text_keeps_plain_text() {
        let codec = sample_codec(CodecConfig::default());
        assert_eq!(
            codec.to_shorthand_text("nice 👍 <3"),
            "nice :thumbs-up: :red-heart:"
        );
    }
}
