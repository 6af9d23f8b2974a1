//! Dataset records: the raw OpenMoji JSON shape and the immutable catalog entry built from it.

use serde::{Deserialize, Deserializer};

/// One entry of the OpenMoji dataset as found on disk. Unknown fields are ignored.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RawEmoji {
    pub annotation: String,
    #[serde(default)]
    pub emoji: Option<String>,
    pub hexcode: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub group: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub subgroups: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub skintone_base_emoji: String,
    #[serde(default, deserialize_with = "tag_list")]
    pub tags: Vec<String>,
}

fn nullable_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// OpenMoji ships tags as `"face, grin"`; some exports use a JSON array.
fn tag_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        Csv(String),
        List(Vec<String>),
    }

    Ok(match Option::<Tags>::deserialize(d)? {
        Some(Tags::Csv(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Tags::List(list)) => list,
        None => Vec::new(),
    })
}

/// Catalog entry. Never mutated once the catalog is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmojiRecord {
    pub annotation: String,
    /// Unicode glyph; `None` for records reachable only through their shorthand.
    pub emoji: Option<String>,
    pub hexcode: String,
    pub group: String,
    pub subgroup: String,
    /// Glyph of the skin-tone-neutral variant; empty when this record is itself the base.
    pub skintone_base_emoji: String,
    pub tags: Vec<String>,
    shorthand: String,
}

impl EmojiRecord {
    pub fn from_raw(raw: RawEmoji) -> Self {
        let shorthand = shorthand_for(&raw.annotation);
        Self {
            annotation: raw.annotation,
            emoji: raw.emoji.filter(|g| !g.is_empty()),
            hexcode: raw.hexcode,
            group: raw.group,
            subgroup: raw.subgroups,
            skintone_base_emoji: raw.skintone_base_emoji,
            tags: raw.tags,
            shorthand,
        }
    }

    /// `:annotation:` token, e.g. `:grinning-face:`.
    pub fn shorthand(&self) -> &str {
        &self.shorthand
    }

    pub fn glyph(&self) -> Option<&str> {
        self.emoji.as_deref()
    }

    pub fn is_base(&self) -> bool {
        self.skintone_base_emoji.is_empty()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Key of the skin-tone cluster this record belongs to.
    pub fn cluster_key(&self) -> &str {
        if !self.skintone_base_emoji.is_empty() {
            &self.skintone_base_emoji
        } else if let Some(glyph) = self.glyph() {
            glyph
        } else {
            &self.shorthand
        }
    }

    /// Rename the record and unmap its glyph so it is only reachable via the new shorthand.
    /// The glyph is kept as the cluster key so the record stays next to its look-alike.
    pub(crate) fn disambiguate(&mut self, annotation: String) {
        self.shorthand = shorthand_for(&annotation);
        self.annotation = annotation;
        let glyph = self.emoji.take();
        if self.skintone_base_emoji.is_empty() {
            self.skintone_base_emoji = glyph.unwrap_or_default();
        }
    }
}

/// Shorthand token for an annotation: lower-cased, spaces to `-`, colons dropped, wrapped in `:`.
pub fn shorthand_for(annotation: &str) -> String {
    let mut out = String::with_capacity(annotation.len() + 2);
    out.push(':');
    for ch in annotation.chars() {
        match ch {
            ' ' => out.push('-'),
            ':' => {}
            c => out.extend(c.to_lowercase()),
        }
    }
    out.push(':');
    out
}
