//! Emoji catalog: records in dataset order, display groups, and lookup indices.
//!
//! Building is a pure function of the dataset. Two builds over the same input yield the
//! same record order, group order, cluster order and membership.

use std::collections::HashMap;

use log::debug;

use crate::error::CatalogError;
use crate::record::{EmojiRecord, RawEmoji};

const DEFAULT_GROUP_ICON: &str = "1F990";

/// All skin-tone variants of one conceptual emoji. The base variant comes first when present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cluster {
    base: String,
    members: Vec<usize>,
}

impl Cluster {
    /// Cluster key: base glyph, falling back to the record glyph, then to its shorthand.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Record indices into [`Catalog::records`].
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// The record shown for the whole cluster in a picker. Every catalog cluster is created
    /// with its first member, so this is always `Some` there.
    pub fn primary(&self) -> Option<usize> {
        self.members.first().copied()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    name: String,
    icon: &'static str,
    clusters: Vec<Cluster>,
}

impl Group {
    fn new(name: String) -> Self {
        let icon = group_icon(&name);
        Self {
            name,
            icon,
            clusters: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hexcode of the representative tab icon.
    pub fn icon(&self) -> &str {
        self.icon
    }

    /// Number of distinct base emoji.
    pub fn count(&self) -> usize {
        self.clusters.len()
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Tab title, e.g. `smileys & people`.
    pub fn display_title(&self) -> String {
        self.name.replacen('-', " & ", 1)
    }

    pub fn alt_text(&self) -> String {
        format!(
            "Select emoji category: {}",
            self.name.replacen('-', " and ", 1)
        )
    }

    fn push(&mut self, key: &str, index: usize, is_base: bool, slots: &mut HashMap<String, usize>) {
        match slots.get(key) {
            Some(&slot) => {
                let members = &mut self.clusters[slot].members;
                if is_base {
                    members.insert(0, index);
                } else {
                    members.push(index);
                }
            }
            None => {
                slots.insert(key.to_string(), self.clusters.len());
                self.clusters.push(Cluster {
                    base: key.to_string(),
                    members: vec![index],
                });
            }
        }
    }
}

/// Indexed emoji dataset. Built once, then shared read-only (typically behind an `Arc`).
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    records: Vec<EmojiRecord>,
    groups: Vec<Group>,
    by_shorthand: HashMap<String, usize>,
    by_glyph: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawEmoji> = serde_json::from_str(json)?;
        Ok(Self::build(raw))
    }

    pub fn build(raw: Vec<RawEmoji>) -> Self {
        let mut records = Vec::with_capacity(raw.len());
        let mut by_shorthand: HashMap<String, usize> = HashMap::with_capacity(raw.len());

        for item in raw {
            let mut record = EmojiRecord::from_raw(item);
            if record.annotation == "white flag" && !record.has_tag("waving") {
                record.disambiguate("flat white flag".to_string());
            }
            if by_shorthand.contains_key(record.shorthand()) {
                let renamed = format!(
                    "{} {}",
                    record.annotation,
                    record.hexcode.to_ascii_lowercase()
                );
                debug!(
                    target: "emoji.catalog",
                    "duplicate shorthand {} ({}), renamed to {renamed:?}",
                    record.shorthand(),
                    record.hexcode
                );
                record.disambiguate(renamed);
            }
            by_shorthand
                .entry(record.shorthand().to_string())
                .or_insert(records.len());
            records.push(record);
        }

        let mut groups: Vec<Group> = Vec::new();
        let mut group_slots: HashMap<String, usize> = HashMap::new();
        let mut cluster_slots: Vec<HashMap<String, usize>> = Vec::new();
        let mut by_glyph = HashMap::new();

        for (index, record) in records.iter().enumerate() {
            let name = normalize_group(&record.group, &record.subgroup);
            let slot = match group_slots.get(&name) {
                Some(&slot) => slot,
                None => {
                    group_slots.insert(name.clone(), groups.len());
                    groups.push(Group::new(name));
                    cluster_slots.push(HashMap::new());
                    groups.len() - 1
                }
            };
            groups[slot].push(
                record.cluster_key(),
                index,
                record.is_base(),
                &mut cluster_slots[slot],
            );
            if let Some(glyph) = record.glyph() {
                by_glyph.insert(glyph.to_string(), index);
            }
        }

        debug!(
            target: "emoji.catalog",
            "loaded {} records into {} groups",
            records.len(),
            groups.len()
        );

        Self {
            records,
            groups,
            by_shorthand,
            by_glyph,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, index: usize) -> Option<&EmojiRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[EmojiRecord] {
        &self.records
    }

    /// Groups in first-seen order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn by_shorthand(&self, shorthand: &str) -> Option<usize> {
        self.by_shorthand.get(shorthand).copied()
    }

    /// Record that the codec renders for `glyph`. With duplicate glyphs the later record wins,
    /// matching the reverse sweep order of the codec.
    pub fn by_glyph(&self, glyph: &str) -> Option<usize> {
        self.by_glyph.get(glyph).copied()
    }
}

/// Collapse the raw taxonomy into display groups.
pub fn normalize_group(group: &str, subgroup: &str) -> String {
    // marine food is listed with animals
    let group = if group == "food-drink" && subgroup == "food-marine" {
        "animals-nature"
    } else {
        group
    };
    let name = match group {
        "smileys-emotion" | "people-body" | "component" => "smileys-people",
        "extras-openmoji" | "extras-unicode" => match subgroup {
            "smileys-emotion" => "smileys-people",
            "brand" | "interaction" | "symbol-other" | "ui-element" => "symbols",
            "climate-environment" => "animals-nature",
            "emergency" | "gardening" | "healthcare" | "people" => "activities",
            "subdivision-flag" => "flags",
            "technology" => "objects",
            other => other,
        },
        other => other,
    };
    name.to_string()
}

/// Representative tab icon for a display group; unknown groups get the shrimp.
pub fn group_icon(name: &str) -> &'static str {
    match name {
        "activities" => "1F3C0",
        "animals-nature" => "1FAB4",
        "flags" => "1F6A9",
        "food-drink" => "1FAD0",
        "objects" => "1F4A1",
        "smileys-people" => "1F604",
        "symbols" => "267B",
        "travel-places" => "1F6E9",
        _ => DEFAULT_GROUP_ICON,
    }
}
