//! Picker panel state: visibility, placement relative to its button, and the active tab.

use std::fmt;

use emoji::{Catalog, Cluster};

use crate::loader::IconPair;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn center(&self) -> (f32, f32) {
        (
            self.left + self.width.abs() / 2.0,
            self.top + self.height.abs() / 2.0,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vertical {
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

/// Which side of the viewport the button sits on, named the way the stylesheet's `from`
/// attribute expects: a button in the upper-left quarter gives `top-left`, and the panel grows
/// from there towards the free space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

impl Placement {
    pub fn compute(origin: Rect, viewport: Viewport) -> Self {
        let (x, y) = origin.center();
        let vertical = if y < viewport.height / 2.0 {
            Vertical::Top
        } else {
            Vertical::Bottom
        };
        let horizontal = if x < viewport.width / 2.0 {
            Horizontal::Left
        } else {
            Horizontal::Right
        };
        Self {
            vertical,
            horizontal,
        }
    }

    /// Class-style name, e.g. `bottom-right`.
    pub fn as_str(&self) -> &'static str {
        match (self.vertical, self.horizontal) {
            (Vertical::Top, Horizontal::Left) => "top-left",
            (Vertical::Top, Horizontal::Right) => "top-right",
            (Vertical::Bottom, Horizontal::Left) => "bottom-left",
            (Vertical::Bottom, Horizontal::Right) => "bottom-right",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One category tab.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tab {
    pub title: String,
    pub alt: String,
    /// Hexcode of the tab icon.
    pub icon: String,
    /// Fetched icon documents; empty until loaded.
    pub icons: IconPair,
    pub selected: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PickerPanel {
    shown: bool,
    placement: Option<Placement>,
    selected_group: usize,
}

impl PickerPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Placement computed by the last [`PickerPanel::show`].
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn selected_group(&self) -> usize {
        self.selected_group
    }

    pub fn show(&mut self, origin: Rect, viewport: Viewport) {
        self.placement = Some(Placement::compute(origin, viewport));
        self.shown = true;
    }

    pub fn hide(&mut self) {
        self.shown = false;
    }

    /// Returns whether the panel is shown afterwards.
    pub fn toggle(&mut self, origin: Rect, viewport: Viewport) -> bool {
        if self.shown {
            self.hide();
        } else {
            self.show(origin, viewport);
        }
        self.shown
    }

    /// Switch to the tab at `index`. Out-of-range indices are ignored.
    pub fn select_group(&mut self, index: usize, catalog: &Catalog) -> bool {
        if index >= catalog.groups().len() {
            return false;
        }
        self.selected_group = index;
        true
    }

    /// One tab per catalog group. `icons` is indexed like the groups.
    pub fn tabs(&self, catalog: &Catalog, icons: &[IconPair]) -> Vec<Tab> {
        catalog
            .groups()
            .iter()
            .enumerate()
            .map(|(i, group)| Tab {
                title: group.display_title(),
                alt: group.alt_text(),
                icon: group.icon().to_string(),
                icons: icons.get(i).cloned().unwrap_or_default(),
                selected: i == self.selected_group,
            })
            .collect()
    }

    /// Record indices listed in the selected tab: the first record of each cluster.
    pub fn entries(&self, catalog: &Catalog) -> Vec<usize> {
        catalog
            .groups()
            .get(self.selected_group)
            .map(|group| group.clusters().iter().filter_map(Cluster::primary).collect())
            .unwrap_or_default()
    }
}
