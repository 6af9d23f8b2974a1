//! A document with emoji-enabled regions bound to it.
//!
//! Region lifecycle: `idle -> converting -> idle`. Regions start out converting and stay
//! there until a catalog is attached, so content is never rewritten twice concurrently and
//! notifications arriving in the meantime are dropped.

use std::sync::Arc;

use emoji::{Catalog, Codec};
use html::{Document, Id, Node, outer_html};
use input_core::{CaretSelection, CaretStore, RegionId, RegionPhase};
use log::{debug, error, trace, warn};
use net::TextSource;

use crate::caret::capture_selection;
use crate::config::PageConfig;
use crate::error::{LoadError, PageError};
use crate::insert::{self, InsertOutcome};
use crate::loader::{AssetLoader, IconPair};
use crate::panel::{PickerPanel, Rect, Tab, Viewport};

/// Class of the element an editable region's content is moved into.
pub const EDITABLE_INPUT_CLASS: &str = "openmoji-editable-input";
pub const PICKER_BUTTON_CLASS: &str = "openmoji-picker-button";
const PICKER_BUTTON_LABEL: &str = "Insert emoji";

/// A selection change reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionChange {
    pub focus: Id,
    /// Offset within `focus`: characters for text, a child index for elements.
    pub offset: usize,
    /// The document body is the active element, i.e. nothing is focused.
    pub body_active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionKind {
    Readonly,
    Editable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    id: RegionId,
    kind: RegionKind,
    host: Id,
    input: Id,
    input_dom_id: Option<String>,
}

impl Region {
    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    /// The element carrying the region class.
    pub fn host(&self) -> Id {
        self.host
    }

    /// The element whose content is converted. Same as the host for readonly regions.
    pub fn input(&self) -> Id {
        self.input
    }

    pub fn input_dom_id(&self) -> Option<&str> {
        self.input_dom_id.as_deref()
    }
}

#[derive(Clone, Debug)]
pub struct PickerButton {
    element: Id,
    host: Id,
    region: Option<RegionId>,
    panel: Option<PickerPanel>,
    icons: IconPair,
}

impl PickerButton {
    pub fn element(&self) -> Id {
        self.element
    }

    pub fn host(&self) -> Id {
        self.host
    }

    /// The editable region emoji picked here go to.
    pub fn region(&self) -> Option<RegionId> {
        self.region
    }

    /// Created on the first click.
    pub fn panel(&self) -> Option<&PickerPanel> {
        self.panel.as_ref()
    }

    pub fn icons(&self) -> &IconPair {
        &self.icons
    }
}

pub struct Page {
    doc: Document,
    config: PageConfig,
    codec: Option<Codec>,
    regions: Vec<Region>,
    carets: CaretStore,
    buttons: Vec<PickerButton>,
    /// Per catalog group, shared by every panel.
    tab_icons: Vec<IconPair>,
    next_input: usize,
}

impl Page {
    /// Validate `config` and bind every readonly, editable and picker element of `doc`.
    pub fn new(doc: Document, config: PageConfig) -> Result<Self, PageError> {
        let config = config.validate()?;
        let mut page = Self {
            doc,
            config,
            codec: None,
            regions: Vec::new(),
            carets: CaretStore::new(),
            buttons: Vec::new(),
            tab_icons: Vec::new(),
            next_input: 0,
        };

        for host in page.doc.elements_by_class(&page.config.readonly_class_name) {
            page.bind_readonly(host);
        }
        for host in page.doc.elements_by_class(&page.config.editable_class_name) {
            page.bind_editable(host);
        }
        for host in page.doc.elements_by_class(&page.config.picker_mixin_class_name) {
            page.bind_picker(host);
        }
        debug!(
            target: "picker.page",
            "bound {} regions and {} picker buttons",
            page.regions.len(),
            page.buttons.len()
        );
        Ok(page)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Direct access for host-side edits. Report them through [`Page::mutated`].
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn html(&self) -> String {
        outer_html(self.doc.root())
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn codec(&self) -> Option<&Codec> {
        self.codec.as_ref()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn region_for_host(&self, host: Id) -> Option<&Region> {
        self.regions.iter().find(|r| r.host == host)
    }

    pub fn phase(&self, id: RegionId) -> Option<RegionPhase> {
        self.carets.phase(id)
    }

    pub fn caret(&self, id: RegionId) -> Option<&CaretSelection> {
        self.carets.caret(id)
    }

    pub fn buttons(&self) -> &[PickerButton] {
        &self.buttons
    }

    /// Inner HTML of the region's input element.
    pub fn text_value(&self, id: RegionId) -> Option<String> {
        self.doc.inner_html(self.region(id)?.input)
    }

    fn refuse_input(&self, host: Id) -> bool {
        let is_input = self
            .doc
            .get(host)
            .is_some_and(|n| n.is_element_named("input"));
        if is_input {
            error!(target: "picker.page", "{}", PageError::Codec(emoji::CodecError::InputField));
        }
        is_input
    }

    fn register(&mut self, region: Region) {
        self.carets.register(region.id);
        // pending until a catalog is attached
        self.carets.begin_conversion(region.id);
        trace!(target: "picker.page", "registered {} ({:?})", region.id, region.kind);
        self.regions.push(region);
    }

    fn bind_readonly(&mut self, host: Id) {
        if self.refuse_input(host) || self.region_for_host(host).is_some() {
            return;
        }
        self.register(Region {
            id: RegionId::from(host.0),
            kind: RegionKind::Readonly,
            host,
            input: host,
            input_dom_id: None,
        });
    }

    fn fresh_input_dom_id(&mut self) -> String {
        loop {
            self.next_input += 1;
            let candidate = format!("{EDITABLE_INPUT_CLASS}-{}", self.next_input);
            if self.doc.element_by_dom_id(&candidate).is_none() {
                return candidate;
            }
        }
    }

    /// Move the host's content into a fresh contenteditable child.
    fn bind_editable(&mut self, host: Id) {
        if self.refuse_input(host) || self.region_for_host(host).is_some() {
            return;
        }
        let dom_id = self.fresh_input_dom_id();
        let Some(node) = self.doc.get_mut(host) else {
            return;
        };
        node.remove_attr("contenteditable");
        let Some(children) = node.children_mut() else {
            return;
        };
        let content = std::mem::take(children);

        let mut input = Node::element(
            "div",
            vec![
                ("class".to_string(), Some(EDITABLE_INPUT_CLASS.to_string())),
                ("id".to_string(), Some(dom_id.clone())),
                ("contenteditable".to_string(), Some("true".to_string())),
            ],
        );
        if let Some(slot) = input.children_mut() {
            *slot = content;
        }
        let Some(input) = self.doc.append_child(host, input) else {
            return;
        };
        self.register(Region {
            id: RegionId::from(host.0),
            kind: RegionKind::Editable,
            host,
            input,
            input_dom_id: Some(dom_id),
        });
    }

    fn bind_picker(&mut self, host: Id) {
        if self.refuse_input(host) {
            return;
        }
        let editable = || self.regions.iter().filter(|r| r.kind == RegionKind::Editable);
        let region = editable()
            .find(|r| r.host == host)
            .or_else(|| editable().find(|r| self.doc.is_descendant(r.host, host)))
            .or_else(|| editable().find(|r| self.doc.is_descendant(host, r.host)))
            .map(|r| r.id);
        if region.is_none() {
            warn!(target: "picker.page", "picker button on {host:?} has no editable region");
        }

        let button = Node::element(
            "div",
            vec![
                ("class".to_string(), Some(PICKER_BUTTON_CLASS.to_string())),
                ("title".to_string(), Some(PICKER_BUTTON_LABEL.to_string())),
                ("alt".to_string(), Some(PICKER_BUTTON_LABEL.to_string())),
            ],
        );
        let Some(element) = self.doc.append_child(host, button) else {
            return;
        };
        self.buttons.push(PickerButton {
            element,
            host,
            region,
            panel: None,
            icons: IconPair::default(),
        });
    }

    /// Attach the loaded catalog and convert every region still waiting for it.
    /// Returns how many regions changed.
    pub fn attach_catalog(&mut self, catalog: Arc<Catalog>) -> usize {
        self.codec = Some(Codec::new(catalog, self.config.codec.clone()));
        // indexed by the previous catalog's groups
        self.tab_icons.clear();
        let mut changed = 0;
        for id in self.carets.converting() {
            let Some(input) = self.region(id).map(|r| r.input) else {
                continue;
            };
            if self.run_conversion(id, input) {
                changed += 1;
            }
        }
        debug!(target: "picker.page", "catalog attached, {changed} regions rewritten");
        changed
    }

    /// Rewrite a converting region and return it to idle. Without a codec the region stays
    /// converting.
    fn run_conversion(&mut self, id: RegionId, input: Id) -> bool {
        let Some(codec) = self.codec.as_ref() else {
            debug!(target: "picker.page", "{id} waits for the catalog");
            return false;
        };
        let changed = match self.doc.get_mut(input) {
            Some(node) => match codec.convert(node) {
                Ok(changed) => changed,
                Err(err) => {
                    error!(target: "picker.page", "{id}: {err}");
                    false
                }
            },
            None => {
                warn!(target: "picker.page", "{id}: input element is gone");
                false
            }
        };
        self.doc.adopt(input);
        self.carets.finish_conversion(id, changed);
        trace!(target: "picker.page", "{id} converted (changed: {changed})");
        changed
    }

    fn reconvert(&mut self, id: RegionId) -> bool {
        let Some(input) = self.region(id).map(|r| r.input) else {
            return false;
        };
        if !self.carets.begin_conversion(id) {
            return false;
        }
        self.run_conversion(id, input)
    }

    /// Innermost region of `kind` whose input contains `node`.
    fn innermost(&self, node: Id, kind: RegionKind) -> Option<RegionId> {
        self.regions
            .iter()
            .filter(|r| r.kind == kind && self.doc.is_descendant(node, r.input))
            .max_by_key(|r| self.doc.ancestry(r.input).len())
            .map(|r| r.id)
    }

    /// Content under `target` changed. Reconverts the readonly region containing it, unless
    /// that region is busy. Returns whether the content was rewritten.
    pub fn mutated(&mut self, target: Id) -> bool {
        let Some(id) = self.innermost(target, RegionKind::Readonly) else {
            return false;
        };
        if !self.carets.accepts_notifications(id) {
            trace!(target: "picker.page", "{id} is converting, mutation dropped");
            return false;
        }
        self.reconvert(id)
    }

    /// The editable region lost focus: convert what was typed.
    pub fn blurred(&mut self, id: RegionId) -> Result<bool, PageError> {
        match self.region(id) {
            Some(r) if r.kind == RegionKind::Editable => Ok(self.reconvert(id)),
            _ => Err(PageError::UnknownRegion(id)),
        }
    }

    /// Record the caret of the editable region containing the focus node.
    /// Returns the region the selection was recorded for.
    pub fn selection_changed(&mut self, change: SelectionChange) -> Option<RegionId> {
        if change.body_active {
            return None;
        }
        let id = self.innermost(change.focus, RegionKind::Editable)?;
        if !self.carets.accepts_notifications(id) {
            trace!(target: "picker.page", "{id} is converting, selection dropped");
            return None;
        }
        let region = self.region(id)?;
        let input = region.input;
        let dom_id = region.input_dom_id.clone()?;
        let caret = capture_selection(&mut self.doc, input, &dom_id, change.focus, change.offset)?;
        trace!(
            target: "picker.page",
            "{id} caret at {}[{}]+{}",
            caret.anchor_element_id,
            caret.child_offset,
            caret.character_offset
        );
        self.carets.record(id, caret).then_some(id)
    }

    /// Insert catalog record `index` into an editable region at its caret (or at the end),
    /// then forget the caret and close the region's picker.
    pub fn insert_emoji(&mut self, id: RegionId, index: usize) -> Result<InsertOutcome, PageError> {
        let codec = self.codec.as_ref().ok_or(PageError::CatalogPending)?;
        let input = match self.region(id) {
            Some(r) if r.kind == RegionKind::Editable => r.input,
            _ => return Err(PageError::UnknownRegion(id)),
        };
        let node = codec.emoji_node(index).ok_or(PageError::UnknownEmoji(index))?;
        let caret = self.carets.take(id);
        let outcome = insert::insert_emoji(&mut self.doc, input, caret.as_ref(), node)
            .ok_or(PageError::MissingInput(id))?;

        for button in self.buttons.iter_mut().filter(|b| b.region == Some(id)) {
            if let Some(panel) = button.panel.as_mut() {
                panel.hide();
            }
        }
        debug!(target: "picker.page", "{id}: inserted emoji {index} ({outcome:?})");
        Ok(outcome)
    }

    /// Toggle the panel of picker button `button`. Returns whether it is shown afterwards.
    pub fn click_picker_button(&mut self, button: usize, origin: Rect, viewport: Viewport) -> Option<bool> {
        let panel = self.buttons.get_mut(button)?.panel.get_or_insert_with(PickerPanel::new);
        Some(panel.toggle(origin, viewport))
    }

    /// Switch the tab of picker button `button`'s panel.
    pub fn select_group(&mut self, button: usize, group: usize) -> bool {
        let Some(codec) = self.codec.as_ref() else {
            return false;
        };
        let catalog = codec.catalog();
        self.buttons
            .get_mut(button)
            .and_then(|b| b.panel.as_mut())
            .is_some_and(|panel| panel.select_group(group, catalog))
    }

    /// Records listed in the open tab of picker button `button`.
    pub fn panel_entries(&self, button: usize) -> Vec<usize> {
        match (self.codec.as_ref(), self.buttons.get(button).and_then(|b| b.panel.as_ref())) {
            (Some(codec), Some(panel)) => panel.entries(codec.catalog()),
            _ => Vec::new(),
        }
    }

    /// Tabs of picker button `button`'s panel; empty until the panel has been opened.
    pub fn panel_tabs(&self, button: usize) -> Vec<Tab> {
        match (self.codec.as_ref(), self.buttons.get(button).and_then(|b| b.panel.as_ref())) {
            (Some(codec), Some(panel)) => panel.tabs(codec.catalog(), &self.tab_icons),
            _ => Vec::new(),
        }
    }

    /// An emoji was picked in the panel of `button`.
    pub fn pick(&mut self, button: usize, index: usize) -> Result<InsertOutcome, PageError> {
        let region = self
            .buttons
            .get(button)
            .and_then(|b| b.region)
            .ok_or(PageError::UnboundButton(button))?;
        self.insert_emoji(region, index)
    }

    /// A click reached the document. Panels whose button was not clicked are hidden; clicks
    /// inside a panel are handled by the panel and never get here.
    pub fn document_clicked(&mut self, target: Id) {
        let doc = &self.doc;
        for button in &mut self.buttons {
            let Some(panel) = button.panel.as_mut() else {
                continue;
            };
            if panel.is_shown() && !doc.is_descendant(target, button.element) {
                panel.hide();
            }
        }
    }

    /// Fill every picker button with its icons. Buttons stay empty (but clickable) when an
    /// icon is missing. Returns how many buttons got icons.
    pub fn load_button_icons(&mut self, assets: &AssetLoader) -> usize {
        if self.buttons.is_empty() {
            return 0;
        }
        let icons = assets.button_icons();
        let markup = icons.markup();
        let mut filled = 0;
        for button in &mut self.buttons {
            button.icons = icons.clone();
            if let Some(markup) = markup.as_deref() {
                if self.doc.set_inner_html(button.element, markup) {
                    filled += 1;
                }
            }
        }
        filled
    }

    /// Fetch the mono and colour icon of every catalog group for the panel tabs. Tabs whose
    /// icons are missing keep their title. Returns how many tabs got both icons.
    pub fn load_tab_icons(&mut self, assets: &AssetLoader) -> Result<usize, PageError> {
        let codec = self.codec.as_ref().ok_or(PageError::CatalogPending)?;
        self.tab_icons = codec
            .catalog()
            .groups()
            .iter()
            .map(|group| assets.tab_icons(group))
            .collect();
        let complete = self.tab_icons.iter().filter(|icons| icons.is_complete()).count();
        debug!(
            target: "picker.page",
            "{complete} of {} tab icon pairs loaded",
            self.tab_icons.len()
        );
        Ok(complete)
    }

    /// Append `css` as a `<style>` to the head (or the document root when there is none).
    pub fn inject_stylesheet(&mut self, css: &str) -> bool {
        if !self.config.inject_styles {
            return false;
        }
        let parent = self
            .doc
            .first_element_named("head")
            .unwrap_or_else(|| self.doc.root_id());
        let mut style = Node::element("style", Vec::new());
        if let Some(children) = style.children_mut() {
            children.push(Node::text(css));
        }
        self.doc.append_child(parent, style).is_some()
    }

    /// Fetch the configured stylesheet and inject it.
    pub fn load_stylesheet(&mut self, source: &dyn TextSource) -> Result<bool, LoadError> {
        if !self.config.inject_styles {
            return Ok(false);
        }
        let css = source.fetch_text(&self.config.css_url)?;
        Ok(self.inject_stylesheet(&css))
    }
}
