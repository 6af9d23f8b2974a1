//! Emoji-enabled regions on a document.
//!
//! [`Page`] discovers readonly and editable regions and picker buttons by class, converts
//! their content once the catalog is attached, tracks carets across rewrites, and inserts
//! picked emoji. Everything the host would do in a browser (focus, clicks, mutations) is
//! reported to the page as plain method calls.

pub mod caret;
pub mod insert;
pub mod panel;

mod config;
mod error;
mod loader;
mod page;

pub use config::PageConfig;
pub use error::{LoadError, PageError};
pub use insert::InsertOutcome;
pub use loader::{
    AssetLoader, BUTTON_ICON_HOVER, BUTTON_ICON_IDLE, CatalogLoader, IconPair, spawn_load,
};
pub use page::{
    EDITABLE_INPUT_CLASS, PICKER_BUTTON_CLASS, Page, PickerButton, Region, RegionKind,
    SelectionChange,
};
pub use panel::{Placement, PickerPanel, Rect, Tab, Viewport};
