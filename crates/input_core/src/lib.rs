//! # input_core
//!
//! UI-agnostic caret and region-state layer for emoji-enabled editable regions.
//!
//! - [`RegionId`]: opaque identifier for a tracked region
//! - [`CaretSelection`]: logical caret position, expressed against a tagged element
//! - [`CaretStore`]: per-region caret storage plus the `Idle`/`Converting` phase machine
//!
//! This crate does not depend on the DOM crate; integration layers translate their
//! selection model into a [`CaretSelection`] and report conversions to the store.

mod id;
mod selection;
mod state;
mod store;
mod text;

pub use id::RegionId;
pub use selection::CaretSelection;
pub use state::RegionPhase;
pub use store::CaretStore;

pub use text::split_at_char_offset;
