//! OpenMoji catalog and text/markup codec.
//!
//! - [`Catalog`]: the dataset indexed into display groups and skin-tone clusters
//! - [`Codec`]: glyph / `:shorthand:` / emoticon conversion to and from rendered `<img>` nodes
//! - [`AssetPaths`]: where the SVG renditions live

mod assets;
mod catalog;
mod codec;
mod config;
mod emoticons;
mod error;
mod record;
mod replace;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use assets::{AssetPaths, Palette};
pub use catalog::{Catalog, Cluster, Group, group_icon, normalize_group};
pub use codec::{Codec, EMOJI_CLASS, SMALLER_CLASS};
pub use config::{CodecConfig, ensure_trailing_slash};
pub use emoticons::{emoticon_table, emoticons_to_shorthands};
pub use error::{CatalogError, CodecError, ConfigError};
pub use record::{EmojiRecord, RawEmoji, shorthand_for};
