//! Text fetching for datasets, stylesheets and SVG assets.

mod error;
mod source;

pub use error::NetError;
pub use source::{HttpSource, Location, MemorySource, TextSource};
