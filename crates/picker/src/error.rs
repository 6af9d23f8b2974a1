use emoji::{CatalogError, CodecError, ConfigError};
use input_core::RegionId;
use net::NetError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("{0} is not an editable region of this page")]
    UnknownRegion(RegionId),
    #[error("no emoji with index {0} in the catalog")]
    UnknownEmoji(usize),
    #[error("the emoji catalog has not been loaded yet")]
    CatalogPending,
    #[error("picker button {0} is not attached to an editable region")]
    UnboundButton(usize),
    #[error("input element of {0} is no longer in the document")]
    MissingInput(RegionId),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Net(#[from] NetError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
