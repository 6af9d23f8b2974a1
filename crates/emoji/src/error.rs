use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed emoji dataset: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Single-line `<input>` fields cannot hold markup; use a contenteditable region.
    #[error("cannot convert text to emojis within an <input> field; use contenteditable instead")]
    InputField,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("configuration option `{0}` must not be empty")]
    Empty(&'static str),
}
