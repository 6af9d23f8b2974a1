use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("invalid location {location:?}: {source}")]
    InvalidLocation {
        location: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported scheme '{scheme}' in {url}")]
    UnsupportedScheme { scheme: String, url: url::Url },

    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("GET {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("unable to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("nothing stored for {0}")]
    NotFound(String),
}
