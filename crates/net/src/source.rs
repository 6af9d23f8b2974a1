//! Where text comes from: HTTP(S), local files, or an in-memory table.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use log::debug;
use url::Url;

use crate::NetError;

const TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "openmoji-picker/0.1";

/// Fetch a whole text resource by location.
pub trait TextSource: Send + Sync {
    fn fetch_text(&self, location: &str) -> Result<String, NetError>;
}

/// A location resolved against a [`HttpSource`]'s base.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    Remote(Url),
    File(PathBuf),
}

/// `http(s)://` via `ureq`, `file://` and bare paths via the filesystem.
///
/// Relative locations are joined onto the base URL when one is set, otherwise they are read
/// as paths relative to the working directory.
pub struct HttpSource {
    agent: ureq::Agent,
    base: Option<Url>,
}

impl HttpSource {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(TIMEOUT)
            .user_agent(USER_AGENT)
            .build();
        Self { agent, base: None }
    }

    pub fn with_base(base: &str) -> Result<Self, NetError> {
        let base = Url::parse(base).map_err(|source| NetError::InvalidLocation {
            location: base.to_string(),
            source,
        })?;
        Ok(Self {
            base: Some(base),
            ..Self::new()
        })
    }

    pub fn resolve(&self, location: &str) -> Result<Location, NetError> {
        let url = match Url::parse(location) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base {
                Some(base) => base.join(location).map_err(|source| NetError::InvalidLocation {
                    location: location.to_string(),
                    source,
                })?,
                None => return Ok(Location::File(PathBuf::from(location))),
            },
            Err(source) => {
                return Err(NetError::InvalidLocation {
                    location: location.to_string(),
                    source,
                });
            }
        };
        match url.scheme() {
            "http" | "https" => Ok(Location::Remote(url)),
            "file" => url
                .to_file_path()
                .map(Location::File)
                .map_err(|_| NetError::UnsupportedScheme {
                    scheme: "file".to_string(),
                    url,
                }),
            scheme => Err(NetError::UnsupportedScheme {
                scheme: scheme.to_string(),
                url,
            }),
        }
    }

    fn get(&self, url: &Url) -> Result<String, NetError> {
        match self.agent.get(url.as_str()).call() {
            Ok(resp) => {
                let status = resp.status();
                let body = resp.into_string().map_err(|e| NetError::Transport {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
                debug!(target: "net", "GET {url} -> {status} ({} bytes)", body.len());
                Ok(body)
            }
            Err(ureq::Error::Status(status, _)) => Err(NetError::Status {
                url: url.to_string(),
                status,
            }),
            Err(e) => Err(NetError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for HttpSource {
    fn fetch_text(&self, location: &str) -> Result<String, NetError> {
        match self.resolve(location)? {
            Location::Remote(url) => self.get(&url),
            Location::File(path) => {
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| NetError::Io { path: path.clone(), source })?;
                debug!(target: "net", "read {} ({} bytes)", path.display(), text.len());
                Ok(text)
            }
        }
    }
}

/// Fixed table of locations, counting every fetch. Useful for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySource {
    entries: Mutex<HashMap<String, String>>,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, location: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(location, text);
        self
    }

    pub fn insert(&self, location: impl Into<String>, text: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(location.into(), text.into());
    }

    /// Number of `fetch_text` calls so far, successful or not.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Acquire)
    }
}

impl TextSource for MemorySource {
    fn fetch_text(&self, location: &str) -> Result<String, NetError> {
        self.fetches.fetch_add(1, Ordering::AcqRel);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(location)
            .cloned()
            .ok_or_else(|| NetError::NotFound(location.to_string()))
    }
}
