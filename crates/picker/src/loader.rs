//! Dataset and SVG asset loading.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use emoji::{AssetPaths, Catalog, Group, Palette};
use log::{debug, warn};
use net::TextSource;
use once_cell::sync::OnceCell;

use crate::error::LoadError;

/// Hexcodes of the picker button icons: shown idle and on hover.
pub const BUTTON_ICON_IDLE: &str = "1F60A";
pub const BUTTON_ICON_HOVER: &str = "1F604";

/// Loads the emoji dataset once and shares it.
///
/// The first successful load is kept for the lifetime of the loader; callers racing it wait
/// for that load instead of starting their own. A failed load is not kept, so the next caller
/// tries again.
pub struct CatalogLoader {
    source: Arc<dyn TextSource>,
    location: String,
    catalog: OnceCell<Arc<Catalog>>,
}

impl CatalogLoader {
    pub fn new(source: Arc<dyn TextSource>, location: impl Into<String>) -> Self {
        Self {
            source,
            location: location.into(),
            catalog: OnceCell::new(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn get(&self) -> Result<Arc<Catalog>, LoadError> {
        self.catalog
            .get_or_try_init(|| {
                let started = Instant::now();
                let json = self.source.fetch_text(&self.location)?;
                let catalog = Catalog::from_json(&json)?;
                debug!(
                    target: "picker.page",
                    "loaded {} emoji from {} in {} ms",
                    catalog.len(),
                    self.location,
                    started.elapsed().as_millis()
                );
                Ok(Arc::new(catalog))
            })
            .cloned()
    }

    /// The catalog, if a load has already succeeded.
    pub fn loaded(&self) -> Option<Arc<Catalog>> {
        self.catalog.get().cloned()
    }
}

/// Run [`CatalogLoader::get`] on a background thread. An already loaded catalog is sent
/// right away.
pub fn spawn_load(loader: Arc<CatalogLoader>) -> Receiver<Result<Arc<Catalog>, LoadError>> {
    let (tx, rx) = mpsc::channel();
    if let Some(catalog) = loader.loaded() {
        let _ = tx.send(Ok(catalog));
        return rx;
    }
    thread::spawn(move || {
        let result = loader.get();
        if let Err(err) = &result {
            warn!(target: "picker.page", "loading {} failed: {err}", loader.location());
        }
        // receiver may be gone
        let _ = tx.send(result);
    });
    rx
}

/// Pair of SVG documents for an icon; `None` where the asset could not be fetched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IconPair {
    pub idle: Option<String>,
    pub hover: Option<String>,
}

impl IconPair {
    pub fn is_complete(&self) -> bool {
        self.idle.is_some() && self.hover.is_some()
    }

    /// Both documents concatenated, for use as button content.
    pub fn markup(&self) -> Option<String> {
        match (&self.idle, &self.hover) {
            (Some(idle), Some(hover)) => Some(format!("{idle}{hover}")),
            _ => None,
        }
    }
}

/// Fetches SVG icons. Failures degrade to `None`.
pub struct AssetLoader {
    source: Arc<dyn TextSource>,
    paths: AssetPaths,
}

impl AssetLoader {
    pub fn new(source: Arc<dyn TextSource>, paths: AssetPaths) -> Self {
        Self { source, paths }
    }

    pub fn svg(&self, hexcode: &str, palette: Palette) -> Option<String> {
        let url = self.paths.svg_url(hexcode, palette);
        match self.source.fetch_text(&url) {
            Ok(svg) => Some(svg),
            Err(err) => {
                warn!(target: "picker.page", "icon {url} unavailable: {err}");
                None
            }
        }
    }

    /// Mono face while idle, colour face on hover.
    pub fn button_icons(&self) -> IconPair {
        IconPair {
            idle: self.svg(BUTTON_ICON_IDLE, Palette::Mono),
            hover: self.svg(BUTTON_ICON_HOVER, Palette::Color),
        }
    }

    pub fn tab_icons(&self, group: &Group) -> IconPair {
        IconPair {
            idle: self.svg(group.icon(), Palette::Mono),
            hover: self.svg(group.icon(), Palette::Color),
        }
    }
}
