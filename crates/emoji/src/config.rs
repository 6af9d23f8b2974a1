//! Codec options. Every field has a default so partial config files are accepted.

use log::error;
use serde::Deserialize;

use crate::assets::AssetPaths;
use crate::error::ConfigError;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CodecConfig {
    /// Use the shorthand instead of the glyph as `alt` text of rendered emoji.
    pub alt_as_shorthands: bool,
    /// Convert rendered emoji back to shorthands (otherwise glyphs) when extracting text.
    /// Glyph mode can lose records that share a glyph.
    pub convert_to_shorthands: bool,
    /// Expand emoticons such as `<3` and `:)`.
    pub allow_emoticons: bool,
    pub base_emoji_url: String,
    /// Base for black/white assets; derived from `base_emoji_url` when unset.
    pub base_bw_emoji_url: Option<String>,
    /// Emit the `scaled` presentation hint on rendered emoji.
    pub scale_emojis: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            alt_as_shorthands: false,
            convert_to_shorthands: true,
            allow_emoticons: true,
            base_emoji_url: "openmoji/color/svg/".to_string(),
            base_bw_emoji_url: None,
            scale_emojis: true,
        }
    }
}

impl CodecConfig {
    /// Reject empty asset bases and make sure both end in `/`.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.base_emoji_url.is_empty() {
            error!(target: "emoji.codec", "base_emoji_url is empty");
            return Err(ConfigError::Empty("base_emoji_url"));
        }
        ensure_trailing_slash(&mut self.base_emoji_url);
        if let Some(bw) = self.base_bw_emoji_url.as_mut() {
            if bw.is_empty() {
                error!(target: "emoji.codec", "base_bw_emoji_url is empty");
                return Err(ConfigError::Empty("base_bw_emoji_url"));
            }
            ensure_trailing_slash(bw);
        }
        Ok(self)
    }

    pub fn asset_paths(&self) -> AssetPaths {
        AssetPaths::new(self.base_emoji_url.clone(), self.base_bw_emoji_url.clone())
    }
}

pub fn ensure_trailing_slash(url: &mut String) {
    if !url.ends_with('/') {
        url.push('/');
    }
}
