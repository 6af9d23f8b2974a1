//! Page-level options on top of [`CodecConfig`].

use emoji::{CodecConfig, ConfigError};
use log::error;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PageConfig {
    /// Append the picker stylesheet to the document.
    pub inject_styles: bool,
    pub css_url: String,
    pub json_url: String,
    pub readonly_class_name: String,
    pub editable_class_name: String,
    pub picker_mixin_class_name: String,
    #[serde(flatten)]
    pub codec: CodecConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            inject_styles: true,
            css_url: "openmoji-picker/style.css".to_string(),
            json_url: "openmoji/data/openmoji.json".to_string(),
            readonly_class_name: "openmoji-readonly".to_string(),
            editable_class_name: "openmoji-editable".to_string(),
            picker_mixin_class_name: "with-openmoji-picker".to_string(),
            codec: CodecConfig::default(),
        }
    }
}

impl PageConfig {
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        let required = [
            ("css_url", &self.css_url),
            ("json_url", &self.json_url),
            ("readonly_class_name", &self.readonly_class_name),
            ("editable_class_name", &self.editable_class_name),
            ("picker_mixin_class_name", &self.picker_mixin_class_name),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                error!(target: "picker.page", "{name} is empty");
                return Err(ConfigError::Empty(name));
            }
        }
        self.codec = self.codec.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattened_codec_options_parse() {
        let cfg: PageConfig = toml::from_str(
            r#"
            inject_styles = false
            allow_emoticons = false
            base_emoji_url = "static/color"
            "#,
        )
        .expect("toml");
        assert!(!cfg.inject_styles);
        assert!(!cfg.codec.allow_emoticons);
        assert_eq!(cfg.editable_class_name, "openmoji-editable");

        let cfg = cfg.validate().expect("valid");
        assert_eq!(cfg.codec.base_emoji_url, "static/color/");
    }

    #[test]
    fn empty_class_name_is_rejected() {
        let cfg = PageConfig {
            editable_class_name: " ".to_string(),
            ..PageConfig::default()
        };
        assert_eq!(
            cfg.validate().err(),
            Some(ConfigError::Empty("editable_class_name"))
        );
    }
}
