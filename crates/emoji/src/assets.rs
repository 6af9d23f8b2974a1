//! SVG asset locations.

/// Which OpenMoji rendition to reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Palette {
    /// Colour glyphs, used for content.
    Color,
    /// Black outline glyphs, used for UI chrome.
    Mono,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetPaths {
    color_base: String,
    mono_base: String,
}

impl AssetPaths {
    /// Both bases must end with `/`. Without an explicit mono base, the black set is assumed
    /// to sit next to the colour set (`<color>/../../black/svg/`).
    pub fn new(color_base: impl Into<String>, mono_base: Option<String>) -> Self {
        let color_base = color_base.into();
        let mono_base = mono_base.unwrap_or_else(|| format!("{color_base}../../black/svg/"));
        Self {
            color_base,
            mono_base,
        }
    }

    pub fn color_base(&self) -> &str {
        &self.color_base
    }

    pub fn mono_base(&self) -> &str {
        &self.mono_base
    }

    pub fn svg_url(&self, hexcode: &str, palette: Palette) -> String {
        let base = match palette {
            Palette::Color => &self.color_base,
            Palette::Mono => &self.mono_base,
        };
        format!("{base}{hexcode}.svg")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_defaults_next_to_color() {
        let paths = AssetPaths::new("openmoji/color/svg/", None);
        assert_eq!(
            paths.svg_url("1F60A", Palette::Mono),
            "openmoji/color/svg/../../black/svg/1F60A.svg"
        );
        assert_eq!(
            paths.svg_url("1F604", Palette::Color),
            "openmoji/color/svg/1F604.svg"
        );
    }

    #[test]
    fn explicit_mono_base_wins() {
        let paths = AssetPaths::new("c/", Some("bw/".to_string()));
        assert_eq!(paths.svg_url("267B", Palette::Mono), "bw/267B.svg");
    }
}
