//! Chart rendering configuration.

use serde::{Deserialize, Serialize};

const fn default_bar_width() -> u32 {
    600
}

const fn default_bar_height() -> u32 {
    400
}

const fn default_pie_size() -> u32 {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartsConfig {
    /// TrueType font used for captions and labels. Empty means search the
    /// usual system font locations.
    #[serde(default)]
    pub font_path: String,

    /// Bar chart width in pixels.
    #[serde(default = "default_bar_width")]
    pub bar_width: u32,

    /// Bar chart height in pixels.
    #[serde(default = "default_bar_height")]
    pub bar_height: u32,

    /// Pie chart edge length in pixels (the image is square).
    #[serde(default = "default_pie_size")]
    pub pie_size: u32,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            font_path: String::new(),
            bar_width: default_bar_width(),
            bar_height: default_bar_height(),
            pie_size: default_pie_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ChartsConfig::default();
        assert!(config.font_path.is_empty());
        assert_eq!((config.bar_width, config.bar_height), (600, 400));
        assert_eq!(config.pie_size, 500);
    }
}
