//! Persisted application configuration
//!
//! Slider appearance, selector behaviour and a few app preferences, stored
//! as pretty-printed JSON.

use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::constants::{config::CONFIG_FILE, filters, histogram, style};
use crate::error::{PriceRangeError, Result};
use crate::range::SelectorOptions;

/// Visual styling of the range slider. Has no effect on behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderStyle {
    /// Background track colour as `#RRGGBB` or `#RRGGBBAA`
    pub track_color: String,
    /// Highlighted segment colour
    pub range_color: String,
    /// Slider width in points
    pub width: f32,
    /// Prefix shown before each value label
    pub currency_text: String,
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            track_color: style::DEFAULT_TRACK_COLOR.to_string(),
            range_color: style::DEFAULT_RANGE_COLOR.to_string(),
            width: style::DEFAULT_WIDTH,
            currency_text: style::DEFAULT_CURRENCY_TEXT.to_string(),
        }
    }
}

impl SliderStyle {
    pub fn track_color32(&self) -> Result<Color32> {
        parse_color(&self.track_color)
    }

    pub fn range_color32(&self) -> Result<Color32> {
        parse_color(&self.range_color)
    }

    pub fn validate(&self) -> Result<()> {
        self.track_color32()?;
        self.range_color32()?;
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(PriceRangeError::Config(format!(
                "slider width must be positive, got {}",
                self.width
            )));
        }
        Ok(())
    }
}

fn parse_color(hex: &str) -> Result<Color32> {
    Color32::from_hex(hex)
        .map_err(|e| PriceRangeError::Config(format!("invalid colour '{}': {:?}", hex, e)))
}

/// Everything saved to and restored from the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub style: SliderStyle,
    pub selector: SelectorOptions,
    /// Column picked automatically after loading a file, when present
    pub price_column: String,
    pub histogram_bins: usize,
    pub dark_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            style: SliderStyle::default(),
            selector: SelectorOptions::default(),
            price_column: filters::DEFAULT_PRICE_COLUMN.to_string(),
            histogram_bins: histogram::DEFAULT_BINS,
            dark_mode: false,
        }
    }
}

impl AppConfig {
    /// Path of the config file in the working directory
    pub fn default_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE)
    }

    /// Read and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the default config file if one exists, falling back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.style.validate()?;
        if self.histogram_bins == 0 {
            return Err(PriceRangeError::Config(
                "histogram needs at least one bin".to_string(),
            ));
        }
        if self.histogram_bins > histogram::MAX_BINS {
            return Err(PriceRangeError::Config(format!(
                "histogram bins must be at most {}, got {}",
                histogram::MAX_BINS,
                self.histogram_bins
            )));
        }
        if !self.selector.min_separation.is_finite() || self.selector.min_separation <= 0.0 {
            return Err(PriceRangeError::Config(format!(
                "minimum separation must be positive, got {}",
                self.selector.min_separation
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::Builder;

    #[test]
    fn test_default_style_matches_widget_defaults() {
        let style = SliderStyle::default();
        assert_eq!(style.track_color32().unwrap(), Color32::from_rgb(0, 0, 0));
        assert_eq!(style.range_color32().unwrap(), Color32::from_rgb(128, 128, 128));
        assert_eq!(style.currency_text, "BDT");
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_round_trip_through_file() {
        let file = Builder::new().suffix(".json").tempfile().unwrap();
        let mut config = AppConfig::default();
        config.style.currency_text = "USD".to_string();
        config.selector.step = 5.0;
        config.price_column = "amount".to_string();

        config.save(file.path()).unwrap();
        let loaded = AppConfig::load(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "style": { "currency_text": "EUR" } }"#).unwrap();
        assert_eq!(config.style.currency_text, "EUR");
        assert_eq!(config.style.track_color, "#000000");
        assert_eq!(config.selector, SelectorOptions::default());
        assert_eq!(config.price_column, "price");
    }

    #[test]
    fn test_bad_colour_is_rejected() {
        let mut config = AppConfig::default();
        config.style.range_color = "grey".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PriceRangeError::Config(_)));
    }

    #[test]
    fn test_histogram_bins_are_bounded() {
        let file = Builder::new().suffix(".json").tempfile().unwrap();
        std::fs::write(file.path(), r#"{ "histogram_bins": 1000000000000 }"#).unwrap();
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(PriceRangeError::Config(_))
        ));

        let mut config = AppConfig::default();
        config.histogram_bins = histogram::MAX_BINS;
        assert!(config.validate().is_ok());
        config.histogram_bins = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("missing.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_reports_malformed_json() {
        let file = Builder::new().suffix(".json").tempfile().unwrap();
        std::fs::write(file.path(), "{ not json").unwrap();
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(PriceRangeError::Json(_))
        ));
    }
}
