//! Configuration types for symbol library builds.
//!
//! All types implement [`serde::Deserialize`] for loading from TOML. Every
//! field has a default, so an empty document is a valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining extraction and output settings.
//! - [`ExtractionConfig`] - Marker colors and tolerance used by the extractor.
//! - [`OutputConfig`] - Number formatting of emitted metadata.
//!
//! # Example
//!
//! ```
//! # use symlib::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r##"
//!     [extraction]
//!     tolerance = 1e-4
//!     text_anchor_color = "#ff0000"
//!     "##,
//! ).unwrap();
//!
//! let settings = config.extraction().settings().unwrap();
//! assert_eq!(settings.tolerance().value(), 1e-4);
//! ```

use serde::Deserialize;

use symlib_core::{
    anchor::{AnchorCodec, DEFAULT_REJECT_MASK},
    color::{Color, Rgb},
    geometry::{DEFAULT_TOLERANCE, Tolerance},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Extraction configuration section.
    #[serde(default)]
    extraction: ExtractionConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    pub fn new(extraction: ExtractionConfig, output: OutputConfig) -> Self {
        Self { extraction, output }
    }

    /// Returns the extraction configuration.
    pub fn extraction(&self) -> &ExtractionConfig {
        &self.extraction
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Marker recognition settings, as written in the configuration file.
///
/// Colors are kept as strings and parsed by [`ExtractionConfig::settings`].
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Per-axis tolerance for point comparisons.
    #[serde(default = "default_tolerance")]
    tolerance: f64,

    /// Stroke color of the text anchor line.
    #[serde(default = "default_text_anchor_color")]
    text_anchor_color: String,

    /// Stroke colors of lines that only vote on the reference point.
    #[serde(default = "default_origin_colors")]
    origin_colors: Vec<String>,

    /// Fill value marking fillable regions, matched verbatim.
    #[serde(default = "default_fillable_color")]
    fillable_color: String,

    /// Class given to fillable regions.
    #[serde(default = "default_fillable_class")]
    fillable_class: String,

    /// Red-channel bits that must be clear in an anchor color.
    #[serde(default = "default_reject_mask")]
    reject_mask: u8,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_text_anchor_color() -> String {
    "#f00".to_string()
}

fn default_origin_colors() -> Vec<String> {
    vec![
        "#ff0".to_string(),
        "#0ff".to_string(),
        "rgb(255,0,155)".to_string(),
    ]
}

fn default_fillable_color() -> String {
    "#0f0".to_string()
}

fn default_fillable_class() -> String {
    "fillable".to_string()
}

fn default_reject_mask() -> u8 {
    DEFAULT_REJECT_MASK
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            text_anchor_color: default_text_anchor_color(),
            origin_colors: default_origin_colors(),
            fillable_color: default_fillable_color(),
            fillable_class: default_fillable_class(),
            reject_mask: default_reject_mask(),
        }
    }
}

impl ExtractionConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_reject_mask(mut self, reject_mask: u8) -> Self {
        self.reject_mask = reject_mask;
        self
    }

    /// Parses the configured colors into [`ExtractionSettings`].
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite or a configured
    /// color string cannot be parsed.
    pub fn settings(&self) -> Result<ExtractionSettings, String> {
        if !self.tolerance.is_finite() {
            return Err(format!("Invalid tolerance in config: {}", self.tolerance));
        }

        let parse = |value: &str| {
            Color::new(value)
                .map(Color::to_rgb)
                .map_err(|err| format!("Invalid marker color in config: {err}"))
        };

        let text_anchor = parse(&self.text_anchor_color)?;
        let origin = self
            .origin_colors
            .iter()
            .map(|color| parse(color))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ExtractionSettings {
            tolerance: Tolerance::new(self.tolerance),
            text_anchor,
            origin,
            fillable_color: self.fillable_color.clone(),
            fillable_class: self.fillable_class.clone(),
            codec: AnchorCodec::new(self.reject_mask),
        })
    }
}

/// Resolved extraction settings with parsed colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionSettings {
    tolerance: Tolerance,
    text_anchor: Rgb,
    origin: Vec<Rgb>,
    fillable_color: String,
    fillable_class: String,
    codec: AnchorCodec,
}

impl ExtractionSettings {
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Returns the stroke color of the text anchor line.
    pub fn text_anchor(&self) -> Rgb {
        self.text_anchor
    }

    /// Returns the stroke colors of lines that only vote on the reference point.
    pub fn origin(&self) -> &[Rgb] {
        &self.origin
    }

    /// Checks whether `color` is one of the reserved non-pin marker colors.
    pub fn is_reserved(&self, color: Rgb) -> bool {
        color == self.text_anchor || self.origin.contains(&color)
    }

    pub fn fillable_color(&self) -> &str {
        &self.fillable_color
    }

    pub fn fillable_class(&self) -> &str {
        &self.fillable_class
    }

    /// Returns the codec pin marker colors are decoded with.
    pub fn codec(&self) -> AnchorCodec {
        self.codec
    }
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            text_anchor: Rgb::new(255, 0, 0),
            origin: vec![
                Rgb::new(255, 255, 0),
                Rgb::new(0, 255, 255),
                Rgb::new(255, 0, 155),
            ],
            fillable_color: default_fillable_color(),
            fillable_class: default_fillable_class(),
            codec: AnchorCodec::default(),
        }
    }
}

/// Formatting of emitted metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Decimal places of coordinates written to metadata.
    #[serde(default = "default_precision")]
    precision: usize,
}

fn default_precision() -> usize {
    5
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

impl OutputConfig {
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    /// Returns the number of decimal places for coordinates.
    pub fn precision(&self) -> usize {
        self.precision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_match_parsed_defaults() {
        let settings = ExtractionConfig::default().settings().unwrap();
        assert_eq!(settings, ExtractionSettings::default());
        assert_eq!(settings.codec().reject_mask(), 0x11);
    }

    #[test]
    fn test_reserved_colors() {
        let settings = ExtractionSettings::default();
        assert!(settings.is_reserved(Rgb::new(255, 0, 0)));
        assert!(settings.is_reserved(Rgb::new(255, 255, 0)));
        assert!(settings.is_reserved(Rgb::new(0, 255, 255)));
        assert!(settings.is_reserved(Rgb::new(255, 0, 155)));
        assert!(!settings.is_reserved(Rgb::new(0, 0x99, 0x99)));
    }

    #[test]
    fn test_empty_document_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.output().precision(), 5);
        assert_eq!(
            config.extraction().settings().unwrap(),
            ExtractionSettings::default()
        );
    }

    #[test]
    fn test_partial_document() {
        let config: AppConfig = toml::from_str(
            r##"
            [extraction]
            origin_colors = ["yellow"]
            reject_mask = 3

            [output]
            precision = 2
            "##,
        )
        .unwrap();

        let settings = config.extraction().settings().unwrap();
        assert_eq!(settings.origin(), [Rgb::new(255, 255, 0)]);
        assert_eq!(settings.codec().reject_mask(), 3);
        assert_eq!(settings.text_anchor(), Rgb::new(255, 0, 0));
        assert_eq!(config.output().precision(), 2);
    }

    #[test]
    fn test_invalid_color() {
        let config: AppConfig = toml::from_str(
            r#"
            [extraction]
            text_anchor_color = "not-a-color"
            "#,
        )
        .unwrap();
        assert!(config.extraction().settings().is_err());
    }

    #[test]
    fn test_invalid_tolerance() {
        let config = ExtractionConfig::default().with_tolerance(f64::NAN);
        assert!(config.settings().is_err());
    }
}
