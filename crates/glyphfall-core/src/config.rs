//! Animation configuration.

use serde::Deserialize;

use crate::chars::DEFAULT_CHARS;
use crate::color::Rgba;
use crate::error::ConfigError;

/// An inclusive range of seconds, written as `[min, max]` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct SecondsRange {
    pub min: f64,
    pub max: f64,
}

impl SecondsRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Check that both ends are finite and ordered.
    ///
    /// With `positive` the minimum must also be strictly greater than zero.
    fn validate(self, name: &'static str, positive: bool) -> Result<(), ConfigError> {
        let invalid = |reason| ConfigError::InvalidRange {
            name,
            min: self.min,
            max: self.max,
            reason,
        };
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(invalid("bounds must be finite"));
        }
        if positive && self.min <= 0.0 {
            return Err(invalid("minimum must be positive"));
        }
        if self.min > self.max {
            return Err(invalid("minimum exceeds maximum"));
        }
        Ok(())
    }
}

impl From<[f64; 2]> for SecondsRange {
    fn from([min, max]: [f64; 2]) -> Self {
        Self { min, max }
    }
}

/// Fully resolved animation settings. Immutable once an animation starts.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Edge length of one grid cell, in pixels.
    pub cell_size: u32,
    /// Glyph color.
    pub color: Rgba,
    /// Font family name.
    pub font: String,
    /// Glyph size in pixels.
    pub font_size: u32,
    /// Fill painted over the whole surface every frame. A translucent
    /// fill leaves a fading trail behind previously drawn glyphs.
    pub background_color: Rgba,
    /// Seconds a full fade (in or out) takes.
    pub fade_duration_range: SecondsRange,
    /// Seconds a cell waits before its next fade cycle.
    pub delay_duration_range: SecondsRange,
    /// Candidate symbols, never empty.
    pub chars: Vec<char>,
    /// Fraction of cells that start already visible.
    pub initial_density: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            cell_size: 20,
            color: Rgba::opaque(0, 255, 0),
            font: "monospace".to_string(),
            font_size: 16,
            background_color: Rgba::new(0, 0, 0, 0.1),
            fade_duration_range: SecondsRange::new(2.0, 5.0),
            delay_duration_range: SecondsRange::new(0.0, 2.0),
            chars: DEFAULT_CHARS.chars().collect(),
            initial_density: 0.1,
        }
    }
}

impl AnimationConfig {
    /// Apply `options` over the defaults and validate the result.
    pub fn from_options(options: &AnimationOptions) -> Result<Self, ConfigError> {
        let config = Self::default().merge(options);
        config.validate()?;
        Ok(config)
    }

    /// Override every field that `options` supplies.
    pub fn merge(mut self, options: &AnimationOptions) -> Self {
        if let Some(cell_size) = options.cell_size {
            self.cell_size = cell_size;
        }
        if let Some(color) = options.color {
            self.color = color;
        }
        if let Some(font) = &options.font {
            self.font.clone_from(font);
        }
        if let Some(font_size) = options.font_size {
            self.font_size = font_size;
        }
        if let Some(background_color) = options.background_color {
            self.background_color = background_color;
        }
        if let Some(range) = options.fade_duration_range_seconds {
            self.fade_duration_range = range;
        }
        if let Some(range) = options.delay_duration_range_seconds {
            self.delay_duration_range = range;
        }
        if let Some(chars) = &options.chars {
            self.chars = chars.chars().collect();
        }
        if let Some(density) = options.initial_density {
            self.initial_density = density;
        }
        self
    }

    /// Check the invariants the animation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.font_size == 0 {
            return Err(ConfigError::ZeroFontSize);
        }
        if self.chars.is_empty() {
            return Err(ConfigError::EmptyCharSet);
        }
        // Fade speed is 1 / duration, so the duration must stay above zero.
        self.fade_duration_range.validate("fade duration", true)?;
        // A delay at or below zero just means the cell is not delayed.
        self.delay_duration_range.validate("delay duration", false)?;
        if !(0.0..=1.0).contains(&self.initial_density) {
            return Err(ConfigError::DensityOutOfRange(self.initial_density));
        }
        Ok(())
    }

    /// Grid dimensions `(columns, rows)` for a surface of the given pixel size.
    ///
    /// Partial cells at the right and bottom edges are dropped.
    pub fn grid_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        if self.cell_size == 0 {
            return (0, 0);
        }
        (width / self.cell_size, height / self.cell_size)
    }
}

/// Partial animation settings. Only the supplied fields override defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationOptions {
    pub cell_size: Option<u32>,
    pub color: Option<Rgba>,
    pub font: Option<String>,
    pub font_size: Option<u32>,
    pub background_color: Option<Rgba>,
    pub fade_duration_range_seconds: Option<SecondsRange>,
    pub delay_duration_range_seconds: Option<SecondsRange>,
    pub chars: Option<String>,
    pub initial_density: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnimationConfig::from_options(&AnimationOptions::default()).unwrap();
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.color, Rgba::opaque(0, 255, 0));
        assert_eq!(config.font, "monospace");
        assert_eq!(config.font_size, 16);
        assert_eq!(config.background_color, Rgba::new(0, 0, 0, 0.1));
        assert_eq!(config.fade_duration_range, SecondsRange::new(2.0, 5.0));
        assert_eq!(config.delay_duration_range, SecondsRange::new(0.0, 2.0));
        assert_eq!(config.chars.len(), 52);
        assert_eq!(config.chars.first(), Some(&'A'));
        assert_eq!(config.chars.last(), Some(&'z'));
        assert_eq!(config.initial_density, 0.1);
    }

    #[test]
    fn test_merge_overrides_only_supplied_fields() {
        let options = AnimationOptions {
            cell_size: Some(10),
            chars: Some("01".to_string()),
            ..Default::default()
        };
        let config = AnimationConfig::from_options(&options).unwrap();
        assert_eq!(config.cell_size, 10);
        assert_eq!(config.chars, vec!['0', '1']);
        assert_eq!(config.font_size, 16);
        assert_eq!(config.initial_density, 0.1);
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            (
                AnimationOptions {
                    cell_size: Some(0),
                    ..Default::default()
                },
                ConfigError::ZeroCellSize,
            ),
            (
                AnimationOptions {
                    font_size: Some(0),
                    ..Default::default()
                },
                ConfigError::ZeroFontSize,
            ),
            (
                AnimationOptions {
                    chars: Some(String::new()),
                    ..Default::default()
                },
                ConfigError::EmptyCharSet,
            ),
            (
                AnimationOptions {
                    initial_density: Some(1.5),
                    ..Default::default()
                },
                ConfigError::DensityOutOfRange(1.5),
            ),
        ];
        for (options, expected) in cases {
            assert_eq!(AnimationConfig::from_options(&options), Err(expected));
        }
    }

    #[test]
    fn test_range_validation() {
        let zero_fade = AnimationOptions {
            fade_duration_range_seconds: Some(SecondsRange::new(0.0, 1.0)),
            ..Default::default()
        };
        assert!(matches!(
            AnimationConfig::from_options(&zero_fade),
            Err(ConfigError::InvalidRange {
                name: "fade duration",
                ..
            })
        ));

        let inverted_delay = AnimationOptions {
            delay_duration_range_seconds: Some(SecondsRange::new(3.0, 1.0)),
            ..Default::default()
        };
        assert!(matches!(
            AnimationConfig::from_options(&inverted_delay),
            Err(ConfigError::InvalidRange {
                name: "delay duration",
                reason: "minimum exceeds maximum",
                ..
            })
        ));

        let nan_fade = AnimationOptions {
            fade_duration_range_seconds: Some(SecondsRange::new(1.0, f64::NAN)),
            ..Default::default()
        };
        assert!(AnimationConfig::from_options(&nan_fade).is_err());

        let fixed_delay = AnimationOptions {
            delay_duration_range_seconds: Some(SecondsRange::new(0.0, 0.0)),
            ..Default::default()
        };
        assert!(AnimationConfig::from_options(&fixed_delay).is_ok());

        let negative_delay = AnimationOptions {
            delay_duration_range_seconds: Some(SecondsRange::new(-1.0, 1.0)),
            ..Default::default()
        };
        assert!(AnimationConfig::from_options(&negative_delay).is_ok());
    }

    #[test]
    fn test_grid_dimensions() {
        let config = AnimationConfig::default();
        assert_eq!(config.grid_dimensions(100, 100), (5, 5));
        assert_eq!(config.grid_dimensions(119, 41), (5, 2));
        assert_eq!(config.grid_dimensions(19, 500), (0, 25));
    }

    #[test]
    fn test_options_from_toml() {
        let options: AnimationOptions = toml::from_str(
            r##"
            cell_size = 12
            color = "#ff0000"
            background_color = "rgba(0, 0, 0, 0.25)"
            fade_duration_range_seconds = [1.0, 1.5]
            chars = "01"
            "##,
        )
        .unwrap();
        assert_eq!(options.cell_size, Some(12));
        assert_eq!(options.color, Some(Rgba::opaque(255, 0, 0)));
        assert_eq!(options.background_color, Some(Rgba::new(0, 0, 0, 0.25)));
        assert_eq!(
            options.fade_duration_range_seconds,
            Some(SecondsRange::new(1.0, 1.5))
        );
        assert_eq!(options.chars.as_deref(), Some("01"));
        assert_eq!(options.font, None);
    }

    #[test]
    fn test_options_reject_bad_values() {
        assert!(toml::from_str::<AnimationOptions>(r#"color = "not-a-color""#).is_err());
        assert!(toml::from_str::<AnimationOptions>("speed = 3").is_err());
    }
}
