use std::fs;
use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Constants of the pressure-to-width mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressureConfig {
    /// Multiplier applied to `ln(pressure + 1)`
    pub width_gain: f32,
    /// Weight of the raw width in the moving average (the previous width gets `1 - smoothing`)
    pub smoothing: f32,
    /// Pressure used when a touch reports a force that is not positive
    pub touch_fallback: f32,
    /// Pressure used for samples that carry no force at all (mouse, plain pointer)
    pub pointer: f32,
}

impl Default for PressureConfig {
    fn default() -> Self {
        Self {
            width_gain: 40.0,
            smoothing: 0.2,
            touch_fallback: 0.1,
            pointer: 1.0,
        }
    }
}

impl PressureConfig {
    /// Raw (unsmoothed) line width for a resolved pressure: `ln(pressure + 1) * gain`
    pub fn line_width(&self, pressure: f32) -> f32 {
        (pressure + 1.0).ln() * self.width_gain
    }

    /// Exponential moving average of the raw width against the previous smoothed width
    pub fn smoothed_width(&self, pressure: f32, previous: f32) -> f32 {
        self.line_width(pressure) * self.smoothing + previous * (1.0 - self.smoothing)
    }
}

/// Settings for a capture session and its live feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub pressure: PressureConfig,
    /// Edge length of the square drawn by the points overlay
    pub marker_size: f32,
    pub marker_color: Color32,
    /// Color of the live ink on the raster surface
    pub ink_color: Color32,
    /// How many contact reports may queue up before new ones are dropped
    pub diagnostics_capacity: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            pressure: PressureConfig::default(),
            marker_size: 20.0,
            marker_color: Color32::RED,
            ink_color: Color32::BLACK,
            diagnostics_capacity: 8,
        }
    }
}

impl CaptureConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> ConfigResult<()> {
        let pressure = &self.pressure;
        if !(pressure.width_gain.is_finite() && pressure.width_gain > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "width_gain must be positive, got {}",
                pressure.width_gain
            )));
        }
        if !(0.0..=1.0).contains(&pressure.smoothing) {
            return Err(ConfigError::Invalid(format!(
                "smoothing must lie in [0, 1], got {}",
                pressure.smoothing
            )));
        }
        // Widths are ln(p + 1) * gain, so both fallbacks must stay positive.
        for (name, value) in [
            ("touch_fallback", pressure.touch_fallback),
            ("pointer", pressure.pointer),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} pressure must be positive, got {}",
                    name, value
                )));
            }
        }
        if !(self.marker_size.is_finite() && self.marker_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "marker_size must be positive, got {}",
                self.marker_size
            )));
        }
        if self.diagnostics_capacity == 0 {
            return Err(ConfigError::Invalid(
                "diagnostics_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_width_formula() {
        let config = PressureConfig::default();
        assert!((config.line_width(1.0) - 2.0f32.ln() * 40.0).abs() < 1e-4);
        assert!((config.line_width(0.1) - 1.1f32.ln() * 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CaptureConfig::from_json_str(r#"{ "marker_size": 12.0 }"#).unwrap();
        assert_eq!(config.marker_size, 12.0);
        assert_eq!(config.pressure, PressureConfig::default());
        assert_eq!(config.diagnostics_capacity, 8);
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = CaptureConfig::default();
        config.pressure.smoothing = 0.5;
        let json = config.to_json_string().unwrap();
        assert_eq!(CaptureConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = CaptureConfig::from_json_str(r#"{ "pressure": { "smoothing": 1.5 } }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));

        let err = CaptureConfig::from_json_str(r#"{ "diagnostics_capacity": 0 }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));

        let err = CaptureConfig::from_json_str("not json");
        assert!(matches!(err, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = CaptureConfig::load("/definitely/not/here/ink.json");
        assert!(matches!(err, Err(ConfigError::Read(_))));
    }
}
