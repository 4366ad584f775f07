use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::physics::SpinTuning;
use crate::slices::{SliceSet, DEFAULT_COLORS, DEFAULT_LABELS};

pub const DEFAULT_CANVAS_SIZE: u32 = 500;
const MIN_CANVAS_SIZE: u32 = 40;

/// Presentation and tuning overrides. The eight prize labels are fixed;
/// only their palette can change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub colors: Vec<String>,
    pub tuning: SpinTuning,
    pub canvas_size: u32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|s| s.to_string()).collect(),
            tuning: SpinTuning::default(),
            canvas_size: DEFAULT_CANVAS_SIZE,
        }
    }
}

impl WheelConfig {
    /// Parses a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: WheelConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.colors.is_empty() {
            return Err(ConfigError::NoColors);
        }
        self.tuning.validate()?;
        if self.canvas_size < MIN_CANVAS_SIZE {
            return Err(ConfigError::CanvasSize(self.canvas_size));
        }
        Ok(())
    }

    pub fn slice_set(&self) -> SliceSet {
        SliceSet::new(&DEFAULT_LABELS, &self.colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = WheelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.slice_set(), SliceSet::default());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = WheelConfig::from_json(r##"{"colors": ["#111", "#222", "#333"], "tuning": {"friction": 0.99}}"##).unwrap();
        assert_eq!(config.tuning.friction, 0.99);
        assert_eq!(config.tuning.stop_velocity, 0.01);
        assert_eq!(config.canvas_size, DEFAULT_CANVAS_SIZE);

        let slices = config.slice_set();
        assert_eq!(slices.len(), 8);
        assert_eq!(slices.get(4).map(|s| s.color.as_str()), Some("#222"));
    }

    #[test]
    fn test_slice_labels_cannot_be_overridden() {
        let config = WheelConfig::from_json(r#"{"slices": ["Car", "Boat"]}"#).unwrap();
        let slice_set = config.slice_set();
        let labels: Vec<&str> = slice_set.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, DEFAULT_LABELS.to_vec());
    }

    #[test]
    fn test_rejects_bad_tuning() {
        let mut config = WheelConfig::default();
        config.tuning.friction = 1.0;
        assert_eq!(config.validate(), Err(ConfigError::Friction(1.0)));

        let mut config = WheelConfig::default();
        config.tuning.min_velocity = 0.7;
        assert!(matches!(config.validate(), Err(ConfigError::VelocityRange { .. })));

        let mut config = WheelConfig::default();
        config.colors.clear();
        assert_eq!(config.validate(), Err(ConfigError::NoColors));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(WheelConfig::from_json("{colors"), Err(ConfigError::Parse(_))));
    }
}
