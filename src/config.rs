//! Picker tuning constants and the serializable picker configuration.

use crate::error::ConfigError;
use crate::range::PickerRange;
use serde::Deserialize;

// Geometry
pub const TICK_HEIGHT: f64 = 124.0;
pub const VISIBLE_TICKS: u32 = 7;

// Elastic overscroll
pub const RUBBER_BAND_FACTOR: f64 = 0.55;

// Spring settle
pub const SPRING_STIFFNESS: f64 = 0.08;
pub const SPRING_DAMPING: f64 = 0.78;
pub const NOMINAL_FRAME_MS: f64 = 16.0;
pub const MAX_FRAME_MS: f64 = 32.0;
pub const REST_DISPLACEMENT: f64 = 0.5;
pub const REST_VELOCITY: f64 = 0.1;
pub const MAX_SETTLE_FRAMES: u32 = 600;

// Range limits
pub const MAX_TICKS: usize = 100_000;
/// Slack added before flooring the tick count, so `0..=0.3 by 0.1` keeps its last tick.
pub const TICK_COUNT_EPSILON: f64 = 1e-9;

/// One picker as described by the embedded `picker.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PickerConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    #[serde(default)]
    pub suffix: String,
    pub value: f64,
}

impl PickerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PickerConfig = serde_json::from_str(json)?;
        config.range()?;
        Ok(config)
    }

    /// Validate the bounds and step into a [`PickerRange`].
    pub fn range(&self) -> Result<PickerRange, ConfigError> {
        Ok(PickerRange::new(self.min, self.max, self.step)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PickerError;

    #[test]
    fn parses_config_with_default_suffix() {
        let config =
            PickerConfig::from_json(r#"{ "min": 0, "max": 60, "step": 5, "value": 10 }"#)
                .expect("valid config");
        assert_eq!(config.suffix, "");
        assert_eq!(config.range().unwrap().len(), 13);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = PickerConfig::from_json(r#"{ "min": 0, "max": 60 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_invalid_range() {
        let err = PickerConfig::from_json(r#"{ "min": 0, "max": 60, "step": 0, "value": 0 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Picker(PickerError::InvalidStep(_))
        ));
    }
}
