//! Error types for picker construction and configuration loading.
//!
//! The interaction engine itself never fails once built: environment input
//! (pointer positions, viewport sizes, timestamps) is clamped or ignored.
//! Only an invalid range or geometry is rejected, and it is rejected up front.

use thiserror::Error;

/// Invalid picker range or geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PickerError {
    #[error("range bounds must be finite numbers")]
    NonFiniteBound,
    #[error("step must be a positive finite number, got {0}")]
    InvalidStep(f64),
    #[error("max ({max}) must not be less than min ({min})")]
    InvertedRange { min: f64, max: f64 },
    #[error("range yields {count} ticks, more than the {limit} supported")]
    TooManyTicks { count: usize, limit: usize },
    #[error("tick height must be a positive finite number, got {0}")]
    InvalidTickHeight(f64),
    #[error("at least one visible tick is required")]
    InvalidVisibleTicks,
}

/// Failure to load a [`PickerConfig`](crate::config::PickerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid picker config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Picker(#[from] PickerError),
}
