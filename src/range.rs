//! The selectable value sequence and the fixed tick geometry.

use crate::config::{MAX_TICKS, TICK_COUNT_EPSILON, TICK_HEIGHT, VISIBLE_TICKS};
use crate::error::PickerError;

/// An evenly stepped, inclusive value range.
///
/// Ticks are `min + i * step` for `i` in `0..len()`. The span does not have to
/// be a multiple of `step`: the last tick may fall short of `max`, but it never
/// exceeds it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerRange {
    min: f64,
    max: f64,
    step: f64,
    len: usize,
}

impl PickerRange {
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, PickerError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(PickerError::NonFiniteBound);
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(PickerError::InvalidStep(step));
        }
        if max < min {
            return Err(PickerError::InvertedRange { min, max });
        }

        let steps = ((max - min) / step + TICK_COUNT_EPSILON).floor();
        if steps >= MAX_TICKS as f64 {
            // Float-to-int casts saturate, so huge spans report usize::MAX.
            return Err(PickerError::TooManyTicks {
                count: (steps as usize).saturating_add(1),
                limit: MAX_TICKS,
            });
        }

        Ok(Self {
            min,
            max,
            step,
            len: steps as usize + 1,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of ticks; always at least one.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn last_index(&self) -> usize {
        self.len - 1
    }

    /// Tick value at `index`, with the index clamped to the range.
    pub fn value_at(&self, index: usize) -> f64 {
        let index = index.min(self.last_index());
        (self.min + index as f64 * self.step).min(self.max)
    }

    /// Index of the tick nearest to `value` after clamping into `[min, max]`.
    /// NaN maps to the first tick.
    pub fn index_of(&self, value: f64) -> usize {
        if value.is_nan() {
            return 0;
        }
        let index = ((value - self.min) / self.step).round();
        index.clamp(0.0, self.last_index() as f64) as usize
    }

    /// Snap an arbitrary value onto the nearest tick.
    pub fn snap(&self, value: f64) -> f64 {
        self.value_at(self.index_of(value))
    }

    pub fn items(&self) -> impl Iterator<Item = f64> {
        let range = *self;
        (0..range.len).map(move |i| range.value_at(i))
    }
}

/// Fixed pixel geometry of the tick list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    tick_height: f64,
    visible_ticks: u32,
}

impl Geometry {
    pub fn new(tick_height: f64, visible_ticks: u32) -> Result<Self, PickerError> {
        if !tick_height.is_finite() || tick_height <= 0.0 {
            return Err(PickerError::InvalidTickHeight(tick_height));
        }
        if visible_ticks == 0 {
            return Err(PickerError::InvalidVisibleTicks);
        }
        Ok(Self {
            tick_height,
            visible_ticks,
        })
    }

    pub fn tick_height(&self) -> f64 {
        self.tick_height
    }

    pub fn visible_ticks(&self) -> u32 {
        self.visible_ticks
    }

    /// Viewport height assumed until the real viewport has been measured.
    pub fn default_viewport_height(&self) -> f64 {
        self.tick_height * f64::from(self.visible_ticks)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            tick_height: TICK_HEIGHT,
            visible_ticks: VISIBLE_TICKS,
        }
    }
}
