//! Conversion between selected values and the scroll offset of the tick list.
//!
//! The offset is the vertical translation of the list. Tick `0` sits under the
//! selection marker when the offset equals the center line
//! `C = H / 2 - T / 2`; each following tick moves the list up by `T`.

use crate::range::{Geometry, PickerRange};

/// Valid offset interval; anything outside is overscroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetBounds {
    /// Offset of the last tick.
    pub min: f64,
    /// Offset of the first tick (the center line).
    pub max: f64,
}

impl OffsetBounds {
    pub fn contains(&self, offset: f64) -> bool {
        (self.min..=self.max).contains(&offset)
    }

    /// Hard clamp into the bounds. NaN clamps to the first tick.
    pub fn clamp(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return self.max;
        }
        offset.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetMapper {
    range: PickerRange,
    tick_height: f64,
    viewport_height: f64,
    center_line: f64,
}

impl OffsetMapper {
    pub fn new(range: PickerRange, geometry: Geometry, viewport_height: f64) -> Self {
        let tick_height = geometry.tick_height();
        Self {
            range,
            tick_height,
            viewport_height,
            center_line: center_line(viewport_height, tick_height),
        }
    }

    pub fn range(&self) -> &PickerRange {
        &self.range
    }

    pub fn tick_height(&self) -> f64 {
        self.tick_height
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn center_line(&self) -> f64 {
        self.center_line
    }

    /// Recompute the center line for a new viewport height.
    ///
    /// Returns `false` and keeps the previous height when the measurement is not
    /// a positive finite number.
    pub fn set_viewport_height(&mut self, height: f64) -> bool {
        if !height.is_finite() || height <= 0.0 {
            return false;
        }
        self.viewport_height = height;
        self.center_line = center_line(height, self.tick_height);
        true
    }

    pub fn bounds(&self) -> OffsetBounds {
        OffsetBounds {
            min: self.center_line - self.range.last_index() as f64 * self.tick_height,
            max: self.center_line,
        }
    }

    /// Offset placing `value` under the marker. Expects an already snapped value.
    pub fn value_to_offset(&self, value: f64) -> f64 {
        self.center_line - ((value - self.range.min()) / self.range.step()) * self.tick_height
    }

    /// Tick value under the marker at `offset`, for any offset including overscroll.
    pub fn offset_to_value(&self, offset: f64) -> f64 {
        self.range.value_at(self.offset_to_index(offset))
    }

    pub fn offset_to_index(&self, offset: f64) -> usize {
        let index = ((self.center_line - offset) / self.tick_height).round();
        if index.is_nan() {
            return 0;
        }
        index.clamp(0.0, self.range.last_index() as f64) as usize
    }
}

fn center_line(viewport_height: f64, tick_height: f64) -> f64 {
    viewport_height / 2.0 - tick_height / 2.0
}
