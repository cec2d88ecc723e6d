//! Elastic bounding of the displayed offset while dragging.

use crate::config::RUBBER_BAND_FACTOR;
use crate::offset::OffsetBounds;

/// Rubber-band `raw` against `bounds`.
///
/// Inside the bounds the offset is returned unchanged. Past a bound the
/// overshoot is scaled by [`RUBBER_BAND_FACTOR`], so the list keeps following
/// the pointer but visibly lags behind it.
pub fn rubber_band(raw: f64, bounds: OffsetBounds) -> f64 {
    if raw < bounds.min {
        let overshoot = bounds.min - raw;
        return bounds.min - overshoot * RUBBER_BAND_FACTOR;
    }
    if raw > bounds.max {
        let overshoot = raw - bounds.max;
        return bounds.max + overshoot * RUBBER_BAND_FACTOR;
    }
    raw
}
