//! Drag, rubber-band and settle state machine for a ruler picker.
//!
//! [`PickerEngine`] owns the canonical raw offset and the interaction state.
//! It is driven entirely by the host: pointer positions, viewport heights,
//! external values and frame timestamps go in, emitted values come out. It
//! never schedules anything itself; see [`PickerDriver`](crate::driver::PickerDriver)
//! for the frame-scheduling wrapper.
//!
//! ```text
//! Idle ──down──▶ Dragging ──up (in bounds)──▶ Idle
//!                   │
//!                   └──up (overscrolled)──▶ Settling ──settled──▶ Idle
//!                                              │
//!                                              └──down──▶ Dragging
//! ```

use crate::elastic::rubber_band;
use crate::offset::{OffsetBounds, OffsetMapper};
use crate::range::{Geometry, PickerRange};
use crate::spring::{SpringConfig, SpringSettler, SpringStep};
use log::{debug, warn};

/// Interaction state with the bookkeeping each state needs.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerState {
    Idle,
    Dragging {
        start_y: f64,
        start_offset: f64,
        /// Unbounded offset following the pointer; the displayed offset is
        /// this value rubber-banded.
        raw_offset: f64,
    },
    Settling(SpringSettler),
}

/// Payload-free view of [`PickerState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging,
    Settling,
}

/// Outcome of a pointer release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// No drag was active.
    Ignored,
    /// Released within bounds; the offset stays where it is.
    Idle,
    /// Released in overscroll; a settle toward `target` has started.
    Settling { target: f64 },
}

/// One settle frame worth of output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleFrame {
    pub offset: f64,
    pub value: f64,
    pub settled: bool,
}

/// Everything a view needs to render the picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerSnapshot {
    pub range: PickerRange,
    pub tick_height: f64,
    pub center_line: f64,
    pub offset: f64,
    pub value: f64,
    pub phase: Phase,
}

#[derive(Debug, Clone)]
pub struct PickerEngine {
    mapper: OffsetMapper,
    spring: SpringConfig,
    offset: f64,
    value: f64,
    pending_value: Option<f64>,
    state: PickerState,
}

impl PickerEngine {
    /// Create an idle picker positioned on `value`, assuming the default
    /// viewport height of `geometry` until a real one is reported.
    pub fn new(range: PickerRange, geometry: Geometry, value: f64) -> Self {
        let mapper = OffsetMapper::new(range, geometry, geometry.default_viewport_height());
        let mut engine = Self {
            mapper,
            spring: SpringConfig::default(),
            offset: 0.0,
            value: range.snap(value),
            pending_value: None,
            state: PickerState::Idle,
        };
        engine.reposition();
        engine
    }

    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    pub fn range(&self) -> &PickerRange {
        self.mapper.range()
    }

    pub fn mapper(&self) -> &OffsetMapper {
        &self.mapper
    }

    pub fn bounds(&self) -> OffsetBounds {
        self.mapper.bounds()
    }

    /// Displayed offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Current selection; always a tick value.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            PickerState::Idle => Phase::Idle,
            PickerState::Dragging { .. } => Phase::Dragging,
            PickerState::Settling(_) => Phase::Settling,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.phase() == Phase::Dragging
    }

    pub fn is_settling(&self) -> bool {
        self.phase() == Phase::Settling
    }

    pub fn snapshot(&self) -> PickerSnapshot {
        PickerSnapshot {
            range: *self.mapper.range(),
            tick_height: self.mapper.tick_height(),
            center_line: self.mapper.center_line(),
            offset: self.offset,
            value: self.value,
            phase: self.phase(),
        }
    }

    /// Begin a drag at pointer position `y`.
    ///
    /// A running settle is abandoned where it stands and the drag starts from
    /// the last displayed offset. Returns `false` if a drag is already active
    /// or `y` is unusable.
    pub fn pointer_down(&mut self, y: f64) -> bool {
        if !y.is_finite() {
            warn!("ignoring pointer-down at non-finite y {y}");
            return false;
        }
        match self.state {
            PickerState::Dragging { .. } => return false,
            PickerState::Settling(_) => debug!("settle interrupted at offset {}", self.offset),
            PickerState::Idle => {}
        }
        debug!("drag started at y {y}, offset {}", self.offset);
        self.state = PickerState::Dragging {
            start_y: y,
            start_offset: self.offset,
            raw_offset: self.offset,
        };
        true
    }

    /// Follow the pointer to `y` and return the value now under the marker.
    ///
    /// The displayed offset is rubber-banded, while the emitted value is read
    /// from the hard-clamped raw offset so it never leaves the range.
    pub fn pointer_move(&mut self, y: f64) -> Option<f64> {
        let PickerState::Dragging {
            start_y,
            start_offset,
            raw_offset,
        } = &mut self.state
        else {
            return None;
        };
        if !y.is_finite() {
            warn!("ignoring pointer-move at non-finite y {y}");
            return None;
        }

        let raw = *start_offset + (y - *start_y);
        *raw_offset = raw;
        let bounds = self.mapper.bounds();
        self.offset = rubber_band(raw, bounds);
        let value = self.mapper.offset_to_value(bounds.clamp(raw));
        Some(self.emit(value))
    }

    /// End the drag. Overscroll starts a settle toward the nearest bound.
    pub fn pointer_up(&mut self) -> Release {
        if !self.is_dragging() {
            return Release::Ignored;
        }
        let bounds = self.mapper.bounds();
        if bounds.contains(self.offset) {
            debug!("drag ended in bounds at offset {}", self.offset);
            self.become_idle();
            return Release::Idle;
        }

        let target = bounds.clamp(self.offset);
        debug!("drag ended in overscroll at {}, settling to {target}", self.offset);
        self.state = PickerState::Settling(SpringSettler::with_config(
            self.offset,
            target,
            self.spring,
        ));
        Release::Settling { target }
    }

    /// Pointer cancellation ends the drag exactly like a release.
    pub fn pointer_cancel(&mut self) -> Release {
        self.pointer_up()
    }

    /// Advance a running settle to the frame at `now_ms`.
    pub fn frame(&mut self, now_ms: f64) -> Option<SettleFrame> {
        let PickerState::Settling(settler) = &mut self.state else {
            return None;
        };
        let step = settler.step(now_ms);
        let frames = settler.frames();
        self.offset = step.offset();
        let value = self.mapper.offset_to_value(self.offset);
        let value = self.emit(value);

        if let SpringStep::Settled(_) = step {
            debug!("settled at offset {} after {frames} frames", self.offset);
            self.become_idle();
        }
        Some(SettleFrame {
            offset: self.offset,
            value,
            settled: step.is_settled(),
        })
    }

    /// Report a new viewport height.
    ///
    /// Outside a drag the offset is re-derived from the current value at once;
    /// a running settle is abandoned without a final event. During a drag only
    /// the bounds change. Returns `false` for unusable measurements.
    pub fn set_viewport_height(&mut self, height: f64) -> bool {
        if !self.mapper.set_viewport_height(height) {
            return false;
        }
        match self.state {
            PickerState::Dragging { .. } => {}
            PickerState::Settling(_) => {
                debug!("viewport resized mid-settle, jumping to {}", self.value);
                self.state = PickerState::Idle;
                self.pending_value = None;
                self.reposition();
            }
            PickerState::Idle => self.reposition(),
        }
        true
    }

    /// Adopt a value supplied by the host.
    ///
    /// While idle the offset jumps straight to it with no event. During a drag
    /// or settle the value is held back until the picker is idle again, and is
    /// dropped if the picker emits a value of its own in the meantime.
    pub fn sync_value(&mut self, value: f64) {
        if !value.is_finite() {
            warn!("ignoring non-finite external value {value}");
            return;
        }
        let value = self.mapper.range().snap(value);
        if self.phase() == Phase::Idle {
            self.value = value;
            self.reposition();
        } else if value != self.value {
            self.pending_value = Some(value);
        } else {
            self.pending_value = None;
        }
    }

    /// Drop any drag or settle and return to idle at the current value.
    pub fn reset(&mut self) {
        self.state = PickerState::Idle;
        self.pending_value = None;
        self.reposition();
    }

    fn emit(&mut self, value: f64) -> f64 {
        self.value = value;
        self.pending_value = None;
        value
    }

    fn become_idle(&mut self) {
        self.state = PickerState::Idle;
        if let Some(value) = self.pending_value.take() {
            debug!("applying held-back external value {value}");
            self.value = value;
            self.reposition();
        }
    }

    fn reposition(&mut self) {
        let bounds = self.mapper.bounds();
        self.offset = bounds.clamp(self.mapper.value_to_offset(self.value));
    }
}
