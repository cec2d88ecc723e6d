//! Spring integrator that returns an overscrolled offset to its boundary.
//!
//! The integrator is advanced with absolute frame timestamps in milliseconds.
//! Each step is scaled by `dt / 16` so the motion is roughly independent of the
//! frame rate, and `dt` is capped so a long pause (a backgrounded tab, a
//! debugger break) cannot launch the list.

use crate::config::{
    MAX_FRAME_MS, MAX_SETTLE_FRAMES, NOMINAL_FRAME_MS, REST_DISPLACEMENT, REST_VELOCITY,
    SPRING_DAMPING, SPRING_STIFFNESS,
};
use log::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    /// Per-frame velocity retention factor.
    pub damping: f64,
    pub rest_displacement: f64,
    pub rest_velocity: f64,
    pub max_frame_ms: f64,
    /// Frame count after which the settler snaps to the target regardless.
    pub max_frames: u32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: SPRING_STIFFNESS,
            damping: SPRING_DAMPING,
            rest_displacement: REST_DISPLACEMENT,
            rest_velocity: REST_VELOCITY,
            max_frame_ms: MAX_FRAME_MS,
            max_frames: MAX_SETTLE_FRAMES,
        }
    }
}

/// Result of one integrator step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpringStep {
    Moving(f64),
    /// Snapped exactly onto the target.
    Settled(f64),
}

impl SpringStep {
    pub fn offset(&self) -> f64 {
        match *self {
            SpringStep::Moving(offset) | SpringStep::Settled(offset) => offset,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, SpringStep::Settled(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpringSettler {
    config: SpringConfig,
    current: f64,
    target: f64,
    velocity: f64,
    last_frame_ms: Option<f64>,
    frames: u32,
}

impl SpringSettler {
    pub fn new(from: f64, target: f64) -> Self {
        Self::with_config(from, target, SpringConfig::default())
    }

    /// Start at rest at `from`.
    pub fn with_config(from: f64, target: f64, config: SpringConfig) -> Self {
        Self {
            config,
            current: from,
            target,
            velocity: 0.0,
            last_frame_ms: None,
            frames: 0,
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Advance to the frame at `now_ms`.
    ///
    /// The first frame only records its timestamp. Once both the displacement
    /// and the velocity are below their rest thresholds the offset snaps onto
    /// the target and [`SpringStep::Settled`] is returned.
    pub fn step(&mut self, now_ms: f64) -> SpringStep {
        let dt = self.frame_delta(now_ms);
        self.frames += 1;

        let displacement = self.target - self.current;
        let accel = displacement * self.config.stiffness;
        let scale = dt / NOMINAL_FRAME_MS;
        self.velocity = (self.velocity + accel * scale) * self.config.damping;
        self.current += self.velocity * scale;

        let at_rest = displacement.abs() < self.config.rest_displacement
            && self.velocity.abs() < self.config.rest_velocity;
        if at_rest || !self.current.is_finite() {
            return self.finish();
        }
        if self.frames >= self.config.max_frames {
            warn!(
                "spring did not settle within {} frames, snapping to {}",
                self.config.max_frames,
                self.target
            );
            return self.finish();
        }

        trace!(
            "spring frame {}: offset {:.2}, velocity {:.3}",
            self.frames,
            self.current,
            self.velocity
        );
        SpringStep::Moving(self.current)
    }

    fn finish(&mut self) -> SpringStep {
        self.current = self.target;
        self.velocity = 0.0;
        SpringStep::Settled(self.target)
    }

    fn frame_delta(&mut self, now_ms: f64) -> f64 {
        let Some(last) = self.last_frame_ms else {
            if now_ms.is_finite() {
                self.last_frame_ms = Some(now_ms);
            }
            return 0.0;
        };
        if !now_ms.is_finite() {
            return NOMINAL_FRAME_MS;
        }
        self.last_frame_ms = Some(now_ms);
        (now_ms - last).clamp(0.0, self.config.max_frame_ms)
    }
}
