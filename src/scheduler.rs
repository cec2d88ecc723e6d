//! Frame scheduling capability used to drive settle animations.
//!
//! The picker never talks to the browser's animation-frame loop directly.
//! A [`FrameScheduler`] is injected instead: [`RafScheduler`] in the browser,
//! [`ManualFrames`] wherever frames are stepped by hand (tests, headless hosts).

use gloo_render::{request_animation_frame, AnimationFrame};
use std::cell::RefCell;
use std::rc::Rc;

/// Callback invoked with the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

pub trait FrameScheduler {
    type Handle: 'static;

    /// Run `callback` once on the next frame.
    fn schedule(&mut self, callback: FrameCallback) -> Self::Handle;

    /// Cancel a frame that has not run yet.
    fn cancel(&mut self, handle: Self::Handle);
}

/// `requestAnimationFrame`-backed scheduler.
#[derive(Debug, Default, Clone, Copy)]
pub struct RafScheduler;

impl FrameScheduler for RafScheduler {
    type Handle = AnimationFrame;

    fn schedule(&mut self, callback: FrameCallback) -> AnimationFrame {
        request_animation_frame(callback)
    }

    fn cancel(&mut self, handle: AnimationFrame) {
        // Dropping the handle cancels the request.
        drop(handle);
    }
}

#[derive(Default)]
struct ManualQueue {
    next_id: u64,
    now_ms: f64,
    pending: Vec<(u64, FrameCallback)>,
}

/// Host-driven scheduler whose frames run only when [`ManualFrames::advance`]
/// is called. Clones share the same queue.
#[derive(Clone, Default)]
pub struct ManualFrames {
    queue: Rc<RefCell<ManualQueue>>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f64 {
        self.queue.borrow().now_ms
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Move the clock forward by `dt_ms` and run every callback scheduled
    /// before this call. Callbacks scheduled while running wait for the next
    /// frame. Returns how many callbacks ran.
    pub fn advance(&self, dt_ms: f64) -> usize {
        let (now, due) = {
            let mut queue = self.queue.borrow_mut();
            queue.now_ms += dt_ms;
            (queue.now_ms, std::mem::take(&mut queue.pending))
        };
        let ran = due.len();
        for (_, callback) in due {
            callback(now);
        }
        ran
    }

    /// Advance in fixed steps until nothing is scheduled, up to `max_frames`
    /// frames. Returns the number of frames that ran callbacks.
    pub fn run_until_idle(&self, dt_ms: f64, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.pending() > 0 {
            self.advance(dt_ms);
            frames += 1;
        }
        frames
    }
}

impl FrameScheduler for ManualFrames {
    type Handle = u64;

    fn schedule(&mut self, callback: FrameCallback) -> u64 {
        let mut queue = self.queue.borrow_mut();
        queue.next_id += 1;
        let id = queue.next_id;
        queue.pending.push((id, callback));
        id
    }

    fn cancel(&mut self, handle: u64) {
        self.queue
            .borrow_mut()
            .pending
            .retain(|(id, _)| *id != handle);
    }
}
