//! Frame-scheduling wrapper around [`PickerEngine`].
//!
//! The driver owns the single pending frame of a settle animation. It is the
//! only place that requests or cancels frames, and it guarantees the request
//! is released on every way out of `Settling`: a settle that finishes, a
//! pointer-down, a resize, [`PickerDriver::shutdown`], or dropping the driver.

use crate::picker::{Phase, PickerEngine, PickerSnapshot, Release};
use crate::scheduler::FrameScheduler;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type ValueListener = Rc<dyn Fn(f64)>;
type RenderListener = Rc<dyn Fn()>;

struct DriverState<S: FrameScheduler> {
    engine: PickerEngine,
    scheduler: S,
    frame: Option<S::Handle>,
    on_change: Option<ValueListener>,
    on_render: Option<RenderListener>,
}

impl<S: FrameScheduler> DriverState<S> {
    fn cancel_frame(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Release the pending frame if the engine is no longer settling.
    fn release_stale_frame(&mut self) {
        if !self.engine.is_settling() {
            self.cancel_frame();
        }
    }
}

/// What the host has to be told after an operation. Listeners are invoked
/// only after the state borrow is released, so they may call back in.
struct Notify {
    render: Option<RenderListener>,
    change: Option<(ValueListener, f64)>,
}

impl Notify {
    fn dispatch(self) {
        if let Some(render) = self.render {
            render();
        }
        if let Some((change, value)) = self.change {
            change(value);
        }
    }
}

/// A [`PickerEngine`] bound to a frame scheduler and host listeners.
pub struct PickerDriver<S: FrameScheduler + 'static> {
    inner: Rc<RefCell<DriverState<S>>>,
}

impl<S: FrameScheduler + 'static> PickerDriver<S> {
    pub fn new(engine: PickerEngine, scheduler: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(DriverState {
                engine,
                scheduler,
                frame: None,
                on_change: None,
                on_render: None,
            })),
        }
    }

    /// Listener for every emitted value: each drag move and each settle frame.
    pub fn on_change(self, listener: impl Fn(f64) + 'static) -> Self {
        self.inner.borrow_mut().on_change = Some(Rc::new(listener));
        self
    }

    /// Listener for every change of the displayed offset, including silent
    /// repositioning after a resize or external value.
    pub fn on_render(self, listener: impl Fn() + 'static) -> Self {
        self.inner.borrow_mut().on_render = Some(Rc::new(listener));
        self
    }

    pub fn snapshot(&self) -> PickerSnapshot {
        self.inner.borrow().engine.snapshot()
    }

    pub fn offset(&self) -> f64 {
        self.inner.borrow().engine.offset()
    }

    pub fn value(&self) -> f64 {
        self.inner.borrow().engine.value()
    }

    pub fn phase(&self) -> Phase {
        self.inner.borrow().engine.phase()
    }

    /// Whether a settle frame is currently requested.
    pub fn has_pending_frame(&self) -> bool {
        self.inner.borrow().frame.is_some()
    }

    pub fn pointer_down(&self, y: f64) -> bool {
        let mut state = self.inner.borrow_mut();
        let started = state.engine.pointer_down(y);
        state.release_stale_frame();
        started
    }

    pub fn pointer_move(&self, y: f64) -> Option<f64> {
        let (value, notify) = {
            let mut state = self.inner.borrow_mut();
            let value = state.engine.pointer_move(y);
            let notify = Notify {
                render: value.and(state.on_render.clone()),
                change: value.and_then(|v| state.on_change.clone().map(|f| (f, v))),
            };
            (value, notify)
        };
        notify.dispatch();
        value
    }

    pub fn pointer_up(&self) -> Release {
        let release = self.inner.borrow_mut().engine.pointer_up();
        self.after_release(release)
    }

    pub fn pointer_cancel(&self) -> Release {
        let release = self.inner.borrow_mut().engine.pointer_cancel();
        self.after_release(release)
    }

    pub fn set_viewport_height(&self, height: f64) -> bool {
        let (applied, render) = {
            let mut state = self.inner.borrow_mut();
            let applied = state.engine.set_viewport_height(height);
            state.release_stale_frame();
            (applied, state.on_render.clone().filter(|_| applied))
        };
        Notify {
            render,
            change: None,
        }
        .dispatch();
        applied
    }

    pub fn sync_value(&self, value: f64) {
        let render = {
            let mut state = self.inner.borrow_mut();
            let before = state.engine.offset();
            state.engine.sync_value(value);
            state
                .on_render
                .clone()
                .filter(|_| state.engine.offset() != before)
        };
        Notify {
            render,
            change: None,
        }
        .dispatch();
    }

    /// Cancel any pending frame and return the engine to idle. Called when the
    /// host surface goes away.
    pub fn shutdown(&self) {
        if let Ok(mut state) = self.inner.try_borrow_mut() {
            state.cancel_frame();
            state.engine.reset();
        }
    }

    fn after_release(&self, release: Release) -> Release {
        match release {
            Release::Settling { .. } => Self::request_frame(&self.inner),
            Release::Idle => {
                let render = self.inner.borrow().on_render.clone();
                Notify {
                    render,
                    change: None,
                }
                .dispatch();
            }
            Release::Ignored => {}
        }
        release
    }

    fn request_frame(inner: &Rc<RefCell<DriverState<S>>>) {
        let weak: Weak<RefCell<DriverState<S>>> = Rc::downgrade(inner);
        let mut state = inner.borrow_mut();
        if state.frame.is_some() {
            return;
        }
        let handle = state.scheduler.schedule(Box::new(move |now| {
            if let Some(inner) = weak.upgrade() {
                Self::run_frame(&inner, now);
            }
        }));
        state.frame = Some(handle);
    }

    fn run_frame(inner: &Rc<RefCell<DriverState<S>>>, now: f64) {
        let (frame, notify) = {
            let mut state = inner.borrow_mut();
            // This request has fired; release it before anything else can fail.
            state.frame = None;
            let frame = state.engine.frame(now);
            let notify = Notify {
                render: frame.and(state.on_render.clone()),
                change: frame.and_then(|f| state.on_change.clone().map(|l| (l, f.value))),
            };
            (frame, notify)
        };
        if let Some(frame) = frame {
            if !frame.settled {
                Self::request_frame(inner);
            }
        }
        notify.dispatch();
    }
}

impl<S: FrameScheduler + 'static> Drop for PickerDriver<S> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.inner.try_borrow_mut() {
            state.cancel_frame();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{Geometry, PickerRange};
    use crate::scheduler::ManualFrames;
    use std::cell::RefCell;

    fn driver(value: f64, frames: &ManualFrames) -> (PickerDriver<ManualFrames>, Rc<RefCell<Vec<f64>>>) {
        let range = PickerRange::new(0.0, 100.0, 5.0).unwrap();
        let engine = PickerEngine::new(range, Geometry::default(), value);
        let emitted = Rc::new(RefCell::new(Vec::new()));
        let sink = emitted.clone();
        let driver = PickerDriver::new(engine, frames.clone())
            .on_change(move |v| sink.borrow_mut().push(v));
        (driver, emitted)
    }

    #[test]
    fn in_bounds_release_schedules_nothing() {
        let frames = ManualFrames::new();
        let (driver, emitted) = driver(50.0, &frames);
        driver.pointer_down(0.0);
        driver.pointer_move(124.0);
        assert_eq!(driver.pointer_up(), Release::Idle);
        assert_eq!(frames.pending(), 0);
        assert_eq!(*emitted.borrow(), vec![45.0]);
    }

    #[test]
    fn settle_runs_one_frame_at_a_time_until_idle() {
        let frames = ManualFrames::new();
        let (driver, emitted) = driver(0.0, &frames);
        driver.pointer_down(0.0);
        driver.pointer_move(400.0);
        driver.pointer_up();
        assert!(driver.has_pending_frame());
        assert_eq!(frames.pending(), 1);

        let ran = frames.run_until_idle(16.0, 200);
        assert!(ran > 1 && ran < 200);
        assert_eq!(driver.phase(), Phase::Idle);
        assert_eq!(driver.offset(), 372.0);
        assert!(!driver.has_pending_frame());
        // One emission for the move, one per settle frame.
        assert_eq!(emitted.borrow().len(), 1 + ran);
        assert!(emitted.borrow().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn pointer_down_cancels_the_pending_frame() {
        let frames = ManualFrames::new();
        let (driver, _) = driver(0.0, &frames);
        driver.pointer_down(0.0);
        driver.pointer_move(400.0);
        driver.pointer_up();
        frames.advance(16.0);
        assert_eq!(frames.pending(), 1);

        driver.pointer_down(10.0);
        assert_eq!(frames.pending(), 0);
        assert_eq!(driver.phase(), Phase::Dragging);
    }

    #[test]
    fn dropping_the_driver_cancels_the_pending_frame() {
        let frames = ManualFrames::new();
        let (driver, emitted) = driver(0.0, &frames);
        driver.pointer_down(0.0);
        driver.pointer_move(400.0);
        driver.pointer_up();
        drop(driver);

        assert_eq!(frames.pending(), 0);
        frames.advance(16.0);
        assert_eq!(emitted.borrow().len(), 1);
    }

    #[test]
    fn shutdown_mid_drag_returns_to_idle() {
        let frames = ManualFrames::new();
        let (driver, _) = driver(20.0, &frames);
        driver.pointer_down(0.0);
        driver.pointer_move(-2000.0);
        driver.shutdown();
        assert_eq!(driver.phase(), Phase::Idle);
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn listeners_may_call_back_into_the_driver() {
        let frames = ManualFrames::new();
        let range = PickerRange::new(0.0, 100.0, 5.0).unwrap();
        let engine = PickerEngine::new(range, Geometry::default(), 0.0);
        let driver = Rc::new(RefCell::new(None::<Rc<PickerDriver<ManualFrames>>>));
        let echo = driver.clone();
        let built = Rc::new(PickerDriver::new(engine, frames.clone()).on_change(move |v| {
            if let Some(driver) = echo.borrow().as_ref() {
                driver.sync_value(v);
            }
        }));
        *driver.borrow_mut() = Some(built.clone());

        built.pointer_down(0.0);
        assert_eq!(built.pointer_move(-124.0), Some(5.0));
        built.pointer_up();
        frames.run_until_idle(16.0, 10);
        assert_eq!(built.value(), 5.0);

        // Break the cycle so the driver can drop.
        driver.borrow_mut().take();
    }
}
