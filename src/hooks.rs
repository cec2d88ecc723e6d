use crate::driver::PickerDriver;
use crate::error::PickerError;
use crate::picker::{PickerEngine, PickerSnapshot};
use crate::range::{Geometry, PickerRange};
use crate::scheduler::RafScheduler;
use log::warn;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, ResizeObserver};
use yew::prelude::*;

/// Picker driven by the browser's animation frames.
pub type BrowserPicker = PickerDriver<RafScheduler>;

type SharedPicker = Rc<Result<BrowserPicker, PickerError>>;
type ViewportObserver = (ResizeObserver, Closure<dyn FnMut(js_sys::Array)>);

/// Host-side inputs of a ruler picker.
#[derive(Clone, PartialEq)]
pub struct PickerInput {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Externally owned current value.
    pub value: f64,
    /// Invoked with every value the picker emits.
    pub on_change: Callback<f64>,
}

/// Everything a view needs to render and wire up the picker.
pub struct UseRulerPicker {
    pub snapshot: PickerSnapshot,
    /// Clipping viewport whose height is measured.
    pub viewport_ref: NodeRef,
    /// Translated tick list that receives pointer events.
    pub track_ref: NodeRef,
    pub onpointerdown: Callback<PointerEvent>,
    pub onpointermove: Callback<PointerEvent>,
    pub onpointerup: Callback<PointerEvent>,
    pub onpointercancel: Callback<PointerEvent>,
}

/// Custom hook owning a [`BrowserPicker`] for the lifetime of a component.
///
/// The picker is rebuilt when `min`, `max` or `step` change. Prop value
/// changes and viewport resizes are fed into it; the old picker is shut down
/// (pending frame cancelled, resize observer disconnected) on rebuild and on
/// unmount.
#[hook]
pub fn use_ruler_picker(input: PickerInput) -> Result<UseRulerPicker, PickerError> {
    let PickerInput {
        min,
        max,
        step,
        value,
        on_change,
    } = input;

    let force_update = use_force_update();
    let viewport_ref = use_node_ref();
    let track_ref = use_node_ref();

    // The picker outlives individual renders, so it reads the latest callback
    // through this cell.
    let on_change_ref = use_mut_ref(|| on_change.clone());
    *on_change_ref.borrow_mut() = on_change;

    let picker: SharedPicker = {
        let on_change_ref = on_change_ref.clone();
        let force_update = force_update.clone();
        use_memo((min, max, step), move |&(min, max, step)| {
            PickerRange::new(min, max, step).map(|range| {
                let engine = PickerEngine::new(range, Geometry::default(), value);
                PickerDriver::new(engine, RafScheduler)
                    .on_change(move |next| {
                        let callback = on_change_ref.borrow().clone();
                        callback.emit(next);
                    })
                    .on_render(move || force_update.force_update())
            })
        })
    };

    // External value → immediate reposition (held back while interacting).
    {
        let picker = picker.clone();
        use_effect_with(value, move |value| {
            if let Ok(picker) = picker.as_ref() {
                picker.sync_value(*value);
            }
            || ()
        });
    }

    // Viewport measurement, and teardown of this picker instance.
    {
        let picker = picker.clone();
        let viewport_ref = viewport_ref.clone();
        use_effect_with((min, max, step), move |_| {
            let observer = viewport_ref
                .cast::<Element>()
                .and_then(|node| observe_viewport(node, picker.clone()));
            move || {
                if let Some((observer, _callback)) = observer {
                    observer.disconnect();
                }
                if let Ok(picker) = picker.as_ref() {
                    picker.shutdown();
                }
            }
        });
    }

    let snapshot = match picker.as_ref() {
        Ok(driver) => driver.snapshot(),
        Err(err) => return Err(err.clone()),
    };

    let onpointerdown = {
        let picker = picker.clone();
        let track_ref = track_ref.clone();
        Callback::from(move |e: PointerEvent| {
            let Ok(driver) = picker.as_ref() else {
                return;
            };
            if driver.pointer_down(f64::from(e.client_y())) {
                if let Some(track) = track_ref.cast::<Element>() {
                    capture_pointer(&track, e.pointer_id());
                }
            }
        })
    };

    let onpointermove = {
        let picker = picker.clone();
        Callback::from(move |e: PointerEvent| {
            if let Ok(driver) = picker.as_ref() {
                driver.pointer_move(f64::from(e.client_y()));
            }
        })
    };

    let release = {
        let picker = picker.clone();
        let track_ref = track_ref.clone();
        move |e: &PointerEvent, cancelled: bool| {
            let Ok(driver) = picker.as_ref() else {
                return;
            };
            if cancelled {
                driver.pointer_cancel();
            } else {
                driver.pointer_up();
            }
            if let Some(track) = track_ref.cast::<Element>() {
                release_pointer(&track, e.pointer_id());
            }
        }
    };
    let onpointerup = {
        let release = release.clone();
        Callback::from(move |e: PointerEvent| release(&e, false))
    };
    let onpointercancel = Callback::from(move |e: PointerEvent| release(&e, true));

    Ok(UseRulerPicker {
        snapshot,
        viewport_ref,
        track_ref,
        onpointerdown,
        onpointermove,
        onpointerup,
        onpointercancel,
    })
}

/// Route `pointer_id` to `track` until released. Returns whether capture was
/// taken; failures are logged and the drag continues uncaptured.
fn capture_pointer(track: &Element, pointer_id: i32) -> bool {
    match track.set_pointer_capture(pointer_id) {
        Ok(()) => true,
        Err(err) => {
            warn!("pointer capture failed: {err:?}");
            false
        }
    }
}

/// Release a capture taken by [`capture_pointer`], if still held.
fn release_pointer(track: &Element, pointer_id: i32) -> bool {
    if !track.has_pointer_capture(pointer_id) {
        return false;
    }
    match track.release_pointer_capture(pointer_id) {
        Ok(()) => true,
        Err(err) => {
            warn!("pointer release failed: {err:?}");
            false
        }
    }
}

/// Measure the viewport now and on every resize.
fn observe_viewport(node: Element, picker: SharedPicker) -> Option<ViewportObserver> {
    measure_viewport(&node, &picker);

    let target = node.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |_entries: js_sys::Array| {
        measure_viewport(&target, &picker);
    });
    match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
        Ok(observer) => {
            observer.observe(&node);
            Some((observer, callback))
        }
        Err(err) => {
            warn!("ResizeObserver unavailable, viewport measured once: {err:?}");
            None
        }
    }
}

fn measure_viewport(node: &Element, picker: &Result<BrowserPicker, PickerError>) {
    let Ok(driver) = picker else {
        return;
    };
    let height = node.get_bounding_client_rect().height();
    if height > 0.0 {
        driver.set_viewport_height(height);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    wasm_bindgen_test_configure!(run_in_browser);

    fn track() -> Element {
        let document = gloo_utils::document();
        let track = document.create_element("div").unwrap();
        gloo_utils::body().append_child(&track).unwrap();
        track
    }

    #[wasm_bindgen_test]
    fn capturing_an_inactive_pointer_is_logged_not_fatal() {
        let track = track();
        assert!(!capture_pointer(&track, 4242));
        assert!(!track.has_pointer_capture(4242));
    }

    #[wasm_bindgen_test]
    fn releasing_an_uncaptured_pointer_is_a_no_op() {
        let track = track();
        assert!(!release_pointer(&track, 4242));
    }
}
