//! Yew view for the ruler picker.
//!
//! Only the structural styling needed for the interaction lives here (clipping,
//! translation, marker position); everything visual is left to CSS classes.

use crate::hooks::{use_ruler_picker, PickerInput};
use crate::utils::{format_tick_label, label_decimals};
use log::error;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RulerPickerProps {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Display-only unit appended to every tick label.
    #[prop_or_default]
    pub suffix: AttrValue,
    pub value: f64,
    pub on_change: Callback<f64>,
}

/// Vertically dragged value picker with elastic overscroll.
#[function_component(RulerPicker)]
pub fn ruler_picker(props: &RulerPickerProps) -> Html {
    let picker = use_ruler_picker(PickerInput {
        min: props.min,
        max: props.max,
        step: props.step,
        value: props.value,
        on_change: props.on_change.clone(),
    });

    let picker = match picker {
        Ok(picker) => picker,
        Err(err) => {
            error!("invalid ruler picker configuration: {err}");
            return html! {
                <div class="ruler-picker ruler-picker-invalid">{ err.to_string() }</div>
            };
        }
    };

    let snapshot = picker.snapshot;
    let decimals = label_decimals(&snapshot.range);
    let tick_style = format!("height: {}px;", snapshot.tick_height);
    let track_style = format!(
        "position: absolute; left: 0; top: 0; width: 100%; transform: translateY({}px); \
         touch-action: none; cursor: ns-resize;",
        snapshot.offset
    );
    let marker_top = snapshot.center_line + snapshot.tick_height / 2.0 - 1.0;
    let marker_style = format!(
        "position: absolute; left: 0; right: 0; top: {marker_top}px; height: 2px; \
         pointer-events: none;"
    );

    html! {
        <div class="ruler-picker" style="height: 100%;">
            <div
                ref={picker.viewport_ref}
                class="ruler-picker-viewport"
                style="position: relative; height: 100%; overflow: hidden;"
            >
                <div
                    ref={picker.track_ref}
                    class="ruler-picker-track"
                    style={track_style}
                    onpointerdown={picker.onpointerdown}
                    onpointermove={picker.onpointermove}
                    onpointerup={picker.onpointerup}
                    onpointercancel={picker.onpointercancel}
                >
                    { for snapshot.range.items().enumerate().map(|(index, value)| html! {
                        <div
                            key={index}
                            class={classes!(
                                "ruler-picker-tick",
                                (value == snapshot.value).then_some("selected")
                            )}
                            style={tick_style.clone()}
                        >
                            <span class="ruler-picker-label">
                                { format_tick_label(value, decimals, &props.suffix) }
                            </span>
                            <div class="ruler-picker-rule" />
                        </div>
                    }) }
                </div>
                <div class="ruler-picker-marker" style={marker_style} />
            </div>
        </div>
    }
}
