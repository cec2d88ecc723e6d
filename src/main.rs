//! Demo host for the ruler picker.
//! Mounts a single picker configured from the embedded `picker.json` and keeps
//! the selected value in component state.

use log::{debug, error};
use ruler_picker::components::RulerPicker;
use ruler_picker::config::PickerConfig;
use ruler_picker::utils::{format_tick_label, label_decimals};
use yew::prelude::*;

const PICKER_JSON: &str = include_str!("picker.json");

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| PickerConfig::from_json(PICKER_JSON));
    let initial = config
        .as_ref()
        .as_ref()
        .map(|config| config.value)
        .unwrap_or_default();
    let value = use_state(move || initial);

    let config = match config.as_ref() {
        Ok(config) => config.clone(),
        Err(err) => {
            error!("failed to load picker config: {err}");
            return html! {
                <div class="config-error">{ err.to_string() }</div>
            };
        }
    };

    let on_change = {
        let value = value.clone();
        Callback::from(move |next: f64| {
            if *value != next {
                debug!("picker value changed to {next}");
            }
            value.set(next);
        })
    };

    let decimals = config
        .range()
        .map(|range| label_decimals(&range))
        .unwrap_or_default();

    html! {
        <div class="app" style="height: 100vh; display: flex;">
            <RulerPicker
                min={config.min}
                max={config.max}
                step={config.step}
                suffix={config.suffix.clone()}
                value={*value}
                {on_change}
            />
            <div class="current-value">
                { format_tick_label(*value, decimals, &config.suffix) }
            </div>
        </div>
    }
}

/// Entry point: installs the panic hook and mounts the app on `#app`, or on
/// `<body>` when the page has no such element.
fn main() {
    console_error_panic_hook::set_once();
    match gloo_utils::document().get_element_by_id("app") {
        Some(root) => yew::Renderer::<App>::with_root(root).render(),
        None => yew::Renderer::<App>::new().render(),
    };
}
