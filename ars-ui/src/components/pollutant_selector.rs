//! Dropdown selector for the pollutant / exposure filter.

use crate::controller;
use crate::state::AppState;
use dioxus::prelude::*;

/// Pollutant dropdown. Each option is a (pollutant, averaging time) pair,
/// e.g. "PM2.5 - 24 horas". Selecting one loads the reading summary into
/// the info panel.
#[component]
pub fn PollutantSelector() -> Element {
    let state = use_context::<AppState>();
    let view = state.pollutant_view.read().clone();

    let on_change = move |evt: Event<FormData>| {
        controller::on_pollutant_change(state, evt.value());
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "pollutant-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Contaminante: "
            }
            select {
                id: "pollutant-select",
                disabled: !view.enabled,
                style: if view.error { "color: #d9534f;" } else { "" },
                onchange: on_change,
                option {
                    value: "",
                    selected: view.selected.is_none(),
                    "{view.placeholder}"
                }
                for opt in view.options.iter() {
                    option {
                        value: "{opt.value}",
                        selected: view.selected.as_deref() == Some(opt.value.as_str()),
                        "{opt.label}"
                    }
                }
            }
        }
    }
}
