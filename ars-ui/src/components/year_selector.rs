//! Dropdown selector for the year filter.

use crate::controller;
use crate::state::AppState;
use dioxus::prelude::*;

/// Year dropdown. Disabled until a municipality is chosen; selecting a year
/// switches the map to the stations operational in that year, with
/// click-to-select markers.
#[component]
pub fn YearSelector() -> Element {
    let state = use_context::<AppState>();
    let view = state.year_view.read().clone();

    let on_change = move |evt: Event<FormData>| {
        controller::on_year_change(state, evt.value());
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "year-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Año: "
            }
            select {
                id: "year-select",
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
