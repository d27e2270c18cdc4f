//! Dropdown selector for choosing a municipality.

use crate::controller;
use crate::state::AppState;
use dioxus::prelude::*;

/// Municipality dropdown. First level of the cascade; a selection loads the
/// available years and the municipality's stations, an empty selection
/// returns the map to the regional view.
#[component]
pub fn MunicipalitySelector() -> Element {
    let state = use_context::<AppState>();
    let view = state.municipality_view.read().clone();

    let on_change = move |evt: Event<FormData>| {
        controller::on_municipality_change(state, evt.value());
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "municipality-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Municipio: "
            }
            select {
                id: "municipality-select",
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
