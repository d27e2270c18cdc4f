//! Dropdown selector for choosing a monitoring station.

use crate::controller;
use crate::state::AppState;
use dioxus::prelude::*;

/// Station dropdown, kept in sync with marker clicks on the map.
#[component]
pub fn StationSelector() -> Element {
    let state = use_context::<AppState>();
    let view = state.station_view.read().clone();

    let on_change = move |evt: Event<FormData>| {
        controller::on_station_change(state, evt.value());
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "station-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Estación: "
            }
            select {
                id: "station-select",
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
