//! Button resetting all four filter levels.

use crate::controller;
use crate::state::AppState;
use dioxus::prelude::*;

/// Clear-filters button. Disabled while no filter is active; clicking it
/// returns the selectors, map and panel to their initial state.
#[component]
pub fn ClearFiltersButton() -> Element {
    let state = use_context::<AppState>();
    let enabled = (state.clear_enabled)();

    rsx! {
        button {
            disabled: !enabled,
            style: "margin: 8px 0; padding: 6px 14px; border-radius: 6px; border: 1px solid #2a5d67; background: #2a5d67; color: white; cursor: pointer;",
            onclick: move |_| controller::on_clear_filters(state),
            "🗑️ Limpiar filtros"
        }
    }
}
