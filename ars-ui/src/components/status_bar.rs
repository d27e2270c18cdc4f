//! Transient status message below the filter row.

use crate::state::AppState;
use dioxus::prelude::*;

/// Status line for load progress, counts and errors. Messages are set by
/// the controller and auto-dismissed on a timer.
#[component]
pub fn StatusBar() -> Element {
    let state = use_context::<AppState>();
    let status = state.status.read().clone();

    rsx! {
        div {
            id: "map-status",
            style: "min-height: 22px; text-align: center; color: #555; font-style: italic; transition: opacity 0.4s ease;",
            if let Some(text) = status {
                span { "{text}" }
            }
        }
    }
}
