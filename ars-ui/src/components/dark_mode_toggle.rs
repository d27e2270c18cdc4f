//! Dark mode toggle (switches the base tile layer).

use crate::controller;
use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn DarkModeToggle() -> Element {
    let state = use_context::<AppState>();
    let dark = (state.dark_mode)();

    rsx! {
        button {
            style: "margin: 8px 0 8px 8px; padding: 6px 14px; border-radius: 6px; border: 1px solid #888; background: transparent; cursor: pointer;",
            onclick: move |_| controller::toggle_dark_mode(state),
            if dark { "☀️ Modo claro" } else { "🌙 Modo oscuro" }
        }
    }
}
