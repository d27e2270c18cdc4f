//! Airsense Station Map
//!
//! The main dashboard view: a Leaflet map of municipalities and monitoring
//! stations, four cascading filter selectors (municipality → year → station
//! → pollutant) and an info panel with the statistics and WHO
//! classification of the selected reading.
//!
//! Data flow:
//! 1. On mount, the Leaflet glue initializes against the `#map` container
//!    and the filter engine's initial transition fetches the municipalities.
//! 2. Every selector change or marker click is a synchronous engine call;
//!    the returned effects update signals and the map bridge, and the
//!    returned tokened fetches run against the backend.
//! 3. Stale responses (superseded token or changed selection) are dropped
//!    by the engine before they can touch the UI.

use ars_ui::components::{
    ClearFiltersButton, DarkModeToggle, InfoPanel, MunicipalitySelector, PollutantSelector,
    StationSelector, StatusBar, YearSelector,
};
use ars_ui::state::AppState;
use ars_ui::{controller, js_bridge};
use dioxus::prelude::*;

/// DOM id of the Leaflet container.
const MAP_CONTAINER_ID: &str = "map";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("airsense-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let state = use_context_provider(AppState::new);

    // Initialize the map and kick off the municipality load on mount.
    use_effect(move || {
        js_bridge::init_map(MAP_CONTAINER_ID);
        controller::bootstrap(state);
        log::info!("dashboard mounted, base url: {}", (state.client)().base_url());
    });

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            div {
                style: "margin-bottom: 8px;",
                h3 { style: "margin: 0 0 4px 0; font-size: 18px;", "Airsense — Calidad del aire" }
                p {
                    style: "margin: 0; font-size: 12px; color: #666;",
                    "Estaciones de monitoreo del Valle del Cauca"
                }
            }

            // Filter row
            div {
                style: "display: flex; flex-wrap: wrap; gap: 16px; align-items: flex-end;",
                MunicipalitySelector {}
                YearSelector {}
                StationSelector {}
                PollutantSelector {}
                ClearFiltersButton {}
                DarkModeToggle {}
            }

            StatusBar {}

            // Map + info panel side by side
            div {
                style: "display: flex; flex-wrap: wrap; gap: 16px; margin-top: 8px;",
                div {
                    id: MAP_CONTAINER_ID,
                    style: "flex: 2 1 480px; min-height: 480px; border-radius: 8px; border: 1px solid #E0E0E0;",
                }
                div {
                    style: "flex: 1 1 320px;",
                    InfoPanel {}
                }
            }

            div {
                style: "margin-top: 12px; padding: 8px 12px; background: #F5F5F5; border-radius: 4px; font-size: 12px; color: #616161; border: 1px solid #E0E0E0;",
                "Datos históricos de calidad del aire (2011-2023), clasificados según las Guías OMS 2021."
            }
        }
    }
}
