//! Glue between the filter engine, the API client and the reactive UI.
//!
//! Every user action runs the same loop: a synchronous engine call under a
//! short-lived write borrow, then the returned effects go to signals and the
//! map bridge, and the returned fetch requests are spawned. Each response is
//! handed back to the engine with its original request so stale replies are
//! discarded before they can touch the UI.

use ars_api::ApiClient;
use ars_filters::engine::{FetchKind, FetchOutcome, FetchRequest, Transition};
use ars_filters::{Effect, FilterLevel, StatusMessage};
use dioxus::prelude::*;

use crate::js_bridge;
use crate::state::AppState;

/// Kick off the dashboard: wire the marker-click callbacks and run the
/// engine's initial transition (which fetches the municipalities).
pub fn bootstrap(state: AppState) {
    js_bridge::register_map_callbacks(
        move |station_id| {
            let mut engine = state.engine;
            let transition = engine.write().select_station(Some(station_id));
            handle_transition(state, transition);
        },
        move |municipality_id| {
            let mut engine = state.engine;
            let transition = engine.write().select_municipality(Some(municipality_id));
            handle_transition(state, transition);
        },
    );

    let mut engine = state.engine;
    let transition = engine.write().start();
    handle_transition(state, transition);
}

/// Apply a transition's effects and spawn its fetches.
pub fn handle_transition(state: AppState, transition: Transition) {
    apply_effects(state, transition.effects);
    for request in transition.fetches {
        spawn_fetch(state, request);
    }
}

fn spawn_fetch(state: AppState, request: FetchRequest) {
    spawn(async move {
        let client = (state.client)();
        log::debug!("running fetch {:?}", request.kind);
        let outcome = perform_fetch(&client, &request.kind).await;
        let effects = {
            let mut engine = state.engine;
            let effects = engine.write().apply(&request, outcome);
            effects
        };
        apply_effects(state, effects);
    });
}

async fn perform_fetch(client: &ApiClient, kind: &FetchKind) -> FetchOutcome {
    match kind {
        FetchKind::Municipalities => FetchOutcome::Municipalities(client.municipalities().await),
        FetchKind::Years { municipality } => {
            FetchOutcome::Years(client.available_years(*municipality).await)
        }
        FetchKind::MunicipalityStations { municipality } => {
            FetchOutcome::MunicipalityStations(client.stations(*municipality).await)
        }
        FetchKind::YearStations { municipality, year } => {
            FetchOutcome::YearStations(client.stations_for_year(*municipality, *year).await)
        }
        FetchKind::Pollutants { station, year } => {
            FetchOutcome::Pollutants(client.pollutants(*station, *year).await)
        }
        FetchKind::Summary {
            station,
            year,
            exposure,
        } => FetchOutcome::Summary(client.reading_summary(*station, *year, *exposure).await),
    }
}

/// Apply declarative effects to signals and the map bridge.
pub fn apply_effects(mut state: AppState, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::Selector(level, view) => match level {
                FilterLevel::Municipality => state.municipality_view.set(view),
                FilterLevel::Year => state.year_view.set(view),
                FilterLevel::Station => state.station_view.set(view),
                FilterLevel::Pollutant => state.pollutant_view.set(view),
            },
            Effect::Map(instruction) => js_bridge::apply(&instruction),
            Effect::Panel(content) => state.panel.set(content),
            Effect::Status(message) => show_status(state, message),
            Effect::AutoSelectStation { station, delay_ms } => {
                spawn(async move {
                    if delay_ms > 0 {
                        js_bridge::sleep_ms(delay_ms).await;
                    }
                    let transition = {
                        let mut engine = state.engine;
                        let transition = engine.write().auto_select(station);
                        transition
                    };
                    handle_transition(state, transition);
                });
            }
            Effect::ClearButton { enabled } => state.clear_enabled.set(enabled),
        }
    }
}

fn show_status(mut state: AppState, message: StatusMessage) {
    let seq = (state.status_seq)() + 1;
    state.status_seq.set(seq);
    state.status.set(Some(message.text));

    if let Some(ms) = message.clear_after_ms {
        spawn(async move {
            js_bridge::sleep_ms(ms).await;
            let mut state = state;
            // a newer message replaced this one; leave it alone
            if (state.status_seq)() == seq {
                state.status.set(None);
            }
        });
    }
}

// ───────────────────── selector event handlers ─────────────────────

pub fn on_municipality_change(state: AppState, value: String) {
    let id = value.parse::<u32>().ok();
    let mut engine = state.engine;
    let transition = engine.write().select_municipality(id);
    handle_transition(state, transition);
}

pub fn on_year_change(state: AppState, value: String) {
    let year = value.parse::<i32>().ok();
    let mut engine = state.engine;
    let transition = engine.write().select_year(year);
    handle_transition(state, transition);
}

pub fn on_station_change(state: AppState, value: String) {
    let id = value.parse::<u32>().ok();
    let mut engine = state.engine;
    let transition = engine.write().select_station(id);
    handle_transition(state, transition);
}

pub fn on_pollutant_change(state: AppState, value: String) {
    let id = value.parse::<u32>().ok();
    let mut engine = state.engine;
    let transition = engine.write().select_pollutant(id);
    handle_transition(state, transition);
}

pub fn on_clear_filters(state: AppState) {
    let mut engine = state.engine;
    let transition = engine.write().clear_filters();
    handle_transition(state, transition);
}

/// Flip dark mode: swaps the map's base tile layer and the body class.
pub fn toggle_dark_mode(mut state: AppState) {
    let dark = !(state.dark_mode)();
    state.dark_mode.set(dark);
    js_bridge::set_base_layer(dark);
    js_bridge::set_body_dark_class(dark);
}
