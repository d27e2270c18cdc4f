//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with
//! `use_context::<AppState>()`. The filter engine itself lives in a signal;
//! the selector/panel/status signals mirror the engine's emitted effects.

use ars_api::ApiClient;
use ars_filters::{FilterConfig, FilterEngine, PanelContent, SelectorView};
use dioxus::prelude::*;

/// Shared application state for the Airsense dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// The cascading filter state machine
    pub engine: Signal<FilterEngine>,
    /// HTTP client bound to the environment's base URL
    pub client: Signal<ApiClient>,
    /// Municipality selector view
    pub municipality_view: Signal<SelectorView>,
    /// Year selector view
    pub year_view: Signal<SelectorView>,
    /// Station selector view
    pub station_view: Signal<SelectorView>,
    /// Pollutant selector view
    pub pollutant_view: Signal<SelectorView>,
    /// Current status-bar text (None when hidden)
    pub status: Signal<Option<String>>,
    /// Monotonic counter canceling superseded status dismiss timers
    pub status_seq: Signal<u64>,
    /// Info panel content
    pub panel: Signal<PanelContent>,
    /// Whether the clear-filters button is enabled
    pub clear_enabled: Signal<bool>,
    /// Dark mode (switches the base tile layer)
    pub dark_mode: Signal<bool>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            engine: Signal::new(FilterEngine::new(FilterConfig::default())),
            client: Signal::new(ApiClient::new(detect_base_url())),
            municipality_view: Signal::new(SelectorView::loading("Cargando municipios...")),
            year_view: Signal::new(SelectorView::disabled("-- Primero selecciona municipio --")),
            station_view: Signal::new(SelectorView::disabled("-- Primero selecciona año --")),
            pollutant_view: Signal::new(SelectorView::disabled("-- Primero selecciona estación --")),
            status: Signal::new(None),
            status_seq: Signal::new(0),
            panel: Signal::new(PanelContent::Instructions),
            clear_enabled: Signal::new(false),
            dark_mode: Signal::new(false),
        }
    }
}

/// Resolve the backend base URL for the current environment: the local dev
/// server when the page is served from localhost, a relative `/api`
/// otherwise (same-origin deployment).
pub fn detect_base_url() -> String {
    if let Some(window) = web_sys::window() {
        if let Ok(hostname) = window.location().hostname() {
            if hostname == "localhost" || hostname == "127.0.0.1" {
                return "http://localhost:3000/api".to_string();
            }
        }
    }
    "/api".to_string()
}
