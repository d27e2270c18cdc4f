//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The Leaflet glue lives in `assets/js/leaflet-map.js` and is evaluated as
//! globals (no ES modules), exposed via `window.*`. Leaflet itself is loaded
//! from a `<script>` tag, so every call polls until `L` and the map
//! container exist. This module serializes scene data and calls those
//! globals; the core filter logic never touches the widget.

use ars_filters::MapInstruction;

// Embed the Leaflet glue at compile time
static LEAFLET_MAP_JS: &str = include_str!("../assets/js/leaflet-map.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('Airsense JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize the map with a wait-for-Leaflet polling loop.
///
/// The glue defines functions like `airsenseRenderStations(...)` via
/// `function` declarations. To ensure they become globally accessible (not
/// block-scoped inside the setInterval callback), they are evaluated at
/// global scope via indirect `eval()` once Leaflet is ready, then each
/// function is explicitly promoted to `window.*` and the map is created.
pub fn init_map(container_id: &str) {
    // Store the script on window so the polling callback can eval it
    // at global scope (not block-scoped inside setInterval).
    let store_js = format!(
        "window.__airsenseMapScript = {};",
        serde_json::to_string(LEAFLET_MAP_JS).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = format!(
        r#"
        (function() {{
            var waitForLeaflet = setInterval(function() {{
                if (typeof L !== 'undefined' && document.getElementById('{container_id}')) {{
                    clearInterval(waitForLeaflet);
                    // Eval at global scope via indirect eval
                    (0, eval)(window.__airsenseMapScript);
                    delete window.__airsenseMapScript;
                    // Promote function declarations to window explicitly
                    if (typeof airsenseInitMap !== 'undefined') window.airsenseInitMap = airsenseInitMap;
                    if (typeof airsenseRenderMunicipalities !== 'undefined') window.airsenseRenderMunicipalities = airsenseRenderMunicipalities;
                    if (typeof airsenseRenderStations !== 'undefined') window.airsenseRenderStations = airsenseRenderStations;
                    if (typeof airsenseClearStations !== 'undefined') window.airsenseClearStations = airsenseClearStations;
                    if (typeof airsenseResetView !== 'undefined') window.airsenseResetView = airsenseResetView;
                    if (typeof airsenseHighlightStation !== 'undefined') window.airsenseHighlightStation = airsenseHighlightStation;
                    if (typeof airsenseSetMarkerColor !== 'undefined') window.airsenseSetMarkerColor = airsenseSetMarkerColor;
                    if (typeof airsenseResetMarkerColors !== 'undefined') window.airsenseResetMarkerColors = airsenseResetMarkerColors;
                    if (typeof airsenseSetBaseLayer !== 'undefined') window.airsenseSetBaseLayer = airsenseSetBaseLayer;
                    window.airsenseInitMap('{container_id}');
                    window.__airsenseMapReady = true;
                    console.log('Airsense map initialized');
                }}
            }}, 100);
        }})();
    "#
    );
    let _ = js_sys::eval(&init_js);
}

/// Run a call once the map glue has finished initializing.
fn when_ready(call: String) {
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__airsenseMapReady) {{
                    clearInterval(poll);
                    try {{ {call} }} catch(e) {{ console.error('[Airsense] map call error:', e); }}
                }}
            }}, 100);
        }})();
        "#
    ));
}

fn escape(json: &str) -> String {
    json.replace('\'', "\\'").replace('\n', "")
}

/// Apply one declarative map instruction from the filter engine.
pub fn apply(instruction: &MapInstruction) {
    match instruction {
        MapInstruction::RenderMunicipalities(markers) => {
            let json = serde_json::to_string(markers).unwrap_or_default();
            when_ready(format!(
                "window.airsenseRenderMunicipalities('{}');",
                escape(&json)
            ));
        }
        MapInstruction::RenderStations(scene) => {
            let json = serde_json::to_string(scene).unwrap_or_default();
            when_ready(format!(
                "window.airsenseRenderStations('{}');",
                escape(&json)
            ));
        }
        MapInstruction::ClearStations => {
            when_ready("window.airsenseClearStations();".to_string());
        }
        MapInstruction::ResetView => {
            when_ready("window.airsenseResetView();".to_string());
        }
        MapInstruction::HighlightStation { station, zoom } => {
            when_ready(format!("window.airsenseHighlightStation({station}, {zoom});"));
        }
        MapInstruction::SetMarkerColor {
            station,
            color,
            highlighted,
        } => {
            when_ready(format!(
                "window.airsenseSetMarkerColor({station}, '{color}', {highlighted});"
            ));
        }
        MapInstruction::ResetMarkerColors => {
            when_ready("window.airsenseResetMarkerColors();".to_string());
        }
    }
}

/// Switch between the light and dark base tile layers.
pub fn set_base_layer(dark: bool) {
    when_ready(format!("window.airsenseSetBaseLayer({dark});"));
}

/// Toggle the page-level dark-mode class.
pub fn set_body_dark_class(dark: bool) {
    call_js(&format!(
        "document.body.classList.toggle('dark-mode', {dark});"
    ));
}

/// Register the callbacks marker clicks feed back into Rust.
/// The glue calls `window.__airsenseOnStationClick(id)` and
/// `window.__airsenseOnMunicipalityClick(id)`.
pub fn register_map_callbacks(
    on_station: impl FnMut(u32) + 'static,
    on_municipality: impl FnMut(u32) + 'static,
) {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsValue;

    let Some(window) = web_sys::window() else {
        return;
    };

    let station_cb = Closure::wrap(Box::new(on_station) as Box<dyn FnMut(u32)>);
    let _ = js_sys::Reflect::set(
        window.as_ref(),
        &JsValue::from_str("__airsenseOnStationClick"),
        station_cb.as_ref(),
    );
    station_cb.forget();

    let municipality_cb = Closure::wrap(Box::new(on_municipality) as Box<dyn FnMut(u32)>);
    let _ = js_sys::Reflect::set(
        window.as_ref(),
        &JsValue::from_str("__airsenseOnMunicipalityClick"),
        municipality_cb.as_ref(),
    );
    municipality_cb.forget();
}

/// Await a `setTimeout` on the browser event loop.
pub async fn sleep_ms(ms: u32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}
