//! Declarative map scenes.
//!
//! The map renderer is a pure function from (station list, year context,
//! interactivity flag) to a [`MapScene`]: plain data the Leaflet bridge
//! turns into markers, a viewport and a count overlay. The engine never
//! touches the widget, so every scene is testable as a value.

use ars_api::{Municipality, Station, StationId};
use serde::Serialize;

/// Default marker color before any classification is applied.
pub const DEFAULT_MARKER_COLOR: &str = "#9E9E9E";

/// Fallback region shown when nothing is selected (Valle del Cauca).
pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    latitude: 4.0,
    longitude: -76.55,
    zoom: 8.5,
};

/// Zoom applied when a station set is rendered.
pub const STATION_FOCUS_ZOOM: f64 = 13.0;
/// Zoom applied when a single station is highlighted.
pub const HIGHLIGHT_ZOOM: f64 = 14.0;

/// Map viewport: center plus zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

/// A station marker ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationMarker {
    pub id: StationId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Pin color; gray until a classification is applied.
    pub color: String,
    pub highlighted: bool,
    pub popup: MarkerPopup,
}

/// Popup content for a station marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerPopup {
    pub name: String,
    pub station_type: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Show the "center here" action (only when a year is selected).
    pub show_center_action: bool,
}

/// Floating control reporting how many stations are rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountOverlay {
    pub count: usize,
    /// Note that the lone station was selected automatically.
    pub auto_selected: bool,
}

/// Everything the bridge needs to redraw the station layer. Rendering a
/// scene always clears previously drawn markers and the overlay first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapScene {
    pub markers: Vec<StationMarker>,
    pub viewport: Viewport,
    pub overlay: Option<CountOverlay>,
    /// Whether marker clicks select the station.
    pub interactive: bool,
}

/// A municipality circle marker with click-to-select and a name tooltip.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MunicipalityMarker {
    pub id: u32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Instructions the engine hands to the map renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum MapInstruction {
    /// Redraw the municipality circle layer.
    RenderMunicipalities(Vec<MunicipalityMarker>),
    /// Redraw the station layer from a scene (clears the old one first).
    RenderStations(MapScene),
    /// Remove all station markers and the count overlay.
    ClearStations,
    /// Return the viewport to the default region.
    ResetView,
    /// Center and raise one station's marker, opening its popup.
    HighlightStation { station: StationId, zoom: f64 },
    /// Recolor one station's marker (classification result).
    SetMarkerColor {
        station: StationId,
        color: String,
        highlighted: bool,
    },
    /// Return every marker to the default color and size.
    ResetMarkerColors,
}

/// Build the station scene for a render pass.
///
/// Empty input resets the viewport to the default region; otherwise the
/// viewport centers on the first station. The selected station (if any)
/// carries `selected_color` and the highlight flag.
pub fn build_station_scene(
    stations: &[Station],
    year: Option<i32>,
    interactive: bool,
    selected: Option<StationId>,
    selected_color: Option<&str>,
) -> MapScene {
    if stations.is_empty() {
        return MapScene {
            markers: Vec::new(),
            viewport: DEFAULT_VIEWPORT,
            overlay: None,
            interactive,
        };
    }

    let markers = stations
        .iter()
        .map(|station| {
            let is_selected = selected == Some(station.id);
            let color = if is_selected {
                selected_color.unwrap_or(DEFAULT_MARKER_COLOR)
            } else {
                DEFAULT_MARKER_COLOR
            };
            StationMarker {
                id: station.id,
                name: station.name.clone(),
                latitude: station.latitude,
                longitude: station.longitude,
                color: color.to_string(),
                highlighted: is_selected,
                popup: MarkerPopup {
                    name: station.name.clone(),
                    station_type: station.station_type.clone(),
                    latitude: station.latitude,
                    longitude: station.longitude,
                    show_center_action: year.is_some(),
                },
            }
        })
        .collect::<Vec<_>>();

    let first = &stations[0];
    MapScene {
        viewport: Viewport {
            latitude: first.latitude,
            longitude: first.longitude,
            zoom: STATION_FOCUS_ZOOM,
        },
        overlay: Some(CountOverlay {
            count: markers.len(),
            auto_selected: year.is_some() && markers.len() == 1,
        }),
        markers,
        interactive,
    }
}

/// Build the municipality circle layer.
pub fn municipality_markers(municipalities: &[Municipality]) -> Vec<MunicipalityMarker> {
    municipalities
        .iter()
        .map(|m| MunicipalityMarker {
            id: m.id,
            name: m.name.clone(),
            latitude: m.latitude,
            longitude: m.longitude,
        })
        .collect()
}
