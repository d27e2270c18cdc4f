//! The cascading filter state machine.
//!
//! Every user action (selector change, marker click, clear button) is a
//! synchronous engine call returning a [`Transition`]: effects for the UI
//! plus tokened fetch requests for the app to run. Each response is handed
//! back through [`FilterEngine::apply`] together with its original request;
//! a response whose token is no longer the latest for its channel — or
//! whose subject no longer matches the current selection — is discarded, so
//! a slow fetch can never overwrite newer UI state.

use ars_api::{
    ApiError, AvailableYears, ExposureId, ExposureOption, Municipality, MunicipalityId,
    PollutantsResponse, ReadingSummary, Station, StationId, StationsForYear,
};

use crate::effects::{Effect, SelectorOption, SelectorView, StatusMessage};
use crate::panel::{PanelContent, ReadingView};
use crate::scene::{self, MapInstruction, HIGHLIGHT_ZOOM};
use crate::selection::{FilterLevel, Selection};

const PLACEHOLDER_MUNICIPALITY: &str = "-- Todos los Municipios --";
const PLACEHOLDER_YEAR: &str = "-- Selecciona año --";
const PLACEHOLDER_STATION: &str = "-- Selecciona estación --";
const PLACEHOLDER_POLLUTANT: &str = "-- Selecciona contaminante --";

const LOCKED_YEAR: &str = "-- Primero selecciona municipio --";
const LOCKED_STATION: &str = "-- Primero selecciona año --";
const LOCKED_POLLUTANT: &str = "-- Primero selecciona estación --";

const STATUS_SHORT_MS: u32 = 2000;
const STATUS_INFO_MS: u32 = 2500;
const STATUS_ERROR_MS: u32 = 3000;

/// Tunables for the engine.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Delay before a lone year-filtered station is auto-selected, so the
    /// map transition stays visible. Zero is valid (tests use it).
    pub auto_select_delay_ms: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            auto_select_delay_ms: 500,
        }
    }
}

/// One fetch channel per filter level that owns a UI surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Municipalities,
    Years,
    Stations,
    Pollutants,
    Summary,
}

/// Monotonic per-channel tokens. A response is applied only when its token
/// is still the latest issued for its channel.
#[derive(Debug, Default)]
struct Tokens {
    counter: u64,
    municipalities: u64,
    years: u64,
    stations: u64,
    pollutants: u64,
    summary: u64,
}

impl Tokens {
    fn slot(&mut self, channel: Channel) -> &mut u64 {
        match channel {
            Channel::Municipalities => &mut self.municipalities,
            Channel::Years => &mut self.years,
            Channel::Stations => &mut self.stations,
            Channel::Pollutants => &mut self.pollutants,
            Channel::Summary => &mut self.summary,
        }
    }

    fn issue(&mut self, channel: Channel) -> u64 {
        self.counter += 1;
        let token = self.counter;
        *self.slot(channel) = token;
        token
    }

    fn is_current(&self, channel: Channel, token: u64) -> bool {
        let latest = match channel {
            Channel::Municipalities => self.municipalities,
            Channel::Years => self.years,
            Channel::Stations => self.stations,
            Channel::Pollutants => self.pollutants,
            Channel::Summary => self.summary,
        };
        latest == token
    }
}

/// What to fetch. The app maps each kind onto one `ApiClient` call.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchKind {
    Municipalities,
    Years {
        municipality: MunicipalityId,
    },
    MunicipalityStations {
        municipality: MunicipalityId,
    },
    YearStations {
        municipality: MunicipalityId,
        year: i32,
    },
    Pollutants {
        station: StationId,
        year: i32,
    },
    Summary {
        station: StationId,
        year: i32,
        exposure: ExposureId,
    },
}

impl FetchKind {
    fn channel(&self) -> Channel {
        match self {
            FetchKind::Municipalities => Channel::Municipalities,
            FetchKind::Years { .. } => Channel::Years,
            FetchKind::MunicipalityStations { .. } | FetchKind::YearStations { .. } => {
                Channel::Stations
            }
            FetchKind::Pollutants { .. } => Channel::Pollutants,
            FetchKind::Summary { .. } => Channel::Summary,
        }
    }
}

/// A fetch the app must perform, tagged with its staleness token.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub token: u64,
    pub kind: FetchKind,
}

/// The response payload matching a [`FetchRequest`].
#[derive(Debug)]
pub enum FetchOutcome {
    Municipalities(ars_api::Result<Vec<Municipality>>),
    Years(ars_api::Result<AvailableYears>),
    MunicipalityStations(ars_api::Result<Vec<Station>>),
    YearStations(ars_api::Result<StationsForYear>),
    Pollutants(ars_api::Result<PollutantsResponse>),
    Summary(ars_api::Result<ReadingSummary>),
}

/// Result of one engine call: UI effects plus fetches to run.
#[derive(Debug, Default)]
pub struct Transition {
    pub effects: Vec<Effect>,
    pub fetches: Vec<FetchRequest>,
}

/// Owns the cascading selection and everything that hangs off it.
pub struct FilterEngine {
    config: FilterConfig,
    selection: Selection,
    municipalities: Vec<Municipality>,
    years: Vec<i32>,
    /// Stations currently rendered; rebuilt on every municipality/year change.
    stations_on_map: Vec<Station>,
    stations_interactive: bool,
    pollutant_options: Vec<ExposureOption>,
    /// Last (station, year) pair that populated the pollutant list.
    pollutant_memo: Option<(StationId, i32)>,
    /// Classification color applied to the selected station's marker.
    selected_color: Option<String>,
    tokens: Tokens,
}

impl FilterEngine {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config,
            selection: Selection::default(),
            municipalities: Vec::new(),
            years: Vec::new(),
            stations_on_map: Vec::new(),
            stations_interactive: false,
            pollutant_options: Vec::new(),
            pollutant_memo: None,
            selected_color: None,
            tokens: Tokens::default(),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    fn request(&mut self, kind: FetchKind) -> FetchRequest {
        let token = self.tokens.issue(kind.channel());
        FetchRequest { token, kind }
    }

    // ───────────────────── selector view builders ─────────────────────

    fn municipality_view(&self) -> SelectorView {
        if self.municipalities.is_empty() {
            return SelectorView::loading("Cargando municipios...");
        }
        SelectorView::ready(
            PLACEHOLDER_MUNICIPALITY,
            self.municipalities
                .iter()
                .map(|m| SelectorOption::new(m.id, m.name.clone()))
                .collect(),
        )
        .with_selected(self.selection.municipality.map(|id| id.to_string()))
    }

    fn year_view(&self) -> SelectorView {
        SelectorView::ready(
            PLACEHOLDER_YEAR,
            self.years
                .iter()
                .map(|y| SelectorOption::new(y, y.to_string()))
                .collect(),
        )
        .with_selected(self.selection.year.map(|y| y.to_string()))
    }

    fn station_view(&self) -> SelectorView {
        SelectorView::ready(
            PLACEHOLDER_STATION,
            self.stations_on_map
                .iter()
                .map(|s| SelectorOption::new(s.id, s.name.clone()))
                .collect(),
        )
        .with_selected(self.selection.station.map(|id| id.to_string()))
    }

    fn pollutant_view(&self) -> SelectorView {
        SelectorView::ready(
            PLACEHOLDER_POLLUTANT,
            self.pollutant_options
                .iter()
                .map(|o| SelectorOption::new(o.exposure_id, o.label.clone()))
                .collect(),
        )
        .with_selected(self.selection.pollutant.map(|id| id.to_string()))
    }

    fn clear_button(&self) -> Effect {
        Effect::ClearButton {
            enabled: self.selection.any_active(),
        }
    }

    // ───────────────────── user actions ─────────────────────

    /// Initial load: lock dependent selectors and fetch the municipalities.
    pub fn start(&mut self) -> Transition {
        let mut t = Transition::default();
        t.effects.push(Effect::Selector(
            FilterLevel::Municipality,
            SelectorView::loading("Cargando municipios..."),
        ));
        t.effects.push(Effect::Selector(
            FilterLevel::Year,
            SelectorView::disabled(LOCKED_YEAR),
        ));
        t.effects.push(Effect::Selector(
            FilterLevel::Station,
            SelectorView::disabled(LOCKED_STATION),
        ));
        t.effects.push(Effect::Selector(
            FilterLevel::Pollutant,
            SelectorView::disabled(LOCKED_POLLUTANT),
        ));
        t.effects.push(Effect::Panel(PanelContent::Instructions));
        t.effects.push(Effect::ClearButton { enabled: false });
        t.effects
            .push(Effect::Status(StatusMessage::sticky("Cargando municipios...")));
        t.fetches.push(self.request(FetchKind::Municipalities));
        t
    }

    /// Municipality changed (selector or map marker). `None` resets to the
    /// default region view.
    pub fn select_municipality(&mut self, municipality: Option<MunicipalityId>) -> Transition {
        self.selection.municipality = municipality;
        self.selection.clear_below(FilterLevel::Municipality);
        self.years.clear();
        self.stations_on_map.clear();
        self.stations_interactive = false;
        self.pollutant_options.clear();
        self.pollutant_memo = None;
        self.selected_color = None;

        let mut t = Transition::default();
        t.effects.push(Effect::Selector(
            FilterLevel::Municipality,
            self.municipality_view(),
        ));
        t.effects.push(Effect::Selector(
            FilterLevel::Year,
            if municipality.is_some() {
                SelectorView::loading("Cargando años...")
            } else {
                SelectorView::disabled(LOCKED_YEAR)
            },
        ));
        t.effects.push(Effect::Selector(
            FilterLevel::Station,
            SelectorView::disabled(LOCKED_STATION),
        ));
        t.effects.push(Effect::Selector(
            FilterLevel::Pollutant,
            SelectorView::disabled(LOCKED_POLLUTANT),
        ));
        t.effects.push(Effect::Panel(PanelContent::Instructions));
        t.effects.push(Effect::Map(MapInstruction::ClearStations));
        t.effects.push(self.clear_button());

        match municipality {
            None => {
                t.effects.push(Effect::Map(MapInstruction::ResetView));
                t.effects.push(Effect::Status(StatusMessage::transient(
                    "Vista general del Valle del Cauca",
                    STATUS_SHORT_MS,
                )));
            }
            Some(m) => {
                t.effects.push(Effect::Status(StatusMessage::sticky(
                    "Cargando años disponibles...",
                )));
                t.fetches.push(self.request(FetchKind::Years { municipality: m }));
                t.fetches
                    .push(self.request(FetchKind::MunicipalityStations { municipality: m }));
            }
        }
        t
    }

    /// Year changed. `None` falls back to the municipality-level station
    /// list, rendered without per-marker interactivity.
    pub fn select_year(&mut self, year: Option<i32>) -> Transition {
        let Some(municipality) = self.selection.municipality else {
            return Transition::default();
        };

        self.selection.year = year;
        self.selection.clear_below(FilterLevel::Year);
        self.stations_on_map.clear();
        self.stations_interactive = false;
        self.pollutant_options.clear();
        self.pollutant_memo = None;
        self.selected_color = None;

        let mut t = Transition::default();
        t.effects
            .push(Effect::Selector(FilterLevel::Year, self.year_view()));
        t.effects.push(Effect::Selector(
            FilterLevel::Station,
            if year.is_some() {
                SelectorView::loading("Cargando estaciones...")
            } else {
                SelectorView::disabled(LOCKED_STATION)
            },
        ));
        t.effects.push(Effect::Selector(
            FilterLevel::Pollutant,
            SelectorView::disabled(LOCKED_POLLUTANT),
        ));
        t.effects.push(Effect::Panel(PanelContent::Instructions));
        t.effects.push(self.clear_button());

        match year {
            None => {
                t.effects.push(Effect::Status(StatusMessage::sticky(
                    "Cargando estaciones...",
                )));
                t.fetches
                    .push(self.request(FetchKind::MunicipalityStations { municipality }));
            }
            Some(y) => {
                t.effects.push(Effect::Status(StatusMessage::sticky(format!(
                    "Cargando estaciones operativas en {y}..."
                ))));
                t.fetches.push(self.request(FetchKind::YearStations {
                    municipality,
                    year: y,
                }));
            }
        }
        t
    }

    /// Station changed (selector or marker click). `None` resets all
    /// markers to the default color but keeps them on the map.
    pub fn select_station(&mut self, station: Option<StationId>) -> Transition {
        let Some(year) = self.selection.year else {
            return Transition::default();
        };

        let mut t = Transition::default();
        match station {
            None => {
                self.selection.station = None;
                self.selection.pollutant = None;
                self.selected_color = None;
                t.effects
                    .push(Effect::Selector(FilterLevel::Station, self.station_view()));
                t.effects.push(Effect::Selector(
                    FilterLevel::Pollutant,
                    SelectorView::disabled(LOCKED_POLLUTANT),
                ));
                t.effects.push(Effect::Panel(PanelContent::Instructions));
                t.effects.push(Effect::Map(MapInstruction::ResetMarkerColors));
                t.effects.push(self.clear_button());
            }
            Some(id) => {
                // Same (station, year) with a pollutant still chosen: keep
                // the loaded list instead of refetching and clearing it.
                if self.pollutant_memo == Some((id, year)) && self.selection.pollutant.is_some() {
                    self.selection.station = Some(id);
                    t.effects
                        .push(Effect::Selector(FilterLevel::Station, self.station_view()));
                    t.effects.push(Effect::Map(MapInstruction::HighlightStation {
                        station: id,
                        zoom: HIGHLIGHT_ZOOM,
                    }));
                    t.effects.push(Effect::Status(StatusMessage::transient(
                        "Misma estación seleccionada, conservando contaminante actual",
                        STATUS_INFO_MS,
                    )));
                    t.effects.push(self.clear_button());
                    return t;
                }

                self.selection.station = Some(id);
                self.selection.pollutant = None;
                self.selected_color = None;
                t.effects
                    .push(Effect::Selector(FilterLevel::Station, self.station_view()));
                t.effects.push(Effect::Selector(
                    FilterLevel::Pollutant,
                    SelectorView::loading("Cargando contaminantes..."),
                ));
                t.effects.push(Effect::Panel(PanelContent::Instructions));
                t.effects.push(Effect::Map(MapInstruction::ResetMarkerColors));
                t.effects.push(Effect::Map(MapInstruction::HighlightStation {
                    station: id,
                    zoom: HIGHLIGHT_ZOOM,
                }));
                t.effects.push(Effect::Status(StatusMessage::sticky(
                    "Cargando contaminantes disponibles...",
                )));
                t.effects.push(self.clear_button());
                t.fetches
                    .push(self.request(FetchKind::Pollutants { station: id, year }));
            }
        }
        t
    }

    /// Pollutant changed. `None` restores the instructional panel.
    pub fn select_pollutant(&mut self, exposure: Option<ExposureId>) -> Transition {
        let (Some(station), Some(year)) = (self.selection.station, self.selection.year) else {
            return Transition::default();
        };

        let mut t = Transition::default();
        match exposure {
            None => {
                self.selection.pollutant = None;
                t.effects.push(Effect::Selector(
                    FilterLevel::Pollutant,
                    self.pollutant_view(),
                ));
                t.effects.push(Effect::Panel(PanelContent::Instructions));
                t.effects.push(self.clear_button());
            }
            Some(e) => {
                self.selection.pollutant = Some(e);
                t.effects.push(Effect::Selector(
                    FilterLevel::Pollutant,
                    self.pollutant_view(),
                ));
                t.effects.push(Effect::Status(StatusMessage::sticky(
                    "📊 Cargando datos del contaminante...",
                )));
                t.effects.push(self.clear_button());
                t.fetches.push(self.request(FetchKind::Summary {
                    station,
                    year,
                    exposure: e,
                }));
            }
        }
        t
    }

    /// Deferred lone-station selection. A no-op when the map changed or the
    /// user picked a station while the delay ran.
    pub fn auto_select(&mut self, station: StationId) -> Transition {
        if !self.stations_interactive
            || self.selection.station.is_some()
            || !self.stations_on_map.iter().any(|s| s.id == station)
        {
            return Transition::default();
        }
        log::debug!("auto-selecting lone station {station}");
        self.select_station(Some(station))
    }

    /// Reset all four levels, the map and the panel. A no-op when no filter
    /// is active (the button is disabled then).
    pub fn clear_filters(&mut self) -> Transition {
        if !self.selection.any_active() {
            return Transition::default();
        }

        self.selection = Selection::default();
        self.years.clear();
        self.stations_on_map.clear();
        self.stations_interactive = false;
        self.pollutant_options.clear();
        self.pollutant_memo = None;
        self.selected_color = None;

        let mut t = Transition::default();
        t.effects.push(Effect::Selector(
            FilterLevel::Municipality,
            self.municipality_view(),
        ));
        t.effects.push(Effect::Selector(
            FilterLevel::Year,
            SelectorView::disabled(LOCKED_YEAR),
        ));
        t.effects.push(Effect::Selector(
            FilterLevel::Station,
            SelectorView::disabled(LOCKED_STATION),
        ));
        t.effects.push(Effect::Selector(
            FilterLevel::Pollutant,
            SelectorView::disabled(LOCKED_POLLUTANT),
        ));
        t.effects.push(Effect::Map(MapInstruction::ClearStations));
        t.effects.push(Effect::Map(MapInstruction::ResetView));
        t.effects.push(Effect::Panel(PanelContent::Instructions));
        t.effects.push(Effect::ClearButton { enabled: false });
        t.effects.push(Effect::Status(StatusMessage::transient(
            "✨ Filtros limpiados - Vista general",
            STATUS_SHORT_MS,
        )));
        t
    }

    // ───────────────────── response application ─────────────────────

    /// Apply a fetch response. Returns no effects when the response is
    /// stale (token superseded) or its subject left the current selection.
    pub fn apply(&mut self, request: &FetchRequest, outcome: FetchOutcome) -> Vec<Effect> {
        if !self.tokens.is_current(request.kind.channel(), request.token) {
            log::debug!("discarding stale response for {:?}", request.kind);
            return Vec::new();
        }

        match (&request.kind, outcome) {
            (FetchKind::Municipalities, FetchOutcome::Municipalities(result)) => {
                self.on_municipalities(result)
            }
            (FetchKind::Years { municipality }, FetchOutcome::Years(result)) => {
                self.on_years(*municipality, result)
            }
            (
                FetchKind::MunicipalityStations { municipality },
                FetchOutcome::MunicipalityStations(result),
            ) => self.on_municipality_stations(*municipality, result),
            (FetchKind::YearStations { municipality, year }, FetchOutcome::YearStations(result)) => {
                self.on_year_stations(*municipality, *year, result)
            }
            (FetchKind::Pollutants { station, year }, FetchOutcome::Pollutants(result)) => {
                self.on_pollutants(*station, *year, result)
            }
            (
                FetchKind::Summary {
                    station,
                    year,
                    exposure,
                },
                FetchOutcome::Summary(result),
            ) => self.on_summary(*station, *year, *exposure, result),
            (kind, _) => {
                log::warn!("fetch outcome does not match request kind {kind:?}");
                Vec::new()
            }
        }
    }

    fn status_error(error: &ApiError, dismiss_ms: u32) -> Effect {
        Effect::Status(StatusMessage::transient(
            format!("❌ {}", error.user_message()),
            dismiss_ms,
        ))
    }

    /// Error entry in the failed selector plus a transient status; upstream
    /// selectors are left untouched.
    fn selector_failure(level: FilterLevel, error: &ApiError) -> Vec<Effect> {
        vec![
            Effect::Selector(level, SelectorView::error(error.user_message())),
            Self::status_error(error, STATUS_ERROR_MS),
        ]
    }

    fn on_municipalities(
        &mut self,
        result: ars_api::Result<Vec<Municipality>>,
    ) -> Vec<Effect> {
        match result {
            Ok(list) => {
                log::info!("loaded {} municipalities", list.len());
                self.municipalities = list;
                vec![
                    Effect::Selector(FilterLevel::Municipality, self.municipality_view()),
                    Effect::Map(MapInstruction::RenderMunicipalities(
                        scene::municipality_markers(&self.municipalities),
                    )),
                    Effect::Status(StatusMessage::transient(
                        format!("{} municipios disponibles.", self.municipalities.len()),
                        STATUS_INFO_MS,
                    )),
                ]
            }
            Err(error) => Self::selector_failure(FilterLevel::Municipality, &error),
        }
    }

    fn on_years(
        &mut self,
        municipality: MunicipalityId,
        result: ars_api::Result<AvailableYears>,
    ) -> Vec<Effect> {
        if self.selection.municipality != Some(municipality) {
            return Vec::new();
        }
        match result {
            Ok(response) => {
                log::info!(
                    "loaded {} years for {}",
                    response.years.len(),
                    response.municipality
                );
                self.years = response.years.clone();
                vec![
                    Effect::Selector(FilterLevel::Year, self.year_view()),
                    Effect::Status(StatusMessage::transient(
                        format!(
                            "{} años disponibles para {}.",
                            response.years.len(),
                            response.municipality
                        ),
                        STATUS_INFO_MS,
                    )),
                ]
            }
            Err(error) => Self::selector_failure(FilterLevel::Year, &error),
        }
    }

    fn on_municipality_stations(
        &mut self,
        municipality: MunicipalityId,
        result: ars_api::Result<Vec<Station>>,
    ) -> Vec<Effect> {
        if self.selection.municipality != Some(municipality) || self.selection.year.is_some() {
            return Vec::new();
        }
        match result {
            Ok(stations) => {
                log::info!("rendering {} municipality stations", stations.len());
                self.stations_on_map = stations;
                self.stations_interactive = false;
                let scene =
                    scene::build_station_scene(&self.stations_on_map, None, false, None, None);
                let mut effects = vec![Effect::Map(MapInstruction::RenderStations(scene))];
                if self.stations_on_map.is_empty() {
                    effects.push(Effect::Status(StatusMessage::transient(
                        "⚠️ No hay estaciones para mostrar",
                        STATUS_ERROR_MS,
                    )));
                } else {
                    effects.push(Effect::Status(StatusMessage::transient(
                        format!("{} estaciones en el municipio.", self.stations_on_map.len()),
                        STATUS_INFO_MS,
                    )));
                }
                effects
            }
            Err(error) => vec![Self::status_error(&error, STATUS_ERROR_MS)],
        }
    }

    fn on_year_stations(
        &mut self,
        municipality: MunicipalityId,
        year: i32,
        result: ars_api::Result<StationsForYear>,
    ) -> Vec<Effect> {
        if self.selection.municipality != Some(municipality) || self.selection.year != Some(year) {
            return Vec::new();
        }
        match result {
            Ok(response) => {
                log::info!("rendering {} stations for {year}", response.stations.len());
                self.stations_on_map = response.stations;
                self.stations_interactive = true;
                let scene = scene::build_station_scene(
                    &self.stations_on_map,
                    Some(year),
                    true,
                    None,
                    None,
                );
                let mut effects = vec![Effect::Map(MapInstruction::RenderStations(scene))];
                if self.stations_on_map.is_empty() {
                    effects.push(Effect::Selector(
                        FilterLevel::Station,
                        SelectorView::disabled(PLACEHOLDER_STATION),
                    ));
                    effects.push(Effect::Status(StatusMessage::transient(
                        "⚠️ No hay estaciones para mostrar",
                        STATUS_ERROR_MS,
                    )));
                } else {
                    effects.push(Effect::Selector(FilterLevel::Station, self.station_view()));
                    effects.push(Effect::Status(StatusMessage::transient(
                        format!("{} estaciones operativas en {year}.", response.total),
                        STATUS_INFO_MS,
                    )));
                    if self.stations_on_map.len() == 1 {
                        effects.push(Effect::AutoSelectStation {
                            station: self.stations_on_map[0].id,
                            delay_ms: self.config.auto_select_delay_ms,
                        });
                    }
                }
                effects
            }
            Err(error) => Self::selector_failure(FilterLevel::Station, &error),
        }
    }

    fn on_pollutants(
        &mut self,
        station: StationId,
        year: i32,
        result: ars_api::Result<PollutantsResponse>,
    ) -> Vec<Effect> {
        if self.selection.station != Some(station) || self.selection.year != Some(year) {
            return Vec::new();
        }
        match result {
            Ok(response) => {
                log::info!("loaded {} pollutant options", response.total);
                self.pollutant_options = response.options();
                self.pollutant_memo = Some((station, year));
                vec![
                    Effect::Selector(FilterLevel::Pollutant, self.pollutant_view()),
                    Effect::Status(StatusMessage::transient(
                        format!("{} contaminantes disponibles.", response.total),
                        STATUS_INFO_MS,
                    )),
                ]
            }
            Err(error) => Self::selector_failure(FilterLevel::Pollutant, &error),
        }
    }

    fn on_summary(
        &mut self,
        station: StationId,
        year: i32,
        exposure: ExposureId,
        result: ars_api::Result<ReadingSummary>,
    ) -> Vec<Effect> {
        if self.selection.station != Some(station)
            || self.selection.year != Some(year)
            || self.selection.pollutant != Some(exposure)
        {
            return Vec::new();
        }
        match result {
            Ok(summary) => {
                let color = summary.classification.color.clone();
                self.selected_color = Some(color.clone());
                vec![
                    Effect::Panel(PanelContent::Reading(ReadingView::from_summary(&summary))),
                    Effect::Map(MapInstruction::SetMarkerColor {
                        station,
                        color,
                        highlighted: true,
                    }),
                    Effect::Status(StatusMessage::transient(
                        "✅ Datos cargados correctamente",
                        STATUS_SHORT_MS,
                    )),
                ]
            }
            Err(error) => {
                vec![
                    Effect::Panel(PanelContent::Error(error.user_message())),
                    Self::status_error(&error, STATUS_SHORT_MS),
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{MapScene, DEFAULT_VIEWPORT};
    use ars_api::pollutant::{ExposureTime, PollutantGroup};

    // ───────────────────── sample data ─────────────────────

    fn municipality(id: MunicipalityId, name: &str) -> Municipality {
        Municipality {
            id,
            name: name.to_string(),
            latitude: 3.45,
            longitude: -76.53,
        }
    }

    fn station(id: StationId, name: &str) -> Station {
        Station {
            id,
            name: name.to_string(),
            latitude: 3.40 + id as f64 * 0.01,
            longitude: -76.55,
            station_type: Some("Fija".to_string()),
        }
    }

    fn year_stations(stations: Vec<Station>) -> StationsForYear {
        StationsForYear {
            total: stations.len(),
            stations,
        }
    }

    fn pollutants_response() -> PollutantsResponse {
        PollutantsResponse {
            pollutants: vec![PollutantGroup {
                symbol: "PM2.5".to_string(),
                exposure_times: vec![ExposureTime {
                    id: 3,
                    label: "24 horas".to_string(),
                    hours: 24.0,
                }],
            }],
            total: 1,
        }
    }

    fn sample_summary() -> ReadingSummary {
        serde_json::from_str(
            r##"{
                "contaminante": {"simbolo": "PM2.5", "unidades": "µg/m³", "tiempo_exposicion": {"texto": "24 horas"}},
                "estadisticas": {"promedio": 18.3, "maximo": 54.1, "minimo": 2.0, "mediana": 16.7, "percentil_98": 43.9, "fecha_hora_maximo": "2020-03-15T14:00:00"},
                "excedencias": {"dias_excendecias": 12, "excedencias_limite_actual": 4, "porcentaje_excedencias": 3.29},
                "clasificacion": {"nivel": "Regular", "color": "#FF9800", "descripcion": "Niveles moderados."},
                "calidad_datos": {"representatividad_temporal": 91.4}
            }"##,
        )
        .unwrap()
    }

    // ───────────────────── effect inspection helpers ─────────────────────

    fn selector_view(effects: &[Effect], level: FilterLevel) -> Option<&SelectorView> {
        effects.iter().find_map(|e| match e {
            Effect::Selector(l, view) if *l == level => Some(view),
            _ => None,
        })
    }

    fn rendered_scene(effects: &[Effect]) -> Option<&MapScene> {
        effects.iter().find_map(|e| match e {
            Effect::Map(MapInstruction::RenderStations(scene)) => Some(scene),
            _ => None,
        })
    }

    fn status_texts(effects: &[Effect]) -> Vec<&str> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Status(message) => Some(message.text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn has_reset_view(effects: &[Effect]) -> bool {
        effects
            .iter()
            .any(|e| matches!(e, Effect::Map(MapInstruction::ResetView)))
    }

    // ───────────────────── engine drivers ─────────────────────

    fn engine() -> FilterEngine {
        FilterEngine::new(FilterConfig {
            auto_select_delay_ms: 0,
        })
    }

    /// Boot an engine with two municipalities loaded.
    fn booted_engine() -> FilterEngine {
        let mut e = engine();
        let t = e.start();
        let req = &t.fetches[0];
        e.apply(
            req,
            FetchOutcome::Municipalities(Ok(vec![
                municipality(12, "Cali"),
                municipality(15, "Palmira"),
            ])),
        );
        e
    }

    /// Drive municipality 12 + year 2020 with the given stations applied.
    fn engine_with_year_stations(stations: Vec<Station>) -> FilterEngine {
        let mut e = booted_engine();
        let t = e.select_municipality(Some(12));
        for req in &t.fetches {
            match &req.kind {
                FetchKind::Years { .. } => {
                    e.apply(
                        req,
                        FetchOutcome::Years(Ok(AvailableYears {
                            municipality: "Cali".to_string(),
                            years: vec![2019, 2020],
                        })),
                    );
                }
                FetchKind::MunicipalityStations { .. } => {
                    e.apply(
                        req,
                        FetchOutcome::MunicipalityStations(Ok(stations.clone())),
                    );
                }
                _ => unreachable!(),
            }
        }
        let t = e.select_year(Some(2020));
        let req = &t.fetches[0];
        e.apply(req, FetchOutcome::YearStations(Ok(year_stations(stations))));
        e
    }

    /// Full cascade down to a selected pollutant with its summary applied.
    fn engine_with_summary() -> FilterEngine {
        let mut e = engine_with_year_stations(vec![station(7, "Base Aérea"), station(8, "Univalle")]);
        let t = e.select_station(Some(7));
        e.apply(&t.fetches[0], FetchOutcome::Pollutants(Ok(pollutants_response())));
        let t = e.select_pollutant(Some(3));
        e.apply(&t.fetches[0], FetchOutcome::Summary(Ok(sample_summary())));
        e
    }

    // ───────────────────── startup ─────────────────────

    #[test]
    fn start_locks_dependents_and_fetches_municipalities() {
        let mut e = engine();
        let t = e.start();
        assert_eq!(t.fetches.len(), 1);
        assert_eq!(t.fetches[0].kind, FetchKind::Municipalities);
        assert!(!selector_view(&t.effects, FilterLevel::Year).unwrap().enabled);
        assert!(!selector_view(&t.effects, FilterLevel::Station).unwrap().enabled);
        assert!(!selector_view(&t.effects, FilterLevel::Pollutant).unwrap().enabled);
        assert!(t
            .effects
            .iter()
            .any(|e| matches!(e, Effect::ClearButton { enabled: false })));
    }

    #[test]
    fn municipalities_load_populates_selector_and_map() {
        let mut e = engine();
        let t = e.start();
        let effects = e.apply(
            &t.fetches[0],
            FetchOutcome::Municipalities(Ok(vec![
                municipality(12, "Cali"),
                municipality(15, "Palmira"),
            ])),
        );
        let view = selector_view(&effects, FilterLevel::Municipality).unwrap();
        assert!(view.enabled);
        assert_eq!(view.options.len(), 2);
        assert_eq!(view.options[0].label, "Cali");
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::Map(MapInstruction::RenderMunicipalities(markers)) if markers.len() == 2
        )));
    }

    #[test]
    fn empty_municipality_list_shows_disabled_error_entry() {
        let mut e = engine();
        let t = e.start();
        let effects = e.apply(
            &t.fetches[0],
            FetchOutcome::Municipalities(Err(ApiError::EmptyResult {
                message: "No se encontraron municipios".to_string(),
            })),
        );
        let view = selector_view(&effects, FilterLevel::Municipality).unwrap();
        assert!(!view.enabled);
        assert!(view.error);
        assert_eq!(view.placeholder, "⚠️ No se encontraron municipios");
        assert!(view.options.is_empty());
    }

    // ───────────────────── municipality level ─────────────────────

    #[test]
    fn selecting_municipality_fetches_years_and_stations() {
        let mut e = booted_engine();
        let t = e.select_municipality(Some(12));
        assert_eq!(t.fetches.len(), 2);
        assert_eq!(t.fetches[0].kind, FetchKind::Years { municipality: 12 });
        assert_eq!(
            t.fetches[1].kind,
            FetchKind::MunicipalityStations { municipality: 12 }
        );
        // dependents locked while loading
        assert!(!selector_view(&t.effects, FilterLevel::Station).unwrap().enabled);
        assert!(!selector_view(&t.effects, FilterLevel::Pollutant).unwrap().enabled);
    }

    #[test]
    fn deselecting_municipality_clears_cascade_and_resets_view() {
        let mut e = engine_with_summary();
        assert!(e.selection().pollutant.is_some());

        let t = e.select_municipality(None);
        assert!(t.fetches.is_empty());
        assert!(has_reset_view(&t.effects));
        assert_eq!(e.selection(), &Selection::default());
        assert!(!selector_view(&t.effects, FilterLevel::Year).unwrap().enabled);
        assert!(!selector_view(&t.effects, FilterLevel::Station).unwrap().enabled);
        assert!(!selector_view(&t.effects, FilterLevel::Pollutant).unwrap().enabled);
        assert!(t
            .effects
            .iter()
            .any(|e| matches!(e, Effect::Map(MapInstruction::ClearStations))));
    }

    #[test]
    fn years_for_cali_announce_count_and_options() {
        let mut e = booted_engine();
        let t = e.select_municipality(Some(12));
        let effects = e.apply(
            &t.fetches[0],
            FetchOutcome::Years(Ok(AvailableYears {
                municipality: "Cali".to_string(),
                years: vec![2019, 2020],
            })),
        );
        let view = selector_view(&effects, FilterLevel::Year).unwrap();
        assert!(view.enabled);
        assert_eq!(view.options.len(), 2);
        assert_eq!(view.options[0].value, "2019");
        assert!(status_texts(&effects).contains(&"2 años disponibles para Cali."));
    }

    #[test]
    fn years_failure_marks_year_selector_only() {
        let mut e = booted_engine();
        let t = e.select_municipality(Some(12));
        let effects = e.apply(
            &t.fetches[0],
            FetchOutcome::Years(Err(ApiError::NotFound {
                message: "No hay datos para este municipio".to_string(),
            })),
        );
        let view = selector_view(&effects, FilterLevel::Year).unwrap();
        assert!(view.error);
        // the municipality selector keeps its populated state
        assert!(selector_view(&effects, FilterLevel::Municipality).is_none());
        assert!(status_texts(&effects)
            .contains(&"❌ No hay datos para este municipio"));
    }

    // ───────────────────── year level ─────────────────────

    #[test]
    fn year_selection_renders_interactive_stations() {
        let e = engine_with_year_stations(vec![station(7, "Base Aérea"), station(8, "Univalle")]);
        assert_eq!(e.selection().year, Some(2020));
        assert!(e.stations_interactive);
        assert_eq!(e.stations_on_map.len(), 2);
    }

    #[test]
    fn year_station_scene_is_interactive_with_center_action() {
        let mut e = booted_engine();
        let t = e.select_municipality(Some(12));
        e.apply(
            &t.fetches[1],
            FetchOutcome::MunicipalityStations(Ok(vec![station(7, "Base Aérea")])),
        );
        let t = e.select_year(Some(2020));
        let effects = e.apply(
            &t.fetches[0],
            FetchOutcome::YearStations(Ok(year_stations(vec![
                station(7, "Base Aérea"),
                station(8, "Univalle"),
            ]))),
        );
        let scene = rendered_scene(&effects).unwrap();
        assert!(scene.interactive);
        assert!(scene.markers[0].popup.show_center_action);
        let view = selector_view(&effects, FilterLevel::Station).unwrap();
        assert!(view.enabled);
        assert_eq!(view.options.len(), 2);
        assert!(status_texts(&effects).contains(&"2 estaciones operativas en 2020."));
        // two stations: no auto-selection
        assert!(!effects
            .iter()
            .any(|e| matches!(e, Effect::AutoSelectStation { .. })));
    }

    #[test]
    fn lone_station_emits_auto_select_with_configured_delay() {
        let mut e = FilterEngine::new(FilterConfig {
            auto_select_delay_ms: 250,
        });
        let t = e.start();
        e.apply(
            &t.fetches[0],
            FetchOutcome::Municipalities(Ok(vec![municipality(12, "Cali")])),
        );
        let t = e.select_municipality(Some(12));
        e.apply(
            &t.fetches[0],
            FetchOutcome::Years(Ok(AvailableYears {
                municipality: "Cali".to_string(),
                years: vec![2020],
            })),
        );
        e.apply(
            &t.fetches[1],
            FetchOutcome::MunicipalityStations(Ok(vec![station(7, "Base Aérea")])),
        );
        let t = e.select_year(Some(2020));
        let effects = e.apply(
            &t.fetches[0],
            FetchOutcome::YearStations(Ok(year_stations(vec![station(7, "Base Aérea")]))),
        );
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::AutoSelectStation {
                station: 7,
                delay_ms: 250
            }
        )));
        let scene = rendered_scene(&effects).unwrap();
        assert!(scene.overlay.as_ref().unwrap().auto_selected);

        // the deferred selection then continues the cascade
        let t = e.auto_select(7);
        assert_eq!(e.selection().station, Some(7));
        assert_eq!(
            t.fetches[0].kind,
            FetchKind::Pollutants {
                station: 7,
                year: 2020
            }
        );
    }

    #[test]
    fn auto_select_is_noop_when_user_already_chose() {
        let mut e = engine_with_year_stations(vec![station(7, "A"), station(8, "B")]);
        e.select_station(Some(8));
        let t = e.auto_select(7);
        assert!(t.effects.is_empty());
        assert!(t.fetches.is_empty());
        assert_eq!(e.selection().station, Some(8));
    }

    #[test]
    fn empty_year_station_list_resets_viewport_and_keeps_selector_disabled() {
        let mut e = booted_engine();
        let t = e.select_municipality(Some(12));
        e.apply(
            &t.fetches[1],
            FetchOutcome::MunicipalityStations(Ok(vec![station(7, "Base Aérea")])),
        );
        let t = e.select_year(Some(2020));
        let effects = e.apply(
            &t.fetches[0],
            FetchOutcome::YearStations(Ok(year_stations(Vec::new()))),
        );
        let scene = rendered_scene(&effects).unwrap();
        assert!(scene.markers.is_empty());
        assert_eq!(scene.viewport, DEFAULT_VIEWPORT);
        assert!((scene.viewport.latitude - 4.0).abs() < 1e-9);
        assert!((scene.viewport.longitude + 76.55).abs() < 1e-9);
        assert!((scene.viewport.zoom - 8.5).abs() < 1e-9);
        let view = selector_view(&effects, FilterLevel::Station).unwrap();
        assert!(!view.enabled);
        assert!(status_texts(&effects).contains(&"⚠️ No hay estaciones para mostrar"));
    }

    #[test]
    fn year_deselect_reloads_municipality_stations_without_interactivity() {
        let mut e = engine_with_year_stations(vec![station(7, "A"), station(8, "B")]);
        let t = e.select_year(None);
        assert_eq!(
            t.fetches[0].kind,
            FetchKind::MunicipalityStations { municipality: 12 }
        );
        assert!(!selector_view(&t.effects, FilterLevel::Station).unwrap().enabled);
        let effects = e.apply(
            &t.fetches[0],
            FetchOutcome::MunicipalityStations(Ok(vec![station(7, "A")])),
        );
        let scene = rendered_scene(&effects).unwrap();
        assert!(!scene.interactive);
        assert!(!scene.markers[0].popup.show_center_action);
    }

    // ───────────────────── station level ─────────────────────

    #[test]
    fn station_selection_highlights_and_fetches_pollutants() {
        let mut e = engine_with_year_stations(vec![station(7, "A"), station(8, "B")]);
        let t = e.select_station(Some(7));
        assert_eq!(
            t.fetches[0].kind,
            FetchKind::Pollutants {
                station: 7,
                year: 2020
            }
        );
        assert!(t.effects.iter().any(|e| matches!(
            e,
            Effect::Map(MapInstruction::HighlightStation { station: 7, .. })
        )));
        let view = selector_view(&t.effects, FilterLevel::Station).unwrap();
        assert_eq!(view.selected.as_deref(), Some("7"));
    }

    #[test]
    fn same_station_and_year_preserve_pollutant_selection() {
        let mut e = engine_with_summary();
        assert_eq!(e.selection().pollutant, Some(3));

        // Re-selecting the same station (e.g. a marker click) must not
        // refetch or clear the loaded pollutant list.
        let t = e.select_station(Some(7));
        assert!(t.fetches.is_empty());
        assert!(selector_view(&t.effects, FilterLevel::Pollutant).is_none());
        assert_eq!(e.selection().pollutant, Some(3));
        assert!(status_texts(&t.effects)
            .contains(&"Misma estación seleccionada, conservando contaminante actual"));
    }

    #[test]
    fn changing_station_refetches_pollutants() {
        let mut e = engine_with_summary();
        let t = e.select_station(Some(8));
        assert_eq!(
            t.fetches[0].kind,
            FetchKind::Pollutants {
                station: 8,
                year: 2020
            }
        );
        assert_eq!(e.selection().pollutant, None);
    }

    #[test]
    fn deselecting_station_resets_colors_but_keeps_markers() {
        let mut e = engine_with_year_stations(vec![station(7, "A"), station(8, "B")]);
        e.select_station(Some(7));
        let t = e.select_station(None);
        assert!(t
            .effects
            .iter()
            .any(|e| matches!(e, Effect::Map(MapInstruction::ResetMarkerColors))));
        assert!(!t
            .effects
            .iter()
            .any(|e| matches!(e, Effect::Map(MapInstruction::ClearStations))));
        assert!(rendered_scene(&t.effects).is_none());
        assert_eq!(e.stations_on_map.len(), 2);
    }

    // ───────────────────── pollutant level ─────────────────────

    #[test]
    fn summary_renders_panel_and_recolors_marker() {
        let mut e = engine_with_year_stations(vec![station(7, "A")]);
        let t = e.select_station(Some(7));
        e.apply(&t.fetches[0], FetchOutcome::Pollutants(Ok(pollutants_response())));
        let t = e.select_pollutant(Some(3));
        let effects = e.apply(&t.fetches[0], FetchOutcome::Summary(Ok(sample_summary())));

        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::Panel(PanelContent::Reading(view)) if view.symbol == "PM2.5"
        )));
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::Map(MapInstruction::SetMarkerColor {
                station: 7,
                color,
                highlighted: true
            }) if color == "#FF9800"
        )));
    }

    #[test]
    fn summary_failure_shows_panel_error() {
        let mut e = engine_with_year_stations(vec![station(7, "A")]);
        let t = e.select_station(Some(7));
        e.apply(&t.fetches[0], FetchOutcome::Pollutants(Ok(pollutants_response())));
        let t = e.select_pollutant(Some(3));
        let effects = e.apply(
            &t.fetches[0],
            FetchOutcome::Summary(Err(ApiError::NotFound {
                message: "No hay datos disponibles para esta combinación".to_string(),
            })),
        );
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::Panel(PanelContent::Error(msg))
                if msg == "No hay datos disponibles para esta combinación"
        )));
    }

    #[test]
    fn deselecting_pollutant_restores_instructions() {
        let mut e = engine_with_summary();
        let t = e.select_pollutant(None);
        assert!(t.fetches.is_empty());
        assert!(t
            .effects
            .iter()
            .any(|e| matches!(e, Effect::Panel(PanelContent::Instructions))));
        assert_eq!(e.selection().pollutant, None);
    }

    // ───────────────────── stale responses ─────────────────────

    #[test]
    fn stale_year_station_response_is_discarded() {
        let mut e = booted_engine();
        let t = e.select_municipality(Some(12));
        e.apply(
            &t.fetches[0],
            FetchOutcome::Years(Ok(AvailableYears {
                municipality: "Cali".to_string(),
                years: vec![2019, 2020],
            })),
        );

        let first = e.select_year(Some(2019));
        let second = e.select_year(Some(2020));

        // The 2019 response arrives late: it must not touch the UI.
        let stale = e.apply(
            &first.fetches[0],
            FetchOutcome::YearStations(Ok(year_stations(vec![station(1, "Vieja")]))),
        );
        assert!(stale.is_empty());
        assert!(e.stations_on_map.is_empty());

        let fresh = e.apply(
            &second.fetches[0],
            FetchOutcome::YearStations(Ok(year_stations(vec![station(2, "Nueva")]))),
        );
        assert!(!fresh.is_empty());
        assert_eq!(e.stations_on_map[0].name, "Nueva");
    }

    #[test]
    fn summary_for_superseded_station_is_discarded() {
        let mut e = engine_with_year_stations(vec![station(7, "A"), station(8, "B")]);
        let t = e.select_station(Some(7));
        e.apply(&t.fetches[0], FetchOutcome::Pollutants(Ok(pollutants_response())));
        let summary_req = e.select_pollutant(Some(3)).fetches.remove(0);

        // The user moves to another station before the summary lands.
        e.select_station(Some(8));
        let effects = e.apply(&summary_req, FetchOutcome::Summary(Ok(sample_summary())));
        assert!(effects.is_empty());
        assert!(e.selected_color.is_none());
    }

    #[test]
    fn years_response_after_municipality_cleared_is_discarded() {
        let mut e = booted_engine();
        let t = e.select_municipality(Some(12));
        let years_req = t.fetches[0].clone();
        e.select_municipality(None);
        let effects = e.apply(
            &years_req,
            FetchOutcome::Years(Ok(AvailableYears {
                municipality: "Cali".to_string(),
                years: vec![2019],
            })),
        );
        assert!(effects.is_empty());
        assert!(e.years.is_empty());
    }

    // ───────────────────── clear filters ─────────────────────

    #[test]
    fn clear_filters_round_trips_to_initial_state() {
        let mut e = engine_with_summary();
        assert!(e.selection().any_active());

        let t = e.clear_filters();
        assert_eq!(e.selection(), &Selection::default());
        assert!(has_reset_view(&t.effects));
        assert!(t
            .effects
            .iter()
            .any(|e| matches!(e, Effect::Map(MapInstruction::ClearStations))));
        assert!(t
            .effects
            .iter()
            .any(|e| matches!(e, Effect::Panel(PanelContent::Instructions))));
        assert!(t
            .effects
            .iter()
            .any(|e| matches!(e, Effect::ClearButton { enabled: false })));

        // the municipality list survives; its selection does not
        let view = selector_view(&t.effects, FilterLevel::Municipality).unwrap();
        assert!(view.enabled);
        assert_eq!(view.options.len(), 2);
        assert!(view.selected.is_none());
        for level in [FilterLevel::Year, FilterLevel::Station, FilterLevel::Pollutant] {
            assert!(!selector_view(&t.effects, level).unwrap().enabled);
        }
    }

    #[test]
    fn clear_filters_is_noop_when_nothing_is_active() {
        let mut e = booted_engine();
        let t = e.clear_filters();
        assert!(t.effects.is_empty());
        assert!(t.fetches.is_empty());
    }
}
