use serde::{Deserialize, Serialize};

/// Backend identifier for a (pollutant, averaging-time) pair.
pub type ExposureId = u32;

/// One averaging window under which a pollutant is reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureTime {
    #[serde(rename = "id_exposicion")]
    pub id: ExposureId,
    #[serde(rename = "tiempo_texto")]
    pub label: String,
    #[serde(rename = "tiempo_horas")]
    pub hours: f64,
}

/// A pollutant measured at a station, with its available averaging windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutantGroup {
    #[serde(rename = "simbolo")]
    pub symbol: String,
    #[serde(rename = "tiempos_exposicion")]
    pub exposure_times: Vec<ExposureTime>,
}

/// Response of `GET /contaminantes/{estacionId}/{anio}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutantsResponse {
    #[serde(rename = "contaminantes")]
    pub pollutants: Vec<PollutantGroup>,
    #[serde(rename = "total_contaminantes")]
    pub total: usize,
}

/// Flattened selector entry: one option per (pollutant, averaging time),
/// labelled like "PM2.5 - 24 horas".
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureOption {
    pub exposure_id: ExposureId,
    pub symbol: String,
    pub label: String,
    pub hours: f64,
}

impl PollutantsResponse {
    /// Flatten the grouped response into one selector option per exposure.
    pub fn options(&self) -> Vec<ExposureOption> {
        self.pollutants
            .iter()
            .flat_map(|group| {
                group.exposure_times.iter().map(|time| ExposureOption {
                    exposure_id: time.id,
                    symbol: group.symbol.clone(),
                    label: format!("{} - {}", group.symbol, time.label),
                    hours: time.hours,
                })
            })
            .collect()
    }
}
