//! Historical reading summary for a (station, year, exposure) triple.

use serde::{Deserialize, Serialize};

/// Response of `GET /datos?estacion=&anio=&exposicion=`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingSummary {
    #[serde(rename = "contaminante")]
    pub pollutant: PollutantInfo,
    #[serde(rename = "estadisticas")]
    pub statistics: Statistics,
    #[serde(rename = "excedencias")]
    pub exceedances: Exceedances,
    #[serde(rename = "clasificacion")]
    pub classification: Classification,
    #[serde(rename = "calidad_datos")]
    pub data_quality: DataQuality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutantInfo {
    #[serde(rename = "simbolo")]
    pub symbol: String,
    #[serde(rename = "unidades")]
    pub units: String,
    #[serde(rename = "tiempo_exposicion")]
    pub exposure: ExposureLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureLabel {
    #[serde(rename = "texto")]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(rename = "promedio")]
    pub mean: f64,
    #[serde(rename = "maximo")]
    pub max: f64,
    #[serde(rename = "minimo")]
    pub min: f64,
    #[serde(rename = "mediana")]
    pub median: f64,
    #[serde(rename = "percentil_98")]
    pub percentile_98: f64,
    /// ISO timestamp of the highest observed value, when the backend has one.
    #[serde(rename = "fecha_hora_maximo", default)]
    pub peak_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exceedances {
    // "excendecias" is the backend's spelling; keep it verbatim on the wire.
    #[serde(rename = "dias_excendecias")]
    pub days: u32,
    #[serde(rename = "excedencias_limite_actual")]
    pub over_current_limit: u32,
    #[serde(rename = "porcentaje_excedencias")]
    pub percentage: f64,
}

/// Categorical air-quality tier derived from WHO/regulatory thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(rename = "nivel")]
    pub level: String,
    /// Hex color used for the station marker and the panel hero block.
    pub color: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "limites_oms", default)]
    pub who_limits: Option<WhoLimits>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhoLimits {
    #[serde(rename = "buena")]
    pub good: f64,
    #[serde(rename = "regular")]
    pub moderate: f64,
    #[serde(rename = "tiempo_horas")]
    pub hours: f64,
    #[serde(rename = "fuente")]
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    #[serde(rename = "representatividad_temporal")]
    pub temporal_coverage: f64,
}
