use serde::{Deserialize, Serialize};

use crate::de::flexible_f64;

/// Backend identifier for a monitoring station.
pub type StationId = u32;

/// Fixed air-quality monitoring point with geographic coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[serde(rename = "id_estacion")]
    pub id: StationId,
    #[serde(rename = "nombre_estacion")]
    pub name: String,
    #[serde(rename = "latitud", deserialize_with = "flexible_f64")]
    pub latitude: f64,
    #[serde(rename = "longitud", deserialize_with = "flexible_f64")]
    pub longitude: f64,
    #[serde(rename = "tipo_estacion", default)]
    pub station_type: Option<String>,
}

/// Response of `GET /estaciones/{municipioId}/{anio}`: stations operational
/// in the given year. The backend answers 404 when there are none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationsForYear {
    #[serde(rename = "estaciones")]
    pub stations: Vec<Station>,
    #[serde(rename = "total_estaciones")]
    pub total: usize,
}
