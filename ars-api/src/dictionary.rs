use serde::{Deserialize, Serialize};

/// One pollutant reference entry from `GET /diccionario`.
///
/// Consumed by the CLI `dictionary` subcommand; the in-app dictionary
/// viewer lives outside this workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    #[serde(rename = "simbolo")]
    pub symbol: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "color_hex", default)]
    pub color: Option<String>,
    #[serde(rename = "que_es")]
    pub what_is_it: String,
    #[serde(rename = "causas")]
    pub causes: String,
    #[serde(rename = "consecuencias")]
    pub consequences: String,
}
