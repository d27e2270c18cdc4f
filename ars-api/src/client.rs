//! Generic GET client for the Airsense backend.
//!
//! Single entry point for every request the dashboard and the CLI issue:
//! joins the configured base URL with a path, performs the request, and on
//! a non-success status tries to read the JSON error body the backend sends
//! (`{"error": ...}` or `{"mensaje": ...}`), falling back to
//! `"HTTP <status>: <statusText>"`. Requests are never retried; failures
//! surface to the caller for UI handling.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::dictionary::DictionaryEntry;
use crate::error::{ApiError, Result};
use crate::municipality::{AvailableYears, Municipality, MunicipalityId};
use crate::pollutant::PollutantsResponse;
use crate::reading::ReadingSummary;
use crate::station::{Station, StationId, StationsForYear};

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL (trailing slash tolerated).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the base URL and a path, tolerating a missing leading slash.
    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Issue a GET and decode the JSON body.
    ///
    /// `not_found` is the endpoint-specific user message for a 404; when
    /// `None`, a 404 is reported like any other error status.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        not_found: Option<String>,
    ) -> Result<T> {
        let url = self.url(path);
        log::debug!("GET {url}");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            if status == StatusCode::NOT_FOUND {
                if let Some(message) = not_found {
                    return Err(ApiError::NotFound { message });
                }
            }
            let fallback = http_status_message(status);
            let message = match response.text().await {
                Ok(body) => extract_error_message(&body).unwrap_or(fallback),
                Err(_) => fallback,
            };
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// `GET /municipios` — all municipalities with monitoring coverage.
    ///
    /// A 2xx empty list is an error for the UI: the municipality selector
    /// must show a disabled "no data" entry instead of an empty dropdown.
    pub async fn municipalities(&self) -> Result<Vec<Municipality>> {
        let list: Vec<Municipality> = self.get_json("/municipios", None).await?;
        if list.is_empty() {
            return Err(ApiError::EmptyResult {
                message: "No se encontraron municipios".to_string(),
            });
        }
        Ok(list)
    }

    /// `GET /anios/{municipioId}` — years with available data.
    pub async fn available_years(&self, municipality: MunicipalityId) -> Result<AvailableYears> {
        self.get_json(
            &format!("/anios/{municipality}"),
            Some("No hay datos para este municipio".to_string()),
        )
        .await
    }

    /// `GET /estaciones/{municipioId}` — all stations of a municipality.
    pub async fn stations(&self, municipality: MunicipalityId) -> Result<Vec<Station>> {
        self.get_json(&format!("/estaciones/{municipality}"), None)
            .await
    }

    /// `GET /estaciones/{municipioId}/{anio}` — stations operational in a year.
    pub async fn stations_for_year(
        &self,
        municipality: MunicipalityId,
        year: i32,
    ) -> Result<StationsForYear> {
        self.get_json(
            &format!("/estaciones/{municipality}/{year}"),
            Some(format!("No hay estaciones con datos para el año {year}")),
        )
        .await
    }

    /// `GET /contaminantes/{estacionId}/{anio}` — pollutant exposure options.
    pub async fn pollutants(&self, station: StationId, year: i32) -> Result<PollutantsResponse> {
        self.get_json(
            &format!("/contaminantes/{station}/{year}"),
            Some("No hay contaminantes medidos en este período".to_string()),
        )
        .await
    }

    /// `GET /datos?estacion=&anio=&exposicion=` — reading summary.
    pub async fn reading_summary(
        &self,
        station: StationId,
        year: i32,
        exposure: u32,
    ) -> Result<ReadingSummary> {
        self.get_json(
            &format!("/datos?estacion={station}&anio={year}&exposicion={exposure}"),
            Some("No hay datos disponibles para esta combinación".to_string()),
        )
        .await
    }

    /// `GET /diccionario` — pollutant reference entries.
    pub async fn dictionary(&self) -> Result<Vec<DictionaryEntry>> {
        self.get_json("/diccionario", None).await
    }
}

/// `"HTTP <status>: <statusText>"` fallback when the body has no message.
fn http_status_message(status: StatusCode) -> String {
    format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    )
}

/// Pull a human-readable message out of a JSON error body.
/// The backend uses `error` in newer endpoints and `mensaje` in older ones.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .or_else(|| value.get("mensaje"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
