//! Data model and HTTP client for the Airsense backend API.
//!
//! The backend is an external REST service returning JSON with Spanish field
//! names (`id_municipio`, `anios_disponibles`, ...). This crate maps those
//! wire names onto idiomatic Rust structs and wraps all GET requests behind
//! [`client::ApiClient`], which normalizes every failure into an
//! [`error::ApiError`].
//!
//! Compiles for both native targets (used by `ars-cli`) and
//! `wasm32-unknown-unknown` (used by the Dioxus dashboard), since `reqwest`
//! is fetch-backed on wasm.

pub mod client;
mod de;
pub mod dictionary;
pub mod error;
pub mod municipality;
pub mod pollutant;
pub mod reading;
pub mod station;

pub use client::ApiClient;
pub use dictionary::DictionaryEntry;
pub use error::{ApiError, Result};
pub use municipality::{AvailableYears, Municipality, MunicipalityId};
pub use pollutant::{ExposureId, ExposureOption, ExposureTime, PollutantGroup, PollutantsResponse};
pub use reading::ReadingSummary;
pub use station::{Station, StationId, StationsForYear};
