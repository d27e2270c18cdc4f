//! Info panel view models.
//!
//! [`PanelContent`] is the declarative contract between the engine and the
//! panel renderer: instructional placeholder, a formatted reading, or an
//! error card. `ars-ui` renders it; tests assert on it.

use ars_api::reading::{Classification, ReadingSummary, WhoLimits};
use ars_utils::dates;

/// What the info panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    /// The four-step usage instructions shown before a pollutant is chosen.
    Instructions,
    /// A rendered reading summary.
    Reading(ReadingView),
    /// A fetch failure, rendered inline in the panel.
    Error(String),
}

/// Display model for one reading summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingView {
    pub symbol: String,
    pub exposure_text: String,
    pub quality_text: String,
    pub color: String,
    pub units: String,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub median: f64,
    pub percentile_98: f64,
    pub exceedance_days: u32,
    pub over_current_limit: u32,
    pub exceedance_percentage: f64,
    pub who_limits: Option<WhoLimitsView>,
    pub peak_time: String,
    pub temporal_coverage: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhoLimitsView {
    pub good: f64,
    pub moderate: f64,
    pub hours: f64,
    pub source: String,
}

/// Map a classification level onto the user-facing quality line.
pub fn quality_text(classification: &Classification) -> String {
    let level = classification.level.to_lowercase();
    if level.contains("buena") {
        "Calidad del aire: Buena 🟢".to_string()
    } else if level.contains("regular") {
        "Calidad del aire: Moderada 🟠".to_string()
    } else if level.contains("mala") {
        "Calidad del aire: Mala 🔴".to_string()
    } else if classification.level.trim().is_empty() {
        "Sin datos ⚪".to_string()
    } else {
        classification.level.clone()
    }
}

impl ReadingView {
    pub fn from_summary(summary: &ReadingSummary) -> Self {
        Self {
            symbol: summary.pollutant.symbol.clone(),
            exposure_text: summary.pollutant.exposure.text.clone(),
            quality_text: quality_text(&summary.classification),
            color: summary.classification.color.clone(),
            units: summary.pollutant.units.clone(),
            mean: summary.statistics.mean,
            max: summary.statistics.max,
            min: summary.statistics.min,
            median: summary.statistics.median,
            percentile_98: summary.statistics.percentile_98,
            exceedance_days: summary.exceedances.days,
            over_current_limit: summary.exceedances.over_current_limit,
            exceedance_percentage: summary.exceedances.percentage,
            who_limits: summary.classification.who_limits.as_ref().map(WhoLimitsView::from),
            peak_time: dates::format_peak_timestamp(summary.statistics.peak_time.as_deref()),
            temporal_coverage: summary.data_quality.temporal_coverage,
            description: summary.classification.description.clone(),
        }
    }
}

impl From<&WhoLimits> for WhoLimitsView {
    fn from(limits: &WhoLimits) -> Self {
        Self {
            good: limits.good,
            moderate: limits.moderate,
            hours: limits.hours,
            source: limits.source.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classification(level: &str) -> Classification {
        Classification {
            level: level.to_string(),
            color: "#4CAF50".to_string(),
            description: String::new(),
            who_limits: None,
        }
    }

    #[test]
    fn quality_text_maps_known_tiers() {
        assert_eq!(
            quality_text(&classification("Buena")),
            "Calidad del aire: Buena 🟢"
        );
        assert_eq!(
            quality_text(&classification("regular")),
            "Calidad del aire: Moderada 🟠"
        );
        assert_eq!(
            quality_text(&classification("Muy mala")),
            "Calidad del aire: Mala 🔴"
        );
    }

    #[test]
    fn quality_text_passes_unknown_levels_through() {
        assert_eq!(quality_text(&classification("Peligrosa")), "Peligrosa");
        assert_eq!(quality_text(&classification("  ")), "Sin datos ⚪");
    }

    #[test]
    fn reading_view_formats_peak_and_copies_stats() {
        let json = r##"{
            "contaminante": {"simbolo": "PM10", "unidades": "µg/m³", "tiempo_exposicion": {"texto": "24 horas"}},
            "estadisticas": {"promedio": 30.0, "maximo": 80.0, "minimo": 5.0, "mediana": 28.0, "percentil_98": 70.0, "fecha_hora_maximo": "2021-01-02T08:30:00"},
            "excedencias": {"dias_excendecias": 3, "excedencias_limite_actual": 1, "porcentaje_excedencias": 0.82},
            "clasificacion": {"nivel": "Buena", "color": "#4CAF50", "descripcion": "Aire limpio."},
            "calidad_datos": {"representatividad_temporal": 95.0}
        }"##;
        let summary: ReadingSummary = serde_json::from_str(json).unwrap();
        let view = ReadingView::from_summary(&summary);
        assert_eq!(view.symbol, "PM10");
        assert_eq!(view.quality_text, "Calidad del aire: Buena 🟢");
        assert_eq!(view.peak_time, "2 de enero de 2021, 08:30");
        assert!(view.who_limits.is_none());
        assert_eq!(view.exceedance_days, 3);
    }
}
