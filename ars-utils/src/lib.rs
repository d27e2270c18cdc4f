//! Shared utility functions for Airsense crates.

/// Date utility functions
pub mod dates {
    use chrono::{NaiveDateTime, Timelike};

    const SPANISH_MONTHS: [&str; 12] = [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ];

    /// Parse a backend timestamp. The API emits ISO-8601 local timestamps,
    /// sometimes with a trailing `Z` or fractional seconds.
    pub fn parse_timestamp(s: &str) -> anyhow::Result<NaiveDateTime> {
        let trimmed = s.trim().trim_end_matches('Z');
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(dt);
            }
        }
        anyhow::bail!("unrecognized timestamp: {s}")
    }

    /// Format a peak timestamp the way the panel shows it:
    /// `"15 de marzo de 2020, 14:00"`. Unparseable or missing input
    /// renders as `"No disponible"`.
    pub fn format_peak_timestamp(raw: Option<&str>) -> String {
        use chrono::Datelike;

        let Some(raw) = raw else {
            return "No disponible".to_string();
        };
        match parse_timestamp(raw) {
            Ok(dt) => {
                let month = SPANISH_MONTHS[dt.month0() as usize];
                format!(
                    "{} de {} de {}, {:02}:{:02}",
                    dt.day(),
                    month,
                    dt.year(),
                    dt.hour(),
                    dt.minute()
                )
            }
            Err(_) => "No disponible".to_string(),
        }
    }

}
