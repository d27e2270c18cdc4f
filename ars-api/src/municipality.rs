use serde::{Deserialize, Serialize};

use crate::de::flexible_f64;

/// Backend identifier for a municipality.
pub type MunicipalityId = u32;

/// Administrative region containing one or more monitoring stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Municipality {
    #[serde(rename = "id_municipio")]
    pub id: MunicipalityId,
    #[serde(rename = "nombre_municipio")]
    pub name: String,
    #[serde(rename = "latitud", deserialize_with = "flexible_f64")]
    pub latitude: f64,
    #[serde(rename = "longitud", deserialize_with = "flexible_f64")]
    pub longitude: f64,
}

/// Response of `GET /anios/{municipioId}`: the years with available data
/// for one municipality. The backend answers 404 when there are none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableYears {
    #[serde(rename = "municipio")]
    pub municipality: String,
    #[serde(rename = "anios_disponibles")]
    pub years: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_municipality_wire_names() {
        let json = r#"{
            "id_municipio": 12,
            "nombre_municipio": "Cali",
            "latitud": 3.4516,
            "longitud": "-76.5320"
        }"#;
        let m: Municipality = serde_json::from_str(json).unwrap();
        assert_eq!(m.id, 12);
        assert_eq!(m.name, "Cali");
        assert!((m.latitude - 3.4516).abs() < 1e-9);
        assert!((m.longitude + 76.5320).abs() < 1e-9);
    }

    #[test]
    fn parses_available_years() {
        let json = r#"{"municipio": "Cali", "anios_disponibles": [2019, 2020]}"#;
        let y: AvailableYears = serde_json::from_str(json).unwrap();
        assert_eq!(y.municipality, "Cali");
        assert_eq!(y.years, vec![2019, 2020]);
    }
}
