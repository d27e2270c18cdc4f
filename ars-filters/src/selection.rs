//! The four-level cascading selection.

use ars_api::{ExposureId, MunicipalityId, StationId};

/// Cascade depth of a filter control. Changing a level invalidates every
/// deeper level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FilterLevel {
    Municipality,
    Year,
    Station,
    Pollutant,
}

/// Current `(municipality?, year?, station?, exposure?)` tuple.
///
/// Invariant: a deeper field is only set when all shallower fields are set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub municipality: Option<MunicipalityId>,
    pub year: Option<i32>,
    pub station: Option<StationId>,
    pub pollutant: Option<ExposureId>,
}

impl Selection {
    /// Clear every field strictly deeper than `level`.
    pub fn clear_below(&mut self, level: FilterLevel) {
        if level < FilterLevel::Year {
            self.year = None;
        }
        if level < FilterLevel::Station {
            self.station = None;
        }
        if level < FilterLevel::Pollutant {
            self.pollutant = None;
        }
    }

    /// Whether any filter is currently active (controls the clear button).
    pub fn any_active(&self) -> bool {
        self.municipality.is_some()
            || self.year.is_some()
            || self.station.is_some()
            || self.pollutant.is_some()
    }

    /// Check the cascade invariant: deeper fields require shallower ones.
    pub fn is_consistent(&self) -> bool {
        if self.year.is_some() && self.municipality.is_none() {
            return false;
        }
        if self.station.is_some() && self.year.is_none() {
            return false;
        }
        if self.pollutant.is_some() && self.station.is_none() {
            return false;
        }
        true
    }
}
