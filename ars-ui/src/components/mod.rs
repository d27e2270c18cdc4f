//! Reusable Dioxus RSX components for the Airsense dashboard.

mod clear_filters_button;
mod dark_mode_toggle;
mod info_panel;
mod municipality_selector;
mod pollutant_selector;
mod station_selector;
mod status_bar;
mod year_selector;

pub use clear_filters_button::ClearFiltersButton;
pub use dark_mode_toggle::DarkModeToggle;
pub use info_panel::InfoPanel;
pub use municipality_selector::MunicipalitySelector;
pub use pollutant_selector::PollutantSelector;
pub use station_selector::StationSelector;
pub use status_bar::StatusBar;
pub use year_selector::YearSelector;
