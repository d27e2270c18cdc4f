//! Declarative UI updates emitted by the filter engine.
//!
//! The web app applies these to signals and the Leaflet bridge; tests in
//! this crate assert on them directly, with no widget in sight.

use ars_api::StationId;

use crate::panel::PanelContent;
use crate::scene::MapInstruction;
use crate::selection::FilterLevel;

/// One unit of UI work. Order within a transition matters.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Replace the view of one selector.
    Selector(FilterLevel, SelectorView),
    /// Drive the map renderer.
    Map(MapInstruction),
    /// Replace the info panel content.
    Panel(PanelContent),
    /// Show a status-bar message, optionally auto-dismissed.
    Status(StatusMessage),
    /// Select a lone station after a (possibly zero) delay, so the map
    /// transition stays visible before the cascade continues.
    AutoSelectStation { station: StationId, delay_ms: u32 },
    /// Enable or disable the clear-filters button.
    ClearButton { enabled: bool },
}

/// One `<option>` of a selector.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorOption {
    pub value: String,
    pub label: String,
}

impl SelectorOption {
    pub fn new(value: impl ToString, label: impl Into<String>) -> Self {
        Self {
            value: value.to_string(),
            label: label.into(),
        }
    }
}

/// Everything a `<select>` needs to render: placeholder entry, options,
/// enabled flag, error styling, and the currently selected value.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorView {
    pub placeholder: String,
    pub options: Vec<SelectorOption>,
    pub enabled: bool,
    pub error: bool,
    pub selected: Option<String>,
}

impl SelectorView {
    /// Disabled selector with only a placeholder ("-- Primero selecciona... --").
    pub fn disabled(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            options: Vec::new(),
            enabled: false,
            error: false,
            selected: None,
        }
    }

    /// Disabled selector showing a loading placeholder.
    pub fn loading(text: impl Into<String>) -> Self {
        Self::disabled(text)
    }

    /// Disabled selector showing an inline error entry.
    pub fn error(message: impl AsRef<str>) -> Self {
        Self {
            placeholder: format!("⚠️ {}", message.as_ref()),
            options: Vec::new(),
            enabled: false,
            error: true,
            selected: None,
        }
    }

    /// Enabled selector with a placeholder and options.
    pub fn ready(placeholder: impl Into<String>, options: Vec<SelectorOption>) -> Self {
        Self {
            placeholder: placeholder.into(),
            options,
            enabled: true,
            error: false,
            selected: None,
        }
    }

    pub fn with_selected(mut self, selected: Option<String>) -> Self {
        self.selected = selected;
        self
    }
}

/// Status-bar message. `clear_after_ms` of `None` keeps it until replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub clear_after_ms: Option<u32>,
}

impl StatusMessage {
    /// Message that stays up until the next one (e.g. "Cargando...").
    pub fn sticky(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            clear_after_ms: None,
        }
    }

    /// Message auto-dismissed after `ms` milliseconds.
    pub fn transient(text: impl Into<String>, ms: u32) -> Self {
        Self {
            text: text.into(),
            clear_after_ms: Some(ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_view_is_disabled_and_flagged() {
        let view = SelectorView::error("No hay datos para este municipio");
        assert!(!view.enabled);
        assert!(view.error);
        assert_eq!(view.placeholder, "⚠️ No hay datos para este municipio");
        assert!(view.options.is_empty());
    }

    #[test]
    fn ready_view_carries_options() {
        let view = SelectorView::ready(
            "-- Selecciona año --",
            vec![SelectorOption::new(2019, "2019"), SelectorOption::new(2020, "2020")],
        );
        assert!(view.enabled);
        assert_eq!(view.options.len(), 2);
        assert_eq!(view.options[0].value, "2019");
    }

    #[test]
    fn with_selected_sets_value() {
        let view = SelectorView::ready("--", vec![SelectorOption::new(7, "Base Aérea")])
            .with_selected(Some("7".to_string()));
        assert_eq!(view.selected.as_deref(), Some("7"));
    }
}
