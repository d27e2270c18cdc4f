//! Cascading filter state machine for the Airsense dashboard.
//!
//! The engine owns the four-level selection (municipality → year → station
//! → pollutant) plus the option lists and marker registry that hang off it,
//! and keeps everything mutually consistent. It performs no IO and touches
//! no widget: every user action is a synchronous call returning a
//! [`engine::Transition`] — declarative [`effects::Effect`]s for the UI to
//! apply plus tokened [`engine::FetchRequest`]s for the app to run against
//! the backend. Responses come back through [`engine::FilterEngine::apply`],
//! which discards anything stale.
//!
//! This makes the whole cascade testable without a real map or DOM; the
//! Dioxus layer in `ars-ui` is a thin interpreter of the emitted effects.

pub mod effects;
pub mod engine;
pub mod panel;
pub mod scene;
pub mod selection;

pub use effects::{Effect, SelectorOption, SelectorView, StatusMessage};
pub use engine::{FetchKind, FetchOutcome, FetchRequest, FilterConfig, FilterEngine, Transition};
pub use panel::{PanelContent, ReadingView};
pub use scene::{MapInstruction, MapScene, StationMarker, Viewport};
pub use selection::{FilterLevel, Selection};
