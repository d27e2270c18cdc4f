//! Shared Dioxus components and Leaflet bridge for the Airsense dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the Leaflet map glue via `js_sys::eval()`
//! - `state`: Reactive AppState with Dioxus Signals
//! - `controller`: Glue between the filter engine, the API client and the UI
//! - `components`: Reusable RSX components (selectors, status bar, panel)

pub mod components;
pub mod controller;
pub mod js_bridge;
pub mod state;
