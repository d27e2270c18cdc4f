//! Info panel: instructions, a rendered reading summary, or an error card.

use ars_filters::{PanelContent, ReadingView};
use dioxus::prelude::*;

use crate::state::AppState;

/// Side panel showing the reading for the selected pollutant, or the
/// four-step usage instructions while nothing is selected.
#[component]
pub fn InfoPanel() -> Element {
    let state = use_context::<AppState>();
    let content = state.panel.read().clone();

    rsx! {
        div {
            id: "pollutant-info",
            style: "padding: 12px; background: white; border-radius: 8px; min-height: 300px;",
            if let PanelContent::Error(message) = &content {
                PanelError { message: message.clone() }
            } else if let PanelContent::Reading(view) = &content {
                ReadingPanel { view: view.clone() }
            } else {
                Instructions {}
            }
        }
    }
}

/// The four usage steps shown before a pollutant is chosen.
#[component]
fn Instructions() -> Element {
    rsx! {
        div {
            style: "text-align: center; padding: 25px 20px;",
            h2 {
                style: "margin-bottom: 15px; color: #2c3e50; font-size: 22px;",
                "Cómo usar la aplicación 🌍"
            }
            p {
                style: "color: #5a6c7d; margin-bottom: 24px; font-size: 14px; line-height: 1.6;",
                "Explora 13 años de datos históricos (2011-2023) de calidad del aire en el Valle del Cauca"
            }
            div {
                style: "display: inline-block; text-align: left; width: 100%; max-width: 340px;",
                InstructionStep {
                    step: "PASO 1".to_string(),
                    text: "📍 Selecciona un municipio del Valle del Cauca".to_string(),
                    color: "#7aa05a".to_string(),
                }
                InstructionStep {
                    step: "PASO 2".to_string(),
                    text: "🎯 Haz clic en una estación de monitoreo".to_string(),
                    color: "#6aa1be".to_string(),
                }
                InstructionStep {
                    step: "PASO 3".to_string(),
                    text: "🧪 Escoge un contaminante atmosférico".to_string(),
                    color: "#d66576".to_string(),
                }
                InstructionStep {
                    step: "PASO 4".to_string(),
                    text: "📊 Consulta datos y límites OMS".to_string(),
                    color: "#3ada92".to_string(),
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct InstructionStepProps {
    step: String,
    text: String,
    color: String,
}

#[component]
fn InstructionStep(props: InstructionStepProps) -> Element {
    rsx! {
        div {
            style: "margin-bottom: 12px; padding: 14px 16px; background: {props.color}; border-radius: 10px; color: white;",
            div {
                style: "font-weight: bold; font-size: 13px; opacity: 0.9; margin-bottom: 4px;",
                "{props.step}"
            }
            div { style: "font-size: 15px;", "{props.text}" }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct PanelErrorProps {
    message: String,
}

/// Inline error card shown when the reading fetch fails.
#[component]
fn PanelError(props: PanelErrorProps) -> Element {
    rsx! {
        div {
            style: "padding: 20px; text-align: center;",
            div { style: "font-size: 3em; margin-bottom: 10px;", "⚠️" }
            h3 {
                style: "color: #dc3545; margin-bottom: 10px;",
                "Error al cargar datos"
            }
            p { style: "color: #666;", "{props.message}" }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct ReadingPanelProps {
    view: ReadingView,
}

/// Full reading summary: hero block, statistics grid, WHO limits, peak
/// date, technical details and interpretation.
#[component]
fn ReadingPanel(props: ReadingPanelProps) -> Element {
    let view = props.view;
    let mean = format!("{:.2}", view.mean);
    let max = format!("{:.2}", view.max);
    let min = format!("{:.2}", view.min);
    let median = format!("{:.2}", view.median);
    let percentile_98 = format!("{:.2}", view.percentile_98);
    let exceedance_pct = format!("{:.2}", view.exceedance_percentage);
    let coverage = format!("{:.1}", view.temporal_coverage);

    rsx! {
        div {
            // Hero
            div {
                style: "background-color: {view.color}; padding: 20px; border-radius: 8px; margin-bottom: 20px;",
                h2 { style: "margin: 0 0 10px 0; color: #000; font-size: 1.8em;", "{view.symbol}" }
                p {
                    style: "margin: 0; font-size: 1.2em; font-weight: 600; color: #000;",
                    "{view.exposure_text}"
                }
                p {
                    style: "margin: 5px 0 0 0; font-weight: bold; color: #333;",
                    "{view.quality_text}"
                }
            }

            // Main statistics
            div {
                style: "background: #f8f9fa; padding: 15px; border-radius: 8px; margin-bottom: 20px;",
                h3 {
                    style: "margin: 0 0 15px 0; color: #2a5d67; border-bottom: 2px solid #a8d0da; padding-bottom: 8px;",
                    "📊 Estadísticas Principales"
                }
                div {
                    style: "display: grid; grid-template-columns: repeat(2, 1fr); gap: 12px;",
                    StatItem { label: "Promedio".to_string(), value: mean, unit: view.units.clone(), color: "#2a5d67".to_string() }
                    StatItem { label: "Máximo".to_string(), value: max, unit: view.units.clone(), color: "#ff4444".to_string() }
                    StatItem { label: "Mínimo".to_string(), value: min, unit: view.units.clone(), color: "#414141".to_string() }
                    StatItem {
                        label: "Días con excedencias".to_string(),
                        value: view.exceedance_days.to_string(),
                        unit: "días".to_string(),
                        color: "#ff8800".to_string(),
                    }
                }

                if let Some(who) = view.who_limits.as_ref() {
                    div {
                        style: "margin-top: 18px; padding: 12px; background: #eef9f3; border-radius: 6px; border-left: 4px solid #28a745;",
                        p {
                            style: "margin: 0 0 6px 0; font-size: 0.95em; color: #155724; font-weight: bold;",
                            "🌍 Límites según OMS ({who.hours}h)"
                        }
                        p {
                            style: "margin: 0; font-size: 0.85em; color: #155724;",
                            "Buena ≤ {who.good} {view.units} · Regular ≤ {who.moderate} {view.units}"
                        }
                        p {
                            style: "margin: 6px 0 0 0; font-size: 0.75em; color: #666; font-style: italic;",
                            "Fuente: {who.source}"
                        }
                    }
                }

                div {
                    style: "margin-top: 15px; padding: 12px; background: #e8f4f8; border-radius: 6px; border-left: 4px solid #2a5d67;",
                    p {
                        style: "margin: 0; font-size: 0.9em; color: #2a5d67;",
                        strong { "📅 Fecha del pico máximo: " }
                        "{view.peak_time}"
                    }
                }

                details {
                    style: "margin-top: 18px;",
                    summary {
                        style: "cursor: pointer; padding: 12px; background: #e9ecef; border-radius: 6px; font-weight: 600; color: #2a5d67;",
                        "🔍 Ver detalles técnicos"
                    }
                    div {
                        style: "padding: 15px; background: #f8f9fa; border-radius: 0 0 6px 6px;",
                        p { strong { "Mediana: " } "{median} {view.units}" }
                        p { strong { "Percentil 98: " } "{percentile_98} {view.units}" }
                        p { strong { "Excedencias del límite actual: " } "{view.over_current_limit}" }
                        p { strong { "% de excedencias: " } "{exceedance_pct}%" }
                        p { strong { "Representatividad temporal: " } "{coverage}%" }
                    }
                }
            }

            // Interpretation
            div {
                style: "background: #f7f9fb; padding: 15px; border-radius: 8px; border: 2px solid #d1e7ec;",
                h4 {
                    style: "margin: 0 0 10px 0; color: #2a5d67;",
                    "💡 Interpretación"
                }
                p { style: "margin: 0; line-height: 1.6; color: #555;", "{view.description}" }
                p {
                    style: "margin: 8px 0 0 0; font-size: 0.85em; color: #666; font-style: italic; border-top: 1px solid #e0e0e0; padding-top: 8px;",
                    "ℹ️ Clasificación basada en las Guías de Calidad del Aire de la OMS 2021."
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct StatItemProps {
    label: String,
    value: String,
    unit: String,
    color: String,
}

#[component]
fn StatItem(props: StatItemProps) -> Element {
    rsx! {
        div {
            p { style: "margin: 0; font-size: 0.85em; color: #666;", "{props.label}" }
            p {
                style: "margin: 5px 0 0 0; font-size: 1.4em; font-weight: bold; color: {props.color};",
                "{props.value}"
            }
            p { style: "margin: 0; font-size: 0.75em; color: #888;", "{props.unit}" }
        }
    }
}
