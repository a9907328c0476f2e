// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display projection for exercises: marker popups and list entries.
//!
//! Everything here is a pure function of the record; nothing is stored.

use crate::models::{Activity, Exercise, ExerciseKind};

const DISTANCE_UNIT: &str = "km";
const DURATION_UNIT: &str = "min";
const DURATION_ICON: &str = "⏱";
const METRIC_ICON: &str = "⚡️";

/// Popup configuration for a map marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
}

/// Everything the map needs to draw one marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPopup {
    pub options: PopupOptions,
    pub content: String,
}

/// Display tuple for a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDisplay {
    pub icon: &'static str,
    pub distance_label: String,
    pub duration_label: String,
    pub metric_label: String,
    pub metric_unit: &'static str,
}

pub fn icon(kind: ExerciseKind) -> &'static str {
    match kind {
        ExerciseKind::Jogging => "🏃‍♂️",
        ExerciseKind::Biking => "🚴‍♀️",
    }
}

pub fn metric_unit(kind: ExerciseKind) -> &'static str {
    match kind {
        ExerciseKind::Jogging => "min/km",
        ExerciseKind::Biking => "km/h",
    }
}

/// Project a record onto its display labels.
pub fn project(exercise: &Exercise) -> ExerciseDisplay {
    let kind = exercise.kind();
    ExerciseDisplay {
        icon: icon(kind),
        distance_label: format_number(exercise.distance_km()),
        duration_label: format_number(exercise.duration_min()),
        metric_label: format!("{:.1}", exercise.activity().metric()),
        metric_unit: metric_unit(kind),
    }
}

/// Popup shown on the record's map marker.
pub fn marker_popup(exercise: &Exercise) -> MarkerPopup {
    MarkerPopup {
        options: PopupOptions {
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
            class_name: format!("{}-popup", exercise.kind()),
        },
        content: format!("{} {}", icon(exercise.kind()), exercise.description()),
    }
}

/// List entry markup, inserted after the form element.
pub fn list_entry_html(exercise: &Exercise) -> String {
    let display = project(exercise);
    let kind = exercise.kind();
    let metric_name = match exercise.activity() {
        Activity::Jogging { .. } => "pace",
        Activity::Biking { .. } => "speed",
    };

    let mut html = format!(
        r#"<li class="workout workout--{kind}" data-id="{id}">
  <h2 class="workout__title">{title}</h2>
"#,
        id = escape_html(exercise.id().as_str()),
        title = escape_html(exercise.description()),
    );
    html.push_str(&detail_row(display.icon, &display.distance_label, DISTANCE_UNIT, None));
    html.push_str(&detail_row(DURATION_ICON, &display.duration_label, DURATION_UNIT, None));
    html.push_str(&detail_row(
        METRIC_ICON,
        &display.metric_label,
        display.metric_unit,
        Some(metric_name),
    ));
    html.push_str("</li>\n");
    html
}

fn detail_row(icon: &str, value: &str, unit: &str, name: Option<&str>) -> String {
    let data = name
        .map(|n| format!(r#" data-metric="{n}""#))
        .unwrap_or_default();
    format!(
        r#"  <div class="workout__details"{data}>
    <span class="workout__icon">{icon}</span>
    <span class="workout__value">{value}</span>
    <span class="workout__unit">{unit}</span>
  </div>
"#
    )
}

/// Whole numbers without a trailing ".0", everything else as-is.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
