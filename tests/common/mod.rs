// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::time::Duration;

use workout_map::config::Config;
use workout_map::controller::App;
use workout_map::db::{KeyValueStore, MemoryStore};
use workout_map::models::{Coordinates, ExerciseId, FormInput};
use workout_map::platform::{ExerciseView, MapWidget};
use workout_map::services::render::MarkerPopup;

/// Everything the map was asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum MapCall {
    Create(Coordinates, u8),
    Marker(Coordinates, String),
    Pan(Coordinates, u8, bool),
    Clear,
}

#[derive(Debug, Default)]
pub struct RecordingMap {
    pub calls: Vec<MapCall>,
}

#[allow(dead_code)]
impl RecordingMap {
    pub fn markers(&self) -> Vec<&MapCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, MapCall::Marker(..)))
            .collect()
    }

    pub fn pans(&self) -> Vec<&MapCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, MapCall::Pan(..)))
            .collect()
    }
}

impl MapWidget for RecordingMap {
    fn create_map(&mut self, center: Coordinates, zoom: u8) {
        self.calls.push(MapCall::Create(center, zoom));
    }

    fn add_marker(&mut self, coords: Coordinates, popup: &MarkerPopup) {
        self.calls.push(MapCall::Marker(coords, popup.content.clone()));
    }

    fn pan_to(&mut self, coords: Coordinates, zoom: u8, animate: bool) {
        self.calls.push(MapCall::Pan(coords, zoom, animate));
    }

    fn clear(&mut self) {
        self.calls.push(MapCall::Clear);
    }
}

/// View that keeps its state so tests can look at it.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub form: FormInput,
    pub visible: bool,
    pub display_off: bool,
    pub focused: bool,
    pub entries: Vec<(ExerciseId, String)>,
    pub alerts: Vec<String>,
}

impl ExerciseView for RecordingView {
    fn read_form(&self) -> FormInput {
        self.form.clone()
    }

    fn fill_form(&mut self, input: FormInput) {
        self.form = input;
    }

    fn show_form(&mut self) {
        self.visible = true;
    }

    fn focus_distance(&mut self) {
        self.focused = true;
    }

    fn clear_form(&mut self) {
        self.form.distance.clear();
        self.form.duration.clear();
    }

    fn hide_form(&mut self) {
        self.visible = false;
        self.display_off = true;
        self.focused = false;
    }

    fn restore_form_display(&mut self) {
        self.display_off = false;
    }

    fn insert_entry(&mut self, id: &ExerciseId, markup: &str) {
        self.entries.push((id.clone(), markup.to_string()));
    }

    fn clear_entries(&mut self) {
        self.entries.clear();
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

#[allow(dead_code)]
pub type TestApp = App<RecordingMap, RecordingView, MemoryStore>;

/// Config with a short restore delay for timer tests.
#[allow(dead_code)]
pub fn test_config() -> Config {
    Config {
        form_restore_delay: Duration::from_millis(10),
        ..Config::default()
    }
}

/// Create a test app over the given store.
#[allow(dead_code)]
pub fn create_test_app(store: MemoryStore) -> TestApp {
    App::new(
        &test_config(),
        RecordingMap::default(),
        RecordingView::default(),
        store,
    )
}

/// Create a test app whose map is already loaded.
#[allow(dead_code)]
pub fn create_ready_app(store: MemoryStore) -> TestApp {
    let mut app = create_test_app(store);
    assert!(app.take_position_request());
    app.on_position(Coordinates::new(40.0, -75.0));
    app
}

/// Stored collection text, if any.
#[allow(dead_code)]
pub fn stored(app: &TestApp) -> Option<String> {
    app.store()
        .get_item("workouts")
        .expect("memory store never fails")
}
