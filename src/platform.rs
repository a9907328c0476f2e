// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Capabilities the controller drives but does not implement: the map
//! widget, the form/list view, and the position provider.

use std::future::Future;

use crate::error::PositionError;
use crate::models::{Coordinates, ExerciseId, FormInput};
use crate::services::render::MarkerPopup;

/// Map widget. Clicks on the map reach the controller as events.
pub trait MapWidget {
    /// Create the map view centered on `center`.
    fn create_map(&mut self, center: Coordinates, zoom: u8);
    /// Add a marker with an open popup.
    fn add_marker(&mut self, coords: Coordinates, popup: &MarkerPopup);
    /// Move the view to `coords`.
    fn pan_to(&mut self, coords: Coordinates, zoom: u8, animate: bool);
    /// Drop the map and every marker on it.
    fn clear(&mut self);
}

/// Input form plus the rendered exercise list.
pub trait ExerciseView {
    /// Current field values.
    fn read_form(&self) -> FormInput;
    /// Replace the field values (the user typing into the form).
    fn fill_form(&mut self, input: FormInput);
    fn show_form(&mut self);
    fn focus_distance(&mut self);
    /// Empty the distance and duration fields.
    fn clear_form(&mut self);
    /// Hide the form with its display turned off.
    fn hide_form(&mut self);
    /// Turn the hidden form's display back on.
    fn restore_form_display(&mut self);
    /// Insert a list entry right after the form.
    fn insert_entry(&mut self, id: &ExerciseId, markup: &str);
    fn clear_entries(&mut self);
    /// Tell the user something went wrong.
    fn alert(&mut self, message: &str);
}

/// One-shot position lookup.
pub trait PositionProvider {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, PositionError>>;
}

/// Provider answering with a configured position, or failing without one.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition {
    position: Option<Coordinates>,
}

impl FixedPosition {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

impl PositionProvider for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, PositionError> {
        self.position.ok_or(PositionError::Unsupported)
    }
}
