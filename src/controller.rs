// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interaction controller.
//!
//! Owns the exercise collection and moves through the interaction states:
//!
//! 1. Wait for a position, then create the map and draw stored markers
//! 2. A map click opens the form at the clicked location
//! 3. A valid submission builds a record, renders it, persists the whole
//!    collection and closes the form
//! 4. Selecting a list entry pans the map to the record
//!
//! Every handler runs to completion on the event loop; nothing here blocks.

use std::time::Duration;

use chrono::{SubsecRound, Utc};

use crate::config::Config;
use crate::db::KeyValueStore;
use crate::error::{AppError, PositionError, Result};
use crate::models::{Coordinates, Exercise, ExerciseId, FormInput};
use crate::platform::{ExerciseView, MapWidget};
use crate::services::{codec, render, validate_form, IdGenerator};

/// Map lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapState {
    AwaitingPosition,
    /// Position lookup failed; map-dependent actions are no-ops.
    Unavailable,
    Ready { center: Coordinates },
}

/// Form visibility. A visible form always has a pending location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormState {
    Hidden,
    Visible { pending: Coordinates },
}

/// Inputs the controller reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PositionAcquired(Coordinates),
    PositionFailed(PositionError),
    MapClicked(Coordinates),
    FormEdited(FormInput),
    FormSubmitted,
    FormCancelled,
    EntrySelected(ExerciseId),
    RestoreFormDisplay,
    Reset,
}

/// An event the controller wants delivered back to itself later.
#[derive(Debug, Clone, PartialEq)]
pub struct Deferred {
    pub delay: Duration,
    pub event: Event,
}

/// The application controller.
pub struct App<M, V, S> {
    map: M,
    view: V,
    store: S,
    storage_key: String,
    map_zoom: u8,
    form_restore_delay: Duration,
    exercises: Vec<Exercise>,
    ids: IdGenerator,
    map_state: MapState,
    form_state: FormState,
    position_wanted: bool,
    deferred: Vec<Deferred>,
}

impl<M, V, S> App<M, V, S>
where
    M: MapWidget,
    V: ExerciseView,
    S: KeyValueStore,
{
    /// Start the controller: load stored exercises and render the list.
    /// Markers follow once the map is ready.
    pub fn new(config: &Config, map: M, view: V, store: S) -> Self {
        let mut app = Self {
            map,
            view,
            store,
            storage_key: config.storage_key.clone(),
            map_zoom: config.map_zoom,
            form_restore_delay: config.form_restore_delay,
            exercises: Vec::new(),
            ids: IdGenerator::new(),
            map_state: MapState::AwaitingPosition,
            form_state: FormState::Hidden,
            position_wanted: true,
            deferred: Vec::new(),
        };
        app.load_from_storage();
        app
    }

    fn load_from_storage(&mut self) {
        let raw = self.store.get_item(&self.storage_key).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not read stored exercises");
            None
        });
        self.exercises = codec::decode(raw.as_deref());
        self.ids = IdGenerator::seeded_from(&self.exercises);

        for exercise in &self.exercises {
            self.view
                .insert_entry(exercise.id(), &render::list_entry_html(exercise));
        }
        tracing::info!(count = self.exercises.len(), "Loaded stored exercises");
    }

    /// Handle one event. Errors are logged and, when the user should see
    /// them, shown as an alert; they never escape.
    pub fn dispatch(&mut self, event: Event) {
        let result = match event {
            Event::PositionAcquired(coords) => {
                self.on_position(coords);
                Ok(())
            }
            Event::PositionFailed(err) => self.on_position_failed(err),
            Event::MapClicked(coords) => self.show_form(coords),
            Event::FormEdited(input) => {
                self.view.fill_form(input);
                Ok(())
            }
            Event::FormSubmitted => self.submit().map(|_| ()),
            Event::FormCancelled => {
                self.cancel();
                Ok(())
            }
            Event::EntrySelected(id) => self.select(&id),
            Event::RestoreFormDisplay => {
                self.view.restore_form_display();
                Ok(())
            }
            Event::Reset => self.reset(),
        };

        if let Err(err) = result {
            self.report(&err);
        }
    }

    fn report(&mut self, err: &AppError) {
        match err.user_message() {
            Some(message) => {
                tracing::warn!(error = %err, "Reporting error to user");
                self.view.alert(message);
            }
            None => tracing::debug!(error = %err, "Ignoring event"),
        }
    }

    /// Whether a position request should be issued. Returns `true` once
    /// per startup (and again after a reset).
    pub fn take_position_request(&mut self) -> bool {
        std::mem::take(&mut self.position_wanted)
    }

    /// Timed events queued by the handlers since the last call.
    pub fn take_deferred(&mut self) -> Vec<Deferred> {
        std::mem::take(&mut self.deferred)
    }

    /// Position found: create the map and draw every stored record.
    pub fn on_position(&mut self, coords: Coordinates) {
        if self.is_map_ready() {
            tracing::debug!("Map already created, ignoring position");
            return;
        }
        tracing::info!(lat = coords.lat, lng = coords.lng, "Position acquired, loading map");
        self.map.create_map(coords, self.map_zoom);
        self.map_state = MapState::Ready { center: coords };

        for exercise in &self.exercises {
            self.map
                .add_marker(exercise.coords(), &render::marker_popup(exercise));
        }
    }

    /// Position lookup failed; carry on without a map.
    pub fn on_position_failed(&mut self, err: PositionError) -> Result<()> {
        tracing::warn!(error = %err, "Position unavailable, continuing without map");
        if !self.is_map_ready() {
            self.map_state = MapState::Unavailable;
        }
        Err(AppError::PositionUnavailable(err))
    }

    /// Map click: open the form and remember where.
    pub fn show_form(&mut self, coords: Coordinates) -> Result<()> {
        if !self.is_map_ready() {
            return Err(AppError::MapNotReady);
        }
        tracing::debug!(lat = coords.lat, lng = coords.lng, "Opening form");
        self.form_state = FormState::Visible { pending: coords };
        self.view.show_form();
        self.view.focus_distance();
        Ok(())
    }

    /// Form submission.
    ///
    /// Nothing is built, rendered or written unless validation passes. On
    /// success the record is rendered, the collection persisted, and only
    /// then is the form cleared and hidden.
    pub fn submit(&mut self) -> Result<ExerciseId> {
        let FormState::Visible { pending } = self.form_state else {
            return Err(AppError::NoPendingLocation);
        };

        let input = self.view.read_form();
        let valid = validate_form(&input)?;

        // Storage keeps milliseconds.
        let now = Utc::now().trunc_subsecs(3);
        let id = self.ids.next(now);
        let exercise = Exercise::build(
            valid.kind,
            id.clone(),
            now,
            pending,
            valid.distance_km,
            valid.duration_min,
        );
        tracing::info!(
            id = %id,
            kind = %exercise.kind(),
            metric = exercise.activity().metric(),
            "Created exercise"
        );

        self.map
            .add_marker(exercise.coords(), &render::marker_popup(&exercise));
        self.view
            .insert_entry(exercise.id(), &render::list_entry_html(&exercise));
        self.exercises.push(exercise);

        let saved = self.persist();
        self.hide_form();
        saved?;

        Ok(id)
    }

    /// Close the form without creating anything.
    pub fn cancel(&mut self) {
        if let FormState::Visible { .. } = self.form_state {
            tracing::debug!("Form cancelled");
            self.hide_form();
        }
    }

    fn hide_form(&mut self) {
        self.view.clear_form();
        self.view.hide_form();
        self.form_state = FormState::Hidden;
        self.deferred.push(Deferred {
            delay: self.form_restore_delay,
            event: Event::RestoreFormDisplay,
        });
    }

    /// List entry activated: pan to the record and count the click.
    ///
    /// Before the map is ready this does nothing.
    pub fn select(&mut self, id: &ExerciseId) -> Result<()> {
        if !self.is_map_ready() {
            tracing::debug!(id = %id, "Map not ready, ignoring selection");
            return Ok(());
        }

        let exercise = self
            .exercises
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| AppError::StaleSelection(id.clone()))?;

        self.map.pan_to(exercise.coords(), self.map_zoom, true);
        exercise.click();
        tracing::debug!(id = %id, clicks = exercise.clicks(), "Moved to exercise");

        self.persist()
    }

    /// Clear storage and return to the startup state with no exercises.
    pub fn reset(&mut self) -> Result<()> {
        tracing::info!(count = self.exercises.len(), "Resetting exercises");

        let removed = self.store.remove_item(&self.storage_key);

        self.deferred.clear();
        self.hide_form();
        self.view.clear_entries();
        self.map.clear();
        self.exercises.clear();
        self.ids = IdGenerator::new();
        self.map_state = MapState::AwaitingPosition;
        self.position_wanted = true;

        removed?;
        self.load_from_storage();
        Ok(())
    }

    /// Write the whole collection under the storage key.
    fn persist(&mut self) -> Result<()> {
        let encoded = codec::encode(&self.exercises)?;
        self.store.set_item(&self.storage_key, &encoded)?;
        tracing::debug!(count = self.exercises.len(), "Persisted exercises");
        Ok(())
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn map_state(&self) -> MapState {
        self.map_state
    }

    pub fn form_state(&self) -> FormState {
        self.form_state
    }

    pub fn is_map_ready(&self) -> bool {
        matches!(self.map_state, MapState::Ready { .. })
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the collaborators, e.g. to inspect them after a run.
    pub fn into_parts(self) -> (M, V, S) {
        (self.map, self.view, self.store)
    }
}
