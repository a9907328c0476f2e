// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Terminal front end: command parsing plus text renditions of the map and
//! the form/list view.

use std::io::Write;

use crate::controller::Event;
use crate::models::{Coordinates, ExerciseId, FormInput};
use crate::platform::{ExerciseView, MapWidget};
use crate::services::render::MarkerPopup;

pub const HELP: &str = "\
Commands:
  click <lat> <lng>                    open the form at a map location
  submit <jogging|biking> <km> <min>   fill in and submit the form
  cancel                               close the form
  select <id>                          move the map to an exercise
  reset                                delete all exercises
  help                                 show this help
  quit                                 exit";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Events to dispatch, in order.
    Events(Vec<Event>),
    Help,
    Quit,
}

/// Parse one line of user input.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(CommandError::Empty);
    };
    let args: Vec<&str> = words.collect();

    let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("click", [lat, lng]) => {
            let lat = parse_coord(lat)?;
            let lng = parse_coord(lng)?;
            Command::Events(vec![Event::MapClicked(Coordinates::new(lat, lng))])
        }
        // Values are passed through untouched; validation happens on submit.
        ("submit", [kind, distance, duration]) => Command::Events(vec![
            Event::FormEdited(FormInput::new(*kind, *distance, *duration)),
            Event::FormSubmitted,
        ]),
        ("cancel", []) => Command::Events(vec![Event::FormCancelled]),
        ("select", [id]) => Command::Events(vec![Event::EntrySelected(ExerciseId::new(*id))]),
        ("reset", []) => Command::Events(vec![Event::Reset]),
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        (
            verb @ ("click" | "submit" | "cancel" | "select" | "reset" | "help" | "quit" | "exit"),
            _,
        ) => return Err(CommandError::Usage(verb.to_string())),
        (other, _) => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn parse_coord(raw: &str) -> Result<f64, CommandError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::BadCoordinate(raw.to_string()))
}

/// Console input errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("Wrong arguments for `{0}` (try `help`)")]
    Usage(String),

    #[error("Not a coordinate: {0}")]
    BadCoordinate(String),
}

/// Map rendition that prints what a map widget would draw.
pub struct ConsoleMap<W: Write> {
    out: W,
    markers: usize,
}

impl<W: Write> ConsoleMap<W> {
    pub fn new(out: W) -> Self {
        Self { out, markers: 0 }
    }

    pub fn marker_count(&self) -> usize {
        self.markers
    }

    fn print(&mut self, line: std::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{line}") {
            tracing::warn!(error = %e, "Failed to write map output");
        }
    }
}

impl<W: Write> MapWidget for ConsoleMap<W> {
    fn create_map(&mut self, center: Coordinates, zoom: u8) {
        self.print(format_args!("[map] centered on {center} (zoom {zoom})"));
    }

    fn add_marker(&mut self, coords: Coordinates, popup: &MarkerPopup) {
        self.markers += 1;
        self.print(format_args!(
            "[map] marker at {coords}: {} ({})",
            popup.content, popup.options.class_name
        ));
    }

    fn pan_to(&mut self, coords: Coordinates, zoom: u8, animate: bool) {
        let how = if animate { "panning" } else { "jumping" };
        self.print(format_args!("[map] {how} to {coords} (zoom {zoom})"));
    }

    fn clear(&mut self) {
        self.markers = 0;
        self.print(format_args!("[map] cleared"));
    }
}

/// Form and list rendition for the terminal.
pub struct ConsoleView<W: Write> {
    out: W,
    form: FormInput,
    visible: bool,
    entries: Vec<ExerciseId>,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            form: FormInput::default(),
            visible: false,
            entries: Vec::new(),
        }
    }

    pub fn entry_ids(&self) -> &[ExerciseId] {
        &self.entries
    }

    pub fn is_form_visible(&self) -> bool {
        self.visible
    }

    fn print(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %e, "Failed to write view output");
        }
    }
}

impl<W: Write> ExerciseView for ConsoleView<W> {
    fn read_form(&self) -> FormInput {
        self.form.clone()
    }

    fn fill_form(&mut self, input: FormInput) {
        self.form = input;
    }

    fn show_form(&mut self) {
        self.visible = true;
        self.print("[form] open");
    }

    fn focus_distance(&mut self) {}

    fn clear_form(&mut self) {
        self.form.distance.clear();
        self.form.duration.clear();
    }

    fn hide_form(&mut self) {
        if self.visible {
            self.visible = false;
            self.print("[form] closed");
        }
    }

    fn restore_form_display(&mut self) {}

    fn insert_entry(&mut self, id: &ExerciseId, markup: &str) {
        self.entries.push(id.clone());
        self.print(markup.trim_end());
    }

    fn clear_entries(&mut self) {
        self.entries.clear();
        self.print("[list] cleared");
    }

    fn alert(&mut self, message: &str) {
        self.print(&format!("[alert] {message}"));
    }
}
