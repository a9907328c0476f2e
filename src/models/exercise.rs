// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise records placed on the map.
//!
//! Distances are kilometers and durations are minutes throughout. The
//! derived metric (pace for jogging, speed for biking) and the description
//! are computed once when a record is built and never change afterwards.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time_utils::month_day_label;

/// Latitude/longitude pair, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Short record identifier (ten decimal digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(String);

impl ExerciseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id, if it is all digits.
    pub fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Record discriminant, as selected in the form and stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Jogging,
    Biking,
}

impl ExerciseKind {
    /// Lowercase tag used in storage, CSS classes and the form select.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Jogging => "jogging",
            ExerciseKind::Biking => "biking",
        }
    }

    /// Capitalized name used in descriptions.
    pub fn title(&self) -> &'static str {
        match self {
            ExerciseKind::Jogging => "Jogging",
            ExerciseKind::Biking => "Biking",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "jogging" => Some(ExerciseKind::Jogging),
            "biking" => Some(ExerciseKind::Biking),
            _ => None,
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific part of a record. The variant carries its metric, so a
/// jogging record can never hold a speed and vice versa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activity {
    /// Pace in minutes per kilometer.
    Jogging { pace: f64 },
    /// Speed in kilometers per hour.
    Biking { speed: f64 },
}

impl Activity {
    /// Compute the variant's metric from distance (km) and duration (min).
    pub fn compute(kind: ExerciseKind, distance_km: f64, duration_min: f64) -> Self {
        match kind {
            ExerciseKind::Jogging => Activity::Jogging {
                pace: duration_min / distance_km,
            },
            ExerciseKind::Biking => Activity::Biking {
                speed: distance_km / (duration_min / 60.0),
            },
        }
    }

    pub fn kind(&self) -> ExerciseKind {
        match self {
            Activity::Jogging { .. } => ExerciseKind::Jogging,
            Activity::Biking { .. } => ExerciseKind::Biking,
        }
    }

    /// The derived metric value, whichever variant this is.
    pub fn metric(&self) -> f64 {
        match *self {
            Activity::Jogging { pace } => pace,
            Activity::Biking { speed } => speed,
        }
    }
}

/// A single logged exercise session.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    id: ExerciseId,
    created_at: DateTime<Utc>,
    coords: Coordinates,
    distance_km: f64,
    duration_min: f64,
    activity: Activity,
    description: String,
    clicks: u32,
}

impl Exercise {
    /// Build a jogging record. Distance and duration must already be validated.
    pub fn jogging(
        id: ExerciseId,
        created_at: DateTime<Utc>,
        coords: Coordinates,
        distance_km: f64,
        duration_min: f64,
    ) -> Self {
        Self::build(
            ExerciseKind::Jogging,
            id,
            created_at,
            coords,
            distance_km,
            duration_min,
        )
    }

    /// Build a biking record. Distance and duration must already be validated.
    pub fn biking(
        id: ExerciseId,
        created_at: DateTime<Utc>,
        coords: Coordinates,
        distance_km: f64,
        duration_min: f64,
    ) -> Self {
        Self::build(
            ExerciseKind::Biking,
            id,
            created_at,
            coords,
            distance_km,
            duration_min,
        )
    }

    /// Build a record of the given kind.
    pub fn build(
        kind: ExerciseKind,
        id: ExerciseId,
        created_at: DateTime<Utc>,
        coords: Coordinates,
        distance_km: f64,
        duration_min: f64,
    ) -> Self {
        let activity = Activity::compute(kind, distance_km, duration_min);
        Self {
            description: describe(kind, created_at),
            id,
            created_at,
            coords,
            distance_km,
            duration_min,
            activity,
            clicks: 0,
        }
    }

    /// Reassemble a record from previously stored parts without recomputing
    /// anything. Used by the storage codec.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: ExerciseId,
        created_at: DateTime<Utc>,
        coords: Coordinates,
        distance_km: f64,
        duration_min: f64,
        activity: Activity,
        description: String,
        clicks: u32,
    ) -> Self {
        Self {
            id,
            created_at,
            coords,
            distance_km,
            duration_min,
            activity,
            description,
            clicks,
        }
    }

    pub fn id(&self) -> &ExerciseId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coords(&self) -> Coordinates {
        self.coords
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn kind(&self) -> ExerciseKind {
        self.activity.kind()
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Number of times the record was selected in the list.
    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    /// Record one activation of this entry.
    pub fn click(&mut self) {
        self.clicks = self.clicks.saturating_add(1);
    }
}

/// "Biking on April 14", dated in the local zone.
pub(crate) fn describe(kind: ExerciseKind, created_at: DateTime<Utc>) -> String {
    describe_in(kind, &created_at.with_timezone(&Local))
}

fn describe_in<Tz: TimeZone>(kind: ExerciseKind, created_at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("{} on {}", kind.title(), month_day_label(created_at))
}
