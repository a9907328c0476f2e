// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage codec for the exercise collection.
//!
//! The stored form is a flat JSON array. Each entry carries a `type` tag and
//! at most one of `pace`/`speed`. Decoding goes through [`StoredExercise`]
//! and rebuilds the [`Activity`] variant from the tag, so a restored record
//! has exactly the same shape as one created from the form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::models::exercise::describe;
use crate::models::{Activity, Coordinates, Exercise, ExerciseId, ExerciseKind};
use crate::time_utils::format_utc_rfc3339;

/// One record as written to storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredExercise {
    pub id: ExerciseId,
    /// Creation time (RFC 3339, millisecond precision)
    #[serde(serialize_with = "serialize_date")]
    pub date: DateTime<Utc>,
    /// `[lat, lng]`
    pub coords: Coordinates,
    /// Kilometers
    pub distance: f64,
    /// Minutes
    pub duration: f64,
    #[serde(rename = "type")]
    pub kind: ExerciseKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub clicks: u32,
}

fn serialize_date<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_utc_rfc3339(*date))
}

impl From<&Exercise> for StoredExercise {
    fn from(ex: &Exercise) -> Self {
        let (pace, speed) = match ex.activity() {
            Activity::Jogging { pace } => (Some(pace), None),
            Activity::Biking { speed } => (None, Some(speed)),
        };
        Self {
            id: ex.id().clone(),
            date: ex.created_at(),
            coords: ex.coords(),
            distance: ex.distance_km(),
            duration: ex.duration_min(),
            kind: ex.kind(),
            pace,
            speed,
            description: ex.description().to_string(),
            clicks: ex.clicks(),
        }
    }
}

impl StoredExercise {
    /// Rebuild the typed record for this entry's `type` tag.
    ///
    /// The stored metric is kept when it belongs to the tagged variant and is
    /// usable; otherwise it is derived again from distance and duration.
    pub fn restore(self) -> Result<Exercise, CodecError> {
        if !(self.distance.is_finite() && self.distance > 0.0)
            || !(self.duration.is_finite() && self.duration > 0.0)
        {
            return Err(CodecError::InvalidRecord(self.id.to_string()));
        }

        let stored_metric = match self.kind {
            ExerciseKind::Jogging => self.pace,
            ExerciseKind::Biking => self.speed,
        }
        .filter(|m| m.is_finite() && *m > 0.0);

        let activity = match (self.kind, stored_metric) {
            (ExerciseKind::Jogging, Some(pace)) => Activity::Jogging { pace },
            (ExerciseKind::Biking, Some(speed)) => Activity::Biking { speed },
            (kind, None) => Activity::compute(kind, self.distance, self.duration),
        };
        if !(activity.metric().is_finite() && activity.metric() > 0.0) {
            return Err(CodecError::InvalidRecord(self.id.to_string()));
        }

        let description = if self.description.is_empty() {
            describe(self.kind, self.date)
        } else {
            self.description
        };

        Ok(Exercise::from_parts(
            self.id,
            self.date,
            self.coords,
            self.distance,
            self.duration,
            activity,
            description,
            self.clicks,
        ))
    }
}

/// Serialize the whole collection, in order.
pub fn encode(exercises: &[Exercise]) -> Result<String, CodecError> {
    let stored: Vec<StoredExercise> = exercises.iter().map(StoredExercise::from).collect();
    serde_json::to_string(&stored).map_err(|e| CodecError::Serialize(e.to_string()))
}

/// Parse a stored collection.
///
/// Absent or unparseable input yields an empty collection. Individual
/// entries that cannot be restored are dropped and logged.
pub fn decode(raw: Option<&str>) -> Vec<Exercise> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match try_decode(raw) {
        Ok(exercises) => exercises,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable stored exercises");
            Vec::new()
        }
    }
}

/// Parse a stored collection, failing if the document itself is unreadable.
pub fn try_decode(raw: &str) -> Result<Vec<Exercise>, CodecError> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(raw).map_err(|e| CodecError::Parse(e.to_string()))?;

    let total = entries.len();
    let exercises: Vec<Exercise> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            match serde_json::from_value::<StoredExercise>(value)
                .map_err(|e| CodecError::Parse(e.to_string()))
                .and_then(StoredExercise::restore)
            {
                Ok(ex) => Some(ex),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping stored exercise");
                    None
                }
            }
        })
        .collect();

    tracing::debug!(total, restored = exercises.len(), "Decoded stored exercises");
    Ok(exercises)
}

/// Errors from the storage codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Failed to serialize exercises: {0}")]
    Serialize(String),

    #[error("Failed to parse stored exercises: {0}")]
    Parse(String),

    #[error("Stored exercise {0} has unusable measurements")]
    InvalidRecord(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 14, 12, 0, 0).unwrap()
    }

    fn sample() -> Vec<Exercise> {
        let mut bike = Exercise::biking(
            ExerciseId::new("1776150000"),
            date(),
            Coordinates::new(51.5, -0.12),
            10.0,
            30.0,
        );
        bike.click();
        vec![
            Exercise::jogging(
                ExerciseId::new("1776149999"),
                date(),
                Coordinates::new(40.0, -75.0),
                5.0,
                30.0,
            ),
            bike,
        ]
    }

    #[test]
    fn test_decode_absent_is_empty() {
        assert!(decode(None).is_empty());
    }

    #[test]
    fn test_decode_garbage_is_empty() {
        assert!(decode(Some("not json")).is_empty());
        assert!(decode(Some("{\"id\":1}")).is_empty());
        assert!(decode(Some("")).is_empty());
    }

    #[test]
    fn test_round_trip_rebuilds_variants() {
        let original = sample();
        let raw = encode(&original).unwrap();
        let restored = decode(Some(&raw));
        assert_eq!(restored, original);
        assert_eq!(restored[0].activity(), Activity::Jogging { pace: 6.0 });
        assert_eq!(restored[1].activity(), Activity::Biking { speed: 20.0 });
        assert_eq!(restored[1].clicks(), 1);
    }

    #[test]
    fn test_encoded_shape_is_flat() {
        let raw = encode(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value[0];
        assert_eq!(first["type"], "jogging");
        assert_eq!(first["pace"], 6.0);
        assert!(first.get("speed").is_none());
        assert_eq!(first["coords"][0], 40.0);
        assert_eq!(first["description"], "Jogging on April 14");
        assert_eq!(first["date"], "2026-04-14T12:00:00.000Z");
        assert_eq!(value[1]["type"], "biking");
        assert_eq!(value[1]["speed"], 20.0);
    }

    #[test]
    fn test_restore_recomputes_missing_metric() {
        let raw = r#"[{"id":"1","date":"2026-04-14T12:00:00Z","coords":[1.0,2.0],
            "distance":10.0,"duration":30.0,"type":"biking"}]"#;
        let restored = decode(Some(raw));
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].activity(), Activity::Biking { speed: 20.0 });
        assert_eq!(restored[0].description(), "Biking on April 14");
    }

    #[test]
    fn test_restore_ignores_metric_of_other_variant() {
        let raw = r#"[{"id":"1","date":"2026-04-14T12:00:00Z","coords":[1.0,2.0],
            "distance":5.0,"duration":30.0,"type":"jogging","speed":99.0}]"#;
        let restored = decode(Some(raw));
        assert_eq!(restored[0].activity(), Activity::Jogging { pace: 6.0 });
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let raw = r#"[
            {"id":"1","date":"2026-04-14T12:00:00Z","coords":[1.0,2.0],
             "distance":5.0,"duration":30.0,"type":"rowing"},
            {"id":"2","date":"2026-04-14T12:00:00Z","coords":[1.0,2.0],
             "distance":-5.0,"duration":30.0,"type":"jogging"},
            {"id":"3","date":"2026-04-14T12:00:00Z","coords":[1.0,2.0],
             "distance":5.0,"duration":30.0,"type":"jogging","pace":6.0,
             "description":"Jogging on April 14"}
        ]"#;
        let restored = decode(Some(raw));
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].id().as_str(), "3");
    }

    #[test]
    fn test_entry_with_unusable_metric_is_skipped() {
        let raw = r#"[{"id":"1","date":"2026-04-14T12:00:00Z","coords":[1.0,2.0],
            "distance":5.0,"duration":1e-320,"type":"biking"}]"#;
        assert!(decode(Some(raw)).is_empty());
    }

    #[test]
    fn test_try_decode_reports_parse_error() {
        assert!(matches!(try_decode("[{"), Err(CodecError::Parse(_))));
    }
}
