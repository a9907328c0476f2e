// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record id allocation.
//!
//! Ids are the last ten digits of the creation time in milliseconds. Two
//! records created in the same millisecond, or after a clock step backwards,
//! get the next free value instead. Past `9999999999` the sequence wraps to
//! zero and skips any value already handed out or restored.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::{Exercise, ExerciseId};

const ID_MODULUS: u64 = 10_000_000_000;

/// Hands out strictly increasing ids.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: Option<u64>,
    used: HashSet<u64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from an existing collection so restored ids are never reissued.
    pub fn seeded_from(exercises: &[Exercise]) -> Self {
        let used: HashSet<u64> = exercises.iter().filter_map(|e| e.id().numeric()).collect();
        Self {
            last: used.iter().copied().max(),
            used,
        }
    }

    pub fn next(&mut self, now: DateTime<Utc>) -> ExerciseId {
        let candidate = now.timestamp_millis().unsigned_abs() % ID_MODULUS;
        let mut value = match self.last {
            Some(last) if candidate <= last => (last + 1) % ID_MODULUS,
            _ => candidate,
        };
        while !self.used.insert(value) {
            value = (value + 1) % ID_MODULUS;
        }
        self.last = Some(value);
        ExerciseId::new(format!("{:010}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;
    use chrono::TimeZone;

    #[test]
    fn test_id_from_millis() {
        let now = Utc.timestamp_millis_opt(1_776_150_000_123).unwrap();
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next(now).as_str(), "6150000123");
    }

    #[test]
    fn test_same_millisecond_does_not_collide() {
        let now = Utc.timestamp_millis_opt(1_776_150_000_123).unwrap();
        let mut ids = IdGenerator::new();
        let a = ids.next(now);
        let b = ids.next(now);
        assert_ne!(a, b);
        assert_eq!(b.as_str(), "6150000124");
    }

    #[test]
    fn test_seeded_skips_existing() {
        let created = Utc.timestamp_millis_opt(1_776_150_000_000).unwrap();
        let existing = vec![Exercise::jogging(
            ExerciseId::new("6150000500"),
            created,
            Coordinates::new(0.0, 0.0),
            1.0,
            1.0,
        )];
        let mut ids = IdGenerator::seeded_from(&existing);
        // Clock is behind the stored id.
        let id = ids.next(Utc.timestamp_millis_opt(1_776_150_000_100).unwrap());
        assert_eq!(id.as_str(), "6150000501");
    }

    #[test]
    fn test_wrap_around_skips_stored_ids() {
        let created = Utc.timestamp_millis_opt(1_776_150_000_000).unwrap();
        let stored = |id: &str| {
            Exercise::jogging(
                ExerciseId::new(id),
                created,
                Coordinates::new(0.0, 0.0),
                1.0,
                1.0,
            )
        };
        let existing = vec![stored("9999999999"), stored("0000000000"), stored("6150000123")];
        let mut ids = IdGenerator::seeded_from(&existing);

        let now = Utc.timestamp_millis_opt(1_776_150_000_000).unwrap();
        assert_eq!(ids.next(now).as_str(), "0000000001");

        // Clock candidate lands on a stored id after the wrap.
        let now = Utc.timestamp_millis_opt(1_776_150_000_123).unwrap();
        assert_eq!(ids.next(now).as_str(), "6150000124");
    }
}
