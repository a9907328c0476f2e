// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Form input validation.
//!
//! A record is only ever built from input that passed [`validate_form`].

use crate::models::{Activity, ExerciseKind, FormInput};

/// Input that passed validation and can be turned into a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidInput {
    pub kind: ExerciseKind,
    pub distance_km: f64,
    pub duration_min: f64,
}

/// True iff every value parses to a finite number.
pub fn is_numeric(values: &[&str]) -> bool {
    values.iter().all(|v| parse_finite(v).is_some())
}

/// True iff every value is strictly greater than zero.
pub fn is_positive(values: &[f64]) -> bool {
    values.iter().all(|v| *v > 0.0)
}

/// Check the raw form and convert it into typed input.
pub fn validate_form(input: &FormInput) -> Result<ValidInput, ValidationError> {
    let kind = ExerciseKind::parse(&input.kind)
        .ok_or_else(|| ValidationError::UnknownKind(input.kind.clone()))?;

    let (Some(distance_km), Some(duration_min)) =
        (parse_finite(&input.distance), parse_finite(&input.duration))
    else {
        return Err(ValidationError::NotNumeric);
    };

    if !is_positive(&[distance_km, duration_min]) {
        return Err(ValidationError::NotPositive);
    }

    // Extreme ratios overflow to infinity or underflow to zero.
    let metric = Activity::compute(kind, distance_km, duration_min).metric();
    if !metric.is_finite() || metric <= 0.0 {
        return Err(ValidationError::MetricOutOfRange);
    }

    Ok(ValidInput {
        kind,
        distance_km,
        duration_min,
    })
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reasons a form submission is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Unknown exercise type: {0:?}")]
    UnknownKind(String),

    #[error("Distance and duration must be numbers")]
    NotNumeric,

    #[error("Distance and duration must be greater than zero")]
    NotPositive,

    #[error("Distance and duration give no usable pace or speed")]
    MetricOutOfRange,
}
