// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod exercise;
pub mod form;

pub use exercise::{Activity, Coordinates, Exercise, ExerciseId, ExerciseKind};
pub use form::FormInput;
