// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Map: log jogging and biking sessions at map locations
//!
//! This crate provides the exercise model, its storage codec and the
//! interaction controller that ties a map widget, an input form and a
//! key-value store together.

pub mod config;
pub mod console;
pub mod controller;
pub mod db;
pub mod error;
pub mod models;
pub mod platform;
pub mod runtime;
pub mod services;
pub mod time_utils;

pub use controller::{App, Event, FormState, MapState};
pub use error::AppError;
