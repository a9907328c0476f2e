// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent user-facing messages.

use crate::db::StoreError;
use crate::models::ExerciseId;
use crate::services::{CodecError, ValidationError};

/// Errors raised while handling a user event.
///
/// None of these leave the controller: each is logged and, where the user
/// should know, turned into an alert.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Position unavailable: {0}")]
    PositionUnavailable(#[from] PositionError),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Map is not ready")]
    MapNotReady,

    #[error("No pending map location for this submission")]
    NoPendingLocation,

    #[error("Unknown exercise id: {0}")]
    StaleSelection(ExerciseId),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Encoding error: {0}")]
    Codec(#[from] CodecError),
}

impl AppError {
    pub const POSITION_MESSAGE: &'static str = "Could not get your position";
    pub const VALIDATION_MESSAGE: &'static str = "Inputs have to be positive numbers!";
    pub const SAVE_MESSAGE: &'static str = "Could not save your exercises";

    /// Message shown to the user, or `None` for conditions handled silently.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            AppError::PositionUnavailable(_) => Some(Self::POSITION_MESSAGE),
            AppError::Validation(_) => Some(Self::VALIDATION_MESSAGE),
            AppError::Storage(_) | AppError::Codec(_) => Some(Self::SAVE_MESSAGE),
            AppError::MapNotReady | AppError::NoPendingLocation | AppError::StaleSelection(_) => {
                None
            }
        }
    }
}

/// Position acquisition failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("Geolocation is not supported")]
    Unsupported,

    #[error("Permission to read the position was denied")]
    PermissionDenied,

    #[error("Position lookup failed: {0}")]
    Failed(String),
}

/// Result type alias for controller operations
pub type Result<T> = std::result::Result<T, AppError>;
