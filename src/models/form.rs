// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Raw form contents as read from the view.

/// Field values exactly as typed; nothing is parsed until validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    /// Selected exercise type ("jogging" or "biking")
    pub kind: String,
    /// Distance in kilometers
    pub distance: String,
    /// Duration in minutes
    pub duration: String,
}

impl FormInput {
    pub fn new(
        kind: impl Into<String>,
        distance: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            distance: distance.into(),
            duration: duration.into(),
        }
    }
}
