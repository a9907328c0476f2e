// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod codec;
pub mod ids;
pub mod render;
pub mod validation;

pub use codec::{decode, encode, CodecError};
pub use ids::IdGenerator;
pub use validation::{validate_form, ValidInput, ValidationError};
