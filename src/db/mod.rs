//! Storage layer (key-value stores).

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

/// Storage key names as constants.
pub mod keys {
    /// Default key holding the encoded exercise collection.
    pub const EXERCISES: &str = "workouts";
}
