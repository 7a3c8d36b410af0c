//! Core module containing the fundamental types of the crate
//!
//! This module provides the building blocks used throughout the library:
//! address handling, scalar value tags, vector value types, module records,
//! and error types.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    Address, MemoryError, MemoryResult, ModuleRecord, ScalarType, ScalarValue, TypedSlice,
    Vector2, Vector3,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
