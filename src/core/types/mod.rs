//! Core type definitions: addresses, scalars, vectors, modules, errors

mod address;
mod error;
mod module;
mod scalar;
mod vector;

pub use address::Address;
pub use error::{MemoryError, MemoryResult};
pub use module::ModuleRecord;
pub use scalar::{ScalarType, ScalarValue, TypedSlice};
pub use vector::{Vector2, Vector3};

// Common type aliases
pub type ProcessId = u32;
