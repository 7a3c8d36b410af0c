//! Error types for remote-memory operations

use super::address::Address;
use super::scalar::ScalarType;
use thiserror::Error;

/// Main error type for remote-memory operations
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Failed to open process {pid}: {reason}")]
    OpenFailed { pid: u32, reason: String },

    #[error("Transfer failed at {address} ({requested} bytes requested): {reason}")]
    TransferFailed {
        address: Address,
        requested: usize,
        reason: String,
    },

    #[error("Codec contract violation for {ty}: expected {expected} bytes, got {actual}")]
    DecodeContract {
        ty: ScalarType,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported scalar type: {0}")]
    UnsupportedType(String),

    #[error("Heterogeneous array at element {index}: expected {expected}, found {found}")]
    HeterogeneousArray {
        expected: ScalarType,
        found: ScalarType,
        index: usize,
    },

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Invalid memory address: {0}")]
    InvalidAddress(String),
}

/// Result type alias for remote-memory operations
pub type MemoryResult<T> = Result<T, MemoryError>;

impl MemoryError {
    /// Creates an open failed error for a process
    pub fn open_failed(pid: u32, reason: impl Into<String>) -> Self {
        MemoryError::OpenFailed {
            pid,
            reason: reason.into(),
        }
    }

    /// Creates a transfer failed error carrying the address and requested size
    pub fn transfer_failed(address: Address, requested: usize, reason: impl Into<String>) -> Self {
        MemoryError::TransferFailed {
            address,
            requested,
            reason: reason.into(),
        }
    }

    /// Creates a codec contract violation error
    pub fn decode_contract(ty: ScalarType, expected: usize, actual: usize) -> Self {
        MemoryError::DecodeContract {
            ty,
            expected,
            actual,
        }
    }
}
