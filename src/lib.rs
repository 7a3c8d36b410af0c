//! memtap — typed remote-process memory access
//!
//! Resolves an already-running process by pid or executable name, then
//! reads and writes typed values (fixed-width integers, floats, float
//! vectors, strided arrays) at arbitrary addresses in its memory under a
//! per-process byte order. The host OS is consumed through the
//! [`host::ProcessHost`] / [`host::RawChannel`] traits; on Windows the
//! [`host::windows::WindowsHost`] backend is available, and
//! [`host::mock::MockHost`] serves tests everywhere.
//!
//! ```no_run
//! # #[cfg(windows)]
//! # fn main() -> memtap::MemoryResult<()> {
//! use memtap::{host::windows::WindowsHost, resolve_by_name, ByteOrder};
//!
//! let host = WindowsHost::new();
//! let target = resolve_by_name(&host, "game", ByteOrder::Little)?;
//! let health = target.reader().read_i32(target.base_address().offset(0x1A2B))?;
//! println!("health: {health}");
//! # Ok(())
//! # }
//! # #[cfg(not(windows))]
//! # fn main() {}
//! ```

pub mod codec;
pub mod core;
pub mod host;
pub mod memory;
pub mod process;

pub use codec::{ByteOrder, Scalar};
pub use core::types::{
    Address, MemoryError, MemoryResult, ModuleRecord, ProcessId, ScalarType, ScalarValue,
    TypedSlice, Vector2, Vector3,
};
pub use host::{ProcessHost, RawChannel};
pub use memory::{ProcessHandle, TypedReader, TypedWriter};
pub use process::{resolve_by_name, resolve_by_pid, TargetProcess};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert_eq!(core::VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_address_reexport() {
        let addr = Address::new(0x1000);
        assert_eq!(addr.as_usize(), 0x1000);
        assert!(Address::null().is_null());
    }

    #[test]
    fn test_scalar_reexports() {
        assert_eq!(ScalarValue::I32(42).scalar_type(), ScalarType::I32);
        assert_eq!(ScalarType::F64.width(), 8);
        assert_eq!("int16".parse::<ScalarType>().unwrap(), ScalarType::I16);
    }

    #[test]
    fn test_vector_reexports() {
        let sum = Vector2::new(1.0, 2.0) + Vector2::new(3.0, 4.0);
        assert_eq!(sum, Vector2::new(4.0, 6.0));
    }

    #[test]
    fn test_error_reexport() {
        let err = MemoryError::ProcessNotFound("game.exe".to_string());
        assert!(err.to_string().contains("Process not found"));
    }
}
