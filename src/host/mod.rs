//! Host-OS collaborator boundary
//!
//! The core consumes process enumeration, module enumeration, handle
//! acquisition, and raw byte transfers as black-box host operations behind
//! these traits. [`windows::WindowsHost`] is the real backend;
//! [`mock::MockHost`] is an in-memory stand-in for tests on any platform.

pub mod mock;
#[cfg(windows)]
pub mod windows;

use crate::core::types::{Address, MemoryResult, ModuleRecord, ProcessId};

/// Raw byte transfers against one open process handle.
///
/// `read`/`write` report the number of bytes actually moved; the core is
/// responsible for treating anything short of the request as an error.
/// Concurrent use of one channel from multiple threads is safe insofar as
/// the host primitive is; that guarantee belongs to the implementation,
/// the core does not re-verify it. The underlying OS resource is released
/// exactly once, on drop.
pub trait RawChannel: Send + Sync {
    /// Reads into `buf` starting at `address`, returning bytes moved
    fn read(&self, address: Address, buf: &mut [u8]) -> MemoryResult<usize>;

    /// Writes `data` starting at `address`, returning bytes moved
    fn write(&self, address: Address, data: &[u8]) -> MemoryResult<usize>;
}

impl std::fmt::Debug for dyn RawChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RawChannel")
    }
}

/// Process and module discovery plus handle acquisition.
pub trait ProcessHost {
    /// Lists all running process ids
    fn process_ids(&self) -> MemoryResult<Vec<ProcessId>>;

    /// Lists the modules of a process, ordered with the process's own
    /// executable image first
    fn modules(&self, pid: ProcessId) -> MemoryResult<Vec<ModuleRecord>>;

    /// Acquires a channel granting memory read and write rights
    fn open(&self, pid: ProcessId) -> MemoryResult<Box<dyn RawChannel>>;
}
