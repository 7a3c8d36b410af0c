//! Raw memory channel bound to one open process handle

use crate::core::types::{Address, MemoryError, MemoryResult, ProcessId};
use crate::host::RawChannel;
use std::fmt;

/// Owns a process's raw transfer channel for its whole lifetime.
///
/// The underlying OS resource is released exactly once: either by an
/// explicit [`close`](ProcessHandle::close), which is idempotent, or on
/// drop. Every transfer after release fails fast with `InvalidHandle`.
pub struct ProcessHandle {
    pid: ProcessId,
    channel: Option<Box<dyn RawChannel>>,
}

impl ProcessHandle {
    /// Wraps a freshly acquired channel
    pub fn new(pid: ProcessId, channel: Box<dyn RawChannel>) -> Self {
        ProcessHandle {
            pid,
            channel: Some(channel),
        }
    }

    /// Gets the process ID
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Checks whether the handle still owns a live channel
    pub fn is_open(&self) -> bool {
        self.channel.is_some()
    }

    /// Releases the channel. Safe to call more than once.
    pub fn close(&mut self) {
        self.channel = None;
    }

    fn channel(&self) -> MemoryResult<&dyn RawChannel> {
        self.channel
            .as_deref()
            .ok_or_else(|| MemoryError::InvalidHandle(format!("process {} released", self.pid)))
    }

    /// Reads exactly `size` bytes at `address`.
    ///
    /// A transfer that moves fewer bytes than requested is an error, never
    /// a zero-padded buffer. Zero-size reads are a no-op.
    pub fn read_bytes(&self, address: Address, size: usize) -> MemoryResult<Vec<u8>> {
        let channel = self.channel()?;
        if size == 0 {
            return Ok(Vec::new());
        }

        let mut buffer = vec![0u8; size];
        let moved = channel.read(address, &mut buffer)?;
        if moved != size {
            return Err(MemoryError::transfer_failed(
                address,
                size,
                format!("short read of {} bytes", moved),
            ));
        }
        Ok(buffer)
    }

    /// Writes all of `data` at `address`, returning the count written.
    ///
    /// A short write is an error; no retry is attempted.
    pub fn write_bytes(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        let channel = self.channel()?;
        if data.is_empty() {
            return Ok(0);
        }

        let moved = channel.write(address, data)?;
        if moved != data.len() {
            return Err(MemoryError::transfer_failed(
                address,
                data.len(),
                format!("short write of {} bytes", moved),
            ));
        }
        Ok(moved)
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .field("open", &self.is_open())
            .finish()
    }
}
