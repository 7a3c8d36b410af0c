//! In-memory host backend for tests
//!
//! Simulates a process table with loaded modules and one contiguous memory
//! region per process. Reads and writes report the number of bytes that
//! fall inside the region, so short transfers and unmapped addresses
//! behave like they do against a live process.

use super::{ProcessHost, RawChannel};
use crate::core::types::{Address, MemoryError, MemoryResult, ModuleRecord, ProcessId};
use std::sync::{Arc, Mutex};

struct Region {
    origin: usize,
    bytes: Vec<u8>,
}

/// Shared handle to a mock process's memory region.
///
/// Cloning shares the same backing storage, so a test can seed memory
/// before a read and inspect it after a write.
#[derive(Clone)]
pub struct SharedMemory {
    inner: Arc<Mutex<Region>>,
}

impl SharedMemory {
    fn new(origin: Address, size: usize) -> Self {
        SharedMemory {
            inner: Arc::new(Mutex::new(Region {
                origin: origin.as_usize(),
                bytes: vec![0u8; size],
            })),
        }
    }

    /// Seeds bytes at an address; panics if the range is outside the region
    pub fn load(&self, address: Address, data: &[u8]) {
        let mut region = self.inner.lock().unwrap();
        let start = address
            .as_usize()
            .checked_sub(region.origin)
            .expect("load below region origin");
        let end = start + data.len();
        assert!(end <= region.bytes.len(), "load past region end");
        region.bytes[start..end].copy_from_slice(data);
    }

    /// Copies bytes out of the region for inspection
    pub fn snapshot(&self, address: Address, len: usize) -> Vec<u8> {
        let region = self.inner.lock().unwrap();
        let start = address
            .as_usize()
            .checked_sub(region.origin)
            .expect("snapshot below region origin");
        region.bytes[start..start + len].to_vec()
    }

    fn overlap(&self, address: Address, len: usize) -> (usize, usize) {
        let region = self.inner.lock().unwrap();
        let start = address.as_usize().saturating_sub(region.origin);
        if address.as_usize() < region.origin || start >= region.bytes.len() {
            return (0, 0);
        }
        (start, len.min(region.bytes.len() - start))
    }
}

struct MockChannel {
    memory: SharedMemory,
}

impl RawChannel for MockChannel {
    fn read(&self, address: Address, buf: &mut [u8]) -> MemoryResult<usize> {
        let (start, count) = self.memory.overlap(address, buf.len());
        let region = self.memory.inner.lock().unwrap();
        buf[..count].copy_from_slice(&region.bytes[start..start + count]);
        Ok(count)
    }

    fn write(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        let (start, count) = self.memory.overlap(address, data.len());
        let mut region = self.memory.inner.lock().unwrap();
        region.bytes[start..start + count].copy_from_slice(&data[..count]);
        Ok(count)
    }
}

/// One simulated process: a module table and a backing memory region.
pub struct MockProcess {
    pid: ProcessId,
    modules: Vec<ModuleRecord>,
    memory: SharedMemory,
    openable: bool,
    walk_fails: bool,
}

impl MockProcess {
    /// Creates a process whose image module spans `[base, base + size)`;
    /// that span is also the backing memory region
    pub fn new(pid: ProcessId, image_name: &str, base: Address, size: u32) -> Self {
        MockProcess {
            pid,
            modules: vec![ModuleRecord::new(image_name, base, size)],
            memory: SharedMemory::new(base, size as usize),
            openable: true,
            walk_fails: false,
        }
    }

    /// Appends a module after the image
    pub fn with_module(mut self, name: &str, base: Address, size: u32) -> Self {
        self.modules.push(ModuleRecord::new(name, base, size));
        self
    }

    /// Makes handle acquisition fail with OpenFailed
    pub fn deny_open(mut self) -> Self {
        self.openable = false;
        self
    }

    /// Makes the module walk fail
    pub fn fail_module_walk(mut self) -> Self {
        self.walk_fails = true;
        self
    }

    /// Shares the backing memory region
    pub fn memory(&self) -> SharedMemory {
        self.memory.clone()
    }
}

/// An in-memory [`ProcessHost`].
#[derive(Default)]
pub struct MockHost {
    processes: Vec<MockProcess>,
}

impl MockHost {
    pub fn new() -> Self {
        MockHost::default()
    }

    /// Adds a process, returning a handle to its memory region
    pub fn add(&mut self, process: MockProcess) -> SharedMemory {
        let memory = process.memory();
        self.processes.push(process);
        memory
    }

    fn find(&self, pid: ProcessId) -> Option<&MockProcess> {
        self.processes.iter().find(|p| p.pid == pid)
    }
}

impl ProcessHost for MockHost {
    fn process_ids(&self) -> MemoryResult<Vec<ProcessId>> {
        Ok(self.processes.iter().map(|p| p.pid).collect())
    }

    fn modules(&self, pid: ProcessId) -> MemoryResult<Vec<ModuleRecord>> {
        let process = self
            .find(pid)
            .ok_or_else(|| MemoryError::ProcessNotFound(format!("pid {}", pid)))?;
        if process.walk_fails {
            return Err(MemoryError::ProcessNotFound(format!(
                "module walk failed for pid {}",
                pid
            )));
        }
        Ok(process.modules.clone())
    }

    fn open(&self, pid: ProcessId) -> MemoryResult<Box<dyn RawChannel>> {
        let process = self
            .find(pid)
            .ok_or_else(|| MemoryError::open_failed(pid, "no such process"))?;
        if !process.openable {
            return Err(MemoryError::open_failed(pid, "access denied"));
        }
        Ok(Box::new(MockChannel {
            memory: process.memory(),
        }))
    }
}
