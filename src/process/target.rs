//! The resolved target process and its captured module table

use crate::codec::ByteOrder;
use crate::core::types::{Address, ModuleRecord, ProcessId};
use crate::memory::{ProcessHandle, TypedReader, TypedWriter};
use std::collections::HashMap;
use std::fmt;

/// A process resolved for memory access.
///
/// Owns the process handle exclusively; it is released exactly once, on
/// [`close`](TargetProcess::close) or on drop. The byte order and the
/// module table are fixed at resolution time; reads and writes never
/// mutate this value, so one target can serve readers on several threads.
pub struct TargetProcess {
    name: String,
    pid: ProcessId,
    handle: ProcessHandle,
    base_address: Address,
    base_size: u32,
    modules: HashMap<String, ModuleRecord>,
    byte_order: ByteOrder,
}

impl TargetProcess {
    pub(crate) fn new(
        name: String,
        pid: ProcessId,
        handle: ProcessHandle,
        base_address: Address,
        base_size: u32,
        modules: HashMap<String, ModuleRecord>,
        byte_order: ByteOrder,
    ) -> Self {
        TargetProcess {
            name,
            pid,
            handle,
            base_address,
            base_size,
            modules,
            byte_order,
        }
    }

    /// The executable image's reported file name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Base address of the primary (first-enumerated) module
    pub fn base_address(&self) -> Address {
        self.base_address
    }

    /// Size in bytes of the primary module
    pub fn base_size(&self) -> u32 {
        self.base_size
    }

    /// The byte order every multi-byte access to this process uses
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Modules enumerated after the primary one, keyed by name.
    ///
    /// The primary module itself is not in this map; its base and size
    /// live in the dedicated fields.
    pub fn modules(&self) -> &HashMap<String, ModuleRecord> {
        &self.modules
    }

    /// Looks up a non-primary module by name (case-sensitive)
    pub fn module(&self, name: &str) -> Option<&ModuleRecord> {
        self.modules.get(name)
    }

    pub fn handle(&self) -> &ProcessHandle {
        &self.handle
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_open()
    }

    /// Releases the handle. Idempotent; later reads and writes fail fast.
    pub fn close(&mut self) {
        self.handle.close();
    }

    /// A typed reader using this process's byte order
    pub fn reader(&self) -> TypedReader<'_> {
        TypedReader::new(&self.handle, self.byte_order)
    }

    /// A typed writer using this process's byte order
    pub fn writer(&self) -> TypedWriter<'_> {
        TypedWriter::new(&self.handle, self.byte_order)
    }
}

impl fmt::Debug for TargetProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetProcess")
            .field("name", &self.name)
            .field("pid", &self.pid)
            .field("base_address", &self.base_address)
            .field("base_size", &self.base_size)
            .field("modules", &self.modules.len())
            .field("byte_order", &self.byte_order)
            .field("open", &self.is_open())
            .finish()
    }
}
