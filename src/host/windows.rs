//! Windows host backend
//!
//! Process ids come from `EnumProcesses`, module tables from a ToolHelp32
//! snapshot, and raw transfers go through `ReadProcessMemory` /
//! `WriteProcessMemory` on a handle opened with read and write rights.

use super::{ProcessHost, RawChannel};
use crate::core::types::{Address, MemoryError, MemoryResult, ModuleRecord, ProcessId};
use std::mem;
use tracing::trace;
use winapi::shared::basetsd::SIZE_T;
use winapi::shared::minwindef::{DWORD, FALSE, LPCVOID, LPVOID};
use winapi::um::handleapi::{CloseHandle, INVALID_HANDLE_VALUE};
use winapi::um::memoryapi::{ReadProcessMemory, WriteProcessMemory};
use winapi::um::processthreadsapi::OpenProcess;
use winapi::um::psapi::EnumProcesses;
use winapi::um::tlhelp32::{
    CreateToolhelp32Snapshot, Module32FirstW, Module32NextW, MODULEENTRY32W, TH32CS_SNAPMODULE,
    TH32CS_SNAPMODULE32,
};
use winapi::um::winnt::{
    HANDLE, PROCESS_QUERY_INFORMATION, PROCESS_VM_OPERATION, PROCESS_VM_READ, PROCESS_VM_WRITE,
};

/// The live Windows [`ProcessHost`].
#[derive(Debug, Default)]
pub struct WindowsHost;

impl WindowsHost {
    pub fn new() -> Self {
        WindowsHost
    }
}

/// Snapshot handles must be closed on every path out of the module walk.
struct SnapshotGuard(HANDLE);

impl Drop for SnapshotGuard {
    fn drop(&mut self) {
        unsafe {
            CloseHandle(self.0);
        }
    }
}

fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..len])
}

fn last_os_error() -> String {
    std::io::Error::last_os_error().to_string()
}

impl ProcessHost for WindowsHost {
    fn process_ids(&self) -> MemoryResult<Vec<ProcessId>> {
        let mut pids = vec![0u32; 1024];
        let mut needed: DWORD = 0;

        let ok = unsafe {
            EnumProcesses(
                pids.as_mut_ptr(),
                (pids.len() * mem::size_of::<DWORD>()) as DWORD,
                &mut needed,
            )
        };
        if ok == FALSE {
            return Err(MemoryError::ProcessNotFound(format!(
                "process enumeration failed: {}",
                last_os_error()
            )));
        }

        pids.truncate(needed as usize / mem::size_of::<DWORD>());
        Ok(pids)
    }

    fn modules(&self, pid: ProcessId) -> MemoryResult<Vec<ModuleRecord>> {
        let snapshot =
            unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPMODULE | TH32CS_SNAPMODULE32, pid) };
        if snapshot == INVALID_HANDLE_VALUE {
            return Err(MemoryError::ProcessNotFound(format!(
                "module snapshot failed for pid {}: {}",
                pid,
                last_os_error()
            )));
        }
        let guard = SnapshotGuard(snapshot);

        let mut entry: MODULEENTRY32W = unsafe { mem::zeroed() };
        entry.dwSize = mem::size_of::<MODULEENTRY32W>() as DWORD;

        if unsafe { Module32FirstW(guard.0, &mut entry) } == FALSE {
            return Err(MemoryError::ProcessNotFound(format!(
                "no module entries for pid {}",
                pid
            )));
        }

        let mut records = Vec::new();
        loop {
            records.push(ModuleRecord::new(
                wide_to_string(&entry.szModule),
                Address::new(entry.modBaseAddr as usize),
                entry.modBaseSize,
            ));
            if unsafe { Module32NextW(guard.0, &mut entry) } == FALSE {
                break;
            }
        }

        trace!(pid, count = records.len(), "module walk complete");
        Ok(records)
    }

    fn open(&self, pid: ProcessId) -> MemoryResult<Box<dyn RawChannel>> {
        const ACCESS: DWORD = PROCESS_QUERY_INFORMATION
            | PROCESS_VM_READ
            | PROCESS_VM_WRITE
            | PROCESS_VM_OPERATION;

        let handle = unsafe { OpenProcess(ACCESS, FALSE, pid) };
        if handle.is_null() {
            return Err(MemoryError::open_failed(pid, last_os_error()));
        }

        trace!(pid, "process handle acquired");
        Ok(Box::new(WindowsChannel { handle }))
    }
}

/// A raw transfer channel backed by an open process handle.
struct WindowsChannel {
    handle: HANDLE,
}

// The handle is process-local; the kernel serializes concurrent
// ReadProcessMemory/WriteProcessMemory calls on it.
unsafe impl Send for WindowsChannel {}
unsafe impl Sync for WindowsChannel {}

impl RawChannel for WindowsChannel {
    fn read(&self, address: Address, buf: &mut [u8]) -> MemoryResult<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let mut moved: SIZE_T = 0;
        let ok = unsafe {
            ReadProcessMemory(
                self.handle,
                address.as_usize() as LPCVOID,
                buf.as_mut_ptr() as LPVOID,
                buf.len(),
                &mut moved,
            )
        };
        if ok == FALSE {
            return Err(MemoryError::transfer_failed(
                address,
                buf.len(),
                last_os_error(),
            ));
        }
        Ok(moved)
    }

    fn write(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        if data.is_empty() {
            return Ok(0);
        }

        let mut moved: SIZE_T = 0;
        let ok = unsafe {
            WriteProcessMemory(
                self.handle,
                address.as_usize() as LPVOID,
                data.as_ptr() as LPCVOID,
                data.len(),
                &mut moved,
            )
        };
        if ok == FALSE {
            return Err(MemoryError::transfer_failed(
                address,
                data.len(),
                last_os_error(),
            ));
        }
        Ok(moved)
    }
}

impl Drop for WindowsChannel {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe {
                CloseHandle(self.handle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerates_running_processes() {
        let host = WindowsHost::new();
        let pids = host.process_ids().unwrap();
        assert!(pids.contains(&std::process::id()));
    }

    #[test]
    fn test_module_walk_of_current_process() {
        let host = WindowsHost::new();
        let modules = host.modules(std::process::id()).unwrap();
        // The first entry is the executable image
        assert!(!modules.is_empty());
        assert!(!modules[0].name.is_empty());
        assert!(modules[0].size > 0);
    }

    #[test]
    fn test_open_invalid_pid_fails() {
        let host = WindowsHost::new();
        assert!(matches!(
            host.open(0).unwrap_err(),
            MemoryError::OpenFailed { pid: 0, .. }
        ));
    }

    #[test]
    fn test_read_own_memory() {
        let host = WindowsHost::new();
        let channel = host.open(std::process::id()).unwrap();

        let marker: u32 = 0xCAFEF00D;
        let mut buf = [0u8; 4];
        let moved = channel
            .read(Address::new(&marker as *const u32 as usize), &mut buf)
            .unwrap();
        assert_eq!(moved, 4);
        assert_eq!(u32::from_ne_bytes(buf), 0xCAFEF00D);
    }
}
