//! Process resolution: symbolic names and pids down to an open target

use super::target::TargetProcess;
use crate::codec::ByteOrder;
use crate::core::types::{Address, MemoryError, MemoryResult, ModuleRecord, ProcessId};
use crate::host::ProcessHost;
use crate::memory::ProcessHandle;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Conventional suffix appended to bare executable names
pub const EXECUTABLE_SUFFIX: &str = ".exe";

struct ImageSnapshot {
    name: String,
    base: Address,
    size: u32,
    modules: HashMap<String, ModuleRecord>,
}

/// Walks a process's module table. The first entry is the process's own
/// image; the rest are keyed by name. The image stays out of the map and
/// is exposed only through the primary base/size fields.
fn walk_modules(host: &dyn ProcessHost, pid: ProcessId) -> MemoryResult<ImageSnapshot> {
    let mut records = host.modules(pid)?.into_iter();
    let image = records
        .next()
        .ok_or_else(|| MemoryError::ProcessNotFound(format!("no module entries for pid {}", pid)))?;

    let mut modules = HashMap::new();
    for record in records {
        modules.insert(record.name.clone(), record);
    }

    Ok(ImageSnapshot {
        name: image.name,
        base: image.base,
        size: image.size,
        modules,
    })
}

fn normalize_name(name: &str) -> String {
    if name.ends_with(EXECUTABLE_SUFFIX) {
        name.to_string()
    } else {
        format!("{}{}", name, EXECUTABLE_SUFFIX)
    }
}

fn open_target(
    host: &dyn ProcessHost,
    snapshot: ImageSnapshot,
    pid: ProcessId,
    byte_order: ByteOrder,
) -> MemoryResult<TargetProcess> {
    // Handle acquisition is the last step; from here the channel is owned
    // by the handle and released on every path
    let channel = host.open(pid)?;
    debug!(pid, name = %snapshot.name, "resolved target process");

    Ok(TargetProcess::new(
        snapshot.name,
        pid,
        ProcessHandle::new(pid, channel),
        snapshot.base,
        snapshot.size,
        snapshot.modules,
        byte_order,
    ))
}

/// Resolves a target process by pid.
///
/// Fails with `ProcessNotFound` when the module walk yields no entries,
/// and with `OpenFailed` when discovery succeeds but the OS refuses a
/// read/write handle.
pub fn resolve_by_pid(
    host: &dyn ProcessHost,
    pid: ProcessId,
    byte_order: ByteOrder,
) -> MemoryResult<TargetProcess> {
    let snapshot = walk_modules(host, pid)?;
    open_target(host, snapshot, pid, byte_order)
}

/// Resolves a target process by executable name.
///
/// A bare name gets the conventional `.exe` suffix appended, then every
/// running process's image name is compared case-sensitively against it.
/// Processes whose module walk errors are skipped; a match that cannot be
/// opened is `OpenFailed`. An exhausted list is `ProcessNotFound` naming
/// the normalized executable name.
pub fn resolve_by_name(
    host: &dyn ProcessHost,
    name: &str,
    byte_order: ByteOrder,
) -> MemoryResult<TargetProcess> {
    let target = normalize_name(name);

    let pids = host
        .process_ids()
        .map_err(|err| MemoryError::ProcessNotFound(format!("{}: {}", target, err)))?;

    for pid in pids {
        let snapshot = match walk_modules(host, pid) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                trace!(pid, %err, "skipping process during name resolution");
                continue;
            }
        };

        if snapshot.name == target {
            return open_target(host, snapshot, pid, byte_order);
        }
    }

    Err(MemoryError::ProcessNotFound(target))
}
