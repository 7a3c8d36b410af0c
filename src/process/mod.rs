//! Process resolution and the resolved target type

pub mod resolver;
pub mod target;

pub use resolver::{resolve_by_name, resolve_by_pid, EXECUTABLE_SUFFIX};
pub use target::TargetProcess;
