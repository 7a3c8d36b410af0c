//! Loaded-module records captured at resolution time

use super::Address;
use serde::{Deserialize, Serialize};

/// One loaded module inside the target process.
///
/// Immutable once captured. The record goes stale if the target reloads or
/// unloads the module; staleness is not detected here, callers re-resolve
/// when they need a fresh view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub name: String,
    pub base: Address,
    pub size: u32,
}

impl ModuleRecord {
    /// Creates a new ModuleRecord
    pub fn new(name: impl Into<String>, base: Address, size: u32) -> Self {
        ModuleRecord {
            name: name.into(),
            base,
            size,
        }
    }

    /// Gets the first address past the end of the module
    pub fn end_address(&self) -> Address {
        self.base.offset(self.size as usize)
    }

    /// Checks if an address falls within this module
    pub fn contains_address(&self, address: Address) -> bool {
        address >= self.base && address < self.end_address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_bounds() {
        let module = ModuleRecord::new("engine.dll", Address::new(0x10000), 0x1000);
        assert_eq!(module.end_address(), Address::new(0x11000));
        assert!(module.contains_address(Address::new(0x10500)));
        assert!(!module.contains_address(Address::new(0x11000)));
        assert!(!module.contains_address(Address::new(0xFFFF)));
    }
}
