//! Driver handle — the boundary to the native ledger driver.
//!
//! The driver publishes two raw version strings. Nothing on this side of
//! the boundary caches them: every call is a live reading.

/// Read-only view of a loaded ledger driver.
pub trait DriverHandle {
    /// Version of the driver build currently loaded.
    fn driver_version(&self) -> String;

    /// Version of the core ledger library the driver is running against.
    fn core_library_version(&self) -> String;
}

/// Production binding to the linked `ledger_driver` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDriver;

impl DriverHandle for NativeDriver {
    fn driver_version(&self) -> String {
        ledger_driver::driver_version()
    }

    fn core_library_version(&self) -> String {
        ledger_driver::core_library_version()
    }
}

/// Stand-in returning fixed readings, for builds and tests that must not
/// depend on the native driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedDriver {
    driver_version: String,
    core_library_version: String,
}

impl FixedDriver {
    pub fn new(driver_version: impl Into<String>, core_library_version: impl Into<String>) -> Self {
        Self {
            driver_version: driver_version.into(),
            core_library_version: core_library_version.into(),
        }
    }
}

impl DriverHandle for FixedDriver {
    fn driver_version(&self) -> String {
        self.driver_version.clone()
    }

    fn core_library_version(&self) -> String {
        self.core_library_version.clone()
    }
}
