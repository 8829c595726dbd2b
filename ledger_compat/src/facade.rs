//! Version facade — the three version identities, one accessor each.
//!
//!   - `module_version`:       this wrapper module (fixed at construction)
//!   - `driver_version`:       the loaded native driver (live)
//!   - `core_library_version`: the core ledger library in use by the driver (live)
//!
//! The two live accessors delegate straight to the driver handle and only
//! parse. No caching, no reformatting: the rendered result is the handle's
//! string byte-for-byte.

use tracing::debug;

use crate::driver::{DriverHandle, NativeDriver};
use crate::error::Result;
use crate::policy::MODULE_VERSION;
use crate::version::SemanticVersion;

#[derive(Debug, Clone)]
pub struct VersionFacade<D> {
    module_version: SemanticVersion,
    driver: D,
}

impl<D: DriverHandle> VersionFacade<D> {
    pub fn new(module_version: SemanticVersion, driver: D) -> Self {
        Self {
            module_version,
            driver,
        }
    }

    /// Version of this module. Never touches the driver.
    pub fn module_version(&self) -> &SemanticVersion {
        &self.module_version
    }

    /// Version of the native driver, read live.
    ///
    /// Not to be confused with `core_library_version` (the library inside
    /// the driver) or `module_version` (this wrapper).
    pub fn driver_version(&self) -> Result<SemanticVersion> {
        let raw = self.driver.driver_version();
        debug!(driver_version = %raw, "driver version read");
        SemanticVersion::parse(&raw)
    }

    /// Version of the core ledger library in use by the driver, read live.
    ///
    /// This is what the driver runs against, not what it was compiled
    /// against; the latter is not exposed.
    pub fn core_library_version(&self) -> Result<SemanticVersion> {
        let raw = self.driver.core_library_version();
        debug!(core_library_version = %raw, "core library version read");
        SemanticVersion::parse(&raw)
    }

    /// The underlying handle, for callers that need the raw readings.
    pub fn handle(&self) -> &D {
        &self.driver
    }
}

impl VersionFacade<NativeDriver> {
    /// Facade over the linked native driver, identified by this module's
    /// version. Independent of the published policy, so a caller supplying
    /// its own policy never depends on the published constants.
    pub fn native() -> Result<Self> {
        Ok(Self::new(SemanticVersion::parse(MODULE_VERSION)?, NativeDriver))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::driver::FixedDriver;
    use crate::error::CompatError;

    /// Handle whose readings change on every call.
    struct CountingDriver {
        calls: Cell<u64>,
    }

    impl DriverHandle for CountingDriver {
        fn driver_version(&self) -> String {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            format!("0.1.{}", n)
        }

        fn core_library_version(&self) -> String {
            format!("0.0.{}", self.calls.get())
        }
    }

    #[test]
    fn live_readings_are_never_cached() {
        let facade = VersionFacade::new(
            SemanticVersion::new(3, 0, 0),
            CountingDriver { calls: Cell::new(0) },
        );
        assert_eq!(facade.driver_version().unwrap().to_string(), "0.1.1");
        assert_eq!(facade.driver_version().unwrap().to_string(), "0.1.2");
        assert_eq!(facade.core_library_version().unwrap().to_string(), "0.0.2");
        assert_eq!(facade.handle().calls.get(), 2);
    }

    #[test]
    fn module_version_does_not_touch_driver() {
        let facade = VersionFacade::new(
            SemanticVersion::new(3, 0, 0),
            CountingDriver { calls: Cell::new(0) },
        );
        assert_eq!(facade.module_version().to_string(), "3.0.0");
        assert_eq!(facade.handle().calls.get(), 0);
    }

    #[test]
    fn malformed_driver_reading_is_a_hard_error() {
        let facade = VersionFacade::new(SemanticVersion::new(0, 1, 0), FixedDriver::new("0.1", "0.1.0"));
        match facade.driver_version() {
            Err(CompatError::MalformedVersion { input, .. }) => assert_eq!(input, "0.1"),
            other => panic!("expected MalformedVersion, got {:?}", other),
        }
        assert!(facade.core_library_version().is_ok());
    }

    #[test]
    fn native_facade_reports_linked_driver() {
        let facade = VersionFacade::native().unwrap();
        assert_eq!(facade.module_version().to_string(), MODULE_VERSION);
        assert_eq!(
            facade.driver_version().unwrap().to_string(),
            ledger_driver::DRIVER_VERSION
        );
        assert_eq!(
            facade.core_library_version().unwrap().to_string(),
            ledger_driver::CORE_LIBRARY_VERSION
        );
    }
}
