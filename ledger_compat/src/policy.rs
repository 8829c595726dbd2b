//! Version policy engine — which driver builds this module will run on.
//!
//! Two independent gates decide whether a driver is acceptable:
//!   1. Floor:  driver >= oldest supported driver (full precedence)
//!   2. Line:   driver's `major.minor` is in the supported line set
//!
//! The line set lets a line be dropped without moving the floor, and the
//! floor catches builds under an accepted line that predate a known fix.
//! Neither gate implies the other.

use std::collections::BTreeSet;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::debug;

use crate::error::{CompatError, Result};
use crate::version::{SemanticVersion, VersionLine};

/// Version of this module. Identifies the wrapper only; never compared
/// against driver or core-library versions.
pub const MODULE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Oldest driver build this module accepts.
pub const OLDEST_SUPPORTED_DRIVER: &str = "0.1.0";

/// Driver lines this module has been tested against.
pub const SUPPORTED_DRIVER_LINES: &[&str] = &["0.1"];

static PUBLISHED: OnceCell<CompatPolicy> = OnceCell::new();

/// Immutable compatibility policy.
///
/// Construction validates that the floor sits on a supported line, so a
/// `CompatPolicy` value is always self-consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatPolicy {
    module_version: SemanticVersion,
    oldest_supported_driver: SemanticVersion,
    supported_lines: BTreeSet<VersionLine>,
}

impl CompatPolicy {
    pub fn new(
        module_version: SemanticVersion,
        oldest_supported_driver: SemanticVersion,
        supported_lines: impl IntoIterator<Item = VersionLine>,
    ) -> Result<Self> {
        let supported_lines: BTreeSet<VersionLine> = supported_lines.into_iter().collect();

        let floor_line = oldest_supported_driver.line();
        if !supported_lines.contains(&floor_line) {
            return Err(CompatError::ConfigurationDefect {
                floor: oldest_supported_driver,
                line: floor_line,
            });
        }

        debug!(
            module = %module_version,
            floor = %oldest_supported_driver,
            lines = supported_lines.len(),
            "compatibility policy built"
        );

        Ok(Self {
            module_version,
            oldest_supported_driver,
            supported_lines,
        })
    }

    /// Policy built from the published constants, initialised once per
    /// process.
    pub fn published() -> Result<&'static CompatPolicy> {
        PUBLISHED.get_or_try_init(Self::from_constants)
    }

    fn from_constants() -> Result<Self> {
        let lines = SUPPORTED_DRIVER_LINES
            .iter()
            .map(|s| VersionLine::parse(s))
            .collect::<Result<Vec<_>>>()?;
        Self::new(
            SemanticVersion::parse(MODULE_VERSION)?,
            SemanticVersion::parse(OLDEST_SUPPORTED_DRIVER)?,
            lines,
        )
    }

    pub fn module_version(&self) -> &SemanticVersion {
        &self.module_version
    }

    pub fn oldest_supported_driver(&self) -> &SemanticVersion {
        &self.oldest_supported_driver
    }

    pub fn supported_lines(&self) -> &BTreeSet<VersionLine> {
        &self.supported_lines
    }

    /// Evaluate both driver gates and report which, if any, failed.
    pub fn evaluate_driver(&self, driver: &SemanticVersion) -> DriverVerdict {
        let below_floor = driver < &self.oldest_supported_driver;
        let line = driver.line();
        let unsupported_line = !self.supported_lines.contains(&line);

        match (below_floor, unsupported_line) {
            (false, false) => DriverVerdict::Supported,
            (true, false) => DriverVerdict::BelowFloor {
                floor: self.oldest_supported_driver.clone(),
            },
            (false, true) => DriverVerdict::UnsupportedLine { line },
            (true, true) => DriverVerdict::BelowFloorAndUnsupportedLine {
                floor: self.oldest_supported_driver.clone(),
                line,
            },
        }
    }

    /// `driver >= floor` and `line(driver)` is supported. Inclusive at the
    /// floor.
    pub fn is_driver_version_supported(&self, driver: &SemanticVersion) -> bool {
        self.evaluate_driver(driver).is_supported()
    }

    /// A driver must never run against a core library newer than itself.
    /// Equal versions are consistent.
    pub fn is_core_library_version_consistent(
        &self,
        driver: &SemanticVersion,
        core_library: &SemanticVersion,
    ) -> bool {
        driver >= core_library
    }
}

/// Outcome of the driver gates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum DriverVerdict {
    Supported,
    BelowFloor {
        floor: SemanticVersion,
    },
    UnsupportedLine {
        line: VersionLine,
    },
    BelowFloorAndUnsupportedLine {
        floor: SemanticVersion,
        line: VersionLine,
    },
}

impl DriverVerdict {
    pub fn is_supported(&self) -> bool {
        matches!(self, DriverVerdict::Supported)
    }
}
