//! Compatibility verifier — checks a live driver against the policy.
//!
//! Three checks, each run regardless of the others:
//!   1. driver_acceptability: driver passes the floor and line gates
//!   2. library_consistency:  driver >= core library
//!   3. facade_identity:      facade readings equal raw handle readings
//!
//! A malformed reading fails only the checks that need it. The report
//! is all-or-nothing per check; there are no partial passes.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::driver::DriverHandle;
use crate::facade::VersionFacade;
use crate::policy::{CompatPolicy, DriverVerdict};
use crate::version::{SemanticVersion, VersionLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    DriverAcceptability,
    LibraryConsistency,
    FacadeIdentity,
}

impl CheckKind {
    pub fn name(self) -> &'static str {
        match self {
            CheckKind::DriverAcceptability => "driver_acceptability",
            CheckKind::LibraryConsistency => "library_consistency",
            CheckKind::FacadeIdentity => "facade_identity",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub check: CheckKind,
    pub passed: bool,
    /// Names the versions that were compared.
    pub message: String,
}

impl CheckOutcome {
    fn pass(check: CheckKind, message: String) -> Self {
        info!(check = %check, "{}", message);
        Self {
            check,
            passed: true,
            message,
        }
    }

    fn fail(check: CheckKind, message: String) -> Self {
        warn!(check = %check, "{}", message);
        Self {
            check,
            passed: false,
            message,
        }
    }
}

/// Structured verification report.
///
/// `driver_version` and `core_library_version` are the raw handle readings
/// taken when the report was started; each check takes its own readings.
#[derive(Debug, Clone, Serialize)]
pub struct CompatReport {
    pub module_version: SemanticVersion,
    pub driver_version: String,
    pub core_library_version: String,
    /// Absent when the driver reading could not be parsed.
    pub driver_verdict: Option<DriverVerdict>,
    pub checks: Vec<CheckOutcome>,
}

impl CompatReport {
    /// True only if every check passed.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.checks.iter().filter(|c| !c.passed)
    }

    pub fn outcome(&self, check: CheckKind) -> Option<&CheckOutcome> {
        self.checks.iter().find(|c| c.check == check)
    }

    /// Canonical JSON: no whitespace, fields in declaration order.
    pub fn canonical_json(&self) -> String {
        serde_json::to_string(self).expect("canonical_json: report serialization failed")
    }

    /// SHA-256 of the canonical JSON. Lowercase hex.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.canonical_json().as_bytes());
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

/// Run all three checks against the facade's driver.
pub fn verify<D: DriverHandle>(policy: &CompatPolicy, facade: &VersionFacade<D>) -> CompatReport {
    let handle = facade.handle();
    let driver_version = handle.driver_version();
    let core_library_version = handle.core_library_version();

    let (acceptability, driver_verdict) = check_driver_acceptability(policy, facade);
    let checks = vec![
        acceptability,
        check_library_consistency(policy, facade),
        check_facade_identity(facade),
    ];

    CompatReport {
        module_version: facade.module_version().clone(),
        driver_version,
        core_library_version,
        driver_verdict,
        checks,
    }
}

fn check_driver_acceptability<D: DriverHandle>(
    policy: &CompatPolicy,
    facade: &VersionFacade<D>,
) -> (CheckOutcome, Option<DriverVerdict>) {
    let kind = CheckKind::DriverAcceptability;
    let driver = match facade.driver_version() {
        Ok(v) => v,
        Err(e) => return (CheckOutcome::fail(kind, error_chain(&e)), None),
    };

    let verdict = policy.evaluate_driver(&driver);
    let lines = format_lines(policy.supported_lines());
    let outcome = match &verdict {
        DriverVerdict::Supported => CheckOutcome::pass(
            kind,
            format!(
                "driver {} is supported (oldest supported {}, lines [{}])",
                driver,
                policy.oldest_supported_driver(),
                lines
            ),
        ),
        DriverVerdict::BelowFloor { floor } => CheckOutcome::fail(
            kind,
            format!("driver {} is older than the oldest supported driver {}", driver, floor),
        ),
        DriverVerdict::UnsupportedLine { line } => CheckOutcome::fail(
            kind,
            format!(
                "driver {} is on line {}, which is not in the supported lines [{}]",
                driver, line, lines
            ),
        ),
        DriverVerdict::BelowFloorAndUnsupportedLine { floor, line } => CheckOutcome::fail(
            kind,
            format!(
                "driver {} is older than the oldest supported driver {} \
                 and is on line {}, which is not in the supported lines [{}]",
                driver, floor, line, lines
            ),
        ),
    };
    (outcome, Some(verdict))
}

fn check_library_consistency<D: DriverHandle>(
    policy: &CompatPolicy,
    facade: &VersionFacade<D>,
) -> CheckOutcome {
    let kind = CheckKind::LibraryConsistency;
    let (driver, core) = match (facade.driver_version(), facade.core_library_version()) {
        (Ok(d), Ok(c)) => (d, c),
        (Err(e), _) | (_, Err(e)) => return CheckOutcome::fail(kind, error_chain(&e)),
    };

    if policy.is_core_library_version_consistent(&driver, &core) {
        CheckOutcome::pass(
            kind,
            format!("driver {} is at or ahead of core library {}", driver, core),
        )
    } else {
        CheckOutcome::fail(
            kind,
            format!("core library {} is newer than driver {}", core, driver),
        )
    }
}

fn check_facade_identity<D: DriverHandle>(facade: &VersionFacade<D>) -> CheckOutcome {
    let kind = CheckKind::FacadeIdentity;
    let handle = facade.handle();

    let facade_driver = match facade.driver_version() {
        Ok(v) => v.to_string(),
        Err(e) => return CheckOutcome::fail(kind, error_chain(&e)),
    };
    let direct_driver = handle.driver_version();
    let facade_core = match facade.core_library_version() {
        Ok(v) => v.to_string(),
        Err(e) => return CheckOutcome::fail(kind, error_chain(&e)),
    };
    let direct_core = handle.core_library_version();

    let mut mismatches = Vec::new();
    if facade_driver != direct_driver {
        mismatches.push(format!(
            "driver version: facade {:?}, handle {:?}",
            facade_driver, direct_driver
        ));
    }
    if facade_core != direct_core {
        mismatches.push(format!(
            "core library version: facade {:?}, handle {:?}",
            facade_core, direct_core
        ));
    }

    if mismatches.is_empty() {
        CheckOutcome::pass(
            kind,
            format!(
                "facade matches handle (driver {}, core library {})",
                facade_driver, facade_core
            ),
        )
    } else {
        CheckOutcome::fail(kind, format!("facade differs from handle: {}", mismatches.join("; ")))
    }
}

/// Render an error and its causes as `outer: inner: ...`.
fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn format_lines(lines: &BTreeSet<VersionLine>) -> String {
    lines
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
