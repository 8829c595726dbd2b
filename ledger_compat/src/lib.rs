#![forbid(unsafe_code)]

//! Ledger compatibility guard.
//!
//! Decides whether the loaded ledger driver, and the core ledger library it
//! embeds, are safe to use from this module. Exposes the three version
//! identities (module, driver, core library) through separate accessors.
//!
//! No ledger logic lives here; the driver is only ever asked for its
//! versions.

pub mod error;
pub mod version;
pub mod driver;
pub mod policy;
pub mod facade;
pub mod verifier;
pub mod config;

pub use driver::{DriverHandle, FixedDriver, NativeDriver};
pub use error::{CompatError, Result};
pub use facade::VersionFacade;
pub use policy::{CompatPolicy, DriverVerdict};
pub use verifier::{verify, CheckKind, CheckOutcome, CompatReport};
pub use version::{SemanticVersion, VersionLine};
