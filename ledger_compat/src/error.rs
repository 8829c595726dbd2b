//! Error types for the compatibility guard.
//!
//! Only hard failures live here. A driver that is too old, on an untested
//! line, or older than its core library is a policy verdict, not an error.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::version::{SemanticVersion, VersionLine};

/// Result type alias using CompatError
pub type Result<T> = std::result::Result<T, CompatError>;

/// Errors raised while parsing versions or building a policy.
#[derive(Error, Debug)]
pub enum CompatError {
    /// A version string from the driver or a constant is not valid semver.
    #[error("malformed version string {input:?}")]
    MalformedVersion {
        input: String,
        #[source]
        source: semver::Error,
    },

    /// A supported-line entry is not of the form `<major>.<minor>`.
    #[error("malformed version line {input:?}: expected <major>.<minor>")]
    MalformedVersionLine { input: String },

    /// The floor version sits on a line the policy does not accept.
    #[error(
        "configuration defect: oldest supported driver {floor} is on line {line}, \
         which is not in the supported line set"
    )]
    ConfigurationDefect {
        floor: SemanticVersion,
        line: VersionLine,
    },

    /// Policy file could not be read.
    #[error("failed to read policy file {}", path.display())]
    PolicyRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Policy file is not a valid policy document.
    #[error("invalid policy file {}", path.display())]
    PolicyFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
