//! Policy file — override the published floor and line set.
//!
//! Format (JSON, unknown fields rejected):
//!
//! ```json
//! {"oldest_supported_driver": "0.1.0", "supported_driver_lines": ["0.1"]}
//! ```
//!
//! The module version is not configurable; it always identifies this build.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CompatError, Result};
use crate::policy::{CompatPolicy, MODULE_VERSION};
use crate::version::{SemanticVersion, VersionLine};

/// Environment variable the CLI reads a policy path from.
pub const POLICY_PATH_ENV: &str = "LEDGER_COMPAT_POLICY";

/// On-disk policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyFile {
    pub oldest_supported_driver: SemanticVersion,
    pub supported_driver_lines: BTreeSet<VersionLine>,
}

impl PolicyFile {
    /// Validate into a policy for this module.
    pub fn into_policy(self) -> Result<CompatPolicy> {
        CompatPolicy::new(
            SemanticVersion::parse(MODULE_VERSION)?,
            self.oldest_supported_driver,
            self.supported_driver_lines,
        )
    }
}

impl From<&CompatPolicy> for PolicyFile {
    fn from(policy: &CompatPolicy) -> Self {
        Self {
            oldest_supported_driver: policy.oldest_supported_driver().clone(),
            supported_driver_lines: policy.supported_lines().clone(),
        }
    }
}

/// Load and validate a policy file.
pub fn load_policy(path: &Path) -> Result<CompatPolicy> {
    let content = fs::read_to_string(path).map_err(|source| CompatError::PolicyRead {
        path: path.to_path_buf(),
        source,
    })?;
    let file: PolicyFile =
        serde_json::from_str(&content).map_err(|source| CompatError::PolicyFormat {
            path: path.to_path_buf(),
            source,
        })?;

    let policy = file.into_policy()?;
    info!(
        path = %path.display(),
        floor = %policy.oldest_supported_driver(),
        "policy loaded from file"
    );
    Ok(policy)
}
