//! Version value types.
//!
//! Every version string crossing the driver boundary is parsed into a
//! `SemanticVersion` immediately. Ordering follows SemVer 2.0 precedence:
//! major, minor, patch, then pre-release (a pre-release sorts before the
//! release of the same triple). Build metadata is kept for display only.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CompatError, Result};

/// A parsed semantic version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemanticVersion(semver::Version);

impl SemanticVersion {
    /// Release version with no pre-release or build metadata.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// Parse a strict semver string (`1.2.3`, `1.2.3-rc.1`, `1.2.3+build`).
    pub fn parse(input: &str) -> Result<Self> {
        semver::Version::parse(input)
            .map(Self)
            .map_err(|source| CompatError::MalformedVersion {
                input: input.to_string(),
                source,
            })
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    pub fn is_prerelease(&self) -> bool {
        !self.0.pre.is_empty()
    }

    /// The `major.minor` line this version belongs to.
    pub fn line(&self) -> VersionLine {
        VersionLine::new(self.0.major, self.0.minor)
    }

    pub fn as_semver(&self) -> &semver::Version {
        &self.0
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .major
            .cmp(&other.0.major)
            .then_with(|| self.0.minor.cmp(&other.0.minor))
            .then_with(|| self.0.patch.cmp(&other.0.patch))
            .then_with(|| self.0.pre.cmp(&other.0.pre))
    }
}

// Must agree with `Eq`, so build metadata is left out.
impl Hash for SemanticVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.major.hash(state);
        self.0.minor.hash(state);
        self.0.patch.hash(state);
        self.0.pre.hash(state);
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for SemanticVersion {
    type Err = CompatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SemanticVersion {
    type Error = CompatError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<SemanticVersion> for String {
    fn from(v: SemanticVersion) -> Self {
        v.to_string()
    }
}

impl From<semver::Version> for SemanticVersion {
    fn from(v: semver::Version) -> Self {
        Self(v)
    }
}

/// Coarse compatibility group: the `major.minor` prefix of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionLine {
    major: u64,
    minor: u64,
}

impl VersionLine {
    pub const fn new(major: u64, minor: u64) -> Self {
        Self { major, minor }
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    /// Parse `<major>.<minor>`. Same numeric rules as semver: ASCII digits
    /// only, no leading zeros.
    pub fn parse(input: &str) -> Result<Self> {
        let malformed = || CompatError::MalformedVersionLine {
            input: input.to_string(),
        };
        let (major, minor) = input.split_once('.').ok_or_else(malformed)?;
        Ok(Self {
            major: parse_numeric(major).ok_or_else(malformed)?,
            minor: parse_numeric(minor).ok_or_else(malformed)?,
        })
    }
}

fn parse_numeric(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if part.len() > 1 && part.starts_with('0') {
        return None;
    }
    part.parse().ok()
}

impl fmt::Display for VersionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for VersionLine {
    type Err = CompatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VersionLine {
    type Error = CompatError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<VersionLine> for String {
    fn from(line: VersionLine) -> Self {
        line.to_string()
    }
}
