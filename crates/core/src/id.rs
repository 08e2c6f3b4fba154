// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run and version identifiers
//!
//! A run is named after the version it upgrades (`upgrade-<version>`). The
//! prefix and the version are kept as separate fields so nothing ever has to
//! slice the composed name by position.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Naming-scheme prefix for upgrade runs
pub const RUN_ID_PREFIX: &str = "upgrade";

/// Identifier of the version being upgraded
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(pub String);

impl VersionId {
    pub fn new(id: impl Into<String>) -> Self {
        VersionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VersionId {
    fn from(s: String) -> Self {
        VersionId(s)
    }
}

impl From<&str> for VersionId {
    fn from(s: &str) -> Self {
        VersionId(s.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunIdError {
    #[error("run id {0:?} does not start with \"upgrade-\"")]
    MissingPrefix(String),
    #[error("run id {0:?} has an empty version")]
    EmptyVersion(String),
}

/// Identifier of a durable run
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId {
    prefix: &'static str,
    version: VersionId,
}

impl RunId {
    /// Run id for the upgrade of `version`
    pub fn for_version(version: impl Into<VersionId>) -> Self {
        Self {
            prefix: RUN_ID_PREFIX,
            version: version.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        self.prefix
    }

    pub fn version(&self) -> &VersionId {
        &self.version
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.version)
    }
}

impl FromStr for RunId {
    type Err = RunIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version = s
            .strip_prefix(RUN_ID_PREFIX)
            .and_then(|rest| rest.strip_prefix('-'))
            .ok_or_else(|| RunIdError::MissingPrefix(s.to_string()))?;
        if version.is_empty() {
            return Err(RunIdError::EmptyVersion(s.to_string()));
        }
        Ok(RunId::for_version(version))
    }
}

impl Serialize for RunId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RunId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
