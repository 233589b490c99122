//! Content manifest: the YAML document a registry is built from.
//!
//! ```yaml
//! version: "1"
//! posts:
//!   - key: tidelog-2-0
//!     title: Tidelog 2.0
//!     description: ...
//!     published_at: 2025-09-30T09:00:00Z
//!     category: Release
//!     read_time: 6 min read
//!     featured: true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::RegistryError;
use crate::domain::ContentRecord;

/// Manifest format version understood by this build
pub const MANIFEST_VERSION: &str = "1";

/// Manifest compiled into the binary
const BUILTIN_MANIFEST: &str = include_str!("../../content/posts.yaml");

/// Raw manifest schema (matches YAML structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    #[serde(default)]
    pub posts: Vec<ContentRecord>,
}

impl Manifest {
    /// Parse manifest YAML
    pub fn parse(text: &str) -> Result<Self, RegistryError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// The manifest shipped with the site
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::parse(BUILTIN_MANIFEST)
    }

    pub(crate) fn check_version(&self) -> Result<(), RegistryError> {
        if self.version.trim() != MANIFEST_VERSION {
            return Err(RegistryError::UnsupportedVersion(self.version.clone()));
        }
        Ok(())
    }
}
