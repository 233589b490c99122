//! Content registry: the single source of truth for blog post metadata.
//!
//! The registry is built once at startup, either from the manifest bundled
//! into the binary or from a manifest file, and is read-only afterwards.
//! The listing page, RSS feed, sitemap and detail pages all read from the
//! same instance so they can never disagree about which posts exist.
//!
//! ```text
//! content/posts.yaml ──► ContentRegistry ──┬──► listing   (get_all)
//!                                          ├──► feed      (get_all)
//!                                          ├──► sitemap   (get_all_keys)
//!                                          └──► detail    (get_by_key)
//! ```

pub mod manifest;

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{Category, ContentRecord};

pub use manifest::{Manifest, MANIFEST_VERSION};

/// Errors raised while building a registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate content key: {0}")]
    DuplicateKey(String),

    #[error("Invalid content key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("Unsupported manifest version: {0} (expected {expected})", expected = MANIFEST_VERSION)]
    UnsupportedVersion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Immutable, ordered collection of content records
#[derive(Debug, Clone)]
pub struct ContentRegistry {
    records: Vec<ContentRecord>,
}

impl ContentRegistry {
    /// Build a registry, validating keys. Order is kept as given.
    pub fn new(records: Vec<ContentRecord>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(records.len());

        for record in &records {
            validate_key(&record.key)?;
            if !seen.insert(record.key.as_str()) {
                return Err(RegistryError::DuplicateKey(record.key.clone()));
            }
        }

        Ok(Self { records })
    }

    /// Build from a parsed manifest
    pub fn from_manifest(manifest: Manifest) -> Result<Self, RegistryError> {
        manifest.check_version()?;
        Self::new(manifest.posts)
    }

    /// Build from the manifest compiled into the binary
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_manifest(Manifest::builtin()?)
    }

    /// Build from a manifest file on disk
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let registry = Self::from_manifest(Manifest::load(path)?)?;
        tracing::debug!(
            path = %path.display(),
            records = registry.len(),
            "Loaded content manifest"
        );
        Ok(registry)
    }

    /// All records in stored order
    pub fn get_all(&self) -> &[ContentRecord] {
        &self.records
    }

    /// Record with exactly this key, if any
    pub fn get_by_key(&self, key: &str) -> Option<&ContentRecord> {
        self.records.iter().find(|r| r.key == key)
    }

    /// Keys of all records in stored order
    pub fn get_all_keys(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.key.as_str()).collect()
    }

    /// Featured records in stored order
    pub fn featured(&self) -> Vec<&ContentRecord> {
        self.records.iter().filter(|r| r.featured).collect()
    }

    /// Records of one category in stored order
    pub fn by_category(&self, category: Category) -> Vec<&ContentRecord> {
        self.records
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    /// Most recent effective modification time across all records
    pub fn latest_modified(&self) -> Option<DateTime<Utc>> {
        self.records.iter().map(|r| r.effective_modified_at()).max()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Keys become URL path segments: lowercase ASCII, digits and '-'
fn validate_key(key: &str) -> Result<(), RegistryError> {
    let invalid = |reason| {
        Err(RegistryError::InvalidKey {
            key: key.to_string(),
            reason,
        })
    };

    if key.is_empty() {
        return invalid("key is empty");
    }
    if key.starts_with('-') || key.ends_with('-') {
        return invalid("key must not start or end with '-'");
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return invalid("only lowercase letters, digits and '-' are allowed");
    }

    Ok(())
}
