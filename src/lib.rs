//! tidelog-site - content registry for the Tidelog website
//!
//! The blog's post metadata lives in a single manifest. Every page that
//! talks about posts is derived from it, so the listing, the RSS feed, the
//! sitemap and the detail pages can never disagree.
//!
//! # Modules
//!
//! - `domain`: Data structures (ContentRecord, Category)
//! - `registry`: Immutable registry and manifest loading
//! - `render`: Listing, feed, sitemap and detail views
//! - `build`: Static site output
//! - `config`: Site settings and paths
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # List featured posts
//! tidelog-site list --featured
//!
//! # Print the RSS feed
//! tidelog-site feed > feed.xml
//!
//! # Write every view to ./dist
//! tidelog-site build --out dist
//! ```

pub mod build;
pub mod cli;
pub mod config;
pub mod domain;
pub mod registry;
pub mod render;

// Re-export main types at crate root for convenience
pub use build::{BuildStats, SiteBuilder};
pub use config::SiteSettings;
pub use domain::{Category, ContentRecord};
pub use registry::{ContentRegistry, Manifest, RegistryError};
pub use render::{DetailPage, ListingOptions, SitemapEntry};
