//! Static site build.
//!
//! Writes every view derived from the registry into an output directory:
//!
//! ```text
//! <out>/
//! ├── blog/index.html          # listing
//! ├── blog/<key>/index.html    # one per key
//! ├── 404.html                 # not-found detail page
//! ├── feed.xml                 # RSS
//! └── sitemap.xml
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::config::SiteSettings;
use crate::registry::ContentRegistry;
use crate::render::{self, DetailPage, ListingOptions};

/// Summary of a completed build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// HTML pages written (listing, posts, 404)
    pub pages: usize,
    /// Items in the RSS feed
    pub feed_items: usize,
    /// URLs in the sitemap
    pub sitemap_urls: usize,
    /// Where the files went
    pub output_dir: PathBuf,
}

/// Renders all views of one registry into a directory
pub struct SiteBuilder<'a> {
    site: &'a SiteSettings,
    registry: &'a ContentRegistry,
    output_dir: PathBuf,
}

impl<'a> SiteBuilder<'a> {
    /// Create a builder
    pub fn new(
        site: &'a SiteSettings,
        registry: &'a ContentRegistry,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            site,
            registry,
            output_dir: output_dir.into(),
        }
    }

    /// Render and write every view
    #[instrument(skip(self), fields(output = %self.output_dir.display()))]
    pub async fn build(&self) -> Result<BuildStats> {
        info!(posts = self.registry.len(), "Building site");

        let mut stats = BuildStats {
            output_dir: self.output_dir.clone(),
            ..Default::default()
        };

        let listing = render::render_listing(self.site, self.registry, &ListingOptions::default());
        self.write_page(&self.site.blog_path, &listing).await?;
        stats.pages += 1;

        let removed = self.prune_stale_posts().await?;
        if removed > 0 {
            info!(removed, "Removed pages for posts no longer in the manifest");
        }

        for key in self.registry.get_all_keys() {
            let html = render::resolve(self.registry, key).render(self.site)?;
            self.write_page(&self.site.post_path(key), &html).await?;
            stats.pages += 1;
        }

        let not_found = DetailPage::NotFound { key: String::new() }.render(self.site)?;
        self.write_file("404.html", &not_found).await?;
        stats.pages += 1;

        let feed = render::render_feed(self.site, self.registry)?;
        self.write_file(&self.site.feed_path, &feed).await?;
        stats.feed_items = self.registry.len();

        let sitemap = render::render_sitemap(self.site, self.registry)?;
        self.write_file("sitemap.xml", &sitemap).await?;
        stats.sitemap_urls = render::sitemap_entries(self.site, self.registry).len();

        info!(
            pages = stats.pages,
            feed_items = stats.feed_items,
            sitemap_urls = stats.sitemap_urls,
            "Site build complete"
        );

        Ok(stats)
    }

    /// Delete `<blog>/<dir>/` page directories whose name is not a current key.
    ///
    /// Only directories holding an `index.html` are touched, and nothing is
    /// pruned when the blog lives at the site root.
    async fn prune_stale_posts(&self) -> Result<usize> {
        let blog_dir = self.site.blog_path.trim_matches('/');
        if blog_dir.is_empty() {
            return Ok(0);
        }

        let blog_dir = self.output_dir.join(blog_dir);
        if !blog_dir.is_dir() {
            return Ok(0);
        }

        let keys: HashSet<&str> = self.registry.get_all_keys().into_iter().collect();
        let mut entries = fs::read_dir(&blog_dir)
            .await
            .with_context(|| format!("Failed to read directory: {}", blog_dir.display()))?;

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let name = entry.file_name();
            let is_current = name.to_str().is_some_and(|n| keys.contains(n));

            if is_current || !path.is_dir() || !path.join("index.html").exists() {
                continue;
            }

            fs::remove_dir_all(&path)
                .await
                .with_context(|| format!("Failed to remove: {}", path.display()))?;
            debug!(path = %path.display(), "Removed stale post page");
            removed += 1;
        }

        Ok(removed)
    }

    /// Write `<site path>/index.html`
    async fn write_page(&self, site_path: &str, html: &str) -> Result<()> {
        let relative = Path::new(site_path.trim_matches('/')).join("index.html");
        self.write_file(&relative.to_string_lossy(), html).await
    }

    async fn write_file(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.output_dir.join(relative.trim_start_matches('/'));

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write: {}", path.display()))?;

        debug!(path = %path.display(), bytes = content.len(), "Wrote file");
        Ok(())
    }
}
