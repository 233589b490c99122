//! Command-line interface for tidelog-site.
//!
//! Provides commands for browsing the content registry and for rendering
//! the listing, feed, sitemap and detail views, individually or as a full
//! static build.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::build::SiteBuilder;
use crate::config;
use crate::domain::{Category, ContentRecord};
use crate::registry::ContentRegistry;
use crate::render::{self, DetailPage, ListingOptions};

/// tidelog-site - content registry and static views for the Tidelog website
#[derive(Parser, Debug)]
#[command(name = "tidelog-site")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Manifest file (defaults to config, then the bundled manifest)
    #[arg(short, long, global = true)]
    pub manifest: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List posts
    List {
        /// Filter by category
        #[arg(short, long, value_enum)]
        category: Option<CategoryArg>,

        /// Only featured posts
        #[arg(short, long)]
        featured: bool,

        /// Maximum number of posts to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one post's metadata
    Show {
        /// Post key (slug)
        key: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Print every post key, one per line
    Keys {
        /// Print detail page paths instead of bare keys
        #[arg(long)]
        paths: bool,
    },

    /// Render a post detail page (404 page for unknown keys)
    Page {
        /// Post key (slug)
        key: String,
    },

    /// Render the blog listing page
    Listing {
        /// Filter by category
        #[arg(short, long, value_enum)]
        category: Option<CategoryArg>,

        /// Only featured posts
        #[arg(short, long)]
        featured: bool,
    },

    /// Render the RSS feed
    Feed,

    /// Render the sitemap
    Sitemap,

    /// Write every view to the output directory
    Build {
        /// Output directory (defaults to config)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Category for CLI (maps to Category)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Release,
    Comparison,
    Tutorial,
    Engineering,
    Announcement,
}

impl From<CategoryArg> for Category {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::Release => Category::Release,
            CategoryArg::Comparison => Category::Comparison,
            CategoryArg::Tutorial => Category::Tutorial,
            CategoryArg::Engineering => Category::Engineering,
            CategoryArg::Announcement => Category::Announcement,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        if let Commands::Config = self.command {
            return show_config();
        }

        // Built once, then shared by reference with every view
        let registry = load_registry(self.manifest)?;
        let site = &config::config()?.site;

        match self.command {
            Commands::List {
                category,
                featured,
                limit,
                json,
            } => {
                let options = ListingOptions {
                    category: category.map(Into::into),
                    featured_only: featured,
                    limit,
                };
                list_posts(&registry, &options, json)
            }
            Commands::Show { key, json } => show_post(&registry, &key, json),
            Commands::Keys { paths } => {
                if paths {
                    for path in render::static_paths(site, &registry) {
                        println!("{}", path);
                    }
                } else {
                    for key in registry.get_all_keys() {
                        println!("{}", key);
                    }
                }
                Ok(())
            }
            Commands::Page { key } => render_page(site, &registry, &key),
            Commands::Listing { category, featured } => {
                let options = ListingOptions {
                    category: category.map(Into::into),
                    featured_only: featured,
                    limit: None,
                };
                print!("{}", render::render_listing(site, &registry, &options));
                Ok(())
            }
            Commands::Feed => {
                print!("{}", render::render_feed(site, &registry)?);
                Ok(())
            }
            Commands::Sitemap => {
                print!("{}", render::render_sitemap(site, &registry)?);
                Ok(())
            }
            Commands::Build { out } => build_site(site, &registry, out).await,
            Commands::Config => show_config(),
        }
    }
}

/// Build the registry from (in order) the CLI flag, the config file, or the bundled manifest
fn load_registry(manifest: Option<PathBuf>) -> Result<ContentRegistry> {
    let manifest = match manifest {
        Some(path) => Some(path),
        None => config::config()?.manifest.clone(),
    };

    match manifest {
        Some(path) => ContentRegistry::load(&path)
            .with_context(|| format!("Failed to load manifest: {}", path.display())),
        None => ContentRegistry::builtin().context("Bundled manifest is invalid"),
    }
}

/// List posts as a table or JSON
fn list_posts(registry: &ContentRegistry, options: &ListingOptions, json: bool) -> Result<()> {
    let records = render::select(registry, options);

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No posts found");
        return Ok(());
    }

    println!("{:<28} {:<13} {:<11} {:<50}", "KEY", "CATEGORY", "PUBLISHED", "TITLE");
    println!("{}", "-".repeat(104));

    for record in &records {
        let marker = if record.featured { "*" } else { "" };
        println!(
            "{:<28} {:<13} {:<11} {}{}",
            record.key,
            record.category.to_string(),
            record.published_at.format("%Y-%m-%d").to_string(),
            truncate(&record.title, 47),
            marker
        );
    }

    println!("\nTotal: {} of {} posts (* = featured)", records.len(), registry.len());

    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Show one post's metadata
fn show_post(registry: &ContentRegistry, key: &str, json: bool) -> Result<()> {
    let record = registry
        .get_by_key(key)
        .ok_or_else(|| anyhow::anyhow!("Post not found: {}", key))?;

    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        print_record(record);
    }

    Ok(())
}

fn print_record(record: &ContentRecord) {
    println!("  Key:         {}", record.key);
    println!("  Title:       {}", record.title);
    println!("  Description: {}", record.description);
    println!("  Category:    {}", record.category);
    println!("  Published:   {}", record.published_at.to_rfc3339());
    println!(
        "  Modified:    {}{}",
        record.effective_modified_at().to_rfc3339(),
        if record.modified_at.is_none() { " (= published)" } else { "" }
    );
    if let Some(author) = &record.author {
        println!("  Author:      {}", author);
    }
    if let Some(image) = &record.image {
        println!("  Image:       {}", image);
    }
    println!("  Read time:   {}", record.read_time);
    println!("  Featured:    {}", record.featured);
}

/// Render a detail page; a miss still prints the 404 page
fn render_page(site: &config::SiteSettings, registry: &ContentRegistry, key: &str) -> Result<()> {
    let page = render::resolve(registry, key);
    print!("{}", page.render(site)?);

    if let DetailPage::NotFound { key } = page {
        anyhow::bail!("Post not found: {} (rendered 404 page)", key);
    }

    Ok(())
}

/// Run a full static build
async fn build_site(
    site: &config::SiteSettings,
    registry: &ContentRegistry,
    out: Option<PathBuf>,
) -> Result<()> {
    let output_dir = match out {
        Some(dir) => dir,
        None => config::config()?.output_dir.clone(),
    };

    let stats = SiteBuilder::new(site, registry, output_dir).build().await?;

    eprintln!("Built site in {}", stats.output_dir.display());
    eprintln!("  Pages:        {}", stats.pages);
    eprintln!("  Feed items:   {}", stats.feed_items);
    eprintln!("  Sitemap URLs: {}", stats.sitemap_urls);

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Site:");
    println!("  Base URL:     {}", cfg.site.base_url);
    println!("  Title:        {}", cfg.site.title);
    println!("  Language:     {}", cfg.site.language);
    println!("  Blog path:    {}", cfg.site.blog_path);
    println!("  Feed path:    {}", cfg.site.feed_path);
    println!("  Static pages: {}", cfg.site.static_pages.join(", "));
    println!();
    println!("Paths:");
    println!(
        "  Manifest:     {}",
        cfg.manifest
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(bundled)".to_string())
    );
    println!("  Output:       {}", cfg.output_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::try_parse_from([
            "tidelog-site",
            "list",
            "--category",
            "release",
            "--featured",
            "--limit",
            "3",
        ])
        .unwrap();

        match cli.command {
            Commands::List {
                category,
                featured,
                limit,
                json,
            } => {
                assert!(matches!(category, Some(CategoryArg::Release)));
                assert!(featured);
                assert_eq!(limit, Some(3));
                assert!(!json);
            }
            other => panic!("Expected List, got {:?}", other),
        }
    }

    #[test]
    fn test_global_manifest_flag() {
        let cli =
            Cli::try_parse_from(["tidelog-site", "show", "a", "--manifest", "posts.yaml"]).unwrap();
        assert_eq!(cli.manifest, Some(PathBuf::from("posts.yaml")));
        assert!(matches!(cli.command, Commands::Show { ref key, .. } if key == "a"));
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(Cli::try_parse_from(["tidelog-site", "list", "--category", "podcast"]).is_err());
    }

    #[test]
    fn test_category_arg_maps_to_category() {
        assert_eq!(Category::from(CategoryArg::Comparison), Category::Comparison);
        assert_eq!(Category::from(CategoryArg::Announcement), Category::Announcement);
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ééééé", 2), "éé...");
    }

    #[test]
    fn test_show_missing_post_reports_not_found() {
        let registry = ContentRegistry::builtin().unwrap();
        let err = show_post(&registry, "no-such-post", false).unwrap_err();
        assert!(err.to_string().contains("Post not found: no-such-post"));
    }

    #[test]
    fn test_page_for_missing_post_is_error() {
        let registry = ContentRegistry::builtin().unwrap();
        let site = config::SiteSettings::default();

        let err = render_page(&site, &registry, "no-such-post").unwrap_err();
        assert!(err.to_string().contains("Post not found: no-such-post"));

        assert!(render_page(&site, &registry, "tidelog-2-0").is_ok());
    }
}
