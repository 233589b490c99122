//! Configuration for the site generator.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (TIDELOG_SITE_BASE_URL, TIDELOG_SITE_MANIFEST, TIDELOG_SITE_OUT)
//! 2. Config file (.tidelog/site.yaml)
//! 3. Defaults (bundled manifest, ./dist, https://tidelog.dev)
//!
//! Config file discovery:
//! - Searches current directory and parents for .tidelog/site.yaml
//! - Paths in config file are relative to the project root (parent of .tidelog/)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

const ENV_BASE_URL: &str = "TIDELOG_SITE_BASE_URL";
const ENV_MANIFEST: &str = "TIDELOG_SITE_MANIFEST";
const ENV_OUT: &str = "TIDELOG_SITE_OUT";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    pub base_url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub blog_path: Option<String>,
    pub feed_path: Option<String>,
    pub static_pages: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Manifest file (relative to project root); bundled manifest if unset
    pub manifest: Option<String>,
    /// Build output directory (relative to project root)
    pub output: Option<String>,
}

/// Site-wide settings used by every renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    /// Absolute origin, no trailing slash
    pub base_url: String,
    pub title: String,
    pub description: String,
    pub language: String,
    /// Path of the blog listing, e.g. "/blog"
    pub blog_path: String,
    /// Path of the RSS feed, e.g. "/feed.xml"
    pub feed_path: String,
    /// Non-post pages listed in the sitemap
    pub static_pages: Vec<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            base_url: "https://tidelog.dev".to_string(),
            title: "Tidelog Blog".to_string(),
            description: "Releases, guides and engineering notes from the Tidelog logging library"
                .to_string(),
            language: "en-us".to_string(),
            blog_path: "/blog".to_string(),
            feed_path: "/feed.xml".to_string(),
            static_pages: vec!["/".to_string(), "/blog".to_string()],
        }
    }
}

impl SiteSettings {
    /// Join a site path onto the base URL
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, normalize_path(path))
    }

    /// Site path of a post's detail page
    pub fn post_path(&self, key: &str) -> String {
        format!("{}/{}", self.blog_path.trim_end_matches('/'), key)
    }

    /// Absolute URL of a post's detail page
    pub fn post_url(&self, key: &str) -> String {
        self.absolute_url(&self.post_path(key))
    }
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Site settings for renderers
    pub site: SiteSettings,
    /// Manifest file override (None = bundled manifest)
    pub manifest: Option<PathBuf>,
    /// Build output directory
    pub output_dir: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Ensure a leading slash and no trailing slash (except for the root)
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Find config file by searching a directory and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".tidelog").join("site.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

fn resolve_site(config: SiteConfig) -> SiteSettings {
    let defaults = SiteSettings::default();

    SiteSettings {
        base_url: config
            .base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url),
        title: config.title.unwrap_or(defaults.title),
        description: config.description.unwrap_or(defaults.description),
        language: config.language.unwrap_or(defaults.language),
        blog_path: config
            .blog_path
            .map(|p| normalize_path(&p))
            .unwrap_or(defaults.blog_path),
        feed_path: config
            .feed_path
            .map(|p| normalize_path(&p))
            .unwrap_or(defaults.feed_path),
        static_pages: config
            .static_pages
            .map(|pages| pages.iter().map(|p| normalize_path(p)).collect())
            .unwrap_or(defaults.static_pages),
    }
}

/// Load configuration, searching for a config file from `start`
fn load_config_from(start: &Path) -> Result<ResolvedConfig> {
    let config_file = find_config_file(start);

    let (mut site, manifest, output_dir) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Project root is the parent of .tidelog/ (grandparent of site.yaml)
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        let manifest = config
            .paths
            .manifest
            .as_deref()
            .map(|m| resolve_path(base_dir, m));
        let output_dir = config
            .paths
            .output
            .as_deref()
            .map(|o| resolve_path(base_dir, o))
            .unwrap_or_else(|| base_dir.join("dist"));

        (resolve_site(config.site), manifest, output_dir)
    } else {
        (SiteSettings::default(), None, start.join("dist"))
    };

    // Environment overrides
    if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
        site.base_url = base_url.trim_end_matches('/').to_string();
    }
    let manifest = std::env::var(ENV_MANIFEST)
        .map(PathBuf::from)
        .ok()
        .or(manifest);
    let output_dir = std::env::var(ENV_OUT)
        .map(PathBuf::from)
        .unwrap_or(output_dir);

    Ok(ResolvedConfig {
        site,
        manifest,
        output_dir,
        config_file,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    load_config_from(&cwd)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(root: &Path, body: &str) -> PathBuf {
        let dir = root.join(".tidelog");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("site.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", body).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let config = load_config_from(temp.path()).unwrap();

        assert!(config.config_file.is_none());
        assert!(config.manifest.is_none());
        assert_eq!(config.site.blog_path, "/blog");
        assert_eq!(config.site.feed_path, "/feed.xml");
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            temp.path(),
            r#"
version: "1"
site:
  base_url: https://example.org/
  title: Example
  blog_path: posts/
paths:
  manifest: content/posts.yaml
  output: public
"#,
        );

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.version, "1");
        assert_eq!(config.site.title.as_deref(), Some("Example"));
        assert_eq!(config.paths.output.as_deref(), Some("public"));

        let site = resolve_site(config.site);
        assert_eq!(site.base_url, "https://example.org");
        assert_eq!(site.blog_path, "/posts");
        // Unset values keep their defaults
        assert_eq!(site.language, "en-us");
    }

    #[test]
    fn test_config_discovered_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            r#"
version: "1"
paths:
  output: public
"#,
        );
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = load_config_from(&nested).unwrap();
        assert!(config.config_file.is_some());
        assert!(config.output_dir.ends_with("public"));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("blog"), "/blog");
        assert_eq!(normalize_path("/blog/"), "/blog");
        assert_eq!(normalize_path("docs/api/"), "/docs/api");
    }

    #[test]
    fn test_post_urls() {
        let site = SiteSettings::default();
        assert_eq!(site.post_path("tidelog-2-0"), "/blog/tidelog-2-0");
        assert_eq!(
            site.post_url("tidelog-2-0"),
            "https://tidelog.dev/blog/tidelog-2-0"
        );
        assert_eq!(site.absolute_url("/"), "https://tidelog.dev/");
        assert_eq!(site.absolute_url("feed.xml"), "https://tidelog.dev/feed.xml");
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/site");

        assert_eq!(
            resolve_path(&base, "./content"),
            PathBuf::from("/home/user/site/content")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
