//! XML sitemap generation and static path enumeration.
//!
//! Post URLs come from `get_all_keys`, so the sitemap, the static build and
//! the detail routes always cover the same set of posts.

use anyhow::Result;
use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use super::{finish_xml, write_text_element, xml_writer};
use crate::config::SiteSettings;
use crate::registry::ContentRegistry;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// A single `<url>` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    /// Absolute URL
    pub loc: String,
    /// Last modification date, if known
    pub lastmod: Option<NaiveDate>,
}

/// Site paths of every post detail page, in registry order
pub fn static_paths(site: &SiteSettings, registry: &ContentRegistry) -> Vec<String> {
    registry
        .get_all_keys()
        .into_iter()
        .map(|key| site.post_path(key))
        .collect()
}

/// Static pages first, then one entry per post
pub fn sitemap_entries(site: &SiteSettings, registry: &ContentRegistry) -> Vec<SitemapEntry> {
    let mut entries: Vec<SitemapEntry> = site
        .static_pages
        .iter()
        .map(|path| SitemapEntry {
            loc: site.absolute_url(path),
            lastmod: None,
        })
        .collect();

    // get_all_keys preserves registry order, so keys line up with records
    for (key, record) in registry.get_all_keys().into_iter().zip(registry.get_all()) {
        entries.push(SitemapEntry {
            loc: site.post_url(key),
            lastmod: Some(record.effective_modified_at().date_naive()),
        });
    }

    entries
}

/// Render the sitemap document
pub fn render_sitemap(site: &SiteSettings, registry: &ContentRegistry) -> Result<String> {
    let mut writer = xml_writer();

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]),
    ))?;

    for entry in sitemap_entries(site, registry) {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", &entry.loc)?;
        if let Some(lastmod) = entry.lastmod {
            write_text_element(&mut writer, "lastmod", &lastmod.format("%Y-%m-%d").to_string())?;
        }
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    finish_xml(writer)
}
