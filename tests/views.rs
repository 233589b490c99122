//! Derived View Integration Tests
//!
//! The listing, feed, sitemap and detail views must agree on the set of
//! posts because they all read the same registry.

use tidelog_site::render::{self, DetailPage, ListingOptions};
use tidelog_site::{ContentRegistry, SiteSettings};

fn setup() -> (SiteSettings, ContentRegistry) {
    (SiteSettings::default(), ContentRegistry::builtin().unwrap())
}

#[test]
fn test_feed_has_one_item_per_record_in_order() {
    let (site, registry) = setup();
    let xml = render::render_feed(&site, &registry).unwrap();

    assert_eq!(xml.matches("<item>").count(), registry.len());

    let mut last = 0;
    for key in registry.get_all_keys() {
        let link = format!("<link>{}</link>", site.post_url(key));
        let pos = xml.find(&link).unwrap_or_else(|| panic!("missing item for {}", key));
        assert!(pos > last, "item {} out of order", key);
        last = pos;
    }
}

#[test]
fn test_sitemap_lists_every_key() {
    let (site, registry) = setup();
    let xml = render::render_sitemap(&site, &registry).unwrap();

    assert_eq!(
        xml.matches("<url>").count(),
        site.static_pages.len() + registry.len()
    );
    for path in render::static_paths(&site, &registry) {
        assert!(xml.contains(&format!("<loc>{}</loc>", site.absolute_url(&path))));
    }
}

#[test]
fn test_every_static_path_resolves_to_a_page() {
    let (site, registry) = setup();

    for key in registry.get_all_keys() {
        let page = render::resolve(&registry, key);
        assert!(page.is_found());
        assert!(page.render(&site).unwrap().contains(&format!("data-key=\"{}\"", key)));
    }
}

#[test]
fn test_unknown_key_renders_not_found() {
    let (site, registry) = setup();
    let page = render::resolve(&registry, "removed-post");

    assert!(matches!(page, DetailPage::NotFound { .. }));
    assert_eq!(page.status(), 404);
    assert!(page.render(&site).unwrap().contains("Post not found"));
}

#[test]
fn test_listing_links_every_record() {
    let (site, registry) = setup();
    let html = render::render_listing(&site, &registry, &ListingOptions::default());

    for key in registry.get_all_keys() {
        assert!(html.contains(&format!("href=\"{}\"", site.post_path(key))));
    }
}

#[test]
fn test_custom_site_settings_flow_into_urls() {
    let registry = ContentRegistry::builtin().unwrap();
    let site = SiteSettings {
        base_url: "https://staging.tidelog.dev".to_string(),
        blog_path: "/news".to_string(),
        ..SiteSettings::default()
    };

    let feed = render::render_feed(&site, &registry).unwrap();
    assert!(feed.contains("https://staging.tidelog.dev/news/tidelog-2-0"));
    assert!(!feed.contains("https://tidelog.dev/"));

    let paths = render::static_paths(&site, &registry);
    assert!(paths.iter().all(|p| p.starts_with("/news/")));
}
