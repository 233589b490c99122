//! Post detail pages.
//!
//! A key that is not in the registry is an ordinary outcome: the page
//! resolves to [`DetailPage::NotFound`] and renders a 404 document.

use anyhow::Result;
use serde_json::json;

use super::{html_attr, html_text};
use crate::config::SiteSettings;
use crate::domain::ContentRecord;
use crate::registry::ContentRegistry;

/// Outcome of resolving a detail route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPage<'a> {
    /// The key matched a record
    Found(&'a ContentRecord),

    /// No record has this key
    NotFound { key: String },
}

/// Resolve a detail route parameter against the registry
pub fn resolve<'a>(registry: &'a ContentRegistry, key: &str) -> DetailPage<'a> {
    match registry.get_by_key(key) {
        Some(record) => DetailPage::Found(record),
        None => DetailPage::NotFound {
            key: key.to_string(),
        },
    }
}

impl DetailPage<'_> {
    /// HTTP status code for this outcome
    pub fn status(&self) -> u16 {
        match self {
            DetailPage::Found(_) => 200,
            DetailPage::NotFound { .. } => 404,
        }
    }

    /// Check if a record was found
    pub fn is_found(&self) -> bool {
        matches!(self, DetailPage::Found(_))
    }

    /// Render the page HTML
    pub fn render(&self, site: &SiteSettings) -> Result<String> {
        match self {
            DetailPage::Found(record) => render_post(site, record),
            DetailPage::NotFound { key } => Ok(render_not_found(site, key)),
        }
    }
}

fn render_post(site: &SiteSettings, record: &ContentRecord) -> Result<String> {
    let url = site.post_url(&record.key);

    let mut structured = json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": record.title,
        "description": record.description,
        "datePublished": record.published_at.to_rfc3339(),
        "dateModified": record.effective_modified_at().to_rfc3339(),
        "articleSection": record.category.to_string(),
        "url": url,
    });
    if let Some(author) = &record.author {
        structured["author"] = json!({ "@type": "Person", "name": author });
    }
    if let Some(image) = &record.image {
        structured["image"] = json!(site.absolute_url(image));
    }
    // Keep "</script>" inside string values from closing the block
    let structured = serde_json::to_string(&structured)?.replace("</", "<\\/");

    let mut header = format!(
        "<span class=\"badge category-{}\">{}</span>\n<h1>{}</h1>\n<p class=\"lede\">{}</p>\n",
        record.category.slug(),
        html_text(&record.category.to_string()),
        html_text(&record.title),
        html_text(&record.description),
    );

    let mut meta = Vec::new();
    if let Some(author) = &record.author {
        meta.push(html_text(author));
    }
    meta.push(format!(
        "<time datetime=\"{}\">{}</time>",
        record.published_at.to_rfc3339(),
        record.published_at.format("%B %-d, %Y")
    ));
    if record.modified_at.is_some() {
        meta.push(format!(
            "updated <time datetime=\"{}\">{}</time>",
            record.effective_modified_at().to_rfc3339(),
            record.effective_modified_at().format("%B %-d, %Y")
        ));
    }
    meta.push(html_text(&record.read_time));
    header.push_str(&format!("<p class=\"meta\">{}</p>\n", meta.join(" · ")));

    if let Some(image) = &record.image {
        header.push_str(&format!("<img src=\"{}\" alt=\"\">\n", html_attr(image)));
    }

    Ok(format!(
        "<!DOCTYPE html>\n\
         <html lang=\"{lang}\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title} | {site_title}</title>\n\
         <meta name=\"description\" content=\"{description}\">\n\
         <link rel=\"canonical\" href=\"{url}\">\n\
         <script type=\"application/ld+json\">{structured}</script>\n\
         </head>\n\
         <body>\n\
         <article data-key=\"{key}\">\n\
         {header}\
         </article>\n\
         </body>\n\
         </html>\n",
        lang = html_attr(&site.language),
        title = html_text(&record.title),
        site_title = html_text(&site.title),
        description = html_attr(&record.description),
        url = html_attr(&url),
        structured = structured,
        key = html_attr(&record.key),
        header = header,
    ))
}

fn render_not_found(site: &SiteSettings, key: &str) -> String {
    // Empty key: the generic 404.html written by the static build
    let missing = if key.is_empty() {
        String::new()
    } else {
        format!(
            "<p>There is no post named <code>{}</code>.</p>\n",
            html_text(key)
        )
    };

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"{lang}\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"robots\" content=\"noindex\">\n\
         <title>Post not found | {site_title}</title>\n\
         </head>\n\
         <body>\n\
         <main class=\"not-found\">\n\
         <h1>Post not found</h1>\n\
         {missing}\
         <p><a href=\"{blog}\">Back to all posts</a></p>\n\
         </main>\n\
         </body>\n\
         </html>\n",
        lang = html_attr(&site.language),
        site_title = html_text(&site.title),
        missing = missing,
        blog = html_attr(&site.blog_path),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::{TimeZone, Utc};

    fn registry() -> ContentRegistry {
        ContentRegistry::new(vec![ContentRecord::new(
            "escape-test",
            "Closing </script> tags",
            "Angle <b>brackets</b>",
            Utc.with_ymd_and_hms(2025, 8, 12, 8, 30, 0).unwrap(),
            Category::Comparison,
            "11 min read",
        )
        .with_author("Jonas Lindqvist")
        .with_image("/images/blog/comparison.png")])
        .unwrap()
    }

    #[test]
    fn test_resolve_found() {
        let registry = registry();
        let page = resolve(&registry, "escape-test");

        assert!(page.is_found());
        assert_eq!(page.status(), 200);

        let html = page.render(&SiteSettings::default()).unwrap();
        assert!(html.contains("data-key=\"escape-test\""));
        assert!(html.contains("Jonas Lindqvist"));
        assert!(html.contains("\"@type\":\"BlogPosting\""));
        assert!(html.contains("https://tidelog.dev/images/blog/comparison.png"));
        // No "updated" line when modified_at is absent
        assert!(!html.contains("updated <time"));
    }

    #[test]
    fn test_render_escapes_untrusted_text() {
        let registry = registry();
        let html = resolve(&registry, "escape-test")
            .render(&SiteSettings::default())
            .unwrap();

        assert_eq!(html.matches("</script>").count(), 1);
        assert!(html.contains("Angle &lt;b&gt;brackets&lt;/b&gt;"));
    }

    #[test]
    fn test_resolve_missing_key_is_not_found() {
        let registry = registry();
        let page = resolve(&registry, "no-such-post");

        assert_eq!(
            page,
            DetailPage::NotFound {
                key: "no-such-post".to_string()
            }
        );
        assert_eq!(page.status(), 404);

        let html = page.render(&SiteSettings::default()).unwrap();
        assert!(html.contains("Post not found"));
        assert!(html.contains("<code>no-such-post</code>"));
    }

    #[test]
    fn test_generic_not_found_page_omits_key() {
        let page = DetailPage::NotFound { key: String::new() };
        let html = page.render(&SiteSettings::default()).unwrap();

        assert!(html.contains("Post not found"));
        assert!(!html.contains("<code>"));
    }
}
