//! Blog index page.

use crate::config::SiteSettings;
use crate::domain::{Category, ContentRecord};
use crate::registry::ContentRegistry;

use super::{html_attr, html_text};

/// Which records the listing shows
#[derive(Debug, Clone, Default)]
pub struct ListingOptions {
    /// Only this category
    pub category: Option<Category>,
    /// Only featured records
    pub featured_only: bool,
    /// Maximum number of records
    pub limit: Option<usize>,
}

impl ListingOptions {
    fn is_filtered(&self) -> bool {
        self.category.is_some() || self.featured_only
    }
}

/// Records matching the options, in registry order
pub fn select<'a>(
    registry: &'a ContentRegistry,
    options: &ListingOptions,
) -> Vec<&'a ContentRecord> {
    let candidates = match (options.category, options.featured_only) {
        (Some(category), _) => registry.by_category(category),
        (None, true) => registry.featured(),
        (None, false) => registry.get_all().iter().collect(),
    };

    candidates
        .into_iter()
        .filter(|r| !options.featured_only || r.featured)
        .take(options.limit.unwrap_or(usize::MAX))
        .collect()
}

/// Render the listing page.
///
/// Unfiltered listings get a "Featured" section above the full list; a
/// filtered listing is a single list of the matching records.
pub fn render_listing(
    site: &SiteSettings,
    registry: &ContentRegistry,
    options: &ListingOptions,
) -> String {
    let mut body = String::new();

    if !options.is_filtered() {
        let featured = registry.featured();
        if !featured.is_empty() {
            body.push_str("<section class=\"featured\">\n<h2>Featured</h2>\n");
            for record in featured {
                body.push_str(&render_card(site, record));
            }
            body.push_str("</section>\n");
        }
    }

    let heading = match options.category {
        Some(category) => category.to_string(),
        None if options.featured_only => "Featured".to_string(),
        None => "All posts".to_string(),
    };
    let records = select(registry, options);

    body.push_str(&format!(
        "<section class=\"posts\">\n<h2>{}</h2>\n",
        html_text(&heading)
    ));
    if records.is_empty() {
        body.push_str("<p class=\"empty\">No posts yet.</p>\n");
    }
    for record in records {
        body.push_str(&render_card(site, record));
    }
    body.push_str("</section>\n");

    page(site, &body)
}

fn render_card(site: &SiteSettings, record: &ContentRecord) -> String {
    let mut card = format!(
        "<article class=\"post-card category-{}\">\n",
        record.category.slug()
    );

    if let Some(image) = &record.image {
        card.push_str(&format!(
            "<img src=\"{}\" alt=\"\" loading=\"lazy\">\n",
            html_attr(image)
        ));
    }
    card.push_str(&format!(
        "<span class=\"badge\">{}</span>\n",
        html_text(&record.category.to_string())
    ));
    card.push_str(&format!(
        "<h3><a href=\"{}\">{}</a></h3>\n",
        html_attr(&site.post_path(&record.key)),
        html_text(&record.title)
    ));
    card.push_str(&format!("<p>{}</p>\n", html_text(&record.description)));
    card.push_str(&format!(
        "<footer><time datetime=\"{}\">{}</time> · {}</footer>\n",
        record.published_at.to_rfc3339(),
        record.published_at.format("%B %-d, %Y"),
        html_text(&record.read_time)
    ));
    card.push_str("</article>\n");

    card
}

fn page(site: &SiteSettings, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"{lang}\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <meta name=\"description\" content=\"{description}\">\n\
         <link rel=\"canonical\" href=\"{canonical}\">\n\
         <link rel=\"alternate\" type=\"application/rss+xml\" title=\"{title_attr}\" href=\"{feed}\">\n\
         </head>\n\
         <body>\n\
         <main>\n\
         <h1>{title}</h1>\n\
         {body}\
         </main>\n\
         </body>\n\
         </html>\n",
        lang = html_attr(&site.language),
        title = html_text(&site.title),
        title_attr = html_attr(&site.title),
        description = html_attr(&site.description),
        canonical = html_attr(&site.absolute_url(&site.blog_path)),
        feed = html_attr(&site.feed_path),
        body = body,
    )
}
