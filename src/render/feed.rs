//! RSS 2.0 feed generation.
//!
//! One `<item>` per record, in registry order. Publication time goes to
//! `pubDate` (RFC 2822) and the effective modification time to
//! `atom:updated` (RFC 3339), so feed readers see edits without the item
//! jumping to the top.

use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::instrument;

use super::{finish_xml, write_text_element, xml_writer, XmlWriter};
use crate::config::SiteSettings;
use crate::domain::ContentRecord;
use crate::registry::ContentRegistry;

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

/// Render the full RSS document
#[instrument(skip_all, fields(items = registry.len()))]
pub fn render_feed(site: &SiteSettings, registry: &ContentRegistry) -> Result<String> {
    let mut writer = xml_writer();

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("rss").with_attributes([
        ("version", "2.0"),
        ("xmlns:atom", ATOM_NS),
        ("xmlns:dc", DC_NS),
    ])))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    write_text_element(&mut writer, "title", &site.title)?;
    write_text_element(&mut writer, "link", &site.absolute_url(&site.blog_path))?;
    write_text_element(&mut writer, "description", &site.description)?;
    write_text_element(&mut writer, "language", &site.language)?;

    let feed_url = site.absolute_url(&site.feed_path);
    writer.write_event(Event::Empty(BytesStart::new("atom:link").with_attributes([
        ("href", feed_url.as_str()),
        ("rel", "self"),
        ("type", "application/rss+xml"),
    ])))?;

    if let Some(latest) = registry.latest_modified() {
        write_text_element(&mut writer, "lastBuildDate", &latest.to_rfc2822())?;
    }

    for record in registry.get_all() {
        write_item(&mut writer, site, record)?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    finish_xml(writer)
}

fn write_item(writer: &mut XmlWriter, site: &SiteSettings, record: &ContentRecord) -> Result<()> {
    let url = site.post_url(&record.key);

    writer.write_event(Event::Start(BytesStart::new("item")))?;
    write_text_element(writer, "title", &record.title)?;
    write_text_element(writer, "link", &url)?;

    writer.write_event(Event::Start(
        BytesStart::new("guid").with_attributes([("isPermaLink", "true")]),
    ))?;
    writer.write_event(Event::Text(BytesText::new(&url)))?;
    writer.write_event(Event::End(BytesEnd::new("guid")))?;

    write_text_element(writer, "description", &record.description)?;
    write_text_element(writer, "pubDate", &record.published_at.to_rfc2822())?;
    write_text_element(
        writer,
        "atom:updated",
        &record.effective_modified_at().to_rfc3339(),
    )?;
    if let Some(author) = &record.author {
        write_text_element(writer, "dc:creator", author)?;
    }
    write_text_element(writer, "category", &record.category.to_string())?;
    writer.write_event(Event::End(BytesEnd::new("item")))?;

    Ok(())
}
