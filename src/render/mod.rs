//! Views derived from the content registry.
//!
//! Each renderer reads the registry through its public operations only:
//!
//! - [`listing`] - blog index page (`get_all`)
//! - [`feed`] - RSS 2.0 feed (`get_all`)
//! - [`sitemap`] - XML sitemap and static path enumeration (`get_all_keys`)
//! - [`detail`] - per-post page or 404 (`get_by_key`)

pub mod detail;
pub mod feed;
pub mod listing;
pub mod sitemap;

use anyhow::Result;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

pub use detail::{resolve, DetailPage};
pub use feed::render_feed;
pub use listing::{render_listing, select, ListingOptions};
pub use sitemap::{render_sitemap, sitemap_entries, static_paths, SitemapEntry};

/// XML writer over an in-memory buffer, two-space indented
pub(crate) type XmlWriter = Writer<Vec<u8>>;

pub(crate) fn xml_writer() -> XmlWriter {
    Writer::new_with_indent(Vec::new(), b' ', 2)
}

/// Write `<name>text</name>`, escaping the text
pub(crate) fn write_text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

pub(crate) fn finish_xml(writer: XmlWriter) -> Result<String> {
    let mut xml = String::from_utf8(writer.into_inner())?;
    xml.push('\n');
    Ok(xml)
}

/// Escape text for HTML element content
pub(crate) fn html_text(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Escape text for a double-quoted HTML attribute
pub(crate) fn html_attr(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}
