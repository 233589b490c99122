//! Blog post metadata records.
//!
//! A record holds everything the listing, feed and sitemap need to know about
//! a post. The post body itself lives outside the registry and is matched by
//! `key`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;

/// Metadata for a single blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Unique slug, also the detail page path segment
    pub key: String,

    /// Post title
    pub title: String,

    /// One or two sentence summary
    pub description: String,

    /// First publication time
    pub published_at: DateTime<Utc>,

    /// Last edit time (see [`ContentRecord::effective_modified_at`])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,

    /// Byline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Cover image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Classification
    pub category: Category,

    /// Display-only estimate, e.g. "6 min read"
    pub read_time: String,

    /// Pinned to the top of the listing
    #[serde(default)]
    pub featured: bool,
}

impl ContentRecord {
    /// Create a record with the required fields; optional fields start empty
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        published_at: DateTime<Utc>,
        category: Category,
        read_time: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            description: description.into(),
            published_at,
            modified_at: None,
            author: None,
            image: None,
            category,
            read_time: read_time.into(),
            featured: false,
        }
    }

    /// Set the modification time
    pub fn with_modified_at(mut self, modified_at: DateTime<Utc>) -> Self {
        self.modified_at = Some(modified_at);
        self
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the cover image
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Mark as featured
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Modification time, falling back to the publication time
    pub fn effective_modified_at(&self) -> DateTime<Utc> {
        self.modified_at.unwrap_or(self.published_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> ContentRecord {
        ContentRecord::new(
            "structured-logging",
            "Structured Logging 101",
            "Fields beat format strings.",
            Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
            Category::Tutorial,
            "7 min read",
        )
    }

    #[test]
    fn test_effective_modified_defaults_to_published() {
        let record = sample();
        assert!(record.modified_at.is_none());
        assert_eq!(record.effective_modified_at(), record.published_at);
    }

    #[test]
    fn test_effective_modified_uses_explicit_value() {
        let edited = Utc.with_ymd_and_hms(2025, 6, 3, 10, 30, 0).unwrap();
        let record = sample().with_modified_at(edited);
        assert_eq!(record.effective_modified_at(), edited);
        // Stored publication time is untouched
        assert_eq!(
            record.published_at,
            Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_optional_fields_default_when_absent() {
        let yaml = r#"
key: hello
title: Hello
description: First post
published_at: 2025-01-02T03:04:05Z
category: Announcement
read_time: 2 min read
"#;
        let record: ContentRecord = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(record.key, "hello");
        assert!(!record.featured);
        assert!(record.author.is_none());
        assert!(record.image.is_none());
        assert_eq!(record.effective_modified_at(), record.published_at);
    }

    #[test]
    fn test_record_json_skips_absent_options() {
        let record = sample().with_author("Mira Okafor").featured();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["author"], "Mira Okafor");
        assert_eq!(json["featured"], true);
        assert!(json.get("modified_at").is_none());
        assert!(json.get("image").is_none());
    }
}
