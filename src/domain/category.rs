//! Post categories.

use serde::{Deserialize, Serialize};

/// Closed set of classifications a post can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Version release notes
    Release,

    /// Comparison against other logging libraries
    Comparison,

    /// Step-by-step how-to
    Tutorial,

    /// Internals and performance write-ups
    Engineering,

    /// Project news
    Announcement,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 5] = [
        Category::Release,
        Category::Comparison,
        Category::Tutorial,
        Category::Engineering,
        Category::Announcement,
    ];

    /// Lowercase form used in CSS classes and CLI arguments
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Release => "release",
            Category::Comparison => "comparison",
            Category::Tutorial => "tutorial",
            Category::Engineering => "engineering",
            Category::Announcement => "announcement",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Release => write!(f, "Release"),
            Category::Comparison => write!(f, "Comparison"),
            Category::Tutorial => write!(f, "Tutorial"),
            Category::Engineering => write!(f, "Engineering"),
            Category::Announcement => write!(f, "Announcement"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "release" | "releases" => Ok(Category::Release),
            "comparison" | "vs" => Ok(Category::Comparison),
            "tutorial" | "guide" => Ok(Category::Tutorial),
            "engineering" => Ok(Category::Engineering),
            "announcement" | "news" => Ok(Category::Announcement),
            _ => anyhow::bail!("Unknown category: {}", s),
        }
    }
}
