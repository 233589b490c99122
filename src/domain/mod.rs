//! Domain types for the content registry.
//!
//! - ContentRecord: metadata for one blog post
//! - Category: closed classification set

pub mod category;
pub mod record;

pub use category::Category;
pub use record::ContentRecord;
