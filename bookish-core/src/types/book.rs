//! Catalog-side book records

use crate::text;
use serde::{Deserialize, Serialize};

/// A volume as described by the external catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogBook {
    /// Catalog identifier (Google Books volume id)
    pub volume_id: String,

    pub title: String,

    pub subtitle: Option<String>,

    /// Authors in catalog order; the first one is the primary author
    #[serde(default)]
    pub authors: Vec<String>,

    pub average_rating: Option<f64>,

    pub ratings_count: Option<u32>,

    pub page_count: Option<u32>,

    /// Cover thumbnail URL
    pub image: Option<String>,

    /// HTML description as delivered by the catalog
    pub description: Option<String>,

    pub publisher: Option<String>,

    /// Free-form date: `"2005"`, `"2005-07"` or `"2005-07-16"`
    pub published_date: Option<String>,

    /// Raw categories such as `"Fiction / Fantasy / Epic"`
    #[serde(default)]
    pub categories: Vec<String>,
}

impl CatalogBook {
    /// Create a record with only the required fields
    pub fn new(volume_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            volume_id: volume_id.into(),
            title: title.into(),
            subtitle: None,
            authors: Vec::new(),
            average_rating: None,
            ratings_count: None,
            page_count: None,
            image: None,
            description: None,
            publisher: None,
            published_date: None,
            categories: Vec::new(),
        }
    }

    /// Get the primary author (first listed)
    pub fn primary_author(&self) -> Option<&str> {
        self.authors.first().map(|s| s.as_str())
    }

    /// Flattened, de-duplicated categories joined for display
    pub fn genres(&self) -> Option<String> {
        text::genre_line(&self.categories)
    }

    /// Reduce to the list form used by search results and shelves
    pub fn summary(&self) -> BookSummary {
        BookSummary {
            volume_id: self.volume_id.clone(),
            title: self.title.clone(),
            image: self.image.clone(),
            author: self.primary_author().map(str::to_string),
            average_rating: self.average_rating,
            ratings_count: self.ratings_count,
        }
    }
}

/// Normalized list entry shared by search results, recommendations and
/// reading activity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub volume_id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub image: Option<String>,

    /// Primary author
    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub average_rating: Option<f64>,

    #[serde(default)]
    pub ratings_count: Option<u32>,
}

impl BookSummary {
    pub fn new(volume_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            volume_id: volume_id.into(),
            title: title.into(),
            image: None,
            author: None,
            average_rating: None,
            ratings_count: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_uses_primary_author() {
        let mut book = CatalogBook::new("abc123", "Good Omens");
        book.authors = vec!["Terry Pratchett".to_string(), "Neil Gaiman".to_string()];
        book.image = Some("https://books.example/cover.jpg".to_string());
        book.average_rating = Some(4.5);

        let summary = book.summary();
        assert_eq!(summary.volume_id, "abc123");
        assert_eq!(summary.author.as_deref(), Some("Terry Pratchett"));
        assert_eq!(summary.average_rating, Some(4.5));
        assert_eq!(summary.ratings_count, None);
    }

    #[test]
    fn test_summary_wire_format() {
        let summary = BookSummary::new("abc123", "Dune").with_author("Frank Herbert");
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["volumeId"], "abc123");
        assert_eq!(json["author"], "Frank Herbert");

        // backend lists sometimes omit everything but the id
        let parsed: BookSummary = serde_json::from_str(r#"{"volumeId":"x"}"#).unwrap();
        assert_eq!(parsed.title, "");
        assert!(parsed.image.is_none());
    }
}
