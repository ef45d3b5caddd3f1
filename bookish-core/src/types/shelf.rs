//! User-owned book records and shelves

use super::BookSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user-chosen reading status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Shelf {
    #[serde(rename = "Want to read")]
    WantToRead,

    #[serde(rename = "Currently reading")]
    CurrentlyReading,

    #[serde(rename = "Read")]
    Read,
}

impl Shelf {
    pub const ALL: [Shelf; 3] = [Shelf::CurrentlyReading, Shelf::WantToRead, Shelf::Read];

    /// Label as stored by the backend
    pub fn label(&self) -> &'static str {
        match self {
            Shelf::WantToRead => "Want to read",
            Shelf::CurrentlyReading => "Currently reading",
            Shelf::Read => "Read",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Shelf::WantToRead => "want-to-read",
            Shelf::CurrentlyReading => "currently-reading",
            Shelf::Read => "read",
        }
    }
}

impl fmt::Display for Shelf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Shelf {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "want to read" | "want" | "to read" => Ok(Shelf::WantToRead),
            "currently reading" | "reading" | "current" => Ok(Shelf::CurrentlyReading),
            "read" | "finished" => Ok(Shelf::Read),
            _ => Err(format!(
                "unknown shelf '{}' (expected want, reading or read)",
                s
            )),
        }
    }
}

/// Free-text review with its timestamp
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub text: String,
    pub date: DateTime<Utc>,
}

impl Review {
    /// A review written now
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            date: Utc::now(),
        }
    }
}

/// Metadata a user attaches to one catalog volume
///
/// Optional fields serialize as `null` so that a PUT clears them on the
/// backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserBook {
    /// Backend identifier, absent until created
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Catalog identifier this record belongs to
    pub volume_id: String,

    #[serde(default)]
    pub owned: bool,

    #[serde(rename = "bookshelf", default)]
    pub shelf: Option<Shelf>,

    /// 1..=5
    #[serde(default)]
    pub rating: Option<u8>,

    #[serde(default)]
    pub review: Option<Review>,

    /// Date the book was finished
    #[serde(default)]
    pub date_read: Option<DateTime<Utc>>,
}

impl UserBook {
    pub fn new(volume_id: impl Into<String>) -> Self {
        Self {
            id: None,
            volume_id: volume_id.into(),
            owned: false,
            shelf: None,
            rating: None,
            review: None,
            date_read: None,
        }
    }

    /// Put the book on a shelf. Leaving "Read" drops rating, review and
    /// finish date, which only exist for read books.
    pub fn move_to_shelf(&mut self, shelf: Shelf) {
        if shelf != Shelf::Read {
            self.rating = None;
            self.review = None;
            self.date_read = None;
        }
        self.shelf = Some(shelf);
    }

    pub fn with_shelf(mut self, shelf: Shelf) -> Self {
        self.move_to_shelf(shelf);
        self
    }

    pub fn with_owned(mut self, owned: bool) -> Self {
        self.owned = owned;
        self
    }

    /// Rate the book. An unshelved book moves to "Read".
    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self.promote_to_read();
        self
    }

    /// Review the book. An unshelved book moves to "Read".
    pub fn with_review(mut self, review: Review) -> Self {
        self.review = Some(review);
        self.promote_to_read();
        self
    }

    /// Record the finish date. An unshelved book moves to "Read".
    pub fn with_date_read(mut self, date: DateTime<Utc>) -> Self {
        self.date_read = Some(date);
        self.promote_to_read();
        self
    }

    /// Whether any read-only field is present
    pub fn has_read_details(&self) -> bool {
        self.rating.is_some() || self.review.is_some() || self.date_read.is_some()
    }

    fn promote_to_read(&mut self) {
        if self.shelf.is_none() {
            self.shelf = Some(Shelf::Read);
        }
    }
}

/// A shelf listing entry: the user's record merged with catalog display
/// fields, as the backend returns it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LibraryBook {
    #[serde(flatten)]
    pub record: UserBook,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub average_rating: Option<f64>,

    #[serde(default)]
    pub ratings_count: Option<u32>,

    #[serde(default)]
    pub pages_count: Option<u32>,
}

impl LibraryBook {
    pub fn summary(&self) -> BookSummary {
        BookSummary {
            volume_id: self.record.volume_id.clone(),
            title: self.title.clone().unwrap_or_default(),
            image: self.image.clone(),
            author: self.author.clone(),
            average_rating: self.average_rating,
            ratings_count: self.ratings_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shelf_parsing() {
        assert_eq!("want".parse::<Shelf>().unwrap(), Shelf::WantToRead);
        assert_eq!("Want to read".parse::<Shelf>().unwrap(), Shelf::WantToRead);
        assert_eq!(
            "currently-reading".parse::<Shelf>().unwrap(),
            Shelf::CurrentlyReading
        );
        assert_eq!("READ".parse::<Shelf>().unwrap(), Shelf::Read);
        assert!("done".parse::<Shelf>().is_err());
    }

    #[test]
    fn test_shelf_wire_labels() {
        assert_eq!(
            serde_json::to_string(&Shelf::CurrentlyReading).unwrap(),
            "\"Currently reading\""
        );
        let shelf: Shelf = serde_json::from_str("\"Want to read\"").unwrap();
        assert_eq!(shelf, Shelf::WantToRead);
    }

    #[test]
    fn test_rating_promotes_unshelved_book() {
        let book = UserBook::new("vol1").with_rating(4);
        assert_eq!(book.shelf, Some(Shelf::Read));

        let book = UserBook::new("vol1")
            .with_shelf(Shelf::WantToRead)
            .with_rating(4);
        assert_eq!(book.shelf, Some(Shelf::WantToRead));
    }

    #[test]
    fn test_leaving_read_clears_details() {
        let mut book = UserBook::new("vol1")
            .with_rating(5)
            .with_review(Review::new("Loved it"));
        assert!(book.has_read_details());

        book.move_to_shelf(Shelf::CurrentlyReading);
        assert!(!book.has_read_details());
        assert_eq!(book.shelf, Some(Shelf::CurrentlyReading));
    }

    #[test]
    fn test_user_book_wire_format() {
        let json = r#"{
            "_id": "64a1",
            "volumeId": "vol1",
            "owned": true,
            "bookshelf": "Read",
            "rating": 4,
            "review": { "text": "Great", "date": "2023-04-01T12:00:00.000Z" },
            "dateRead": "2023-03-30T00:00:00.000Z"
        }"#;
        let book: UserBook = serde_json::from_str(json).unwrap();
        assert_eq!(book.id.as_deref(), Some("64a1"));
        assert_eq!(book.shelf, Some(Shelf::Read));
        assert_eq!(book.review.as_ref().unwrap().text, "Great");

        let out = serde_json::to_value(UserBook::new("vol2").with_owned(true)).unwrap();
        assert!(out.get("_id").is_none());
        assert!(out["bookshelf"].is_null());
        assert!(out["rating"].is_null());
    }

    #[test]
    fn test_library_book_flattening() {
        let json = r#"{
            "volumeId": "vol1",
            "bookshelf": "Currently reading",
            "title": "Dune",
            "author": "Frank Herbert",
            "image": "https://books.example/dune.jpg"
        }"#;
        let entry: LibraryBook = serde_json::from_str(json).unwrap();
        assert_eq!(entry.record.shelf, Some(Shelf::CurrentlyReading));
        assert!(!entry.record.owned);

        let summary = entry.summary();
        assert_eq!(summary.title, "Dune");
        assert_eq!(summary.volume_id, "vol1");
    }
}
