//! Backend-computed aggregates and public reviews

use super::{BookSummary, Review};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Window for reading-activity aggregates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DateRange {
    #[default]
    AllTime,
    ThisYear,
}

impl DateRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::AllTime => "all-time",
            DateRange::ThisYear => "this-year",
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "all-time" | "all" => Ok(DateRange::AllTime),
            "this-year" | "year" => Ok(DateRange::ThisYear),
            _ => Err(format!("unknown date range '{}'", s)),
        }
    }
}

/// Reading statistics for one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadingActivity {
    #[serde(default)]
    pub total_books: u64,

    #[serde(default)]
    pub total_pages: u64,

    #[serde(default)]
    pub top_category: Option<String>,

    #[serde(default)]
    pub top_author: Option<String>,

    /// Most recently finished books, newest first
    #[serde(default)]
    pub recently_read: Vec<BookSummary>,
}

/// Reviewer name as embedded in review listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reviewer {
    pub first_name: String,
    pub last_name: String,
}

/// One user's review of a volume, as listed by `GET /reviews/{volumeId}/{page}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicReview {
    pub user: Reviewer,

    #[serde(default)]
    pub rating: Option<u8>,

    #[serde(default)]
    pub review: Option<Review>,
}

impl PublicReview {
    pub fn reviewer_name(&self) -> String {
        format!("{} {}", self.user.first_name, self.user.last_name)
    }

    /// Five-slot star bar, e.g. `★★★★☆`
    pub fn stars(&self) -> String {
        let filled = self.rating.unwrap_or(0).min(5) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_round_trip_strings() {
        assert_eq!("this-year".parse::<DateRange>().unwrap(), DateRange::ThisYear);
        assert_eq!("All Time".parse::<DateRange>().unwrap(), DateRange::AllTime);
        assert!("last-week".parse::<DateRange>().is_err());
        assert_eq!(DateRange::ThisYear.to_string(), "this-year");
    }

    #[test]
    fn test_activity_parsing() {
        let json = r#"{
            "totalBooks": 12,
            "totalPages": 4210,
            "topCategory": "Fiction",
            "recentlyRead": [{ "volumeId": "v1", "title": "Dune" }]
        }"#;
        let activity: ReadingActivity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.total_books, 12);
        assert!(activity.top_author.is_none());
        assert_eq!(activity.recently_read[0].title, "Dune");
    }

    #[test]
    fn test_review_stars() {
        let review: PublicReview = serde_json::from_str(
            r#"{"user":{"firstName":"Ann","lastName":"Lee"},"rating":3}"#,
        )
        .unwrap();
        assert_eq!(review.stars(), "★★★☆☆");
        assert_eq!(review.reviewer_name(), "Ann Lee");
    }
}
