//! De-duplication of book lists by catalog identifier
//!
//! The catalog returns the same volume on more than one page, and backend
//! lists can repeat entries too. Every list goes through these functions
//! before it is shown.

use crate::types::{BookSummary, CatalogBook, LibraryBook, UserBook};
use std::collections::HashSet;

/// Anything keyed by a catalog identifier
pub trait VolumeKeyed {
    fn volume_id(&self) -> &str;

    /// Cover image URL, if the record has one
    fn cover(&self) -> Option<&str> {
        None
    }
}

/// Keep the first occurrence of every volume id, preserving order
pub fn dedupe_by_id<T: VolumeKeyed>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.volume_id().to_string()))
        .collect()
}

/// Drop entries without a cover image
pub fn with_covers<T: VolumeKeyed>(items: Vec<T>) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| item.cover().is_some_and(|c| !c.is_empty()))
        .collect()
}

/// The list rule used for search results and recommendations
pub fn dedupe_with_covers<T: VolumeKeyed>(items: Vec<T>) -> Vec<T> {
    with_covers(dedupe_by_id(items))
}

impl VolumeKeyed for BookSummary {
    fn volume_id(&self) -> &str {
        &self.volume_id
    }

    fn cover(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

impl VolumeKeyed for CatalogBook {
    fn volume_id(&self) -> &str {
        &self.volume_id
    }

    fn cover(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

impl VolumeKeyed for UserBook {
    fn volume_id(&self) -> &str {
        &self.volume_id
    }
}

impl<T: VolumeKeyed + ?Sized> VolumeKeyed for &T {
    fn volume_id(&self) -> &str {
        (**self).volume_id()
    }

    fn cover(&self) -> Option<&str> {
        (**self).cover()
    }
}

impl VolumeKeyed for LibraryBook {
    fn volume_id(&self) -> &str {
        &self.record.volume_id
    }

    fn cover(&self) -> Option<&str> {
        self.image.as_deref()
    }
}
