//! Genre lists and genre-based queries

/// Genres offered for browsing on the search screen
pub const BROWSE_GENRES: &[&str] = &[
    "Adventure",
    "Fantasy",
    "Fiction",
    "Comics",
    "History",
    "Horror",
    "Kids",
    "Mystery",
    "Nonfiction",
    "Poetry",
    "Romance",
    "Sci-Fi",
    "Thriller",
    "Young Adult",
];

/// Genres a user may pick as favourites
pub const FAVE_GENRE_OPTIONS: &[&str] = &[
    "Action",
    "Adventure",
    "Children",
    "Classics",
    "Comics",
    "Crime",
    "Drama",
    "Fantasy",
    "Fiction",
    "History",
    "Horror",
    "Humor",
    "Manga",
    "Memoir",
    "Music",
    "Mystery",
    "Nonfiction",
    "Paranormal",
    "Philosophy",
    "Poetry",
    "Psychology",
    "Religion",
    "Romance",
    "Science",
    "Sci-Fi",
    "Suspense",
    "Spirituality",
    "Sports",
    "Thriller",
    "Travel",
    "Young Adult",
];

/// Free-text query used to browse a genre
pub fn genre_query(genre: &str) -> String {
    format!("highly rated {} books", genre.trim())
}

/// Canonical spelling of a favourite-genre option, matched case-insensitively
pub fn canonical_fave_genre(genre: &str) -> Option<&'static str> {
    let genre = genre.trim();
    FAVE_GENRE_OPTIONS
        .iter()
        .copied()
        .find(|option| option.eq_ignore_ascii_case(genre))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::sanitize;

    #[test]
    fn test_genre_query() {
        assert_eq!(genre_query("Sci-Fi"), "highly rated Sci-Fi books");
        assert_eq!(
            sanitize(&genre_query(" Young Adult ")),
            "highly+rated+Young+Adult+books"
        );
    }

    #[test]
    fn test_canonical_fave_genre() {
        assert_eq!(canonical_fave_genre("sci-fi"), Some("Sci-Fi"));
        assert_eq!(canonical_fave_genre(" young adult"), Some("Young Adult"));
        assert_eq!(canonical_fave_genre("Cooking"), None);
    }
}
