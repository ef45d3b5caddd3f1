//! Validation rules applied before anything is sent to the backend
//!
//! Shelf rule: rating, review and finish date belong to the "Read" shelf
//! only. [`UserBook`]'s builders already promote unshelved books to "Read"
//! and clear the details when a book leaves it; [`validate_user_book`]
//! rejects whatever still breaks the rule.

use crate::catalog::genre::canonical_fave_genre;
use crate::error::ValidationError;
use crate::types::{Credentials, Shelf, Signup, UserBook, UserUpdate};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 30;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_FAVE_GENRES: usize = 6;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

type Validation = Result<(), ValidationError>;

/// Check a user book record before it is created or updated
pub fn validate_user_book(book: &UserBook) -> Validation {
    if book.volume_id.trim().is_empty() {
        return Err(ValidationError::new("volumeId", "is required"));
    }

    if book.shelf.is_none() && !book.owned {
        return Err(ValidationError::new(
            "bookshelf",
            "choose a shelf or mark the book as owned",
        ));
    }

    if let Some(rating) = book.rating {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ValidationError::new(
                "rating",
                format!("must be between {} and {}", MIN_RATING, MAX_RATING),
            ));
        }
    }

    if let Some(review) = &book.review {
        if review.text.trim().is_empty() {
            return Err(ValidationError::new("review", "cannot be blank"));
        }
    }

    if book.has_read_details() && book.shelf != Some(Shelf::Read) {
        let field = if book.rating.is_some() {
            "rating"
        } else if book.review.is_some() {
            "review"
        } else {
            "dateRead"
        };
        return Err(ValidationError::new(
            field,
            "only books on the Read shelf can be rated, reviewed or finished",
        ));
    }

    Ok(())
}

pub fn validate_signup(signup: &Signup) -> Validation {
    validate_name("firstName", &signup.first_name)?;
    validate_name("lastName", &signup.last_name)?;
    validate_email(&signup.email)?;
    validate_new_password("password", &signup.password)
}

pub fn validate_credentials(credentials: &Credentials) -> Validation {
    validate_email(&credentials.email)?;
    require("password", &credentials.password)
}

/// Check a profile update. A password change needs both fields.
pub fn validate_user_update(update: &UserUpdate) -> Validation {
    if update.is_empty() {
        return Err(ValidationError::new("user", "nothing to update"));
    }
    if let Some(first) = &update.first_name {
        validate_name("firstName", first)?;
    }
    if let Some(last) = &update.last_name {
        validate_name("lastName", last)?;
    }
    if let Some(email) = &update.email {
        validate_email(email)?;
    }
    if let Some(genres) = &update.fave_genres {
        validate_fave_genres(genres)?;
    }
    match (&update.current_password, &update.new_password) {
        (None, None) => Ok(()),
        (Some(current), Some(new)) => {
            require("currentPassword", current)?;
            validate_new_password("newPassword", new)
        }
        (None, Some(_)) => Err(ValidationError::new("currentPassword", "is required")),
        (Some(_), None) => Err(ValidationError::new("newPassword", "is required")),
    }
}

pub fn validate_fave_genres(genres: &[String]) -> Validation {
    if genres.is_empty() {
        return Err(ValidationError::new(
            "faveGenres",
            "select at least one genre",
        ));
    }
    if genres.len() > MAX_FAVE_GENRES {
        return Err(ValidationError::new(
            "faveGenres",
            format!("select up to {}", MAX_FAVE_GENRES),
        ));
    }
    if let Some(unknown) = genres.iter().find(|g| canonical_fave_genre(g).is_none()) {
        return Err(ValidationError::new(
            "faveGenres",
            format!("unknown genre '{}'", unknown),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Validation {
    require("email", email)?;
    if EMAIL.is_match(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("email", "invalid email"))
    }
}

fn validate_name(field: &'static str, name: &str) -> Validation {
    require(field, name)?;
    let len = name.trim().chars().count();
    if len < MIN_NAME_LEN {
        Err(ValidationError::new(field, "that's too short"))
    } else if len > MAX_NAME_LEN {
        Err(ValidationError::new(field, "that's too long"))
    } else {
        Ok(())
    }
}

fn validate_new_password(field: &'static str, password: &str) -> Validation {
    require(field, password)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        Err(ValidationError::new(field, "that's too short"))
    } else {
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Validation {
    if value.trim().is_empty() {
        Err(ValidationError::new(field, "is required"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Review;
    use chrono::Utc;

    #[test]
    fn test_read_without_rating_is_valid() {
        let book = UserBook::new("vol1").with_shelf(Shelf::Read);
        assert!(validate_user_book(&book).is_ok());
    }

    #[test]
    fn test_owned_without_shelf_is_valid() {
        let book = UserBook::new("vol1").with_owned(true);
        assert!(validate_user_book(&book).is_ok());
    }

    #[test]
    fn test_empty_record_is_rejected() {
        let err = validate_user_book(&UserBook::new("vol1")).unwrap_err();
        assert_eq!(err.field, "bookshelf");
    }

    #[test]
    fn test_rating_bounds() {
        let err = validate_user_book(&UserBook::new("vol1").with_rating(0)).unwrap_err();
        assert_eq!(err.field, "rating");
        let err = validate_user_book(&UserBook::new("vol1").with_rating(6)).unwrap_err();
        assert_eq!(err.field, "rating");
        assert!(validate_user_book(&UserBook::new("vol1").with_rating(5)).is_ok());
    }

    #[test]
    fn test_details_on_other_shelves_are_rejected() {
        let mut book = UserBook::new("vol1").with_shelf(Shelf::WantToRead);
        book.review = Some(Review::new("Can't wait"));
        let err = validate_user_book(&book).unwrap_err();
        assert_eq!(err.field, "review");

        let mut book = UserBook::new("vol1").with_shelf(Shelf::CurrentlyReading);
        book.date_read = Some(Utc::now());
        let err = validate_user_book(&book).unwrap_err();
        assert_eq!(err.field, "dateRead");
    }

    #[test]
    fn test_blank_review_is_rejected() {
        let book = UserBook::new("vol1").with_review(Review::new("   "));
        assert_eq!(validate_user_book(&book).unwrap_err().field, "review");
    }

    #[test]
    fn test_signup_rules() {
        let mut signup = Signup {
            first_name: "Jane".into(),
            last_name: "Austen".into(),
            email: "jane@example.com".into(),
            password: "pride1813".into(),
        };
        assert!(validate_signup(&signup).is_ok());

        signup.first_name = "J".into();
        assert_eq!(validate_signup(&signup).unwrap_err().field, "firstName");

        signup.first_name = "Jane".into();
        signup.last_name = "A".repeat(31);
        assert_eq!(validate_signup(&signup).unwrap_err().reason, "that's too long");

        signup.last_name = "Austen".into();
        signup.email = "jane@example".into();
        assert_eq!(validate_signup(&signup).unwrap_err().field, "email");

        signup.email = "jane@example.com".into();
        signup.password = "12345".into();
        assert_eq!(validate_signup(&signup).unwrap_err().field, "password");
    }

    #[test]
    fn test_credentials_rules() {
        let ok = Credentials {
            email: "a@b.co".into(),
            password: "x".into(),
        };
        assert!(validate_credentials(&ok).is_ok());

        let missing = Credentials {
            email: "a@b.co".into(),
            password: "".into(),
        };
        assert_eq!(validate_credentials(&missing).unwrap_err().field, "password");
    }

    #[test]
    fn test_user_update_rules() {
        assert!(validate_user_update(&UserUpdate::default()).is_err());
        assert!(validate_user_update(&UserUpdate::password("old", "newpass")).is_ok());
        assert_eq!(
            validate_user_update(&UserUpdate::password("old", "new"))
                .unwrap_err()
                .field,
            "newPassword"
        );

        let half = UserUpdate {
            new_password: Some("newpass".into()),
            ..UserUpdate::default()
        };
        assert_eq!(
            validate_user_update(&half).unwrap_err().field,
            "currentPassword"
        );
    }

    #[test]
    fn test_fave_genre_bounds() {
        assert!(validate_fave_genres(&[]).is_err());
        let seven: Vec<String> = ["Action", "Crime", "Drama", "Horror", "Manga", "Music", "Travel"]
            .iter()
            .map(|g| g.to_string())
            .collect();
        assert!(validate_fave_genres(&seven).is_err());
        assert!(validate_fave_genres(&seven[..6]).is_ok());

        let err = validate_fave_genres(&["Cooking".to_string()]).unwrap_err();
        assert_eq!(err.reason, "unknown genre 'Cooking'");
    }
}
