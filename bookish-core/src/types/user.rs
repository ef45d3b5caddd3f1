//! Accounts and the request bodies that create or change them

use super::UserBook;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Bookish account as returned by `GET /users/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    #[serde(default)]
    pub joined: Option<DateTime<Utc>>,

    #[serde(default)]
    pub fave_genres: Vec<String>,

    /// Every book the user attached metadata to
    #[serde(default)]
    pub books: Vec<UserBook>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// `"Jane Austen"` -> `"JA"`
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Body of `POST /users`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Signup {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /login`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Partial body of `PUT /users/{id}`; unset fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fave_genres: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn password(current: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            current_password: Some(current.into()),
            new_password: Some(new.into()),
            ..Self::default()
        }
    }

    pub fn fave_genres(genres: Vec<String>) -> Self {
        Self {
            fave_genres: Some(genres),
            ..Self::default()
        }
    }
}
