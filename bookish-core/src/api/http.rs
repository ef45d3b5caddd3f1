//! reqwest implementation of [`BookishApi`]

use super::{ApiResult, BookishApi, Paginated};
use crate::config::Config;
use crate::error::ApiError;
use crate::session::Session;
use crate::types::{
    BookSummary, Credentials, DateRange, LibraryBook, PublicReview, ReadingActivity, Shelf,
    Signup, User, UserBook, UserUpdate,
};
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    token: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifiedUser {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    user: VerifiedUser,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    user: User,
}

#[derive(Debug, Deserialize)]
struct BookResponse {
    book: Option<UserBook>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendedResponse {
    #[serde(default)]
    recommended_books: Vec<BookSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShelfResponse {
    #[serde(default)]
    books: Vec<LibraryBook>,
    total_books: Option<u64>,
    next_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewsResponse {
    #[serde(default)]
    reviews: Vec<PublicReview>,
    total_reviews: Option<u64>,
    next_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

/// HTTP client for the Bookish backend
#[derive(Debug, Clone)]
pub struct HttpBookishApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBookishApi {
    /// Create a client from configuration
    pub fn new(config: &Config) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL
    fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        url: Url,
        session: Option<&Session>,
    ) -> reqwest::RequestBuilder {
        tracing::debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match session {
            Some(session) => builder.bearer_auth(&session.token),
            None => builder,
        }
    }

    /// Send a request and return the body of a successful response
    async fn send(&self, builder: reqwest::RequestBuilder) -> ApiResult<String> {
        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        let message = serde_json::from_str::<MessageBody>(&body)
            .map(|m| m.message)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                } else {
                    body.trim().to_string()
                }
            });

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        let body = self.send(builder).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl BookishApi for HttpBookishApi {
    async fn signup(&self, signup: &Signup) -> ApiResult<String> {
        let url = self.url(&["users"])?;
        let resp: TokenResponse = self
            .send_json(self.request(Method::POST, url, None).json(signup))
            .await?;
        Ok(resp.token)
    }

    async fn login(&self, credentials: &Credentials) -> ApiResult<String> {
        let url = self.url(&["login"])?;
        let resp: TokenResponse = self
            .send_json(self.request(Method::POST, url, None).json(credentials))
            .await?;
        Ok(resp.token)
    }

    async fn verify_token(&self, token: &str) -> ApiResult<String> {
        let url = self.url(&["token"])?;
        let resp: VerifyResponse = self
            .send_json(
                self.request(Method::POST, url, None)
                    .json(&TokenRequest { token }),
            )
            .await?;
        Ok(resp.user.id)
    }

    async fn user(&self, session: &Session) -> ApiResult<User> {
        let url = self.url(&["users", &session.user_id])?;
        let resp: UserResponse = self
            .send_json(self.request(Method::GET, url, Some(session)))
            .await?;
        Ok(resp.user)
    }

    async fn update_user(&self, session: &Session, update: &UserUpdate) -> ApiResult<User> {
        let url = self.url(&["users", &session.user_id])?;
        let resp: UserResponse = self
            .send_json(self.request(Method::PUT, url, Some(session)).json(update))
            .await?;
        Ok(resp.user)
    }

    async fn delete_user(&self, session: &Session) -> ApiResult<()> {
        let url = self.url(&["users", &session.user_id])?;
        self.send(self.request(Method::DELETE, url, Some(session)))
            .await?;
        Ok(())
    }

    async fn reading_activity(
        &self,
        session: &Session,
        range: DateRange,
    ) -> ApiResult<ReadingActivity> {
        let url = self.url(&["users", &session.user_id, "reading-activity"])?;
        self.send_json(
            self.request(Method::GET, url, Some(session))
                .query(&[("dateRange", range.as_str())]),
        )
        .await
    }

    async fn recommended_books(
        &self,
        session: &Session,
        genre: &str,
    ) -> ApiResult<Vec<BookSummary>> {
        let url = self.url(&["users", &session.user_id, "recommended-books"])?;
        let resp: RecommendedResponse = self
            .send_json(
                self.request(Method::GET, url, Some(session))
                    .query(&[("genre", genre)]),
            )
            .await?;
        Ok(resp.recommended_books)
    }

    async fn user_book(&self, session: &Session, volume_id: &str) -> ApiResult<Option<UserBook>> {
        let url = self.url(&["books", &session.user_id, volume_id])?;
        match self
            .send_json::<BookResponse>(self.request(Method::GET, url, Some(session)))
            .await
        {
            Ok(resp) => Ok(resp.book),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_user_book(&self, session: &Session, book: &UserBook) -> ApiResult<UserBook> {
        let url = self.url(&["books", &session.user_id])?;
        let resp: BookResponse = self
            .send_json(self.request(Method::POST, url, Some(session)).json(book))
            .await?;
        resp.book
            .ok_or_else(|| ApiError::Malformed("response has no book".to_string()))
    }

    async fn update_user_book(&self, session: &Session, book: &UserBook) -> ApiResult<UserBook> {
        let url = self.url(&["books", &session.user_id, &book.volume_id])?;
        let resp: BookResponse = self
            .send_json(self.request(Method::PUT, url, Some(session)).json(book))
            .await?;
        resp.book
            .ok_or_else(|| ApiError::Malformed("response has no book".to_string()))
    }

    async fn delete_user_book(&self, session: &Session, volume_id: &str) -> ApiResult<()> {
        let url = self.url(&["books", &session.user_id, volume_id])?;
        self.send(self.request(Method::DELETE, url, Some(session)))
            .await?;
        Ok(())
    }

    async fn shelf_page(
        &self,
        session: &Session,
        shelf: Shelf,
        page: u32,
    ) -> ApiResult<Paginated<LibraryBook>> {
        let url = self.url(&["books", &session.user_id, "shelf", shelf.label()])?;
        let resp: ShelfResponse = self
            .send_json(
                self.request(Method::GET, url, Some(session))
                    .query(&[("page", page)]),
            )
            .await?;
        Ok(Paginated {
            items: resp.books,
            total: resp.total_books,
            next_page: resp.next_page,
        })
    }

    async fn reviews_page(&self, volume_id: &str, page: u32) -> ApiResult<Paginated<PublicReview>> {
        let page = page.max(1).to_string();
        let url = self.url(&["reviews", volume_id, &page])?;
        let resp: ReviewsResponse = self
            .send_json(self.request(Method::GET, url, None))
            .await?;
        Ok(Paginated {
            items: resp.reviews,
            total: resp.total_reviews,
            next_page: resp.next_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpBookishApi {
        HttpBookishApi::with_client(
            reqwest::Client::new(),
            crate::config::parse_url("test", base).unwrap(),
        )
    }

    #[test]
    fn test_url_building() {
        let api = api("http://localhost:8080/api");
        let url = api.url(&["books", "u1", "shelf", "Want to read"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/books/u1/shelf/Want%20to%20read"
        );

        let url = api.url(&["users"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/users");
    }

    #[test]
    fn test_segments_are_escaped() {
        let api = api("http://localhost:8080");
        let url = api.url(&["books", "u1", "vol/1"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/books/u1/vol%2F1");
    }
}
