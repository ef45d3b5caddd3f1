//! Google Books catalog client

use super::{CatalogPage, CatalogProvider, CatalogResult};
use crate::config::{Config, MAX_PAGE_SIZE};
use crate::error::CatalogError;
use crate::types::CatalogBook;
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(rename = "totalItems", default)]
    total_items: u64,
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    id: String,
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VolumeInfo {
    title: Option<String>,
    subtitle: Option<String>,
    authors: Vec<String>,
    average_rating: Option<f64>,
    ratings_count: Option<u32>,
    page_count: Option<u32>,
    image_links: Option<ImageLinks>,
    description: Option<String>,
    publisher: Option<String>,
    published_date: Option<String>,
    categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageLinks {
    thumbnail: Option<String>,
    small_thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ErrorReason>,
}

#[derive(Debug, Deserialize)]
struct ErrorReason {
    #[serde(default)]
    reason: String,
}

impl From<Volume> for CatalogBook {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info;
        let image = info
            .image_links
            .and_then(|links| links.thumbnail.or(links.small_thumbnail))
            // thumbnails are usually served over plain http
            .map(|url| url.replacen("http://", "https://", 1));

        CatalogBook {
            volume_id: volume.id,
            title: info.title.unwrap_or_default(),
            subtitle: info.subtitle,
            authors: info.authors,
            average_rating: info.average_rating,
            ratings_count: info.ratings_count,
            page_count: info.page_count,
            image,
            description: info.description,
            publisher: info.publisher,
            published_date: info.published_date,
            categories: info.categories,
        }
    }
}

/// Client for the Google Books `v1` API
#[derive(Debug, Clone)]
pub struct GoogleBooks {
    client: reqwest::Client,
    base_url: Url,
}

impl GoogleBooks {
    /// Create a client from configuration
    pub fn new(config: &Config) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self::with_client(client, config.catalog_url.clone()))
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn volumes_url(&self) -> CatalogResult<Url> {
        self.base_url
            .join("volumes")
            .map_err(|e| CatalogError::Malformed(e.to_string()))
    }

    async fn check_status(resp: reqwest::Response) -> CatalogResult<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ErrorResponse>(&body).ok();

        let quota = status.as_u16() == 429
            || parsed.as_ref().is_some_and(|e| {
                e.error
                    .errors
                    .iter()
                    .any(|r| r.reason.to_lowercase().contains("ratelimitexceeded"))
            });
        if quota {
            return Err(CatalogError::QuotaExhausted);
        }

        let message = parsed
            .map(|e| e.error.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

        Err(CatalogError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl CatalogProvider for GoogleBooks {
    async fn search(
        &self,
        query: &str,
        start_index: u64,
        max_results: u32,
    ) -> CatalogResult<CatalogPage> {
        let mut url = self.volumes_url()?;
        // `+` in a sanitized query means a space; form encoding turns it back into `+`
        url.query_pairs_mut()
            .append_pair("q", &query.replace('+', " "))
            .append_pair("startIndex", &start_index.to_string())
            .append_pair("maxResults", &max_results.clamp(1, MAX_PAGE_SIZE).to_string());

        tracing::debug!("Catalog search: {}", url);

        let resp = Self::check_status(self.client.get(url).send().await?).await?;
        let body = resp.text().await?;
        let parsed: VolumesResponse =
            serde_json::from_str(&body).map_err(|e| CatalogError::Malformed(e.to_string()))?;

        Ok(CatalogPage {
            items: parsed
                .items
                .unwrap_or_default()
                .into_iter()
                .map(CatalogBook::from)
                .collect(),
            total_items: parsed.total_items,
        })
    }

    async fn volume(&self, volume_id: &str) -> CatalogResult<CatalogBook> {
        let mut url = self.volumes_url()?;
        url.path_segments_mut()
            .map_err(|_| CatalogError::Malformed("catalog URL cannot be a base".to_string()))?
            .push(volume_id);

        tracing::debug!("Catalog volume lookup: {}", url);

        let resp = self.client.get(url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(volume_id.to_string()));
        }
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await?;
        let volume: Volume =
            serde_json::from_str(&body).map_err(|e| CatalogError::Malformed(e.to_string()))?;
        Ok(volume.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_conversion() {
        let json = r#"{
            "id": "zyTCAlFPjgYC",
            "volumeInfo": {
                "title": "The Google Story",
                "authors": ["David A. Vise", "Mark Malseed"],
                "pageCount": 207,
                "averageRating": 3.5,
                "ratingsCount": 136,
                "imageLinks": {
                    "smallThumbnail": "http://books.google.com/small",
                    "thumbnail": "http://books.google.com/thumb"
                },
                "categories": ["Business & Economics / Entrepreneurship"]
            }
        }"#;
        let volume: Volume = serde_json::from_str(json).unwrap();
        let book = CatalogBook::from(volume);
        assert_eq!(book.volume_id, "zyTCAlFPjgYC");
        assert_eq!(book.primary_author(), Some("David A. Vise"));
        assert_eq!(book.page_count, Some(207));
        assert_eq!(book.image.as_deref(), Some("https://books.google.com/thumb"));
    }

    #[test]
    fn test_missing_fields_tolerated() {
        let volume: Volume = serde_json::from_str(r#"{"id":"x","volumeInfo":{}}"#).unwrap();
        let book = CatalogBook::from(volume);
        assert_eq!(book.title, "");
        assert!(book.authors.is_empty());
        assert!(book.image.is_none());
    }

    #[test]
    fn test_missing_items_means_empty_page() {
        let parsed: VolumesResponse = serde_json::from_str(r#"{"totalItems":0}"#).unwrap();
        assert!(parsed.items.is_none());
        assert_eq!(parsed.total_items, 0);
    }
}
