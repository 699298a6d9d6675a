//! Wikipedia knowledge base adapter.
//!
//! Summaries come from the REST `page/summary` endpoint, keyword search
//! from the Action API `list=search` query.

use async_trait::async_trait;
use pathfinder_core::error::ProviderError;
use pathfinder_core::location::{Coordinates, PageKind, SearchHit, SummaryRecord};
use pathfinder_core::provider::KnowledgeBase;
use serde::Deserialize;
use tracing::debug;

use crate::client::{decode_json, endpoint, transport};

/// Public Wikipedia.
pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";

const SEARCH_LIMIT: &str = "10";

/// Wikipedia over HTTP.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    client: reqwest::Client,
    base_url: String,
}

impl WikipediaClient {
    /// Creates a client rooted at `base_url`.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(rename = "type", default)]
    page_type: Option<String>,
    title: String,
    #[serde(default)]
    extract: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    coordinates: Option<WikiCoordinates>,
    #[serde(default)]
    thumbnail: Option<Thumbnail>,
    #[serde(default)]
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
struct WikiCoordinates {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: String,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: DesktopUrls,
}

#[derive(Debug, Deserialize)]
struct DesktopUrls {
    page: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchEntry>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    title: String,
    #[serde(default)]
    snippet: String,
}

impl WikipediaClient {
    fn record_from(&self, response: SummaryResponse) -> SummaryRecord {
        let kind = match response.page_type.as_deref() {
            Some("disambiguation") => PageKind::Disambiguation,
            _ => PageKind::Standard,
        };
        let page_url = response.content_urls.map_or_else(
            || {
                format!(
                    "{}/wiki/{}",
                    self.base_url.trim_end_matches('/'),
                    response.title.replace(' ', "_")
                )
            },
            |urls| urls.desktop.page,
        );
        SummaryRecord {
            title: response.title,
            extract: response.extract,
            description: response.description,
            coordinates: response
                .coordinates
                .map(|c| Coordinates::new(c.lat, c.lon)),
            thumbnail_url: response.thumbnail.map(|t| t.source),
            page_url,
            kind,
        }
    }
}

#[async_trait]
impl KnowledgeBase for WikipediaClient {
    async fn page_summary(&self, title: &str) -> Result<SummaryRecord, ProviderError> {
        let page = title.trim().replace(' ', "_");
        let url = endpoint(&self.base_url, &["api", "rest_v1", "page", "summary", &page])?;
        debug!(%url, "fetching page summary");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport(&e))?;
        let summary: SummaryResponse = decode_json(response).await?;
        Ok(self.record_from(summary))
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ProviderError> {
        let url = endpoint(&self.base_url, &["w", "api.php"])?;
        debug!(query, "searching knowledge base");

        let response = self
            .client
            .get(url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("format", "json"),
                ("srlimit", SEARCH_LIMIT),
            ])
            .send()
            .await
            .map_err(|e| transport(&e))?;
        let results: SearchResponse = decode_json(response).await?;
        Ok(results
            .query
            .search
            .into_iter()
            .map(|entry| SearchHit {
                title: entry.title,
                snippet: entry.snippet,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use super::*;
    use crate::client::build_http_client;
    use crate::fake_server::{dead_end, serve};

    fn client(base_url: String) -> WikipediaClient {
        WikipediaClient::new(build_http_client(Duration::from_secs(5)).unwrap(), base_url)
    }

    async fn summary_endpoint(Path(title): Path<String>) -> Result<Json<Value>, StatusCode> {
        match title.as_str() {
            "Colosseum" => Ok(Json(json!({
                "type": "standard",
                "title": "Colosseum",
                "extract": "The Colosseum is an elliptical amphitheatre.",
                "description": "Amphitheatre in Rome, Italy",
                "coordinates": { "lat": 41.8902, "lon": 12.4922 },
                "thumbnail": { "source": "https://upload.wikimedia.org/colosseum.jpg" },
                "content_urls": { "desktop": { "page": "https://en.wikipedia.org/wiki/Colosseum" } }
            }))),
            "Mercury" => Ok(Json(json!({
                "type": "disambiguation",
                "title": "Mercury",
                "extract": "Mercury may refer to:"
            }))),
            _ => Err(StatusCode::NOT_FOUND),
        }
    }

    async fn search_endpoint(Query(params): Query<Vec<(String, String)>>) -> Json<Value> {
        let srsearch = params
            .iter()
            .find(|(k, _)| k == "srsearch")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        Json(json!({
            "query": {
                "search": [
                    { "title": srsearch, "snippet": "an ancient <span>amphitheatre</span>" },
                    { "title": "Flavian dynasty", "snippet": "a Roman imperial dynasty" }
                ]
            }
        }))
    }

    fn fake_wikipedia() -> Router {
        Router::new()
            .route("/api/rest_v1/page/summary/{title}", get(summary_endpoint))
            .route("/w/api.php", get(search_endpoint))
    }

    #[tokio::test]
    async fn test_page_summary_maps_coordinates_and_links() {
        // Arrange
        let wikipedia = client(serve(fake_wikipedia()).await);

        // Act
        let summary = wikipedia.page_summary("Colosseum").await.unwrap();

        // Assert
        assert_eq!(summary.coordinates, Some(Coordinates::new(41.8902, 12.4922)));
        assert_eq!(summary.page_url, "https://en.wikipedia.org/wiki/Colosseum");
        assert_eq!(
            summary.thumbnail_url.as_deref(),
            Some("https://upload.wikimedia.org/colosseum.jpg")
        );
        assert_eq!(summary.kind, PageKind::Standard);
    }

    #[tokio::test]
    async fn test_disambiguation_page_is_flagged() {
        let base = serve(fake_wikipedia()).await;
        let wikipedia = client(base.clone());

        let summary = wikipedia.page_summary("Mercury").await.unwrap();

        assert_eq!(summary.kind, PageKind::Disambiguation);
        assert!(summary.coordinates.is_none());
        assert_eq!(summary.page_url, format!("{base}/wiki/Mercury"));
    }

    #[tokio::test]
    async fn test_missing_page_is_not_found() {
        let wikipedia = client(serve(fake_wikipedia()).await);

        let result = wikipedia.page_summary("Atlantis").await;

        assert_eq!(result.unwrap_err(), ProviderError::NotFound);
    }

    #[tokio::test]
    async fn test_search_returns_hits_in_order() {
        let wikipedia = client(serve(fake_wikipedia()).await);

        let hits = wikipedia.search("Colosseum Rome").await.unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Colosseum Rome");
        assert_eq!(hits[1].title, "Flavian dynasty");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let wikipedia = client(dead_end().await);

        let result = wikipedia.search("Colosseum").await;

        assert!(matches!(result, Err(ProviderError::Transport(_))));
    }
}
