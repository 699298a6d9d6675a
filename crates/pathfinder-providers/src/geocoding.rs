//! Google Geocoding adapter.

use async_trait::async_trait;
use pathfinder_core::error::ProviderError;
use pathfinder_core::location::{Coordinates, GeocodeRecord};
use pathfinder_core::provider::Geocoder;
use serde::Deserialize;
use tracing::debug;

use crate::client::{decode_json, endpoint, transport};

/// Google Maps Platform root.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Geocoding over the Google Maps HTTP API.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleGeocoder {
    /// Creates a geocoder. Without a key every lookup reports
    /// `NotConfigured`.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, query: &str) -> Result<GeocodeRecord, ProviderError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(ProviderError::NotConfigured("GOOGLE_MAPS_API_KEY"));
        };
        let url = endpoint(&self.base_url, &["maps", "api", "geocode", "json"])?;

        let response = self
            .client
            .get(url)
            .query(&[("address", query), ("key", key)])
            .send()
            .await
            .map_err(|e| transport(&e))?;
        let body: GeocodeResponse = decode_json(response).await?;

        if body.status != "OK" {
            debug!(
                query,
                status = %body.status,
                error_message = body.error_message.as_deref().unwrap_or(""),
                "geocoder rejected query"
            );
            return Err(ProviderError::Rejected(body.status));
        }
        let Some(first) = body.results.into_iter().next() else {
            return Err(ProviderError::NotFound);
        };
        Ok(GeocodeRecord {
            coordinates: Coordinates::new(first.geometry.location.lat, first.geometry.location.lng),
            formatted_name: first.formatted_address,
        })
    }
}
