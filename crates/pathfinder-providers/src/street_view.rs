//! Street View metadata adapter.
//!
//! Only availability is checked here; the front end renders the panorama
//! itself from the returned id.

use async_trait::async_trait;
use pathfinder_core::error::ProviderError;
use pathfinder_core::location::Coordinates;
use pathfinder_core::provider::{ImageryProvider, Panorama};
use serde::Deserialize;
use tracing::debug;

use crate::client::{decode_json, endpoint, transport};

/// Street View imagery lookups.
#[derive(Debug, Clone)]
pub struct StreetViewImagery {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl StreetViewImagery {
    /// Creates a provider. Without a key every lookup reports
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
struct MetadataResponse {
    status: String,
    #[serde(default)]
    pano_id: Option<String>,
    #[serde(default)]
    location: Option<MetadataLocation>,
}

#[derive(Debug, Deserialize)]
struct MetadataLocation {
    lat: f64,
    lng: f64,
}

#[async_trait]
impl ImageryProvider for StreetViewImagery {
    async fn ready(&self) -> Result<(), ProviderError> {
        if self.api_key.is_none() {
            return Err(ProviderError::NotConfigured("GOOGLE_MAPS_API_KEY"));
        }
        Ok(())
    }

    async fn panorama(
        &self,
        at: Coordinates,
        radius_meters: u32,
    ) -> Result<Panorama, ProviderError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(ProviderError::NotConfigured("GOOGLE_MAPS_API_KEY"));
        };
        let url = endpoint(&self.base_url, &["maps", "api", "streetview", "metadata"])?;
        let location = format!("{},{}", at.lat, at.lng);
        let radius = radius_meters.to_string();

        let response = self
            .client
            .get(url)
            .query(&[("location", location.as_str()), ("radius", radius.as_str()), ("key", key)])
            .send()
            .await
            .map_err(|e| transport(&e))?;
        let metadata: MetadataResponse = decode_json(response).await?;

        debug!(status = %metadata.status, %location, "street view metadata");
        match metadata {
            MetadataResponse {
                status,
                pano_id: Some(pano_id),
                location: Some(position),
            } if status == "OK" => Ok(Panorama {
                pano_id,
                position: Coordinates::new(position.lat, position.lng),
            }),
            MetadataResponse { status, .. } if status == "OK" => Err(ProviderError::Decode(
                "OK metadata without pano_id or location".to_owned(),
            )),
            MetadataResponse { status, .. } => Err(ProviderError::Rejected(status)),
        }
    }
}
