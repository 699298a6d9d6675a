//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use pathfinder_imagery::domain::availability::{DEFAULT_RADIUS_METERS, DEFAULT_TIMEOUT};
use pathfinder_providers::{geocoding, narration_webhook, speech, wikipedia};

use crate::error::AppError;

/// Per-request timeout for outbound calls, in seconds.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Knowledge base root.
    pub wikipedia_base_url: String,
    /// Key for geocoding and street view.
    pub google_maps_api_key: Option<String>,
    /// Google Maps Platform root.
    pub google_maps_base_url: String,
    /// Narration webhook.
    pub narration_webhook_url: String,
    /// Key for speech synthesis; absent disables synthesis.
    pub google_tts_api_key: Option<String>,
    /// Text-to-Speech root.
    pub google_tts_base_url: String,
    /// Timeout for every outbound call.
    pub http_timeout: Duration,
    /// Bound on panorama readiness.
    pub panorama_timeout: Duration,
    /// Panorama search radius.
    pub panorama_radius_meters: u32,
    /// Catalog override; the embedded catalog is used otherwise.
    pub tour_catalog_path: Option<PathBuf>,
    /// OTLP collector; span export is off when absent.
    pub otlp_endpoint: Option<String>,
}

impl AppConfig {
    /// Reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a numeric variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_owned());

        let timeout_ms = u64::try_from(DEFAULT_TIMEOUT.as_millis()).unwrap_or(u64::MAX);

        Ok(Self {
            host: or("HOST", "0.0.0.0"),
            port: parse(var("PORT"), "PORT", 3000)?,
            wikipedia_base_url: or("WIKIPEDIA_BASE_URL", wikipedia::DEFAULT_BASE_URL),
            google_maps_api_key: var("GOOGLE_MAPS_API_KEY"),
            google_maps_base_url: or("GOOGLE_MAPS_BASE_URL", geocoding::DEFAULT_BASE_URL),
            narration_webhook_url: or(
                "NARRATION_WEBHOOK_URL",
                narration_webhook::DEFAULT_WEBHOOK_URL,
            ),
            google_tts_api_key: var("GOOGLE_TTS_API_KEY"),
            google_tts_base_url: or("GOOGLE_TTS_BASE_URL", speech::DEFAULT_BASE_URL),
            http_timeout: Duration::from_secs(parse(
                var("HTTP_TIMEOUT_SECS"),
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
            panorama_timeout: Duration::from_millis(parse(
                var("PANORAMA_TIMEOUT_MS"),
                "PANORAMA_TIMEOUT_MS",
                timeout_ms,
            )?),
            panorama_radius_meters: parse(
                var("PANORAMA_RADIUS_METERS"),
                "PANORAMA_RADIUS_METERS",
                DEFAULT_RADIUS_METERS,
            )?,
            tour_catalog_path: var("TOUR_CATALOG_PATH").map(PathBuf::from),
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    /// The socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if host and port do not form an address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse<T>(value: Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be a valid number: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.wikipedia_base_url, "https://en.wikipedia.org");
        assert_eq!(
            config.narration_webhook_url,
            "https://workflowly.online/webhook/pathfinder-narration"
        );
        assert_eq!(config.http_timeout, Duration::from_secs(15));
        assert_eq!(config.panorama_timeout, Duration::from_millis(5000));
        assert_eq!(config.panorama_radius_meters, 100);
        assert!(config.google_tts_api_key.is_none());
        assert!(config.tour_catalog_path.is_none());
    }

    #[test]
    fn test_empty_key_counts_as_unset() {
        let config = config_from(&[("GOOGLE_MAPS_API_KEY", "  ")]).unwrap();

        assert!(config.google_maps_api_key.is_none());
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let result = config_from(&[("PORT", "eighty")]);

        assert!(matches!(result, Err(AppError::Config(message)) if message.contains("PORT")));
    }

    #[test]
    fn test_overrides_are_read() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("HTTP_TIMEOUT_SECS", "3"),
            ("GOOGLE_TTS_API_KEY", "tts-key"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr().unwrap().port(), 8080);
        assert_eq!(config.http_timeout, Duration::from_secs(3));
        assert_eq!(config.google_tts_api_key.as_deref(), Some("tts-key"));
    }
}
