//! Shared HTTP client plumbing.

use std::time::Duration;

use pathfinder_core::error::ProviderError;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

/// Builds the client every adapter shares.
///
/// # Errors
///
/// Returns `ProviderError::Transport` if the TLS backend cannot be
/// initialized.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("pathfinder/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProviderError::Transport(format!("failed to create HTTP client: {e}")))
}

/// Joins `segments` onto `base`, percent-encoding each one.
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<Url, ProviderError> {
    let mut url = Url::parse(base.trim_end_matches('/'))
        .map_err(|e| ProviderError::Transport(format!("invalid base URL '{base}': {e}")))?;
    url.path_segments_mut()
        .map_err(|()| ProviderError::Transport(format!("base URL '{base}' cannot take a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub(crate) fn transport(err: &reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Transport(format!("request timed out: {err}"))
    } else {
        ProviderError::Transport(err.to_string())
    }
}

/// Checks the status and decodes a JSON body.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ProviderError::NotFound);
    }
    if !status.is_success() {
        return Err(ProviderError::Status(status.as_u16()));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ProviderError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_segments() {
        let url = endpoint("https://en.wikipedia.org/", &["api", "rest_v1", "page", "summary", "AC/DC"])
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/AC%2FDC"
        );
    }

    #[test]
    fn test_endpoint_rejects_relative_base() {
        assert!(endpoint("not a url", &["x"]).is_err());
    }
}
