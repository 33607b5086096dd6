//! Outbound HTTP between the two services.

use std::time::Duration;

use reqwest::{Client, Url};
use thiserror::Error;

/// Failure talking to the other service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection failure, timeout, or a body that did not decode.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid service url {0}")]
    InvalidUrl(String),
}

/// Build the client used for cross-service calls.
///
/// `timeout` bounds both connecting and the whole request.
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
}

/// Append path segments to a service base URL, percent-encoding each one.
pub fn endpoint(base: &str, segments: &[&str]) -> Result<Url, UpstreamError> {
    let mut url = Url::parse(base).map_err(|_| UpstreamError::InvalidUrl(base.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| UpstreamError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
