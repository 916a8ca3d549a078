//! HTTP clients for the upstream providers.
//!
//! None of these clients retry. A failure is returned to the caller, which
//! either drops the affected entry (rate aggregation) or reports an upstream
//! error (proxy endpoints).

pub mod merchant_api;
pub mod paycrest;
pub mod pretium;
pub mod snaville;

pub use merchant_api::MerchantApiClient;
pub use paycrest::PaycrestClient;
pub use pretium::PretiumClient;
pub use snaville::SnavilleClient;

pub use reqwest::StatusCode;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use url::Url;

/// Errors produced by the provider clients.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (DNS, TLS, connection reset, timeout, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The provider answered 2xx but reported a failure in the body.
    #[error("provider rejected the request: {message}")]
    Rejected { message: String },

    /// The configured base URL cannot carry a path.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(Url),
}

/// Append path segments to a base URL, percent-encoding each segment.
pub(crate) fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url, ProviderError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ProviderError::InvalidBaseUrl(base.clone()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Check the status code and deserialize a JSON body.
pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ProviderError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ProviderError::Decode)
}

/// `Some(value)` when the value is positive and finite.
pub fn positive_finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Deserialize a number that may arrive as a JSON number or a numeric
/// string. Anything else (null, garbage text, objects) becomes `None`.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// A throwaway upstream for exercising the clients over real HTTP.
#[cfg(test)]
pub(crate) mod testing {
    use crate::config::ProviderEndpoint;
    use std::time::Duration;
    use url::Url;

    /// Serve `router` on an ephemeral local port and return its base URL.
    pub(crate) async fn serve(router: axum::Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{addr}")).unwrap()
    }

    pub(crate) fn endpoint(base_url: Url, api_key: &str) -> ProviderEndpoint {
        ProviderEndpoint {
            base_url,
            api_key: Some(api_key.to_string()),
            timeout: Some(Duration::from_secs(5)),
        }
    }
}
