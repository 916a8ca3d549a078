//! Snaville client: deposit rates for the Tanzanian shilling corridor.

use super::{ProviderError, endpoint_url, lenient_f64, parse_response};
use crate::config::ProviderEndpoint;
use crate::rates::SnavilleRateApi;
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

const API_KEY_HEADER: &str = "x-api-key";

/// Buy/sell rate pair as reported by Snaville.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SnavilleRate {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub buy_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sell_rate: Option<f64>,
}

/// Typed HTTP client for the Snaville rate API.
#[derive(Debug, Clone)]
pub struct SnavilleClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl SnavilleClient {
    pub fn new(endpoint: &ProviderEndpoint) -> Result<Self, ProviderError> {
        Ok(Self {
            http: endpoint.http_client()?,
            base_url: endpoint.base_url.clone(),
            api_key: endpoint.api_key.clone(),
        })
    }

    /// `GET /v1/rates/{currency}`.
    pub async fn rate(&self, currency: &str) -> Result<SnavilleRate, ProviderError> {
        let url = endpoint_url(&self.base_url, &["v1", "rates", currency])?;
        let mut request = self.http.get(url);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        let resp = request.send().await?;
        parse_response(resp).await
    }
}

#[async_trait]
impl SnavilleRateApi for SnavilleClient {
    async fn rate(&self, currency: &str) -> Result<SnavilleRate, ProviderError> {
        SnavilleClient::rate(self, currency).await
    }
}
