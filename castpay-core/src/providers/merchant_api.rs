//! Client for the upstream merchant transactions API.

use super::{ProviderError, endpoint_url, parse_response};
use crate::config::ProviderEndpoint;
use serde::Deserialize;
use url::Url;

const API_KEY_HEADER: &str = "x-api-key";

/// The upstream returns either a bare list or a wrapped one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TransactionsPayload {
    List(Vec<serde_json::Value>),
    Wrapped {
        #[serde(alias = "transactions")]
        data: Vec<serde_json::Value>,
    },
}

impl From<TransactionsPayload> for Vec<serde_json::Value> {
    fn from(payload: TransactionsPayload) -> Self {
        match payload {
            TransactionsPayload::List(list) => list,
            TransactionsPayload::Wrapped { data } => data,
        }
    }
}

/// Typed HTTP client for the merchant transactions API.
#[derive(Debug, Clone)]
pub struct MerchantApiClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl MerchantApiClient {
    pub fn new(endpoint: &ProviderEndpoint) -> Result<Self, ProviderError> {
        Ok(Self {
            http: endpoint.http_client()?,
            base_url: endpoint.base_url.clone(),
            api_key: endpoint.api_key.clone(),
        })
    }

    /// `GET /transactions?merchantId=..`. Transactions are returned as raw
    /// JSON objects.
    pub async fn transactions(
        &self,
        merchant_id: &str,
    ) -> Result<Vec<serde_json::Value>, ProviderError> {
        let mut url = endpoint_url(&self.base_url, &["transactions"])?;
        url.query_pairs_mut().append_pair("merchantId", merchant_id);
        let mut request = self.http.get(url);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        let resp = request.send().await?;
        let payload: TransactionsPayload = parse_response(resp).await?;
        Ok(payload.into())
    }
}
