//! Paycrest aggregator client.
//!
//! Paycrest wraps responses in `{status, message, data}`:
//!
//! - `GET /institutions/{currency}`               – payout institutions
//! - `GET /rates/{token}/{amount}/{fiat}`         – rate quote, optionally
//!   pinned to one liquidity provider via `provider_id`

use super::{ProviderError, endpoint_url, parse_response};
use crate::config::ProviderEndpoint;
use castpay_sdk::objects::paycrest::Institution;
use serde::Deserialize;
use url::Url;

const API_KEY_HEADER: &str = "API-Key";

#[derive(Debug, Deserialize)]
struct PaycrestEnvelope<T> {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

impl<T> PaycrestEnvelope<T> {
    fn into_data(self) -> Result<T, ProviderError> {
        if let Some(status) = &self.status
            && !status.eq_ignore_ascii_case("success")
        {
            return Err(ProviderError::Rejected {
                message: self.message.unwrap_or_else(|| status.clone()),
            });
        }
        self.data.ok_or_else(|| ProviderError::Rejected {
            message: self
                .message
                .unwrap_or_else(|| "response carried no data".to_string()),
        })
    }
}

/// Typed HTTP client for the Paycrest aggregator API.
#[derive(Debug, Clone)]
pub struct PaycrestClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl PaycrestClient {
    pub fn new(endpoint: &ProviderEndpoint) -> Result<Self, ProviderError> {
        Ok(Self {
            http: endpoint.http_client()?,
            base_url: endpoint.base_url.clone(),
            api_key: endpoint.api_key.clone(),
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<T, ProviderError> {
        let mut request = self.http.get(url);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        let resp = request.send().await?;
        let envelope: PaycrestEnvelope<T> = parse_response(resp).await?;
        envelope.into_data()
    }

    /// `GET /institutions/{currency}`.
    pub async fn institutions(&self, currency: &str) -> Result<Vec<Institution>, ProviderError> {
        let url = endpoint_url(&self.base_url, &["institutions", currency])?;
        self.get(url).await
    }

    /// `GET /rates/{token}/{amount}/{fiat}`. Returns the quoted rate as
    /// text, exactly as the aggregator formats it.
    pub async fn rate_quote(
        &self,
        token: &str,
        amount: &str,
        fiat: &str,
        provider_id: Option<&str>,
    ) -> Result<String, ProviderError> {
        let mut url = endpoint_url(&self.base_url, &["rates", token, amount, fiat])?;
        if let Some(provider_id) = provider_id {
            url.query_pairs_mut().append_pair("provider_id", provider_id);
        }
        let rate: serde_json::Value = self.get(url).await?;
        match rate {
            serde_json::Value::String(s) => Ok(s),
            serde_json::Value::Number(n) => Ok(n.to_string()),
            other => Err(ProviderError::Rejected {
                message: format!("unexpected rate payload: {other}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::testing::{endpoint, serve};
    use axum::{
        Json, Router,
        extract::{Path, Query},
        http::HeaderMap,
        routing::get,
    };
    use serde_json::{Value, json};
    use std::collections::HashMap;

    async fn rate(
        Path((token, amount, fiat)): Path<(String, String, String)>,
        Query(query): Query<HashMap<String, String>>,
        headers: HeaderMap,
    ) -> Json<Value> {
        let authorized = headers
            .get(API_KEY_HEADER)
            .is_some_and(|v| v == "paycrest-key");
        if !authorized {
            return Json(json!({"status": "error", "message": "invalid API key"}));
        }
        let quoted = if query.contains_key("provider_id") {
            "1521.75"
        } else {
            "1520.5"
        };
        match (token.as_str(), amount.as_str(), fiat.as_str()) {
            ("USDC", "100", "NGN") => Json(json!({
                "status": "success",
                "message": "Rate fetched",
                "data": quoted,
            })),
            _ => Json(json!({"status": "error", "message": "Rate not available"})),
        }
    }

    #[test]
    fn test_institutions_envelope() {
        let json = r#"{
            "status": "success",
            "message": "OK",
            "data": [{"name": "Access Bank", "code": "ABNGNGLA", "type": "bank"}]
        }"#;
        let envelope: PaycrestEnvelope<Vec<Institution>> = serde_json::from_str(json).unwrap();
        let institutions = envelope.into_data().unwrap();
        assert_eq!(institutions.len(), 1);
        assert_eq!(institutions[0].kind, "bank");
    }

    #[test]
    fn test_error_status_is_rejected() {
        let json = r#"{"status": "error", "message": "Rate not available", "data": null}"#;
        let envelope: PaycrestEnvelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(matches!(
            envelope.into_data(),
            Err(ProviderError::Rejected { message }) if message == "Rate not available"
        ));
    }

    #[tokio::test]
    async fn test_rate_quote_over_http() {
        let upstream = Router::new().route("/rates/{token}/{amount}/{fiat}", get(rate));
        let base = serve(upstream).await;
        let client = PaycrestClient::new(&endpoint(base.clone(), "paycrest-key")).unwrap();

        assert_eq!(client.rate_quote("USDC", "100", "NGN", None).await.unwrap(), "1520.5");
        assert_eq!(
            client
                .rate_quote("USDC", "100", "NGN", Some("lp-1"))
                .await
                .unwrap(),
            "1521.75"
        );
        assert!(matches!(
            client.rate_quote("USDC", "100", "KES", None).await,
            Err(ProviderError::Rejected { message }) if message == "Rate not available"
        ));

        let unauthorized = PaycrestClient::new(&endpoint(base, "wrong")).unwrap();
        assert!(matches!(
            unauthorized.rate_quote("USDC", "100", "NGN", None).await,
            Err(ProviderError::Rejected { message }) if message == "invalid API key"
        ));
    }
}
