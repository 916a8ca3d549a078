//! Pretium client.
//!
//! Pretium wraps every response in `{code, message, data}`. Endpoints used:
//!
//! - `POST /v1/exchange-rate`       – buy/sell/quoted rate for a fiat
//! - `POST /v1/onramp/{currency}`   – collect mobile money, release stablecoin
//! - `POST /v1/status/{currency}`   – status of an on-ramp by transaction code

use super::{ProviderError, endpoint_url, lenient_f64, parse_response};
use crate::config::ProviderEndpoint;
use crate::rates::PretiumRateApi;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

const API_KEY_HEADER: &str = "x-api-key";

/// Exchange rate block returned by Pretium. Any field may be missing or
/// unusable; callers decide which one to trust.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PretiumExchangeRate {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quoted_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub buying_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub selling_rate: Option<f64>,
}

/// Body forwarded to Pretium's on-ramp endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PretiumOnrampRequest {
    /// Payer phone number.
    pub shortcode: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub mobile_network: String,
    pub chain: String,
    pub asset: String,
    /// Wallet receiving the stablecoin.
    pub address: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub fee: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PretiumEnvelope<T> {
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

impl<T> PretiumEnvelope<T> {
    fn into_data(self) -> Result<T, ProviderError> {
        self.data.ok_or_else(|| ProviderError::Rejected {
            message: self
                .message
                .unwrap_or_else(|| "response carried no data".to_string()),
        })
    }
}

/// Typed HTTP client for the Pretium API.
#[derive(Debug, Clone)]
pub struct PretiumClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
    callback_url: Option<Url>,
}

impl PretiumClient {
    pub fn new(
        endpoint: &ProviderEndpoint,
        callback_url: Option<Url>,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            http: endpoint.http_client()?,
            base_url: endpoint.base_url.clone(),
            api_key: endpoint.api_key.clone(),
            callback_url,
        })
    }

    /// Callback URL to attach to on-ramp requests, if configured.
    pub fn callback_url(&self) -> Option<&Url> {
        self.callback_url.as_ref()
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<serde_json::Value, ProviderError> {
        let url = endpoint_url(&self.base_url, segments)?;
        let mut request = self.http.post(url).json(body);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        let resp = request.send().await?;
        parse_response(resp).await
    }

    /// `POST /v1/exchange-rate` for one fiat currency.
    pub async fn exchange_rate(&self, currency: &str) -> Result<PretiumExchangeRate, ProviderError> {
        let body = serde_json::json!({ "currency_code": currency });
        let value = self.post(&["v1", "exchange-rate"], &body).await?;
        let envelope: PretiumEnvelope<PretiumExchangeRate> = serde_json::from_value(value)?;
        envelope.into_data()
    }

    /// `POST /v1/onramp/{currency}`. The provider's response is passed
    /// through untouched.
    pub async fn onramp(
        &self,
        currency: &str,
        request: &PretiumOnrampRequest,
    ) -> Result<serde_json::Value, ProviderError> {
        self.post(&["v1", "onramp", currency], request).await
    }

    /// `POST /v1/status/{currency}`. The provider's response is passed
    /// through untouched.
    pub async fn status(
        &self,
        currency: &str,
        transaction_code: &str,
    ) -> Result<serde_json::Value, ProviderError> {
        let body = serde_json::json!({ "transaction_code": transaction_code });
        self.post(&["v1", "status", currency], &body).await
    }
}

#[async_trait]
impl PretiumRateApi for PretiumClient {
    async fn exchange_rate(&self, currency: &str) -> Result<PretiumExchangeRate, ProviderError> {
        PretiumClient::exchange_rate(self, currency).await
    }
}
