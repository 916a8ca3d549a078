//! Paycrest aggregator types: payout institutions and rate quotes.

use serde::{Deserialize, Serialize};

/// A bank or mobile-money institution Paycrest can pay out to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Raw query of `GET /rate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuery {
    pub token: Option<String>,
    pub amount: Option<String>,
    pub fiat: Option<String>,
    pub provider_id: Option<String>,
}

/// Response of `GET /rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuoteResponse {
    pub token: String,
    pub amount: String,
    pub fiat: String,
    pub rate: String,
}
