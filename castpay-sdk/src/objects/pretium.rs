//! Pretium on-ramp request and response types.

use serde::{Deserialize, Serialize};

/// A mobile-money network operating in a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileNetworkInfo {
    pub name: String,
}

/// Response of `GET /pretium/networks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworksResponse {
    pub country: String,
    pub networks: Vec<MobileNetworkInfo>,
}

/// Raw query of `GET /pretium/networks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworksQuery {
    pub country: Option<String>,
}

/// Raw body of `POST /pretium/onramp`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnrampBody {
    pub country: Option<String>,
    pub phone_number: Option<String>,
    pub amount: Option<serde_json::Value>,
    pub mobile_network: Option<String>,
    pub address: Option<String>,
    pub chain: Option<String>,
    pub asset: Option<String>,
}

/// Raw body of `POST /pretium/status`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBody {
    pub country: Option<String>,
    pub transaction_code: Option<String>,
}
