//! Deposit-rate types returned by `GET /deposit-rates`.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Upstream provider a deposit rate was sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateProvider {
    Pretium,
    Snaville,
}

/// One normalized buy rate for a (fiat, asset) pair.
///
/// `rate` is always positive and finite. `sell_rate` is only present when
/// the provider reported a positive, finite sell rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRateItem {
    pub provider: RateProvider,
    pub fiat: String,
    pub country_code: String,
    pub asset: String,
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_rate: Option<f64>,
    pub flag_url: String,
}

/// Envelope of the deposit-rates endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRatesResponse {
    pub status_code: u16,
    pub message: String,
    pub data: Vec<DepositRateItem>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
