//! Pretium mobile-money endpoints.
//!
//! - `GET  /pretium/networks` – networks available in a country
//! - `POST /pretium/onramp`   – start a mobile-money to stablecoin on-ramp
//! - `POST /pretium/status`   – look up an on-ramp by transaction code

use axum::{Json, extract::State};
use castpay_core::mobile_networks::{networks_for, normalize_network, service_fee};
use castpay_core::providers::pretium::PretiumOnrampRequest;
use castpay_sdk::objects::countries::Country;
use castpay_sdk::objects::pretium::{
    MobileNetworkInfo, NetworksQuery, NetworksResponse, OnrampBody, StatusBody,
};
use rust_decimal::Decimal;

use super::error::{ApiError, ValidationError};
use super::extractors::{Schema, ValidatedJson, ValidatedQuery, optional, positive_decimal, required};
use crate::state::AppState;

const DEFAULT_CHAIN: &str = "BASE";
const DEFAULT_ASSET: &str = "USDC";

/// A country Pretium operates in.
fn pretium_country(value: Option<String>) -> Result<Country, ValidationError> {
    let code = required(value, "country")?;
    Country::by_code(&code)
        .filter(|c| !networks_for(c.code).is_empty())
        .ok_or_else(|| ValidationError::new(format!("country {code} is not supported")))
}

pub struct NetworksRequest {
    pub country: String,
}

impl Schema for NetworksRequest {
    type Raw = NetworksQuery;

    fn parse(raw: Self::Raw) -> Result<Self, ValidationError> {
        Ok(Self {
            country: required(raw.country, "country")?.to_ascii_uppercase(),
        })
    }
}

pub(super) async fn networks(
    ValidatedQuery(request): ValidatedQuery<NetworksRequest>,
) -> Json<NetworksResponse> {
    let networks = networks_for(&request.country)
        .iter()
        .map(|n| MobileNetworkInfo {
            name: n.name.to_string(),
        })
        .collect();
    Json(NetworksResponse {
        country: request.country,
        networks,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct OnrampRequest {
    pub country: Country,
    pub phone_number: String,
    pub amount: Decimal,
    /// Canonical network name.
    pub mobile_network: &'static str,
    pub address: String,
    pub chain: String,
    pub asset: String,
}

impl Schema for OnrampRequest {
    type Raw = OnrampBody;

    fn parse(raw: Self::Raw) -> Result<Self, ValidationError> {
        let country = pretium_country(raw.country)?;
        let phone_number = required(raw.phone_number, "phoneNumber")?;
        let amount = positive_decimal(raw.amount, "amount")?;
        let network = required(raw.mobile_network, "mobileNetwork")?;
        let mobile_network = normalize_network(country.code, &network).ok_or_else(|| {
            ValidationError::new(format!(
                "mobile network {network} is not available in {}",
                country.name
            ))
        })?;
        let address = required(raw.address, "address")?;
        Ok(Self {
            country,
            phone_number,
            amount,
            mobile_network,
            address,
            chain: optional(raw.chain)
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or_else(|| DEFAULT_CHAIN.to_string()),
            asset: optional(raw.asset)
                .map(|a| a.to_ascii_uppercase())
                .unwrap_or_else(|| DEFAULT_ASSET.to_string()),
        })
    }
}

impl OnrampRequest {
    fn into_upstream(self, callback_url: Option<String>) -> PretiumOnrampRequest {
        PretiumOnrampRequest {
            shortcode: self.phone_number,
            fee: service_fee(self.amount),
            amount: self.amount,
            mobile_network: self.mobile_network.to_string(),
            chain: self.chain,
            asset: self.asset,
            address: self.address,
            callback_url,
        }
    }
}

pub(super) async fn onramp(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<OnrampRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let currency = request.country.currency;
    let callback_url = state.pretium.callback_url().map(|u| u.to_string());
    let upstream = request.into_upstream(callback_url);
    tracing::info!(
        currency,
        amount = %upstream.amount,
        fee = %upstream.fee,
        network = %upstream.mobile_network,
        "Forwarding on-ramp to Pretium"
    );
    let response = state.pretium.onramp(currency, &upstream).await?;
    Ok(Json(response))
}

pub struct StatusRequest {
    pub country: Country,
    pub transaction_code: String,
}

impl Schema for StatusRequest {
    type Raw = StatusBody;

    fn parse(raw: Self::Raw) -> Result<Self, ValidationError> {
        Ok(Self {
            country: pretium_country(raw.country)?,
            transaction_code: required(raw.transaction_code, "transactionCode")?,
        })
    }
}

pub(super) async fn status(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<StatusRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let response = state
        .pretium
        .status(request.country.currency, &request.transaction_code)
        .await?;
    Ok(Json(response))
}
