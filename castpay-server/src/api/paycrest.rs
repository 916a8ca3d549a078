//! Paycrest proxy endpoints.
//!
//! - `GET /institutions/{currency}` – payout institutions for a fiat
//! - `GET /rate`                    – rate quote for `token`/`amount`/`fiat`

use axum::{
    Json,
    extract::{Path, State},
};
use castpay_sdk::objects::paycrest::{Institution, RateQuery, RateQuoteResponse};
use rust_decimal::Decimal;

use super::error::{ApiError, ValidationError};
use super::extractors::{Schema, ValidatedQuery, optional, positive_decimal, required};
use crate::state::AppState;

pub(super) async fn institutions(
    State(state): State<AppState>,
    Path(currency): Path<String>,
) -> Result<Json<Vec<Institution>>, ApiError> {
    let currency = required(Some(currency), "currency")?.to_ascii_uppercase();
    let institutions = state.paycrest.institutions(&currency).await?;
    Ok(Json(institutions))
}

/// `GET /institutions` with no currency segment.
pub(super) async fn institutions_without_currency() -> ApiError {
    ValidationError::new("currency is required").into()
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateQuoteRequest {
    pub token: String,
    pub amount: Decimal,
    pub fiat: String,
    pub provider_id: Option<String>,
}

impl Schema for RateQuoteRequest {
    type Raw = RateQuery;

    fn parse(raw: Self::Raw) -> Result<Self, ValidationError> {
        Ok(Self {
            token: required(raw.token, "token")?.to_ascii_uppercase(),
            amount: positive_decimal(raw.amount.map(serde_json::Value::String), "amount")?,
            fiat: required(raw.fiat, "fiat")?.to_ascii_uppercase(),
            provider_id: optional(raw.provider_id),
        })
    }
}

pub(super) async fn rate(
    State(state): State<AppState>,
    ValidatedQuery(request): ValidatedQuery<RateQuoteRequest>,
) -> Result<Json<RateQuoteResponse>, ApiError> {
    let amount = request.amount.normalize().to_string();
    let rate = state
        .paycrest
        .rate_quote(
            &request.token,
            &amount,
            &request.fiat,
            request.provider_id.as_deref(),
        )
        .await?;
    Ok(Json(RateQuoteResponse {
        token: request.token,
        amount,
        fiat: request.fiat,
        rate,
    }))
}
