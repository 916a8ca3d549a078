//! `GET /deposit-rates`

use axum::{
    Json,
    extract::State,
    http::header::CACHE_CONTROL,
    response::IntoResponse,
};
use castpay_sdk::objects::rates::DepositRatesResponse;
use time::OffsetDateTime;

use crate::state::AppState;

/// Rates may be served up to 30s stale, and revalidated in the background
/// for another 5 minutes.
pub const DEPOSIT_RATES_CACHE_CONTROL: &str = "public, s-maxage=30, stale-while-revalidate=300";

pub(super) async fn deposit_rates(State(state): State<AppState>) -> impl IntoResponse {
    let data = state.rates.aggregate().await;
    tracing::debug!(count = data.len(), "Deposit rates aggregated");
    (
        [(CACHE_CONTROL, DEPOSIT_RATES_CACHE_CONTROL)],
        Json(DepositRatesResponse {
            status_code: 200,
            message: "Deposit rates fetched successfully".to_string(),
            data,
            updated_at: OffsetDateTime::now_utc(),
        }),
    )
}
