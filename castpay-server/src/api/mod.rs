//! HTTP API.
//!
//! # Endpoints
//!
//! - `GET  /deposit-rates`                – aggregated deposit rates
//! - `GET  /geolocation`                  – caller's country
//! - `GET  /manifest`, `/.well-known/farcaster.json` – mini-app manifest
//! - `GET  /institutions/{currency}`      – Paycrest payout institutions
//! - `GET  /rate`                         – Paycrest rate quote
//! - `GET  /pretium/networks`             – mobile-money networks
//! - `POST /pretium/onramp`               – start a mobile-money on-ramp
//! - `POST /pretium/status`               – on-ramp status
//! - `GET|POST|PUT /transactions`         – transaction records
//! - `GET  /share`, `/pay/share`          – share pages

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod error;
pub mod extractors;
mod geolocation;
mod manifest;
mod paycrest;
mod pretium;
mod rates;
mod share;
mod transactions;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/deposit-rates", get(rates::deposit_rates))
        .route("/geolocation", get(geolocation::geolocation))
        .route("/manifest", get(manifest::manifest))
        .route("/.well-known/farcaster.json", get(manifest::manifest))
        .route("/institutions", get(paycrest::institutions_without_currency))
        .route("/institutions/", get(paycrest::institutions_without_currency))
        .route("/institutions/{currency}", get(paycrest::institutions))
        .route("/rate", get(paycrest::rate))
        .route("/pretium/networks", get(pretium::networks))
        .route("/pretium/onramp", post(pretium::onramp))
        .route("/pretium/status", post(pretium::status))
        .route(
            "/transactions",
            get(transactions::get_transactions)
                .post(transactions::create_transaction)
                .put(transactions::update_transaction),
        )
        .route("/share", get(share::share))
        .route("/pay/share", get(share::pay_share))
}
