//! `GET /geolocation`: the caller's country as seen by the edge network.

use axum::{Json, http::HeaderMap};
use castpay_sdk::objects::GeolocationResponse;

/// Checked in order; the first valid value wins.
const COUNTRY_HEADERS: [&str; 2] = ["x-vercel-ip-country", "cf-ipcountry"];
const DEFAULT_COUNTRY: &str = "NG";

pub fn country_from_headers(headers: &HeaderMap) -> String {
    COUNTRY_HEADERS
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .find(|code| code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_ascii_uppercase)
        .unwrap_or_else(|| DEFAULT_COUNTRY.to_string())
}

pub(super) async fn geolocation(headers: HeaderMap) -> Json<GeolocationResponse> {
    Json(GeolocationResponse {
        country: country_from_headers(&headers),
    })
}
