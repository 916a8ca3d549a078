pub mod countries;
pub mod paycrest;
pub mod pretium;
pub mod rates;
pub mod transactions;

use serde::{Deserialize, Serialize};

/// Response of `GET /geolocation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeolocationResponse {
    pub country: String,
}

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
