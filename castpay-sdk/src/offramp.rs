//! Country → off-ramp provider routing.
//!
//! The routing is an explicit table: a country listed in [`OFFRAMP_ROUTES`]
//! goes to the provider next to it, every other country goes to
//! [`DEFAULT_OFFRAMP_PROVIDER`]. Adding a corridor means adding a row here.

use serde::{Deserialize, Serialize};

/// Off-ramp provider a withdrawal is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfframpProvider {
    /// Mobile-money payouts through Pretium.
    Pretium,
    /// Bank and mobile-money payouts through the Paycrest aggregator.
    Paycrest,
}

/// Countries with a dedicated off-ramp provider.
pub const OFFRAMP_ROUTES: &[(&str, OfframpProvider)] = &[
    ("KE", OfframpProvider::Pretium),
    ("GH", OfframpProvider::Pretium),
    ("UG", OfframpProvider::Pretium),
];

/// Provider for countries without a dedicated route.
pub const DEFAULT_OFFRAMP_PROVIDER: OfframpProvider = OfframpProvider::Paycrest;

/// Resolve the off-ramp provider for a country code (case-insensitive).
pub fn offramp_provider_for(country_code: &str) -> OfframpProvider {
    let code = country_code.trim();
    OFFRAMP_ROUTES
        .iter()
        .find(|(routed, _)| routed.eq_ignore_ascii_case(code))
        .map(|(_, provider)| *provider)
        .unwrap_or(DEFAULT_OFFRAMP_PROVIDER)
}
