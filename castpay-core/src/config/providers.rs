//! Upstream provider configuration.

use std::time::Duration;
use url::Url;

/// Where and how to reach one upstream HTTP API.
#[derive(Debug, Clone)]
pub struct ProviderEndpoint {
    /// Root URL; endpoint paths are appended to it.
    pub base_url: Url,
    /// Sent in the provider's API key header when present.
    pub api_key: Option<String>,
    /// Per-request timeout. `None` leaves the HTTP client default.
    pub timeout: Option<Duration>,
}

impl ProviderEndpoint {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: None,
            timeout: None,
        }
    }

    /// Build a `reqwest::Client` honoring the configured timeout.
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

/// Every upstream the service talks to.
#[derive(Debug, Clone)]
pub struct ProvidersConfig {
    /// Pretium: exchange rates, mobile-money on-ramp and status lookups.
    pub pretium: ProviderEndpoint,
    /// Callback URL Pretium notifies when an on-ramp settles.
    pub pretium_callback_url: Option<Url>,
    /// Snaville: TZS deposit rates.
    pub snaville: ProviderEndpoint,
    /// Paycrest aggregator: institutions and rate quotes.
    pub paycrest: ProviderEndpoint,
    /// Merchant transactions API backing merchant history and stats.
    pub merchant_api: ProviderEndpoint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_with_timeout() {
        let mut endpoint = ProviderEndpoint::new(Url::parse("https://api.example.com").unwrap());
        endpoint.timeout = Some(Duration::from_secs(5));
        assert!(endpoint.http_client().is_ok());
    }
}
