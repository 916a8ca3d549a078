//! TOML file configuration structures.
//!
//! These structs directly map to the `castpay-config.toml` file format.

use serde::Deserialize;
use std::net::SocketAddr;
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub providers: ProvidersConfig,
    pub miniapp: MiniAppConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
    /// Origins allowed by CORS. Empty allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
            allowed_origins: Vec::new(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// One upstream API.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub base_url: Url,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    /// Where Pretium reports on-ramp settlement.
    #[serde(default)]
    pub pretium_callback_url: Option<Url>,
    pub pretium: ProviderConfig,
    pub snaville: ProviderConfig,
    pub paycrest: ProviderConfig,
    pub merchant_api: ProviderConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountAssociationConfig {
    pub header: String,
    pub payload: String,
    pub signature: String,
}

/// Mini-app identity. Everything except `app_url` has a default.
#[derive(Debug, Clone, Deserialize)]
pub struct MiniAppConfig {
    pub app_url: Url,
    #[serde(default = "default_app_name")]
    pub name: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub tagline: Option<String>,
    pub button_title: Option<String>,
    pub primary_category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub icon_url: Option<String>,
    pub image_url: Option<String>,
    pub splash_image_url: Option<String>,
    pub splash_background_color: Option<String>,
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub account_association: AccountAssociationConfig,
}

fn default_app_name() -> String {
    "castpay".to_string()
}
