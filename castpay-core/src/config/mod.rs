//! Configuration types for castpay.
//!
//! These types represent the validated runtime configuration, built once at
//! startup and shared read-only with every client and handler. The actual
//! config loading/parsing is handled by the server crate.

mod miniapp;
mod providers;
mod server;

pub use miniapp::{AccountAssociation, MiniAppConfig};
pub use providers::{ProviderEndpoint, ProvidersConfig};
pub use server::ServerConfig;

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server configuration (listen address, CORS).
    pub server: ServerConfig,
    /// Upstream provider endpoints and credentials.
    pub providers: ProvidersConfig,
    /// Mini-app identity and artwork used by the metadata emitters.
    pub miniapp: MiniAppConfig,
}
