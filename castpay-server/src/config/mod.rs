//! Configuration module for castpay-server.
//!
//! Handles loading configuration from the TOML file, CLI arguments and
//! environment variables into the validated [`AppConfig`].

pub mod file;

use crate::config::file::{FileConfig, ProviderConfig};
use castpay_core::config::{
    AccountAssociation, AppConfig, MiniAppConfig, ProviderEndpoint, ProvidersConfig,
    ServerConfig,
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,
}

const PRETIUM_API_KEY: &str = "PRETIUM_API_KEY";
const SNAVILLE_API_KEY: &str = "SNAVILLE_API_KEY";
const PAYCREST_API_KEY: &str = "PAYCREST_API_KEY";
const MERCHANT_API_KEY: &str = "MERCHANT_API_KEY";

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Read the file, apply CLI and environment overrides, validate.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        self.load_str(&config_content, |key| std::env::var(key).ok())
    }

    fn load_str(
        &self,
        content: &str,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<AppConfig, ConfigError> {
        let mut file_config: FileConfig = toml::from_str(content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }
        apply_env_overrides(&mut file_config, env);
        validate(&file_config)?;

        Ok(build_app_config(file_config))
    }
}

fn apply_env_overrides(config: &mut FileConfig, env: impl Fn(&str) -> Option<String>) {
    let providers = &mut config.providers;
    for (key, provider) in [
        (PRETIUM_API_KEY, &mut providers.pretium),
        (SNAVILLE_API_KEY, &mut providers.snaville),
        (PAYCREST_API_KEY, &mut providers.paycrest),
        (MERCHANT_API_KEY, &mut providers.merchant_api),
    ] {
        if let Some(value) = env(key).filter(|v| !v.trim().is_empty()) {
            tracing::debug!(key, "API key taken from environment");
            provider.api_key = Some(value);
        }
    }
}

fn require_http(name: &str, url: &Url) -> Result<(), ConfigError> {
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(()),
        _ => Err(ConfigError::ValidationError(format!(
            "{name} must be an http(s) URL, got {url}"
        ))),
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    let providers = &config.providers;
    require_http("providers.pretium.base_url", &providers.pretium.base_url)?;
    require_http("providers.snaville.base_url", &providers.snaville.base_url)?;
    require_http("providers.paycrest.base_url", &providers.paycrest.base_url)?;
    require_http(
        "providers.merchant_api.base_url",
        &providers.merchant_api.base_url,
    )?;
    if let Some(callback) = &providers.pretium_callback_url {
        require_http("providers.pretium_callback_url", callback)?;
    }
    require_http("miniapp.app_url", &config.miniapp.app_url)?;
    if config.miniapp.name.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "miniapp.name must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn convert_provider(p: ProviderConfig) -> ProviderEndpoint {
    ProviderEndpoint {
        base_url: p.base_url,
        api_key: p.api_key,
        timeout: p.timeout_secs.map(Duration::from_secs),
    }
}

fn build_app_config(file_config: FileConfig) -> AppConfig {
    let FileConfig {
        server,
        providers,
        miniapp: m,
    } = file_config;

    let mut miniapp = MiniAppConfig::with_defaults(m.app_url, m.name);
    let overrides = [
        (m.subtitle, &mut miniapp.subtitle),
        (m.description, &mut miniapp.description),
        (m.tagline, &mut miniapp.tagline),
        (m.button_title, &mut miniapp.button_title),
        (m.primary_category, &mut miniapp.primary_category),
        (m.icon_url, &mut miniapp.icon_url),
        (m.image_url, &mut miniapp.image_url),
        (m.splash_image_url, &mut miniapp.splash_image_url),
        (m.splash_background_color, &mut miniapp.splash_background_color),
        (m.webhook_url, &mut miniapp.webhook_url),
    ];
    for (value, slot) in overrides {
        if let Some(value) = value {
            *slot = value;
        }
    }
    if let Some(tags) = m.tags {
        miniapp.tags = tags;
    }
    miniapp.account_association = AccountAssociation {
        header: m.account_association.header,
        payload: m.account_association.payload,
        signature: m.account_association.signature,
    };

    AppConfig {
        server: ServerConfig {
            listen: server.listen,
            allowed_origins: server.allowed_origins,
        },
        providers: ProvidersConfig {
            pretium: convert_provider(providers.pretium),
            pretium_callback_url: providers.pretium_callback_url,
            snaville: convert_provider(providers.snaville),
            paycrest: convert_provider(providers.paycrest),
            merchant_api: convert_provider(providers.merchant_api),
        },
        miniapp,
    }
}

/// Get the database URL from the environment.
pub fn get_database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[providers.pretium]
base_url = "https://api.pretium.example"
api_key = "from-file"
timeout_secs = 10

[providers.snaville]
base_url = "https://api.snaville.example"

[providers.paycrest]
base_url = "https://api.paycrest.example/v1"

[providers.merchant_api]
base_url = "https://merchants.example"

[miniapp]
app_url = "https://pay.example.com"
name = "castpay"
button_title = "Pay"
"#;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_builds_app_config() {
        let loader = ConfigLoader::new("unused.toml", None);
        let config = loader.load_str(CONFIG, no_env).unwrap();

        assert_eq!(config.providers.pretium.api_key.as_deref(), Some("from-file"));
        assert_eq!(
            config.providers.pretium.timeout,
            Some(Duration::from_secs(10))
        );
        assert_eq!(config.providers.snaville.timeout, None);
        assert_eq!(config.miniapp.button_title, "Pay");
        assert_eq!(config.miniapp.icon_url, "https://pay.example.com/icon.png");
    }

    #[test]
    fn test_env_overrides_api_keys() {
        let loader = ConfigLoader::new("unused.toml", None);
        let env = |key: &str| match key {
            "PRETIUM_API_KEY" => Some("from-env".to_string()),
            "PAYCREST_API_KEY" => Some("  ".to_string()),
            _ => None,
        };
        let config = loader.load_str(CONFIG, env).unwrap();

        assert_eq!(config.providers.pretium.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.providers.paycrest.api_key, None);
    }

    #[test]
    fn test_listen_override() {
        let listen: SocketAddr = "127.0.0.1:4000".parse().unwrap();
        let loader = ConfigLoader::new("unused.toml", Some(listen));
        let config = loader.load_str(CONFIG, no_env).unwrap();
        assert_eq!(config.server.listen, listen);
    }

    #[test]
    fn test_non_http_base_url_is_rejected() {
        let loader = ConfigLoader::new("unused.toml", None);
        let content = CONFIG.replace("https://merchants.example", "ftp://merchants.example");
        assert!(matches!(
            loader.load_str(&content, no_env),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
