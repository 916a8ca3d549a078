//! Mini-app identity configuration.

use url::Url;

/// Resolve `path` below `base`, keeping any path prefix `base` carries.
fn app_link(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut dir = base.clone();
    if !dir.path().ends_with('/') {
        let with_slash = format!("{}/", dir.path());
        dir.set_path(&with_slash);
    }
    dir.join(path.trim_start_matches('/'))
}

/// Signed domain association proving ownership of the app domain.
#[derive(Debug, Clone, Default)]
pub struct AccountAssociation {
    pub header: String,
    pub payload: String,
    pub signature: String,
}

/// Mini-app identity and artwork, with every URL resolved.
#[derive(Debug, Clone)]
pub struct MiniAppConfig {
    /// Public URL the mini-app is served from.
    pub app_url: Url,
    pub name: String,
    pub subtitle: String,
    pub description: String,
    pub tagline: String,
    pub button_title: String,
    pub primary_category: String,
    pub tags: Vec<String>,
    pub icon_url: String,
    pub image_url: String,
    pub splash_image_url: String,
    pub splash_background_color: String,
    pub webhook_url: String,
    pub account_association: AccountAssociation,
}

impl MiniAppConfig {
    /// A config with every optional field derived from `app_url`.
    pub fn with_defaults(app_url: Url, name: impl Into<String>) -> Self {
        let asset = |path: &str| {
            app_link(&app_url, path)
                .map(String::from)
                .unwrap_or_else(|_| app_url.to_string())
        };
        Self {
            icon_url: asset("/icon.png"),
            image_url: asset("/image.png"),
            splash_image_url: asset("/splash.png"),
            webhook_url: asset("/api/webhook"),
            app_url: app_url.clone(),
            name: name.into(),
            subtitle: "Stablecoin payments".to_string(),
            description: "Send, receive and cash out stablecoins from your Farcaster client."
                .to_string(),
            tagline: "Pay anyone in seconds".to_string(),
            button_title: "Open".to_string(),
            primary_category: "finance".to_string(),
            tags: vec![
                "payments".to_string(),
                "stablecoin".to_string(),
                "usdc".to_string(),
            ],
            splash_background_color: "#0B0B0F".to_string(),
            account_association: AccountAssociation::default(),
        }
    }

    /// `path` resolved below the app URL.
    pub fn link(&self, path: &str) -> Result<Url, url::ParseError> {
        app_link(&self.app_url, path)
    }

    /// The app URL as a string without a trailing slash.
    pub fn home_url(&self) -> String {
        self.app_url.as_str().trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_keep_path_prefix() {
        let root =
            MiniAppConfig::with_defaults(Url::parse("https://pay.example.com").unwrap(), "castpay");
        assert_eq!(root.link("/pay").unwrap().as_str(), "https://pay.example.com/pay");
        assert_eq!(root.icon_url, "https://pay.example.com/icon.png");

        let nested = MiniAppConfig::with_defaults(
            Url::parse("https://host.example.com/app").unwrap(),
            "castpay",
        );
        assert_eq!(nested.link("/pay").unwrap().as_str(), "https://host.example.com/app/pay");
        assert_eq!(nested.icon_url, "https://host.example.com/app/icon.png");
        assert_eq!(nested.home_url(), "https://host.example.com/app");
    }
}
