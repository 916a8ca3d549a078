use crate::config::MiniAppConfig;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestAssociation {
    pub header: String,
    pub payload: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestApp {
    pub version: &'static str,
    pub name: String,
    pub icon_url: String,
    pub home_url: String,
    pub image_url: String,
    pub button_title: String,
    pub splash_image_url: String,
    pub splash_background_color: String,
    pub webhook_url: String,
    pub subtitle: String,
    pub description: String,
    pub primary_category: String,
    pub tags: Vec<String>,
    pub hero_image_url: String,
    pub tagline: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image_url: String,
}

/// `/.well-known/farcaster.json` document.
///
/// `frame` repeats `miniapp` for hosts that predate the rename.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub account_association: ManifestAssociation,
    pub miniapp: ManifestApp,
    pub frame: ManifestApp,
}

pub fn build_manifest(config: &MiniAppConfig) -> Manifest {
    let app = ManifestApp {
        version: "1",
        name: config.name.clone(),
        icon_url: config.icon_url.clone(),
        home_url: config.home_url(),
        image_url: config.image_url.clone(),
        button_title: config.button_title.clone(),
        splash_image_url: config.splash_image_url.clone(),
        splash_background_color: config.splash_background_color.clone(),
        webhook_url: config.webhook_url.clone(),
        subtitle: config.subtitle.clone(),
        description: config.description.clone(),
        primary_category: config.primary_category.clone(),
        tags: config.tags.clone(),
        hero_image_url: config.image_url.clone(),
        tagline: config.tagline.clone(),
        og_title: config.name.clone(),
        og_description: config.description.clone(),
        og_image_url: config.image_url.clone(),
    };
    let association = &config.account_association;
    Manifest {
        account_association: ManifestAssociation {
            header: association.header.clone(),
            payload: association.payload.clone(),
            signature: association.signature.clone(),
        },
        frame: app.clone(),
        miniapp: app,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_manifest_shape() {
        let config =
            MiniAppConfig::with_defaults(Url::parse("https://pay.example.com/").unwrap(), "castpay");
        let json = serde_json::to_value(build_manifest(&config)).unwrap();

        assert_eq!(json["miniapp"]["version"], "1");
        assert_eq!(json["miniapp"]["homeUrl"], "https://pay.example.com");
        assert_eq!(json["miniapp"]["iconUrl"], "https://pay.example.com/icon.png");
        assert_eq!(json["miniapp"]["webhookUrl"], "https://pay.example.com/api/webhook");
        assert_eq!(json["frame"], json["miniapp"]);
        assert!(json["accountAssociation"]["signature"].is_string());
    }
}
