//! Share pages.
//!
//! A share page is a small HTML document whose `<head>` carries the embed a
//! Farcaster client renders as a card (`fc:miniapp`, plus `fc:frame` for
//! older clients) along with Open Graph and Twitter tags for everyone else.
//! Opened directly in a browser, it redirects to the target URL.

use crate::config::MiniAppConfig;
use serde::Serialize;
use url::Url;

const DEFAULT_TOKEN: &str = "USDC";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedAction<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'a str,
    url: &'a str,
    splash_image_url: &'a str,
    splash_background_color: &'a str,
}

#[derive(Debug, Serialize)]
struct EmbedButton<'a> {
    title: &'a str,
    action: EmbedAction<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Embed<'a> {
    version: &'static str,
    image_url: &'a str,
    button: EmbedButton<'a>,
}

/// Parameters of a payment link.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentShare {
    pub to: Option<String>,
    pub amount: Option<String>,
    pub token: Option<String>,
    pub note: Option<String>,
}

/// Everything a share page shows. Values are stored raw and escaped on
/// render.
#[derive(Debug, Clone, PartialEq)]
pub struct SharePage {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub target_url: String,
    pub button_title: String,
    app_name: String,
    splash_image_url: String,
    splash_background_color: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl SharePage {
    fn base(config: &MiniAppConfig) -> Self {
        Self {
            title: config.name.clone(),
            description: config.description.clone(),
            image_url: config.image_url.clone(),
            target_url: config.home_url(),
            button_title: config.button_title.clone(),
            app_name: config.name.clone(),
            splash_image_url: config.splash_image_url.clone(),
            splash_background_color: config.splash_background_color.clone(),
        }
    }

    /// Generic share page. `url` is only honored when it points at the
    /// app's own origin; anything else falls back to the app home.
    pub fn generic(
        config: &MiniAppConfig,
        title: Option<String>,
        description: Option<String>,
        image: Option<String>,
        url: Option<String>,
    ) -> Self {
        let mut page = Self::base(config);
        if let Some(title) = non_blank(title) {
            page.title = title;
        }
        if let Some(description) = non_blank(description) {
            page.description = description;
        }
        if let Some(image) = non_blank(image) {
            page.image_url = image;
        }
        if let Some(target) = non_blank(url)
            .and_then(|u| config.app_url.join(&u).ok())
            .filter(|u| u.origin() == config.app_url.origin())
        {
            page.target_url = target.to_string();
        }
        page
    }

    /// Payment share page pointing at the app's `/pay` screen with the
    /// payment pre-filled.
    pub fn payment(config: &MiniAppConfig, share: PaymentShare) -> Self {
        let mut page = Self::base(config);
        let to = non_blank(share.to);
        let amount = non_blank(share.amount);
        let token = non_blank(share.token).unwrap_or_else(|| DEFAULT_TOKEN.to_string());
        let note = non_blank(share.note);

        let mut target: Url = config
            .link("pay")
            .unwrap_or_else(|_| config.app_url.clone());
        {
            let mut query = target.query_pairs_mut();
            if let Some(to) = &to {
                query.append_pair("to", to);
            }
            if let Some(amount) = &amount {
                query.append_pair("amount", amount);
            }
            query.append_pair("token", &token);
            if let Some(note) = &note {
                query.append_pair("note", note);
            }
        }
        page.target_url = target.to_string();

        page.title = match &amount {
            Some(amount) => format!("Pay {amount} {token}"),
            None => format!("Send {token}"),
        };
        page.description = match (&note, &to) {
            (Some(note), _) => note.clone(),
            (None, Some(to)) => format!("Send {token} to {to} on Farcaster"),
            (None, None) => format!("Send {token} on Farcaster"),
        };
        page.button_title = page.title.clone();
        page
    }

    fn embed_json(&self, action: &'static str) -> String {
        let embed = Embed {
            version: "1",
            image_url: &self.image_url,
            button: EmbedButton {
                title: &self.button_title,
                action: EmbedAction {
                    kind: action,
                    name: &self.app_name,
                    url: &self.target_url,
                    splash_image_url: &self.splash_image_url,
                    splash_background_color: &self.splash_background_color,
                },
            },
        };
        serde_json::to_string(&embed).unwrap_or_default()
    }

    pub fn render(&self) -> String {
        let miniapp = escape_html(&self.embed_json("launch_miniapp"));
        let frame = escape_html(&self.embed_json("launch_frame"));
        let title = escape_html(&self.title);
        let description = escape_html(&self.description);
        let image = escape_html(&self.image_url);
        let url = escape_html(&self.target_url);
        let redirect = js_string(&self.target_url);

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<meta name="fc:miniapp" content="{miniapp}">
<meta name="fc:frame" content="{frame}">
<meta property="og:title" content="{title}">
<meta property="og:description" content="{description}">
<meta property="og:image" content="{image}">
<meta property="og:url" content="{url}">
<meta name="twitter:card" content="summary_large_image">
<meta name="twitter:title" content="{title}">
<meta name="twitter:description" content="{description}">
<meta name="twitter:image" content="{image}">
</head>
<body>
<p><a href="{url}">{title}</a></p>
<script>
if (window.self === window.top) {{
  window.location.replace({redirect});
}}
</script>
</body>
</html>
"#
        )
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// JSON string literal safe to place inside a `<script>` element.
fn js_string(input: &str) -> String {
    serde_json::to_string(input)
        .unwrap_or_else(|_| "\"/\"".to_string())
        .replace('<', "\\u003c")
}
