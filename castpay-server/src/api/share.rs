//! Share pages rendered for Farcaster embeds.
//!
//! - `GET /share`     – generic card: `title`, `description`, `image`, `url`
//! - `GET /pay/share` – payment card: `to`, `amount`, `token`, `note`

use axum::{extract::State, response::Html};
use castpay_core::miniapp::{PaymentShare, SharePage};
use serde::Deserialize;

use super::error::ValidationError;
use super::extractors::{Schema, ValidatedQuery, optional};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ShareQuery {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
}

impl Schema for ShareQuery {
    type Raw = ShareQuery;

    fn parse(raw: Self::Raw) -> Result<Self, ValidationError> {
        Ok(raw)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PayShareQuery {
    pub to: Option<String>,
    pub amount: Option<String>,
    pub token: Option<String>,
    pub note: Option<String>,
}

impl Schema for PaymentShare {
    type Raw = PayShareQuery;

    fn parse(raw: Self::Raw) -> Result<Self, ValidationError> {
        let amount = optional(raw.amount);
        if let Some(amount) = &amount
            && !amount.parse::<f64>().is_ok_and(|a| a.is_finite() && a > 0.0)
        {
            return Err(ValidationError::new("amount must be a positive number"));
        }
        Ok(PaymentShare {
            to: raw.to,
            amount,
            token: raw.token,
            note: raw.note,
        })
    }
}

pub(super) async fn share(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ShareQuery>,
) -> Html<String> {
    let page = SharePage::generic(
        &state.config.miniapp,
        query.title,
        query.description,
        query.image,
        query.url,
    );
    Html(page.render())
}

pub(super) async fn pay_share(
    State(state): State<AppState>,
    ValidatedQuery(share): ValidatedQuery<PaymentShare>,
) -> Html<String> {
    Html(SharePage::payment(&state.config.miniapp, share).render())
}
