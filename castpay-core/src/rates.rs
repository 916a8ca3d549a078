//! Deposit-rate aggregation.
//!
//! Pretium is asked for each of its fiat corridors and Snaville for TZS, all
//! concurrently. Each answer is normalized into a [`DepositRateItem`] or
//! dropped; a failing provider never fails the whole list.

use crate::providers::pretium::PretiumExchangeRate;
use crate::providers::snaville::SnavilleRate;
use crate::providers::{ProviderError, positive_finite};
use async_trait::async_trait;
use castpay_sdk::objects::countries::Country;
use castpay_sdk::objects::rates::{DepositRateItem, RateProvider};
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::warn;

/// Fiat currencies quoted through Pretium, in output order.
pub const PRETIUM_FIATS: [&str; 5] = ["KES", "GHS", "UGX", "MWK", "CDF"];

/// Fiat currency quoted through Snaville.
pub const SNAVILLE_FIAT: &str = "TZS";

/// Asset every deposit rate is quoted in.
pub const DEPOSIT_ASSET: &str = "USDC";

#[async_trait]
pub trait PretiumRateApi: Send + Sync {
    async fn exchange_rate(&self, currency: &str) -> Result<PretiumExchangeRate, ProviderError>;
}

#[async_trait]
pub trait SnavilleRateApi: Send + Sync {
    async fn rate(&self, currency: &str) -> Result<SnavilleRate, ProviderError>;
}

/// Pick the usable rate out of a Pretium answer.
///
/// `quoted_rate` wins when it is positive and finite. Otherwise the mean of
/// buy and sell, when both are positive and finite.
pub fn select_pretium_rate(rate: &PretiumExchangeRate) -> Option<f64> {
    if let Some(quoted) = positive_finite(rate.quoted_rate) {
        return Some(quoted);
    }
    let buy = positive_finite(rate.buying_rate)?;
    let sell = positive_finite(rate.selling_rate)?;
    positive_finite(Some((buy + sell) / 2.0))
}

fn country_code_for(fiat: &str) -> String {
    Country::by_currency(fiat)
        .map(|c| c.code.to_string())
        .unwrap_or_else(|| fiat.chars().take(2).collect())
}

pub fn pretium_item(fiat: &str, rate: &PretiumExchangeRate) -> Option<DepositRateItem> {
    let value = select_pretium_rate(rate)?;
    let country_code = country_code_for(fiat);
    Some(DepositRateItem {
        provider: RateProvider::Pretium,
        fiat: fiat.to_string(),
        flag_url: castpay_sdk::objects::countries::flag_url(&country_code),
        country_code,
        asset: DEPOSIT_ASSET.to_string(),
        rate: value,
        sell_rate: None,
    })
}

pub fn snaville_item(fiat: &str, rate: &SnavilleRate) -> Option<DepositRateItem> {
    let buy = positive_finite(rate.buy_rate)?;
    let country_code = country_code_for(fiat);
    Some(DepositRateItem {
        provider: RateProvider::Snaville,
        fiat: fiat.to_string(),
        flag_url: castpay_sdk::objects::countries::flag_url(&country_code),
        country_code,
        asset: DEPOSIT_ASSET.to_string(),
        rate: buy,
        sell_rate: positive_finite(rate.sell_rate),
    })
}

/// Fans out to both rate sources and merges the answers.
#[derive(Clone)]
pub struct DepositRateAggregator {
    pretium: Arc<dyn PretiumRateApi>,
    snaville: Arc<dyn SnavilleRateApi>,
}

impl DepositRateAggregator {
    pub fn new(pretium: Arc<dyn PretiumRateApi>, snaville: Arc<dyn SnavilleRateApi>) -> Self {
        Self { pretium, snaville }
    }

    /// Current deposit rates: Pretium entries in [`PRETIUM_FIATS`] order,
    /// then the Snaville entry if it is usable.
    #[tracing::instrument(skip_all)]
    pub async fn aggregate(&self) -> Vec<DepositRateItem> {
        let pretium = join_all(PRETIUM_FIATS.iter().map(|fiat| async move {
            (*fiat, self.pretium.exchange_rate(fiat).await)
        }));
        let snaville = self.snaville.rate(SNAVILLE_FIAT);
        let (pretium, snaville) = tokio::join!(pretium, snaville);

        let mut items = Vec::with_capacity(PRETIUM_FIATS.len() + 1);
        for (fiat, result) in pretium {
            match result {
                Ok(rate) => match pretium_item(fiat, &rate) {
                    Some(item) => items.push(item),
                    None => warn!(provider = "pretium", fiat, ?rate, "No usable rate, dropping"),
                },
                Err(e) => warn!(provider = "pretium", fiat, error = %e, "Rate request failed, dropping"),
            }
        }
        match snaville {
            Ok(rate) => match snaville_item(SNAVILLE_FIAT, &rate) {
                Some(item) => items.push(item),
                None => warn!(
                    provider = "snaville",
                    fiat = SNAVILLE_FIAT,
                    ?rate,
                    "No usable rate, dropping"
                ),
            },
            Err(e) => warn!(
                provider = "snaville",
                fiat = SNAVILLE_FIAT,
                error = %e,
                "Rate request failed, dropping"
            ),
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakePretium(HashMap<&'static str, PretiumExchangeRate>);

    #[async_trait]
    impl PretiumRateApi for FakePretium {
        async fn exchange_rate(
            &self,
            currency: &str,
        ) -> Result<PretiumExchangeRate, ProviderError> {
            self.0
                .get(currency)
                .cloned()
                .ok_or_else(|| ProviderError::Rejected {
                    message: format!("no rate for {currency}"),
                })
        }
    }

    struct FakeSnaville(Option<SnavilleRate>);

    #[async_trait]
    impl SnavilleRateApi for FakeSnaville {
        async fn rate(&self, _currency: &str) -> Result<SnavilleRate, ProviderError> {
            self.0.clone().ok_or_else(|| ProviderError::Rejected {
                message: "down".to_string(),
            })
        }
    }

    fn pretium(quoted: Option<f64>, buy: Option<f64>, sell: Option<f64>) -> PretiumExchangeRate {
        PretiumExchangeRate {
            quoted_rate: quoted,
            buying_rate: buy,
            selling_rate: sell,
        }
    }

    fn aggregator(
        pretium: HashMap<&'static str, PretiumExchangeRate>,
        snaville: Option<SnavilleRate>,
    ) -> DepositRateAggregator {
        DepositRateAggregator::new(Arc::new(FakePretium(pretium)), Arc::new(FakeSnaville(snaville)))
    }

    #[test]
    fn test_quoted_rate_wins() {
        let rate = pretium(Some(130.0), Some(1.0), Some(2.0));
        assert_eq!(select_pretium_rate(&rate), Some(130.0));
    }

    #[test]
    fn test_mean_of_buy_and_sell() {
        assert_eq!(select_pretium_rate(&pretium(None, Some(128.0), Some(132.0))), Some(130.0));
        assert_eq!(
            select_pretium_rate(&pretium(Some(0.0), Some(10.0), Some(20.0))),
            Some(15.0)
        );
        assert_eq!(
            select_pretium_rate(&pretium(Some(f64::NAN), Some(10.0), Some(20.0))),
            Some(15.0)
        );
    }

    #[test]
    fn test_unusable_rate_is_none() {
        assert_eq!(select_pretium_rate(&pretium(None, Some(128.0), None)), None);
        assert_eq!(select_pretium_rate(&pretium(Some(-1.0), Some(0.0), Some(5.0))), None);
        assert_eq!(select_pretium_rate(&PretiumExchangeRate::default()), None);
    }

    #[tokio::test]
    async fn test_quoted_rate_for_every_pretium_fiat() {
        let rates = PRETIUM_FIATS
            .iter()
            .enumerate()
            .map(|(i, fiat)| (*fiat, pretium(Some(100.0 + i as f64), Some(1.0), Some(3.0))))
            .collect();
        let items = aggregator(rates, None).aggregate().await;

        assert_eq!(items.len(), PRETIUM_FIATS.len());
        for (i, (item, fiat)) in items.iter().zip(PRETIUM_FIATS).enumerate() {
            assert_eq!(item.fiat, fiat);
            assert_eq!(item.rate, 100.0 + i as f64);
            assert_eq!(item.provider, RateProvider::Pretium);
            assert_eq!(item.asset, "USDC");
            assert_eq!(item.sell_rate, None);
        }
        assert_eq!(items[0].country_code, "KE");
        assert_eq!(items[4].country_code, "CD");
        assert_eq!(items[4].flag_url, "https://flagcdn.com/w80/cd.png");
    }

    #[tokio::test]
    async fn test_failures_and_unusable_rates_are_dropped() {
        let rates = HashMap::from([
            ("KES", pretium(Some(129.0), None, None)),
            ("GHS", pretium(None, Some(15.0), Some(16.0))),
            ("UGX", pretium(None, Some(3700.0), None)),
            // MWK missing: the fake returns an error.
            ("CDF", pretium(Some(0.0), Some(-1.0), Some(2800.0))),
        ]);
        let snaville = SnavilleRate {
            buy_rate: Some(2500.0),
            sell_rate: Some(2550.0),
        };
        let items = aggregator(rates, Some(snaville)).aggregate().await;

        let fiats: Vec<_> = items.iter().map(|i| i.fiat.as_str()).collect();
        assert_eq!(fiats, ["KES", "GHS", "TZS"]);
        assert_eq!(items[1].rate, 15.5);
        assert!(items.iter().all(|i| i.rate > 0.0 && i.rate.is_finite()));

        let tzs = &items[2];
        assert_eq!(tzs.provider, RateProvider::Snaville);
        assert_eq!(tzs.country_code, "TZ");
        assert_eq!(tzs.rate, 2500.0);
        assert_eq!(tzs.sell_rate, Some(2550.0));
    }

    #[tokio::test]
    async fn test_snaville_non_positive_buy_rate_is_dropped() {
        let snaville = SnavilleRate {
            buy_rate: Some(0.0),
            sell_rate: Some(2550.0),
        };
        let items = aggregator(HashMap::new(), Some(snaville)).aggregate().await;
        assert!(items.is_empty());
    }

    #[test]
    fn test_snaville_sell_rate_only_when_positive() {
        let item = snaville_item(
            "TZS",
            &SnavilleRate {
                buy_rate: Some(2500.0),
                sell_rate: Some(-3.0),
            },
        )
        .unwrap();
        assert_eq!(item.sell_rate, None);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("sellRate").is_none());
        assert_eq!(json["countryCode"], "TZ");
    }

    #[tokio::test]
    async fn test_everything_down_yields_empty_list() {
        assert!(aggregator(HashMap::new(), None).aggregate().await.is_empty());
    }

    mod over_http {
        use super::super::*;
        use crate::providers::testing::{endpoint, serve};
        use crate::providers::{PretiumClient, SnavilleClient, StatusCode};
        use axum::{
            Json, Router,
            extract::Path,
            http::{HeaderMap, header},
            response::{IntoResponse, Response},
            routing::{get, post},
        };
        use serde_json::{Value, json};

        async fn pretium_rate(headers: HeaderMap, Json(body): Json<Value>) -> Response {
            if headers.get("x-api-key").is_none_or(|v| v != "pretium-key") {
                return StatusCode::UNAUTHORIZED.into_response();
            }
            match body["currency_code"].as_str() {
                Some("KES") => Json(json!({
                    "code": 200,
                    "message": "Success",
                    "data": {"quoted_rate": "129.5", "buying_rate": 1, "selling_rate": 2},
                }))
                .into_response(),
                Some("GHS") => (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response(),
                Some("UGX") => (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, "application/json")],
                    "{not json",
                )
                    .into_response(),
                Some("MWK") => {
                    Json(json!({"code": 400, "message": "Unsupported currency"})).into_response()
                }
                _ => Json(json!({
                    "code": 200,
                    "data": {"buying_rate": 2800, "selling_rate": "2900"},
                }))
                .into_response(),
            }
        }

        async fn snaville_rate(Path(currency): Path<String>) -> Json<Value> {
            Json(json!({"currency": currency, "buy_rate": "2500", "sell_rate": 2550}))
        }

        #[tokio::test]
        async fn test_aggregate_drops_failed_and_malformed_answers() {
            let upstream = Router::new()
                .route("/v1/exchange-rate", post(pretium_rate))
                .route("/v1/rates/{currency}", get(snaville_rate));
            let base = serve(upstream).await;
            let pretium = PretiumClient::new(&endpoint(base.clone(), "pretium-key"), None).unwrap();
            let snaville = SnavilleClient::new(&endpoint(base, "snaville-key")).unwrap();
            let items = DepositRateAggregator::new(Arc::new(pretium), Arc::new(snaville))
                .aggregate()
                .await;

            let fiats: Vec<_> = items.iter().map(|i| i.fiat.as_str()).collect();
            assert_eq!(fiats, ["KES", "CDF", "TZS"]);
            assert_eq!(items[0].rate, 129.5);
            assert_eq!(items[1].rate, 2850.0);
            assert_eq!(items[2].rate, 2500.0);
            assert_eq!(items[2].sell_rate, Some(2550.0));
        }

        #[tokio::test]
        async fn test_aggregate_with_every_route_missing_is_empty() {
            let base = serve(Router::new()).await;
            let pretium = PretiumClient::new(&endpoint(base.clone(), "pretium-key"), None).unwrap();
            let snaville = SnavilleClient::new(&endpoint(base, "snaville-key")).unwrap();
            let items = DepositRateAggregator::new(Arc::new(pretium), Arc::new(snaville))
                .aggregate()
                .await;
            assert!(items.is_empty());
        }
    }
}
