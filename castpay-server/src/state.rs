//! Application state shared across all request handlers.

use castpay_core::config::AppConfig;
use castpay_core::ledger::TransactionLedger;
use castpay_core::providers::{
    MerchantApiClient, PaycrestClient, PretiumClient, ProviderError, SnavilleClient,
};
use castpay_core::rates::DepositRateAggregator;
use castpay_core::store::TransactionStore;
use std::sync::Arc;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
/// Configuration is read once at startup and never changes afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub ledger: TransactionLedger,
    pub rates: DepositRateAggregator,
    pub pretium: Arc<PretiumClient>,
    pub paycrest: Arc<PaycrestClient>,
    pub merchant_api: Arc<MerchantApiClient>,
}

impl AppState {
    /// Wire every provider client from the configuration.
    pub fn new(config: AppConfig, store: Arc<dyn TransactionStore>) -> Result<Self, ProviderError> {
        let pretium = Arc::new(PretiumClient::new(
            &config.providers.pretium,
            config.providers.pretium_callback_url.clone(),
        )?);
        let snaville = Arc::new(SnavilleClient::new(&config.providers.snaville)?);
        let rates = DepositRateAggregator::new(pretium.clone(), snaville);
        Self::assemble(config, store, pretium, rates)
    }

    /// Like [`AppState::new`], but deposit rates come from the given sources.
    #[cfg(test)]
    pub fn with_rate_sources(
        config: AppConfig,
        store: Arc<dyn TransactionStore>,
        pretium_rates: Arc<dyn castpay_core::rates::PretiumRateApi>,
        snaville_rates: Arc<dyn castpay_core::rates::SnavilleRateApi>,
    ) -> Result<Self, ProviderError> {
        let pretium = Arc::new(PretiumClient::new(
            &config.providers.pretium,
            config.providers.pretium_callback_url.clone(),
        )?);
        let rates = DepositRateAggregator::new(pretium_rates, snaville_rates);
        Self::assemble(config, store, pretium, rates)
    }

    fn assemble(
        config: AppConfig,
        store: Arc<dyn TransactionStore>,
        pretium: Arc<PretiumClient>,
        rates: DepositRateAggregator,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            paycrest: Arc::new(PaycrestClient::new(&config.providers.paycrest)?),
            merchant_api: Arc::new(MerchantApiClient::new(&config.providers.merchant_api)?),
            ledger: TransactionLedger::new(store),
            rates,
            pretium,
            config: Arc::new(config),
        })
    }
}
