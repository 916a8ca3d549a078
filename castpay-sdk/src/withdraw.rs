//! Withdrawal wizard state machine.
//!
//! The off-ramp flow is a three step form: the user enters an amount, picks
//! a country, then confirms with the provider the country routes to.
//! Forward transitions are guarded; stepping back never is.

use serde::Serialize;

use crate::objects::countries::Country;
use crate::offramp::{OfframpProvider, offramp_provider_for};

/// Current step of the withdrawal wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawStep {
    #[default]
    Amount,
    Country,
    Provider,
}

/// Client-side state of one withdrawal.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawWizard {
    step: WithdrawStep,
    amount: String,
    country: Option<Country>,
    provider_type: Option<OfframpProvider>,
}

impl WithdrawWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WithdrawStep {
        self.step
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn country(&self) -> Option<&Country> {
        self.country.as_ref()
    }

    pub fn provider_type(&self) -> Option<OfframpProvider> {
        self.provider_type
    }

    /// Replace the amount text as typed by the user.
    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    /// The amount as a positive, finite number, if it is one.
    pub fn parsed_amount(&self) -> Option<f64> {
        self.amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
    }

    /// Advance from the amount step. Returns whether the step changed.
    pub fn go_to_country(&mut self) -> bool {
        if self.step != WithdrawStep::Amount || self.parsed_amount().is_none() {
            return false;
        }
        self.step = WithdrawStep::Country;
        true
    }

    /// Select the payout country and derive the provider from it.
    pub fn select_country(&mut self, country: Country) {
        self.provider_type = Some(offramp_provider_for(country.code));
        self.country = Some(country);
    }

    /// Advance from the country step. Returns whether the step changed.
    pub fn go_to_provider(&mut self) -> bool {
        if self.step != WithdrawStep::Country || self.country.is_none() {
            return false;
        }
        self.step = WithdrawStep::Provider;
        true
    }

    /// Step back one step. A no-op on the first step.
    pub fn back(&mut self) {
        self.step = match self.step {
            WithdrawStep::Amount | WithdrawStep::Country => WithdrawStep::Amount,
            WithdrawStep::Provider => WithdrawStep::Country,
        };
    }

    /// Return to the initial state, clearing every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::countries::{GHANA, NIGERIA};

    #[test]
    fn test_ghana_routes_to_pretium() {
        let mut wizard = WithdrawWizard::new();
        wizard.select_country(GHANA);
        assert_eq!(wizard.provider_type(), Some(OfframpProvider::Pretium));
    }

    #[test]
    fn test_nigeria_routes_to_paycrest() {
        let mut wizard = WithdrawWizard::new();
        wizard.select_country(NIGERIA);
        assert_eq!(wizard.provider_type(), Some(OfframpProvider::Paycrest));
    }

    #[test]
    fn test_zero_amount_does_not_advance() {
        let mut wizard = WithdrawWizard::new();
        wizard.set_amount("0");
        assert!(!wizard.go_to_country());
        assert_eq!(wizard.step(), WithdrawStep::Amount);

        for bad in ["", "abc", "-5", "NaN", "inf"] {
            wizard.set_amount(bad);
            assert!(!wizard.go_to_country(), "{bad:?} should not advance");
        }
    }

    #[test]
    fn test_full_flow_and_reset() {
        let mut wizard = WithdrawWizard::new();
        wizard.set_amount("25.5");
        assert!(wizard.go_to_country());
        assert_eq!(wizard.step(), WithdrawStep::Country);

        assert!(!wizard.go_to_provider());
        wizard.select_country(GHANA);
        assert!(wizard.go_to_provider());
        assert_eq!(wizard.step(), WithdrawStep::Provider);

        wizard.back();
        assert_eq!(wizard.step(), WithdrawStep::Country);
        assert_eq!(wizard.country(), Some(&GHANA));

        wizard.reset();
        assert_eq!(wizard, WithdrawWizard::new());
        assert_eq!(wizard.amount(), "");
        assert!(wizard.country().is_none());
        assert!(wizard.provider_type().is_none());
    }

    #[test]
    fn test_back_on_first_step_is_noop() {
        let mut wizard = WithdrawWizard::new();
        wizard.back();
        assert_eq!(wizard.step(), WithdrawStep::Amount);
    }
}
