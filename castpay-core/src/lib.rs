#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod entities;
pub mod framework;
pub mod ledger;
pub mod miniapp;
pub mod mobile_networks;
pub mod providers;
pub mod rates;
pub mod stats;
pub mod store;
