//! Shared wire types for castpay.
//!
//! Everything in this crate is plain data: request/response shapes exchanged
//! between the mini-app frontend and `castpay-server`, the static country
//! table, the off-ramp routing table, and the withdrawal wizard state machine
//! that drives the off-ramp flow on the client.

#![forbid(unsafe_code)]

pub mod objects;
pub mod offramp;
pub mod withdraw;
