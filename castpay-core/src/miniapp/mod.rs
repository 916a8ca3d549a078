//! Documents that describe the mini-app to Farcaster hosts: the manifest
//! and the shareable embed pages.

pub mod manifest;
pub mod share;

pub use manifest::{Manifest, build_manifest};
pub use share::{PaymentShare, SharePage};
