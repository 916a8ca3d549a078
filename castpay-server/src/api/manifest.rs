//! `GET /manifest` and `GET /.well-known/farcaster.json`

use axum::{Json, extract::State};
use castpay_core::miniapp::{Manifest, build_manifest};

use crate::state::AppState;

pub(super) async fn manifest(State(state): State<AppState>) -> Json<Manifest> {
    Json(build_manifest(&state.config.miniapp))
}
