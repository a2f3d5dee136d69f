//! API Routes
//!
//! Endpoints the preview pages call back into. The Apex proxy is not
//! routed here; it is answered by middleware in front of the router.

mod labels;
mod project;

#[cfg(test)]
mod project_tests;

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Status
        .route("/status", get(get_status))
        // Project
        .route("/project", get(project::get_project))
        // Labels
        .route("/labels/:namespace/:key", get(labels::get_label))
}

#[derive(Serialize)]
pub(crate) struct StatusResponse {
    version: String,
    apex_enabled: bool,
    aura_config_cached: bool,
}

pub(crate) async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let apex = state.apex();
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        apex_enabled: apex.is_some(),
        aura_config_cached: apex.is_some_and(|proxy| proxy.cache().get().is_some()),
    })
}
