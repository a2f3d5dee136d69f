//! Custom label lookups

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LabelResponse {
    pub namespace: String,
    pub key: String,
    pub value: String,
    pub found: bool,
}

/// Unknown labels resolve to a visible placeholder instead of a 404 so
/// components still render.
pub async fn get_label(
    State(state): State<AppState>,
    Path((namespace, key)): Path<(String, String)>,
) -> Json<LabelResponse> {
    let labels = state.labels();
    let found = labels.lookup(&namespace, &key).is_some();
    if !found {
        tracing::debug!(%namespace, %key, "Label not defined in project");
    }
    let value = labels.resolve(&namespace, &key);
    Json(LabelResponse { namespace, key, value, found })
}
