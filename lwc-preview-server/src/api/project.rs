use axum::{extract::State, response::Json};

use lwc_preview_types::ProjectConfig;

use crate::state::AppState;

pub async fn get_project(State(state): State<AppState>) -> Json<ProjectConfig> {
    Json(state.project().clone())
}
