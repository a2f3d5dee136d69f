use axum::extract::State;
use axum::response::Json;

use super::get_status;
use super::project::get_project;
use crate::test_helpers::test_app_state;

#[tokio::test]
async fn test_get_project_reports_sfdx_layout() {
    let (state, tmp) = test_app_state(None);
    let Json(project) = get_project(State(state)).await;
    assert!(project.is_sfdx);
    assert_eq!(project.namespace, "c");
    assert_eq!(project.modules_dir, tmp.path().join("force-app/main/default/lwc"));
}

#[tokio::test]
async fn test_status_without_org() {
    let (state, _tmp) = test_app_state(None);
    let server = axum_test::TestServer::new(crate::router::build_router(state, 3333)).unwrap();

    let resp = server.get("/api/status").await;
    resp.assert_status_ok();
    let body: serde_json::Value = resp.json();
    assert_eq!(body["apex_enabled"], false);
    assert_eq!(body["aura_config_cached"], false);
}

#[tokio::test]
async fn test_status_handler_direct() {
    let (state, _tmp) = test_app_state(None);
    let Json(status) = get_status(State(state)).await;
    let body = serde_json::to_value(&status).unwrap();
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
