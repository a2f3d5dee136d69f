use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::api;
use crate::state::AppState;
use lwc_preview_core::apex_proxy_middleware;

pub fn build_router(state: AppState, port: u16) -> Router {
    let project = state.project();
    let static_resources = ServeDir::new(&project.static_resources_dir);
    let content_assets = ServeDir::new(&project.content_assets_dir);
    let apex = state.apex().cloned();

    let public_routes = Router::<AppState>::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/version", get(version_info));

    let app = Router::<AppState>::new()
        .nest("/api", api::router())
        .merge(public_routes)
        .with_state(state)
        .nest_service("/assets/staticresources", static_resources)
        .nest_service("/assets/contentassets", content_assets)
        .fallback(|| async { StatusCode::NOT_FOUND });

    // Apex calls are answered by middleware so the route exists only when an org is configured.
    let app = match apex {
        Some(proxy) => app.layer(middleware::from_fn_with_state(proxy, apex_proxy_middleware)),
        None => app,
    };

    app.layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(port))
}

/// Browser access from the preview pages served by this process.
fn cors_layer(port: u16) -> CorsLayer {
    let origins: Vec<HeaderValue> = [format!("http://localhost:{}", port), format!("http://127.0.0.1:{}", port)]
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(false)
        .max_age(std::time::Duration::from_secs(3600))
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, axum::Json(serde_json::json!({"status": "ok"})))
}

async fn version_info() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "cargo_version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::test_app_state;
    use axum_test::TestServer;
    use lwc_preview_core::{ApexProxy, APEX_EXECUTE_ROUTE};
    use lwc_preview_types::ConnectionParams;
    use serde_json::json;
    use wiremock::matchers::any;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_health_endpoints() {
        let (state, _tmp) = test_app_state(None);
        let server = TestServer::new(build_router(state, 3333)).unwrap();

        for path in ["/health", "/healthz"] {
            let resp = server.get(path).await;
            resp.assert_status_ok();
            resp.assert_json(&json!({"status": "ok"}));
        }
        server.get("/version").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_serves_static_resources() {
        let (state, _tmp) = test_app_state(None);
        let server = TestServer::new(build_router(state, 3333)).unwrap();

        let resp = server.get("/assets/staticresources/logo.svg").await;
        resp.assert_status_ok();
        resp.assert_text("<svg/>");

        server.get("/assets/staticresources/missing.png").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_apex_route_absent_without_org() {
        let (state, _tmp) = test_app_state(None);
        let server = TestServer::new(build_router(state, 3333)).unwrap();

        server
            .post(APEX_EXECUTE_ROUTE)
            .json(&json!({"classname": "C"}))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_apex_route_mounted_with_org() {
        let org = MockServer::start().await;
        Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&org).await;

        let params = ConnectionParams::new(&org.uri(), "sid").unwrap();
        let (state, _tmp) = test_app_state(Some(ApexProxy::new(&params).unwrap()));
        let server = TestServer::new(build_router(state, 3333)).unwrap();

        let resp = server.post(APEX_EXECUTE_ROUTE).json(&json!({"classname": "C"})).await;
        resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        resp.assert_text("method must be specified");
    }
}
