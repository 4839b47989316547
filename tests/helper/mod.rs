//! axum test utilities

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use semver_dispatch::{BoxedHandler, Next, VersionedRoute, handler_fn};
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

/// Versions registered by the demo routes, in registration order
pub const VERSIONS: [&str; 9] = [
    "1.0.0",
    "1.0.2",
    "1.1.0",
    "1.1.1",
    "1.1.10",
    "1.2.0",
    "1.2.1-beta",
    "1.0.1-beta",
    "2.0.0",
];

/// Install a log subscriber writing to the test output (`RUST_LOG=debug`)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Handler answering with a fixed body
pub fn reply(body: &'static str) -> BoxedHandler {
    handler_fn(move |_req: Request, _next: Next| async move { body })
}

/// Handler answering with a JSON message
pub fn json_message(message: &'static str) -> BoxedHandler {
    handler_fn(move |_req: Request, _next: Next| async move {
        axum::Json(serde_json::json!({ "message": message }))
    })
}

/// Router exposing a versioned route on `path`; the endpoint itself is the
/// continuation and answers 404
pub fn app(path: &str, route: VersionedRoute<BoxedHandler>) -> Router {
    Router::new()
        .route(path, get(|| async { StatusCode::NOT_FOUND }))
        .route_layer(route)
}

/// Issue a GET request with optional `Accept-Version`
pub async fn get_with_version(app: Router, uri: &str, version: Option<&str>) -> Response {
    let mut builder = axum::http::Request::builder().uri(uri);
    if let Some(version) = version {
        builder = builder.header("Accept-Version", version);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// The `x-api-version` response header, if any
pub fn served_version(response: &Response) -> Option<&str> {
    response
        .headers()
        .get("x-api-version")
        .and_then(|value| value.to_str().ok())
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
