//! Tower integration: a versioned route as a `Layer` over the matched endpoint
//!
//! ```rust,ignore
//! let route = VersionDispatcher::default().version(
//!     [
//!         ("1.0.0", handler_fn(|_req: Request, _next: Next| async { "Hello World!" })),
//!         ("1.1.0", handler_fn(|_req: Request, _next: Next| async { "Hello axum!" })),
//!     ],
//!     OptionsOverride::default(),
//! )?;
//!
//! let app = Router::new()
//!     .route("/", get(|| async { StatusCode::NOT_FOUND }))
//!     .route_layer(route);
//! ```
//!
//! The wrapped endpoint is the [`Next`] continuation handed to the selected
//! handler.

use std::convert::Infallible;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::http::StatusCode;
use axum::http::header::{HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use futures::FutureExt;
use futures::future::BoxFuture;
use tower::{Layer, Service};
use tracing::warn;

use crate::dispatch::VersionedRoute;
use crate::http::handler::{Next, VersionHandler};
use crate::http::view::{HttpRequestView, path_params};
use crate::version::UnsupportedVersion;

impl IntoResponse for UnsupportedVersion {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, self.to_string()).into_response()
    }
}

impl<H: VersionHandler> VersionedRoute<H> {
    /// Serve one request: select a handler, run it and report its version
    ///
    /// Unsupported versions produce a 404 without touching `next`.
    pub async fn dispatch(&self, req: Request, next: Next) -> Response {
        let (mut parts, body) = req.into_parts();
        let params = path_params(&mut parts).await;

        let entry = match self.select(&HttpRequestView::new(&parts, params)) {
            Ok(entry) => entry,
            Err(err) => return err.into_response(),
        };

        let mut response = entry
            .handler()
            .call(Request::from_parts(parts, body), next)
            .await;

        let header = &self.options().response_header;
        match (
            HeaderName::from_bytes(header.as_bytes()),
            HeaderValue::from_str(entry.version_str()),
        ) {
            (Ok(name), Ok(value)) => {
                response.headers_mut().insert(name, value);
            }
            _ => warn!("Cannot report version {} in header {:?}", entry.version_str(), header),
        }

        response
    }
}

impl<H, S> Layer<S> for VersionedRoute<H> {
    type Service = VersionedService<H, S>;

    fn layer(&self, inner: S) -> Self::Service {
        VersionedService {
            route: self.clone(),
            inner,
        }
    }
}

/// Service produced by layering a [`VersionedRoute`] over an endpoint
#[derive(Debug)]
pub struct VersionedService<H, S> {
    route: VersionedRoute<H>,
    inner: S,
}

impl<H, S: Clone> Clone for VersionedService<H, S> {
    fn clone(&self) -> Self {
        Self {
            route: self.route.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<H, S> Service<Request> for VersionedService<H, S>
where
    H: VersionHandler,
    S: Service<Request, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // `Next` drives its own clone of the inner service to readiness
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let route = self.route.clone();
        let next = Next::new(self.inner.clone());
        async move { Ok(route.dispatch(req, next).await) }.boxed()
    }
}
