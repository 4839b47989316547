//! Handler capability and pipeline continuation

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use futures::FutureExt;
use futures::future::BoxFuture;
use tower::{Service, ServiceExt};

/// Handler registered under a version
///
/// Receives the request and a [`Next`] that runs the rest of the pipeline.
/// Any `Fn(Request, Next) -> impl Future<Output = impl IntoResponse>` closure
/// implements it.
pub trait VersionHandler: Send + Sync + 'static {
    fn call(&self, req: Request, next: Next) -> BoxFuture<'static, Response>;
}

impl<F, Fut, R> VersionHandler for F
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + 'static,
{
    fn call(&self, req: Request, next: Next) -> BoxFuture<'static, Response> {
        self(req, next).map(IntoResponse::into_response).boxed()
    }
}

/// Type-erased handler, so handlers of different types share one registry
#[derive(Clone)]
pub struct BoxedHandler(Arc<dyn VersionHandler>);

impl BoxedHandler {
    pub fn new<H: VersionHandler>(handler: H) -> Self {
        Self(Arc::new(handler))
    }
}

impl VersionHandler for BoxedHandler {
    fn call(&self, req: Request, next: Next) -> BoxFuture<'static, Response> {
        self.0.call(req, next)
    }
}

impl fmt::Debug for BoxedHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxedHandler").finish_non_exhaustive()
    }
}

/// Box a handler closure for registration
pub fn handler_fn<H: VersionHandler>(handler: H) -> BoxedHandler {
    BoxedHandler::new(handler)
}

type BoxedContinuation = Box<dyn FnOnce(Request) -> BoxFuture<'static, Response> + Send>;

/// The rest of the pipeline after the versioned handler
pub struct Next {
    inner: BoxedContinuation,
}

impl Next {
    /// Continue into `service`, driving it to readiness first
    pub fn new<S>(service: S) -> Self
    where
        S: Service<Request, Error = Infallible> + Send + 'static,
        S::Response: IntoResponse,
        S::Future: Send,
    {
        Self {
            inner: Box::new(move |req| {
                service
                    .oneshot(req)
                    .map(|result| match result {
                        Ok(response) => response.into_response(),
                        Err(never) => match never {},
                    })
                    .boxed()
            }),
        }
    }

    /// Run the remaining pipeline
    pub async fn run(self, req: Request) -> Response {
        (self.inner)(req).await
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}
