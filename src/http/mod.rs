//! axum / tower adapter
//!
//! # Modules
//!
//! - [`handler`]: `VersionHandler` capability, boxed handlers and the `Next` continuation
//! - [`view`]: `RequestView` over axum request parts
//! - [`service`]: `Layer`/`Service` wiring and the 404 response for unsupported versions

pub mod handler;
pub mod service;
pub mod view;

pub use handler::{BoxedHandler, Next, VersionHandler, handler_fn};
pub use service::VersionedService;
pub use view::HttpRequestView;
