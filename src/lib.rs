//! Semantic-version based request dispatch
//!
//! A [`VersionDispatcher`] turns a set of handlers keyed by version into a
//! [`VersionedRoute`]. Per request the route reads the requested specifier
//! (`Accept-Version: ^1.0` by default), picks the newest handler satisfying
//! it, optionally falls back, and reports the chosen version in a response
//! header.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod request;
pub mod version;

pub use config::{DispatcherConfig, OptionsOverride, ResolutionOptions};
pub use dispatch::{VersionDispatcher, VersionedRoute};
pub use http::{BoxedHandler, Next, VersionHandler, handler_fn};
pub use request::{RequestView, RuleKind, VersionRule};
pub use version::{HandlerEntry, RegistryError, UnsupportedVersion, VersionRegistry, VersionSpec};
