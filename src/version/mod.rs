//! Version layer: cleaning, range satisfaction and ranked handler registries
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Semver    │────▶│  Registry   │◀────│    Range    │
//! │   (clean)   │     │  (ranked)   │     │ (satisfies) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`semver`]: Version cleaning and release-tuple helpers
//! - [`range`]: npm-style range specifiers (`^1.0`, `~1.1`, `*`, ...)
//! - [`registry`]: Handlers sorted newest first, resolved by specifier
//! - [`error`]: Error types for registry construction and dispatch

pub mod error;
pub mod range;
pub mod registry;
pub mod semver;

pub use error::{RegistryError, UnsupportedVersion};
pub use range::VersionSpec;
pub use registry::{HandlerEntry, VersionRegistry};
