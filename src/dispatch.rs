//! Versioned route registration and per-request handler selection

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{DispatcherConfig, OptionsOverride, ResolutionOptions};
use crate::request::{RequestView, VersionRule, default_rules, extract_version};
use crate::version::{
    HandlerEntry, RegistryError, UnsupportedVersion, VersionRegistry, VersionSpec,
};

/// Entry point for declaring versioned routes
///
/// Holds the extraction rules and dispatcher-level options shared by every
/// route created through [`VersionDispatcher::version`].
#[derive(Debug, Clone)]
pub struct VersionDispatcher {
    rules: Arc<[VersionRule]>,
    options: ResolutionOptions,
}

impl VersionDispatcher {
    /// Create a dispatcher
    ///
    /// `rules` defaults to the `Accept-Version` header; `options` is applied
    /// over the library defaults.
    pub fn new(rules: Option<Vec<VersionRule>>, options: OptionsOverride) -> Self {
        Self {
            rules: rules.unwrap_or_else(default_rules).into(),
            options: ResolutionOptions::default().merged(&options),
        }
    }

    pub fn from_config(config: DispatcherConfig) -> Self {
        Self::new(config.rules, config.options)
    }

    pub fn rules(&self) -> &[VersionRule] {
        &self.rules
    }

    pub fn options(&self) -> &ResolutionOptions {
        &self.options
    }

    /// Build a versioned route from `(version, handler)` pairs
    ///
    /// `overrides` is applied over this dispatcher's options for this route only.
    pub fn version<I, K, H>(
        &self,
        handlers: I,
        overrides: OptionsOverride,
    ) -> Result<VersionedRoute<H>, RegistryError>
    where
        I: IntoIterator<Item = (K, H)>,
        K: AsRef<str>,
    {
        let registry = VersionRegistry::build(handlers)?;
        let options = self.options.merged(&overrides);

        info!(
            "Registered {} handler versions (latest: {})",
            registry.len(),
            registry.latest().map_or("none", HandlerEntry::version_str)
        );

        Ok(VersionedRoute {
            inner: Arc::new(RouteInner {
                rules: Arc::clone(&self.rules),
                options,
                registry,
            }),
        })
    }
}

impl Default for VersionDispatcher {
    fn default() -> Self {
        Self::new(None, OptionsOverride::default())
    }
}

#[derive(Debug)]
struct RouteInner<H> {
    rules: Arc<[VersionRule]>,
    options: ResolutionOptions,
    registry: VersionRegistry<H>,
}

/// An immutable version table plus the policy used to pick from it
///
/// Cheap to clone; clones share the same table.
#[derive(Debug)]
pub struct VersionedRoute<H> {
    inner: Arc<RouteInner<H>>,
}

impl<H> Clone for VersionedRoute<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H> VersionedRoute<H> {
    /// Select the handler serving `request`
    ///
    /// The caller reports the entry's version in the configured response
    /// header and invokes its handler.
    pub fn select<R: RequestView + ?Sized>(
        &self,
        request: &R,
    ) -> Result<&HandlerEntry<H>, UnsupportedVersion> {
        let requested = extract_version(&self.inner.rules, request);
        debug!("Requested version: {}", requested);

        match self.resolve(&requested) {
            Some(entry) => {
                debug!("Version {} selected for {}", entry.version_str(), requested);
                Ok(entry)
            }
            None => {
                warn!("Version {} is not supported", requested);
                Err(UnsupportedVersion { requested })
            }
        }
    }

    /// Resolve a specifier, applying the fallback policy when it matches nothing
    pub fn resolve(&self, requested: &str) -> Option<&HandlerEntry<H>> {
        let registry = &self.inner.registry;
        if let Some(entry) = registry.resolve(requested) {
            return Some(entry);
        }

        let options = &self.inner.options;
        if !options.fallback_enabled || registry.is_empty() {
            return None;
        }

        debug!(
            "No handler for {}, falling back to {}",
            requested, options.fallback_specifier
        );
        registry.resolve(&options.fallback_specifier).or_else(|| {
            debug!(
                "Fallback {} matched nothing, using newest release",
                options.fallback_specifier
            );
            registry.resolve_spec(&VersionSpec::any())
        })
    }

    pub fn rules(&self) -> &[VersionRule] {
        &self.inner.rules
    }

    pub fn options(&self) -> &ResolutionOptions {
        &self.inner.options
    }

    pub fn registry(&self) -> &VersionRegistry<H> {
        &self.inner.registry
    }
}
