//! Version registry: handlers ranked from newest to oldest

use indexmap::IndexMap;
use indexmap::map::Entry;
use semver::Version;

use crate::version::error::RegistryError;
use crate::version::range::VersionSpec;
use crate::version::semver::clean_version;

/// A handler bound to the version it serves
#[derive(Debug, Clone)]
pub struct HandlerEntry<H> {
    version: Version,
    label: String,
    handler: H,
}

impl<H> HandlerEntry<H> {
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Normalized version string, as reported back to clients
    pub fn version_str(&self) -> &str {
        &self.label
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

/// Handlers sorted descending by semantic version precedence
///
/// Built once per versioned route and never mutated afterwards, so a single
/// instance can be shared by every request.
#[derive(Debug, Clone)]
pub struct VersionRegistry<H> {
    entries: Vec<HandlerEntry<H>>,
}

impl<H> VersionRegistry<H> {
    /// Build a registry from `(version, handler)` pairs
    ///
    /// Keys are cleaned (`" v1.2.3 "` becomes `1.2.3`) before ranking.
    ///
    /// # Errors
    /// * `InvalidVersion` - a key is not a semantic version
    /// * `DuplicateVersion` - two keys clean to the same version
    pub fn build<I, K>(handlers: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (K, H)>,
        K: AsRef<str>,
    {
        let mut ranked = IndexMap::new();

        for (key, handler) in handlers {
            let key = key.as_ref();
            let version =
                clean_version(key).ok_or_else(|| RegistryError::InvalidVersion(key.to_string()))?;

            match ranked.entry(version) {
                Entry::Occupied(entry) => {
                    return Err(RegistryError::DuplicateVersion(entry.key().to_string()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(handler);
                }
            }
        }

        ranked.sort_by(|a, _, b, _| b.cmp(a));

        let entries = ranked
            .into_iter()
            .map(|(version, handler)| HandlerEntry {
                label: version.to_string(),
                version,
                handler,
            })
            .collect();

        Ok(Self { entries })
    }

    /// Find the newest entry satisfying `specifier`
    ///
    /// Returns `None` when nothing satisfies it or the specifier is not a
    /// valid range.
    pub fn resolve(&self, specifier: &str) -> Option<&HandlerEntry<H>> {
        let spec = VersionSpec::parse(specifier)?;
        self.resolve_spec(&spec)
    }

    /// Find the newest entry satisfying an already parsed specifier
    pub fn resolve_spec(&self, spec: &VersionSpec) -> Option<&HandlerEntry<H>> {
        self.entries.iter().find(|entry| spec.satisfies(&entry.version))
    }

    pub fn latest(&self) -> Option<&HandlerEntry<H>> {
        self.entries.first()
    }

    /// Normalized version strings, newest first
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(HandlerEntry::version_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandlerEntry<H>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
