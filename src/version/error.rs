use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Invalid version: {0:?} is not a semantic version")]
    InvalidVersion(String),

    #[error("Duplicate version: {0} is registered more than once")]
    DuplicateVersion(String),
}

/// No registered handler satisfies the requested specifier, fallbacks included
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Version {requested} is not supported")]
pub struct UnsupportedVersion {
    /// Specifier as extracted from the request
    pub requested: String,
}
