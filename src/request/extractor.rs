//! Requested version extraction

#[cfg(test)]
use mockall::automock;

use crate::config::ANY_VERSION;
use crate::request::rule::{RuleKind, VersionRule};

/// Read-only view of the request fields a rule can probe
///
/// Implemented by the host pipeline's request type (see
/// [`crate::http::HttpRequestView`] for axum).
#[cfg_attr(test, automock)]
pub trait RequestView {
    /// Header value by name, case-insensitive
    fn header(&self, name: &str) -> Option<String>;

    /// Query string parameter by name
    fn query(&self, name: &str) -> Option<String>;

    /// Matched route parameter by name
    fn param(&self, name: &str) -> Option<String>;
}

impl VersionRule {
    /// Probe the rule's source. Empty values count as absent.
    pub fn probe<R: RequestView + ?Sized>(&self, request: &R) -> Option<String> {
        let value = match self.kind() {
            RuleKind::Header => request.header(self.name()),
            RuleKind::Query => request.query(self.name()),
            RuleKind::Param => request.param(self.name()),
        };
        value.filter(|v| !v.is_empty())
    }
}

/// Extract the requested version specifier
///
/// Rules are probed in order and the first non-empty value wins; later rules
/// are not probed. Without any value the request asks for `*`.
pub fn extract_version<R: RequestView + ?Sized>(rules: &[VersionRule], request: &R) -> String {
    rules
        .iter()
        .find_map(|rule| rule.probe(request))
        .unwrap_or_else(|| ANY_VERSION.to_string())
}
