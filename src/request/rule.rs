//! Extraction rules describing where a requested version is read from

use serde::Deserialize;

use crate::config::DEFAULT_VERSION_HEADER;

/// Request source probed by a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Request header (`Accept-Version: ^1.0`), matched case-insensitively
    Header,
    /// Query string parameter (`?api-version=1.0.0`)
    Query,
    /// Matched route parameter (`/{ver}/`)
    Param,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Header => "header",
            RuleKind::Query => "query",
            RuleKind::Param => "param",
        }
    }
}

impl std::str::FromStr for RuleKind {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "header" => Ok(RuleKind::Header),
            "query" => Ok(RuleKind::Query),
            "param" => Ok(RuleKind::Param),
            other => Err(RuleError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Rule name must not be empty")]
    EmptyName,

    #[error("Unknown rule type: {0}")]
    UnknownKind(String),
}

/// One source to probe for a requested version
///
/// Deserializes from `{"type": "header", "name": "Accept-Version"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawVersionRule")]
pub struct VersionRule {
    kind: RuleKind,
    name: String,
}

#[derive(Deserialize)]
struct RawVersionRule {
    #[serde(rename = "type")]
    kind: RuleKind,
    name: String,
}

impl TryFrom<RawVersionRule> for VersionRule {
    type Error = RuleError;

    fn try_from(raw: RawVersionRule) -> Result<Self, Self::Error> {
        Self::new(raw.kind, raw.name)
    }
}

impl VersionRule {
    pub fn new(kind: RuleKind, name: impl Into<String>) -> Result<Self, RuleError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RuleError::EmptyName);
        }
        Ok(Self { kind, name })
    }

    pub fn header(name: impl Into<String>) -> Result<Self, RuleError> {
        Self::new(RuleKind::Header, name)
    }

    pub fn query(name: impl Into<String>) -> Result<Self, RuleError> {
        Self::new(RuleKind::Query, name)
    }

    pub fn param(name: impl Into<String>) -> Result<Self, RuleError> {
        Self::new(RuleKind::Param, name)
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Rules used when none are configured: the `Accept-Version` header
pub fn default_rules() -> Vec<VersionRule> {
    vec![VersionRule {
        kind: RuleKind::Header,
        name: DEFAULT_VERSION_HEADER.to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn new_rejects_empty_name() {
        assert_eq!(VersionRule::query(""), Err(RuleError::EmptyName));
    }

    #[test]
    fn default_rules_read_accept_version_header() {
        assert_eq!(
            default_rules(),
            vec![VersionRule::header("Accept-Version").unwrap()]
        );
    }

    #[rstest]
    #[case(RuleKind::Header)]
    #[case(RuleKind::Query)]
    #[case(RuleKind::Param)]
    fn rule_kind_round_trips_through_str(#[case] kind: RuleKind) {
        assert_eq!(kind.as_str().parse::<RuleKind>(), Ok(kind));
    }

    #[test]
    fn rule_kind_from_unknown_str_fails() {
        assert_eq!(
            "cookie".parse::<RuleKind>(),
            Err(RuleError::UnknownKind("cookie".to_string()))
        );
    }

    #[test]
    fn rules_deserialize_from_type_and_name() {
        let rules = serde_json::from_value::<Vec<VersionRule>>(json!([
            { "type": "header", "name": "Accept-Version" },
            { "type": "param", "name": "ver" },
            { "type": "query", "name": "api-version" }
        ]))
        .unwrap();

        assert_eq!(
            rules,
            vec![
                VersionRule::header("Accept-Version").unwrap(),
                VersionRule::param("ver").unwrap(),
                VersionRule::query("api-version").unwrap(),
            ]
        );
    }

    #[test]
    fn rules_with_empty_name_fail_to_deserialize() {
        let result =
            serde_json::from_value::<VersionRule>(json!({ "type": "query", "name": "" }));

        assert!(result.is_err());
    }
}
