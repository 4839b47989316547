use serde::Deserialize;

use crate::request::VersionRule;

// =============================================================================
// Defaults
// =============================================================================

/// Request header read when no extraction rules are configured
pub const DEFAULT_VERSION_HEADER: &str = "Accept-Version";

/// Response header reporting the version that served the request
pub const DEFAULT_RESPONSE_HEADER: &str = "x-api-version";

/// Specifier matching any released version
pub const ANY_VERSION: &str = "*";

/// Resolution options in effect for one versioned route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOptions {
    /// Header set to the matched version on every successful dispatch
    pub response_header: String,
    /// Whether unmatched requests fall back to `fallback_specifier`, then `*`
    pub fallback_enabled: bool,
    /// First range tried when the requested one matches nothing
    pub fallback_specifier: String,
}

impl Default for ResolutionOptions {
    fn default() -> Self {
        Self {
            response_header: DEFAULT_RESPONSE_HEADER.to_string(),
            fallback_enabled: false,
            fallback_specifier: ANY_VERSION.to_string(),
        }
    }
}

impl ResolutionOptions {
    /// Apply an override on top of these options; fields set in `overrides` win.
    pub fn merged(&self, overrides: &OptionsOverride) -> Self {
        Self {
            response_header: overrides
                .response_header
                .clone()
                .unwrap_or_else(|| self.response_header.clone()),
            fallback_enabled: overrides.fallback_enabled.unwrap_or(self.fallback_enabled),
            fallback_specifier: overrides
                .fallback_specifier
                .clone()
                .unwrap_or_else(|| self.fallback_specifier.clone()),
        }
    }
}

/// Partial options; unset fields defer to the next level
/// (call-time override > dispatcher override > library default)
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionsOverride {
    pub response_header: Option<String>,
    pub fallback_enabled: Option<bool>,
    pub fallback_specifier: Option<String>,
}

impl OptionsOverride {
    pub fn response_header(mut self, name: impl Into<String>) -> Self {
        self.response_header = Some(name.into());
        self
    }

    /// Enable fallback, trying `specifier` before the newest version
    pub fn fallback(mut self, specifier: impl Into<String>) -> Self {
        self.fallback_enabled = Some(true);
        self.fallback_specifier = Some(specifier.into());
        self
    }

    pub fn fallback_enabled(mut self, enabled: bool) -> Self {
        self.fallback_enabled = Some(enabled);
        self
    }
}

/// Dispatcher configuration as read from a config file
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DispatcherConfig {
    /// Extraction rules; `None` selects the `Accept-Version` header
    pub rules: Option<Vec<VersionRule>>,
    pub options: OptionsOverride,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merged_with_empty_override_keeps_defaults() {
        let options = ResolutionOptions::default().merged(&OptionsOverride::default());

        assert_eq!(
            options,
            ResolutionOptions {
                response_header: "x-api-version".to_string(),
                fallback_enabled: false,
                fallback_specifier: "*".to_string(),
            }
        );
    }

    #[test]
    fn merged_applies_levels_field_by_field() {
        let dispatcher_level = ResolutionOptions::default()
            .merged(&OptionsOverride::default().response_header("api-version"));
        let call_level = dispatcher_level.merged(&OptionsOverride::default().fallback("1.2.0"));

        assert_eq!(
            call_level,
            ResolutionOptions {
                response_header: "api-version".to_string(),
                fallback_enabled: true,
                fallback_specifier: "1.2.0".to_string(),
            }
        );
    }

    #[test]
    fn explicit_default_value_still_overrides() {
        let enabled = ResolutionOptions::default()
            .merged(&OptionsOverride::default().fallback_enabled(true));
        let disabled = enabled.merged(&OptionsOverride::default().fallback_enabled(false));

        assert!(enabled.fallback_enabled);
        assert!(!disabled.fallback_enabled);
    }

    #[test]
    fn options_override_from_partial_object_leaves_missing_fields_unset() {
        let result = serde_json::from_value::<OptionsOverride>(json!({
            "fallbackEnabled": true
        }))
        .unwrap();

        assert_eq!(
            result,
            OptionsOverride {
                response_header: None,
                fallback_enabled: Some(true),
                fallback_specifier: None,
            }
        );
    }

    #[test]
    fn dispatcher_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<DispatcherConfig>(json!({
            "rules": [
                { "type": "header", "name": "Accept-Version" },
                { "type": "query", "name": "api-version" }
            ],
            "options": {
                "responseHeader": "x-served-version",
                "fallbackEnabled": true,
                "fallbackSpecifier": "^1"
            }
        }))
        .unwrap();

        assert_eq!(
            result,
            DispatcherConfig {
                rules: Some(vec![
                    VersionRule::header("Accept-Version").unwrap(),
                    VersionRule::query("api-version").unwrap(),
                ]),
                options: OptionsOverride {
                    response_header: Some("x-served-version".to_string()),
                    fallback_enabled: Some(true),
                    fallback_specifier: Some("^1".to_string()),
                },
            }
        );
    }

    #[test]
    fn dispatcher_config_from_empty_object_uses_defaults() {
        let result = serde_json::from_value::<DispatcherConfig>(json!({})).unwrap();

        assert_eq!(result, DispatcherConfig::default());
    }
}
