//! Introspection configuration.
//!
//! Administrators can suppress individual claims from every introspection
//! response, regardless of how the claim was populated. The list is owned by
//! the server configuration layer; this crate consumes it as a plain value
//! passed to [`IntrospectionResponseBuilder::build`].
//!
//! # Example (TOML)
//!
//! ```toml
//! [auth.introspection]
//! filtered_claims = ["username", "cnf"]
//! ```
//!
//! [`IntrospectionResponseBuilder::build`]: crate::token::IntrospectionResponseBuilder::build

use serde::{Deserialize, Serialize};

/// Configuration for the token introspection endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IntrospectionConfig {
    /// Claim names that are never disclosed in introspection responses.
    ///
    /// Filtering is applied as the very last assembly step, so any claim
    /// can be suppressed by name, including `active` and `error`.
    pub filtered_claims: Vec<String>,
}

impl IntrospectionConfig {
    /// Returns `true` if the named claim is configured to be suppressed.
    #[must_use]
    pub fn is_filtered(&self, claim: &str) -> bool {
        self.filtered_claims.iter().any(|c| c == claim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_filtered_claims() {
        let config = IntrospectionConfig::default();
        assert!(config.filtered_claims.is_empty());
        assert!(!config.is_filtered("username"));
    }

    #[test]
    fn test_deserialize_filtered_claims() {
        let config: IntrospectionConfig =
            serde_json::from_str(r#"{"filtered_claims": ["username", "cnf"]}"#).unwrap();
        assert!(config.is_filtered("username"));
        assert!(config.is_filtered("cnf"));
        assert!(!config.is_filtered("scope"));
    }

    #[test]
    fn test_missing_field_defaults_empty() {
        let config: IntrospectionConfig = serde_json::from_str("{}").unwrap();
        assert!(config.filtered_claims.is_empty());
    }
}
