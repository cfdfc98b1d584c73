//! Proof-of-possession token binding.
//!
//! A binding ties an issued token to the channel or client instance that is
//! allowed to use it, e.g. a mutual-TLS client certificate (RFC 8705) or a
//! session cookie. Introspection discloses the binding type and reference,
//! and, for certificate bindings, a `cnf` confirmation claim carrying the
//! certificate thumbprint.
//!
//! # References
//!
//! - [RFC 8705 - OAuth 2.0 Mutual-TLS Client Authentication and Certificate-Bound Access Tokens](https://tools.ietf.org/html/rfc8705)

use serde::{Deserialize, Serialize};

/// Confirmation-key member name for an X.509 SHA-256 certificate thumbprint.
pub const X5T_S256: &str = "x5t#S256";

/// Binding between an issued token and its proof-of-possession mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBinding {
    /// Binding mechanism identifier (e.g. `certificate`, `sso-session`).
    pub binding_type: String,

    /// Opaque reference identifying the bound channel or session.
    pub binding_reference: String,

    /// Confirmation value for certificate bindings: the SHA-256 thumbprint
    /// of the TLS client certificate presented at issuance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cnf_value: Option<String>,
}

impl TokenBinding {
    /// Creates a new token binding.
    #[must_use]
    pub fn new(binding_type: impl Into<String>, binding_reference: impl Into<String>) -> Self {
        Self {
            binding_type: binding_type.into(),
            binding_reference: binding_reference.into(),
            cnf_value: None,
        }
    }

    /// Sets the certificate-thumbprint confirmation value.
    #[must_use]
    pub fn with_cnf_value(mut self, thumbprint: impl Into<String>) -> Self {
        self.cnf_value = Some(thumbprint.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_without_cnf_value() {
        let binding = TokenBinding::new("sso-session", "ref-1234");
        assert_eq!(binding.binding_type, "sso-session");
        assert_eq!(binding.binding_reference, "ref-1234");
        assert!(binding.cnf_value.is_none());

        let json = serde_json::to_string(&binding).unwrap();
        assert!(!json.contains("cnfValue"));
    }

    #[test]
    fn test_certificate_binding_round_trip() {
        let binding = TokenBinding::new("certificate", "ref-5678")
            .with_cnf_value("bwcK0esc3ACC3DB2Y5_lESsXE8o9ltc05O89jdN-dg2");

        let json = serde_json::to_string(&binding).unwrap();
        let parsed: TokenBinding = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, binding);
    }
}
