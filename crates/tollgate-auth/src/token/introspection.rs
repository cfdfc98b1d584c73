//! Token introspection response assembly (RFC 7662).
//!
//! This module builds the JSON claim set an authorization server discloses
//! to a protected-resource caller, applying the RFC 7662 suppression rules
//! and administrator-configured claim filtering.
//!
//! # Security Considerations
//!
//! - An inactive token never discloses its validity window: `exp` and `nbf`
//!   are dropped (and actively removed) once `active` is false
//! - Filtered claims are removed last, after all conditional logic, so any
//!   claim can be suppressed by name
//! - Never reveal why a token is inactive (expired vs revoked vs invalid)
//!
//! # Example
//!
//! ```
//! use tollgate_auth::token::IntrospectionResponseBuilder;
//!
//! let json = IntrospectionResponseBuilder::new()
//!     .with_active(true)
//!     .with_expiration(1_714_568_400)
//!     .with_client_id("client-abc")
//!     .with_scope("openid email")
//!     .build(&[])
//!     .unwrap();
//! assert!(json.contains("\"active\":true"));
//! ```
//!
//! # References
//!
//! - [RFC 7662 - OAuth 2.0 Token Introspection](https://tools.ietf.org/html/rfc7662)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

use super::binding::X5T_S256;
use super::record::AccessTokenRecord;

/// Claim names used in introspection responses.
pub mod claims {
    /// Required token validity indicator.
    pub const ACTIVE: &str = "active";
    /// Space-separated scope list.
    pub const SCOPE: &str = "scope";
    /// Requesting client identifier.
    pub const CLIENT_ID: &str = "client_id";
    /// Human-readable resource owner identifier.
    pub const USERNAME: &str = "username";
    /// Token type.
    pub const TOKEN_TYPE: &str = "token_type";
    /// Expiration time, seconds since epoch.
    pub const EXP: &str = "exp";
    /// Issuance time, seconds since epoch.
    pub const IAT: &str = "iat";
    /// Not-before time, seconds since epoch.
    pub const NBF: &str = "nbf";
    /// Subject identifier.
    pub const SUB: &str = "sub";
    /// Intended audience, string or array of strings.
    pub const AUD: &str = "aud";
    /// Token issuer.
    pub const ISS: &str = "iss";
    /// Token identifier.
    pub const JTI: &str = "jti";
    /// Impersonating actor subject.
    pub const ACT: &str = "act";
    /// Authorized user type (`APPLICATION` or `APPLICATION_USER`).
    pub const AUT: &str = "aut";
    /// Authentication context class reference.
    pub const ACR: &str = "acr";
    /// User authentication time, seconds since epoch.
    pub const AUTH_TIME: &str = "auth_time";
    /// Proof-of-possession confirmation object.
    pub const CNF: &str = "cnf";
    /// Token binding mechanism.
    pub const BINDING_TYPE: &str = "binding_type";
    /// Token binding reference.
    pub const BINDING_REFERENCE: &str = "binding_reference";
    /// Opaque token string.
    pub const TOKEN_STRING: &str = "token_string";
    /// Authorized organization identifier.
    pub const ORG_ID: &str = "org_id";
    /// Error code for failed introspection.
    pub const ERROR: &str = "error";
    /// Error description for failed introspection.
    pub const ERROR_DESCRIPTION: &str = "error_description";
}

// =============================================================================
// Request Types
// =============================================================================

/// Token introspection request per RFC 7662.
#[derive(Debug, Clone, Deserialize)]
pub struct IntrospectionRequest {
    /// The token to introspect.
    pub token: String,

    /// Optional hint about the token type.
    ///
    /// Per RFC 7662, the server may identify the token type even without
    /// this hint.
    #[serde(default)]
    pub token_type_hint: Option<TokenTypeHint>,
}

/// Token type hint for introspection requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenTypeHint {
    /// The token is an access token.
    AccessToken,
    /// The token is a refresh token.
    RefreshToken,
}

// =============================================================================
// Claim Values
// =============================================================================

/// A single introspection claim value.
///
/// The wire format allows booleans, integers, strings, arrays, and nested
/// objects (e.g. the `cnf` confirmation claim). Modeled as a closed union so
/// serialization stays exhaustive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    /// Boolean claim, e.g. `active`.
    Bool(bool),
    /// Integer claim, e.g. the epoch-second timestamps.
    Integer(i64),
    /// String claim.
    String(String),
    /// Array claim, e.g. a multi-valued `aud`.
    Array(Vec<ClaimValue>),
    /// Nested object claim, e.g. `cnf`.
    Object(BTreeMap<String, ClaimValue>),
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<ClaimValue>> for ClaimValue {
    fn from(value: Vec<ClaimValue>) -> Self {
        Self::Array(value)
    }
}

impl From<BTreeMap<String, ClaimValue>> for ClaimValue {
    fn from(value: BTreeMap<String, ClaimValue>) -> Self {
        Self::Object(value)
    }
}

// =============================================================================
// Response Builder
// =============================================================================

/// Accumulates introspection claims and emits the filtered JSON response.
///
/// Setters follow RFC 7662 disclosure rules:
///
/// - string setters skip blank values, timestamp setters skip zero
/// - `exp` and `nbf` are only written while the builder is in active mode,
///   so `with_active(true)` must come first or they are silently dropped
/// - `with_active(false)` removes any previously written `exp`/`nbf`
/// - the error setters always write, even for blank values
///
/// `build` is non-consuming; repeated builds over unchanged state produce
/// the same response.
#[derive(Debug, Clone, Default)]
pub struct IntrospectionResponseBuilder {
    parameters: BTreeMap<String, ClaimValue>,
    is_active: bool,
}

impl IntrospectionResponseBuilder {
    /// Creates an empty builder in inactive mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates a builder from a token record, the way the introspection
    /// endpoint discloses a looked-up token.
    ///
    /// The active flag is derived from the record's state and set before the
    /// validity window, so `exp`/`nbf` are suppressed for inactive records.
    /// Issuer, audience, and the opaque token string are left to the caller,
    /// which may keep chaining before [`build`](Self::build).
    #[must_use]
    pub fn from_record(record: &AccessTokenRecord) -> Self {
        let mut builder = Self::new()
            .with_active(record.is_active())
            .with_expiration(record.expires_at())
            .with_not_before(record.not_before_at())
            .with_issued_at(record.issued_at())
            .with_client_id(&record.client_id)
            .with_subject(&record.authorized_user.user_id)
            .with_username(&record.authorized_user.username)
            .with_token_type(&record.token_type)
            .with_scope(record.scope_string())
            .with_jti(&record.token_id)
            .with_auth_time(record.auth_time);

        if let Some(user_type) = record.authorized_user.user_type {
            builder = builder.with_authorized_user_type(user_type.as_str());
        }
        if let Some(actor) = &record.authorized_user.impersonator {
            builder = builder.with_impersonator(actor);
        }
        if let Some(acr) = &record.acr {
            builder = builder.with_selected_acr(acr);
        }
        if let Some(org_id) = &record.authorized_organization_id {
            builder = builder.with_org_id(org_id);
        }
        if let Some(binding) = &record.binding {
            builder = builder
                .with_binding_type(&binding.binding_type)
                .with_binding_reference(&binding.binding_reference);
            if let Some(thumbprint) = &binding.cnf_value {
                builder = builder.with_cnf_binding_value(thumbprint);
            }
        }

        builder.with_additional_data(record.properties.clone())
    }

    fn put_if_not_blank(&mut self, claim: &str, value: &str) {
        if !value.trim().is_empty() {
            self.parameters
                .insert(claim.to_string(), ClaimValue::from(value));
        }
    }

    /// Sets the `active` claim.
    ///
    /// When the token is inactive, the validity window must not be
    /// disclosed: any previously written `exp`/`nbf` claims are removed and
    /// later writes to them are rejected.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.parameters
            .insert(claims::ACTIVE.to_string(), ClaimValue::Bool(active));
        if !active {
            self.parameters.remove(claims::EXP);
            self.parameters.remove(claims::NBF);
        }
        self.is_active = active;
        self
    }

    /// Sets the `exp` claim. No-op while inactive or for a zero timestamp.
    #[must_use]
    pub fn with_expiration(mut self, expiration: i64) -> Self {
        if self.is_active && expiration != 0 {
            self.parameters
                .insert(claims::EXP.to_string(), ClaimValue::Integer(expiration));
        }
        self
    }

    /// Sets the `nbf` claim. No-op while inactive or for a zero timestamp.
    #[must_use]
    pub fn with_not_before(mut self, not_before: i64) -> Self {
        if self.is_active && not_before != 0 {
            self.parameters
                .insert(claims::NBF.to_string(), ClaimValue::Integer(not_before));
        }
        self
    }

    /// Sets the `iat` claim for a nonzero timestamp.
    #[must_use]
    pub fn with_issued_at(mut self, issued_at: i64) -> Self {
        if issued_at != 0 {
            self.parameters
                .insert(claims::IAT.to_string(), ClaimValue::Integer(issued_at));
        }
        self
    }

    /// Sets the `auth_time` claim for a nonzero timestamp.
    #[must_use]
    pub fn with_auth_time(mut self, auth_time: i64) -> Self {
        if auth_time != 0 {
            self.parameters
                .insert(claims::AUTH_TIME.to_string(), ClaimValue::Integer(auth_time));
        }
        self
    }

    /// Sets the `sub` claim for a non-blank value.
    #[must_use]
    pub fn with_subject(mut self, subject: impl AsRef<str>) -> Self {
        self.put_if_not_blank(claims::SUB, subject.as_ref());
        self
    }

    /// Sets the `client_id` claim for a non-blank value.
    #[must_use]
    pub fn with_client_id(mut self, client_id: impl AsRef<str>) -> Self {
        self.put_if_not_blank(claims::CLIENT_ID, client_id.as_ref());
        self
    }

    /// Sets the `username` claim for a non-blank value.
    #[must_use]
    pub fn with_username(mut self, username: impl AsRef<str>) -> Self {
        self.put_if_not_blank(claims::USERNAME, username.as_ref());
        self
    }

    /// Sets the `token_type` claim for a non-blank value.
    #[must_use]
    pub fn with_token_type(mut self, token_type: impl AsRef<str>) -> Self {
        self.put_if_not_blank(claims::TOKEN_TYPE, token_type.as_ref());
        self
    }

    /// Sets the `iss` claim for a non-blank value.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl AsRef<str>) -> Self {
        self.put_if_not_blank(claims::ISS, issuer.as_ref());
        self
    }

    /// Sets the `scope` claim for a non-blank value.
    #[must_use]
    pub fn with_scope(mut self, scope: impl AsRef<str>) -> Self {
        self.put_if_not_blank(claims::SCOPE, scope.as_ref());
        self
    }

    /// Sets the `jti` claim for a non-blank value.
    #[must_use]
    pub fn with_jti(mut self, jti: impl AsRef<str>) -> Self {
        self.put_if_not_blank(claims::JTI, jti.as_ref());
        self
    }

    /// Sets the `act` impersonation claim for a non-blank value.
    #[must_use]
    pub fn with_impersonator(mut self, impersonator: impl AsRef<str>) -> Self {
        self.put_if_not_blank(claims::ACT, impersonator.as_ref());
        self
    }

    /// Sets the `aut` claim for a non-blank value.
    #[must_use]
    pub fn with_authorized_user_type(mut self, user_type: impl AsRef<str>) -> Self {
        self.put_if_not_blank(claims::AUT, user_type.as_ref());
        self
    }

    /// Sets the `acr` claim for a non-blank value.
    #[must_use]
    pub fn with_selected_acr(mut self, acr: impl AsRef<str>) -> Self {
        self.put_if_not_blank(claims::ACR, acr.as_ref());
        self
    }

    /// Sets the `binding_type` claim for a non-blank value.
    #[must_use]
    pub fn with_binding_type(mut self, binding_type: impl AsRef<str>) -> Self {
        self.put_if_not_blank(claims::BINDING_TYPE, binding_type.as_ref());
        self
    }

    /// Sets the `binding_reference` claim for a non-blank value.
    #[must_use]
    pub fn with_binding_reference(mut self, binding_reference: impl AsRef<str>) -> Self {
        self.put_if_not_blank(claims::BINDING_REFERENCE, binding_reference.as_ref());
        self
    }

    /// Sets the `token_string` claim for a non-blank value.
    #[must_use]
    pub fn with_token_string(mut self, token_string: impl AsRef<str>) -> Self {
        self.put_if_not_blank(claims::TOKEN_STRING, token_string.as_ref());
        self
    }

    /// Sets the `org_id` claim for a non-blank value.
    #[must_use]
    pub fn with_org_id(mut self, org_id: impl AsRef<str>) -> Self {
        self.put_if_not_blank(claims::ORG_ID, org_id.as_ref());
        self
    }

    /// Sets the `aud` claim for a non-blank value.
    ///
    /// A comma-separated value becomes an array with one entry per segment,
    /// in the original order; a single-segment value stays a scalar string.
    #[must_use]
    pub fn with_audience(mut self, audience: impl AsRef<str>) -> Self {
        let audience = audience.as_ref();
        if !audience.trim().is_empty() {
            let segments: Vec<&str> = audience.split(',').collect();
            let value = if segments.len() == 1 {
                ClaimValue::from(audience)
            } else {
                ClaimValue::Array(segments.into_iter().map(ClaimValue::from).collect())
            };
            self.parameters.insert(claims::AUD.to_string(), value);
        }
        self
    }

    /// Sets the `cnf` confirmation claim for a non-blank certificate
    /// thumbprint, as `{"x5t#S256": "<thumbprint>"}` per RFC 8705.
    #[must_use]
    pub fn with_cnf_binding_value(mut self, thumbprint: impl AsRef<str>) -> Self {
        let thumbprint = thumbprint.as_ref();
        if !thumbprint.trim().is_empty() {
            let mut cnf = BTreeMap::new();
            cnf.insert(X5T_S256.to_string(), ClaimValue::from(thumbprint));
            self.parameters
                .insert(claims::CNF.to_string(), ClaimValue::Object(cnf));
        }
        self
    }

    /// Sets the `error` claim unconditionally, preserving blank values.
    #[must_use]
    pub fn with_error_code(mut self, error_code: impl Into<String>) -> Self {
        self.parameters
            .insert(claims::ERROR.to_string(), ClaimValue::String(error_code.into()));
        self
    }

    /// Sets the `error_description` claim unconditionally, preserving blank
    /// values.
    #[must_use]
    pub fn with_error_description(mut self, description: impl Into<String>) -> Self {
        self.parameters.insert(
            claims::ERROR_DESCRIPTION.to_string(),
            ClaimValue::String(description.into()),
        );
        self
    }

    /// Merges extension claims into the response, entry by entry. An entry
    /// overwrites any existing claim of the same name.
    #[must_use]
    pub fn with_additional_data(
        mut self,
        additional_data: impl IntoIterator<Item = (String, ClaimValue)>,
    ) -> Self {
        for (claim, value) in additional_data {
            self.parameters.insert(claim, value);
        }
        self
    }

    /// The claims accumulated so far, before filtering.
    #[must_use]
    pub fn claims(&self) -> &BTreeMap<String, ClaimValue> {
        &self.parameters
    }

    /// Removes every administrator-filtered claim and serializes the rest.
    ///
    /// Filtering happens after all conditional logic, so any claim can be
    /// suppressed by name, including `active` and `error`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Serialization`] if a claim value cannot be
    /// represented in the wire format.
    pub fn build(&self, filtered_claims: &[String]) -> Result<String, AuthError> {
        let mut parameters = self.parameters.clone();
        for claim in filtered_claims {
            parameters.remove(claim);
        }

        tracing::debug!(
            active = self.is_active,
            claims = parameters.len(),
            "Built introspection response"
        );

        serde_json::to_string(&parameters).map_err(|e| AuthError::serialization(e.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================
