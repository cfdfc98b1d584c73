//! Access token records.
//!
//! An [`AccessTokenRecord`] is the in-memory view of a previously issued
//! token as returned by the token store, together with the validity verdict
//! computed by the validation layer. Records are read-only inputs to
//! introspection response assembly; nothing in this crate mutates them.

use std::collections::HashMap;

use time::OffsetDateTime;
use uuid::Uuid;

use super::binding::TokenBinding;
use super::introspection::ClaimValue;

/// Lifecycle state of an issued token.
///
/// The state is decided by the token store and validation layer. For
/// introspection purposes only [`TokenState::Active`] discloses the token's
/// validity window; every other state is reported as inactive without
/// revealing why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenState {
    /// Token is issued and within its validity window.
    Active,
    /// Token has passed its expiry time.
    Expired,
    /// Token was explicitly revoked.
    Revoked,
    /// Token was superseded or administratively deactivated.
    Inactive,
}

impl TokenState {
    /// Returns the state as its canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Expired => "EXPIRED",
            Self::Revoked => "REVOKED",
            Self::Inactive => "INACTIVE",
        }
    }

    /// Parses a canonical state string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ACTIVE" => Some(Self::Active),
            "EXPIRED" => Some(Self::Expired),
            "REVOKED" => Some(Self::Revoked),
            "INACTIVE" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type of principal a token was authorized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorizedUserType {
    /// Token issued to the application itself (client credentials).
    Application,
    /// Token issued on behalf of an end user.
    ApplicationUser,
}

impl AuthorizedUserType {
    /// Returns the type as its wire string (`aut` claim value).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "APPLICATION",
            Self::ApplicationUser => "APPLICATION_USER",
        }
    }
}

/// The authenticated principal that authorized a token.
///
/// This is a boundary type: resolution of the full user model happens in the
/// identity layer. Introspection only needs the identifiers disclosed in
/// `sub`, `username`, `aut`, and the optional `act` impersonation claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedUser {
    /// Machine-readable subject identifier (`sub` claim).
    pub user_id: String,

    /// Human-readable identifier (`username` claim).
    pub username: String,

    /// Principal type reported in the `aut` claim.
    pub user_type: Option<AuthorizedUserType>,

    /// Subject of the impersonating actor for impersonated tokens
    /// (`act` claim).
    pub impersonator: Option<String>,
}

impl AuthorizedUser {
    /// Creates a principal with just the identifying fields.
    #[must_use]
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            user_type: None,
            impersonator: None,
        }
    }
}

/// A previously issued access or refresh token with its attributes and
/// validity verdict.
///
/// Validity periods are kept in both seconds and milliseconds; writing either
/// unit recomputes the other, so the two can never drift. The fields are
/// private for that reason; everything else is plain data.
///
/// `Clone` produces an independently mutable deep copy: scope, extension
/// properties, and the binding are owned values, so mutating a clone never
/// affects the original.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessTokenRecord {
    /// Client the token was issued to.
    pub client_id: String,

    /// Principal that authorized the token.
    pub authorized_user: AuthorizedUser,

    /// Granted scope values.
    pub scope: Vec<String>,

    /// Token type (e.g. `Bearer`).
    pub token_type: String,

    /// Validity verdict from the token store.
    pub state: TokenState,

    /// Unique identifier of the token record (`jti` claim).
    pub token_id: String,

    /// The opaque access token string.
    pub token: String,

    /// Refresh token issued alongside, if any.
    pub refresh_token: Option<String>,

    /// Authorization code the token was exchanged from, if any.
    pub authorization_code: Option<String>,

    /// Grant type used at issuance.
    pub grant_type: Option<String>,

    /// Whether the resource owner's consent was collected at issuance.
    pub is_consented: bool,

    /// Tenant the token belongs to.
    pub tenant_id: i32,

    /// Organization the token was authorized for, for organization-scoped
    /// tokens.
    pub authorized_organization_id: Option<String>,

    /// Tenant the requesting application resides in, for cross-organization
    /// tokens.
    pub app_resident_tenant_id: Option<i32>,

    /// When the access token was issued.
    pub issued_time: OffsetDateTime,

    /// When the accompanying refresh token was issued.
    pub refresh_token_issued_time: Option<OffsetDateTime>,

    /// Earliest time the token may be used, if restricted.
    pub not_before: Option<OffsetDateTime>,

    /// Proof-of-possession binding, if the token is bound.
    pub binding: Option<TokenBinding>,

    /// Open-ended extension properties, merged into the introspection
    /// response as additional claims.
    pub properties: HashMap<String, ClaimValue>,

    /// Authentication context class reference of the user authentication.
    pub acr: Option<String>,

    /// When the user authenticated, seconds since epoch (0 = unknown).
    pub auth_time: i64,

    validity_period: i64,
    validity_period_millis: i64,
    refresh_token_validity_period: i64,
    refresh_token_validity_period_millis: i64,
}

impl AccessTokenRecord {
    /// Creates a record for a newly looked-up token.
    ///
    /// The validity period is given in milliseconds; the per-second value is
    /// derived from it. A fresh record id is generated; the record starts in
    /// [`TokenState::Active`] and the validation layer overwrites the state
    /// with its verdict.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        authorized_user: AuthorizedUser,
        scope: Vec<String>,
        issued_time: OffsetDateTime,
        validity_period_millis: i64,
        token_type: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            authorized_user,
            scope,
            token_type: token_type.into(),
            state: TokenState::Active,
            token_id: Uuid::new_v4().to_string(),
            token: String::new(),
            refresh_token: None,
            authorization_code: None,
            grant_type: None,
            is_consented: false,
            tenant_id: 0,
            authorized_organization_id: None,
            app_resident_tenant_id: None,
            issued_time,
            refresh_token_issued_time: None,
            not_before: None,
            binding: None,
            properties: HashMap::new(),
            acr: None,
            auth_time: 0,
            validity_period: validity_period_millis / 1000,
            validity_period_millis,
            refresh_token_validity_period: 0,
            refresh_token_validity_period_millis: 0,
        }
    }

    /// Access token validity period in seconds.
    #[must_use]
    pub fn validity_period(&self) -> i64 {
        self.validity_period
    }

    /// Access token validity period in milliseconds.
    #[must_use]
    pub fn validity_period_millis(&self) -> i64 {
        self.validity_period_millis
    }

    /// Sets the access token validity period in seconds, keeping the
    /// millisecond value consistent.
    pub fn set_validity_period(&mut self, seconds: i64) {
        self.validity_period = seconds;
        self.validity_period_millis = seconds * 1000;
    }

    /// Sets the access token validity period in milliseconds, keeping the
    /// per-second value consistent.
    pub fn set_validity_period_millis(&mut self, millis: i64) {
        self.validity_period = millis / 1000;
        self.validity_period_millis = millis;
    }

    /// Refresh token validity period in seconds.
    #[must_use]
    pub fn refresh_token_validity_period(&self) -> i64 {
        self.refresh_token_validity_period
    }

    /// Refresh token validity period in milliseconds.
    #[must_use]
    pub fn refresh_token_validity_period_millis(&self) -> i64 {
        self.refresh_token_validity_period_millis
    }

    /// Sets the refresh token validity period in seconds, keeping the
    /// millisecond value consistent.
    pub fn set_refresh_token_validity_period(&mut self, seconds: i64) {
        self.refresh_token_validity_period = seconds;
        self.refresh_token_validity_period_millis = seconds * 1000;
    }

    /// Sets the refresh token validity period in milliseconds, keeping the
    /// per-second value consistent.
    pub fn set_refresh_token_validity_period_millis(&mut self, millis: i64) {
        self.refresh_token_validity_period = millis / 1000;
        self.refresh_token_validity_period_millis = millis;
    }

    /// Returns `true` if the validation verdict was [`TokenState::Active`].
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == TokenState::Active
    }

    /// Issuance time as seconds since epoch.
    #[must_use]
    pub fn issued_at(&self) -> i64 {
        self.issued_time.unix_timestamp()
    }

    /// Expiry time as seconds since epoch.
    ///
    /// Returns 0 for non-expiring tokens (zero or negative validity period);
    /// the assembler treats 0 as "not provided".
    #[must_use]
    pub fn expires_at(&self) -> i64 {
        if self.validity_period <= 0 {
            return 0;
        }
        self.issued_time.unix_timestamp() + self.validity_period
    }

    /// Not-before time as seconds since epoch (0 when unrestricted).
    #[must_use]
    pub fn not_before_at(&self) -> i64 {
        self.not_before.map_or(0, OffsetDateTime::unix_timestamp)
    }

    /// Scope values joined into the space-separated wire form.
    #[must_use]
    pub fn scope_string(&self) -> String {
        self.scope.join(" ")
    }
}
