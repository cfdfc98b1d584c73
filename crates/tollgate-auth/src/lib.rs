//! # tollgate-auth
//!
//! Token introspection core for the Tollgate authorization server.
//!
//! This crate provides:
//! - Access token records as looked up by the token store
//! - RFC 7662 introspection response assembly with disclosure rules
//! - Administrator-configured claim filtering
//! - Proof-of-possession (`cnf`) binding claims per RFC 8705
//!
//! ## Overview
//!
//! Token persistence, signature validation, and the HTTP endpoint live
//! outside this crate. The flow is: the token store produces an
//! [`AccessTokenRecord`] carrying a validity verdict, the caller feeds its
//! fields into an [`IntrospectionResponseBuilder`], and `build` emits the
//! final JSON claim set with filtered claims removed.
//!
//! ## Modules
//!
//! - [`config`] - Introspection configuration (filtered claims)
//! - [`error`] - Error types for assembly and serialization
//! - [`token`] - Token records, bindings, and response assembly

pub mod config;
pub mod error;
pub mod token;

pub use config::IntrospectionConfig;
pub use error::{AuthError, ErrorCategory};
pub use token::{
    AccessTokenRecord, AuthorizedUser, AuthorizedUserType, ClaimValue, IntrospectionRequest,
    IntrospectionResponseBuilder, TokenBinding, TokenState, TokenTypeHint, X5T_S256,
};

/// Type alias for authentication/authorization results.
pub type AuthResult<T> = Result<T, AuthError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use tollgate_auth::prelude::*;
/// ```
pub mod prelude {
    pub use crate::AuthResult;
    pub use crate::config::IntrospectionConfig;
    pub use crate::error::{AuthError, ErrorCategory};
    pub use crate::token::{
        AccessTokenRecord, AuthorizedUser, AuthorizedUserType, ClaimValue, IntrospectionRequest,
        IntrospectionResponseBuilder, TokenBinding, TokenState, TokenTypeHint,
    };
}
