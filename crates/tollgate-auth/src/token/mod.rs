//! Token records and introspection response assembly.
//!
//! This module provides:
//!
//! - Access token records as produced by the token store
//! - Proof-of-possession token bindings (RFC 8705)
//! - Introspection response assembly (RFC 7662)

pub mod binding;
pub mod introspection;
pub mod record;

pub use binding::{TokenBinding, X5T_S256};
pub use introspection::{
    ClaimValue, IntrospectionRequest, IntrospectionResponseBuilder, TokenTypeHint, claims,
};
pub use record::{AccessTokenRecord, AuthorizedUser, AuthorizedUserType, TokenState};
