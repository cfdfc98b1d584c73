//! End-to-end introspection response assembly tests.
//!
//! Exercises the full flow the introspection endpoint performs: take a token
//! record with a validity verdict, assemble the claim set, apply configured
//! claim filtering, and serialize to the RFC 7662 wire format.

use assert_json_diff::{assert_json_eq, assert_json_include};
use time::macros::datetime;
use tollgate_auth::prelude::*;

fn active_record() -> AccessTokenRecord {
    let mut user = AuthorizedUser::new("user-1", "alice");
    user.user_type = Some(AuthorizedUserType::ApplicationUser);

    let mut record = AccessTokenRecord::new(
        "client-abc",
        user,
        vec!["openid".to_string(), "email".to_string()],
        datetime!(2024-05-01 12:00:00 UTC),
        3_600_000,
        "Bearer",
    );
    record.token_id = "7a3fca0c-ec79-4a4e-bb4b-3a5c86b97a1a".to_string();
    record.auth_time = 1_714_562_000;
    record
}

#[test]
fn active_record_produces_full_claim_set() {
    let record = active_record();
    let json = IntrospectionResponseBuilder::from_record(&record)
        .with_issuer("https://auth.example.com")
        .with_audience("https://api.example.com")
        .build(&[])
        .unwrap();

    let actual: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_json_eq!(
        actual,
        serde_json::json!({
            "active": true,
            "scope": "openid email",
            "client_id": "client-abc",
            "username": "alice",
            "token_type": "Bearer",
            "exp": 1_714_568_400_i64,
            "iat": 1_714_564_800_i64,
            "sub": "user-1",
            "aud": "https://api.example.com",
            "iss": "https://auth.example.com",
            "jti": "7a3fca0c-ec79-4a4e-bb4b-3a5c86b97a1a",
            "aut": "APPLICATION_USER",
            "auth_time": 1_714_562_000_i64,
        })
    );
}

#[test]
fn revoked_record_reports_only_inactive() {
    let mut record = active_record();
    record.state = TokenState::Revoked;
    record.not_before = Some(datetime!(2024-05-01 12:05:00 UTC));

    let json = IntrospectionResponseBuilder::from_record(&record)
        .build(&[])
        .unwrap();
    let actual: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(actual["active"], serde_json::json!(false));
    assert!(actual.get("exp").is_none());
    assert!(actual.get("nbf").is_none());
    // Non-window metadata is still disclosed; the state is not leaked.
    assert_eq!(actual["client_id"], serde_json::json!("client-abc"));
    assert!(actual.get("state").is_none());
}

#[test]
fn bound_token_discloses_binding_and_cnf() {
    let mut record = active_record();
    record.binding = Some(
        TokenBinding::new("certificate", "ref-5678")
            .with_cnf_value("bwcK0esc3ACC3DB2Y5_lESsXE8o9ltc05O89jdN-dg2"),
    );

    let json = IntrospectionResponseBuilder::from_record(&record)
        .build(&[])
        .unwrap();
    let actual: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_json_include!(
        actual: actual,
        expected: serde_json::json!({
            "binding_type": "certificate",
            "binding_reference": "ref-5678",
            "cnf": {"x5t#S256": "bwcK0esc3ACC3DB2Y5_lESsXE8o9ltc05O89jdN-dg2"},
        })
    );
}

#[test]
fn configured_filtering_applies_to_record_assembly() {
    let config = IntrospectionConfig {
        filtered_claims: vec!["username".to_string(), "cnf".to_string()],
    };
    let mut record = active_record();
    record.binding =
        Some(TokenBinding::new("certificate", "ref-5678").with_cnf_value("thumbprint"));

    let json = IntrospectionResponseBuilder::from_record(&record)
        .build(&config.filtered_claims)
        .unwrap();
    let actual: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert!(actual.get("username").is_none());
    assert!(actual.get("cnf").is_none());
    assert_eq!(actual["binding_type"], serde_json::json!("certificate"));
    assert_eq!(actual["sub"], serde_json::json!("user-1"));
}

#[test]
fn extension_properties_flow_into_response() {
    let mut record = active_record();
    record
        .properties
        .insert("department".to_string(), ClaimValue::from("engineering"));

    let json = IntrospectionResponseBuilder::from_record(&record)
        .build(&[])
        .unwrap();
    let actual: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(actual["department"], serde_json::json!("engineering"));
}

#[test]
fn error_path_bypasses_record_assembly() {
    let json = IntrospectionResponseBuilder::new()
        .with_active(false)
        .with_error_code("invalid_token")
        .with_error_description("")
        .build(&[])
        .unwrap();

    let actual: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_json_eq!(
        actual,
        serde_json::json!({
            "active": false,
            "error": "invalid_token",
            "error_description": "",
        })
    );
}
