//! Grant-exchange integration tests using wiremock
//!
//! Verifies the token-endpoint protocol of `GrantExecutor`:
//!
//! - Every exchange authenticates with `Basic base64(client_id:client_secret)`.
//! - Each grant sends exactly the documented form parameters.
//! - Rejections surface as protocol errors carrying status and body.
//! - A forged redirect `state` aborts before any token-endpoint call.

mod common;

use std::sync::Arc;

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{basic_credential, test_credentials, token_response_body, StaticConsent};
use ostinato::{ConsentDriver, Grant, GrantExecutor, OstinatoError};

fn executor(accounts_base: &str, consent: Arc<dyn ConsentDriver>) -> GrantExecutor {
    GrantExecutor::new(
        Arc::new(reqwest::Client::new()),
        Arc::new(test_credentials()),
        consent,
        accounts_base,
        false,
    )
}

// ---------------------------------------------------------------------------
// Basic credential
// ---------------------------------------------------------------------------

/// Every exchange must carry the Basic credential built from
/// `client_id:client_secret`.
#[tokio::test]
async fn test_exchange_sends_basic_credential() {
    common::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("Authorization", basic_credential()))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response_body(
            "tok",
            "",
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let exec = executor(&server.uri(), Arc::new(StaticConsent::new("unused")));
    exec.exchange(Grant::ClientCredentials)
        .await
        .expect("exchange must succeed");

    server.verify().await;
}

// ---------------------------------------------------------------------------
// Grant parameter mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_client_credentials_grant_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response_body(
            "app_token",
            "",
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let exec = executor(&server.uri(), Arc::new(StaticConsent::new("unused")));
    let record = exec.exchange(Grant::ClientCredentials).await.unwrap();
    assert_eq!(record.access_token, "app_token");
    assert!(
        record.refresh_token.is_none(),
        "app-only grants never carry a refresh token"
    );

    server.verify().await;
}

#[tokio::test]
async fn test_authorization_code_grant_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=code_abc"))
        .and(body_string_contains("redirect_uri="))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response_body(
            "user_token",
            "user-top-read",
            Some("refresh_1"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let exec = executor(&server.uri(), Arc::new(StaticConsent::new("code_abc")));
    let record = exec
        .exchange(Grant::AuthorizationCode {
            scope: "user-top-read".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(record.access_token, "user_token");
    assert_eq!(record.refresh_token.as_deref(), Some("refresh_1"));

    server.verify().await;
}

#[tokio::test]
async fn test_refresh_grant_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh_1"))
        .and(body_string_contains("scope=user-top-read"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response_body(
            "newer_token",
            "user-top-read",
            Some("refresh_2"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let exec = executor(&server.uri(), Arc::new(StaticConsent::new("unused")));
    let record = exec
        .exchange(Grant::RefreshToken {
            scope: "user-top-read".to_string(),
            refresh_token: "refresh_1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(record.access_token, "newer_token");
    assert_eq!(record.refresh_token.as_deref(), Some("refresh_2"));

    server.verify().await;
}

/// A refresh response may omit `refresh_token`; the redeemed token must be
/// carried onto the new record so it can be persisted and reused.
#[tokio::test]
async fn test_refresh_response_without_refresh_token_carries_old_one_forward() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response_body(
            "newer_token",
            "user-top-read",
            None,
        )))
        .mount(&server)
        .await;

    let exec = executor(&server.uri(), Arc::new(StaticConsent::new("unused")));
    let record = exec
        .exchange(Grant::RefreshToken {
            scope: "user-top-read".to_string(),
            refresh_token: "refresh_keepme".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(record.refresh_token.as_deref(), Some("refresh_keepme"));
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_rejected_exchange_is_protocol_error_with_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Refresh token revoked"
        })))
        .mount(&server)
        .await;

    let exec = executor(&server.uri(), Arc::new(StaticConsent::new("unused")));
    let err = exec
        .exchange(Grant::RefreshToken {
            scope: "user-top-read".to_string(),
            refresh_token: "revoked".to_string(),
        })
        .await
        .unwrap_err();

    match err.downcast_ref::<OstinatoError>() {
        Some(OstinatoError::Protocol { status, body }) => {
            assert_eq!(*status, 400);
            assert!(body.contains("invalid_grant"), "body lost: {body}");
        }
        other => panic!("expected a protocol error, got: {other:?}"),
    }
}

/// A 2xx response missing expected fields is just as much a protocol
/// failure as a rejection.
#[tokio::test]
async fn test_malformed_success_body_is_protocol_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"token_type": "Bearer"})),
        )
        .mount(&server)
        .await;

    let exec = executor(&server.uri(), Arc::new(StaticConsent::new("unused")));
    let err = exec.exchange(Grant::ClientCredentials).await.unwrap_err();
    assert!(
        matches!(
            err.downcast_ref::<OstinatoError>(),
            Some(OstinatoError::Protocol { status: 200, .. })
        ),
        "got: {err}"
    );
}

// ---------------------------------------------------------------------------
// State verification
// ---------------------------------------------------------------------------

/// A redirect whose `state` does not match the generated nonce must fail
/// with a security error and never reach the token endpoint.
#[tokio::test]
async fn test_forged_state_fails_without_token_endpoint_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response_body(
            "never",
            "",
            None,
        )))
        .expect(0)
        .mount(&server)
        .await;

    let exec = executor(
        &server.uri(),
        Arc::new(StaticConsent::forging("code_abc", "attacker_state")),
    );
    let err = exec
        .exchange(Grant::AuthorizationCode {
            scope: "user-top-read".to_string(),
        })
        .await
        .unwrap_err();

    assert!(
        matches!(err.downcast_ref::<OstinatoError>(), Some(OstinatoError::Security(_))),
        "got: {err}"
    );

    server.verify().await;
}

/// Consent failures propagate as auth-flow errors, also without touching
/// the token endpoint.
#[tokio::test]
async fn test_consent_failure_propagates_as_auth_flow_error() {
    struct FailingConsent;

    #[async_trait::async_trait]
    impl ConsentDriver for FailingConsent {
        async fn request_code(&self, _authorize_url: &str) -> ostinato::Result<ostinato::CodeGrant> {
            Err(OstinatoError::AuthFlow("user walked away".to_string()).into())
        }
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let exec = executor(&server.uri(), Arc::new(FailingConsent));
    let err = exec
        .exchange(Grant::AuthorizationCode {
            scope: "user-top-read".to_string(),
        })
        .await
        .unwrap_err();
    assert!(
        matches!(err.downcast_ref::<OstinatoError>(), Some(OstinatoError::AuthFlow(_))),
        "got: {err}"
    );

    server.verify().await;
}
