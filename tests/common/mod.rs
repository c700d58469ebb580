//! Shared helpers for the integration suites
//!
//! Provides a canned consent driver (so the authorization-code flow runs
//! without a browser), credential/config builders pointed at wiremock
//! servers, and token fixtures.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use ostinato::{
    CodeGrant, ConsentDriver, Credentials, Result, ScopeSet, Spotify, SpotifyConfig, TokenRecord,
};

/// Consent driver that immediately answers with a canned code.
///
/// Echoes the `state` parameter from the authorize URL unless
/// `forged_state` is set, and counts how many times it was driven.
#[allow(dead_code)]
pub struct StaticConsent {
    pub code: String,
    pub forged_state: Option<String>,
    pub calls: AtomicUsize,
}

impl StaticConsent {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            forged_state: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn forging(code: &str, forged_state: &str) -> Self {
        Self {
            code: code.to_string(),
            forged_state: Some(forged_state.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConsentDriver for StaticConsent {
    async fn request_code(&self, authorize_url: &str) -> Result<CodeGrant> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let url = url::Url::parse(authorize_url).expect("authorize URL must be valid");
        let state = url
            .query_pairs()
            .find(|(k, _)| k == "state")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default();
        Ok(CodeGrant {
            code: self.code.clone(),
            state: self.forged_state.clone().unwrap_or(state),
        })
    }
}

/// Credentials used across the suites; `basic_credential()` below matches
/// them.
#[allow(dead_code)]
pub fn test_credentials() -> Credentials {
    Credentials {
        user: "alice".to_string(),
        client_id: "id".to_string(),
        client_secret: "secret".to_string(),
        redirect_uri: "http://127.0.0.1:9090/callback".to_string(),
    }
}

/// `base64("id:secret")`, the Basic credential for [`test_credentials`].
#[allow(dead_code)]
pub fn basic_credential() -> &'static str {
    "Basic aWQ6c2VjcmV0"
}

/// Config pointing both hosts at wiremock and the token file at a temp
/// path.
#[allow(dead_code)]
pub fn test_config(accounts_base: &str, api_base: &str, token_path: PathBuf) -> SpotifyConfig {
    SpotifyConfig {
        accounts_base: accounts_base.to_string(),
        api_base: format!("{api_base}/"),
        token_path: Some(token_path),
        ..Default::default()
    }
}

/// Builds a client wired to the given mock hosts.
#[allow(dead_code)]
pub fn spotify(
    accounts_base: &str,
    api_base: &str,
    token_path: PathBuf,
    consent: Arc<dyn ConsentDriver>,
) -> Spotify {
    Spotify::with_consent(
        test_credentials(),
        test_config(accounts_base, api_base, token_path),
        consent,
    )
    .expect("client construction must succeed")
}

/// A token record expiring `expires_in_secs` from now.
#[allow(dead_code)]
pub fn token_record(
    access_token: &str,
    scope: &str,
    refresh_token: Option<&str>,
    expires_in_secs: i64,
) -> TokenRecord {
    TokenRecord {
        access_token: access_token.to_string(),
        token_type: "Bearer".to_string(),
        scope: ScopeSet::parse(scope),
        expires_in: 3600,
        refresh_token: refresh_token.map(String::from),
        expires_at: Utc::now() + Duration::seconds(expires_in_secs),
    }
}

/// Seeds the token file directly, bypassing the store API so arbitrary
/// cache states (including app-only records) can be set up.
#[allow(dead_code)]
pub fn seed_token_file(path: &std::path::Path, record: &TokenRecord) {
    std::fs::write(path, serde_json::to_string(record).unwrap()).unwrap();
}

/// Installs a stderr tracing subscriber honoring `RUST_LOG`.
///
/// Safe to call from every test; repeat installations are ignored.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// A standard token-endpoint response body.
#[allow(dead_code)]
pub fn token_response_body(
    access_token: &str,
    scope: &str,
    refresh_token: Option<&str>,
) -> serde_json::Value {
    let mut body = serde_json::json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "scope": scope,
        "expires_in": 3600,
    });
    if let Some(refresh) = refresh_token {
        body["refresh_token"] = serde_json::json!(refresh);
    }
    body
}
