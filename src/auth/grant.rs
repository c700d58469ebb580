//! OAuth2 grant exchanges against the accounts service
//!
//! The [`GrantExecutor`] performs the three supported exchanges at the
//! token endpoint: client-credentials (app-only), authorization-code
//! (user consent via the [`ConsentDriver`]), and refresh-token. Every
//! exchange authenticates with an HTTP Basic credential built from
//! `client_id:client_secret` and POSTs a form-encoded grant body.
//!
//! For the authorization-code path the executor also owns the `state`
//! nonce: it generates one per attempt, embeds it in the authorize URL,
//! and refuses to touch the token endpoint unless the redirect echoed the
//! same value back.

use std::sync::Arc;

use base64::Engine as _;
use tracing::{debug, warn};
use url::Url;

use crate::auth::consent::ConsentDriver;
use crate::auth::token::{TokenRecord, TokenResponse};
use crate::config::Credentials;
use crate::error::{OstinatoError, Result};

/// One of the three supported token-endpoint exchanges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grant {
    /// App-only access: no user context, no refresh token
    ClientCredentials,

    /// Interactive user consent for the given scope string
    AuthorizationCode {
        /// Space-delimited scopes to request
        scope: String,
    },

    /// Exchange a previously granted refresh token
    RefreshToken {
        /// Space-delimited scopes to request
        scope: String,
        /// The refresh token obtained from an earlier grant
        refresh_token: String,
    },
}

/// Performs grant exchanges and normalizes the responses.
///
/// The executor is stateless between calls; the
/// [`AuthorizationBroker`](crate::auth::AuthorizationBroker) decides
/// which grant to run and owns the resulting record.
pub struct GrantExecutor {
    http: Arc<reqwest::Client>,
    credentials: Arc<Credentials>,
    consent: Arc<dyn ConsentDriver>,
    accounts_base: String,
    show_dialog: bool,
}

impl GrantExecutor {
    /// Creates an executor for the given application credentials.
    pub fn new(
        http: Arc<reqwest::Client>,
        credentials: Arc<Credentials>,
        consent: Arc<dyn ConsentDriver>,
        accounts_base: impl Into<String>,
        show_dialog: bool,
    ) -> Self {
        Self {
            http,
            credentials,
            consent,
            accounts_base: accounts_base.into(),
            show_dialog,
        }
    }

    /// Runs the given grant and returns the normalized token record.
    ///
    /// # Errors
    ///
    /// - [`OstinatoError::Security`] when the redirect `state` does not
    ///   match the one generated for this attempt; the token endpoint is
    ///   never contacted in that case.
    /// - [`OstinatoError::AuthFlow`] when the consent step fails.
    /// - [`OstinatoError::Protocol`] when the accounts service rejects the
    ///   exchange or returns a body missing expected fields.
    /// - [`OstinatoError::Transport`] on network failure.
    pub async fn exchange(&self, grant: Grant) -> Result<TokenRecord> {
        let form = match &grant {
            Grant::ClientCredentials => {
                vec![("grant_type".to_string(), "client_credentials".to_string())]
            }
            Grant::AuthorizationCode { scope } => {
                let code = self.obtain_code(scope).await?;
                vec![
                    ("grant_type".to_string(), "authorization_code".to_string()),
                    ("code".to_string(), code),
                    (
                        "redirect_uri".to_string(),
                        self.credentials.redirect_uri.clone(),
                    ),
                ]
            }
            Grant::RefreshToken {
                scope,
                refresh_token,
            } => vec![
                ("grant_type".to_string(), "refresh_token".to_string()),
                ("refresh_token".to_string(), refresh_token.clone()),
                ("scope".to_string(), scope.clone()),
            ],
        };

        debug!(grant_type = %form[0].1, "exchanging grant at token endpoint");

        let response = self
            .http
            .post(self.token_endpoint())
            .header("Authorization", format!("Basic {}", self.basic_credential()))
            .form(&form)
            .send()
            .await
            .map_err(OstinatoError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(OstinatoError::Transport)?;

        if !status.is_success() {
            warn!(%status, "token endpoint rejected the exchange");
            return Err(OstinatoError::protocol(status.as_u16(), body).into());
        }

        let raw: TokenResponse = serde_json::from_str(&body)
            .map_err(|_| OstinatoError::protocol(status.as_u16(), body))?;
        let mut record = raw.into_record();

        // A refresh response may omit the refresh token; the one that was
        // just redeemed stays valid, so carry it onto the new record.
        if record.refresh_token.is_none() {
            if let Grant::RefreshToken { refresh_token, .. } = grant {
                record.refresh_token = Some(refresh_token);
            }
        }

        Ok(record)
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Runs the consent step and validates the echoed `state`.
    async fn obtain_code(&self, scope: &str) -> Result<String> {
        let state = generate_state();
        let authorize_url = self.build_authorize_url(scope, &state)?;

        let grant = self.consent.request_code(&authorize_url).await?;

        if grant.state != state {
            return Err(OstinatoError::Security(
                "state mismatch on authorization redirect: possible interception, aborting"
                    .to_string(),
            )
            .into());
        }

        Ok(grant.code)
    }

    /// Builds the user-facing authorize URL for the given scope.
    fn build_authorize_url(&self, scope: &str, state: &str) -> Result<String> {
        let mut url = Url::parse(&format!("{}/authorize", self.accounts_base))
            .map_err(|e| OstinatoError::Config(format!("invalid accounts base URL: {e}")))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("client_id", &self.credentials.client_id);
            query.append_pair("response_type", "code");
            query.append_pair("redirect_uri", &self.credentials.redirect_uri);
            query.append_pair("state", state);
            query.append_pair("scope", scope);
            query.append_pair("show_dialog", if self.show_dialog { "true" } else { "false" });
        }
        Ok(url.to_string())
    }

    /// Token endpoint on the accounts host.
    fn token_endpoint(&self) -> String {
        format!("{}/api/token", self.accounts_base)
    }

    /// `base64(client_id:client_secret)` for the Basic authorization
    /// header.
    fn basic_credential(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(format!(
            "{}:{}",
            self.credentials.client_id, self.credentials.client_secret
        ))
    }
}

/// Generates a random `state` nonce: 16 random bytes, base64url without
/// padding.
fn generate_state() -> String {
    use rand::RngCore as _;
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
