//! The API client: construction and request dispatch
//!
//! [`Spotify`] ties the pieces together: a shared HTTP client, the
//! [`AuthorizationBroker`] that signs every call, and the base URL of the
//! resource API. The per-endpoint methods live in [`crate::api`]; they
//! all funnel through [`Spotify::request`].

pub mod params;
pub mod request;

pub use params::{ParamValue, Params};

use std::sync::Arc;

use url::Url;

use crate::auth::{AuthorizationBroker, ConsentDriver, GrantExecutor, RedirectConsent, TokenStore};
use crate::config::{Credentials, SpotifyConfig};
use crate::error::{OstinatoError, Result};

/// Spotify Web API client with a managed token lifecycle.
///
/// # Examples
///
/// ```no_run
/// use ostinato::{Credentials, Spotify, SpotifyConfig};
///
/// # async fn example() -> ostinato::Result<()> {
/// let credentials = Credentials::from_file("credentials.json")?;
/// let spotify = Spotify::new(credentials, SpotifyConfig::default())?;
///
/// let response = spotify.get_new_releases(Some("SE"), Some(10), None).await?;
/// let body: serde_json::Value = response.json().await?;
/// # Ok(())
/// # }
/// ```
pub struct Spotify {
    pub(crate) http: Arc<reqwest::Client>,
    pub(crate) auth: AuthorizationBroker,
    pub(crate) credentials: Arc<Credentials>,
    pub(crate) api_base: Url,
}

impl Spotify {
    /// Creates a client using the browser-based [`RedirectConsent`]
    /// driver for interactive authorization.
    ///
    /// # Errors
    ///
    /// Returns [`OstinatoError::Config`] for invalid configuration and
    /// propagates token-store read failures.
    pub fn new(credentials: Credentials, config: SpotifyConfig) -> Result<Self> {
        let consent = Arc::new(RedirectConsent::new(
            credentials.redirect_uri.clone(),
            config.consent_timeout(),
        ));
        Self::with_consent(credentials, config, consent)
    }

    /// Creates a client with a caller-supplied consent driver.
    ///
    /// This is the seam used by tests and by embedders that complete the
    /// consent step through their own UI.
    pub fn with_consent(
        credentials: Credentials,
        config: SpotifyConfig,
        consent: Arc<dyn ConsentDriver>,
    ) -> Result<Self> {
        credentials.validate()?;

        let api_base = Url::parse(&config.api_base)
            .map_err(|e| OstinatoError::Config(format!("invalid API base URL: {e}")))?;

        let http = Arc::new(
            reqwest::Client::builder()
                .timeout(config.http_timeout())
                .build()
                .map_err(OstinatoError::Transport)?,
        );

        let credentials = Arc::new(credentials);
        let store = TokenStore::new(config.resolved_token_path()?);
        let executor = GrantExecutor::new(
            Arc::clone(&http),
            Arc::clone(&credentials),
            consent,
            config.accounts_base.clone(),
            config.show_dialog,
        );
        let auth = AuthorizationBroker::new(executor, store)?;

        Ok(Self {
            http,
            auth,
            credentials,
            api_base,
        })
    }

    /// The Spotify user ID the client acts for.
    pub fn user(&self) -> &str {
        &self.credentials.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::CodeGrant;
    use async_trait::async_trait;

    struct NoConsent;

    #[async_trait]
    impl ConsentDriver for NoConsent {
        async fn request_code(&self, _authorize_url: &str) -> Result<CodeGrant> {
            Err(OstinatoError::AuthFlow("not interactive".to_string()).into())
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            user: "alice".to_string(),
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://127.0.0.1:9090/callback".to_string(),
        }
    }

    fn config(dir: &tempfile::TempDir) -> SpotifyConfig {
        SpotifyConfig {
            token_path: Some(dir.path().join("tokens.json")),
            ..Default::default()
        }
    }

    #[test]
    fn test_construction_with_valid_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let spotify = Spotify::with_consent(credentials(), config(&dir), Arc::new(NoConsent));
        assert!(spotify.is_ok());
        assert_eq!(spotify.unwrap().user(), "alice");
    }

    #[test]
    fn test_construction_rejects_invalid_api_base() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = SpotifyConfig {
            api_base: "not a url".to_string(),
            ..config(&dir)
        };
        let err = Spotify::with_consent(credentials(), cfg, Arc::new(NoConsent))
            .err()
            .unwrap()
            .to_string();
        assert!(err.contains("invalid API base URL"), "got: {err}");
    }

    #[test]
    fn test_construction_rejects_empty_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let mut creds = credentials();
        creds.client_id = String::new();
        let result = Spotify::with_consent(creds, config(&dir), Arc::new(NoConsent));
        assert!(result.is_err());
    }
}
