//! Configuration and credential management for Ostinato
//!
//! This module handles loading and validating the application credentials
//! issued by the Spotify developer dashboard, and the client configuration
//! (endpoint bases, timeouts, token-file location).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{OstinatoError, Result};

/// Default authorization/token host.
pub const DEFAULT_ACCOUNTS_BASE: &str = "https://accounts.spotify.com";

/// Default resource API base.
pub const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1/";

/// Application credentials issued by the Spotify developer dashboard.
///
/// Loaded once at construction and immutable for the process lifetime.
/// A missing or malformed credentials file is a fatal startup error.
///
/// # Examples
///
/// ```
/// use ostinato::config::Credentials;
///
/// let credentials = Credentials {
///     user: "alice".to_string(),
///     client_id: "client-id".to_string(),
///     client_secret: "client-secret".to_string(),
///     redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
/// };
/// assert!(credentials.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Spotify user ID of the account the client acts for
    pub user: String,

    /// OAuth2 client identifier
    pub client_id: String,

    /// OAuth2 client secret
    pub client_secret: String,

    /// Redirect URI registered for the application; the authorization
    /// redirect must land exactly here
    pub redirect_uri: String,
}

impl Credentials {
    /// Loads credentials from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`OstinatoError::Config`] if the file cannot be read, is not
    /// valid JSON, or fails [`validate`](Self::validate).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            OstinatoError::Config(format!(
                "cannot read credentials file {}: {e}",
                path.display()
            ))
        })?;
        let credentials: Credentials = serde_json::from_str(&contents).map_err(|e| {
            OstinatoError::Config(format!(
                "malformed credentials file {}: {e}",
                path.display()
            ))
        })?;
        credentials.validate()?;
        Ok(credentials)
    }

    /// Checks that no credential field is empty.
    ///
    /// # Errors
    ///
    /// Returns [`OstinatoError::Config`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("user", &self.user),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("redirect_uri", &self.redirect_uri),
        ] {
            if value.trim().is_empty() {
                return Err(OstinatoError::Config(format!("credential field `{name}` is empty")).into());
            }
        }
        Ok(())
    }
}

/// Client configuration.
///
/// All fields default to production values; the endpoint bases exist so
/// tests can point the client at a local mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyConfig {
    /// Base URL of the authorization/token host
    #[serde(default = "default_accounts_base")]
    pub accounts_base: String,

    /// Base URL of the resource API (must end with `/` so relative paths
    /// join underneath it)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Path of the persisted token file; `None` selects
    /// `<user config dir>/ostinato/tokens.json`
    #[serde(default)]
    pub token_path: Option<PathBuf>,

    /// Timeout applied to every HTTP request (seconds)
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,

    /// How long to wait for the user to complete the interactive consent
    /// step before the authorization attempt is abandoned (seconds)
    #[serde(default = "default_consent_timeout")]
    pub consent_timeout_seconds: u64,

    /// Whether the authorize page forces the approval dialog even when the
    /// user already granted the requested scopes
    #[serde(default)]
    pub show_dialog: bool,
}

fn default_accounts_base() -> String {
    DEFAULT_ACCOUNTS_BASE.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_http_timeout() -> u64 {
    30
}

fn default_consent_timeout() -> u64 {
    300
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            accounts_base: default_accounts_base(),
            api_base: default_api_base(),
            token_path: None,
            http_timeout_seconds: default_http_timeout(),
            consent_timeout_seconds: default_consent_timeout(),
            show_dialog: false,
        }
    }
}

impl SpotifyConfig {
    /// HTTP request timeout as a [`Duration`].
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    /// Consent deadline as a [`Duration`].
    pub fn consent_timeout(&self) -> Duration {
        Duration::from_secs(self.consent_timeout_seconds)
    }

    /// Resolves the token-file path, falling back to the per-user config
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`OstinatoError::Config`] when no config directory can be
    /// determined for the platform.
    pub fn resolved_token_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.token_path {
            return Ok(path.clone());
        }
        let dirs = directories::ProjectDirs::from("", "", "ostinato").ok_or_else(|| {
            OstinatoError::Config("cannot determine a config directory for this platform".to_string())
        })?;
        Ok(dirs.config_dir().join("tokens.json"))
    }
}
