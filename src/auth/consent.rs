//! Interactive authorization hand-off
//!
//! The authorization-code grant needs a human to approve the request in a
//! browser. This module defines the seam for that step: a
//! [`ConsentDriver`] is given the fully-built authorize URL and must come
//! back with the `(code, state)` pair the accounts service appended to the
//! redirect. The grant executor owns state generation and verification;
//! drivers only carry the redirect parameters back.
//!
//! [`RedirectConsent`] is the production driver: it opens the system
//! browser and listens on the registered redirect URI for the single
//! callback request, with a bounded wait instead of an open-ended poll.
//! Dropping the future cancels the attempt.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use url::Url;

use crate::error::{OstinatoError, Result};

/// The `(code, state)` pair carried on the authorization redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeGrant {
    /// One-time authorization code to exchange at the token endpoint
    pub code: String,

    /// The `state` value echoed back by the accounts service
    pub state: String,
}

/// Collaborator that completes the interactive consent step.
///
/// Implementations block (asynchronously) until the human finishes or the
/// attempt is abandoned; they must not interpret `code` or `state`.
#[async_trait]
pub trait ConsentDriver: Send + Sync {
    /// Presents `authorize_url` to the user and returns the redirect's
    /// `code` and `state` query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`OstinatoError::AuthFlow`] when the consent step cannot
    /// complete: deadline expired, the user denied the request, or the
    /// redirect carried no code.
    async fn request_code(&self, authorize_url: &str) -> Result<CodeGrant>;
}

// ---------------------------------------------------------------------------
// RedirectConsent
// ---------------------------------------------------------------------------

/// Browser-and-loopback consent driver.
///
/// Binds the host/port of the registered redirect URI, opens the
/// authorize URL in the system browser, and accepts exactly one callback
/// request within the configured deadline.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use ostinato::auth::RedirectConsent;
///
/// let consent = RedirectConsent::new(
///     "http://127.0.0.1:8888/callback",
///     Duration::from_secs(300),
/// );
/// ```
pub struct RedirectConsent {
    redirect_uri: String,
    deadline: Duration,
}

impl RedirectConsent {
    /// Creates a driver for the given registered redirect URI.
    pub fn new(redirect_uri: impl Into<String>, deadline: Duration) -> Self {
        Self {
            redirect_uri: redirect_uri.into(),
            deadline,
        }
    }

    /// Socket address to bind, derived from the redirect URI.
    fn bind_addr(&self) -> Result<String> {
        let url = Url::parse(&self.redirect_uri)
            .map_err(|e| OstinatoError::AuthFlow(format!("invalid redirect URI: {e}")))?;
        let host = url
            .host_str()
            .ok_or_else(|| OstinatoError::AuthFlow("redirect URI has no host".to_string()))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| OstinatoError::AuthFlow("redirect URI has no port".to_string()))?;
        Ok(format!("{host}:{port}"))
    }

    /// Attempts to open `url` in the user's default browser.
    ///
    /// Errors are ignored; the URL is also logged so the user can open it
    /// by hand when no browser comes up.
    fn try_open_browser(url: &str) {
        #[cfg(target_os = "macos")]
        {
            let _ = std::process::Command::new("open").arg(url).spawn();
        }
        #[cfg(target_os = "linux")]
        {
            let _ = std::process::Command::new("xdg-open").arg(url).spawn();
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux")))]
        {
            let _ = url;
        }
    }

    /// Accepts one callback connection and extracts the query parameters.
    async fn accept_callback(listener: TcpListener) -> Result<CodeGrant> {
        let (stream, _peer) = listener.accept().await.map_err(|e| {
            OstinatoError::AuthFlow(format!("failed to accept authorization callback: {e}"))
        })?;

        let mut reader = BufReader::new(stream);
        let mut request_line = String::new();
        reader.read_line(&mut request_line).await.map_err(|e| {
            OstinatoError::AuthFlow(format!("failed to read authorization callback: {e}"))
        })?;

        // Respond immediately so the browser tab does not hang.
        let response = "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nConnection: close\r\n\r\nAuthorization received. You may close this tab.";
        let mut stream = reader.into_inner();
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.shutdown().await;

        // Request line: "GET /callback?code=...&state=... HTTP/1.1"
        let path = request_line.split_whitespace().nth(1).unwrap_or("/");
        let query = path.split_once('?').map(|(_, q)| q).unwrap_or("");

        let mut code = None;
        let mut state = None;
        let mut denial = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                "error" => denial = Some(value.into_owned()),
                _ => {}
            }
        }

        if let Some(reason) = denial {
            return Err(
                OstinatoError::AuthFlow(format!("authorization was denied: {reason}")).into(),
            );
        }

        match (code, state) {
            (Some(code), Some(state)) => Ok(CodeGrant { code, state }),
            _ => Err(OstinatoError::AuthFlow(
                "authorization redirect carried no code/state pair".to_string(),
            )
            .into()),
        }
    }
}

#[async_trait]
impl ConsentDriver for RedirectConsent {
    async fn request_code(&self, authorize_url: &str) -> Result<CodeGrant> {
        let listener = TcpListener::bind(self.bind_addr()?).await.map_err(|e| {
            OstinatoError::AuthFlow(format!("failed to bind redirect listener: {e}"))
        })?;

        tracing::info!(url = authorize_url, "waiting for user authorization");
        Self::try_open_browser(authorize_url);

        match tokio::time::timeout(self.deadline, Self::accept_callback(listener)).await {
            Ok(result) => result,
            Err(_) => Err(OstinatoError::AuthFlow(format!(
                "no authorization response within {}s, giving up",
                self.deadline.as_secs()
            ))
            .into()),
        }
    }
}
