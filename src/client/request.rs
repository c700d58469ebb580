//! Authenticated request dispatch
//!
//! Every endpoint method builds a path, an optional parameter set, an
//! optional JSON body, and the scope its operation needs, then calls
//! [`Spotify::request`]. The dispatcher obtains a valid token from the
//! broker, attaches the authorization and content headers, and returns
//! the raw response without interpreting it; callers decode.

use reqwest::Method;
use tracing::debug;

use crate::client::{Params, Spotify};
use crate::error::{OstinatoError, Result};

impl Spotify {
    /// Sends an authenticated request to the resource API.
    ///
    /// `path` is joined onto the configured API base. `scope` is the
    /// permission set the operation requires; `None` requests app-only
    /// access. The response is returned as-is, whatever its status.
    ///
    /// # Errors
    ///
    /// Propagates every token-acquisition failure from the broker, and
    /// [`OstinatoError::Transport`] when the API call itself cannot be
    /// sent.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        scope: Option<&str>,
        params: Option<Params>,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let token = self.auth.get_token(scope).await?;

        let url = self
            .api_base
            .join(path)
            .map_err(|e| OstinatoError::InvalidArgument(format!("bad endpoint path {path}: {e}")))?;

        debug!(%method, %url, "dispatching API request");

        let mut request = self
            .http
            .request(method, url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("{} {}", token.token_type, token.access_token),
            )
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        if let Some(params) = params {
            let query: Vec<(String, String)> = params.normalize().into_iter().collect();
            request = request.query(&query);
        }

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(OstinatoError::Transport)?;
        Ok(response)
    }
}
