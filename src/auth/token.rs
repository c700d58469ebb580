//! Token records and the token-endpoint wire format
//!
//! A [`TokenRecord`] is the normalized form of a token-endpoint response:
//! the raw `expires_in` countdown is converted at receipt time into an
//! absolute `expires_at` timestamp, and the granted scope string is parsed
//! into a [`ScopeSet`]. Exactly one record is current at a time; it is
//! replaced, never mutated, on every grant or refresh.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::scope::ScopeSet;

/// Safety margin before expiry within which a token is proactively
/// refreshed rather than used (seconds).
pub const EXPIRY_SKEW_SECS: i64 = 60;

/// A normalized access-token record.
///
/// Records obtained via the client-credentials grant carry no
/// `refresh_token` and are never persisted; records from the
/// authorization-code or refresh grants always carry one and are always
/// persisted.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use ostinato::auth::TokenRecord;
///
/// let record = TokenRecord {
///     access_token: "token".to_string(),
///     token_type: "Bearer".to_string(),
///     scope: "user-top-read".into(),
///     expires_in: 3600,
///     refresh_token: None,
///     expires_at: Utc::now() + Duration::seconds(3600),
/// };
/// assert!(!record.is_expiring());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// The access token issued by the accounts service
    pub access_token: String,

    /// Token type, `"Bearer"` in practice
    pub token_type: String,

    /// Granted scope set (space-delimited on the wire)
    #[serde(default)]
    pub scope: ScopeSet,

    /// Lifetime in seconds, as reported by the server
    pub expires_in: u64,

    /// Refresh token usable to obtain a successor record without
    /// re-running user authorization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Absolute expiry instant, computed as `now + expires_in` when the
    /// record was received
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Returns `true` when the token is expired or expires within the
    /// skew guard.
    ///
    /// The margin keeps a request signed with this token from dying on
    /// the wire just as the token lapses.
    pub fn is_expiring(&self) -> bool {
        Utc::now() >= self.expires_at - Duration::seconds(EXPIRY_SKEW_SECS)
    }

    /// Returns `true` when every token of `requested` is granted.
    pub fn grants(&self, requested: &ScopeSet) -> bool {
        self.scope.contains_all(requested)
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Raw JSON response from the token endpoint.
///
/// Used only inside the grant executor; [`into_record`](Self::into_record)
/// produces the canonical [`TokenRecord`].
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub scope: Option<String>,
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl TokenResponse {
    /// Converts the wire response into a [`TokenRecord`], stamping
    /// `expires_at = now + expires_in`.
    pub(crate) fn into_record(self) -> TokenRecord {
        let expires_at =
            Utc::now() + Duration::seconds(i64::try_from(self.expires_in).unwrap_or(i64::MAX));
        TokenRecord {
            access_token: self.access_token,
            token_type: self.token_type,
            scope: ScopeSet::parse_opt(self.scope.as_deref()),
            expires_in: self.expires_in,
            refresh_token: self.refresh_token,
            expires_at,
        }
    }
}
