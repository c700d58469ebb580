//! The token lifecycle state machine
//!
//! [`AuthorizationBroker`] answers one question: "give me a currently
//! valid token for scope S". It owns the single cached [`TokenRecord`]
//! (seeded from the [`TokenStore`] at construction), decides between the
//! three grant flows, and guarantees a caller never receives a token that
//! is expired, about to expire, or missing a requested scope.
//!
//! The check-then-refresh-then-cache sequence is a classic check-then-act
//! race under concurrent callers, so the whole decision runs under one
//! async mutex; two simultaneous callers produce one exchange, not two.

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::auth::grant::{Grant, GrantExecutor};
use crate::auth::scope::ScopeSet;
use crate::auth::store::TokenStore;
use crate::auth::token::TokenRecord;
use crate::error::{OstinatoError, Result};

/// Orchestrates grant execution, scope checks, and persistence.
///
/// Exactly one record is current at a time; it is replaced, never
/// mutated. Replacement records carrying a refresh token are persisted;
/// client-credentials records never are.
pub struct AuthorizationBroker {
    executor: GrantExecutor,
    store: TokenStore,
    current: Mutex<Option<TokenRecord>>,
}

impl AuthorizationBroker {
    /// Creates a broker, seeding the in-memory cache from the store.
    ///
    /// The store is read exactly once, here; afterwards it is only
    /// written.
    ///
    /// # Errors
    ///
    /// Propagates store read failures (a missing file is an empty cache,
    /// not an error).
    pub fn new(executor: GrantExecutor, store: TokenStore) -> Result<Self> {
        let persisted = store.load()?;
        if persisted.is_some() {
            debug!(path = %store.path().display(), "seeded token cache from store");
        }
        Ok(Self {
            executor,
            store,
            current: Mutex::new(persisted),
        })
    }

    /// Returns a token valid for `scope` right now.
    ///
    /// Resolution order:
    ///
    /// 1. Nothing cached: run the non-refresh flow for the requested
    ///    scope (authorization-code with a scope, client-credentials
    ///    without) and cache the result.
    /// 2. Cached record expiring within the skew guard, or not granting
    ///    every requested scope: run the refresh flow. Without a scope
    ///    the refresh collapses to a scope-less client-credentials
    ///    exchange; with a scope it redeems the cached refresh token, and
    ///    if none was ever granted the call fails with a protocol error
    ///    telling the user to authorize first.
    /// 3. Otherwise the cached record is returned unchanged.
    ///
    /// # Errors
    ///
    /// [`OstinatoError::AuthFlow`] when the consent collaborator cannot
    /// complete, [`OstinatoError::Protocol`] when the accounts service
    /// rejects an exchange (or no refresh token is available for a
    /// required refresh), [`OstinatoError::Transport`] on network
    /// failure.
    pub async fn get_token(&self, scope: Option<&str>) -> Result<TokenRecord> {
        let requested = ScopeSet::parse_opt(scope);
        let mut current = self.current.lock().await;

        let grant = match current.as_ref() {
            None => {
                info!(scope = scope.unwrap_or(""), "no token cached, starting fresh grant");
                match scope {
                    Some(s) => Grant::AuthorizationCode {
                        scope: s.to_string(),
                    },
                    None => Grant::ClientCredentials,
                }
            }
            Some(cached) if cached.is_expiring() || !cached.grants(&requested) => {
                debug!(
                    expiring = cached.is_expiring(),
                    covers_scope = cached.grants(&requested),
                    "cached token unusable, refreshing"
                );
                match scope {
                    // Refreshing without a scope collapses to an app-only
                    // client-credentials exchange.
                    None => Grant::ClientCredentials,
                    Some(s) => match cached.refresh_token.clone() {
                        Some(refresh_token) => Grant::RefreshToken {
                            scope: s.to_string(),
                            refresh_token,
                        },
                        None => {
                            return Err(OstinatoError::protocol(
                                400,
                                "no refresh token available: the current token was granted \
                                 app-only (client-credentials); user authorization is required \
                                 before scoped calls can be made",
                            )
                            .into());
                        }
                    },
                }
            }
            Some(cached) => return Ok(cached.clone()),
        };

        let record = self.executor.exchange(grant).await?;

        if record.refresh_token.is_some() {
            self.store.save(&record)?;
        }

        *current = Some(record.clone());
        Ok(record)
    }
}
