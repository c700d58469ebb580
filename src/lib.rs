//! Ostinato - Spotify Web API client library
//!
//! This library wraps the Spotify Web API behind a client that manages
//! the full OAuth2 access-token lifecycle: acquisition, caching,
//! scoping, refresh, and persistence across process restarts. Callers
//! never deal with tokens directly; every endpoint method states the
//! scope it needs and the broker guarantees the request is signed with a
//! token that is neither expired nor under-scoped.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `auth`: grant execution, the token cache/refresh state machine,
//!   scope sets, durable token storage, and the interactive consent seam
//! - `client`: the [`Spotify`] client, parameter normalization, and
//!   authenticated request dispatch
//! - `api`: one thin method per Web API operation
//! - `config`: credentials and client configuration
//! - `error`: error types and result alias
//!
//! # Example
//!
//! ```no_run
//! use ostinato::{Credentials, Spotify, SpotifyConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let credentials = Credentials::from_file("credentials.json")?;
//!     let spotify = Spotify::new(credentials, SpotifyConfig::default())?;
//!
//!     // App-only call: no user scope needed.
//!     let releases = spotify.get_new_releases(Some("SE"), Some(10), None).await?;
//!     println!("{}", releases.text().await?);
//!
//!     // User-context call: the broker obtains (or refreshes) a token
//!     // granting the scope before the request goes out.
//!     let devices = spotify.get_user_available_devices().await?;
//!     println!("{}", devices.text().await?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use auth::{
    AuthorizationBroker, CodeGrant, ConsentDriver, Grant, GrantExecutor, RedirectConsent,
    ScopeSet, TokenRecord, TokenStore,
};
pub use client::{ParamValue, Params, Spotify};
pub use config::{Credentials, SpotifyConfig};
pub use error::{OstinatoError, Result};
