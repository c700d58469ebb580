//! Per-endpoint methods
//!
//! One thin method per Web API operation, grouped by API category. Each
//! method validates its enum-like arguments before any I/O, builds the
//! path/parameter set, and delegates to [`Spotify::request`]. Responses
//! are returned raw; callers decode the JSON they care about.

mod albums;
mod artists;
mod browse;
mod episodes;
mod follow;
mod library;
mod personalization;
mod player;
mod playlists;
mod tracks;
mod users;

use crate::client::Spotify;
use crate::error::{OstinatoError, Result};

impl Spotify {
    /// Fails with [`OstinatoError::InvalidArgument`] unless `value` is
    /// one of `valid`.
    fn ensure_one_of(value: &str, valid: &[&str], what: &str) -> Result<()> {
        if valid.contains(&value) {
            Ok(())
        } else {
            Err(OstinatoError::InvalidArgument(format!(
                "{value} is not a valid {what} (expected one of: {})",
                valid.join(", ")
            ))
            .into())
        }
    }
}

/// Converts bare IDs into `spotify:<kind>:<id>` URIs.
fn to_uris(kind: &str, ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| format!("spotify:{kind}:{id}")).collect()
}
