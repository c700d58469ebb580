//! 'Your Music' library operations

use reqwest::Method;

use crate::client::{Params, Spotify};
use crate::error::Result;

/// Item kinds the library endpoints accept.
const LIBRARY_TYPES: &[&str] = &["albums", "tracks", "shows"];

impl Spotify {
    /// Check whether items are already saved in the user's library.
    ///
    /// `type_of` is `albums`, `tracks`, or `shows`; up to 50 IDs.
    pub async fn get_if_user_saved(
        &self,
        type_of: &str,
        ids: &[&str],
    ) -> Result<reqwest::Response> {
        Self::ensure_one_of(type_of, LIBRARY_TYPES, "library type")?;
        let params = Params::new().set("ids", ids);
        self.request(
            Method::GET,
            &format!("me/{type_of}/contains"),
            Some("user-library-read"),
            Some(params),
            None,
        )
        .await
    }

    /// List the user's saved albums, tracks, or shows.
    pub async fn get_user_saved(
        &self,
        type_of: &str,
        limit: Option<u32>,
        offset: Option<u32>,
        market: Option<&str>,
    ) -> Result<reqwest::Response> {
        Self::ensure_one_of(type_of, LIBRARY_TYPES, "library type")?;
        let params = Params::new()
            .set_opt("limit", limit)
            .set_opt("offset", offset)
            .set_opt("market", market);
        self.request(
            Method::GET,
            &format!("me/{type_of}"),
            Some("user-library-read"),
            Some(params),
            None,
        )
        .await
    }

    /// Save (or, with `delete`, remove) items in the user's library.
    pub async fn library(
        &self,
        type_of: &str,
        ids: &[&str],
        delete: bool,
    ) -> Result<reqwest::Response> {
        Self::ensure_one_of(type_of, LIBRARY_TYPES, "library type")?;
        let method = if delete { Method::DELETE } else { Method::PUT };
        let params = Params::new().set("ids", ids);
        self.request(
            method,
            &format!("me/{type_of}"),
            Some("user-library-modify"),
            Some(params),
            None,
        )
        .await
    }
}
