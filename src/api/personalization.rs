//! Listening-affinity operations

use reqwest::Method;

use crate::client::{Params, Spotify};
use crate::error::Result;

impl Spotify {
    /// Get the user's top artists or tracks by calculated affinity.
    ///
    /// `type_of` is `artists` or `tracks`. `time_range` is `long_term`,
    /// `medium_term` (API default), or `short_term`.
    pub async fn get_user_top(
        &self,
        type_of: &str,
        limit: Option<u32>,
        offset: Option<u32>,
        time_range: Option<&str>,
    ) -> Result<reqwest::Response> {
        Self::ensure_one_of(type_of, &["artists", "tracks"], "top-item type")?;
        let params = Params::new()
            .set_opt("limit", limit)
            .set_opt("offset", offset)
            .set_opt("time_range", time_range);
        self.request(
            Method::GET,
            &format!("me/top/{type_of}"),
            Some("user-top-read"),
            Some(params),
            None,
        )
        .await
    }
}
