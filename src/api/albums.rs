//! Album catalog operations

use reqwest::Method;

use crate::client::{Params, Spotify};
use crate::error::Result;

impl Spotify {
    /// Get catalog information for several albums.
    ///
    /// `market` is an ISO 3166-1 alpha-2 country code (or `from_token`)
    /// for track relinking.
    pub async fn get_albums(
        &self,
        album_ids: &[&str],
        market: Option<&str>,
    ) -> Result<reqwest::Response> {
        let params = Params::new()
            .set("ids", album_ids)
            .set_opt("market", market);
        self.request(Method::GET, "albums", None, Some(params), None)
            .await
    }

    /// Get an album's tracks. `limit` is 1-50, default 20.
    pub async fn get_album_tracks(
        &self,
        album_id: &str,
        limit: Option<u32>,
        offset: Option<u32>,
        market: Option<&str>,
    ) -> Result<reqwest::Response> {
        let params = Params::new()
            .set_opt("limit", limit)
            .set_opt("offset", offset)
            .set_opt("market", market);
        self.request(
            Method::GET,
            &format!("albums/{album_id}/tracks"),
            None,
            Some(params),
            None,
        )
        .await
    }
}
