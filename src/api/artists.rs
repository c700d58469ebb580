//! Artist catalog operations

use reqwest::Method;

use crate::client::{Params, Spotify};
use crate::error::Result;

/// Album groups accepted by `include_groups`.
const ALBUM_GROUPS: &[&str] = &["album", "single", "appears_on", "compilation"];

impl Spotify {
    /// Get catalog information for several artists.
    pub async fn get_artists(&self, artist_ids: &[&str]) -> Result<reqwest::Response> {
        let params = Params::new().set("ids", artist_ids);
        self.request(Method::GET, "artists", None, Some(params), None)
            .await
    }

    /// Get an artist's albums, optionally filtered by album group.
    ///
    /// Every entry of `include_groups` must be one of `album`, `single`,
    /// `appears_on`, `compilation`.
    pub async fn get_artist_albums(
        &self,
        artist_id: &str,
        include_groups: Option<&[&str]>,
        country: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<reqwest::Response> {
        if let Some(groups) = include_groups {
            for group in groups {
                Self::ensure_one_of(group, ALBUM_GROUPS, "album group filter")?;
            }
        }
        let params = Params::new()
            .set_opt("include_groups", include_groups)
            .set_opt("country", country)
            .set_opt("limit", limit)
            .set_opt("offset", offset);
        self.request(
            Method::GET,
            &format!("artists/{artist_id}/albums"),
            None,
            Some(params),
            None,
        )
        .await
    }

    /// Get an artist's top tracks in the given country.
    pub async fn get_artist_top_tracks(
        &self,
        artist_id: &str,
        country: &str,
    ) -> Result<reqwest::Response> {
        let params = Params::new().set("country", country);
        self.request(
            Method::GET,
            &format!("artists/{artist_id}/top-tracks"),
            None,
            Some(params),
            None,
        )
        .await
    }

    /// Get artists similar to the given artist.
    pub async fn get_artist_related_artists(
        &self,
        artist_id: &str,
    ) -> Result<reqwest::Response> {
        self.request(
            Method::GET,
            &format!("artists/{artist_id}/related-artists"),
            None,
            None,
            None,
        )
        .await
    }
}
