//! Browse and discovery operations

use reqwest::Method;

use crate::client::{Params, Spotify};
use crate::error::{OstinatoError, Result};

impl Spotify {
    /// Get the category list used to tag items in Spotify.
    pub async fn get_categories(
        &self,
        country: Option<&str>,
        locale: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<reqwest::Response> {
        let params = Params::new()
            .set_opt("country", country)
            .set_opt("locale", locale)
            .set_opt("limit", limit)
            .set_opt("offset", offset);
        self.request(Method::GET, "browse/categories", None, Some(params), None)
            .await
    }

    /// Get playlists tagged with a particular category.
    pub async fn get_category_playlists(
        &self,
        category_id: &str,
        country: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<reqwest::Response> {
        let params = Params::new()
            .set_opt("country", country)
            .set_opt("limit", limit)
            .set_opt("offset", offset);
        self.request(
            Method::GET,
            &format!("browse/categories/{category_id}/playlists"),
            None,
            Some(params),
            None,
        )
        .await
    }

    /// Get the featured-playlists shelf.
    ///
    /// `timestamp` (ISO 8601, `yyyy-MM-ddTHH:mm:ss`) tailors results to a
    /// local time of day.
    pub async fn get_featured_playlists(
        &self,
        country: Option<&str>,
        locale: Option<&str>,
        timestamp: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<reqwest::Response> {
        let params = Params::new()
            .set_opt("country", country)
            .set_opt("locale", locale)
            .set_opt("timestamp", timestamp)
            .set_opt("limit", limit)
            .set_opt("offset", offset);
        self.request(
            Method::GET,
            "browse/featured-playlists",
            None,
            Some(params),
            None,
        )
        .await
    }

    /// Get new album releases featured in Spotify.
    pub async fn get_new_releases(
        &self,
        country: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<reqwest::Response> {
        let params = Params::new()
            .set_opt("country", country)
            .set_opt("limit", limit)
            .set_opt("offset", offset);
        self.request(Method::GET, "browse/new-releases", None, Some(params), None)
            .await
    }

    /// Get track recommendations seeded by artists, genres, or tracks.
    ///
    /// At least one seed list must be given; up to 5 seed values may be
    /// combined across the three lists. The `min`/`max`/`target` groups
    /// hold tunable track attributes and are sent with the matching
    /// prefix, e.g. a `tempo` entry in `max` becomes `max_tempo`.
    #[allow(clippy::too_many_arguments)]
    pub async fn get_recommendations(
        &self,
        seed_artists: Option<&[&str]>,
        seed_genres: Option<&[&str]>,
        seed_tracks: Option<&[&str]>,
        limit: Option<u32>,
        market: Option<&str>,
        min: Option<Params>,
        max: Option<Params>,
        target: Option<Params>,
    ) -> Result<reqwest::Response> {
        if seed_artists.is_none() && seed_genres.is_none() && seed_tracks.is_none() {
            return Err(OstinatoError::InvalidArgument(
                "at least one of seed_artists, seed_genres, seed_tracks must be given".to_string(),
            )
            .into());
        }
        let params = Params::new()
            .set_opt("seed_artists", seed_artists)
            .set_opt("seed_genres", seed_genres)
            .set_opt("seed_tracks", seed_tracks)
            .set_opt("limit", limit)
            .set_opt("market", market)
            .set_opt("min_", min)
            .set_opt("max_", max)
            .set_opt("target_", target);
        self.request(Method::GET, "recommendations", None, Some(params), None)
            .await
    }
}
