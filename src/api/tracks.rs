//! Track catalog and audio-analysis operations

use reqwest::Method;

use crate::client::{Params, Spotify};
use crate::error::Result;

impl Spotify {
    /// Get the detailed audio analysis of a single track.
    pub async fn get_audio_analysis(&self, track_id: &str) -> Result<reqwest::Response> {
        self.request(
            Method::GET,
            &format!("audio-analysis/{track_id}"),
            None,
            None,
            None,
        )
        .await
    }

    /// Get audio features for several tracks. Maximum 100 IDs.
    pub async fn get_audio_features(&self, track_ids: &[&str]) -> Result<reqwest::Response> {
        let params = Params::new().set("ids", track_ids);
        self.request(Method::GET, "audio-features", None, Some(params), None)
            .await
    }

    /// Get catalog information for several tracks. Maximum 50 IDs.
    pub async fn get_tracks(
        &self,
        track_ids: &[&str],
        market: Option<&str>,
    ) -> Result<reqwest::Response> {
        let params = Params::new()
            .set("ids", track_ids)
            .set_opt("market", market);
        self.request(Method::GET, "tracks", None, Some(params), None)
            .await
    }
}
