//! Episode catalog operations

use reqwest::Method;

use crate::client::{Params, Spotify};
use crate::error::Result;

impl Spotify {
    /// Get catalog information for several episodes. Maximum 50 IDs.
    pub async fn get_episodes(
        &self,
        episode_ids: &[&str],
        market: Option<&str>,
    ) -> Result<reqwest::Response> {
        let params = Params::new()
            .set("ids", episode_ids)
            .set_opt("market", market);
        self.request(Method::GET, "episodes", None, Some(params), None)
            .await
    }
}
