//! User profile operations

use reqwest::Method;

use crate::client::Spotify;
use crate::error::Result;

impl Spotify {
    /// Get the public profile of a Spotify user.
    pub async fn get_user_profile(&self, user_id: &str) -> Result<reqwest::Response> {
        self.request(Method::GET, &format!("users/{user_id}"), None, None, None)
            .await
    }
}
