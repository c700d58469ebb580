//! Playlist operations

use reqwest::Method;

use crate::api::to_uris;
use crate::client::{Params, Spotify};
use crate::error::Result;

const MODIFY_PLAYLISTS: &str = "playlist-modify-private playlist-modify-public";
const READ_PLAYLISTS: &str = "playlist-read-private playlist-read-collaborative";

impl Spotify {
    /// Add tracks to a playlist, optionally at a zero-based position.
    pub async fn playlist_add_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[&str],
        position: Option<u32>,
    ) -> Result<reqwest::Response> {
        let params = Params::new()
            .set("uris", to_uris("track", track_ids))
            .set_opt("position", position);
        self.request(
            Method::POST,
            &format!("playlists/{playlist_id}/tracks"),
            Some(MODIFY_PLAYLISTS),
            Some(params),
            None,
        )
        .await
    }

    /// Remove tracks from a playlist.
    pub async fn playlist_remove_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[&str],
    ) -> Result<reqwest::Response> {
        let params = Params::new().set("uris", to_uris("track", track_ids));
        self.request(
            Method::DELETE,
            &format!("playlists/{playlist_id}/tracks"),
            Some(MODIFY_PLAYLISTS),
            Some(params),
            None,
        )
        .await
    }

    /// Change a playlist's name, visibility, collaborative flag, or
    /// description. The user must own the playlist.
    pub async fn playlist_details(
        &self,
        playlist_id: &str,
        name: Option<&str>,
        public: Option<bool>,
        collaborative: Option<bool>,
        description: Option<&str>,
    ) -> Result<reqwest::Response> {
        let body = playlist_body(name, public, collaborative, description);
        self.request(
            Method::PUT,
            &format!("playlists/{playlist_id}"),
            Some(MODIFY_PLAYLISTS),
            None,
            Some(body),
        )
        .await
    }

    /// Create an empty playlist for the configured user.
    ///
    /// `collaborative` can only be `true` on non-public playlists.
    pub async fn playlist_create(
        &self,
        name: &str,
        public: Option<bool>,
        collaborative: Option<bool>,
        description: Option<&str>,
    ) -> Result<reqwest::Response> {
        let body = playlist_body(Some(name), public, collaborative, description);
        let path = format!("users/{}/playlists", self.user());
        self.request(Method::POST, &path, Some(MODIFY_PLAYLISTS), None, Some(body))
            .await
    }

    /// List the playlists owned or followed by a user.
    ///
    /// The literal ID `current_user` is replaced with the configured
    /// user.
    pub async fn get_playlist_list(
        &self,
        user_id: &str,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<reqwest::Response> {
        let user_id = if user_id == "current_user" {
            self.user()
        } else {
            user_id
        };
        let params = Params::new()
            .set_opt("limit", limit)
            .set_opt("offset", offset);
        self.request(
            Method::GET,
            &format!("users/{user_id}/playlists"),
            Some(READ_PLAYLISTS),
            Some(params),
            None,
        )
        .await
    }

    /// Get a playlist.
    ///
    /// `fields` filters the returned object, e.g.
    /// `["description", "uri"]` or the nested
    /// `tracks.items(added_at,added_by.id)` forms.
    pub async fn get_playlist(
        &self,
        playlist_id: &str,
        fields: Option<&[&str]>,
        market: Option<&str>,
    ) -> Result<reqwest::Response> {
        let params = Params::new()
            .set_opt("fields", fields)
            .set_opt("market", market);
        self.request(
            Method::GET,
            &format!("playlists/{playlist_id}"),
            None,
            Some(params),
            None,
        )
        .await
    }

    /// Get the current cover image of a playlist.
    pub async fn get_playlist_cover_image(
        &self,
        playlist_id: &str,
    ) -> Result<reqwest::Response> {
        self.request(
            Method::GET,
            &format!("playlists/{playlist_id}/images"),
            None,
            None,
            None,
        )
        .await
    }

    /// Get the tracks of a playlist. `limit` is 1-100, default 100.
    pub async fn get_playlist_tracks(
        &self,
        playlist_id: &str,
        fields: Option<&[&str]>,
        limit: Option<u32>,
        offset: Option<u32>,
        market: Option<&str>,
    ) -> Result<reqwest::Response> {
        let params = Params::new()
            .set_opt("fields", fields)
            .set_opt("limit", limit)
            .set_opt("offset", offset)
            .set_opt("market", market);
        self.request(
            Method::GET,
            &format!("playlists/{playlist_id}/tracks"),
            Some(READ_PLAYLISTS),
            Some(params),
            None,
        )
        .await
    }
}

/// Builds the shared create/update body, skipping absent fields.
fn playlist_body(
    name: Option<&str>,
    public: Option<bool>,
    collaborative: Option<bool>,
    description: Option<&str>,
) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    if let Some(name) = name {
        body.insert("name".to_string(), serde_json::json!(name));
    }
    if let Some(public) = public {
        body.insert("public".to_string(), serde_json::json!(public));
    }
    if let Some(collaborative) = collaborative {
        body.insert("collaborative".to_string(), serde_json::json!(collaborative));
    }
    if let Some(description) = description {
        body.insert("description".to_string(), serde_json::json!(description));
    }
    serde_json::Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_body_skips_absent_fields() {
        let body = playlist_body(Some("Mix"), None, Some(false), None);
        assert_eq!(body["name"], "Mix");
        assert_eq!(body["collaborative"], false);
        assert!(body.get("public").is_none());
        assert!(body.get("description").is_none());
    }
}
