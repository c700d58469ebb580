//! Follow operations for artists, users, and playlists

use reqwest::Method;

use crate::client::{Params, Spotify};
use crate::error::Result;

/// ID types accepted by the follow endpoints.
const FOLLOW_TYPES: &[&str] = &["artist", "user"];

impl Spotify {
    /// Check whether the current user follows the given artists or users.
    ///
    /// `type_of` is `artist` or `user`; up to 50 IDs per call.
    pub async fn get_if_user_follows(
        &self,
        type_of: &str,
        ids: &[&str],
    ) -> Result<reqwest::Response> {
        Self::ensure_one_of(type_of, FOLLOW_TYPES, "follow type")?;
        let params = Params::new().set("type", type_of).set("ids", ids);
        self.request(
            Method::GET,
            "me/following/contains",
            Some("user-follow-read"),
            Some(params),
            None,
        )
        .await
    }

    /// Check whether the given users follow a playlist.
    ///
    /// The literal ID `current_user` is replaced with the configured
    /// user. Maximum 5 IDs.
    pub async fn get_if_users_follow_playlist(
        &self,
        playlist_id: &str,
        ids: &[&str],
    ) -> Result<reqwest::Response> {
        let ids: Vec<String> = ids
            .iter()
            .map(|id| {
                if *id == "current_user" {
                    self.user().to_string()
                } else {
                    id.to_string()
                }
            })
            .collect();
        let params = Params::new().set("ids", ids);
        self.request(
            Method::GET,
            &format!("playlists/{playlist_id}/followers/contains"),
            Some("playlist-read-private"),
            Some(params),
            None,
        )
        .await
    }

    /// Follow (or, with `delete`, unfollow) artists or users.
    pub async fn follow(
        &self,
        type_of: &str,
        ids: &[&str],
        delete: bool,
    ) -> Result<reqwest::Response> {
        Self::ensure_one_of(type_of, FOLLOW_TYPES, "follow type")?;
        let method = if delete { Method::DELETE } else { Method::PUT };
        let params = Params::new().set("type", type_of).set("ids", ids);
        self.request(
            method,
            "me/following",
            Some("user-follow-modify"),
            Some(params),
            None,
        )
        .await
    }

    /// Follow (or, with `delete`, unfollow) a playlist.
    ///
    /// `public` controls whether the playlist shows up among the user's
    /// public playlists; it defaults to `true`.
    pub async fn follow_playlist(
        &self,
        playlist_id: &str,
        delete: bool,
        public: Option<bool>,
    ) -> Result<reqwest::Response> {
        let method = if delete { Method::DELETE } else { Method::PUT };
        let body = serde_json::json!({ "public": public.unwrap_or(true) });
        self.request(
            method,
            &format!("playlists/{playlist_id}/followers"),
            Some("playlist-modify-private playlist-modify-public"),
            None,
            Some(body),
        )
        .await
    }

    /// Get the current user's followed artists.
    ///
    /// Only `type_of` = `artist` is supported by the API. `after` is the
    /// last artist ID of the previous page.
    pub async fn get_user_followed(
        &self,
        type_of: &str,
        limit: Option<u32>,
        after: Option<&str>,
    ) -> Result<reqwest::Response> {
        Self::ensure_one_of(type_of, &["artist"], "follow type")?;
        let params = Params::new()
            .set("type", type_of)
            .set_opt("limit", limit)
            .set_opt("after", after);
        self.request(
            Method::GET,
            "me/following",
            Some("user-follow-read"),
            Some(params),
            None,
        )
        .await
    }
}
