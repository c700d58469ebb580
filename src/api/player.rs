//! Playback state and control operations

use reqwest::Method;

use crate::client::{Params, Spotify};
use crate::error::{OstinatoError, Result};

const READ_PLAYBACK: &str = "user-read-playback-state";
const MODIFY_PLAYBACK: &str = "user-modify-playback-state";

impl Spotify {
    /// Add an item (track or episode URI) to the playback queue.
    pub async fn playback_add_queue_item(
        &self,
        uri: &str,
        device_id: Option<&str>,
    ) -> Result<reqwest::Response> {
        let params = Params::new().set("uri", uri).set_opt("device_id", device_id);
        self.request(
            Method::POST,
            "me/player/queue",
            Some(MODIFY_PLAYBACK),
            Some(params),
            None,
        )
        .await
    }

    /// Get the user's available playback devices.
    pub async fn get_user_available_devices(&self) -> Result<reqwest::Response> {
        self.request(Method::GET, "me/player/devices", Some(READ_PLAYBACK), None, None)
            .await
    }

    /// Get the user's current playback state.
    pub async fn get_playback_info(&self, market: Option<&str>) -> Result<reqwest::Response> {
        let params = Params::new().set_opt("market", market);
        self.request(Method::GET, "me/player", Some(READ_PLAYBACK), Some(params), None)
            .await
    }

    /// Get recently played tracks.
    ///
    /// `after` and `before` are millisecond Unix-timestamp cursors and
    /// are mutually exclusive.
    pub async fn get_recently_played_tracks(
        &self,
        limit: Option<u32>,
        after: Option<i64>,
        before: Option<i64>,
    ) -> Result<reqwest::Response> {
        if after.is_some() && before.is_some() {
            return Err(OstinatoError::InvalidArgument(
                "only one of after/before may be specified".to_string(),
            )
            .into());
        }
        let params = Params::new()
            .set_opt("limit", limit)
            .set_opt("after", after)
            .set_opt("before", before);
        self.request(
            Method::GET,
            "me/player/recently-played",
            Some("user-read-recently-played"),
            Some(params),
            None,
        )
        .await
    }

    /// Get the object currently being played.
    pub async fn get_currently_playing_track(
        &self,
        market: Option<&str>,
    ) -> Result<reqwest::Response> {
        let params = Params::new().set_opt("market", market);
        self.request(
            Method::GET,
            "me/player/currently-playing",
            Some(READ_PLAYBACK),
            Some(params),
            None,
        )
        .await
    }

    /// Play, pause, or skip playback.
    ///
    /// `action` is one of `play`, `pause`, `next`, `previous`.
    pub async fn playback_control(
        &self,
        action: &str,
        device_id: Option<&str>,
    ) -> Result<reqwest::Response> {
        let method = match action {
            "play" | "pause" => Method::PUT,
            "next" | "previous" => Method::POST,
            _ => {
                return Err(OstinatoError::InvalidArgument(format!(
                    "{action} is not a valid playback action (expected one of: play, pause, next, previous)"
                ))
                .into());
            }
        };
        let params = Params::new().set_opt("device_id", device_id);
        self.request(
            method,
            &format!("me/player/{action}"),
            Some(MODIFY_PLAYBACK),
            Some(params),
            None,
        )
        .await
    }

    /// Seek to a position in the currently playing track.
    pub async fn playback_track_position(
        &self,
        position_ms: u32,
        device_id: Option<&str>,
    ) -> Result<reqwest::Response> {
        let params = Params::new()
            .set("position_ms", position_ms)
            .set_opt("device_id", device_id);
        self.request(
            Method::PUT,
            "me/player/seek",
            Some(MODIFY_PLAYBACK),
            Some(params),
            None,
        )
        .await
    }

    /// Set the repeat or shuffle mode.
    ///
    /// Valid states depend on the mode: `repeat` accepts `track`,
    /// `context`, `off`; `shuffle` accepts `true`, `false`.
    pub async fn playback_mode(
        &self,
        mode: &str,
        state: &str,
        device_id: Option<&str>,
    ) -> Result<reqwest::Response> {
        let valid_states: &[&str] = match mode {
            "repeat" => &["track", "context", "off"],
            "shuffle" => &["true", "false"],
            _ => {
                return Err(OstinatoError::InvalidArgument(format!(
                    "{mode} is not a valid playback mode (expected one of: repeat, shuffle)"
                ))
                .into());
            }
        };
        if !valid_states.contains(&state) {
            return Err(OstinatoError::InvalidArgument(format!(
                "{state} is not a valid state for {mode} (expected one of: {})",
                valid_states.join(", ")
            ))
            .into());
        }
        let params = Params::new()
            .set("state", state)
            .set_opt("device_id", device_id);
        self.request(
            Method::PUT,
            &format!("me/player/{mode}"),
            Some(MODIFY_PLAYBACK),
            Some(params),
            None,
        )
        .await
    }

    /// Set the playback volume. `volume_percent` is 0-100.
    pub async fn playback_volume(
        &self,
        volume_percent: u8,
        device_id: Option<&str>,
    ) -> Result<reqwest::Response> {
        if volume_percent > 100 {
            return Err(OstinatoError::InvalidArgument(format!(
                "{volume_percent} is not a valid volume (expected 0-100)"
            ))
            .into());
        }
        let params = Params::new()
            .set("volume_percent", u32::from(volume_percent))
            .set_opt("device_id", device_id);
        self.request(
            Method::PUT,
            "me/player/volume",
            Some(MODIFY_PLAYBACK),
            Some(params),
            None,
        )
        .await
    }

    /// Transfer playback to another device.
    ///
    /// The API accepts an array but supports only a single device ID.
    pub async fn playback_transfer(
        &self,
        device_ids: &[&str],
        play: Option<bool>,
    ) -> Result<reqwest::Response> {
        let mut body = serde_json::Map::new();
        body.insert("device_ids".to_string(), serde_json::json!(device_ids));
        if let Some(play) = play {
            body.insert("play".to_string(), serde_json::json!(play));
        }
        self.request(
            Method::PUT,
            "me/player",
            Some(MODIFY_PLAYBACK),
            None,
            Some(serde_json::Value::Object(body)),
        )
        .await
    }
}
