//! Wire types for the presence relay. Every field is defaulted so that a
//! partial payload still decodes; unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Activity `type` values used by the relay.
pub mod activity_type {
    pub const PLAYING: i64 = 0;
    pub const STREAMING: i64 = 1;
    pub const LISTENING: i64 = 2;
    pub const WATCHING: i64 = 3;
    pub const CUSTOM: i64 = 4;
    pub const COMPETING: i64 = 5;
}

/// Fixed activity id the relay assigns to the Spotify integration.
pub const SPOTIFY_ACTIVITY_ID: &str = "spotify:1";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PresencePayload {
    pub discord_status: String,
    pub discord_user: DiscordUser,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordUser {
    pub id: Option<String>,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub global_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: i64,
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub state: Option<String>,
    pub details: Option<String>,
    pub application_id: Option<String>,
    pub emoji: Option<ActivityEmoji>,
    pub timestamps: Option<ActivityTimestamps>,
    pub assets: Option<ActivityAssets>,
}

impl Activity {
    pub fn is_spotify(&self) -> bool {
        self.id.as_deref() == Some(SPOTIFY_ACTIVITY_ID)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityEmoji {
    pub id: Option<String>,
    pub name: Option<String>,
    pub animated: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityTimestamps {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityAssets {
    pub large_image: Option<String>,
    pub large_text: Option<String>,
    pub small_image: Option<String>,
    pub small_text: Option<String>,
}
