//! Normalized presence state derived from one relay event. A new snapshot
//! replaces the previous one wholesale; nothing is merged.

use super::presence::{activity_type, Activity, PresencePayload};

/// Substrings that mark a streaming activity URL as a livestream.
pub const LIVESTREAM_DOMAINS: &[&str] = &["twitch.tv", "youtube.com"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Online,
    Idle,
    Dnd,
    Offline,
    Streaming,
}

impl Status {
    /// Map the relay's status string. Unknown values read as offline.
    pub fn from_relay(s: &str) -> Self {
        match s {
            "online" => Status::Online,
            "idle" => Status::Idle,
            "dnd" => Status::Dnd,
            _ => Status::Offline,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Online => "online",
            Status::Idle => "idle",
            Status::Dnd => "dnd",
            Status::Offline => "offline",
            Status::Streaming => "streaming",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Online => "Online",
            Status::Idle => "Idle",
            Status::Dnd => "Do Not Disturb",
            Status::Offline => "Offline",
            Status::Streaming => "Streaming",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfo {
    pub display_name: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmojiRef {
    Custom { id: String },
    Unicode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomStatus {
    pub text: String,
    pub emoji: Option<EmojiRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub name: String,
    pub details: Option<String>,
    pub state: Option<String>,
    pub large_image_ref: Option<String>,
    pub small_image_ref: Option<String>,
    pub application_id: String,
    pub started_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTrack {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub cover_image_ref: Option<String>,
    pub started_at: Option<i64>,
    pub ends_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RichActivity {
    Game(Game),
    MediaTrack(MediaTrack),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceSnapshot {
    pub status: Status,
    pub user: UserInfo,
    pub custom_status: Option<CustomStatus>,
    pub rich_activity: Option<RichActivity>,
}

impl PresenceSnapshot {
    pub fn project(payload: &PresencePayload) -> Self {
        let activities = &payload.activities;

        let status = if activities.iter().any(is_livestream) {
            Status::Streaming
        } else {
            Status::from_relay(&payload.discord_status)
        };

        let user = UserInfo {
            display_name: payload
                .discord_user
                .display_name
                .clone()
                .or_else(|| payload.discord_user.global_name.clone())
                .unwrap_or_default(),
            username: payload.discord_user.username.clone().unwrap_or_default(),
        };

        let custom_status = activities
            .iter()
            .find(|a| a.activity_type == activity_type::CUSTOM)
            .map(custom_status_of);

        let rich_activity = activities
            .iter()
            .find(|a| a.activity_type == activity_type::PLAYING)
            .map(|a| RichActivity::Game(game_of(a)))
            .or_else(|| {
                activities
                    .iter()
                    .find(|a| a.is_spotify())
                    .map(|a| RichActivity::MediaTrack(track_of(a)))
            });

        Self {
            status,
            user,
            custom_status,
            rich_activity,
        }
    }
}

impl From<&PresencePayload> for PresenceSnapshot {
    fn from(payload: &PresencePayload) -> Self {
        Self::project(payload)
    }
}

fn is_livestream(activity: &Activity) -> bool {
    activity.activity_type == activity_type::STREAMING
        && activity
            .url
            .as_deref()
            .is_some_and(|url| LIVESTREAM_DOMAINS.iter().any(|d| url.contains(d)))
}

fn custom_status_of(activity: &Activity) -> CustomStatus {
    let emoji = activity.emoji.as_ref().and_then(|e| {
        match (e.id.as_deref().filter(|id| !id.is_empty()), e.name.as_deref()) {
            (Some(id), _) => Some(EmojiRef::Custom { id: id.to_string() }),
            (None, Some(name)) if !name.is_empty() => Some(EmojiRef::Unicode(name.to_string())),
            _ => None,
        }
    });
    CustomStatus {
        text: activity.state.clone().unwrap_or_default(),
        emoji,
    }
}

fn game_of(activity: &Activity) -> Game {
    let assets = activity.assets.clone().unwrap_or_default();
    Game {
        name: activity.name.clone().unwrap_or_default(),
        details: activity.details.clone(),
        state: activity.state.clone(),
        large_image_ref: assets.large_image,
        small_image_ref: assets.small_image,
        application_id: activity.application_id.clone().unwrap_or_default(),
        started_at: activity.timestamps.as_ref().and_then(|t| t.start),
    }
}

fn track_of(activity: &Activity) -> MediaTrack {
    let assets = activity.assets.clone().unwrap_or_default();
    MediaTrack {
        title: activity.details.clone().unwrap_or_default(),
        artist: activity.state.clone().unwrap_or_default(),
        album: assets.large_text.unwrap_or_default(),
        cover_image_ref: assets.large_image,
        started_at: activity.timestamps.as_ref().and_then(|t| t.start),
        ends_at: activity.timestamps.as_ref().and_then(|t| t.end),
    }
}
