//! Image references and labels for the presence card.

use crate::models::snapshot::{EmojiRef, Game, MediaTrack, Status};

pub const DISCORD_CDN: &str = "https://cdn.discordapp.com";
pub const SPOTIFY_CDN: &str = "https://i.scdn.co/image";
pub const SPOTIFY_LOGO: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/1/19/Spotify_logo_without_text.svg/2048px-Spotify_logo_without_text.svg.png";
pub const FALLBACK_AVATAR: &str = "https://cdn.discordapp.com/embed/avatars/0.png";

const EXTERNAL_PREFIX: &str = "mp:external/";

/// Local asset paths, rooted at the configured asset base.
#[derive(Debug, Clone)]
pub struct AssetPaths {
    base: String,
}

impl AssetPaths {
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn status_icon(&self, status: Status) -> String {
        format!("{}/status/{}.svg", self.base, status.as_str())
    }

    pub fn unknown_image(&self) -> String {
        format!("{}/unknown.png", self.base)
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self::new("./public")
    }
}

/// An image source plus the source to switch to if it fails to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub src: String,
    pub fallback: Option<String>,
}

impl ImageRef {
    pub fn direct(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            fallback: None,
        }
    }
}

/// Unicode emoji have no image; only custom emoji resolve.
pub fn emoji_url(emoji: &EmojiRef) -> Option<String> {
    match emoji {
        EmojiRef::Custom { id } if is_snowflake(id) => Some(format!(
            "{DISCORD_CDN}/emojis/{id}.webp?size=24&quality=lossless"
        )),
        _ => None,
    }
}

pub fn app_asset_url(application_id: &str, asset_id: &str) -> Option<String> {
    if !is_snowflake(application_id) || asset_id.is_empty() || asset_id.contains('/') {
        return None;
    }
    Some(format!("{DISCORD_CDN}/app-assets/{application_id}/{asset_id}.png"))
}

/// Rewrite `mp:external/<hash>/<scheme>/<host>/<path>` into `<scheme>://<host>/<path>`.
pub fn external_image_url(asset_id: &str) -> Option<String> {
    let rest = asset_id.strip_prefix(EXTERNAL_PREFIX)?;
    let mut parts = rest.splitn(3, '/');
    let _hash = parts.next()?;
    let scheme = parts.next()?;
    let target = parts.next()?;
    if scheme != "http" && scheme != "https" {
        return None;
    }
    if target.is_empty() || target.starts_with('/') {
        return None;
    }
    Some(format!("{scheme}://{target}"))
}

pub fn game_large_image(game: &Game, paths: &AssetPaths) -> ImageRef {
    let resolved = game.large_image_ref.as_deref().and_then(|id| {
        if id.starts_with("mp:external") {
            external_image_url(id)
        } else {
            app_asset_url(&game.application_id, id)
        }
    });
    match resolved {
        Some(src) => ImageRef::direct(src),
        None => ImageRef {
            src: paths.unknown_image(),
            fallback: Some(FALLBACK_AVATAR.to_string()),
        },
    }
}

pub fn game_small_image(game: &Game) -> Option<String> {
    game.small_image_ref
        .as_deref()
        .and_then(|id| app_asset_url(&game.application_id, id))
}

pub fn track_cover(track: &MediaTrack) -> ImageRef {
    match track
        .cover_image_ref
        .as_deref()
        .map(|id| id.strip_prefix("spotify:").unwrap_or(id))
        .filter(|id| !id.is_empty())
    {
        Some(id) => ImageRef::direct(format!("{SPOTIFY_CDN}/{id}")),
        None => ImageRef::direct(SPOTIFY_LOGO),
    }
}

fn is_snowflake(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}
