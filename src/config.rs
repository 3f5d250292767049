use std::time::Duration;

pub const DEFAULT_USER_ID: &str = "887557388700368896";
pub const DEFAULT_RELAY_URL: &str = "wss://api.lanyard.rest/socket";
pub const DEFAULT_REST_URL: &str = "https://api.lanyard.rest/v1";
pub const DEFAULT_SOURCE_URL: &str = "https://dscbmr.is-a.dev/source.html";

/// Largest accepted viewport side, in pixels.
pub const MAX_VIEWPORT_SIDE: f64 = 16384.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Parse a `WIDTHxHEIGHT` string such as `1920x1080`.
    pub fn parse(s: &str) -> Option<Self> {
        let (w, h) = s.trim().split_once(['x', 'X'])?;
        let width: f64 = w.trim().parse().ok()?;
        let height: f64 = h.trim().parse().ok()?;
        let side_ok = |v: f64| v > 0.0 && v <= MAX_VIEWPORT_SIDE;
        if !side_ok(width) || !side_ok(height) {
            return None;
        }
        Some(Self { width, height })
    }
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub url: String,
    pub rest_url: String,
    pub reconnect_delay: Duration,
    pub heartbeat: bool,
    pub bootstrap: bool,
}

#[derive(Debug, Clone)]
pub struct ParticleConfig {
    pub enabled: bool,
    pub viewport: Viewport,
    /// Size the field from the terminal and follow its resizes. Off when
    /// `CARD_VIEWPORT` pins a size.
    pub follow_terminal: bool,
    pub frame_rate: u32,
}

pub struct Config {
    pub user_id: String,
    pub relay: RelayConfig,
    pub particles: ParticleConfig,
    pub asset_base: String,
    pub source_url: String,
}

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
        Ok(v) if v == "0" || v.eq_ignore_ascii_case("false") => false,
        _ => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        let reconnect_delay_ms: u64 = std::env::var("CARD_RECONNECT_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1000);

        let relay = RelayConfig {
            url: std::env::var("CARD_RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string()),
            rest_url: std::env::var("CARD_REST_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_REST_URL.to_string()),
            reconnect_delay: Duration::from_millis(reconnect_delay_ms),
            heartbeat: env_flag("CARD_HEARTBEAT", true),
            bootstrap: env_flag("CARD_BOOTSTRAP", true),
        };

        let pinned = std::env::var("CARD_VIEWPORT")
            .ok()
            .and_then(|v| Viewport::parse(&v));

        let frame_rate = std::env::var("CARD_FRAME_RATE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|fps| *fps > 0)
            .unwrap_or(60);

        let particles = ParticleConfig {
            enabled: env_flag("CARD_PARTICLES", true),
            viewport: pinned.unwrap_or(Viewport::new(1920.0, 1080.0)),
            follow_terminal: pinned.is_none(),
            frame_rate,
        };

        Self {
            user_id: std::env::var("CARD_USER_ID").unwrap_or_else(|_| DEFAULT_USER_ID.to_string()),
            relay,
            particles,
            asset_base: std::env::var("CARD_ASSET_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "./public".to_string()),
            source_url: std::env::var("CARD_SOURCE_URL")
                .unwrap_or_else(|_| DEFAULT_SOURCE_URL.to_string()),
        }
    }
}
