//! Terminal-backed surfaces used by the binary.

use std::fmt::Write as _;
use std::sync::{Mutex, MutexGuard};

use crossterm::terminal::WindowSize;

use crate::config::{Viewport, MAX_VIEWPORT_SIDE};
use crate::particles::canvas::{Canvas, DotStyle, LineStyle};
use crate::presence::view::{ActivityDisplay, CustomStatusDisplay, PresenceView};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardState {
    pub display_name: String,
    pub username: String,
    pub status_icon: String,
    pub status_label: String,
    pub custom_status: Option<CustomStatusDisplay>,
    pub activity: Option<ActivityDisplay>,
    pub timestamp: Option<String>,
}

/// Keeps the card's fields and logs whenever a visible one changes.
#[derive(Debug, Default)]
pub struct ConsoleView {
    state: Mutex<CardState>,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CardState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> CardState {
        self.lock().clone()
    }

    pub fn render(&self) -> String {
        render_card(&self.lock())
    }
}

pub fn render_card(card: &CardState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (@{}) · {}",
        card.display_name, card.username, card.status_label
    );
    if let Some(custom) = &card.custom_status {
        match &custom.emoji_url {
            Some(url) => {
                let _ = writeln!(out, "  {} [{}]", custom.text, url);
            }
            None => {
                let _ = writeln!(out, "  {}", custom.text);
            }
        }
    }
    if let Some(activity) = &card.activity {
        let _ = writeln!(out, "  {}", activity.header);
        for line in [&activity.name, &activity.details, &activity.state] {
            if !line.is_empty() {
                let _ = writeln!(out, "    {line}");
            }
        }
        let _ = writeln!(out, "    image: {}", activity.large_image.src);
        if let Some(small) = &activity.small_image {
            let _ = writeln!(out, "    small: {small}");
        }
        if let Some(ts) = &card.timestamp {
            let _ = writeln!(out, "    {ts}");
        }
    }
    out
}

impl PresenceView for ConsoleView {
    fn set_user(&self, display_name: &str, username: &str) {
        let mut card = self.lock();
        if card.display_name != display_name || card.username != username {
            card.display_name = display_name.to_string();
            card.username = username.to_string();
            tracing::info!(display_name, username, "user");
        }
    }

    fn set_status(&self, icon: &str, label: &str) {
        let mut card = self.lock();
        if card.status_label != label {
            tracing::info!(status = label, icon, "status");
        }
        card.status_icon = icon.to_string();
        card.status_label = label.to_string();
    }

    fn set_custom_status(&self, custom: Option<&CustomStatusDisplay>) {
        let mut card = self.lock();
        if card.custom_status.as_ref() != custom {
            match custom {
                Some(c) => tracing::info!(text = %c.text, "custom status"),
                None => tracing::info!("custom status cleared"),
            }
            card.custom_status = custom.cloned();
        }
    }

    fn set_activity(&self, activity: Option<&ActivityDisplay>) {
        let mut card = self.lock();
        if card.activity.as_ref() != activity {
            match activity {
                Some(a) => tracing::info!(header = %a.header, name = %a.name, details = %a.details, "activity"),
                None => tracing::info!("activity cleared"),
            }
            card.activity = activity.cloned();
        }
    }

    fn set_timestamp(&self, text: Option<&str>) {
        if let Some(text) = text {
            tracing::trace!(text, "activity timestamp");
        }
        self.lock().timestamp = text.map(String::from);
    }
}

/// Headless canvas for the terminal, where nothing is painted. It keeps the
/// surface size so resizes can be checked.
#[derive(Debug, Default)]
pub struct HeadlessCanvas {
    size: (f64, f64),
}

impl HeadlessCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> (f64, f64) {
        self.size
    }
}

impl Canvas for HeadlessCanvas {
    fn resize(&mut self, width: f64, height: f64) {
        self.size = (width, height);
    }

    fn clear(&mut self) {}

    fn fill_circle(&mut self, _x: f64, _y: f64, _radius: f64, _style: &DotStyle) {}

    fn stroke_line(&mut self, _from: (f64, f64), _to: (f64, f64), _style: &LineStyle) {}
}

/// Pixel size assumed for one character cell when the terminal does not
/// report pixel dimensions.
pub const CELL_SIZE: (f64, f64) = (8.0, 16.0);

/// Viewport for a terminal window, from its reported pixel size or else
/// its cell grid. Sides are capped at [`MAX_VIEWPORT_SIDE`].
pub fn viewport_from_window(size: WindowSize) -> Option<Viewport> {
    let (width, height) = if size.width > 0 && size.height > 0 {
        (f64::from(size.width), f64::from(size.height))
    } else {
        (
            f64::from(size.columns) * CELL_SIZE.0,
            f64::from(size.rows) * CELL_SIZE.1,
        )
    };
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(Viewport::new(
        width.min(MAX_VIEWPORT_SIDE),
        height.min(MAX_VIEWPORT_SIDE),
    ))
}

/// Current size of the controlling terminal, if there is one.
pub fn terminal_viewport() -> Option<Viewport> {
    match crossterm::terminal::window_size() {
        Ok(size) => viewport_from_window(size),
        Err(e) => {
            tracing::debug!("terminal size unavailable: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::assets::ImageRef;

    #[test]
    fn test_render_card_with_activity() {
        let view = ConsoleView::new();
        view.set_user("Bimmer", "dscbmr");
        view.set_status("./public/status/idle.svg", "Idle");
        view.set_custom_status(Some(&CustomStatusDisplay {
            text: "afk".into(),
            emoji_url: None,
        }));
        view.set_activity(Some(&ActivityDisplay {
            header: "PLAYING A GAME".into(),
            name: "Factorio".into(),
            details: String::new(),
            state: "Nauvis".into(),
            large_image: ImageRef::direct("https://img/1.png"),
            small_image: None,
        }));
        view.set_timestamp(Some("00:42 elapsed"));

        assert_eq!(
            view.render(),
            "Bimmer (@dscbmr) · Idle\n  afk\n  PLAYING A GAME\n    Factorio\n    Nauvis\n    image: https://img/1.png\n    00:42 elapsed\n"
        );
    }

    #[test]
    fn test_hidden_sections_are_not_rendered() {
        let view = ConsoleView::new();
        view.set_user("A", "a");
        view.set_status("./public/status/offline.svg", "Offline");
        view.set_activity(None);
        view.set_timestamp(Some("stale"));
        assert_eq!(view.render(), "A (@a) · Offline\n");
        assert_eq!(view.state().timestamp.as_deref(), Some("stale"));
    }

    #[test]
    fn test_headless_canvas_tracks_size() {
        let mut canvas = HeadlessCanvas::new();
        canvas.resize(10.0, 20.0);
        canvas.clear();
        assert_eq!(canvas.size(), (10.0, 20.0));
    }

    fn window(columns: u16, rows: u16, width: u16, height: u16) -> WindowSize {
        WindowSize {
            rows,
            columns,
            width,
            height,
        }
    }

    #[test]
    fn test_viewport_prefers_pixel_size() {
        assert_eq!(
            viewport_from_window(window(80, 24, 1280, 720)),
            Some(Viewport::new(1280.0, 720.0))
        );
    }

    #[test]
    fn test_viewport_from_cells() {
        assert_eq!(
            viewport_from_window(window(120, 40, 0, 0)),
            Some(Viewport::new(960.0, 640.0))
        );
        assert_eq!(viewport_from_window(window(0, 0, 0, 0)), None);
    }

    #[test]
    fn test_viewport_from_window_is_capped() {
        let vp = viewport_from_window(window(u16::MAX, u16::MAX, 0, 0)).unwrap();
        assert_eq!(vp, Viewport::new(MAX_VIEWPORT_SIDE, MAX_VIEWPORT_SIDE));
    }
}
