pub mod assets;
pub mod countdown;
pub mod view;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::models::presence::PresencePayload;
use crate::models::snapshot::{CustomStatus, PresenceSnapshot, RichActivity};
use assets::AssetPaths;
use countdown::{Clock, Countdown, CountdownHandle};
use view::{ActivityDisplay, CustomStatusDisplay, PresenceView, GAME_HEADER, TRACK_HEADER};

/// Keeps one user's presence reflected into a [`PresenceView`].
///
/// At most one countdown timer is alive at a time: every snapshot cancels the
/// running one before anything new is armed.
pub struct PresenceSync<V: PresenceView + ?Sized> {
    view: Arc<V>,
    clock: Arc<dyn Clock>,
    assets: AssetPaths,
    active_countdown: Option<CountdownHandle>,
    current: Option<PresenceSnapshot>,
}

impl<V: PresenceView + ?Sized> PresenceSync<V> {
    pub fn new(view: Arc<V>, clock: Arc<dyn Clock>, assets: AssetPaths) -> Self {
        Self {
            view,
            clock,
            assets,
            active_countdown: None,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&PresenceSnapshot> {
        self.current.as_ref()
    }

    /// True while a countdown timer is still ticking.
    pub fn has_active_countdown(&self) -> bool {
        self.active_countdown
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn apply_payload(&mut self, payload: &PresencePayload) {
        self.apply(PresenceSnapshot::project(payload));
    }

    /// Must run inside a tokio runtime; countdowns are spawned tasks.
    pub fn apply(&mut self, snapshot: PresenceSnapshot) {
        if let Some(handle) = self.active_countdown.take() {
            handle.cancel();
        }

        self.view
            .set_user(&snapshot.user.display_name, &snapshot.user.username);
        self.view.set_status(
            &self.assets.status_icon(snapshot.status),
            snapshot.status.label(),
        );

        let custom = snapshot.custom_status.as_ref().map(custom_status_display);
        self.view.set_custom_status(custom.as_ref());

        let activity = snapshot
            .rich_activity
            .as_ref()
            .map(|a| activity_display(a, &self.assets));
        self.view.set_activity(activity.as_ref());
        self.view.set_timestamp(None);

        if let Some(countdown) = snapshot.rich_activity.as_ref().and_then(Countdown::for_activity) {
            self.active_countdown =
                countdown::arm(Arc::clone(&self.view), Arc::clone(&self.clock), countdown);
        }

        tracing::debug!(
            status = snapshot.status.as_str(),
            rich = snapshot.rich_activity.is_some(),
            "presence applied"
        );
        self.current = Some(snapshot);
    }

    /// Apply payloads in delivery order until every sender is gone.
    pub async fn run(mut self, mut rx: mpsc::Receiver<PresencePayload>) {
        while let Some(payload) = rx.recv().await {
            self.apply_payload(&payload);
        }
        tracing::debug!("presence channel closed");
    }
}

pub fn custom_status_display(custom: &CustomStatus) -> CustomStatusDisplay {
    CustomStatusDisplay {
        text: custom.text.clone(),
        emoji_url: custom.emoji.as_ref().and_then(assets::emoji_url),
    }
}

pub fn activity_display(activity: &RichActivity, paths: &AssetPaths) -> ActivityDisplay {
    match activity {
        RichActivity::Game(game) => ActivityDisplay {
            header: GAME_HEADER.to_string(),
            name: game.name.clone(),
            details: game.details.clone().unwrap_or_default(),
            state: game.state.clone().unwrap_or_default(),
            large_image: assets::game_large_image(game, paths),
            small_image: assets::game_small_image(game),
        },
        RichActivity::MediaTrack(track) => ActivityDisplay {
            header: TRACK_HEADER.to_string(),
            name: track.title.clone(),
            details: format!("by {}", track.artist),
            state: format!("on {}", track.album),
            large_image: assets::track_cover(track),
            small_image: None,
        },
    }
}
