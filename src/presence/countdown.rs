use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::view::PresenceView;
use crate::models::snapshot::RichActivity;

pub const TICK: Duration = Duration::from_secs(1);

/// Wall-clock source in Unix milliseconds.
pub trait Clock: Send + Sync + 'static {
    fn now_ms(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// `MM:SS`, or `H:MM:SS` from one hour up. Negative spans read as zero.
pub fn format_duration(ms: i64) -> String {
    let secs = ms.max(0) / 1000;
    let seconds = secs % 60;
    let minutes = (secs / 60) % 60;
    let hours = secs / 3600;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Playback position against a known length.
    Progress { start: i64, end: i64 },
    /// Time counted up from the start of an activity.
    Elapsed { start: i64 },
}

impl Countdown {
    pub fn for_activity(activity: &RichActivity) -> Option<Self> {
        match activity {
            RichActivity::MediaTrack(track) => match (track.started_at, track.ends_at) {
                (Some(start), Some(end)) => Some(Countdown::Progress { start, end }),
                _ => None,
            },
            RichActivity::Game(game) => game.started_at.map(|start| Countdown::Elapsed { start }),
        }
    }

    pub fn render(&self, now_ms: i64) -> String {
        match *self {
            Countdown::Progress { start, end } => format!(
                "{} / {}",
                format_duration(now_ms.saturating_sub(start)),
                format_duration(end.saturating_sub(start))
            ),
            Countdown::Elapsed { start } => {
                format!("{} elapsed", format_duration(now_ms.saturating_sub(start)))
            }
        }
    }

    /// Elapsed counters never complete on their own.
    pub fn is_complete(&self, now_ms: i64) -> bool {
        match *self {
            Countdown::Progress { end, .. } => now_ms >= end,
            Countdown::Elapsed { .. } => false,
        }
    }
}

/// Owns the repeating timer behind one countdown display. Dropping the
/// handle cancels the timer.
#[derive(Debug)]
pub struct CountdownHandle {
    task: JoinHandle<()>,
}

impl CountdownHandle {
    pub fn cancel(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Write the countdown once now, then once per tick until it completes.
/// Returns `None` when there is nothing left to tick.
pub fn arm<V>(view: Arc<V>, clock: Arc<dyn Clock>, countdown: Countdown) -> Option<CountdownHandle>
where
    V: PresenceView + ?Sized,
{
    let now = clock.now_ms();
    view.set_timestamp(Some(&countdown.render(now)));
    if countdown.is_complete(now) {
        return None;
    }

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + TICK, TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let now = clock.now_ms();
            view.set_timestamp(Some(&countdown.render(now)));
            if countdown.is_complete(now) {
                tracing::trace!("countdown complete");
                break;
            }
        }
    });

    Some(CountdownHandle { task })
}
