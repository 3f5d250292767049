use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use super::canvas::Canvas;
use super::field::ParticleField;
use super::pointer::PointerState;
use crate::config::Viewport;

const STATS_EVERY_FRAMES: u64 = 600;

enum Step {
    Frame,
    Resize(Viewport),
}

/// Paces the particle field at a fixed frame rate and applies viewport
/// resizes between frames.
pub struct FrameDriver<C: Canvas> {
    field: ParticleField,
    canvas: C,
    pointer: Arc<PointerState>,
    frame_interval: Duration,
    frames: u64,
    last_links: usize,
}

impl<C: Canvas> FrameDriver<C> {
    pub fn new(field: ParticleField, canvas: C, pointer: Arc<PointerState>, frame_rate: u32) -> Self {
        Self {
            field,
            canvas,
            pointer,
            frame_interval: Duration::from_secs_f64(1.0 / f64::from(frame_rate.max(1))),
            frames: 0,
            last_links: 0,
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Links drawn by the most recent frame.
    pub fn last_links(&self) -> usize {
        self.last_links
    }

    pub fn frame(&mut self) {
        self.last_links = self.field.tick(self.pointer.get(), &mut self.canvas);
        self.frames += 1;
        if self.frames % STATS_EVERY_FRAMES == 0 {
            let viewport = self.field.viewport();
            tracing::info!(
                frames = self.frames,
                particles = self.field.particles().len(),
                links = self.last_links,
                width = viewport.width,
                height = viewport.height,
                pointer = self.pointer.get().is_some(),
                "particle field running"
            );
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.canvas.resize(viewport.width, viewport.height);
        self.field.resize(viewport);
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            particles = self.field.particles().len(),
            "particle field resized"
        );
    }

    /// Runs frames forever. Once the resize sender is gone the current size
    /// is kept.
    pub async fn run(mut self, resize: watch::Receiver<Viewport>) {
        let viewport = self.field.viewport();
        self.canvas.resize(viewport.width, viewport.height);

        let mut resize = Some(resize);
        let mut ticker = tokio::time::interval(self.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let step = tokio::select! {
                _ = ticker.tick() => Step::Frame,
                next = next_resize(&mut resize) => match next {
                    Some(viewport) => Step::Resize(viewport),
                    None => continue,
                },
            };

            match step {
                Step::Frame => self.frame(),
                Step::Resize(viewport) => self.resize(viewport),
            }
        }
    }
}

async fn next_resize(resize: &mut Option<watch::Receiver<Viewport>>) -> Option<Viewport> {
    let Some(rx) = resize else {
        return std::future::pending().await;
    };
    match rx.changed().await {
        Ok(()) => Some(*rx.borrow_and_update()),
        Err(_) => {
            *resize = None;
            None
        }
    }
}
