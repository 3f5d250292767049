use rand::Rng;

use super::pointer::{Pointer, POINTER_RADIUS};

/// Largest drift per axis per frame, in either direction.
pub const MAX_DRIFT: f64 = 0.25;
pub const MIN_RADIUS: f64 = 1.0;
pub const MAX_RADIUS: f64 = 3.0;
/// Distance a particle is nudged away from the pointer per frame.
pub const NUDGE_STEP: f64 = 2.0;
/// Nudges stop this many radii short of the viewport edge.
pub const EDGE_GUARD_RADII: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
}

impl Particle {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Self {
        Self {
            x: rng.gen::<f64>() * width,
            y: rng.gen::<f64>() * height,
            vx: rng.gen_range(-MAX_DRIFT..MAX_DRIFT),
            vy: rng.gen_range(-MAX_DRIFT..MAX_DRIFT),
            radius: rng.gen_range(MIN_RADIUS..MAX_RADIUS),
        }
    }

    /// Move by one frame of drift, then flip the velocity on any axis that
    /// left `[0, width] x [0, height]`. Overshoot is not corrected.
    pub fn advance(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;
        if self.x > width || self.x < 0.0 {
            self.vx = -self.vx;
        }
        if self.y > height || self.y < 0.0 {
            self.vy = -self.vy;
        }
    }

    /// Push the particle a fixed step away from the pointer, per axis. This
    /// moves the position only; the drift velocity is left alone.
    pub fn repel(&mut self, pointer: Pointer, width: f64, height: f64) {
        let dx = self.x - pointer.x;
        let dy = self.y - pointer.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance >= POINTER_RADIUS + self.radius {
            return;
        }

        let guard = self.radius * EDGE_GUARD_RADII;
        if pointer.x < self.x && self.x < width - guard {
            self.x += NUDGE_STEP;
        }
        if pointer.x > self.x && self.x > guard {
            self.x -= NUDGE_STEP;
        }
        if pointer.y < self.y && self.y < height - guard {
            self.y += NUDGE_STEP;
        }
        if pointer.y > self.y && self.y > guard {
            self.y -= NUDGE_STEP;
        }
    }

    pub fn distance_sq(&self, other: &Particle) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}
