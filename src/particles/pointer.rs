use std::sync::Arc;

use arc_swap::ArcSwapOption;

/// Distance within which particles are pushed away from the pointer.
pub const POINTER_RADIUS: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

/// Last known pointer position, written by input handlers and read once
/// per frame. Absent until the first move and after the pointer leaves.
#[derive(Debug, Default)]
pub struct PointerState {
    position: ArcSwapOption<Pointer>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&self, x: f64, y: f64) {
        self.position.store(Some(Arc::new(Pointer { x, y })));
    }

    pub fn leave(&self) {
        self.position.store(None);
    }

    pub fn get(&self) -> Option<Pointer> {
        self.position.load().as_deref().copied()
    }
}
