//! Decorative particle background: a drifting pool of dots that shy away
//! from the pointer and link up with nearby neighbours.

pub mod canvas;
pub mod driver;
pub mod field;
pub mod particle;
pub mod pointer;

pub use canvas::Canvas;
pub use driver::FrameDriver;
pub use field::ParticleField;
pub use particle::Particle;
pub use pointer::{Pointer, PointerState};
