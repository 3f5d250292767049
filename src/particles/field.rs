use rand::rngs::StdRng;
use rand::SeedableRng;

use super::canvas::{Canvas, DotStyle, LineStyle, Rgba};
use super::particle::Particle;
use super::pointer::Pointer;
use crate::config::Viewport;

/// Viewport area, in square pixels, per particle.
pub const AREA_PER_PARTICLE: f64 = 9000.0;
/// Squared distance at which a link fades to nothing.
pub const LINK_FADE_DISTANCE_SQ: f64 = 20000.0;
pub const LINK_MAX_ALPHA: f64 = 0.2;
/// Upper bound on the pool, which keeps the all-pairs link pass near half a
/// million distance checks per frame.
pub const MAX_PARTICLES: usize = 1000;

pub const DOT_STYLE: DotStyle = DotStyle {
    fill: Rgba::white(0.8),
    glow_blur: 10.0,
    glow_color: Rgba::white(1.0),
};

pub fn particle_count(viewport: Viewport) -> usize {
    let count = (viewport.width * viewport.height / AREA_PER_PARTICLE).floor();
    if count.is_nan() {
        return 0;
    }
    count.clamp(0.0, MAX_PARTICLES as f64) as usize
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub opacity: f64,
}

/// The particle pool for one viewport size.
///
/// Linking is an all-pairs pass, quadratic in the particle count. At one
/// particle per 9000 px² that stays in the low hundreds for real screens,
/// and [`MAX_PARTICLES`] caps it for anything larger. A denser setting
/// would want a spatial grid here.
pub struct ParticleField {
    viewport: Viewport,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_rng(viewport, StdRng::from_entropy())
    }

    pub fn with_seed(viewport: Viewport, seed: u64) -> Self {
        Self::with_rng(viewport, StdRng::seed_from_u64(seed))
    }

    fn with_rng(viewport: Viewport, rng: StdRng) -> Self {
        let mut field = Self {
            viewport,
            particles: Vec::new(),
            rng,
        };
        field.populate();
        field
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Throw the pool away and build a fresh one for the new size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.populate();
    }

    fn populate(&mut self) {
        let count = particle_count(self.viewport);
        let Viewport { width, height } = self.viewport;
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| Particle::random(rng, width, height))
            .collect();
    }

    /// Move every particle one frame: drift, wall bounce, pointer nudge.
    pub fn step(&mut self, pointer: Option<Pointer>) {
        let Viewport { width, height } = self.viewport;
        for particle in &mut self.particles {
            particle.advance(width, height);
            if let Some(pointer) = pointer {
                particle.repel(pointer, width, height);
            }
        }
    }

    /// Every unordered pair close enough to be linked, self-pairs included.
    pub fn links(&self) -> Vec<Link> {
        let Viewport { width, height } = self.viewport;
        let reach_sq = (width / 7.0) * (height / 7.0);
        let mut links = Vec::new();
        for a in 0..self.particles.len() {
            for b in a..self.particles.len() {
                let distance_sq = self.particles[a].distance_sq(&self.particles[b]);
                if distance_sq >= reach_sq {
                    continue;
                }
                let opacity = 1.0 - distance_sq / LINK_FADE_DISTANCE_SQ;
                if opacity > 0.0 {
                    links.push(Link { a, b, opacity });
                }
            }
        }
        links
    }

    /// Paint dots then links. Returns how many links were stroked.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) -> usize {
        for p in &self.particles {
            canvas.fill_circle(p.x, p.y, p.radius, &DOT_STYLE);
        }
        let links = self.links();
        for link in &links {
            let a = &self.particles[link.a];
            let b = &self.particles[link.b];
            let style = LineStyle {
                color: Rgba::white(link.opacity * LINK_MAX_ALPHA),
                width: 1.0,
            };
            canvas.stroke_line((a.x, a.y), (b.x, b.y), &style);
        }
        links.len()
    }

    /// One animation frame. Returns the number of links drawn.
    pub fn tick<C: Canvas + ?Sized>(&mut self, pointer: Option<Pointer>, canvas: &mut C) -> usize {
        canvas.clear();
        self.step(pointer);
        self.draw(canvas)
    }
}
