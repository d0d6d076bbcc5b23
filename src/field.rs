use rand::Rng;

use crate::{
    particle::{self, Particle, Rgba, SpawnRanges},
    surface::DrawSurface,
};

pub const PARTICLE_COUNT: usize = 80;
pub const LINK_DISTANCE: f32 = 120.0;
pub const LINK_PEAK_ALPHA: f32 = 0.15;
pub const ACCENT: Rgba = Rgba::rgb(108, 92, 231);

#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub spawn: SpawnRanges,
    /// Particles strictly closer than this are linked.
    pub link_distance: f32,
    pub link_peak_alpha: f32,
    pub link_width: f32,
    pub accent: Rgba,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            spawn: SpawnRanges {
                size: 1.0..4.0,
                speed: -0.5..0.5,
                opacity: 0.2..0.7,
            },
            link_distance: LINK_DISTANCE,
            link_peak_alpha: LINK_PEAK_ALPHA,
            link_width: 1.0,
            accent: ACCENT,
        }
    }
}

/// Alpha of the line joining `a` and `b`, or `None` when they are too far apart.
///
/// Fades linearly from `peak` at distance 0 to 0 at `threshold`.
pub fn link_alpha(a: &Particle, b: &Particle, threshold: f32, peak: f32) -> Option<f32> {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let distance = (dx*dx + dy*dy).sqrt();
    if distance < threshold {
        Some(peak*(1.0 - distance/threshold))
    } else {
        None
    }
}

/// Fixed population of particles. Never grows or shrinks after construction.
#[derive(Debug)]
pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(config: FieldConfig, rng: &mut R, width: f32, height: f32) -> Self {
        let mut particles = Vec::with_capacity(config.particle_count);
        for _ in 0..config.particle_count {
            particles.push(Particle::spawn(rng, width, height, &config.spawn));
        }
        Self { config, particles }
    }

    pub fn from_particles(config: FieldConfig, particles: Vec<Particle>) -> Self {
        Self { config, particles }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Steps and draws every particle, linking each one to the particles after it.
    ///
    /// Particle `i` is moved before its links are tested, particles `j > i` are
    /// still at last frame's position. Returns the number of links drawn.
    pub fn render<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> usize {
        let (width, height) = surface.size();
        let FieldConfig { link_distance, link_peak_alpha, link_width, accent, .. } = self.config;
        let mut links = 0;

        surface.clear();
        for i in 0..self.particles.len() {
            particle::advance(&mut self.particles[i], width, height);
            let current = self.particles[i];
            particle::draw(&current, &mut *surface, accent);

            for other in &self.particles[i + 1..] {
                if let Some(alpha) = link_alpha(&current, other, link_distance, link_peak_alpha) {
                    surface.stroke_line([current.x, current.y], [other.x, other.y], link_width, accent.with_alpha(alpha));
                    links += 1;
                }
            }
        }
        links
    }
}
