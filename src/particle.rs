use std::ops::Range;

use rand::Rng;

use crate::surface::DrawSurface;

/// Colour with 8-bit channels and a real alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` form, as the canvas context expects it.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub vx: f32,
    pub vy: f32,
    pub opacity: f32,
}

/// Sampling ranges for freshly spawned particles.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRanges {
    pub size: Range<f32>,
    pub speed: Range<f32>,
    pub opacity: Range<f32>,
}

impl Particle {
    /// Spawns a particle somewhere on a `width` x `height` surface.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32, ranges: &SpawnRanges) -> Self {
        Self {
            x: rng.gen::<f32>()*width,
            y: rng.gen::<f32>()*height,
            size: rng.gen_range(ranges.size.clone()),
            vx: rng.gen_range(ranges.speed.clone()),
            vy: rng.gen_range(ranges.speed.clone()),
            opacity: rng.gen_range(ranges.opacity.clone()),
        }
    }
}

/// Moves the particle by one frame's velocity and wraps it back onto the surface.
///
/// The wrap is a reset rather than a modulo: leaving past the far edge puts the
/// particle at 0, leaving past 0 puts it exactly on the far edge.
pub fn advance(particle: &mut Particle, width: f32, height: f32) {
    particle.x += particle.vx;
    particle.y += particle.vy;

    particle.x = wrap_axis(particle.x, width);
    particle.y = wrap_axis(particle.y, height);
}

fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value > extent {
        0.0
    } else if value < 0.0 {
        extent
    } else {
        value
    }
}

pub fn draw<S: DrawSurface + ?Sized>(particle: &Particle, surface: &mut S, accent: Rgba) {
    surface.fill_disc([particle.x, particle.y], particle.size, accent.with_alpha(particle.opacity));
}
