pub mod animator;
pub mod error;
pub mod field;
pub mod mesh;
pub mod particle;
pub mod surface;

#[cfg(not(target_arch = "wasm32"))]
pub mod gpu;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use animator::{Animator, Frame, StopHandle};
pub use error::{Error, Result};
pub use field::{link_alpha, FieldConfig, ParticleField};
pub use particle::{Particle, Rgba};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};
