use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use log::{debug, info, warn};
use rand::Rng;

use crate::{
    error::{Error, Result},
    field::{FieldConfig, ParticleField},
    surface::DrawSurface,
};

fn usable_size(width: f32, height: f32) -> bool {
    width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0
}

/// Cancellation token for a running animation. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// The frame was drawn; carries the number of links drawn.
    Drawn { links: usize },
    Stopped,
}

/// Owns the particle field and the surface it is drawn on.
///
/// The host calls [`Animator::frame`] once per display refresh after
/// [`Animator::start`], until the animator is stopped.
pub struct Animator<S: DrawSurface> {
    field: ParticleField,
    surface: S,
    stop: Option<StopHandle>,
    frames: u64,
}

impl<S: DrawSurface> Animator<S> {
    pub fn new<R: Rng + ?Sized>(surface: S, config: FieldConfig, rng: &mut R) -> Result<Self> {
        let (width, height) = surface.size();
        if !usable_size(width, height) {
            return Err(Error::NoSurface(format!("invalid surface size {}x{}", width, height)));
        }
        let field = ParticleField::new(config, rng, width, height);
        debug!("spawned {} particles on a {}x{} surface", field.len(), width, height);
        Ok(Self::with_field(surface, field))
    }

    pub fn with_field(surface: S, field: ParticleField) -> Self {
        Self {
            field,
            surface,
            stop: None,
            frames: 0,
        }
    }

    /// Arms the animation. Calling it again while running returns the same handle.
    pub fn start(&mut self) -> StopHandle {
        match &self.stop {
            Some(handle) if !handle.is_stopped() => handle.clone(),
            _ => {
                info!("particle animation started");
                let handle = StopHandle::default();
                self.stop = Some(handle.clone());
                handle
            }
        }
    }

    pub fn stop(&mut self) {
        if let Some(handle) = &self.stop {
            if !handle.is_stopped() {
                info!("particle animation stopped after {} frames", self.frames);
            }
            handle.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(&self.stop, Some(handle) if !handle.is_stopped())
    }

    /// Renders one frame unless the animation is stopped or was never started.
    pub fn frame(&mut self) -> Frame {
        if !self.is_running() {
            return Frame::Stopped;
        }
        let links = self.field.render(&mut self.surface);
        self.frames += 1;
        Frame::Drawn { links }
    }

    /// Runs up to `frames` frames, returning how many were drawn.
    pub fn run_frames(&mut self, frames: u64) -> u64 {
        self.run_frames_with(frames, |_| {})
    }

    /// Like [`Animator::run_frames`], calling `after_frame` once after each drawn frame.
    pub fn run_frames_with<F>(&mut self, frames: u64, mut after_frame: F) -> u64
    where
        F: FnMut(&Self),
    {
        let mut drawn = 0;
        while drawn < frames {
            match self.frame() {
                Frame::Drawn { .. } => {
                    drawn += 1;
                    after_frame(self);
                }
                Frame::Stopped => break,
            }
        }
        drawn
    }

    /// Resizes the surface. Particles keep their positions and wrap on their next step.
    ///
    /// Negative or non-finite sizes are ignored and the previous size is kept.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !usable_size(width, height) {
            warn!("ignoring resize to invalid size {}x{}", width, height);
            return;
        }
        debug!("resizing surface to {}x{}", width, height);
        self.surface.resize(width, height);
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
