use crate::particle::Rgba;

pub type Point = [f32; 2];

/// Immediate-mode 2D target the animator draws onto.
///
/// Coordinates are surface pixels with the origin in the top-left corner.
pub trait DrawSurface {
    fn size(&self) -> (f32, f32);
    fn resize(&mut self, width: f32, height: f32);
    fn clear(&mut self);
    fn fill_disc(&mut self, center: Point, radius: f32, color: Rgba);
    fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Rgba);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Disc {
        center: Point,
        radius: f32,
        color: Rgba,
    },
    Line {
        from: Point,
        to: Point,
        width: f32,
        color: Rgba,
    },
}

/// Keeps the commands of the current frame and running totals across frames.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
    pub clears: u64,
    pub discs: u64,
    pub lines: u64,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Commands issued since the last clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn frame_lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn frame_discs(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Disc { .. }))
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.clears += 1;
    }

    fn fill_disc(&mut self, center: Point, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Disc { center, radius, color });
        self.discs += 1;
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line { from, to, width, color });
        self.lines += 1;
    }
}
