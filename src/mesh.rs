use std::f32::consts::TAU;

use crate::{
    particle::Rgba,
    surface::{DrawSurface, Point},
};

pub const DISC_SEGMENTS: usize = 16;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Normalized device coordinates.
    pub position: [f32; 2],
    /// Straight (non-premultiplied) RGBA in `[0, 1]`.
    pub color: [f32; 4],
}

/// Tessellates draw calls into a triangle list in draw order.
#[derive(Debug, Default)]
pub struct MeshSurface {
    width: f32,
    height: f32,
    vertices: Vec<Vertex>,
}

impl MeshSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            vertices: Vec::new(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    fn to_ndc(&self, [x, y]: Point) -> [f32; 2] {
        [x/self.width*2.0 - 1.0, 1.0 - y/self.height*2.0]
    }

    fn push_triangle(&mut self, a: Point, b: Point, c: Point, color: [f32; 4]) {
        for p in [a, b, c] {
            let position = self.to_ndc(p);
            self.vertices.push(Vertex { position, color });
        }
    }

    fn drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

fn color_channels(color: Rgba) -> [f32; 4] {
    [
        color.r as f32/255.0,
        color.g as f32/255.0,
        color.b as f32/255.0,
        color.a,
    ]
}

impl DrawSurface for MeshSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.vertices.clear();
    }

    fn fill_disc(&mut self, center: Point, radius: f32, color: Rgba) {
        if !self.drawable() {
            return;
        }
        let color = color_channels(color);
        let rim = |i: usize| {
            let angle = i as f32/DISC_SEGMENTS as f32*TAU;
            [center[0] + radius*angle.cos(), center[1] + radius*angle.sin()]
        };
        for i in 0..DISC_SEGMENTS {
            self.push_triangle(center, rim(i), rim(i + 1), color);
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Rgba) {
        if !self.drawable() {
            return;
        }
        let dx = to[0] - from[0];
        let dy = to[1] - from[1];
        let length = (dx*dx + dy*dy).sqrt();
        if length == 0.0 {
            return;
        }
        let half = width/2.0;
        let (nx, ny) = (-dy/length*half, dx/length*half);
        let a = [from[0] + nx, from[1] + ny];
        let b = [from[0] - nx, from[1] - ny];
        let c = [to[0] - nx, to[1] - ny];
        let d = [to[0] + nx, to[1] + ny];
        let color = color_channels(color);
        self.push_triangle(a, b, c, color);
        self.push_triangle(a, c, d, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    #[test]
    fn disc_is_a_fan_of_triangles() {
        let mut mesh = MeshSurface::new(100.0, 100.0);
        mesh.fill_disc([50.0, 50.0], 2.0, WHITE);
        assert_eq!(mesh.vertices().len(), DISC_SEGMENTS*3);
        assert_eq!(mesh.vertices()[0].position, [0.0, 0.0]);
    }

    #[test]
    fn line_is_a_quad() {
        let mut mesh = MeshSurface::new(100.0, 100.0);
        mesh.stroke_line([0.0, 0.0], [100.0, 0.0], 1.0, WHITE.with_alpha(0.1));
        assert_eq!(mesh.vertices().len(), 6);
        assert!(mesh.vertices().iter().all(|v| v.color == [1.0, 1.0, 1.0, 0.1]));
    }

    #[test]
    fn zero_length_line_has_no_geometry() {
        let mut mesh = MeshSurface::new(100.0, 100.0);
        mesh.stroke_line([3.0, 3.0], [3.0, 3.0], 1.0, WHITE);
        assert!(mesh.vertices().is_empty());
    }

    #[test]
    fn corners_map_to_ndc() {
        let mesh = MeshSurface::new(800.0, 600.0);
        assert_eq!(mesh.to_ndc([0.0, 0.0]), [-1.0, 1.0]);
        assert_eq!(mesh.to_ndc([800.0, 600.0]), [1.0, -1.0]);
        assert_eq!(mesh.to_ndc([400.0, 300.0]), [0.0, 0.0]);
    }

    #[test]
    fn clear_drops_geometry() {
        let mut mesh = MeshSurface::new(10.0, 10.0);
        mesh.fill_disc([5.0, 5.0], 1.0, WHITE);
        mesh.clear();
        assert!(mesh.vertices().is_empty());
    }

    #[test]
    fn empty_surface_draws_nothing() {
        let mut mesh = MeshSurface::new(0.0, 0.0);
        mesh.fill_disc([0.0, 0.0], 1.0, WHITE);
        assert!(mesh.vertices().is_empty());
    }
}
