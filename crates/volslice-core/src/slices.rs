//! Slice stack geometry.
//!
//! One unit quad is drawn many times, each copy translated along Z and tagged
//! with the normalized texture depth it samples.

use glam::{Mat4, Vec3};

/// Slices drawn per frame.
pub const SLICE_COUNT: u32 = 150;

/// Vertex of the slice quad.
/// Layout must match the WGSL vertex input exactly.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    /// Position in the quad plane (z = 0).
    pub position: [f32; 3],
    /// Texture coordinate in `[0, 1]`.
    pub tex_coord: [f32; 2],
}

const fn vertex(x: f32, y: f32, u: f32, v: f32) -> QuadVertex {
    QuadVertex {
        position: [x, y, 0.0],
        tex_coord: [u, v],
    }
}

/// Two counter-clockwise triangles covering `[-0.5, 0.5]^2`.
pub const QUAD_VERTICES: [QuadVertex; 6] = [
    vertex(-0.5, -0.5, 0.0, 0.0), // bottom left
    vertex(0.5, -0.5, 1.0, 0.0),  // bottom right
    vertex(0.5, 0.5, 1.0, 1.0),   // top right
    vertex(-0.5, -0.5, 0.0, 0.0), // bottom left
    vertex(0.5, 0.5, 1.0, 1.0),   // top right
    vertex(-0.5, 0.5, 0.0, 1.0),  // top left
];

/// Placement of one slice in the stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    /// Draw order index.
    pub index: u32,
    /// Z translation of the quad, in `[-0.5, 0.5]`.
    pub position: f32,
    /// Normalized texture depth sampled by this slice, in `[0, 1]`.
    pub depth: f32,
}

impl Slice {
    /// Model matrix moving the unit quad to this slice.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, self.position))
    }
}

/// An evenly spaced stack of slices, iterated in draw order.
///
/// Draw order runs from depth 0 (back, farthest from the eye) to depth 1
/// (front). With alpha blending and no depth test this order is what makes the
/// compositing correct, so it must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceStack {
    count: u32,
}

impl SliceStack {
    #[must_use]
    pub fn new(count: u32) -> Self {
        Self { count }
    }

    #[must_use]
    pub fn len(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The slice at `index`. A single-slice stack sits at depth 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn slice(&self, index: u32) -> Slice {
        let depth = if self.count > 1 {
            index as f32 / (self.count - 1) as f32
        } else {
            0.0
        };
        Slice {
            index,
            position: -0.5 + depth,
            depth,
        }
    }

    /// Slices in draw order.
    pub fn iter(&self) -> impl Iterator<Item = Slice> + '_ {
        (0..self.count).map(move |i| self.slice(i))
    }
}

impl Default for SliceStack {
    fn default() -> Self {
        Self::new(SLICE_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_vertex_size() {
        // position(12) + tex_coord(8) = 20, tightly packed
        assert_eq!(std::mem::size_of::<QuadVertex>(), 20);
    }

    #[test]
    fn test_quad_covers_unit_square() {
        for v in &QUAD_VERTICES {
            assert!(v.position[0].abs() <= 0.5 && v.position[1].abs() <= 0.5);
            assert_eq!(v.position[2], 0.0);
            assert!((0.0..=1.0).contains(&v.tex_coord[0]));
            assert!((0.0..=1.0).contains(&v.tex_coord[1]));
            // tex coord tracks position
            assert_eq!(v.tex_coord[0], v.position[0] + 0.5);
            assert_eq!(v.tex_coord[1], v.position[1] + 0.5);
        }
    }

    #[test]
    fn test_default_stack_depths() {
        let stack = SliceStack::default();
        let slices: Vec<Slice> = stack.iter().collect();
        assert_eq!(slices.len(), 150);
        assert_eq!(slices[0].depth, 0.0);
        assert_eq!(slices[149].depth, 1.0);
        assert_eq!(slices[0].position, -0.5);
        assert_eq!(slices[149].position, 0.5);

        for (i, s) in slices.iter().enumerate() {
            assert_eq!(s.index as usize, i);
            assert_eq!(s.depth, i as f32 / 149.0);
        }
        for pair in slices.windows(2) {
            assert!(pair[1].depth > pair[0].depth);
            assert!(pair[1].position > pair[0].position);
        }
    }

    #[test]
    fn test_spacing_is_even() {
        let stack = SliceStack::default();
        let step = 1.0 / 149.0;
        for pair in stack.iter().collect::<Vec<_>>().windows(2) {
            assert!((pair[1].depth - pair[0].depth - step).abs() < 1e-6);
        }
    }

    #[test]
    fn test_model_matrix_translates_along_z() {
        let slice = SliceStack::default().slice(0);
        let p = slice.model_matrix().transform_point3(Vec3::new(0.5, -0.5, 0.0));
        assert_eq!(p, Vec3::new(0.5, -0.5, -0.5));
    }

    #[test]
    fn test_degenerate_stacks() {
        assert!(SliceStack::new(0).is_empty());
        assert_eq!(SliceStack::new(0).iter().count(), 0);
        let single = SliceStack::new(1).slice(0);
        assert_eq!(single.depth, 0.0);
        assert_eq!(single.position, -0.5);
    }
}
