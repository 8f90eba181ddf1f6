//! Ribbon meshing: turn an ordered strand path into a width-varying strip.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct RibbonVertex {
    pub position: [f32; 3],
    /// Normalized path coordinate in [0, 1]; the shader discards fragments
    /// past the current visibility fraction, revealing the strand
    /// progressively.
    pub counter: f32,
}

/// Build a triangle-list ribbon along `path`.
///
/// Each point contributes a vertex pair offset perpendicular to the local
/// planar tangent by `width_at(t) * line_width / 2`. Paths shorter than two
/// points produce empty geometry.
pub fn build_ribbon(
    path: &[Vec3],
    width_at: impl Fn(f32) -> f32,
    line_width: f32,
) -> (Vec<RibbonVertex>, Vec<u32>) {
    let n = path.len();
    if n < 2 {
        return (Vec::new(), Vec::new());
    }

    let mut vertices = Vec::with_capacity(n * 2);
    // Carried across stalled segments (consecutive identical points).
    let mut normal = Vec2::Y;
    for (i, point) in path.iter().enumerate() {
        let t = i as f32 / (n - 1) as f32;
        let ahead = path[(i + 1).min(n - 1)].truncate();
        let behind = path[i.saturating_sub(1)].truncate();
        let tangent = ahead - behind;
        if tangent.length_squared() > 1e-12 {
            normal = Vec2::new(-tangent.y, tangent.x).normalize();
        }
        let half = width_at(t) * line_width * 0.5;
        let offset = normal * half;
        vertices.push(RibbonVertex {
            position: [point.x + offset.x, point.y + offset.y, point.z],
            counter: t,
        });
        vertices.push(RibbonVertex {
            position: [point.x - offset.x, point.y - offset.y, point.z],
            counter: t,
        });
    }

    let mut indices = Vec::with_capacity((n - 1) * 6);
    for i in 0..(n as u32 - 1) {
        let base = i * 2;
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 1, base + 3, base + 2]);
    }

    (vertices, indices)
}
