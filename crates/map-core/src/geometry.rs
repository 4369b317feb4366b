//! Indexed triangle meshes and the primitive shapes the scene is built from.
//!
//! All primitives are generated around their local origin with +Y up. Ground
//! primitives (plane, ring, strip) lie in the XZ plane.

use glam::{Mat3, Mat4, Vec2, Vec3};
use std::f32::consts::TAU;

/// UV marker for vertices that must not sample the decorative texture.
pub const NO_UV: [f32; 2] = [-1.0, -1.0];

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

#[inline]
fn rgba(color: [f32; 3], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push(&mut self, position: Vec3, normal: Vec3, color: [f32; 4], uv: [f32; 2]) -> u32 {
        let i = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
            color,
            uv,
        });
        i
    }

    fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }

    pub fn append(&mut self, other: &MeshData) {
        self.append_transformed(other, Mat4::IDENTITY);
    }

    /// Append `other` with its positions moved by `transform`; normals follow
    /// the inverse-transpose so non-uniform scales keep lighting correct.
    pub fn append_transformed(&mut self, other: &MeshData, transform: Mat4) {
        let base = self.vertices.len() as u32;
        let normal_m = Mat3::from_mat4(transform).inverse().transpose();
        self.vertices.extend(other.vertices.iter().map(|v| {
            let p = transform.transform_point3(Vec3::from(v.position));
            let n = (normal_m * Vec3::from(v.normal)).normalize_or_zero();
            Vertex {
                position: p.to_array(),
                normal: n.to_array(),
                ..*v
            }
        }));
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        for v in &mut self.vertices {
            v.color = color;
        }
        self
    }

    /// Axis-aligned bounds of all vertices, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut it = self.vertices.iter().map(|v| Vec3::from(v.position));
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

/// Flat XZ rectangle centered at the origin facing +Y. With `with_uv` the
/// texture spans the whole plane once.
pub fn plane(width: f32, depth: f32, color: [f32; 3], with_uv: bool) -> MeshData {
    let mut m = MeshData::new();
    let (hw, hd) = (width * 0.5, depth * 0.5);
    let c = rgba(color, 1.0);
    let uv = |u: f32, v: f32| if with_uv { [u, v] } else { NO_UV };
    let a = m.push(Vec3::new(-hw, 0.0, -hd), Vec3::Y, c, uv(0.0, 0.0));
    let b = m.push(Vec3::new(-hw, 0.0, hd), Vec3::Y, c, uv(0.0, 1.0));
    let cc = m.push(Vec3::new(hw, 0.0, hd), Vec3::Y, c, uv(1.0, 1.0));
    let d = m.push(Vec3::new(hw, 0.0, -hd), Vec3::Y, c, uv(1.0, 0.0));
    m.quad(a, b, cc, d);
    m
}

/// Box centered at the origin.
pub fn cuboid(size: Vec3, color: [f32; 3]) -> MeshData {
    let mut m = MeshData::new();
    let h = size * 0.5;
    let c = rgba(color, 1.0);
    // (normal, u axis, v axis) with u x v == normal
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    for (n, u, v) in faces {
        let center = n * h;
        let eu = u * h;
        let ev = v * h;
        let a = m.push(center - eu - ev, n, c, NO_UV);
        let b = m.push(center + eu - ev, n, c, NO_UV);
        let cc = m.push(center + eu + ev, n, c, NO_UV);
        let d = m.push(center - eu + ev, n, c, NO_UV);
        m.quad(a, b, cc, d);
    }
    m
}

/// Cylinder standing on the origin, spanning `0..height` on Y. A zero
/// `radius_top` or `radius_bottom` yields a cone.
pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
    color: [f32; 3],
) -> MeshData {
    let mut m = MeshData::new();
    let segments = segments.max(3);
    let c = rgba(color, 1.0);
    let slope = radius_bottom - radius_top;
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (s, co) = theta.sin_cos();
        let normal = Vec3::new(co * height, slope, s * height).normalize_or_zero();
        m.push(
            Vec3::new(co * radius_bottom, 0.0, s * radius_bottom),
            normal,
            c,
            NO_UV,
        );
        m.push(
            Vec3::new(co * radius_top, height, s * radius_top),
            normal,
            c,
            NO_UV,
        );
    }
    for i in 0..segments {
        let b0 = i * 2;
        let t0 = b0 + 1;
        let b1 = b0 + 2;
        let t1 = b0 + 3;
        m.quad(b0, t0, t1, b1);
    }
    if radius_top > 0.0 {
        cap(&mut m, height, radius_top, segments, Vec3::Y, c);
    }
    if radius_bottom > 0.0 {
        cap(&mut m, 0.0, radius_bottom, segments, Vec3::NEG_Y, c);
    }
    m
}

fn cap(m: &mut MeshData, y: f32, radius: f32, segments: u32, normal: Vec3, c: [f32; 4]) {
    let center = m.push(Vec3::new(0.0, y, 0.0), normal, c, NO_UV);
    let first = m.vertices.len() as u32;
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (s, co) = theta.sin_cos();
        m.push(Vec3::new(co * radius, y, s * radius), normal, c, NO_UV);
    }
    for i in 0..segments {
        let (a, b) = (first + i, first + i + 1);
        if normal.y > 0.0 {
            m.indices.extend_from_slice(&[center, b, a]);
        } else {
            m.indices.extend_from_slice(&[center, a, b]);
        }
    }
}

/// UV sphere centered at the origin.
pub fn sphere(radius: f32, segments: u32, rings: u32, color: [f32; 3]) -> MeshData {
    let mut m = MeshData::new();
    let segments = segments.max(3);
    let rings = rings.max(2);
    let c = rgba(color, 1.0);
    for r in 0..=rings {
        let phi = r as f32 / rings as f32 * std::f32::consts::PI;
        let (sp, cp) = phi.sin_cos();
        for s in 0..=segments {
            let theta = s as f32 / segments as f32 * TAU;
            let (st, ct) = theta.sin_cos();
            let n = Vec3::new(sp * ct, cp, sp * st);
            m.push(n * radius, n, c, NO_UV);
        }
    }
    let row = segments + 1;
    for r in 0..rings {
        for s in 0..segments {
            let a = r * row + s;
            let b = a + row;
            m.quad(a, a + 1, b + 1, b);
        }
    }
    m
}

/// Flat annulus in the XZ plane facing +Y.
pub fn ring(inner: f32, outer: f32, segments: u32, color: [f32; 3], alpha: f32) -> MeshData {
    let mut m = MeshData::new();
    let segments = segments.max(3);
    let c = rgba(color, alpha);
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (s, co) = theta.sin_cos();
        m.push(Vec3::new(co * inner, 0.0, s * inner), Vec3::Y, c, NO_UV);
        m.push(Vec3::new(co * outer, 0.0, s * outer), Vec3::Y, c, NO_UV);
    }
    for i in 0..segments {
        let a = i * 2;
        m.quad(a, a + 2, a + 3, a + 1);
    }
    m
}

/// Flat strip of `width` along the segment `from -> to` at height `y`.
/// Degenerate segments produce an empty mesh.
pub fn strip(from: Vec2, to: Vec2, width: f32, y: f32, color: [f32; 3]) -> MeshData {
    let mut m = MeshData::new();
    let dir = to - from;
    if dir.length_squared() <= f32::EPSILON {
        return m;
    }
    let side = dir.normalize().perp() * (width * 0.5);
    let c = rgba(color, 1.0);
    let p = |v: Vec2| Vec3::new(v.x, y, v.y);
    let a = m.push(p(from - side), Vec3::Y, c, NO_UV);
    let b = m.push(p(from + side), Vec3::Y, c, NO_UV);
    let cc = m.push(p(to + side), Vec3::Y, c, NO_UV);
    let d = m.push(p(to - side), Vec3::Y, c, NO_UV);
    m.quad(a, b, cc, d);
    m
}
