//! Mesh primitives (thick line, UV sphere)

use bytemuck::{Pod, Zeroable};
use pathfix_core::{Color, Vec3};

/// Latitude bands of every marker sphere
pub const SPHERE_LATITUDE_BANDS: u32 = 8;
/// Longitude bands of every marker sphere
pub const SPHERE_LONGITUDE_BANDS: u32 = 12;

/// Below this length the in-plane perpendicular is considered degenerate
const PERPENDICULAR_THRESHOLD: f64 = 0.1;

/// A vertex with position and color, ready for GPU upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// What a primitive represents in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Connection between two consecutive points
    PathLine,
    /// Sphere at a point
    Marker,
    /// Short line along a point's orientation
    Indicator,
    /// Coordinate axis gizmo
    Axis,
    /// Stand-in marker for an empty sequence
    Placeholder,
}

/// Triangle geometry with a single flat color
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPrimitive {
    pub kind: PrimitiveKind,
    pub positions: Vec<Vec3>,
    /// Triangle list, always a multiple of three
    pub indices: Vec<u32>,
    pub color: Color,
    /// Same material on the back face
    pub double_sided: bool,
}

impl MeshPrimitive {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaved vertex buffer
    pub fn to_vertices(&self) -> Vec<Vertex> {
        let color = self.color.to_array();
        self.positions
            .iter()
            .map(|p| Vertex {
                position: p.to_f32_array(),
                color,
            })
            .collect()
    }
}

/// Map `t` in `[0, 1]` (clamped) from blue to red
pub fn color_ramp(t: f64) -> Color {
    Color::BLUE.lerp(&Color::RED, t.clamp(0.0, 1.0) as f32)
}

/// Create a flat quad of width `thickness` from `start` to `end`.
///
/// The quad lies in the plane of the line and a perpendicular chosen in XY,
/// or in YZ when the line is close to vertical.
pub fn create_thick_line(
    kind: PrimitiveKind,
    start: Vec3,
    end: Vec3,
    thickness: f64,
    color: Color,
) -> MeshPrimitive {
    let dir = (end - start).normalized();

    let mut perpendicular = Vec3::new(dir.y, -dir.x, 0.0);
    if perpendicular.length() < PERPENDICULAR_THRESHOLD {
        perpendicular = Vec3::new(0.0, dir.z, -dir.y);
    }
    let offset = perpendicular.normalized() * (thickness / 2.0);

    MeshPrimitive {
        kind,
        positions: vec![start + offset, start - offset, end + offset, end - offset],
        indices: vec![0, 1, 2, 1, 3, 2],
        color,
        double_sided: true,
    }
}

/// Create a UV sphere with the fixed marker resolution
pub fn create_uv_sphere(kind: PrimitiveKind, center: Vec3, radius: f64, color: Color) -> MeshPrimitive {
    let lat_bands = SPHERE_LATITUDE_BANDS;
    let lon_bands = SPHERE_LONGITUDE_BANDS;

    let mut positions = Vec::with_capacity(((lat_bands + 1) * (lon_bands + 1)) as usize);
    for lat in 0..=lat_bands {
        let phi = lat as f64 * std::f64::consts::PI / lat_bands as f64;
        let (sin_phi, cos_phi) = phi.sin_cos();

        for lon in 0..=lon_bands {
            let theta = lon as f64 * std::f64::consts::TAU / lon_bands as f64;
            let (sin_theta, cos_theta) = theta.sin_cos();

            positions.push(Vec3::new(
                center.x + radius * sin_phi * cos_theta,
                center.y + radius * sin_phi * sin_theta,
                center.z + radius * cos_phi,
            ));
        }
    }

    // Two triangles per quad cell
    let mut indices = Vec::with_capacity((lat_bands * lon_bands * 6) as usize);
    for lat in 0..lat_bands {
        for lon in 0..lon_bands {
            let current = lat * (lon_bands + 1) + lon;
            let next = current + lon_bands + 1;

            indices.extend_from_slice(&[current, next, current + 1]);
            indices.extend_from_slice(&[current + 1, next, next + 1]);
        }
    }

    MeshPrimitive {
        kind,
        positions,
        indices,
        color,
        double_sided: false,
    }
}
