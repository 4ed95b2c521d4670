//! Surfaces that receive finished frames

use crate::camera::CameraState;
use crate::primitives::PrimitiveKind;
use crate::scene::Scene;

/// Something that can display a scene through a camera
pub trait Surface {
    fn present(&mut self, scene: &Scene, camera: &CameraState);
}

/// Summary of one presented frame
#[derive(Debug, Clone, PartialEq)]
pub struct PresentedFrame {
    pub camera: CameraState,
    /// Column-major view-projection matrix at the surface's aspect ratio
    pub view_projection: [[f32; 4]; 4],
    pub primitives: usize,
    pub triangles: usize,
    pub markers: usize,
    pub indicators: usize,
}

impl PresentedFrame {
    fn capture(scene: &Scene, camera: &CameraState, aspect: f64) -> Self {
        Self {
            camera: *camera,
            view_projection: camera.view_projection_matrix(aspect),
            primitives: scene.primitive_count(),
            triangles: scene.triangle_count(),
            markers: scene.count_of(PrimitiveKind::Marker),
            indicators: scene.count_of(PrimitiveKind::Indicator),
        }
    }
}

/// Headless surface that remembers what it was asked to draw
#[derive(Debug)]
pub struct RecordingSurface {
    /// Width over height
    aspect: f64,
    presents: usize,
    last: Option<PresentedFrame>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            aspect: 1.0,
            presents: 0,
            last: None,
        }
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record frames for a viewport of the given width and height
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        if width > 0 && height > 0 {
            self.aspect = width as f64 / height as f64;
        }
        self
    }

    pub fn present_count(&self) -> usize {
        self.presents
    }

    pub fn last_frame(&self) -> Option<&PresentedFrame> {
        self.last.as_ref()
    }
}

impl Surface for RecordingSurface {
    fn present(&mut self, scene: &Scene, camera: &CameraState) {
        self.presents += 1;
        self.last = Some(PresentedFrame::capture(scene, camera, self.aspect));
    }
}

/// Writes each presented scene as Wavefront OBJ text.
///
/// Vertex colors use the common `v x y z r g b` extension. Double-sided
/// primitives get a second, reversed copy of every face.
#[derive(Debug, Default)]
pub struct ObjSurface {
    text: String,
}

impl ObjSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// OBJ text of the last presented frame
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl Surface for ObjSurface {
    fn present(&mut self, scene: &Scene, camera: &CameraState) {
        self.text = scene_to_obj(scene, camera);
    }
}

fn kind_name(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::PathLine => "path_line",
        PrimitiveKind::Marker => "marker",
        PrimitiveKind::Indicator => "indicator",
        PrimitiveKind::Axis => "axis",
        PrimitiveKind::Placeholder => "placeholder",
    }
}

fn scene_to_obj(scene: &Scene, camera: &CameraState) -> String {
    let mut out = String::from("# pathfix scene\n");
    out.push_str(&format!(
        "# camera position {:.5} {:.5} {:.5} look_at {:.5} {:.5} {:.5} distance {:.5}\n",
        camera.position.x,
        camera.position.y,
        camera.position.z,
        camera.look_at.x,
        camera.look_at.y,
        camera.look_at.z,
        camera.distance,
    ));

    // OBJ indices are 1-based and global across objects
    let mut base = 1u32;
    for (i, primitive) in scene.iter().enumerate() {
        out.push_str(&format!("o {}_{}\n", kind_name(primitive.kind), i));
        let [red, green, blue, _] = primitive.color.to_array();
        for p in &primitive.positions {
            out.push_str(&format!(
                "v {:.5} {:.5} {:.5} {:.4} {:.4} {:.4}\n",
                p.x, p.y, p.z, red, green, blue
            ));
        }
        for tri in primitive.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] + base, tri[1] + base, tri[2] + base);
            out.push_str(&format!("f {} {} {}\n", a, b, c));
            if primitive.double_sided {
                out.push_str(&format!("f {} {} {}\n", a, c, b));
            }
        }
        base += primitive.positions.len() as u32;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrbitCamera;
    use crate::scene::SceneBuilder;
    use pathfix_core::{Point, PointSequence, Vec3};

    fn two_points() -> PointSequence {
        PointSequence::from_points(vec![
            Point::new(Vec3::ZERO, Vec3::Z),
            Point::new(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO),
        ])
    }

    #[test]
    fn test_recording_surface() {
        let mut builder = SceneBuilder::default();
        let camera = OrbitCamera::new();
        let mut surface = RecordingSurface::new();
        assert!(surface.last_frame().is_none());

        surface.present(builder.rebuild(&two_points()), &camera.state());
        surface.present(builder.scene(), &camera.state());

        assert_eq!(surface.present_count(), 2);
        let frame = surface.last_frame().unwrap();
        assert_eq!(frame.markers, 2);
        assert_eq!(frame.indicators, 1);
        // Three axes, one path line, two markers, one indicator
        assert_eq!(frame.primitives, 7);
        assert_eq!(frame.camera, camera.state());
        assert_eq!(frame.view_projection, camera.state().view_projection_matrix(1.0));
    }

    #[test]
    fn test_recording_surface_viewport_aspect() {
        let mut builder = SceneBuilder::default();
        let camera = OrbitCamera::new();
        let mut surface = RecordingSurface::new().with_viewport(1600, 800);
        surface.present(builder.rebuild(&two_points()), &camera.state());

        let frame = surface.last_frame().unwrap();
        let square = camera.state().view_projection_matrix(1.0);
        // Horizontal scale halves at 2:1, vertical is unchanged
        assert!((frame.view_projection[0][0] * 2.0 - square[0][0]).abs() < 1e-6);
        assert_eq!(frame.view_projection[1][1], square[1][1]);

        let degenerate = RecordingSurface::new().with_viewport(0, 800);
        assert_eq!(degenerate.aspect, 1.0);
    }

    #[test]
    fn test_obj_output() {
        let mut builder = SceneBuilder::default();
        let scene = builder.rebuild(&two_points());
        let mut surface = ObjSurface::new();
        surface.present(scene, &OrbitCamera::new().state());

        let text = surface.text();
        let vertices = text.lines().filter(|l| l.starts_with("v ")).count();
        let faces = text.lines().filter(|l| l.starts_with("f ")).count();
        let expected_vertices: usize = scene.iter().map(|p| p.vertex_count()).sum();
        assert_eq!(vertices, expected_vertices);

        // Quads are double sided, spheres are not
        let quads = 3 + 1 + 1;
        assert_eq!(faces, quads * 4 + 2 * 192);
        assert!(text.lines().any(|l| l == "o marker_4"));

        // Every face index refers to an existing vertex
        for line in text.lines().filter(|l| l.starts_with("f ")) {
            for idx in line[2..].split(' ') {
                let idx: usize = idx.parse().unwrap();
                assert!(idx >= 1 && idx <= vertices);
            }
        }
    }
}
