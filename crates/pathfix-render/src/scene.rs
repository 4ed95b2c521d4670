//! Scene assembly from a point sequence

use crate::primitives::{color_ramp, create_thick_line, create_uv_sphere, MeshPrimitive, PrimitiveKind};
use pathfix_core::{Bounds, Color, PointSequence, SceneConfig, Vec3};

/// Radius of the placeholder shown for an empty sequence
const PLACEHOLDER_RADIUS: f64 = 5.0;
/// Orientations shorter than this get no indicator
const MIN_INDICATOR_DIRECTION: f64 = 1e-4;

/// Everything the surface needs to draw one frame
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Fixed axis gizmo, kept across rebuilds
    pub axes: Vec<MeshPrimitive>,
    /// Geometry generated from the current points
    pub primitives: Vec<MeshPrimitive>,
    /// Bounds of all point positions, `None` when empty
    pub bounds: Option<Bounds>,
    pub marker_radius: f64,
}

impl Scene {
    /// All primitives, axes first
    pub fn iter(&self) -> impl Iterator<Item = &MeshPrimitive> {
        self.axes.iter().chain(self.primitives.iter())
    }

    pub fn primitive_count(&self) -> usize {
        self.axes.len() + self.primitives.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.iter().map(MeshPrimitive::triangle_count).sum()
    }

    pub fn count_of(&self, kind: PrimitiveKind) -> usize {
        self.iter().filter(|p| p.kind == kind).count()
    }
}

/// Marker radius proportional to the scene size, shrunk for dense paths
pub fn marker_radius(bounds: &Bounds, point_count: usize) -> f64 {
    let radius = (bounds.max_extent() * 0.01).max(1.0);
    if point_count > 100 {
        radius * 0.5
    } else if point_count > 50 {
        radius * 0.7
    } else {
        radius
    }
}

/// Color-ramp parameter for an orientation: its Z component mapped from
/// `[-1, 1]` to `[0, 1]`.
pub fn ramp_scalar(orientation: Vec3) -> f64 {
    match orientation.try_normalized() {
        Some(dir) => ((dir.z + 1.0) / 2.0).clamp(0.0, 1.0),
        None => 0.5,
    }
}

/// Display angles of a direction vector, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayAngles {
    /// Angle in the XY plane from +X toward +Y
    pub azimuth: f64,
    /// Angle above the XY plane
    pub elevation: f64,
}

/// Derive display angles from a direction; `None` for a zero vector
pub fn display_angles(direction: Vec3) -> Option<DisplayAngles> {
    let dir = direction.try_normalized()?;
    Some(DisplayAngles {
        azimuth: dir.y.atan2(dir.x).to_degrees(),
        elevation: dir.z.clamp(-1.0, 1.0).asin().to_degrees(),
    })
}

/// Rebuilds scene geometry from scratch on request
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    config: SceneConfig,
    scene: Scene,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl SceneBuilder {
    pub fn new(config: SceneConfig) -> Self {
        let axes = create_axes(config.axis_length, config.line_thickness);
        Self {
            config,
            scene: Scene {
                axes,
                ..Default::default()
            },
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Discard generated geometry and build it again from `sequence`
    pub fn rebuild(&mut self, sequence: &PointSequence) -> &Scene {
        self.scene.primitives.clear();

        let Some(bounds) = sequence.bounds() else {
            self.scene.bounds = None;
            self.scene.marker_radius = PLACEHOLDER_RADIUS;
            self.scene.primitives.push(create_uv_sphere(
                PrimitiveKind::Placeholder,
                Vec3::ZERO,
                PLACEHOLDER_RADIUS,
                color_ramp(0.0),
            ));
            return &self.scene;
        };

        let radius = marker_radius(&bounds, sequence.len());
        self.scene.bounds = Some(bounds);
        self.scene.marker_radius = radius;

        let points = sequence.points();
        for pair in points.windows(2) {
            self.scene.primitives.push(create_thick_line(
                PrimitiveKind::PathLine,
                pair[0].position,
                pair[1].position,
                self.config.line_thickness,
                Color::RED,
            ));
        }

        for point in points {
            let t = ramp_scalar(point.orientation);
            let color = color_ramp(t);
            self.scene.primitives.push(create_uv_sphere(
                PrimitiveKind::Marker,
                point.position,
                radius,
                color,
            ));

            if point.orientation.length() > MIN_INDICATOR_DIRECTION {
                let length = radius * (6.0 + 6.0 * t);
                let end = point.position + point.orientation.normalized() * length;
                self.scene.primitives.push(create_thick_line(
                    PrimitiveKind::Indicator,
                    point.position,
                    end,
                    self.config.indicator_thickness,
                    color,
                ));
            }
        }

        &self.scene
    }
}

fn create_axes(length: f64, thickness: f64) -> Vec<MeshPrimitive> {
    [
        (Vec3::X, Color::RED),
        (Vec3::Y, Color::GREEN),
        (Vec3::Z, Color::BLUE),
    ]
    .into_iter()
    .map(|(axis, color)| {
        create_thick_line(PrimitiveKind::Axis, Vec3::ZERO, axis * length, thickness, color)
    })
    .collect()
}
