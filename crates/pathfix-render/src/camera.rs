//! Orbit camera around a look-at point

use pathfix_core::{Bounds, Vec3};

/// Polar angle limit, keeps the camera off its own up axis
const MIN_POLAR: f64 = 0.1;
/// Pan distance per pixel, as a fraction of the orbit distance
const PAN_SPEED: f64 = 0.002;
const ZOOM_IN_FACTOR: f64 = 0.9;
const ZOOM_OUT_FACTOR: f64 = 1.1;
/// Auto-fit distance as a multiple of the largest scene extent
const FIT_MARGIN: f64 = 1.5;
/// Auto-fit never frames closer than this
const MIN_FIT_DISTANCE: f64 = 100.0;
/// Smallest allowed orbit distance
const MIN_DISTANCE: f64 = 1e-6;

/// Snapshot of the camera handed to a surface for drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub look_at: Vec3,
    pub position: Vec3,
    pub look_direction: Vec3,
    pub up: Vec3,
    pub distance: f64,
    /// Vertical field of view in degrees
    pub fov: f64,
    pub near: f64,
    pub far: f64,
}

impl CameraState {
    /// Get the view matrix (4x4, column-major)
    pub fn view_matrix(&self) -> [[f32; 4]; 4] {
        let f = self.look_direction.normalized();
        let s = f.cross(&self.up).normalized();
        let u = s.cross(&f);

        [
            [s.x as f32, u.x as f32, -f.x as f32, 0.0],
            [s.y as f32, u.y as f32, -f.y as f32, 0.0],
            [s.z as f32, u.z as f32, -f.z as f32, 0.0],
            [
                -s.dot(&self.position) as f32,
                -u.dot(&self.position) as f32,
                f.dot(&self.position) as f32,
                1.0,
            ],
        ]
    }

    /// Get the perspective projection matrix (4x4, column-major)
    pub fn projection_matrix(&self, aspect: f64) -> [[f32; 4]; 4] {
        let f = 1.0 / (self.fov.to_radians() / 2.0).tan();
        let depth = self.far - self.near;

        [
            [(f / aspect) as f32, 0.0, 0.0, 0.0],
            [0.0, f as f32, 0.0, 0.0],
            [0.0, 0.0, (-(self.far + self.near) / depth) as f32, -1.0],
            [0.0, 0.0, (-(2.0 * self.far * self.near) / depth) as f32, 0.0],
        ]
    }

    /// Get combined view-projection matrix
    pub fn view_projection_matrix(&self, aspect: f64) -> [[f32; 4]; 4] {
        mat4_mul(&self.projection_matrix(aspect), &self.view_matrix())
    }
}

/// A spherical-coordinate camera with rotate, pan and zoom gestures
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Point the camera orbits and looks at
    pub look_at: Vec3,
    /// Camera position
    pub position: Vec3,
    /// Direction from the camera toward the target (not normalized)
    pub look_direction: Vec3,
    /// Up vector, also the polar axis of the orbit
    pub up: Vec3,
    /// Distance from target
    distance: f64,
    /// Field of view in degrees
    pub fov: f64,
    /// Near clipping plane
    pub near: f64,
    /// Far clipping plane
    pub far: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let distance = 500.0;
        let offset = distance / 3f64.sqrt();
        let position = Vec3::new(offset, offset, offset);
        Self {
            look_at: Vec3::ZERO,
            position,
            look_direction: -position,
            up: Vec3::Z,
            distance,
            fov: 45.0,
            near: 0.1,
            far: 100_000.0,
        }
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn state(&self) -> CameraState {
        CameraState {
            look_at: self.look_at,
            position: self.position,
            look_direction: self.look_direction,
            up: self.up,
            distance: self.distance,
            fov: self.fov,
            near: self.near,
            far: self.far,
        }
    }

    /// Polar angle of the camera measured from +Z, in radians
    pub fn polar_angle(&self) -> f64 {
        let rel = self.position - self.look_at;
        let r = rel.length();
        if r == 0.0 {
            return 0.0;
        }
        (rel.z / r).clamp(-1.0, 1.0).acos()
    }

    /// Azimuth of the camera in the XY plane, in radians
    pub fn azimuth(&self) -> f64 {
        let rel = self.position - self.look_at;
        rel.y.atan2(rel.x)
    }

    /// Orbit around the target by angle deltas in radians
    pub fn rotate(&mut self, delta_theta: f64, delta_phi: f64) {
        let rel = self.position - self.look_at;
        let radius = rel.length();
        if radius == 0.0 {
            return;
        }

        let theta = rel.y.atan2(rel.x) + delta_theta;
        let phi = ((rel.z / radius).clamp(-1.0, 1.0).acos() + delta_phi)
            .clamp(MIN_POLAR, std::f64::consts::PI - MIN_POLAR);

        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        self.position = self.look_at
            + Vec3::new(
                radius * sin_phi * cos_theta,
                radius * sin_phi * sin_theta,
                radius * cos_phi,
            );
        self.look_direction = self.look_at - self.position;
    }

    /// Move camera and target together by a screen-space drag in pixels
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let forward = self.look_direction.normalized();
        let right = forward.cross(&self.up.normalized()).normalized();
        let screen_up = right.cross(&forward);

        let scale = self.distance * PAN_SPEED;
        let offset = right * (-dx * scale) + screen_up * (dy * scale);

        self.position += offset;
        self.look_at += offset;
    }

    /// Zoom in for a positive wheel delta, out for a negative one
    pub fn zoom(&mut self, delta: f64) {
        let factor = if delta > 0.0 {
            ZOOM_IN_FACTOR
        } else if delta < 0.0 {
            ZOOM_OUT_FACTOR
        } else {
            return;
        };
        self.set_distance(self.distance * factor);
    }

    /// Set the orbit distance, keeping the current view direction
    pub fn set_distance(&mut self, distance: f64) {
        self.distance = distance.max(MIN_DISTANCE);
        let direction = self.look_direction.try_normalized().unwrap_or(-Vec3::ONE.normalized());
        self.position = self.look_at - direction * self.distance;
        self.look_direction = self.look_at - self.position;
    }

    /// Frame `bounds` from an isometric viewpoint
    pub fn auto_fit(&mut self, bounds: &Bounds) {
        let center = bounds.center();
        self.distance = (bounds.max_extent() * FIT_MARGIN).max(MIN_FIT_DISTANCE);
        let offset = self.distance / 3f64.sqrt();

        self.look_at = center;
        self.position = center + Vec3::new(offset, offset, offset);
        self.look_direction = self.look_at - self.position;
    }
}

fn mat4_mul(a: &[[f32; 4]; 4], b: &[[f32; 4]; 4]) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!((a - b).length() < EPS, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_auto_fit_determinism() {
        let mut camera = OrbitCamera::new();
        let bounds = Bounds::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(20.0, 20.0, 20.0));
        camera.auto_fit(&bounds);

        let offset = 100.0 / 3f64.sqrt();
        assert_eq!(camera.distance(), 100.0);
        assert_vec_eq(camera.look_at, Vec3::new(10.0, 10.0, 10.0));
        assert_vec_eq(camera.position, Vec3::new(10.0 + offset, 10.0 + offset, 10.0 + offset));
        assert_vec_eq(camera.look_direction, camera.look_at - camera.position);
        assert!(((camera.position - camera.look_at).length() - 100.0).abs() < EPS);
    }

    #[test]
    fn test_auto_fit_large_scene_uses_margin() {
        let mut camera = OrbitCamera::new();
        camera.auto_fit(&Bounds::new(Vec3::ZERO, Vec3::new(400.0, 10.0, 0.0)));
        assert!((camera.distance() - 600.0).abs() < EPS);
    }

    #[test]
    fn test_rotate_keeps_polar_angle_clamped() {
        let mut camera = OrbitCamera::new();
        for _ in 0..50 {
            camera.rotate(0.3, 1.7);
            let phi = camera.polar_angle();
            assert!(phi >= 0.1 - EPS && phi <= PI - 0.1 + EPS, "phi {}", phi);
        }
        assert!((camera.polar_angle() - (PI - 0.1)).abs() < 1e-6);

        for _ in 0..50 {
            camera.rotate(-0.2, -4.0);
            let phi = camera.polar_angle();
            assert!(phi >= 0.1 - EPS && phi <= PI - 0.1 + EPS, "phi {}", phi);
        }
        assert!((camera.polar_angle() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_preserves_radius_and_target() {
        let mut camera = OrbitCamera::new();
        camera.auto_fit(&Bounds::new(Vec3::new(-5.0, 0.0, 2.0), Vec3::new(5.0, 8.0, 4.0)));
        let target = camera.look_at;
        let azimuth = camera.azimuth();

        camera.rotate(0.5, 0.2);
        assert_vec_eq(camera.look_at, target);
        assert!(((camera.position - target).length() - 100.0).abs() < 1e-6);
        assert!((camera.azimuth() - (azimuth + 0.5)).abs() < 1e-9);
        assert_vec_eq(camera.look_direction, target - camera.position);
    }

    #[test]
    fn test_pan_moves_camera_and_target_together() {
        let mut camera = OrbitCamera::new();
        camera.auto_fit(&Bounds::new(Vec3::ZERO, Vec3::new(20.0, 20.0, 20.0)));
        let offset_before = camera.position - camera.look_at;
        let target_before = camera.look_at;

        camera.pan(10.0, -4.0);

        assert_vec_eq(camera.position - camera.look_at, offset_before);
        let moved = camera.look_at - target_before;
        // 0.002 * distance per pixel over a (10, -4) pixel drag
        let expected = 0.002 * 100.0 * (10.0f64 * 10.0 + 4.0 * 4.0).sqrt();
        assert!((moved.length() - expected).abs() < 1e-9);
        // Panning never moves along the view direction
        assert!(moved.dot(&camera.look_direction.normalized()).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_scales_distance() {
        let mut camera = OrbitCamera::new();
        camera.auto_fit(&Bounds::new(Vec3::ZERO, Vec3::ZERO));
        let direction = camera.look_direction.normalized();

        camera.zoom(120.0);
        assert!((camera.distance() - 90.0).abs() < EPS);
        camera.zoom(-1.0);
        assert!((camera.distance() - 99.0).abs() < EPS);
        camera.zoom(0.0);
        assert!((camera.distance() - 99.0).abs() < EPS);

        assert_vec_eq(camera.position, camera.look_at - direction * 99.0);
    }

    #[test]
    fn test_distance_stays_positive() {
        let mut camera = OrbitCamera::new();
        for _ in 0..10_000 {
            camera.zoom(1.0);
        }
        assert!(camera.distance() > 0.0);
        assert!(camera.position.is_finite());
        camera.set_distance(-5.0);
        assert!(camera.distance() > 0.0);
    }

    fn transform(m: &[[f32; 4]; 4], p: Vec3) -> [f32; 4] {
        let p = [p.x as f32, p.y as f32, p.z as f32, 1.0];
        let mut out = [0.0f32; 4];
        for (row, value) in out.iter_mut().enumerate() {
            *value = (0..4).map(|col| m[col][row] * p[col]).sum();
        }
        out
    }

    #[test]
    fn test_view_matrix_maps_target_in_front() {
        let mut camera = OrbitCamera::new();
        camera.auto_fit(&Bounds::new(Vec3::ZERO, Vec3::new(20.0, 20.0, 20.0)));
        let view = transform(&camera.state().view_matrix(), camera.look_at);
        // Right-handed view space looks down -Z
        assert!((view[2] + 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_view_projection_centers_target() {
        let mut camera = OrbitCamera::new();
        camera.auto_fit(&Bounds::new(Vec3::ZERO, Vec3::new(20.0, 20.0, 20.0)));
        let state = camera.state();
        let clip = transform(&state.view_projection_matrix(16.0 / 9.0), camera.look_at);

        assert!((clip[3] - 100.0).abs() < 1e-3);
        let ndc = [clip[0] / clip[3], clip[1] / clip[3], clip[2] / clip[3]];
        assert!(ndc[0].abs() < 1e-4 && ndc[1].abs() < 1e-4);
        assert!(ndc[2] > -1.0 && ndc[2] < 1.0);

        // Behind the camera is outside the clip volume
        let behind = state.position + (state.position - state.look_at);
        assert!(transform(&state.view_projection_matrix(1.0), behind)[3] < 0.0);
    }
}
