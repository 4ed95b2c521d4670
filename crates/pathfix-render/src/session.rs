//! A live viewing session: one point sequence, its scene and the camera

use crate::camera::OrbitCamera;
use crate::input::{OrbitController, SurfaceEvent};
use crate::scene::{Scene, SceneBuilder};
use crate::surface::Surface;
use pathfix_core::{Event, EventSink, NullSink, Point, PointSequence, SceneConfig};
use pathfix_solver::Correction;

/// Owns the sequence being viewed and keeps scene and camera in step with it.
///
/// The camera is framed only when a new sequence is loaded. Corrections and
/// point edits rebuild the scene but leave the camera where the user put it.
pub struct ViewSession {
    sequence: PointSequence,
    camera: OrbitCamera,
    builder: SceneBuilder,
    controller: OrbitController,
    sink: Box<dyn EventSink>,
}

impl ViewSession {
    pub fn new(config: SceneConfig) -> Self {
        let mut session = Self {
            sequence: PointSequence::new(),
            camera: OrbitCamera::new(),
            builder: SceneBuilder::new(config),
            controller: OrbitController::new(),
            sink: Box::new(NullSink),
        };
        session.rebuild();
        session
    }

    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn sequence(&self) -> &PointSequence {
        &self.sequence
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        self.builder.scene()
    }

    /// Show a new sequence and frame it
    pub fn load(&mut self, sequence: PointSequence) {
        self.replace_sequence(sequence);
    }

    /// Swap in a new sequence, returning the previous one
    pub fn replace_sequence(&mut self, sequence: PointSequence) -> PointSequence {
        let previous = std::mem::replace(&mut self.sequence, sequence);
        self.rebuild();
        if let Some(bounds) = self.builder.scene().bounds {
            self.camera.auto_fit(&bounds);
            self.sink.event(&Event::CameraFramed {
                distance: self.camera.distance(),
            });
        }
        previous
    }

    /// Replace one point in place. Returns `false` if `index` is out of range.
    pub fn update_point(&mut self, index: usize, point: Point) -> bool {
        let Some(slot) = self.sequence.points_mut().get_mut(index) else {
            return false;
        };
        *slot = point;
        self.rebuild();
        true
    }

    /// Apply a correction computed from this session's sequence.
    ///
    /// A correction computed for a sequence of another length is skipped.
    pub fn apply_correction(&mut self, correction: &Correction) -> usize {
        if correction.len() != self.sequence.len() {
            self.sink.event(&Event::CorrectionSkipped {
                policy: correction.policy().name(),
                reason: format!(
                    "computed for {} points, sequence has {}",
                    correction.len(),
                    self.sequence.len()
                ),
            });
            return 0;
        }

        let updated = correction.apply(&mut self.sequence, self.sink.as_ref());
        self.rebuild();
        updated
    }

    /// Regenerate scene geometry from the current sequence
    pub fn rebuild(&mut self) -> &Scene {
        let scene = self.builder.rebuild(&self.sequence);
        self.sink.event(&Event::SceneRebuilt {
            primitives: scene.primitive_count(),
            triangles: scene.triangle_count(),
        });
        scene
    }

    /// Forward input to the camera controller. Returns `true` if the view moved.
    pub fn handle_event(&mut self, event: SurfaceEvent) -> bool {
        self.controller.handle(event, &mut self.camera)
    }

    pub fn present(&self, surface: &mut dyn Surface) {
        surface.present(self.builder.scene(), &self.camera.state());
    }
}

impl Default for ViewSession {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerButton;
    use crate::primitives::PrimitiveKind;
    use crate::surface::RecordingSurface;
    use pathfix_core::Vec3;
    use pathfix_solver::{OrientationPolicy, OrientationSolver, Segmenter};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn zigzag() -> PointSequence {
        PointSequence::from_points(vec![
            Point::new(Vec3::new(0.0, 0.0, 0.0), Vec3::ZERO),
            Point::new(Vec3::new(50.0, 20.0, 0.0), Vec3::ZERO),
            Point::new(Vec3::new(100.0, 0.0, 10.0), Vec3::ZERO),
        ])
    }

    fn recording_session() -> (ViewSession, Rc<RefCell<Vec<Event>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let recorder = Rc::clone(&events);
        let session = ViewSession::default()
            .with_sink(move |e: &Event| recorder.borrow_mut().push(e.clone()));
        (session, events)
    }

    #[test]
    fn test_new_session_shows_placeholder() {
        let session = ViewSession::default();
        assert!(session.sequence().is_empty());
        assert_eq!(session.scene().count_of(PrimitiveKind::Placeholder), 1);
    }

    #[test]
    fn test_load_frames_camera() {
        let (mut session, events) = recording_session();
        session.load(zigzag());

        assert_eq!(session.scene().count_of(PrimitiveKind::Marker), 3);
        // Largest extent is 100, so 1.5x it
        assert!((session.camera().distance() - 150.0).abs() < 1e-9);
        assert_eq!(session.camera().look_at, Vec3::new(50.0, 10.0, 5.0));
        assert!(matches!(
            events.borrow().last(),
            Some(Event::CameraFramed { .. })
        ));
    }

    #[test]
    fn test_correction_keeps_camera() {
        let mut session = ViewSession::default();
        session.load(zigzag());

        // Move the view away from the framed position
        session.handle_event(SurfaceEvent::PointerDown {
            button: PointerButton::Primary,
            x: 0.0,
            y: 0.0,
        });
        assert!(session.handle_event(SurfaceEvent::PointerMove { x: 40.0, y: 15.0 }));
        session.handle_event(SurfaceEvent::Wheel { delta: 1.0 });
        let camera_before = session.camera().state();

        let segments = Segmenter::default().split(session.sequence());
        let correction = OrientationSolver::new(OrientationPolicy::Tangent { realign: false })
            .compute(session.sequence(), &segments);
        assert_eq!(session.apply_correction(&correction), 3);

        assert_eq!(session.camera().state(), camera_before);
        assert_eq!(session.scene().count_of(PrimitiveKind::Indicator), 3);
    }

    #[test]
    fn test_stale_correction_is_skipped() {
        let (mut session, events) = recording_session();
        session.load(zigzag());

        let segments = Segmenter::default().split(session.sequence());
        let correction = OrientationSolver::new(OrientationPolicy::PerpendicularBisector)
            .compute(session.sequence(), &segments);

        let mut longer = zigzag();
        longer.push(Point::new(Vec3::new(150.0, 5.0, 0.0), Vec3::Z));
        session.replace_sequence(longer);
        let before = session.sequence().clone();
        events.borrow_mut().clear();

        assert_eq!(session.apply_correction(&correction), 0);
        assert_eq!(session.sequence(), &before);
        assert_eq!(
            events.borrow().as_slice(),
            [Event::CorrectionSkipped {
                policy: "perpendicular_bisector",
                reason: "computed for 3 points, sequence has 4".to_string(),
            }]
        );
    }

    #[test]
    fn test_update_point_rebuilds_without_framing() {
        let (mut session, events) = recording_session();
        session.load(zigzag());
        let camera_before = session.camera().state();
        events.borrow_mut().clear();

        let moved = Point::new(Vec3::new(500.0, 0.0, 0.0), Vec3::Z);
        assert!(session.update_point(2, moved));
        assert!(!session.update_point(3, Point::new(Vec3::ZERO, Vec3::ZERO)));

        assert_eq!(session.camera().state(), camera_before);
        assert_eq!(session.scene().bounds.unwrap().max.x, 500.0);
        assert_eq!(events.borrow().len(), 1);
        assert!(matches!(events.borrow()[0], Event::SceneRebuilt { .. }));
    }

    #[test]
    fn test_replace_sequence_refits() {
        let mut session = ViewSession::default();
        session.load(zigzag());

        let far = PointSequence::from_points(vec![
            Point::new(Vec3::new(1000.0, 1000.0, 0.0), Vec3::X),
            Point::new(Vec3::new(1400.0, 1000.0, 0.0), Vec3::X),
        ]);
        let previous = session.replace_sequence(far);
        assert_eq!(previous.len(), 3);
        assert_eq!(session.camera().look_at, Vec3::new(1200.0, 1000.0, 0.0));
        assert!((session.camera().distance() - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_present_hands_scene_to_surface() {
        let mut session = ViewSession::default();
        session.load(zigzag());
        let mut surface = RecordingSurface::new();
        session.present(&mut surface);

        let frame = surface.last_frame().unwrap();
        assert_eq!(surface.present_count(), 1);
        assert_eq!(frame.markers, 3);
        assert_eq!(frame.camera, session.camera().state());
    }
}
