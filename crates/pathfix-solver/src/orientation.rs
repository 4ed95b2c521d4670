//! Per-point orientation from neighboring geometry

use crate::segment::Segment;
use pathfix_core::{Event, EventSink, Point, PointSequence, PolicyKind, SolverConfig, Vec3};
use std::sync::atomic::{AtomicBool, Ordering};

/// A chord whose Z component is at least this fraction of its length is
/// crossed with X instead of Z.
const NEAR_Z_RATIO: f64 = 0.9;

/// How a correction pass derives each point's direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationPolicy {
    /// Central difference between the previous and next point
    Tangent {
        /// Rotate the tangent by -90 degrees about X before storing
        realign: bool,
    },
    /// Unit normal to the chord between neighboring points
    PerpendicularBisector,
}

impl OrientationPolicy {
    pub fn from_config(config: &SolverConfig) -> Self {
        match config.policy {
            PolicyKind::Tangent => OrientationPolicy::Tangent {
                realign: config.realign,
            },
            PolicyKind::PerpendicularBisector => OrientationPolicy::PerpendicularBisector,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OrientationPolicy::Tangent { .. } => PolicyKind::Tangent.as_str(),
            OrientationPolicy::PerpendicularBisector => PolicyKind::PerpendicularBisector.as_str(),
        }
    }
}

/// Normalized `next - prev`, or `None` when the neighbors coincide
pub fn tangent_direction(prev: Vec3, next: Vec3) -> Option<Vec3> {
    let d = next - prev;
    let len = d.length();
    if len == 0.0 {
        None
    } else {
        Some(d * (1.0 / len))
    }
}

/// Tangent expressed in the export convention: -90 degrees about X
pub fn realign_tangent(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, -v.y)
}

/// Unit vector orthogonal to the chord `p2 - p1`.
///
/// Crosses the chord with Z, or with X when the chord is nearly parallel to
/// Z. Returns `None` when the points coincide.
pub fn perpendicular_bisector(p1: Vec3, p2: Vec3) -> Option<Vec3> {
    let chord = p2 - p1;
    let reference = if chord.z.abs() >= NEAR_Z_RATIO * chord.length() {
        Vec3::X
    } else {
        Vec3::Z
    };
    let perp = chord.cross(&reference);
    let len = perp.length();
    if len == 0.0 {
        None
    } else {
        Some(perp * (1.0 / len))
    }
}

/// Result of a compute pass, indexed like the sequence it was computed from
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    policy: OrientationPolicy,
    directions: Vec<Option<Vec3>>,
    skipped: Option<String>,
}

impl Correction {
    pub fn policy(&self) -> OrientationPolicy {
        self.policy
    }

    /// New direction for the point at `index`, `None` if it stays unchanged
    pub fn direction(&self, index: usize) -> Option<Vec3> {
        self.directions.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    pub fn updated_count(&self) -> usize {
        self.directions.iter().filter(|d| d.is_some()).count()
    }

    /// Why the whole pass was a no-op, if it was
    pub fn skipped_reason(&self) -> Option<&str> {
        self.skipped.as_deref()
    }

    /// Write the computed directions into `sequence`; returns the number of
    /// points updated.
    pub fn apply(&self, sequence: &mut PointSequence, sink: &dyn EventSink) -> usize {
        if let Some(reason) = &self.skipped {
            sink.event(&Event::CorrectionSkipped {
                policy: self.policy.name(),
                reason: reason.clone(),
            });
            return 0;
        }

        let mut updated = 0;
        for (point, direction) in sequence.points_mut().iter_mut().zip(&self.directions) {
            if let Some(direction) = direction {
                point.orientation = *direction;
                updated += 1;
            }
        }

        sink.event(&Event::CorrectionApplied {
            policy: self.policy.name(),
            updated,
            unchanged: sequence.len() - updated,
        });
        updated
    }
}

/// Computes orientations for every point of a segmented sequence
#[derive(Debug, Clone, Copy)]
pub struct OrientationSolver {
    policy: OrientationPolicy,
}

impl OrientationSolver {
    pub fn new(policy: OrientationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> OrientationPolicy {
        self.policy
    }

    /// Compute directions without touching the sequence
    pub fn compute(&self, sequence: &PointSequence, segments: &[Segment]) -> Correction {
        if let Some(skipped) = self.skip_short(sequence) {
            return skipped;
        }

        let mut directions = vec![None; sequence.len()];
        for segment in segments {
            let points = segment.points(sequence);
            for i in 0..points.len() {
                directions[segment.range.start + i] = self.direction_at(points, i);
            }
        }
        self.finished(directions)
    }

    /// Like `compute`, checking `cancel` before each point.
    ///
    /// Returns `None` if the flag was raised; the sequence is never touched
    /// either way.
    pub fn compute_cancellable(
        &self,
        sequence: &PointSequence,
        segments: &[Segment],
        cancel: &AtomicBool,
        sink: &dyn EventSink,
    ) -> Option<Correction> {
        if let Some(skipped) = self.skip_short(sequence) {
            return Some(skipped);
        }

        let mut directions = vec![None; sequence.len()];
        let mut processed = 0;
        for segment in segments {
            let points = segment.points(sequence);
            for i in 0..points.len() {
                if cancel.load(Ordering::Relaxed) {
                    sink.event(&Event::CorrectionCancelled { processed });
                    return None;
                }
                directions[segment.range.start + i] = self.direction_at(points, i);
                processed += 1;
            }
        }
        Some(self.finished(directions))
    }

    /// Compute and apply in one step
    pub fn solve(
        &self,
        sequence: &mut PointSequence,
        segments: &[Segment],
        sink: &dyn EventSink,
    ) -> usize {
        sink.event(&Event::SegmentsFound {
            count: segments.len(),
        });
        self.compute(sequence, segments).apply(sequence, sink)
    }

    /// A no-op correction when the sequence is too short for the policy
    fn skip_short(&self, sequence: &PointSequence) -> Option<Correction> {
        if self.policy == OrientationPolicy::PerpendicularBisector && sequence.len() < 3 {
            return Some(Correction {
                policy: self.policy,
                directions: vec![None; sequence.len()],
                skipped: Some(format!(
                    "needs at least 3 points, sequence has {}",
                    sequence.len()
                )),
            });
        }
        None
    }

    /// Direction of `points[i]`, looking only at neighbors inside `points`
    fn direction_at(&self, points: &[Point], i: usize) -> Option<Vec3> {
        let n = points.len();
        match self.policy {
            OrientationPolicy::Tangent { realign } => {
                let prev = points[i.saturating_sub(1)].position;
                let next = points[(i + 1).min(n - 1)].position;
                tangent_direction(prev, next).map(|d| if realign { realign_tangent(d) } else { d })
            }
            OrientationPolicy::PerpendicularBisector => {
                if n < 2 {
                    None
                } else if i == 0 {
                    perpendicular_bisector(points[0].position, points[1].position)
                } else if i == n - 1 {
                    perpendicular_bisector(points[n - 2].position, points[n - 1].position)
                } else {
                    perpendicular_bisector(points[i - 1].position, points[i + 1].position)
                }
            }
        }
    }

    fn finished(&self, directions: Vec<Option<Vec3>>) -> Correction {
        Correction {
            policy: self.policy,
            directions,
            skipped: None,
        }
    }
}
