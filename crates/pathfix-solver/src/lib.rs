//! Pathfix Solver - segment-aware orientation correction
//!
//! Splits a `PointSequence` into segments by tag markers and recomputes each
//! point's direction vector from its neighbors within the segment.
//!
//! Computation and mutation are separate steps: `OrientationSolver::compute`
//! only reads the sequence and can run on any thread, while
//! `Correction::apply` writes the results and belongs on the thread that owns
//! the sequence.

mod orientation;
mod segment;

pub use orientation::{
    perpendicular_bisector, realign_tangent, tangent_direction, Correction, OrientationPolicy,
    OrientationSolver,
};
pub use segment::{Segment, Segmenter};
