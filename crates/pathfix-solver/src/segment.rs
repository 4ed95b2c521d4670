//! Segment detection by tag markers

use pathfix_core::{Point, PointSequence, DEFAULT_SEGMENT_MARKER};
use std::ops::Range;

/// A contiguous run of points sharing one segment id.
///
/// This is an index range into the parent sequence, not a copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Segment id from the marker, `None` for unmarked leading points
    pub id: Option<i64>,
    pub range: Range<usize>,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// The points this segment covers in `sequence`
    pub fn points<'a>(&self, sequence: &'a PointSequence) -> &'a [Point] {
        &sequence.points()[self.range.clone()]
    }
}

/// Splits a sequence into segments at marker boundaries
#[derive(Clone, Debug)]
pub struct Segmenter {
    marker: String,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENT_MARKER)
    }
}

impl Segmenter {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Scan the sequence in order and return its segments.
    ///
    /// A marker whose id differs from the current one closes the open
    /// segment and starts a new one that includes the marker point. Leading
    /// unmarked points form an implicit first segment.
    pub fn split(&self, sequence: &PointSequence) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut current_id: Option<i64> = None;
        let mut start = 0;

        for (index, point) in sequence.iter().enumerate() {
            if let Some(id) = point.segment_id(&self.marker) {
                if current_id != Some(id) {
                    if index > start {
                        segments.push(Segment {
                            id: current_id,
                            range: start..index,
                        });
                    }
                    start = index;
                    current_id = Some(id);
                }
            }
        }

        if sequence.len() > start {
            segments.push(Segment {
                id: current_id,
                range: start..sequence.len(),
            });
        }

        segments
    }

    /// Rewrite segment ids to consecutive integers starting at 0.
    ///
    /// The first point of every segment receives a marker pair; later points
    /// only have an existing pair rewritten. All other tags are untouched.
    pub fn renumber(&self, sequence: &mut PointSequence, segments: &[Segment]) {
        let points = sequence.points_mut();
        for (new_id, segment) in segments.iter().enumerate() {
            let new_id = new_id as i64;
            for (offset, point) in points[segment.range.clone()].iter_mut().enumerate() {
                if offset == 0 || point.segment_id(&self.marker).is_some() {
                    point.set_segment_id(&self.marker, new_id);
                }
            }
        }
    }
}
