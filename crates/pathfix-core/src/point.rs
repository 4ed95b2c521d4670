//! Path points and the sequence that owns them

use crate::types::{Bounds, Vec3};
use serde::{Deserialize, Serialize};

/// Marker token used when no configuration overrides it
pub const DEFAULT_SEGMENT_MARKER: &str = "SEG";

/// One sample along the path
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub position: Vec3,
    /// Direction vector once a correction policy has written it; the
    /// loaded values are kept as-is until then.
    pub orientation: Vec3,
    /// Trailing tokens from the source row, preserved verbatim.
    pub tags: Vec<String>,
}

impl Point {
    pub fn new(position: Vec3, orientation: Vec3) -> Self {
        Self {
            position,
            orientation,
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Segment id encoded by a leading `[marker, <int>]` tag pair
    pub fn segment_id(&self, marker: &str) -> Option<i64> {
        match self.tags.as_slice() {
            [first, second, ..] if first == marker => second.trim().parse().ok(),
            _ => None,
        }
    }

    /// Write `id` into the marker pair, inserting the pair if the point has none
    pub fn set_segment_id(&mut self, marker: &str, id: i64) {
        if self.segment_id(marker).is_some() {
            self.tags[1] = id.to_string();
        } else {
            self.tags.splice(0..0, [marker.to_string(), id.to_string()]);
        }
    }
}

/// Ordered, exclusively owned list of path points
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSequence {
    points: Vec<Point>,
    /// Verbatim header row of the source, reproduced on save
    pub header: Option<String>,
}

impl PointSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            points,
            header: None,
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    /// Drop the first point, if any
    pub fn remove_first(&mut self) -> Option<Point> {
        if self.points.is_empty() {
            None
        } else {
            Some(self.points.remove(0))
        }
    }

    /// Bounding box of all positions
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.points.iter().map(|p| p.position))
    }
}

impl<'a> IntoIterator for &'a PointSequence {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_id_parsing() {
        let p = Point::default().with_tags(["SEG", "3", "tool=7"]);
        assert_eq!(p.segment_id("SEG"), Some(3));
        assert_eq!(p.segment_id("CURVE"), None);

        let not_int = Point::default().with_tags(["SEG", "x"]);
        assert_eq!(not_int.segment_id("SEG"), None);

        let short = Point::default().with_tags(["SEG"]);
        assert_eq!(short.segment_id("SEG"), None);

        let negative = Point::default().with_tags(["SEG", "-2"]);
        assert_eq!(negative.segment_id("SEG"), Some(-2));
    }

    #[test]
    fn test_set_segment_id_rewrites_only_marker_pair() {
        let mut p = Point::default().with_tags(["SEG", "9", "a", " b "]);
        p.set_segment_id("SEG", 0);
        assert_eq!(p.tags, vec!["SEG", "0", "a", " b "]);

        let mut unmarked = Point::default().with_tags(["a"]);
        unmarked.set_segment_id("SEG", 4);
        assert_eq!(unmarked.tags, vec!["SEG", "4", "a"]);
    }

    #[test]
    fn test_sequence_bounds_and_removal() {
        let mut seq = PointSequence::from_points(vec![
            Point::new(Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO),
            Point::new(Vec3::new(3.0, -1.0, 2.0), Vec3::ZERO),
        ]);
        let b = seq.bounds().unwrap();
        assert_eq!(b.min, Vec3::new(1.0, -1.0, 1.0));
        assert_eq!(b.max, Vec3::new(3.0, 1.0, 2.0));

        let first = seq.remove_first().unwrap();
        assert_eq!(first.position, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(seq.len(), 1);

        assert!(PointSequence::new().bounds().is_none());
        assert!(PointSequence::new().remove_first().is_none());
    }
}
