//! Point saving to CSV text

use pathfix_core::{PathfixError, PointSequence, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Save points to a CSV file
pub fn save_points<P: AsRef<Path>>(path: P, sequence: &PointSequence) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, save_points_string(sequence)).map_err(|e| PathfixError::SaveError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Render points as CSV text: the header (if any), then six numeric fields
/// with five decimals followed by the point's tags in their original order.
pub fn save_points_string(sequence: &PointSequence) -> String {
    let mut out = String::new();

    if let Some(header) = &sequence.header {
        out.push_str(header);
        out.push('\n');
    }

    for point in sequence {
        let p = point.position;
        let o = point.orientation;
        // Writing into a String cannot fail
        let _ = write!(
            out,
            "{:.5},{:.5},{:.5},{:.5},{:.5},{:.5}",
            p.x, p.y, p.z, o.x, o.y, o.z
        );
        for tag in &point.tags {
            out.push(',');
            out.push_str(tag);
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load_points, load_points_string, LoadOptions};
    use pathfix_core::{NullSink, Point, Vec3};
    use pathfix_solver::{OrientationPolicy, OrientationSolver, Segmenter};

    #[test]
    fn test_save_format() {
        let seq = PointSequence::from_points(vec![Point::new(
            Vec3::new(1.0, -2.5, 1.0 / 3.0),
            Vec3::new(0.0, 0.0, 1.0),
        )
        .with_tags(["SEG", "1", "keep me", ""])])
        .with_header("x,y,z,rx,ry,rz");

        assert_eq!(
            save_points_string(&seq),
            "x,y,z,rx,ry,rz\n1.00000,-2.50000,0.33333,0.00000,0.00000,1.00000,SEG,1,keep me,\n"
        );
    }

    #[test]
    fn test_round_trip_preserves_tags_through_correction() {
        let csv = "X,Y,Z,A,B,C\n\
                   0,0,0,0,0,0, spaced ,\"quoted\"\n\
                   1,0,0,0,0,0,SEG,4,t=1\n\
                   2,1,0,0,0,0,\n\
                   3,1,1,0,0,0,SEG,5,;;\n";
        let mut seq = load_points_string(csv, LoadOptions::default()).sequence;
        let tags_before: Vec<Vec<String>> = seq.iter().map(|p| p.tags.clone()).collect();

        let segments = Segmenter::default().split(&seq);
        OrientationSolver::new(OrientationPolicy::Tangent { realign: true })
            .solve(&mut seq, &segments, &NullSink);

        let dir = std::env::temp_dir().join(format!("pathfix_io_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("points.csv");
        save_points(&path, &seq).unwrap();

        let reloaded = load_points(&path, LoadOptions::default()).unwrap().sequence;
        let tags_after: Vec<Vec<String>> = reloaded.iter().map(|p| p.tags.clone()).collect();
        assert_eq!(tags_before, tags_after);
        assert_eq!(reloaded.header, seq.header);
        for (a, b) in seq.iter().zip(reloaded.iter()) {
            assert!((a.orientation - b.orientation).length() < 1e-5);
            assert!((a.position - b.position).length() < 1e-5);
        }

        fs::remove_file(&path).ok();
        fs::remove_dir(&dir).ok();
    }
}
