//! Segment listing command

use anyhow::{Context, Result};
use pathfix_core::{PathfixConfig, PointSequence};
use pathfix_io::{load_points, LoadOptions};
use pathfix_solver::{Segment, Segmenter};
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq)]
struct SegmentRow {
    index: usize,
    id: Option<i64>,
    start: usize,
    end: usize,
    points: usize,
    length: f64,
}

pub fn run(input: &str, marker: Option<String>, format: &str, mut config: PathfixConfig) -> Result<()> {
    if let Some(marker) = marker {
        config.solver.marker = marker;
        config.validate().context("Invalid command-line option")?;
    }

    let report = load_points(input, LoadOptions::from(&config.load))
        .with_context(|| format!("Failed to load points from {}", input))?;

    let segments = Segmenter::new(config.solver.marker).split(&report.sequence);
    let rows = segment_rows(&report.sequence, &segments);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        _ => {
            println!("{} segment(s), {} point(s)", rows.len(), report.sequence.len());
            for row in &rows {
                let id = row.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
                println!(
                    "  [{}] id {:>4}  points {:>5}..{:<5} ({} point(s), path length {:.3})",
                    row.index, id, row.start, row.end, row.points, row.length
                );
            }
            if report.skipped_rows > 0 {
                println!("  ({} short row(s) skipped)", report.skipped_rows);
            }
        }
    }

    Ok(())
}

fn segment_rows(sequence: &PointSequence, segments: &[Segment]) -> Vec<SegmentRow> {
    segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let points = segment.points(sequence);
            let length: f64 = points
                .windows(2)
                .map(|pair| (pair[1].position - pair[0].position).length())
                .sum();
            SegmentRow {
                index,
                id: segment.id,
                start: segment.range.start,
                end: segment.range.end,
                points: segment.len(),
                length,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfix_core::{Point, Vec3};

    #[test]
    fn test_invalid_marker_rejected_before_loading() {
        for marker in ["A,B", ""] {
            let err = run("missing.csv", Some(marker.to_string()), "text", PathfixConfig::default())
                .unwrap_err();
            assert_eq!(err.to_string(), "Invalid command-line option");
        }
    }

    #[test]
    fn test_segment_rows() {
        let seq = PointSequence::from_points(vec![
            Point::new(Vec3::ZERO, Vec3::ZERO),
            Point::new(Vec3::new(3.0, 4.0, 0.0), Vec3::ZERO),
            Point::new(Vec3::new(3.0, 4.0, 0.0), Vec3::ZERO).with_tags(["SEG", "5"]),
            Point::new(Vec3::new(3.0, 4.0, 2.0), Vec3::ZERO),
        ]);
        let segments = Segmenter::default().split(&seq);
        let rows = segment_rows(&seq, &segments);

        assert_eq!(
            rows,
            vec![
                SegmentRow { index: 0, id: None, start: 0, end: 2, points: 2, length: 5.0 },
                SegmentRow { index: 1, id: Some(5), start: 2, end: 4, points: 2, length: 2.0 },
            ]
        );

        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[1]["id"], 5);
        assert!(json[0]["id"].is_null());
    }
}
