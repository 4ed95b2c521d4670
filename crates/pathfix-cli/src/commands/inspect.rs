//! Point inspection command

use anyhow::{Context, Result};
use pathfix_core::{PathfixConfig, Point};
use pathfix_io::{load_points, LoadOptions};
use pathfix_render::display_angles;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct PointRow {
    index: usize,
    position: [f64; 3],
    orientation: [f64; 3],
    /// `None` when the orientation is a zero vector
    azimuth_deg: Option<f64>,
    elevation_deg: Option<f64>,
    segment: Option<i64>,
    tags: Vec<String>,
}

impl PointRow {
    fn new(index: usize, point: &Point, marker: &str) -> Self {
        let angles = display_angles(point.orientation);
        Self {
            index,
            position: point.position.to_array(),
            orientation: point.orientation.to_array(),
            azimuth_deg: angles.map(|a| a.azimuth),
            elevation_deg: angles.map(|a| a.elevation),
            segment: point.segment_id(marker),
            tags: point.tags.clone(),
        }
    }
}

pub fn run(input: &str, limit: Option<usize>, format: &str, config: PathfixConfig) -> Result<()> {
    let report = load_points(input, LoadOptions::from(&config.load))
        .with_context(|| format!("Failed to load points from {}", input))?;
    let sequence = &report.sequence;

    let rows: Vec<PointRow> = sequence
        .iter()
        .enumerate()
        .take(limit.unwrap_or(usize::MAX))
        .map(|(i, p)| PointRow::new(i, p, &config.solver.marker))
        .collect();

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        _ => {
            if let Some(header) = &sequence.header {
                println!("Header: {}", header);
            }
            println!("{} point(s)", sequence.len());
            for row in &rows {
                println!("{}", format_row(row));
            }
            if rows.len() < sequence.len() {
                println!("  ... {} more", sequence.len() - rows.len());
            }
        }
    }

    Ok(())
}

fn format_row(row: &PointRow) -> String {
    let [x, y, z] = row.position;
    let angles = match (row.azimuth_deg, row.elevation_deg) {
        (Some(az), Some(el)) => format!("az {:>8.3}  el {:>8.3}", az, el),
        _ => "no orientation".to_string(),
    };
    let mut line = format!(
        "  {:>5}  ({:.3}, {:.3}, {:.3})  {}",
        row.index, x, y, z, angles
    );
    if let Some(id) = row.segment {
        line.push_str(&format!("  seg {}", id));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfix_core::Vec3;

    #[test]
    fn test_point_row_angles() {
        let point = Point::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 1.0, 1.0))
            .with_tags(["SEG", "3", "probe"]);
        let row = PointRow::new(4, &point, "SEG");

        assert_eq!(row.segment, Some(3));
        assert!((row.azimuth_deg.unwrap() - 90.0).abs() < 1e-9);
        assert!((row.elevation_deg.unwrap() - 45.0).abs() < 1e-9);
        let text = format_row(&row);
        assert!(text.contains("az   90.000"));
        assert!(text.ends_with("seg 3"));
    }

    #[test]
    fn test_zero_orientation_row() {
        let row = PointRow::new(0, &Point::new(Vec3::ZERO, Vec3::ZERO), "SEG");
        assert!(row.azimuth_deg.is_none());
        assert!(format_row(&row).contains("no orientation"));

        let json = serde_json::to_value(&row).unwrap();
        assert!(json["azimuth_deg"].is_null());
        assert_eq!(json["tags"], serde_json::json!([]));
    }
}
