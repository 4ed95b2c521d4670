//! Point loading from CSV text

use pathfix_core::{LoadConfig, PathfixError, Point, PointSequence, Result, Vec3};
use std::fs;
use std::path::Path;

/// Number of leading numeric fields in a row
const NUMERIC_FIELDS: usize = 6;

/// Options for turning rows into points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Discard the first parsed point
    pub drop_first_point: bool,
}

impl From<&LoadConfig> for LoadOptions {
    fn from(config: &LoadConfig) -> Self {
        Self {
            drop_first_point: config.drop_first_point,
        }
    }
}

/// Loaded sequence plus what was left out
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub sequence: PointSequence,
    /// Non-empty rows with fewer than six fields
    pub skipped_rows: usize,
}

/// Load points from a CSV file
pub fn load_points<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<LoadReport> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| PathfixError::LoadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(load_points_string(&content, options))
}

/// Load points from CSV text.
///
/// A non-numeric first field on the first line marks a header, which is
/// kept verbatim. A leading byte-order mark is ignored. Unparseable numeric
/// fields become `0.0`.
///
/// Fields are split on every comma. Quoting is not recognized, so a quoted
/// `"SEG"` is not a segment marker and a quoted `"a,b"` becomes two tags.
pub fn load_points_string(content: &str, options: LoadOptions) -> LoadReport {
    let mut sequence = PointSequence::new();
    let mut skipped_rows = 0;

    for (line_no, raw) in content.lines().enumerate() {
        let line = if line_no == 0 {
            raw.trim_start_matches('\u{feff}')
        } else {
            raw
        };
        if line_no == 0 && is_header(line) {
            // Kept as read, byte-order mark included
            sequence.header = Some(raw.to_string());
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        match parse_row(line) {
            Some(point) => sequence.push(point),
            None => skipped_rows += 1,
        }
    }

    if options.drop_first_point {
        sequence.remove_first();
    }

    LoadReport {
        sequence,
        skipped_rows,
    }
}

fn is_header(line: &str) -> bool {
    let first = line.split(',').next().unwrap_or("");
    !first.trim().is_empty() && first.trim().parse::<f64>().is_err()
}

fn parse_row(line: &str) -> Option<Point> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < NUMERIC_FIELDS {
        return None;
    }

    let num = |i: usize| fields[i].trim().parse::<f64>().unwrap_or(0.0);
    let position = Vec3::new(num(0), num(1), num(2));
    let orientation = Vec3::new(num(3), num(4), num(5));

    Some(Point::new(position, orientation).with_tags(fields[NUMERIC_FIELDS..].iter().copied()))
}
