//! The point source seam between storage and the correction core

use crate::loader::{load_points, LoadOptions};
use crate::saver::save_points;
use pathfix_core::{Event, EventSink, NullSink, PointSequence, Result};
use std::path::Path;

/// Produces and persists point sequences
pub trait PointSource {
    fn load(&self, path: &Path) -> Result<PointSequence>;
    fn save(&self, path: &Path, sequence: &PointSequence) -> Result<()>;
}

/// CSV-backed point source
pub struct CsvPointSource {
    options: LoadOptions,
    sink: Box<dyn EventSink + Send + Sync>,
}

impl Default for CsvPointSource {
    fn default() -> Self {
        Self::new(LoadOptions::default())
    }
}

impl CsvPointSource {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            sink: Box::new(NullSink),
        }
    }

    pub fn with_sink(mut self, sink: impl EventSink + Send + Sync + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn options(&self) -> LoadOptions {
        self.options
    }
}

impl PointSource for CsvPointSource {
    fn load(&self, path: &Path) -> Result<PointSequence> {
        let report = load_points(path, self.options)?;
        self.sink.event(&Event::PointsLoaded {
            count: report.sequence.len(),
            skipped_rows: report.skipped_rows,
            header: report.sequence.header.is_some(),
        });
        Ok(report.sequence)
    }

    fn save(&self, path: &Path, sequence: &PointSequence) -> Result<()> {
        save_points(path, sequence)?;
        self.sink.event(&Event::PointsSaved {
            count: sequence.len(),
        });
        Ok(())
    }
}
