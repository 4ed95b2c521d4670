//! Injected observability
//!
//! Library code never logs directly. Components report structured events to
//! an `EventSink` supplied by the host; the default `NullSink` discards them.

use std::fmt;

/// Structured pipeline event
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    PointsLoaded {
        count: usize,
        skipped_rows: usize,
        header: bool,
    },
    PointsSaved {
        count: usize,
    },
    SegmentsFound {
        count: usize,
    },
    CorrectionApplied {
        policy: &'static str,
        updated: usize,
        unchanged: usize,
    },
    CorrectionSkipped {
        policy: &'static str,
        reason: String,
    },
    CorrectionCancelled {
        processed: usize,
    },
    SceneRebuilt {
        primitives: usize,
        triangles: usize,
    },
    CameraFramed {
        distance: f64,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::PointsLoaded {
                count,
                skipped_rows,
                header,
            } => write!(
                f,
                "loaded {} point(s), skipped {} row(s){}",
                count,
                skipped_rows,
                if *header { ", header kept" } else { "" }
            ),
            Event::PointsSaved { count } => write!(f, "saved {} point(s)", count),
            Event::SegmentsFound { count } => write!(f, "found {} segment(s)", count),
            Event::CorrectionApplied {
                policy,
                updated,
                unchanged,
            } => write!(
                f,
                "{} correction updated {} point(s), left {} unchanged",
                policy, updated, unchanged
            ),
            Event::CorrectionSkipped { policy, reason } => {
                write!(f, "{} correction skipped: {}", policy, reason)
            }
            Event::CorrectionCancelled { processed } => {
                write!(f, "correction cancelled after {} point(s)", processed)
            }
            Event::SceneRebuilt {
                primitives,
                triangles,
            } => write!(
                f,
                "scene rebuilt: {} primitive(s), {} triangle(s)",
                primitives, triangles
            ),
            Event::CameraFramed { distance } => {
                write!(f, "camera framed at distance {:.3}", distance)
            }
        }
    }
}

/// Receiver for pipeline events
pub trait EventSink {
    fn event(&self, event: &Event);
}

/// Discards every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn event(&self, _event: &Event) {}
}

/// Forwards events to the `log` facade
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn event(&self, event: &Event) {
        match event {
            Event::CorrectionSkipped { .. } | Event::CorrectionCancelled { .. } => {
                log::warn!("{}", event)
            }
            Event::SceneRebuilt { .. } | Event::CameraFramed { .. } => log::debug!("{}", event),
            _ => log::info!("{}", event),
        }
    }
}

impl<F> EventSink for F
where
    F: Fn(&Event),
{
    fn event(&self, event: &Event) {
        self(event)
    }
}
