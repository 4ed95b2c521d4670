//! Pathfix Core - Foundational types for the pathfix toolchain
//!
//! This crate provides the types that all other pathfix crates depend on:
//! - `Vec3`, `Color`, `Bounds` - Spatial types and vector math
//! - `Point`, `PointSequence` - The path data model
//! - `EventSink` - Injected observability
//! - `PathfixConfig` - Layered configuration
//! - Error types and Result alias

mod config;
mod error;
mod observe;
mod point;
mod types;

pub use config::{LoadConfig, PathfixConfig, PolicyKind, SceneConfig, SolverConfig};
pub use error::{PathfixError, Result};
pub use observe::{Event, EventSink, LogSink, NullSink};
pub use point::{Point, PointSequence, DEFAULT_SEGMENT_MARKER};
pub use types::{Bounds, Color, Vec3};
