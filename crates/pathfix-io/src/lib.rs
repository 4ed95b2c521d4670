//! Pathfix IO - loading and saving point sequences
//!
//! Rows are comma separated: six numeric fields `x,y,z,rx,ry,rz` followed by
//! any number of opaque trailing tokens, which are carried through untouched.

mod loader;
mod saver;
mod source;

pub use loader::{load_points, load_points_string, LoadOptions, LoadReport};
pub use saver::{save_points, save_points_string};
pub use source::{CsvPointSource, PointSource};
