//! Agent-flavoured DDSketch plus the synthetic sample model the demo drives.

mod agent;
mod bin;
mod config;
mod model;

pub use agent::DDSketch;
pub use bin::Bin;
pub use config::{DEFAULT_BIN_LIMIT, SketchConfig};
pub use model::{HistogramBar, SketchModel};
