pub mod chart;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod sketch;
pub mod stats;

pub use engine::{CanvasIds, SketchEngine};
pub use errors::{VizError, VizResult};
