use crate::domain::chart::{CanvasKind, ChartSnapshot};
use crate::domain::errors::VizResult;
use crate::domain::stats::{InputStats, OutputStats};

/// Element ids of the two canvases an engine draws into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasIds {
    pub input: String,
    pub output: String,
}

impl CanvasIds {
    pub fn get(&self, kind: CanvasKind) -> &str {
        match kind {
            CanvasKind::Input => &self.input,
            CanvasKind::Output => &self.output,
        }
    }
}

/// Capabilities the controller needs from a streaming sketch and its charts.
///
/// The controller only ever talks to this trait; the browser build plugs in
/// a canvas-backed implementation, tests plug in recording fakes.
pub trait SketchEngine {
    /// Ingest `count` synthetic samples.
    fn sample(&mut self, count: u32) -> VizResult<()>;

    /// Change the summary's internal capacity.
    fn set_bin_limit(&mut self, limit: u16) -> VizResult<()>;

    fn input_stats(&self) -> InputStats;

    fn output_stats(&self) -> OutputStats;

    /// Draw the raw-sample histogram with `bin_count` equal-width buckets.
    fn render_input_chart(&mut self, bin_count: u32) -> VizResult<ChartSnapshot>;

    /// Draw the sketch's own bins.
    fn render_output_chart(&mut self) -> VizResult<ChartSnapshot>;
}
