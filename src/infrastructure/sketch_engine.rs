use crate::domain::{
    CanvasIds, SketchEngine, VizResult,
    chart::{ChartSnapshot, PlotLayout},
    logging::{LogComponent, get_logger},
    sketch::SketchModel,
    stats::{InputStats, OutputStats},
};
use crate::infrastructure::rendering::CanvasRenderer;

/// Production engine: the sample model drawn onto two Canvas 2D surfaces.
pub struct CanvasSketchEngine {
    model: SketchModel,
    input: CanvasRenderer,
    output: CanvasRenderer,
}

impl CanvasSketchEngine {
    pub fn new(ids: &CanvasIds, seed: u64) -> Self {
        get_logger().debug(
            LogComponent::Infrastructure("SketchEngine"),
            &format!("binding sketch to #{} and #{} (seed {seed})", ids.input, ids.output),
        );
        Self {
            model: SketchModel::new(seed),
            input: CanvasRenderer::new(ids.input.clone()),
            output: CanvasRenderer::new(ids.output.clone()),
        }
    }

    /// Seeds the sample generator from `Math.random`.
    pub fn from_entropy(ids: &CanvasIds) -> Self {
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        Self::new(ids, seed)
    }
}

impl SketchEngine for CanvasSketchEngine {
    fn sample(&mut self, count: u32) -> VizResult<()> {
        self.model.sample(count as usize)
    }

    fn set_bin_limit(&mut self, limit: u16) -> VizResult<()> {
        self.model.set_bin_limit(limit);
        Ok(())
    }

    fn input_stats(&self) -> InputStats {
        self.model.input_stats()
    }

    fn output_stats(&self) -> OutputStats {
        self.model.output_stats()
    }

    fn render_input_chart(&mut self, bin_count: u32) -> VizResult<ChartSnapshot> {
        let bars = self.model.input_histogram(bin_count);
        let geometry = self.input.draw_histogram(&bars, &PlotLayout::INPUT)?;
        Ok(ChartSnapshot::new(geometry))
    }

    fn render_output_chart(&mut self) -> VizResult<ChartSnapshot> {
        let bars = self.model.output_histogram();
        let geometry = self.output.draw_histogram(&bars, &PlotLayout::OUTPUT)?;
        Ok(ChartSnapshot::new(geometry))
    }
}
