use crate::application::surface::{DisplaySurface, Slot};
use crate::domain::chart::ChartSnapshot;
use crate::domain::logging::{LogComponent, LogLevel, get_logger};
use crate::domain::{SketchEngine, VizResult};

/// Monotonic millisecond clock, sampled synchronously.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Snapshots produced by one redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    pub input: ChartSnapshot,
    pub output: ChartSnapshot,
    pub elapsed_ms: f64,
}

pub fn rendered_status(elapsed_ms: f64) -> String {
    format!("Rendered in {}ms", elapsed_ms.max(0.0).ceil() as u64)
}

/// Redraws both panels and both canvases on demand, timing the chart work.
#[derive(Debug)]
pub struct RenderScheduler<C> {
    clock: C,
    frames: u64,
}

impl<C: Clock> RenderScheduler<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, frames: 0 }
    }

    /// Completed redraws so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// One full synchronous pass. Returns `None` when there is no engine yet.
    pub fn redraw<E, S>(
        &mut self,
        engine: Option<&mut E>,
        bin_size: u32,
        surface: &mut S,
    ) -> VizResult<Option<RenderedFrame>>
    where
        E: SketchEngine,
        S: DisplaySurface,
    {
        let Some(engine) = engine else {
            return Ok(None);
        };

        surface.set_text(Slot::InputStats, &engine.input_stats().summary());
        surface.set_markup(Slot::OutputStats, &engine.output_stats().to_markup());

        surface.set_text(Slot::Status, "Rendering...");
        let start = self.clock.now_ms();
        let input = engine.render_input_chart(bin_size)?;
        let output = engine.render_output_chart()?;
        let elapsed_ms = self.clock.now_ms() - start;
        surface.set_text(Slot::Status, &rendered_status(elapsed_ms));

        self.frames += 1;
        get_logger().log_with_metadata(
            LogLevel::Debug,
            LogComponent::Application("RenderScheduler"),
            "frame rendered",
            &format!("frame={} bin_size={} elapsed_ms={:.3}", self.frames, bin_size, elapsed_ms),
        );

        Ok(Some(RenderedFrame { input, output, elapsed_ms }))
    }
}
