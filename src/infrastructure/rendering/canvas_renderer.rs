use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::domain::{
    VizError, VizResult,
    chart::{ChartGeometry, PlotLayout},
    logging::{LogComponent, get_logger},
    sketch::HistogramBar,
};

const BACKGROUND: &str = "#ffffff";
const BAR_FILL: &str = "#607d8b";
const AXIS_STROKE: &str = "rgba(0, 0, 0, 0.1)";
const LABEL_FILL: &str = "#000000";
const LABEL_FONT: &str = "12px sans-serif";
const TICK_LENGTH: f64 = 5.0;

/// Canvas 2D histogram painter bound to one canvas element
pub struct CanvasRenderer {
    canvas_id: String,
}

impl CanvasRenderer {
    pub fn new(canvas_id: impl Into<String>) -> Self {
        Self { canvas_id: canvas_id.into() }
    }

    fn canvas_context(&self) -> VizResult<(HtmlCanvasElement, CanvasRenderingContext2d)> {
        let canvas = gloo::utils::document()
            .get_element_by_id(&self.canvas_id)
            .ok_or_else(|| VizError::Dom(format!("canvas #{} not found", self.canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| VizError::Dom(format!("#{} is not a canvas", self.canvas_id)))?;

        let context = canvas
            .get_context("2d")
            .map_err(|_| VizError::Rendering("Failed to get 2D context".into()))?
            .ok_or_else(|| VizError::Rendering("2D context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| VizError::Rendering("Failed to cast to 2D context".into()))?;

        Ok((canvas, context))
    }

    /// Lays out `bars` at the canvas' current resolution and paints them.
    pub fn draw_histogram(&self, bars: &[HistogramBar], layout: &PlotLayout) -> VizResult<ChartGeometry> {
        let (canvas, context) = self.canvas_context()?;
        let geometry =
            ChartGeometry::histogram(bars, f64::from(canvas.width()), f64::from(canvas.height()), layout);

        self.paint(&context, &geometry)
            .map_err(|e| VizError::Rendering(format!("#{}: {:?}", self.canvas_id, e)))?;

        get_logger().trace(
            LogComponent::Infrastructure("CanvasRenderer"),
            &format!("#{} painted {} bars", self.canvas_id, geometry.bars.len()),
        );
        Ok(geometry)
    }

    fn paint(&self, context: &CanvasRenderingContext2d, geometry: &ChartGeometry) -> Result<(), JsValue> {
        context.set_fill_style_str(BACKGROUND);
        context.fill_rect(0.0, 0.0, geometry.canvas_width, geometry.canvas_height);

        context.set_fill_style_str(BAR_FILL);
        for bar in &geometry.bars {
            context.fill_rect(bar.x, bar.y, bar.width, bar.height);
        }

        self.paint_axes(context, geometry)
    }

    fn paint_axes(&self, context: &CanvasRenderingContext2d, geometry: &ChartGeometry) -> Result<(), JsValue> {
        let area = &geometry.area;
        let bottom = area.top + area.height;

        context.set_stroke_style_str(AXIS_STROKE);
        context.set_line_width(1.0);
        context.begin_path();
        context.move_to(area.left, area.top);
        context.line_to(area.left, bottom);
        context.line_to(area.left + area.width, bottom);
        for tick in &geometry.x_ticks {
            context.move_to(tick.position, bottom);
            context.line_to(tick.position, bottom + TICK_LENGTH);
        }
        for tick in &geometry.y_ticks {
            context.move_to(area.left - TICK_LENGTH, tick.position);
            context.line_to(area.left, tick.position);
        }
        context.stroke();

        context.set_fill_style_str(LABEL_FILL);
        context.set_font(LABEL_FONT);

        context.set_text_align("center");
        context.set_text_baseline("top");
        for tick in &geometry.x_ticks {
            context.fill_text(&tick.label, tick.position, bottom + TICK_LENGTH + 2.0)?;
        }

        context.set_text_align("right");
        context.set_text_baseline("middle");
        for tick in &geometry.y_ticks {
            context.fill_text(&tick.label, area.left - TICK_LENGTH - 2.0, tick.position)?;
        }

        Ok(())
    }
}
