use serde::Serialize;

use super::value_objects::{AxisRange, DomainPoint, PlotLayout};
use crate::domain::sketch::HistogramBar;

const TICK_COUNT: usize = 10;

/// Plotted rectangle inside a canvas and the linear mapping onto data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub x: AxisRange,
    pub y: AxisRange,
}

impl PlotArea {
    pub fn new(canvas_width: f64, canvas_height: f64, layout: &PlotLayout, x: AxisRange, y: AxisRange) -> Self {
        let left = layout.margin + layout.left_label_area;
        let top = layout.margin;
        Self {
            left,
            top,
            width: (canvas_width - left - layout.margin).max(0.0),
            height: (canvas_height - top - layout.margin - layout.bottom_label_area).max(0.0),
            x,
            y,
        }
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.left && px <= self.left + self.width && py >= self.top && py <= self.top + self.height
    }

    pub fn x_to_px(&self, x: f64) -> f64 {
        if self.x.span() == 0.0 {
            return self.left;
        }
        self.left + (x - self.x.min) / self.x.span() * self.width
    }

    /// Larger values sit higher, so y grows downwards in pixels.
    pub fn y_to_px(&self, y: f64) -> f64 {
        if self.y.span() == 0.0 {
            return self.top + self.height;
        }
        self.top + (1.0 - (y - self.y.min) / self.y.span()) * self.height
    }

    /// Maps a backing-store pixel back to data space, `None` outside the plotted rectangle.
    pub fn invert(&self, px: f64, py: f64) -> Option<DomainPoint> {
        if !self.contains(px, py) || self.width == 0.0 || self.height == 0.0 {
            return None;
        }
        let fx = (px - self.left) / self.width;
        let fy = (py - self.top) / self.height;
        Some(DomainPoint { x: self.x.min + fx * self.x.span(), y: self.y.max - fy * self.y.span() })
    }
}

/// Filled rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

/// Everything the painter needs to draw one histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartGeometry {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub area: PlotArea,
    pub bars: Vec<BarRect>,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
}

impl ChartGeometry {
    pub fn histogram(bars: &[HistogramBar], canvas_width: f64, canvas_height: f64, layout: &PlotLayout) -> Self {
        let x = match (bars.first(), bars.last()) {
            (Some(first), Some(last)) if last.end > first.start => AxisRange::new(first.start, last.end),
            _ => AxisRange::default(),
        };
        let tallest = bars.iter().map(|b| b.count).fold(0.0, f64::max);
        let y = if tallest > 0.0 { AxisRange::new(0.0, tallest * layout.headroom) } else { AxisRange::default() };

        let area = PlotArea::new(canvas_width, canvas_height, layout, x, y);
        let baseline = area.y_to_px(0.0);

        let rects = bars
            .iter()
            .map(|bar| {
                let x0 = area.x_to_px(bar.start);
                let x1 = area.x_to_px(bar.end);
                let top = area.y_to_px(bar.count);
                BarRect { x: x0, y: top, width: (x1 - x0).max(1.0), height: baseline - top }
            })
            .collect();

        let x_ticks = x
            .ticks(TICK_COUNT)
            .into_iter()
            .map(|v| AxisTick { position: area.x_to_px(v), label: format!("{:.1}", v) })
            .collect();
        let y_ticks = y
            .ticks(TICK_COUNT)
            .into_iter()
            .map(|v| AxisTick { position: area.y_to_px(v), label: format!("{:.0}", v) })
            .collect();

        Self { canvas_width, canvas_height, area, bars: rects, x_ticks, y_ticks }
    }
}

/// Immutable result of one render: the drawn geometry and its inverse mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSnapshot {
    geometry: ChartGeometry,
}

impl ChartSnapshot {
    pub fn new(geometry: ChartGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &ChartGeometry {
        &self.geometry
    }

    /// Converts a logical canvas coordinate into a data-space point.
    pub fn invert(&self, logical_x: f64, logical_y: f64) -> Option<DomainPoint> {
        self.geometry.area.invert(logical_x, logical_y)
    }
}
