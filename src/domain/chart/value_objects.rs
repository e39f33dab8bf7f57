use derive_more::Display;
use serde::Serialize;
use strum::{AsRefStr, EnumIter};

/// Value Object - the two managed canvases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr)]
pub enum CanvasKind {
    #[display(fmt = "input")]
    #[strum(serialize = "input")]
    Input,
    #[display(fmt = "output")]
    #[strum(serialize = "output")]
    Output,
}

/// Value Object - a point in data space (seconds, observations)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DomainPoint {
    pub x: f64,
    pub y: f64,
}

/// Value Object - closed interval along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Evenly spaced tick values from `min` to `max` inclusive.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if count < 2 {
            return vec![self.min];
        }
        let step = self.span() / (count - 1) as f64;
        (0..count).map(|i| self.min + step * i as f64).collect()
    }
}

impl Default for AxisRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Value Object - space reserved around the plotted region, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotLayout {
    pub margin: f64,
    pub left_label_area: f64,
    pub bottom_label_area: f64,
    /// Multiplier applied to the tallest bar to leave room above it.
    pub headroom: f64,
}

impl PlotLayout {
    pub const INPUT: PlotLayout =
        PlotLayout { margin: 0.0, left_label_area: 60.0, bottom_label_area: 60.0, headroom: 1.1 };
    pub const OUTPUT: PlotLayout =
        PlotLayout { margin: 5.0, left_label_area: 60.0, bottom_label_area: 60.0, headroom: 1.0 };
}
