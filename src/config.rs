use serde::{Deserialize, Serialize};

use crate::domain::{CanvasIds, VizError, VizResult};

/// Declared bounds and starting value of one integer control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ControlRange {
    pub min: u32,
    pub max: u32,
    pub initial: u32,
}

impl ControlRange {
    pub const fn new(min: u32, max: u32, initial: u32) -> Self {
        Self { min, max, initial }
    }

    fn validate(&self, name: &str) -> VizResult<()> {
        if self.min > self.max || self.initial < self.min || self.initial > self.max {
            return Err(VizError::Config(format!(
                "{name}: expected min <= initial <= max, got {}..={} starting at {}",
                self.min, self.max, self.initial
            )));
        }
        Ok(())
    }
}

/// Startup configuration, optionally supplied as JSON by the hosting page.
///
/// Every field has a default, so `{}` is a complete configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VizConfig {
    pub input_canvas_id: String,
    pub output_canvas_id: String,
    /// Intrinsic canvas size; only its aspect ratio survives the first resize.
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Share of the parent's width a canvas is stretched to.
    pub width_fraction: f64,
    /// Multiply the backing store by `devicePixelRatio`. Off keeps CSS and backing sizes equal.
    pub scale_by_device_pixel_ratio: bool,
    pub bin_size: ControlRange,
    pub sample_count: ControlRange,
    pub bin_limit: ControlRange,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            input_canvas_id: "input_canvas".to_string(),
            output_canvas_id: "output_canvas".to_string(),
            canvas_width: 600,
            canvas_height: 400,
            width_fraction: 0.8,
            scale_by_device_pixel_ratio: false,
            bin_size: ControlRange::new(1, 200, 50),
            sample_count: ControlRange::new(1, 10_000, 100),
            bin_limit: ControlRange::new(1, 4096, 4096),
        }
    }
}

impl VizConfig {
    /// Parse and validate; missing fields take their defaults.
    pub fn from_json(json: &str) -> VizResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> VizResult<()> {
        if self.input_canvas_id.is_empty() || self.output_canvas_id.is_empty() {
            return Err(VizError::Config("canvas ids must not be empty".into()));
        }
        if self.input_canvas_id == self.output_canvas_id {
            return Err(VizError::Config("input and output canvases must differ".into()));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(VizError::Config("canvas size must be non-zero".into()));
        }
        if !(self.width_fraction > 0.0 && self.width_fraction <= 1.0) {
            return Err(VizError::Config(format!(
                "width_fraction must be in (0, 1], got {}",
                self.width_fraction
            )));
        }

        self.bin_size.validate("bin_size")?;
        self.sample_count.validate("sample_count")?;
        self.bin_limit.validate("bin_limit")?;

        if self.bin_limit.min == 0 || self.bin_limit.max > u32::from(u16::MAX) {
            return Err(VizError::Config(format!(
                "bin_limit must stay within 1..={}",
                u16::MAX
            )));
        }
        Ok(())
    }

    pub fn canvas_ids(&self) -> CanvasIds {
        CanvasIds { input: self.input_canvas_id.clone(), output: self.output_canvas_id.clone() }
    }

    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.canvas_width) / f64::from(self.canvas_height)
    }
}
