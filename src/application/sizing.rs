use serde::Serialize;

use crate::config::VizConfig;
use crate::domain::chart::CanvasKind;

/// Width and height in pixels. Fractional values are kept; the DOM truncates when applying them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    fn scaled(self, factor: f64) -> Self {
        Self { width: self.width * factor, height: self.height * factor }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingPolicy {
    pub width_fraction: f64,
    pub scale_by_device_pixel_ratio: bool,
}

impl SizingPolicy {
    pub fn from_config(config: &VizConfig) -> Self {
        Self {
            width_fraction: config.width_fraction,
            scale_by_device_pixel_ratio: config.scale_by_device_pixel_ratio,
        }
    }
}

impl Default for SizingPolicy {
    fn default() -> Self {
        Self { width_fraction: 0.8, scale_by_device_pixel_ratio: false }
    }
}

/// A managed canvas: its fixed aspect ratio and the sizes last applied to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasView {
    pub kind: CanvasKind,
    pub aspect_ratio: f64,
    pub css: CanvasSize,
    pub backing: CanvasSize,
}

impl CanvasView {
    /// Captures the aspect ratio from the canvas' intrinsic size.
    pub fn new(kind: CanvasKind, intrinsic_width: f64, intrinsic_height: f64) -> Self {
        let size = CanvasSize { width: intrinsic_width, height: intrinsic_height };
        Self { kind, aspect_ratio: intrinsic_width / intrinsic_height, css: size, backing: size }
    }

    /// Stretches the canvas to a share of its parent. Calling it again with the same inputs changes nothing.
    pub fn fit(&mut self, parent_width: f64, device_pixel_ratio: f64, policy: &SizingPolicy) {
        let width = parent_width * policy.width_fraction;
        self.css = CanvasSize { width, height: width / self.aspect_ratio };

        let scale = if policy.scale_by_device_pixel_ratio && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        self.backing = self.css.scaled(scale);
    }
}

/// Parent widths and pixel ratio sampled from the host page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostLayout {
    pub input_parent_width: f64,
    pub output_parent_width: f64,
    pub device_pixel_ratio: f64,
}

impl HostLayout {
    pub fn parent_width(&self, kind: CanvasKind) -> f64 {
        match kind {
            CanvasKind::Input => self.input_parent_width,
            CanvasKind::Output => self.output_parent_width,
        }
    }
}

/// Keeps both canvases sized to their containers.
#[derive(Debug, Clone)]
pub struct CanvasSizer {
    policy: SizingPolicy,
    input: CanvasView,
    output: CanvasView,
}

impl CanvasSizer {
    pub fn new(policy: SizingPolicy, intrinsic_width: f64, intrinsic_height: f64) -> Self {
        Self {
            policy,
            input: CanvasView::new(CanvasKind::Input, intrinsic_width, intrinsic_height),
            output: CanvasView::new(CanvasKind::Output, intrinsic_width, intrinsic_height),
        }
    }

    pub fn view(&self, kind: CanvasKind) -> &CanvasView {
        match kind {
            CanvasKind::Input => &self.input,
            CanvasKind::Output => &self.output,
        }
    }

    /// Re-fits both canvases, returning the updated views in input, output order.
    pub fn resize_all(&mut self, layout: &HostLayout) -> [CanvasView; 2] {
        for view in [&mut self.input, &mut self.output] {
            view.fit(layout.parent_width(view.kind), layout.device_pixel_ratio, &self.policy);
        }
        [self.input, self.output]
    }
}
