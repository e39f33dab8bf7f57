use crate::domain::chart::{CanvasKind, ChartSnapshot};

/// Pointer position as reported by the browser, plus the canvas geometry needed to rescale it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Offset from the canvas' top-left corner, in CSS pixels.
    pub offset_x: f64,
    pub offset_y: f64,
    /// Backing-store resolution (`canvas.width` / `canvas.height`).
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Rendered box size from `getBoundingClientRect`.
    pub rect_width: f64,
    pub rect_height: f64,
}

impl PointerSample {
    /// Offset rescaled into backing-store pixels.
    pub fn to_logical(&self) -> (f64, f64) {
        (
            rescale(self.offset_x, self.canvas_width, self.rect_width),
            rescale(self.offset_y, self.canvas_height, self.rect_height),
        )
    }
}

fn rescale(offset: f64, logical_extent: f64, displayed_extent: f64) -> f64 {
    if displayed_extent == 0.0 {
        return offset;
    }
    offset * logical_extent / displayed_extent
}

/// What the coordinate label should do after a pointer move.
#[derive(Debug, Clone, PartialEq)]
pub enum Readout {
    /// Leave whatever is displayed.
    Unchanged,
    Clear,
    Show(String),
}

impl Readout {
    pub fn text(&self) -> Option<&str> {
        match self {
            Readout::Unchanged => None,
            Readout::Clear => Some(""),
            Readout::Show(text) => Some(text),
        }
    }
}

/// Translates a pointer move over `target` into readout text using that canvas' latest snapshot.
pub fn translate(target: Option<CanvasKind>, sample: &PointerSample, snapshot: Option<&ChartSnapshot>) -> Readout {
    let Some(kind) = target else {
        return Readout::Clear;
    };
    let Some(snapshot) = snapshot else {
        return Readout::Unchanged;
    };

    let (x, y) = sample.to_logical();
    match snapshot.invert(x, y) {
        Some(point) => Readout::Show(format!("{}: ({:.2}, {:.2})", kind, point.x, point.y)),
        None => Readout::Clear,
    }
}
