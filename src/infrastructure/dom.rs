//! Browser-backed display surface and host measurements.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement, HtmlElement, HtmlInputElement};

use crate::application::sizing::{CanvasView, HostLayout};
use crate::application::surface::{DisplaySurface, Slot};
use crate::domain::chart::CanvasKind;
use crate::domain::{CanvasIds, VizError, VizResult};
use crate::domain::logging::LogComponent;
use crate::{log_trace, log_warn};

/// Writes controller output straight into the page. Missing elements are logged and skipped.
pub struct DomSurface {
    canvas_ids: CanvasIds,
}

impl DomSurface {
    pub fn new(canvas_ids: CanvasIds) -> Self {
        Self { canvas_ids }
    }

    fn element(&self, id: &str) -> Option<Element> {
        let element = gloo::utils::document().get_element_by_id(id);
        if element.is_none() {
            log_warn!(LogComponent::Infrastructure("DomSurface"), "element '{}' not found in DOM", id);
        }
        element
    }

    fn canvas(&self, kind: CanvasKind) -> Option<HtmlCanvasElement> {
        let id = self.canvas_ids.get(kind);
        self.element(id)?.dyn_into::<HtmlCanvasElement>().ok()
    }

    /// Samples both canvases' parent widths and the pixel ratio.
    pub fn host_layout(&self) -> VizResult<HostLayout> {
        Ok(HostLayout {
            input_parent_width: self.parent_width(CanvasKind::Input)?,
            output_parent_width: self.parent_width(CanvasKind::Output)?,
            device_pixel_ratio: gloo::utils::window().device_pixel_ratio(),
        })
    }

    fn parent_width(&self, kind: CanvasKind) -> VizResult<f64> {
        let id = self.canvas_ids.get(kind);
        let parent = self
            .canvas(kind)
            .and_then(|canvas| canvas.parent_element())
            .and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| VizError::Dom(format!("canvas #{id} has no parent element")))?;
        Ok(f64::from(parent.offset_width()))
    }

    /// Which managed canvas, if any, an event target is.
    pub fn canvas_kind_of(&self, target: Option<&Element>) -> Option<CanvasKind> {
        let id = target?.id();
        if id == self.canvas_ids.input {
            Some(CanvasKind::Input)
        } else if id == self.canvas_ids.output {
            Some(CanvasKind::Output)
        } else {
            None
        }
    }
}

impl DisplaySurface for DomSurface {
    fn set_text(&mut self, slot: Slot, text: &str) {
        if let Some(element) = self.element(slot.as_ref()) {
            element.set_text_content(Some(text));
        }
    }

    fn set_markup(&mut self, slot: Slot, markup: &str) {
        if let Some(element) = self.element(slot.as_ref()) {
            element.set_inner_html(markup);
        }
    }

    fn set_button_label(&mut self, slot: Slot, label: &str) {
        match self.element(slot.as_ref()).map(|e| e.dyn_into::<HtmlInputElement>()) {
            Some(Ok(button)) => button.set_value(label),
            Some(Err(element)) => element.set_text_content(Some(label)),
            None => {}
        }
    }

    fn apply_canvas_size(&mut self, view: &CanvasView) {
        let Some(canvas) = self.canvas(view.kind) else {
            return;
        };

        let style = canvas.style();
        if style.set_property("width", &format!("{}px", view.css.width)).is_err()
            || style.set_property("height", &format!("{}px", view.css.height)).is_err()
        {
            log_warn!(LogComponent::Infrastructure("DomSurface"), "could not style {} canvas", view.kind);
        }

        canvas.set_width(view.backing.width as u32);
        canvas.set_height(view.backing.height as u32);

        log_trace!(
            LogComponent::Infrastructure("DomSurface"),
            "{} canvas -> {}x{} css, {}x{} backing",
            view.kind,
            view.css.width,
            view.css.height,
            canvas.width(),
            canvas.height()
        );
    }
}
