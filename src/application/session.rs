use crate::application::controls::{self, ControlEvent, ControlState, Effect, Label};
use crate::application::coords::{self, PointerSample};
use crate::application::scheduler::{Clock, RenderScheduler};
use crate::application::sizing::{CanvasSizer, CanvasView, HostLayout, SizingPolicy};
use crate::application::surface::{DisplaySurface, Slot};
use crate::config::VizConfig;
use crate::log_error;
use crate::domain::chart::{CanvasKind, ChartSnapshot};
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::{CanvasIds, SketchEngine, VizError, VizResult};

pub const LOADED_STATUS: &str = "WebAssembly loaded!";

/// Owns the sketch handle and every piece of session state.
///
/// Handlers run to completion one at a time; anything that needs the engine
/// is a no-op until [`SessionController::start`] has created it.
pub struct SessionController<E, S, C> {
    canvas_ids: CanvasIds,
    engine: Option<E>,
    surface: S,
    scheduler: RenderScheduler<C>,
    sizer: CanvasSizer,
    controls: ControlState,
    input_chart: Option<ChartSnapshot>,
    output_chart: Option<ChartSnapshot>,
}

impl<E, S, C> SessionController<E, S, C>
where
    E: SketchEngine,
    S: DisplaySurface,
    C: Clock,
{
    pub fn new(config: &VizConfig, mut surface: S, clock: C) -> Self {
        surface.set_text(Slot::Status, LOADED_STATUS);
        Self {
            canvas_ids: config.canvas_ids(),
            engine: None,
            surface,
            scheduler: RenderScheduler::new(clock),
            sizer: CanvasSizer::new(
                SizingPolicy::from_config(config),
                f64::from(config.canvas_width),
                f64::from(config.canvas_height),
            ),
            controls: ControlState::from_config(config),
            input_chart: None,
            output_chart: None,
        }
    }

    /// Creates the sketch handle, sizes both canvases and renders the first frame.
    pub fn start<F>(&mut self, create_engine: F, layout: &HostLayout) -> VizResult<()>
    where
        F: FnOnce(&CanvasIds) -> VizResult<E>,
    {
        if self.engine.is_some() {
            get_logger().warn(LogComponent::Application("Session"), "session already started");
            return Ok(());
        }

        self.engine = Some(create_engine(&self.canvas_ids)?);
        self.resize(layout);
        self.redraw()?;

        get_logger().info(
            LogComponent::Application("Session"),
            &format!("session started on #{} / #{}", self.canvas_ids.input, self.canvas_ids.output),
        );
        Ok(())
    }

    /// Applies every control's starting value once, so labels and sketch match the panel.
    pub fn apply_initial_controls(&mut self) -> VizResult<()> {
        for effect in controls::initial_effects(&self.controls) {
            self.run_effect(effect)?;
        }
        Ok(())
    }

    pub fn handle_control(&mut self, event: ControlEvent) -> VizResult<()> {
        let (next, effects) = controls::handle(self.controls, event);
        self.controls = next;
        for effect in effects {
            self.run_effect(effect)?;
        }
        Ok(())
    }

    /// Updates the coordinate readout. Never renders.
    pub fn handle_pointer(&mut self, target: Option<CanvasKind>, sample: &PointerSample) {
        if self.engine.is_none() {
            return;
        }

        let snapshot = target.and_then(|kind| self.snapshot(kind));
        let readout = coords::translate(target, sample, snapshot);
        if let Some(text) = readout.text() {
            self.surface.set_text(Slot::Coord, text);
        }
    }

    /// Re-fits both canvases to their parents.
    pub fn resize(&mut self, layout: &HostLayout) {
        for view in self.sizer.resize_all(layout) {
            self.surface.apply_canvas_size(&view);
        }
    }

    /// Window resize: re-fit both canvases and redraw at the new backing size.
    pub fn handle_resize(&mut self, layout: &HostLayout) -> VizResult<()> {
        self.resize(layout);
        self.redraw()
    }

    /// Full redraw: stats panels, status line and both charts.
    pub fn redraw(&mut self) -> VizResult<()> {
        if let Some(frame) = self.scheduler.redraw(self.engine.as_mut(), self.controls.bin_size, &mut self.surface)? {
            self.input_chart = Some(frame.input);
            self.output_chart = Some(frame.output);
        }
        Ok(())
    }

    /// Surfaces a failure that has no caller to return to.
    pub fn report_error(&mut self, error: &VizError) {
        log_error!(LogComponent::Application("Session"), "{}", error);
        self.surface.set_text(Slot::Status, &format!("Render failed: {error}"));
    }

    fn run_effect(&mut self, effect: Effect) -> VizResult<()> {
        match effect {
            Effect::SetLabel(Label::AddButton, text) => self.surface.set_button_label(Slot::AddButton, &text),
            Effect::SetLabel(label, text) => self.surface.set_text(label.into(), &text),
            Effect::Sample(count) => {
                if let Some(engine) = self.engine.as_mut() {
                    engine.sample(count)?;
                }
            }
            Effect::PushBinLimit(limit) => {
                if let Some(engine) = self.engine.as_mut() {
                    engine.set_bin_limit(limit)?;
                }
            }
            Effect::Redraw => self.redraw()?,
        }
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    pub fn canvas_ids(&self) -> &CanvasIds {
        &self.canvas_ids
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn view(&self, kind: CanvasKind) -> &CanvasView {
        self.sizer.view(kind)
    }

    pub fn snapshot(&self, kind: CanvasKind) -> Option<&ChartSnapshot> {
        match kind {
            CanvasKind::Input => self.input_chart.as_ref(),
            CanvasKind::Output => self.output_chart.as_ref(),
        }
    }

    pub fn frames_rendered(&self) -> u64 {
        self.scheduler.frames()
    }
}
