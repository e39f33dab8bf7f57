#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use ddsketch_viz_wasm::application::scheduler::Clock;
use ddsketch_viz_wasm::application::sizing::{CanvasSize, CanvasView, HostLayout};
use ddsketch_viz_wasm::application::surface::{DisplaySurface, Slot};
use ddsketch_viz_wasm::application::SessionController;
use ddsketch_viz_wasm::config::VizConfig;
use ddsketch_viz_wasm::domain::chart::{CanvasKind, ChartGeometry, ChartSnapshot, PlotLayout};
use ddsketch_viz_wasm::domain::sketch::SketchModel;
use ddsketch_viz_wasm::domain::stats::{InputStats, OutputStats};
use ddsketch_viz_wasm::domain::{SketchEngine, VizError, VizResult};

pub const CANVAS_WIDTH: f64 = 600.0;
pub const CANVAS_HEIGHT: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCall {
    Sample(u32),
    SetBinLimit(u16),
    InputStats,
    OutputStats,
    RenderInput(u32),
    RenderOutput,
}

/// Backing-store sizes shared by the fake surface (which writes them) and the fake engine (which draws at them).
pub type Backing = Rc<RefCell<HashMap<CanvasKind, CanvasSize>>>;

fn backing_size(backing: &Backing, kind: CanvasKind) -> CanvasSize {
    backing
        .borrow()
        .get(&kind)
        .copied()
        .unwrap_or(CanvasSize { width: CANVAS_WIDTH, height: CANVAS_HEIGHT })
}

/// Real sample model, fake canvases. Charts are laid out at the backing size, 600x400 until one is applied.
pub struct RecordingEngine {
    model: SketchModel,
    calls: RefCell<Vec<EngineCall>>,
    backing: Backing,
    pub fail_renders: bool,
}

impl RecordingEngine {
    pub fn new(seed: u64) -> Self {
        Self::with_backing(seed, Backing::default())
    }

    pub fn with_backing(seed: u64, backing: Backing) -> Self {
        Self { model: SketchModel::new(seed), calls: RefCell::new(Vec::new()), backing, fail_renders: false }
    }

    pub fn model(&self) -> &SketchModel {
        &self.model
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, call: EngineCall) -> usize {
        self.calls.borrow().iter().filter(|c| **c == call).count()
    }

    fn record(&self, call: EngineCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl SketchEngine for RecordingEngine {
    fn sample(&mut self, count: u32) -> VizResult<()> {
        self.record(EngineCall::Sample(count));
        self.model.sample(count as usize)
    }

    fn set_bin_limit(&mut self, limit: u16) -> VizResult<()> {
        self.record(EngineCall::SetBinLimit(limit));
        self.model.set_bin_limit(limit);
        Ok(())
    }

    fn input_stats(&self) -> InputStats {
        self.record(EngineCall::InputStats);
        self.model.input_stats()
    }

    fn output_stats(&self) -> OutputStats {
        self.record(EngineCall::OutputStats);
        self.model.output_stats()
    }

    fn render_input_chart(&mut self, bin_count: u32) -> VizResult<ChartSnapshot> {
        self.record(EngineCall::RenderInput(bin_count));
        if self.fail_renders {
            return Err(VizError::Rendering("canvas lost".into()));
        }
        let bars = self.model.input_histogram(bin_count);
        let size = backing_size(&self.backing, CanvasKind::Input);
        Ok(ChartSnapshot::new(ChartGeometry::histogram(&bars, size.width, size.height, &PlotLayout::INPUT)))
    }

    fn render_output_chart(&mut self) -> VizResult<ChartSnapshot> {
        self.record(EngineCall::RenderOutput);
        let bars = self.model.output_histogram();
        let size = backing_size(&self.backing, CanvasKind::Output);
        Ok(ChartSnapshot::new(ChartGeometry::histogram(&bars, size.width, size.height, &PlotLayout::OUTPUT)))
    }
}

/// Keeps the latest value written to every slot, plus the status history.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub text: HashMap<Slot, String>,
    pub markup: HashMap<Slot, String>,
    pub buttons: HashMap<Slot, String>,
    pub statuses: Vec<String>,
    pub canvas_sizes: Vec<CanvasView>,
    pub backing: Backing,
}

impl RecordingSurface {
    pub fn text(&self, slot: Slot) -> Option<&str> {
        self.text.get(&slot).map(String::as_str)
    }
}

impl DisplaySurface for RecordingSurface {
    fn set_text(&mut self, slot: Slot, text: &str) {
        if slot == Slot::Status {
            self.statuses.push(text.to_string());
        }
        self.text.insert(slot, text.to_string());
    }

    fn set_markup(&mut self, slot: Slot, markup: &str) {
        self.markup.insert(slot, markup.to_string());
    }

    fn set_button_label(&mut self, slot: Slot, label: &str) {
        self.buttons.insert(slot, label.to_string());
    }

    fn apply_canvas_size(&mut self, view: &CanvasView) {
        self.canvas_sizes.push(*view);
        self.backing.borrow_mut().insert(view.kind, view.backing);
    }
}

/// Advances by a fixed step every time it is read.
pub struct SteppingClock {
    now: Cell<f64>,
    step: f64,
}

impl SteppingClock {
    pub fn new(step: f64) -> Self {
        Self { now: Cell::new(0.0), step }
    }
}

impl Clock for SteppingClock {
    fn now_ms(&self) -> f64 {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

pub type TestSession = SessionController<RecordingEngine, RecordingSurface, SteppingClock>;

pub fn layout(parent_width: f64) -> HostLayout {
    HostLayout { input_parent_width: parent_width, output_parent_width: parent_width, device_pixel_ratio: 2.0 }
}

pub fn new_session(config: &VizConfig) -> TestSession {
    SessionController::new(config, RecordingSurface::default(), SteppingClock::new(2.5))
}

/// A started session whose canvases are fitted to 600x400, the same as their intrinsic size.
pub fn started_session(config: &VizConfig, seed: u64) -> TestSession {
    let mut session = new_session(config);
    let backing = session.surface().backing.clone();
    session
        .start(|_| Ok(RecordingEngine::with_backing(seed, backing)), &layout(750.0))
        .expect("session starts");
    session
}

pub fn engine(session: &TestSession) -> &RecordingEngine {
    session.engine().expect("engine is running")
}
