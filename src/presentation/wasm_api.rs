use std::cell::RefCell;
use std::rc::Rc;

use leptos::{mount_to_body, view};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlCanvasElement, HtmlInputElement, MouseEvent};

use crate::application::coords::PointerSample;
use crate::application::{ControlEvent, SessionController};
use crate::application::surface::Slot;
use crate::config::VizConfig;
use crate::domain::logging::LogComponent;
use crate::domain::{VizError, VizResult};
use crate::event_utils::{EventListenerHandle, event_listener, fractional_property, window_event_listener};
use crate::infrastructure::{CanvasSketchEngine, DomSurface, PerformanceClock};
use crate::presentation::{ControlId, SketchPage};
use crate::{log_debug, log_info, log_warn};

type BrowserSession = SessionController<CanvasSketchEngine, DomSurface, PerformanceClock>;
type SharedSession = Rc<RefCell<BrowserSession>>;

/// A running visualizer. Dropping it, or calling `teardown`, detaches every listener.
#[wasm_bindgen]
pub struct SketchApp {
    session: SharedSession,
    listeners: Vec<EventListenerHandle>,
}

#[wasm_bindgen]
impl SketchApp {
    pub fn teardown(&mut self) {
        let count = self.listeners.len();
        self.listeners.clear();
        log_info!(LogComponent::Presentation("SketchApp"), "detached {} listeners", count);
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.session.try_borrow().map(|s| s.is_ready()).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = framesRendered)]
    pub fn frames_rendered(&self) -> f64 {
        self.session.try_borrow().map(|s| s.frames_rendered() as f64).unwrap_or(0.0)
    }

    /// Forces a full redraw, like clicking the status line.
    pub fn refresh(&self) -> Result<(), JsValue> {
        let mut session = self
            .session
            .try_borrow_mut()
            .map_err(|_| VizError::Engine("session is busy".into()))?;
        session.handle_control(ControlEvent::RefreshRequested)?;
        Ok(())
    }
}

/// Mounts the page (unless the host already provides it), starts the session and wires the listeners.
#[wasm_bindgen]
pub fn start(config_json: Option<String>) -> Result<SketchApp, JsValue> {
    let config = match config_json.as_deref() {
        Some(json) => VizConfig::from_json(json)?,
        None => VizConfig::default(),
    };
    mount_page(&config);

    let ids = config.canvas_ids();
    let surface = DomSurface::new(ids.clone());
    let layout = surface.host_layout()?;

    let mut controller = SessionController::new(&config, surface, PerformanceClock::new());
    controller.start(|ids| Ok(CanvasSketchEngine::from_entropy(ids)), &layout)?;

    let session = Rc::new(RefCell::new(controller));
    let listeners = attach_listeners(&session)?;

    dispatch(&session, "initial controls", |s| s.apply_initial_controls());

    log_info!(
        LogComponent::Presentation("SketchApp"),
        "sketch visualizer started with {} listeners",
        listeners.len()
    );
    Ok(SketchApp { session, listeners })
}

fn mount_page(config: &VizConfig) {
    if gloo::utils::document().get_element_by_id(&config.input_canvas_id).is_some() {
        log_debug!(LogComponent::Presentation("SketchApp"), "host page already provides the markup");
        return;
    }
    let config = config.clone();
    mount_to_body(move || view! { <SketchPage config=config/> });
}

/// Runs `f` against the session. Busy sessions skip the event; failures land on the status line.
fn dispatch(session: &SharedSession, what: &str, f: impl FnOnce(&mut BrowserSession) -> VizResult<()>) {
    let Ok(mut session) = session.try_borrow_mut() else {
        log_warn!(LogComponent::Presentation("SketchApp"), "{} skipped: session busy", what);
        return;
    };
    if let Err(err) = f(&mut session) {
        session.report_error(&err);
    }
}

fn input_element(id: &str) -> VizResult<HtmlInputElement> {
    gloo::utils::document()
        .get_element_by_id(id)
        .ok_or_else(|| VizError::Dom(format!("control #{id} not found")))?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| VizError::Dom(format!("#{id} is not an input")))
}

fn page_element(id: &str) -> VizResult<Element> {
    gloo::utils::document()
        .get_element_by_id(id)
        .ok_or_else(|| VizError::Dom(format!("element #{id} not found")))
}

fn attach_listeners(session: &SharedSession) -> VizResult<Vec<EventListenerHandle>> {
    let mut listeners = Vec::new();

    let s = session.clone();
    listeners.push(window_event_listener(leptos::ev::resize, move |_| {
        dispatch(&s, "resize", |s| {
            let layout = s.surface().host_layout()?;
            s.handle_resize(&layout)
        });
    }));

    let s = session.clone();
    listeners.push(window_event_listener(leptos::ev::mousemove, move |ev: MouseEvent| {
        dispatch(&s, "pointer", |s| {
            let target = ev.target().and_then(|t| t.dyn_into::<Element>().ok());
            let kind = s.surface().canvas_kind_of(target.as_ref());
            let sample = target
                .and_then(|t| t.dyn_into::<HtmlCanvasElement>().ok())
                .map(|canvas| pointer_sample(&ev, &canvas))
                .unwrap_or(PointerSample {
                    offset_x: offset(&ev, "offsetX", ev.offset_x()),
                    offset_y: offset(&ev, "offsetY", ev.offset_y()),
                    canvas_width: 0.0,
                    canvas_height: 0.0,
                    rect_width: 0.0,
                    rect_height: 0.0,
                });
            s.handle_pointer(kind, &sample);
            Ok(())
        });
    }));

    for control in [ControlId::BinSize, ControlId::SampleCount, ControlId::BinLimit] {
        let element = input_element(control.id())?;
        listeners.push(control_listener(session, &element, control, leptos::ev::change));
        listeners.push(control_listener(session, &element, control, leptos::ev::input));
    }

    let s = session.clone();
    listeners.push(event_listener(page_element(Slot::Status.id())?.as_ref(), leptos::ev::click, move |_| {
        dispatch(&s, "refresh", |s| s.handle_control(ControlEvent::RefreshRequested));
    }));

    let s = session.clone();
    listeners.push(event_listener(page_element(Slot::AddButton.id())?.as_ref(), leptos::ev::click, move |_| {
        dispatch(&s, "add samples", |s| s.handle_control(ControlEvent::AddSamplesClicked));
    }));

    Ok(listeners)
}

fn control_listener<E>(
    session: &SharedSession,
    element: &HtmlInputElement,
    control: ControlId,
    event: E,
) -> EventListenerHandle
where
    E: leptos::ev::EventDescriptor + 'static,
    E::EventType: JsCast,
{
    let s = session.clone();
    let input = element.clone();
    event_listener(element.as_ref(), event, move |_| {
        let Some(event) = control.parse_event(&input.value()) else {
            log_warn!(
                LogComponent::Presentation("SketchApp"),
                "ignoring value '{}' of #{}",
                input.value(),
                control.id()
            );
            return;
        };
        dispatch(&s, control.id(), |s| s.handle_control(event));
    })
}

fn pointer_sample(ev: &MouseEvent, canvas: &HtmlCanvasElement) -> PointerSample {
    let rect = canvas.get_bounding_client_rect();
    PointerSample {
        offset_x: offset(ev, "offsetX", ev.offset_x()),
        offset_y: offset(ev, "offsetY", ev.offset_y()),
        canvas_width: f64::from(canvas.width()),
        canvas_height: f64::from(canvas.height()),
        rect_width: rect.width(),
        rect_height: rect.height(),
    }
}

fn offset(ev: &MouseEvent, key: &str, truncated: i32) -> f64 {
    fractional_property(ev.as_ref(), key).unwrap_or_else(|| f64::from(truncated))
}
