mod common;

use common::{EngineCall, engine, layout, new_session, started_session};
use ddsketch_viz_wasm::application::coords::PointerSample;
use ddsketch_viz_wasm::application::session::LOADED_STATUS;
use ddsketch_viz_wasm::application::surface::Slot;
use ddsketch_viz_wasm::application::ControlEvent;
use ddsketch_viz_wasm::config::VizConfig;
use ddsketch_viz_wasm::domain::chart::CanvasKind;
use ddsketch_viz_wasm::domain::VizError;

fn redraw_calls(bin_size: u32) -> [EngineCall; 4] {
    [
        EngineCall::InputStats,
        EngineCall::OutputStats,
        EngineCall::RenderInput(bin_size),
        EngineCall::RenderOutput,
    ]
}

fn identity_sample(x: f64, y: f64) -> PointerSample {
    PointerSample {
        offset_x: x,
        offset_y: y,
        canvas_width: common::CANVAS_WIDTH,
        canvas_height: common::CANVAS_HEIGHT,
        rect_width: common::CANVAS_WIDTH,
        rect_height: common::CANVAS_HEIGHT,
    }
}

#[test]
fn status_reads_loaded_before_start() {
    let session = new_session(&VizConfig::default());
    assert!(!session.is_ready());
    assert_eq!(session.surface().text(Slot::Status), Some(LOADED_STATUS));
}

#[test]
fn events_before_start_do_nothing() {
    let mut session = new_session(&VizConfig::default());

    session.handle_control(ControlEvent::AddSamplesClicked).unwrap();
    session.handle_control(ControlEvent::RefreshRequested).unwrap();
    session.handle_pointer(Some(CanvasKind::Output), &identity_sample(300.0, 200.0));

    assert_eq!(session.frames_rendered(), 0);
    assert_eq!(session.surface().text(Slot::Coord), None);
    assert_eq!(session.surface().statuses, [LOADED_STATUS]);
}

#[test]
fn start_sizes_both_canvases_then_renders_once() {
    let session = started_session(&VizConfig::default(), 1);

    let sizes = &session.surface().canvas_sizes;
    assert_eq!(sizes.len(), 2);
    for view in sizes {
        assert_eq!(view.css.width, 600.0);
        assert_eq!(view.css.height, 400.0);
        assert_eq!(view.backing, view.css);
    }

    assert_eq!(session.frames_rendered(), 1);
    assert_eq!(engine(&session).calls(), redraw_calls(50));
    assert_eq!(session.surface().statuses, [LOADED_STATUS, "Rendering...", "Rendered in 3ms"]);
    assert_eq!(session.surface().text(Slot::InputStats), Some("Value count: 0, in-memory size: 0"));
}

#[test]
fn initial_controls_push_limit_and_redraw_once() {
    let mut session = started_session(&VizConfig::default(), 1);
    engine(&session).clear_calls();

    session.apply_initial_controls().unwrap();

    let mut expected = vec![EngineCall::SetBinLimit(4096)];
    expected.extend(redraw_calls(50));
    assert_eq!(engine(&session).calls(), expected);
    assert_eq!(session.surface().text(Slot::BinLimitLabel), Some("4096"));
    assert_eq!(session.surface().text(Slot::BinSizeLabel), Some("50"));
    assert_eq!(session.surface().buttons.get(&Slot::AddButton).map(String::as_str), Some("Add 100"));
}

#[test]
fn bin_limit_change_pushes_once_then_redraws_once() {
    let mut session = started_session(&VizConfig::default(), 7);
    session.handle_control(ControlEvent::AddSamplesClicked).unwrap();
    engine(&session).clear_calls();
    let frames = session.frames_rendered();

    session.handle_control(ControlEvent::BinLimitChanged(10)).unwrap();

    let mut expected = vec![EngineCall::SetBinLimit(10)];
    expected.extend(redraw_calls(50));
    assert_eq!(engine(&session).calls(), expected);
    assert_eq!(session.frames_rendered(), frames + 1);
    assert_eq!(session.surface().text(Slot::BinLimitLabel), Some("10"));
    assert!(engine(&session).model().sketch().bin_count() <= 10);
}

#[test]
fn add_button_ingests_exactly_the_selected_count() {
    let mut session = started_session(&VizConfig::default(), 3);
    engine(&session).clear_calls();

    session.handle_control(ControlEvent::SampleCountChanged(5)).unwrap();
    assert!(engine(&session).calls().is_empty());
    assert_eq!(session.surface().buttons.get(&Slot::AddButton).map(String::as_str), Some("Add 5"));

    session.handle_control(ControlEvent::AddSamplesClicked).unwrap();

    let mut expected = vec![EngineCall::Sample(5)];
    expected.extend(redraw_calls(50));
    assert_eq!(engine(&session).calls(), expected);
    assert_eq!(engine(&session).count(EngineCall::SetBinLimit(4096)), 0);
    assert_eq!(engine(&session).model().samples().len(), 5);
}

#[test]
fn bin_size_change_redraws_with_new_bucket_count() {
    let mut session = started_session(&VizConfig::default(), 3);
    engine(&session).clear_calls();

    session.handle_control(ControlEvent::BinSizeChanged(12)).unwrap();

    assert_eq!(engine(&session).calls(), redraw_calls(12));
    assert_eq!(session.surface().text(Slot::BinSizeLabel), Some("12"));
}

#[test]
fn ten_single_sample_clicks_under_a_small_limit() {
    let mut session = started_session(&VizConfig::default(), 42);

    session.handle_control(ControlEvent::SampleCountChanged(1)).unwrap();
    session.handle_control(ControlEvent::BinLimitChanged(10)).unwrap();
    session.handle_control(ControlEvent::BinSizeChanged(5)).unwrap();
    for _ in 0..10 {
        session.handle_control(ControlEvent::AddSamplesClicked).unwrap();
    }

    let engine = engine(&session);
    let input = engine.model().input_stats();
    let output = engine.model().output_stats();
    assert_eq!(input.value_count, 10);
    assert!(output.bin_count <= 10);
    for p in [output.p50, output.p90, output.p99] {
        assert!(p.is_finite());
        assert!(p > 0.015 && p < 1.0, "percentile {p} outside the sampled range");
    }
    assert_eq!(session.surface().text(Slot::InputStats), Some("Value count: 10, in-memory size: 80"));
    assert_eq!(engine.count(EngineCall::Sample(1)), 10);
}

#[test]
fn pointer_inside_output_plot_shows_labelled_coordinates() {
    let mut session = started_session(&VizConfig::default(), 5);
    session.handle_control(ControlEvent::AddSamplesClicked).unwrap();

    let area = session.snapshot(CanvasKind::Output).unwrap().geometry().area;
    session.handle_pointer(
        Some(CanvasKind::Output),
        &identity_sample(area.left + area.width / 2.0, area.top + area.height / 2.0),
    );

    let text = session.surface().text(Slot::Coord).unwrap();
    let inner = text.strip_prefix("output: (").and_then(|t| t.strip_suffix(')')).unwrap();
    let numbers: Vec<&str> = inner.split(", ").collect();
    assert_eq!(numbers.len(), 2, "{text}");
    for n in numbers {
        let (_, decimals) = n.split_once('.').unwrap();
        assert_eq!(decimals.len(), 2, "{text}");
        assert!(n.parse::<f64>().unwrap().is_finite());
    }
}

#[test]
fn pointer_outside_plot_or_canvas_clears_readout() {
    let mut session = started_session(&VizConfig::default(), 5);
    session.handle_pointer(Some(CanvasKind::Input), &identity_sample(300.0, 100.0));
    assert!(session.surface().text(Slot::Coord).unwrap().starts_with("input: ("));

    session.handle_pointer(Some(CanvasKind::Output), &identity_sample(1.0, 1.0));
    assert_eq!(session.surface().text(Slot::Coord), Some(""));

    session.handle_pointer(Some(CanvasKind::Input), &identity_sample(300.0, 100.0));
    session.handle_pointer(None, &identity_sample(300.0, 100.0));
    assert_eq!(session.surface().text(Slot::Coord), Some(""));
}

#[test]
fn pointer_never_renders() {
    let mut session = started_session(&VizConfig::default(), 5);
    engine(&session).clear_calls();

    session.handle_pointer(Some(CanvasKind::Input), &identity_sample(300.0, 100.0));

    assert!(engine(&session).calls().is_empty());
    assert_eq!(session.frames_rendered(), 1);
}

#[test]
fn render_failures_propagate_and_can_be_reported() {
    let mut session = new_session(&VizConfig::default());
    let err = session
        .start(
            |_| {
                let mut engine = common::RecordingEngine::new(1);
                engine.fail_renders = true;
                Ok(engine)
            },
            &layout(750.0),
        )
        .unwrap_err();
    assert_eq!(err, VizError::Rendering("canvas lost".into()));

    session.report_error(&err);
    assert_eq!(session.surface().text(Slot::Status), Some("Render failed: Rendering Error: canvas lost"));
}

#[test]
fn engine_factory_errors_leave_session_not_ready() {
    let mut session = new_session(&VizConfig::default());
    let err = session
        .start(|_| Err::<common::RecordingEngine, _>(VizError::Dom("canvas #input_canvas not found".into())), &layout(750.0))
        .unwrap_err();

    assert!(matches!(err, VizError::Dom(_)));
    assert!(!session.is_ready());
    assert!(session.surface().canvas_sizes.is_empty());
}

#[test]
fn resize_is_idempotent_and_keeps_aspect_ratio() {
    let mut session = started_session(&VizConfig::default(), 1);

    session.resize(&layout(1000.0));
    let first = *session.view(CanvasKind::Input);
    session.resize(&layout(1000.0));
    let second = *session.view(CanvasKind::Input);

    assert_eq!(first, second);
    assert_eq!(first.css.width, 800.0);
    assert!((first.css.height - 800.0 / 1.5).abs() < 1e-9);
    assert_eq!(first.backing, first.css);
}

#[test]
fn resize_redraws_and_rescales_readout() {
    let mut session = started_session(&VizConfig::default(), 5);
    session.handle_control(ControlEvent::AddSamplesClicked).unwrap();
    engine(&session).clear_calls();
    let frames = session.frames_rendered();

    session.handle_resize(&layout(1000.0)).unwrap();

    assert_eq!(engine(&session).calls(), redraw_calls(50));
    assert_eq!(session.frames_rendered(), frames + 1);
    let area = session.snapshot(CanvasKind::Output).unwrap().geometry().area;
    assert!((area.left + area.width - 795.0).abs() < 1e-9);

    let view = *session.view(CanvasKind::Output);
    let sample = PointerSample {
        offset_x: 780.0,
        offset_y: 200.0,
        canvas_width: view.backing.width,
        canvas_height: view.backing.height,
        rect_width: view.css.width,
        rect_height: view.css.height,
    };
    session.handle_pointer(Some(CanvasKind::Output), &sample);
    assert!(session.surface().text(Slot::Coord).unwrap().starts_with("output: ("));
}

#[test]
fn canvas_ids_come_from_config() {
    let config = VizConfig::from_json(r#"{"input_canvas_id": "raw", "output_canvas_id": "sketch"}"#).unwrap();
    let mut seen = None;
    let mut session = new_session(&config);
    session
        .start(
            |ids| {
                seen = Some(ids.clone());
                Ok(common::RecordingEngine::new(1))
            },
            &layout(750.0),
        )
        .unwrap();

    let ids = seen.unwrap();
    assert_eq!((ids.input.as_str(), ids.output.as_str()), ("raw", "sketch"));
    assert_eq!(session.canvas_ids(), &ids);
}
