use ddsketch_viz_wasm::domain::chart::{ChartGeometry, ChartSnapshot, PlotLayout};
use ddsketch_viz_wasm::domain::sketch::HistogramBar;
use ddsketch_viz_wasm::domain::stats::{InputStats, OutputStats};

fn two_bars() -> Vec<HistogramBar> {
    vec![
        HistogramBar { start: 0.0, end: 0.5, count: 4.0 },
        HistogramBar { start: 0.5, end: 1.0, count: 2.0 },
    ]
}

#[test]
fn output_geometry_snapshot() {
    let geometry = ChartGeometry::histogram(&two_bars(), 600.0, 400.0, &PlotLayout::OUTPUT);
    let json = serde_json::to_string_pretty(&serde_json::json!({
        "area": geometry.area,
        "bars": geometry.bars,
    }))
    .unwrap();
    insta::assert_snapshot!("output_geometry", json);
}

#[test]
fn tick_labels_span_both_axes() {
    let geometry = ChartGeometry::histogram(&two_bars(), 600.0, 400.0, &PlotLayout::OUTPUT);

    let x_labels: Vec<&str> = geometry.x_ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(x_labels.len(), 10);
    assert_eq!(x_labels.first(), Some(&"0.0"));
    assert_eq!(x_labels.last(), Some(&"1.0"));

    let y_labels: Vec<&str> = geometry.y_ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(y_labels.first(), Some(&"0"));
    assert_eq!(y_labels.last(), Some(&"4"));
}

#[test]
fn snapshot_inverts_bar_tops_back_to_counts() {
    let snapshot = ChartSnapshot::new(ChartGeometry::histogram(&two_bars(), 600.0, 400.0, &PlotLayout::OUTPUT));
    let bar = snapshot.geometry().bars[1];

    let point = snapshot.invert(bar.x + bar.width / 2.0, bar.y).unwrap();
    assert!((point.x - 0.75).abs() < 1e-9);
    assert!((point.y - 2.0).abs() < 1e-9);

    assert!(snapshot.invert(0.0, 0.0).is_none());
    assert!(snapshot.invert(599.0, 399.0).is_none());
}

#[test]
fn stats_snapshot() {
    let input = InputStats { value_count: 10, in_memory_size: 80 };
    let output = OutputStats { bin_count: 10, in_memory_size: 120, p50: 0.025, p90: 0.1, p99: 0.5 };
    let json = serde_json::to_string_pretty(&(input, output)).unwrap();
    insta::assert_snapshot!("stats", json);

    let markup = format!("{}\n{}", input.summary(), output.to_markup());
    insta::assert_snapshot!("stats_markup", markup);
}
