use leptos::*;

use crate::application::controls::add_button_label;
use crate::application::surface::Slot;
use crate::config::VizConfig;
use crate::presentation::ControlId;

/// Static page layout: two charts, their stats panels and the control panel.
#[component]
pub fn SketchPage(config: VizConfig) -> impl IntoView {
    let bin_size = config.bin_size;
    let sample_count = config.sample_count;
    let bin_limit = config.bin_limit;

    view! {
        <style>
            {r#"
            .sketch-page { font-family: sans-serif; margin: 20px; }
            .sketch-charts { display: flex; gap: 20px; }
            .sketch-panel { flex: 1; }
            .sketch-controls label { margin-right: 10px; }
            #status { cursor: pointer; color: #607d8b; }
            "#}
        </style>
        <div class="sketch-page">
            <div class="sketch-charts">
                <div class="sketch-panel">
                    <h3>"Input samples"</h3>
                    <canvas
                        id={config.input_canvas_id.clone()}
                        width={config.canvas_width}
                        height={config.canvas_height}
                    />
                    <div id={Slot::InputStats.id()}></div>
                </div>
                <div class="sketch-panel">
                    <h3>"DDSketch bins"</h3>
                    <canvas
                        id={config.output_canvas_id.clone()}
                        width={config.canvas_width}
                        height={config.canvas_height}
                    />
                    <div id={Slot::OutputStats.id()}></div>
                </div>
            </div>
            <div class="sketch-controls">
                <div id={Slot::Coord.id()}></div>
                <label>
                    "Histogram bins: "
                    <input
                        id={ControlId::BinSize.id()}
                        type="range"
                        min={bin_size.min}
                        max={bin_size.max}
                        value={bin_size.initial}
                    />
                    <span id={Slot::BinSizeLabel.id()}>{bin_size.initial}</span>
                </label>
                <label>
                    "Samples: "
                    <input
                        id={ControlId::SampleCount.id()}
                        type="number"
                        min={sample_count.min}
                        max={sample_count.max}
                        value={sample_count.initial}
                    />
                    <input id={Slot::AddButton.id()} type="button" value={add_button_label(sample_count.initial)}/>
                </label>
                <label>
                    "Sketch bin limit: "
                    <input
                        id={ControlId::BinLimit.id()}
                        type="range"
                        min={bin_limit.min}
                        max={bin_limit.max}
                        value={bin_limit.initial}
                    />
                    <span id={Slot::BinLimitLabel.id()}>{bin_limit.initial}</span>
                </label>
                <div id={Slot::Status.id()}></div>
            </div>
        </div>
    }
}
