//! Control panel binding as pure `(state, event) -> (state, effects)` handlers.

use smallvec::{SmallVec, smallvec};

use crate::config::VizConfig;

/// Current integer values of the panel's controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    /// Bucket count of the raw-input histogram.
    pub bin_size: u32,
    /// How many samples "Add N" ingests.
    pub sample_count: u32,
    /// Internal bin budget of the sketch.
    pub bin_limit: u16,
}

impl ControlState {
    pub fn from_config(config: &VizConfig) -> Self {
        Self {
            bin_size: config.bin_size.initial,
            sample_count: config.sample_count.initial,
            bin_limit: u16::try_from(config.bin_limit.initial).unwrap_or(u16::MAX),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    BinSizeChanged(u32),
    SampleCountChanged(u32),
    AddSamplesClicked,
    BinLimitChanged(u16),
    RefreshRequested,
}

/// Text elements owned by the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    BinSize,
    BinLimit,
    AddButton,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SetLabel(Label, String),
    Sample(u32),
    PushBinLimit(u16),
    Redraw,
}

pub type Effects = SmallVec<[Effect; 3]>;

pub fn add_button_label(count: u32) -> String {
    format!("Add {count}")
}

/// Applies one control event. Values arrive already bounded by the control.
pub fn handle(state: ControlState, event: ControlEvent) -> (ControlState, Effects) {
    match event {
        ControlEvent::BinSizeChanged(bin_size) => (
            ControlState { bin_size, ..state },
            smallvec![Effect::SetLabel(Label::BinSize, bin_size.to_string()), Effect::Redraw],
        ),
        ControlEvent::SampleCountChanged(sample_count) => (
            ControlState { sample_count, ..state },
            smallvec![Effect::SetLabel(Label::AddButton, add_button_label(sample_count))],
        ),
        ControlEvent::AddSamplesClicked => (state, smallvec![Effect::Sample(state.sample_count), Effect::Redraw]),
        ControlEvent::BinLimitChanged(bin_limit) => (
            ControlState { bin_limit, ..state },
            smallvec![
                Effect::SetLabel(Label::BinLimit, bin_limit.to_string()),
                Effect::PushBinLimit(bin_limit),
                Effect::Redraw,
            ],
        ),
        ControlEvent::RefreshRequested => (state, smallvec![Effect::Redraw]),
    }
}

/// Brings labels and the sketch in line with the controls' starting values.
///
/// The bin-size label is refreshed without a redraw; the bin-limit push redraws.
pub fn initial_effects(state: &ControlState) -> Vec<Effect> {
    vec![
        Effect::SetLabel(Label::BinLimit, state.bin_limit.to_string()),
        Effect::PushBinLimit(state.bin_limit),
        Effect::Redraw,
        Effect::SetLabel(Label::AddButton, add_button_label(state.sample_count)),
        Effect::SetLabel(Label::BinSize, state.bin_size.to_string()),
    ]
}
