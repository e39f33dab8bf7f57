pub mod page;
pub mod wasm_api;

use strum::{AsRefStr, EnumIter, IntoStaticStr};

use crate::application::controls::ControlEvent;

pub use page::SketchPage;
pub use wasm_api::{SketchApp, start};

/// Input elements of the control panel, named by their element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr, EnumIter)]
pub enum ControlId {
    #[strum(serialize = "input_bin_size")]
    BinSize,
    #[strum(serialize = "add_count")]
    SampleCount,
    #[strum(serialize = "sketch_bin_limit")]
    BinLimit,
}

impl ControlId {
    pub fn id(self) -> &'static str {
        self.into()
    }

    /// Turns the control's raw value into an event. `None` when the value is not a valid integer.
    pub fn parse_event(self, raw: &str) -> Option<ControlEvent> {
        let raw = raw.trim();
        match self {
            ControlId::BinSize => raw.parse().ok().map(ControlEvent::BinSizeChanged),
            ControlId::SampleCount => raw.parse().ok().map(ControlEvent::SampleCountChanged),
            ControlId::BinLimit => raw
                .parse()
                .ok()
                .filter(|limit| *limit > 0)
                .map(ControlEvent::BinLimitChanged),
        }
    }
}
