use strum::{AsRefStr, EnumIter, IntoStaticStr};

use crate::application::controls::Label;
use crate::application::sizing::CanvasView;

/// Page elements the controller writes to, named by their element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr, EnumIter)]
pub enum Slot {
    #[strum(serialize = "coord")]
    Coord,
    #[strum(serialize = "status")]
    Status,
    #[strum(serialize = "input_stats")]
    InputStats,
    #[strum(serialize = "output_stats")]
    OutputStats,
    #[strum(serialize = "bin_count_label")]
    BinSizeLabel,
    #[strum(serialize = "sketch_bin_limit_label")]
    BinLimitLabel,
    #[strum(serialize = "add_btn")]
    AddButton,
}

impl Slot {
    pub fn id(self) -> &'static str {
        self.into()
    }
}

impl From<Label> for Slot {
    fn from(label: Label) -> Self {
        match label {
            Label::BinSize => Slot::BinSizeLabel,
            Label::BinLimit => Slot::BinLimitLabel,
            Label::AddButton => Slot::AddButton,
        }
    }
}

/// Where the controller's output lands. The browser implementation writes to the DOM.
pub trait DisplaySurface {
    fn set_text(&mut self, slot: Slot, text: &str);

    /// Like `set_text`, but `markup` may carry inline HTML such as `<br>`.
    fn set_markup(&mut self, slot: Slot, markup: &str);

    /// Button captions live in the element's value, not its text.
    fn set_button_label(&mut self, slot: Slot, label: &str);

    fn apply_canvas_size(&mut self, view: &CanvasView);
}
