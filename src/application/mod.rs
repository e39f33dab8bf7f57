pub mod controls;
pub mod coords;
pub mod scheduler;
pub mod session;
pub mod sizing;
pub mod surface;

pub use controls::{ControlEvent, ControlState};
pub use coords::{PointerSample, Readout};
pub use scheduler::{Clock, RenderScheduler};
pub use session::SessionController;
pub use sizing::{CanvasSize, CanvasView, HostLayout};
pub use surface::{DisplaySurface, Slot};
