pub mod dom;
pub mod rendering;
pub mod services;
pub mod sketch_engine;

pub use dom::DomSurface;
pub use services::{BrowserTimeProvider, ConsoleLogger, PerformanceClock};
pub use sketch_engine::CanvasSketchEngine;
