//! Chart snapshots: histogram geometry laid out in a canvas plus the inverse mapping back to data space.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
