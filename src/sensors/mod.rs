// per-frame perception attached to an agent
pub mod pie_slice;
pub mod radar;
pub mod wall;

pub use pie_slice::PieSliceSensor;
pub use radar::Radar;
pub use wall::{DEFAULT_PROBE_OFFSETS_DEG, WallSensor};
