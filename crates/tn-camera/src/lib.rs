pub mod controller;
pub mod handle;

pub use controller::{CameraConfig, CameraController};
pub use handle::{Camera2d, CameraHandle, Projection};

// Re-export the bounds rectangle type so hosts configuring bounds don't
// need a direct dependency.
pub use kurbo::Rect;
