pub mod classifier;
pub mod config;
pub mod events;
pub mod input;

pub use classifier::{FrameEvents, GestureClassifier, TouchMode};
pub use config::GestureConfig;
pub use events::{GestureEvent, GestureObservers};
pub use input::{FrameInput, MouseSample, NoUi, TouchPhase, TouchSample, UiHitTest, Viewport};

// Re-export the geometry types used in the public API so downstream crates
// don't need a direct dependency.
pub use kurbo::{Point, Vec2};
