//! Pan/zoom camera control driven by gesture events.
//!
//! Swipes pan so the world point under the finger stays under it; pinches
//! zoom about the pinch center. After the frame's events are applied the
//! visible region is clamped to the configured world-space bound, size
//! first so the position clamp is always satisfiable.

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use tn_core::{GestureEvent, Point, Vec2, Viewport};

use crate::handle::{CameraHandle, Projection};

/// Hard floor for orthographic half-height and perspective FOV.
const MIN_ZOOM: f64 = 0.1;
const MAX_FOV_DEG: f64 = 179.9;
/// Keeps the clamped view strictly inside the bound rectangle.
const BOUND_EPSILON: f64 = 1e-3;

/// Camera-side configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Master switch: whether gesture events may mutate the camera at all.
    pub control_camera: bool,
    /// Clamp the visible region to `bounds` every frame.
    pub use_bounds: bool,
    /// World-space rectangle the view must stay inside. Precondition:
    /// `x0 < x1`, `y0 < y1`, and large enough for the minimum zoom; not
    /// validated here.
    pub bounds: Rect,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            control_camera: true,
            use_bounds: false,
            bounds: Rect::ZERO,
        }
    }
}

/// Applies gesture events to a camera, once per frame, strictly after
/// classification.
pub struct CameraController {
    pub config: CameraConfig,
    enabled: bool,
}

impl CameraController {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            enabled: true,
        }
    }

    /// False between [`cancel`](Self::cancel) and the end of the active
    /// touch/click session.
    pub fn control_enabled(&self) -> bool {
        self.enabled
    }

    /// Stop gestures from driving the camera until the current session
    /// ends, at which point control is re-enabled unconditionally.
    /// Idempotent: repeated calls within one session are equivalent to one.
    pub fn cancel(&mut self) {
        self.enabled = false;
    }

    /// Apply one frame's gesture events. `pointer` is the classifier's
    /// current touch position (the pinch center during pinch frames).
    /// With no camera anywhere, events still flow — only the camera
    /// mutations are skipped.
    pub fn apply(
        &mut self,
        camera: Option<&mut dyn CameraHandle>,
        viewport: Viewport,
        pointer: Point,
        events: &[GestureEvent],
    ) {
        match camera {
            Some(camera) => {
                for event in events {
                    self.apply_event(camera, viewport, pointer, event);
                }
                self.clamp_to_bounds(camera, viewport);
            }
            None => {
                for event in events {
                    if matches!(event, GestureEvent::TouchEnded { .. }) {
                        self.enabled = true;
                    }
                }
            }
        }
    }

    fn apply_event(
        &mut self,
        camera: &mut dyn CameraHandle,
        viewport: Viewport,
        pointer: Point,
        event: &GestureEvent,
    ) {
        let driving = self.config.control_camera && self.enabled;
        match *event {
            GestureEvent::Swipe { delta } if driving => self.pan(camera, viewport, delta),
            GestureEvent::Pinch {
                old_distance,
                new_distance,
            } if driving => self.zoom(camera, viewport, pointer, old_distance / new_distance),
            GestureEvent::TouchEnded { .. } => {
                // The session is over; whatever borrowed the pointer away
                // from the camera has let go.
                self.enabled = true;
            }
            _ => {}
        }
    }

    /// Pan so the world point under the pointer stays under it.
    fn pan(&self, camera: &mut dyn CameraHandle, viewport: Viewport, delta: Vec2) {
        let world_delta = camera.screen_to_world(delta.to_point(), viewport)
            - camera.screen_to_world(Point::ORIGIN, viewport);
        camera.set_position(camera.position() - world_delta);
    }

    /// Zoom by `ratio` (old distance over new). Orthographic cameras keep
    /// the world point under the pinch center fixed; perspective cameras
    /// scale the FOV only.
    fn zoom(&self, camera: &mut dyn CameraHandle, viewport: Viewport, pointer: Point, ratio: f64) {
        match camera.projection() {
            Projection::Orthographic { half_height } => {
                let before = camera.screen_to_world(pointer, viewport);
                let mut scaled = half_height * ratio;
                if !scaled.is_finite() || scaled < MIN_ZOOM {
                    scaled = MIN_ZOOM;
                }
                camera.set_projection(Projection::Orthographic {
                    half_height: scaled,
                });
                let after = camera.screen_to_world(pointer, viewport);
                camera.set_position(camera.position() + (before - after));
            }
            Projection::Perspective { fov_deg } => {
                let mut scaled = fov_deg * ratio;
                if !scaled.is_finite() {
                    scaled = MIN_ZOOM;
                }
                camera.set_projection(Projection::Perspective {
                    fov_deg: scaled.max(MIN_ZOOM).min(MAX_FOV_DEG),
                });
            }
        }
    }

    /// Keep the visible rectangle inside `config.bounds`. Runs every frame
    /// after gesture processing, whether or not any gesture occurred;
    /// orthographic cameras only.
    fn clamp_to_bounds(&self, camera: &mut dyn CameraHandle, viewport: Viewport) {
        if !self.config.use_bounds {
            return;
        }
        let Projection::Orthographic { half_height } = camera.projection() else {
            return;
        };
        let bounds = self.config.bounds;

        // Size first: a view taller or wider than the bound would make the
        // position clamp unsatisfiable.
        let max_by_height = bounds.height() / 2.0 - BOUND_EPSILON;
        let max_by_width =
            viewport.height * bounds.width() / (2.0 * viewport.width) - BOUND_EPSILON;
        let clamped = half_height.min(max_by_height).min(max_by_width);
        if clamped != half_height {
            camera.set_projection(Projection::Orthographic {
                half_height: clamped,
            });
        }

        // World-space half-extent of the view at the (possibly reduced)
        // zoom.
        let margin = camera.screen_to_world(viewport.center(), viewport)
            - camera.screen_to_world(Point::ORIGIN, viewport);
        let position = camera.position();
        // max/min instead of `clamp`: malformed bounds degrade instead of
        // panicking.
        let kept_inside = Point::new(
            position.x.max(bounds.x0 + margin.x).min(bounds.x1 - margin.x),
            position.y.max(bounds.y0 + margin.y).min(bounds.y1 - margin.y),
        );
        if kept_inside != position {
            log::trace!("camera clamped from {position:?} to {kept_inside:?}");
            camera.set_position(kept_inside);
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}
