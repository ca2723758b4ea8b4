//! Camera abstraction.
//!
//! The controller mutates cameras only through [`CameraHandle`], so hosts
//! can adapt whatever camera type their renderer owns. [`Camera2d`] is the
//! built-in orthographic implementation used when the host brings none.

use tn_core::{Point, Viewport};

/// Camera projection. Orthographic zoom scales the half-height;
/// perspective zoom scales the field of view and never dollies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// `half_height` is half the vertical world-space extent in view.
    Orthographic { half_height: f64 },
    Perspective { fov_deg: f64 },
}

/// The mutable camera surface this crate drives.
pub trait CameraHandle {
    fn position(&self) -> Point;
    fn set_position(&mut self, position: Point);

    fn projection(&self) -> Projection;
    fn set_projection(&mut self, projection: Projection);

    /// Convert a screen-space point (pixels, origin in a corner) to world
    /// space, at the camera's current position and zoom.
    fn screen_to_world(&self, screen: Point, viewport: Viewport) -> Point;

    fn is_orthographic(&self) -> bool {
        matches!(self.projection(), Projection::Orthographic { .. })
    }
}

/// Built-in orthographic 2D camera, screen origin bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2d {
    pub position: Point,
    pub half_height: f64,
}

impl Camera2d {
    pub fn new(position: Point, half_height: f64) -> Self {
        Self {
            position,
            half_height,
        }
    }

    /// World units per screen pixel at the current zoom.
    pub fn scale(&self, viewport: Viewport) -> f64 {
        2.0 * self.half_height / viewport.height
    }
}

impl Default for Camera2d {
    fn default() -> Self {
        Self {
            position: Point::ORIGIN,
            half_height: 5.0,
        }
    }
}

impl CameraHandle for Camera2d {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn projection(&self) -> Projection {
        Projection::Orthographic {
            half_height: self.half_height,
        }
    }

    fn set_projection(&mut self, projection: Projection) {
        if let Projection::Orthographic { half_height } = projection {
            self.half_height = half_height;
        }
    }

    fn screen_to_world(&self, screen: Point, viewport: Viewport) -> Point {
        let scale = self.scale(viewport);
        Point::new(
            self.position.x + (screen.x - viewport.width / 2.0) * scale,
            self.position.y + (screen.y - viewport.height / 2.0) * scale,
        )
    }
}
