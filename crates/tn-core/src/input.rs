//! Input abstraction layer.
//!
//! Normalizes what the host's windowing layer reports each frame — a mouse
//! sample or a list of touch contacts — into a single `FrameInput` the
//! classifier consumes. The host picks exactly one source per frame: touches
//! when any are active, the mouse only when one is physically present and
//! the platform is not touch-only.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Lifecycle phase of a touch contact, as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
}

impl TouchPhase {
    /// Parse a platform phase name (e.g. from a JS bridge).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "began" | "start" => Some(Self::Began),
            "moved" | "move" => Some(Self::Moved),
            "stationary" => Some(Self::Stationary),
            "ended" | "end" => Some(Self::Ended),
            "canceled" | "cancelled" => Some(Self::Canceled),
            _ => None,
        }
    }

    /// The contact is gone after this frame.
    pub fn has_ended(self) -> bool {
        matches!(self, Self::Ended | Self::Canceled)
    }
}

/// One active touch contact. Contacts are identity-free; only the ordinal
/// index (0/1) matters since at most two are tracked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    /// Current screen position, pixels.
    pub position: Point,
    /// Movement since the previous frame.
    pub delta: Vec2,
    pub phase: TouchPhase,
}

impl TouchSample {
    pub fn began(position: Point) -> Self {
        Self {
            position,
            delta: Vec2::ZERO,
            phase: TouchPhase::Began,
        }
    }

    pub fn moved(position: Point, delta: Vec2) -> Self {
        Self {
            position,
            delta,
            phase: TouchPhase::Moved,
        }
    }

    pub fn stationary(position: Point) -> Self {
        Self {
            position,
            delta: Vec2::ZERO,
            phase: TouchPhase::Stationary,
        }
    }

    pub fn ended(position: Point) -> Self {
        Self {
            position,
            delta: Vec2::ZERO,
            phase: TouchPhase::Ended,
        }
    }
}

/// Mouse state for one frame. `pressed`/`released` are edges (the button
/// changed this frame); `held` is the level.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseSample {
    pub position: Point,
    pub pressed: bool,
    pub held: bool,
    pub released: bool,
    /// Scroll wheel movement this frame, in notches.
    pub scroll_delta: f64,
}

impl MouseSample {
    /// An idle mouse at `position`: no buttons, no scroll.
    pub fn at(position: Point) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// Everything the pointer did this frame, from exactly one source.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameInput {
    Mouse(MouseSample),
    /// Active touch contacts. The classifier consumes at most two; any
    /// other count forces an open session to end.
    Touches(SmallVec<[TouchSample; 2]>),
}

impl FrameInput {
    /// A frame with no pointer activity at all.
    pub fn idle() -> Self {
        Self::Touches(SmallVec::new())
    }

    pub fn touches(samples: impl IntoIterator<Item = TouchSample>) -> Self {
        Self::Touches(samples.into_iter().collect())
    }
}

/// The host's render target dimensions, physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Query answered by the host's UI layer: does an interactive UI surface
/// occupy this screen position? Environments without a UI system answer
/// `false` for everything ([`NoUi`]); the query must never block.
pub trait UiHitTest {
    fn is_over_ui(&self, position: Point) -> bool;
}

/// Absent UI system: nothing ever captures the pointer.
pub struct NoUi;

impl UiHitTest for NoUi {
    fn is_over_ui(&self, _position: Point) -> bool {
        false
    }
}

impl<F: Fn(Point) -> bool> UiHitTest for F {
    fn is_over_ui(&self, position: Point) -> bool {
        self(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_parse_accepts_platform_names() {
        assert_eq!(TouchPhase::parse("began"), Some(TouchPhase::Began));
        assert_eq!(TouchPhase::parse("start"), Some(TouchPhase::Began));
        assert_eq!(TouchPhase::parse("cancelled"), Some(TouchPhase::Canceled));
        assert_eq!(TouchPhase::parse("hover"), None);
    }

    #[test]
    fn ended_and_canceled_are_terminal() {
        assert!(TouchPhase::Ended.has_ended());
        assert!(TouchPhase::Canceled.has_ended());
        assert!(!TouchPhase::Moved.has_ended());
        assert!(!TouchPhase::Stationary.has_ended());
    }

    #[test]
    fn closures_answer_the_ui_query() {
        let over = |p: Point| p.x > 100.0;
        assert!(over.is_over_ui(Point::new(150.0, 0.0)));
        assert!(!over.is_over_ui(Point::new(50.0, 0.0)));
        assert!(!NoUi.is_over_ui(Point::new(150.0, 0.0)));
    }
}
