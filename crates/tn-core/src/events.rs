//! Gesture event model and observer multicast.
//!
//! The classifier returns each frame's events as a list, and additionally
//! dispatches them to any registered observers. Both carry the same data;
//! the list suits a frame loop, the observers suit decoupled listeners.

use std::fmt;

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A classified gesture, in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    /// A contact (or mouse press) began a session.
    TouchStarted { position: Point },
    /// The active contact(s) ended or vanished.
    TouchEnded { position: Point },
    /// Released within the tap distance and duration thresholds.
    Tap { position: Point },
    /// The single active contact moved. `delta` is this frame's raw
    /// screen-space movement, never cumulative.
    Swipe { delta: Vec2 },
    /// The distance between two active contacts changed.
    Pinch {
        old_distance: f64,
        new_distance: f64,
    },
}

impl GestureEvent {
    /// Screen position, for the events that carry one.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::TouchStarted { position }
            | Self::TouchEnded { position }
            | Self::Tap { position } => Some(*position),
            _ => None,
        }
    }
}

type Handler = Box<dyn FnMut(&GestureEvent)>;

/// Multicast registry of gesture observers.
///
/// Handlers run synchronously, in registration order, once per event. An
/// empty registry is a valid no-op, not an error.
#[derive(Default)]
pub struct GestureObservers {
    handlers: Vec<Handler>,
}

impl GestureObservers {
    pub fn subscribe(&mut self, handler: impl FnMut(&GestureEvent) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn dispatch(&mut self, events: &[GestureEvent]) {
        for event in events {
            for handler in &mut self.handlers {
                handler(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for GestureObservers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureObservers")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
