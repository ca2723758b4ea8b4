//! Per-frame gesture classification.
//!
//! One `update` call per frame turns raw pointer input into tap, swipe, and
//! pinch events. A single contact runs the Idle → Single → Idle session
//! machine; two active contacts switch to a parallel pinch mode driven
//! purely by contact-count observation. Contact-count transitions always
//! end the open session cleanly before the other mode takes over, so no
//! state leaks between gestures.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::config::GestureConfig;
use crate::events::{GestureEvent, GestureObservers};
use crate::input::{FrameInput, MouseSample, TouchPhase, TouchSample, UiHitTest};

/// Events produced by one frame. Inline capacity covers the worst real
/// case (forced end + new begin + movement).
pub type FrameEvents = SmallVec<[GestureEvent; 4]>;

/// What the classifier is currently tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchMode {
    #[default]
    Idle,
    /// One contact with an open session.
    Single,
    /// Two active contacts; their distance delta drives pinch events.
    Pinch,
}

/// Mutable per-session fields. Meaningful while the mode is not `Idle`;
/// `last_position` additionally tracks the mouse whenever mouse input is
/// active, so the last-known pointer position survives the session.
#[derive(Debug, Clone, Copy, Default)]
struct TouchSession {
    start_position: Point,
    last_position: Point,
    start_time: f64,
}

/// The gesture classifier. Owns the session state and the observer
/// registry; has no knowledge of cameras.
#[derive(Default)]
pub struct GestureClassifier {
    pub config: GestureConfig,
    mode: TouchMode,
    session: TouchSession,
    observers: GestureObservers,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// True while a session is open or a pinch is in progress.
    pub fn is_touching(&self) -> bool {
        self.mode != TouchMode::Idle
    }

    pub fn mode(&self) -> TouchMode {
        self.mode
    }

    /// Last-known pointer position: the contact position during a session,
    /// the contacts' midpoint during a pinch, the cursor under mouse input.
    pub fn touch_position(&self) -> Point {
        self.session.last_position
    }

    /// Observer registry; handlers receive every event `update` returns.
    pub fn observers(&mut self) -> &mut GestureObservers {
        &mut self.observers
    }

    /// Classify one frame of input. `now` is the host's monotonic clock in
    /// seconds, used only for the tap duration threshold. Returns the
    /// frame's events in emission order after dispatching them to the
    /// observers.
    pub fn update(&mut self, input: &FrameInput, now: f64, ui: &dyn UiHitTest) -> FrameEvents {
        let mut events = FrameEvents::new();
        match input {
            FrameInput::Mouse(mouse) => self.update_mouse(mouse, now, ui, &mut events),
            FrameInput::Touches(contacts) => self.update_touches(contacts, now, ui, &mut events),
        }
        self.observers.dispatch(&events);
        events
    }

    // ─── Touch path ──────────────────────────────────────────────────────

    fn update_touches(
        &mut self,
        contacts: &[TouchSample],
        now: f64,
        ui: &dyn UiHitTest,
        out: &mut FrameEvents,
    ) {
        match contacts {
            [contact] => {
                // A finger surviving a pinch does not continue as a swipe
                // session; it must press again.
                if self.mode == TouchMode::Pinch {
                    self.force_end(out);
                }
                self.update_single(contact, now, ui, out);
            }
            [a, b] => {
                if self.mode == TouchMode::Single {
                    // Contact count changed under an open session.
                    self.force_end(out);
                }
                // If either contact ended this frame, pinch evaluation is
                // skipped entirely for the frame.
                if !a.phase.has_ended() && !b.phase.has_ended() {
                    self.mode = TouchMode::Pinch;
                    self.session.last_position = a.position.midpoint(b.position);
                    let new_distance = a.position.distance(b.position);
                    let old_distance = (a.position - a.delta).distance(b.position - b.delta);
                    if old_distance != new_distance {
                        out.push(GestureEvent::Pinch {
                            old_distance,
                            new_distance,
                        });
                    }
                }
            }
            _ => {
                // Zero contacts, or more than this classifier tracks.
                if self.mode != TouchMode::Idle {
                    self.force_end(out);
                }
            }
        }
    }

    fn update_single(
        &mut self,
        contact: &TouchSample,
        now: f64,
        ui: &dyn UiHitTest,
        out: &mut FrameEvents,
    ) {
        match contact.phase {
            TouchPhase::Began => {
                // Platforms may end an old contact and begin a new one in
                // the same slot within one frame; end the stale session
                // first so its start data cannot leak into the new one.
                if self.mode == TouchMode::Single {
                    self.force_end(out);
                }
                self.try_begin(contact.position, now, ui, out);
            }
            TouchPhase::Moved => {
                if self.mode == TouchMode::Single {
                    if contact.delta != Vec2::ZERO {
                        out.push(GestureEvent::Swipe {
                            delta: contact.delta,
                        });
                    }
                    self.session.last_position = contact.position;
                }
            }
            TouchPhase::Stationary => {
                if self.mode == TouchMode::Single {
                    self.session.last_position = contact.position;
                }
            }
            TouchPhase::Ended | TouchPhase::Canceled => {
                if self.mode == TouchMode::Single {
                    self.end_with_tap_check(contact.position, now, ui, out);
                }
            }
        }
    }

    // ─── Mouse path ──────────────────────────────────────────────────────

    fn update_mouse(
        &mut self,
        mouse: &MouseSample,
        now: f64,
        ui: &dyn UiHitTest,
        out: &mut FrameEvents,
    ) {
        let position = mouse.position;
        // A session opened from touch input has no contacts left once the
        // host switches back to the mouse source, and a mouse session whose
        // button is already up lost its release edge. Either way the contact
        // count is zero: forced end.
        if self.mode == TouchMode::Pinch
            || (self.mode == TouchMode::Single && !mouse.held && !mouse.released)
        {
            self.force_end(out);
        }
        if mouse.pressed {
            if self.mode != TouchMode::Idle {
                self.force_end(out);
            }
            self.try_begin(position, now, ui, out);
        } else if mouse.held && self.mode == TouchMode::Single {
            let delta = position - self.session.last_position;
            if delta != Vec2::ZERO {
                out.push(GestureEvent::Swipe { delta });
            }
        }
        if mouse.released && self.mode == TouchMode::Single {
            self.end_with_tap_check(position, now, ui, out);
        }
        if mouse.scroll_delta != 0.0 {
            // The scroll wheel zooms like a pinch about the cursor.
            let new_distance = (1.0 + mouse.scroll_delta * self.config.mouse_scroll_speed).max(0.01);
            if new_distance != 1.0 {
                out.push(GestureEvent::Pinch {
                    old_distance: 1.0,
                    new_distance,
                });
            }
        }
        // The cursor is always the last-known pointer position.
        self.session.last_position = position;
    }

    // ─── Session transitions ─────────────────────────────────────────────

    fn try_begin(&mut self, position: Point, now: f64, ui: &dyn UiHitTest, out: &mut FrameEvents) {
        if !self.config.ignore_ui && ui.is_over_ui(position) {
            log::trace!("session start at {position:?} suppressed by UI");
            return;
        }
        self.session = TouchSession {
            start_position: position,
            last_position: position,
            start_time: now,
        };
        self.mode = TouchMode::Single;
        out.push(GestureEvent::TouchStarted { position });
    }

    /// Regular session end: tap evaluation happens only here, and only
    /// against the release position and time. The UI query runs a second
    /// time; a drag released over UI still ends, but does not tap.
    fn end_with_tap_check(
        &mut self,
        position: Point,
        now: f64,
        ui: &dyn UiHitTest,
        out: &mut FrameEvents,
    ) {
        let displacement = position.distance(self.session.start_position);
        let elapsed = now - self.session.start_time;
        if displacement <= self.config.max_tap_distance
            && elapsed <= self.config.max_tap_duration
            && (self.config.ignore_ui || !ui.is_over_ui(position))
        {
            out.push(GestureEvent::Tap { position });
        }
        out.push(GestureEvent::TouchEnded { position });
        self.mode = TouchMode::Idle;
    }

    /// Forced session end: no tap evaluation, last-known position.
    fn force_end(&mut self, out: &mut FrameEvents) {
        out.push(GestureEvent::TouchEnded {
            position: self.session.last_position,
        });
        self.mode = TouchMode::Idle;
    }
}
