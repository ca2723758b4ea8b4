//! WASM bridge for Touch Nav — exposes the gesture classifier and camera
//! controller to JavaScript hosts.
//!
//! Compiled via `wasm-pack build --target web`. The host forwards raw
//! pointer state between frames (`set_mouse`, `push_touch`), then calls
//! `step` once per animation frame; the frame's gesture events come back as
//! a JSON array.

use js_sys::Function;
use tn_camera::{Camera2d, CameraConfig, CameraController, Rect};
use tn_core::{
    FrameInput, GestureClassifier, GestureConfig, MouseSample, Point, TouchPhase, TouchSample,
    Vec2, Viewport,
};
use wasm_bindgen::prelude::*;

/// UI hit-test backed by an optional JS callback `(x, y) -> bool`.
/// No callback, or a throwing one, reports false — gestures never block on
/// a missing UI system. Closures implement `UiHitTest`, so this plugs
/// straight into the classifier.
fn ui_probe(callback: Option<Function>) -> impl Fn(Point) -> bool {
    move |position| {
        let Some(callback) = &callback else {
            return false;
        };
        callback
            .call2(&JsValue::NULL, &position.x.into(), &position.y.into())
            .map(|value| value.is_truthy())
            .unwrap_or(false)
    }
}

/// The main WASM-facing controller.
///
/// Owns the classifier, the camera controller, and the default camera (the
/// environment's primary camera, created exactly once here). All
/// interaction from the host JS goes through this struct.
#[wasm_bindgen]
pub struct TouchNav {
    classifier: GestureClassifier,
    controller: CameraController,
    camera: Camera2d,
    viewport: Viewport,
    ui_callback: Option<Function>,
    touches: Vec<TouchSample>,
    mouse_position: Point,
    mouse_down: bool,
    prev_mouse_down: bool,
    scroll_delta: f64,
    /// Host capability: a mouse is physically present and the platform is
    /// not touch-only.
    has_mouse: bool,
}

#[wasm_bindgen]
impl TouchNav {
    /// Create a controller for a viewport of the given pixel dimensions.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        console_error_panic_hook_setup();

        Self {
            classifier: GestureClassifier::new(GestureConfig::default()),
            controller: CameraController::new(CameraConfig::default()),
            camera: Camera2d::default(),
            viewport: Viewport { width, height },
            ui_callback: None,
            touches: Vec::new(),
            mouse_position: Point::ORIGIN,
            mouse_down: false,
            prev_mouse_down: false,
            scroll_delta: 0.0,
            has_mouse: true,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport { width, height };
    }

    // ─── Per-frame input ─────────────────────────────────────────────────

    /// Record the mouse state for the upcoming frame. Scroll deltas
    /// accumulate until the next `step`.
    pub fn set_mouse(&mut self, x: f64, y: f64, down: bool, scroll_delta: f64) {
        self.mouse_position = Point::new(x, y);
        self.mouse_down = down;
        self.scroll_delta += scroll_delta;
    }

    /// Drop all queued touches (call before re-pushing this frame's
    /// contacts).
    pub fn clear_touches(&mut self) {
        self.touches.clear();
    }

    /// Queue one touch contact for the upcoming frame. `phase` is a
    /// platform phase name ("began", "moved", "stationary", "ended",
    /// "canceled"); unknown names are ignored.
    pub fn push_touch(&mut self, x: f64, y: f64, dx: f64, dy: f64, phase: &str) {
        if let Some(phase) = TouchPhase::parse(phase) {
            self.touches.push(TouchSample {
                position: Point::new(x, y),
                delta: Vec2::new(dx, dy),
                phase,
            });
        }
    }

    /// Advance one frame. `now` is a monotonic clock in seconds (e.g.
    /// `performance.now() / 1000`). Classifies the queued input, drives the
    /// camera, and returns the frame's gesture events as a JSON array.
    pub fn step(&mut self, now: f64) -> String {
        let input = self.frame_input();
        let ui = ui_probe(self.ui_callback.clone());
        let events = self.classifier.update(&input, now, &ui);
        self.controller.apply(
            Some(&mut self.camera),
            self.viewport,
            self.classifier.touch_position(),
            &events,
        );

        // Edges and scroll are consumed; touches are re-queued by the host
        // every frame.
        self.prev_mouse_down = self.mouse_down;
        self.scroll_delta = 0.0;
        self.touches.clear();

        serde_json::to_string(events.as_slice()).unwrap_or_else(|_| "[]".to_string())
    }

    // ─── Queries & commands ──────────────────────────────────────────────

    pub fn is_touching(&self) -> bool {
        self.classifier.is_touching()
    }

    pub fn touch_x(&self) -> f64 {
        self.classifier.touch_position().x
    }

    pub fn touch_y(&self) -> f64 {
        self.classifier.touch_position().y
    }

    /// Stop gestures from driving the camera until the current touch/click
    /// session ends.
    pub fn cancel_camera(&mut self) {
        self.controller.cancel();
    }

    pub fn camera_x(&self) -> f64 {
        self.camera.position.x
    }

    pub fn camera_y(&self) -> f64 {
        self.camera.position.y
    }

    pub fn ortho_size(&self) -> f64 {
        self.camera.half_height
    }

    pub fn set_camera(&mut self, x: f64, y: f64, half_height: f64) {
        self.camera = Camera2d::new(Point::new(x, y), half_height);
    }

    // ─── Configuration ───────────────────────────────────────────────────

    /// Replace the gesture configuration from a JSON object; missing fields
    /// fall back to defaults. Returns `true` on success.
    pub fn set_config(&mut self, json: &str) -> bool {
        match serde_json::from_str::<GestureConfig>(json) {
            Ok(config) => {
                self.classifier.config = config;
                true
            }
            Err(_) => false,
        }
    }

    /// Current gesture configuration as JSON.
    pub fn get_config(&self) -> String {
        serde_json::to_string(&self.classifier.config).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn set_control_camera(&mut self, control: bool) {
        self.controller.config.control_camera = control;
    }

    pub fn set_use_bounds(&mut self, use_bounds: bool) {
        self.controller.config.use_bounds = use_bounds;
    }

    /// Set the world-space bound rectangle. The caller guarantees
    /// `min < max` on both axes.
    pub fn set_bounds(&mut self, min_x: f64, max_x: f64, min_y: f64, max_y: f64) {
        self.controller.config.bounds = Rect::new(min_x, min_y, max_x, max_y);
    }

    pub fn set_has_mouse(&mut self, has_mouse: bool) {
        self.has_mouse = has_mouse;
    }

    /// Install the UI hit-test callback `(x, y) -> bool`. Without one, no
    /// position is ever considered over UI.
    pub fn set_ui_hit_test(&mut self, callback: Function) {
        self.ui_callback = Some(callback);
    }

    pub fn clear_ui_hit_test(&mut self) {
        self.ui_callback = None;
    }
}

impl TouchNav {
    /// Choose the frame's input source: queued touches win; the mouse is
    /// used only when configured and physically present.
    fn frame_input(&self) -> FrameInput {
        let mouse_active = self.classifier.config.use_mouse && self.has_mouse;
        if !self.touches.is_empty() || !mouse_active {
            FrameInput::touches(self.touches.iter().copied())
        } else {
            FrameInput::Mouse(MouseSample {
                position: self.mouse_position,
                pressed: self.mouse_down && !self.prev_mouse_down,
                held: self.mouse_down,
                released: !self.mouse_down && self.prev_mouse_down,
                scroll_delta: self.scroll_delta,
            })
        }
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("touch-nav panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
