//! Integration tests: classifier events driving the camera controller.
//!
//! Runs the two components the way a host frame loop does — classify, then
//! apply, then rely on the per-frame bounds clamp — and checks the combined
//! behavior across whole gestures.

use kurbo::Rect;
use pretty_assertions::assert_eq;
use tn_camera::{Camera2d, CameraConfig, CameraController, CameraHandle};
use tn_core::{
    FrameInput, GestureClassifier, GestureConfig, GestureEvent, MouseSample, NoUi, Point,
    TouchSample, Vec2, Viewport,
};

const VIEWPORT: Viewport = Viewport {
    width: 800.0,
    height: 600.0,
};
const FRAME: f64 = 1.0 / 60.0;

struct Rig {
    classifier: GestureClassifier,
    controller: CameraController,
    camera: Camera2d,
    now: f64,
}

impl Rig {
    fn new(camera: Camera2d, config: CameraConfig) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            classifier: GestureClassifier::new(GestureConfig::default()),
            controller: CameraController::new(config),
            camera,
            now: 0.0,
        }
    }

    /// One host frame: classify, then drive the camera.
    fn step(&mut self, input: FrameInput) -> Vec<GestureEvent> {
        self.now += FRAME;
        let events = self.classifier.update(&input, self.now, &NoUi);
        self.controller.apply(
            Some(&mut self.camera),
            VIEWPORT,
            self.classifier.touch_position(),
            &events,
        );
        events.to_vec()
    }
}

#[test]
fn drag_pans_the_world_under_the_finger() {
    let mut rig = Rig::new(Camera2d::new(Point::ORIGIN, 5.0), CameraConfig::default());

    rig.step(FrameInput::touches([TouchSample::began(Point::new(
        400.0, 300.0,
    ))]));
    rig.step(FrameInput::touches([TouchSample::moved(
        Point::new(460.0, 300.0),
        Vec2::new(60.0, 0.0),
    )]));

    // 60 px at scale 1/60 is one world unit, panned against the finger.
    assert!((rig.camera.position.x - (-1.0)).abs() < 1e-12);
    assert_eq!(rig.camera.position.y, 0.0);
}

#[test]
fn pinch_zoom_scales_and_anchors_the_center() {
    let mut rig = Rig::new(Camera2d::new(Point::ORIGIN, 10.0), CameraConfig::default());

    // Two fingers land 50 px apart around (500, 300).
    rig.step(FrameInput::touches([
        TouchSample::began(Point::new(475.0, 300.0)),
        TouchSample::began(Point::new(525.0, 300.0)),
    ]));
    let anchor = rig
        .camera
        .screen_to_world(Point::new(500.0, 300.0), VIEWPORT);

    // They spread to 100 px; distance doubles, so the view halves.
    let events = rig.step(FrameInput::touches([
        TouchSample::moved(Point::new(450.0, 300.0), Vec2::new(-25.0, 0.0)),
        TouchSample::moved(Point::new(550.0, 300.0), Vec2::new(25.0, 0.0)),
    ]));
    assert_eq!(
        events,
        vec![GestureEvent::Pinch {
            old_distance: 50.0,
            new_distance: 100.0,
        }]
    );
    assert!((rig.camera.half_height - 5.0).abs() < 1e-12);

    // The world point between the fingers stayed put.
    let after = rig
        .camera
        .screen_to_world(Point::new(500.0, 300.0), VIEWPORT);
    assert!((after - anchor).hypot() < 1e-9);
}

#[test]
fn tap_leaves_the_camera_alone() {
    let start = Camera2d::new(Point::new(3.0, -2.0), 7.5);
    let mut rig = Rig::new(start, CameraConfig::default());

    rig.step(FrameInput::touches([TouchSample::began(Point::new(
        100.0, 100.0,
    ))]));
    let events = rig.step(FrameInput::touches([TouchSample::ended(Point::new(
        102.0, 101.0,
    ))]));

    assert!(events.iter().any(|e| matches!(e, GestureEvent::Tap { .. })));
    assert_eq!(rig.camera, start);
}

#[test]
fn cancel_suspends_panning_until_release() {
    let mut rig = Rig::new(Camera2d::new(Point::ORIGIN, 5.0), CameraConfig::default());

    rig.step(FrameInput::touches([TouchSample::began(Point::new(
        400.0, 300.0,
    ))]));
    // Something else claims the drag (say, an object picked up mid-gesture).
    rig.controller.cancel();

    rig.step(FrameInput::touches([TouchSample::moved(
        Point::new(460.0, 300.0),
        Vec2::new(60.0, 0.0),
    )]));
    assert_eq!(rig.camera.position, Point::ORIGIN, "swipe ignored while cancelled");

    // Release re-enables; the next drag pans again without any explicit
    // re-enable call.
    rig.step(FrameInput::touches([TouchSample::ended(Point::new(
        460.0, 300.0,
    ))]));
    rig.step(FrameInput::touches([TouchSample::began(Point::new(
        400.0, 300.0,
    ))]));
    rig.step(FrameInput::touches([TouchSample::moved(
        Point::new(430.0, 300.0),
        Vec2::new(30.0, 0.0),
    )]));
    assert!(rig.camera.position.x < 0.0);
}

#[test]
fn swipe_events_keep_firing_while_cancelled() {
    let mut rig = Rig::new(Camera2d::new(Point::ORIGIN, 5.0), CameraConfig::default());

    rig.step(FrameInput::touches([TouchSample::began(Point::new(
        400.0, 300.0,
    ))]));
    rig.controller.cancel();
    let events = rig.step(FrameInput::touches([TouchSample::moved(
        Point::new(410.0, 300.0),
        Vec2::new(10.0, 0.0),
    )]));

    assert_eq!(
        events,
        vec![GestureEvent::Swipe {
            delta: Vec2::new(10.0, 0.0)
        }],
        "classification is independent of camera control"
    );
    assert_eq!(rig.camera.position, Point::ORIGIN);
}

#[test]
fn wheel_zoom_drives_the_camera_through_the_same_path() {
    let mut rig = Rig::new(Camera2d::new(Point::ORIGIN, 10.0), CameraConfig::default());

    // Scroll up one notch at the screen center: zoom in by 1/1.1.
    rig.step(FrameInput::Mouse(MouseSample {
        scroll_delta: 1.0,
        ..MouseSample::at(Point::new(400.0, 300.0))
    }));
    assert!((rig.camera.half_height - 10.0 / 1.1).abs() < 1e-9);
    assert_eq!(rig.camera.position, Point::ORIGIN, "centered zoom: no shift");
}

#[test]
fn bounds_hold_across_wild_gestures() {
    let bounds = Rect::new(-20.0, -15.0, 20.0, 15.0);
    let mut rig = Rig::new(
        Camera2d::new(Point::ORIGIN, 5.0),
        CameraConfig {
            use_bounds: true,
            bounds,
            ..CameraConfig::default()
        },
    );

    // A long hard drag to the left pushes the camera right, far past the
    // bound; every frame must stay contained.
    rig.step(FrameInput::touches([TouchSample::began(Point::new(
        400.0, 300.0,
    ))]));
    for _ in 0..30 {
        rig.step(FrameInput::touches([TouchSample::moved(
            Point::new(100.0, 100.0),
            Vec2::new(-300.0, -200.0),
        )]));

        let aspect = VIEWPORT.width / VIEWPORT.height;
        let half_w = rig.camera.half_height * aspect;
        assert!(rig.camera.position.x + half_w <= bounds.x1 + 1e-9);
        assert!(rig.camera.position.x - half_w >= bounds.x0 - 1e-9);
        assert!(rig.camera.position.y + rig.camera.half_height <= bounds.y1 + 1e-9);
        assert!(rig.camera.position.y - rig.camera.half_height >= bounds.y0 - 1e-9);
    }
}

#[test]
fn missing_camera_never_blocks_events() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut classifier = GestureClassifier::new(GestureConfig::default());
    let mut controller = CameraController::new(CameraConfig::default());

    let events = classifier.update(
        &FrameInput::touches([TouchSample::began(Point::new(10.0, 10.0))]),
        0.0,
        &NoUi,
    );
    controller.apply(None, VIEWPORT, classifier.touch_position(), &events);
    assert_eq!(
        events.as_slice(),
        [GestureEvent::TouchStarted {
            position: Point::new(10.0, 10.0)
        }]
    );
}
