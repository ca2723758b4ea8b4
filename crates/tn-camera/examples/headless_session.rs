//! Headless frame loop: scripted touch input driving the camera.
//!
//! Runs the classifier and controller the way a host would, without a
//! window, and prints the camera state after each frame. Useful for
//! eyeballing pan/zoom/clamp behavior from the terminal:
//!
//! ```sh
//! cargo run -p tn-camera --example headless_session
//! ```

use tn_camera::{Camera2d, CameraConfig, CameraController, Rect};
use tn_core::{
    FrameInput, GestureClassifier, GestureConfig, NoUi, Point, TouchSample, Vec2, Viewport,
};

fn main() {
    env_logger::init();

    let viewport = Viewport::default();
    let mut classifier = GestureClassifier::new(GestureConfig::default());
    let mut controller = CameraController::new(CameraConfig {
        use_bounds: true,
        bounds: Rect::new(-40.0, -30.0, 40.0, 30.0),
        ..CameraConfig::default()
    });
    let mut camera = Camera2d::new(Point::ORIGIN, 10.0);

    // One finger drags right for ten frames, lifts, then two fingers
    // spread to zoom in about the screen center.
    let mut frames: Vec<FrameInput> = Vec::new();
    frames.push(FrameInput::touches([TouchSample::began(Point::new(
        400.0, 300.0,
    ))]));
    for i in 1..=10 {
        frames.push(FrameInput::touches([TouchSample::moved(
            Point::new(400.0 + 20.0 * i as f64, 300.0),
            Vec2::new(20.0, 0.0),
        )]));
    }
    frames.push(FrameInput::touches([TouchSample::ended(Point::new(
        600.0, 300.0,
    ))]));
    frames.push(FrameInput::touches([
        TouchSample::began(Point::new(360.0, 300.0)),
        TouchSample::began(Point::new(440.0, 300.0)),
    ]));
    for i in 1..=5 {
        let spread = 10.0 * i as f64;
        frames.push(FrameInput::touches([
            TouchSample::moved(Point::new(360.0 - spread, 300.0), Vec2::new(-10.0, 0.0)),
            TouchSample::moved(Point::new(440.0 + spread, 300.0), Vec2::new(10.0, 0.0)),
        ]));
    }
    frames.push(FrameInput::idle());

    for (i, input) in frames.iter().enumerate() {
        let now = i as f64 / 60.0;
        let events = classifier.update(input, now, &NoUi);
        controller.apply(
            Some(&mut camera),
            viewport,
            classifier.touch_position(),
            &events,
        );
        println!(
            "frame {i:2}  pos ({:7.3}, {:7.3})  half_height {:6.3}  events {:?}",
            camera.position.x, camera.position.y, camera.half_height, events
        );
    }
}
