//! Classifier configuration.

use serde::{Deserialize, Serialize};

/// Thresholds and switches for gesture classification. All fields are
/// plain numeric/boolean knobs; hosts may deserialize a partial JSON
/// object and let the rest default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Maximum net displacement (px) between press and release for the
    /// release to still count as a tap.
    pub max_tap_distance: f64,
    /// Maximum press duration (seconds) for a release to still count as a
    /// tap.
    pub max_tap_duration: f64,
    /// Consume mouse samples when the host offers them.
    pub use_mouse: bool,
    /// How strongly one scroll-wheel notch zooms; scales the synthetic
    /// pinch emitted for wheel input.
    pub mouse_scroll_speed: f64,
    /// Disable UI suppression entirely: sessions start and taps fire even
    /// over interactive UI.
    pub ignore_ui: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            max_tap_distance: 40.0,
            max_tap_duration: 0.4,
            use_mouse: true,
            mouse_scroll_speed: 0.1,
            ignore_ui: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config: GestureConfig = serde_json::from_str(r#"{"max_tap_distance": 12.5}"#).unwrap();
        assert_eq!(config.max_tap_distance, 12.5);
        assert_eq!(config.max_tap_duration, 0.4);
        assert!(config.use_mouse);
    }
}
