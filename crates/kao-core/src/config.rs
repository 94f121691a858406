//! Engine configuration

use std::time::Duration;

/// Face construction parameters
///
/// The face fills a square of side `min(width, height)` centered in the
/// parent bounds; all internal canvas dimensions are derived from that
/// square, so proportions stay correct at any resolution.
#[derive(Debug, Clone)]
pub struct FaceConfig {
    /// Parent bounds width in pixels
    pub width: u32,
    /// Parent bounds height in pixels
    pub height: u32,
    /// Animation tick interval
    pub animation_speed: Duration,
    /// Minimum quiet period between automatic blinks
    pub blink_interval: Duration,
    /// Schedule blinks automatically
    pub auto_blink: bool,
}

impl FaceConfig {
    pub const DEFAULT_ANIM_SPEED: Duration = Duration::from_millis(30);
    pub const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(3000);

    /// Default timing for a parent of the given size
    pub fn with_bounds(width: u32, height: u32) -> Self {
        FaceConfig {
            width,
            height,
            ..FaceConfig::default()
        }
    }
}

impl Default for FaceConfig {
    fn default() -> Self {
        FaceConfig {
            width: 240,
            height: 240,
            animation_speed: FaceConfig::DEFAULT_ANIM_SPEED,
            blink_interval: FaceConfig::DEFAULT_BLINK_INTERVAL,
            auto_blink: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FaceConfig::default();
        assert_eq!(config.animation_speed, Duration::from_millis(30));
        assert_eq!(config.blink_interval, Duration::from_millis(3000));
        assert!(config.auto_blink);
    }

    #[test]
    fn test_with_bounds_keeps_timing() {
        let config = FaceConfig::with_bounds(135, 135);
        assert_eq!(config.width, 135);
        assert_eq!(config.animation_speed, FaceConfig::DEFAULT_ANIM_SPEED);
    }
}
