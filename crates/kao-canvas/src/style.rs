//! Draw style descriptors
//!
//! These mirror the descriptor-struct style of canvas APIs: build a
//! style once, reuse it across several primitives, tweak fields between
//! draws.

use kao_core::{Opacity, Rgb};

/// Corner radius sentinel: "as round as the shape allows" (a circle or
/// capsule depending on the aspect ratio).
pub const RADIUS_CIRCLE: i32 = i32::MAX;

/// Style for a line segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub color: Rgb,
    pub width: i32,
    pub opa: Opacity,
    /// Round the end caps
    pub rounded: bool,
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle {
            color: Rgb::BLACK,
            width: 1,
            opa: Opacity::COVER,
            rounded: false,
        }
    }
}

/// Style for a filled/bordered rounded rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectStyle {
    pub bg_color: Rgb,
    pub bg_opa: Opacity,
    pub border_color: Rgb,
    pub border_width: i32,
    pub border_opa: Opacity,
    pub radius: i32,
}

impl Default for RectStyle {
    fn default() -> Self {
        RectStyle {
            bg_color: Rgb::WHITE,
            bg_opa: Opacity::COVER,
            border_color: Rgb::BLACK,
            border_width: 0,
            border_opa: Opacity::COVER,
            radius: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_solid() {
        assert_eq!(LineStyle::default().opa, Opacity::COVER);
        assert_eq!(RectStyle::default().border_width, 0);
    }
}
