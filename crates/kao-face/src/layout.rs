//! Fixed-at-init face geometry
//!
//! The face fills a square of side `min(parent_w, parent_h)`. All
//! sub-canvas dimensions and positions are fixed fractions of that
//! square, computed once and never recomputed.

use kao_core::{FaceConfig, KaoError, KaoResult, Point};

/// Pixel dimensions and positions of the face's three canvases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceLayout {
    /// Side of the square face area
    pub face_size: u32,
    /// Eye canvases are square, side = 0.45 * face
    pub eye_side: u32,
    /// Mouth canvas, 0.45 * face wide by 0.38 * face tall
    pub mouth_width: u32,
    pub mouth_height: u32,
    /// Positions relative to the face square's top-left corner
    pub eye_y: i32,
    pub left_eye_x: i32,
    pub right_eye_x: i32,
    pub mouth_x: i32,
    pub mouth_y: i32,
    /// Face square position within the host surface (movable)
    pub origin: Point,
}

impl FaceLayout {
    /// Smallest parent square that still yields non-degenerate canvases
    pub const MIN_FACE_SIZE: u32 = 8;

    pub fn from_config(config: &FaceConfig) -> KaoResult<FaceLayout> {
        let face = config.width.min(config.height);
        if face < FaceLayout::MIN_FACE_SIZE {
            return Err(KaoError::BoundsTooSmall {
                width: config.width,
                height: config.height,
            });
        }

        let eye_side = (face as f32 * 0.45) as u32;
        let mouth_width = (face as f32 * 0.45) as u32;
        let mouth_height = (face as f32 * 0.38) as u32;

        let half = face as i32 / 2;
        let eye_gap = eye_side as i32 / 4;

        Ok(FaceLayout {
            face_size: face,
            eye_side,
            mouth_width,
            mouth_height,
            eye_y: (face as f32 * 0.12) as i32,
            left_eye_x: half - eye_side as i32 - eye_gap / 2,
            right_eye_x: half + eye_gap / 2,
            mouth_x: half - mouth_width as i32 / 2,
            mouth_y: (face as f32 * 0.62) as i32,
            origin: Point::new(0, 0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fractions() {
        let config = FaceConfig::with_bounds(200, 300);
        let layout = FaceLayout::from_config(&config).unwrap();

        assert_eq!(layout.face_size, 200);
        assert_eq!(layout.eye_side, 90);
        assert_eq!(layout.mouth_width, 90);
        assert_eq!(layout.mouth_height, 76);
        assert_eq!(layout.eye_y, 24);
        assert_eq!(layout.mouth_y, 124);
    }

    #[test]
    fn test_eyes_are_symmetric_about_center() {
        let config = FaceConfig::with_bounds(240, 240);
        let layout = FaceLayout::from_config(&config).unwrap();

        let half = layout.face_size as i32 / 2;
        let left_inner = layout.left_eye_x + layout.eye_side as i32;
        let right_inner = layout.right_eye_x;
        assert_eq!(half - left_inner, right_inner - half);
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        let config = FaceConfig::with_bounds(600, 4);
        let err = FaceLayout::from_config(&config).unwrap_err();
        assert!(matches!(err, KaoError::BoundsTooSmall { height: 4, .. }));
    }
}
