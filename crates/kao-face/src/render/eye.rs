//! Eye renderer
//!
//! Draws one eye canvas: eyebrow, optional blush patch, then one of
//! three eye bodies (heart, open, closed) selected by emotion and
//! openness, plus the sweat and tear overlays some emotions carry.

use std::f32::consts::PI;

use kao_canvas::{Canvas, LineStyle, RectStyle, RADIUS_CIRCLE};
use kao_core::{Area, Emotion, Opacity, Point, Rgb};

use crate::FaceState;

use super::frac;

const EYEBROW_COLOR: Rgb = Rgb::new(80, 60, 40);
const IRIS_COLOR: Rgb = Rgb::new(50, 180, 255);
const IRIS_BORDER: Rgb = Rgb::new(30, 140, 230);
const BLUSH_COLOR: Rgb = Rgb::new(255, 150, 180);
const HEART_COLOR: Rgb = Rgb::new(255, 60, 120);
const TEAR_COLOR: Rgb = Rgb::new(150, 200, 255);
const SWEAT_FILL: Rgb = Rgb::new(120, 200, 255);
const SWEAT_BORDER: Rgb = Rgb::new(80, 150, 240);

/// Render one eye into its canvas.
///
/// `openness` is passed separately from the state so a blink can drive
/// the two eyes with the per-eye values the engine computed.
pub fn draw_eye<C: Canvas>(canvas: &mut C, state: &FaceState, openness: u8, is_left: bool) {
    let width = canvas.width() as i32;
    let height = canvas.height() as i32;

    canvas.fill_bg(Rgb::WHITE, Opacity::COVER);
    canvas.begin_frame();

    let eye_width = frac(width, 0.75);
    let eye_height = ((eye_width * openness as i32) / 100).max(8);
    let center_x = width / 2;
    let center_y = frac(height, 0.6) + state.bounce_offset as i32;

    let brow_y = draw_eyebrow(canvas, state, center_x, center_y, eye_width, is_left);

    if state.blush_intensity > 0 {
        let blush = RectStyle {
            bg_color: BLUSH_COLOR,
            bg_opa: Opacity::from_pct(state.blush_intensity),
            radius: 8,
            ..Default::default()
        };
        canvas.draw_rect(
            &blush,
            Area::new(
                center_x - 10,
                center_y + eye_width / 2 + 2,
                center_x + 10,
                center_y + eye_width / 2 + 8,
            ),
        );
    }

    if state.current_emotion == Emotion::Love && openness > 20 {
        draw_heart(canvas, state, center_x, center_y, eye_width);
    } else if openness > 20 {
        draw_open(canvas, state, center_x, center_y, eye_width, eye_height, openness);
    } else {
        draw_closed(canvas, center_x, center_y, eye_width, is_left);
    }

    let show_sweat = state.current_emotion == Emotion::WorkingHard
        || (state.current_emotion == Emotion::Sleepy && is_left);
    if show_sweat {
        draw_sweat_drop(canvas, state, center_x, center_y, eye_width, height, brow_y, is_left);
    }

    if state.current_emotion == Emotion::Cry && openness > 30 {
        draw_tear(canvas, state, center_x, center_y, eye_width, eye_height, is_left);
    }

    canvas.end_frame();
}

/// Eyebrow line, endpoints skewed by sin(angle) around the center - a
/// tilt approximation rather than a true rotation.
fn draw_eyebrow<C: Canvas>(
    canvas: &mut C,
    state: &FaceState,
    center_x: i32,
    center_y: i32,
    eye_width: i32,
    is_left: bool,
) -> i32 {
    let angle = if is_left {
        state.left_brow_angle
    } else {
        state.right_brow_angle
    };
    let brow_y = center_y - eye_width / 2 - 6 + state.brow_height as i32;
    let brow_width = frac(eye_width, 0.9);

    let angle_rad = angle as f32 * PI / 180.0;
    let y_offset = (brow_width as f32 * 0.25 * angle_rad.sin()) as i32;

    let style = LineStyle {
        color: EYEBROW_COLOR,
        width: 4,
        opa: Opacity::COVER,
        rounded: true,
    };

    // Mirror the skew so both brows tilt toward the nose for equal angles
    let (p1, p2) = if is_left {
        (
            Point::new(center_x - brow_width / 2, brow_y - y_offset),
            Point::new(center_x + brow_width / 2, brow_y + y_offset),
        )
    } else {
        (
            Point::new(center_x - brow_width / 2, brow_y + y_offset),
            Point::new(center_x + brow_width / 2, brow_y - y_offset),
        )
    };
    canvas.draw_line(&style, p1, p2);

    brow_y
}

/// Love's heart eye: seven overlapping rounded rects plus highlights
fn draw_heart<C: Canvas>(canvas: &mut C, state: &FaceState, cx: i32, cy: i32, eye_width: i32) {
    let heart = frac(eye_width, 0.9);
    let h = |f: f32| frac(heart, f);

    let mut style = RectStyle {
        bg_color: HEART_COLOR,
        ..Default::default()
    };

    // Bottom tip
    style.radius = h(0.18);
    canvas.draw_rect(
        &style,
        Area::new(cx - h(0.08), cy + h(0.35), cx + h(0.08), cy + h(0.52)),
    );

    // Lower and upper body
    style.radius = h(0.15);
    canvas.draw_rect(
        &style,
        Area::new(cx - h(0.22), cy + h(0.12), cx + h(0.22), cy + h(0.42)),
    );
    style.radius = h(0.12);
    canvas.draw_rect(
        &style,
        Area::new(cx - h(0.38), cy - h(0.12), cx + h(0.38), cy + h(0.22)),
    );

    // The two round bumps
    style.radius = RADIUS_CIRCLE;
    let bump = h(0.32);
    canvas.draw_rect(
        &style,
        Area::centered(cx - h(0.24), cy - h(0.28), bump, bump),
    );
    canvas.draw_rect(
        &style,
        Area::centered(cx + h(0.24), cy - h(0.28), bump, bump),
    );

    // Center fill between the bumps
    style.radius = h(0.14);
    canvas.draw_rect(
        &style,
        Area::new(cx - h(0.12), cy - h(0.32), cx + h(0.12), cy - h(0.05)),
    );

    // Side smoothing between body and bumps
    style.radius = h(0.16);
    canvas.draw_rect(
        &style,
        Area::new(cx - h(0.42), cy - h(0.08), cx - h(0.25), cy + h(0.18)),
    );
    canvas.draw_rect(
        &style,
        Area::new(cx + h(0.25), cy - h(0.08), cx + h(0.42), cy + h(0.18)),
    );

    // Glossy highlights
    style.bg_color = Rgb::WHITE;
    style.bg_opa = Opacity::from_pct(80);
    style.radius = RADIUS_CIRCLE;
    let hl = h(0.2);
    canvas.draw_rect(
        &style,
        Area::centered(cx - h(0.2), cy - h(0.2), hl / 2, hl / 2),
    );
    style.bg_opa = Opacity::from_pct(60);
    let hl_small = h(0.12);
    canvas.draw_rect(
        &style,
        Area::centered(cx + h(0.05), cy - h(0.12), hl_small / 2, hl_small / 2),
    );

    if state.sparkle_phase > 0 {
        let spark = RectStyle {
            bg_color: Rgb::new(255, 240, 100),
            bg_opa: Opacity::from_pct(state.sparkle_phase),
            radius: 2,
            ..Default::default()
        };
        let dist = h(0.6);
        for i in 0..6u32 {
            let angle = (i * 60 + state.sparkle_phase as u32 * 5) as f32 * PI / 180.0;
            let sx = cx + (dist as f32 * angle.cos()) as i32;
            let sy = cy + (dist as f32 * angle.sin() * 0.85) as i32;
            canvas.draw_rect(&spark, Area::centered(sx, sy, 2, 2));
        }
    }
}

/// Normal open eye: sclera, iris with clamped pupil offset, pupil,
/// nested highlights, orbiting sparkles
fn draw_open<C: Canvas>(
    canvas: &mut C,
    state: &FaceState,
    cx: i32,
    cy: i32,
    eye_width: i32,
    eye_height: i32,
    openness: u8,
) {
    let sclera = RectStyle {
        bg_color: Rgb::WHITE,
        border_color: Rgb::BLACK,
        border_width: 3,
        radius: 15,
        ..Default::default()
    };
    canvas.draw_rect(
        &sclera,
        Area::centered(cx, cy, eye_width / 2, eye_height / 2),
    );

    if openness > 30 && eye_height > 16 {
        let iris_w = frac(eye_width, 0.55);
        let iris_h = frac(eye_height, 0.75).min(iris_w);

        // Pupil offset, clamped so the iris never leaves the sclera
        let mut ix = cx + state.pupil_offset_x as i32;
        let mut iy = cy + state.pupil_offset_y as i32;
        if ix - iris_w / 2 < cx - eye_width / 2 + 3 {
            ix = cx - eye_width / 2 + iris_w / 2 + 3;
        }
        if ix + iris_w / 2 > cx + eye_width / 2 - 3 {
            ix = cx + eye_width / 2 - iris_w / 2 - 3;
        }
        if iy - iris_h / 2 < cy - eye_height / 2 + 3 {
            iy = cy - eye_height / 2 + iris_h / 2 + 3;
        }
        if iy + iris_h / 2 > cy + eye_height / 2 - 3 {
            iy = cy + eye_height / 2 - iris_h / 2 - 3;
        }

        let iris = RectStyle {
            bg_color: IRIS_COLOR,
            border_color: IRIS_BORDER,
            border_width: 2,
            radius: 8,
            ..Default::default()
        };
        canvas.draw_rect(&iris, Area::centered(ix, iy, iris_w / 2, iris_h / 2));

        let pupil_w = frac(iris_w, 0.5);
        let pupil_h = frac(iris_h, 0.6);
        let pupil = RectStyle {
            bg_color: Rgb::BLACK,
            radius: 6,
            ..Default::default()
        };
        canvas.draw_rect(&pupil, Area::centered(ix, iy, pupil_w / 2, pupil_h / 2));

        // Primary and secondary catchlights
        let hl_w = frac(pupil_w, 0.4).max(4);
        let hl_h = frac(pupil_h, 0.4).max(4);
        let mut highlight = RectStyle {
            bg_color: Rgb::WHITE,
            radius: 3,
            ..Default::default()
        };
        canvas.draw_rect(
            &highlight,
            Area::centered(ix - pupil_w / 3, iy - pupil_h / 3, hl_w / 2, hl_h / 2),
        );

        let small_w = (hl_w / 2).max(2);
        let small_h = (hl_h / 2).max(2);
        highlight.radius = 2;
        canvas.draw_rect(
            &highlight,
            Area::centered(ix + pupil_w / 4, iy - pupil_h / 4, small_w / 2, small_h / 2),
        );
    }

    if state.sparkle_phase > 0 {
        let spark = RectStyle {
            bg_color: Rgb::new(255, 255, 100),
            bg_opa: Opacity::from_pct(state.sparkle_phase),
            radius: 2,
            ..Default::default()
        };
        let dist = eye_width / 2 + 8;
        for i in 0..3u32 {
            let angle = (i * 120) as f32 + state.sparkle_phase as f32 * 3.6;
            let angle = angle * PI / 180.0;
            let sx = cx + (dist as f32 * angle.cos()) as i32;
            let sy = cy + (dist as f32 * angle.sin()) as i32;
            canvas.draw_rect(&spark, Area::centered(sx, sy, 2, 2));
        }
    }
}

/// Closed eye: a lash line with four short strokes
fn draw_closed<C: Canvas>(canvas: &mut C, cx: i32, cy: i32, eye_width: i32, is_left: bool) {
    let mut line = LineStyle {
        color: Rgb::BLACK,
        width: 4,
        opa: Opacity::COVER,
        rounded: true,
    };
    canvas.draw_line(
        &line,
        Point::new(cx - eye_width / 2, cy),
        Point::new(cx + eye_width / 2, cy),
    );

    line.width = 2;
    let lash_length = 6;
    for i in 0..4 {
        let x = cx - eye_width / 3 + (eye_width * i / 4);
        canvas.draw_line(
            &line,
            Point::new(x, cy),
            Point::new(x + if is_left { -2 } else { 2 }, cy - lash_length),
        );
    }
}

/// Falling sweat drop beside the eye socket
#[allow(clippy::too_many_arguments)]
fn draw_sweat_drop<C: Canvas>(
    canvas: &mut C,
    state: &FaceState,
    cx: i32,
    _cy: i32,
    eye_width: i32,
    canvas_height: i32,
    brow_y: i32,
    is_left: bool,
) {
    let is_working = state.current_emotion == Emotion::WorkingHard;

    // Working-hard runs the two eyes' drops half a cycle apart
    let drop_offset = if is_working && !is_left {
        (state.sweat_drop_offset as u32 + 50) % 100
    } else {
        state.sweat_drop_offset as u32
    } as i32;

    let drop_x = if is_left {
        cx - eye_width / 2 + 2
    } else {
        cx + eye_width / 2 - 2
    };
    let drop_start_y = (brow_y - 8).max(2);
    let drop_range = (canvas_height - 6 - drop_start_y).max(10);
    let drop_y = drop_start_y + drop_offset * drop_range / 100;

    let (drop_w, drop_top, drop_bot) = if is_working { (4, 10, 4) } else { (3, 7, 3) };

    let drop = RectStyle {
        bg_color: SWEAT_FILL,
        bg_opa: Opacity::from_pct(if is_working { 90 } else { 70 }),
        border_color: SWEAT_BORDER,
        border_width: 1,
        border_opa: Opacity::from_pct(60),
        radius: 6,
        ..Default::default()
    };
    canvas.draw_rect(
        &drop,
        Area::new(drop_x - drop_w, drop_y - drop_top, drop_x + drop_w, drop_y + drop_bot),
    );

    let shine = RectStyle {
        bg_color: Rgb::WHITE,
        bg_opa: Opacity::from_pct(80),
        radius: 3,
        ..Default::default()
    };
    let shine_w = if is_working { 2 } else { 1 };
    canvas.draw_rect(
        &shine,
        Area::new(
            drop_x - shine_w,
            drop_y - drop_top + 2,
            drop_x,
            drop_y - drop_top + if is_working { 5 } else { 4 },
        ),
    );
}

/// Falling tear below the eye with a faint trail
fn draw_tear<C: Canvas>(
    canvas: &mut C,
    state: &FaceState,
    cx: i32,
    cy: i32,
    eye_width: i32,
    eye_height: i32,
    is_left: bool,
) {
    let tear = RectStyle {
        bg_color: TEAR_COLOR,
        bg_opa: Opacity::from_pct(80),
        radius: 5,
        ..Default::default()
    };

    let tear_x = cx + if is_left { -eye_width / 3 } else { eye_width / 3 };
    let tear_y = cy + eye_height / 2 + 5 + state.tear_fall_offset as i32;
    canvas.draw_rect(&tear, Area::centered(tear_x, tear_y, 3, 5));

    let trail = LineStyle {
        color: TEAR_COLOR,
        width: 2,
        opa: Opacity::from_pct(40),
        rounded: true,
    };
    canvas.draw_line(
        &trail,
        Point::new(tear_x, cy + eye_height / 2 + 2),
        Point::new(tear_x + if is_left { -1 } else { 1 }, tear_y - 5),
    );
}

#[cfg(test)]
mod tests {
    use kao_canvas::{DrawOp, RecordingCanvas};
    use kao_core::AnimTime;

    use super::*;

    fn eye_canvas() -> RecordingCanvas {
        RecordingCanvas::new(90, 90)
    }

    fn rect_count(canvas: &RecordingCanvas) -> usize {
        canvas.count_ops(|op| matches!(op, DrawOp::Rect { .. }))
    }

    fn line_count(canvas: &RecordingCanvas) -> usize {
        canvas.count_ops(|op| matches!(op, DrawOp::Line { .. }))
    }

    #[test]
    fn test_open_eye_command_shape() {
        let mut canvas = eye_canvas();
        let mut state = FaceState::new(AnimTime::ZERO);
        state.snap_to(Emotion::Neutral);

        draw_eye(&mut canvas, &state, 100, true);
        assert_eq!(canvas.frames(), 1);
        // Eyebrow line only; no lashes, no blush
        assert_eq!(line_count(&canvas), 1);
        // Sclera + iris + pupil + two highlights
        assert_eq!(rect_count(&canvas), 5);
    }

    #[test]
    fn test_closed_eye_draws_lash_strokes() {
        let mut canvas = eye_canvas();
        let state = FaceState::new(AnimTime::ZERO);

        draw_eye(&mut canvas, &state, 10, true);
        // Eyebrow + lid line + 4 lashes
        assert_eq!(line_count(&canvas), 6);
        assert_eq!(rect_count(&canvas), 0);
    }

    #[test]
    fn test_low_openness_skips_iris() {
        let mut canvas = eye_canvas();
        let state = FaceState::new(AnimTime::ZERO);

        draw_eye(&mut canvas, &state, 25, true);
        // Open branch but openness <= 30: sclera only
        assert_eq!(rect_count(&canvas), 1);
    }

    #[test]
    fn test_heart_eye_for_love() {
        let mut canvas = eye_canvas();
        let mut state = FaceState::new(AnimTime::ZERO);
        state.snap_to(Emotion::Love);

        draw_eye(&mut canvas, &state, state.left_eye_openness, true);
        // 7 heart pieces + 2 highlights + 6 sparkles + blush
        assert_eq!(rect_count(&canvas), 16);
    }

    #[test]
    fn test_cry_adds_tear() {
        let mut canvas = eye_canvas();
        let mut state = FaceState::new(AnimTime::ZERO);
        state.snap_to(Emotion::Cry);

        draw_eye(&mut canvas, &state, state.left_eye_openness, true);
        // Eyebrow + tear trail
        assert_eq!(line_count(&canvas), 2);
    }

    #[test]
    fn test_working_hard_adds_sweat_on_both_eyes() {
        let mut state = FaceState::new(AnimTime::ZERO);
        state.snap_to(Emotion::WorkingHard);

        for is_left in [true, false] {
            let mut canvas = eye_canvas();
            draw_eye(&mut canvas, &state, state.left_eye_openness, is_left);
            // Sclera + iris + pupil + 2 highlights + blush + drop + shine
            assert_eq!(rect_count(&canvas), 8, "is_left={}", is_left);
        }
    }

    #[test]
    fn test_sleepy_sweat_is_left_only() {
        let mut state = FaceState::new(AnimTime::ZERO);
        state.snap_to(Emotion::Sleepy);

        let mut left = eye_canvas();
        draw_eye(&mut left, &state, state.left_eye_openness, true);
        let mut right = eye_canvas();
        draw_eye(&mut right, &state, state.right_eye_openness, false);

        assert_eq!(rect_count(&left), rect_count(&right) + 2);
    }

    #[test]
    fn test_iris_stays_inside_sclera() {
        let mut canvas = eye_canvas();
        let mut state = FaceState::new(AnimTime::ZERO);
        state.pupil_offset_x = 127;
        state.pupil_offset_y = -128;

        draw_eye(&mut canvas, &state, 100, true);

        let width = canvas.width() as i32;
        let eye_width = frac(width, 0.75);
        let cx = width / 2;
        // Second rect is the iris; its right edge must respect the
        // 3px margin inside the sclera.
        let rects: Vec<Area> = canvas
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { area, .. } => Some(*area),
                _ => None,
            })
            .collect();
        let iris = rects[1];
        assert!(iris.x2 <= cx + eye_width / 2 - 3);
        assert!(iris.x1 >= cx - eye_width / 2 + 3);
    }
}
