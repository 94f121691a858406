//! Mouth renderer
//!
//! Five curve bands select the mouth body: open grin (>65, tongue out
//! >100), the animated surprised O/diamond band (35..65), deep frown
//! (<-35, teardrops below -50), a shallow smile/frown in between, and
//! a teeth-grip shape that WorkingHard forces regardless of the curve.

use std::f32::consts::PI;

use kao_canvas::{Canvas, LineStyle, RectStyle};
use kao_core::{Area, Emotion, Opacity, Point, Rgb};

use crate::FaceState;

use super::frac;

const TEAR_COLOR: Rgb = Rgb::new(150, 200, 255);

/// Render the mouth into its canvas.
pub fn draw_mouth<C: Canvas>(canvas: &mut C, state: &FaceState, curve: i16) {
    let width = canvas.width() as i32;
    let height = canvas.height() as i32;
    let curve = curve as i32;

    canvas.fill_bg(Rgb::WHITE, Opacity::COVER);
    canvas.begin_frame();

    let center_x = width / 2;
    let mouth_width = frac(width, 0.85);
    let curve_offset = height * curve / 140;
    let mut center_y = height / 2 + state.bounce_offset as i32;

    // Clamp the mouth center into the legal band for the active shape
    let margin = 5;
    let min_y = margin;
    let max_y = height - margin;

    if curve > 35 && curve < 65 {
        let sparkle_distance = mouth_width / 4;
        let min_center = min_y + sparkle_distance - curve_offset;
        let max_center = max_y - sparkle_distance - curve_offset;
        if center_y < min_center {
            center_y = min_center;
        }
        if center_y > max_center {
            center_y = max_center;
        }
    } else if curve > 65 {
        let mouth_h = frac(height, 0.5);
        let half_offset = curve_offset / 2;
        let half_mouth = mouth_h / 2 + 5;
        let min_center = min_y + half_mouth - half_offset;
        let max_center = max_y - half_mouth - half_offset;
        if center_y < min_center {
            center_y = min_center;
        }
        if center_y > max_center {
            center_y = max_center;
        }
    } else if curve < -35 {
        let mouth_h = frac(height, 0.35);
        let half_offset = curve_offset / 2;
        let min_center = min_y - half_offset;
        let max_center = max_y - mouth_h - half_offset - 5;
        if center_y < min_center {
            center_y = min_center;
        }
        if center_y > max_center {
            center_y = max_center;
        }
    } else {
        let extent = curve_offset.abs() + 10;
        if center_y - extent < min_y {
            center_y = min_y + extent;
        }
        if center_y + extent > max_y {
            center_y = max_y - extent;
        }
    }

    if state.current_emotion == Emotion::WorkingHard {
        draw_teeth_grip(canvas, center_x, center_y, mouth_width, height);
    } else if curve > 65 {
        draw_open_grin(canvas, center_x, center_y, mouth_width, height, curve, curve_offset);
    } else if curve > 35 && curve < 65 {
        draw_surprised(canvas, state, center_x, center_y, mouth_width, curve_offset);
    } else if curve < -35 {
        draw_frown(canvas, state, center_x, center_y, mouth_width, height, curve, curve_offset);
    } else {
        draw_shallow(canvas, center_x, center_y, mouth_width, height, curve);
    }

    canvas.end_frame();
}

/// WorkingHard's gritted teeth, independent of the curve value
fn draw_teeth_grip<C: Canvas>(canvas: &mut C, cx: i32, cy: i32, mouth_width: i32, height: i32) {
    let mouth_h = frac(height, 0.28);
    let grip_width = frac(mouth_width, 0.78);
    let mut adjusted_y = cy - mouth_h / 2;
    if adjusted_y < 4 {
        adjusted_y = 4;
    }
    if adjusted_y + mouth_h > height - 4 {
        adjusted_y = height - 4 - mouth_h;
    }

    let mouth = RectStyle {
        bg_color: Rgb::new(200, 60, 80),
        border_color: Rgb::BLACK,
        border_width: 3,
        radius: 8,
        ..Default::default()
    };
    let mouth_area = Area::new(
        cx - grip_width / 2,
        adjusted_y,
        cx + grip_width / 2,
        adjusted_y + mouth_h,
    );
    canvas.draw_rect(&mouth, mouth_area);

    let t_margin = 4;
    let teeth = RectStyle {
        bg_color: Rgb::new(245, 245, 240),
        bg_opa: Opacity::from_pct(90),
        radius: 3,
        ..Default::default()
    };
    let teeth_area = Area::new(
        mouth_area.x1 + t_margin,
        adjusted_y + t_margin,
        mouth_area.x2 - t_margin,
        adjusted_y + mouth_h - t_margin,
    );
    canvas.draw_rect(&teeth, teeth_area);

    let gap = LineStyle {
        color: Rgb::new(180, 180, 170),
        width: 1,
        opa: Opacity::from_pct(70),
        rounded: true,
    };
    let teeth_total_w = teeth_area.width();
    for i in 1..4 {
        let tooth_x = teeth_area.x1 + teeth_total_w * i / 4;
        canvas.draw_line(
            &gap,
            Point::new(tooth_x, teeth_area.y1),
            Point::new(tooth_x, teeth_area.y2),
        );
    }
}

/// Wide open grin, with tongue past 100 and side sparkles past 85
fn draw_open_grin<C: Canvas>(
    canvas: &mut C,
    cx: i32,
    cy: i32,
    mouth_width: i32,
    height: i32,
    curve: i32,
    curve_offset: i32,
) {
    let mouth_h = frac(height, 0.5);
    let adjusted_y = cy + curve_offset / 2;

    let mouth = RectStyle {
        bg_color: Rgb::new(220, 60, 80),
        bg_opa: Opacity::from_pct(90),
        border_color: Rgb::BLACK,
        border_width: 3,
        radius: 12,
        ..Default::default()
    };
    canvas.draw_rect(
        &mouth,
        Area::centered(cx, adjusted_y, mouth_width / 2, mouth_h / 2),
    );

    if curve > 100 {
        let tongue = RectStyle {
            bg_color: Rgb::new(255, 140, 160),
            bg_opa: Opacity::from_pct(90),
            border_color: Rgb::new(200, 80, 100),
            border_width: 2,
            radius: 8,
            ..Default::default()
        };
        let tongue_w = mouth_width / 5;
        let tongue_h = mouth_h / 3;
        canvas.draw_rect(
            &tongue,
            Area::new(
                cx - tongue_w / 2,
                adjusted_y + mouth_h / 5,
                cx + tongue_w / 2,
                adjusted_y + mouth_h / 5 + tongue_h,
            ),
        );
    }

    if curve > 85 {
        let spark = RectStyle {
            bg_color: Rgb::new(255, 255, 180),
            bg_opa: Opacity::from_pct(60),
            radius: 2,
            ..Default::default()
        };
        for side in [-1, 1] {
            let spark_x = cx + side * (mouth_width / 2 + 8);
            canvas.draw_rect(&spark, Area::centered(spark_x, adjusted_y, 2, 2));
        }
    }
}

/// The surprised band alternates between a four-diamond cluster and a
/// plain oval under its own oscillator, with orbiting sparkles
fn draw_surprised<C: Canvas>(
    canvas: &mut C,
    state: &FaceState,
    cx: i32,
    cy: i32,
    mouth_width: i32,
    curve_offset: i32,
) {
    let diamond_factor = state.diamond_mouth_phase as f32 / 100.0;
    let my = cy + curve_offset;

    if diamond_factor > 0.3 {
        let stretch = 3 + (diamond_factor * 8.0) as i32;

        let mut petal = RectStyle {
            bg_color: Rgb::new(200, 70, 90),
            bg_opa: Opacity::from_pct(90),
            border_color: Rgb::BLACK,
            border_width: 3,
            radius: 4,
            ..Default::default()
        };

        // Up, right, down, left petals
        canvas.draw_rect(&petal, Area::new(cx - 6, my - stretch - 6, cx + 6, my - 2));
        canvas.draw_rect(&petal, Area::new(cx + 2, my - 6, cx + stretch + 6, my + 6));
        canvas.draw_rect(&petal, Area::new(cx - 6, my + 2, cx + 6, my + stretch + 6));
        canvas.draw_rect(&petal, Area::new(cx - stretch - 6, my - 6, cx - 2, my + 6));

        // Borderless center knits the cluster together
        petal.border_width = 0;
        petal.radius = 2;
        canvas.draw_rect(&petal, Area::centered(cx, my, 4, 4));
    } else {
        let half_w = (mouth_width as f32 / 3.5) as i32;
        let half_h = mouth_width / 4;

        let oval = RectStyle {
            bg_color: Rgb::new(200, 70, 90),
            bg_opa: Opacity::from_pct(90),
            border_color: Rgb::BLACK,
            border_width: 3,
            radius: 8,
            ..Default::default()
        };
        canvas.draw_rect(&oval, Area::centered(cx, my, half_w, half_h));
    }

    let spark = RectStyle {
        bg_color: Rgb::new(255, 255, 150),
        bg_opa: Opacity::from_pct(70),
        radius: 2,
        ..Default::default()
    };
    let dist = mouth_width / 3;
    for i in 0..4u32 {
        let angle = (i * 90) as f32 * PI / 180.0;
        let sx = cx + (dist as f32 * angle.cos()) as i32;
        let sy = my + (dist as f32 * angle.sin()) as i32;
        canvas.draw_rect(&spark, Area::centered(sx, sy, 2, 2));
    }
}

/// Deep frown, with teardrops at the corners below -50
#[allow(clippy::too_many_arguments)]
fn draw_frown<C: Canvas>(
    canvas: &mut C,
    state: &FaceState,
    cx: i32,
    cy: i32,
    mouth_width: i32,
    height: i32,
    curve: i32,
    curve_offset: i32,
) {
    let mouth_h = frac(height, 0.35);
    let adjusted_y = cy + curve_offset / 2;

    let mouth = RectStyle {
        bg_color: Rgb::new(180, 50, 70),
        bg_opa: Opacity::from_pct(90),
        border_color: Rgb::BLACK,
        border_width: 3,
        radius: 8,
        ..Default::default()
    };
    canvas.draw_rect(
        &mouth,
        Area::new(
            cx - mouth_width / 2,
            adjusted_y,
            cx + mouth_width / 2,
            adjusted_y + mouth_h,
        ),
    );

    if curve < -50 {
        let tear = RectStyle {
            bg_color: TEAR_COLOR,
            bg_opa: Opacity::from_pct(70),
            radius: 4,
            ..Default::default()
        };
        let tear_base_y = cy - 8;
        let tear_y = tear_base_y + state.tear_fall_offset as i32;

        let tear_x_left = cx - mouth_width / 2 - 10;
        let tear_x_right = cx + mouth_width / 2 + 10;
        canvas.draw_rect(&tear, Area::centered(tear_x_left, tear_y, 4, 4));
        canvas.draw_rect(&tear, Area::centered(tear_x_right, tear_y, 4, 4));

        let trail = LineStyle {
            color: TEAR_COLOR,
            width: 2,
            opa: Opacity::from_pct(50),
            rounded: true,
        };
        canvas.draw_line(
            &trail,
            Point::new(tear_x_left, tear_base_y),
            Point::new(tear_x_left - 1, tear_y - 4),
        );
        canvas.draw_line(
            &trail,
            Point::new(tear_x_right, tear_base_y),
            Point::new(tear_x_right + 1, tear_y - 4),
        );
    }
}

/// Shallow smile or frown for the middle band
fn draw_shallow<C: Canvas>(
    canvas: &mut C,
    cx: i32,
    cy: i32,
    mouth_width: i32,
    height: i32,
    curve: i32,
) {
    let mouth_h = frac(height, 0.28);
    let smile_width = frac(mouth_width, 0.65);

    let is_slight_smile = curve > 5;
    let (bg_color, bg_opa) = if is_slight_smile {
        (Rgb::new(210, 80, 100), Opacity::from_pct(80))
    } else {
        (Rgb::new(190, 60, 80), Opacity::from_pct(90))
    };

    let mouth = RectStyle {
        bg_color,
        bg_opa,
        border_color: Rgb::BLACK,
        border_width: 2,
        radius: 6,
        ..Default::default()
    };
    canvas.draw_rect(
        &mouth,
        Area::new(cx - smile_width / 2, cy, cx + smile_width / 2, cy + mouth_h),
    );
}
