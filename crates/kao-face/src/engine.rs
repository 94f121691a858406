//! Animation tick engine
//!
//! One call to [`FaceState::tick`] per timer interval. The order of the
//! sub-steps is load-bearing: later steps read values written by
//! earlier ones within the same tick.
//!
//! 1. Blink machine / auto-blink scheduling / emotion transition
//!    (mutually exclusive arms)
//! 2. Pupil drift, dispatched per emotion
//! 3. Tear / sweat / diamond oscillators
//! 4. Per-emotion envelopes (bounce, blush, sparkle, heartbeat, and for
//!    some emotions openness / mouth / brow overrides once settled)
//! 5. Sparkle and heartbeat wind-down
//! 6. Redraw decision
//!
//! Each generator requests a redraw on its own modulo cadence; emotions
//! intentionally animate at different perceived frame rates.

use kao_core::{AnimTime, Emotion, FaceConfig};

use crate::FaceState;

/// Fixed advance per tick of the blink phase
const BLINK_STEP: u8 = 20;
/// Fixed advance per tick of the transition progress
const TRANSITION_STEP: u8 = 10;

impl FaceState {
    /// Advance the animation by one tick.
    ///
    /// Returns true when the visual state changed enough that the
    /// canvases need redrawing.
    pub fn tick(&mut self, now: AnimTime, config: &FaceConfig) -> bool {
        let mut redraw = false;

        if self.is_blinking {
            redraw |= self.advance_blink(now);
        } else if config.auto_blink && now.since(self.last_blink_time) > config.blink_interval {
            self.trigger_blink();
        } else if self.current_emotion != self.target_emotion && self.transition_progress < 100 {
            redraw |= self.advance_transition();
        }

        self.anim_counter = self.anim_counter.wrapping_add(1);

        redraw |= self.drift_pupils();
        redraw |= self.advance_oscillators();
        redraw |= self.apply_envelope();
        redraw |= self.decay_effects();

        // Keep repainting while a transition is fading the blush in
        if self.transition_progress < 100 && self.blush_intensity > 0 {
            redraw = true;
        }

        redraw
    }

    /// Blink phase 0..50 closes the eyes, 50..100 reopens them. The
    /// completion tick wraps the phase to 0 first, so openness lands
    /// back on 100 exactly.
    fn advance_blink(&mut self, now: AnimTime) -> bool {
        self.blink_phase += BLINK_STEP;
        if self.blink_phase >= 100 {
            self.blink_phase = 0;
            self.is_blinking = false;
            self.last_blink_time = now;
        }

        let openness = if self.blink_phase < 50 {
            100 - self.blink_phase * 2
        } else {
            (self.blink_phase - 50) * 2
        };

        self.left_eye_openness = openness;
        self.right_eye_openness = openness;
        true
    }

    /// One interpolation step toward the target emotion.
    ///
    /// The primary parameters are blended between the two *table*
    /// baselines (not the live state). The secondary baselines are
    /// stamped directly: target's first, then current's, so the current
    /// emotion's blush/sparkle stays live until the snap tick. That
    /// asymmetry is deliberate - decorative effects pop, they don't
    /// fade.
    fn advance_transition(&mut self) -> bool {
        self.transition_progress = (self.transition_progress + TRANSITION_STEP).min(100);
        if self.transition_progress >= 100 {
            self.current_emotion = self.target_emotion;
        }

        let (target_primary, target_secondary) = self.target_emotion.baseline();
        self.apply_baseline(&target_secondary);
        let (current_primary, current_secondary) = self.current_emotion.baseline();
        self.apply_baseline(&current_secondary);

        let blended = current_primary.lerp(&target_primary, self.transition_progress);
        self.set_primary(&blended);
        true
    }

    /// Per-emotion pupil motion. Each generator gates its own redraw
    /// request on a modulo of the tick counter.
    fn drift_pupils(&mut self) -> bool {
        let c = self.anim_counter;
        let mut redraw = false;

        match self.current_emotion {
            Emotion::Happy => {
                // Fast elliptical orbit
                let a = (c % 80) as f32 * 0.1572;
                self.pupil_offset_x = (7.0 * a.cos()) as i8;
                self.pupil_offset_y = (4.0 * a.sin()) as i8;
                redraw = c % 2 == 0;
            }
            Emotion::Worried => {
                // Nervous side-to-side dart
                self.pupil_offset_x = (5.0 * (c as f32 * 0.06).sin()) as i8;
                self.pupil_offset_y = (1.0 * (c as f32 * 0.09).sin()) as i8;
                redraw = c % 4 == 0;
            }
            Emotion::Playful | Emotion::Love => {
                // Orbit half the cycle, then spiral back to center
                if c % 100 < 50 {
                    let a = (c % 100) as f32 * 0.125;
                    self.pupil_offset_x = (6.0 * a.cos()) as i8;
                    self.pupil_offset_y = (4.0 * a.sin()) as i8;
                    redraw = c % 2 == 0;
                } else {
                    self.pupil_offset_x = (self.pupil_offset_x as f32 * 0.8) as i8;
                    self.pupil_offset_y = (self.pupil_offset_y as f32 * 0.8) as i8;
                    redraw = c % 3 == 0;
                }
            }
            Emotion::Surprised => {
                self.pupil_offset_x = 0;
                self.pupil_offset_y = -8;
            }
            Emotion::Sleepy => {
                self.pupil_offset_x = 0;
                self.pupil_offset_y = 5;
            }
            Emotion::Silly => {
                // Cross-eyed flip every 5 ticks
                self.pupil_offset_x = if (c / 5) % 2 != 0 { 10 } else { -10 };
                self.pupil_offset_y = 0;
                redraw = c % 5 == 0;
            }
            Emotion::Wink | Emotion::Smirk => {
                self.pupil_offset_x = 5;
                self.pupil_offset_y = 0;
            }
            Emotion::WorkingHard => {
                self.pupil_offset_x = 0;
                self.pupil_offset_y = 4;
            }
            Emotion::Excited => {
                // Rapid darting on two incommensurate cadences
                self.pupil_offset_x = if (c / 3) % 2 != 0 { 9 } else { -9 };
                self.pupil_offset_y = if (c / 5) % 2 != 0 { 7 } else { -7 };
                redraw = c % 3 == 0;
            }
            Emotion::Confused => {
                // Slow wandering Lissajous
                self.pupil_offset_x = (7.0 * (c as f32 * 0.03).cos()) as i8;
                self.pupil_offset_y = (5.0 * (c as f32 * 0.05).sin()) as i8;
                redraw = c % 2 == 0;
            }
            Emotion::Cool => {
                // Slow confident glance: ramp right, hold, ramp back, rest
                let cp = c % 240;
                self.pupil_offset_x = if cp < 60 {
                    (8.0 * (cp as f32 / 60.0)) as i8
                } else if cp < 120 {
                    8
                } else if cp < 180 {
                    (8.0 * (1.0 - (cp - 120) as f32 / 60.0)) as i8
                } else {
                    0
                };
                self.pupil_offset_y = 0;
                redraw = c % 3 == 0;
            }
            Emotion::Neutral | Emotion::Sad | Emotion::Cry | Emotion::Angry => {
                self.pupil_offset_x = 0;
                self.pupil_offset_y = 0;
            }
        }

        redraw
    }

    /// Tear, sweat and diamond-mouth counters. Each runs only under its
    /// governing emotion and is zeroed elsewhere.
    fn advance_oscillators(&mut self) -> bool {
        let mut redraw = false;

        match self.current_emotion {
            Emotion::Sad | Emotion::Cry => {
                self.tear_fall_offset += 2;
                if self.tear_fall_offset > 80 {
                    self.tear_fall_offset = 0;
                }
                redraw = true;
            }
            _ => self.tear_fall_offset = 0,
        }

        match self.current_emotion {
            Emotion::WorkingHard => {
                self.sweat_drop_offset += 3;
                if self.sweat_drop_offset > 100 {
                    self.sweat_drop_offset = 0;
                }
                redraw = true;
            }
            Emotion::Sleepy => {
                self.sweat_drop_offset += 1;
                if self.sweat_drop_offset > 100 {
                    self.sweat_drop_offset = 0;
                }
                redraw = true;
            }
            _ => self.sweat_drop_offset = 0,
        }

        if self.current_emotion == Emotion::Surprised {
            // Ping-pong between 50 and 100
            let next = self.diamond_mouth_phase as i16 + self.diamond_direction as i16 * 8;
            if next >= 100 {
                self.diamond_mouth_phase = 100;
                self.diamond_direction = -1;
            } else if next <= 50 {
                self.diamond_mouth_phase = 50;
                self.diamond_direction = 1;
            } else {
                self.diamond_mouth_phase = next as u8;
            }
            redraw = true;
        } else {
            self.diamond_mouth_phase = 0;
        }

        redraw
    }

    /// Per-emotion envelope pass: bounce, blush, sparkle and heartbeat
    /// run unconditionally; openness / mouth / brow overrides apply only
    /// once the transition has settled (and, for openness, outside a
    /// blink) so direct set_* calls stay visible mid-transition.
    fn apply_envelope(&mut self) -> bool {
        let b = self.anim_counter;
        let bf = b as f32;
        let settled = self.is_settled();
        let mut redraw = false;

        match self.current_emotion {
            Emotion::Happy => {
                self.bounce_offset = (3.5 * (bf * 0.28).sin()) as i8;
                if settled && !self.is_blinking {
                    self.left_eye_openness = 87 + (13.0 * (bf * 0.28).sin().abs()) as u8;
                    self.right_eye_openness = self.left_eye_openness;
                }
                self.sparkle_phase = 65 + (35.0 * (bf * 0.20).sin().abs()) as u8;
                self.blush_intensity = 72 + (18.0 * (bf * 0.13).sin().abs()) as u8;
                if settled {
                    self.mouth_curve = 87 + (8.0 * (bf * 0.28).sin().abs()) as i16;
                }
                redraw = b % 2 == 0;
            }
            Emotion::Worried => {
                self.bounce_offset = (1.2 * (bf * 0.10).sin() + 0.8 * (bf * 0.23).sin()) as i8;
                if settled {
                    self.left_brow_angle = 16 + (7.0 * (bf * 0.17).sin().abs()) as i8;
                    self.right_brow_angle = self.left_brow_angle;
                    self.brow_height = -6 - (4.0 * (bf * 0.17).sin().abs()) as i8;
                    self.mouth_curve = 22 + (12.0 * (bf * 0.13).sin().abs()) as i16;
                }
                redraw = b % 3 == 0;
            }
            Emotion::Love => {
                self.bounce_offset = (2.0 * (bf * 0.12).sin()) as i8;
                if settled && !self.is_blinking {
                    self.left_eye_openness = 88 + (12.0 * (bf * 0.15).sin().abs()) as u8;
                    self.right_eye_openness = self.left_eye_openness;
                }
                self.sparkle_phase = 72 + (28.0 * (bf * 0.25).sin().abs()) as u8;
                self.heart_beat_phase = 65 + (35.0 * (bf * 0.20).sin().abs()) as u8;
                self.blush_intensity = 80 + (15.0 * (bf * 0.15).sin().abs()) as u8;
                redraw = b % 2 == 0;
            }
            Emotion::Angry => {
                self.blush_intensity = 40 + (28.0 * (bf * 0.3).sin().abs()) as u8;
                if settled {
                    // Trembling frown and furrowed brows
                    self.mouth_curve = -42 + (8.0 * (bf * 0.5).sin()) as i16;
                    self.left_brow_angle = 22 + (5.0 * (bf * 0.4).sin()) as i8;
                    self.right_brow_angle = -22 - (5.0 * (bf * 0.4).sin()) as i8;
                }
                self.bounce_offset = if b % 8 < 2 { 1 } else { 0 };
                redraw = b % 2 == 0;
            }
            Emotion::Sleepy => {
                self.bounce_offset = (3.0 * (bf * 0.04).sin()) as i8;
                if settled && !self.is_blinking {
                    let droop = (20.0 * (bf * 0.03).sin().abs()) as i16;
                    self.left_eye_openness = (35 - droop).max(10) as u8;
                    self.right_eye_openness = self.left_eye_openness;
                }
                redraw = b % 3 == 0;
            }
            Emotion::Surprised => {
                self.bounce_offset = (b % 4) as i8 - 2;
                if settled && !self.is_blinking {
                    self.left_eye_openness = 93 + (7.0 * (bf * 0.4).sin().abs()) as u8;
                    self.right_eye_openness = self.left_eye_openness;
                }
                redraw = b % 2 == 0;
            }
            Emotion::Cry => {
                self.bounce_offset = (2.0 * (bf * 0.6).sin()) as i8;
                if settled && !self.is_blinking {
                    let squeeze = (20.0 * (bf * 0.3).sin().abs()) as i16;
                    self.left_eye_openness = (65 - squeeze).max(30) as u8;
                    self.right_eye_openness = self.left_eye_openness;
                }
                self.blush_intensity = 27 + (18.0 * (bf * 0.3).sin().abs()) as u8;
                redraw = b % 2 == 0;
            }
            Emotion::Sad => {
                self.bounce_offset = (1.5 * (bf * 0.06).sin()) as i8;
                // Downcast gaze drifts with the slow breath
                self.pupil_offset_y = 3 + (3.0 * (bf * 0.08).sin().abs()) as i8;
                redraw = b % 4 == 0;
            }
            Emotion::Wink => {
                self.sparkle_phase = 42 + (38.0 * (bf * 0.2).sin().abs()) as u8;
                self.bounce_offset = (1.5 * (bf * 0.25).sin()) as i8;
                redraw = b % 3 == 0;
            }
            Emotion::Smirk => {
                if settled {
                    self.left_brow_angle = 12 + (8.0 * (bf * 0.10).sin()) as i8;
                    self.brow_height = -5 + (4.0 * (bf * 0.10).sin()) as i8;
                }
                self.pupil_offset_x = 3 + (4.0 * (bf * 0.07).sin()) as i8;
                self.sparkle_phase = 25 + (30.0 * (bf * 0.15).sin().abs()) as u8;
                self.bounce_offset = (bf * 0.10).sin() as i8;
                redraw = b % 3 == 0;
            }
            Emotion::Playful => {
                if settled {
                    self.mouth_curve = 105 + (10.0 * (bf * 0.35).sin()) as i16;
                }
                self.sparkle_phase = 62 + (28.0 * (bf * 0.28).sin().abs()) as u8;
                self.bounce_offset = (2.5 * (bf * 0.30).sin()) as i8;
                redraw = b % 2 == 0;
            }
            Emotion::Silly => {
                self.bounce_offset = (3.5 * (bf * 0.25).sin()) as i8;
                self.sparkle_phase = 38 + (37.0 * (bf * 0.30).sin().abs()) as u8;
                redraw = b % 2 == 0;
            }
            Emotion::WorkingHard => {
                // Strained shake, no smooth sine
                self.bounce_offset = if b % 6 < 3 { 1 } else { -1 };
                redraw = b % 6 == 0;
            }
            Emotion::Excited => {
                self.bounce_offset = (3.5 * (bf * 0.55).sin()) as i8;
                if settled && !self.is_blinking {
                    self.left_eye_openness = 90 + (10.0 * (bf * 0.55).sin().abs()) as u8;
                    self.right_eye_openness = self.left_eye_openness;
                }
                self.sparkle_phase = 80 + (20.0 * (bf * 0.40).sin().abs()) as u8;
                self.blush_intensity = 75 + (20.0 * (bf * 0.20).sin().abs()) as u8;
                redraw = b % 2 == 0;
            }
            Emotion::Confused => {
                self.bounce_offset = (2.0 * (bf * 0.07).sin() + 1.0 * (bf * 0.19).sin()) as i8;
                if settled {
                    let wave = (bf * 0.06).sin();
                    self.left_brow_angle = -18 + (12.0 * wave) as i8;
                    self.right_brow_angle = 8 - (6.0 * wave) as i8;
                    self.brow_height = -3 - (4.0 * wave.abs()) as i8;
                }
                redraw = b % 2 == 0;
            }
            Emotion::Cool => {
                self.bounce_offset = (1.5 * (bf * 0.04).sin()) as i8;
                self.sparkle_phase = 15 + (30.0 * (bf * 0.08).sin().abs()) as u8;
                if settled && !self.is_blinking {
                    let squint = ((8.0 * (bf * 0.05).sin().abs()) as u8).min(38);
                    self.left_eye_openness = 48 - squint;
                    self.right_eye_openness = self.left_eye_openness;
                }
                redraw = b % 3 == 0;
            }
            Emotion::Neutral => {
                redraw = self.neutral_idle(settled);
            }
        }

        redraw
    }

    /// Neutral's idle life: slow breath, a scripted glance loop, an
    /// occasional brow raise and micro-smile. Runs on its own counter
    /// that freezes while a transition is in flight.
    fn neutral_idle(&mut self, settled: bool) -> bool {
        if settled {
            self.idle_counter = self.idle_counter.wrapping_add(1);
        }
        let idle = self.idle_counter;

        self.bounce_offset = (1.2 * (idle as f32 * 0.05).sin()) as i8;

        // Glance script: rest, look right, rest, drift down-left, rest
        let gp = idle % 420;
        if gp < 160 {
            self.pupil_offset_x = 0;
            self.pupil_offset_y = 0;
        } else if gp < 195 {
            let t = (gp - 160) as f32 / 35.0;
            self.pupil_offset_x = (7.0 * t) as i8;
            self.pupil_offset_y = 0;
        } else if gp < 240 {
            self.pupil_offset_x = 7;
            self.pupil_offset_y = 0;
        } else if gp < 275 {
            let t = (gp - 240) as f32 / 35.0;
            self.pupil_offset_x = (7.0 * (1.0 - t)) as i8;
            self.pupil_offset_y = 0;
        } else if gp < 340 {
            self.pupil_offset_x = 0;
            self.pupil_offset_y = 0;
        } else if gp < 368 {
            let t = (gp - 340) as f32 / 28.0;
            self.pupil_offset_x = (-5.0 * t) as i8;
            self.pupil_offset_y = (5.0 * t) as i8;
        } else if gp < 390 {
            self.pupil_offset_x = -5;
            self.pupil_offset_y = 5;
        } else {
            let t = (gp - 390) as f32 / 30.0;
            self.pupil_offset_x = (-5.0 * (1.0 - t)) as i8;
            self.pupil_offset_y = (5.0 * (1.0 - t)) as i8;
        }

        if settled {
            // Brief triangular brow raise once per 280-tick cycle
            let bp = idle % 280;
            if (230..280).contains(&bp) {
                let raw = (bp - 230) as f32 / 25.0;
                let intensity = if raw <= 1.0 { raw } else { 2.0 - raw };
                self.left_brow_angle = (8.0 * intensity) as i8;
                self.right_brow_angle = (-2.0 * intensity) as i8;
                self.brow_height = (-4.0 * intensity) as i8;
            } else {
                self.left_brow_angle = 0;
                self.right_brow_angle = 0;
                self.brow_height = 0;
            }

            // Micro-smile once per 360-tick cycle
            let sp = idle % 360;
            if (300..360).contains(&sp) {
                let raw = (sp - 300) as f32 / 30.0;
                let intensity = if raw <= 1.0 { raw } else { 2.0 - raw };
                self.mouth_curve = (14.0 * intensity) as i16;
            } else {
                self.mouth_curve = 0;
            }
        }

        idle % 2 == 0
    }

    /// Wind decorative effects down when their emotion is gone. Sparkle
    /// fades 2 points per tick outside the sparkle-bearing set; the
    /// heartbeat ping-pongs toward rest at 0 outside Love.
    fn decay_effects(&mut self) -> bool {
        let mut redraw = false;

        if !self.current_emotion.bears_sparkle() && self.sparkle_phase > 0 {
            self.sparkle_phase = self.sparkle_phase.saturating_sub(2);
            redraw = true;
        }

        if self.current_emotion != Emotion::Love && self.heart_beat_phase > 0 {
            let next = self.heart_beat_phase as i16 + self.heart_direction as i16 * 5;
            if next <= 0 {
                self.heart_beat_phase = 0;
                self.heart_direction = 1;
            } else if next >= 100 {
                self.heart_beat_phase = 100;
                self.heart_direction = -1;
            } else {
                self.heart_beat_phase = next as u8;
            }
        }

        redraw
    }
}
