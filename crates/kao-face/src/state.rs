//! Facial state store
//!
//! The single mutable aggregate behind a face: which emotion is showing,
//! where every animated parameter currently sits, and the counters that
//! drive the procedural motion. The tick engine in [`crate::engine`] is
//! the only writer during animation; the renderers only read.

use kao_core::{AnimTime, Emotion, PrimaryParams, SecondaryBaseline};

/// Complete animated state of one face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceState {
    /// Emotion currently shown (the interpolation source mid-transition)
    pub current_emotion: Emotion,
    /// Emotion being transitioned toward; equals `current_emotion` when
    /// settled
    pub target_emotion: Emotion,
    /// Transition completion percent; 100 = settled
    pub transition_progress: u8,

    /// Eye openness percent, 0 closed to 100 open
    pub left_eye_openness: u8,
    pub right_eye_openness: u8,
    /// Mouth curve, -100 frown to 100 smile; >65 selects open-mouth
    /// shapes, >100 tongue out
    pub mouth_curve: i16,
    /// Eyebrow tilt degrees and shared vertical offset
    pub left_brow_angle: i8,
    pub right_brow_angle: i8,
    pub brow_height: i8,

    /// Blink sub-machine
    pub is_blinking: bool,
    pub blink_phase: u8,
    pub last_blink_time: AnimTime,

    /// Decorative effect envelopes, percent
    pub blush_intensity: u8,
    pub sparkle_phase: u8,
    pub heart_beat_phase: u8,
    /// Ping-pong direction for the heartbeat wind-down
    pub heart_direction: i8,

    /// Pupil offset in pixels; the renderer clamps it in-socket
    pub pupil_offset_x: i8,
    pub pupil_offset_y: i8,
    /// Whole-face vertical bounce in pixels
    pub bounce_offset: i8,

    /// Effect counters: wrap (tear, sweat) or ping-pong (diamond)
    pub tear_fall_offset: u8,
    pub sweat_drop_offset: u8,
    pub diamond_mouth_phase: u8,
    pub diamond_direction: i8,

    /// Tick counter driving the procedural generators (wraps)
    pub anim_counter: u32,
    /// Neutral-only idle counter; advances only once settled
    pub idle_counter: u32,
}

impl FaceState {
    /// Fresh state: neutral, eyes open, settled
    pub fn new(now: AnimTime) -> Self {
        FaceState {
            current_emotion: Emotion::Neutral,
            target_emotion: Emotion::Neutral,
            transition_progress: 100,
            left_eye_openness: 100,
            right_eye_openness: 100,
            mouth_curve: 0,
            left_brow_angle: 0,
            right_brow_angle: 0,
            brow_height: 0,
            is_blinking: false,
            blink_phase: 0,
            last_blink_time: now,
            blush_intensity: 0,
            sparkle_phase: 0,
            heart_beat_phase: 0,
            heart_direction: -1,
            pupil_offset_x: 0,
            pupil_offset_y: 0,
            bounce_offset: 0,
            tear_fall_offset: 0,
            sweat_drop_offset: 0,
            diamond_mouth_phase: 0,
            diamond_direction: 1,
            anim_counter: 0,
            idle_counter: 0,
        }
    }

    /// True once the emotion transition has settled
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.transition_progress == 100
    }

    /// Current primary parameter tuple
    pub fn primary(&self) -> PrimaryParams {
        PrimaryParams {
            eye_left: self.left_eye_openness,
            eye_right: self.right_eye_openness,
            mouth_curve: self.mouth_curve,
            brow_left: self.left_brow_angle,
            brow_right: self.right_brow_angle,
            brow_height: self.brow_height,
        }
    }

    /// Overwrite the six primary parameters
    pub fn set_primary(&mut self, params: &PrimaryParams) {
        self.left_eye_openness = params.eye_left;
        self.right_eye_openness = params.eye_right;
        self.mouth_curve = params.mouth_curve;
        self.left_brow_angle = params.brow_left;
        self.right_brow_angle = params.brow_right;
        self.brow_height = params.brow_height;
    }

    /// Stamp a secondary baseline into state. `None` channels are left
    /// alone so the decay logic can wind them down.
    pub fn apply_baseline(&mut self, baseline: &SecondaryBaseline) {
        self.blush_intensity = baseline.blush;
        if let Some(sparkle) = baseline.sparkle {
            self.sparkle_phase = sparkle;
        }
        if let Some(heartbeat) = baseline.heartbeat {
            self.heart_beat_phase = heartbeat;
        }
    }

    /// Snap instantly onto an emotion's baseline, no interpolation
    pub fn snap_to(&mut self, emotion: Emotion) {
        self.current_emotion = emotion;
        self.target_emotion = emotion;
        self.transition_progress = 100;

        let (primary, secondary) = emotion.baseline();
        self.set_primary(&primary);
        self.apply_baseline(&secondary);
    }

    /// Begin a smooth transition toward `emotion`
    pub fn transition_to(&mut self, emotion: Emotion) {
        self.target_emotion = emotion;
        if self.current_emotion != emotion {
            self.transition_progress = 0;
        }
    }

    /// Start a blink unless one is already running
    pub fn trigger_blink(&mut self) {
        if self.is_blinking {
            return;
        }
        self.is_blinking = true;
        self.blink_phase = 0;
    }

    /// Direct eye control; clamps to 100 and shows until the next
    /// settled envelope overrides it
    pub fn set_eye_openness(&mut self, left: u8, right: u8) {
        self.left_eye_openness = left.min(100);
        self.right_eye_openness = right.min(100);
    }

    /// Direct mouth control; clamps to [-100, 100]
    pub fn set_mouth_shape(&mut self, value: i16) {
        self.mouth_curve = value.clamp(-100, 100);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_matches_table() {
        let mut state = FaceState::new(AnimTime::ZERO);
        for emotion in Emotion::ALL {
            state.snap_to(emotion);

            let (primary, secondary) = emotion.baseline();
            assert_eq!(state.primary(), primary, "{:?}", emotion);
            assert_eq!(state.blush_intensity, secondary.blush);
            assert_eq!(state.current_emotion, emotion);
            assert!(state.is_settled());
        }
    }

    #[test]
    fn test_clamping() {
        let mut state = FaceState::new(AnimTime::ZERO);

        state.set_eye_openness(150, 250);
        assert_eq!(state.left_eye_openness, 100);
        assert_eq!(state.right_eye_openness, 100);

        state.set_mouth_shape(200);
        assert_eq!(state.mouth_curve, 100);
        state.set_mouth_shape(-200);
        assert_eq!(state.mouth_curve, -100);
    }

    #[test]
    fn test_trigger_blink_is_idempotent_while_blinking() {
        let mut state = FaceState::new(AnimTime::ZERO);

        state.trigger_blink();
        assert!(state.is_blinking);
        state.blink_phase = 40;

        // A second trigger must not restart the cycle
        state.trigger_blink();
        assert_eq!(state.blink_phase, 40);
    }

    #[test]
    fn test_transition_to_same_emotion_stays_settled() {
        let mut state = FaceState::new(AnimTime::ZERO);
        state.transition_to(Emotion::Neutral);
        assert!(state.is_settled());

        state.transition_to(Emotion::Happy);
        assert_eq!(state.transition_progress, 0);
        assert_eq!(state.target_emotion, Emotion::Happy);
        assert_eq!(state.current_emotion, Emotion::Neutral);
    }

    #[test]
    fn test_neutral_baseline_preserves_effect_phases() {
        let mut state = FaceState::new(AnimTime::ZERO);
        state.snap_to(Emotion::Love);
        assert_eq!(state.sparkle_phase, 100);

        let (_, neutral) = Emotion::Neutral.baseline();
        state.apply_baseline(&neutral);
        // Blush clears, sparkle/heartbeat are left to decay
        assert_eq!(state.blush_intensity, 0);
        assert_eq!(state.sparkle_phase, 100);
        assert_eq!(state.heart_beat_phase, 100);
    }
}
