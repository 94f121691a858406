//! Property tests for the animation state machine

use std::time::Duration;

use proptest::prelude::*;

use kao_core::{AnimTime, Emotion, FaceConfig};
use kao_face::FaceState;

fn quiet_config() -> FaceConfig {
    FaceConfig {
        auto_blink: false,
        ..FaceConfig::default()
    }
}

fn arb_emotion() -> impl Strategy<Value = Emotion> {
    (0u8..Emotion::COUNT as u8).prop_map(|i| Emotion::from_index(i).unwrap())
}

/// Every parameter the engine animates stays inside its documented range
fn assert_invariants(state: &FaceState) {
    assert!(state.left_eye_openness <= 100);
    assert!(state.right_eye_openness <= 100);
    assert!((-100..=115).contains(&state.mouth_curve));
    assert!(state.transition_progress <= 100);
    assert!(state.blink_phase < 100);
    assert!(state.blush_intensity <= 100);
    assert!(state.sparkle_phase <= 100);
    assert!(state.heart_beat_phase <= 100);
    assert!(state.tear_fall_offset <= 80);
    assert!(state.sweat_drop_offset <= 100);
    assert!(state.diamond_mouth_phase <= 100);
}

proptest! {
    #[test]
    fn blink_always_completes_in_five_ticks(emotion in arb_emotion(), warmup in 0u32..50) {
        let config = quiet_config();
        let mut state = FaceState::new(AnimTime::ZERO);
        state.snap_to(emotion);
        for _ in 0..warmup {
            state.tick(AnimTime::ZERO, &config);
        }

        state.trigger_blink();
        let mut ticks = 0;
        while state.is_blinking {
            state.tick(AnimTime::ZERO, &config);
            ticks += 1;
            prop_assert!(ticks <= 5);
        }
        prop_assert_eq!(ticks, 5);
        prop_assert_eq!(state.blink_phase, 0);
    }

    #[test]
    fn blink_openness_is_function_of_phase(phase in prop::sample::select(vec![0u8, 20, 40, 60, 80])) {
        let config = quiet_config();
        let mut state = FaceState::new(AnimTime::ZERO);
        state.is_blinking = true;
        state.blink_phase = phase;

        state.tick(AnimTime::ZERO, &config);
        let next = (phase + 20) % 100;
        let expected = if next < 50 { 100 - next * 2 } else { (next - 50) * 2 };
        prop_assert_eq!(state.left_eye_openness, expected);
        prop_assert_eq!(state.right_eye_openness, expected);
    }

    #[test]
    fn clamping_is_total(left in any::<u8>(), right in any::<u8>(), curve in any::<i16>()) {
        let mut state = FaceState::new(AnimTime::ZERO);
        state.set_eye_openness(left, right);
        prop_assert!(state.left_eye_openness <= 100);
        prop_assert!(state.right_eye_openness <= 100);

        state.set_mouth_shape(curve);
        prop_assert!((-100..=100).contains(&state.mouth_curve));
    }

    #[test]
    fn transition_terminates_and_settles(from in arb_emotion(), to in arb_emotion()) {
        prop_assume!(from != to);

        let config = quiet_config();
        let mut state = FaceState::new(AnimTime::ZERO);
        state.snap_to(from);
        state.transition_to(to);

        for n in 1..=10u8 {
            state.tick(AnimTime::ZERO, &config);
            prop_assert_eq!(state.transition_progress, (10 * n).min(100));
        }
        prop_assert_eq!(state.current_emotion, to);
        prop_assert!(state.is_settled());
    }

    #[test]
    fn auto_blink_never_fires_when_disabled(emotion in arb_emotion(), elapsed in 0u64..1_000_000) {
        let config = quiet_config();
        let mut state = FaceState::new(AnimTime::ZERO);
        state.snap_to(emotion);

        state.tick(AnimTime::from_millis(elapsed), &config);
        prop_assert!(!state.is_blinking);
    }

    #[test]
    fn auto_blink_fires_exactly_past_interval(offset in 1u64..10_000) {
        let config = FaceConfig::default();
        let interval = config.blink_interval;
        let mut state = FaceState::new(AnimTime::ZERO);

        let at = AnimTime::ZERO + interval + Duration::from_millis(offset);
        state.tick(at, &config);
        prop_assert!(state.is_blinking);

        // And never before or at the boundary
        let mut early = FaceState::new(AnimTime::ZERO);
        early.tick(AnimTime::ZERO + interval, &config);
        prop_assert!(!early.is_blinking);
    }

    #[test]
    fn tick_preserves_invariants(
        emotions in prop::collection::vec(arb_emotion(), 1..6),
        ticks_each in 1u32..120,
    ) {
        let config = FaceConfig::default();
        let mut state = FaceState::new(AnimTime::ZERO);
        let mut now = AnimTime::ZERO;

        for emotion in emotions {
            state.transition_to(emotion);
            for _ in 0..ticks_each {
                now = now + Duration::from_millis(30);
                state.tick(now, &config);
                assert_invariants(&state);
            }
        }
    }

    #[test]
    fn snap_always_matches_table(emotion in arb_emotion()) {
        let mut state = FaceState::new(AnimTime::ZERO);
        state.snap_to(emotion);

        let (primary, secondary) = emotion.baseline();
        prop_assert_eq!(state.primary(), primary);
        prop_assert_eq!(state.blush_intensity, secondary.blush);
        prop_assert!(state.is_settled());
    }
}
