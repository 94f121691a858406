//! Emotion model and baseline parameter table
//!
//! Each emotion maps to a fixed, hand-tuned baseline: six primary
//! parameters (eye openness, mouth curve, eyebrow pose) that are
//! interpolated during transitions, and a secondary baseline (blush,
//! sparkle, heartbeat) that is stamped into state directly so the
//! decorative effects pop instead of fading in. The numbers encode the
//! product's visual design; they are data, not derivation.

/// Discrete facial expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Emotion {
    #[default]
    Neutral,
    Happy,
    Worried,
    Sad,
    Surprised,
    Angry,
    Sleepy,
    Wink,
    Love,
    Playful,
    Silly,
    Smirk,
    Cry,
    WorkingHard,
    Excited,
    Confused,
    Cool,
}

impl Emotion {
    pub const COUNT: usize = 17;

    /// Every emotion, in table order
    pub const ALL: [Emotion; Emotion::COUNT] = [
        Emotion::Neutral,
        Emotion::Happy,
        Emotion::Worried,
        Emotion::Sad,
        Emotion::Surprised,
        Emotion::Angry,
        Emotion::Sleepy,
        Emotion::Wink,
        Emotion::Love,
        Emotion::Playful,
        Emotion::Silly,
        Emotion::Smirk,
        Emotion::Cry,
        Emotion::WorkingHard,
        Emotion::Excited,
        Emotion::Confused,
        Emotion::Cool,
    ];

    /// Parse an untrusted numeric emotion id.
    ///
    /// Out-of-range values yield `None`; callers treat that as a silent
    /// no-op rather than an error.
    pub fn from_index(index: u8) -> Option<Emotion> {
        Emotion::ALL.get(index as usize).copied()
    }

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Display name for logs and demos
    pub fn name(self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Happy => "happy",
            Emotion::Worried => "worried",
            Emotion::Sad => "sad",
            Emotion::Surprised => "surprised",
            Emotion::Angry => "angry",
            Emotion::Sleepy => "sleepy",
            Emotion::Wink => "wink",
            Emotion::Love => "love",
            Emotion::Playful => "playful",
            Emotion::Silly => "silly",
            Emotion::Smirk => "smirk",
            Emotion::Cry => "cry",
            Emotion::WorkingHard => "working-hard",
            Emotion::Excited => "excited",
            Emotion::Confused => "confused",
            Emotion::Cool => "cool",
        }
    }

    /// Baseline parameter tuple for this emotion
    pub fn baseline(self) -> (PrimaryParams, SecondaryBaseline) {
        match self {
            Emotion::Neutral => (
                PrimaryParams::new(100, 100, 0, 0, 0, 0),
                // Blush clears; sparkle/heartbeat are left to decay.
                SecondaryBaseline {
                    blush: 0,
                    sparkle: None,
                    heartbeat: None,
                },
            ),
            Emotion::Happy => (
                PrimaryParams::new(96, 96, 90, -4, -4, -5),
                SecondaryBaseline::full(82, 90, 40),
            ),
            Emotion::Worried => (
                PrimaryParams::new(78, 78, 28, 18, 18, -7),
                SecondaryBaseline::full(20, 0, 0),
            ),
            Emotion::Sad => (
                PrimaryParams::new(60, 60, -75, -15, 15, 3),
                SecondaryBaseline::full(0, 0, 0),
            ),
            Emotion::Surprised => (
                PrimaryParams::new(100, 100, 50, 0, 0, -10),
                SecondaryBaseline::full(20, 60, 0),
            ),
            Emotion::Angry => (
                PrimaryParams::new(75, 75, -45, 25, -25, 5),
                SecondaryBaseline::full(50, 0, 0),
            ),
            Emotion::Sleepy => (
                PrimaryParams::new(35, 35, -5, -5, 5, 8),
                SecondaryBaseline::full(30, 0, 0),
            ),
            Emotion::Wink => (
                PrimaryParams::new(85, 15, 70, 8, -8, -2),
                SecondaryBaseline::full(60, 75, 0),
            ),
            Emotion::Love => (
                PrimaryParams::new(95, 95, 80, 3, 3, -3),
                SecondaryBaseline::full(90, 100, 100),
            ),
            Emotion::Playful => (
                PrimaryParams::new(78, 80, 110, 12, -8, 0),
                SecondaryBaseline::full(45, 85, 0),
            ),
            Emotion::Silly => (
                PrimaryParams::new(95, 92, 75, 25, -18, 4),
                SecondaryBaseline::full(55, 65, 0),
            ),
            Emotion::Smirk => (
                PrimaryParams::new(80, 75, 40, 15, -5, -5),
                SecondaryBaseline::full(25, 50, 0),
            ),
            Emotion::Cry => (
                PrimaryParams::new(70, 70, -70, -15, 15, 8),
                SecondaryBaseline::full(35, 0, 0),
            ),
            Emotion::WorkingHard => (
                PrimaryParams::new(65, 65, 0, 22, -22, 4),
                SecondaryBaseline::full(60, 0, 0),
            ),
            Emotion::Excited => (
                PrimaryParams::new(100, 100, 95, 8, 8, -8),
                SecondaryBaseline::full(85, 100, 80),
            ),
            Emotion::Confused => (
                PrimaryParams::new(88, 75, 12, -18, 8, -3),
                SecondaryBaseline::full(15, 0, 0),
            ),
            Emotion::Cool => (
                PrimaryParams::new(48, 48, 35, 5, -3, -4),
                SecondaryBaseline::full(10, 40, 0),
            ),
        }
    }

    /// Emotions whose idle loop keeps sparkles alive; everywhere else the
    /// sparkle envelope decays toward zero.
    pub fn bears_sparkle(self) -> bool {
        !matches!(
            self,
            Emotion::Neutral
                | Emotion::Angry
                | Emotion::Sad
                | Emotion::Cry
                | Emotion::Sleepy
                | Emotion::Surprised
                | Emotion::WorkingHard
                | Emotion::Confused
                | Emotion::Worried
        )
    }
}

/// The six interpolated facial parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrimaryParams {
    /// Left eye openness, 0 (closed) to 100 (fully open)
    pub eye_left: u8,
    /// Right eye openness, 0 to 100
    pub eye_right: u8,
    /// Mouth curve: negative = frown, positive = smile, >65 open
    /// mouth, >100 tongue out
    pub mouth_curve: i16,
    /// Left eyebrow tilt in degrees
    pub brow_left: i8,
    /// Right eyebrow tilt in degrees
    pub brow_right: i8,
    /// Eyebrow vertical offset in pixels
    pub brow_height: i8,
}

impl PrimaryParams {
    pub const fn new(
        eye_left: u8,
        eye_right: u8,
        mouth_curve: i16,
        brow_left: i8,
        brow_right: i8,
        brow_height: i8,
    ) -> Self {
        PrimaryParams {
            eye_left,
            eye_right,
            mouth_curve,
            brow_left,
            brow_right,
            brow_height,
        }
    }

    /// Linear blend toward `target`, weighted by `progress` percent.
    ///
    /// Integer arithmetic matches the per-tick transition: at 0 the
    /// result is `self`, at 100 exactly `target`.
    pub fn lerp(&self, target: &PrimaryParams, progress: u8) -> PrimaryParams {
        let t = progress.min(100) as i32;
        let mix = |a: i32, b: i32| a + (b - a) * t / 100;

        PrimaryParams {
            eye_left: mix(self.eye_left as i32, target.eye_left as i32) as u8,
            eye_right: mix(self.eye_right as i32, target.eye_right as i32) as u8,
            mouth_curve: mix(self.mouth_curve as i32, target.mouth_curve as i32) as i16,
            brow_left: mix(self.brow_left as i32, target.brow_left as i32) as i8,
            brow_right: mix(self.brow_right as i32, target.brow_right as i32) as i8,
            brow_height: mix(self.brow_height as i32, target.brow_height as i32) as i8,
        }
    }
}

/// Baseline intensities for the decorative side effects.
///
/// These are NOT interpolated with the primary parameters: a transition
/// stamps them into state immediately. `None` leaves the channel alone
/// so the decay logic can wind it down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SecondaryBaseline {
    pub blush: u8,
    pub sparkle: Option<u8>,
    pub heartbeat: Option<u8>,
}

impl SecondaryBaseline {
    pub const fn full(blush: u8, sparkle: u8, heartbeat: u8) -> Self {
        SecondaryBaseline {
            blush,
            sparkle: Some(sparkle),
            heartbeat: Some(heartbeat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_emotion_has_a_baseline() {
        for emotion in Emotion::ALL {
            let (primary, _) = emotion.baseline();
            assert!(primary.eye_left <= 100);
            assert!(primary.eye_right <= 100);
            assert!((-100..=110).contains(&primary.mouth_curve));
        }
    }

    #[test]
    fn test_from_index_bounds() {
        assert_eq!(Emotion::from_index(0), Some(Emotion::Neutral));
        assert_eq!(Emotion::from_index(16), Some(Emotion::Cool));
        assert_eq!(Emotion::from_index(17), None);
        assert_eq!(Emotion::from_index(255), None);
    }

    #[test]
    fn test_index_roundtrip() {
        for emotion in Emotion::ALL {
            assert_eq!(Emotion::from_index(emotion.index()), Some(emotion));
        }
    }

    #[test]
    fn test_lerp_endpoints() {
        let (from, _) = Emotion::Neutral.baseline();
        let (to, _) = Emotion::Sad.baseline();

        assert_eq!(from.lerp(&to, 0), from);
        assert_eq!(from.lerp(&to, 100), to);
    }

    #[test]
    fn test_lerp_midpoint() {
        let from = PrimaryParams::new(100, 100, 0, 0, 0, 0);
        let to = PrimaryParams::new(60, 60, -75, -15, 15, 3);

        let mid = from.lerp(&to, 50);
        assert_eq!(mid.eye_left, 80);
        assert_eq!(mid.mouth_curve, -37);
        assert_eq!(mid.brow_left, -7);
    }

    #[test]
    fn test_neutral_leaves_sparkle_alone() {
        let (_, secondary) = Emotion::Neutral.baseline();
        assert_eq!(secondary.blush, 0);
        assert_eq!(secondary.sparkle, None);
        assert_eq!(secondary.heartbeat, None);

        let (_, secondary) = Emotion::Love.baseline();
        assert_eq!(secondary.sparkle, Some(100));
        assert_eq!(secondary.heartbeat, Some(100));
    }

    mod lerp_properties {
        use proptest::prelude::*;

        use super::*;

        fn arb_emotion() -> impl Strategy<Value = Emotion> {
            (0u8..Emotion::COUNT as u8).prop_map(|i| Emotion::from_index(i).unwrap())
        }

        proptest! {
            #[test]
            fn lerp_stays_between_endpoints(
                from in arb_emotion(),
                to in arb_emotion(),
                progress in 0u8..=100,
            ) {
                let (a, _) = from.baseline();
                let (b, _) = to.baseline();
                let mid = a.lerp(&b, progress);

                let lo = a.mouth_curve.min(b.mouth_curve);
                let hi = a.mouth_curve.max(b.mouth_curve);
                prop_assert!((lo..=hi).contains(&mid.mouth_curve));

                let lo = a.eye_left.min(b.eye_left);
                let hi = a.eye_left.max(b.eye_left);
                prop_assert!((lo..=hi).contains(&mid.eye_left));
            }
        }
    }

    #[test]
    fn test_sparkle_bearing_set() {
        assert!(Emotion::Love.bears_sparkle());
        assert!(Emotion::Happy.bears_sparkle());
        assert!(Emotion::Cool.bears_sparkle());
        assert!(!Emotion::Neutral.bears_sparkle());
        assert!(!Emotion::WorkingHard.bears_sparkle());
        assert!(!Emotion::Worried.bears_sparkle());
    }
}
