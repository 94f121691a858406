//! Public face handle
//!
//! [`FaceCore`] owns the three canvases and the facial state; [`Face`]
//! wraps it behind a mutex with the host-lock and clock capabilities so
//! the tick driver and the caller's mutators serialize on one logical
//! stream. Handles clone cheaply; the canvases are released when the
//! last one drops.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use kao_canvas::{Canvas, CanvasProvider};
use kao_core::{AnimTime, Clock, Emotion, FaceConfig, KaoResult, MonotonicClock, Point};

use crate::lock::HostLockGuard;
use crate::render::{draw_eye, draw_mouth};
use crate::{FaceLayout, FaceState, HostLock, NoopLock};

/// The exclusive owner of one face's canvases and state
pub struct FaceCore<C: Canvas> {
    config: FaceConfig,
    layout: FaceLayout,
    state: FaceState,
    left_eye: C,
    right_eye: C,
    mouth: C,
}

impl<C: Canvas> FaceCore<C> {
    /// Allocate canvases and render the initial neutral face.
    ///
    /// Allocation is the only fallible step; on failure nothing
    /// half-built escapes (the already-created canvases drop here).
    pub fn new<P>(config: FaceConfig, provider: &mut P, now: AnimTime) -> KaoResult<Self>
    where
        P: CanvasProvider<Canvas = C>,
    {
        let layout = FaceLayout::from_config(&config)?;

        let left_eye = provider.create(layout.eye_side, layout.eye_side)?;
        let right_eye = provider.create(layout.eye_side, layout.eye_side)?;
        let mouth = provider.create(layout.mouth_width, layout.mouth_height)?;

        let mut core = FaceCore {
            config,
            layout,
            state: FaceState::new(now),
            left_eye,
            right_eye,
            mouth,
        };
        core.render_all();

        info!(
            parent_w = core.config.width,
            parent_h = core.config.height,
            face = layout.face_size,
            eye = layout.eye_side,
            mouth_w = layout.mouth_width,
            mouth_h = layout.mouth_height,
            "face initialized"
        );

        Ok(core)
    }

    /// One animation tick; redraws only when the state machine asks
    pub fn tick(&mut self, now: AnimTime) {
        if self.state.tick(now, &self.config) {
            self.render_all();
        }
    }

    pub fn set_emotion(&mut self, emotion: Emotion, smooth: bool) {
        debug!(emotion = emotion.name(), smooth, "set emotion");
        if smooth {
            self.state.transition_to(emotion);
        } else {
            self.state.snap_to(emotion);
            self.render_all();
        }
    }

    pub fn set_eye_openness(&mut self, left: u8, right: u8) {
        self.state.set_eye_openness(left, right);
        self.render_eyes();
    }

    pub fn set_mouth_shape(&mut self, value: i16) {
        self.state.set_mouth_shape(value);
        self.render_mouth();
    }

    pub fn set_auto_blink(&mut self, enable: bool) {
        self.config.auto_blink = enable;
    }

    pub fn trigger_blink(&mut self) {
        self.state.trigger_blink();
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.layout.origin = Point::new(x, y);
    }

    pub fn state(&self) -> &FaceState {
        &self.state
    }

    pub fn layout(&self) -> &FaceLayout {
        &self.layout
    }

    pub fn canvases(&self) -> (&C, &C, &C) {
        (&self.left_eye, &self.right_eye, &self.mouth)
    }

    fn render_all(&mut self) {
        self.render_eyes();
        self.render_mouth();
    }

    fn render_eyes(&mut self) {
        draw_eye(
            &mut self.left_eye,
            &self.state,
            self.state.left_eye_openness,
            true,
        );
        draw_eye(
            &mut self.right_eye,
            &self.state,
            self.state.right_eye_openness,
            false,
        );
    }

    fn render_mouth(&mut self) {
        draw_mouth(&mut self.mouth, &self.state, self.state.mouth_curve);
    }
}

impl<C: Canvas> Drop for FaceCore<C> {
    fn drop(&mut self) {
        info!("face deinitialized");
    }
}

/// Cloneable handle to a face.
///
/// All entry points serialize on an internal mutex and bracket canvas
/// work with the injected [`HostLock`], so ticks and mutators form a
/// single logical stream of mutation.
pub struct Face<C: Canvas> {
    core: Arc<Mutex<FaceCore<C>>>,
    host_lock: Arc<dyn HostLock>,
    clock: Arc<dyn Clock>,
}

impl<C: Canvas> Clone for Face<C> {
    fn clone(&self) -> Self {
        Face {
            core: Arc::clone(&self.core),
            host_lock: Arc::clone(&self.host_lock),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C: Canvas> Face<C> {
    /// Build a face with the default no-op host lock and wall clock
    pub fn new<P>(config: FaceConfig, provider: &mut P) -> KaoResult<Self>
    where
        P: CanvasProvider<Canvas = C>,
    {
        Face::with_hooks(
            config,
            provider,
            Arc::new(NoopLock),
            Arc::new(MonotonicClock::new()),
        )
    }

    /// Build a face with host-supplied lock and clock capabilities
    pub fn with_hooks<P>(
        config: FaceConfig,
        provider: &mut P,
        host_lock: Arc<dyn HostLock>,
        clock: Arc<dyn Clock>,
    ) -> KaoResult<Self>
    where
        P: CanvasProvider<Canvas = C>,
    {
        let now = clock.now();
        let core = {
            let _guard = HostLockGuard::new(&*host_lock);
            FaceCore::new(config, provider, now)?
        };

        Ok(Face {
            core: Arc::new(Mutex::new(core)),
            host_lock,
            clock,
        })
    }

    /// Advance the animation one tick at the current time.
    ///
    /// Normally called by the [`TickDriver`](crate::TickDriver); call it
    /// directly to drive the face from your own timer.
    pub fn update(&self) {
        self.tick_at(self.clock.now());
    }

    /// Advance the animation one tick at an explicit time
    pub fn tick_at(&self, now: AnimTime) {
        let _guard = HostLockGuard::new(&*self.host_lock);
        self.core.lock().tick(now);
    }

    /// Switch emotion, either snapping or transitioning smoothly
    pub fn set_emotion(&self, emotion: Emotion, smooth: bool) {
        let _guard = HostLockGuard::new(&*self.host_lock);
        self.core.lock().set_emotion(emotion, smooth);
    }

    /// Emotion currently shown
    pub fn emotion(&self) -> Emotion {
        self.core.lock().state.current_emotion
    }

    /// Direct eye control, clamped to 0-100; renders immediately but the
    /// next settled tick's envelope may override it
    pub fn set_eye_openness(&self, left: u8, right: u8) {
        let _guard = HostLockGuard::new(&*self.host_lock);
        self.core.lock().set_eye_openness(left, right);
    }

    /// Direct mouth control, clamped to [-100, 100]; renders immediately
    pub fn set_mouth_shape(&self, value: i16) {
        let _guard = HostLockGuard::new(&*self.host_lock);
        self.core.lock().set_mouth_shape(value);
    }

    /// Toggle automatic blink scheduling
    pub fn set_auto_blink(&self, enable: bool) {
        self.core.lock().set_auto_blink(enable);
    }

    /// Start a blink unless one is already running
    pub fn trigger_blink(&self) {
        self.core.lock().trigger_blink();
    }

    /// Move the face within the host surface
    pub fn set_position(&self, x: i32, y: i32) {
        let _guard = HostLockGuard::new(&*self.host_lock);
        self.core.lock().set_position(x, y);
    }

    /// Copy of the fixed layout (canvas sizes and positions)
    pub fn layout(&self) -> FaceLayout {
        *self.core.lock().layout()
    }

    /// Copy of the current animated state
    pub fn snapshot(&self) -> FaceState {
        *self.core.lock().state()
    }

    /// Read access to the three canvases (left eye, right eye, mouth)
    pub fn with_canvases<R>(&self, f: impl FnOnce(&C, &C, &C) -> R) -> R {
        let _guard = HostLockGuard::new(&*self.host_lock);
        let core = self.core.lock();
        let (left, right, mouth) = core.canvases();
        f(left, right, mouth)
    }
}

#[cfg(test)]
mod tests {
    use kao_canvas::{RecordingCanvas, RecordingProvider};
    use kao_core::{KaoError, ManualClock};

    use super::*;

    fn new_face() -> Face<RecordingCanvas> {
        let mut provider = RecordingProvider::new();
        Face::new(FaceConfig::default(), &mut provider).unwrap()
    }

    fn total_frames(face: &Face<RecordingCanvas>) -> u64 {
        face.with_canvases(|left, right, mouth| left.frames() + right.frames() + mouth.frames())
    }

    #[test]
    fn test_construction_renders_once_per_canvas() {
        let face = new_face();
        face.with_canvases(|left, right, mouth| {
            assert_eq!(left.frames(), 1);
            assert_eq!(right.frames(), 1);
            assert_eq!(mouth.frames(), 1);
        });
        assert_eq!(face.emotion(), Emotion::Neutral);
    }

    #[test]
    fn test_allocation_failure_aborts_construction() {
        let mut provider = RecordingProvider::with_budget(2);
        let result = Face::<RecordingCanvas>::new(FaceConfig::default(), &mut provider);
        assert!(matches!(
            result,
            Err(KaoError::CanvasAllocation { .. })
        ));
    }

    #[test]
    fn test_snap_emotion_forces_render() {
        let face = new_face();
        let before = total_frames(&face);

        face.set_emotion(Emotion::Angry, false);
        assert_eq!(face.emotion(), Emotion::Angry);
        assert_eq!(total_frames(&face), before + 3);

        let (angry, _) = Emotion::Angry.baseline();
        assert_eq!(face.snapshot().primary(), angry);
    }

    #[test]
    fn test_smooth_emotion_defers_render_to_tick() {
        let face = new_face();
        let before = total_frames(&face);

        face.set_emotion(Emotion::Sad, true);
        assert_eq!(total_frames(&face), before);
        assert_eq!(face.emotion(), Emotion::Neutral);

        for _ in 0..10 {
            face.tick_at(AnimTime::ZERO);
        }
        assert_eq!(face.emotion(), Emotion::Sad);
        assert!(total_frames(&face) > before);
    }

    #[test]
    fn test_quiet_tick_skips_render() {
        let face = new_face();
        face.set_auto_blink(false);

        // Collect frame counts over a few settled-neutral ticks; the
        // engine must skip rendering on the quiet ones.
        let mut deltas = Vec::new();
        for _ in 0..6 {
            let before = total_frames(&face);
            face.tick_at(AnimTime::ZERO);
            deltas.push(total_frames(&face) - before);
        }
        assert!(deltas.contains(&0), "deltas={:?}", deltas);
        assert!(deltas.contains(&3), "deltas={:?}", deltas);
    }

    #[test]
    fn test_mutators_render_their_canvases_only() {
        let face = new_face();

        let before = face.with_canvases(|l, _, m| (l.frames(), m.frames()));
        face.set_eye_openness(40, 40);
        let after = face.with_canvases(|l, _, m| (l.frames(), m.frames()));
        assert_eq!(after.0, before.0 + 1);
        assert_eq!(after.1, before.1);

        face.set_mouth_shape(-60);
        let last = face.with_canvases(|l, _, m| (l.frames(), m.frames()));
        assert_eq!(last.0, after.0);
        assert_eq!(last.1, after.1 + 1);
    }

    #[test]
    fn test_auto_blink_uses_injected_clock() {
        let mut provider = RecordingProvider::new();
        let clock = Arc::new(ManualClock::new());
        let face = Face::<RecordingCanvas>::with_hooks(
            FaceConfig::default(),
            &mut provider,
            Arc::new(NoopLock),
            clock.clone(),
        )
        .unwrap();

        clock.advance(std::time::Duration::from_millis(3001));
        face.update();
        assert!(face.snapshot().is_blinking);
    }

    #[test]
    fn test_fresh_state_after_drop_and_recreate() {
        let mut provider = RecordingProvider::new();
        let face = Face::<RecordingCanvas>::new(FaceConfig::default(), &mut provider).unwrap();
        face.set_emotion(Emotion::Love, false);
        drop(face);

        let face = Face::<RecordingCanvas>::new(FaceConfig::default(), &mut provider).unwrap();
        let state = face.snapshot();
        assert_eq!(state.current_emotion, Emotion::Neutral);
        assert_eq!(state.sparkle_phase, 0);
        assert_eq!(state.left_eye_openness, 100);
    }

    #[test]
    fn test_two_faces_are_independent() {
        let mut provider = RecordingProvider::new();
        let a = Face::<RecordingCanvas>::new(FaceConfig::default(), &mut provider).unwrap();
        let b = Face::<RecordingCanvas>::new(FaceConfig::default(), &mut provider).unwrap();

        a.set_emotion(Emotion::Cry, false);
        assert_eq!(a.emotion(), Emotion::Cry);
        assert_eq!(b.emotion(), Emotion::Neutral);
    }

    #[test]
    fn test_set_position_moves_origin() {
        let face = new_face();
        face.set_position(12, -5);
        assert_eq!(face.layout().origin, Point::new(12, -5));
    }
}
