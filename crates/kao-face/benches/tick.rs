//! Steady-state tick throughput per emotion

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use kao_canvas::{RecordingCanvas, RecordingProvider};
use kao_core::{AnimTime, Emotion, FaceConfig};
use kao_face::{Face, FaceState};

fn bench_state_tick(c: &mut Criterion) {
    let config = FaceConfig {
        auto_blink: false,
        ..FaceConfig::default()
    };

    let mut group = c.benchmark_group("state_tick");
    for emotion in [
        Emotion::Neutral,
        Emotion::Happy,
        Emotion::Love,
        Emotion::Surprised,
        Emotion::WorkingHard,
    ] {
        group.bench_function(emotion.name(), |b| {
            let mut state = FaceState::new(AnimTime::ZERO);
            state.snap_to(emotion);
            b.iter(|| {
                black_box(state.tick(AnimTime::ZERO, &config));
            });
        });
    }
    group.finish();
}

fn bench_full_tick_with_render(c: &mut Criterion) {
    let config = FaceConfig {
        auto_blink: false,
        ..FaceConfig::default()
    };

    c.bench_function("face_tick_rendered", |b| {
        let mut provider = RecordingProvider::new();
        let face = Face::<RecordingCanvas>::new(config.clone(), &mut provider).unwrap();
        face.set_emotion(Emotion::Excited, false);
        b.iter(|| {
            face.tick_at(black_box(AnimTime::ZERO));
        });
    });
}

criterion_group!(benches, bench_state_tick, bench_full_tick_with_render);
criterion_main!(benches);
