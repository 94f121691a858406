//! Emotion cycle demo
//!
//! Builds a face against the command-recording canvas, drives it with
//! the tick driver, and walks through every emotion, printing what the
//! engine is doing. Pass `--shuffle` for a random order and
//! `--hold-ms <n>` to change how long each emotion stays up.

use std::time::Duration;

use rand::seq::SliceRandom;
use tracing::info;

use kao_canvas::{RecordingCanvas, RecordingProvider};
use kao_core::{Emotion, FaceConfig};
use kao_face::{Face, TickDriver};

struct Options {
    shuffle: bool,
    hold: Duration,
}

fn parse_args() -> Options {
    let mut options = Options {
        shuffle: false,
        hold: Duration::from_millis(1200),
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--shuffle" => options.shuffle = true,
            "--hold-ms" => {
                let value = args
                    .next()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1200);
                options.hold = Duration::from_millis(value);
            }
            other => {
                eprintln!("unknown argument: {other}");
                eprintln!("usage: emotion-cycle [--shuffle] [--hold-ms <millis>]");
                std::process::exit(2);
            }
        }
    }
    options
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let options = parse_args();

    let config = FaceConfig::with_bounds(240, 240);
    let interval = config.animation_speed;
    let mut provider = RecordingProvider::new();
    let face = Face::<RecordingCanvas>::new(config, &mut provider)?;

    let layout = face.layout();
    info!(
        face = layout.face_size,
        eye = layout.eye_side,
        mouth_w = layout.mouth_width,
        mouth_h = layout.mouth_height,
        "face ready"
    );

    let _driver = TickDriver::spawn(face.clone(), interval);

    let mut emotions: Vec<Emotion> = Emotion::ALL.to_vec();
    if options.shuffle {
        emotions.shuffle(&mut rand::thread_rng());
    }

    for emotion in emotions {
        face.set_emotion(emotion, true);
        tokio::time::sleep(options.hold).await;

        let state = face.snapshot();
        let frames = face.with_canvases(|left, _, mouth| (left.frames(), mouth.frames()));
        println!(
            "{:<13} eyes {:>3}/{:<3} mouth {:>4} blush {:>3} sparkle {:>3} frames eye={} mouth={}",
            emotion.name(),
            state.left_eye_openness,
            state.right_eye_openness,
            state.mouth_curve,
            state.blush_intensity,
            state.sparkle_phase,
            frames.0,
            frames.1,
        );
    }

    // A manual blink and some direct control before shutdown
    face.trigger_blink();
    tokio::time::sleep(interval * 8).await;
    face.set_emotion(Emotion::Neutral, false);
    face.set_eye_openness(30, 30);
    face.set_mouth_shape(80);
    tokio::time::sleep(options.hold).await;

    let totals = face.with_canvases(|left, right, mouth| {
        (left.frames(), right.frames(), mouth.frames())
    });
    println!(
        "done: {} / {} / {} frames drawn (left eye / right eye / mouth)",
        totals.0, totals.1, totals.2
    );

    Ok(())
}
