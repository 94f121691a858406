//! Kao Face - animated cartoon face engine
//!
//! A face is two eye canvases and a mouth canvas plus a per-tick state
//! machine. Each tick advances the blink cycle, interpolates between
//! emotions, runs the current emotion's procedural motion (bounce,
//! pupil drift, sparkle and heartbeat envelopes, tears and sweat), and
//! redraws only when something visible changed.
//!
//! The engine draws through the [`kao_canvas::Canvas`] abstraction and
//! never touches pixels or the host GUI toolkit directly. Everything is
//! synchronous and in-memory; the optional [`TickDriver`] supplies the
//! periodic heartbeat on a tokio runtime.

pub mod driver;
pub mod engine;
pub mod face;
pub mod layout;
pub mod lock;
pub mod render;
pub mod state;

pub use driver::*;
pub use face::*;
pub use layout::*;
pub use lock::*;
pub use state::*;
