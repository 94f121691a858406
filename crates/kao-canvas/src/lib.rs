//! Kao Canvas - the drawing surface the renderers talk to
//!
//! The engine never rasterizes pixels itself. It computes geometry and
//! emits lines and rounded rectangles against a [`Canvas`], and the host
//! supplies the rasterizer: an embedded graphics library, a GUI toolkit
//! canvas widget, a software framebuffer. The [`RecordingCanvas`] in
//! this crate captures the command stream instead of rasterizing, which
//! is what the tests and demos run against.

pub mod canvas;
pub mod record;
pub mod style;

pub use canvas::*;
pub use record::*;
pub use style::*;
