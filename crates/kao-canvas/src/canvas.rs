//! Canvas and canvas-provider traits

use kao_core::{Area, KaoResult, Opacity, Point, Rgb};

use crate::{LineStyle, RectStyle};

/// A fixed-size pixel surface the renderers draw into.
///
/// Draw calls between [`begin_frame`](Canvas::begin_frame) and
/// [`end_frame`](Canvas::end_frame) form one batch; the host composites
/// the batch into its buffer when the frame ends. Coordinates may fall
/// outside the surface - implementations clip.
pub trait Canvas {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Flood the whole surface with a background color
    fn fill_bg(&mut self, color: Rgb, opa: Opacity);

    /// Open a drawing batch
    fn begin_frame(&mut self);

    fn draw_line(&mut self, style: &LineStyle, p1: Point, p2: Point);

    fn draw_rect(&mut self, style: &RectStyle, area: Area);

    /// Close the batch and composite it
    fn end_frame(&mut self);
}

/// Allocates canvases at face construction time.
///
/// This is the one fallible step of initialization: a provider that
/// cannot back a `width x height` buffer returns
/// [`KaoError::CanvasAllocation`](kao_core::KaoError::CanvasAllocation)
/// and construction aborts without leaving half-built state behind.
pub trait CanvasProvider {
    type Canvas: Canvas;

    fn create(&mut self, width: u32, height: u32) -> KaoResult<Self::Canvas>;
}
