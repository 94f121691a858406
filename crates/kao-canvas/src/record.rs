//! Command-recording canvas
//!
//! Captures the draw stream instead of rasterizing it. Tests assert on
//! the recorded ops and on the batch counter (the redraw-gating
//! property is "no batch was issued this tick"); demos dump per-frame
//! command counts.

use kao_core::{Area, KaoError, KaoResult, Opacity, Point, Rgb};

use crate::{Canvas, CanvasProvider, LineStyle, RectStyle};

/// One recorded draw command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    FillBg { color: Rgb, opa: Opacity },
    Line { style: LineStyle, p1: Point, p2: Point },
    Rect { style: RectStyle, area: Area },
}

/// Canvas that records commands instead of drawing pixels
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    /// Commands of the most recent (possibly still open) frame
    ops: Vec<DrawOp>,
    /// Completed batches since creation
    frames: u64,
    in_frame: bool,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        RecordingCanvas {
            width,
            height,
            ops: Vec::new(),
            frames: 0,
            in_frame: false,
        }
    }

    /// Commands recorded for the most recent frame
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of completed draw batches
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Count ops matching a predicate in the most recent frame
    pub fn count_ops(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_bg(&mut self, color: Rgb, opa: Opacity) {
        // A fill starts a fresh frame's command list
        self.ops.clear();
        self.ops.push(DrawOp::FillBg { color, opa });
    }

    fn begin_frame(&mut self) {
        self.in_frame = true;
    }

    fn draw_line(&mut self, style: &LineStyle, p1: Point, p2: Point) {
        debug_assert!(self.in_frame, "draw outside of a frame");
        self.ops.push(DrawOp::Line { style: *style, p1, p2 });
    }

    fn draw_rect(&mut self, style: &RectStyle, area: Area) {
        debug_assert!(self.in_frame, "draw outside of a frame");
        self.ops.push(DrawOp::Rect { style: *style, area });
    }

    fn end_frame(&mut self) {
        self.in_frame = false;
        self.frames += 1;
    }
}

/// Provider handing out [`RecordingCanvas`] surfaces.
///
/// An optional allocation budget makes it double as the out-of-memory
/// fixture: once the budget is spent, `create` fails the way a real
/// allocator would.
#[derive(Debug, Default)]
pub struct RecordingProvider {
    budget: Option<u32>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        RecordingProvider { budget: None }
    }

    /// Fail after `budget` successful allocations
    pub fn with_budget(budget: u32) -> Self {
        RecordingProvider {
            budget: Some(budget),
        }
    }
}

impl CanvasProvider for RecordingProvider {
    type Canvas = RecordingCanvas;

    fn create(&mut self, width: u32, height: u32) -> KaoResult<RecordingCanvas> {
        if let Some(budget) = self.budget.as_mut() {
            if *budget == 0 {
                return Err(KaoError::CanvasAllocation { width, height });
            }
            *budget -= 1;
        }
        Ok(RecordingCanvas::new(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_counting() {
        let mut canvas = RecordingCanvas::new(10, 10);
        assert_eq!(canvas.frames(), 0);

        canvas.fill_bg(Rgb::WHITE, Opacity::COVER);
        canvas.begin_frame();
        canvas.draw_line(&LineStyle::default(), Point::new(0, 0), Point::new(5, 5));
        canvas.end_frame();

        assert_eq!(canvas.frames(), 1);
        assert_eq!(canvas.ops().len(), 2);
    }

    #[test]
    fn test_fill_resets_command_list() {
        let mut canvas = RecordingCanvas::new(10, 10);

        canvas.fill_bg(Rgb::WHITE, Opacity::COVER);
        canvas.begin_frame();
        canvas.draw_rect(&RectStyle::default(), Area::new(0, 0, 4, 4));
        canvas.end_frame();

        canvas.fill_bg(Rgb::WHITE, Opacity::COVER);
        assert_eq!(canvas.ops().len(), 1);
    }

    #[test]
    fn test_budget_exhaustion() {
        let mut provider = RecordingProvider::with_budget(2);
        assert!(provider.create(8, 8).is_ok());
        assert!(provider.create(8, 8).is_ok());

        let err = provider.create(8, 8).unwrap_err();
        assert!(matches!(err, KaoError::CanvasAllocation { width: 8, .. }));
    }
}
