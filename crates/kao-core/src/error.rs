//! Error types for the Kao engine
//!
//! The taxonomy is intentionally small: canvas allocation is the only
//! fatal failure, and it can only happen at construction time. Invalid
//! runtime inputs (out-of-range emotion indices, oversized percentages)
//! are ignored or clamped at the call site and never become errors.

use thiserror::Error;

/// Kao engine errors
#[derive(Error, Debug)]
pub enum KaoError {
    #[error("canvas allocation failed: {width}x{height} pixels")]
    CanvasAllocation { width: u32, height: u32 },

    #[error("parent bounds too small for a face: {width}x{height}")]
    BoundsTooSmall { width: u32, height: u32 },
}

/// Result type for Kao operations
pub type KaoResult<T> = Result<T, KaoError>;
