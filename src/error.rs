//! Errors

use crate::bitmap::BitmapFormat;

/// Failures surfaced by the few fallible entry points
///
/// Drawing primitives never return these; a degenerate or rejected draw is
/// a silent no-op. Precondition violations panic instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Context is absent or locked
    #[error("graphics context is unavailable or locked")]
    InvalidContext,
    /// Clipping left nothing to draw
    #[error("clipped region is empty")]
    EmptyRegion,
    /// Backing storage for a draw mask could not be reserved
    #[error("failed to allocate {bytes} bytes")]
    AllocationFailure { bytes: usize },
    /// Operation not available for this pixel format
    #[error("unsupported bitmap format {0:?}")]
    UnsupportedFormat(BitmapFormat),
    /// Frame buffer was already captured
    #[error("frame buffer is already captured")]
    FrameBufferLocked,
    /// Snapshot encode/decode failure
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
