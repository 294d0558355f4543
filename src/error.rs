//! Error types for polycut operations.

use thiserror::Error;

/// Errors reported by the checked clipping pipeline.
///
/// The individual kernel operations are total and signal exhaustion by
/// returning truncated counts; only the one-call
/// [`clip_boolean`](crate::clip::clip_boolean) wrapper validates its
/// buffers up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClipError {
    /// A clip slab cannot hold the polygon it is supposed to back.
    #[error("clip slab holds {capacity} vertices but the polygon has {required}")]
    SlabTooSmall {
        /// Vertices in the input polygon.
        required: usize,
        /// Entries in the supplied slab.
        capacity: usize,
    },
}
