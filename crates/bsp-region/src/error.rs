//! Error types for region construction.

use thiserror::Error;

/// Errors produced while building regions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegionError {
    /// The bounding hyperplanes of a convex construction contradict each
    /// other: one of them lies entirely outside the cell carved out by the
    /// previous ones, so no convex region is bounded by all of them.
    #[error("hyperplanes do not define a convex region")]
    InconsistentHyperplanes,
}

/// Result type for region construction.
pub type Result<T> = std::result::Result<T, RegionError>;
