// polytess: sweep-line polygon tessellation
// License: MIT

use thiserror::Error;

/// Errors reported by the public tessellation entry points.
///
/// Both categories leave the output empty; no partial result is ever
/// returned. Internal invariant violations are not represented here:
/// they are debug assertions and cannot occur in release builds.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TessError {
    /// A coordinate is NaN, infinite, or beyond the supported magnitude.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// Projection or bounding-box arithmetic produced a non-finite value
    /// although every input coordinate was accepted.
    #[error("numeric exhaustion: {0}")]
    NumericExhaustion(&'static str),
}
