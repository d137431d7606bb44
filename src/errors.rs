//! Kernel error kinds

use thiserror::Error;

/// All the ways a geometry operation can fail.
///
/// Every error is raised synchronously at the call that detects the
/// violation; nothing is retried internally. A failed operation leaves its
/// inputs unmodified: composition routines work on owned or freshly copied
/// data, never on borrowed geometry they might half-mutate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A generator or builder received parameters that would produce a
    /// degenerate result (zero length, non-positive radius, width ≤ 0 at a
    /// sampled parameter, too few boundary points).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A named port was requested but is absent from the shape's port map.
    #[error("port `{0}` not found")]
    PortNotFound(String),
    /// An element handed to `link` cannot take part in sequence composition:
    /// it lacks the entry/exit ports, or a scalar spacing is negative or
    /// leads the sequence.
    #[error("link: {0}")]
    Link(String),
    /// Combination of shapes whose coordinate dimensionality disagrees.
    /// Reserved: every shape in the kernel is currently 2D.
    #[error("dimension mismatch: expected {expected}D, found {found}D")]
    DimensionMismatch { expected: usize, found: usize },
}

pub type Result<T> = core::result::Result<T, GeometryError>;
