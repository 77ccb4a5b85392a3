//! Geometric utility functions for d-dimensional geometry calculations.
//!
//! This module contains utility functions for computing norms, distances and
//! circumsphere properties of simplices, plus seeded random point generation
//! used by tests and benchmarks.

use thiserror::Error;

pub mod circumsphere;
pub mod norms;
pub mod point_generation;

pub use circumsphere::*;
pub use norms::*;
pub use point_generation::*;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur during circumcenter and circumradius computation.
///
/// # Examples
///
/// ```rust
/// use lifted_delaunay::geometry::util::CircumcenterError;
///
/// let err = CircumcenterError::EmptyPointSet;
/// assert!(matches!(err, CircumcenterError::EmptyPointSet));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CircumcenterError {
    /// No points were supplied.
    #[error("Empty point set")]
    EmptyPointSet,
    /// The number of points does not match the dimension (a D-simplex needs D+1 points).
    #[error(
        "Points do not form a valid simplex: expected {expected} points for dimension {dimension}, got {actual}"
    )]
    InvalidSimplex {
        /// Number of points supplied.
        actual: usize,
        /// Number of points required.
        expected: usize,
        /// Dimension of the points.
        dimension: usize,
    },
    /// The points have differing coordinate counts.
    #[error("Point {index} has {actual} coordinates, expected {expected}")]
    MixedDimensions {
        /// Index of the offending point.
        index: usize,
        /// Coordinate count of the first point.
        expected: usize,
        /// Coordinate count of the offending point.
        actual: usize,
    },
    /// The simplex is flat (collinear / coplanar / coincident points), so its
    /// circumsphere does not exist.
    #[error("Degenerate simplex: |determinant| = {determinant:e} is within tolerance {tolerance:e}")]
    DegenerateSimplex {
        /// Determinant of the system (twice the signed area in 2D).
        determinant: f64,
        /// Scaled tolerance the determinant was compared against.
        tolerance: f64,
    },
}

/// Errors that can occur during random point generation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RandomPointGenerationError {
    /// The coordinate range is empty or not finite.
    #[error("Invalid coordinate range: [{min}, {max})")]
    InvalidRange {
        /// Lower bound of the range.
        min: f64,
        /// Upper bound of the range.
        max: f64,
    },
    /// Points must have at least one coordinate.
    #[error("Invalid dimension: {dimension}")]
    InvalidDimension {
        /// Requested dimension.
        dimension: usize,
    },
}
