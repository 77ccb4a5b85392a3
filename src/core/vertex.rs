//! Data and operations on d-dimensional vertices.
//!
//! This module defines the [`Vertex`] capability trait that the triangulation
//! and Voronoi engines are generic over, and [`DefaultVertex`], a ready-made
//! implementation.
//!
//! # Key Features
//!
//! - **Runtime dimension**: positions are coordinate vectors; the engines check
//!   every vertex against their configured dimension before doing any work
//! - **Identification**: an integer `id` (assigned by the engines on their own
//!   copies when requested) and a free-form integer `tag` for caller bookkeeping
//! - **Metric queries**: magnitude, squared magnitude and (squared) distance
//! - **Builder Pattern**: convenient construction using `VertexBuilder` or the
//!   [`vertex!`](crate::vertex) macro
//!
//! # Examples
//!
//! ```rust
//! use lifted_delaunay::core::vertex::{DefaultVertex, Vertex};
//! use lifted_delaunay::vertex;
//!
//! let a: DefaultVertex = vertex!([0.0, 0.0]);
//! let b: DefaultVertex = vertex!([3.0, 4.0], 17);
//!
//! assert_eq!(b.tag(), 17);
//! assert_eq!(a.distance(&b).unwrap(), 5.0);
//! ```

#![forbid(unsafe_code)]

use std::fmt::Debug;

use derive_builder::Builder;
use thiserror::Error;

use crate::geometry::util::{hypot, squared_distance, squared_norm};

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in vertex queries.
///
/// # Examples
///
/// ```rust
/// use lifted_delaunay::core::vertex::VertexError;
///
/// let err = VertexError::InvalidDimension { expected: 2, actual: 3 };
/// assert_eq!(err.to_string(), "Invalid dimension: expected 2 coordinates, found 3");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum VertexError {
    /// The two operands of a binary query have different dimensions.
    #[error("Invalid dimension: expected {expected} coordinates, found {actual}")]
    InvalidDimension {
        /// Dimension of the receiver.
        expected: usize,
        /// Dimension of the other operand.
        actual: usize,
    },
}

// =============================================================================
// VERTEX TRAIT
// =============================================================================

/// Capability set a point type must expose to be triangulated.
///
/// Implementors supply storage (position, id, tag) and construction from a
/// bare position; the metric queries have default implementations.
///
/// The engines never mutate the vertices they are given: they work on private
/// copies. `position_mut` exists for callers that move points between
/// generations; cells keep the circumcenters computed at generation time and
/// are not updated when a position changes afterwards.
pub trait Vertex: Clone + Debug {
    /// Creates a vertex at `position` with id 0 and tag 0.
    ///
    /// Used by the engines to materialize circumcenters and centroids.
    fn from_position(position: Vec<f64>) -> Self;

    /// Coordinates of the vertex.
    fn position(&self) -> &[f64];

    /// Mutable access to the coordinate vector.
    fn position_mut(&mut self) -> &mut Vec<f64>;

    /// Integer identifier.
    fn id(&self) -> usize;

    /// Sets the integer identifier.
    fn set_id(&mut self, id: usize);

    /// Caller-defined tag; not used by any algorithm in this crate.
    fn tag(&self) -> i64;

    /// Sets the caller-defined tag.
    fn set_tag(&mut self, tag: i64);

    /// Number of coordinates.
    #[inline]
    fn dimensions(&self) -> usize {
        self.position().len()
    }

    /// Euclidean norm of the position.
    #[inline]
    fn magnitude(&self) -> f64 {
        hypot(self.position())
    }

    /// Squared Euclidean norm of the position.
    #[inline]
    fn sqr_magnitude(&self) -> f64 {
        squared_norm(self.position())
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// # Errors
    ///
    /// Returns [`VertexError::InvalidDimension`] if the dimensions differ.
    fn sqr_distance(&self, other: &Self) -> Result<f64, VertexError> {
        check_same_dimension(self.dimensions(), other.dimensions())?;
        Ok(squared_distance(self.position(), other.position()))
    }

    /// Euclidean distance to `other`.
    ///
    /// # Errors
    ///
    /// Returns [`VertexError::InvalidDimension`] if the dimensions differ.
    fn distance(&self, other: &Self) -> Result<f64, VertexError> {
        check_same_dimension(self.dimensions(), other.dimensions())?;
        let diff: Vec<f64> = self
            .position()
            .iter()
            .zip(other.position())
            .map(|(a, b)| a - b)
            .collect();
        Ok(hypot(&diff))
    }
}

#[inline]
const fn check_same_dimension(expected: usize, actual: usize) -> Result<(), VertexError> {
    if expected == actual {
        Ok(())
    } else {
        Err(VertexError::InvalidDimension { expected, actual })
    }
}

// =============================================================================
// CONVENIENCE MACROS AND HELPERS
// =============================================================================

/// Convenience macro for creating [`DefaultVertex`] values.
///
/// Takes a coordinate array and an optional tag.
///
/// # Panics
///
/// Panics if the builder rejects the coordinates (empty or non-finite).
///
/// # Usage
///
/// ```rust
/// use lifted_delaunay::core::vertex::{DefaultVertex, Vertex};
/// use lifted_delaunay::vertex;
///
/// let v1: DefaultVertex = vertex!([1.0, 2.0, 3.0]);
/// let v2: DefaultVertex = vertex!([0.0, 1.0], 42);
/// assert_eq!(v1.dimensions(), 3);
/// assert_eq!(v2.tag(), 42);
/// ```
#[macro_export]
macro_rules! vertex {
    ($coords:expr) => {
        $crate::core::vertex::VertexBuilder::default()
            .position($coords)
            .build()
            .expect("Failed to build vertex: coordinates must be non-empty and finite")
    };

    ($coords:expr, $tag:expr) => {
        $crate::core::vertex::VertexBuilder::default()
            .position($coords)
            .tag($tag)
            .build()
            .expect("Failed to build vertex: coordinates must be non-empty and finite")
    };
}

// Re-export the macro at the crate level for convenience
pub use crate::vertex;

// =============================================================================
// DEFAULT VERTEX
// =============================================================================

/// Plain vertex storing a coordinate vector, an id and a tag.
///
/// # Usage
///
/// ```rust
/// use lifted_delaunay::core::vertex::{DefaultVertex, Vertex, VertexBuilder};
///
/// let v = VertexBuilder::default()
///     .position([1.0, 2.0])
///     .tag(3)
///     .build()
///     .unwrap();
/// assert_eq!(v.position(), &[1.0, 2.0]);
/// assert_eq!(v.id(), 0);
///
/// assert!(VertexBuilder::default().position([f64::NAN]).build().is_err());
/// ```
#[derive(Builder, Clone, Debug, Default, PartialEq)]
#[builder(name = "VertexBuilder", build_fn(validate = "Self::validate"))]
pub struct DefaultVertex {
    /// Coordinates of the vertex.
    #[builder(setter(into))]
    position: Vec<f64>,
    /// Integer identifier.
    #[builder(default)]
    id: usize,
    /// Caller-defined tag.
    #[builder(default)]
    tag: i64,
}

impl VertexBuilder {
    fn validate(&self) -> Result<(), String> {
        match &self.position {
            Some(position) if position.is_empty() => Err("position must not be empty".into()),
            Some(position) if position.iter().any(|c| !c.is_finite()) => {
                Err(format!("position must be finite, got {position:?}"))
            }
            _ => Ok(()),
        }
    }
}

impl DefaultVertex {
    /// Creates vertices from an iterator of positions, ids left at 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lifted_delaunay::core::vertex::{DefaultVertex, Vertex};
    ///
    /// let vertices = DefaultVertex::from_positions([[0.0, 0.0], [1.0, 0.0]]);
    /// assert_eq!(vertices.len(), 2);
    /// assert_eq!(vertices[1].position(), &[1.0, 0.0]);
    /// ```
    pub fn from_positions<I, P>(positions: I) -> Vec<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<Vec<f64>>,
    {
        positions
            .into_iter()
            .map(|p| Self::from_position(p.into()))
            .collect()
    }
}

impl Vertex for DefaultVertex {
    fn from_position(position: Vec<f64>) -> Self {
        Self {
            position,
            id: 0,
            tag: 0,
        }
    }

    #[inline]
    fn position(&self) -> &[f64] {
        &self.position
    }

    #[inline]
    fn position_mut(&mut self) -> &mut Vec<f64> {
        &mut self.position
    }

    #[inline]
    fn id(&self) -> usize {
        self.id
    }

    #[inline]
    fn set_id(&mut self, id: usize) {
        self.id = id;
    }

    #[inline]
    fn tag(&self) -> i64 {
        self.tag
    }

    #[inline]
    fn set_tag(&mut self, tag: i64) {
        self.tag = tag;
    }
}

impl<const N: usize> From<[f64; N]> for DefaultVertex {
    fn from(position: [f64; N]) -> Self {
        Self::from_position(position.to_vec())
    }
}

// =============================================================================
// TESTS
// =============================================================================
