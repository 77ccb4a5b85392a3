//! Data and operations on Delaunay cells.
//!
//! A [`DelaunayCell`] is one lower-hull simplex of the lifted point set,
//! projected back down: its vertex indices refer to the triangulation input,
//! its neighbor slots refer to other cells of the same triangulation, and it
//! carries the circumsphere of its vertices.
//!
//! Cells are created only by
//! [`DelaunayTriangulation`](crate::core::delaunay_triangulation::DelaunayTriangulation)
//! and are immutable afterwards.
//!
//! # Examples
//!
//! ```rust
//! use lifted_delaunay::prelude::*;
//!
//! let vertices: Vec<DefaultVertex> = vec![
//!     vertex!([0.0, 0.0, 0.0]),
//!     vertex!([1.0, 0.0, 0.0]),
//!     vertex!([0.0, 1.0, 0.0]),
//!     vertex!([0.0, 0.0, 1.0]),
//! ];
//!
//! let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(3);
//! dt.generate(&vertices).unwrap();
//!
//! let cell = &dt.cells()[0];
//! assert_eq!(cell.vertices().len(), 4);
//! assert!(cell.circumcenter().distance(&vertex!([0.5, 0.5, 0.5])).unwrap() < 1e-12);
//! ```

use std::fmt::{self, Debug};

use super::vertex::Vertex;
use crate::geometry::algorithms::convex_hull::Simplex;
use crate::geometry::predicates::{InSphere, insphere_with_sphere};
use crate::geometry::util::{CircumcenterError, Circumsphere, circumsphere};

/// A simplex of a Delaunay triangulation together with its circumsphere.
///
/// Cells deliberately do not implement `PartialEq`: two generations of the
/// same input produce distinct cells.
#[derive(Clone)]
pub struct DelaunayCell<V: Vertex> {
    simplex: Simplex,
    circumcenter: V,
    radius: f64,
}

impl<V: Vertex> DelaunayCell<V> {
    /// Builds the cell for `simplex`, whose vertex indices refer to `points`.
    ///
    /// # Errors
    ///
    /// Returns a [`CircumcenterError`] if the simplex is degenerate or its
    /// vertices do not form a simplex of their dimension.
    pub(crate) fn from_simplex(simplex: Simplex, points: &[V]) -> Result<Self, CircumcenterError> {
        let positions: Vec<&[f64]> = simplex
            .vertices()
            .iter()
            .map(|&v| points[v].position())
            .collect();
        let Circumsphere { center, radius } = circumsphere(&positions)?;
        Ok(Self {
            simplex,
            circumcenter: V::from_position(center),
            radius,
        })
    }

    /// The underlying simplex (lifted normal and offset included).
    #[inline]
    #[must_use]
    pub const fn simplex(&self) -> &Simplex {
        &self.simplex
    }

    /// Indices of the cell vertices in the triangulation input.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[usize] {
        self.simplex.vertices()
    }

    /// Neighboring cells; slot `i` is across the facet opposite `vertices()[i]`.
    #[inline]
    #[must_use]
    pub fn neighbors(&self) -> &[Option<usize>] {
        self.simplex.adjacent()
    }

    /// Center of the circumsphere.
    #[inline]
    #[must_use]
    pub const fn circumcenter(&self) -> &V {
        &self.circumcenter
    }

    /// Radius of the circumsphere.
    #[inline]
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns `true` if `vertex` is a vertex of this cell.
    #[must_use]
    pub fn contains_vertex(&self, vertex: usize) -> bool {
        self.simplex.contains_vertex(vertex)
    }

    /// Classifies `point` against the circumsphere.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lifted_delaunay::prelude::*;
    ///
    /// let vertices: Vec<DefaultVertex> =
    ///     vec![vertex!([0.0, 0.0]), vertex!([1.0, 0.0]), vertex!([0.0, 1.0])];
    /// let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(2);
    /// dt.generate(&vertices).unwrap();
    ///
    /// let cell = &dt.cells()[0];
    /// assert_eq!(cell.insphere(&[0.5, 0.5]), InSphere::INSIDE);
    /// assert_eq!(cell.insphere(&[1.0, 1.0]), InSphere::BOUNDARY);
    /// assert_eq!(cell.insphere(&[3.0, 0.0]), InSphere::OUTSIDE);
    /// ```
    #[must_use]
    pub fn insphere(&self, point: &[f64]) -> InSphere {
        insphere_with_sphere(self.circumcenter.position(), self.radius, point)
    }
}

impl<V: Vertex> Debug for DelaunayCell<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelaunayCell")
            .field("vertices", &self.vertices())
            .field("neighbors", &self.neighbors())
            .field("circumcenter", &self.circumcenter.position())
            .field("radius", &self.radius)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
