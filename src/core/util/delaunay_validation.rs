//! Delaunay empty-circumsphere property validation utilities.

#![forbid(unsafe_code)]

use thiserror::Error;

use crate::core::delaunay_triangulation::DelaunayTriangulation;
use crate::core::vertex::{Vertex, VertexError};
use crate::geometry::algorithms::convex_hull::ConvexHullSolver;
use crate::geometry::predicates::InSphere;

/// Errors that can occur during Delaunay property validation.
///
/// # Examples
///
/// ```rust
/// use lifted_delaunay::core::util::DelaunayValidationError;
///
/// let err = DelaunayValidationError::DelaunayViolation { cell: 2, vertex: 7 };
/// assert!(matches!(err, DelaunayValidationError::DelaunayViolation { .. }));
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DelaunayValidationError {
    /// A vertex lies strictly inside the circumsphere of a cell.
    #[error("Cell {cell} violates Delaunay property: vertex {vertex} is inside its circumsphere")]
    DelaunayViolation {
        /// Index of the violating cell.
        cell: usize,
        /// Input index of the vertex inside the circumsphere.
        vertex: usize,
    },
    /// A cell lists a neighbor that does not list it back.
    #[error("Cell {cell} lists neighbor {neighbor}, which does not point back")]
    AsymmetricAdjacency {
        /// Index of the cell.
        cell: usize,
        /// Index of the neighbor slot target.
        neighbor: usize,
    },
    /// A circumcenter and a vertex disagree on dimension.
    #[error("Dimension mismatch during validation: {source}")]
    DimensionMismatch {
        /// The underlying vertex error.
        #[from]
        source: VertexError,
    },
}

// =============================================================================
// DELAUNAY PROPERTY VALIDATION
// =============================================================================

/// Returns the first vertex strictly inside the circumsphere of `cell`, if any.
fn first_vertex_inside<V, H>(
    dt: &DelaunayTriangulation<V, H>,
    cell: usize,
) -> Result<Option<usize>, DelaunayValidationError>
where
    V: Vertex,
    H: ConvexHullSolver,
{
    let cell_ref = &dt.cells()[cell];
    for (index, point) in dt.points().iter().enumerate() {
        if cell_ref.contains_vertex(index) {
            continue;
        }
        // Surface dimension problems before classifying.
        cell_ref.circumcenter().sqr_distance(point)?;
        if cell_ref.insphere(point.position()) == InSphere::INSIDE {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// Finds every cell whose circumsphere strictly contains an input vertex.
///
/// Points on a circumsphere (within tolerance) are not violations, so
/// co-spherical input such as a square validates cleanly.
///
/// # Errors
///
/// Returns [`DelaunayValidationError::DimensionMismatch`] if a circumcenter and
/// a vertex differ in dimension.
///
/// # Examples
///
/// ```rust
/// use lifted_delaunay::prelude::*;
/// use lifted_delaunay::core::util::find_delaunay_violations;
///
/// let vertices = generate_random_vertices_seeded(20, 2, (0.0, 1.0), 3).unwrap();
/// let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(2);
/// dt.generate(&vertices).unwrap();
///
/// assert!(find_delaunay_violations(&dt).unwrap().is_empty());
/// ```
pub fn find_delaunay_violations<V, H>(
    dt: &DelaunayTriangulation<V, H>,
) -> Result<Vec<usize>, DelaunayValidationError>
where
    V: Vertex,
    H: ConvexHullSolver,
{
    tracing::debug!(
        "find_delaunay_violations: checking {} cells against {} vertices",
        dt.number_of_cells(),
        dt.points().len()
    );

    let mut violations = Vec::new();
    for cell in 0..dt.number_of_cells() {
        if let Some(vertex) = first_vertex_inside(dt, cell)? {
            tracing::warn!(
                "cell {cell} {:?} has vertex {vertex} inside its circumsphere",
                dt.cells()[cell].vertices()
            );
            violations.push(cell);
        }
    }

    tracing::debug!(
        "find_delaunay_violations: {} violating cells",
        violations.len()
    );
    Ok(violations)
}

/// Checks mutual cell adjacency and the empty-circumsphere property.
///
/// # Errors
///
/// Returns the first problem found; see [`DelaunayValidationError`].
pub fn validate_delaunay<V, H>(dt: &DelaunayTriangulation<V, H>) -> Result<(), DelaunayValidationError>
where
    V: Vertex,
    H: ConvexHullSolver,
{
    let cells = dt.cells();
    for (cell, c) in cells.iter().enumerate() {
        for &neighbor in c.neighbors().iter().flatten() {
            let points_back = cells
                .get(neighbor)
                .is_some_and(|n| n.neighbors().contains(&Some(cell)));
            if !points_back {
                return Err(DelaunayValidationError::AsymmetricAdjacency { cell, neighbor });
            }
        }
    }
    for cell in 0..cells.len() {
        if let Some(vertex) = first_vertex_inside(dt, cell)? {
            return Err(DelaunayValidationError::DelaunayViolation { cell, vertex });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vertex::DefaultVertex;
    use crate::geometry::util::generate_random_vertices_seeded;
    use crate::vertex;

    #[test]
    fn validation_accepts_cospherical_square() {
        let square: Vec<DefaultVertex> = vec![
            vertex!([0.0, 0.0]),
            vertex!([1.0, 0.0]),
            vertex!([1.0, 1.0]),
            vertex!([0.0, 1.0]),
        ];
        let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(2);
        dt.generate(&square).unwrap();
        assert!(find_delaunay_violations(&dt).unwrap().is_empty());
        assert_eq!(validate_delaunay(&dt), Ok(()));
    }

    #[test]
    fn validation_accepts_random_3d() {
        let vertices = generate_random_vertices_seeded(25, 3, (-1.0, 1.0), 11).unwrap();
        let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(3);
        dt.generate(&vertices).unwrap();
        assert_eq!(validate_delaunay(&dt), Ok(()));
    }

    #[test]
    fn validation_of_empty_triangulation() {
        let dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(2);
        assert!(find_delaunay_violations(&dt).unwrap().is_empty());
        assert_eq!(validate_delaunay(&dt), Ok(()));
    }
}
