//! # lifted-delaunay
//!
//! This is a library for computing the Delaunay triangulation and the dual
//! Voronoi diagram of a set of d-dimensional points by the classical lifting
//! reduction: lift every point onto the paraboloid `(x, |x|²)`, take the
//! convex hull one dimension up, and keep the downward-facing facets.
//!
//! # Features
//!
//! - d-dimensional Delaunay triangulations with runtime dimension
//! - d-dimensional convex hulls (beneath-beyond), usable on their own
//! - Voronoi regions and edges derived from the triangulation
//! - Pluggable hull solver through the [`ConvexHullSolver`](geometry::algorithms::convex_hull::ConvexHullSolver) trait
//! - Caller-defined vertex types through the [`Vertex`](core::vertex::Vertex) trait
//!
//! # Basic Usage
//!
//! ```rust
//! use lifted_delaunay::prelude::*;
//!
//! let vertices: Vec<DefaultVertex> = vec![
//!     vertex!([0.0, 0.0, 0.0]),
//!     vertex!([1.0, 0.0, 0.0]),
//!     vertex!([0.0, 1.0, 0.0]),
//!     vertex!([0.0, 0.0, 1.0]),
//!     vertex!([1.0, 1.0, 1.0]),
//! ];
//!
//! let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(3);
//! dt.generate(&vertices).unwrap();
//!
//! assert_eq!(dt.dimensions(), 3);
//! assert!(dt.number_of_cells() >= 2);
//! for cell in dt.cells() {
//!     assert_eq!(cell.vertices().len(), 4);
//!     assert!(cell.radius() > 0.0);
//! }
//! ```
//!
//! # Voronoi Diagrams
//!
//! ```rust
//! use lifted_delaunay::prelude::*;
//!
//! let vertices = generate_random_vertices_seeded(20, 2, (0.0, 1.0), 17).unwrap();
//! let mut mesh: VoronoiMesh<DefaultVertex> = VoronoiMesh::new(2);
//! mesh.generate(&vertices).unwrap();
//!
//! // Every point lies on the paraboloid, so every generator gets a region.
//! assert_eq!(mesh.regions().len(), 20);
//! for region in mesh.regions() {
//!     assert_eq!(region.cells().len(), region.circumcenters().len());
//! }
//! ```
//!
//! # Input Handling
//!
//! - Fewer than `D + 1` points give an empty triangulation, not an error.
//! - Exactly `D + 1` points give a single cell, or
//!   [`TriangulationError::DegenerateSimplex`](core::delaunay_triangulation::TriangulationError::DegenerateSimplex)
//!   if they are affinely dependent.
//! - Larger inputs that do not span the space fail in the hull solver.
//! - The caller's vertices are never modified. The engines work on copies and
//!   optionally assign ids to those copies.
//!
//! # Numerical Robustness
//!
//! All predicates use ordinary `f64` arithmetic with relative tolerances.
//! Co-spherical input (such as the corners of a square) is handled: any
//! triangulation of the co-spherical set is returned, and its cells share the
//! same circumsphere.

// Allow multiple crate versions due to transitive dependencies
#![allow(clippy::multiple_crate_versions)]
// Forbid unsafe code throughout the entire crate
#![forbid(unsafe_code)]

/// The `core` module contains the triangulation and Voronoi engines and the
/// types they produce.
pub mod core {
    pub mod cell;
    /// High-performance collection types optimized for computational geometry
    pub mod collections;
    pub mod delaunay_triangulation;
    pub mod util;
    pub mod vertex;
    /// Voronoi regions and edges dual to a Delaunay triangulation
    pub mod voronoi;
    // Re-export the `core` modules.
    pub use cell::*;
    pub use delaunay_triangulation::*;
    pub use util::*;
    pub use vertex::*;
    pub use voronoi::*;
    // Note: collections module not re-exported here to avoid namespace pollution
    // Import specific types via prelude or use crate::core::collections::
}

/// Contains geometric algorithms, predicates and numeric helpers.
pub mod geometry {
    /// Geometric algorithms on point sets
    pub mod algorithms {
        /// d-dimensional convex hulls
        pub mod convex_hull;
        pub use convex_hull::*;
    }
    pub mod matrix;
    pub mod predicates;
    /// Geometric utility functions for d-dimensional geometry calculations
    pub mod util;
    pub use algorithms::*;
    pub use matrix::*;
    pub use predicates::*;
    pub use util::*;
}

/// A prelude module that re-exports commonly used types and macros.
/// This makes it easier to import the most commonly used items from the crate.
pub mod prelude {
    // Re-export from core
    pub use crate::core::{
        cell::*, delaunay_triangulation::*, util::*, vertex::*, voronoi::*,
    };

    // Re-export commonly used collection types from core::collections
    pub use crate::core::collections::{
        FastHashMap, FastHashSet, SmallBuffer, fast_hash_map_with_capacity,
        fast_hash_set_with_capacity,
    };

    // Re-export from geometry
    pub use crate::geometry::{algorithms::*, matrix::*, predicates::*, util::*};

    // Convenience macros
    pub use crate::vertex;
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{
        core::{
            cell::DelaunayCell, delaunay_triangulation::DelaunayTriangulation,
            vertex::DefaultVertex, voronoi::VoronoiMesh,
        },
        geometry::algorithms::convex_hull::{ConvexHull, Simplex},
        is_normal,
    };

    // =============================================================================
    // TYPE SAFETY TESTS
    // =============================================================================

    #[test]
    fn normal_types() {
        assert!(is_normal::<DefaultVertex>());
        assert!(is_normal::<Simplex>());
        assert!(is_normal::<ConvexHull>());
        assert!(is_normal::<DelaunayCell<DefaultVertex>>());
        assert!(is_normal::<DelaunayTriangulation<DefaultVertex>>());
        assert!(is_normal::<VoronoiMesh<DefaultVertex>>());
    }

    #[test]
    fn test_prelude_exports() {
        use crate::prelude::*;

        let vertices: Vec<DefaultVertex> = vec![
            vertex!([0.0, 0.0]),
            vertex!([1.0, 0.0]),
            vertex!([0.0, 1.0]),
        ];
        let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(2);
        dt.generate(&vertices).unwrap();
        assert_eq!(dt.cells()[0].insphere(&[0.1, 0.1]), InSphere::INSIDE);

        let mut map: FastHashMap<usize, usize> = fast_hash_map_with_capacity(4);
        map.insert(1, 2);
        let set: FastHashSet<usize> = fast_hash_set_with_capacity(4);
        assert_eq!(map.len(), 1);
        assert!(set.is_empty());
        let buffer: SmallBuffer<usize, 4> = SmallBuffer::new();
        assert!(buffer.is_empty());
    }
}
