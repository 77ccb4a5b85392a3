//! Voronoi diagrams as the dual of a Delaunay triangulation.
//!
//! Every Delaunay cell contributes its circumcenter as a Voronoi vertex. The
//! region of a generator is bounded by the circumcenters of the cells that
//! contain it, and two adjacent cells give one Voronoi edge between their
//! circumcenters.
//!
//! Region boundaries are reported as an unordered set of circumcenters;
//! ordering them into a polygon is left to the caller.
//!
//! # Examples
//!
//! ```rust
//! use lifted_delaunay::prelude::*;
//!
//! let square: Vec<DefaultVertex> = vec![
//!     vertex!([0.0, 0.0]),
//!     vertex!([1.0, 0.0]),
//!     vertex!([1.0, 1.0]),
//!     vertex!([0.0, 1.0]),
//! ];
//!
//! let mut mesh: VoronoiMesh<DefaultVertex> = VoronoiMesh::new(2);
//! mesh.generate(&square).unwrap();
//!
//! assert_eq!(mesh.regions().len(), 4);
//! assert_eq!(mesh.edges().len(), 1);
//! ```

use crate::core::cell::DelaunayCell;
use crate::core::delaunay_triangulation::{
    DelaunayTriangulation, GenerationOptions, TriangulationError,
};
use crate::core::vertex::Vertex;
use crate::geometry::algorithms::convex_hull::{ConvexHull, ConvexHullSolver};

/// The Voronoi region of one generator vertex.
#[derive(Clone, Debug)]
pub struct VoronoiRegion<V: Vertex> {
    generator: V,
    generator_index: usize,
    cells: Vec<usize>,
    circumcenters: Vec<V>,
}

impl<V: Vertex> VoronoiRegion<V> {
    /// The generator vertex (the triangulation's copy).
    #[inline]
    #[must_use]
    pub const fn generator(&self) -> &V {
        &self.generator
    }

    /// Index of the generator in the input.
    #[inline]
    #[must_use]
    pub const fn generator_index(&self) -> usize {
        self.generator_index
    }

    /// Indices of the Delaunay cells incident to the generator.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// Circumcenters of the incident cells, in the order of [`cells`](Self::cells).
    #[inline]
    #[must_use]
    pub fn circumcenters(&self) -> &[V] {
        &self.circumcenters
    }
}

/// An edge of the Voronoi diagram, joining the circumcenters of two adjacent cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoronoiEdge {
    /// Index of the first cell; always below `target`.
    pub source: usize,
    /// Index of the second cell.
    pub target: usize,
}

/// Voronoi diagram of a point set, built from its Delaunay triangulation.
#[derive(Clone, Debug)]
pub struct VoronoiMesh<V: Vertex, H: ConvexHullSolver = ConvexHull> {
    triangulation: DelaunayTriangulation<V, H>,
    regions: Vec<VoronoiRegion<V>>,
    edges: Vec<VoronoiEdge>,
}

impl<V: Vertex, H: ConvexHullSolver + Default> VoronoiMesh<V, H> {
    /// Creates an empty mesh for `dimensions`-dimensional generators.
    #[must_use]
    pub fn new(dimensions: usize) -> Self {
        Self::with_triangulation(DelaunayTriangulation::new(dimensions))
    }
}

impl<V: Vertex, H: ConvexHullSolver> VoronoiMesh<V, H> {
    /// Creates an empty mesh around an (empty or stale) triangulation engine.
    ///
    /// Any cells the engine already holds are discarded on the next generation.
    #[must_use]
    pub const fn with_triangulation(triangulation: DelaunayTriangulation<V, H>) -> Self {
        Self {
            triangulation,
            regions: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Builds the diagram of `input` with [`GenerationOptions::default`].
    ///
    /// # Errors
    ///
    /// Returns the [`TriangulationError`] of the underlying triangulation.
    pub fn generate(&mut self, input: &[V]) -> Result<(), TriangulationError> {
        self.generate_with_options(input, GenerationOptions::default())
    }

    /// Builds the diagram of `input`, replacing any previous result.
    ///
    /// On error the mesh is left empty.
    ///
    /// # Errors
    ///
    /// Returns the [`TriangulationError`] of the underlying triangulation.
    pub fn generate_with_options(
        &mut self,
        input: &[V],
        options: GenerationOptions,
    ) -> Result<(), TriangulationError> {
        self.clear();
        self.triangulation.generate_with_options(input, options)?;

        self.regions = Self::build_regions(&self.triangulation);
        self.edges = Self::build_edges(self.triangulation.cells());

        tracing::debug!(
            "voronoi: {} regions, {} vertices, {} edges",
            self.regions.len(),
            self.triangulation.number_of_cells(),
            self.edges.len()
        );
        Ok(())
    }

    fn build_regions(triangulation: &DelaunayTriangulation<V, H>) -> Vec<VoronoiRegion<V>> {
        let points = triangulation.points();
        let cells = triangulation.cells();

        let mut incident: Vec<Vec<usize>> = vec![Vec::new(); points.len()];
        for (c, cell) in cells.iter().enumerate() {
            for &v in cell.vertices() {
                incident[v].push(c);
            }
        }

        incident
            .into_iter()
            .enumerate()
            .filter(|(_, cells)| !cells.is_empty())
            .map(|(generator_index, region_cells)| VoronoiRegion {
                generator: points[generator_index].clone(),
                generator_index,
                circumcenters: region_cells
                    .iter()
                    .map(|&c| cells[c].circumcenter().clone())
                    .collect(),
                cells: region_cells,
            })
            .collect()
    }

    fn build_edges(cells: &[DelaunayCell<V>]) -> Vec<VoronoiEdge> {
        let mut edges = Vec::new();
        for (source, cell) in cells.iter().enumerate() {
            for &target in cell.neighbors().iter().flatten() {
                if source < target {
                    edges.push(VoronoiEdge { source, target });
                }
            }
        }
        edges
    }

    /// Drops every result.
    pub fn clear(&mut self) {
        self.triangulation.clear();
        self.regions.clear();
        self.edges.clear();
    }

    /// The underlying Delaunay triangulation.
    #[inline]
    #[must_use]
    pub const fn triangulation(&self) -> &DelaunayTriangulation<V, H> {
        &self.triangulation
    }

    /// Delaunay cells; their circumcenters are the Voronoi vertices.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[DelaunayCell<V>] {
        self.triangulation.cells()
    }

    /// Regions in input order; generators without cells have no region.
    #[inline]
    #[must_use]
    pub fn regions(&self) -> &[VoronoiRegion<V>] {
        &self.regions
    }

    /// Voronoi edges, sorted by source cell.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[VoronoiEdge] {
        &self.edges
    }

    /// Region of the generator with input index `index`.
    #[must_use]
    pub fn region_for(&self, index: usize) -> Option<&VoronoiRegion<V>> {
        self.regions
            .binary_search_by_key(&index, VoronoiRegion::generator_index)
            .ok()
            .map(|i| &self.regions[i])
    }

    /// Circumcenters at the two ends of `edge`.
    #[must_use]
    pub fn edge_endpoints(&self, edge: VoronoiEdge) -> Option<(&V, &V)> {
        let cells = self.cells();
        Some((
            cells.get(edge.source)?.circumcenter(),
            cells.get(edge.target)?.circumcenter(),
        ))
    }

    /// Returns `true` if there are no regions.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
