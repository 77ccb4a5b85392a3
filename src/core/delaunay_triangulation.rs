//! Delaunay triangulation by lifting to the paraboloid.
//!
//! Every input point `x` is lifted to `(x, |x|²)` one dimension up. The facets
//! of the lower convex hull of the lifted set, projected back down, are
//! exactly the Delaunay simplices of the input. The hull itself is delegated
//! to a [`ConvexHullSolver`].
//!
//! Generation is batch only: each call to
//! [`generate`](DelaunayTriangulation::generate) discards the previous result
//! and rebuilds from scratch. The caller's vertices are never modified; the
//! engine keeps its own copies.

use thiserror::Error;

use crate::core::cell::DelaunayCell;
use crate::core::vertex::Vertex;
use crate::geometry::algorithms::convex_hull::{
    ConvexHull, ConvexHullError, ConvexHullSolver, Simplex,
};
use crate::geometry::matrix::SINGULARITY_TOLERANCE;
use crate::geometry::util::{CircumcenterError, squared_norm};

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while generating a Delaunay triangulation.
///
/// Having fewer than `D + 1` input points is not an error: the result is
/// simply empty.
///
/// # Examples
///
/// ```rust
/// use lifted_delaunay::core::delaunay_triangulation::TriangulationError;
///
/// let err = TriangulationError::DimensionMismatch { index: 3, expected: 2, actual: 3 };
/// assert_eq!(err.to_string(), "Vertex 3 has 3 coordinates, expected 2");
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TriangulationError {
    /// The engine was configured with an unusable dimension.
    #[error("Invalid triangulation dimension {dimension}: must be at least 1")]
    InvalidDimension {
        /// Configured dimension.
        dimension: usize,
    },
    /// An input vertex has the wrong number of coordinates.
    #[error("Vertex {index} has {actual} coordinates, expected {expected}")]
    DimensionMismatch {
        /// Index of the offending vertex in the input.
        index: usize,
        /// Dimension of the engine.
        expected: usize,
        /// Coordinate count of the vertex.
        actual: usize,
    },
    /// An input vertex has a NaN or infinite coordinate (only checked on request).
    #[error("Vertex {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending vertex in the input.
        index: usize,
    },
    /// A Delaunay simplex has no circumsphere (flat or coincident vertices).
    #[error("Degenerate simplex with vertices {vertices:?}: {source}")]
    DegenerateSimplex {
        /// Input indices of the simplex vertices.
        vertices: Vec<usize>,
        /// The underlying circumsphere failure.
        #[source]
        source: CircumcenterError,
    },
    /// The convex hull solver failed on the lifted points.
    #[error("Convex hull of the lifted points failed: {0}")]
    HullFailure(#[from] ConvexHullError),
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Options for [`DelaunayTriangulation::generate_with_options`].
///
/// The default assigns ids and skips the non-finite coordinate check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Set each internal vertex copy's id to its input index.
    pub assign_ids: bool,
    /// Reject vertices with NaN or infinite coordinates, and ask the hull
    /// solver to validate its input too.
    pub check_input: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            assign_ids: true,
            check_input: false,
        }
    }
}

// =============================================================================
// TRIANGULATION
// =============================================================================

/// Delaunay triangulation of a D-dimensional point set.
///
/// # Type Parameters
/// - `V`: vertex type
/// - `H`: convex hull solver used on the lifted points
///
/// # Examples
///
/// ```rust
/// use lifted_delaunay::prelude::*;
///
/// let square: Vec<DefaultVertex> = vec![
///     vertex!([0.0, 0.0]),
///     vertex!([1.0, 0.0]),
///     vertex!([1.0, 1.0]),
///     vertex!([0.0, 1.0]),
/// ];
///
/// let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(2);
/// dt.generate(&square).unwrap();
///
/// assert_eq!(dt.number_of_cells(), 2);
/// for cell in dt.cells() {
///     assert!((cell.radius() - 0.5_f64.sqrt()).abs() < 1e-12);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct DelaunayTriangulation<V: Vertex, H: ConvexHullSolver = ConvexHull> {
    dimensions: usize,
    hull: H,
    points: Vec<V>,
    vertex_indices: Vec<usize>,
    cells: Vec<DelaunayCell<V>>,
    centroid: Option<V>,
}

/// Result of one generation, committed to the engine only on success.
struct Generated<V: Vertex> {
    vertex_indices: Vec<usize>,
    cells: Vec<DelaunayCell<V>>,
}

impl<V: Vertex, H: ConvexHullSolver + Default> DelaunayTriangulation<V, H> {
    /// Creates an empty triangulation engine for `dimensions`-dimensional input.
    #[must_use]
    pub fn new(dimensions: usize) -> Self {
        Self::with_hull(dimensions, H::default())
    }
}

impl<V: Vertex, H: ConvexHullSolver> DelaunayTriangulation<V, H> {
    /// Creates an empty engine that uses `hull` for the lifted convex hull.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lifted_delaunay::prelude::*;
    ///
    /// let dt: DelaunayTriangulation<DefaultVertex> =
    ///     DelaunayTriangulation::with_hull(3, ConvexHull::with_tolerance(1e-8));
    /// assert!(dt.is_empty());
    /// ```
    #[must_use]
    pub const fn with_hull(dimensions: usize, hull: H) -> Self {
        Self {
            dimensions,
            hull,
            points: Vec::new(),
            vertex_indices: Vec::new(),
            cells: Vec::new(),
            centroid: None,
        }
    }

    // =========================================================================
    // GENERATION
    // =========================================================================

    /// Triangulates `input` with [`GenerationOptions::default`].
    ///
    /// # Errors
    ///
    /// See [`generate_with_options`](Self::generate_with_options).
    pub fn generate(&mut self, input: &[V]) -> Result<(), TriangulationError> {
        self.generate_with_options(input, GenerationOptions::default())
    }

    /// Triangulates `input`, replacing any previous result.
    ///
    /// Fewer than `D + 1` points produce an empty result. Exactly `D + 1`
    /// points form a single cell. Otherwise the points are lifted and the
    /// lower hull of the lifted set becomes the cell list.
    ///
    /// On error the engine is left empty and can be reused.
    ///
    /// # Errors
    ///
    /// - [`TriangulationError::InvalidDimension`] if the engine dimension is 0
    /// - [`TriangulationError::DimensionMismatch`] for a vertex of the wrong dimension
    /// - [`TriangulationError::NonFiniteCoordinate`] with `check_input`
    /// - [`TriangulationError::DegenerateSimplex`] if a cell has no circumsphere
    /// - [`TriangulationError::HullFailure`] if the hull solver fails, for
    ///   instance on input that does not span the space
    pub fn generate_with_options(
        &mut self,
        input: &[V],
        options: GenerationOptions,
    ) -> Result<(), TriangulationError> {
        self.clear();
        self.validate_input(input, options.check_input)?;

        let d = self.dimensions;
        let mut points = input.to_vec();
        if options.assign_ids {
            for (index, point) in points.iter_mut().enumerate() {
                point.set_id(index);
            }
        }

        if points.len() < d + 1 {
            tracing::debug!(
                "triangulation: {} points cannot span {}D, result left empty",
                points.len(),
                d
            );
            self.points = points;
            return Ok(());
        }

        let generated = if points.len() == d + 1 {
            Self::single_simplex(&points)?
        } else {
            self.lower_hull(&points, options.check_input)?
        };

        tracing::debug!(
            "triangulation: {} points in {}D, {} cells, {} hull vertices",
            points.len(),
            d,
            generated.cells.len(),
            generated.vertex_indices.len()
        );

        self.centroid = Some(mean_position(&points, &generated.vertex_indices));
        self.vertex_indices = generated.vertex_indices;
        self.cells = generated.cells;
        self.points = points;
        Ok(())
    }

    fn validate_input(&self, input: &[V], check_input: bool) -> Result<(), TriangulationError> {
        let expected = self.dimensions;
        if expected == 0 {
            return Err(TriangulationError::InvalidDimension {
                dimension: expected,
            });
        }
        for (index, vertex) in input.iter().enumerate() {
            let actual = vertex.dimensions();
            if actual != expected {
                return Err(TriangulationError::DimensionMismatch {
                    index,
                    expected,
                    actual,
                });
            }
            if check_input && vertex.position().iter().any(|c| !c.is_finite()) {
                return Err(TriangulationError::NonFiniteCoordinate { index });
            }
        }
        Ok(())
    }

    /// `D + 1` points are their own triangulation.
    fn single_simplex(points: &[V]) -> Result<Generated<V>, TriangulationError> {
        let n = points.len();
        let mut normal = vec![0.0; n];
        normal[n - 1] = -1.0;
        let simplex = Simplex::new(
            (0..n).collect(),
            normal,
            0.0,
            std::iter::repeat_n(None, n).collect(),
        );
        let cell = make_cell(simplex, points)?;
        Ok(Generated {
            vertex_indices: (0..n).collect(),
            cells: vec![cell],
        })
    }

    /// Lifts `points`, runs the hull solver and keeps the lower facets.
    fn lower_hull(
        &mut self,
        points: &[V],
        check_input: bool,
    ) -> Result<Generated<V>, TriangulationError> {
        let d = self.dimensions;
        let lifted = lift_with_apex(points, d);
        let apex = points.len();

        self.hull.generate(&lifted, d + 1, check_input)?;

        let mut simplices: Vec<Simplex> = self.hull.simplices().to_vec();
        let upper: Vec<bool> = simplices
            .iter()
            .map(|s| s.normal()[d] >= -SINGULARITY_TOLERANCE || s.contains_vertex(apex))
            .collect();

        // Upper simplices are not cells; nothing may point at them.
        for (i, _) in upper.iter().enumerate().filter(|&(_, &u)| u) {
            let neighbors: Vec<usize> = simplices[i].adjacent().iter().flatten().copied().collect();
            for j in neighbors {
                simplices[j].detach_neighbor(i);
            }
        }

        let mut cell_index: Vec<Option<usize>> = vec![None; simplices.len()];
        let mut next = 0;
        for (slot, _) in cell_index.iter_mut().zip(&upper).filter(|&(_, &u)| !u) {
            *slot = Some(next);
            next += 1;
        }

        let mut cells = Vec::with_capacity(next);
        for (mut simplex, is_upper) in simplices.into_iter().zip(upper) {
            if is_upper {
                continue;
            }
            simplex.remap_adjacent(|j| cell_index[j]);
            cells.push(make_cell(simplex, points)?);
        }

        let vertex_indices = self
            .hull
            .vertices()
            .iter()
            .copied()
            .filter(|&v| v < apex)
            .collect();

        Ok(Generated {
            vertex_indices,
            cells,
        })
    }

    /// Drops every result; the engine dimension and hull solver are kept.
    pub fn clear(&mut self) {
        self.points.clear();
        self.vertex_indices.clear();
        self.cells.clear();
        self.centroid = None;
        self.hull.clear();
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Dimension of the input points.
    #[inline]
    #[must_use]
    pub const fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Copies of the input vertices, in input order.
    #[inline]
    #[must_use]
    pub fn points(&self) -> &[V] {
        &self.points
    }

    /// Copy of input vertex `index`.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<&V> {
        self.points.get(index)
    }

    /// Input indices of the vertices of the lifted hull.
    ///
    /// This is not the convex hull of the input. Every input point lies on the
    /// paraboloid, so every distinct point is a lifted hull vertex and belongs
    /// to some cell; of a group of exact duplicates only one index appears.
    /// Use the `None` neighbor slots of [`cells`](Self::cells) to find the
    /// boundary of the triangulation.
    #[inline]
    #[must_use]
    pub fn vertex_indices(&self) -> &[usize] {
        &self.vertex_indices
    }

    /// Vertices listed by [`vertex_indices`](Self::vertex_indices).
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.vertex_indices.iter().map(|&i| &self.points[i])
    }

    /// Delaunay cells.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[DelaunayCell<V>] {
        &self.cells
    }

    /// Number of Delaunay cells.
    #[inline]
    #[must_use]
    pub fn number_of_cells(&self) -> usize {
        self.cells.len()
    }

    /// Vertices of `cell`, which must belong to this triangulation.
    pub fn cell_vertices<'a>(&'a self, cell: &'a DelaunayCell<V>) -> impl Iterator<Item = &'a V> {
        cell.vertices().iter().filter_map(|&i| self.points.get(i))
    }

    /// Mean position of the [`vertices`](Self::vertices); `None` while there are no cells.
    #[must_use]
    pub const fn centroid(&self) -> Option<&V> {
        self.centroid.as_ref()
    }

    /// The hull solver, holding the lifted hull of the last generation.
    #[must_use]
    pub const fn hull(&self) -> &H {
        &self.hull
    }

    /// Returns `true` if there are no cells.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn make_cell<V: Vertex>(simplex: Simplex, points: &[V]) -> Result<DelaunayCell<V>, TriangulationError> {
    let vertices = simplex.vertices().to_vec();
    DelaunayCell::from_simplex(simplex, points)
        .map_err(|source| TriangulationError::DegenerateSimplex { vertices, source })
}

/// Lifts every point to `(y, |y|²)` and appends one apex point.
///
/// `y = (x - c) / s` where `c` is the centre of the input's bounding box and
/// `s` its longest side. The lower hull, and so the triangulation, does not
/// change under translation and uniform scaling, while the lifted heights stay
/// in `[0, D/4]` wherever the input sits. The apex sits above the centroid of
/// the working coordinates, higher than every lifted point. Facets through it
/// are upper facets, so the lower hull is unchanged, but it keeps the lifted
/// set full-dimensional when the input is co-spherical.
fn lift_with_apex<V: Vertex>(points: &[V], dimensions: usize) -> Vec<Vec<f64>> {
    let mut lower = vec![f64::INFINITY; dimensions];
    let mut upper = vec![f64::NEG_INFINITY; dimensions];
    for point in points {
        for (k, &c) in point.position().iter().enumerate() {
            lower[k] = lower[k].min(c);
            upper[k] = upper[k].max(c);
        }
    }
    let center: Vec<f64> = lower.iter().zip(&upper).map(|(&lo, &hi)| f64::midpoint(lo, hi)).collect();
    let extent = lower
        .iter()
        .zip(&upper)
        .map(|(lo, hi)| hi - lo)
        .fold(0.0_f64, f64::max);
    // Coincident input; the hull reports the degeneracy.
    let scale = if extent > 0.0 && extent.is_finite() { extent } else { 1.0 };

    let mut lifted: Vec<Vec<f64>> = Vec::with_capacity(points.len() + 1);
    let mut sum = vec![0.0; dimensions];
    let mut max_height = f64::NEG_INFINITY;
    for point in points {
        let mut row: Vec<f64> = point
            .position()
            .iter()
            .zip(&center)
            .map(|(x, c)| (x - c) / scale)
            .collect();
        for (s, y) in sum.iter_mut().zip(&row) {
            *s += y;
        }
        let height = squared_norm(&row);
        max_height = max_height.max(height);
        row.push(height);
        lifted.push(row);
    }

    #[expect(clippy::cast_precision_loss, reason = "point counts are far below 2^52")]
    let count = points.len() as f64;
    let mut apex: Vec<f64> = sum.into_iter().map(|s| s / count).collect();
    // Working coordinates span at most 1 along every axis.
    apex.push(max_height + 1.0);
    lifted.push(apex);
    lifted
}

fn mean_position<V: Vertex>(points: &[V], indices: &[usize]) -> V {
    let dimensions = points.first().map_or(0, Vertex::dimensions);
    let mut mean = vec![0.0; dimensions];
    for &i in indices {
        for (m, c) in mean.iter_mut().zip(points[i].position()) {
            *m += c;
        }
    }
    if !indices.is_empty() {
        #[expect(clippy::cast_precision_loss, reason = "point counts are far below 2^52")]
        let count = indices.len() as f64;
        for m in &mut mean {
            *m /= count;
        }
    }
    V::from_position(mean)
}

// =============================================================================
// TESTS
// =============================================================================
