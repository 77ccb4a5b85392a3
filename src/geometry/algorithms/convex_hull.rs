//! d-dimensional convex hulls.
//!
//! The Delaunay engine reduces triangulation to a convex hull problem one
//! dimension up. This module defines the interface it consumes,
//! [`ConvexHullSolver`], the [`Simplex`] records a solver produces, and
//! [`ConvexHull`], the default beneath-beyond implementation.
//!
//! # Algorithm
//!
//! [`ConvexHull`] starts from a full-dimensional simplex picked greedily from
//! the input and inserts the remaining points one at a time:
//!
//! 1. collect the facets that see the point (signed distance above tolerance)
//! 2. walk their neighbors to find the horizon ridges
//! 3. cone every horizon ridge to the point, wiring the new facet to the
//!    facet on the far side of the ridge and to its new siblings
//! 4. drop the visible facets
//!
//! Facets live in a [`SlotMap`] arena and refer to each other by key, so
//! removing a facet never leaves a dangling reference; the exported
//! [`Simplex`] list renumbers them densely.

use nalgebra::DVector;
use slotmap::{SecondaryMap, SlotMap, new_key_type};
use smallvec::smallvec;
use thiserror::Error;

use crate::core::collections::{
    FastHashMap, FastHashSet, MAX_PRACTICAL_DIMENSION_SIZE, RidgeKey, SimplexNeighbors,
    SimplexVertices, SmallBuffer, fast_hash_map_with_capacity, fast_hash_set_with_capacity,
    ridge_key,
};
use crate::geometry::matrix::{Matrix, Vector, cofactor_normal};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default visibility tolerance of [`ConvexHull`].
///
/// Scaled by the extent of the input (the longest side of its bounding box)
/// before use, so visibility does not depend on where the input sits or on
/// its units.
pub const DEFAULT_HULL_TOLERANCE: f64 = 1e-10;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur during convex hull construction.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConvexHullError {
    /// Hulls are only defined here for ambient dimension 2 and above.
    #[error("Invalid hull dimension {dimension}: must be at least 2")]
    InvalidDimension {
        /// Requested ambient dimension.
        dimension: usize,
    },
    /// A point does not have the expected number of coordinates.
    #[error("Point {index} has {actual} coordinates, expected {expected}")]
    DimensionMismatch {
        /// Index of the offending point.
        index: usize,
        /// Ambient dimension of the hull.
        expected: usize,
        /// Coordinate count of the point.
        actual: usize,
    },
    /// A point has a NaN or infinite coordinate.
    #[error("Point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending point.
        index: usize,
    },
    /// Too few points to span the ambient space.
    #[error("Insufficient points for a convex hull: got {actual}, need at least {required}")]
    InsufficientPoints {
        /// Number of points supplied.
        actual: usize,
        /// Minimum number of points required.
        required: usize,
    },
    /// The input does not span the ambient space, or a facet collapsed.
    #[error("Geometric degeneracy encountered during convex hull construction: {message}")]
    GeometricDegeneracy {
        /// Description of the degeneracy.
        message: String,
    },
    /// Facet adjacency could not be kept consistent (numerically ambiguous input).
    #[error("Inconsistent facet adjacency: {message}")]
    InconsistentAdjacency {
        /// Description of the inconsistency.
        message: String,
    },
}

// =============================================================================
// SIMPLEX
// =============================================================================

/// One facet of a convex hull.
///
/// A hull in `n` dimensions is bounded by simplices of `n` vertices. Each
/// simplex carries its outward unit normal, the hyperplane offset (so that
/// `normal · x = offset` on the facet), and one adjacency slot per vertex:
/// `adjacent()[i]` is the neighbor across the ridge opposite `vertices()[i]`,
/// or `None` when there is none.
#[derive(Clone, Debug, PartialEq)]
pub struct Simplex {
    vertices: SimplexVertices,
    normal: Vec<f64>,
    offset: f64,
    adjacent: SimplexNeighbors,
}

impl Simplex {
    /// Creates a simplex from its parts.
    ///
    /// `adjacent` must have the same length as `vertices`.
    #[must_use]
    pub fn new(
        vertices: SimplexVertices,
        normal: Vec<f64>,
        offset: f64,
        adjacent: SimplexNeighbors,
    ) -> Self {
        debug_assert_eq!(vertices.len(), adjacent.len());
        Self {
            vertices,
            normal,
            offset,
            adjacent,
        }
    }

    /// Indices of the simplex vertices.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Outward unit normal.
    #[inline]
    #[must_use]
    pub fn normal(&self) -> &[f64] {
        &self.normal
    }

    /// Hyperplane offset: `normal · x == offset` for points on the facet.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Neighbor slots; slot `i` is across the ridge opposite vertex `i`.
    #[inline]
    #[must_use]
    pub fn adjacent(&self) -> &[Option<usize>] {
        &self.adjacent
    }

    /// Number of present neighbors.
    #[must_use]
    pub fn neighbor_count(&self) -> usize {
        self.adjacent.iter().flatten().count()
    }

    /// Returns `true` if `vertex` is one of the simplex vertices.
    #[must_use]
    pub fn contains_vertex(&self, vertex: usize) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Signed distance of `point` from the facet hyperplane (positive outside).
    #[must_use]
    pub fn signed_distance(&self, point: &[f64]) -> f64 {
        self.normal
            .iter()
            .zip(point)
            .map(|(n, x)| n * x)
            .sum::<f64>()
            - self.offset
    }

    /// Clears every adjacency slot that refers to `neighbor`.
    ///
    /// Returns `true` if a slot was cleared.
    pub fn detach_neighbor(&mut self, neighbor: usize) -> bool {
        let mut detached = false;
        for slot in &mut self.adjacent {
            if *slot == Some(neighbor) {
                *slot = None;
                detached = true;
            }
        }
        detached
    }

    /// Rewrites neighbor indices through `remap`; neighbors mapped to `None`
    /// become missing.
    pub fn remap_adjacent<F>(&mut self, remap: F)
    where
        F: Fn(usize) -> Option<usize>,
    {
        for slot in &mut self.adjacent {
            *slot = slot.and_then(&remap);
        }
    }

    /// Rewrites vertex indices through `remap`.
    pub fn remap_vertices<F>(&mut self, remap: F)
    where
        F: Fn(usize) -> usize,
    {
        for v in &mut self.vertices {
            *v = remap(*v);
        }
    }
}

// =============================================================================
// SOLVER INTERFACE
// =============================================================================

/// Interface of a convex hull solver, as consumed by the Delaunay engine.
///
/// After a successful [`generate`](Self::generate), every simplex normal has
/// length `dimension` and simplex vertex indices refer to `points`.
pub trait ConvexHullSolver {
    /// Computes the hull of `points` in `dimension`-dimensional space,
    /// replacing any previous result.
    ///
    /// With `check_input`, points whose length differs from `dimension` or
    /// whose coordinates are not finite are rejected up front.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvexHullError`] if the input is malformed or the points
    /// do not span the space.
    fn generate(
        &mut self,
        points: &[Vec<f64>],
        dimension: usize,
        check_input: bool,
    ) -> Result<(), ConvexHullError>;

    /// Hull facets.
    fn simplices(&self) -> &[Simplex];

    /// Sorted indices of the points that are vertices of the hull.
    fn vertices(&self) -> &[usize];

    /// Mean of the hull vertices.
    fn centroid(&self) -> &[f64];

    /// Drops the current result.
    fn clear(&mut self);
}

// =============================================================================
// DEFAULT SOLVER
// =============================================================================

/// Beneath-beyond convex hull in arbitrary dimension.
///
/// # Examples
///
/// ```rust
/// use lifted_delaunay::geometry::algorithms::convex_hull::{ConvexHull, ConvexHullSolver};
///
/// let points = vec![
///     vec![0.0, 0.0, 0.0],
///     vec![1.0, 0.0, 0.0],
///     vec![0.0, 1.0, 0.0],
///     vec![0.0, 0.0, 1.0],
///     vec![0.1, 0.1, 0.1], // interior
/// ];
/// let mut hull = ConvexHull::default();
/// hull.generate(&points, 3, true).unwrap();
///
/// assert_eq!(hull.simplices().len(), 4);
/// assert_eq!(hull.vertices(), &[0, 1, 2, 3]);
/// ```
#[derive(Clone, Debug)]
pub struct ConvexHull {
    tolerance: f64,
    extent: f64,
    dimension: usize,
    simplices: Vec<Simplex>,
    vertices: Vec<usize>,
    centroid: Vec<f64>,
}

impl Default for ConvexHull {
    fn default() -> Self {
        Self::with_tolerance(DEFAULT_HULL_TOLERANCE)
    }
}

impl ConvexHull {
    /// Creates an empty solver with the given visibility tolerance.
    #[must_use]
    pub const fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            extent: 0.0,
            dimension: 0,
            simplices: Vec::new(),
            vertices: Vec::new(),
            centroid: Vec::new(),
        }
    }

    /// Visibility tolerance before scaling.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Longest bounding-box side of the last generated input (0 when empty).
    #[must_use]
    pub const fn extent(&self) -> f64 {
        self.extent
    }

    /// Ambient dimension of the last generated hull (0 when empty).
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of hull facets.
    #[must_use]
    pub fn facet_count(&self) -> usize {
        self.simplices.len()
    }

    /// Returns `true` if `point` lies outside the hull by more than the tolerance.
    #[must_use]
    pub fn is_point_outside(&self, point: &[f64]) -> bool {
        let tolerance = self.tolerance * self.extent;
        self.simplices
            .iter()
            .any(|s| s.signed_distance(point) > tolerance)
    }

    fn validate_input(
        points: &[Vec<f64>],
        dimension: usize,
        check_input: bool,
    ) -> Result<(), ConvexHullError> {
        if dimension < 2 {
            return Err(ConvexHullError::InvalidDimension { dimension });
        }
        for (index, p) in points.iter().enumerate() {
            let malformed = if check_input {
                p.len() != dimension
            } else {
                p.len() < dimension
            };
            if malformed {
                return Err(ConvexHullError::DimensionMismatch {
                    index,
                    expected: dimension,
                    actual: p.len(),
                });
            }
            if check_input && p.iter().any(|c| !c.is_finite()) {
                return Err(ConvexHullError::NonFiniteCoordinate { index });
            }
        }
        if points.len() < dimension + 1 {
            return Err(ConvexHullError::InsufficientPoints {
                actual: points.len(),
                required: dimension + 1,
            });
        }
        Ok(())
    }
}

impl ConvexHullSolver for ConvexHull {
    fn generate(
        &mut self,
        points: &[Vec<f64>],
        dimension: usize,
        check_input: bool,
    ) -> Result<(), ConvexHullError> {
        self.clear();
        Self::validate_input(points, dimension, check_input)?;

        let mut builder = HullBuilder::new(points, dimension, self.tolerance);
        let seed = builder.initial_simplex()?;
        builder.seed_facets(&seed)?;

        let mut inserted = 0usize;
        for point in 0..points.len() {
            if seed.contains(&point) {
                continue;
            }
            if builder.add_point(point)? {
                inserted += 1;
            }
        }

        let extent = builder.extent;
        let (simplices, vertices, centroid) = builder.finish();
        tracing::debug!(
            "convex hull: {} points in {}D, {} inserted beyond the seed simplex, {} facets, {} hull vertices",
            points.len(),
            dimension,
            inserted,
            simplices.len(),
            vertices.len()
        );

        self.dimension = dimension;
        self.simplices = simplices;
        self.vertices = vertices;
        self.centroid = centroid;
        self.extent = extent;
        Ok(())
    }

    fn simplices(&self) -> &[Simplex] {
        &self.simplices
    }

    fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    fn centroid(&self) -> &[f64] {
        &self.centroid
    }

    fn clear(&mut self) {
        self.dimension = 0;
        self.simplices.clear();
        self.vertices.clear();
        self.centroid.clear();
        self.extent = 0.0;
    }
}

// =============================================================================
// BENEATH-BEYOND CONSTRUCTION
// =============================================================================

new_key_type! {
    /// Key of a facet in the construction arena.
    struct FacetKey;
}

type FacetNeighbors = SmallBuffer<Option<FacetKey>, MAX_PRACTICAL_DIMENSION_SIZE>;

#[derive(Clone, Debug)]
struct Facet {
    vertices: SimplexVertices,
    normal: Vector,
    offset: f64,
    neighbors: FacetNeighbors,
}

/// A ridge on the boundary of the visible region.
struct HorizonRidge {
    vertices: SimplexVertices,
    visible: FacetKey,
    outside: FacetKey,
}

/// Incremental construction state.
///
/// Coordinates are stored relative to the centre of the input's bounding box;
/// [`HullBuilder::finish`] moves offsets and the centroid back.
struct HullBuilder {
    coords: Vec<Vector>,
    origin: Vector,
    extent: f64,
    dimension: usize,
    tolerance: f64,
    interior: Vector,
    facets: SlotMap<FacetKey, Facet>,
}

impl HullBuilder {
    fn new(points: &[Vec<f64>], dimension: usize, tolerance: f64) -> Self {
        let mut lower = Vector::from_element(dimension, f64::INFINITY);
        let mut upper = Vector::from_element(dimension, f64::NEG_INFINITY);
        for p in points {
            for (k, &c) in p[..dimension].iter().enumerate() {
                lower[k] = lower[k].min(c);
                upper[k] = upper[k].max(c);
            }
        }
        let origin = lower.zip_map(&upper, f64::midpoint);
        let extent = (&upper - &lower).amax();

        let coords: Vec<Vector> = points
            .iter()
            .map(|p| DVector::from_column_slice(&p[..dimension]) - &origin)
            .collect();
        Self {
            coords,
            origin,
            extent,
            dimension,
            tolerance: tolerance * extent,
            interior: Vector::zeros(dimension),
            facets: SlotMap::with_key(),
        }
    }

    #[inline]
    fn distance(&self, facet: &Facet, point: usize) -> f64 {
        facet.normal.dot(&self.coords[point]) - facet.offset
    }

    /// Picks `dimension + 1` affinely independent points.
    ///
    /// Starts at the point with the smallest first coordinate, then keeps
    /// adding the point farthest from the affine span chosen so far.
    fn initial_simplex(&self) -> Result<SimplexVertices, ConvexHullError> {
        let first = (0..self.coords.len())
            .min_by(|&a, &b| self.coords[a][0].total_cmp(&self.coords[b][0]))
            .ok_or_else(|| ConvexHullError::InsufficientPoints {
                actual: 0,
                required: self.dimension + 1,
            })?;

        let mut chosen: SimplexVertices = smallvec![first];
        let mut basis: Vec<Vector> = Vec::with_capacity(self.dimension);

        while chosen.len() <= self.dimension {
            let mut best: Option<(usize, f64, Vector)> = None;
            for (index, coords) in self.coords.iter().enumerate() {
                if chosen.contains(&index) {
                    continue;
                }
                let mut residual = coords - &self.coords[first];
                for e in &basis {
                    let projection = residual.dot(e);
                    residual.axpy(-projection, e, 1.0);
                }
                let d = residual.norm();
                if best.as_ref().is_none_or(|(_, best_d, _)| d > *best_d) {
                    best = Some((index, d, residual));
                }
            }
            match best {
                Some((index, d, residual)) if d > self.tolerance => {
                    basis.push(residual / d);
                    chosen.push(index);
                }
                _ => {
                    return Err(ConvexHullError::GeometricDegeneracy {
                        message: format!(
                            "input spans only {} of {} dimensions",
                            chosen.len() - 1,
                            self.dimension
                        ),
                    });
                }
            }
        }
        Ok(chosen)
    }

    /// Builds an oriented facet with empty neighbor slots.
    fn make_facet(&self, vertices: SimplexVertices) -> Result<Facet, ConvexHullError> {
        let n = self.dimension;
        let base = &self.coords[vertices[0]];
        let edges = Matrix::from_fn(n - 1, n, |r, c| self.coords[vertices[r + 1]][c] - base[c]);
        let mut normal = cofactor_normal(&edges);
        let norm = normal.norm();
        if !norm.is_finite() || norm <= f64::MIN_POSITIVE {
            return Err(ConvexHullError::GeometricDegeneracy {
                message: format!("facet {:?} has no well-defined normal", vertices.as_slice()),
            });
        }
        normal /= norm;
        let mut offset = normal.dot(base);
        if normal.dot(&self.interior) - offset > 0.0 {
            normal.neg_mut();
            offset = -offset;
        }
        Ok(Facet {
            vertices,
            normal,
            offset,
            neighbors: smallvec![None; n],
        })
    }

    /// Creates the `dimension + 1` facets of the seed simplex.
    fn seed_facets(&mut self, seed: &[usize]) -> Result<(), ConvexHullError> {
        let mut interior = Vector::zeros(self.dimension);
        for &v in seed {
            interior += &self.coords[v];
        }
        #[expect(clippy::cast_precision_loss, reason = "seed has dimension + 1 points")]
        let count = seed.len() as f64;
        self.interior = interior / count;

        let mut keys: SmallBuffer<FacetKey, MAX_PRACTICAL_DIMENSION_SIZE> = SmallBuffer::new();
        for skip in 0..seed.len() {
            let vertices: SimplexVertices = seed
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &v)| v)
                .collect();
            let facet = self.make_facet(vertices)?;
            keys.push(self.facets.insert(facet));
        }
        // Facet `skip` lists seed[j] for j != skip; across the ridge opposite
        // seed[j] lies the facet that skips seed[j].
        for (skip, &key) in keys.iter().enumerate() {
            self.facets[key].neighbors = (0..seed.len())
                .filter(|&j| j != skip)
                .map(|j| Some(keys[j]))
                .collect();
        }
        Ok(())
    }

    /// Inserts `point`; returns `false` if it lies inside the current hull.
    fn add_point(&mut self, point: usize) -> Result<bool, ConvexHullError> {
        let visible: Vec<FacetKey> = self
            .facets
            .iter()
            .filter(|(_, facet)| self.distance(facet, point) > self.tolerance)
            .map(|(key, _)| key)
            .collect();
        if visible.is_empty() {
            return Ok(false);
        }
        let mut visible_set: FastHashSet<FacetKey> = fast_hash_set_with_capacity(visible.len());
        visible_set.extend(visible.iter().copied());

        let mut horizon: Vec<HorizonRidge> = Vec::new();
        for &key in &visible {
            let facet = &self.facets[key];
            for (slot, neighbor) in facet.neighbors.iter().enumerate() {
                let neighbor = neighbor.ok_or_else(|| ConvexHullError::InconsistentAdjacency {
                    message: format!("facet {:?} has an open ridge", facet.vertices.as_slice()),
                })?;
                if !visible_set.contains(&neighbor) {
                    horizon.push(HorizonRidge {
                        vertices: facet
                            .vertices
                            .iter()
                            .enumerate()
                            .filter(|&(s, _)| s != slot)
                            .map(|(_, &v)| v)
                            .collect(),
                        visible: key,
                        outside: neighbor,
                    });
                }
            }
        }

        let apex_slot = self.dimension - 1;
        let mut pending: FastHashMap<RidgeKey, (FacetKey, usize)> =
            fast_hash_map_with_capacity(horizon.len() * self.dimension);

        for ridge in horizon {
            let mut vertices = ridge.vertices;
            vertices.push(point);
            let mut facet = self.make_facet(vertices)?;
            facet.neighbors[apex_slot] = Some(ridge.outside);
            let new_key = self.facets.insert(facet);

            let outside = &mut self.facets[ridge.outside];
            let back_slot = outside
                .neighbors
                .iter()
                .position(|&nb| nb == Some(ridge.visible))
                .ok_or_else(|| ConvexHullError::InconsistentAdjacency {
                    message: format!(
                        "facet {:?} does not point back across the horizon",
                        outside.vertices.as_slice()
                    ),
                })?;
            outside.neighbors[back_slot] = Some(new_key);

            let vertices = self.facets[new_key].vertices.clone();
            for slot in 0..apex_slot {
                let key = ridge_key(&vertices, slot);
                if let Some((sibling, sibling_slot)) = pending.remove(&key) {
                    self.facets[new_key].neighbors[slot] = Some(sibling);
                    self.facets[sibling].neighbors[sibling_slot] = Some(new_key);
                } else {
                    pending.insert(key, (new_key, slot));
                }
            }
        }

        if !pending.is_empty() {
            return Err(ConvexHullError::InconsistentAdjacency {
                message: format!(
                    "{} new ridges left unmatched while inserting point {point}",
                    pending.len()
                ),
            });
        }

        for key in visible {
            self.facets.remove(key);
        }
        Ok(true)
    }

    /// Exports facets as densely indexed simplices.
    fn finish(self) -> (Vec<Simplex>, Vec<usize>, Vec<f64>) {
        let mut index: SecondaryMap<FacetKey, usize> = SecondaryMap::new();
        for (i, key) in self.facets.keys().enumerate() {
            index.insert(key, i);
        }

        let simplices: Vec<Simplex> = self
            .facets
            .values()
            .map(|facet| {
                let adjacent: SimplexNeighbors = facet
                    .neighbors
                    .iter()
                    .map(|nb| nb.and_then(|k| index.get(k).copied()))
                    .collect();
                Simplex::new(
                    facet.vertices.clone(),
                    facet.normal.iter().copied().collect(),
                    facet.offset + facet.normal.dot(&self.origin),
                    adjacent,
                )
            })
            .collect();

        let mut vertices: Vec<usize> = self
            .facets
            .values()
            .flat_map(|facet| facet.vertices.iter().copied())
            .collect::<FastHashSet<usize>>()
            .into_iter()
            .collect();
        vertices.sort_unstable();

        let mut centroid = Vector::zeros(self.dimension);
        for &v in &vertices {
            centroid += &self.coords[v];
        }
        if !vertices.is_empty() {
            #[expect(clippy::cast_precision_loss, reason = "vertex counts are small")]
            let count = vertices.len() as f64;
            centroid /= count;
        }
        centroid += &self.origin;

        (simplices, vertices, centroid.iter().copied().collect())
    }
}

// =============================================================================
// TESTS
// =============================================================================
