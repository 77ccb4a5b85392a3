//! Circumsphere calculations for simplices.
//!
//! This module provides functions for computing the circumcenter and
//! circumradius of simplices in d-dimensional space. Triangles in the plane
//! use the closed-form determinant expansion; every other dimension solves the
//! perpendicular-bisector system with an LU decomposition.

use nalgebra::Matrix3;

use crate::geometry::matrix::{Matrix, SINGULARITY_TOLERANCE, Vector, determinant, solve};

use super::norms::{hypot, squared_distance, squared_norm};

// Re-export error type
pub use super::CircumcenterError;

/// Center and radius of the sphere through every vertex of a simplex.
#[derive(Clone, Debug, PartialEq)]
pub struct Circumsphere {
    /// Circumcenter coordinates.
    pub center: Vec<f64>,
    /// Circumradius (non-negative).
    pub radius: f64,
}

/// Calculate the circumsphere of a simplex given as D+1 points in D dimensions.
///
/// Dispatches to [`circumsphere_2d`] for triangles in the plane and to the
/// general linear solve otherwise.
///
/// # Errors
///
/// Returns an error if:
/// - no points are given
/// - the points have differing dimensions
/// - the number of points is not `dimension + 1`
/// - the simplex is degenerate (flat or with coincident points)
///
/// # Example
///
/// ```
/// use lifted_delaunay::geometry::util::circumsphere;
/// use approx::assert_relative_eq;
///
/// let points = [
///     vec![0.0, 0.0, 0.0],
///     vec![1.0, 0.0, 0.0],
///     vec![0.0, 1.0, 0.0],
///     vec![0.0, 0.0, 1.0],
/// ];
/// let sphere = circumsphere(&points).unwrap();
/// assert_relative_eq!(sphere.center.as_slice(), [0.5, 0.5, 0.5].as_slice(), epsilon = 1e-12);
/// assert_relative_eq!(sphere.radius, 3.0_f64.sqrt() / 2.0, epsilon = 1e-12);
/// ```
pub fn circumsphere<P: AsRef<[f64]>>(points: &[P]) -> Result<Circumsphere, CircumcenterError> {
    let dimension = validate_simplex(points)?;
    if dimension == 2 {
        circumsphere_2d(points[0].as_ref(), points[1].as_ref(), points[2].as_ref())
    } else {
        circumsphere_general(points, dimension)
    }
}

/// Calculate the circumcenter of a simplex.
///
/// # Errors
///
/// See [`circumsphere`].
pub fn circumcenter<P: AsRef<[f64]>>(points: &[P]) -> Result<Vec<f64>, CircumcenterError> {
    circumsphere(points).map(|sphere| sphere.center)
}

/// Calculate the circumradius of a simplex.
///
/// # Errors
///
/// See [`circumsphere`].
pub fn circumradius<P: AsRef<[f64]>>(points: &[P]) -> Result<f64, CircumcenterError> {
    circumsphere(points).map(|sphere| sphere.radius)
}

/// Circumcircle of a triangle by determinant expansion.
///
/// With rows `[x_i, y_i, 1]` the determinant `a` is twice the signed area.
/// Replacing column 0 by `|p_i|²` gives `dx = -det`; then replacing column 1
/// by `x_i` gives `dy = det`; then replacing column 2 by `y_i` gives
/// `c = -det`. With `s = -1 / (2a)` the center is `(s·dx, s·dy)` and the radius
/// is `|s|·sqrt(dx² + dy² - 4ac)`.
///
/// Coordinates are taken relative to `p0` before expanding and the center is
/// shifted back afterwards, which keeps the squared magnitudes small for
/// triangles far from the origin.
///
/// # Errors
///
/// Returns [`CircumcenterError::DegenerateSimplex`] when `|a|` is within
/// [`SINGULARITY_TOLERANCE`] scaled by the longest squared edge, i.e. the
/// points are collinear or coincident. The check runs before any division,
/// so no NaN or infinite values are ever produced.
///
/// # Example
///
/// ```
/// use lifted_delaunay::geometry::util::circumsphere_2d;
/// use approx::assert_relative_eq;
///
/// let sphere = circumsphere_2d(&[0.0, 0.0], &[1.0, 0.0], &[0.0, 1.0]).unwrap();
/// assert_relative_eq!(sphere.center.as_slice(), [0.5, 0.5].as_slice());
/// assert_relative_eq!(sphere.radius, 2.0_f64.sqrt() / 2.0);
///
/// assert!(circumsphere_2d(&[0.0, 0.0], &[1.0, 1.0], &[2.0, 2.0]).is_err());
/// ```
pub fn circumsphere_2d(
    p0: &[f64],
    p1: &[f64],
    p2: &[f64],
) -> Result<Circumsphere, CircumcenterError> {
    let rel = |p: &[f64]| [p[0] - p0[0], p[1] - p0[1]];
    let pts = [[0.0, 0.0], rel(p1), rel(p2)];
    let sq = pts.map(|p| squared_norm(&p));

    let a = Matrix3::new(
        pts[0][0], pts[0][1], 1.0, //
        pts[1][0], pts[1][1], 1.0, //
        pts[2][0], pts[2][1], 1.0,
    )
    .determinant();

    let scale = max_squared_edge(&[p0, p1, p2]);
    let tolerance = SINGULARITY_TOLERANCE * scale;
    if a.abs() <= tolerance || !a.is_finite() {
        return Err(CircumcenterError::DegenerateSimplex {
            determinant: a,
            tolerance,
        });
    }

    let dx = -Matrix3::new(
        sq[0], pts[0][1], 1.0, //
        sq[1], pts[1][1], 1.0, //
        sq[2], pts[2][1], 1.0,
    )
    .determinant();
    let dy = Matrix3::new(
        sq[0], pts[0][0], 1.0, //
        sq[1], pts[1][0], 1.0, //
        sq[2], pts[2][0], 1.0,
    )
    .determinant();
    let c = -Matrix3::new(
        sq[0], pts[0][0], pts[0][1], //
        sq[1], pts[1][0], pts[1][1], //
        sq[2], pts[2][0], pts[2][1],
    )
    .determinant();

    let s = -1.0 / (2.0 * a);
    let center = vec![p0[0] + s * dx, p0[1] + s * dy];
    // 4ac can exceed dx² + dy² by rounding for tiny radii.
    let radicand = (dx * dx + dy * dy - 4.0 * a * c).max(0.0);
    let radius = s.abs() * radicand.sqrt();

    Ok(Circumsphere { center, radius })
}

/// General-dimension circumsphere.
///
/// Solves `A x = b` with rows `A_i = p_i - p_0` and `b_i = |p_i - p_0|²`; the
/// center is `p_0 + x / 2`.
fn circumsphere_general<P: AsRef<[f64]>>(
    points: &[P],
    dimension: usize,
) -> Result<Circumsphere, CircumcenterError> {
    let origin = points[0].as_ref();
    let mut a = Matrix::zeros(dimension, dimension);
    let mut b = Vector::zeros(dimension);

    for (row, point) in points[1..].iter().enumerate() {
        let point = point.as_ref();
        for col in 0..dimension {
            a[(row, col)] = point[col] - origin[col];
        }
        b[row] = squared_distance(point, origin);
    }

    let scale = max_squared_edge(points).sqrt().powi(i32::try_from(dimension).unwrap_or(i32::MAX));
    let tolerance = SINGULARITY_TOLERANCE * scale;
    let det = determinant(&a);
    if det.abs() <= tolerance || !det.is_finite() {
        return Err(CircumcenterError::DegenerateSimplex {
            determinant: det,
            tolerance,
        });
    }

    let x = solve(&a, &b).map_err(|_| CircumcenterError::DegenerateSimplex {
        determinant: det,
        tolerance,
    })?;

    let center: Vec<f64> = origin
        .iter()
        .zip(x.iter())
        .map(|(&o, &xi)| 0.5f64.mul_add(xi, o))
        .collect();
    let offset: Vec<f64> = center.iter().zip(origin).map(|(&c, &o)| c - o).collect();
    let radius = hypot(&offset);

    Ok(Circumsphere { center, radius })
}

/// Checks that `points` describe a simplex and returns its dimension.
fn validate_simplex<P: AsRef<[f64]>>(points: &[P]) -> Result<usize, CircumcenterError> {
    let Some(first) = points.first() else {
        return Err(CircumcenterError::EmptyPointSet);
    };
    let dimension = first.as_ref().len();
    if let Some((index, p)) = points
        .iter()
        .enumerate()
        .find(|(_, p)| p.as_ref().len() != dimension)
    {
        return Err(CircumcenterError::MixedDimensions {
            index,
            expected: dimension,
            actual: p.as_ref().len(),
        });
    }
    if points.len() != dimension + 1 {
        return Err(CircumcenterError::InvalidSimplex {
            actual: points.len(),
            expected: dimension + 1,
            dimension,
        });
    }
    Ok(dimension)
}

/// Longest squared edge length of the simplex.
fn max_squared_edge<P: AsRef<[f64]>>(points: &[P]) -> f64 {
    let mut max = 0.0_f64;
    for (i, p) in points.iter().enumerate() {
        for q in &points[i + 1..] {
            max = max.max(squared_distance(p.as_ref(), q.as_ref()));
        }
    }
    max
}
