//! Matrix operations.
//!
//! This module provides the small linear algebra helpers used by the hull
//! solver and the circumsphere code. Dimensions are only known at runtime
//! (the lifted space is `D + 1`), so everything is built on `nalgebra`'s
//! dynamically sized [`DMatrix`] and [`DVector`].

#![forbid(unsafe_code)]

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

/// Internal linear algebra matrix type used by this crate.
pub type Matrix = DMatrix<f64>;

/// Internal linear algebra vector type used by this crate.
pub type Vector = DVector<f64>;

/// Error type for matrix operations.
///
/// # Examples
///
/// ```rust
/// use lifted_delaunay::geometry::matrix::MatrixError;
///
/// let err = MatrixError::SingularMatrix;
/// assert!(matches!(err, MatrixError::SingularMatrix));
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    /// Matrix is singular.
    #[error("Matrix is singular!")]
    SingularMatrix,
    /// Matrix and right-hand side have incompatible shapes.
    #[error("Incompatible shapes: {rows}x{cols} matrix with right-hand side of length {rhs}")]
    ShapeMismatch {
        /// Number of matrix rows.
        rows: usize,
        /// Number of matrix columns.
        cols: usize,
        /// Length of the right-hand side.
        rhs: usize,
    },
}

/// Default tolerance for matrix singularity checks.
///
/// Determinants are compared against this value after scaling by the size of
/// the input, so the check is relative rather than absolute.
pub const SINGULARITY_TOLERANCE: f64 = 1e-12;

/// Compute an LU-based determinant of a square matrix.
///
/// # Examples
///
/// ```rust
/// use lifted_delaunay::geometry::matrix::{determinant, Matrix};
///
/// let m = Matrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 3.0]);
/// assert!((determinant(&m) - 6.0).abs() < 1e-12);
/// assert_eq!(determinant(&Matrix::zeros(2, 2)), 0.0);
/// ```
#[must_use]
pub fn determinant(m: &Matrix) -> f64 {
    if m.nrows() == 0 {
        return 1.0;
    }
    m.determinant()
}

/// Returns the determinant of `m` with column `skip` removed.
///
/// `m` must have exactly one more column than rows.
fn minor_without_column(m: &Matrix, skip: usize) -> f64 {
    determinant(&m.clone().remove_column(skip))
}

/// Computes a vector orthogonal to every row of `edges` by cofactor expansion.
///
/// `edges` is a `(n - 1) × n` matrix whose rows span a hyperplane through the
/// origin; component `j` of the result is `(-1)^j` times the minor obtained by
/// deleting column `j`. The result is not normalized, and it is the zero
/// vector when the rows are linearly dependent.
///
/// # Examples
///
/// ```rust
/// use lifted_delaunay::geometry::matrix::{cofactor_normal, Matrix};
///
/// // Rows span the xy-plane in 3D, so the normal is along z.
/// let edges = Matrix::from_row_slice(2, 3, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
/// let n = cofactor_normal(&edges);
/// assert_eq!(n.as_slice(), &[0.0, 0.0, 1.0]);
/// ```
#[must_use]
pub fn cofactor_normal(edges: &Matrix) -> Vector {
    let n = edges.ncols();
    debug_assert_eq!(edges.nrows() + 1, n, "cofactor_normal expects (n-1) x n");
    Vector::from_iterator(
        n,
        (0..n).map(|j| {
            let minor = minor_without_column(edges, j);
            if j % 2 == 0 { minor } else { -minor }
        }),
    )
}

/// Solve the square system `a * x = b` by LU decomposition.
///
/// # Errors
///
/// Returns [`MatrixError::ShapeMismatch`] if `a` is not square or `b` has the
/// wrong length, and [`MatrixError::SingularMatrix`] if the system has no
/// unique solution.
///
/// # Examples
///
/// ```rust
/// use lifted_delaunay::geometry::matrix::{solve, Matrix, Vector};
///
/// let a = Matrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 4.0]);
/// let b = Vector::from_vec(vec![2.0, 2.0]);
/// let x = solve(&a, &b).unwrap();
/// assert_eq!(x.as_slice(), &[1.0, 0.5]);
/// ```
pub fn solve(a: &Matrix, b: &Vector) -> Result<Vector, MatrixError> {
    if a.nrows() != a.ncols() || a.nrows() != b.len() {
        return Err(MatrixError::ShapeMismatch {
            rows: a.nrows(),
            cols: a.ncols(),
            rhs: b.len(),
        });
    }
    a.clone().lu().solve(b).ok_or(MatrixError::SingularMatrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn matrix_determinant_identity_and_empty() {
        assert_relative_eq!(determinant(&Matrix::identity(4, 4)), 1.0);
        assert_relative_eq!(determinant(&Matrix::zeros(0, 0)), 1.0);
    }

    #[test]
    fn matrix_cofactor_normal_is_orthogonal_to_rows() {
        let edges = Matrix::from_row_slice(
            3,
            4,
            &[1.0, 2.0, 0.5, -1.0, 0.0, 1.0, 3.0, 2.0, -2.0, 0.0, 1.0, 1.0],
        );
        let n = cofactor_normal(&edges);
        for row in edges.row_iter() {
            assert_relative_eq!(row.transpose().dot(&n), 0.0, epsilon = 1e-12);
        }
        assert!(n.norm() > 0.0);
    }

    #[test]
    fn matrix_cofactor_normal_vanishes_for_dependent_rows() {
        let edges = Matrix::from_row_slice(2, 3, &[1.0, 1.0, 0.0, 2.0, 2.0, 0.0]);
        assert_relative_eq!(cofactor_normal(&edges).norm(), 0.0);
    }

    #[test]
    fn matrix_solve_rejects_singular_and_misshaped_systems() {
        let singular = Matrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let b = Vector::from_vec(vec![1.0, 1.0]);
        assert_eq!(solve(&singular, &b), Err(MatrixError::SingularMatrix));

        let short = Vector::from_vec(vec![1.0]);
        assert!(matches!(
            solve(&Matrix::identity(2, 2), &short),
            Err(MatrixError::ShapeMismatch { rows: 2, cols: 2, rhs: 1 })
        ));
    }
}
