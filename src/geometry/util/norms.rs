//! Vector norm and distance computations.
//!
//! This module provides numerically stable functions for computing norms and
//! distances of d-dimensional coordinate slices.

/// Compute the squared norm (sum of squares) of a coordinate slice.
///
/// # Examples
///
/// ```
/// use lifted_delaunay::geometry::util::squared_norm;
///
/// assert_eq!(squared_norm(&[3.0, 4.0]), 25.0);
/// assert_eq!(squared_norm(&[1.0, 2.0, 2.0]), 9.0);
/// ```
#[inline]
#[must_use]
pub fn squared_norm(coords: &[f64]) -> f64 {
    coords.iter().fold(0.0, |acc, &x| x.mul_add(x, acc))
}

/// Compute the d-dimensional hypot (Euclidean norm) of a coordinate slice.
///
/// The 2D case uses `f64::hypot`. Higher dimensions scale every coordinate by
/// the largest absolute value before squaring, which avoids overflow and
/// underflow in the intermediate sum.
///
/// # Examples
///
/// ```
/// use lifted_delaunay::geometry::util::hypot;
///
/// assert_eq!(hypot(&[3.0, 4.0]), 5.0);
/// assert_eq!(hypot(&[1.0, 2.0, 2.0]), 3.0);
/// assert_eq!(hypot(&[1.0, 1.0, 1.0, 1.0]), 2.0);
/// ```
#[must_use]
pub fn hypot(coords: &[f64]) -> f64 {
    match coords {
        [] => 0.0,
        [x] => x.abs(),
        [x, y] => x.hypot(*y),
        _ => {
            let max_abs = coords.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
            if max_abs == 0.0 {
                return 0.0;
            }
            let sum_of_scaled_squares = coords
                .iter()
                .map(|&x| {
                    let scaled = x / max_abs;
                    scaled * scaled
                })
                .sum::<f64>();
            max_abs * sum_of_scaled_squares.sqrt()
        }
    }
}

/// Squared Euclidean distance between two coordinate slices of equal length.
///
/// Only the common prefix is compared; callers check lengths first.
#[inline]
#[must_use]
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).fold(0.0, |acc, (&x, &y)| {
        let d = x - y;
        d.mul_add(d, acc)
    })
}

/// Euclidean distance between two coordinate slices of equal length.
///
/// # Examples
///
/// ```
/// use lifted_delaunay::geometry::util::distance;
///
/// assert_eq!(distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
/// ```
#[must_use]
pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    let diff: Vec<f64> = a.iter().zip(b).map(|(&x, &y)| x - y).collect();
    hypot(&diff)
}
