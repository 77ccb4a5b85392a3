//! Random point generation functions.
//!
//! This module provides utilities for generating random vertices in
//! d-dimensional space, mainly for tests, property checks and benchmarks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::vertex::{DefaultVertex, Vertex};

// Re-export error type
pub use super::RandomPointGenerationError;

fn validate(dimension: usize, range: (f64, f64)) -> Result<(), RandomPointGenerationError> {
    if dimension == 0 {
        return Err(RandomPointGenerationError::InvalidDimension { dimension });
    }
    if !(range.0.is_finite() && range.1.is_finite()) || range.0 >= range.1 {
        return Err(RandomPointGenerationError::InvalidRange {
            min: range.0,
            max: range.1,
        });
    }
    Ok(())
}

fn sample_vertices<R: Rng>(
    rng: &mut R,
    n_points: usize,
    dimension: usize,
    range: (f64, f64),
) -> Vec<DefaultVertex> {
    (0..n_points)
        .map(|_| {
            let position = (0..dimension)
                .map(|_| rng.random_range(range.0..range.1))
                .collect();
            DefaultVertex::from_position(position)
        })
        .collect()
}

/// Generate random vertices uniformly in `[min, max)^dimension`.
///
/// # Errors
///
/// Returns an error if `dimension` is zero or the range is empty or not finite.
///
/// # Examples
///
/// ```
/// use lifted_delaunay::core::vertex::Vertex;
/// use lifted_delaunay::geometry::util::generate_random_vertices;
///
/// let vertices = generate_random_vertices(10, 2, (-1.0, 1.0)).unwrap();
/// assert_eq!(vertices.len(), 10);
/// assert!(vertices.iter().all(|v| v.dimensions() == 2));
/// ```
pub fn generate_random_vertices(
    n_points: usize,
    dimension: usize,
    range: (f64, f64),
) -> Result<Vec<DefaultVertex>, RandomPointGenerationError> {
    validate(dimension, range)?;
    let mut rng = rand::rng();
    Ok(sample_vertices(&mut rng, n_points, dimension, range))
}

/// Generate reproducible random vertices from a seed.
///
/// The same `(n_points, dimension, range, seed)` always yields the same
/// coordinates.
///
/// # Errors
///
/// Returns an error if `dimension` is zero or the range is empty or not finite.
///
/// # Examples
///
/// ```
/// use lifted_delaunay::core::vertex::Vertex;
/// use lifted_delaunay::geometry::util::generate_random_vertices_seeded;
///
/// let a = generate_random_vertices_seeded(5, 3, (0.0, 1.0), 42).unwrap();
/// let b = generate_random_vertices_seeded(5, 3, (0.0, 1.0), 42).unwrap();
/// assert!(a.iter().zip(&b).all(|(p, q)| p.position() == q.position()));
/// ```
pub fn generate_random_vertices_seeded(
    n_points: usize,
    dimension: usize,
    range: (f64, f64),
    seed: u64,
) -> Result<Vec<DefaultVertex>, RandomPointGenerationError> {
    validate(dimension, range)?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(sample_vertices(&mut rng, n_points, dimension, range))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_generation_respects_range() {
        let vertices = generate_random_vertices_seeded(100, 3, (-2.0, 5.0), 7).unwrap();
        assert_eq!(vertices.len(), 100);
        for v in &vertices {
            assert_eq!(v.dimensions(), 3);
            assert!(v.position().iter().all(|&c| (-2.0..5.0).contains(&c)));
        }
    }

    #[test]
    fn point_generation_rejects_bad_parameters() {
        assert_eq!(
            generate_random_vertices(3, 0, (0.0, 1.0)).unwrap_err(),
            RandomPointGenerationError::InvalidDimension { dimension: 0 }
        );
        assert!(matches!(
            generate_random_vertices_seeded(3, 2, (1.0, 1.0), 0),
            Err(RandomPointGenerationError::InvalidRange { .. })
        ));
        assert!(matches!(
            generate_random_vertices(3, 2, (0.0, f64::INFINITY)),
            Err(RandomPointGenerationError::InvalidRange { .. })
        ));
    }

    #[test]
    fn point_generation_seeds_differ() {
        let a = generate_random_vertices_seeded(4, 2, (0.0, 1.0), 1).unwrap();
        let b = generate_random_vertices_seeded(4, 2, (0.0, 1.0), 2).unwrap();
        assert!(a.iter().zip(&b).any(|(p, q)| p.position() != q.position()));
    }
}
