//! Geometric predicates for d-dimensional geometry calculations.
//!
//! Classifies a point against the circumsphere of a simplex. The engines use
//! this to verify the empty-circumsphere property of a finished triangulation.

use crate::geometry::util::{CircumcenterError, Circumsphere, circumsphere, distance};

/// Default tolerance for boundary classification, relative to the radius.
pub const INSPHERE_TOLERANCE: f64 = 1e-10;

/// Rounding allowance per unit of coordinate magnitude when measuring the
/// distance from a far-off circumcenter.
const DISTANCE_ROUNDOFF: f64 = 64.0 * f64::EPSILON;

/// Represents the position of a point relative to a circumsphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InSphere {
    /// The point is outside the circumsphere
    OUTSIDE,
    /// The point is on the boundary of the circumsphere (within numerical tolerance)
    BOUNDARY,
    /// The point is inside the circumsphere
    INSIDE,
}

impl std::fmt::Display for InSphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OUTSIDE => write!(f, "OUTSIDE"),
            Self::BOUNDARY => write!(f, "BOUNDARY"),
            Self::INSIDE => write!(f, "INSIDE"),
        }
    }
}

/// Classify `point` against a known sphere.
///
/// Distances within `INSPHERE_TOLERANCE * radius` of the radius are reported
/// as [`InSphere::BOUNDARY`], widened by the rounding error of the distance
/// itself when the sphere sits far from the origin. The test is unchanged
/// when the sphere and point are scaled together. Extra or missing coordinates are
/// compared over the shared prefix.
///
/// # Example
///
/// ```
/// use lifted_delaunay::geometry::predicates::{InSphere, insphere_with_sphere};
///
/// let center = [0.0, 0.0];
/// assert_eq!(insphere_with_sphere(&center, 1.0, &[0.5, 0.0]), InSphere::INSIDE);
/// assert_eq!(insphere_with_sphere(&center, 1.0, &[0.0, 1.0]), InSphere::BOUNDARY);
/// assert_eq!(insphere_with_sphere(&center, 1.0, &[2.0, 0.0]), InSphere::OUTSIDE);
/// ```
#[must_use]
pub fn insphere_with_sphere(center: &[f64], radius: f64, point: &[f64]) -> InSphere {
    let d = distance(center, point);
    let magnitude = center.iter().fold(radius, |acc, c| acc.max(c.abs()));
    let tolerance = INSPHERE_TOLERANCE.mul_add(radius, DISTANCE_ROUNDOFF * magnitude);
    if (radius - d).abs() <= tolerance {
        InSphere::BOUNDARY
    } else if d < radius {
        InSphere::INSIDE
    } else {
        InSphere::OUTSIDE
    }
}

/// Check if a point is contained within the circumsphere of a simplex using
/// distances to the circumcenter.
///
/// # Errors
///
/// Returns an error if the circumsphere cannot be computed. See
/// [`circumsphere`] for details.
///
/// # Example
///
/// ```
/// use lifted_delaunay::geometry::predicates::{InSphere, insphere_distance};
///
/// let simplex = [
///     vec![0.0, 0.0, 0.0],
///     vec![1.0, 0.0, 0.0],
///     vec![0.0, 1.0, 0.0],
///     vec![0.0, 0.0, 1.0],
/// ];
/// assert_eq!(insphere_distance(&simplex, &[0.5, 0.5, 0.5]).unwrap(), InSphere::INSIDE);
/// ```
pub fn insphere_distance<P: AsRef<[f64]>>(
    simplex_points: &[P],
    test_point: &[f64],
) -> Result<InSphere, CircumcenterError> {
    let Circumsphere { center, radius } = circumsphere(simplex_points)?;
    Ok(insphere_with_sphere(&center, radius, test_point))
}
