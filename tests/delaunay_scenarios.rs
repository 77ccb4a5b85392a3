//! Deterministic end-to-end scenarios for `DelaunayTriangulation`.
//!
//! Covers the small hand-checkable configurations (square, equilateral
//! triangle, collinear input), engine reuse after errors, and the guarantee
//! that generation never writes to the caller's vertices.

use approx::assert_relative_eq;
use lifted_delaunay::core::util::validate_delaunay;
use lifted_delaunay::prelude::*;

fn unit_square() -> Vec<DefaultVertex> {
    vec![
        vertex!([0.0, 0.0]),
        vertex!([1.0, 0.0]),
        vertex!([1.0, 1.0]),
        vertex!([0.0, 1.0]),
    ]
}

fn sorted_cells<V: Vertex>(dt: &DelaunayTriangulation<V>) -> Vec<Vec<usize>> {
    let mut cells: Vec<Vec<usize>> = dt
        .cells()
        .iter()
        .map(|c| {
            let mut v = c.vertices().to_vec();
            v.sort_unstable();
            v
        })
        .collect();
    cells.sort();
    cells
}

// =============================================================================
// KNOWN CONFIGURATIONS
// =============================================================================

#[test]
fn unit_square_splits_along_a_diagonal() {
    let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(2);
    dt.generate(&unit_square()).unwrap();

    assert_eq!(dt.number_of_cells(), 2);
    let cells = sorted_cells(&dt);
    let diagonal_02 = vec![vec![0, 1, 2], vec![0, 2, 3]];
    let diagonal_13 = vec![vec![0, 1, 3], vec![1, 2, 3]];
    assert!(
        cells == diagonal_02 || cells == diagonal_13,
        "unexpected cells {cells:?}"
    );

    for cell in dt.cells() {
        assert_relative_eq!(cell.radius(), 2.0_f64.sqrt() / 2.0, epsilon = 1e-12);
        assert_relative_eq!(
            cell.circumcenter().position(),
            [0.5, 0.5].as_slice(),
            epsilon = 1e-12
        );
    }
    assert_eq!(validate_delaunay(&dt), Ok(()));
}

#[test]
fn equilateral_triangle_circumcenter_is_centroid() {
    let h = 3.0_f64.sqrt() / 2.0;
    let triangle = vec![vertex!([0.0, 0.0]), vertex!([1.0, 0.0]), vertex!([0.5, h])];
    let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(2);
    dt.generate(&triangle).unwrap();

    assert_eq!(dt.number_of_cells(), 1);
    let cell = &dt.cells()[0];
    assert_relative_eq!(cell.radius(), 0.577_350_269_189_625_8, epsilon = 1e-12);
    let centroid = dt.centroid().unwrap();
    assert_relative_eq!(
        cell.circumcenter().position(),
        centroid.position(),
        epsilon = 1e-12
    );
}

#[test]
fn regular_hexagon_with_center() {
    let mut vertices: Vec<DefaultVertex> = (0..6)
        .map(|k| {
            let angle = f64::from(k) * std::f64::consts::FRAC_PI_3;
            DefaultVertex::from([angle.cos(), angle.sin()])
        })
        .collect();
    vertices.push(vertex!([0.0, 0.0]));

    let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(2);
    dt.generate(&vertices).unwrap();

    // Six equilateral triangles around the center.
    assert_eq!(dt.number_of_cells(), 6);
    for cell in dt.cells() {
        assert!(cell.contains_vertex(6));
        assert_relative_eq!(cell.radius(), 1.0 / 3.0_f64.sqrt(), epsilon = 1e-9);
    }
    assert_eq!(validate_delaunay(&dt), Ok(()));
}

#[test]
fn one_dimensional_points_form_intervals() {
    let points = DefaultVertex::from_positions([[3.0], [0.0], [4.0], [1.0]]);
    let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(1);
    dt.generate(&points).unwrap();

    assert_eq!(
        sorted_cells(&dt),
        vec![vec![0, 2], vec![0, 3], vec![1, 3]]
    );
    for cell in dt.cells() {
        let a = dt.points()[cell.vertices()[0]].position()[0];
        let b = dt.points()[cell.vertices()[1]].position()[0];
        assert_relative_eq!(cell.circumcenter().position()[0], f64::midpoint(a, b), epsilon = 1e-12);
        assert_relative_eq!(cell.radius(), (a - b).abs() / 2.0, epsilon = 1e-12);
    }
}

#[test]
fn four_dimensional_cross_polytope() {
    let mut vertices = Vec::new();
    for axis in 0..4 {
        for sign in [-1.0, 1.0] {
            let mut p = vec![0.0; 4];
            p[axis] = sign;
            vertices.push(DefaultVertex::from_position(p));
        }
    }
    // Break the co-sphericity of the cross-polytope.
    vertices.push(vertex!([0.1, 0.05, -0.02, 0.03]));

    let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(4);
    dt.generate(&vertices).unwrap();

    // The interior point is in every cell (it sees all 16 boundary facets).
    assert_eq!(dt.number_of_cells(), 16);
    assert!(dt.cells().iter().all(|c| c.contains_vertex(8)));
    assert_eq!(validate_delaunay(&dt), Ok(()));
}

// =============================================================================
// ENGINE LIFECYCLE
// =============================================================================

#[test]
fn generate_twice_gives_the_same_triangulation() {
    let vertices = generate_random_vertices_seeded(40, 2, (-3.0, 3.0), 2024).unwrap();
    let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(2);

    dt.generate(&vertices).unwrap();
    let first = sorted_cells(&dt);
    dt.generate(&vertices).unwrap();
    let second = sorted_cells(&dt);

    // No incremental mode: the second call replaces, it does not append.
    assert_eq!(first, second);
}

#[test]
fn generate_does_not_touch_caller_vertices() {
    let mut vertices = generate_random_vertices_seeded(25, 3, (0.0, 1.0), 8).unwrap();
    for (i, v) in vertices.iter_mut().enumerate() {
        v.set_tag(i64::try_from(i).unwrap() * 10);
    }
    let snapshot = vertices.clone();

    let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(3);
    dt.generate(&vertices).unwrap();

    assert_eq!(vertices, snapshot);
    assert!(vertices.iter().all(|v| v.dimensions() == 3 && v.id() == 0));
    // Copies keep tags and receive ids.
    for (i, p) in dt.points().iter().enumerate() {
        assert_eq!(p.id(), i);
        assert_eq!(p.tag(), vertices[i].tag());
    }
}

#[test]
fn engine_recovers_after_errors() {
    let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(2);

    let collinear = vec![vertex!([0.0, 0.0]), vertex!([1.0, 0.0]), vertex!([2.0, 0.0])];
    assert!(matches!(
        dt.generate(&collinear),
        Err(TriangulationError::DegenerateSimplex { .. })
    ));
    assert!(dt.is_empty());
    assert!(dt.centroid().is_none());

    let mixed = vec![vertex!([0.0, 0.0]), vertex!([1.0, 0.0, 0.0])];
    assert!(matches!(
        dt.generate(&mixed),
        Err(TriangulationError::DimensionMismatch { index: 1, .. })
    ));

    dt.generate(&unit_square()).unwrap();
    assert_eq!(dt.number_of_cells(), 2);

    dt.clear();
    assert!(dt.is_empty());
    assert!(dt.points().is_empty());
    assert_eq!(dt.dimensions(), 2);
}

#[test]
fn custom_hull_tolerance_is_used() {
    let hull = ConvexHull::with_tolerance(1e-6);
    let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::with_hull(2, hull);
    dt.generate(&unit_square()).unwrap();
    assert_eq!(dt.number_of_cells(), 2);
    assert_relative_eq!(dt.hull().tolerance(), 1e-6);
    // Lifted hull: 2 lower facets and 4 facets through the apex.
    assert_eq!(dt.hull().simplices().len(), 6);
}

// =============================================================================
// CUSTOM VERTEX TYPES
// =============================================================================

/// A caller-defined vertex carrying a label alongside the coordinates.
#[derive(Clone, Debug)]
struct Station {
    coords: Vec<f64>,
    id: usize,
    tag: i64,
    label: &'static str,
}

impl Vertex for Station {
    fn from_position(position: Vec<f64>) -> Self {
        Self {
            coords: position,
            id: 0,
            tag: 0,
            label: "",
        }
    }

    fn position(&self) -> &[f64] {
        &self.coords
    }

    fn position_mut(&mut self) -> &mut Vec<f64> {
        &mut self.coords
    }

    fn id(&self) -> usize {
        self.id
    }

    fn set_id(&mut self, id: usize) {
        self.id = id;
    }

    fn tag(&self) -> i64 {
        self.tag
    }

    fn set_tag(&mut self, tag: i64) {
        self.tag = tag;
    }
}

#[test]
fn custom_vertex_type_is_triangulated() {
    let stations: Vec<Station> = [("a", [0.0, 0.0]), ("b", [4.0, 0.0]), ("c", [0.0, 3.0]), ("d", [4.0, 3.5])]
        .into_iter()
        .map(|(label, p)| Station {
            coords: p.to_vec(),
            id: 0,
            tag: 0,
            label,
        })
        .collect();

    let mut mesh: VoronoiMesh<Station> = VoronoiMesh::new(2);
    mesh.generate(&stations).unwrap();

    assert_eq!(mesh.cells().len(), 2);
    assert_eq!(mesh.regions().len(), 4);
    assert_eq!(mesh.region_for(3).unwrap().generator().label, "d");
    // Circumcenters are materialized through `from_position`.
    assert!(mesh.cells().iter().all(|c| c.circumcenter().label.is_empty()));
}
