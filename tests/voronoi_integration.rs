//! Integration tests for `VoronoiMesh`.

use approx::assert_relative_eq;
use lifted_delaunay::prelude::*;

fn unit_square() -> Vec<DefaultVertex> {
    vec![
        vertex!([0.0, 0.0]),
        vertex!([1.0, 0.0]),
        vertex!([1.0, 1.0]),
        vertex!([0.0, 1.0]),
    ]
}

#[test]
fn square_regions_contain_the_shared_circumcenter() {
    let mut mesh: VoronoiMesh<DefaultVertex> = VoronoiMesh::new(2);
    mesh.generate(&unit_square()).unwrap();

    let center = vertex!([0.5, 0.5]);
    assert_eq!(mesh.regions().len(), 4);
    for region in mesh.regions() {
        assert!(!region.circumcenters().is_empty());
        for c in region.circumcenters() {
            assert_relative_eq!(c.distance(&center).unwrap(), 0.0, epsilon = 1e-12);
        }
    }

    assert_eq!(mesh.edges().len(), 1);
    let edge = mesh.edges()[0];
    let (a, b) = mesh.edge_endpoints(edge).unwrap();
    assert_relative_eq!(a.distance(b).unwrap(), 0.0, epsilon = 1e-12);
}

#[test]
fn region_circumcenters_are_equidistant_from_their_generator() {
    let vertices = generate_random_vertices_seeded(60, 2, (-1.0, 1.0), 77).unwrap();
    let mut mesh: VoronoiMesh<DefaultVertex> = VoronoiMesh::new(2);
    mesh.generate(&vertices).unwrap();

    assert_eq!(mesh.regions().len(), vertices.len());
    for region in mesh.regions() {
        assert_eq!(region.generator().position(), vertices[region.generator_index()].position());
        for (&cell, center) in region.cells().iter().zip(region.circumcenters()) {
            let radius = mesh.cells()[cell].radius();
            let d = center.distance(region.generator()).unwrap();
            assert_relative_eq!(d, radius, epsilon = 1e-9, max_relative = 1e-9);
        }
    }
}

#[test]
fn voronoi_edges_join_cells_sharing_a_facet() {
    let vertices = generate_random_vertices_seeded(30, 3, (0.0, 1.0), 3).unwrap();
    let mut mesh: VoronoiMesh<DefaultVertex> = VoronoiMesh::new(3);
    mesh.generate(&vertices).unwrap();

    assert!(!mesh.edges().is_empty());
    for edge in mesh.edges() {
        assert!(edge.source < edge.target);
        let a = &mesh.cells()[edge.source];
        let b = &mesh.cells()[edge.target];
        let shared = a.vertices().iter().filter(|&&v| b.contains_vertex(v)).count();
        assert_eq!(shared, 3);
    }
}

#[test]
fn voronoi_with_options_keeps_caller_ids() {
    let mut vertices = unit_square();
    for (i, v) in vertices.iter_mut().enumerate() {
        v.set_id(100 + i);
    }
    let mut mesh: VoronoiMesh<DefaultVertex> = VoronoiMesh::new(2);
    mesh.generate_with_options(
        &vertices,
        GenerationOptions {
            assign_ids: false,
            check_input: true,
        },
    )
    .unwrap();

    for region in mesh.regions() {
        assert_eq!(region.generator().id(), 100 + region.generator_index());
    }
}
