//! Hull, triangulation, Voronoi and mesh properties checked across the
//! public API.
//!
//! Run: cargo test --test geometry_properties_test

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::collections::{BTreeSet, HashMap};

use approx::assert_relative_eq;
use proptest::prelude::*;
use rasterlab::geometry::{orient, EdgeKey};
use rasterlab::mesh::{cube, cylinder, read_mesh, sphere, write_mesh};
use rasterlab::prelude::*;

fn key(p: Point2) -> (i64, i64) {
    ((p.x * 1e6).round() as i64, (p.y * 1e6).round() as i64)
}

fn shared_edge_count(triangles: &[Triangle]) -> usize {
    let mut counts: HashMap<EdgeKey, usize> = HashMap::new();
    for t in triangles {
        for e in t.edges() {
            *counts.entry(e).or_default() += 1;
        }
    }
    counts.values().filter(|&&c| c == 2).count()
}

// ============================================================================
// Convex hulls
// ============================================================================

proptest! {
    #[test]
    fn graham_and_jarvis_find_the_same_hull(
        coords in prop::collection::btree_set((-100i32..100, -100i32..100), 3..40)
    ) {
        let points: Vec<Point2> = coords
            .iter()
            .map(|&(x, y)| Point2::new(f64::from(x), f64::from(y)))
            .collect();
        prop_assume!(points.iter().any(|&p| orient(points[0], points[1], p) != 0.0));

        let graham = graham_scan(&points, None).unwrap();
        let jarvis = jarvis_march(&points, None).unwrap();
        let g: BTreeSet<_> = graham.iter().copied().map(key).collect();
        let j: BTreeSet<_> = jarvis.iter().copied().map(key).collect();
        prop_assert_eq!(&g, &j);

        // every input point is left of or on every hull edge
        let n = graham.len();
        for p in &points {
            for i in 0..n {
                prop_assert!(orient(graham[i], graham[(i + 1) % n], *p) >= 0.0);
            }
        }
    }

    #[test]
    fn hulls_agree_on_nearly_collinear_vertices(
        x in 1.0f64..9.0,
        y in 1.0f64..9.0,
        offset in 1e-10f64..1e-6,
    ) {
        // one point just below the bottom edge, one just right of the right edge
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
            Point2::new(x, -offset),
            Point2::new(10.0 + offset, y),
            Point2::new(5.0, 5.0),
        ];
        let bits = |hull: &[Point2]| -> BTreeSet<(u64, u64)> {
            hull.iter().map(|p| (p.x.to_bits(), p.y.to_bits())).collect()
        };

        let graham = graham_scan(&points, None).unwrap();
        let jarvis = jarvis_march(&points, None).unwrap();
        prop_assert_eq!(graham.len(), 6);
        prop_assert_eq!(bits(&graham), bits(&jarvis));
    }
}

#[test]
fn hull_step_log_explains_graham_scan() {
    let points = [
        Point2::new(0.0, 0.0),
        Point2::new(6.0, 0.0),
        Point2::new(3.0, 1.0),
        Point2::new(6.0, 6.0),
        Point2::new(0.0, 6.0),
    ];
    let mut log = StepLog::new();
    let hull = graham_scan(&points, Some(&mut log)).unwrap();
    assert_eq!(hull.len(), 4);
    assert!(log.entries().iter().any(|e| e.starts_with("drop (3.00, 1.00)")));
}

// ============================================================================
// Polygons
// ============================================================================

#[test]
fn convexity_of_square_and_arrow() {
    let square = Polygon::from_vertices(vec![
        Point2::new(0.0, 0.0),
        Point2::new(10.0, 0.0),
        Point2::new(10.0, 10.0),
        Point2::new(0.0, 10.0),
    ])
    .unwrap();
    assert_eq!(square.check_convexity(None).unwrap(), Convexity::Convex);
    assert!(square.contains(Point2::new(5.0, 5.0)).unwrap());
    assert!(!square.contains(Point2::new(15.0, 5.0)).unwrap());

    let arrow = Polygon::from_vertices(vec![
        Point2::new(0.0, 0.0),
        Point2::new(10.0, 5.0),
        Point2::new(0.0, 10.0),
        Point2::new(4.0, 5.0),
    ])
    .unwrap();
    assert!(!arrow.check_convexity(None).unwrap().is_convex());
}

#[test]
fn open_polygon_refuses_queries() {
    let mut polygon = Polygon::new();
    polygon.add_vertex(Point2::new(0.0, 0.0)).unwrap();
    polygon.add_vertex(Point2::new(4.0, 0.0)).unwrap();
    assert!(polygon.close().is_err());
    assert!(polygon.contains(Point2::new(1.0, 1.0)).is_err());

    polygon.add_vertex(Point2::new(0.0, 4.0)).unwrap();
    polygon.close().unwrap();
    assert!(polygon.add_vertex(Point2::new(9.0, 9.0)).is_err());
    assert_eq!(polygon.normals().len(), 3);
}

// ============================================================================
// Delaunay and Voronoi
// ============================================================================

#[test]
fn unit_square_has_two_triangles_with_empty_circumcircles() {
    let square = [
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 1.0),
        Point2::new(0.0, 1.0),
    ];
    let triangles = triangulate(&square).unwrap();
    assert_eq!(triangles.len(), 2);
    for t in &triangles {
        for p in square.iter().filter(|p| !t.has_vertex(**p)) {
            // cocircular: the fourth corner sits on the circle, never inside
            let d = t.circumcenter().distance_sq(*p);
            assert!(d >= t.radius_sq() - 1e-9);
        }
    }
}

#[test]
fn square_with_center_fans_around_the_center() {
    let center = Point2::new(5.0, 5.0);
    let points = [
        Point2::new(0.0, 0.0),
        Point2::new(10.0, 0.0),
        Point2::new(10.0, 10.0),
        Point2::new(0.0, 10.0),
        center,
    ];
    let triangles = triangulate(&points).unwrap();
    assert_eq!(triangles.len(), 4);
    assert!(triangles.iter().all(|t| t.has_vertex(center)));
    for t in &triangles {
        assert_relative_eq!(t.radius_sq(), 25.0, epsilon = 1e-9);
    }

    let bbox = BoundingBox::new(-5.0, -5.0, 15.0, 15.0);
    let edges = voronoi_edges(&triangles, bbox);
    let interior: Vec<_> = edges
        .iter()
        .filter(|e| e.kind == VoronoiEdgeKind::Interior)
        .collect();
    assert_eq!(interior.len(), shared_edge_count(&triangles));
    assert!(edges.iter().any(|e| e.kind == VoronoiEdgeKind::Boundary
        && e.start == Point2::new(5.0, 0.0)
        && e.end == Point2::new(5.0, -5.0)));
}

proptest! {
    #[test]
    fn delaunay_circumcircles_are_empty(
        coords in prop::collection::vec((0.0f64..60.0, 0.0f64..60.0), 4..25)
    ) {
        let points: Vec<Point2> = coords.into_iter().map(Point2::from).collect();
        let triangles = triangulate(&points).unwrap();
        for t in triangles.iter().filter(|t| !t.is_degenerate()) {
            for &p in points.iter().filter(|&&p| !t.has_vertex(p)) {
                let d = t.circumcenter().distance_sq(p);
                prop_assert!(d >= t.radius_sq() * (1.0 - 1e-9) - 1e-9);
            }
        }

        let bbox = BoundingBox::new(-20.0, -20.0, 80.0, 80.0);
        let edges = voronoi_edges(&triangles, bbox);
        let live: Vec<Triangle> = triangles.iter().copied().filter(|t| !t.is_degenerate()).collect();
        let interior = edges.iter().filter(|e| e.kind == VoronoiEdgeKind::Interior).count();
        prop_assert_eq!(interior, shared_edge_count(&live));
    }
}

// ============================================================================
// Meshes
// ============================================================================

#[test]
fn primitive_meshes_survive_a_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    for (name, mesh) in [
        ("cube", cube(2.0).unwrap()),
        ("sphere", sphere(1.0, 6, 8).unwrap()),
        ("cylinder", cylinder(1.0, 3.0, 12).unwrap()),
    ] {
        let path = dir.path().join(format!("{name}.mesh"));
        write_mesh(&mesh, &path).unwrap();
        let back = read_mesh(&path).unwrap();
        assert_eq!(back.faces(), mesh.faces(), "{name}");
        assert_eq!(back.vertices().len(), mesh.vertices().len(), "{name}");
        for (a, b) in back.vertices().iter().zip(mesh.vertices()) {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
            assert_relative_eq!(a.z, b.z, epsilon = 1e-9);
        }
    }
}

#[test]
fn missing_mesh_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.mesh");
    let err = read_mesh(&path).unwrap_err();
    assert!(matches!(err, Error::MeshFile { .. }));
    assert!(err.to_string().contains("absent.mesh"));
}

#[test]
fn wireframe_cube_lands_on_framebuffer() {
    let mesh = cube(100.0).unwrap();
    let mut scene = SceneTransform::new();
    scene.rotate(30.0, 45.0, 0.0);

    let mut fb = Framebuffer::new(200, 200).unwrap();
    fb.clear(Rgba::WHITE);
    rasterlab::render::draw_wireframe(
        &mesh,
        &scene.matrix(),
        Projection::Orthographic,
        Point2::new(100.0, 100.0),
        LineAlgorithm::Bresenham,
        &mut fb.pen(Rgba::BLACK),
    );
    assert!(fb.count(Rgba::BLACK) > 100);
    assert_eq!(fb.get_pixel(0, 0), Some(Rgba::WHITE));
}
