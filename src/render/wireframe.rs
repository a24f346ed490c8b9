//! Mesh outlines through the line rasterizer.

use crate::geometry::Point2;
use crate::mesh::Mesh;
use crate::render::{rasterize_line, LineAlgorithm, PixelSink};
use crate::transform::{Matrix4, Projection};

/// Transform `mesh` by `matrix`, project it around `screen_center`, and draw
/// every face as a closed polyline.
///
/// Edges shared by two faces are drawn twice. The mesh itself is not
/// modified.
pub fn draw_wireframe(
    mesh: &Mesh,
    matrix: &Matrix4,
    projection: Projection,
    screen_center: Point2,
    algorithm: LineAlgorithm,
    sink: &mut (impl PixelSink + ?Sized),
) {
    let projected: Vec<Point2> = mesh
        .vertices()
        .iter()
        .map(|&v| projection.project(matrix.transform_point(v), screen_center))
        .collect();

    for face in mesh.faces() {
        let closing = face.iter().skip(1).chain(face.first());
        for (&a, &b) in face.iter().zip(closing) {
            rasterize_line(projected[a], projected[b], algorithm, &mut *sink, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Pixel, Point3};
    use crate::mesh::cube;
    use std::collections::HashSet;

    #[test]
    fn test_front_cube_outline() {
        let mesh = cube(100.0).unwrap();
        let mut pixels: Vec<Pixel> = Vec::new();
        draw_wireframe(
            &mesh,
            &Matrix4::identity(),
            Projection::Orthographic,
            Point2::new(200.0, 200.0),
            LineAlgorithm::Bresenham,
            &mut pixels,
        );

        // front and back faces coincide orthographically: a 100x100 square
        let set: HashSet<(i32, i32)> = pixels.iter().map(Pixel::position).collect();
        assert!(set.contains(&(150, 150)));
        assert!(set.contains(&(250, 250)));
        assert!(set.contains(&(200, 150)));
        assert!(!set.contains(&(200, 200)));
        assert!(set.iter().all(|&(x, y)| (150..=250).contains(&x) && (150..=250).contains(&y)));
    }

    #[test]
    fn test_perspective_shrinks_far_face() {
        let mesh = Mesh::new(
            vec![
                Point3::new(-100.0, -100.0, 500.0),
                Point3::new(100.0, -100.0, 500.0),
                Point3::new(100.0, 100.0, 500.0),
                Point3::new(-100.0, 100.0, 500.0),
            ],
            vec![vec![0, 1, 2, 3]],
        )
        .unwrap();
        let mut pixels: Vec<Pixel> = Vec::new();
        draw_wireframe(
            &mesh,
            &Matrix4::identity(),
            Projection::default(),
            Point2::ORIGIN,
            LineAlgorithm::Dda,
            &mut pixels,
        );

        assert!(pixels.iter().all(|px| px.x.abs() <= 50 && px.y.abs() <= 50));
        assert!(pixels.iter().any(|px| px.position() == (50, 50)));
    }
}
