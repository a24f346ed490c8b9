//! Procedural meshes centered on the origin.

use std::f64::consts::PI;

use super::Mesh;
use crate::error::{Error, Result};
use crate::geometry::Point3;

fn check_size(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid(format!("{name} must be positive, got {value}")))
    }
}

/// Axis-aligned cube with edge length `side`: 8 vertices, 6 quads.
///
/// # Errors
///
/// [`Error::InvalidInput`] for a non-positive side.
pub fn cube(side: f64) -> Result<Mesh> {
    check_size("side", side)?;
    let hs = side / 2.0;
    let vertices = vec![
        Point3::new(-hs, -hs, -hs),
        Point3::new(hs, -hs, -hs),
        Point3::new(hs, hs, -hs),
        Point3::new(-hs, hs, -hs),
        Point3::new(-hs, -hs, hs),
        Point3::new(hs, -hs, hs),
        Point3::new(hs, hs, hs),
        Point3::new(-hs, hs, hs),
    ];
    let faces = vec![
        vec![0, 1, 2, 3],
        vec![4, 5, 6, 7],
        vec![0, 1, 5, 4],
        vec![1, 2, 6, 5],
        vec![2, 3, 7, 6],
        vec![3, 0, 4, 7],
    ];
    Mesh::new(vertices, faces)
}

/// Latitude/longitude sphere.
///
/// Produces `(lat_steps + 1) * lon_steps` vertices, row `i` at polar angle
/// `π·i/lat_steps`. The two polar rows are closed with triangles and the
/// rows between them with quads. Each pole row repeats its pole point once
/// per meridian.
///
/// # Errors
///
/// [`Error::InvalidInput`] for a non-positive radius, `lat_steps < 2` or
/// `lon_steps < 3`.
pub fn sphere(radius: f64, lat_steps: usize, lon_steps: usize) -> Result<Mesh> {
    check_size("radius", radius)?;
    if lat_steps < 2 || lon_steps < 3 {
        return Err(Error::invalid(format!(
            "sphere needs at least 2 latitude and 3 longitude steps, got {lat_steps}x{lon_steps}"
        )));
    }

    let mut vertices = Vec::with_capacity((lat_steps + 1) * lon_steps);
    for i in 0..=lat_steps {
        let (sin_theta, cos_theta) = (PI * i as f64 / lat_steps as f64).sin_cos();
        for j in 0..lon_steps {
            let (sin_phi, cos_phi) = (2.0 * PI * j as f64 / lon_steps as f64).sin_cos();
            vertices.push(Point3::new(
                radius * sin_theta * cos_phi,
                radius * sin_theta * sin_phi,
                radius * cos_theta,
            ));
        }
    }

    let mut faces = Vec::with_capacity(lat_steps * lon_steps);
    for i in 0..lat_steps {
        for j in 0..lon_steps {
            let next_j = (j + 1) % lon_steps;
            let current = i * lon_steps + j;
            let next = i * lon_steps + next_j;
            let below = (i + 1) * lon_steps + j;
            let below_next = (i + 1) * lon_steps + next_j;

            if i == 0 {
                faces.push(vec![current, below_next, below]);
            } else if i == lat_steps - 1 {
                faces.push(vec![current, next, below]);
            } else {
                faces.push(vec![current, next, below_next, below]);
            }
        }
    }

    Mesh::new(vertices, faces)
}

/// Cylinder along Z from `-height/2` to `height/2`.
///
/// Vertex 0 is the bottom center and vertex 1 the top center, followed by
/// the bottom ring and then the top ring. Faces are the bottom fan, the top
/// fan (reversed winding) and one quad per side segment.
///
/// # Errors
///
/// [`Error::InvalidInput`] for non-positive sizes or `segments < 3`.
pub fn cylinder(radius: f64, height: f64, segments: usize) -> Result<Mesh> {
    check_size("radius", radius)?;
    check_size("height", height)?;
    if segments < 3 {
        return Err(Error::invalid(format!(
            "cylinder needs at least 3 segments, got {segments}"
        )));
    }

    let half = height / 2.0;
    let mut vertices = Vec::with_capacity(2 + 2 * segments);
    vertices.push(Point3::new(0.0, 0.0, -half));
    vertices.push(Point3::new(0.0, 0.0, half));
    for z in [-half, half] {
        for i in 0..segments {
            let (sin, cos) = (2.0 * PI * i as f64 / segments as f64).sin_cos();
            vertices.push(Point3::new(radius * cos, radius * sin, z));
        }
    }

    let bottom = |i: usize| 2 + i % segments;
    let top = |i: usize| 2 + segments + i % segments;

    let mut faces = Vec::with_capacity(3 * segments);
    faces.extend((0..segments).map(|i| vec![0, bottom(i), bottom(i + 1)]));
    faces.extend((0..segments).map(|i| vec![1, top(i + 1), top(i)]));
    faces.extend((0..segments).map(|i| vec![bottom(i), bottom(i + 1), top(i + 1), top(i)]));

    Mesh::new(vertices, faces)
}
