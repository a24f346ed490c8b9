//! Polygonal meshes: vertex list plus faces of vertex indices.

mod io;
mod primitives;

pub use io::{parse_mesh, read_mesh, write_mesh};
pub use primitives::{cube, cylinder, sphere};

use crate::error::{Error, Result};
use crate::geometry::Point3;
use crate::transform::Matrix4;

/// A polygonal mesh.
///
/// Faces are ordered index lists (not necessarily triangles). Every index is
/// in bounds and every face has at least three entries; the constructor
/// rejects anything else. Transforming a mesh produces a new one, so repeated
/// transforms can always start from the same base geometry.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMesh"))]
pub struct Mesh {
    vertices: Vec<Point3>,
    faces: Vec<Vec<usize>>,
}

/// Unvalidated mesh fields; deserialized meshes pass through [`Mesh::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMesh {
    vertices: Vec<Point3>,
    faces: Vec<Vec<usize>>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMesh> for Mesh {
    type Error = Error;

    fn try_from(raw: RawMesh) -> Result<Self> {
        Self::new(raw.vertices, raw.faces)
    }
}

impl Mesh {
    /// Build a mesh after validating its faces.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for a face with fewer than three indices or an
    /// index past the end of `vertices`.
    pub fn new(vertices: Vec<Point3>, faces: Vec<Vec<usize>>) -> Result<Self> {
        for (i, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(Error::invalid(format!(
                    "face {i} has {} indices, at least 3 required",
                    face.len()
                )));
            }
            if let Some(&bad) = face.iter().find(|&&idx| idx >= vertices.len()) {
                return Err(Error::invalid(format!(
                    "face {i} references vertex {bad}, mesh has {}",
                    vertices.len()
                )));
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Vertex coordinates.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Faces as vertex index lists.
    #[must_use]
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Vertex positions of one face, in order.
    pub fn face_points(&self, face: usize) -> impl Iterator<Item = Point3> + '_ {
        self.faces
            .get(face)
            .into_iter()
            .flatten()
            .map(|&idx| self.vertices[idx])
    }

    /// A copy with every vertex transformed by `m`. Faces are shared as-is.
    #[must_use]
    pub fn transformed(&self, m: &Matrix4) -> Self {
        Self {
            vertices: self.vertices.iter().map(|&v| m.transform_point(v)).collect(),
            faces: self.faces.clone(),
        }
    }
}
