//! Plain-text mesh format.
//!
//! ```text
//! # comments and blank lines are ignored
//! 4            vertex count N
//! 0 0 0        N lines of `x y z`
//! 1 0 0
//! 0 1 0
//! 0 0 1
//! 2            face count M
//! 0 1 2        M lines of at least three 0-based vertex indices
//! 0 1 3
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use super::Mesh;
use crate::error::{Error, Result};
use crate::geometry::Point3;
use crate::log::{debug, warn};

/// Content lines with their 1-based source line numbers.
struct ContentLines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
    last_line: usize,
}

impl<'a> ContentLines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate(),
            last_line: 0,
        }
    }

    /// Next non-comment line, or an error naming what was expected.
    fn require(&mut self, what: impl FnOnce() -> String) -> Result<(usize, &'a str)> {
        self.next().ok_or_else(|| {
            Error::malformed(
                self.last_line + 1,
                format!("unexpected end of input, expected {}", what()),
            )
        })
    }
}

impl<'a> Iterator for ContentLines<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, raw) in self.inner.by_ref() {
            self.last_line = idx + 1;
            let line = raw.trim();
            if !line.is_empty() && !line.starts_with('#') {
                return Some((idx + 1, line));
            }
        }
        None
    }
}

fn parse_count(line: usize, text: &str, what: &str) -> Result<usize> {
    text.parse()
        .map_err(|_| Error::malformed(line, format!("expected {what} count, found '{text}'")))
}

fn parse_vertex(line: usize, text: &str) -> Result<Point3> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(Error::malformed(
            line,
            format!("expected 3 vertex coordinates, found {}", fields.len()),
        ));
    }
    let mut coords = [0.0; 3];
    for (slot, field) in coords.iter_mut().zip(&fields) {
        *slot = field
            .parse()
            .map_err(|_| Error::malformed(line, format!("invalid coordinate '{field}'")))?;
    }
    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

fn parse_face(line: usize, text: &str, vertex_count: usize) -> Result<Vec<usize>> {
    let face = text
        .split_whitespace()
        .map(|field| {
            let idx: usize = field
                .parse()
                .map_err(|_| Error::malformed(line, format!("invalid vertex index '{field}'")))?;
            if idx >= vertex_count {
                return Err(Error::malformed(
                    line,
                    format!("vertex index {idx} out of range (mesh has {vertex_count} vertices)"),
                ));
            }
            Ok(idx)
        })
        .collect::<Result<Vec<usize>>>()?;

    if face.len() < 3 {
        return Err(Error::malformed(
            line,
            format!("face needs at least 3 indices, found {}", face.len()),
        ));
    }
    Ok(face)
}

/// Parse mesh text.
///
/// # Errors
///
/// [`Error::MalformedMesh`] with the 1-based line of the first problem:
/// bad counts, non-numeric fields, too few lines, out-of-range indices, or
/// content after the last face.
pub fn parse_mesh(text: &str) -> Result<Mesh> {
    let mut lines = ContentLines::new(text);

    let (line, count) = lines.require(|| "vertex count".to_string())?;
    let vertex_count = parse_count(line, count, "vertex")?;
    // counts come from the file; storage grows only as lines are read
    let mut vertices = Vec::new();
    for i in 0..vertex_count {
        let (line, text) = lines.require(|| format!("vertex {} of {vertex_count}", i + 1))?;
        vertices.push(parse_vertex(line, text)?);
    }

    let (line, count) = lines.require(|| "face count".to_string())?;
    let face_count = parse_count(line, count, "face")?;
    let mut faces = Vec::new();
    for i in 0..face_count {
        let (line, text) = lines.require(|| format!("face {} of {face_count}", i + 1))?;
        faces.push(parse_face(line, text, vertex_count)?);
    }

    if let Some((line, _)) = lines.next() {
        return Err(Error::malformed(line, "unexpected data after the last face"));
    }

    Mesh::new(vertices, faces)
}

/// Load a mesh file.
///
/// # Errors
///
/// [`Error::MeshFile`] wrapping the I/O or format error, with the path.
pub fn read_mesh(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let loaded = fs::read_to_string(path)
        .map_err(Error::from)
        .and_then(|text| parse_mesh(&text));

    match loaded {
        Ok(mesh) => {
            debug!(
                path = %path.display(),
                vertices = mesh.vertices().len(),
                faces = mesh.faces().len(),
                "loaded mesh"
            );
            Ok(mesh)
        }
        Err(source) => {
            warn!(path = %path.display(), error = %source, "mesh load failed");
            Err(Error::MeshFile {
                path: path.to_path_buf(),
                source: Box::new(source),
            })
        }
    }
}

/// Write a mesh in the text format.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_mesh(mesh: &Mesh, path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, mesh.to_text())?;
    Ok(())
}

impl Mesh {
    /// Serialize to the text format. Coordinates use the shortest
    /// representation that parses back to the same value.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.vertices().len())?;
        for v in self.vertices() {
            writeln!(f, "{} {} {}", v.x, v.y, v.z)?;
        }
        writeln!(f, "{}", self.faces().len())?;
        for face in self.faces() {
            for (i, idx) in face.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{idx}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
