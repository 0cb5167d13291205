//! Triangle meshes: the immutable input to every frame.
use crate::common::*;
use crate::error::{Error, Result};
use std::path::Path;
use tracing::{debug, info};
use wavefront_obj::obj::{self, Primitive};

/// A single model-space triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub corners: [Point3<f64>; 3],
}

impl Triangle {
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Triangle { corners: [a, b, c] }
    }
}

/// An ordered list of triangles, fully loaded before the first frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl From<Vec<Triangle>> for Mesh {
    fn from(triangles: Vec<Triangle>) -> Self {
        Mesh { triangles }
    }
}

impl Mesh {
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Load a Wavefront OBJ file.
    pub fn load_obj(path: &Path) -> Result<Mesh> {
        let contents = std::fs::read_to_string(path)?;
        let mesh = Mesh::from_obj_str(&contents)?;
        info!(path = %path.display(), triangles = mesh.len(), "loaded mesh");
        Ok(mesh)
    }

    /// Parse OBJ source.
    ///
    /// Polygons are fan-triangulated by the parser; points and lines carry
    /// no surface and are dropped.  An OBJ with no triangles at all is an
    /// error.
    pub fn from_obj_str(src: &str) -> Result<Mesh> {
        let set = obj::parse(src).map_err(|e| Error::Obj {
            line: e.line_number,
            message: e.message,
        })?;

        let mut triangles = vec![];
        let mut skipped = 0usize;
        for object in &set.objects {
            let corner = |index: usize| {
                object
                    .vertices
                    .get(index)
                    .map(|v| Point3::new(v.x, v.y, v.z))
                    .ok_or(Error::MissingVertex(index))
            };
            for shape in object.geometry.iter().flat_map(|g| &g.shapes) {
                match &shape.primitive {
                    Primitive::Triangle(a, b, c) => {
                        triangles.push(Triangle::new(corner(a.0)?, corner(b.0)?, corner(c.0)?));
                    }
                    Primitive::Point(_) | Primitive::Line(..) => skipped += 1,
                }
            }
        }

        if skipped > 0 {
            debug!(skipped, "ignored point and line primitives");
        }
        if triangles.is_empty() {
            return Err(Error::EmptyMesh);
        }
        Ok(Mesh { triangles })
    }

    /// A height-field grid of `cells` x `cells` quads, two triangles each,
    /// centred on the origin in the XZ plane.
    pub fn terrain(cells: usize, spacing: f64, height: impl Fn(f64, f64) -> f64) -> Mesh {
        let half = cells as f64 * spacing / 2.0;
        let point = |i: usize, j: usize| {
            let x = i as f64 * spacing - half;
            let z = j as f64 * spacing - half;
            Point3::new(x, height(x, z), z)
        };

        let mut triangles = Vec::with_capacity(cells * cells * 2);
        for i in 0..cells {
            for j in 0..cells {
                let (a, b) = (point(i, j), point(i + 1, j));
                let (c, d) = (point(i + 1, j + 1), point(i, j + 1));
                triangles.push(Triangle::new(a, b, c));
                triangles.push(Triangle::new(a, c, d));
            }
        }
        Mesh { triangles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TRIANGLES: &str = "\
# two triangles
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3
f 1 3 4
";

    #[test]
    fn parses_triangles() {
        let mesh = Mesh::from_obj_str(TRIANGLES).unwrap();
        assert_eq!(mesh.len(), 2);
        assert_eq!(mesh.triangles()[1].corners[2], Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn quad_face_is_split_into_two_triangles() {
        let src = "v 0 0 -5\nv 1 0 -5\nv 1 1 -5\nv 0 1 -5\nf 1 2 3 4\n";
        let mesh = Mesh::from_obj_str(src).unwrap();
        assert_eq!(mesh.len(), 2);
        let corners: Vec<_> = mesh.triangles().iter().flat_map(|t| t.corners).collect();
        for v in [
            Point3::new(0.0, 0.0, -5.0),
            Point3::new(1.0, 0.0, -5.0),
            Point3::new(1.0, 1.0, -5.0),
            Point3::new(0.0, 1.0, -5.0),
        ] {
            assert!(corners.contains(&v));
        }
    }

    #[test]
    fn lines_alone_are_not_a_mesh() {
        let src = "v 0 0 0\nv 1 0 0\nl 1 2\n";
        assert!(matches!(Mesh::from_obj_str(src), Err(Error::EmptyMesh)));
    }

    #[test]
    fn malformed_vertex_is_a_parse_error() {
        let src = "v 0 0 zero\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        assert!(matches!(Mesh::from_obj_str(src), Err(Error::Obj { .. })));
    }

    #[test]
    fn no_triangles_is_an_error() {
        assert!(matches!(
            Mesh::from_obj_str("v 0 0 0\n"),
            Err(Error::EmptyMesh)
        ));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TRIANGLES.as_bytes()).unwrap();
        let mesh = Mesh::load_obj(file.path()).unwrap();
        assert_eq!(mesh.len(), 2);
    }

    #[test]
    fn terrain_has_two_triangles_per_cell() {
        let mesh = Mesh::terrain(4, 1.0, |x, z| x + z);
        assert_eq!(mesh.len(), 32);
        let first = mesh.triangles()[0].corners[0];
        assert_eq!(first, Point3::new(-2.0, -4.0, -2.0));
    }
}
