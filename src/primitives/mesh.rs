use super::Triangle;
use crate::error::{RenderError, Result};
use log::{info, trace};
use nalgebra::{Point3, Vector3};
use num_traits::identities::Zero;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Vertex positions, per-vertex normals and faces loaded from a
/// line-oriented `v`/`f` text file.
#[derive(Debug, Default)]
pub struct Mesh {
    pub positions: Vec<Point3<f64>>,
    pub normals: Vec<Vector3<f64>>,
    pub faces: Vec<[usize; 3]>,
}

impl Mesh {
    pub fn load(path: &Path) -> Result<Self> {
        let io_error = |source: std::io::Error| RenderError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;
        let mesh = Self::parse(BufReader::new(file)).map_err(|error| match error {
            RenderError::Io { source, .. } => io_error(source),
            error => error,
        })?;

        info!(
            "Loaded {} vertices and {} faces from {}",
            mesh.positions.len(),
            mesh.faces.len(),
            path.display()
        );

        Ok(mesh)
    }

    /// Parses mesh lines. Vertex normals are the normalized sum of the
    /// area-weighted normals of every face using the vertex.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut mesh = Mesh::default();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|source| RenderError::Io {
                path: Default::default(),
                source,
            })?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 4 {
                trace!("Skipping line {}: too few tokens", line_number);
                continue;
            }

            match tokens[0] {
                "v" => {
                    let mut position = Point3::origin();
                    for (axis, token) in tokens[1..4].iter().enumerate() {
                        position[axis] = parse_float(token, line_number)?;
                    }
                    mesh.positions.push(position);
                    mesh.normals.push(Vector3::zero());
                }
                "f" => {
                    let mut face = [0; 3];
                    for (corner, token) in tokens[1..4].iter().enumerate() {
                        face[corner] = mesh.parse_index(token, line_number)?;
                    }
                    mesh.add_face(face);
                }
                _ => trace!("Skipping line {}: unknown keyword", line_number),
            }
        }

        for normal in &mut mesh.normals {
            let length = normal.norm();
            if length > 0.0 {
                *normal /= length;
            }
        }

        Ok(mesh)
    }

    fn parse_index(&self, token: &str, line: usize) -> Result<usize> {
        let index_token = token.split('/').next().unwrap_or(token);
        let index: i64 = index_token.parse().map_err(|_| RenderError::Parse {
            line,
            token: token.to_string(),
        })?;

        if index < 1 || index as usize > self.positions.len() {
            return Err(RenderError::FaceIndex { line, index });
        }

        Ok(index as usize - 1)
    }

    fn add_face(&mut self, face: [usize; 3]) {
        let normal = Triangle::compute_normal(self.face_positions(face));
        for &vertex in &face {
            self.normals[vertex] += normal;
        }
        self.faces.push(face);
    }

    pub fn face_positions(&self, face: [usize; 3]) -> [Point3<f64>; 3] {
        [
            self.positions[face[0]],
            self.positions[face[1]],
            self.positions[face[2]],
        ]
    }

    pub fn face_normals(&self, face: [usize; 3]) -> [Vector3<f64>; 3] {
        [
            self.normals[face[0]],
            self.normals[face[1]],
            self.normals[face[2]],
        ]
    }
}

fn parse_float(token: &str, line: usize) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RenderError::Parse {
            line,
            token: token.to_string(),
        }),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn parse(source: &str) -> Result<Mesh> {
        Mesh::parse(source.as_bytes())
    }

    #[test]
    fn it_parses_vertices_and_faces() {
        let mesh = parse(
            "# a quad\n\
             v 0 0 0\n\
             v 1 0 0\n\
             v 1 0 1\n\
             v 0 0 1\n\
             f 1 2 3\n\
             f 1 3 4\n",
        )
        .unwrap();

        assert_eq!(mesh.positions.len(), 4);
        assert_eq!(mesh.positions[2], Point3::from([1.0, 0.0, 1.0]));
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn it_skips_short_and_unknown_lines() {
        let mesh = parse(
            "v 1 2\n\
             \n\
             vn 0 1 0\n\
             vt 0.5 0.5 0\n\
             o object\n\
             v 1.5 -2 3e2\n",
        )
        .unwrap();

        assert_eq!(mesh.positions, vec![Point3::from([1.5, -2.0, 300.0])]);
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn it_accepts_slash_separated_face_tokens() {
        let mesh = parse(
            "v 0 0 0\n\
             v 1 0 0\n\
             v 0 1 0\n\
             f 1/1/1 2//2 3/3\n",
        )
        .unwrap();

        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
    }

    #[test]
    fn it_computes_smooth_vertex_normals() {
        let mesh = parse(
            "v 0 0 0\n\
             v 1 0 0\n\
             v 0 1 0\n\
             v 0 0 1\n\
             f 1 2 3\n\
             f 1 4 2\n",
        )
        .unwrap();

        // face 1 faces +z, face 2 faces +y
        assert_relative_eq!(mesh.normals[2], Vector3::z());
        assert_relative_eq!(mesh.normals[3], Vector3::y());
        assert_relative_eq!(
            mesh.normals[0],
            Vector3::from([0.0, 1.0, 1.0]).normalize()
        );
        assert_relative_eq!(mesh.normals[1], mesh.normals[0]);
    }

    #[test]
    fn it_leaves_unused_vertex_normals_at_zero() {
        let mesh = parse("v 0 0 0\nv 1 1 1\n").unwrap();

        assert_eq!(mesh.normals, vec![Vector3::zero(); 2]);
    }

    #[test]
    fn it_fails_on_unparsable_numbers() {
        let error = parse("v 0 0 0\nv 1 zero 0\n").unwrap_err();
        assert!(matches!(error, RenderError::Parse { line: 2, ref token } if token == "zero"));

        let error = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 x\n").unwrap_err();
        assert!(matches!(error, RenderError::Parse { line: 4, .. }));
    }

    #[test]
    fn it_fails_on_non_finite_coordinates() {
        for token in &["nan", "inf", "-infinity"] {
            let error = parse(&format!("v 0 0 0\nv 1 1 {}\n", token)).unwrap_err();
            assert!(matches!(error, RenderError::Parse { line: 2, token: ref t } if t == token));
        }
    }

    #[test]
    fn it_fails_on_faces_referencing_undeclared_vertices() {
        let error = parse("v 0 0 0\nv 1 0 0\nf 1 2 3\nv 0 1 0\n").unwrap_err();
        assert!(matches!(error, RenderError::FaceIndex { line: 3, index: 3 }));

        let error = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        assert!(matches!(error, RenderError::FaceIndex { line: 4, index: 0 }));
    }

    #[test]
    fn it_fails_on_missing_files() {
        let error = Mesh::load(Path::new("does/not/exist.obj")).unwrap_err();
        assert!(matches!(error, RenderError::Io { .. }));
    }
}
