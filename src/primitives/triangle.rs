use crate::core::try_normalize;
use crate::error::{RenderError, Result};
use crate::ray_intersection::{Intersectable, Ray};
use nalgebra::{Point3, Unit, Vector3};

/// Axis along which edges are measured for normal interpolation.
const REFERENCE_AXIS: usize = 0;
/// Axis used to blend between the two edge-projected normals.
const SECONDARY_AXIS: usize = 1;
/// Interpolation denominators smaller than this are treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// Cyclic (start, end, remaining) vertex orderings for the three edges.
const EDGE_ORDERINGS: [(usize, usize, usize); 3] = [(0, 1, 2), (1, 2, 0), (2, 0, 1)];

/// An intersection-ready mesh face.
///
/// `e0` is the edge with the greatest extent along the reference axis and
/// `e1` the second greatest; `v0` is the vertex they share.
/// Normals are stored relative to `n0` so they can be interpolated along
/// both edges.
#[derive(Clone, Debug)]
pub struct Triangle {
    v0: Point3<f64>,
    e0: Vector3<f64>,
    e1: Vector3<f64>,
    n0: Vector3<f64>,
    nd0: Vector3<f64>,
    nd1: Vector3<f64>,
    face_normal: Unit<Vector3<f64>>,
}

impl Triangle {
    pub fn new(positions: [Point3<f64>; 3], normals: [Vector3<f64>; 3]) -> Result<Self> {
        let face_normal = try_normalize(&Triangle::compute_normal(positions))
            .map_err(|_| RenderError::DegenerateTriangle)?;

        let extent = |(start, end, _): (usize, usize, usize)| {
            (positions[end][REFERENCE_AXIS] - positions[start][REFERENCE_AXIS]).abs()
        };
        let mut ordering = EDGE_ORDERINGS[0];
        for &candidate in &EDGE_ORDERINGS[1..] {
            if extent(candidate) > extent(ordering) {
                ordering = candidate;
            }
        }
        let (start, end, remaining) = ordering;
        // anchor v0 where the widest edge meets the second widest one
        let (start, end) = if extent((end, remaining, start)) > extent((remaining, start, end)) {
            (end, start)
        } else {
            (start, end)
        };

        let vertex_normal_sum = normals[0] + normals[1] + normals[2];
        let face_normal = if face_normal.dot(&vertex_normal_sum) < 0.0 {
            -face_normal
        } else {
            face_normal
        };

        Ok(Self {
            v0: positions[start],
            e0: positions[end] - positions[start],
            e1: positions[remaining] - positions[start],
            n0: normals[start],
            nd0: normals[end] - normals[start],
            nd1: normals[remaining] - normals[start],
            face_normal,
        })
    }

    /// Unnormalized face normal, with length proportional to the face area.
    pub fn compute_normal(positions: [Point3<f64>; 3]) -> Vector3<f64> {
        let edge1 = positions[1] - positions[0];
        let edge2 = positions[2] - positions[0];

        edge1.cross(&edge2)
    }

    pub fn get_face_normal(&self) -> Unit<Vector3<f64>> {
        self.face_normal
    }

    /// Shading normal at a point on the triangle.
    ///
    /// Interpolates the vertex normals along `e0` and `e1` by the point's
    /// reference-axis coordinate, then blends the two results by its
    /// secondary-axis coordinate. When either step is singular the vertex
    /// normals are blended barycentrically instead, and if that cancels out
    /// the face normal is returned.
    pub fn normal_at(&self, point: &Point3<f64>) -> Unit<Vector3<f64>> {
        let normal = self
            .axis_interpolated_normal(point)
            .unwrap_or_else(|| self.barycentric_normal(point));

        try_normalize(&normal).unwrap_or(self.face_normal)
    }

    fn axis_interpolated_normal(&self, point: &Point3<f64>) -> Option<Vector3<f64>> {
        let (a, b) = (REFERENCE_AXIS, SECONDARY_AXIS);
        if self.e0[a].abs() < SINGULAR_EPSILON || self.e1[a].abs() < SINGULAR_EPSILON {
            return None;
        }

        let offset = point[a] - self.v0[a];

        let ratio0 = offset / self.e0[a];
        let p0 = self.e0[b] * ratio0 + self.v0[b];
        let normal0 = self.nd0 * ratio0 + self.n0;

        let ratio1 = offset / self.e1[a];
        let p1 = self.e1[b] * ratio1 + self.v0[b];
        let normal1 = self.nd1 * ratio1 + self.n0;

        let span = p1 - p0;
        if span.abs() < SINGULAR_EPSILON {
            return None;
        }
        let ratio = (point[b] - p0) / span;

        Some(normal0.lerp(&normal1, ratio))
    }

    fn barycentric_normal(&self, point: &Point3<f64>) -> Vector3<f64> {
        let s = point - self.v0;
        let d00 = self.e0.dot(&self.e0);
        let d01 = self.e0.dot(&self.e1);
        let d11 = self.e1.dot(&self.e1);
        let d20 = s.dot(&self.e0);
        let d21 = s.dot(&self.e1);
        let denominator = d00 * d11 - d01 * d01;

        let u = (d11 * d20 - d01 * d21) / denominator;
        let v = (d00 * d21 - d01 * d20) / denominator;

        self.n0 + self.nd0 * u + self.nd1 * v
    }
}

impl Intersectable for Triangle {
    fn intersect(&self, ray: &Ray, epsilon: f64) -> Option<f64> {
        let h = ray.direction.cross(&self.e1);
        let a = h.dot(&self.e0);
        if a.abs() < epsilon {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(&h);
        if u < 0.0 || 1.0 < u {
            return None;
        }

        let q = s.cross(&self.e0);
        let v = f * ray.direction.dot(&q);
        if v < 0.0 || 1.0 < u + v {
            return None;
        }

        let distance = f * self.e1.dot(&q);
        if distance > epsilon {
            Some(distance)
        } else {
            None
        }
    }
}
