use crate::primitives::{Mesh, Triangle};
use crate::ray_intersection::{Intersectable, Intersection, Ray};
use log::{info, warn};

/// Immutable list of triangles, queried by linear scan.
#[derive(Debug, Default)]
pub struct Scene {
    triangles: Vec<Triangle>,
}

impl Scene {
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Builds a triangle per mesh face. Degenerate faces are skipped.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut triangles = Vec::with_capacity(mesh.faces.len());
        let mut skipped = 0;

        for (index, &face) in mesh.faces.iter().enumerate() {
            match Triangle::new(mesh.face_positions(face), mesh.face_normals(face)) {
                Ok(triangle) => triangles.push(triangle),
                Err(error) => {
                    warn!("Skipping face {} {:?}: {}", index + 1, face, error);
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            info!(
                "Built scene with {} triangles ({} degenerate faces skipped)",
                triangles.len(),
                skipped
            );
        }

        Self::from_triangles(triangles)
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Closest hit along `ray`. On equal distances the earlier triangle wins.
    pub fn raycast(&self, ray: &Ray, epsilon: f64) -> Option<Intersection<Triangle>> {
        let mut nearest: Option<Intersection<Triangle>> = None;
        for triangle in &self.triangles {
            if let Some(distance) = triangle.intersect(ray, epsilon) {
                if nearest
                    .as_ref()
                    .map_or(true, |intersection| distance < intersection.distance)
                {
                    nearest = Some(Intersection::new(triangle, distance));
                }
            }
        }

        nearest
    }

    /// Whether any triangle intersects `ray`.
    pub fn shadow_cast(&self, ray: &Ray, epsilon: f64) -> bool {
        self.triangles
            .iter()
            .any(|triangle| triangle.intersect(ray, epsilon).is_some())
    }
}
