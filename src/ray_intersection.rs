use nalgebra::{Point3, Vector3};

pub trait Intersectable {
    /// Distance along `ray` to the hit, if any. Hits closer than `epsilon` are rejected.
    fn intersect(&self, ray: &Ray, epsilon: f64) -> Option<f64>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RayType {
    Primary,
    Secondary(u8),
    Shadow,
}

/// A ray with a direction that is not required to be unit length.
#[derive(Clone, Debug)]
pub struct Ray {
    pub ray_type: RayType,
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn new(ray_type: RayType, origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self {
            ray_type,
            origin,
            direction,
        }
    }

    /// Number of reflections this ray has already undergone.
    pub fn get_depth(&self) -> u8 {
        match self.ray_type {
            RayType::Secondary(depth) => depth,
            _ => 0,
        }
    }

    pub fn at(&self, distance: f64) -> Point3<f64> {
        self.origin + self.direction * distance
    }
}

#[derive(Debug)]
pub struct Intersection<'a, T> {
    pub object: &'a T,
    pub distance: f64,
}

impl<'a, T> Intersection<'a, T> {
    pub fn new(object: &'a T, distance: f64) -> Self {
        Self { object, distance }
    }

    pub fn get_hit_point(&self, ray: &Ray) -> Point3<f64> {
        ray.at(self.distance)
    }
}
