use nalgebra::{Point3, Vector3};
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PointLight {
    pub position: Point3<f64>,
    pub color: Vector3<f64>,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Point3::from([1.0, -1.0, 0.0]),
            color: Vector3::from([0.0, 0.0, 1.0]),
        }
    }
}

impl PointLight {
    pub fn new(position: Point3<f64>, color: Vector3<f64>) -> Self {
        Self { position, color }
    }

    pub fn get_position(&self) -> Point3<f64> {
        self.position
    }

    pub fn get_color(&self) -> Vector3<f64> {
        self.color
    }
}
