use nalgebra::{Unit, Vector3};

/// Mirrors `incident` about `normal`, keeping the magnitude of `incident`.
pub fn reflect(incident: &Vector3<f64>, normal: &Unit<Vector3<f64>>) -> Vector3<f64> {
    incident - 2.0 * incident.dot(normal) * normal.into_inner()
}
