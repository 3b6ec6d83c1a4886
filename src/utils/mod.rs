mod rays;

use nalgebra::Vector3;
use num_traits::Float;

pub use rays::reflect;

/// Scales a color in `[0, 1]` to 8-bit channels. Out of range components are clamped.
pub fn to_rgb8(rgb: &Vector3<f64>) -> [u8; 3] {
    let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;
    [channel(rgb.x), channel(rgb.y), channel(rgb.z)]
}

pub fn remap_value<F: Float>(num: F, domain: (F, F), range: (F, F)) -> F {
    assert!(domain.0 < domain.1, "domain values must be of the form (min, max) - range values can be swapped for this behavior");

    (num - domain.0) * (range.1 - range.0) / (domain.1 - domain.0) + range.0
}
