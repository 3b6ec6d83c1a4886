use crate::error::{RenderError, Result};
use nalgebra::{Unit, Vector3};

/// Normalizes `v`, failing for zero-length (or non-finite) input.
pub fn try_normalize(v: &Vector3<f64>) -> Result<Unit<Vector3<f64>>> {
    let length = v.norm();
    if length == 0.0 || !length.is_finite() {
        return Err(RenderError::ZeroLengthVector);
    }

    Ok(Unit::new_unchecked(v / length))
}

pub fn component_max(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a.zip_map(b, f64::max)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use num_traits::identities::Zero;

    #[test]
    fn it_adds_commutatively_and_associatively() {
        let a = Vector3::from([1.5, -2.0, 0.25]);
        let b = Vector3::from([-0.5, 4.0, 3.0]);
        let c = Vector3::from([2.0, 0.125, -1.0]);

        assert_eq!(a + b, b + a);
        assert_relative_eq!((a + b) + c, a + (b + c));
        assert_eq!(a + Vector3::zero(), a);
        assert_eq!(a - a, Vector3::zero());
        assert_eq!(-a, a * -1.0);
    }

    #[test]
    fn it_computes_dot_and_cross_products() {
        let x: Vector3<f64> = Vector3::x();
        let y: Vector3<f64> = Vector3::y();

        assert_eq!(x.dot(&y), 0.0);
        assert_eq!(x.cross(&y), Vector3::z());
        assert_eq!(y.cross(&x), -Vector3::z());

        let a = Vector3::from([1.0, 2.0, 3.0]);
        let b = Vector3::from([-4.0, 0.5, 2.0]);
        assert_eq!(a.cross(&b), -b.cross(&a));
    }

    #[test]
    fn it_normalizes_nonzero_vectors() {
        for v in &[
            Vector3::from([3.0, 4.0, 0.0]),
            Vector3::from([-1.0, 1e-3, 7.0]),
            Vector3::from([1e-8, 0.0, 0.0]),
        ] {
            let n = try_normalize(v).unwrap();
            assert_relative_eq!(n.dot(&n), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn it_rejects_zero_length_vectors() {
        assert!(matches!(
            try_normalize(&Vector3::zero()),
            Err(RenderError::ZeroLengthVector)
        ));
    }

    #[test]
    fn it_takes_the_component_wise_max() {
        let a = Vector3::from([1.0, -2.0, 0.5]);
        let b = Vector3::from([0.0, 3.0, 0.5]);

        assert_eq!(component_max(&a, &b), Vector3::from([1.0, 3.0, 0.5]));
    }
}
