use super::RenderOptions;
use crate::core::try_normalize;
use crate::ray_intersection::{Ray, RayType};
use crate::scene::Scene;
use nalgebra::{Point3, Unit, Vector3};
use num_traits::identities::Zero;

/// Blinn-Phong color at `hit_point` lit by the single point light.
///
/// The ambient term is always present. Diffuse and specular terms are added
/// only when nothing in the scene blocks the ray towards the light. The view
/// direction is taken from the hit point towards the world origin.
pub fn shade(
    scene: &Scene,
    options: &RenderOptions,
    hit_point: &Point3<f64>,
    normal: &Unit<Vector3<f64>>,
) -> Vector3<f64> {
    let light = &options.light;
    let light_color = light.get_color();
    let ambient = light_color * options.ambient_factor;

    let light_dir = light.get_position() - hit_point;
    let shadow_ray = Ray::new(RayType::Shadow, *hit_point, light_dir);
    if scene.shadow_cast(&shadow_ray, options.intersection_epsilon) {
        return ambient;
    }

    let light_dir = match try_normalize(&light_dir) {
        Ok(light_dir) => light_dir,
        Err(_) => return ambient,
    };
    // a hit exactly at the origin has no view direction, look along the light instead
    let view_dir = try_normalize(&-hit_point.coords).unwrap_or(light_dir);

    let n_dot_l = light_dir.dot(normal).max(0.0);
    let diffuse = light_color * (n_dot_l * options.diffuse_factor);

    let specular = match try_normalize(&(light_dir.into_inner() + view_dir.into_inner())) {
        Ok(half_vec) => {
            let n_dot_h = normal.dot(&half_vec).max(0.0);
            options.specular_color * n_dot_h.powf(options.specular_exponent)
        }
        Err(_) => Vector3::zero(),
    };

    ambient + diffuse + specular
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lights::PointLight;
    use crate::primitives::Triangle;
    use approx::assert_relative_eq;
    use more_asserts::assert_gt;

    fn square_triangle(height: f64, size: f64) -> Triangle {
        let up = Vector3::y();
        Triangle::new(
            [
                Point3::from([-size, height, -size]),
                Point3::from([size, height, -size]),
                Point3::from([0.0, height, size]),
            ],
            [up, up, up],
        )
        .unwrap()
    }

    fn options_with_light(position: [f64; 3]) -> RenderOptions {
        RenderOptions {
            light: PointLight::new(Point3::from(position), Vector3::from([0.0, 0.0, 1.0])),
            ..RenderOptions::default()
        }
    }

    #[test]
    fn it_is_ambient_only_when_the_light_grazes_the_surface() {
        let scene = Scene::from_triangles(vec![square_triangle(0.0, 1.0)]);
        let options = options_with_light([5.0, 0.0, 0.1]);

        let color = shade(
            &scene,
            &options,
            &Point3::from([0.2, 0.0, 0.1]),
            &Vector3::y_axis(),
        );

        assert_relative_eq!(color, Vector3::from([0.0, 0.0, 0.2]), epsilon = 1e-12);
    }

    #[test]
    fn it_is_ambient_only_when_the_light_is_behind_the_surface() {
        let scene = Scene::default();
        let options = options_with_light([0.0, -3.0, 0.0]);

        let color = shade(
            &scene,
            &options,
            &Point3::from([0.0, 1.0, 0.0]),
            &Vector3::y_axis(),
        );

        assert_relative_eq!(color, Vector3::from([0.0, 0.0, 0.2]), epsilon = 1e-12);
    }

    #[test]
    fn it_adds_diffuse_and_specular_terms_when_lit() {
        let scene = Scene::default();
        let options = options_with_light([0.0, 5.0, 0.0]);

        let color = shade(
            &scene,
            &options,
            &Point3::from([0.0, -1.0, 0.0]),
            &Vector3::y_axis(),
        );

        // light, view and normal all point straight up
        let expected = Vector3::from([0.3, 0.3, 0.3 + 0.2 + 0.8]);
        assert_relative_eq!(color, expected, epsilon = 1e-12);
    }

    #[test]
    fn it_shadows_points_behind_an_occluder() {
        let hit_point = Point3::from([0.0, -1.0, 0.0]);
        let options = options_with_light([0.0, 5.0, 0.0]);
        let occluder = square_triangle(2.0, 1.0);

        let shadowed = shade(
            &Scene::from_triangles(vec![occluder]),
            &options,
            &hit_point,
            &Vector3::y_axis(),
        );
        assert_relative_eq!(shadowed, Vector3::from([0.0, 0.0, 0.2]), epsilon = 1e-12);

        let lit = shade(&Scene::default(), &options, &hit_point, &Vector3::y_axis());
        assert_gt!(lit.z, shadowed.z);
        assert_gt!(lit.x, 0.0);
    }

    #[test]
    fn it_handles_hits_at_the_origin() {
        let options = options_with_light([0.0, 5.0, 0.0]);

        let color = shade(
            &Scene::default(),
            &options,
            &Point3::origin(),
            &Vector3::y_axis(),
        );

        assert_relative_eq!(color, Vector3::from([0.3, 0.3, 1.3]), epsilon = 1e-12);
    }
}
