use super::{shade, Compositing, RenderOptions};
use crate::core::component_max;
use crate::ray_intersection::{Ray, RayType};
use crate::scene::Scene;
use crate::utils;
use nalgebra::Vector3;
use num_traits::identities::Zero;

/// Color gathered along a ray and the reflection depth it reached.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Trace {
    pub color: Vector3<f64>,
    pub bounces: u8,
}

#[derive(Debug)]
enum TraceState {
    Tracing { ray: Ray, reflectivity: f64 },
    Terminated,
}

/// Follows one primary ray through successive mirror reflections.
#[derive(Debug)]
pub struct ReflectionTracer<'a> {
    scene: &'a Scene,
    options: &'a RenderOptions,
    state: TraceState,
    color: Vector3<f64>,
    bounces: u8,
}

impl<'a> ReflectionTracer<'a> {
    pub fn new(scene: &'a Scene, options: &'a RenderOptions, ray: Ray) -> Self {
        let ray_depth = ray.get_depth();
        Self {
            scene,
            options,
            state: TraceState::Tracing {
                ray,
                reflectivity: 1.0,
            },
            color: Vector3::zero(),
            bounces: ray_depth,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.state, TraceState::Terminated)
    }

    /// Advances by one bounce. Does nothing once terminated.
    pub fn step(&mut self) {
        let state = std::mem::replace(&mut self.state, TraceState::Terminated);
        let (ray, reflectivity) = match state {
            TraceState::Tracing { ray, reflectivity } => (ray, reflectivity),
            TraceState::Terminated => return,
        };

        let options = self.options;
        let intersection = match self.scene.raycast(&ray, options.intersection_epsilon) {
            Some(intersection) => intersection,
            None => return,
        };

        let hit_point = intersection.get_hit_point(&ray);
        let normal = intersection.object.normal_at(&hit_point);
        let local_color = shade(self.scene, options, &hit_point, &normal) * reflectivity;
        self.color = match options.compositing {
            Compositing::Sum => self.color + local_color,
            Compositing::Max => component_max(&self.color, &local_color),
        };

        let direction = utils::reflect(&ray.direction, &normal);
        let reflectivity = reflectivity * options.bounce_attenuation;
        let depth = ray.get_depth().saturating_add(1);
        self.bounces = depth;

        if reflectivity >= options.min_reflectivity && depth < options.max_bounce_depth {
            self.state = TraceState::Tracing {
                ray: Ray::new(RayType::Secondary(depth), hit_point, direction),
                reflectivity,
            };
        }
    }

    pub fn finish(mut self) -> Trace {
        while !self.is_terminated() {
            self.step();
        }

        Trace {
            color: self.color,
            bounces: self.bounces,
        }
    }
}

pub fn trace(scene: &Scene, options: &RenderOptions, ray: Ray) -> Trace {
    ReflectionTracer::new(scene, options, ray).finish()
}
