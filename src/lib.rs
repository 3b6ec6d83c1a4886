#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::wildcard_imports
)]

mod core;
mod error;
mod lights;
mod primitives;
mod ray_intersection;
mod render;
mod scene;
mod utils;

pub use crate::core::{component_max, try_normalize};
pub use crate::error::{RenderError, Result};
pub use crate::lights::PointLight;
pub use crate::primitives::{Mesh, Triangle};
pub use crate::ray_intersection::{Intersectable, Intersection, Ray, RayType};
pub use crate::render::{
    build_camera_ray, shade, trace, Compositing, Framebuffer, ReflectionTracer, RenderOptions,
    Renderer, Trace,
};
pub use crate::scene::Scene;
pub use crate::utils::reflect;
