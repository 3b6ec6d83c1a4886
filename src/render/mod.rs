mod framebuffer;
mod renderer;
mod shading;
mod tracer;

use crate::error::{RenderError, Result};
use crate::lights::PointLight;
use nalgebra::Vector3;
use serde::Deserialize;
use std::io::Read;

pub use framebuffer::Framebuffer;
pub use renderer::{build_camera_ray, Renderer};
pub use shading::shade;
pub use tracer::{trace, ReflectionTracer, Trace};

/// How the colors of successive bounces are combined into a pixel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compositing {
    /// Sum of each bounce's color weighted by the current reflectivity.
    #[default]
    Sum,
    /// Component-wise maximum of the weighted bounce colors.
    Max,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub light: PointLight,
    pub specular_color: Vector3<f64>,
    pub ambient_factor: f64,
    pub diffuse_factor: f64,
    pub specular_exponent: f64,
    pub bounce_attenuation: f64,
    pub max_bounce_depth: u8,
    pub min_reflectivity: f64,
    pub intersection_epsilon: f64,
    pub compositing: Compositing,
    /// Worker count for the render pass. Uses the global rayon pool when unset.
    pub threads: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            light: PointLight::default(),
            specular_color: Vector3::from([0.3, 0.3, 0.3]),
            ambient_factor: 0.2,
            diffuse_factor: 0.8,
            specular_exponent: 5.0,
            bounce_attenuation: 0.8,
            max_bounce_depth: 10,
            min_reflectivity: 1e-5,
            intersection_epsilon: 1e-5,
            compositing: Compositing::default(),
            threads: None,
        }
    }
}

impl RenderOptions {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let options: Self = serde_json::from_reader(reader)?;
        options.validate()?;

        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::Config(format!(
                "image dimensions must be nonzero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.intersection_epsilon <= 0.0 {
            return Err(RenderError::Config(
                "intersection_epsilon must be positive".to_string(),
            ));
        }
        if self.bounce_attenuation <= 0.0 || self.bounce_attenuation > 1.0 {
            return Err(RenderError::Config(
                "bounce_attenuation must be in (0, 1]".to_string(),
            ));
        }
        if self.max_bounce_depth == 0 {
            return Err(RenderError::Config(
                "max_bounce_depth must be at least 1".to_string(),
            ));
        }
        if self.threads == Some(0) {
            return Err(RenderError::Config(
                "threads must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
