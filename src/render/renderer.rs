use super::{trace, Framebuffer, RenderOptions, Trace};
use crate::error::Result;
use crate::ray_intersection::{Ray, RayType};
use crate::scene::Scene;
use crate::utils;
use image::RgbImage;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::{debug, info};
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::time::{Duration, Instant};

/// Orthographic camera ray for a pixel. Rows map to z and columns to x over
/// `[-1, 1)`; every ray starts on the plane `y = 1` and looks down `-y`.
pub fn build_camera_ray(row: usize, col: usize, width: usize, height: usize) -> Ray {
    assert!(row < height && col < width);

    let x = utils::remap_value(col as f64, (0.0, width as f64), (-1.0, 1.0));
    let z = utils::remap_value(row as f64, (0.0, height as f64), (-1.0, 1.0));

    Ray::new(
        RayType::Primary,
        Point3::from([x, 1.0, z]),
        Vector3::from([0.0, -1.0, 0.0]),
    )
}

#[derive(Debug)]
pub struct Renderer {
    pub render_options: RenderOptions,
    scene: Scene,
}

impl Renderer {
    pub fn new(render_options: RenderOptions, scene: Scene) -> Self {
        Self {
            render_options,
            scene,
        }
    }

    pub fn get_width(&self) -> usize {
        self.render_options.width as usize
    }

    pub fn get_height(&self) -> usize {
        self.render_options.height as usize
    }

    pub fn get_num_triangles(&self) -> usize {
        self.scene.len()
    }

    pub fn screen_raycast(&self, row: usize, col: usize) -> Trace {
        let ray = build_camera_ray(row, col, self.get_width(), self.get_height());

        trace(&self.scene, &self.render_options, ray)
    }

    fn build_progress_bar(&self) -> ProgressBar {
        let progress = ProgressBar::new(self.get_height() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise} elapsed] [{eta_precise} left] {bar:40} {pos}/{len} rows"),
        );

        progress
    }

    /// Fills a fresh framebuffer. Each row is traced by exactly one rayon
    /// task; pixel `(row, col)` lands at `(height - row - 1, width - col - 1)`.
    fn render_rows(&self, framebuffer: &mut Framebuffer, use_progress: bool) {
        let width = self.get_width();
        let height = self.get_height();

        let process_row = |(target_row, pixels): (usize, &mut [Vector3<f64>])| {
            let row = height - target_row - 1;
            for (target_col, pixel) in pixels.iter_mut().enumerate() {
                let col = width - target_col - 1;
                *pixel = self.screen_raycast(row, col).color;
            }
        };

        let rows = framebuffer.par_rows_mut().enumerate();
        if use_progress {
            let progress = self.build_progress_bar();
            rows.progress_with(progress.clone()).for_each(process_row);
            progress.finish();
        } else {
            rows.for_each(process_row);
        }
    }

    pub fn render(&self, use_progress: bool) -> Result<(Framebuffer, Duration)> {
        self.render_options.validate()?;

        let mut framebuffer = Framebuffer::new(self.get_width(), self.get_height());
        let start = Instant::now();

        match self.render_options.threads {
            Some(threads) => {
                debug!("Rendering on a dedicated pool of {} threads", threads);
                let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
                pool.install(|| self.render_rows(&mut framebuffer, use_progress));
            }
            None => {
                debug!(
                    "Rendering on the global pool of {} threads",
                    rayon::current_num_threads()
                );
                self.render_rows(&mut framebuffer, use_progress);
            }
        }

        let duration = start.elapsed();
        info!(
            "Rendered {}x{} pixels against {} triangles in {:.3?}",
            self.get_width(),
            self.get_height(),
            self.get_num_triangles(),
            duration
        );

        Ok((framebuffer, duration))
    }

    pub fn render_to_image(&self, use_progress: bool) -> Result<(RgbImage, Duration)> {
        let (framebuffer, duration) = self.render(use_progress)?;

        Ok((framebuffer.to_image(), duration))
    }
}
