use crate::error::Result;
use crate::utils;
use image::{Rgb, RgbImage};
use nalgebra::Vector3;
use num_traits::identities::Zero;
use rayon::prelude::*;
use rayon::slice::ChunksMut;
use std::path::Path;

/// Row-major `height x width` grid of linear colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Vector3<f64>>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vector3::zero(); width * height],
        }
    }

    pub fn get_width(&self) -> usize {
        self.width
    }

    pub fn get_height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Vector3<f64> {
        self.pixels[row * self.width + col]
    }

    pub fn row(&self, row: usize) -> &[Vector3<f64>] {
        let start = row * self.width;
        &self.pixels[start..start + self.width]
    }

    /// Disjoint mutable rows, in order, for the parallel render pass.
    pub fn par_rows_mut(&mut self) -> ChunksMut<'_, Vector3<f64>> {
        self.pixels.par_chunks_mut(self.width)
    }

    /// 24-bit RGB image, one pixel per cell, rows top to bottom.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            Rgb(utils::to_rgb8(&self.get(y as usize, x as usize)))
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.to_image().save(path)?;

        Ok(())
    }
}
