//! Transforms: resize, crop, canvas extend, alpha query.
//!
//! Each transform takes the current image out of the handle, computes a
//! replacement, and rebinds it. A failure after the take leaves the handle
//! empty — poisoned — and every later operation reports a closed handle.
//! Callers recover by opening a fresh handle, not by retrying.
//!
//! Anchor-offset math for extend is a pure function, testable without
//! building a single pixel.

use crate::error::{Error, Result};
use crate::handle::ImageHandle;
use crate::types::{CompassDirection, Extend, Kernel};
use image::{DynamicImage, RgbaImage};
use rayon::prelude::*;

/// Scale factors above this are clamped. Keeps one malformed request from
/// ballooning a buffer by orders of magnitude.
const MAX_SCALE_FACTOR: f64 = 10.0;

impl ImageHandle {
    /// Scale the image by independent horizontal/vertical factors.
    ///
    /// Factors are clamped to a maximum of 10; non-finite or
    /// non-positive factors are errors. Target dimensions round to the
    /// nearest pixel and never drop below 1.
    pub fn resize(&mut self, scale_x: f64, scale_y: f64, kernel: Kernel) -> Result<()> {
        let image = self.take_current()?;

        if !scale_x.is_finite() || !scale_y.is_finite() || scale_x <= 0.0 || scale_y <= 0.0 {
            return Err(Error::operation(format!(
                "invalid scale factors {scale_x}x{scale_y}"
            )));
        }
        let scale_x = scale_x.min(MAX_SCALE_FACTOR);
        let scale_y = scale_y.min(MAX_SCALE_FACTOR);

        let width = scaled_dimension(image.width(), scale_x);
        let height = scaled_dimension(image.height(), scale_y);
        self.rebind(image.resize_exact(width, height, kernel.filter()));
        Ok(())
    }

    /// Extract the rectangular region `width`×`height` at (`left`, `top`).
    ///
    /// Zero-size or out-of-bounds regions are errors.
    pub fn crop(&mut self, left: u32, top: u32, width: u32, height: u32) -> Result<()> {
        let image = self.take_current()?;
        let (img_w, img_h) = (image.width(), image.height());

        let in_bounds = width > 0
            && height > 0
            && left.checked_add(width).is_some_and(|right| right <= img_w)
            && top.checked_add(height).is_some_and(|bottom| bottom <= img_h);
        if !in_bounds {
            return Err(Error::operation(format!(
                "crop region {width}x{height}+{left}+{top} outside image {img_w}x{img_h}"
            )));
        }

        self.rebind(image.crop_imm(left, top, width, height));
        Ok(())
    }

    /// Grow the canvas to `width`×`height`, anchoring the existing content at
    /// `direction` and filling the uncovered area per `extend`.
    ///
    /// `red`/`green`/`blue` are used only by [`Extend::Background`]. The
    /// canvas must be at least as large as the current image. The fill runs
    /// row-parallel on the global worker pool, and the result is RGBA.
    #[allow(clippy::too_many_arguments)]
    pub fn extend(
        &mut self,
        direction: CompassDirection,
        width: u32,
        height: u32,
        extend: Extend,
        red: f64,
        green: f64,
        blue: f64,
    ) -> Result<()> {
        let image = self.take_current()?;

        if width < image.width() || height < image.height() {
            return Err(Error::operation(format!(
                "canvas {width}x{height} cannot hold image {}x{}",
                image.width(),
                image.height()
            )));
        }

        let source = image.to_rgba8();
        let (left, top) = anchor_offsets(direction, (width, height), source.dimensions());
        let background = [
            channel_from_f64(red),
            channel_from_f64(green),
            channel_from_f64(blue),
            255,
        ];

        let row_stride = width as usize * 4;
        let mut pixels = vec![0u8; row_stride * height as usize];
        pixels
            .par_chunks_mut(row_stride)
            .enumerate()
            .for_each(|(y, row)| {
                let rel_y = y as i64 - top as i64;
                for x in 0..width as usize {
                    let rel_x = x as i64 - left as i64;
                    let pixel = fill_pixel(&source, rel_x, rel_y, extend, background);
                    row[x * 4..x * 4 + 4].copy_from_slice(&pixel);
                }
            });

        let canvas = RgbaImage::from_raw(width, height, pixels)
            .ok_or_else(|| Error::operation("canvas allocation failed"))?;
        self.rebind(DynamicImage::ImageRgba8(canvas));
        Ok(())
    }

    /// Whether the current image carries an alpha channel. A closed handle
    /// reports `false`.
    pub fn has_alpha(&self) -> bool {
        self.image().is_some_and(|img| img.color().has_alpha())
    }
}

fn scaled_dimension(dimension: u32, scale: f64) -> u32 {
    (dimension as f64 * scale)
        .round()
        .clamp(1.0, u32::MAX as f64) as u32
}

fn channel_from_f64(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

/// Placement of `content` inside `canvas` for a compass anchor. Both sizes
/// are (width, height); the canvas is known to be at least content-sized.
fn anchor_offsets(
    direction: CompassDirection,
    canvas: (u32, u32),
    content: (u32, u32),
) -> (u32, u32) {
    let (canvas_w, canvas_h) = canvas;
    let (content_w, content_h) = content;
    let centre_x = (canvas_w - content_w) / 2;
    let centre_y = (canvas_h - content_h) / 2;
    let right = canvas_w - content_w;
    let bottom = canvas_h - content_h;

    match direction {
        CompassDirection::Centre => (centre_x, centre_y),
        CompassDirection::North => (centre_x, 0),
        CompassDirection::East => (right, centre_y),
        CompassDirection::South => (centre_x, bottom),
        CompassDirection::West => (0, centre_y),
        CompassDirection::NorthEast => (right, 0),
        CompassDirection::SouthEast => (right, bottom),
        CompassDirection::SouthWest => (0, bottom),
        CompassDirection::NorthWest => (0, 0),
    }
}

/// Pixel value at content-relative coordinates, which may be negative or past
/// the content edge. Inside the content it is the source pixel; outside, the
/// fill policy decides.
fn fill_pixel(
    source: &RgbaImage,
    rel_x: i64,
    rel_y: i64,
    extend: Extend,
    background: [u8; 4],
) -> [u8; 4] {
    let (w, h) = (source.width() as i64, source.height() as i64);
    if (0..w).contains(&rel_x) && (0..h).contains(&rel_y) {
        return source.get_pixel(rel_x as u32, rel_y as u32).0;
    }

    match extend {
        Extend::Black => [0, 0, 0, 0],
        Extend::White => [255, 255, 255, 255],
        Extend::Background => background,
        Extend::Copy => source
            .get_pixel(rel_x.clamp(0, w - 1) as u32, rel_y.clamp(0, h - 1) as u32)
            .0,
        Extend::Repeat => source
            .get_pixel(rel_x.rem_euclid(w) as u32, rel_y.rem_euclid(h) as u32)
            .0,
        Extend::Mirror => source.get_pixel(reflect(rel_x, w), reflect(rel_y, h)).0,
    }
}

/// Reflect an out-of-range index into [0, n) with period 2n. Whole-image
/// mirroring: the edge row repeats across the seam.
fn reflect(index: i64, n: i64) -> u32 {
    let m = index.rem_euclid(2 * n);
    (if m < n { m } else { 2 * n - 1 - m }) as u32
}
