//! Shared test helpers: synthetic images built in memory.
//!
//! Gradient fills keep encoded buffers small while still giving every pixel
//! a distinct-enough value for anchor and fill assertions.

use crate::handle::ImageHandle;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

pub(crate) fn gradient_rgba(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 31 % 256) as u8,
            (y * 53 % 256) as u8,
            ((x + y) * 11 % 256) as u8,
            255,
        ])
    })
}

/// A valid RGBA PNG buffer with a gradient fill.
pub(crate) fn png_buffer(width: u32, height: u32) -> Vec<u8> {
    let img = gradient_rgba(width, height);
    let mut out = Cursor::new(Vec::new());
    PngEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)
        .unwrap();
    out.into_inner()
}

/// A valid RGB JPEG buffer with a gradient fill.
pub(crate) fn jpeg_buffer(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    out.into_inner()
}

/// An open handle over a gradient PNG, for tests that start from a decoded
/// image rather than bytes.
pub(crate) fn open_gradient_png(width: u32, height: u32) -> ImageHandle {
    ImageHandle::open(png_buffer(width, height)).unwrap()
}
