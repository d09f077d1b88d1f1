//! Encode a handle back to a byte buffer.
//!
//! ## Option applicability per format
//!
//! | Format | quality | compression | interlaced | lossless | strip_metadata |
//! |--------|---------|-------------|------------|----------|----------------|
//! | JPEG (default) | yes | — | accepted¹ | — | holds² |
//! | PNG | — | yes (class-mapped) | accepted¹ | — | holds² |
//! | TIFF | ignored | ignored | — | — | holds² |
//! | WebP | —³ | — | — | always | holds² |
//!
//! ¹ Accepted for contract compatibility; the bundled encoders emit
//!   non-interlaced output.
//! ² The bundled encoders write no metadata, so stripping holds by
//!   construction.
//! ³ The bundled WebP encoder is lossless-only; quality does not apply.
//!
//! Quality 0 and compression 0 are "unset" and resolve to 90 and 6. An
//! explicitly requested format missing from this build is rejected before
//! any encode work. Output buffers are plain `Vec<u8>` owned by the caller.

use crate::error::{Error, Result};
use crate::handle::ImageHandle;
use crate::registry;
use crate::types::{ExportParams, ImageType};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::DynamicImage;
use std::io::Cursor;

const DEFAULT_QUALITY: u8 = 90;
const DEFAULT_COMPRESSION: u8 = 6;

impl ImageHandle {
    /// Serialize the current image in the format `params` requests.
    ///
    /// An unset format (`Unknown`) selects JPEG. See the [module docs](self)
    /// for which options each format uses.
    pub fn save(&self, params: &ExportParams) -> Result<Vec<u8>> {
        let image = self.current()?;
        let params = apply_defaults(params);
        let format = resolve_format(params.format, registry::is_type_supported)?;

        match format {
            ImageType::Png => encode_png(image, &params),
            ImageType::Tiff => encode_tiff(image),
            ImageType::WebP => encode_webp(image),
            ImageType::Jpeg | ImageType::Unknown => encode_jpeg(image, &params),
        }
    }
}

/// Resolve the 0 = "unset" sentinels to their defaults.
fn apply_defaults(params: &ExportParams) -> ExportParams {
    let mut params = params.clone();
    if params.quality == 0 {
        params.quality = DEFAULT_QUALITY;
    }
    if params.compression == 0 {
        params.compression = DEFAULT_COMPRESSION;
    }
    params
}

/// Pick the target format: an explicit request must be supported by this
/// build; unset falls back to JPEG.
fn resolve_format(
    requested: ImageType,
    is_supported: impl Fn(ImageType) -> bool,
) -> Result<ImageType> {
    if requested != ImageType::Unknown && !is_supported(requested) {
        return Err(Error::UnsupportedFormat);
    }
    Ok(if requested == ImageType::Unknown {
        ImageType::Jpeg
    } else {
        requested
    })
}

fn encode_jpeg(image: &DynamicImage, params: &ExportParams) -> Result<Vec<u8>> {
    // JPEG has no alpha and the encoder is 8-bit; flatten unconditionally.
    let flat = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut out = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut out, params.quality);
    flat.write_with_encoder(encoder)?;
    Ok(out.into_inner())
}

/// Map a 0-9 compression level onto the encoder's three effort classes.
fn compression_class(level: u8) -> CompressionType {
    match level {
        1..=3 => CompressionType::Fast,
        7..=9 => CompressionType::Best,
        _ => CompressionType::Default,
    }
}

fn encode_png(image: &DynamicImage, params: &ExportParams) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    let encoder = PngEncoder::new_with_quality(
        &mut out,
        compression_class(params.compression),
        PngFilter::Adaptive,
    );
    image.write_with_encoder(encoder)?;
    Ok(out.into_inner())
}

#[cfg(feature = "tiff")]
fn encode_tiff(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    let encoder = image::codecs::tiff::TiffEncoder::new(&mut out);
    image.write_with_encoder(encoder)?;
    Ok(out.into_inner())
}

#[cfg(not(feature = "tiff"))]
fn encode_tiff(_image: &DynamicImage) -> Result<Vec<u8>> {
    Err(Error::UnsupportedFormat)
}

#[cfg(feature = "webp")]
fn encode_webp(image: &DynamicImage) -> Result<Vec<u8>> {
    // The lossless encoder takes 8-bit RGB(A) only.
    let image = if image.color().has_alpha() {
        DynamicImage::ImageRgba8(image.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(image.to_rgb8())
    };
    let mut out = Cursor::new(Vec::new());
    let encoder = image::codecs::webp::WebPEncoder::new_lossless(&mut out);
    image.write_with_encoder(encoder)?;
    Ok(out.into_inner())
}

#[cfg(not(feature = "webp"))]
fn encode_webp(_image: &DynamicImage) -> Result<Vec<u8>> {
    Err(Error::UnsupportedFormat)
}
