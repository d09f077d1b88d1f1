//! Closed enums and parameter records shared across the pipeline.
//!
//! Every enum here is a closed set: extending [`ImageType`] means registering
//! a loader name in [`registry`](crate::registry) and a magic-byte rule in
//! [`sniff`](crate::sniff) together, not just adding a variant.

use image::ImageFormat;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Image formats this pipeline can name.
///
/// `Unknown` doubles as "unset" in [`ExportParams::format`], where it selects
/// the JPEG default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    #[default]
    Unknown,
    Jpeg,
    Png,
    Tiff,
    WebP,
}

impl ImageType {
    /// Every concrete format, in registry probe order.
    pub const ALL: [ImageType; 4] = [
        ImageType::Jpeg,
        ImageType::Png,
        ImageType::Tiff,
        ImageType::WebP,
    ];

    /// Canonical lowercase name, used in loader lookups and log lines.
    pub fn name(self) -> &'static str {
        match self {
            ImageType::Unknown => "unknown",
            ImageType::Jpeg => "jpeg",
            ImageType::Png => "png",
            ImageType::Tiff => "tiff",
            ImageType::WebP => "webp",
        }
    }

    /// The engine-side format selector. `None` for `Unknown`.
    pub(crate) fn engine_format(self) -> Option<ImageFormat> {
        match self {
            ImageType::Unknown => None,
            ImageType::Jpeg => Some(ImageFormat::Jpeg),
            ImageType::Png => Some(ImageFormat::Png),
            ImageType::Tiff => Some(ImageFormat::Tiff),
            ImageType::WebP => Some(ImageFormat::WebP),
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resampling algorithm used during scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kernel {
    Nearest,
    Linear,
    Cubic,
    Lanczos2,
    #[default]
    Lanczos3,
}

impl Kernel {
    /// Engine filter for this kernel. The engine ships a single Lanczos
    /// (3-lobe), so `Lanczos2` resolves to it as the closest match.
    pub(crate) fn filter(self) -> FilterType {
        match self {
            Kernel::Nearest => FilterType::Nearest,
            Kernel::Linear => FilterType::Triangle,
            Kernel::Cubic => FilterType::CatmullRom,
            Kernel::Lanczos2 | Kernel::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Anchor position for existing content during a canvas extend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompassDirection {
    #[default]
    Centre,
    North,
    East,
    South,
    West,
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

/// Fill policy for canvas area not covered by the anchored image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extend {
    /// All-zero pixels (transparent black on alpha images).
    #[default]
    Black,
    /// Repeats the nearest edge pixel.
    Copy,
    /// Tiles the whole image.
    Repeat,
    /// Reflect-tiles the whole image.
    Mirror,
    /// White pixels.
    White,
    /// Solid color from the extend call's r/g/b arguments.
    Background,
}

/// Options for encoding a handle back to bytes.
///
/// `quality` and `compression` of 0 are "unset" sentinels, resolved to 90 and
/// 6 at save time — they are not valid values to request explicitly. Which
/// fields apply depends on the target format; see
/// [`save`](crate::ImageHandle::save).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportParams {
    pub format: ImageType,
    pub quality: u8,
    pub compression: u8,
    pub interlaced: bool,
    pub lossless: bool,
    pub strip_metadata: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_type_names_are_canonical() {
        assert_eq!(ImageType::Jpeg.name(), "jpeg");
        assert_eq!(ImageType::WebP.name(), "webp");
        assert_eq!(ImageType::Unknown.to_string(), "unknown");
    }

    #[test]
    fn all_covers_every_concrete_format() {
        assert_eq!(ImageType::ALL.len(), 4);
        assert!(!ImageType::ALL.contains(&ImageType::Unknown));
        for ty in ImageType::ALL {
            assert!(ty.engine_format().is_some());
        }
    }

    #[test]
    fn lanczos2_falls_back_to_lanczos3() {
        assert!(matches!(Kernel::Lanczos2.filter(), FilterType::Lanczos3));
        assert!(matches!(Kernel::Nearest.filter(), FilterType::Nearest));
    }

    #[test]
    fn export_params_default_is_all_unset() {
        let params = ExportParams::default();
        assert_eq!(params.format, ImageType::Unknown);
        assert_eq!(params.quality, 0);
        assert_eq!(params.compression, 0);
        assert!(!params.interlaced);
        assert!(!params.lossless);
        assert!(!params.strip_metadata);
    }

    #[test]
    fn export_params_deserialize_sparse() {
        let params: ExportParams =
            serde_json::from_str(r#"{"format": "webp", "lossless": true}"#).unwrap();
        assert_eq!(params.format, ImageType::WebP);
        assert!(params.lossless);
        assert_eq!(params.quality, 0);
    }
}
