//! Magic-byte format classification.
//!
//! Sniffing never calls the engine: it reads leading bytes and consults the
//! codec support table. A TIFF- or WebP-shaped buffer in a build without that
//! codec classifies as `Unknown`, so nothing downstream attempts a decode
//! that cannot succeed.

use crate::registry;
use crate::types::ImageType;

/// Shortest buffer the rules can classify; anything shorter is `Unknown`.
const MIN_SNIFF_LEN: usize = 12;

const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];
const PNG_MAGIC: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];
const TIFF_MAGIC_LE: [u8; 4] = [0x49, 0x49, 0x2A, 0x00];
const TIFF_MAGIC_BE: [u8; 4] = [0x4D, 0x4D, 0x00, 0x2A];
/// RIFF container tag at bytes 8..12.
const WEBP_TAG: &[u8; 4] = b"WEBP";

/// Classify a buffer by its leading bytes. First matching rule wins.
///
/// ```
/// use bufimg::{determine_image_type, ImageType};
///
/// let mut jpeg = vec![0xFF, 0xD8, 0xFF];
/// jpeg.resize(12, 0);
/// assert_eq!(determine_image_type(&jpeg), ImageType::Jpeg);
///
/// // Buffers shorter than 12 bytes are never classified.
/// assert_eq!(determine_image_type(&[0xFF, 0xD8, 0xFF]), ImageType::Unknown);
/// ```
pub fn determine_image_type(buf: &[u8]) -> ImageType {
    classify(
        buf,
        registry::is_type_supported(ImageType::Tiff),
        registry::is_type_supported(ImageType::WebP),
    )
}

fn classify(buf: &[u8], tiff_supported: bool, webp_supported: bool) -> ImageType {
    if buf.len() < MIN_SNIFF_LEN {
        return ImageType::Unknown;
    }
    if buf[..3] == JPEG_MAGIC {
        return ImageType::Jpeg;
    }
    if buf[..4] == PNG_MAGIC {
        return ImageType::Png;
    }
    if tiff_supported && (buf[..4] == TIFF_MAGIC_LE || buf[..4] == TIFF_MAGIC_BE) {
        return ImageType::Tiff;
    }
    if webp_supported && buf[8..12] == *WEBP_TAG {
        return ImageType::WebP;
    }
    ImageType::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(head: &[u8]) -> Vec<u8> {
        let mut buf = head.to_vec();
        buf.resize(MIN_SNIFF_LEN.max(buf.len()), 0);
        buf
    }

    #[test]
    fn short_buffers_are_unknown() {
        for len in 0..MIN_SNIFF_LEN {
            let buf = vec![0xFF; len];
            assert_eq!(classify(&buf, true, true), ImageType::Unknown, "len {len}");
        }
    }

    #[test]
    fn jpeg_magic_wins_regardless_of_remaining_content() {
        let mut buf = padded(&[0xFF, 0xD8, 0xFF]);
        buf.extend_from_slice(b"WEBPgarbage");
        assert_eq!(classify(&buf, true, true), ImageType::Jpeg);
    }

    #[test]
    fn png_magic_classifies_as_png() {
        assert_eq!(
            classify(&padded(&PNG_MAGIC), true, true),
            ImageType::Png
        );
    }

    #[test]
    fn tiff_magic_both_byte_orders() {
        assert_eq!(classify(&padded(&TIFF_MAGIC_LE), true, true), ImageType::Tiff);
        assert_eq!(classify(&padded(&TIFF_MAGIC_BE), true, true), ImageType::Tiff);
    }

    #[test]
    fn tiff_magic_without_tiff_support_is_unknown() {
        assert_eq!(
            classify(&padded(&TIFF_MAGIC_LE), false, true),
            ImageType::Unknown
        );
    }

    #[test]
    fn webp_tag_at_offset_eight() {
        let mut buf = b"RIFF\x24\x00\x00\x00".to_vec();
        buf.extend_from_slice(WEBP_TAG);
        assert_eq!(classify(&buf, true, true), ImageType::WebP);
        assert_eq!(classify(&buf, true, false), ImageType::Unknown);
    }

    #[test]
    fn arbitrary_bytes_are_unknown() {
        assert_eq!(classify(&padded(b"GIF89a"), true, true), ImageType::Unknown);
        assert_eq!(classify(&[0u8; 64], true, true), ImageType::Unknown);
    }
}
