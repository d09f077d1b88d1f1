//! Image handle: decode a buffer, hold the current image, release on close.
//!
//! An [`ImageHandle`] owns the decoded image exclusively and keeps a shared
//! reference to the source buffer until close — callers may go on holding
//! their own reference, and the bytes stay alive for as long as either side
//! needs them. `close()` is the primary release path and is idempotent;
//! dropping an unclosed handle releases the same resources as a backstop.

use crate::error::{Error, Result};
use crate::sniff;
use crate::types::ImageType;
use image::DynamicImage;
use std::sync::Arc;

/// A decoded image plus its source buffer and detected format.
///
/// Transforms mutate the handle in place: each one replaces the current image
/// and discards the previous state. A failed transform leaves the handle
/// empty; every later operation on it reports a closed handle. Handles are
/// not synchronized — serialize access externally or use one per task.
pub struct ImageHandle {
    current: Option<DynamicImage>,
    format: ImageType,
    source: Option<Arc<[u8]>>,
}

impl ImageHandle {
    /// Sniff and decode a buffer.
    ///
    /// Returns [`Error::UnsupportedFormat`] when the magic bytes are not
    /// recognized (or the matching codec is absent from this build), after
    /// logging the buffer length and up to three leading bytes. Engine decode
    /// failures translate to [`Error::OperationFailed`].
    pub fn open(buf: impl Into<Arc<[u8]>>) -> Result<Self> {
        let buf: Arc<[u8]> = buf.into();
        let format = sniff::determine_image_type(&buf);

        if format == ImageType::Unknown {
            let head = buf
                .iter()
                .take(3)
                .map(|b| format!("{b:02x}"))
                .collect::<Vec<_>>()
                .join(" ");
            tracing::warn!(size = buf.len(), head, "failed to recognize image format");
            return Err(Error::UnsupportedFormat);
        }

        let engine_format = format.engine_format().ok_or(Error::UnsupportedFormat)?;
        let current = image::load_from_memory_with_format(&buf, engine_format)?;

        Ok(Self {
            current: Some(current),
            format,
            source: Some(buf),
        })
    }

    /// Release the decoded image and the source buffer reference.
    ///
    /// Safe to call any number of times; calls after the first do nothing.
    pub fn close(&mut self) {
        self.current = None;
        self.source = None;
    }

    /// Whether this handle has been closed (or poisoned by a failed transform).
    pub fn is_closed(&self) -> bool {
        self.current.is_none()
    }

    /// Format detected at open time. Stable across transforms and close.
    pub fn format(&self) -> ImageType {
        self.format
    }

    /// Current image dimensions, or `None` on a closed handle.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.current.as_ref().map(|img| (img.width(), img.height()))
    }

    /// Borrow the current decoded image, if the handle is open.
    pub fn image(&self) -> Option<&DynamicImage> {
        self.current.as_ref()
    }

    pub(crate) fn current(&self) -> Result<&DynamicImage> {
        self.current
            .as_ref()
            .ok_or_else(|| Error::operation("image handle is closed"))
    }

    /// Take the current image out for a transform, leaving the handle empty
    /// until [`rebind`](Self::rebind).
    pub(crate) fn take_current(&mut self) -> Result<DynamicImage> {
        self.current
            .take()
            .ok_or_else(|| Error::operation("image handle is closed"))
    }

    pub(crate) fn rebind(&mut self, image: DynamicImage) {
        self.current = Some(image);
    }
}
