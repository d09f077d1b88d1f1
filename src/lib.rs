//! # bufimg
//!
//! An in-memory image pipeline: sniff a byte buffer's format from its magic
//! bytes, decode it into a handle, apply transforms (resize, crop, canvas
//! extend), and re-encode to a byte buffer in a requested format. No paths,
//! no I/O — buffers in, buffers out. Host applications own the surrounding
//! storage and transport concerns.
//!
//! # Typical Flow
//!
//! ```no_run
//! use bufimg::{ExportParams, ImageHandle, ImageType, Kernel, StartupConfig};
//!
//! # fn run(buf: Vec<u8>) -> bufimg::Result<()> {
//! bufimg::startup(&StartupConfig::default());
//!
//! let mut img = ImageHandle::open(buf)?;
//! img.resize(0.5, 0.5, Kernel::Lanczos3)?;
//! let jpeg = img.save(&ExportParams {
//!     format: ImageType::Jpeg,
//!     quality: 80,
//!     ..Default::default()
//! })?;
//! img.close();
//! # Ok(())
//! # }
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`startup`](mod@startup) | One-time process-wide engine initialization and settings |
//! | [`config`] | [`StartupConfig`] and resolution of unset fields to defaults |
//! | [`registry`] | Which codecs are compiled into this build, probed once |
//! | [`sniff`] | Pure magic-byte format classification |
//! | [`handle`] | [`ImageHandle`] — decode, lifecycle, explicit close |
//! | [`ops`] | Transforms: resize, crop, extend, alpha query |
//! | [`export`] | Encode a handle back to bytes with [`ExportParams`] |
//! | [`types`] | Closed enums: format, kernel, compass direction, fill policy |
//! | [`error`] | [`Error`] — unsupported format or failed engine operation |
//!
//! # Design Decisions
//!
//! ## Pure-Rust Engine
//!
//! All pixel work goes through the `image` crate — pure Rust decoders and
//! encoders for JPEG, PNG, TIFF, and WebP, statically linked. There is no
//! system library to install and no version skew between machines. TIFF and
//! WebP are cargo features (on by default); the [`registry`] probes at first
//! use which codecs actually made it into the build, and the sniffer refuses
//! to classify a format whose codec is absent.
//!
//! ## Handles Are Mutable Cells
//!
//! An [`ImageHandle`] is a mutable cell holding the *current* decoded image.
//! Each transform swaps the cell's contents and discards the previous state,
//! so a chain of transforms reads as operations on logically one image. A
//! failed transform leaves the handle empty — treat it as unusable and open a
//! fresh one. Handles are not synchronized; concurrent mutation of one handle
//! needs external locking, or one handle per task.
//!
//! ## Explicit Close, Drop as Backstop
//!
//! `close()` is the primary contract: it releases the decoded pixels and the
//! retained source buffer, and it is idempotent. Dropping an unclosed handle
//! releases the same resources, so nothing leaks if a caller forgets — but
//! code that cares about peak memory should close as soon as it is done.

pub mod config;
pub mod error;
pub mod export;
pub mod handle;
pub mod ops;
pub mod registry;
pub mod sniff;
pub mod startup;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::StartupConfig;
pub use error::{Error, Result};
pub use handle::ImageHandle;
pub use sniff::determine_image_type;
pub use startup::{effective_settings, is_running, startup};
pub use types::{CompassDirection, ExportParams, Extend, ImageType, Kernel};
