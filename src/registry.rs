//! Which codecs are compiled into this build.
//!
//! TIFF and WebP are cargo features, and a dependency tree elsewhere in the
//! final binary can enable engine codecs this crate did not ask for. What
//! matters at runtime is what the linked build can actually do, so support is
//! probed from the engine itself — once, at first use, never invalidated.
//! JPEG and PNG are unconditional; the probe still records them so the
//! support table covers every format uniformly.

use crate::types::ImageType;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Loader names accepted by [`type_for_name`]: canonical codec names plus the
/// file extensions hosts commonly hand us.
const LOADER_NAMES: &[(&str, ImageType)] = &[
    ("jpeg", ImageType::Jpeg),
    ("jpg", ImageType::Jpeg),
    ("png", ImageType::Png),
    ("tiff", ImageType::Tiff),
    ("tif", ImageType::Tiff),
    ("webp", ImageType::WebP),
];

static SUPPORT: LazyLock<HashMap<ImageType, bool>> = LazyLock::new(probe);

fn probe() -> HashMap<ImageType, bool> {
    let mut support = HashMap::new();
    for ty in ImageType::ALL {
        let enabled = ty
            .engine_format()
            .is_some_and(|format| format.reading_enabled() && format.writing_enabled());
        tracing::debug!(format = ty.name(), supported = enabled, "registered image type");
        support.insert(ty, enabled);
    }
    support
}

/// Force the one-time codec probe. Called from [`startup`](crate::startup());
/// subsequent calls are no-ops. Lookups that happen before any startup run
/// the probe themselves, so the table is never observed uninitialized.
pub fn init_types() {
    LazyLock::force(&SUPPORT);
}

/// Whether this build can decode and encode the given format.
///
/// A pure table lookup after the probe. `Unknown` is never supported.
pub fn is_type_supported(ty: ImageType) -> bool {
    SUPPORT.get(&ty).copied().unwrap_or(false)
}

/// Look up a format by loader name or file extension, case-insensitive.
///
/// The lookup covers all known names regardless of build support; gate on
/// [`is_type_supported`] separately when support matters.
pub fn type_for_name(name: &str) -> Option<ImageType> {
    LOADER_NAMES
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|&(_, ty)| ty)
}
