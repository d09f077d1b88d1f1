//! Error types shared across the pipeline.
//!
//! Two kinds cover everything: a buffer or export request naming a format
//! this build cannot handle, and an engine operation that failed. Engine
//! failures keep the engine's diagnostic message and capture a backtrace at
//! the failure site, so thread-pooled hosts get a usable trail without any
//! per-thread error state to drain.

use std::backtrace::Backtrace;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

// Alias so thiserror's derive does not detect the field as a `Backtrace` and
// emit the nightly-only `error_generic_member_access` provide impl.
type CapturedBacktrace = Backtrace;

#[derive(Error, Debug)]
pub enum Error {
    /// The buffer's magic bytes were not recognized, or the requested format's
    /// codec is not compiled into this build.
    #[error("unsupported image format")]
    UnsupportedFormat,

    /// A decode, transform, or encode failed inside the engine. The message
    /// is the engine's diagnostic; the backtrace points at the call site.
    #[error("{message}\nstack:\n{backtrace}")]
    OperationFailed {
        message: String,
        backtrace: CapturedBacktrace,
    },
}

impl Error {
    pub(crate) fn operation(message: impl Into<String>) -> Self {
        Error::OperationFailed {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::operation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_error_keeps_message() {
        let err = Error::operation("resize failed");
        assert!(err.to_string().starts_with("resize failed"));
    }

    #[test]
    fn image_error_translates_to_operation_failed() {
        let engine = image::ImageError::Unsupported(
            image::error::UnsupportedError::from_format_and_kind(
                image::error::ImageFormatHint::Unknown,
                image::error::UnsupportedErrorKind::GenericFeature("x".into()),
            ),
        );
        let err = Error::from(engine);
        assert!(matches!(err, Error::OperationFailed { .. }));
    }
}
