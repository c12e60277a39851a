//! Error types for synthesis and file operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all synthesis operations
#[derive(Debug)]
pub enum SynthError {
    /// Failed to load an input image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to save a synthesized image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// Inputs do not meet engine requirements
    ///
    /// Raised for an empty corpus, an empty set of pixels to synthesize,
    /// or mismatched buffer and mask dimensions. No work is performed.
    InvalidInput {
        /// Description of what is wrong with the input
        reason: String,
    },

    /// Channel count outside the supported 1–4 range
    UnsupportedChannels {
        /// The channel count that was supplied
        channels: usize,
    },

    /// A cancel token was set while the run was in progress
    ///
    /// The output buffer holds a partial but well-formed image; every
    /// position visited before cancellation has been committed.
    Cancelled {
        /// Plan entries that had not yet been visited
        remaining: usize,
    },
}

impl fmt::Display for SynthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidInput { reason } => {
                write!(f, "Invalid input: {reason}")
            }
            Self::UnsupportedChannels { channels } => {
                write!(f, "Unsupported channel count {channels} (supported: 1-4)")
            }
            Self::Cancelled { remaining } => {
                write!(f, "Synthesis cancelled with {remaining} positions unvisited")
            }
        }
    }
}

impl std::error::Error for SynthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for synthesis results
pub type Result<T> = std::result::Result<T, SynthError>;

/// Create an invalid input error
pub fn invalid_input(reason: &impl ToString) -> SynthError {
    SynthError::InvalidInput {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_the_reason() {
        let err = invalid_input(&"corpus is empty");
        assert!(err.to_string().contains("corpus is empty"));
    }

    #[test]
    fn test_image_errors_expose_their_source() {
        use std::error::Error;
        let err = SynthError::ImageLoad {
            path: PathBuf::from("missing.png"),
            source: image::ImageError::IoError(std::io::Error::other("no such file")),
        };
        assert!(err.source().is_some());
    }
}
