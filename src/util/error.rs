//! Error types for graymatch.

use std::fmt;

use thiserror::Error;

/// Result alias for graymatch operations.
pub type GrayMatchResult<T> = std::result::Result<T, GrayMatchError>;

/// Names the side of a match request an input image belongs to.
///
/// The template is the pattern searched for (`image1` at the boundary); the
/// scene is the image searched within (`image2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRole {
    Template,
    Scene,
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRole::Template => f.write_str("template"),
            ImageRole::Scene => f.write_str("scene"),
        }
    }
}

/// Errors that can occur when comparing images.
#[derive(Debug, Error, PartialEq)]
pub enum GrayMatchError {
    /// The named input could not be decoded to a non-empty grayscale grid.
    #[error("failed to decode {role} image: {reason}")]
    DecodeFailure { role: ImageRole, reason: String },
    /// The template does not fit within the scene.
    #[error(
        "template ({template_width}x{template_height}) does not fit in \
         scene ({scene_width}x{scene_height})"
    )]
    SizeMismatch {
        template_width: usize,
        template_height: usize,
        scene_width: usize,
        scene_height: usize,
    },
    /// The width/height pair cannot describe a valid image buffer.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer is shorter than the view requires.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
}
