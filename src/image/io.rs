//! Path-to-grayscale decoding via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. The decoder is the
//! boundary collaborator of the matcher: it maps a file path to a
//! [`GrayImage`] and reports every failure as a [`GrayMatchError::DecodeFailure`]
//! naming the input's role.

use std::path::Path;

use crate::image::GrayImage;
use crate::util::{GrayMatchError, GrayMatchResult, ImageRole};

/// Converts a decoded dynamic image to an owned 8-bit grayscale image.
pub fn gray_image_from_dynamic(
    role: ImageRole,
    img: &image::DynamicImage,
) -> GrayMatchResult<GrayImage> {
    let luma = img.to_luma8();
    let width = luma.width() as usize;
    let height = luma.height() as usize;
    if width == 0 || height == 0 {
        return Err(GrayMatchError::DecodeFailure {
            role,
            reason: format!("decoded to an empty image ({width}x{height})"),
        });
    }
    GrayImage::new(luma.into_raw(), width, height)
}

/// Loads an image from disk and converts it to 8-bit grayscale.
///
/// Open and decode errors are reported as decode failures carrying the
/// offending path.
pub fn load_gray_image<P: AsRef<Path>>(role: ImageRole, path: P) -> GrayMatchResult<GrayImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|err| GrayMatchError::DecodeFailure {
        role,
        reason: format!("{}: {err}", path.display()),
    })?;
    gray_image_from_dynamic(role, &img)
}
