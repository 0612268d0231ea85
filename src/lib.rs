//! GrayMatch scores the similarity of two grayscale images with
//! single-scale ZNCC template matching.
//!
//! The smaller image (the template) is slid over every valid placement in
//! the larger one (the scene); each window is scored with the zero-normalized
//! cross-correlation coefficient and the best placement's score is returned.
//! Scores lie in `[-1, 1]`, with `1.0` denoting a perfect linear match.
//! Optional row parallelism is available via the `rayon` feature and disk
//! decoding via the `image-io` feature.

pub mod image;
pub mod matcher;
pub mod search;
pub mod template;
mod trace;
pub mod util;

pub use image::{GrayImage, ImageView};
pub use matcher::{match_images, match_images_with, MatchConfig};
pub use template::TemplatePlan;
pub use util::{GrayMatchError, GrayMatchResult, ImageRole};

pub use search::scan::{best_score_scalar, score_at};

#[cfg(feature = "rayon")]
pub use search::rayon::best_score_par;

#[cfg(feature = "image-io")]
pub use image::io;
