//! Validated image-comparison entry point.
//!
//! This is the contract the boundary adapter calls: two grayscale views in,
//! one similarity score or a structured failure out. Validation runs in a
//! fixed order with the first failure winning: empty template, empty scene,
//! then the fit check. No correlation work happens on a rejected request.

use crate::image::ImageView;
use crate::search::scan::best_score_scalar;
use crate::template::TemplatePlan;
use crate::trace::{trace_event, trace_span};
use crate::util::{GrayMatchError, GrayMatchResult, ImageRole};

/// Scan strategy selection for [`match_images_with`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchConfig {
    /// Use the row-parallel scan (no-op without the `rayon` feature).
    pub parallel: bool,
}

/// Compares a template against a scene with the default configuration.
///
/// Returns the maximum ZNCC coefficient over all placements of the template
/// inside the scene, in `[-1, 1]`. Pure function: no global state, no side
/// effects, deterministic for identical inputs.
pub fn match_images(
    template: ImageView<'_, u8>,
    scene: ImageView<'_, u8>,
) -> GrayMatchResult<f64> {
    match_images_with(template, scene, &MatchConfig::default())
}

/// Compares a template against a scene with an explicit configuration.
pub fn match_images_with(
    template: ImageView<'_, u8>,
    scene: ImageView<'_, u8>,
    cfg: &MatchConfig,
) -> GrayMatchResult<f64> {
    if template.is_empty() {
        return Err(empty_input(ImageRole::Template, template));
    }
    if scene.is_empty() {
        return Err(empty_input(ImageRole::Scene, scene));
    }
    if template.width() > scene.width() || template.height() > scene.height() {
        return Err(GrayMatchError::SizeMismatch {
            template_width: template.width(),
            template_height: template.height(),
            scene_width: scene.width(),
            scene_height: scene.height(),
        });
    }

    let _span = trace_span!(
        "match_images",
        tpl_w = template.width(),
        tpl_h = template.height(),
        scene_w = scene.width(),
        scene_h = scene.height(),
        parallel = cfg.parallel
    )
    .entered();

    let plan = TemplatePlan::from_view(template)?;
    let score = best_score(scene, &plan, cfg)?;
    trace_event!("match_score", score = score);
    Ok(score)
}

fn empty_input(role: ImageRole, view: ImageView<'_, u8>) -> GrayMatchError {
    GrayMatchError::DecodeFailure {
        role,
        reason: format!("image is empty ({}x{})", view.width(), view.height()),
    }
}

fn best_score(
    scene: ImageView<'_, u8>,
    plan: &TemplatePlan,
    cfg: &MatchConfig,
) -> GrayMatchResult<f64> {
    #[cfg(feature = "rayon")]
    if cfg.parallel {
        return crate::search::rayon::best_score_par(scene, plan);
    }
    let _ = cfg;
    best_score_scalar(scene, plan)
}
