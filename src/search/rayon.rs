//! Row-parallel dense scan (feature-gated).
//!
//! Each worker scans whole rows of placements with the same per-window
//! arithmetic as the scalar scan, and row maxima are merged in row order,
//! so the result is bit-identical to [`best_score_scalar`].
//!
//! [`best_score_scalar`]: crate::search::scan::best_score_scalar

use rayon::prelude::*;

use crate::image::ImageView;
use crate::search::scan::window_coeff;
use crate::template::TemplatePlan;
use crate::trace::{trace_event, trace_span};
use crate::util::{GrayMatchError, GrayMatchResult};

/// Scans the full placement range in parallel over rows and returns the
/// best coefficient.
pub fn best_score_par(scene: ImageView<'_, u8>, plan: &TemplatePlan) -> GrayMatchResult<f64> {
    let scene_width = scene.width();
    let scene_height = scene.height();
    let tpl_width = plan.width();
    let tpl_height = plan.height();

    if scene_width < tpl_width || scene_height < tpl_height {
        return Err(GrayMatchError::SizeMismatch {
            template_width: tpl_width,
            template_height: tpl_height,
            scene_width,
            scene_height,
        });
    }

    let _span = trace_span!(
        "dense_scan_par",
        scene_w = scene_width,
        scene_h = scene_height,
        tpl_w = tpl_width,
        tpl_h = tpl_height
    )
    .entered();

    if plan.is_flat() {
        return Ok(0.0);
    }

    let max_x = scene_width - tpl_width;
    let max_y = scene_height - tpl_height;

    let row_maxima: Vec<f64> = (0..=max_y)
        .into_par_iter()
        .map(|y| {
            let mut row_best = f64::NEG_INFINITY;
            for x in 0..=max_x {
                let coeff = window_coeff(scene, plan, x, y);
                if coeff > row_best {
                    row_best = coeff;
                }
            }
            row_best
        })
        .collect();

    let mut best = f64::NEG_INFINITY;
    for value in row_maxima {
        if value > best {
            best = value;
        }
    }

    trace_event!("dense_scan_par_done", best = best);
    Ok(best)
}
