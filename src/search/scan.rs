//! Scalar dense scan over all valid template placements.

use crate::image::ImageView;
use crate::template::{TemplatePlan, VAR_EPS};
use crate::trace::{trace_event, trace_span};
use crate::util::{GrayMatchError, GrayMatchResult};

/// Computes the ZNCC coefficient of the window anchored at `(x, y)`.
///
/// The placement must fully overlap the scene. A flat template or a flat
/// window yields 0.0, never NaN.
pub(crate) fn window_coeff(
    scene: ImageView<'_, u8>,
    plan: &TemplatePlan,
    x: usize,
    y: usize,
) -> f64 {
    if plan.is_flat() {
        return 0.0;
    }

    let tpl_width = plan.width();
    let tpl_height = plan.height();
    let t_prime = plan.zero_mean();
    let n = (tpl_width * tpl_height) as f64;

    let mut dot = 0.0f64;
    let mut sum_s = 0.0f64;
    let mut sum_s2 = 0.0f64;
    for ty in 0..tpl_height {
        let row = scene.row(y + ty).expect("row within bounds for scan");
        let base = ty * tpl_width;
        for tx in 0..tpl_width {
            let value = row[x + tx] as f64;
            dot += t_prime[base + tx] * value;
            sum_s += value;
            sum_s2 += value * value;
        }
    }

    // Window variance sum; the window mean term of the numerator vanishes
    // because the zero-mean template sums to zero.
    let var_s = sum_s2 - (sum_s * sum_s) / n;
    if var_s <= VAR_EPS {
        return 0.0;
    }

    let coeff = dot / (plan.var_sum() * var_s).sqrt();
    // Rounding can push the ratio a hair past the Cauchy-Schwarz bound.
    coeff.clamp(-1.0, 1.0)
}

/// Computes the score at a single placement (top-left coordinates).
///
/// Returns negative infinity for a placement that does not fully overlap
/// the scene.
pub fn score_at(scene: ImageView<'_, u8>, plan: &TemplatePlan, x: usize, y: usize) -> f64 {
    let scene_width = scene.width();
    let scene_height = scene.height();
    let tpl_width = plan.width();
    let tpl_height = plan.height();

    if scene_width < tpl_width || scene_height < tpl_height {
        return f64::NEG_INFINITY;
    }
    if x > scene_width - tpl_width || y > scene_height - tpl_height {
        return f64::NEG_INFINITY;
    }

    window_coeff(scene, plan, x, y)
}

/// Scans the full placement range and returns the best coefficient.
///
/// Ties keep the first-encountered maximum in row-major order; only the
/// score is observable.
pub fn best_score_scalar(scene: ImageView<'_, u8>, plan: &TemplatePlan) -> GrayMatchResult<f64> {
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
        "dense_scan",
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
    let mut best = f64::NEG_INFINITY;
    for y in 0..=max_y {
        for x in 0..=max_x {
            let coeff = window_coeff(scene, plan, x, y);
            if coeff > best {
                best = coeff;
            }
        }
    }

    trace_event!("dense_scan_done", best = best);
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::{best_score_scalar, score_at};
    use crate::template::TemplatePlan;
    use crate::ImageView;

    fn make_scene(width: usize, height: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(((x * 17 + y * 9 + x * y) & 0xFF) as u8);
            }
        }
        data
    }

    #[test]
    fn embedded_window_scores_one() {
        let scene_width = 7;
        let scene_height = 6;
        let scene = make_scene(scene_width, scene_height);
        let scene_view = ImageView::from_slice(&scene, scene_width, scene_height).unwrap();

        let x0 = 2;
        let y0 = 1;
        let tpl_width = 3;
        let tpl_height = 3;
        let mut tpl = Vec::with_capacity(tpl_width * tpl_height);
        for y in 0..tpl_height {
            for x in 0..tpl_width {
                tpl.push(scene[(y0 + y) * scene_width + x0 + x]);
            }
        }
        let tpl_view = ImageView::from_slice(&tpl, tpl_width, tpl_height).unwrap();
        let plan = TemplatePlan::from_view(tpl_view).unwrap();

        assert!((score_at(scene_view, &plan, x0, y0) - 1.0).abs() < 1e-9);

        let best = best_score_scalar(scene_view, &plan).unwrap();
        assert!((best - 1.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_placement_scores_negative_infinity() {
        let scene = make_scene(4, 4);
        let scene_view = ImageView::from_slice(&scene, 4, 4).unwrap();
        let tpl = make_scene(3, 3);
        let tpl_view = ImageView::from_slice(&tpl, 3, 3).unwrap();
        let plan = TemplatePlan::from_view(tpl_view).unwrap();

        assert_eq!(score_at(scene_view, &plan, 2, 0), f64::NEG_INFINITY);
        assert_eq!(score_at(scene_view, &plan, 0, 2), f64::NEG_INFINITY);
        assert!(score_at(scene_view, &plan, 1, 1).is_finite());
    }
}
