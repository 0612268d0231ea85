//! Scan results cross-checked against an independent brute-force reference.
//!
//! The reference evaluates the textbook formula directly, subtracting the
//! window mean explicitly, so it shares no arithmetic shortcuts with the
//! implementation under test.

use graymatch::{best_score_scalar, score_at, ImageView, TemplatePlan};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_image(rng: &mut StdRng, width: usize, height: usize) -> Vec<u8> {
    (0..width * height).map(|_| rng.random()).collect()
}

fn extract_patch(
    image: &[u8],
    img_width: usize,
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let row = (y0 + y) * img_width;
        for x in 0..width {
            out.push(image[row + x0 + x]);
        }
    }
    out
}

fn reference_best(
    scene: &[u8],
    scene_width: usize,
    scene_height: usize,
    tpl: &[u8],
    tpl_width: usize,
    tpl_height: usize,
) -> f64 {
    let n = (tpl_width * tpl_height) as f64;
    let mean_t = tpl.iter().map(|&v| v as f64).sum::<f64>() / n;
    let var_t: f64 = tpl
        .iter()
        .map(|&v| {
            let d = v as f64 - mean_t;
            d * d
        })
        .sum();

    let mut best = f64::NEG_INFINITY;
    for y in 0..=(scene_height - tpl_height) {
        for x in 0..=(scene_width - tpl_width) {
            let mut sum_s = 0.0f64;
            for ty in 0..tpl_height {
                for tx in 0..tpl_width {
                    sum_s += scene[(y + ty) * scene_width + x + tx] as f64;
                }
            }
            let mean_s = sum_s / n;

            let mut dot = 0.0f64;
            let mut var_s = 0.0f64;
            for ty in 0..tpl_height {
                for tx in 0..tpl_width {
                    let t = tpl[ty * tpl_width + tx] as f64 - mean_t;
                    let s = scene[(y + ty) * scene_width + x + tx] as f64 - mean_s;
                    dot += t * s;
                    var_s += s * s;
                }
            }

            let coeff = if var_t <= 1e-8 || var_s <= 1e-8 {
                0.0
            } else {
                dot / (var_t * var_s).sqrt()
            };
            if coeff > best {
                best = coeff;
            }
        }
    }
    best
}

#[test]
fn scan_matches_bruteforce_on_random_images() {
    for seed in [7u64, 19, 1234] {
        let mut rng = StdRng::seed_from_u64(seed);
        let scene_width = 24;
        let scene_height = 18;
        let tpl_width = 6;
        let tpl_height = 5;
        let scene = random_image(&mut rng, scene_width, scene_height);
        let tpl = random_image(&mut rng, tpl_width, tpl_height);

        let scene_view = ImageView::from_slice(&scene, scene_width, scene_height).unwrap();
        let tpl_view = ImageView::from_slice(&tpl, tpl_width, tpl_height).unwrap();
        let plan = TemplatePlan::from_view(tpl_view).unwrap();

        let got = best_score_scalar(scene_view, &plan).unwrap();
        let expected = reference_best(
            &scene,
            scene_width,
            scene_height,
            &tpl,
            tpl_width,
            tpl_height,
        );
        assert!(
            (got - expected).abs() < 1e-9,
            "seed {seed}: got {got}, expected {expected}"
        );
    }
}

#[test]
fn embedded_patch_scores_one_at_its_offset() {
    let mut rng = StdRng::seed_from_u64(42);
    let scene_width = 30;
    let scene_height = 20;
    let scene = random_image(&mut rng, scene_width, scene_height);
    let tpl = extract_patch(&scene, scene_width, 11, 6, 7, 5);

    let scene_view = ImageView::from_slice(&scene, scene_width, scene_height).unwrap();
    let tpl_view = ImageView::from_slice(&tpl, 7, 5).unwrap();
    let plan = TemplatePlan::from_view(tpl_view).unwrap();

    assert!((score_at(scene_view, &plan, 11, 6) - 1.0).abs() < 1e-9);
    let best = best_score_scalar(scene_view, &plan).unwrap();
    assert!((best - 1.0).abs() < 1e-9);
}

#[test]
fn brightness_shifted_patch_still_scores_one() {
    let mut rng = StdRng::seed_from_u64(99);
    let scene_width = 16;
    let scene_height = 12;
    // Keep samples small enough that the affine shift cannot saturate u8.
    let scene: Vec<u8> = (0..scene_width * scene_height)
        .map(|_| rng.random_range(0..100u8))
        .collect();
    let patch = extract_patch(&scene, scene_width, 4, 3, 5, 4);
    let tpl: Vec<u8> = patch.iter().map(|&v| v * 2 + 10).collect();

    let scene_view = ImageView::from_slice(&scene, scene_width, scene_height).unwrap();
    let tpl_view = ImageView::from_slice(&tpl, 5, 4).unwrap();
    let plan = TemplatePlan::from_view(tpl_view).unwrap();

    let best = best_score_scalar(scene_view, &plan).unwrap();
    assert!((best - 1.0).abs() < 1e-9, "got {best}");
}

#[test]
fn scores_stay_within_unit_interval() {
    for seed in [3u64, 11, 29, 57] {
        let mut rng = StdRng::seed_from_u64(seed);
        let scene = random_image(&mut rng, 20, 14);
        let tpl = random_image(&mut rng, 4, 4);

        let scene_view = ImageView::from_slice(&scene, 20, 14).unwrap();
        let tpl_view = ImageView::from_slice(&tpl, 4, 4).unwrap();
        let plan = TemplatePlan::from_view(tpl_view).unwrap();

        let best = best_score_scalar(scene_view, &plan).unwrap();
        assert!((-1.0..=1.0).contains(&best), "seed {seed}: {best}");
    }
}
