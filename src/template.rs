//! Template statistics precomputation.
//!
//! A [`TemplatePlan`] holds everything the scan needs from the template:
//! its dimensions, the zero-mean sample buffer and the variance sum
//! `Σ (T - mean(T))²`. Because the zero-mean samples sum to zero, the ZNCC
//! numerator reduces to a dot product of this buffer with raw window
//! samples, so the window mean never has to be subtracted explicitly.
//!
//! A flat template (zero variance) is a valid plan: every coefficient it
//! produces is defined as 0.0 rather than being rejected.

use crate::image::ImageView;
use crate::util::{GrayMatchError, GrayMatchResult};

/// Variance sums at or below this threshold are treated as flat.
pub(crate) const VAR_EPS: f64 = 1e-8;

/// Precomputed statistics and zero-mean buffer for ZNCC scans.
pub struct TemplatePlan {
    width: usize,
    height: usize,
    mean: f64,
    var_sum: f64,
    zero_mean: Vec<f64>,
}

impl TemplatePlan {
    /// Builds a plan from a non-empty template view.
    pub fn from_view(tpl: ImageView<'_, u8>) -> GrayMatchResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        if tpl.is_empty() {
            return Err(GrayMatchError::InvalidDimensions { width, height });
        }
        let count = width
            .checked_mul(height)
            .ok_or(GrayMatchError::InvalidDimensions { width, height })?;

        let mut sum = 0.0f64;
        let mut samples = Vec::with_capacity(count);
        for y in 0..height {
            let row = tpl.row(y).ok_or(GrayMatchError::BufferTooSmall {
                needed: count,
                got: tpl.as_slice().len(),
            })?;
            for &value in row {
                let v = value as f64;
                samples.push(v);
                sum += v;
            }
        }

        let mean = sum / count as f64;
        let mut var_sum = 0.0f64;
        let mut zero_mean = Vec::with_capacity(count);
        for v in samples {
            let d = v - mean;
            var_sum += d * d;
            zero_mean.push(d);
        }

        Ok(Self {
            width,
            height,
            mean,
            var_sum,
            zero_mean,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the mean intensity of the template.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the variance sum `Σ (T - mean(T))²`.
    pub fn var_sum(&self) -> f64 {
        self.var_sum
    }

    /// Returns true if the template has no usable variance.
    pub fn is_flat(&self) -> bool {
        self.var_sum <= VAR_EPS
    }

    /// Returns the zero-mean template buffer in row-major order.
    pub fn zero_mean(&self) -> &[f64] {
        &self.zero_mean
    }
}
