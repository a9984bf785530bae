//! Comparison of engine outputs.
//!
//! The gradient buffers are shared between the two engine passes, so the
//! harness snapshots the leading flat entries after the first pass and
//! diffs them against the buffers after the second. Both engines are
//! deterministic closed-form formulas on the same inputs, but they
//! accumulate the same partials in different multiplication orders, so
//! agreement is checked with a tight relative tolerance: wide enough to
//! absorb ULP-level rounding, orders of magnitude tighter than any logic
//! divergence the diff exists to catch.

use crate::batch::GradientBuffers;
use approx::relative_eq;

/// Number of leading flat gradient entries diffed between the engines,
/// matching the reference harness.
pub const COMPARE_LIMIT: usize = 100;

/// Relative tolerance for the engine diff.
pub const DIFF_MAX_RELATIVE: f64 = 1e-12;

/// True when two gradient entries agree up to accumulation-order rounding.
fn values_match(a: f64, b: f64) -> bool {
    relative_eq!(a, b, epsilon = f64::EPSILON, max_relative = DIFF_MAX_RELATIVE)
}

/// One comparison failure, with both engines' values at the offending
/// flat index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mismatch {
    pub index: usize,
    pub lhs_point: f64,
    pub rhs_point: f64,
    pub lhs_center: f64,
    pub rhs_center: f64,
}

/// Snapshot of the leading flat entries of a gradient buffer pair.
#[derive(Debug, Clone)]
pub struct LeadingSnapshot {
    d_points: Vec<f64>,
    d_centers: Vec<f64>,
}

impl LeadingSnapshot {
    /// Copy out the first `min(limit, len)` flat entries.
    pub fn take(buffers: &GradientBuffers, limit: usize) -> Self {
        let end = limit.min(buffers.d_points.len());
        Self {
            d_points: buffers.d_points[..end].to_vec(),
            d_centers: buffers.d_centers[..end].to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.d_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.d_points.is_empty()
    }

    /// Diff the snapshot against the buffers' current contents.
    ///
    /// A flat entry mismatches when either its `d_point` or `d_center`
    /// value disagrees beyond [`DIFF_MAX_RELATIVE`].
    pub fn diff(&self, buffers: &GradientBuffers) -> Vec<Mismatch> {
        let mut mismatches = Vec::new();
        for i in 0..self.len() {
            let lhs_point = self.d_points[i];
            let lhs_center = self.d_centers[i];
            let rhs_point = buffers.d_points[i];
            let rhs_center = buffers.d_centers[i];

            if !values_match(lhs_point, rhs_point) || !values_match(lhs_center, rhs_center) {
                mismatches.push(Mismatch {
                    index: i,
                    lhs_point,
                    rhs_point,
                    lhs_center,
                    rhs_center,
                });
            }
        }
        mismatches
    }
}
