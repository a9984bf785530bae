//! Engine B: hand-derived reverse-mode adjoint of the forward model.
//!
//! The forward computation is
//!
//! `t = Σᵢ (xᵢ−pᵢ)²;  u = −t/(2σ²);  retval = C·σ^(−1/2)·exp(u)`
//!
//! with `C = (2π)^(−dim/2)`. The reverse pass, seeded with
//! `retval_bar = 1`, accumulates:
//!
//! - `σ_bar = −0.5·C·σ^(−1.5)·exp(u)` (direct dependency of retval on σ),
//!   plus `t·(∂u/∂σ)` recovered from the checkpointed `t`
//! - `t_bar = −u_bar/(2σ²)`
//! - `x_bar[i] += 2(xᵢ−pᵢ)·t_bar`, `p_bar[i] −= 2(xᵢ−pᵢ)·t_bar`
//!
//! `t` is overwritten in place during the forward sweep, so its primal
//! value is saved on an explicit checkpoint stack and restored in the
//! backward sweep. One scalar would fit in a local here; the push/pop
//! discipline is kept because it is the general mechanism a reverse-mode
//! engine uses for every overwritten intermediate.
//!
//! The bandwidth adjoint is fully computed and then dropped; the benchmark
//! only tracks the point and center gradients.

use crate::density::norm_constant;
use crate::gradients::types::GradientEngine;

/// Stack of primal values saved during the forward sweep for reuse in the
/// backward sweep.
#[derive(Debug, Default)]
pub struct CheckpointStack {
    saved: Vec<f64>,
}

impl CheckpointStack {
    pub fn push(&mut self, value: f64) {
        self.saved.push(value);
    }

    pub fn pop(&mut self) -> Option<f64> {
        self.saved.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}

/// Gradient engine running the hand-derived adjoint per sample.
#[derive(Debug, Default)]
pub struct AdjointEngine {
    saved: CheckpointStack,
}

impl AdjointEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GradientEngine for AdjointEngine {
    fn name(&self) -> &'static str {
        "adjoint"
    }

    fn sample_gradient(
        &mut self,
        point: &[f64],
        center: &[f64],
        bandwidth: f64,
        d_point: &mut [f64],
        d_center: &mut [f64],
    ) {
        let dim = point.len();
        let sigma = bandwidth;
        let retval_bar = 1.0;

        // Forward sweep. t is overwritten in place, so checkpoint it first.
        let mut t = 0.0;
        for i in 0..dim {
            let d = point[i] - center[i];
            t += d * d;
        }
        self.saved.push(t);
        let t_exp = -t / (2.0 * sigma * sigma);

        // Backward sweep.
        let temp_bar = norm_constant(dim) * retval_bar;
        let mut sigma_bar = -(0.5 * sigma.powf(-1.5) * t_exp.exp() * temp_bar);
        let mut t_bar = t_exp.exp() * sigma.powf(-0.5) * temp_bar;

        // Restore the pre-overwrite t to account for u's dependency on σ.
        let t = self
            .saved
            .pop()
            .expect("checkpoint pushed during forward sweep");
        let temp = 2.0 * (sigma * sigma);
        sigma_bar += 2.0 * 2.0 * sigma * t * t_bar / (temp * temp);
        t_bar = -(t_bar / temp);

        // Bandwidth partial is discarded by the benchmark.
        let _ = sigma_bar;

        // += accumulation below supports multiple downstream seeds, so the
        // outputs must start from zero.
        d_point.fill(0.0);
        d_center.fill(0.0);
        for i in (0..dim).rev() {
            let temp_bar = 2.0 * (point[i] - center[i]) * t_bar;
            d_point[i] += temp_bar;
            d_center[i] -= temp_bar;
        }
    }
}
