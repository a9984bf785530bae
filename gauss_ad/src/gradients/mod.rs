//! Gradient computation for the Gaussian density benchmark.
//!
//! Two engines differentiate the same forward model:
//!
//! - Score function: `f(x, p, σ) = (2π)^(−dim/2)·σ^(−1/2)·exp(−‖x−p‖²/(2σ²))`
//! - Gradient: `∂f/∂xᵢ = −f·(xᵢ−pᵢ)/σ²`, `∂f/∂pᵢ = −∂f/∂xᵢ`
//!
//! [`tape::TapeEngine`] records the forward evaluation and replays it
//! backward; [`adjoint::AdjointEngine`] is the hand-derived reverse pass.
//! Both are deterministic closed-form computations over the same inputs;
//! the harness diffs their outputs at a tolerance tight enough that only
//! logic divergence, not accumulation-order rounding, is reported.

pub mod adjoint;
pub mod finite_diff;
pub mod tape;
pub mod types;

pub use adjoint::{AdjointEngine, CheckpointStack};
pub use tape::{Tape, TapeEngine};
pub use types::GradientEngine;

use crate::batch::{GradientBuffers, SampleBatch};

/// Run one engine over the whole batch, overwriting `out` in place.
pub fn run_batch(engine: &mut dyn GradientEngine, batch: &SampleBatch, out: &mut GradientBuffers) {
    debug_assert_eq!(batch.dim(), out.dim());
    for i in 0..batch.len() {
        let (d_point, d_center) = out.sample_mut(i);
        engine.sample_gradient(
            batch.point(i),
            batch.center(i),
            batch.bandwidth(i),
            d_point,
            d_center,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::prelude::*;
    use rand_distr::Normal;

    fn random_batch(n: usize, dim: usize) -> SampleBatch {
        let mut rng = rand::thread_rng();
        let coord = Normal::new(0.0, 10.0).unwrap();

        let points = (0..n * dim).map(|_| coord.sample(&mut rng)).collect();
        let centers = (0..n * dim).map(|_| coord.sample(&mut rng)).collect();
        let bandwidths = (0..n).map(|_| rng.gen_range(0.5..20.0)).collect();

        SampleBatch::from_parts(points, centers, bandwidths, dim).unwrap()
    }

    #[test]
    fn test_engines_agree_across_dims() {
        // Both engines differentiate the same closed form; outputs must
        // agree to within floating-point rounding for any valid sample.
        for dim in [1, 2, 7, 32] {
            let batch = random_batch(50, dim);
            let mut tape_out = GradientBuffers::zeros(batch.len(), dim).unwrap();
            let mut adjoint_out = GradientBuffers::zeros(batch.len(), dim).unwrap();

            run_batch(&mut TapeEngine::new(), &batch, &mut tape_out);
            run_batch(&mut AdjointEngine::new(), &batch, &mut adjoint_out);

            for (a, b) in tape_out.d_points.iter().zip(&adjoint_out.d_points) {
                assert_relative_eq!(*a, *b, epsilon = 1e-12, max_relative = 1e-12);
            }
            for (a, b) in tape_out.d_centers.iter().zip(&adjoint_out.d_centers) {
                assert_relative_eq!(*a, *b, epsilon = 1e-12, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_run_batch_empty() {
        let batch = SampleBatch::generate(0, 3).unwrap();
        let mut out = GradientBuffers::zeros(0, 3).unwrap();
        run_batch(&mut AdjointEngine::new(), &batch, &mut out);
        assert!(out.d_points.is_empty());
    }

    #[test]
    fn test_antisymmetry_holds_for_both_engines() {
        let batch = random_batch(20, 3);
        for engine in [
            &mut TapeEngine::new() as &mut dyn GradientEngine,
            &mut AdjointEngine::new(),
        ] {
            let mut out = GradientBuffers::zeros(batch.len(), batch.dim()).unwrap();
            run_batch(engine, &batch, &mut out);
            for (dp, dc) in out.d_points.iter().zip(&out.d_centers) {
                assert_relative_eq!(*dp, -*dc, epsilon = 1e-12, max_relative = 1e-12);
            }
        }
    }
}
