//! Gradient engines for a normalized isotropic Gaussian density, plus the
//! pieces of a micro-benchmark harness that compares them.
//!
//! Two engines compute `∂f/∂point` and `∂f/∂center` for the forward model
//! in [`density`]:
//!
//! - [`TapeEngine`] records the forward evaluation on a reverse-mode tape
//!   and replays it backward (stands in for a build-time
//!   source-transformation tool).
//! - [`AdjointEngine`] is the hand-derived reverse-mode adjoint, with an
//!   explicit checkpoint stack for the overwritten forward intermediate.
//!
//! The benchmark binary generates a random [`SampleBatch`], runs each
//! engine over it while timing, and diffs the leading outputs for
//! agreement within a tight relative tolerance.
//!
//! ```
//! use gauss_ad::{run_batch, AdjointEngine, GradientBuffers, SampleBatch, TapeEngine};
//!
//! let batch = SampleBatch::generate(8, 3)?;
//! let mut out = GradientBuffers::zeros(batch.len(), batch.dim())?;
//!
//! run_batch(&mut TapeEngine::new(), &batch, &mut out);
//! let tape_d_points = out.d_points.clone();
//!
//! run_batch(&mut AdjointEngine::new(), &batch, &mut out);
//! assert_eq!(tape_d_points.len(), out.d_points.len());
//! # Ok::<(), gauss_ad::BatchError>(())
//! ```

pub mod batch;
pub mod compare;
pub mod density;
pub mod gradients;
pub mod memory;
pub mod timing;

pub use batch::{BatchError, GradientBuffers, SampleBatch};
pub use compare::{LeadingSnapshot, Mismatch, COMPARE_LIMIT, DIFF_MAX_RELATIVE};
pub use density::{density, norm_constant};
pub use gradients::{run_batch, AdjointEngine, GradientEngine, TapeEngine};
pub use timing::{time_us, BenchTiming, EngineTiming};
