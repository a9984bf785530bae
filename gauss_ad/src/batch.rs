//! Sample batch generation and gradient output buffers.
//!
//! A batch holds `n` independent `(point, center, bandwidth)` samples of
//! dimension `dim`, stored as flat buffers so both engines iterate the same
//! memory layout. The batch is generated once, unseeded, and read-only
//! afterwards; gradient buffers are allocated once and overwritten in place
//! by each engine pass.

use rand::distributions::Uniform;
use rand::prelude::*;
use thiserror::Error;

/// Errors from batch construction.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("batch size overflow: {n} samples of dimension {dim} exceeds the index range")]
    SizeOverflow { n: usize, dim: usize },
}

/// A batch of random samples, flat-stored.
#[derive(Debug)]
pub struct SampleBatch {
    points: Vec<f64>,
    centers: Vec<f64>,
    bandwidths: Vec<f64>,
    n: usize,
    dim: usize,
}

impl SampleBatch {
    /// Generate `n` samples of dimension `dim` from an unseeded RNG.
    ///
    /// Coordinates are uniform in [0, 100); bandwidths are uniform in
    /// [1, 100) so every sample satisfies the `bandwidth > 0` precondition
    /// of the forward model.
    ///
    /// Fails without allocating if `n * dim` overflows `usize`.
    pub fn generate(n: usize, dim: usize) -> Result<Self, BatchError> {
        let total = n
            .checked_mul(dim)
            .ok_or(BatchError::SizeOverflow { n, dim })?;

        let mut rng = rand::thread_rng();
        let coord = Uniform::new(0.0, 100.0);
        let width = Uniform::new(1.0, 100.0);

        let points = (0..total).map(|_| coord.sample(&mut rng)).collect();
        let centers = (0..total).map(|_| coord.sample(&mut rng)).collect();
        let bandwidths = (0..n).map(|_| width.sample(&mut rng)).collect();

        Ok(Self {
            points,
            centers,
            bandwidths,
            n,
            dim,
        })
    }

    /// Build a batch from pre-filled buffers. Lengths must match `n`/`dim`.
    pub fn from_parts(
        points: Vec<f64>,
        centers: Vec<f64>,
        bandwidths: Vec<f64>,
        dim: usize,
    ) -> Result<Self, BatchError> {
        let n = bandwidths.len();
        let total = n
            .checked_mul(dim)
            .ok_or(BatchError::SizeOverflow { n, dim })?;
        assert_eq!(points.len(), total);
        assert_eq!(centers.len(), total);

        Ok(Self {
            points,
            centers,
            bandwidths,
            n,
            dim,
        })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Point coordinates of sample `i`.
    pub fn point(&self, i: usize) -> &[f64] {
        &self.points[i * self.dim..(i + 1) * self.dim]
    }

    /// Center coordinates of sample `i`.
    pub fn center(&self, i: usize) -> &[f64] {
        &self.centers[i * self.dim..(i + 1) * self.dim]
    }

    /// Bandwidth of sample `i`.
    pub fn bandwidth(&self, i: usize) -> f64 {
        self.bandwidths[i]
    }

    /// Bytes held by the input buffers.
    pub fn input_bytes(&self) -> usize {
        (self.points.len() + self.centers.len() + self.bandwidths.len())
            * std::mem::size_of::<f64>()
    }
}

/// Flat output buffers for per-sample `(d_point, d_center)` pairs.
///
/// Both engines overwrite these in place; the harness snapshots the leading
/// entries between passes for the comparison.
#[derive(Debug)]
pub struct GradientBuffers {
    pub d_points: Vec<f64>,
    pub d_centers: Vec<f64>,
    dim: usize,
}

impl GradientBuffers {
    /// Allocate zeroed buffers sized for a batch.
    pub fn zeros(n: usize, dim: usize) -> Result<Self, BatchError> {
        let total = n
            .checked_mul(dim)
            .ok_or(BatchError::SizeOverflow { n, dim })?;

        Ok(Self {
            d_points: vec![0.0; total],
            d_centers: vec![0.0; total],
            dim,
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Mutable `(d_point, d_center)` slices for sample `i`.
    pub fn sample_mut(&mut self, i: usize) -> (&mut [f64], &mut [f64]) {
        let s = i * self.dim;
        let e = s + self.dim;
        (&mut self.d_points[s..e], &mut self.d_centers[s..e])
    }

    /// Bytes held by the output buffers.
    pub fn output_bytes(&self) -> usize {
        (self.d_points.len() + self.d_centers.len()) * std::mem::size_of::<f64>()
    }
}
