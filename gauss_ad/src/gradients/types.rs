//! Engine interface shared by the gradient implementations.

/// A strategy for computing the gradient of the forward model.
///
/// Implementations compute, for one sample, the partial derivatives of
/// [`density`](crate::density::density) with respect to every coordinate of
/// `point` and `center`. The partial with respect to `bandwidth` is
/// evaluated internally by every engine but deliberately not surfaced;
/// the benchmark does not track it.
///
/// Engines may keep reusable scratch state between calls, hence `&mut self`.
pub trait GradientEngine {
    /// Short name for reports and logs.
    fn name(&self) -> &'static str;

    /// Compute `d_point` and `d_center` for one sample.
    ///
    /// All four slices have the sample dimension as their length. Output
    /// slices are fully overwritten; callers need not clear them.
    ///
    /// # Preconditions
    /// `bandwidth > 0` (same as the forward model; not guarded).
    fn sample_gradient(
        &mut self,
        point: &[f64],
        center: &[f64],
        bandwidth: f64,
        d_point: &mut [f64],
        d_center: &mut [f64],
    );
}
