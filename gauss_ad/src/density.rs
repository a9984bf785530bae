//! Forward model: normalized isotropic Gaussian density.
//!
//! The density evaluated by this module, and differentiated by both
//! gradient engines, is:
//!
//! `f(x, p, σ) = (2π)^(−dim/2) · σ^(−1/2) · exp(−‖x − p‖² / (2σ²))`
//!
//! Note the `σ^(−1/2)` normalization. A textbook dim-dimensional Gaussian
//! would use `σ^(−dim/2)`; the reference formula this benchmark measures
//! does not, and the quirk is kept so that all engines differentiate the
//! same function.

use nalgebra::DVectorView;

/// Normalization constant `(2π)^(−dim/2)` shared by the forward model and
/// both gradient engines.
#[inline]
pub fn norm_constant(dim: usize) -> f64 {
    (2.0 * std::f64::consts::PI).powf(-(dim as f64) / 2.0)
}

/// Evaluate the density at one sample.
///
/// # Arguments
/// * `point` - Evaluation point, `dim` coordinates
/// * `center` - Distribution center, `dim` coordinates
/// * `bandwidth` - Scalar bandwidth σ
///
/// # Preconditions
/// `point` and `center` have equal length and `bandwidth > 0`. A
/// non-positive bandwidth is not guarded; the result is meaningless.
pub fn density(point: &[f64], center: &[f64], bandwidth: f64) -> f64 {
    debug_assert_eq!(point.len(), center.len());
    let dim = point.len();

    let x = DVectorView::from_slice(point, dim);
    let p = DVectorView::from_slice(center, dim);
    let t = (x - p).norm_squared();

    norm_constant(dim) * bandwidth.powf(-0.5) * (-t / (2.0 * bandwidth * bandwidth)).exp()
}
