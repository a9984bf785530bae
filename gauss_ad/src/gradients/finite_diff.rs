//! Central-difference reference gradients for verifying the engines.

/// Compute a gradient by central finite differences.
///
/// # Arguments
/// * `f` - Scalar function of the full coordinate slice
/// * `at` - Point at which to differentiate
/// * `step` - Perturbation size (1e-7..1e-5 is a reasonable range for f64)
///
/// The error of the central scheme is O(step²) in exact arithmetic.
pub fn central_diff<F>(f: F, at: &[f64], step: f64) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let mut perturbed = at.to_vec();
    let mut grad = Vec::with_capacity(at.len());

    for i in 0..at.len() {
        perturbed[i] = at[i] + step;
        let plus = f(&perturbed);
        perturbed[i] = at[i] - step;
        let minus = f(&perturbed);
        perturbed[i] = at[i];

        grad.push((plus - minus) / (2.0 * step));
    }

    grad
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_central_diff_quadratic() {
        // f(x, y) = x² + 2xy, ∇f = (2x + 2y, 2x)
        let f = |v: &[f64]| v[0] * v[0] + 2.0 * v[0] * v[1];
        let grad = central_diff(f, &[3.0, 4.0], 1e-6);
        assert_relative_eq!(grad[0], 14.0, epsilon = 1e-6);
        assert_relative_eq!(grad[1], 6.0, epsilon = 1e-6);
    }

    #[test]
    fn test_central_diff_exponential() {
        let f = |v: &[f64]| (-v[0] * v[0]).exp();
        let grad = central_diff(f, &[0.5], 1e-6);
        let expected = -2.0 * 0.5 * (-0.25f64).exp();
        assert_relative_eq!(grad[0], expected, epsilon = 1e-8);
    }
}
