//! Exact interpolation and weighted smoothing spline fits.
//!
//! Both entry points build a clamped knot vector by Schoenberg-Whitney
//! averaging of the data sites (one coefficient per data point) and solve a
//! penalized weighted least-squares system over the B-spline coefficients:
//!
//! ```text
//! minimize  Σ (w_i (y_i - f(x_i)))²  +  λ ‖D₂ c‖²
//! ```
//!
//! where `D₂` is the second-difference operator on the coefficient vector.
//! `make_interp_spline` is the λ = 0 case. `fit_smoothing_spline` selects
//! the largest λ whose weighted square residual stays within the caller's
//! budget, by bisection on log λ (the residual is monotone in λ).
//!
//! The normal system is banded with half-bandwidth `degree`; it is solved by
//! a banded Cholesky factorization.

use ndarray::{Array1, Array2};

use crate::interpolate::bspline::{basis_row, find_span, BSpline};
use crate::interpolate::error::{InterpolateError, InterpolateResult};

const LAMBDA_LOG_MIN: f64 = -10.0;
const LAMBDA_LOG_MAX: f64 = 10.0;
const BISECTION_STEPS: usize = 60;

/// Construct an interpolating B-spline from data points.
///
/// Builds a B-spline of the given degree that passes through all (x, y)
/// points, using as many coefficients as data points.
///
/// # Arguments
/// * `x` - 1D array of x coordinates (must be strictly increasing)
/// * `y` - 1D array of y values (same length as x)
/// * `degree` - Polynomial degree (typically 3 for cubic)
///
/// # Errors
/// Returns `ShapeMismatch`, `InsufficientData`, `NotMonotonic`, or
/// `InvalidParameter` for malformed input, and `NumericalError` if the
/// collocation system cannot be solved.
pub fn make_interp_spline(
    x: &Array1<f64>,
    y: &Array1<f64>,
    degree: usize,
) -> InterpolateResult<BSpline> {
    validate_sites(x, y, degree, "make_interp_spline")?;

    let weights = Array1::from_elem(x.len(), 1.0);
    let fit = FitProblem::new(x, y, &weights, degree);
    let (coeffs, _) = fit.solve(0.0)?;
    Ok(fit.spline(coeffs))
}

/// Fit a weighted smoothing spline to data points.
///
/// Returns the smoothest spline (largest roughness penalty) whose weighted
/// square residual `Σ (w_i (y_i - f(x_i)))²` stays within `smoothing`.
/// `smoothing = 0` interpolates exactly through all points; larger values
/// permit smoother, less exact fits.
///
/// # Arguments
/// * `x` - 1D array of x coordinates (must be strictly increasing)
/// * `y` - 1D array of y values (same length as x)
/// * `weights` - Positive per-point weights (same length as x)
/// * `smoothing` - Weighted square residual budget (>= 0)
/// * `degree` - Polynomial degree
///
/// # Errors
/// Returns `ShapeMismatch`, `InsufficientData`, `NotMonotonic`, or
/// `InvalidParameter` for malformed input, and `NumericalError` if the
/// normal system cannot be solved.
pub fn fit_smoothing_spline(
    x: &Array1<f64>,
    y: &Array1<f64>,
    weights: &Array1<f64>,
    smoothing: f64,
    degree: usize,
) -> InterpolateResult<BSpline> {
    validate_sites(x, y, degree, "fit_smoothing_spline")?;

    if weights.len() != x.len() {
        return Err(InterpolateError::ShapeMismatch {
            expected: x.len(),
            actual: weights.len(),
            context: "fit_smoothing_spline: weights".to_string(),
        });
    }
    if weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
        return Err(InterpolateError::InvalidParameter {
            parameter: "weights".to_string(),
            message: "weights must be positive and finite".to_string(),
        });
    }
    if !smoothing.is_finite() || smoothing < 0.0 {
        return Err(InterpolateError::InvalidParameter {
            parameter: "smoothing".to_string(),
            message: format!("smoothing must be non-negative and finite, got {}", smoothing),
        });
    }

    let fit = FitProblem::new(x, y, weights, degree);

    let (c_exact, _) = fit.solve(0.0)?;
    if smoothing == 0.0 || fit.n_coeffs < 3 {
        // No budget, or too few coefficients for a second-difference penalty.
        return Ok(fit.spline(c_exact));
    }

    let (c_hi, r_hi) = fit.solve(10f64.powf(LAMBDA_LOG_MAX))?;
    if r_hi <= smoothing {
        return Ok(fit.spline(c_hi));
    }

    let (c_lo, r_lo) = fit.solve(10f64.powf(LAMBDA_LOG_MIN))?;
    if r_lo > smoothing {
        // Budget tighter than any penalized fit can reach; fall back to the
        // exact solve.
        return Ok(fit.spline(c_exact));
    }

    // Invariant: residual(10^lo) <= smoothing < residual(10^hi).
    let mut lo = LAMBDA_LOG_MIN;
    let mut hi = LAMBDA_LOG_MAX;
    let mut best = c_lo;
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        let (c_mid, r_mid) = fit.solve(10f64.powf(mid))?;
        if r_mid <= smoothing {
            lo = mid;
            best = c_mid;
        } else {
            hi = mid;
        }
    }

    Ok(fit.spline(best))
}

/// Shared input validation for the fitting entry points.
fn validate_sites(
    x: &Array1<f64>,
    y: &Array1<f64>,
    degree: usize,
    context: &str,
) -> InterpolateResult<()> {
    let n = x.len();

    if y.len() != n {
        return Err(InterpolateError::ShapeMismatch {
            expected: n,
            actual: y.len(),
            context: context.to_string(),
        });
    }
    if degree == 0 {
        return Err(InterpolateError::InvalidParameter {
            parameter: "degree".to_string(),
            message: "degree must be >= 1".to_string(),
        });
    }
    if n < degree + 1 {
        return Err(InterpolateError::InsufficientData {
            required: degree + 1,
            actual: n,
            context: format!("{}: need at least degree+1 points", context),
        });
    }
    for i in 1..n {
        if x[i] <= x[i - 1] {
            return Err(InterpolateError::NotMonotonic {
                context: context.to_string(),
            });
        }
    }

    Ok(())
}

/// Precomputed fitting problem: knots, per-point basis rows, data.
///
/// The basis rows depend only on the sites and knots, so they are computed
/// once and reused across the penalty search.
struct FitProblem {
    knots: Array1<f64>,
    degree: usize,
    n_coeffs: usize,
    half_bandwidth: usize,
    /// First coefficient index touched by each data row.
    starts: Vec<usize>,
    /// The `degree + 1` non-vanishing basis values for each data row.
    rows: Vec<Vec<f64>>,
    y: Vec<f64>,
    w: Vec<f64>,
}

impl FitProblem {
    fn new(x: &Array1<f64>, y: &Array1<f64>, weights: &Array1<f64>, degree: usize) -> Self {
        let n = x.len();
        let knots = averaged_knots(x, degree);

        let mut starts = Vec::with_capacity(n);
        let mut rows = Vec::with_capacity(n);
        for &xi in x.iter() {
            let span = find_span(&knots, degree, n, xi);
            starts.push(span - degree);
            rows.push(basis_row(&knots, degree, span, xi));
        }

        FitProblem {
            knots,
            degree,
            n_coeffs: n,
            // The second-difference penalty reaches two columns past the
            // diagonal even for degree-1 splines.
            half_bandwidth: degree.max(2),
            starts,
            rows,
            y: y.to_vec(),
            w: weights.to_vec(),
        }
    }

    /// Solve the penalized normal system for a given penalty, returning the
    /// coefficients and the weighted square residual of the fit.
    fn solve(&self, lambda: f64) -> InterpolateResult<(Vec<f64>, f64)> {
        let nc = self.n_coeffs;
        let hbw = self.half_bandwidth;

        // Band storage: band[[i, d]] = A[i, i + d] for d = 0..=hbw.
        let mut band = Array2::<f64>::zeros((nc, hbw + 1));
        let mut rhs = vec![0.0; nc];

        for i in 0..self.y.len() {
            let start = self.starts[i];
            let row = &self.rows[i];
            let w2 = self.w[i] * self.w[i];
            for a in 0..row.len() {
                let ia = start + a;
                rhs[ia] += w2 * row[a] * self.y[i];
                for b in a..row.len() {
                    band[[ia, b - a]] += w2 * row[a] * row[b];
                }
            }
        }

        if lambda > 0.0 && nc >= 3 {
            const D2: [f64; 3] = [1.0, -2.0, 1.0];
            for j in 0..nc - 2 {
                for a in 0..3 {
                    for b in a..3 {
                        band[[j + a, b - a]] += lambda * D2[a] * D2[b];
                    }
                }
            }
        }

        let coeffs = cholesky_banded_solve(band, &rhs, hbw)?;
        let residual = self.weighted_residual(&coeffs);
        Ok((coeffs, residual))
    }

    fn weighted_residual(&self, coeffs: &[f64]) -> f64 {
        let mut total = 0.0;
        for i in 0..self.y.len() {
            let start = self.starts[i];
            let mut fitted = 0.0;
            for (j, &b) in self.rows[i].iter().enumerate() {
                fitted += coeffs[start + j] * b;
            }
            let r = self.w[i] * (self.y[i] - fitted);
            total += r * r;
        }
        total
    }

    fn spline(&self, coefficients: Vec<f64>) -> BSpline {
        BSpline {
            knots: self.knots.clone(),
            coefficients: Array1::from_vec(coefficients),
            degree: self.degree,
        }
    }
}

/// Build a clamped knot vector by Schoenberg-Whitney averaging: interior
/// knot j is the mean of `degree` consecutive data sites, giving as many
/// coefficients as data points and a nonsingular collocation system.
fn averaged_knots(x: &Array1<f64>, degree: usize) -> Array1<f64> {
    let n = x.len();
    let k = degree;

    let mut knots = Vec::with_capacity(n + k + 1);
    for _ in 0..=k {
        knots.push(x[0]);
    }
    for j in 1..n - k {
        let mut sum = 0.0;
        for offset in 0..k {
            sum += x[j + offset];
        }
        knots.push(sum / k as f64);
    }
    for _ in 0..=k {
        knots.push(x[n - 1]);
    }

    Array1::from_vec(knots)
}

/// Solve a symmetric positive definite banded system via Cholesky.
///
/// `band[[i, d]]` holds `A[i, i + d]` for the diagonal and `hbw`
/// superdiagonals. Factorizes A = L·Lᵀ in banded storage, then forward- and
/// back-substitutes.
fn cholesky_banded_solve(
    band: Array2<f64>,
    rhs: &[f64],
    hbw: usize,
) -> InterpolateResult<Vec<f64>> {
    let n = rhs.len();

    // low[[i, d]] = L[i, i - d]
    let mut low = Array2::<f64>::zeros((n, hbw + 1));
    for i in 0..n {
        let jmin = i.saturating_sub(hbw);
        for j in jmin..i {
            let mut s = band[[j, i - j]];
            let kmin = jmin.max(j.saturating_sub(hbw));
            for k in kmin..j {
                s -= low[[i, i - k]] * low[[j, j - k]];
            }
            low[[i, i - j]] = s / low[[j, 0]];
        }

        let mut s = band[[i, 0]];
        for k in jmin..i {
            let l_ik = low[[i, i - k]];
            s -= l_ik * l_ik;
        }
        if s <= 0.0 || !s.is_finite() {
            return Err(InterpolateError::NumericalError {
                message: "Singular normal system in spline fit".to_string(),
            });
        }
        low[[i, 0]] = s.sqrt();
    }

    // Forward substitution: L z = rhs
    let mut z = vec![0.0; n];
    for i in 0..n {
        let jmin = i.saturating_sub(hbw);
        let mut s = rhs[i];
        for j in jmin..i {
            s -= low[[i, i - j]] * z[j];
        }
        z[i] = s / low[[i, 0]];
    }

    // Back substitution: Lᵀ c = z
    let mut c = vec![0.0; n];
    for i in (0..n).rev() {
        let mut s = z[i];
        let jmax = (i + hbw).min(n - 1);
        for j in i + 1..=jmax {
            s -= low[[j, j - i]] * c[j];
        }
        c[i] = s / low[[i, 0]];
    }

    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites(n: usize) -> Array1<f64> {
        Array1::from_iter((0..n).map(|i| i as f64))
    }

    #[test]
    fn test_interp_passes_through_points() {
        let x = sites(7);
        let y = Array1::from_vec(vec![0.3, -1.2, 2.5, 0.0, 1.1, -0.4, 0.9]);

        let spline = make_interp_spline(&x, &y, 3).expect("cubic interpolation failed");
        let fitted = spline.evaluate(&x).unwrap();

        for i in 0..x.len() {
            assert!(
                (fitted[i] - y[i]).abs() < 1e-8,
                "point {}: {} vs {}",
                i,
                fitted[i],
                y[i]
            );
        }
    }

    #[test]
    fn test_interp_reproduces_quadratic() {
        let x = sites(6);
        let y = x.mapv(|v| v * v);

        let spline = make_interp_spline(&x, &y, 3).expect("cubic interpolation failed");

        let x_new = Array1::from_vec(vec![0.5, 1.5, 2.5, 3.5, 4.5]);
        let result = spline.evaluate(&x_new).unwrap();
        for (i, &v) in result.iter().enumerate() {
            let expected = x_new[i] * x_new[i];
            assert!(
                (v - expected).abs() < 1e-8,
                "point {}: {} vs {}",
                i,
                v,
                expected
            );
        }
    }

    #[test]
    fn test_quartic_fit_reproduces_cubic_derivatives() {
        // A quartic fit of an exact cubic recovers its derivatives exactly,
        // endpoints included.
        let x = sites(8);
        let y = x.mapv(|t| t * t * t - 2.0 * t * t + t);
        let w = Array1::from_elem(8, 1.0);

        let spline = fit_smoothing_spline(&x, &y, &w, 0.0, 4).expect("quartic fit failed");

        let d1 = spline.derivative(1).evaluate(&x).unwrap();
        let d2 = spline.derivative(2).evaluate(&x).unwrap();
        for i in 0..x.len() {
            let t = x[i];
            let expected_d1 = 3.0 * t * t - 4.0 * t + 1.0;
            let expected_d2 = 6.0 * t - 4.0;
            assert!(
                (d1[i] - expected_d1).abs() < 1e-6,
                "first derivative at {}: {} vs {}",
                t,
                d1[i],
                expected_d1
            );
            assert!(
                (d2[i] - expected_d2).abs() < 1e-5,
                "second derivative at {}: {} vs {}",
                t,
                d2[i],
                expected_d2
            );
        }
    }

    #[test]
    fn test_smoothing_zero_matches_interpolation() {
        let x = sites(6);
        let y = Array1::from_vec(vec![1.0, 0.2, -0.7, 1.4, 0.1, -0.3]);
        let w = Array1::from_elem(6, 1.0);

        let interp = make_interp_spline(&x, &y, 3).unwrap();
        let smooth = fit_smoothing_spline(&x, &y, &w, 0.0, 3).unwrap();

        let x_new = Array1::from_vec(vec![0.5, 2.5, 4.5]);
        let a = interp.evaluate(&x_new).unwrap();
        let b = smooth.evaluate(&x_new).unwrap();
        for i in 0..x_new.len() {
            assert!(
                (a[i] - b[i]).abs() < 1e-10,
                "point {}: {} vs {}",
                i,
                a[i],
                b[i]
            );
        }
    }

    #[test]
    fn test_smoothing_budget_respected() {
        // Alternating data: heavy smoothing is possible, but the fit must
        // stay inside the residual budget.
        let x = sites(10);
        let y = Array1::from_iter((0..10).map(|i| (i % 2) as f64));
        let w = Array1::from_elem(10, 1.0);
        let budget = 2.0;

        let spline = fit_smoothing_spline(&x, &y, &w, budget, 3).expect("smoothing fit failed");
        let fitted = spline.evaluate(&x).unwrap();

        let residual: f64 = (0..10).map(|i| (y[i] - fitted[i]).powi(2)).sum();
        assert!(
            residual <= budget + 1e-6,
            "residual {} exceeds budget {}",
            residual,
            budget
        );
        // The budget should actually be spent on smoothing.
        assert!(
            residual > 0.5,
            "expected a smoothed fit, residual only {}",
            residual
        );
    }

    #[test]
    fn test_huge_budget_yields_smoothest_fit() {
        // With an unbounded budget the penalty dominates and the fit stops
        // tracking the alternations entirely.
        let x = sites(10);
        let y = Array1::from_iter((0..10).map(|i| (i % 2) as f64));
        let w = Array1::from_elem(10, 1.0);

        let spline = fit_smoothing_spline(&x, &y, &w, 1e9, 3).expect("smoothing fit failed");
        let fitted = spline.evaluate(&x).unwrap();

        // A constant fit at 0.5 has residual 2.5; the heavily penalized fit
        // cannot do better than a near-affine one.
        let residual: f64 = (0..10).map(|i| (y[i] - fitted[i]).powi(2)).sum();
        assert!(
            residual > 1.5 && residual <= 2.5 + 1e-6,
            "residual {} not in the fully-smoothed range",
            residual
        );
        for i in 0..9 {
            assert!(
                (fitted[i + 1] - fitted[i]).abs() < 0.5,
                "fit still oscillates between {} and {}",
                fitted[i],
                fitted[i + 1]
            );
        }
    }

    #[test]
    fn test_shape_mismatch() {
        let x = sites(6);
        let y = sites(5);
        let result = make_interp_spline(&x, &y, 3);
        assert!(matches!(
            result,
            Err(InterpolateError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_insufficient_data() {
        let x = sites(3);
        let y = sites(3);
        let result = make_interp_spline(&x, &y, 4);
        assert!(matches!(
            result,
            Err(InterpolateError::InsufficientData {
                required: 5,
                actual: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_not_monotonic() {
        let x = Array1::from_vec(vec![0.0, 1.0, 1.0, 2.0, 3.0]);
        let y = sites(5);
        let result = make_interp_spline(&x, &y, 3);
        assert!(matches!(result, Err(InterpolateError::NotMonotonic { .. })));
    }

    #[test]
    fn test_invalid_weights_and_smoothing() {
        let x = sites(6);
        let y = sites(6);

        let short = Array1::from_elem(5, 1.0);
        assert!(matches!(
            fit_smoothing_spline(&x, &y, &short, 0.0, 3),
            Err(InterpolateError::ShapeMismatch { .. })
        ));

        let zero = Array1::from_vec(vec![1.0, 1.0, 0.0, 1.0, 1.0, 1.0]);
        assert!(matches!(
            fit_smoothing_spline(&x, &y, &zero, 0.0, 3),
            Err(InterpolateError::InvalidParameter { .. })
        ));

        let w = Array1::from_elem(6, 1.0);
        assert!(matches!(
            fit_smoothing_spline(&x, &y, &w, -1.0, 3),
            Err(InterpolateError::InvalidParameter { .. })
        ));
    }
}
