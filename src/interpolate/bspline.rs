//! B-spline representation, evaluation, and derivatives.
//!
//! A spline is stored as a clamped knot vector, a coefficient vector, and a
//! degree. Evaluation finds the knot span for each query point and runs the
//! Cox-de Boor recurrence; derivatives are formed symbolically by knot
//! differencing, which lowers the degree by one per order.

use ndarray::Array1;

use crate::interpolate::error::{InterpolateError, InterpolateResult};

/// A B-spline curve represented by its knot vector and coefficients.
#[derive(Debug, Clone)]
pub struct BSpline {
    /// Knot vector, shape `[n_knots]`. Non-decreasing, with `degree + 1`
    /// repeated knots at each end.
    pub knots: Array1<f64>,
    /// Spline coefficients, shape `[n_knots - degree - 1]`.
    pub coefficients: Array1<f64>,
    /// Polynomial degree (order = degree + 1).
    pub degree: usize,
}

impl BSpline {
    /// The interval on which the spline is defined.
    pub fn domain(&self) -> (f64, f64) {
        let n_knots = self.knots.len();
        (self.knots[self.degree], self.knots[n_knots - 1 - self.degree])
    }

    /// Evaluate the spline at new points.
    ///
    /// # Arguments
    /// * `x_new` - 1D array of points to evaluate at
    ///
    /// # Returns
    /// 1D array of spline values, same length as `x_new`.
    ///
    /// # Errors
    /// Returns `OutOfDomain` if any point lies outside the knot range.
    pub fn evaluate(&self, x_new: &Array1<f64>) -> InterpolateResult<Array1<f64>> {
        let (x_min, x_max) = self.domain();
        let mut values = Vec::with_capacity(x_new.len());

        for &xi in x_new.iter() {
            if xi < x_min || xi > x_max {
                return Err(InterpolateError::OutOfDomain {
                    point: xi,
                    min: x_min,
                    max: x_max,
                    context: "BSpline::evaluate".to_string(),
                });
            }
            values.push(self.eval_one(xi));
        }

        Ok(Array1::from_vec(values))
    }

    /// Evaluate at a single in-domain point.
    fn eval_one(&self, x: f64) -> f64 {
        let n_coeffs = self.coefficients.len();
        let span = find_span(&self.knots, self.degree, n_coeffs, x);
        let basis = basis_row(&self.knots, self.degree, span, x);

        let start = span - self.degree;
        let mut value = 0.0;
        for (j, &b) in basis.iter().enumerate() {
            value += self.coefficients[start + j] * b;
        }
        value
    }

    /// Differentiate the spline `order` times.
    ///
    /// Uses the knot differencing formula
    /// `c'_i = k * (c_{i+1} - c_i) / (t_{i+k+1} - t_{i+1})`, removing one
    /// knot from each end per order. Differentiating past the polynomial
    /// degree yields the zero spline on the same domain.
    pub fn derivative(&self, order: usize) -> BSpline {
        if order == 0 {
            return self.clone();
        }
        if order > self.degree {
            return self.zero_spline();
        }

        let mut knots = self.knots.clone();
        let mut coefficients = self.coefficients.clone();
        let mut degree = self.degree;

        for _ in 0..order {
            let n = coefficients.len();
            let k = degree;
            let n_knots = knots.len();

            let mut new_coeffs = Vec::with_capacity(n - 1);
            for i in 0..n - 1 {
                let dt = knots[i + k + 1] - knots[i + 1];
                // Zero-length spans contribute nothing to the derivative.
                let dc = if dt.abs() > 0.0 {
                    k as f64 * (coefficients[i + 1] - coefficients[i]) / dt
                } else {
                    0.0
                };
                new_coeffs.push(dc);
            }

            // Remove first and last knot
            let new_knots: Vec<f64> = knots.iter().skip(1).take(n_knots - 2).copied().collect();

            coefficients = Array1::from_vec(new_coeffs);
            knots = Array1::from_vec(new_knots);
            degree -= 1;
        }

        BSpline {
            knots,
            coefficients,
            degree,
        }
    }

    /// The degree-0 zero spline over this spline's domain.
    fn zero_spline(&self) -> BSpline {
        let n_knots = self.knots.len();
        let trimmed: Vec<f64> = self
            .knots
            .iter()
            .skip(self.degree)
            .take(n_knots - 2 * self.degree)
            .copied()
            .collect();
        let n_coeffs = trimmed.len() - 1;

        BSpline {
            knots: Array1::from_vec(trimmed),
            coefficients: Array1::zeros(n_coeffs),
            degree: 0,
        }
    }
}

/// Find the knot span index containing `x`.
///
/// Returns `span` such that `knots[span] <= x < knots[span + 1]`, clamped to
/// the valid range `[degree, n_coeffs - 1]` so that the right endpoint of
/// the domain falls in the last non-empty span.
pub(crate) fn find_span(knots: &Array1<f64>, degree: usize, n_coeffs: usize, x: f64) -> usize {
    if x >= knots[n_coeffs] {
        return n_coeffs - 1;
    }
    if x <= knots[degree] {
        return degree;
    }

    let mut lo = degree;
    let mut hi = n_coeffs;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if x < knots[mid] {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    lo
}

/// Evaluate the `degree + 1` non-vanishing basis functions at `x`.
///
/// Cox-de Boor recurrence in its triangular form: entry `j` of the returned
/// row is `B_{span - degree + j, degree}(x)`.
pub(crate) fn basis_row(knots: &Array1<f64>, degree: usize, span: usize, x: f64) -> Vec<f64> {
    let mut basis = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    basis[0] = 1.0;

    for j in 1..=degree {
        left[j] = x - knots[span + 1 - j];
        right[j] = knots[span + j] - x;

        let mut saved = 0.0;
        for r in 0..j {
            let denom = right[r + 1] + left[j - r];
            let term = if denom.abs() > 0.0 { basis[r] / denom } else { 0.0 };
            basis[r] = saved + right[r + 1] * term;
            saved = left[j - r] * term;
        }
        basis[j] = saved;
    }

    basis
}
