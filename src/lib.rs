//! curvr - Signed curvature of sampled 2D curves
//!
//! curvr estimates the signed curvature of a plane curve given as an ordered
//! sequence of sample points. The coordinate sequences x(t) and y(t) are
//! fitted with weighted smoothing splines of degree 4 over the point index
//! t = 0, 1, ..., N-1, and the curvature at each sample is evaluated from
//! the fitted first and second derivatives:
//!
//! ```text
//! κ(t) = (x'(t)·y''(t) − y'(t)·x''(t)) / (x'(t)² + y'(t)²)^(3/2)
//! ```
//!
//! Positive curvature means the curve turns counter-clockwise at that point;
//! the magnitude is the inverse radius of the osculating circle.
//!
//! # Current Modules
//!
//! - [`interpolate`] - B-spline curves: evaluation, derivatives, exact
//!   interpolation, and weighted smoothing fits
//! - [`curvature`] - Signed curvature estimation built on the spline layer
//!
//! # Example
//!
//! ```ignore
//! use curvr::{signed_curvature, Tolerance};
//! use ndarray::Array1;
//!
//! // Unit circle sampled counter-clockwise
//! let n = 100;
//! let theta = |i: usize| 2.0 * std::f64::consts::PI * i as f64 / n as f64;
//! let x = Array1::from_iter((0..n).map(|i| theta(i).cos()));
//! let y = Array1::from_iter((0..n).map(|i| theta(i).sin()));
//!
//! let kappa = signed_curvature(&x, &y, &Tolerance::Uniform(0.01))?;
//! // kappa[i] ≈ 1.0 at every index
//! ```
//!
//! # Numeric Semantics
//!
//! Cusps and stationary points (where both fitted derivatives vanish) yield
//! non-finite values in the result rather than errors, preserving the
//! one-output-per-input-point contract. Callers should check for NaN or
//! infinite entries when curves may contain such points.

pub mod curvature;
pub mod interpolate;

// Re-export main types for convenience
pub use curvature::{
    signed_curvature, signed_curvature_complex, CurvatureError, CurvatureResult, Tolerance,
};
pub use interpolate::{
    fit_smoothing_spline, make_interp_spline, BSpline, InterpolateError, InterpolateResult,
};
