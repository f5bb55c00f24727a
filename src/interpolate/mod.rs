//! Spline interpolation and smoothing for curvr
//!
//! This module provides the univariate B-spline machinery the curvature
//! estimator is built on.
//!
//! # Module Organization
//!
//! - [`bspline`] - B-spline representation, evaluation, and derivatives
//! - [`smoothing`] - Exact interpolation and weighted smoothing fits
//!
//! # Example
//!
//! ```ignore
//! use curvr::interpolate::{fit_smoothing_spline, make_interp_spline};
//! use ndarray::Array1;
//!
//! let x = Array1::from_vec(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
//! let y = x.mapv(|v| v * v);
//!
//! // Exact cubic interpolation
//! let spline = make_interp_spline(&x, &y, 3)?;
//! let y_new = spline.evaluate(&x)?;
//!
//! // Smoothing fit: weights and a residual budget
//! let w = Array1::from_elem(6, 1.0);
//! let smooth = fit_smoothing_spline(&x, &y, &w, 0.5, 3)?;
//! let slope = smooth.derivative(1).evaluate(&x)?;
//! ```

mod error;

pub mod bspline;
pub mod smoothing;

pub use bspline::BSpline;
pub use error::{InterpolateError, InterpolateResult};
pub use smoothing::{fit_smoothing_spline, make_interp_spline};
