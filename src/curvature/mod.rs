//! Signed curvature estimation for sampled 2D curves.
//!
//! # Module Organization
//!
//! - [`splines`] - Spline-based curvature of an ordered point sequence
//!
//! # Example
//!
//! ```ignore
//! use curvr::curvature::{signed_curvature, Tolerance};
//! use ndarray::Array1;
//!
//! let x = Array1::from_vec(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
//! let y = x.mapv(|v| 0.1 * v * v);
//!
//! let kappa = signed_curvature(&x, &y, &Tolerance::default())?;
//! assert_eq!(kappa.len(), x.len());
//! ```

mod error;

pub mod splines;

pub use error::{CurvatureError, CurvatureResult};
pub use splines::{signed_curvature, signed_curvature_complex, Tolerance};
