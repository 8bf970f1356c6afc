//! Delegation to the `powerlaw` reference implementation.
//!
//! Purpose
//! -------
//! Obtain power-law parameters from the published reference implementation
//! of the Clauset, Shalizi & Newman (2009) methodology — the Python
//! `powerlaw` package — through the embedded interpreter. The methodology
//! is treated as an external dependency boundary and is not reimplemented
//! here.
//!
//! Key behaviors
//! -------------
//! - [`reference_available`] probes `import powerlaw` exactly once per
//!   process and caches the outcome in an immutable capability flag.
//! - [`estimate`] runs `powerlaw.Fit(areas)` and reads the fitted `xmin`
//!   (cutoff) and `alpha` (exponent magnitude; stored here as
//!   `beta = -alpha`).
//! - The package's `sigma` (standard error of `alpha`) is used as the
//!   exponent uncertainty when it is exposed and finite; otherwise the
//!   analytic `|beta - 1| / sqrt(tail size)` heuristic applies. The cutoff
//!   uncertainty stays the 10%-of-cutoff heuristic in both cases.
//! - Any Python-side failure surfaces as `EstimationError::Dependency`
//!   with the interpreter's message.
//!
//! Invariants & assumptions
//! ------------------------
//! - This module is only compiled under the `python-bindings` feature;
//!   without it the capability flag is false by construction and the
//!   dispatch layer short-circuits.
//! - The capability probe runs once; per-call code assumes the flag and
//!   still maps import failures into `Dependency` defensively.
//! - The returned cutoff is validated to be finite and positive before it
//!   is handed to the magnitude pipeline.
//!
//! Conventions
//! -----------
//! - The `powerlaw` package reports the probability-density exponent as a
//!   positive `alpha`; this crate's stored-negative convention makes the
//!   conversion a single negation.
//!
//! Downstream usage
//! ----------------
//! - Reached exclusively through `estimation::method::estimate_parameters`
//!   after the selection policy resolves to the official strategy.
//!
//! Testing notes
//! -------------
//! - No Rust-side unit tests: exercising this module requires the Python
//!   C API plus an installed `powerlaw` package, which is the domain of
//!   Python-level integration tests. The dispatch and failure paths are
//!   covered in `estimation::method`.
use crate::estimation::{
    errors::{EstimationError, EstimationResult},
    method::{FitMethod, ParameterEstimate},
};
use crate::magnitude::data::AreaSample;
use pyo3::prelude::*;
use std::sync::OnceLock;

static REFERENCE_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// Whether the `powerlaw` package is importable in this process.
///
/// The probe runs on first call and the outcome is cached for the process
/// lifetime; availability is treated as a start-up property, not a
/// per-call one.
pub fn reference_available() -> bool {
    *REFERENCE_AVAILABLE.get_or_init(|| Python::with_gil(|py| py.import("powerlaw").is_ok()))
}

/// Estimate power-law parameters via `powerlaw.Fit`.
///
/// Parameters
/// ----------
/// - `sample`: [`AreaSample`]
///   Validated area measurements, forwarded to the package unchanged.
///
/// Returns
/// -------
/// `EstimationResult<ParameterEstimate>`
///   The fitted cutoff and exponent with the `Official` method label, the
///   package's exponent uncertainty when exposed, and the 10%-of-cutoff
///   heuristic for the cutoff uncertainty.
///
/// Errors
/// ------
/// - `EstimationError::Dependency(message)`
///   The package could not be imported, the fit raised, or it reported a
///   non-finite or non-positive cutoff.
///
/// Panics
/// ------
/// - Never panics. All Python-side failures are mapped into
///   `EstimationError::Dependency`.
pub fn estimate(sample: &AreaSample) -> EstimationResult<ParameterEstimate> {
    Python::with_gil(|py| {
        let powerlaw = py.import("powerlaw").map_err(py_failure)?;
        let areas = sample.areas().to_vec();

        let fit = powerlaw.getattr("Fit").map_err(py_failure)?.call1((areas,)).map_err(py_failure)?;
        let power_law = fit.getattr("power_law").map_err(py_failure)?;

        let xmin: f64 = fit
            .getattr("xmin")
            .and_then(|value| value.extract())
            .map_err(py_failure)?;
        let alpha: f64 = power_law
            .getattr("alpha")
            .and_then(|value| value.extract())
            .map_err(py_failure)?;

        if !xmin.is_finite() || xmin <= 0.0 {
            return Err(EstimationError::Dependency(format!(
                "reference fit reported an unusable cutoff ({xmin})"
            )));
        }

        let beta = -alpha.abs();

        // Bootstrap-derived exponent uncertainty when the package exposes
        // one; the analytic heuristic otherwise.
        let sigma: Option<f64> =
            power_law.getattr("sigma").ok().and_then(|value| value.extract().ok());
        let tail_size = sample.areas().iter().filter(|&&area| area >= xmin).count().max(1);
        let beta_error = match sigma {
            Some(sigma) if sigma.is_finite() && sigma > 0.0 => sigma,
            _ => (beta - 1.0).abs() / (tail_size as f64).sqrt(),
        };

        Ok(ParameterEstimate {
            cutoff: xmin,
            beta,
            cutoff_error: xmin / 10.0,
            beta_error,
            method: FitMethod::Official,
        })
    })
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Map a Python exception into the dependency-failure variant, keeping
/// the interpreter's message.
#[inline]
fn py_failure(err: PyErr) -> EstimationError {
    EstimationError::Dependency(err.to_string())
}
