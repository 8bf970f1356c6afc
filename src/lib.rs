//! landslide_magnitude — landslide-event magnitude (mLS) estimation with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the magnitude engine to Python via the `_landslide_magnitude`
//! extension module. The engine turns a collection of measured landslide
//! areas into a single event magnitude with an uncertainty estimate, and
//! can estimate the governing power-law parameters from the sample when
//! they are not supplied.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`magnitude` and `estimation`) as the
//!   public crate surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for
//!   the `_landslide_magnitude` Python extension when the
//!   `python-bindings` feature is enabled.
//! - Keep all numerical work in the inner Rust modules; this file performs
//!   only FFI glue, input conversion, and error mapping.
//!
//! Invariants & assumptions
//! ------------------------
//! - Area measurements arrive in consistent planar square units with
//!   implausible near-zero polygons already filtered; upstream layers own
//!   file parsing, reprojection, and rendering.
//! - The Python-visible classes mirror the invariants and signatures of
//!   their Rust counterparts (`MagnitudeReport`, `ParameterEstimate`).
//! - Errors from core Rust code are propagated as rich error types
//!   internally and converted to `ValueError` at the PyO3 boundary.
//!
//! Conventions
//! -----------
//! - Exponents are stored negative; the bindings accept either sign and
//!   normalize once on input.
//! - The chart interface is numeric: observed (bin-center, density) pairs
//!   and the fitted tail series. Rendering is the consumer's concern.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on the inner modules and can
//!   ignore the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports `_landslide_magnitude` and wraps
//!   its classes in user-facing APIs (web handlers, notebooks).
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by the integration suite under `tests/`.
//! - Binding smoke tests (construction, getters, error mapping) belong to
//!   Python-level harnesses.

pub mod estimation;
pub mod magnitude;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    estimation::{ParameterEstimate, estimate_parameters},
    magnitude::analysis::{AnalysisOptions, MagnitudeReport, analyze},
    utils::{extract_area_sample, extract_method, extract_params},
};

/// Magnitude — Python-facing wrapper for the full mLS pipeline.
///
/// Purpose
/// -------
/// Run the complete magnitude pipeline (optional parameter estimation,
/// anchored power-law fit, Monte-Carlo uncertainty) from Python and expose
/// the results as read-only properties.
///
/// Key behaviors
/// -------------
/// - Validate and convert Python inputs into an `AreaSample`.
/// - Accept explicit `cutoff`/`beta` (either sign) with optional declared
///   errors, or estimate parameters with the requested method.
/// - Expose the magnitude, the uncertainty (`None` when unavailable), the
///   parameter provenance, and the two chart series.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `Magnitude(areas, cutoff=None, beta=None, beta_error=None,
/// cutoff_error=None, method=None, xmin_range=None, seed=None)`:
/// - `areas`: `&PyAny`
///   One-dimensional array-like of positive float64 areas.
/// - `cutoff`, `beta`: `Option<f64>`
///   Explicit power-law parameters; must be supplied together. When
///   absent, parameters are estimated from the sample.
/// - `beta_error`, `cutoff_error`: `Option<f64>`
///   Declared symmetric uncertainties; both are required for a numeric
///   magnitude uncertainty.
/// - `method`: `Option<&str>`
///   Estimation mode (`'auto'`, `'official'`, `'simplified'`); defaults
///   to `'auto'`. Ignored when explicit parameters are given.
/// - `xmin_range`: `Option<(f64, f64)>`
///   Optional cutoff search range for the simplified estimator.
/// - `seed`: `Option<u64>`
///   Monte-Carlo seed for reproducible uncertainties.
///
/// Fields
/// ------
/// - `inner`: [`MagnitudeReport`]
///   Rust-side report holding the estimate, parameters, and series.
///
/// Invariants
/// ----------
/// - `inner.estimate.magnitude` is finite; construction raises
///   `ValueError` otherwise.
///
/// Performance
/// -----------
/// - One allocation copies the Python data into Rust; property access
///   clones only the requested series.
///
/// Notes
/// -----
/// - Native Rust code should call [`analyze`] directly; this type exists
///   solely for the PyO3 binding surface.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "landslide_magnitude")]
pub struct Magnitude {
    /// The full pipeline report.
    inner: MagnitudeReport,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Magnitude {
    #[new]
    #[pyo3(
        signature = (
            areas,
            cutoff = None,
            beta = None,
            beta_error = None,
            cutoff_error = None,
            method = None,
            xmin_range = None,
            seed = None,
        ),
        text_signature = "(areas, /, cutoff=None, beta=None, beta_error=None, \
                          cutoff_error=None, method=None, xmin_range=None, seed=None)"
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new<'py>(
        py: Python<'py>, areas: &Bound<'py, PyAny>, cutoff: Option<f64>, beta: Option<f64>,
        beta_error: Option<f64>, cutoff_error: Option<f64>, method: Option<&str>,
        xmin_range: Option<(f64, f64)>, seed: Option<u64>,
    ) -> PyResult<Self> {
        let sample = extract_area_sample(py, areas)?;
        let params = extract_params(cutoff, beta, cutoff_error, beta_error)?;
        let method = extract_method(method)?;

        let options = AnalysisOptions { params, method, xmin_range, seed };
        let report = analyze(&sample, &options)?;
        Ok(Magnitude { inner: report })
    }

    /// The landslide-event magnitude (mLS).
    #[getter]
    pub fn magnitude(&self) -> f64 {
        self.inner.estimate.magnitude
    }

    /// The magnitude uncertainty, or `None` when the parameter errors
    /// were not declared.
    #[getter]
    pub fn uncertainty(&self) -> Option<f64> {
        self.inner.estimate.uncertainty.value()
    }

    /// Provenance of the fitted parameters
    /// (`'user-supplied'`, `'official'`, or `'simplified'`).
    #[getter]
    pub fn parameter_source(&self) -> String {
        self.inner.estimate.source.to_string()
    }

    /// The cutoff the fit used.
    #[getter]
    pub fn cutoff(&self) -> f64 {
        self.inner.params.cutoff
    }

    /// The exponent the fit used (negative).
    #[getter]
    pub fn beta(&self) -> f64 {
        self.inner.params.beta
    }

    /// Bin centers of the observed frequency-density curve.
    #[getter]
    pub fn observed_x(&self) -> Vec<f64> {
        self.inner.fit.observed.centers.to_vec()
    }

    /// Observed frequency density per bin.
    #[getter]
    pub fn observed_y(&self) -> Vec<f64> {
        self.inner.fit.observed.density.to_vec()
    }

    /// Fitted-curve x values, restricted to x ≥ cutoff.
    #[getter]
    pub fn fitted_x(&self) -> Vec<f64> {
        self.inner.fit.tail_centers.to_vec()
    }

    /// Fitted-curve y values, aligned with `fitted_x`.
    #[getter]
    pub fn fitted_y(&self) -> Vec<f64> {
        self.inner.fit.tail_density.to_vec()
    }
}

/// PowerLawEstimate — Python-facing wrapper for parameter estimation.
///
/// Purpose
/// -------
/// Estimate the power-law cutoff and exponent from an area sample without
/// running the magnitude pipeline, mirroring
/// [`estimate_parameters`].
///
/// Key behaviors
/// -------------
/// - Validate and convert Python inputs into an `AreaSample`.
/// - Resolve the requested estimation mode once and run the strategy.
/// - Expose the estimate and its provenance as read-only properties.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `PowerLawEstimate(areas, method=None, xmin_range=None)`:
/// - `areas`: `&PyAny`
///   One-dimensional array-like of positive float64 areas.
/// - `method`: `Option<&str>`
///   Estimation mode (`'auto'`, `'official'`, `'simplified'`); defaults
///   to `'auto'`. An explicit `'official'` request raises `ValueError`
///   when the `powerlaw` package is unavailable.
/// - `xmin_range`: `Option<(f64, f64)>`
///   Optional cutoff search range for the simplified strategy.
///
/// Fields
/// ------
/// - `inner`: [`ParameterEstimate`]
///   Rust-side estimate with provenance.
///
/// Invariants
/// ----------
/// - `inner.beta <= 0` and `inner.cutoff > 0`.
///
/// Notes
/// -----
/// - Native Rust callers should use [`estimate_parameters`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "landslide_magnitude")]
pub struct PowerLawEstimate {
    /// The estimate with provenance.
    inner: ParameterEstimate,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PowerLawEstimate {
    #[new]
    #[pyo3(
        signature = (areas, method = None, xmin_range = None),
        text_signature = "(areas, /, method=None, xmin_range=None)"
    )]
    pub fn new<'py>(
        py: Python<'py>, areas: &Bound<'py, PyAny>, method: Option<&str>,
        xmin_range: Option<(f64, f64)>,
    ) -> PyResult<Self> {
        let sample = extract_area_sample(py, areas)?;
        let method = extract_method(method)?;
        let estimate = estimate_parameters(&sample, method, xmin_range)?;
        Ok(PowerLawEstimate { inner: estimate })
    }

    /// Estimated cutoff (xmin).
    #[getter]
    pub fn cutoff(&self) -> f64 {
        self.inner.cutoff
    }

    /// Estimated exponent (negative).
    #[getter]
    pub fn beta(&self) -> f64 {
        self.inner.beta
    }

    /// Heuristic cutoff uncertainty.
    #[getter]
    pub fn cutoff_error(&self) -> f64 {
        self.inner.cutoff_error
    }

    /// Exponent uncertainty.
    #[getter]
    pub fn beta_error(&self) -> f64 {
        self.inner.beta_error
    }

    /// Strategy that produced the estimate
    /// (`'official'` or `'simplified'`).
    #[getter]
    pub fn method(&self) -> String {
        self.inner.method.to_string()
    }
}

/// _landslide_magnitude — PyO3 module initializer for the Python
/// extension.
///
/// Purpose
/// -------
/// Define the `_landslide_magnitude` Python module and register the
/// binding classes used by the public `landslide_magnitude` package.
///
/// Parameters
/// ----------
/// - `_py`: [`Python`]
///   GIL token provided by PyO3 during module initialization.
/// - `m`: `&Bound<PyModule>`
///   Module object representing `_landslide_magnitude`.
///
/// Returns
/// -------
/// `PyResult<()>`
///   `Ok(())` on success, or a Python exception if registration fails.
///
/// Notes
/// -----
/// - Invoked automatically by Python when importing the compiled
///   extension; not called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _landslide_magnitude<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<Magnitude>()?;
    m.add_class::<PowerLawEstimate>()?;
    Ok(())
}
