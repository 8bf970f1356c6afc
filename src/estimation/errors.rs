//! estimation::errors — error types for power-law parameter estimation.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the parameter-estimation
//! subtree (the self-contained maximum-likelihood search and the delegation
//! to the external `powerlaw` reference implementation), together with a
//! conversion layer to Python exceptions for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`EstimationResult`] and [`EstimationError`] as the canonical
//!   result and error types for estimation routines.
//! - Attach human-readable `Display` messages to each error variant.
//! - Implement `From<EstimationError> for PyErr` to map Rust-side failures
//!   into `PyValueError` values visible to Python callers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Estimation entry points validate their inputs (sample contents, search
//!   range) and return [`EstimationResult<T>`] instead of panicking.
//! - `InsufficientData` is internal to the simplified estimator's fallback
//!   chain: the log-log regression helper reports it, and the caller
//!   substitutes the literature-default exponent rather than surfacing the
//!   error from the public entry point.
//! - `DependencyUnavailable` is reserved for an explicit request of the
//!   official method when the reference implementation cannot be reached;
//!   the auto policy never produces it.
//!
//! Conventions
//! -----------
//! - This module is focused on estimation errors; magnitude-pipeline errors
//!   live in `magnitude::errors` and wrap this type for pipeline use.
//! - Error messages are phrased in terms of domain constraints (e.g.,
//!   "search range must satisfy lo < hi") rather than low-level details.
//! - PyO3 conversion always uses `PyValueError` for these errors.
//!
//! Downstream usage
//! ----------------
//! - `estimation::method`, `estimation::simplified`, and
//!   `estimation::official` return [`EstimationResult<T>`] to propagate
//!   failures cleanly to callers.
//! - The analysis pipeline converts these errors into
//!   `MagnitudeError::Estimation` via a `From` implementation.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each variant's `Display` message embeds its
//!   payload (counts, range bounds, or the dependency's failure text).

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type EstimationResult<T> = Result<T, EstimationError>;

/// EstimationError — error conditions for parameter estimation.
///
/// Purpose
/// -------
/// Represent all validation and runtime failures that can occur while
/// estimating power-law parameters from an area sample, whether via the
/// self-contained search or via the external reference implementation.
///
/// Variants
/// --------
/// - `InsufficientData { required, available }`
///   A fallback stage lacks the observations or populated histogram bins it
///   needs. Consumed internally by the simplified estimator, which resolves
///   it with the literature-default exponent.
/// - `InvalidRange { lo, hi }`
///   A caller-supplied cutoff search range is non-finite, non-positive, or
///   does not satisfy `lo < hi`.
/// - `UnknownMethod(name)`
///   A method selector string did not name one of `auto`, `official`, or
///   `simplified`.
/// - `DependencyUnavailable`
///   The official method was explicitly requested but the `powerlaw`
///   reference implementation is not importable in this process.
/// - `Dependency(message)`
///   The reference implementation was reached but failed; carries the
///   Python-side error text.
///
/// Invariants
/// ----------
/// - Each variant carries just enough information for downstream logging
///   and debugging without leaking large data structures.
/// - `DependencyUnavailable` is only produced by an explicit "official"
///   request; the auto policy falls back to the simplified method instead.
///
/// Notes
/// -----
/// - This enum implements [`std::error::Error`] and [`std::fmt::Display`]
///   so it can be used with idiomatic `?`-based error propagation in Rust.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimationError {
    InsufficientData { required: usize, available: usize },
    InvalidRange { lo: f64, hi: f64 },
    UnknownMethod(String),
    DependencyUnavailable,
    Dependency(String),
}

impl std::error::Error for EstimationError {}

impl std::fmt::Display for EstimationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimationError::InsufficientData { required, available } => {
                write!(f, "Insufficient data: need at least {required}, found {available}.")
            }
            EstimationError::InvalidRange { lo, hi } => {
                write!(
                    f,
                    "Invalid cutoff search range ({lo}, {hi}). Must be finite, positive, \
                     and satisfy lo < hi."
                )
            }
            EstimationError::UnknownMethod(name) => {
                write!(
                    f,
                    "Unknown estimation method {name:?} (expected 'auto', 'official', or \
                     'simplified')."
                )
            }
            EstimationError::DependencyUnavailable => {
                write!(
                    f,
                    "The 'powerlaw' reference implementation is not available; install it \
                     or use the simplified method."
                )
            }
            EstimationError::Dependency(message) => {
                write!(f, "The 'powerlaw' reference implementation failed: {message}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<EstimationError> for PyErr {
    fn from(err: EstimationError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
