//! magnitude::errors — shared error types and Python bridges.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used throughout the magnitude
//! subtree (binning, power-law fitting, Monte-Carlo uncertainty, and the
//! one-call analysis pipeline), together with a conversion layer to Python
//! exceptions for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`MagnitudeResult`] and [`MagnitudeError`] as the canonical
//!   result and error types for magnitude computations.
//! - Attach human-readable `Display` messages to each error variant so that
//!   diagnostics and logs are meaningful without additional context.
//! - Wrap estimation failures ([`EstimationError`]) so the analysis pipeline
//!   can surface them through a single error surface.
//! - Implement `From<MagnitudeError> for PyErr` to map Rust-side validation
//!   and runtime errors into `PyValueError` values visible to Python callers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Magnitude modules validate their inputs (sample contents, parameter
//!   ranges, anchor domain) and return [`MagnitudeResult<T>`] instead of
//!   panicking.
//! - Non-finite intermediate values are detected where they arise and
//!   reported as structured errors; the Monte-Carlo trial loop is the sole
//!   place where non-finite values are silently discarded, per its contract.
//! - `MagnitudeError` values are small, cheap to clone, and suitable for use
//!   in both unit tests and higher-level orchestration code.
//!
//! Conventions
//! -----------
//! - This module is focused on magnitude-pipeline errors; parameter
//!   estimation has its own error type in `estimation::errors`, wrapped here
//!   via the `Estimation` variant for pipeline use.
//! - Error messages are phrased in terms of domain constraints (e.g.,
//!   "cutoff must lie within the bin-center range") rather than low-level
//!   details.
//! - PyO3 conversion always uses `PyValueError` for these errors.
//!
//! Downstream usage
//! ----------------
//! - Fit and uncertainty entry points return [`MagnitudeResult<T>`] to
//!   propagate failures cleanly to callers.
//! - Python bindings raise `ValueError` with the Rust `Display` message; they
//!   do not pattern-match on [`MagnitudeError`] directly.
//! - Higher-level Rust code may match on [`MagnitudeError`] variants to
//!   implement custom recovery or reporting behavior.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each variant's `Display` message embeds its
//!   payload (offending value, index, or range) and that the estimation
//!   wrapper preserves the inner message.

use crate::estimation::errors::EstimationError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type MagnitudeResult<T> = Result<T, MagnitudeError>;

/// MagnitudeError — error conditions for the magnitude pipeline.
///
/// Purpose
/// -------
/// Represent all validation and computation failures that can occur while
/// binning an area sample, anchoring the power-law fit, computing the
/// event magnitude, or propagating parameter uncertainty.
///
/// Variants
/// --------
/// - `EmptySample`
///   The area sample contains no observations.
/// - `NonFiniteArea { index, value }`
///   An area measurement is NaN or ±∞; `index` points to the first
///   offending element.
/// - `NonPositiveArea { index, value }`
///   An area measurement is ≤ 0; `index` points to the first offending
///   element.
/// - `InvalidCutoff(value)`
///   The supplied cutoff is non-positive or non-finite.
/// - `InvalidErrorValue { name, value }`
///   A declared parameter uncertainty (`beta_error` or `cutoff_error`) is
///   non-positive or non-finite.
/// - `CutoffOutOfRange { cutoff, min, max }`
///   The cutoff lies outside the bin-center domain, so no anchor index
///   exists.
/// - `EmptyDensity`
///   The frequency-density curve has no entries. Unreachable with the
///   fixed bin geometry; defended against at the anchor lookup.
/// - `NonFiniteMagnitude(value)`
///   The computed magnitude is NaN or ±∞ (e.g., the anchor bin is empty so
///   the logarithm's argument collapses to zero).
/// - `DegenerateSimulation`
///   Every Monte-Carlo trial produced a non-finite magnitude, leaving no
///   sample to summarize.
/// - `Estimation(inner)`
///   A parameter-estimation failure surfaced through the analysis pipeline.
///
/// Invariants
/// ----------
/// - Each variant carries just enough information (offending value, index,
///   or domain bounds) for downstream logging and debugging without leaking
///   large data structures.
///
/// Notes
/// -----
/// - This enum implements [`std::error::Error`] and [`std::fmt::Display`]
///   so it can be used with idiomatic `?`-based error propagation in Rust.
/// - A [`From<MagnitudeError> for PyErr`] implementation maps all of these
///   cases to `PyValueError` at the Python boundary, with the human-readable
///   message taken from the `Display` implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum MagnitudeError {
    //------ Input validation errors ------
    EmptySample,
    NonFiniteArea { index: usize, value: f64 },
    NonPositiveArea { index: usize, value: f64 },
    InvalidCutoff(f64),
    InvalidErrorValue { name: &'static str, value: f64 },
    //------ Fit errors ------
    CutoffOutOfRange { cutoff: f64, min: f64, max: f64 },
    EmptyDensity,
    NonFiniteMagnitude(f64),
    //------ Uncertainty errors ------
    DegenerateSimulation,
    //------ Wrapped estimation errors ------
    Estimation(EstimationError),
}

impl std::error::Error for MagnitudeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MagnitudeError::Estimation(inner) => Some(inner),
            _ => None,
        }
    }
}

impl std::fmt::Display for MagnitudeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MagnitudeError::EmptySample => {
                write!(f, "Area sample must contain at least one observation.")
            }
            MagnitudeError::NonFiniteArea { index, value } => {
                write!(f, "Invalid area at index {index}: {value}. Must be a finite number.")
            }
            MagnitudeError::NonPositiveArea { index, value } => {
                write!(f, "Invalid area at index {index}: {value}. Must be strictly positive.")
            }
            MagnitudeError::InvalidCutoff(value) => {
                write!(f, "Invalid cutoff value: {value}. Must be finite and positive.")
            }
            MagnitudeError::InvalidErrorValue { name, value } => {
                write!(f, "Invalid {name}: {value}. Must be finite and positive.")
            }
            MagnitudeError::CutoffOutOfRange { cutoff, min, max } => {
                write!(
                    f,
                    "Cutoff {cutoff} lies outside the bin-center range [{min}, {max}]; \
                     no anchor bin exists."
                )
            }
            MagnitudeError::EmptyDensity => {
                write!(f, "Frequency-density curve is empty; nothing to anchor the fit to.")
            }
            MagnitudeError::NonFiniteMagnitude(value) => {
                write!(
                    f,
                    "Computed magnitude is not finite ({value}); the anchored density is \
                     likely zero at the chosen cutoff."
                )
            }
            MagnitudeError::DegenerateSimulation => {
                write!(f, "All Monte-Carlo trials produced non-finite magnitudes.")
            }
            MagnitudeError::Estimation(inner) => {
                write!(f, "Parameter estimation failed: {inner}")
            }
        }
    }
}

impl From<EstimationError> for MagnitudeError {
    fn from(err: EstimationError) -> MagnitudeError {
        MagnitudeError::Estimation(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<MagnitudeError> for PyErr {
    fn from(err: MagnitudeError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Basic `Display` formatting for MagnitudeError variants.
    // - Embedding of payload values (index, value, range) into messages.
    // - Wrapping of EstimationError through the `Estimation` variant.
    //
    // They intentionally DO NOT cover:
    // - The `From<MagnitudeError> for PyErr` conversion, since exercising it
    //   requires linking against the Python C API and is better handled by
    //   Python-level tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `MagnitudeError::EmptySample` formats to a non-empty,
    // human-readable message.
    //
    // Given
    // -----
    // - A `MagnitudeError::EmptySample` value.
    //
    // Expect
    // ------
    // - `format!("{err}")` is non-empty.
    fn magnitude_error_empty_sample_has_nonempty_display_message() {
        // Arrange
        let err = MagnitudeError::EmptySample;

        // Act
        let msg = err.to_string();

        // Assert
        assert!(!msg.trim().is_empty(), "Display message for EmptySample should not be empty.");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `MagnitudeError::NonPositiveArea` includes both the
    // offending index and value in its `Display` representation.
    //
    // Given
    // -----
    // - A `MagnitudeError::NonPositiveArea` with index = 7, value = -4.0.
    //
    // Expect
    // ------
    // - `format!("{err}")` contains "7" and "-4".
    fn magnitude_error_non_positive_area_includes_payload_in_display() {
        // Arrange
        let err = MagnitudeError::NonPositiveArea { index: 7, value: -4.0 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('7'), "Display message should include offending index.\nGot: {msg}");
        assert!(msg.contains("-4"), "Display message should include offending value.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `MagnitudeError::CutoffOutOfRange` reports the cutoff and
    // both domain bounds in its `Display` representation.
    //
    // Given
    // -----
    // - A `MagnitudeError::CutoffOutOfRange` with cutoff = 1.5, min = 2.2,
    //   max = 5.0e9.
    //
    // Expect
    // ------
    // - `format!("{err}")` contains "1.5" and "2.2".
    fn magnitude_error_cutoff_out_of_range_includes_bounds_in_display() {
        // Arrange
        let err = MagnitudeError::CutoffOutOfRange { cutoff: 1.5, min: 2.2, max: 5.0e9 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("1.5"), "Display message should include the cutoff.\nGot: {msg}");
        assert!(msg.contains("2.2"), "Display message should include the lower bound.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure that wrapping an `EstimationError` preserves the inner message
    // inside the `Estimation` variant's `Display` output.
    //
    // Given
    // -----
    // - An `EstimationError::DependencyUnavailable` wrapped via `From`.
    //
    // Expect
    // ------
    // - The wrapped message contains the inner error's message.
    fn magnitude_error_estimation_wrapper_preserves_inner_message() {
        // Arrange
        let inner = EstimationError::DependencyUnavailable;
        let inner_msg = inner.to_string();

        // Act
        let err: MagnitudeError = inner.into();
        let msg = err.to_string();

        // Assert
        assert!(
            msg.contains(&inner_msg),
            "Wrapped message should contain the inner message.\nGot: {msg}\nInner: {inner_msg}"
        );
    }
}
