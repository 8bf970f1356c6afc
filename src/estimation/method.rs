//! Estimation strategy selection and dispatch.
//!
//! Purpose
//! -------
//! Model the two interchangeable estimation strategies (the self-contained
//! search and the external reference implementation) as a small closed set
//! of variants behind one dispatch function, with an `auto` policy that
//! picks a variant once per call based on dependency availability.
//!
//! Key behaviors
//! -------------
//! - [`EstimationMethod`] is the caller-facing mode flag
//!   (`Auto | Official | Simplified`), parseable from the usual strings.
//! - [`EstimationMethod::resolve`] applies the selection policy exactly
//!   once per call: `Simplified` always runs locally; `Official` requires
//!   the reference implementation and fails with `DependencyUnavailable`
//!   when it is absent (never a silent substitution); `Auto` prefers the
//!   reference implementation and quietly falls back to the local search.
//! - [`estimate_parameters`] dispatches the resolved strategy and returns
//!   a [`ParameterEstimate`] labeled with the method that actually ran.
//! - [`official_available`] exposes the process-wide capability flag,
//!   probed once at first use and immutable afterwards.
//!
//! Invariants & assumptions
//! ------------------------
//! - Strategy selection happens in exactly one place; call sites never
//!   branch on dependency availability themselves.
//! - The capability flag is computed once per process (it is false by
//!   construction when the crate is built without `python-bindings`).
//! - The estimate's `method` label always names the strategy that
//!   produced it, so downstream reports can attribute the parameters.
//!
//! Conventions
//! -----------
//! - Method selector strings are lowercase (`"auto"`, `"official"`,
//!   `"simplified"`), matching the labels the estimate reports back.
//!
//! Downstream usage
//! ----------------
//! - `magnitude::analysis` calls [`estimate_parameters`] when the caller
//!   did not supply explicit power-law parameters.
//! - The PyO3 layer parses user strings via `FromStr` and forwards the
//!   mode flag unchanged.
//!
//! Testing notes
//! -------------
//! - Unit tests cover string parsing, the resolution policy without the
//!   reference implementation (explicit official fails, auto falls back),
//!   and dispatch labeling. The official strategy itself is exercised by
//!   Python-level integration tests where the dependency exists.
use crate::estimation::{
    errors::{EstimationError, EstimationResult},
    simplified,
};
use crate::magnitude::data::AreaSample;
use std::str::FromStr;

/// `EstimationMethod` — caller-facing estimation mode flag.
///
/// Purpose
/// -------
/// Select how power-law parameters are estimated when the caller does not
/// supply them: delegate to the external reference implementation, run the
/// self-contained search, or let the crate pick based on availability.
///
/// Variants
/// --------
/// - `Auto`
///   Use the reference implementation when available, else the
///   self-contained search. The default.
/// - `Official`
///   Require the reference implementation; fail with
///   `DependencyUnavailable` when it cannot be reached.
/// - `Simplified`
///   Always run the self-contained search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EstimationMethod {
    #[default]
    Auto,
    Official,
    Simplified,
}

/// `FitMethod` — the strategy that actually produced an estimate.
///
/// Distinct from [`EstimationMethod`]: the mode flag expresses intent
/// (including `Auto`), while this label records the resolved outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMethod {
    Official,
    Simplified,
}

/// `ParameterEstimate` — estimated power-law parameters plus provenance.
///
/// Purpose
/// -------
/// Carry the estimated cutoff/exponent pair, the heuristic (or
/// bootstrap-derived) uncertainties, and the label of the strategy that
/// produced them.
///
/// Fields
/// ------
/// - `cutoff`: `f64`
///   Estimated smallest area following the power law.
/// - `beta`: `f64`
///   Estimated scaling exponent, non-positive.
/// - `cutoff_error`: `f64`
///   Heuristic cutoff uncertainty (10% of the cutoff).
/// - `beta_error`: `f64`
///   Exponent uncertainty: the reference implementation's estimate when
///   exposed, else `|beta - 1| / sqrt(tail size)`.
/// - `method`: [`FitMethod`]
///   Which strategy produced the estimate.
///
/// Invariants
/// ----------
/// - `cutoff > 0`, `beta <= 0`, both errors ≥ 0 and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterEstimate {
    /// Estimated cutoff (xmin).
    pub cutoff: f64,
    /// Estimated exponent, non-positive.
    pub beta: f64,
    /// Heuristic cutoff uncertainty.
    pub cutoff_error: f64,
    /// Exponent uncertainty.
    pub beta_error: f64,
    /// Strategy that produced the estimate.
    pub method: FitMethod,
}

impl std::fmt::Display for EstimationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimationMethod::Auto => write!(f, "auto"),
            EstimationMethod::Official => write!(f, "official"),
            EstimationMethod::Simplified => write!(f, "simplified"),
        }
    }
}

impl FromStr for EstimationMethod {
    type Err = EstimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(EstimationMethod::Auto),
            "official" => Ok(EstimationMethod::Official),
            "simplified" => Ok(EstimationMethod::Simplified),
            other => Err(EstimationError::UnknownMethod(other.to_string())),
        }
    }
}

impl std::fmt::Display for FitMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitMethod::Official => write!(f, "official"),
            FitMethod::Simplified => write!(f, "simplified"),
        }
    }
}

impl EstimationMethod {
    /// Resolve the mode flag into the strategy to run.
    ///
    /// Returns
    /// -------
    /// `EstimationResult<FitMethod>`
    ///   - `Ok(FitMethod::Simplified)` for `Simplified`, and for `Auto`
    ///     when the reference implementation is absent.
    ///   - `Ok(FitMethod::Official)` for `Official` or `Auto` when the
    ///     reference implementation is available.
    ///   - `Err(EstimationError::DependencyUnavailable)` for an explicit
    ///     `Official` request without the dependency.
    ///
    /// Notes
    /// -----
    /// - Resolution consults the process-wide capability flag; it never
    ///   re-probes the dependency per call.
    pub fn resolve(self) -> EstimationResult<FitMethod> {
        match self {
            EstimationMethod::Simplified => Ok(FitMethod::Simplified),
            EstimationMethod::Official => {
                if official_available() {
                    Ok(FitMethod::Official)
                } else {
                    Err(EstimationError::DependencyUnavailable)
                }
            }
            EstimationMethod::Auto => {
                if official_available() {
                    Ok(FitMethod::Official)
                } else {
                    Ok(FitMethod::Simplified)
                }
            }
        }
    }
}

/// Whether the external reference implementation can be used in this
/// process.
///
/// False by construction when the crate is built without the
/// `python-bindings` feature; otherwise probed once (and only once) by
/// importing the `powerlaw` package in the embedded interpreter.
pub fn official_available() -> bool {
    #[cfg(feature = "python-bindings")]
    {
        crate::estimation::official::reference_available()
    }
    #[cfg(not(feature = "python-bindings"))]
    {
        false
    }
}

/// Estimate power-law parameters with the requested mode.
///
/// Parameters
/// ----------
/// - `sample`: [`AreaSample`]
///   Validated area measurements.
/// - `method`: [`EstimationMethod`]
///   Caller-facing mode flag; resolved once via
///   [`EstimationMethod::resolve`].
/// - `xmin_range`: `Option<(f64, f64)>`
///   Optional cutoff search range, honored by the simplified strategy
///   (the reference implementation performs its own search).
///
/// Returns
/// -------
/// `EstimationResult<ParameterEstimate>`
///   The estimate labeled with the strategy that actually ran.
///
/// Errors
/// ------
/// - `EstimationError::DependencyUnavailable`
///   Explicit `Official` request without the reference implementation.
/// - `EstimationError::InvalidRange { .. }`
///   Malformed caller-supplied search range (simplified strategy).
/// - `EstimationError::Dependency(..)`
///   The reference implementation was reached but failed.
pub fn estimate_parameters(
    sample: &AreaSample, method: EstimationMethod, xmin_range: Option<(f64, f64)>,
) -> EstimationResult<ParameterEstimate> {
    match method.resolve()? {
        FitMethod::Simplified => simplified::estimate(sample, xmin_range),
        FitMethod::Official => dispatch_official(sample),
    }
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Forward to the reference implementation when compiled in.
///
/// The non-bindings build keeps the arm for exhaustiveness; `resolve`
/// cannot produce `FitMethod::Official` there, so the error is
/// unreachable in practice.
#[cfg(feature = "python-bindings")]
#[inline]
fn dispatch_official(sample: &AreaSample) -> EstimationResult<ParameterEstimate> {
    crate::estimation::official::estimate(sample)
}

#[cfg(not(feature = "python-bindings"))]
#[inline]
fn dispatch_official(_sample: &AreaSample) -> EstimationResult<ParameterEstimate> {
    Err(EstimationError::DependencyUnavailable)
}
