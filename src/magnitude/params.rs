//! Power-law parameter container with sign normalization.
//!
//! Purpose
//! -------
//! Provide a validated container for the two numbers describing the fitted
//! power-law tail (the cutoff area and the scaling exponent beta), plus
//! their optional declared uncertainties. Sign normalization of beta happens
//! here, once, so every downstream computation can assume a negative
//! exponent.
//!
//! Key behaviors
//! -------------
//! - [`PowerLawParams::new`] validates the cutoff and stores beta with a
//!   negative sign regardless of the sign the caller supplied.
//! - [`PowerLawParams::with_errors`] attaches optional, validated
//!   `cutoff_error` / `beta_error` values.
//! - [`PowerLawParams::has_errors`] reports whether both uncertainties are
//!   known, which is the activation condition for the Monte-Carlo path.
//!
//! Invariants & assumptions
//! ------------------------
//! - `cutoff` is finite and strictly positive.
//! - `beta` is finite and non-positive after construction.
//! - Each declared error, when present, is finite and strictly positive.
//! - Whether the cutoff admits an anchor bin is a property of the bin
//!   geometry and is checked at fit time, not here.
//!
//! Conventions
//! -----------
//! - Beta is stored negative by convention, matching the frequency-density
//!   formulation where density falls off as area^beta with beta < 0.
//!
//! Downstream usage
//! ----------------
//! - `magnitude::fit` consumes the cutoff/beta pair; `magnitude::uncertainty`
//!   additionally reads the declared errors.
//! - `estimation` produces values that are converted into this type by the
//!   analysis pipeline.
//!
//! Testing notes
//! -------------
//! - Unit tests cover sign normalization (positive input stored negative),
//!   validation of the cutoff and error fields, and the `has_errors`
//!   activation rule.
use crate::magnitude::errors::{MagnitudeError, MagnitudeResult};

/// `PowerLawParams` — cutoff and exponent of the power-law tail.
///
/// Purpose
/// -------
/// Hold the cutoff/exponent pair that anchors the power-law fit, together
/// with the optional symmetric uncertainties declared for each. The sign of
/// the exponent is normalized to negative at construction so the fit and
/// the Monte-Carlo path never branch on it.
///
/// Fields
/// ------
/// - `cutoff`: `f64`
///   Smallest area above which the power-law model is assumed valid.
///   Finite and strictly positive.
/// - `beta`: `f64`
///   Power-law scaling exponent, stored non-positive.
/// - `cutoff_error`: `Option<f64>`
///   Declared symmetric uncertainty in the cutoff; finite and positive when
///   present.
/// - `beta_error`: `Option<f64>`
///   Declared symmetric uncertainty in beta; finite and positive when
///   present.
///
/// Invariants
/// ----------
/// - `cutoff.is_finite() && cutoff > 0.0`.
/// - `beta.is_finite() && beta <= 0.0`.
/// - `cutoff_error` and `beta_error`, when `Some`, are finite and > 0.
///
/// Performance
/// -----------
/// - Four scalars; derives `Copy` and is cheap to pass by value.
///
/// Notes
/// -----
/// - A beta of exactly zero is accepted here (it is sign-neutral); the fit
///   will reject it indirectly if it produces a non-finite magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawParams {
    /// Smallest area following the power law (> 0, finite).
    pub cutoff: f64,
    /// Scaling exponent, normalized to be non-positive.
    pub beta: f64,
    /// Declared symmetric cutoff uncertainty, if known.
    pub cutoff_error: Option<f64>,
    /// Declared symmetric beta uncertainty, if known.
    pub beta_error: Option<f64>,
}

impl PowerLawParams {
    /// Construct validated parameters with no declared uncertainties.
    ///
    /// Parameters
    /// ----------
    /// - `cutoff`: `f64`
    ///   Smallest area following the power law. Must be finite and > 0.
    /// - `beta`: `f64`
    ///   Scaling exponent in either sign convention; a positive value is
    ///   stored as its negation.
    ///
    /// Returns
    /// -------
    /// `MagnitudeResult<PowerLawParams>`
    ///   - `Ok(params)` with `beta <= 0` on success.
    ///   - `Err(MagnitudeError::InvalidCutoff)` when the cutoff is
    ///     non-finite or ≤ 0.
    ///   - `Err(MagnitudeError::InvalidErrorValue)` when beta is non-finite
    ///     (reported under the name `"beta"`).
    ///
    /// Panics
    /// ------
    /// - Never panics.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use landslide_magnitude::magnitude::PowerLawParams;
    ///
    /// let params = PowerLawParams::new(100.0, 2.3).unwrap();
    /// assert_eq!(params.beta, -2.3);
    /// ```
    pub fn new(cutoff: f64, beta: f64) -> MagnitudeResult<Self> {
        if !cutoff.is_finite() || cutoff <= 0.0 {
            return Err(MagnitudeError::InvalidCutoff(cutoff));
        }
        if !beta.is_finite() {
            return Err(MagnitudeError::InvalidErrorValue { name: "beta", value: beta });
        }
        let beta = if beta > 0.0 { -beta } else { beta };
        Ok(PowerLawParams { cutoff, beta, cutoff_error: None, beta_error: None })
    }

    /// Attach optional declared uncertainties to the parameters.
    ///
    /// Parameters
    /// ----------
    /// - `cutoff_error`: `Option<f64>`
    ///   Symmetric cutoff uncertainty; must be finite and > 0 when `Some`.
    /// - `beta_error`: `Option<f64>`
    ///   Symmetric beta uncertainty; must be finite and > 0 when `Some`.
    ///
    /// Returns
    /// -------
    /// `MagnitudeResult<PowerLawParams>`
    ///   - `Ok(params)` with the errors attached.
    ///   - `Err(MagnitudeError::InvalidErrorValue)` naming the offending
    ///     field when a supplied error is non-finite or ≤ 0.
    ///
    /// Notes
    /// -----
    /// - Supplying only one of the two errors is allowed; the Monte-Carlo
    ///   path simply stays inactive until both are known.
    pub fn with_errors(
        mut self, cutoff_error: Option<f64>, beta_error: Option<f64>,
    ) -> MagnitudeResult<Self> {
        if let Some(value) = cutoff_error {
            if !value.is_finite() || value <= 0.0 {
                return Err(MagnitudeError::InvalidErrorValue { name: "cutoff_error", value });
            }
        }
        if let Some(value) = beta_error {
            if !value.is_finite() || value <= 0.0 {
                return Err(MagnitudeError::InvalidErrorValue { name: "beta_error", value });
            }
        }
        self.cutoff_error = cutoff_error;
        self.beta_error = beta_error;
        Ok(self)
    }

    /// Whether both declared uncertainties are known.
    ///
    /// This is the activation condition for the Monte-Carlo uncertainty
    /// path; with either error missing, the reported uncertainty is the
    /// explicit unavailable sentinel.
    pub fn has_errors(&self) -> bool {
        self.cutoff_error.is_some() && self.beta_error.is_some()
    }
}
