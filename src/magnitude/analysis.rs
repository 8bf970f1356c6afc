//! One-call analysis pipeline from areas to a magnitude report.
//!
//! Purpose
//! -------
//! Wire the estimation, fitting, and uncertainty stages into the single
//! entry point that consuming layers (web handlers, CLIs, notebooks) call:
//! resolve power-law parameters (accept the caller's or estimate them),
//! anchor the fit, and propagate uncertainty when possible.
//!
//! Key behaviors
//! -------------
//! - [`analyze`] accepts an [`AreaSample`] plus [`AnalysisOptions`] and
//!   returns a [`MagnitudeReport`] carrying the magnitude estimate, the
//!   resolved parameters, and the plotting series (observed scatter and
//!   fitted tail).
//! - Caller-supplied parameters always win; otherwise the estimator runs
//!   with the requested mode and the report records which strategy
//!   produced the parameters ([`ParameterSource`]).
//! - Uncertainty is computed only when both parameter errors are known;
//!   otherwise the report carries the explicit unavailable sentinel.
//!
//! Invariants & assumptions
//! ------------------------
//! - The pipeline is a pure function of its inputs; concurrent calls need
//!   no synchronization.
//! - Estimation failures pass through unchanged, wrapped as
//!   `MagnitudeError::Estimation`.
//! - The report never contains a non-finite magnitude; the fit rejects
//!   those before the report is assembled.
//!
//! Conventions
//! -----------
//! - Chart rendering is the consumer's concern: the report exposes numeric
//!   series only, never pixels.
//!
//! Downstream usage
//! ----------------
//! - The PyO3 `Magnitude` class is a thin wrapper over [`analyze`].
//! - Rust callers embed the report's series into whatever output format
//!   they serve.
//!
//! Testing notes
//! -------------
//! - Unit tests cover parameter-source labeling, the unavailable-vs-
//!   estimated uncertainty split, and seed plumbing. The full synthetic
//!   end-to-end scenario lives in the integration suite.
use crate::estimation::{EstimationMethod, FitMethod, estimate_parameters};
use crate::magnitude::{
    data::AreaSample,
    errors::MagnitudeResult,
    fit::PowerLawFit,
    params::PowerLawParams,
    uncertainty::{Uncertainty, mls_uncertainty},
};
use ndarray::Array1;

/// `AnalysisOptions` — knobs for a single pipeline invocation.
///
/// Purpose
/// -------
/// Bundle the optional inputs of [`analyze`] so call sites stay readable
/// and defaults are centralized.
///
/// Fields
/// ------
/// - `params`: `Option<PowerLawParams>`
///   Explicit power-law parameters; when present, estimation is skipped
///   entirely.
/// - `method`: [`EstimationMethod`]
///   Estimation mode used when `params` is `None`. Defaults to `Auto`.
/// - `xmin_range`: `Option<(f64, f64)>`
///   Optional cutoff search range for the simplified estimator.
/// - `seed`: `Option<u64>`
///   Seed for the Monte-Carlo uncertainty stage; `None` seeds from
///   entropy.
///
/// Notes
/// -----
/// - `AnalysisOptions::default()` reproduces the common web-layer call:
///   estimate automatically, unseeded.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisOptions {
    /// Explicit parameters; estimation is skipped when present.
    pub params: Option<PowerLawParams>,
    /// Estimation mode when no explicit parameters are given.
    pub method: EstimationMethod,
    /// Optional cutoff search range for the simplified estimator.
    pub xmin_range: Option<(f64, f64)>,
    /// Monte-Carlo seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

/// `ParameterSource` — where the fitted parameters came from.
///
/// Variants
/// --------
/// - `UserSupplied`
///   The caller passed explicit parameters.
/// - `Estimated(method)`
///   The estimator ran; `method` records the strategy that produced the
///   parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterSource {
    UserSupplied,
    Estimated(FitMethod),
}

impl std::fmt::Display for ParameterSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterSource::UserSupplied => write!(f, "user-supplied"),
            ParameterSource::Estimated(method) => write!(f, "{method}"),
        }
    }
}

/// `MagnitudeEstimate` — the pipeline's scalar outcome.
///
/// Fields
/// ------
/// - `magnitude`: `f64`
///   The landslide-event magnitude (finite).
/// - `uncertainty`: [`Uncertainty`]
///   Monte-Carlo uncertainty, or the unavailable sentinel when either
///   parameter error was unknown.
/// - `source`: [`ParameterSource`]
///   Provenance of the fitted parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeEstimate {
    /// Landslide-event magnitude.
    pub magnitude: f64,
    /// Magnitude uncertainty or the unavailable sentinel.
    pub uncertainty: Uncertainty,
    /// Provenance of the fitted parameters.
    pub source: ParameterSource,
}

/// `MagnitudeReport` — full pipeline output for one sample.
///
/// Purpose
/// -------
/// Carry everything a consuming layer needs: the scalar estimate, the
/// resolved parameters, and the numeric series for chart drawing.
///
/// Fields
/// ------
/// - `estimate`: [`MagnitudeEstimate`]
///   Magnitude, uncertainty, and parameter provenance.
/// - `params`: [`PowerLawParams`]
///   The parameters the fit actually used (normalized, with any errors).
/// - `fit`: [`PowerLawFit`]
///   The anchored fit, including the observed curve and the fitted tail.
///
/// Notes
/// -----
/// - [`MagnitudeReport::observed_series`] and
///   [`MagnitudeReport::fitted_series`] expose the two chart series
///   directly.
#[derive(Debug, Clone, PartialEq)]
pub struct MagnitudeReport {
    /// Scalar outcome of the pipeline.
    pub estimate: MagnitudeEstimate,
    /// Parameters the fit used.
    pub params: PowerLawParams,
    /// The anchored power-law fit.
    pub fit: PowerLawFit,
}

impl MagnitudeReport {
    /// Observed (bin-center, density) series over all 119 bins.
    pub fn observed_series(&self) -> (&Array1<f64>, &Array1<f64>) {
        (&self.fit.observed.centers, &self.fit.observed.density)
    }

    /// Fitted (x, y) series restricted to x ≥ cutoff.
    pub fn fitted_series(&self) -> (&Array1<f64>, &Array1<f64>) {
        (&self.fit.tail_centers, &self.fit.tail_density)
    }
}

/// Run the full magnitude pipeline on a sample.
///
/// Parameters
/// ----------
/// - `sample`: [`AreaSample`]
///   Validated area measurements.
/// - `options`: [`AnalysisOptions`]
///   Explicit parameters, estimation mode, search range, and seed.
///
/// Returns
/// -------
/// `MagnitudeResult<MagnitudeReport>`
///   The complete report on success.
///
/// Errors
/// ------
/// - `MagnitudeError::Estimation(..)`
///   Parameter estimation failed (e.g., an explicit official request
///   without the dependency, or a malformed search range).
/// - `MagnitudeError::CutoffOutOfRange { .. }` /
///   `MagnitudeError::NonFiniteMagnitude(..)`
///   The fit could not be anchored or degenerated.
/// - `MagnitudeError::DegenerateSimulation`
///   Every Monte-Carlo trial produced a non-finite magnitude.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `MagnitudeError`.
///
/// Examples
/// --------
/// ```rust
/// use landslide_magnitude::magnitude::{AnalysisOptions, AreaSample, PowerLawParams, analyze};
/// use ndarray::Array1;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let areas: Array1<f64> = Array1::from_iter((1..=500).map(|i| 60.0 + 4.0 * i as f64));
/// let sample = AreaSample::new(areas)?;
/// let options = AnalysisOptions {
///     params: Some(PowerLawParams::new(150.0, -2.3)?),
///     ..Default::default()
/// };
///
/// let report = analyze(&sample, &options)?;
/// assert!(report.estimate.magnitude.is_finite());
/// # Ok(())
/// # }
/// ```
pub fn analyze(sample: &AreaSample, options: &AnalysisOptions) -> MagnitudeResult<MagnitudeReport> {
    let (params, source) = match options.params {
        Some(params) => (params, ParameterSource::UserSupplied),
        None => {
            let estimated = estimate_parameters(sample, options.method, options.xmin_range)?;
            let params = PowerLawParams::new(estimated.cutoff, estimated.beta)?
                .with_errors(Some(estimated.cutoff_error), Some(estimated.beta_error))?;
            (params, ParameterSource::Estimated(estimated.method))
        }
    };

    let fit = PowerLawFit::fit(sample, &params)?;
    let uncertainty = mls_uncertainty(&fit, &params, options.seed)?;

    let estimate = MagnitudeEstimate { magnitude: fit.magnitude, uncertainty, source };
    Ok(MagnitudeReport { estimate, params, fit })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Parameter-source labeling for both the user-supplied and the
    //   estimated path.
    // - The unavailable-vs-estimated uncertainty split driven by the
    //   declared parameter errors.
    // - Seed plumbing into the Monte-Carlo stage.
    //
    // They intentionally DO NOT cover:
    // - The full synthetic end-to-end scenario with tolerance assertions,
    //   which lives in the integration suite.
    // -------------------------------------------------------------------------

    /// A dense synthetic sample with a populated anchor region.
    fn dense_sample() -> AreaSample {
        let areas: Array1<f64> = Array1::from_iter((1..=2_000).map(|i| 10.0 + 5.0 * i as f64));
        AreaSample::new(areas).expect("valid sample")
    }

    #[test]
    // Purpose
    // -------
    // Verify that explicit parameters skip estimation, are labeled
    // user-supplied, and — without declared errors — yield the
    // unavailable uncertainty sentinel.
    //
    // Given
    // -----
    // - A dense sample and explicit params (cutoff 100, beta -2.3) with
    //   no errors.
    //
    // Expect
    // ------
    // - A finite magnitude, `Uncertainty::Unavailable`, and the
    //   `UserSupplied` source.
    fn analyze_user_params_without_errors_reports_unavailable() {
        // Arrange
        let sample = dense_sample();
        let params = PowerLawParams::new(100.0, -2.3).expect("valid params");
        let options = AnalysisOptions { params: Some(params), ..Default::default() };

        // Act
        let report = analyze(&sample, &options).expect("pipeline should succeed");

        // Assert
        assert!(report.estimate.magnitude.is_finite());
        assert_eq!(report.estimate.uncertainty, Uncertainty::Unavailable);
        assert_eq!(report.estimate.source, ParameterSource::UserSupplied);
        let (observed_x, observed_y) = report.observed_series();
        assert_eq!(observed_x.len(), 119);
        assert_eq!(observed_y.len(), 119);
    }

    #[test]
    // Purpose
    // -------
    // Verify that declared parameter errors activate the Monte-Carlo
    // stage and that a fixed seed reproduces the uncertainty.
    //
    // Given
    // -----
    // - Explicit params with both errors declared and seed 42, run twice.
    //
    // Expect
    // ------
    // - Both runs report the same finite, positive uncertainty.
    fn analyze_with_errors_and_seed_is_reproducible() {
        // Arrange
        let sample = dense_sample();
        let params = PowerLawParams::new(100.0, -2.3)
            .and_then(|p| p.with_errors(Some(10.0), Some(0.1)))
            .expect("valid params");
        let options =
            AnalysisOptions { params: Some(params), seed: Some(42), ..Default::default() };

        // Act
        let first = analyze(&sample, &options).expect("pipeline should succeed");
        let second = analyze(&sample, &options).expect("pipeline should succeed");

        // Assert
        match (first.estimate.uncertainty, second.estimate.uncertainty) {
            (Uncertainty::Estimated(a), Uncertainty::Estimated(b)) => {
                assert!(a.is_finite() && a > 0.0);
                assert_eq!(a.to_bits(), b.to_bits());
            }
            other => panic!("expected estimated uncertainties, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that the estimated path runs when no explicit parameters are
    // given and labels the report with the resolved strategy.
    //
    // Given
    // -----
    // - A dense sample, no explicit params, auto mode.
    //
    // Expect
    // ------
    // - The report's source is `Estimated(_)`, its params carry both
    //   heuristic errors, and the uncertainty is therefore available.
    fn analyze_estimated_path_labels_strategy_and_activates_uncertainty() {
        // Arrange
        let sample = dense_sample();
        let options = AnalysisOptions { seed: Some(7), ..Default::default() };

        // Act
        let report = analyze(&sample, &options).expect("pipeline should succeed");

        // Assert
        assert!(matches!(report.estimate.source, ParameterSource::Estimated(_)));
        assert!(report.params.has_errors(), "estimated params always carry heuristic errors");
        assert!(report.estimate.uncertainty.is_available());
    }
}
