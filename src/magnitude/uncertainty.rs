//! Monte-Carlo propagation of parameter uncertainty into the magnitude.
//!
//! Purpose
//! -------
//! Propagate the declared cutoff/exponent uncertainties into an uncertainty
//! on the landslide-event magnitude by re-evaluating the magnitude formula
//! under simulated parameter draws. Active only when both uncertainties are
//! known; otherwise an explicit unavailable sentinel is reported.
//!
//! Key behaviors
//! -------------
//! - Build 500-point symmetric spans around beta and around the cutoff
//!   (the cutoff span's lower bound clipped at the bin-domain floor 2), and
//!   convert each span into a Gaussian proxy with matching mean and
//!   standard deviation.
//! - Run 10,000 independent trials: draw a (cutoff, beta) pair from the
//!   proxies and recompute the magnitude denominator with the drawn
//!   parameters.
//! - Across all trials, the observed anchor density, the largest observed
//!   area, and the fitted midpoint density `midy` stay frozen at their
//!   single-shot values; only the denominator varies. This asymmetry is a
//!   preserved contract of the calibrated method, not an approximation to
//!   be corrected.
//! - Drop non-finite trial magnitudes and report the standard deviation of
//!   the survivors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both `cutoff_error` and `beta_error` are validated (finite, > 0) by
//!   [`PowerLawParams`]; with either absent the result is
//!   [`Uncertainty::Unavailable`].
//! - The trial loop is a pure map over a pre-generated draw sequence
//!   followed by a filter and reduce, so results are bit-identical for a
//!   given seed whether the map runs sequentially or under rayon (the
//!   `parallel` feature parallelizes only the map; draws stay sequential).
//! - Discarding non-finite per-trial values is the sole sanctioned
//!   non-finite leak in the crate; an all-non-finite outcome is reported
//!   as `DegenerateSimulation`.
//!
//! Conventions
//! -----------
//! - Standard deviations (of the spans and of the surviving trials) use
//!   the population form (divide by N), matching the calibrated method.
//! - Reproducibility: callers pass an optional `u64` seed; `None` seeds
//!   from entropy.
//!
//! Downstream usage
//! ----------------
//! - `magnitude::analysis` calls [`mls_uncertainty`] after a successful
//!   fit and attaches the result to the reported estimate.
//! - Callers needing a bounded runtime use [`mls_uncertainty_with_trials`]
//!   with a smaller trial count.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the unavailable sentinel, bit-identical results
//!   under a fixed seed, shrinking across-seed spread as the trial count
//!   grows, the cutoff-span clipping, and the degenerate all-non-finite
//!   outcome.
use crate::magnitude::{
    binning::BIN_DOMAIN_FLOOR,
    errors::{MagnitudeError, MagnitudeResult},
    fit::PowerLawFit,
    params::PowerLawParams,
    reference::reference_scale,
};
use rand::{Rng, SeedableRng, distributions::Distribution, rngs::StdRng};
use statrs::distribution::Normal;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of points in each symmetric parameter span.
pub const SPAN_POINTS: usize = 500;

/// Number of Monte-Carlo trials in the default configuration.
pub const TRIAL_COUNT: usize = 10_000;

/// `Uncertainty` — magnitude uncertainty or an explicit unavailable marker.
///
/// Purpose
/// -------
/// Distinguish a computed magnitude uncertainty from the case where no
/// uncertainty could be computed because the parameter errors were not
/// declared. Callers must be able to tell the two apart, so the sentinel
/// is a dedicated variant rather than a magic number.
///
/// Variants
/// --------
/// - `Estimated(value)`
///   Standard deviation of the surviving trial magnitudes; finite and
///   non-negative.
/// - `Unavailable`
///   One or both parameter uncertainties were not declared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Uncertainty {
    Estimated(f64),
    Unavailable,
}

impl Uncertainty {
    /// The numeric uncertainty, or `None` when unavailable.
    pub fn value(&self) -> Option<f64> {
        match self {
            Uncertainty::Estimated(value) => Some(*value),
            Uncertainty::Unavailable => None,
        }
    }

    /// Whether a numeric uncertainty was computed.
    pub fn is_available(&self) -> bool {
        matches!(self, Uncertainty::Estimated(_))
    }
}

impl std::fmt::Display for Uncertainty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Uncertainty::Estimated(value) => write!(f, "{value}"),
            Uncertainty::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Propagate declared parameter uncertainties into a magnitude
/// uncertainty with the default trial count.
///
/// Parameters
/// ----------
/// - `fit`: [`PowerLawFit`]
///   The single-shot fit whose anchor density, maximum area, and midpoint
///   density are held fixed across trials.
/// - `params`: [`PowerLawParams`]
///   Parameters with their declared uncertainties; with either error
///   absent the result is [`Uncertainty::Unavailable`].
/// - `seed`: `Option<u64>`
///   Seed for the pseudo-random generator; `None` seeds from entropy.
///   Fixing the seed makes the result bit-reproducible.
///
/// Returns
/// -------
/// `MagnitudeResult<Uncertainty>`
///   - `Ok(Uncertainty::Estimated(std))` on success.
///   - `Ok(Uncertainty::Unavailable)` when either error is missing.
///   - `Err(MagnitudeError)` on degenerate configurations.
///
/// Errors
/// ------
/// - `MagnitudeError::InvalidErrorValue { .. }`
///   A Gaussian proxy could not be built because a span degenerated to
///   zero spread (e.g., an error so small its 500-point span collapses).
/// - `MagnitudeError::DegenerateSimulation`
///   Every trial produced a non-finite magnitude.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `MagnitudeError`.
pub fn mls_uncertainty(
    fit: &PowerLawFit, params: &PowerLawParams, seed: Option<u64>,
) -> MagnitudeResult<Uncertainty> {
    mls_uncertainty_with_trials(fit, params, TRIAL_COUNT, seed)
}

/// Propagate declared parameter uncertainties with an explicit trial
/// count.
///
/// Identical to [`mls_uncertainty`] except that the caller bounds the
/// number of Monte-Carlo trials, trading precision of the uncertainty
/// estimate for runtime.
///
/// Parameters
/// ----------
/// - `trials`: `usize`
///   Number of Monte-Carlo trials; must be ≥ 1 for a meaningful result
///   (0 trials reports `DegenerateSimulation`).
///
/// Notes
/// -----
/// - See [`mls_uncertainty`] for the remaining parameters, the return
///   contract, and the error conditions.
pub fn mls_uncertainty_with_trials(
    fit: &PowerLawFit, params: &PowerLawParams, trials: usize, seed: Option<u64>,
) -> MagnitudeResult<Uncertainty> {
    let (cutoff_error, beta_error) = match (params.cutoff_error, params.beta_error) {
        (Some(cutoff_error), Some(beta_error)) => (cutoff_error, beta_error),
        _ => return Ok(Uncertainty::Unavailable),
    };

    let beta_span = linspace(params.beta - beta_error, params.beta + beta_error, SPAN_POINTS);
    let cutoff_lo = (params.cutoff - cutoff_error).max(BIN_DOMAIN_FLOOR);
    let cutoff_span = linspace(cutoff_lo, params.cutoff + cutoff_error, SPAN_POINTS);

    let beta_proxy = gaussian_proxy(&beta_span, "beta_error")?;
    let cutoff_proxy = gaussian_proxy(&cutoff_span, "cutoff_error")?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Draws are generated sequentially from the seeded generator; only the
    // pure per-trial map below may run in parallel, so a given seed yields
    // bit-identical results either way.
    let draws = draw_parameter_pairs(&cutoff_proxy, &beta_proxy, trials, &mut rng);

    #[cfg(feature = "parallel")]
    let magnitudes: Vec<f64> = draws
        .par_iter()
        .map(|&(cutoff_sim, beta_sim)| {
            trial_magnitude(fit.anchor_density, fit.max_area, fit.midy, cutoff_sim, beta_sim)
        })
        .collect();

    #[cfg(not(feature = "parallel"))]
    let magnitudes: Vec<f64> = draws
        .iter()
        .map(|&(cutoff_sim, beta_sim)| {
            trial_magnitude(fit.anchor_density, fit.max_area, fit.midy, cutoff_sim, beta_sim)
        })
        .collect();

    let survivors: Vec<f64> = magnitudes.into_iter().filter(|m| m.is_finite()).collect();
    if survivors.is_empty() {
        return Err(MagnitudeError::DegenerateSimulation);
    }

    Ok(Uncertainty::Estimated(population_std(&survivors)))
}

//
// ---------- Private helpers (compact docs) ----------
//

/// `n` evenly spaced values from `start` to `stop` inclusive.
///
/// Assumes `n >= 2`; callers in this module only pass [`SPAN_POINTS`].
#[inline]
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Arithmetic mean of a non-empty slice.
#[inline]
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divide by N) of a non-empty slice.
#[inline]
fn population_std(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Gaussian proxy with the span's first two moments.
///
/// Returns `InvalidErrorValue` (naming the declared error the span came
/// from) when the spread degenerates and no proper Normal exists.
#[inline]
fn gaussian_proxy(span: &[f64], error_name: &'static str) -> MagnitudeResult<Normal> {
    let m = mean(span);
    let s = population_std(span);
    Normal::new(m, s)
        .map_err(|_| MagnitudeError::InvalidErrorValue { name: error_name, value: s })
}

/// Draw `trials` independent (cutoff, beta) pairs, cutoff first within
/// each trial to keep the draw order deterministic for a given seed.
#[inline]
fn draw_parameter_pairs<R: Rng>(
    cutoff_proxy: &Normal, beta_proxy: &Normal, trials: usize, rng: &mut R,
) -> Vec<(f64, f64)> {
    (0..trials)
        .map(|_| {
            let cutoff_sim = cutoff_proxy.sample(rng);
            let beta_sim = beta_proxy.sample(rng);
            (cutoff_sim, beta_sim)
        })
        .collect()
}

/// Magnitude of a single trial.
///
/// The trial re-anchors against the fixed observed anchor density, but
/// the numerator keeps the original `midy`; only the denominator varies
/// across trials.
#[inline]
fn trial_magnitude(
    anchor_density: f64, max_area: f64, midy: f64, cutoff_sim: f64, beta_sim: f64,
) -> f64 {
    let _trial_scale = anchor_density / cutoff_sim.powf(beta_sim);
    let midx_sim = 10.0_f64.powf((max_area.log10() + cutoff_sim.log10()) / 2.0);
    let reference_sim = reference_scale(beta_sim);
    (midy / (reference_sim * midx_sim.powf(beta_sim))).log10()
}
