//! Self-contained power-law parameter estimation.
//!
//! Purpose
//! -------
//! Estimate the power-law cutoff and exponent directly from an area sample
//! using a maximum-likelihood exponent per candidate cutoff and a
//! Kolmogorov-Smirnov distance to score candidates — a self-contained
//! rendition of the Clauset, Shalizi & Newman (2009) methodology, with
//! layered fallbacks for thin samples.
//!
//! Key behaviors
//! -------------
//! - Search 50 evenly spaced cutoff candidates across [P10, P50] of the
//!   sorted sample (caller-overridable range); a candidate qualifies only
//!   with at least 50 tail observations.
//! - Per qualifying candidate, estimate the continuous-MLE exponent
//!   `beta = -(1 + n / Σ ln(x_i / cutoff))` over the tail and score it by
//!   the maximum distance between the theoretical power-law CDF and the
//!   empirical CDF on a 1000-point grid spanning [cutoff, max(tail)].
//! - Keep the minimum-distance candidate (the first seen wins ties).
//! - Fallback when no candidate qualifies: cutoff = P25, exponent from the
//!   slope of an ordinary-least-squares line through the populated bins of
//!   a logarithmic tail histogram (30 log-spaced edges, at least 6
//!   populated bins required), else the literature default -2.3.
//! - Heuristic uncertainties in every branch:
//!   `beta_error = |beta - 1| / sqrt(tail size)` and
//!   `cutoff_error = cutoff / 10`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The sample is validated upstream ([`AreaSample`]): non-empty, finite,
//!   strictly positive, so sorting and percentiles are total.
//! - The returned exponent is always non-positive; the regression slope is
//!   negated if a pathological sample produces a rising line.
//! - `InsufficientData` never escapes this module's public entry point; it
//!   is consumed by the fallback chain and resolved with the literature
//!   default.
//!
//! Conventions
//! -----------
//! - Percentiles use linear interpolation between order statistics.
//! - The empirical CDF uses right-continuous counting (observations ≤ x
//!   over n).
//!
//! Downstream usage
//! ----------------
//! - `estimation::method` dispatches here for the simplified strategy and
//!   for the auto policy when the reference implementation is absent.
//! - The returned [`ParameterEstimate`] feeds the magnitude fit after
//!   conversion to `PowerLawParams`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover recovery of known parameters from seeded synthetic
//!   power-law data, both fallback layers, range validation, and the
//!   percentile helper.
use crate::estimation::{
    errors::{EstimationError, EstimationResult},
    method::{FitMethod, ParameterEstimate},
};
use crate::magnitude::data::AreaSample;

/// Number of evenly spaced cutoff candidates evaluated.
pub const CANDIDATE_COUNT: usize = 50;

/// Minimum number of tail observations for a candidate to qualify.
pub const MIN_TAIL_OBSERVATIONS: usize = 50;

/// Number of grid points for the Kolmogorov-Smirnov distance.
pub const KS_GRID_POINTS: usize = 1000;

/// Number of log-spaced edges in the fallback tail histogram.
pub const LOG_HIST_EDGES: usize = 30;

/// Minimum populated histogram bins for the fallback regression.
pub const MIN_POPULATED_BINS: usize = 6;

/// Literature-default power-law exponent for landslide inventories.
pub const DEFAULT_EXPONENT: f64 = -2.3;

/// Estimate power-law parameters from an area sample.
///
/// Parameters
/// ----------
/// - `sample`: [`AreaSample`]
///   Validated area measurements.
/// - `xmin_range`: `Option<(f64, f64)>`
///   Optional cutoff search range; defaults to [P10, P50] of the sample.
///   Must be finite, positive, and increasing when supplied.
///
/// Returns
/// -------
/// `EstimationResult<ParameterEstimate>`
///   - `Ok(estimate)` with a non-positive exponent, heuristic errors, and
///     the `Simplified` method label.
///   - `Err(EstimationError::InvalidRange)` for a malformed caller range.
///
/// Errors
/// ------
/// - `EstimationError::InvalidRange { lo, hi }`
///   The supplied search range is non-finite, non-positive, or fails
///   `lo < hi`.
///
/// Panics
/// ------
/// - Never panics. Thin samples resolve through the fallback chain rather
///   than failing.
///
/// Examples
/// --------
/// ```rust
/// use landslide_magnitude::estimation::simplified::estimate;
/// use landslide_magnitude::magnitude::AreaSample;
/// use ndarray::Array1;
///
/// let areas: Array1<f64> = Array1::from_iter((1..=300).map(|i| 50.0 + 10.0 * i as f64));
/// let sample = AreaSample::new(areas).unwrap();
///
/// let est = estimate(&sample, None).unwrap();
/// assert!(est.beta <= 0.0);
/// assert!(est.cutoff > 0.0);
/// ```
pub fn estimate(
    sample: &AreaSample, xmin_range: Option<(f64, f64)>,
) -> EstimationResult<ParameterEstimate> {
    let sorted = sample.sorted();

    let (lo, hi) = match xmin_range {
        Some((lo, hi)) => {
            if !lo.is_finite() || !hi.is_finite() || lo <= 0.0 || lo >= hi {
                return Err(EstimationError::InvalidRange { lo, hi });
            }
            (lo, hi)
        }
        None => (percentile(&sorted, 10.0), percentile(&sorted, 50.0)),
    };

    let mut best: Option<(f64, f64, f64)> = None; // (distance, cutoff, beta)
    for candidate in linspace(lo, hi, CANDIDATE_COUNT) {
        let tail = tail_at(&sorted, candidate);
        if tail.len() < MIN_TAIL_OBSERVATIONS {
            continue;
        }
        let n = tail.len() as f64;
        let log_sum: f64 = tail.iter().map(|&x| (x / candidate).ln()).sum();
        if log_sum <= 0.0 {
            // Every tail observation sits at the candidate; the likelihood
            // has no information about the exponent.
            continue;
        }
        let beta = -(1.0 + n / log_sum);
        let distance = ks_distance(tail, candidate, beta);
        if best.map_or(true, |(best_distance, _, _)| distance < best_distance) {
            best = Some((distance, candidate, beta));
        }
    }

    let (cutoff, beta) = match best {
        Some((_, cutoff, beta)) => (cutoff, beta),
        None => fallback_estimate(&sorted),
    };

    // Stored-negative convention for the exponent, enforced at the
    // estimator boundary.
    let beta = if beta > 0.0 { -beta } else { beta };

    let tail_size = tail_at(&sorted, cutoff).len().max(1);
    let beta_error = (beta - 1.0).abs() / (tail_size as f64).sqrt();
    let cutoff_error = cutoff / 10.0;

    Ok(ParameterEstimate { cutoff, beta, cutoff_error, beta_error, method: FitMethod::Simplified })
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Observations at or above `cutoff` in an ascending-sorted slice.
#[inline]
fn tail_at(sorted: &[f64], cutoff: f64) -> &[f64] {
    &sorted[sorted.partition_point(|&v| v < cutoff)..]
}

/// `n` evenly spaced values from `start` to `stop` inclusive.
///
/// Assumes `n >= 2`; callers in this module only pass the fixed grid
/// constants.
#[inline]
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Linear-interpolation percentile of an ascending-sorted slice.
///
/// `q` is in [0, 100]; the rank `q/100 * (n-1)` is interpolated between
/// its surrounding order statistics.
#[inline]
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    let rank = q / 100.0 * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let frac = rank - lower as f64;
    if lower + 1 >= n {
        sorted[n - 1]
    } else {
        sorted[lower] + frac * (sorted[lower + 1] - sorted[lower])
    }
}

/// Kolmogorov-Smirnov distance between the fitted power law and the
/// empirical distribution of the tail.
///
/// Evaluates |F_theory - F_empirical| on a 1000-point grid spanning
/// [cutoff, max(tail)], with F_theory(x) = 1 - (x/cutoff)^-(|beta|-1)
/// and a right-continuous empirical CDF.
#[inline]
fn ks_distance(tail: &[f64], cutoff: f64, beta: f64) -> f64 {
    let alpha = beta.abs() - 1.0;
    let max = tail[tail.len() - 1];
    let n = tail.len() as f64;
    linspace(cutoff, max, KS_GRID_POINTS)
        .into_iter()
        .map(|x| {
            let theory = 1.0 - (x / cutoff).powf(-alpha);
            let empirical = tail.partition_point(|&v| v <= x) as f64 / n;
            (theory - empirical).abs()
        })
        .fold(0.0, f64::max)
}

/// Fallback (cutoff, exponent) when no search candidate qualifies.
///
/// Cutoff is the 25th percentile; the exponent comes from the log-log
/// regression when enough histogram bins are populated, else the
/// literature default.
#[inline]
fn fallback_estimate(sorted: &[f64]) -> (f64, f64) {
    let cutoff = percentile(sorted, 25.0);
    let tail = tail_at(sorted, cutoff);
    let beta = match log_log_slope(tail, cutoff) {
        Ok(slope) => slope,
        Err(_) => DEFAULT_EXPONENT,
    };
    (cutoff, beta)
}

/// Slope of an OLS line through the populated bins of a logarithmic tail
/// histogram, in (log10 center, log10 count) coordinates.
///
/// Returns `InsufficientData` when fewer than [`MIN_POPULATED_BINS`] bins
/// are populated (including the degenerate single-value tail, whose
/// histogram collapses).
#[inline]
fn log_log_slope(tail: &[f64], cutoff: f64) -> EstimationResult<f64> {
    if tail.is_empty() {
        return Err(EstimationError::InsufficientData {
            required: MIN_POPULATED_BINS,
            available: 0,
        });
    }
    let max = tail[tail.len() - 1];

    // 30 log-spaced edges over [cutoff, max] give 29 bins.
    let edges: Vec<f64> = linspace(cutoff.log10(), max.log10(), LOG_HIST_EDGES)
        .into_iter()
        .map(|e| 10.0_f64.powf(e))
        .collect();

    let mut counts = vec![0.0_f64; LOG_HIST_EDGES - 1];
    for &value in tail {
        let mut index = edges.partition_point(|&e| e <= value);
        if index == 0 || value > edges[LOG_HIST_EDGES - 1] {
            continue;
        }
        index -= 1;
        counts[index.min(LOG_HIST_EDGES - 2)] += 1.0;
    }

    let points: Vec<(f64, f64)> = counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0.0)
        .map(|(i, &count)| {
            let center = (edges[i] + edges[i + 1]) / 2.0;
            (center.log10(), count.log10())
        })
        .collect();

    if points.len() < MIN_POPULATED_BINS {
        return Err(EstimationError::InsufficientData {
            required: MIN_POPULATED_BINS,
            available: points.len(),
        });
    }

    Ok(ols_slope(&points))
}

/// Slope of the ordinary-least-squares line through `points`.
///
/// Assumes at least two distinct x values; the fallback regression only
/// calls this with [`MIN_POPULATED_BINS`] or more distinct bins.
#[inline]
fn ols_slope(points: &[(f64, f64)]) -> f64 {
    let n = points.len() as f64;
    let mean_x = points.iter().map(|&(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|&(_, y)| y).sum::<f64>() / n;
    let covariance: f64 = points.iter().map(|&(x, y)| (x - mean_x) * (y - mean_y)).sum();
    let variance: f64 = points.iter().map(|&(x, _)| (x - mean_x).powi(2)).sum();
    covariance / variance
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Recovery of known parameters from seeded synthetic power-law data
    //   (cutoff within ±25%, exponent within ±0.3).
    // - The regression fallback (too few tail observations at every
    //   candidate, enough populated histogram bins).
    // - The literature-default fallback (degenerate single-value sample).
    // - Rejection of malformed caller-supplied search ranges.
    // - The percentile helper against hand-computed values.
    //
    // They intentionally DO NOT cover:
    // - Comparison against the external reference implementation, which is
    //   exercised through `estimation::method` where available.
    // -------------------------------------------------------------------------

    /// Inverse-CDF sample of a continuous power law with the given
    /// cutoff and exponent (`beta` in stored-negative convention).
    fn synthetic_power_law(n: usize, cutoff: f64, beta: f64, seed: u64) -> AreaSample {
        let alpha = beta.abs() - 1.0;
        let mut rng = StdRng::seed_from_u64(seed);
        let areas: Array1<f64> = Array1::from_iter((0..n).map(|_| {
            let u: f64 = rng.gen_range(0.0..1.0);
            cutoff * (1.0 - u).powf(-1.0 / alpha)
        }));
        AreaSample::new(areas).expect("synthetic areas are positive and finite")
    }

    #[test]
    // Purpose
    // -------
    // Verify that the estimator recovers parameters of a known synthetic
    // power law within the documented tolerances.
    //
    // Given
    // -----
    // - 1,000 areas drawn from a power law with cutoff = 100,
    //   beta = -2.3, seeded generator.
    //
    // Expect
    // ------
    // - Estimated cutoff within ±25% of 100.
    // - Estimated exponent within ±0.3 of -2.3.
    // - Positive heuristic errors and the `Simplified` label.
    fn estimate_recovers_synthetic_power_law_parameters() {
        // Arrange
        let sample = synthetic_power_law(1_000, 100.0, -2.3, 42);

        // Act
        let est = estimate(&sample, None).expect("estimation should succeed");

        // Assert
        assert!(
            (est.cutoff - 100.0).abs() <= 25.0,
            "cutoff should be within ±25% of 100, got {}",
            est.cutoff
        );
        assert!(
            (est.beta - (-2.3)).abs() <= 0.3,
            "beta should be within ±0.3 of -2.3, got {}",
            est.beta
        );
        assert!(est.cutoff_error > 0.0 && est.beta_error > 0.0);
        assert_eq!(est.method, FitMethod::Simplified);
    }

    #[test]
    // Purpose
    // -------
    // Exercise the regression fallback: no candidate reaches the minimum
    // tail size, but the logarithmic histogram has enough populated bins
    // for a slope.
    //
    // Given
    // -----
    // - 41 observations at 8 log-spaced levels with geometrically
    //   decaying multiplicities (12, 8, 6, 5, 4, 3, 2, 1).
    //
    // Expect
    // ------
    // - The estimate uses the P25 cutoff (100, inside the lowest level).
    // - The exponent is negative, finite, and not the literature default.
    fn estimate_thin_sample_uses_regression_fallback() {
        // Arrange
        let multiplicities = [12_usize, 8, 6, 5, 4, 3, 2, 1];
        let mut values = Vec::new();
        for (level, &count) in multiplicities.iter().enumerate() {
            let value = 100.0 * 4.0_f64.powi(level as i32);
            values.extend(std::iter::repeat(value).take(count));
        }
        let sample = AreaSample::new(Array1::from(values)).expect("valid sample");

        // Act
        let est = estimate(&sample, None).expect("estimation should succeed");

        // Assert
        assert_eq!(est.cutoff, 100.0, "P25 of the sample sits in the lowest level");
        assert!(est.beta < 0.0 && est.beta.is_finite());
        assert!(
            (est.beta - DEFAULT_EXPONENT).abs() > 0.5,
            "slope path should be taken, got the literature default {}",
            est.beta
        );
    }

    #[test]
    // Purpose
    // -------
    // Exercise the literature-default fallback: a degenerate sample whose
    // histogram collapses to a single populated bin.
    //
    // Given
    // -----
    // - 30 identical observations.
    //
    // Expect
    // ------
    // - cutoff equals the common value (every percentile of a constant
    //   sample is that value).
    // - beta equals the literature default -2.3.
    // - beta_error matches the heuristic |beta - 1| / sqrt(30).
    fn estimate_degenerate_sample_uses_literature_default() {
        // Arrange
        let sample = AreaSample::new(Array1::from(vec![500.0_f64; 30])).expect("valid sample");

        // Act
        let est = estimate(&sample, None).expect("estimation should succeed");

        // Assert
        assert_eq!(est.cutoff, 500.0);
        assert_eq!(est.beta, DEFAULT_EXPONENT);
        let expected_beta_error = (DEFAULT_EXPONENT - 1.0).abs() / (30.0_f64).sqrt();
        assert!((est.beta_error - expected_beta_error).abs() < 1e-12);
        assert_eq!(est.cutoff_error, 50.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify that malformed caller-supplied search ranges are rejected
    // with `InvalidRange`.
    //
    // Given
    // -----
    // - Ranges (50, 10), (0, 10), and (NaN, 10) on a valid sample.
    //
    // Expect
    // ------
    // - Each call returns `Err(EstimationError::InvalidRange { .. })`.
    fn estimate_malformed_range_is_rejected() {
        // Arrange
        let sample = synthetic_power_law(200, 100.0, -2.3, 7);
        let bad_ranges = [(50.0_f64, 10.0_f64), (0.0, 10.0), (f64::NAN, 10.0)];

        for &(lo, hi) in &bad_ranges {
            // Act
            let result = estimate(&sample, Some((lo, hi)));

            // Assert
            match result {
                Err(EstimationError::InvalidRange { .. }) => (),
                other => panic!("expected InvalidRange for ({lo}, {hi}), got {other:?}"),
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Pin the linear-interpolation percentile helper against
    // hand-computed values.
    //
    // Given
    // -----
    // - The sorted slice [1, 2, 3, 4].
    //
    // Expect
    // ------
    // - P0 = 1, P100 = 4, P50 = 2.5, P25 = 1.75.
    fn percentile_linear_interpolation_matches_hand_values() {
        // Arrange
        let sorted = [1.0_f64, 2.0, 3.0, 4.0];

        // Act & Assert
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 100.0), 4.0);
        assert_eq!(percentile(&sorted, 50.0), 2.5);
        assert_eq!(percentile(&sorted, 25.0), 1.75);
    }
}
