//! Anchored power-law fitting and the reference-normalized magnitude.
//!
//! Purpose
//! -------
//! Anchor a power-law curve to the observed frequency-density curve at the
//! chosen cutoff/exponent pair and compute the landslide-event magnitude
//! (mLS) by normalizing the fitted midpoint density against the Northridge
//! reference inventory.
//!
//! Key behaviors
//! -------------
//! - Locate the anchor bin (center numerically closest to the cutoff) and
//!   derive the scale constant so the fitted curve passes through the
//!   anchor's observed density.
//! - Produce the fitted curve over all 119 bin centers and, separately, its
//!   restriction to centers ≥ cutoff (the valid power-law region shown to
//!   consumers).
//! - Evaluate the geometric midpoint (midx, midy) between the cutoff and
//!   the largest observed area, and the exponent-dependent reference scale.
//! - Compute `magnitude = log10(midy / (reference_scale * midx^beta))`.
//!   The literal form is kept — rather than the algebraically identical
//!   `log10(scale_constant / reference_scale)` — because the intermediate
//!   quantities feed the Monte-Carlo uncertainty path; the identity itself
//!   is a tested invariant.
//!
//! Invariants & assumptions
//! ------------------------
//! - `params.beta` is non-positive (normalized at construction).
//! - The cutoff admits an anchor only inside the bin-center range; outside
//!   it the fit fails with `CutoffOutOfRange` rather than extrapolating.
//! - A non-finite magnitude (empty anchor bin, degenerate exponent) is
//!   reported as `NonFiniteMagnitude`, never returned as NaN/∞.
//! - Pure function of its inputs; no shared mutable state.
//!
//! Conventions
//! -----------
//! - midx is the geometric mean of the largest observed area and the
//!   cutoff, computed in log10 space exactly as the calibrated method
//!   prescribes.
//!
//! Downstream usage
//! ----------------
//! - `magnitude::uncertainty` consumes the anchor density, midy, and
//!   maximum area held by [`PowerLawFit`] to run its trials.
//! - `magnitude::analysis` packages the observed and tail series for
//!   chart-drawing consumers.
//!
//! Testing notes
//! -------------
//! - Unit tests cover anchor selection, the magnitude identity at 1e-9
//!   relative tolerance, out-of-range cutoffs, the sign-normalization
//!   equivalence, the tail restriction, and the empty-anchor failure mode.
use crate::magnitude::{
    binning::{FrequencyDensity, GeometricBins},
    data::AreaSample,
    errors::{MagnitudeError, MagnitudeResult},
    params::PowerLawParams,
    reference::reference_scale,
};
use ndarray::Array1;

/// `PowerLawFit` — anchored power-law curve plus the event magnitude.
///
/// Purpose
/// -------
/// Hold the complete outcome of anchoring a power law to an observed
/// frequency-density curve: the anchor, the scale constant, both fitted
/// curve variants, the midpoint quantities, and the reference-normalized
/// magnitude.
///
/// Fields
/// ------
/// - `observed`: [`FrequencyDensity`]
///   The observed (center, density) curve the fit was anchored to.
/// - `anchor_index`: `usize`
///   Index of the bin center closest to the cutoff.
/// - `anchor_density`: `f64`
///   Observed density at the anchor bin; held for the Monte-Carlo path,
///   which keeps it fixed across trials.
/// - `scale_constant`: `f64`
///   `anchor_density / cutoff^beta`; the fitted curve passes through the
///   anchor.
/// - `fitted_density`: `Array1<f64>`
///   Fitted curve over all 119 bin centers (full-range plotting).
/// - `tail_centers`, `tail_density`: `Array1<f64>`
///   The same curve restricted to centers ≥ cutoff (the valid power-law
///   region).
/// - `midx`, `midy`: `f64`
///   Geometric midpoint between the largest observed area and the cutoff,
///   and the fitted density there.
/// - `reference_scale`: `f64`
///   Northridge reference normalization evaluated at the fit's exponent.
/// - `max_area`: `f64`
///   Largest observed area; held for the Monte-Carlo path.
/// - `magnitude`: `f64`
///   The landslide-event magnitude (finite by construction).
///
/// Invariants
/// ----------
/// - `anchor_index < 119` and `observed.density[anchor_index] ==
///   anchor_density`.
/// - `magnitude.is_finite()`; construction fails otherwise.
/// - `tail_centers.len() == tail_density.len()`.
///
/// Performance
/// -----------
/// - Construction is O(n log m) for binning plus O(m) for the curves,
///   with m = 119.
///
/// Notes
/// -----
/// - A value object created fresh per invocation; nothing persists across
///   calls.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerLawFit {
    /// Observed frequency-density curve the fit anchored to.
    pub observed: FrequencyDensity,
    /// Index of the bin center closest to the cutoff.
    pub anchor_index: usize,
    /// Observed density at the anchor bin (fixed across Monte-Carlo trials).
    pub anchor_density: f64,
    /// Scale constant anchoring the power law at the cutoff.
    pub scale_constant: f64,
    /// Fitted curve over all bin centers.
    pub fitted_density: Array1<f64>,
    /// Bin centers at and above the cutoff.
    pub tail_centers: Array1<f64>,
    /// Fitted curve restricted to `tail_centers`.
    pub tail_density: Array1<f64>,
    /// Geometric midpoint between the largest area and the cutoff.
    pub midx: f64,
    /// Fitted density at `midx`.
    pub midy: f64,
    /// Reference normalization at the fit's exponent.
    pub reference_scale: f64,
    /// Largest observed area (fixed across Monte-Carlo trials).
    pub max_area: f64,
    /// Landslide-event magnitude (finite).
    pub magnitude: f64,
}

impl PowerLawFit {
    /// Anchor a power law to a sample's density curve and compute the
    /// magnitude.
    ///
    /// Parameters
    /// ----------
    /// - `sample`: [`AreaSample`]
    ///   Validated area measurements.
    /// - `params`: [`PowerLawParams`]
    ///   Cutoff/exponent pair (beta already normalized to be
    ///   non-positive).
    ///
    /// Returns
    /// -------
    /// `MagnitudeResult<PowerLawFit>`
    ///   - `Ok(fit)` with a finite magnitude on success.
    ///   - `Err(MagnitudeError)` when no anchor exists or the magnitude
    ///     degenerates.
    ///
    /// Errors
    /// ------
    /// - `MagnitudeError::EmptyDensity`
    ///   The density curve has no entries (unreachable with the fixed
    ///   geometry; defended against regardless).
    /// - `MagnitudeError::CutoffOutOfRange { .. }`
    ///   The cutoff lies below the smallest or above the largest bin
    ///   center, so no finite closest index exists.
    /// - `MagnitudeError::NonFiniteMagnitude(value)`
    ///   The magnitude evaluates to NaN or ±∞, typically because the
    ///   anchor bin is empty and the logarithm's argument collapses to
    ///   zero.
    ///
    /// Panics
    /// ------
    /// - Never panics. All failures are reported via `MagnitudeError`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use landslide_magnitude::magnitude::{AreaSample, PowerLawFit, PowerLawParams};
    /// use ndarray::Array1;
    ///
    /// let areas: Array1<f64> = Array1::from_iter((1..=200).map(|i| 80.0 + 3.0 * i as f64));
    /// let sample = AreaSample::new(areas).unwrap();
    /// let params = PowerLawParams::new(100.0, -2.3).unwrap();
    ///
    /// let fit = PowerLawFit::fit(&sample, &params).unwrap();
    /// assert!(fit.magnitude.is_finite());
    /// ```
    pub fn fit(sample: &AreaSample, params: &PowerLawParams) -> MagnitudeResult<Self> {
        let bins = GeometricBins::new();
        let observed = bins.frequency_density(sample);

        let anchor_index = find_anchor_index(&observed.centers, params.cutoff)?;
        let anchor_density = observed.density[anchor_index];

        let beta = params.beta;
        let scale_constant = anchor_density / params.cutoff.powf(beta);

        let fitted_density = observed.centers.mapv(|x| scale_constant * x.powf(beta));

        let tail: Vec<(f64, f64)> = observed
            .centers
            .iter()
            .zip(fitted_density.iter())
            .filter(|(&x, _)| x >= params.cutoff)
            .map(|(&x, &y)| (x, y))
            .collect();
        let tail_centers = Array1::from_iter(tail.iter().map(|&(x, _)| x));
        let tail_density = Array1::from_iter(tail.iter().map(|&(_, y)| y));

        let max_area = sample.max_area();
        let midx = 10.0_f64.powf((max_area.log10() + params.cutoff.log10()) / 2.0);
        let midy = scale_constant * midx.powf(beta);
        let reference_scale = reference_scale(beta);

        let magnitude = (midy / (reference_scale * midx.powf(beta))).log10();
        if !magnitude.is_finite() {
            return Err(MagnitudeError::NonFiniteMagnitude(magnitude));
        }

        Ok(PowerLawFit {
            observed,
            anchor_index,
            anchor_density,
            scale_constant,
            fitted_density,
            tail_centers,
            tail_density,
            midx,
            midy,
            reference_scale,
            max_area,
            magnitude,
        })
    }
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Index of the bin center numerically closest to `cutoff`.
///
/// Returns `EmptyDensity` for an empty center sequence and
/// `CutoffOutOfRange` when the cutoff lies outside `[centers[0],
/// centers[last]]`, so a "closest" index would be an extrapolation.
#[inline]
fn find_anchor_index(centers: &Array1<f64>, cutoff: f64) -> MagnitudeResult<usize> {
    if centers.is_empty() {
        return Err(MagnitudeError::EmptyDensity);
    }
    let min = centers[0];
    let max = centers[centers.len() - 1];
    if cutoff < min || cutoff > max {
        return Err(MagnitudeError::CutoffOutOfRange { cutoff, min, max });
    }

    let mut best_index = 0_usize;
    let mut best_distance = f64::INFINITY;
    for (index, &center) in centers.iter().enumerate() {
        let distance = (center - cutoff).abs();
        if distance < best_distance {
            best_distance = distance;
            best_index = index;
        }
    }
    Ok(best_index)
}
