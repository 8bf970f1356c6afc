//! Fixed geometric binning and frequency-density curves.
//!
//! Purpose
//! -------
//! Build the fixed geometric histogram over area magnitude that every fit
//! is computed against, and derive the observed frequency-density curve for
//! an area sample. The bin geometry is sample-independent and recomputed
//! deterministically per invocation.
//!
//! Key behaviors
//! -------------
//! - [`GeometricBins::new`] produces the 120-edge geometric sequence
//!   (first edge 2, ratio 1.2) and precomputes the 119 bin centers and
//!   density widths.
//! - [`GeometricBins::counts`] bins a sample with standard histogram
//!   semantics: bin `i` receives `a` when `edge[i] <= a < edge[i+1]`, and
//!   the final bin also accepts `a` equal to the last edge.
//! - [`GeometricBins::frequency_density`] divides counts by the density
//!   widths to obtain a [`FrequencyDensity`] curve.
//!
//! Invariants & assumptions
//! ------------------------
//! - Exactly 120 edges and 119 bins, independent of any input data.
//! - Centers are midpoints of each bin's two surrounding edges from the
//!   original edge sequence.
//! - The density width of bin 0 equals the first edge itself, and the
//!   width of bin `i > 0` equals `edge[i] - edge[i-1]` — the gap *ending*
//!   at the bin's left edge, one position off from the bin's own span.
//!   This offset is a calibration contract shared with the reference
//!   constants in `magnitude::reference` and must be preserved
//!   bit-for-bit.
//! - All widths are strictly positive, so the density division is total.
//!
//! Conventions
//! -----------
//! - Areas outside the edge domain are ignored by the histogram, matching
//!   the usual bounded-histogram convention.
//! - Counts are carried as `f64` so the density division needs no cast.
//!
//! Downstream usage
//! ----------------
//! - `magnitude::fit` anchors the power law to the density value of the
//!   bin whose center is closest to the cutoff.
//! - The observed (center, density) pairs are exported unchanged as the
//!   chart's scatter series.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the edge recurrence, the bin count, the width offset,
//!   the histogram semantics at edges (including the right-inclusive final
//!   bin), and the count/width density relation.
use crate::magnitude::data::AreaSample;
use ndarray::Array1;

/// Number of edges in the geometric bin sequence.
pub const BIN_EDGE_COUNT: usize = 120;

/// Number of bins (one fewer than the edges).
pub const BIN_COUNT: usize = BIN_EDGE_COUNT - 1;

/// First edge of the bin sequence, also the domain floor used when
/// clipping simulated cutoffs.
pub const BIN_DOMAIN_FLOOR: f64 = 2.0;

/// Ratio between consecutive edges.
pub const EDGE_RATIO: f64 = 1.2;

/// `GeometricBins` — the fixed geometric histogram definition.
///
/// Purpose
/// -------
/// Own the deterministic bin geometry (edges, centers, density widths) and
/// provide histogram counting and frequency-density derivation against it.
///
/// Fields
/// ------
/// - `edges`: `Array1<f64>`
///   The 120-entry geometric edge sequence, strictly increasing.
/// - `centers`: `Array1<f64>`
///   The 119 bin centers, midpoints of consecutive edge pairs.
/// - `widths`: `Array1<f64>`
///   The 119 density widths with the deliberate one-position offset
///   described in the module docs.
///
/// Invariants
/// ----------
/// - `edges[0] = 2` and `edges[i] = edges[i-1] * 1.2`.
/// - `centers[i] = (edges[i] + edges[i+1]) / 2`.
/// - `widths[0] = edges[0]`; `widths[i] = edges[i] - edges[i-1]` for
///   `i > 0`; all strictly positive.
///
/// Performance
/// -----------
/// - Construction is O(1) in the sample and allocates three small arrays.
/// - Counting is O(n log m) via binary search over the edges.
///
/// Notes
/// -----
/// - The geometry is immutable after construction; counting never mutates
///   the bins.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometricBins {
    edges: Array1<f64>,
    centers: Array1<f64>,
    widths: Array1<f64>,
}

/// `FrequencyDensity` — observed distribution of areas across the bins.
///
/// Purpose
/// -------
/// Carry the parallel (bin-center, density) series that the fit anchors to
/// and that consumers plot as the observed scatter.
///
/// Fields
/// ------
/// - `centers`: `Array1<f64>`
///   The 119 bin centers, aligned by index with `density`.
/// - `density`: `Array1<f64>`
///   Count divided by density width per bin; zero in empty bins, never
///   negative.
///
/// Invariants
/// ----------
/// - `centers.len() == density.len() == 119`.
/// - Every density value is finite and ≥ 0.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyDensity {
    /// Bin centers, aligned by index with `density`.
    pub centers: Array1<f64>,
    /// Frequency density (count / width) per bin.
    pub density: Array1<f64>,
}

impl Default for GeometricBins {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometricBins {
    /// Build the fixed geometric bin geometry.
    ///
    /// Returns
    /// -------
    /// `GeometricBins`
    ///   Edges, centers, and density widths per the module invariants. The
    ///   result depends on no runtime input and is identical across calls.
    pub fn new() -> Self {
        let mut edges = Vec::with_capacity(BIN_EDGE_COUNT);
        edges.push(BIN_DOMAIN_FLOOR);
        for i in 1..BIN_EDGE_COUNT {
            edges.push(edges[i - 1] * EDGE_RATIO);
        }

        // Centers come from the pristine edge sequence, before the edges
        // are reused for anything else.
        let centers: Vec<f64> = (0..BIN_COUNT).map(|i| (edges[i] + edges[i + 1]) / 2.0).collect();

        // Density width: bin 0 is assigned the first edge itself, bin i > 0
        // the gap ending at its left edge. The offset is intentional and
        // load-bearing for the calibrated magnitude scale.
        let widths: Vec<f64> =
            (0..BIN_COUNT).map(|i| if i == 0 { edges[0] } else { edges[i] - edges[i - 1] }).collect();

        GeometricBins {
            edges: Array1::from(edges),
            centers: Array1::from(centers),
            widths: Array1::from(widths),
        }
    }

    /// The 120-entry edge sequence.
    pub fn edges(&self) -> &Array1<f64> {
        &self.edges
    }

    /// The 119 bin centers.
    pub fn centers(&self) -> &Array1<f64> {
        &self.centers
    }

    /// The 119 density widths (offset convention; see module docs).
    pub fn widths(&self) -> &Array1<f64> {
        &self.widths
    }

    /// Histogram counts of a sample against the edges.
    ///
    /// Parameters
    /// ----------
    /// - `sample`: [`AreaSample`]
    ///   Validated area measurements; values outside the edge domain are
    ///   ignored.
    ///
    /// Returns
    /// -------
    /// `Array1<f64>`
    ///   119 per-bin counts. Bin `i` counts areas with
    ///   `edge[i] <= a < edge[i+1]`; the final bin also counts
    ///   `a == edge[119]`.
    pub fn counts(&self, sample: &AreaSample) -> Array1<f64> {
        let mut counts = Array1::<f64>::zeros(BIN_COUNT);
        for &area in sample.areas() {
            if let Some(index) = self.bin_index(area) {
                counts[index] += 1.0;
            }
        }
        counts
    }

    /// Observed frequency-density curve for a sample.
    ///
    /// Parameters
    /// ----------
    /// - `sample`: [`AreaSample`]
    ///   Validated area measurements.
    ///
    /// Returns
    /// -------
    /// [`FrequencyDensity`]
    ///   Parallel (center, density) series of length 119, with
    ///   `density[i] = counts[i] / widths[i]`. Widths are strictly
    ///   positive by construction, so every density value is finite.
    pub fn frequency_density(&self, sample: &AreaSample) -> FrequencyDensity {
        let counts = self.counts(sample);
        let density = &counts / &self.widths;
        FrequencyDensity { centers: self.centers.clone(), density }
    }

    //
    // ---------- Private helpers (compact docs) ----------
    //

    /// Locate the bin receiving `area`, or `None` when it falls outside
    /// the edge domain.
    ///
    /// Binary search for the last edge ≤ `area`; an area equal to the
    /// final edge is folded into the last bin.
    #[inline]
    fn bin_index(&self, area: f64) -> Option<usize> {
        if area < self.edges[0] || area > self.edges[BIN_EDGE_COUNT - 1] {
            return None;
        }
        let mut lo = 0_usize;
        let mut hi = BIN_EDGE_COUNT - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.edges[mid] <= area { lo = mid } else { hi = mid }
        }
        Some(lo.min(BIN_COUNT - 1))
    }
}
