//! magnitude — frequency-area statistics and the mLS event magnitude.
//!
//! Purpose
//! -------
//! Convert a collection of measured landslide areas into a single scalar
//! event magnitude (mLS) with an uncertainty estimate. The subtree covers
//! the fixed geometric binning of the area distribution, the anchored
//! power-law fit with its reference normalization, Monte-Carlo propagation
//! of parameter uncertainty, and a one-call pipeline tying the stages
//! together.
//!
//! Key behaviors
//! -------------
//! - Validate raw area measurements once at the boundary ([`AreaSample`]).
//! - Build the deterministic 119-bin geometric histogram and the observed
//!   frequency-density curve ([`GeometricBins`], [`FrequencyDensity`]).
//! - Anchor a power law at the caller's (or estimated) cutoff/exponent and
//!   compute the reference-normalized magnitude ([`PowerLawFit`]).
//! - Propagate declared parameter uncertainties into a magnitude
//!   uncertainty via seeded Monte-Carlo trials ([`mls_uncertainty`]),
//!   reporting an explicit sentinel when the errors are unknown
//!   ([`Uncertainty`]).
//! - Run the whole pipeline in one call ([`analyze`]) and hand back the
//!   chart-ready numeric series ([`MagnitudeReport`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Areas are strictly positive, finite, and in consistent planar square
//!   units; unit handling and near-zero filtering are upstream concerns.
//! - The bin geometry, its width convention, and the Northridge reference
//!   constants form one calibration unit; none may change independently.
//! - Every operation is a pure function of its inputs; concurrent callers
//!   need no locking.
//! - Failures are reported via [`MagnitudeResult`]; the Monte-Carlo trial
//!   discard is the only sanctioned non-finite leak.
//!
//! Conventions
//! -----------
//! - Exponents are stored negative; sign normalization happens once in
//!   [`PowerLawParams`].
//! - Chart rendering is out of scope: the subtree exports numeric series,
//!   never pixels.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use landslide_magnitude::magnitude::{AnalysisOptions, AreaSample, analyze};
//!   use ndarray::Array1;
//!
//!   # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let areas: Array1<f64> = Array1::from_iter((1..=500).map(|i| 60.0 + 4.0 * i as f64));
//!   let sample = AreaSample::new(areas)?;
//!   let report = analyze(&sample, &AnalysisOptions::default())?;
//!   println!("mLS = {:.2} ± {}", report.estimate.magnitude, report.estimate.uncertainty);
//!   # Ok(())
//!   # }
//!   ```
//!
//! - The PyO3 layer wraps [`analyze`] and serializes the report's series
//!   for web consumers.
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests for its own invariants (bin geometry,
//!   magnitude identity, seeded reproducibility, fallback chains).
//! - The end-to-end synthetic scenario lives in the integration suite
//!   under `tests/`.

pub mod analysis;
pub mod binning;
pub mod data;
pub mod errors;
pub mod fit;
pub mod params;
pub mod reference;
pub mod uncertainty;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::analysis::{
    AnalysisOptions, MagnitudeEstimate, MagnitudeReport, ParameterSource, analyze,
};
pub use self::binning::{FrequencyDensity, GeometricBins};
pub use self::data::AreaSample;
pub use self::errors::{MagnitudeError, MagnitudeResult};
pub use self::fit::PowerLawFit;
pub use self::params::PowerLawParams;
pub use self::uncertainty::{Uncertainty, mls_uncertainty, mls_uncertainty_with_trials};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use landslide_magnitude::magnitude::prelude::*;
//
// to import the main magnitude surface in a single line.

pub mod prelude {
    pub use super::analysis::{AnalysisOptions, MagnitudeReport, analyze};
    pub use super::data::AreaSample;
    pub use super::errors::{MagnitudeError, MagnitudeResult};
    pub use super::params::PowerLawParams;
    pub use super::uncertainty::Uncertainty;
}
