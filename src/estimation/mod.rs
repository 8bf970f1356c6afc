//! estimation — power-law parameter estimation strategies.
//!
//! Purpose
//! -------
//! Estimate the power-law cutoff and exponent directly from an area sample
//! when the caller does not supply them. Two interchangeable strategies sit
//! behind one dispatch surface: a self-contained maximum-likelihood +
//! goodness-of-fit search, and delegation to the published `powerlaw`
//! reference implementation of the same methodology.
//!
//! Key behaviors
//! -------------
//! - Expose the caller-facing mode flag [`EstimationMethod`]
//!   (`Auto | Official | Simplified`) and the single dispatch entry
//!   [`estimate_parameters`].
//! - Apply the selection policy once per call in
//!   [`EstimationMethod::resolve`]: an explicit official request fails
//!   loudly when the dependency is absent, while auto falls back to the
//!   local search.
//! - Report every estimate as a [`ParameterEstimate`] labeled with the
//!   [`FitMethod`] that actually produced it.
//! - Represent dependency availability as a process-wide immutable
//!   capability flag ([`official_available`]), probed once at first use.
//!
//! Invariants & assumptions
//! ------------------------
//! - Estimated exponents are non-positive; cutoffs are finite and
//!   positive; uncertainty fields are finite and non-negative.
//! - Strategy selection lives entirely in `method`; the strategies
//!   themselves never probe for dependencies or substitute for each
//!   other.
//! - All failures are reported via [`EstimationResult`]; nothing in this
//!   subtree panics on user-facing invalid input.
//!
//! Conventions
//! -----------
//! - Method selector strings are lowercase and match the reported labels.
//! - The official strategy compiles only under the `python-bindings`
//!   feature; without it the capability flag is false by construction.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use landslide_magnitude::estimation::{EstimationMethod, estimate_parameters};
//!   use landslide_magnitude::magnitude::AreaSample;
//!   use ndarray::Array1;
//!
//!   # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let areas: Array1<f64> = Array1::from_iter((1..=300).map(|i| 50.0 + 10.0 * i as f64));
//!   let sample = AreaSample::new(areas)?;
//!   let estimate = estimate_parameters(&sample, EstimationMethod::Auto, None)?;
//!   assert!(estimate.beta <= 0.0);
//!   # Ok(())
//!   # }
//!   ```
//!
//! - `magnitude::analysis` invokes this subtree when no explicit
//!   parameters were supplied and converts the estimate into
//!   `PowerLawParams`.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`simplified`] cover parameter recovery on synthetic
//!   power-law data and both fallback layers.
//! - Unit tests in [`method`] cover string parsing and the selection
//!   policy without the dependency.
//! - The official strategy is exercised by Python-level integration tests
//!   where the `powerlaw` package exists.

pub mod errors;
pub mod method;
#[cfg(feature = "python-bindings")]
pub mod official;
pub mod simplified;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{EstimationError, EstimationResult};
pub use self::method::{
    EstimationMethod, FitMethod, ParameterEstimate, estimate_parameters, official_available,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use landslide_magnitude::estimation::prelude::*;
//
// to import the main estimation surface in a single line.

pub mod prelude {
    pub use super::errors::{EstimationError, EstimationResult};
    pub use super::method::{EstimationMethod, FitMethod, ParameterEstimate, estimate_parameters};
}
