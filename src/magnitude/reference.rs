//! Reference-inventory calibration constants for the magnitude scale.
//!
//! Purpose
//! -------
//! Hold the frozen calibration values that pin the absolute magnitude scale
//! to the 1994 Northridge landslide inventory, and compute the
//! exponent-dependent reference scale used by the magnitude formula.
//!
//! Key behaviors
//! -------------
//! - Expose the reference midpoint coordinates and event count as
//!   compile-time constants.
//! - [`reference_scale`] evaluates the reference normalization for a given
//!   exponent.
//!
//! Invariants & assumptions
//! ------------------------
//! - The constants are opaque calibration artifacts: their derivation is
//!   not documented alongside the original method, and they must be copied
//!   verbatim rather than re-derived. Changing any of them (or the bin
//!   geometry they were calibrated against) silently rescales every
//!   reported magnitude.
//! - `reference_scale` is finite and strictly positive for any finite
//!   exponent, since both reference coordinates and the count are positive.
//!
//! Downstream usage
//! ----------------
//! - `magnitude::fit` divides the fitted midpoint density by the reference
//!   scale (times midx^beta) to obtain the magnitude.
//! - `magnitude::uncertainty` re-evaluates the reference scale per trial
//!   with the trial exponent.
//!
//! Testing notes
//! -------------
//! - A unit test pins the reference scale at beta = -2.0 against a directly
//!   computed value to guard the constants against accidental edits.

/// Midpoint area of the Northridge reference inventory (square meters).
pub const REFERENCE_MIDX: f64 = 4.876599623713225e4;

/// Midpoint frequency density of the Northridge reference inventory.
pub const REFERENCE_MIDY: f64 = 8.364725347860417e-4;

/// Number of landslides in the Northridge reference inventory.
pub const REFERENCE_COUNT: f64 = 11111.0;

/// Reference normalization for a given power-law exponent.
///
/// Parameters
/// ----------
/// - `beta`: `f64`
///   Power-law exponent (negative by convention; any finite value is
///   accepted).
///
/// Returns
/// -------
/// `f64`
///   `REFERENCE_MIDY / (REFERENCE_COUNT * REFERENCE_MIDX^beta)`, the
///   per-event scale the fitted curve is compared against.
///
/// Notes
/// -----
/// - Strictly positive and finite for any finite `beta` in the range this
///   crate works with; extreme exponents can underflow or overflow `f64`
///   and are caught downstream by the finiteness check on the magnitude.
#[inline]
pub fn reference_scale(beta: f64) -> f64 {
    REFERENCE_MIDY / (REFERENCE_COUNT * REFERENCE_MIDX.powf(beta))
}
