#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    estimation::{EstimationMethod, errors::EstimationError},
    magnitude::{data::AreaSample, params::PowerLawParams},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

#[cfg(feature = "python-bindings")]
pub fn extract_area_sample<'py>(
    py: Python<'py>, areas: &Bound<'py, PyAny>,
) -> PyResult<AreaSample> {
    let arr = extract_f64_array(py, areas)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err("areas must be a 1-D contiguous float64 array or sequence")
    })?;
    let sample = AreaSample::new(Array1::from(slice.to_vec()))?;
    Ok(sample)
}

#[cfg(feature = "python-bindings")]
pub fn extract_method(method: Option<&str>) -> PyResult<EstimationMethod> {
    match method {
        None => Ok(EstimationMethod::Auto),
        Some(name) => {
            let parsed: Result<EstimationMethod, EstimationError> = name.parse();
            Ok(parsed?)
        }
    }
}

#[cfg(feature = "python-bindings")]
pub fn extract_params(
    cutoff: Option<f64>, beta: Option<f64>, cutoff_error: Option<f64>, beta_error: Option<f64>,
) -> PyResult<Option<PowerLawParams>> {
    match (cutoff, beta) {
        (Some(cutoff), Some(beta)) => {
            let params = PowerLawParams::new(cutoff, beta)?.with_errors(cutoff_error, beta_error)?;
            Ok(Some(params))
        }
        (None, None) => {
            if cutoff_error.is_some() || beta_error.is_some() {
                return Err(PyValueError::new_err(
                    "cutoff_error/beta_error require explicit cutoff and beta",
                ));
            }
            Ok(None)
        }
        _ => Err(PyValueError::new_err("cutoff and beta must be supplied together")),
    }
}
