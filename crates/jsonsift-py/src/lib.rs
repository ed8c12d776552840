//! Python bindings for `jsonsift`.
//!
//! Exposes `jsonsift.Validator`, `jsonsift.validate`, and the
//! `jsonsift.ValidationError` exception (a `ValueError` subclass carrying
//! `offset`, `line`, `column`, and the offending `near` bytes).

use ::jsonsift::{DEFAULT_MAX_DEPTH, StreamingValidator, SurrogatePolicy, ValidatorOptions};
use pyo3::{create_exception, exceptions::PyValueError, prelude::*, types::PyBytes};

create_exception!(
    jsonsift,
    ValidationError,
    PyValueError,
    "Raised when the text fed so far is not a valid JSON prefix."
);

/// A chunk of input: `str` is validated as its UTF-8 encoding.
#[derive(FromPyObject)]
pub enum Chunk {
    Text(String),
    Bytes(Vec<u8>),
}

impl AsRef<[u8]> for Chunk {
    fn as_ref(&self) -> &[u8] {
        match self {
            Chunk::Text(text) => text.as_bytes(),
            Chunk::Bytes(bytes) => bytes,
        }
    }
}

fn to_py_err(py: Python<'_>, err: &::jsonsift::ValidationError) -> PyErr {
    let py_err = ValidationError::new_err(err.to_string());
    let value = py_err.value(py);
    for (name, n) in [
        ("offset", err.offset),
        ("line", err.line),
        ("column", err.column),
    ] {
        if let Err(e) = value.setattr(name, n) {
            return e;
        }
    }
    if let Err(e) = value.setattr("near", PyBytes::new(py, &err.near)) {
        return e;
    }
    py_err
}

/// Incremental JSON syntax validator.
#[pyclass(name = "Validator", module = "jsonsift")]
pub struct PyValidator {
    inner: StreamingValidator,
}

#[pymethods]
impl PyValidator {
    #[new]
    #[pyo3(signature = (max_depth = None, allow_unpaired_surrogates = false))]
    pub fn new(max_depth: Option<usize>, allow_unpaired_surrogates: bool) -> Self {
        let surrogates = if allow_unpaired_surrogates {
            SurrogatePolicy::Allow
        } else {
            SurrogatePolicy::Reject
        };
        Self {
            inner: StreamingValidator::new(ValidatorOptions {
                max_depth: max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
                surrogates,
            }),
        }
    }

    /// Scans the next chunk; raises `ValidationError` on the first error.
    pub fn feed(&mut self, py: Python<'_>, chunk: Chunk) -> PyResult<()> {
        self.inner.feed(&chunk).map_err(|err| to_py_err(py, &err))
    }

    /// Marks the end of the stream; raises if a token or container is open.
    pub fn finish(&mut self, py: Python<'_>) -> PyResult<()> {
        self.inner.finish().map_err(|err| to_py_err(py, &err))
    }

    /// Discards all progress, including a previous failure.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[getter]
    pub fn max_depth(&self) -> usize {
        self.inner.options().max_depth
    }

    fn __repr__(&self) -> String {
        let options = self.inner.options();
        format!(
            "Validator(max_depth={}, allow_unpaired_surrogates={})",
            options.max_depth,
            if options.surrogates == SurrogatePolicy::Allow {
                "True"
            } else {
                "False"
            }
        )
    }
}

/// Validates a complete document in one call.
#[pyfunction]
pub fn validate(py: Python<'_>, text: Chunk) -> PyResult<()> {
    ::jsonsift::validate(&text).map_err(|err| to_py_err(py, &err))
}

#[pymodule]
pub fn jsonsift(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyValidator>()?;
    m.add_function(wrap_pyfunction!(validate, m)?)?;
    m.add("ValidationError", m.py().get_type::<ValidationError>())?;
    Ok(())
}
