//! Typed access to the runtime's last-error slot
//!
//! The interpreter keeps one error indicator per thread state and overwrites
//! it on the next failing call. It is never read anywhere but here: every
//! bridge operation passes its raw result through [`checked`], which converts
//! a failure into a [`BridgeError`] and, on success, still drains the slot.
//! A successful return value alone does not prove that nothing was raised.

use crate::errors::{BridgeError, RuntimeErrorKind};
use fontbridge_logger as logger;
use pyo3::exceptions::{
    PyAttributeError, PyFileNotFoundError, PyImportError, PyIndexError, PyKeyError, PyOSError,
    PyPermissionError, PyTypeError, PyValueError,
};
use pyo3::prelude::*;
use pyo3::PyErr;

/// Read and clear the runtime's last error
pub fn last_error(py: Python<'_>) -> Option<BridgeError> {
    PyErr::take(py).map(|err| from_py_err(py, &err))
}

/// Route the raw result of one runtime operation through the error slot
pub fn checked<T>(py: Python<'_>, result: PyResult<T>) -> Result<T, BridgeError> {
    match result {
        Err(err) => {
            // The failing call already moved the exception out of the slot.
            Err(from_py_err(py, &err))
        }
        Ok(value) => match last_error(py) {
            Some(stray) => {
                logger::warn(&format!("Runtime raised an error on a success path: {}", stray));
                Err(stray)
            }
            None => Ok(value),
        },
    }
}

/// Convert a runtime exception into a typed error
pub fn from_py_err(py: Python<'_>, err: &PyErr) -> BridgeError {
    let kind = classify(py, err);
    let message = err.value(py).to_string();
    tracing::debug!(%kind, %message, "runtime error");
    BridgeError::Runtime { kind, message }
}

/// Categorise an exception by its class hierarchy, most specific first
pub fn classify(py: Python<'_>, err: &PyErr) -> RuntimeErrorKind {
    if err.is_instance_of::<PyFileNotFoundError>(py) {
        RuntimeErrorKind::FileNotFound
    } else if err.is_instance_of::<PyPermissionError>(py) {
        RuntimeErrorKind::Permission
    } else if err.is_instance_of::<PyOSError>(py) {
        RuntimeErrorKind::Os
    } else if err.is_instance_of::<PyAttributeError>(py) {
        RuntimeErrorKind::Attribute
    } else if err.is_instance_of::<PyKeyError>(py) {
        RuntimeErrorKind::Key
    } else if err.is_instance_of::<PyIndexError>(py) {
        RuntimeErrorKind::Index
    } else if err.is_instance_of::<PyImportError>(py) {
        RuntimeErrorKind::Import
    } else if err.is_instance_of::<PyTypeError>(py) {
        RuntimeErrorKind::Type
    } else if err.is_instance_of::<PyValueError>(py) {
        RuntimeErrorKind::Value
    } else {
        let name = err
            .get_type(py)
            .name()
            .map(|n| n.to_string())
            .unwrap_or_else(|_| "Exception".to_string());
        RuntimeErrorKind::Other(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyo3::exceptions::{PyRuntimeError, PyZeroDivisionError};

    #[test]
    fn test_classify_hierarchy() {
        Python::attach(|py| {
            let cases = [
                (PyFileNotFoundError::new_err("x"), RuntimeErrorKind::FileNotFound),
                (PyPermissionError::new_err("x"), RuntimeErrorKind::Permission),
                (PyOSError::new_err("x"), RuntimeErrorKind::Os),
                (PyAttributeError::new_err("x"), RuntimeErrorKind::Attribute),
                (PyKeyError::new_err("x"), RuntimeErrorKind::Key),
                (PyIndexError::new_err("x"), RuntimeErrorKind::Index),
                (PyTypeError::new_err("x"), RuntimeErrorKind::Type),
                (PyValueError::new_err("x"), RuntimeErrorKind::Value),
                (PyImportError::new_err("x"), RuntimeErrorKind::Import),
            ];
            for (err, expected) in cases {
                assert_eq!(classify(py, &err), expected);
            }
        });
    }

    #[test]
    fn test_unknown_exception_keeps_class_name() {
        Python::attach(|py| {
            let err = PyZeroDivisionError::new_err("division by zero");
            assert_eq!(
                classify(py, &err),
                RuntimeErrorKind::Other("ZeroDivisionError".to_string())
            );
        });
    }

    #[test]
    fn test_last_error_reads_and_clears() {
        Python::attach(|py| {
            PyRuntimeError::new_err("boom").restore(py);

            let first = last_error(py);
            assert!(matches!(
                first,
                Some(BridgeError::Runtime { ref message, .. }) if message == "boom"
            ));
            assert!(last_error(py).is_none());
        });
    }

    #[test]
    fn test_checked_surfaces_error_left_on_success_path() {
        Python::attach(|py| {
            PyValueError::new_err("stale").restore(py);

            let result = checked(py, Ok(42));
            assert!(matches!(
                result,
                Err(BridgeError::Runtime {
                    kind: RuntimeErrorKind::Value,
                    ..
                })
            ));
            assert!(matches!(checked(py, Ok(7)), Ok(7)));
        });
    }

    #[test]
    fn test_checked_converts_failure() {
        Python::attach(|py| {
            let result: Result<(), _> = checked(py, Err(PyKeyError::new_err("'missing'")));
            assert!(matches!(
                result,
                Err(BridgeError::Runtime {
                    kind: RuntimeErrorKind::Key,
                    ..
                })
            ));
        });
    }
}
