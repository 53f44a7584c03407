//! Conversion between native values and runtime values
//!
//! [`ToForeign`] builds a runtime value for the duration of one call;
//! [`FromForeign`] reads one back, failing with
//! [`BridgeError::MarshalShapeMismatch`] rather than guessing when the runtime
//! value has the wrong type or item count. Sequences go out as tuples and
//! come back from tuples or lists. Conversions carry no locale or formatting
//! state, so the same value always produces the same runtime value.

use crate::error_channel;
use crate::errors::BridgeError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyFloat, PyInt, PyList, PyString, PyTuple};
use std::path::{Path, PathBuf};

/// Native value that can be passed into the runtime
pub trait ToForeign {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError>;
}

/// Native value that can be read back from the runtime
pub trait FromForeign: Sized {
    fn from_foreign(object: &Bound<'_, PyAny>) -> Result<Self, BridgeError>;
}

/// Class name of a runtime value, for error messages
pub fn type_name(object: &Bound<'_, PyAny>) -> String {
    object
        .get_type()
        .name()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| "object".to_string())
}

/// Items of a tuple or list; any other type is a shape mismatch
pub fn sequence_items<'py>(
    object: &Bound<'py, PyAny>,
) -> Result<Vec<Bound<'py, PyAny>>, BridgeError> {
    if let Ok(tuple) = object.cast::<PyTuple>() {
        Ok(tuple.iter().collect())
    } else if let Ok(list) = object.cast::<PyList>() {
        Ok(list.iter().collect())
    } else {
        Err(BridgeError::mismatch("tuple", type_name(object)))
    }
}

/// Items of a fixed-arity record, extracted positionally
pub fn record_items<'py>(
    object: &Bound<'py, PyAny>,
    arity: usize,
    record: &str,
) -> Result<Vec<Bound<'py, PyAny>>, BridgeError> {
    let expected = || format!("{} ({}-tuple)", record, arity);
    let items = sequence_items(object)
        .map_err(|_| BridgeError::mismatch(expected(), type_name(object)))?;
    if items.len() != arity {
        return Err(BridgeError::mismatch(
            expected(),
            format!("{} of {} items", type_name(object), items.len()),
        ));
    }
    Ok(items)
}

/// Build a runtime tuple from already-marshaled items
pub fn tuple_of<'py>(
    py: Python<'py>,
    items: Vec<Bound<'py, PyAny>>,
) -> Result<Bound<'py, PyAny>, BridgeError> {
    error_channel::checked(py, PyTuple::new(py, items)).map(Bound::into_any)
}

impl<T: ToForeign + ?Sized> ToForeign for &T {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        (**self).to_foreign(py)
    }
}

impl ToForeign for str {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        Ok(PyString::new(py, self).into_any())
    }
}

impl ToForeign for String {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        self.as_str().to_foreign(py)
    }
}

impl FromForeign for String {
    fn from_foreign(object: &Bound<'_, PyAny>) -> Result<Self, BridgeError> {
        if !object.is_instance_of::<PyString>() {
            return Err(BridgeError::mismatch("str", type_name(object)));
        }
        object
            .extract::<String>()
            .map_err(|_| BridgeError::mismatch("str", type_name(object)))
    }
}

impl ToForeign for Path {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        self.to_string_lossy().as_ref().to_foreign(py)
    }
}

impl ToForeign for PathBuf {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        self.as_path().to_foreign(py)
    }
}

impl FromForeign for PathBuf {
    fn from_foreign(object: &Bound<'_, PyAny>) -> Result<Self, BridgeError> {
        String::from_foreign(object).map(PathBuf::from)
    }
}

impl ToForeign for bool {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        Ok(PyBool::new(py, *self).to_owned().into_any())
    }
}

impl FromForeign for bool {
    fn from_foreign(object: &Bound<'_, PyAny>) -> Result<Self, BridgeError> {
        object
            .extract::<bool>()
            .map_err(|_| BridgeError::mismatch("bool", type_name(object)))
    }
}

macro_rules! integer_marshal {
    ($($ty:ty),*) => {
        $(
            impl ToForeign for $ty {
                fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
                    Ok(PyInt::new(py, *self).into_any())
                }
            }

            impl FromForeign for $ty {
                fn from_foreign(object: &Bound<'_, PyAny>) -> Result<Self, BridgeError> {
                    // bool subclasses int in the runtime; a flag is not a number here
                    if object.is_instance_of::<PyBool>() || !object.is_instance_of::<PyInt>() {
                        return Err(BridgeError::mismatch("int", type_name(object)));
                    }
                    object.extract::<$ty>().map_err(|_| {
                        BridgeError::mismatch(stringify!($ty), format!("int {}", object))
                    })
                }
            }
        )*
    };
}

integer_marshal!(i32, i64, u32, u64, usize);

impl ToForeign for f64 {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        Ok(PyFloat::new(py, *self).into_any())
    }
}

impl FromForeign for f64 {
    fn from_foreign(object: &Bound<'_, PyAny>) -> Result<Self, BridgeError> {
        // fontforge reports some float fields as int when they are whole numbers
        if object.is_instance_of::<PyBool>()
            || !(object.is_instance_of::<PyFloat>() || object.is_instance_of::<PyInt>())
        {
            return Err(BridgeError::mismatch("float", type_name(object)));
        }
        object
            .extract::<f64>()
            .map_err(|_| BridgeError::mismatch("float", type_name(object)))
    }
}

impl<T: ToForeign> ToForeign for Option<T> {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        match self {
            Some(value) => value.to_foreign(py),
            None => Ok(py.None().into_bound(py)),
        }
    }
}

impl<T: FromForeign> FromForeign for Option<T> {
    fn from_foreign(object: &Bound<'_, PyAny>) -> Result<Self, BridgeError> {
        if object.is_none() {
            Ok(None)
        } else {
            T::from_foreign(object).map(Some)
        }
    }
}

impl FromForeign for () {
    fn from_foreign(_object: &Bound<'_, PyAny>) -> Result<Self, BridgeError> {
        Ok(())
    }
}

impl<T: ToForeign> ToForeign for [T] {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        let items = self
            .iter()
            .map(|item| item.to_foreign(py))
            .collect::<Result<Vec<_>, _>>()?;
        tuple_of(py, items)
    }
}

impl<T: ToForeign, const N: usize> ToForeign for [T; N] {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        self.as_slice().to_foreign(py)
    }
}

impl<T: ToForeign> ToForeign for Vec<T> {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        self.as_slice().to_foreign(py)
    }
}

impl<T: FromForeign> FromForeign for Vec<T> {
    fn from_foreign(object: &Bound<'_, PyAny>) -> Result<Self, BridgeError> {
        sequence_items(object)?
            .iter()
            .map(|item| T::from_foreign(item))
            .collect()
    }
}

impl<A: ToForeign, B: ToForeign> ToForeign for (A, B) {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        tuple_of(py, vec![self.0.to_foreign(py)?, self.1.to_foreign(py)?])
    }
}

impl<A: FromForeign, B: FromForeign> FromForeign for (A, B) {
    fn from_foreign(object: &Bound<'_, PyAny>) -> Result<Self, BridgeError> {
        let items = record_items(object, 2, "pair")?;
        Ok((A::from_foreign(&items[0])?, B::from_foreign(&items[1])?))
    }
}

impl<A: ToForeign, B: ToForeign, C: ToForeign> ToForeign for (A, B, C) {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        tuple_of(
            py,
            vec![
                self.0.to_foreign(py)?,
                self.1.to_foreign(py)?,
                self.2.to_foreign(py)?,
            ],
        )
    }
}

impl<A: FromForeign, B: FromForeign, C: FromForeign> FromForeign for (A, B, C) {
    fn from_foreign(object: &Bound<'_, PyAny>) -> Result<Self, BridgeError> {
        let items = record_items(object, 3, "triple")?;
        Ok((
            A::from_foreign(&items[0])?,
            B::from_foreign(&items[1])?,
            C::from_foreign(&items[2])?,
        ))
    }
}
