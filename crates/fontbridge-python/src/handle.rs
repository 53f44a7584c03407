//! Owned references to objects living in the embedded runtime's heap
//!
//! A [`ForeignHandle`] owns exactly one reference-count unit. It cannot be
//! copied or cloned; a second owner is made with [`ForeignHandle::retain`],
//! which increments the count. The unit is given back exactly once, either by
//! [`ForeignHandle::release`] or when the handle is dropped. Because release
//! consumes the handle, double release and use after release do not compile.
//!
//! Drops that happen while no session is running are queued by pyo3 and
//! applied the next time a session attaches to the interpreter, so the
//! runtime's finalizers only ever run on the session.

use crate::bridge::Bridge;
use crate::errors::BridgeError;
use crate::marshal::{type_name, ToForeign};
use pyo3::prelude::*;
use std::fmt;

pub struct ForeignHandle {
    object: Py<PyAny>,
}

impl ForeignHandle {
    /// Take ownership of a reference the runtime already handed out
    ///
    /// The count is not incremented. `None` is the null reference.
    pub fn acquire(object: Option<Bound<'_, PyAny>>) -> Result<Self, BridgeError> {
        match object {
            Some(object) => Ok(Self {
                object: object.unbind(),
            }),
            None => Err(BridgeError::ForeignNullResult {
                context: "acquire".to_string(),
            }),
        }
    }

    pub(crate) fn from_bound(object: Bound<'_, PyAny>) -> Self {
        Self {
            object: object.unbind(),
        }
    }

    /// Make a second, independent owner of the same object
    pub fn retain(&self, bridge: &Bridge<'_>) -> ForeignHandle {
        Self {
            object: self.object.clone_ref(bridge.py()),
        }
    }

    /// Give the reference back to the runtime
    pub fn release(self, bridge: &Bridge<'_>) {
        self.object.drop_ref(bridge.py());
    }

    /// Borrow the object for the duration of a session
    pub fn bind<'a, 'py>(&'a self, bridge: &Bridge<'py>) -> &'a Bound<'py, PyAny> {
        self.object.bind(bridge.py())
    }

    /// Current reference count of the underlying object
    pub fn ref_count(&self, bridge: &Bridge<'_>) -> isize {
        self.object.get_refcnt(bridge.py())
    }

    /// True when the handle refers to the runtime's `None`
    pub fn is_none(&self, bridge: &Bridge<'_>) -> bool {
        self.object.is_none(bridge.py())
    }

    /// True when both handles alias the same runtime object
    pub fn same_object(&self, other: &ForeignHandle) -> bool {
        self.object.as_ptr() == other.object.as_ptr()
    }

    pub fn type_name(&self, bridge: &Bridge<'_>) -> String {
        type_name(self.bind(bridge))
    }
}

/// Passing a handle as an argument lends the object for one call
impl ToForeign for ForeignHandle {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        Ok(self.object.bind(py).clone())
    }
}

impl fmt::Debug for ForeignHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForeignHandle")
            .field("object", &self.object.as_ptr())
            .finish()
    }
}
