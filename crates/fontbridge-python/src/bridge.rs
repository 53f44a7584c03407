//! Attribute, call and item access on runtime objects
//!
//! A [`Bridge`] exists only inside [`Session::run`](crate::Session::run) (or
//! [`Bridge::detached`]), so holding one proves the session lock is held.
//! Every operation marshals its arguments, performs exactly one runtime
//! operation and passes the raw result through
//! [`error_channel::checked`] before anything is trusted.

use crate::error_channel;
use crate::errors::BridgeError;
use crate::handle::ForeignHandle;
use crate::initialization::serialized;
use crate::marshal::{FromForeign, ToForeign};
use pyo3::exceptions::{PyAttributeError, PyLookupError};
use pyo3::prelude::*;
use pyo3::types::{PyModule, PyTuple};

pub struct Bridge<'py> {
    py: Python<'py>,
    module: Option<Bound<'py, PyModule>>,
}

impl<'py> Bridge<'py> {
    pub(crate) fn new(py: Python<'py>, module: Option<Bound<'py, PyModule>>) -> Self {
        Self { py, module }
    }

    /// Run `f` with a bridge that has no domain module
    ///
    /// Goes through the same session lock as [`Session::run`](crate::Session::run);
    /// useful for marshaling work that does not need fontforge.
    pub fn detached<R, F>(f: F) -> Result<R, BridgeError>
    where
        F: for<'a> FnOnce(&Bridge<'a>) -> Result<R, BridgeError>,
    {
        serialized(|| {
            Python::attach(|py| {
                let bridge = Bridge::new(py, None);
                let result = f(&bridge);
                bridge.finish(result)
            })
        })
    }

    pub fn py(&self) -> Python<'py> {
        self.py
    }

    /// A fresh handle to the session's domain module
    pub fn module(&self) -> Result<ForeignHandle, BridgeError> {
        self.module
            .as_ref()
            .map(|m| ForeignHandle::from_bound(m.clone().into_any()))
            .ok_or_else(|| BridgeError::ForeignNullResult {
                context: "bridge has no domain module".to_string(),
            })
    }

    /// Import any module importable from the runtime
    pub fn import(&self, name: &str) -> Result<ForeignHandle, BridgeError> {
        match error_channel::checked(self.py, PyModule::import(self.py, name)) {
            Ok(module) => Ok(ForeignHandle::from_bound(module.into_any())),
            Err(BridgeError::Runtime { message, .. }) => {
                Err(BridgeError::Import(name.to_string(), message))
            }
            Err(e) => Err(e),
        }
    }

    /// Read a named attribute; the returned handle is a new owner
    pub fn get_attribute(
        &self,
        handle: &ForeignHandle,
        name: &str,
    ) -> Result<ForeignHandle, BridgeError> {
        tracing::trace!(name, "getattr");
        match handle.bind(self).getattr(name) {
            Err(err) if err.is_instance_of::<PyAttributeError>(self.py) => {
                Err(BridgeError::AttributeNotFound {
                    name: name.to_string(),
                    message: err.value(self.py).to_string(),
                })
            }
            result => {
                let value = error_channel::checked(self.py, result)?;
                ForeignHandle::acquire(Some(value))
            }
        }
    }

    /// Assign a named attribute
    ///
    /// The object is shared: every handle aliasing it sees the new value.
    pub fn set_attribute(
        &self,
        handle: &ForeignHandle,
        name: &str,
        value: &dyn ToForeign,
    ) -> Result<(), BridgeError> {
        tracing::trace!(name, "setattr");
        let value = value.to_foreign(self.py)?;
        error_channel::checked(self.py, handle.bind(self).setattr(name, value))
    }

    /// Call a named method with positional arguments
    ///
    /// A `None` return is the null result and comes back as `Ok(None)`.
    pub fn call_method(
        &self,
        handle: &ForeignHandle,
        name: &str,
        args: &[&dyn ToForeign],
    ) -> Result<Option<ForeignHandle>, BridgeError> {
        tracing::trace!(name, arity = args.len(), "call");
        let method = self.get_attribute(handle, name)?;
        let result = if args.is_empty() {
            method.bind(self).call0()
        } else {
            let args = args
                .iter()
                .map(|arg| arg.to_foreign(self.py))
                .collect::<Result<Vec<_>, _>>()?;
            let args = error_channel::checked(self.py, PyTuple::new(self.py, args))?;
            method.bind(self).call1(args)
        };
        let value = error_channel::checked(self.py, result)?;
        method.release(self);

        if value.is_none() {
            Ok(None)
        } else {
            ForeignHandle::acquire(Some(value)).map(Some)
        }
    }

    /// Membership test (`key in object`)
    pub fn has_item(&self, handle: &ForeignHandle, key: &dyn ToForeign) -> Result<bool, BridgeError> {
        let key = key.to_foreign(self.py)?;
        error_channel::checked(self.py, handle.bind(self).contains(key))
    }

    /// Indexed lookup (`object[key]`)
    ///
    /// A lookup error raised by the runtime is the defined "not found"
    /// outcome and returns `Ok(None)`; every other error propagates.
    pub fn get_item(
        &self,
        handle: &ForeignHandle,
        key: &dyn ToForeign,
    ) -> Result<Option<ForeignHandle>, BridgeError> {
        let key = key.to_foreign(self.py)?;
        match handle.bind(self).get_item(key) {
            Err(err) if err.is_instance_of::<PyLookupError>(self.py) => {
                tracing::trace!(error = %err, "item not found");
                self.poll()?;
                Ok(None)
            }
            result => {
                let value = error_channel::checked(self.py, result)?;
                ForeignHandle::acquire(Some(value)).map(Some)
            }
        }
    }

    /// Number of items (`len(object)`)
    pub fn len(&self, handle: &ForeignHandle) -> Result<usize, BridgeError> {
        error_channel::checked(self.py, handle.bind(self).len())
    }

    /// Convert the object behind a handle into a native value
    pub fn extract<T: FromForeign>(&self, handle: &ForeignHandle) -> Result<T, BridgeError> {
        let value = T::from_foreign(handle.bind(self));
        self.poll()?;
        value
    }

    /// Read an attribute as a native value, releasing the intermediate handle
    pub fn get<T: FromForeign>(&self, handle: &ForeignHandle, name: &str) -> Result<T, BridgeError> {
        let attr = self.get_attribute(handle, name)?;
        let value = self.extract(&attr);
        attr.release(self);
        value
    }

    /// Assign an attribute from a native value
    pub fn set<V: ToForeign + ?Sized>(
        &self,
        handle: &ForeignHandle,
        name: &str,
        value: &V,
    ) -> Result<(), BridgeError> {
        self.set_attribute(handle, name, &value)
    }

    /// Call a method and convert its result; a null result reads as `None`
    pub fn call<T: FromForeign>(
        &self,
        handle: &ForeignHandle,
        name: &str,
        args: &[&dyn ToForeign],
    ) -> Result<T, BridgeError> {
        match self.call_method(handle, name, args)? {
            Some(result) => {
                let value = self.extract(&result);
                result.release(self);
                value
            }
            None => T::from_foreign(&self.py.None().into_bound(self.py)),
        }
    }

    /// Collect the items produced by iterating the object
    pub fn iterate<T: FromForeign>(&self, handle: &ForeignHandle) -> Result<Vec<T>, BridgeError> {
        let iterator = error_channel::checked(self.py, handle.bind(self).try_iter())?;
        let mut items = Vec::new();
        for item in iterator {
            let item = error_channel::checked(self.py, item)?;
            items.push(T::from_foreign(&item)?);
        }
        Ok(items)
    }

    /// Drain the error slot, failing if anything was left in it
    pub fn poll(&self) -> Result<(), BridgeError> {
        match error_channel::last_error(self.py) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Final check when a bridge goes out of scope
    ///
    /// The slot must be empty before the next session run starts; an error
    /// left behind by an otherwise successful closure fails the run.
    pub(crate) fn finish<R>(&self, result: Result<R, BridgeError>) -> Result<R, BridgeError> {
        match (result, error_channel::last_error(self.py)) {
            (Ok(_), Some(stray)) => Err(stray),
            (Err(e), Some(stray)) => {
                tracing::debug!(error = %stray, "discarding error left behind by a failed run");
                Err(e)
            }
            (result, None) => result,
        }
    }
}
