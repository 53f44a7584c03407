//! Interpreter startup and the process-wide session
//!
//! The embedded runtime is not safe for concurrent use, and its error slot is
//! per thread state. All bridge work is therefore funneled through one global
//! lock: [`Session::run`] and [`Bridge::detached`] are the only ways to obtain a
//! [`Bridge`], and both hold the lock for the whole closure.

use crate::bridge::Bridge;
use crate::error_channel;
use crate::errors::BridgeError;
use fontbridge_config::venv_paths::resolve_site_packages;
use fontbridge_config::Config;
use fontbridge_logger as logger;
use once_cell::sync::OnceCell;
use parking_lot::{const_mutex, Mutex};
use pyo3::prelude::*;
use pyo3::types::PyModule;
use std::cell::Cell;
use std::path::PathBuf;
use std::time::Instant;

pub struct Session {
    module_name: String,
    site_packages: Option<PathBuf>,
}

static SESSION_INSTANCE: OnceCell<Result<Session, BridgeError>> = OnceCell::new();

static RUNTIME_LOCK: Mutex<()> = const_mutex(());

thread_local! {
    static IN_SESSION: Cell<bool> = const { Cell::new(false) };
}

/// Clears the reentrancy flag even if the closure unwinds
struct SessionFlag;

impl Drop for SessionFlag {
    fn drop(&mut self) {
        IN_SESSION.with(|flag| flag.set(false));
    }
}

/// Run `f` while holding the runtime lock
///
/// A nested call from the same thread would deadlock on the lock, so it fails
/// with [`BridgeError::SessionBusy`] instead.
pub(crate) fn serialized<R>(
    f: impl FnOnce() -> Result<R, BridgeError>,
) -> Result<R, BridgeError> {
    if IN_SESSION.with(Cell::get) {
        return Err(BridgeError::SessionBusy);
    }
    let _lock = RUNTIME_LOCK.lock();
    IN_SESSION.with(|flag| flag.set(true));
    let _flag = SessionFlag;
    f()
}

impl Session {
    /// Get or initialize the session singleton from the user's configuration
    ///
    /// A failed import or interpreter setup is remembered; later calls report
    /// the same failure without retrying. Any other error (an unreadable
    /// config, a call from inside a running session) leaves the singleton
    /// untouched so a later call can still succeed.
    pub fn get() -> Result<&'static Session, BridgeError> {
        if let Some(outcome) = SESSION_INSTANCE.get() {
            return replay(outcome);
        }
        if IN_SESSION.with(Cell::get) {
            return Err(BridgeError::SessionBusy);
        }

        let config = Config::load()?;
        let outcome = SESSION_INSTANCE.get_or_try_init(|| match Session::initialize(&config) {
            Ok(session) => Ok(Ok(session)),
            Err(e @ (BridgeError::Import(..) | BridgeError::Initialization(_))) => Ok(Err(e)),
            Err(e) => Err(e),
        })?;
        replay(outcome)
    }

    /// Initialize a session for an explicit configuration
    ///
    /// Used by tests and tools that do not want the global configuration. The
    /// interpreter itself is still process-wide.
    pub fn initialize(config: &Config) -> Result<Session, BridgeError> {
        let start_time = Instant::now();
        let module_name = config.module_name().to_string();

        if let Some(home) = &config.python_home {
            logger::debug(&format!("Setting PYTHONHOME to {}", home));
            std::env::set_var("PYTHONHOME", home);
        }

        let site_packages = match config.venv_path() {
            Some(venv) => Some(
                resolve_site_packages(&venv)
                    .map_err(|e| BridgeError::Initialization(e.to_string()))?,
            ),
            None => None,
        };

        let pyo3_start = Instant::now();
        Python::initialize();
        logger::debug(&format!(
            "Python::initialize took: {:?}",
            pyo3_start.elapsed()
        ));

        let session = Session {
            module_name,
            site_packages,
        };

        logger::step(&format!("Importing {}", session.module_name));
        serialized(|| {
            Python::attach(|py| {
                if let Some(site_packages) = &session.site_packages {
                    session.add_site_dir(py, site_packages)?;
                }
                session.import_module(py).map(|_| ())
            })
        })?;

        logger::debug(&format!(
            "Session for '{}' initialized in {:?}",
            session.module_name,
            start_time.elapsed()
        ));
        Ok(session)
    }

    /// Name of the domain module every [`Bridge`] of this session exposes
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn site_packages(&self) -> Option<&PathBuf> {
        self.site_packages.as_ref()
    }

    /// Run `f` with exclusive access to the runtime
    ///
    /// The error slot is checked once more when `f` returns; an error left
    /// behind by a closure that otherwise succeeded fails the run.
    pub fn run<R, F>(&self, f: F) -> Result<R, BridgeError>
    where
        F: for<'a> FnOnce(&Bridge<'a>) -> Result<R, BridgeError>,
    {
        serialized(|| {
            Python::attach(|py| {
                if let Some(stray) = error_channel::last_error(py) {
                    logger::warn(&format!("Discarding error left by an earlier caller: {}", stray));
                }
                let module = self.import_module(py)?;
                let bridge = Bridge::new(py, Some(module));
                let result = f(&bridge);
                bridge.finish(result)
            })
        })
    }

    fn import_module<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyModule>, BridgeError> {
        match error_channel::checked(py, PyModule::import(py, self.module_name.as_str())) {
            Ok(module) => Ok(module),
            Err(e) => {
                logger::debug(&format!("Failed to import {}: {}", self.module_name, e));
                Err(BridgeError::Import(self.module_name.clone(), e.to_string()))
            }
        }
    }

    fn add_site_dir(&self, py: Python<'_>, site_packages: &PathBuf) -> Result<(), BridgeError> {
        let site = error_channel::checked(py, PyModule::import(py, "site"))?;
        let dir = site_packages.to_string_lossy().to_string();
        error_channel::checked(py, site.call_method1("addsitedir", (dir,)))?;
        logger::debug(&format!("Added site directory {}", site_packages.display()));
        Ok(())
    }
}

/// Hand out the cached session, or a copy of the remembered failure
fn replay(outcome: &'static Result<Session, BridgeError>) -> Result<&'static Session, BridgeError> {
    match outcome {
        Ok(session) => Ok(session),
        Err(BridgeError::Import(module, message)) => {
            Err(BridgeError::Import(module.clone(), message.clone()))
        }
        Err(BridgeError::Initialization(message)) => {
            Err(BridgeError::Initialization(message.clone()))
        }
        Err(other) => Err(BridgeError::Initialization(other.to_string())),
    }
}
