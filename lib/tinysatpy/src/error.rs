use std::collections::TryReserveError;

use pyo3::create_exception;
use pyo3::exceptions::PyException;
use pyo3::PyErr;
use snafu::Snafu;

use tinysat_core::engine::EngineError;
use tinysat_core::lifecycle::LifecycleError;

create_exception!(
    tinysatpy,
    TinySatError,
    PyException,
    "Raised when decoding, solving or verification fails."
);

pub type Result<T, E = TspError> = std::result::Result<T, E>;

/// Every failure of the binding. All of them reach Python as `tinysatpy.error`.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TspError {
    #[snafu(display("conversion error: {}: {}", path, message))]
    Conversion { path: String, message: String },

    #[snafu(display("allocation error: could not reserve {} {}: {}", len, what, source))]
    Allocation {
        what: &'static str,
        len: usize,
        source: TryReserveError,
    },

    #[snafu(context(false), display("host error: {}", source))]
    Host { source: PyErr },

    #[snafu(context(false), display("engine error: {}", source))]
    Engine { source: EngineError },

    #[snafu(context(false), display("{}", source))]
    Lifecycle { source: LifecycleError },
}

impl From<TspError> for PyErr {
    fn from(err: TspError) -> Self {
        TinySatError::new_err(err.to_string())
    }
}
