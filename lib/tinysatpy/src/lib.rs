//! Python bindings: `import tinysatpy`.
//!
//! ```python
//! tinysatpy.solve([[1, -2], [2, 3]])          # -> [False, False, True]
//! tinysatpy.match([[1, -2], [2, 3]], [True, True, False])  # -> True
//! ```

use env_logger::Env;
use log::debug;
use pyo3::prelude::*;
use pyo3::types::PyList;

use tinysat_core::engine::{Dpll, Engine};
use tinysat_core::handle::Handle;

pub mod codec;
pub mod error;
pub mod solver;

use crate::codec::{decode_formula, decode_match, encode_match};
use crate::error::{Result, TinySatError};
use crate::solver::PySolver;

/// Solve `formula` and return the match, or `[]` if it is unsatisfiable.
#[pyfunction]
#[pyo3(signature = (formula))]
pub fn solve<'py>(py: Python<'py>, formula: &Bound<'py, PyAny>) -> Result<Bound<'py, PyList>> {
    let formula = decode_formula(formula)?;
    let mut handle = Handle::construct(formula, Dpll::new());
    let result = match handle.current_match() {
        Ok(assignment) => encode_match(py, assignment),
        Err(e) => Err(e.into()),
    };
    handle.destroy();
    result
}

/// Whether `assignment` satisfies every clause of `formula`.
#[pyfunction]
#[pyo3(name = "match", signature = (formula, assignment))]
pub fn verify(formula: &Bound<'_, PyAny>, assignment: &Bound<'_, PyAny>) -> Result<bool> {
    let formula = decode_formula(formula)?;
    let assignment = decode_match(assignment)?;
    Ok(Dpll::new().verify(&formula, &assignment)?)
}

fn init_logging() {
    let env = Env::new().filter_or("TINYSAT_LOG", "warn");
    if env_logger::Builder::from_env(env).try_init().is_err() {
        debug!("Logger is already installed");
    }
}

#[pymodule]
fn tinysatpy(m: &Bound<'_, PyModule>) -> PyResult<()> {
    init_logging();
    m.add("error", m.py().get_type::<TinySatError>())?;
    m.add_class::<PySolver>()?;
    m.add_function(wrap_pyfunction!(solve, m)?)?;
    m.add_function(wrap_pyfunction!(verify, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
