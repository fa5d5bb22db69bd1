use log::debug;
use pyo3::prelude::*;
use pyo3::types::PyList;

use tinysat_core::engine::Dpll;
use tinysat_core::lifecycle::Slot;
use tinysat_core::options::Options;

use crate::codec::{decode_formula, encode_formula, encode_match};
use crate::error::Result;

/// `Solver(formula, *, max_decisions=None, phase=False, fill_unassigned=False)`
///
/// Owns one handle. Methods borrow the object mutably, so concurrent calls on
/// the same instance are refused by the runtime instead of racing.
///
/// Calling `__init__` again does not touch the held formula; re-construct
/// with `reinit(formula)` or swap the formula with `rebind(formula)`.
#[pyclass(name = "Solver", module = "tinysatpy")]
pub struct PySolver {
    slot: Slot<Dpll>,
    options: Options,
}

impl PySolver {
    fn engine(&self) -> Dpll {
        Dpll::with_options(self.options)
    }
}

#[pymethods]
impl PySolver {
    #[new]
    #[pyo3(signature = (formula, *, max_decisions=None, phase=false, fill_unassigned=false))]
    pub fn new(
        formula: &Bound<'_, PyAny>,
        max_decisions: Option<usize>,
        phase: bool,
        fill_unassigned: bool,
    ) -> Result<Self> {
        let formula = decode_formula(formula)?;
        let options = Options {
            max_decisions,
            phase,
            fill_unassigned,
        };
        let mut solver = Self {
            slot: Slot::allocate(),
            options,
        };
        solver.slot.construct(formula, solver.engine())?;
        Ok(solver)
    }

    /// Solve (once) and return the match, `[]` if unsatisfiable.
    pub fn solve<'py>(&mut self, py: Python<'py>) -> Result<Bound<'py, PyList>> {
        let assignment = self.slot.handle_mut()?.current_match()?;
        encode_match(py, assignment)
    }

    pub fn satisfiable(&mut self) -> Result<bool> {
        Ok(self.slot.handle_mut()?.is_satisfiable()?)
    }

    /// Replace the formula, keeping the engine.
    pub fn rebind(&mut self, formula: &Bound<'_, PyAny>) -> Result<()> {
        let formula = decode_formula(formula)?;
        self.slot.handle_mut()?.rebind(formula);
        Ok(())
    }

    /// Tear the current handle down and construct a fresh one over `formula`.
    pub fn reinit(&mut self, formula: &Bound<'_, PyAny>) -> Result<()> {
        let formula = decode_formula(formula)?;
        let engine = self.engine();
        self.slot.construct(formula, engine)?;
        Ok(())
    }

    pub fn close(&mut self) {
        debug!("Closing solver in phase '{}'", self.slot.phase());
        self.slot.destroy();
    }

    #[getter]
    pub fn closed(&self) -> bool {
        self.slot.handle().is_err()
    }

    #[getter]
    pub fn formula<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyList>> {
        encode_formula(py, self.slot.handle()?.formula())
    }

    #[getter]
    pub fn variable_count(&self) -> Result<usize> {
        Ok(self.slot.handle()?.variable_count())
    }

    #[getter]
    pub fn decisions(&self) -> Result<usize> {
        Ok(self.slot.handle()?.stats().decisions)
    }

    #[getter]
    pub fn propagations(&self) -> Result<usize> {
        Ok(self.slot.handle()?.stats().propagations)
    }

    #[getter]
    pub fn conflicts(&self) -> Result<usize> {
        Ok(self.slot.handle()?.stats().conflicts)
    }

    pub fn __repr__(&self) -> String {
        match self.slot.handle() {
            Ok(handle) => format!(
                "Solver(clauses={}, variables={}, solved={})",
                handle.formula().num_clauses(),
                handle.variable_count(),
                if handle.is_solved() { "True" } else { "False" }
            ),
            Err(_) => format!("Solver(<{}>)", self.slot.phase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pyo3::ffi::c_str;

    use super::*;
    use crate::error::TspError;

    #[test]
    fn test_solver_lifecycle() -> color_eyre::Result<()> {
        Python::with_gil(|py| -> color_eyre::Result<()> {
            let formula = py.eval(c_str!("[[1, -2], [2, 3]]"), None, None)?;
            let mut solver = PySolver::new(&formula, None, false, false)?;
            assert_eq!(solver.variable_count()?, 3);
            assert_eq!(solver.__repr__(), "Solver(clauses=2, variables=3, solved=False)");

            let first = solver.solve(py)?;
            assert_eq!(first.len(), 3);
            assert!(solver.satisfiable()?);

            let unit = py.eval(c_str!("[[1]]"), None, None)?;
            solver.reinit(&unit)?;
            assert_eq!(solver.solve(py)?.extract::<Vec<Option<bool>>>()?, vec![Some(true)]);
            assert_eq!(solver.formula(py)?.extract::<Vec<Vec<i32>>>()?, vec![vec![1]]);

            solver.close();
            assert!(solver.closed());
            assert!(matches!(solver.solve(py), Err(TspError::Lifecycle { .. })));
            assert_eq!(solver.__repr__(), "Solver(<destroyed>)");
            Ok(())
        })
    }

    #[test]
    fn test_rebind_keeps_engine() -> color_eyre::Result<()> {
        Python::with_gil(|py| -> color_eyre::Result<()> {
            let formula = py.eval(c_str!("[[1], [-1]]"), None, None)?;
            let mut solver = PySolver::new(&formula, None, false, false)?;
            assert!(!solver.satisfiable()?);
            assert!(solver.solve(py)?.is_empty());

            let formula = py.eval(c_str!("[[-2]]"), None, None)?;
            solver.rebind(&formula)?;
            assert_eq!(
                solver.solve(py)?.extract::<Vec<Option<bool>>>()?,
                vec![None, Some(false)]
            );
            Ok(())
        })
    }

    #[test]
    fn test_failed_reinit_keeps_previous_handle() -> color_eyre::Result<()> {
        Python::with_gil(|py| -> color_eyre::Result<()> {
            let formula = py.eval(c_str!("[[1, 2]]"), None, None)?;
            let mut solver = PySolver::new(&formula, None, false, false)?;
            let bad = py.eval(c_str!("[[1, None]]"), None, None)?;
            assert!(matches!(solver.reinit(&bad), Err(TspError::Conversion { .. })));
            assert_eq!(solver.formula(py)?.extract::<Vec<Vec<i32>>>()?, vec![vec![1, 2]]);
            Ok(())
        })
    }

    #[test]
    fn test_options_reach_engine() -> color_eyre::Result<()> {
        Python::with_gil(|py| -> color_eyre::Result<()> {
            let formula = py.eval(c_str!("[[1, 2], [3]]"), None, None)?;
            let mut solver = PySolver::new(&formula, None, true, true)?;
            assert_eq!(
                solver.solve(py)?.extract::<Vec<Option<bool>>>()?,
                vec![Some(true), Some(true), Some(true)]
            );
            assert_eq!(solver.decisions()?, 1);
            Ok(())
        })
    }
}
