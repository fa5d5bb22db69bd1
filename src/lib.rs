//! Small SAT solving toolkit: a DPLL engine behind a lazily-solving handle,
//! plus the Python bindings in `lib/tinysatpy`.

pub use tinysat_core as core;

pub use tinysat_core::cnf::{Clause, Formula};
pub use tinysat_core::engine::{Dpll, Engine, EngineError, Solution, Stats};
pub use tinysat_core::handle::Handle;
pub use tinysat_core::lifecycle::{LifecycleError, Phase, Slot};
pub use tinysat_core::lit::Lit;
pub use tinysat_core::model::Match;
pub use tinysat_core::options::{Options, DEFAULT_OPTIONS};
pub use tinysat_core::value::Value;
