pub mod cnf;
pub mod engine;
pub mod eval;
pub mod handle;
pub mod lifecycle;
pub mod lit;
pub mod model;
pub mod options;
pub mod value;
