pub use api::*;
pub use dpll::Dpll;
pub use types::*;

mod api;
pub mod dpll;
pub mod mock;
mod types;
