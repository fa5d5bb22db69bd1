/// Configuration of the built-in DPLL engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Options {
    /// Maximum number of branching decisions per solve, unlimited when `None`.
    pub max_decisions: Option<usize>,
    /// Polarity tried first when branching on a variable.
    pub phase: bool,
    /// Give don't-care variables the default phase instead of leaving them unassigned.
    pub fill_unassigned: bool,
}

pub const DEFAULT_OPTIONS: Options = Options {
    max_decisions: None,
    phase: false,
    fill_unassigned: false,
};

impl Default for Options {
    fn default() -> Self {
        DEFAULT_OPTIONS
    }
}
