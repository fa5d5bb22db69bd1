//! Lifecycle of a host-visible solver object.
//!
//! A [Slot] is the storage a host object reserves for exactly one [Handle].
//! It moves through `Allocated -> Constructed -> Destroyed`; re-construction
//! tears the current handle down before building the next one, and the
//! handle is torn down before the slot itself goes away.

use std::fmt::{Display, Formatter};
use std::mem;

use log::debug;
use snafu::Snafu;

use crate::cnf::Formula;
use crate::engine::{Dpll, Engine};
use crate::handle::Handle;

pub type Result<T, E = LifecycleError> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum LifecycleError {
    #[snafu(display("Solver is not constructed"))]
    NotConstructed,

    #[snafu(display("Solver is already destroyed"))]
    Destroyed,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    Allocated,
    Constructed,
    Destroyed,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Allocated => write!(f, "allocated"),
            Phase::Constructed => write!(f, "constructed"),
            Phase::Destroyed => write!(f, "destroyed"),
        }
    }
}

#[derive(Debug)]
enum State<E: Engine> {
    Allocated,
    Constructed(Handle<E>),
    Destroyed,
}

#[derive(Debug)]
pub struct Slot<E: Engine = Dpll> {
    state: State<E>,
}

impl<E: Engine> Slot<E> {
    pub const fn allocate() -> Self {
        Self { state: State::Allocated }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Allocated => Phase::Allocated,
            State::Constructed(_) => Phase::Constructed,
            State::Destroyed => Phase::Destroyed,
        }
    }

    /// Build a handle over `formula` in this slot.
    ///
    /// A handle already living here is destroyed first.
    pub fn construct(&mut self, formula: Formula, engine: E) -> Result<()> {
        match mem::replace(&mut self.state, State::Allocated) {
            State::Allocated => {}
            State::Constructed(previous) => {
                debug!("Re-constructing: tearing down the previous handle");
                previous.destroy();
            }
            State::Destroyed => {
                self.state = State::Destroyed;
                return DestroyedSnafu.fail();
            }
        }
        self.state = State::Constructed(Handle::construct(formula, engine));
        Ok(())
    }

    pub fn handle(&self) -> Result<&Handle<E>> {
        match &self.state {
            State::Constructed(handle) => Ok(handle),
            State::Allocated => NotConstructedSnafu.fail(),
            State::Destroyed => DestroyedSnafu.fail(),
        }
    }

    pub fn handle_mut(&mut self) -> Result<&mut Handle<E>> {
        match &mut self.state {
            State::Constructed(handle) => Ok(handle),
            State::Allocated => NotConstructedSnafu.fail(),
            State::Destroyed => DestroyedSnafu.fail(),
        }
    }

    /// Tear down the handle, if any. The slot cannot be constructed again.
    pub fn destroy(&mut self) {
        if let State::Constructed(handle) = mem::replace(&mut self.state, State::Destroyed) {
            handle.destroy();
        }
    }
}

impl<E: Engine> Default for Slot<E> {
    fn default() -> Self {
        Self::allocate()
    }
}

impl<E: Engine> Drop for Slot<E> {
    fn drop(&mut self) {
        self.destroy();
    }
}
