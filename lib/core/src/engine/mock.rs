use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::cnf::Formula;
use crate::model::Match;

use super::types::*;
use super::Engine;

#[derive(Debug, Default)]
struct Counts {
    created: AtomicUsize,
    dropped: AtomicUsize,
    solves: AtomicUsize,
}

/// Shared counters recording the life of every [MockEngine] created with it.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    counts: Arc<Counts>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> usize {
        self.counts.created.load(Ordering::SeqCst)
    }

    pub fn dropped(&self) -> usize {
        self.counts.dropped.load(Ordering::SeqCst)
    }

    pub fn solves(&self) -> usize {
        self.counts.solves.load(Ordering::SeqCst)
    }

    /// Engines created but not yet dropped.
    pub fn live(&self) -> usize {
        self.created() - self.dropped()
    }
}

/// Scripted response of a [MockEngine].
#[derive(Debug, Clone)]
pub enum MockResponse {
    Sat(Match),
    Unsat,
    Fail(String),
}

#[derive(Debug)]
pub struct MockEngine {
    response: MockResponse,
    tracker: Tracker,
    stats: Stats,
}

impl MockEngine {
    pub fn new(response: MockResponse, tracker: &Tracker) -> Self {
        tracker.counts.created.fetch_add(1, Ordering::SeqCst);
        Self {
            response,
            tracker: tracker.clone(),
            stats: Stats::default(),
        }
    }
}

impl Drop for MockEngine {
    fn drop(&mut self) {
        self.tracker.counts.dropped.fetch_add(1, Ordering::SeqCst);
    }
}

impl Display for MockEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", tynm::type_name::<Self>(), self.signature())
    }
}

impl Engine for MockEngine {
    fn signature(&self) -> Cow<'_, str> {
        "mock".into()
    }

    fn reset(&mut self) {
        self.stats = Stats::default();
    }

    fn solve(&mut self, _formula: &Formula) -> Result<Solution> {
        self.tracker.counts.solves.fetch_add(1, Ordering::SeqCst);
        self.stats.decisions += 1;
        match &self.response {
            MockResponse::Sat(model) => Ok(Solution::Sat(model.clone())),
            MockResponse::Unsat => Ok(Solution::Unsat),
            MockResponse::Fail(message) => InternalSnafu { message: message.clone() }.fail(),
        }
    }

    fn stats(&self) -> Stats {
        self.stats
    }
}
