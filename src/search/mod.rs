//! Depth-first backtracking search.
//!
//! Finds the first assignment that satisfies every enabled constraint.
//! There is no global cost optimization: cost only orders the candidates
//! tried at each step.
//!
//! # Algorithm
//!
//! 1. Stop if the cancel flag is raised or the time limit has elapsed.
//! 2. Stop with a solution once every session is assigned.
//! 3. Pick the next session (course-aware MRV): prefer sessions whose
//!    course already has an assigned component, then the fewest
//!    candidates, then the lowest id.
//! 4. Order its candidates by [`CostModel`], cheapest first.
//! 5. Assign each candidate in turn, check the constraints, and recurse.
//!    A rejected or dead-end candidate is retracted.
//! 6. When every candidate fails, backtrack.
//!
//! # Reference
//! Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach",
//! Ch. 6: Constraint Satisfaction Problems

mod cost;
mod solver;
mod termination;

pub use cost::{
    Cost, CostContext, CostModel, CostTerm, DayDistribution, InstructorLoad, RoomFit,
    TimePreference, TimeslotDistribution,
};
pub use solver::BacktrackingSolver;
pub use termination::Termination;

use std::fmt;
use std::time::Duration;

/// Where the search stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    /// Not finished.
    #[default]
    Searching,
    /// Every session is assigned and every constraint holds.
    SolutionFound,
    /// Every candidate was tried without success.
    Exhausted,
    /// The time limit elapsed first.
    TimedOut,
    /// The cancel flag was raised.
    Cancelled,
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Searching => "searching",
            Self::SolutionFound => "solution found",
            Self::Exhausted => "exhausted",
            Self::TimedOut => "timed out",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Search counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverStats {
    /// Search nodes visited.
    pub iterations: u64,
    /// Candidates retracted after their subtree failed.
    pub backtracks: u64,
    /// Sessions assigned when the search stopped.
    pub assigned: usize,
    /// Deepest partial assignment reached.
    pub best_depth: usize,
    /// Sessions in the model.
    pub variables: usize,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Final state plus counters.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    pub state: SearchState,
    pub stats: SolverStats,
}

impl SolveOutcome {
    pub fn is_solution_found(&self) -> bool {
        self.state == SearchState::SolutionFound
    }
}
