//! The backtracking solver.

use std::collections::HashSet;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::AtomicBool;

use tracing::{debug, info};

use super::{CostModel, SearchState, SolveOutcome, SolverStats, Termination};
use crate::config::TimetableConfig;
use crate::constraints::ConstraintSet;
use crate::error::Result;
use crate::models::{DomainValue, Model, Variable};

/// First-solution backtracking over a [`Model`].
///
/// # Example
/// ```no_run
/// use u_timetable::{
///     BacktrackingSolver, ConstraintSet, RecordSet, TimetableBuilder, TimetableConfig,
/// };
///
/// let records = RecordSet::new();
/// let config = TimetableConfig::default();
/// let mut model = TimetableBuilder::new(&records, &config).build()?;
/// let constraints = ConstraintSet::new(&records, &config);
/// let outcome = BacktrackingSolver::new(&constraints, &config).solve(&mut model)?;
/// println!("{}", outcome.state);
/// # Ok::<(), u_timetable::TimetableError>(())
/// ```
#[derive(Debug)]
pub struct BacktrackingSolver<'a> {
    constraints: &'a ConstraintSet,
    config: &'a TimetableConfig,
    cost_model: CostModel,
    cancel: Option<&'a AtomicBool>,
    state: SearchState,
    stats: SolverStats,
}

impl<'a> BacktrackingSolver<'a> {
    /// Creates a solver with the standard cost terms over the constraint
    /// set's rooms.
    pub fn new(constraints: &'a ConstraintSet, config: &'a TimetableConfig) -> Self {
        Self {
            constraints,
            config,
            cost_model: CostModel::standard(constraints.rooms()),
            cancel: None,
            state: SearchState::Searching,
            stats: SolverStats::default(),
        }
    }

    /// Replaces the cost model used to order candidates.
    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    /// Stops the search as soon as `flag` is set.
    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Current search state.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Counters from the last solve.
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Searches for a complete consistent assignment.
    ///
    /// Any existing assignment is discarded first. On
    /// [`SearchState::SolutionFound`] the model holds the solution;
    /// otherwise the assignment is left empty.
    ///
    /// # Errors
    /// Only on internal inconsistencies in the model (unknown variable ids).
    pub fn solve(&mut self, model: &mut Model) -> Result<SolveOutcome> {
        model.clear_assignment();
        self.state = SearchState::Searching;
        self.stats = SolverStats {
            variables: model.variable_count(),
            ..SolverStats::default()
        };

        info!(
            event = "solve_start",
            variables = model.variable_count(),
            domain_values = model.total_domain_values(),
            constraints = ?self.constraints.enabled_kinds(),
            time_limit_ms = self.config.time_limit_ms,
        );

        let termination = Termination::start(self.config.time_limit(), self.cancel);
        let result = self.search(model, &termination);

        self.stats.elapsed = termination.elapsed();
        self.stats.assigned = model.assigned_count();
        self.state = result?;

        info!(
            event = "solve_end",
            state = %self.state,
            iterations = self.stats.iterations,
            backtracks = self.stats.backtracks,
            best_depth = self.stats.best_depth,
            assigned = self.stats.assigned,
            variables = self.stats.variables,
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
        );

        Ok(SolveOutcome {
            state: self.state,
            stats: self.stats.clone(),
        })
    }

    fn search(&mut self, model: &mut Model, termination: &Termination<'_>) -> Result<SearchState> {
        self.stats.iterations += 1;

        if let Some(stop) = termination.check() {
            return Ok(stop);
        }

        let interval = self.config.progress_interval;
        if interval > 0 && self.stats.iterations % interval == 0 {
            debug!(
                iterations = self.stats.iterations,
                assigned = model.assigned_count(),
                variables = model.variable_count(),
                backtracks = self.stats.backtracks,
                "search progress"
            );
        }

        if model.is_complete() {
            return Ok(SearchState::SolutionFound);
        }

        let Some((id, candidates)) = select_variable(model)
            .map(|v| (v.id().to_string(), self.cost_model.order(model, v)))
        else {
            return Ok(SearchState::Exhausted);
        };

        for value in candidates {
            let mut tentative = Tentative::assign(model, &id, value)?;
            if !self.constraints.is_satisfied(&tentative) {
                continue;
            }
            self.stats.best_depth = self.stats.best_depth.max(tentative.assigned_count());

            match self.search(&mut tentative, termination)? {
                SearchState::SolutionFound => {
                    tentative.commit();
                    return Ok(SearchState::SolutionFound);
                }
                SearchState::Exhausted | SearchState::Searching => {
                    self.stats.backtracks += 1;
                }
                stop => return Ok(stop),
            }
        }

        Ok(SearchState::Exhausted)
    }
}

/// Picks the next session to assign.
///
/// Sessions whose base course already has an assigned component come
/// first; within the pool the smallest domain wins, then the lowest id.
pub(crate) fn select_variable(model: &Model) -> Option<&Variable> {
    let started: HashSet<&str> = model
        .assignment()
        .keys()
        .filter_map(|id| model.variable(id))
        .map(|v| v.base_course())
        .collect();

    let unassigned = model.unassigned_variables();
    let continuing: Vec<&Variable> = unassigned
        .iter()
        .copied()
        .filter(|v| started.contains(v.base_course()))
        .collect();
    let pool = if continuing.is_empty() {
        unassigned
    } else {
        continuing
    };

    pool.into_iter().min_by(|a, b| {
        model
            .domain_count(a.id())
            .cmp(&model.domain_count(b.id()))
            .then_with(|| a.id().cmp(b.id()))
    })
}

/// A tentative assignment, retracted on drop unless committed.
struct Tentative<'m> {
    model: &'m mut Model,
    id: String,
    committed: bool,
}

impl<'m> Tentative<'m> {
    fn assign(model: &'m mut Model, id: &str, value: DomainValue) -> Result<Self> {
        model.assign(id, value)?;
        Ok(Self {
            model,
            id: id.to_string(),
            committed: false,
        })
    }

    /// Keeps the assignment.
    fn commit(mut self) {
        self.committed = true;
    }
}

impl Deref for Tentative<'_> {
    type Target = Model;

    fn deref(&self) -> &Model {
        self.model
    }
}

impl DerefMut for Tentative<'_> {
    fn deref_mut(&mut self) -> &mut Model {
        self.model
    }
}

impl Drop for Tentative<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.model.unassign(&self.id);
        }
    }
}
