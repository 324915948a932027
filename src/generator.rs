//! End-to-end timetable generation.
//!
//! Runs the full pipeline for one request:
//! validate → build model → (optional shuffle) → constraint set → solve →
//! format. Every call builds its own [`Model`], so concurrent calls on
//! separate generators share nothing mutable.

use std::sync::atomic::AtomicBool;

use tracing::{info, warn};

use crate::builder::TimetableBuilder;
use crate::config::TimetableConfig;
use crate::constraints::ConstraintSet;
use crate::error::{Result, TimetableError};
use crate::formatter::format_solution;
use crate::models::{Model, RecordSet, Timetable};
use crate::search::{BacktrackingSolver, SearchState, SolveOutcome};
use crate::summary::DataSummary;
use crate::validation::validate_records;

/// Generates timetables from a record set.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use u_timetable::{TimetableConfig, TimetableGenerator};
/// use u_timetable::models::{
///     CourseRecord, InstructorRecord, RecordSet, RoomRecord, SectionRecord, TimeslotRecord,
/// };
///
/// let records = RecordSet::new()
///     .with_course(CourseRecord::new("CSC101L", "Intro to CS", "lecture", 1))
///     .with_instructor(InstructorRecord::new("Dr. Amal", "CSC101L"))
///     .with_room(RoomRecord::new("R1", "lecture", 60))
///     .with_section(SectionRecord::new("1", 1, 1))
///     .with_timeslot(TimeslotRecord::new("Monday", "09:00", "10:30"));
///
/// let timetable = TimetableGenerator::new(records)
///     .with_config(TimetableConfig::default().with_time_limit(Duration::from_secs(5)))
///     .generate()?;
/// assert_eq!(timetable.row_count(), 1);
/// assert_eq!(timetable.rows[0].timeslot, "Monday 09:00");
/// # Ok::<(), u_timetable::TimetableError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TimetableGenerator {
    records: RecordSet,
    config: TimetableConfig,
}

impl TimetableGenerator {
    /// Creates a generator with the default configuration.
    pub fn new(records: RecordSet) -> Self {
        Self {
            records,
            config: TimetableConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: TimetableConfig) -> Self {
        self.config = config;
        self
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    /// Counts and breakdowns of the input records.
    pub fn summary(&self) -> DataSummary {
        DataSummary::from_records(&self.records)
    }

    /// Validates the records and configuration without building anything.
    ///
    /// # Errors
    /// [`TimetableError::Validation`] with every record problem found, or
    /// [`TimetableError::Input`] when no teaching days are configured.
    pub fn validate(&self) -> Result<()> {
        validate_records(&self.records).map_err(TimetableError::Validation)?;
        if self.config.days.is_empty() {
            return Err(TimetableError::Input("no teaching days configured".into()));
        }
        Ok(())
    }

    /// Validates and builds a fresh model, shuffled if a seed is set.
    pub fn build_model(&self) -> Result<Model> {
        self.validate()?;
        let mut model = TimetableBuilder::new(&self.records, &self.config).build()?;
        if let Some(seed) = self.config.shuffle_seed {
            model.shuffle_domains(seed);
        }
        Ok(model)
    }

    /// Generates a timetable.
    ///
    /// # Errors
    /// - Input errors ([`TimetableError::is_input_error`]) and unsatisfiable
    ///   sessions, before search starts
    /// - [`TimetableError::Infeasible`], [`TimetableError::Timeout`] or
    ///   [`TimetableError::Cancelled`] when search ends without a solution
    pub fn generate(&self) -> Result<Timetable> {
        self.run(None)
    }

    /// Generates a timetable, stopping early once `cancel` is set.
    pub fn generate_with_cancel(&self, cancel: &AtomicBool) -> Result<Timetable> {
        self.run(Some(cancel))
    }

    fn run(&self, cancel: Option<&AtomicBool>) -> Result<Timetable> {
        let summary = self.summary();
        info!(
            event = "generate_start",
            courses = summary.courses,
            instructors = summary.instructors,
            rooms = summary.rooms,
            sections = summary.sections,
            timeslots = summary.timeslots,
        );

        let mut model = self.build_model()?;
        let constraints = ConstraintSet::new(&self.records, &self.config);

        let mut solver = BacktrackingSolver::new(&constraints, &self.config);
        if let Some(flag) = cancel {
            solver = solver.with_cancel_flag(flag);
        }
        let outcome = solver.solve(&mut model)?;

        match outcome.state {
            SearchState::SolutionFound => {
                let timetable = format_solution(&model, &self.records.courses)?;
                info!(
                    event = "generate_end",
                    rows = timetable.row_count(),
                    iterations = outcome.stats.iterations,
                );
                Ok(timetable)
            }
            _ => Err(no_solution(&outcome)),
        }
    }
}

fn no_solution(outcome: &SolveOutcome) -> TimetableError {
    let stats = &outcome.stats;
    let error = match outcome.state {
        SearchState::TimedOut => TimetableError::Timeout {
            elapsed: stats.elapsed,
            assigned: stats.best_depth,
            total: stats.variables,
        },
        SearchState::Cancelled => TimetableError::Cancelled,
        _ => TimetableError::Infeasible {
            iterations: stats.iterations,
        },
    };
    warn!(
        event = "no_solution",
        state = %outcome.state,
        iterations = stats.iterations,
        best_depth = stats.best_depth,
        variables = stats.variables,
        "{error}"
    );
    error
}
