//! Error taxonomy for timetable generation.
//!
//! Errors fall into two groups:
//!
//! - **Before search**: malformed or empty input, and sessions whose
//!   candidate domain is empty. These short-circuit with a message naming
//!   the offending record or course.
//! - **After search**: infeasible, timed out, or cancelled. Callers see all
//!   three as "no solution found" ([`TimetableError::is_no_solution`]).

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::validation::ValidationError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Errors produced while building or solving a timetable.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// A record is malformed or a required value is missing.
    #[error("invalid input: {0}")]
    Input(String),

    /// Record-set validation found one or more problems.
    #[error("input validation failed: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// A base course produced no sessions (e.g. its year has no sections).
    #[error("course '{base_course}' has no schedulable sessions")]
    NoVariablesForCourse { base_course: String },

    /// A session has no candidate (timeslot, room, instructor) triple.
    #[error("session '{variable}' cannot be scheduled: {reason}")]
    UnsatisfiableVariable {
        variable: String,
        reason: UnsatisfiableReason,
    },

    /// Two sessions resolved to the same identifier.
    #[error("duplicate session id '{0}'")]
    DuplicateVariable(String),

    /// A session id that the model does not know about.
    #[error("unknown session id '{0}'")]
    UnknownVariable(String),

    /// The formatter was handed a partial assignment.
    #[error("assignment is incomplete: {assigned}/{total} sessions assigned")]
    IncompleteAssignment { assigned: usize, total: usize },

    /// Search exhausted every candidate without finding a solution.
    #[error("no solution found: search exhausted after {iterations} iterations")]
    Infeasible { iterations: u64 },

    /// Search hit the wall-clock limit before completing.
    #[error(
        "no solution found: time limit reached after {elapsed:?} \
         (deepest partial assignment {assigned}/{total})"
    )]
    Timeout {
        elapsed: Duration,
        assigned: usize,
        total: usize,
    },

    /// Search was cancelled through the external flag.
    #[error("no solution found: search cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Config(#[from] toml::de::Error),
}

impl TimetableError {
    /// Whether this error means the search ran but produced no timetable.
    pub fn is_no_solution(&self) -> bool {
        matches!(
            self,
            Self::Infeasible { .. } | Self::Timeout { .. } | Self::Cancelled
        )
    }

    /// Whether this error was raised before search started because of bad input.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Input(_) | Self::Validation(_))
    }
}

/// Which domain filter left a session without candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsatisfiableReason {
    /// No instructor lists the course id among their qualifications.
    NoQualifiedInstructor,
    /// No room of a compatible type exists.
    NoCompatibleRoom,
    /// Every timeslot falls on the year's rest day (or none are configured).
    NoAvailableTimeslot,
}

impl fmt::Display for UnsatisfiableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NoQualifiedInstructor => "no qualified instructor",
            Self::NoCompatibleRoom => "no compatible room",
            Self::NoAvailableTimeslot => "no available timeslot",
        };
        f.write_str(msg)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_no_solution_classification() {
        assert!(TimetableError::Infeasible { iterations: 3 }.is_no_solution());
        assert!(TimetableError::Cancelled.is_no_solution());
        assert!(TimetableError::Timeout {
            elapsed: Duration::from_secs(1),
            assigned: 0,
            total: 2,
        }
        .is_no_solution());
        assert!(!TimetableError::Input("x".into()).is_no_solution());
        assert!(TimetableError::Input("x".into()).is_input_error());
    }

    #[test]
    fn test_unsatisfiable_message_names_session() {
        let err = TimetableError::UnsatisfiableVariable {
            variable: "CSC101L|1|lecture".into(),
            reason: UnsatisfiableReason::NoQualifiedInstructor,
        };
        let msg = err.to_string();
        assert!(msg.contains("CSC101L|1|lecture"));
        assert!(msg.contains("no qualified instructor"));
    }

    #[test]
    fn test_validation_message_joins_errors() {
        let err = TimetableError::Validation(vec![
            ValidationError::new(ValidationErrorKind::EmptyRecordSet, "No rooms"),
            ValidationError::new(ValidationErrorKind::EmptyRecordSet, "No timeslots"),
        ]);
        assert_eq!(
            err.to_string(),
            "input validation failed: No rooms; No timeslots"
        );
    }
}
