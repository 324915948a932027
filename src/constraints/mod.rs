//! Hard constraints over a (partial) assignment.
//!
//! Every constraint is a pure predicate: it reads the model's variables and
//! the current assignment, plus lookup tables built once from the records,
//! and never mutates anything.
//!
//! # Evaluation order
//!
//! | # | Kind | Default |
//! |---|------|---------|
//! | 1 | `InstructorConflict` | on |
//! | 2 | `RoomConflict` | on |
//! | 3 | `RoomType` | on |
//! | 4 | `InstructorQualification` | on |
//! | 5 | `InstructorRole` | off |
//! | 6 | `StudentConflict` | off |
//!
//! The fast path ([`ConstraintSet::check`]) stops at the first failure.
//! [`ConstraintSet::diagnose`] runs every enabled constraint independently
//! and reports each outcome, for debugging infeasible inputs.

mod instructor;
mod room;
mod student;

pub use instructor::{InstructorConflict, InstructorQualification, InstructorRole, Role};
pub use room::{RoomConflict, RoomTypeConstraint, SeatPolicy};
pub use student::StudentConflict;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::{self, Debug};
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::config::TimetableConfig;
use crate::models::{Assignment, DomainValue, Model, RecordSet, RoomRecord, Variable};

/// Outcome of evaluating one constraint.
pub type CheckResult = Result<bool, ConstraintError>;

/// A constraint could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    /// The assignment names a session the model does not contain.
    #[error("assignment references unknown session '{0}'")]
    UnknownVariable(String),
}

/// Identifies a built-in constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// An instructor teaches at most one full session (or two half sessions) per slot.
    InstructorConflict,
    /// Room seat capacity and session multiplicity per slot.
    RoomConflict,
    /// Session type matches room type.
    RoomType,
    /// Instructor is qualified for the exact course code.
    InstructorQualification,
    /// Instructor role may teach the session type.
    InstructorRole,
    /// Groups and sections are not double-booked.
    StudentConflict,
}

impl ConstraintKind {
    /// All kinds in evaluation order.
    pub const ALL: [ConstraintKind; 6] = [
        Self::InstructorConflict,
        Self::RoomConflict,
        Self::RoomType,
        Self::InstructorQualification,
        Self::InstructorRole,
        Self::StudentConflict,
    ];

    /// Kinds enabled unless configured otherwise.
    pub const DEFAULT_ENABLED: [ConstraintKind; 4] = [
        Self::InstructorConflict,
        Self::RoomConflict,
        Self::RoomType,
        Self::InstructorQualification,
    ];

    /// Snake-case name, as used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InstructorConflict => "instructor_conflict",
            Self::RoomConflict => "room_conflict",
            Self::RoomType => "room_type",
            Self::InstructorQualification => "instructor_qualification",
            Self::InstructorRole => "instructor_role",
            Self::StudentConflict => "student_conflict",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A hard constraint.
///
/// Implementations hold only read-only lookup tables built at construction.
pub trait Constraint: Send + Sync + Debug {
    /// Which built-in constraint this is.
    fn kind(&self) -> ConstraintKind;

    /// Evaluates the constraint against a (possibly partial) assignment.
    ///
    /// Returns `Ok(false)` on violation and `Err` when the assignment cannot
    /// be evaluated at all.
    fn check(
        &self,
        variables: &BTreeMap<String, Variable>,
        assignment: &Assignment,
    ) -> CheckResult;

    /// Constraint name.
    fn name(&self) -> &'static str {
        self.kind().name()
    }
}

/// Result of one constraint in a diagnostic pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticOutcome {
    Satisfied,
    Failed,
    /// The constraint could not be evaluated.
    Errored(String),
}

/// Per-constraint diagnostic report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintDiagnostic {
    pub kind: ConstraintKind,
    pub outcome: DiagnosticOutcome,
}

impl ConstraintDiagnostic {
    /// Whether the constraint passed.
    pub fn is_satisfied(&self) -> bool {
        self.outcome == DiagnosticOutcome::Satisfied
    }
}

/// The active constraint set for one model.
#[derive(Debug)]
pub struct ConstraintSet {
    constraints: Vec<Box<dyn Constraint>>,
    enabled: HashSet<ConstraintKind>,
    rooms: Vec<RoomRecord>,
}

impl ConstraintSet {
    /// Builds every built-in constraint from the records; enables those
    /// listed in `config.constraints`.
    pub fn new(records: &RecordSet, config: &TimetableConfig) -> Self {
        let seats = SeatPolicy::from_config(config);
        let constraints: Vec<Box<dyn Constraint>> = vec![
            Box::new(InstructorConflict),
            Box::new(RoomConflict::new(&records.rooms, seats)),
            Box::new(RoomTypeConstraint::new(&records.rooms)),
            Box::new(InstructorQualification::new(&records.instructors)),
            Box::new(InstructorRole::new(&records.instructors).with_strict(config.strict_roles)),
            Box::new(StudentConflict::new(&records.sections, &records.rooms, seats)),
        ];
        Self {
            constraints,
            enabled: config.constraints.iter().copied().collect(),
            rooms: records.rooms.clone(),
        }
    }

    /// Rooms the set was built from.
    pub fn rooms(&self) -> &[RoomRecord] {
        &self.rooms
    }

    /// Enables a constraint.
    pub fn enable(&mut self, kind: ConstraintKind) {
        self.enabled.insert(kind);
    }

    /// Disables a constraint.
    pub fn disable(&mut self, kind: ConstraintKind) {
        self.enabled.remove(&kind);
    }

    /// Whether a constraint is enabled.
    pub fn is_enabled(&self, kind: ConstraintKind) -> bool {
        self.enabled.contains(&kind)
    }

    /// Enabled kinds, in evaluation order.
    pub fn enabled_kinds(&self) -> Vec<ConstraintKind> {
        self.active().map(|c| c.kind()).collect()
    }

    fn active(&self) -> impl Iterator<Item = &dyn Constraint> {
        self.constraints
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| self.enabled.contains(&c.kind()))
    }

    /// The first enabled constraint the assignment violates.
    ///
    /// A constraint that cannot be evaluated counts as violated.
    pub fn first_violation(
        &self,
        variables: &BTreeMap<String, Variable>,
        assignment: &Assignment,
    ) -> Option<ConstraintKind> {
        self.active()
            .find(|c| !matches!(c.check(variables, assignment), Ok(true)))
            .map(|c| {
                trace!(constraint = c.name(), "constraint violated");
                c.kind()
            })
    }

    /// Whether every enabled constraint holds.
    pub fn check(&self, variables: &BTreeMap<String, Variable>, assignment: &Assignment) -> bool {
        self.first_violation(variables, assignment).is_none()
    }

    /// Whether the model's current assignment satisfies every enabled constraint.
    pub fn is_satisfied(&self, model: &Model) -> bool {
        self.check(model.variable_map(), model.assignment())
    }

    /// Runs every enabled constraint independently and reports each outcome.
    pub fn diagnose(
        &self,
        variables: &BTreeMap<String, Variable>,
        assignment: &Assignment,
    ) -> Vec<ConstraintDiagnostic> {
        self.active()
            .map(|c| {
                let outcome = match c.check(variables, assignment) {
                    Ok(true) => DiagnosticOutcome::Satisfied,
                    Ok(false) => DiagnosticOutcome::Failed,
                    Err(e) => DiagnosticOutcome::Errored(e.to_string()),
                };
                trace!(constraint = c.name(), outcome = ?outcome, "diagnosed");
                ConstraintDiagnostic {
                    kind: c.kind(),
                    outcome,
                }
            })
            .collect()
    }

    /// Diagnoses the model's current assignment.
    pub fn diagnose_model(&self, model: &Model) -> Vec<ConstraintDiagnostic> {
        self.diagnose(model.variable_map(), model.assignment())
    }
}

pub(crate) fn lookup<'a>(
    variables: &'a BTreeMap<String, Variable>,
    id: &str,
) -> Result<&'a Variable, ConstraintError> {
    variables
        .get(id)
        .ok_or_else(|| ConstraintError::UnknownVariable(id.to_string()))
}

/// Groups assigned sessions by a key derived from their domain value.
pub(crate) fn group_assignments<'a, K, F>(
    variables: &'a BTreeMap<String, Variable>,
    assignment: &'a Assignment,
    key: F,
) -> Result<HashMap<K, Vec<&'a Variable>>, ConstraintError>
where
    K: Eq + Hash,
    F: Fn(&'a DomainValue) -> K,
{
    let mut groups: HashMap<K, Vec<&'a Variable>> = HashMap::new();
    for (id, value) in assignment {
        let variable = lookup(variables, id)?;
        groups.entry(key(value)).or_default().push(variable);
    }
    Ok(groups)
}

/// Full/half session counts sharing one resource in one slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SlotLoad {
    pub full: usize,
    pub half: usize,
}

impl SlotLoad {
    pub fn of<'a>(sessions: impl IntoIterator<Item = &'a Variable>) -> Self {
        sessions.into_iter().fold(Self::default(), |mut load, v| {
            if v.is_full() {
                load.full += 1;
            } else if v.is_half() {
                load.half += 1;
            }
            load
        })
    }

    /// At most one full session, or at most two half sessions, never mixed.
    pub fn is_admissible(&self) -> bool {
        self.full <= 1 && self.half <= 2 && (self.full == 0 || self.half == 0)
    }
}
