//! Instructor constraints: double-booking, qualification, and role.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::trace;

use super::{group_assignments, lookup, CheckResult, Constraint, ConstraintKind, SlotLoad};
use crate::models::{Assignment, InstructorRecord, SessionType, Variable};

/// An instructor teaches at most one full session, or up to two half
/// sessions, in any timeslot. Full and half sessions never share a slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstructorConflict;

impl Constraint for InstructorConflict {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::InstructorConflict
    }

    fn check(
        &self,
        variables: &BTreeMap<String, Variable>,
        assignment: &Assignment,
    ) -> CheckResult {
        let by_slot = group_assignments(variables, assignment, |v| {
            (v.instructor.as_str(), v.timeslot.as_str())
        })?;

        for ((instructor, timeslot), sessions) in &by_slot {
            let load = SlotLoad::of(sessions.iter().copied());
            if !load.is_admissible() {
                trace!(
                    instructor,
                    timeslot,
                    full = load.full,
                    half = load.half,
                    "instructor double-booked"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// The assigned instructor's qualification list contains the exact course code.
#[derive(Debug, Clone, Default)]
pub struct InstructorQualification {
    qualifications: HashMap<String, HashSet<String>>,
}

impl InstructorQualification {
    pub fn new(instructors: &[InstructorRecord]) -> Self {
        let qualifications = instructors
            .iter()
            .map(|i| {
                let codes: HashSet<String> =
                    i.qualification_list().into_iter().map(String::from).collect();
                (i.name.trim().to_string(), codes)
            })
            .collect();
        Self { qualifications }
    }

    /// Whether `instructor` may teach `course_id`.
    pub fn is_qualified(&self, instructor: &str, course_id: &str) -> bool {
        self.qualifications
            .get(instructor)
            .is_some_and(|codes| codes.contains(course_id))
    }
}

impl Constraint for InstructorQualification {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::InstructorQualification
    }

    fn check(
        &self,
        variables: &BTreeMap<String, Variable>,
        assignment: &Assignment,
    ) -> CheckResult {
        for (id, value) in assignment {
            let variable = lookup(variables, id)?;
            if !self.is_qualified(&value.instructor, variable.course_id()) {
                trace!(
                    session = id.as_str(),
                    instructor = value.instructor.as_str(),
                    "instructor not qualified"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Canonical instructor role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Doctor,
    Assistant,
    /// Any other role, normalized to lowercase.
    Other(String),
}

impl Role {
    const DOCTOR_SYNONYMS: [&'static str; 5] = ["doctor", "dr", "professor", "prof", "doctorate"];
    const ASSISTANT_SYNONYMS: [&'static str; 5] =
        ["assistant", "ta", "tutor", "lab-assistant", "lab_assistant"];

    /// Parses a role through the synonym table. Empty input yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return None;
        }
        if Self::DOCTOR_SYNONYMS.contains(&normalized.as_str()) {
            Some(Self::Doctor)
        } else if Self::ASSISTANT_SYNONYMS.contains(&normalized.as_str()) {
            Some(Self::Assistant)
        } else {
            Some(Self::Other(normalized))
        }
    }

    /// Session types this role may teach.
    pub fn allowed_sessions(&self) -> &'static [SessionType] {
        match self {
            Self::Doctor => &[
                SessionType::Lecture,
                SessionType::Project,
                SessionType::Tutorial,
            ],
            Self::Assistant => &[SessionType::Lab, SessionType::Tutorial],
            Self::Other(_) => &[],
        }
    }
}

/// The assigned instructor's role may teach the session type.
///
/// Instructors with no role, or a role with no allowed sessions, pass
/// unless the constraint is strict.
#[derive(Debug, Clone, Default)]
pub struct InstructorRole {
    roles: HashMap<String, Role>,
    strict: bool,
}

impl InstructorRole {
    pub fn new(instructors: &[InstructorRecord]) -> Self {
        let roles = instructors
            .iter()
            .filter_map(|i| {
                let role = Role::parse(i.role.as_deref()?)?;
                Some((i.name.trim().to_string(), role))
            })
            .collect();
        Self {
            roles,
            strict: false,
        }
    }

    /// Rejects unknown instructors and roles instead of skipping them.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The parsed role of an instructor.
    pub fn role_of(&self, instructor: &str) -> Option<&Role> {
        self.roles.get(instructor)
    }
}

impl Constraint for InstructorRole {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::InstructorRole
    }

    fn check(
        &self,
        variables: &BTreeMap<String, Variable>,
        assignment: &Assignment,
    ) -> CheckResult {
        for (id, value) in assignment {
            let variable = lookup(variables, id)?;
            let allowed = match self.role_of(&value.instructor) {
                Some(role) => role.allowed_sessions(),
                None => &[],
            };
            if allowed.is_empty() {
                if self.strict {
                    trace!(
                        session = id.as_str(),
                        instructor = value.instructor.as_str(),
                        "instructor role unknown"
                    );
                    return Ok(false);
                }
                continue;
            }
            if !allowed.contains(&variable.session_type()) {
                trace!(
                    session = id.as_str(),
                    instructor = value.instructor.as_str(),
                    session_type = %variable.session_type(),
                    "role may not teach session type"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
}
