//! Session variables.
//!
//! A [`Variable`] is one class session that needs a (timeslot, room,
//! instructor) triple. Lectures and projects are scheduled per group;
//! labs and tutorials per section.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SessionType;

/// Session-type suffix letters stripped to find a course family.
const SUFFIXES: [char; 4] = ['L', 'B', 'T', 'P'];

/// Who attends a session: a whole group or a single section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableScope {
    Group(u32),
    Section(String),
}

impl fmt::Display for VariableScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(g) => write!(f, "{g}"),
            Self::Section(s) => f.write_str(s),
        }
    }
}

/// A class session to be scheduled.
///
/// Fields are read-only: the id, course family and duration are derived
/// in [`Variable::new`] and must stay consistent with the session type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    /// `"{course_id}|{group or section}|{session_type}"`.
    id: String,
    course_id: String,
    scope: VariableScope,
    session_type: SessionType,
    /// 1.0 for a full slot, 0.5 for a half slot.
    duration: f64,
    year: u32,
    base_course: String,
}

impl Variable {
    /// Creates a session variable. Duration follows the session type.
    pub fn new(
        course_id: impl Into<String>,
        scope: VariableScope,
        session_type: SessionType,
        year: u32,
    ) -> Self {
        let course_id = course_id.into();
        Self {
            id: format!("{course_id}|{scope}|{session_type}"),
            base_course: base_course_of(&course_id).to_string(),
            course_id,
            scope,
            session_type,
            duration: session_type.duration(),
            year,
        }
    }

    /// Creates a group-level session.
    pub fn group(
        course_id: impl Into<String>,
        group: u32,
        session_type: SessionType,
        year: u32,
    ) -> Self {
        Self::new(course_id, VariableScope::Group(group), session_type, year)
    }

    /// Creates a section-level session.
    pub fn section(
        course_id: impl Into<String>,
        section: impl Into<String>,
        session_type: SessionType,
        year: u32,
    ) -> Self {
        Self::new(
            course_id,
            VariableScope::Section(section.into()),
            session_type,
            year,
        )
    }

    /// `"{course_id}|{group or section}|{session_type}"`.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Course code including suffix.
    #[inline]
    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    /// Group or section attending.
    #[inline]
    pub fn scope(&self) -> &VariableScope {
        &self.scope
    }

    #[inline]
    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    /// Slot fraction, fixed by the session type.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Academic year (1..=4).
    #[inline]
    pub fn year(&self) -> u32 {
        self.year
    }

    /// Course family shared by all session-type variants.
    #[inline]
    pub fn base_course(&self) -> &str {
        &self.base_course
    }

    pub fn group_id(&self) -> Option<u32> {
        match &self.scope {
            VariableScope::Group(g) => Some(*g),
            VariableScope::Section(_) => None,
        }
    }

    pub fn section_id(&self) -> Option<&str> {
        match &self.scope {
            VariableScope::Section(s) => Some(s),
            VariableScope::Group(_) => None,
        }
    }

    /// Occupies a full slot.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.duration == 1.0
    }

    /// Occupies half a slot.
    #[inline]
    pub fn is_half(&self) -> bool {
        self.duration == 0.5
    }

    /// Label for timetable output: `"Group {id}"` or `"Section {id}"`.
    pub fn sections_label(&self) -> String {
        match &self.scope {
            VariableScope::Group(g) => format!("Group {g}"),
            VariableScope::Section(s) => format!("Section {s}"),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Course family of a course code: the code minus one trailing suffix letter.
pub fn base_course_of(course_id: &str) -> &str {
    let trimmed = course_id.trim();
    match trimmed.strip_suffix(SUFFIXES) {
        Some(base) if !base.is_empty() => base.trim_end(),
        _ => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_variable() {
        let v = Variable::group("CSC101L", 2, SessionType::Lecture, 1);
        assert_eq!(v.id(), "CSC101L|2|lecture");
        assert_eq!(v.group_id(), Some(2));
        assert_eq!(v.section_id(), None);
        assert_eq!(v.base_course(), "CSC101");
        assert!(v.is_full());
        assert_eq!(v.sections_label(), "Group 2");
    }

    #[test]
    fn test_section_variable() {
        let v = Variable::section("CSC101T", "7", SessionType::Tutorial, 1);
        assert_eq!(v.id(), "CSC101T|7|tutorial");
        assert_eq!(v.section_id(), Some("7"));
        assert_eq!(v.group_id(), None);
        assert!(v.is_half());
        assert!(!v.is_full());
        assert_eq!(v.sections_label(), "Section 7");
    }

    #[test]
    fn test_duration_follows_session_type() {
        for session_type in SessionType::ALL {
            let v = Variable::group("CSC101", 1, session_type, 2);
            assert_eq!(v.duration(), session_type.duration());
            assert_eq!(v.session_type(), session_type);
            assert_eq!(v.year(), 2);
            assert!(v.is_full() ^ v.is_half());
        }
    }

    #[test]
    fn test_base_course() {
        assert_eq!(base_course_of("CSC101L"), "CSC101");
        assert_eq!(base_course_of("CSC101B"), "CSC101");
        assert_eq!(base_course_of("CSC101T"), "CSC101");
        assert_eq!(base_course_of("AID312P"), "AID312");
        assert_eq!(base_course_of("CSC 111L"), "CSC 111");
        // No suffix: unchanged
        assert_eq!(base_course_of("MTH201"), "MTH201");
        // Only one letter is stripped
        assert_eq!(base_course_of("XBT"), "XB");
        assert_eq!(base_course_of("L"), "L");
    }
}
