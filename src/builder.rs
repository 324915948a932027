//! Model construction from records.
//!
//! Turns the five record sets into session variables and their candidate
//! domains. Every session gets the cross product of
//! - timeslots on its year's teaching days (all days minus the rest day),
//! - rooms of a candidate type for the session,
//! - instructors qualified for the exact course code,
//!
//! in timeslot, room, instructor order.
//!
//! Sessions with no candidates are reported here, before any search runs.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::config::TimetableConfig;
use crate::error::{Result, TimetableError, UnsatisfiableReason};
use crate::models::{
    base_course_of, CourseRecord, DomainValue, InstructorRecord, Model, RecordSet, RoomRecord,
    RoomType, SessionType, TimeslotRecord, Variable, VariableScope,
};

/// Year → group → section ids.
pub type AcademicStructure = BTreeMap<u32, BTreeMap<u32, Vec<String>>>;

/// Groups section records by year and group.
///
/// Sections with an unparseable year or group are skipped.
pub fn academic_structure(records: &RecordSet) -> AcademicStructure {
    let mut structure = AcademicStructure::new();
    for section in &records.sections {
        if let (Some(year), Some(group)) = (section.year_number(), section.group_number()) {
            structure
                .entry(year)
                .or_default()
                .entry(group)
                .or_default()
                .push(section.section.trim().to_string());
        }
    }
    structure
}

/// Builds a [`Model`] from records.
///
/// # Example
/// ```
/// use u_timetable::{TimetableBuilder, TimetableConfig};
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
/// let config = TimetableConfig::default();
///
/// let model = TimetableBuilder::new(&records, &config).build()?;
/// assert_eq!(model.variable_count(), 1);
/// assert_eq!(model.domain_count("CSC101L|1|lecture"), 1);
/// # Ok::<(), u_timetable::TimetableError>(())
/// ```
pub struct TimetableBuilder<'a> {
    records: &'a RecordSet,
    config: &'a TimetableConfig,
}

impl<'a> TimetableBuilder<'a> {
    pub fn new(records: &'a RecordSet, config: &'a TimetableConfig) -> Self {
        Self { records, config }
    }

    /// Builds variables and domains.
    ///
    /// # Errors
    /// - [`TimetableError::Input`] for a course with an unknown type or year
    /// - [`TimetableError::DuplicateVariable`] when two courses share an id
    /// - [`TimetableError::NoVariablesForCourse`] when a course family has
    ///   no sessions (its year has no sections)
    /// - [`TimetableError::UnsatisfiableVariable`] when a session has no
    ///   candidate values
    pub fn build(&self) -> Result<Model> {
        let structure = academic_structure(self.records);
        let mut model = Model::new();
        let mut per_base: BTreeMap<&str, usize> = BTreeMap::new();

        for course in &self.records.courses {
            let variables = self.variables_for(course, &structure)?;
            *per_base.entry(base_course_of(course.course_id.trim())).or_default() +=
                variables.len();

            for variable in variables {
                let domain = self.domain_for(&variable)?;
                let id = variable.id().to_string();
                model.add_variable(variable)?;
                for value in domain {
                    model.add_domain_value(&id, value)?;
                }
            }
        }

        if let Some((base, _)) = per_base.iter().find(|(_, count)| **count == 0) {
            return Err(TimetableError::NoVariablesForCourse {
                base_course: base.to_string(),
            });
        }

        info!(
            event = "model_built",
            courses = self.records.courses.len(),
            variables = model.variable_count(),
            domain_values = model.total_domain_values(),
        );
        Ok(model)
    }

    /// Sessions for one course: per group for lectures and projects, per
    /// section for labs and tutorials.
    fn variables_for(
        &self,
        course: &CourseRecord,
        structure: &AcademicStructure,
    ) -> Result<Vec<Variable>> {
        let course_id = course.course_id.trim();
        let session_type = SessionType::parse(&course.course_type).ok_or_else(|| {
            TimetableError::Input(format!(
                "course '{course_id}' has unknown type '{}'",
                course.course_type.trim()
            ))
        })?;
        let year = course.year_number().ok_or_else(|| {
            TimetableError::Input(format!(
                "course '{course_id}' has invalid year '{}'",
                course.year.trim()
            ))
        })?;

        let Some(groups) = structure.get(&year) else {
            return Ok(Vec::new());
        };

        let variables = if session_type.is_group_level() {
            groups
                .keys()
                .map(|&g| Variable::new(course_id, VariableScope::Group(g), session_type, year))
                .collect()
        } else {
            groups
                .values()
                .flatten()
                .map(|s| Variable::section(course_id, s.as_str(), session_type, year))
                .collect()
        };
        Ok(variables)
    }

    /// Candidate values for one session.
    fn domain_for(&self, variable: &Variable) -> Result<Vec<DomainValue>> {
        let unsatisfiable = |reason| TimetableError::UnsatisfiableVariable {
            variable: variable.id().to_string(),
            reason,
        };

        let instructors = self.qualified_instructors(variable.course_id());
        if instructors.is_empty() {
            return Err(unsatisfiable(UnsatisfiableReason::NoQualifiedInstructor));
        }
        let rooms = self.candidate_rooms(variable.session_type());
        if rooms.is_empty() {
            return Err(unsatisfiable(UnsatisfiableReason::NoCompatibleRoom));
        }
        let timeslots = self.available_timeslots(variable.year());
        if timeslots.is_empty() {
            return Err(unsatisfiable(UnsatisfiableReason::NoAvailableTimeslot));
        }

        let mut domain = Vec::with_capacity(timeslots.len() * rooms.len() * instructors.len());
        for slot in &timeslots {
            for room in &rooms {
                for instructor in &instructors {
                    domain.push(DomainValue::new(
                        slot.label(),
                        room.room_id.trim(),
                        instructor.name.trim(),
                    ));
                }
            }
        }
        debug!(
            variable = variable.id(),
            candidates = domain.len(),
            "domain built"
        );
        Ok(domain)
    }

    fn qualified_instructors(&self, course_id: &str) -> Vec<&'a InstructorRecord> {
        self.records
            .instructors
            .iter()
            .filter(|i| i.is_qualified_for(course_id))
            .collect()
    }

    fn candidate_rooms(&self, session_type: SessionType) -> Vec<&'a RoomRecord> {
        self.records
            .rooms
            .iter()
            .filter(|r| RoomType::parse(&r.room_type).is_candidate_for(session_type))
            .collect()
    }

    fn available_timeslots(&self, year: u32) -> Vec<&'a TimeslotRecord> {
        let days = self.config.available_days(year);
        self.records
            .timeslots
            .iter()
            .filter(|t| days.iter().any(|d| t.is_on(d)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SectionRecord, TimeslotRecord};

    fn records() -> RecordSet {
        RecordSet::new()
            .with_course(CourseRecord::new("CSC101L", "Intro to CS", "Lecture", 1))
            .with_course(CourseRecord::new("CSC101B", "Intro to CS", "lab", 1))
            .with_course(CourseRecord::new("CSC101T", "Intro to CS", "tutorial", 1))
            .with_instructor(InstructorRecord::new("Dr. A", "CSC101L, CSC101T"))
            .with_instructor(InstructorRecord::new("TA B", "CSC101B,CSC101T"))
            .with_room(RoomRecord::new("R1", "Lecture", 60))
            .with_room(RoomRecord::new("T1", "tutorial", 30))
            .with_room(RoomRecord::new("LAB1", "lab", 20))
            .with_section(SectionRecord::new("1", 1, 1))
            .with_section(SectionRecord::new("2", 1, 1))
            .with_section(SectionRecord::new("3", 2, 1))
            // Sunday is year 1's rest day
            .with_timeslot(TimeslotRecord::new("Sunday", "09:00", "10:30"))
            .with_timeslot(TimeslotRecord::new("Monday", "09:00", "10:30"))
            .with_timeslot(TimeslotRecord::new("Tuesday", "09:00", "10:30"))
    }

    #[test]
    fn test_academic_structure() {
        let structure = academic_structure(&records());
        assert_eq!(structure[&1][&1], vec!["1", "2"]);
        assert_eq!(structure[&1][&2], vec!["3"]);
    }

    #[test]
    fn test_variables_per_session_type() {
        let config = TimetableConfig::default();
        let model = TimetableBuilder::new(&records(), &config).build().unwrap();

        // 2 group lectures, 3 section labs, 3 section tutorials
        assert_eq!(model.variable_count(), 8);
        assert!(model.variable("CSC101L|1|lecture").is_some());
        assert!(model.variable("CSC101L|2|lecture").is_some());
        assert!(model.variable("CSC101B|3|lab").is_some());
        let tutorial = model.variable("CSC101T|2|tutorial").unwrap();
        assert_eq!(tutorial.duration(), 0.5);
        assert_eq!(tutorial.base_course(), "CSC101");
    }

    #[test]
    fn test_domain_filters() {
        let config = TimetableConfig::default();
        let model = TimetableBuilder::new(&records(), &config).build().unwrap();

        // 2 days x 2 rooms (R1, T1) x 1 instructor
        let lecture = model.domain("CSC101L|1|lecture");
        assert_eq!(lecture.len(), 4);
        assert!(lecture.iter().all(|v| v.day() != "Sunday"));
        assert!(lecture.iter().all(|v| v.instructor == "Dr. A"));
        assert_eq!(lecture[0], DomainValue::new("Monday 09:00", "R1", "Dr. A"));
        assert_eq!(lecture[1], DomainValue::new("Monday 09:00", "T1", "Dr. A"));

        // Labs only get lab rooms
        assert!(model
            .domain("CSC101B|1|lab")
            .iter()
            .all(|v| v.room == "LAB1"));

        // 2 days x 2 rooms x 2 instructors
        assert_eq!(model.domain_count("CSC101T|1|tutorial"), 8);
    }

    #[test]
    fn test_no_qualified_instructor() {
        let records = records().with_course(CourseRecord::new("MTH101L", "Calculus", "lecture", 1));
        let err = TimetableBuilder::new(&records, &TimetableConfig::default())
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TimetableError::UnsatisfiableVariable {
                reason: UnsatisfiableReason::NoQualifiedInstructor,
                ..
            }
        ));
    }

    #[test]
    fn test_no_compatible_room() {
        let mut records = records();
        records.rooms.retain(|r| r.room_type != "lab");
        let err = TimetableBuilder::new(&records, &TimetableConfig::default())
            .build()
            .unwrap_err();
        match err {
            TimetableError::UnsatisfiableVariable { variable, reason } => {
                assert_eq!(variable, "CSC101B|1|lab");
                assert_eq!(reason, UnsatisfiableReason::NoCompatibleRoom);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_available_timeslot() {
        let mut records = records();
        records.timeslots.retain(|t| t.day == "Sunday");
        let err = TimetableBuilder::new(&records, &TimetableConfig::default())
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TimetableError::UnsatisfiableVariable {
                reason: UnsatisfiableReason::NoAvailableTimeslot,
                ..
            }
        ));
    }

    #[test]
    fn test_course_without_sections() {
        let records = records()
            .with_course(CourseRecord::new("PHY301L", "Physics", "lecture", 3))
            .with_instructor(InstructorRecord::new("Dr. P", "PHY301L"));
        let err = TimetableBuilder::new(&records, &TimetableConfig::default())
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TimetableError::NoVariablesForCourse { base_course } if base_course == "PHY301"
        ));
    }

    #[test]
    fn test_unknown_course_type() {
        let records = records().with_course(CourseRecord::new("CSC101S", "Seminar", "seminar", 1));
        let err = TimetableBuilder::new(&records, &TimetableConfig::default())
            .build()
            .unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_build_is_idempotent() {
        let records = records();
        let config = TimetableConfig::default();
        let builder = TimetableBuilder::new(&records, &config);
        let a = builder.build().unwrap();
        let b = builder.build().unwrap();

        let ids = |m: &Model| m.variables().map(|v| v.id().to_string()).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
        for id in ids(&a) {
            assert_eq!(a.domain(&id), b.domain(&id));
        }
    }
}
