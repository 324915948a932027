//! Solution formatting.

use std::collections::HashMap;

use crate::error::{Result, TimetableError};
use crate::models::{CourseRecord, Model, Timetable, TimetableRow, Variable};

/// Converts a fully assigned model into timetable rows.
///
/// Rows are ordered by year, course id, then session id. Course names come
/// from `courses`.
///
/// # Errors
/// - [`TimetableError::IncompleteAssignment`] if any session is unassigned;
///   no partial timetable is produced.
/// - [`TimetableError::Input`] if a session's course is not in `courses`.
pub fn format_solution(model: &Model, courses: &[CourseRecord]) -> Result<Timetable> {
    if !model.is_complete() {
        return Err(TimetableError::IncompleteAssignment {
            assigned: model.assigned_count(),
            total: model.variable_count(),
        });
    }

    let names: HashMap<&str, &str> = courses
        .iter()
        .map(|c| (c.course_id.trim(), c.course_name.trim()))
        .collect();

    let mut variables: Vec<&Variable> = model.variables().collect();
    variables.sort_by(|a, b| {
        (a.year(), a.course_id(), a.id()).cmp(&(b.year(), b.course_id(), b.id()))
    });

    let mut timetable = Timetable::new();
    for variable in variables {
        let value = model
            .assigned(variable.id())
            .ok_or_else(|| TimetableError::UnknownVariable(variable.id().to_string()))?;
        let course_name = names.get(variable.course_id()).ok_or_else(|| {
            TimetableError::Input(format!("no course record for '{}'", variable.course_id()))
        })?;

        timetable.add_row(TimetableRow {
            course_id: variable.course_id().to_string(),
            course_name: course_name.to_string(),
            session_type: variable.session_type(),
            sections: variable.sections_label(),
            timeslot: value.timeslot.clone(),
            room: value.room.clone(),
            instructor: value.instructor.clone(),
            duration: variable.duration(),
            year: variable.year(),
        });
    }
    Ok(timetable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DomainValue, SessionType};

    fn solved() -> Model {
        let mut model = Model::new();
        model
            .add_variable(Variable::group("MTH201L", 1, SessionType::Lecture, 2))
            .unwrap();
        model
            .add_variable(Variable::section("CSC101T", "2", SessionType::Tutorial, 1))
            .unwrap();
        model
            .add_variable(Variable::group("CSC101L", 1, SessionType::Lecture, 1))
            .unwrap();
        model
            .assign("MTH201L|1|lecture", DomainValue::new("Monday 09:00", "R1", "Dr. C"))
            .unwrap();
        model
            .assign("CSC101T|2|tutorial", DomainValue::new("Monday 11:00", "R2", "TA B"))
            .unwrap();
        model
            .assign("CSC101L|1|lecture", DomainValue::new("Tuesday 09:00", "R1", "Dr. A"))
            .unwrap();
        model
    }

    fn courses() -> Vec<CourseRecord> {
        vec![
            CourseRecord::new("CSC101L", "Intro to CS", "lecture", 1),
            CourseRecord::new("CSC101T", "Intro to CS", "tutorial", 1),
            CourseRecord::new("MTH201L", "Linear Algebra", "lecture", 2),
        ]
    }

    #[test]
    fn test_rows_ordered_and_labelled() {
        let timetable = format_solution(&solved(), &courses()).unwrap();
        let ids: Vec<_> = timetable.rows.iter().map(|r| r.course_id.as_str()).collect();
        assert_eq!(ids, vec!["CSC101L", "CSC101T", "MTH201L"]);

        let tutorial = &timetable.rows[1];
        assert_eq!(tutorial.sections, "Section 2");
        assert_eq!(tutorial.duration, 0.5);
        assert_eq!(tutorial.course_name, "Intro to CS");
        assert_eq!(timetable.rows[2].sections, "Group 1");
        assert_eq!(timetable.rows[2].instructor, "Dr. C");
    }

    #[test]
    fn test_incomplete_model_rejected() {
        let mut model = solved();
        model.unassign("CSC101L|1|lecture");
        let err = format_solution(&model, &courses()).unwrap_err();
        assert!(matches!(
            err,
            TimetableError::IncompleteAssignment {
                assigned: 2,
                total: 3
            }
        ));
    }

    #[test]
    fn test_missing_course_record() {
        let err = format_solution(&solved(), &courses()[..2]).unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("MTH201L"));
    }

    #[test]
    fn test_serializes_to_json() {
        let timetable = format_solution(&solved(), &courses()).unwrap();
        let json = serde_json::to_value(&timetable).unwrap();
        assert_eq!(json["rows"][0]["session_type"], "lecture");
        assert_eq!(json["rows"][0]["timeslot"], "Tuesday 09:00");
    }
}
