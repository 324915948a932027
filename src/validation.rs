//! Input validation for timetable records.
//!
//! Checks structural integrity of the five record sets before the model
//! is built. Detects:
//! - Empty record sets
//! - Duplicate course, room, instructor and section IDs
//! - Malformed years and groups
//! - Unknown session types
//! - Timeslots without a day or start time
//!
//! All problems are collected; validation does not stop at the first.
//! Unparseable room capacities are not errors: they fall back to the
//! configured default capacity.

use std::collections::HashSet;
use std::fmt;

use tracing::warn;

use crate::models::{RecordSet, SessionType};

/// Highest academic year accepted.
pub const MAX_YEAR: u32 = 4;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required record set has no entries.
    EmptyRecordSet,
    /// Two records share the same ID.
    DuplicateId,
    /// A year is not an integer in 1..=4.
    MalformedYear,
    /// A section group is not an integer.
    MalformedGroup,
    /// A course type is not lecture, lab, tutorial or project.
    UnknownSessionType,
    /// A timeslot is missing its day or start time.
    MissingTimeslotField,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the record sets for a generation run.
///
/// Checks:
/// 1. No record set is empty
/// 2. No duplicate course IDs, room IDs or instructor names
/// 3. No duplicate section within a year
/// 4. Course and section years parse to 1..=4
/// 5. Section groups parse to integers
/// 6. Course types are known session types
/// 7. Timeslots have a day and a start time
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_records(records: &RecordSet) -> ValidationResult {
    let mut errors = Vec::new();

    check_non_empty(records, &mut errors);

    // Courses
    let mut course_ids = HashSet::new();
    for course in &records.courses {
        let id = course.course_id.trim();
        if !course_ids.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {id}"),
            ));
        }
        if SessionType::parse(&course.course_type).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSessionType,
                format!(
                    "Course '{id}' has unknown type '{}'",
                    course.course_type.trim()
                ),
            ));
        }
        if !is_valid_year(course.year_number()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedYear,
                format!("Course '{id}' has invalid year '{}'", course.year.trim()),
            ));
        }
    }

    // Instructors
    let mut names = HashSet::new();
    for instructor in &records.instructors {
        let name = instructor.name.trim();
        if !names.insert(name) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate instructor name: {name}"),
            ));
        }
    }

    // Rooms
    let mut room_ids = HashSet::new();
    for room in &records.rooms {
        let id = room.room_id.trim();
        if !room_ids.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {id}"),
            ));
        }
        if room.capacity.trim().parse::<u32>().is_err() {
            warn!(
                room = id,
                capacity = room.capacity.as_str(),
                "room capacity is not an integer, default capacity will be used"
            );
        }
    }

    // Sections
    let mut section_keys = HashSet::new();
    for section in &records.sections {
        let id = section.section.trim();
        let year = section.year_number();
        if !is_valid_year(year) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedYear,
                format!("Section '{id}' has invalid year '{}'", section.year.trim()),
            ));
        }
        if section.group_number().is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedGroup,
                format!("Section '{id}' has invalid group '{}'", section.group.trim()),
            ));
        }
        if !section_keys.insert((year, id)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate section ID: {id} (year {})", section.year.trim()),
            ));
        }
    }

    // Timeslots
    for (index, slot) in records.timeslots.iter().enumerate() {
        if slot.day.trim().is_empty() || slot.start_time.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingTimeslotField,
                format!("Timeslot #{} is missing its day or start time", index + 1),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_non_empty(records: &RecordSet, errors: &mut Vec<ValidationError>) {
    let sets = [
        ("courses", records.courses.is_empty()),
        ("instructors", records.instructors.is_empty()),
        ("rooms", records.rooms.is_empty()),
        ("sections", records.sections.is_empty()),
        ("timeslots", records.timeslots.is_empty()),
    ];
    for (name, empty) in sets {
        if empty {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyRecordSet,
                format!("No {name} found"),
            ));
        }
    }
}

fn is_valid_year(year: Option<u32>) -> bool {
    matches!(year, Some(y) if (1..=MAX_YEAR).contains(&y))
}
