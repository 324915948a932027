//! Input records.
//!
//! The shapes produced by the ingestion layer (CSV, JSON, request bodies).
//! Values stay as the raw strings found in the source; parsing and
//! normalization happen in `validation` and the builder.
//!
//! Column aliases match the tabular sources (`Year`, `Day`, `StartTime`, ...).

use serde::{Deserialize, Serialize};

/// A course offering of a single session type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Course code including its session-type suffix (e.g. `CSC101L`).
    pub course_id: String,
    /// Human-readable course name.
    #[serde(alias = "course", alias = "CourseName")]
    pub course_name: String,
    /// Session type: lecture, lab, tutorial or project.
    #[serde(rename = "type", alias = "Type", alias = "course_type")]
    pub course_type: String,
    /// Academic year (1..=4).
    #[serde(alias = "Year")]
    pub year: String,
    /// Semester label. Informational.
    #[serde(default, alias = "Semester")]
    pub semester: String,
}

impl CourseRecord {
    /// Creates a course record.
    pub fn new(
        course_id: impl Into<String>,
        course_name: impl Into<String>,
        course_type: impl Into<String>,
        year: u32,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            course_name: course_name.into(),
            course_type: course_type.into(),
            year: year.to_string(),
            semester: String::new(),
        }
    }

    /// Sets the semester label.
    pub fn with_semester(mut self, semester: impl Into<String>) -> Self {
        self.semester = semester.into();
        self
    }

    /// Parsed academic year.
    pub fn year_number(&self) -> Option<u32> {
        self.year.trim().parse().ok()
    }
}

/// An instructor and the course codes they may teach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructorRecord {
    pub name: String,
    /// Comma-separated course codes.
    #[serde(default)]
    pub qualifications: String,
    /// Free-text role (doctor, assistant, TA, ...).
    #[serde(default)]
    pub role: Option<String>,
}

impl InstructorRecord {
    /// Creates an instructor record.
    pub fn new(name: impl Into<String>, qualifications: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualifications: qualifications.into(),
            role: None,
        }
    }

    /// Sets the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Qualification codes, trimmed, empty entries dropped.
    pub fn qualification_list(&self) -> Vec<&str> {
        self.qualifications
            .split(',')
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .collect()
    }

    /// Whether the instructor is qualified for the exact course code.
    pub fn is_qualified_for(&self, course_id: &str) -> bool {
        self.qualification_list().contains(&course_id)
    }
}

/// A teaching room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub room_id: String,
    /// Room type: lecture, classroom, tutorial, lab.
    #[serde(rename = "type", alias = "Type", alias = "room_type")]
    pub room_type: String,
    /// Seat count as found in the source.
    #[serde(default)]
    pub capacity: String,
}

impl RoomRecord {
    /// Creates a room record.
    pub fn new(room_id: impl Into<String>, room_type: impl Into<String>, capacity: u32) -> Self {
        Self {
            room_id: room_id.into(),
            room_type: room_type.into(),
            capacity: capacity.to_string(),
        }
    }

    /// Overrides the raw capacity text.
    pub fn with_raw_capacity(mut self, capacity: impl Into<String>) -> Self {
        self.capacity = capacity.into();
        self
    }

    /// Parsed capacity, or `fallback` when missing or not an integer.
    pub fn capacity_or(&self, fallback: u32) -> u32 {
        self.capacity.trim().parse().unwrap_or(fallback)
    }
}

/// A section and the group it belongs to within its year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    #[serde(alias = "Section")]
    pub section: String,
    #[serde(alias = "Group")]
    pub group: String,
    #[serde(alias = "Year")]
    pub year: String,
}

impl SectionRecord {
    /// Creates a section record.
    pub fn new(section: impl Into<String>, group: u32, year: u32) -> Self {
        Self {
            section: section.into(),
            group: group.to_string(),
            year: year.to_string(),
        }
    }

    /// Parsed academic year.
    pub fn year_number(&self) -> Option<u32> {
        self.year.trim().parse().ok()
    }

    /// Parsed group number.
    pub fn group_number(&self) -> Option<u32> {
        self.group.trim().parse().ok()
    }
}

/// A weekly teaching slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeslotRecord {
    #[serde(alias = "Day")]
    pub day: String,
    #[serde(alias = "StartTime")]
    pub start_time: String,
    #[serde(default, alias = "EndTime")]
    pub end_time: String,
}

impl TimeslotRecord {
    /// Creates a timeslot record.
    pub fn new(
        day: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            day: day.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// Timeslot key used in domain values: `"{day} {start_time}"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.day.trim(), self.start_time.trim())
    }

    /// Whether this slot falls on `day` (case-insensitive).
    pub fn is_on(&self, day: &str) -> bool {
        self.day.trim().eq_ignore_ascii_case(day.trim())
    }
}

/// The five record collections a generation run consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    pub courses: Vec<CourseRecord>,
    pub instructors: Vec<InstructorRecord>,
    pub rooms: Vec<RoomRecord>,
    pub sections: Vec<SectionRecord>,
    pub timeslots: Vec<TimeslotRecord>,
}

impl RecordSet {
    /// Creates an empty record set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course.
    pub fn with_course(mut self, course: CourseRecord) -> Self {
        self.courses.push(course);
        self
    }

    /// Adds an instructor.
    pub fn with_instructor(mut self, instructor: InstructorRecord) -> Self {
        self.instructors.push(instructor);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: RoomRecord) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a section.
    pub fn with_section(mut self, section: SectionRecord) -> Self {
        self.sections.push(section);
        self
    }

    /// Adds a timeslot.
    pub fn with_timeslot(mut self, timeslot: TimeslotRecord) -> Self {
        self.timeslots.push(timeslot);
        self
    }

    /// Looks up a course by its code.
    pub fn course(&self, course_id: &str) -> Option<&CourseRecord> {
        self.courses.iter().find(|c| c.course_id.trim() == course_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualification_list_trims() {
        let i = InstructorRecord::new("Dr. Amal", " CSC101L ,CSC101T,, MTH201L ");
        assert_eq!(i.qualification_list(), vec!["CSC101L", "CSC101T", "MTH201L"]);
        assert!(i.is_qualified_for("CSC101T"));
        // Exact match only
        assert!(!i.is_qualified_for("CSC101"));
    }

    #[test]
    fn test_capacity_fallback() {
        assert_eq!(RoomRecord::new("R1", "lecture", 60).capacity_or(15), 60);
        let bad = RoomRecord::new("R2", "lab", 0).with_raw_capacity("twenty");
        assert_eq!(bad.capacity_or(15), 15);
        let empty = RoomRecord::new("R3", "lab", 0).with_raw_capacity("");
        assert_eq!(empty.capacity_or(15), 15);
    }

    #[test]
    fn test_timeslot_label_and_day() {
        let ts = TimeslotRecord::new("Monday ", "09:00", "10:30");
        assert_eq!(ts.label(), "Monday 09:00");
        assert!(ts.is_on("monday"));
        assert!(!ts.is_on("Tuesday"));
    }

    #[test]
    fn test_deserialize_tabular_columns() {
        let course: CourseRecord = serde_json::from_str(
            r#"{"course_id":"CSC101L","course":"Intro","type":"Lecture",
                "Year":"1","Semester":"1"}"#,
        )
        .unwrap();
        assert_eq!(course.course_name, "Intro");
        assert_eq!(course.course_type, "Lecture");
        assert_eq!(course.year_number(), Some(1));
        assert_eq!(course.semester, "1");

        let slot: TimeslotRecord =
            serde_json::from_str(r#"{"Day":"Sunday","StartTime":"09:00","EndTime":"10:30"}"#)
                .unwrap();
        assert_eq!(slot.label(), "Sunday 09:00");

        let instructor: InstructorRecord =
            serde_json::from_str(r#"{"name":"TA Omar","qualifications":"CSC101B"}"#).unwrap();
        assert_eq!(instructor.role, None);
    }

    #[test]
    fn test_course_builder() {
        let course =
            CourseRecord::new("MTH201L", "Linear Algebra", "lecture", 2).with_semester("2");
        assert_eq!(course.semester, "2");
        assert_eq!(course.year_number(), Some(2));
        assert!(CourseRecord::new("MTH201L", "Linear Algebra", "lecture", 2).semester.is_empty());
    }

    #[test]
    fn test_record_set_course_lookup() {
        let records =
            RecordSet::new().with_course(CourseRecord::new("CSC101L", "Intro", "lecture", 1));
        assert!(records.course("CSC101L").is_some());
        assert!(records.course("CSC101B").is_none());
    }
}
