//! Timetable (solution) model.
//!
//! A timetable is the human-readable form of a completed assignment:
//! one row per scheduled session.

use serde::{Deserialize, Serialize};

use super::SessionType;

/// A generated weekly timetable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    /// Rows ordered by year, course and session id.
    pub rows: Vec<TimetableRow>,
}

/// One scheduled session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableRow {
    pub course_id: String,
    pub course_name: String,
    pub session_type: SessionType,
    /// `"Group {id}"` or `"Section {id}"`.
    pub sections: String,
    /// `"{day} {start_time}"`.
    pub timeslot: String,
    pub room: String,
    pub instructor: String,
    /// 1.0 for a full slot, 0.5 for a half slot.
    pub duration: f64,
    pub year: u32,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row.
    pub fn add_row(&mut self, row: TimetableRow) {
        self.rows.push(row);
    }

    /// Number of scheduled sessions.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the timetable has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows taught by an instructor.
    pub fn rows_for_instructor(&self, instructor: &str) -> Vec<&TimetableRow> {
        self.rows
            .iter()
            .filter(|r| r.instructor == instructor)
            .collect()
    }

    /// Rows held in a room.
    pub fn rows_for_room(&self, room: &str) -> Vec<&TimetableRow> {
        self.rows.iter().filter(|r| r.room == room).collect()
    }

    /// Rows for an academic year.
    pub fn rows_for_year(&self, year: u32) -> Vec<&TimetableRow> {
        self.rows.iter().filter(|r| r.year == year).collect()
    }

    /// Rows for a course code.
    pub fn rows_for_course(&self, course_id: &str) -> Vec<&TimetableRow> {
        self.rows
            .iter()
            .filter(|r| r.course_id == course_id)
            .collect()
    }
}
