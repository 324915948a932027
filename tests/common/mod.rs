//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use u_timetable::models::{
    CourseRecord, InstructorRecord, RecordSet, RoomRecord, SectionRecord, SessionType,
    TimeslotRecord,
};
use u_timetable::Model;

pub const WEEK: [&str; 5] = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday"];

/// A small department: one first-year and one second-year course family.
pub fn department() -> RecordSet {
    let mut records = RecordSet::new()
        .with_course(CourseRecord::new("CSC101L", "Intro to Computing", "Lecture", 1))
        .with_course(CourseRecord::new("CSC101B", "Intro to Computing", "Lab", 1))
        .with_course(CourseRecord::new("CSC101T", "Intro to Computing", "Tutorial", 1))
        .with_course(CourseRecord::new("MTH201L", "Linear Algebra", "Lecture", 2))
        .with_course(CourseRecord::new("MTH201P", "Linear Algebra", "Project", 2))
        .with_instructor(InstructorRecord::new("Dr. A", "CSC101L, CSC101T").with_role("doctor"))
        .with_instructor(InstructorRecord::new("TA B", "CSC101B, CSC101T").with_role("TA"))
        .with_instructor(InstructorRecord::new("Dr. C", "MTH201L, MTH201P").with_role("Prof"))
        .with_room(RoomRecord::new("R1", "lecture", 50))
        .with_room(RoomRecord::new("R2", "classroom", 30))
        .with_room(RoomRecord::new("LAB1", "lab", 20))
        .with_section(SectionRecord::new("1", 1, 1))
        .with_section(SectionRecord::new("2", 1, 1))
        .with_section(SectionRecord::new("3", 1, 2));

    for day in WEEK {
        records = records
            .with_timeslot(TimeslotRecord::new(day, "09:00", "10:30"))
            .with_timeslot(TimeslotRecord::new(day, "11:00", "12:30"));
    }
    records
}

/// Seats a session occupies under the default configuration.
pub fn seats(session_type: SessionType) -> u32 {
    match session_type {
        SessionType::Lecture => 45,
        _ => 15,
    }
}

/// Room id → capacity.
pub fn capacities(records: &RecordSet) -> HashMap<String, u32> {
    records
        .rooms
        .iter()
        .map(|r| (r.room_id.clone(), r.capacity_or(15)))
        .collect()
}

/// Every assigned value belongs to its session's domain.
pub fn assignment_within_domains(model: &Model) -> bool {
    model.variables().all(|v| {
        model
            .assigned(v.id())
            .is_some_and(|value| model.domain(v.id()).contains(value))
    })
}
