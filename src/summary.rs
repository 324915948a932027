//! Input data summary.
//!
//! Counts what a record set contains, for display before a run. Purely
//! informational: nothing here affects generation.
//!
//! # Fields
//!
//! | Field | Definition |
//! |-------|-----------|
//! | Record counts | Entries in each of the five record sets |
//! | Base courses | Distinct course families (suffix stripped) |
//! | Years | Distinct academic years among sections, ascending |
//! | Room types | Rooms per lowercase type, `unknown` for blank |

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::{base_course_of, RecordSet};

/// Record counts and breakdowns for a record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataSummary {
    pub courses: usize,
    /// Distinct course families.
    pub base_courses: usize,
    pub instructors: usize,
    pub rooms: usize,
    pub sections: usize,
    pub timeslots: usize,
    /// Academic years observed in section records.
    pub years: Vec<u32>,
    /// Room type → room count.
    pub room_types: BTreeMap<String, usize>,
}

impl DataSummary {
    /// Summarizes a record set.
    pub fn from_records(records: &RecordSet) -> Self {
        let base_courses: BTreeSet<&str> = records
            .courses
            .iter()
            .map(|c| base_course_of(&c.course_id))
            .collect();

        let years: BTreeSet<u32> = records
            .sections
            .iter()
            .filter_map(|s| s.year_number())
            .collect();

        let mut room_types = BTreeMap::new();
        for room in &records.rooms {
            let kind = room.room_type.trim().to_lowercase();
            let kind = if kind.is_empty() {
                "unknown".to_string()
            } else {
                kind
            };
            *room_types.entry(kind).or_insert(0) += 1;
        }

        Self {
            courses: records.courses.len(),
            base_courses: base_courses.len(),
            instructors: records.instructors.len(),
            rooms: records.rooms.len(),
            sections: records.sections.len(),
            timeslots: records.timeslots.len(),
            years: years.into_iter().collect(),
            room_types,
        }
    }

    /// Whether every record set is empty.
    pub fn is_empty(&self) -> bool {
        self.courses == 0
            && self.instructors == 0
            && self.rooms == 0
            && self.sections == 0
            && self.timeslots == 0
    }
}
