//! Candidate resource triples.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One candidate `(timeslot, room, instructor)` for a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DomainValue {
    /// `"{day} {start_time}"`.
    pub timeslot: String,
    /// Room id.
    pub room: String,
    /// Instructor name.
    pub instructor: String,
}

impl DomainValue {
    pub fn new(
        timeslot: impl Into<String>,
        room: impl Into<String>,
        instructor: impl Into<String>,
    ) -> Self {
        Self {
            timeslot: timeslot.into(),
            room: room.into(),
            instructor: instructor.into(),
        }
    }

    /// Day part of the timeslot key.
    pub fn day(&self) -> &str {
        self.timeslot
            .split_once(' ')
            .map(|(day, _)| day)
            .unwrap_or(&self.timeslot)
    }
}

impl fmt::Display for DomainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.timeslot, self.room, self.instructor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_day() {
        let v = DomainValue::new("Monday 09:00", "R1", "Dr. Amal");
        assert_eq!(v.to_string(), "(Monday 09:00, R1, Dr. Amal)");
        assert_eq!(v.day(), "Monday");
        assert_eq!(DomainValue::new("Monday", "R1", "X").day(), "Monday");
    }
}
