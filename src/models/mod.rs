//! Timetabling domain models.
//!
//! Provides the input records, the constraint-satisfaction model built from
//! them, and the timetable produced from a solved model.
//!
//! # Domain Mappings
//!
//! | u-timetable | CSP term | Academic meaning |
//! |-------------|----------|------------------|
//! | Variable | variable | One class session (lecture, lab, tutorial, project) |
//! | DomainValue | value | A (timeslot, room, instructor) candidate |
//! | Model | problem state | Sessions, candidates, current assignment |
//! | Timetable | solution | Weekly schedule rows |

mod domain;
mod model;
mod records;
mod session;
mod timetable;
mod variable;

pub use domain::DomainValue;
pub use model::{Assignment, Model};
pub use records::{
    CourseRecord, InstructorRecord, RecordSet, RoomRecord, SectionRecord, TimeslotRecord,
};
pub use session::{RoomType, SessionType};
pub use timetable::{Timetable, TimetableRow};
pub use variable::{base_course_of, Variable, VariableScope};
