//! Student-overlap constraint.
//!
//! Students of one group or section can only be in one place at a time.
//! A group-level session books every section of its group.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::trace;

use super::room::capacity_table;
use super::{group_assignments, CheckResult, Constraint, ConstraintKind, SeatPolicy};
use crate::models::{Assignment, RoomRecord, SectionRecord, Variable, VariableScope};

/// Section-level sessions allowed to share a room and slot.
const MAX_SECTIONS_PER_ROOM: usize = 2;
/// Group-level sessions allowed to share a room and slot.
const MAX_GROUPS_PER_ROOM: usize = 1;

/// Groups and sections are never double-booked, and room sharing stays
/// within seat capacity.
#[derive(Debug, Clone)]
pub struct StudentConflict {
    /// year → section id → group.
    section_groups: HashMap<u32, HashMap<String, u32>>,
    capacities: HashMap<String, u32>,
    seats: SeatPolicy,
}

impl StudentConflict {
    pub fn new(sections: &[SectionRecord], rooms: &[RoomRecord], seats: SeatPolicy) -> Self {
        let mut section_groups: HashMap<u32, HashMap<String, u32>> = HashMap::new();
        for section in sections {
            if let (Some(year), Some(group)) = (section.year_number(), section.group_number()) {
                section_groups
                    .entry(year)
                    .or_default()
                    .insert(section.section.trim().to_string(), group);
            }
        }
        Self {
            section_groups,
            capacities: capacity_table(rooms, seats.default_capacity),
            seats,
        }
    }

    /// Group a section belongs to in a year.
    pub fn group_of(&self, year: u32, section: &str) -> Option<u32> {
        self.section_groups.get(&year)?.get(section).copied()
    }

    fn room_fits(&self, room: &str, sessions: &[&Variable]) -> bool {
        let capacity = self
            .capacities
            .get(room)
            .copied()
            .unwrap_or(self.seats.default_capacity);
        let demand = self.seats.total_demand(sessions.iter().copied());
        let sections = sessions
            .iter()
            .filter(|v| matches!(v.scope(), VariableScope::Section(_)))
            .count();
        let groups = sessions
            .iter()
            .filter(|v| matches!(v.scope(), VariableScope::Group(_)))
            .count();

        demand <= capacity && sections <= MAX_SECTIONS_PER_ROOM && groups <= MAX_GROUPS_PER_ROOM
    }

    fn students_free(&self, sessions: &[&Variable]) -> bool {
        let mut groups: HashSet<(u32, u32)> = HashSet::new();
        let mut sections: HashSet<(u32, &str)> = HashSet::new();

        for v in sessions {
            let fresh = match v.scope() {
                VariableScope::Group(g) => groups.insert((v.year(), *g)),
                VariableScope::Section(s) => sections.insert((v.year(), s.as_str())),
            };
            if !fresh {
                return false;
            }
        }

        // A section is busy whenever its whole group is
        sections.iter().all(|(year, section)| {
            self.group_of(*year, section)
                .map_or(true, |g| !groups.contains(&(*year, g)))
        })
    }
}

impl Constraint for StudentConflict {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::StudentConflict
    }

    fn check(
        &self,
        variables: &BTreeMap<String, Variable>,
        assignment: &Assignment,
    ) -> CheckResult {
        let by_room =
            group_assignments(variables, assignment, |v| (v.timeslot.as_str(), v.room.as_str()))?;
        for ((timeslot, room), sessions) in &by_room {
            if !self.room_fits(room, sessions) {
                trace!(room, timeslot, "room sharing exceeds limits");
                return Ok(false);
            }
        }

        let by_slot = group_assignments(variables, assignment, |v| v.timeslot.as_str())?;
        for (timeslot, sessions) in &by_slot {
            if !self.students_free(sessions) {
                trace!(timeslot, "students double-booked");
                return Ok(false);
            }
        }
        Ok(true)
    }
}
