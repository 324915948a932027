//! Room constraints: seat capacity, session multiplicity, and room type.

use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use super::{group_assignments, lookup, CheckResult, Constraint, ConstraintKind, SlotLoad};
use crate::config::TimetableConfig;
use crate::models::{Assignment, RoomRecord, RoomType, SessionType, Variable};

/// Seat demand per session and the fallback room capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatPolicy {
    /// Seats taken by a lecture.
    pub lecture_seats: u32,
    /// Seats taken by any other session.
    pub session_seats: u32,
    /// Capacity of rooms with a missing or unparseable capacity.
    pub default_capacity: u32,
}

impl SeatPolicy {
    pub fn from_config(config: &TimetableConfig) -> Self {
        Self {
            lecture_seats: config.lecture_seats,
            session_seats: config.session_seats,
            default_capacity: config.default_room_capacity,
        }
    }

    /// Seats a session needs.
    pub fn demand(&self, variable: &Variable) -> u32 {
        match variable.session_type() {
            SessionType::Lecture => self.lecture_seats,
            _ => self.session_seats,
        }
    }

    /// Total seats for a set of sessions.
    pub fn total_demand<'a>(&self, sessions: impl IntoIterator<Item = &'a Variable>) -> u32 {
        sessions.into_iter().map(|v| self.demand(v)).sum()
    }
}

impl Default for SeatPolicy {
    fn default() -> Self {
        Self::from_config(&TimetableConfig::default())
    }
}

/// Room id → seat capacity, with the fallback applied.
pub(crate) fn capacity_table(rooms: &[RoomRecord], fallback: u32) -> HashMap<String, u32> {
    rooms
        .iter()
        .map(|r| (r.room_id.trim().to_string(), r.capacity_or(fallback)))
        .collect()
}

/// Sessions sharing a room and timeslot fit its capacity, and at most one
/// full session (or two half sessions, never mixed) share it.
#[derive(Debug, Clone)]
pub struct RoomConflict {
    capacities: HashMap<String, u32>,
    seats: SeatPolicy,
}

impl RoomConflict {
    pub fn new(rooms: &[RoomRecord], seats: SeatPolicy) -> Self {
        Self {
            capacities: capacity_table(rooms, seats.default_capacity),
            seats,
        }
    }

    /// Capacity of a room; unknown rooms get the default.
    pub fn capacity(&self, room: &str) -> u32 {
        self.capacities
            .get(room)
            .copied()
            .unwrap_or(self.seats.default_capacity)
    }
}

impl Constraint for RoomConflict {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::RoomConflict
    }

    fn check(
        &self,
        variables: &BTreeMap<String, Variable>,
        assignment: &Assignment,
    ) -> CheckResult {
        let by_slot =
            group_assignments(variables, assignment, |v| (v.room.as_str(), v.timeslot.as_str()))?;

        for ((room, timeslot), sessions) in &by_slot {
            let demand = self.seats.total_demand(sessions.iter().copied());
            let capacity = self.capacity(room);
            if demand > capacity {
                trace!(room, timeslot, demand, capacity, "room over capacity");
                return Ok(false);
            }
            let load = SlotLoad::of(sessions.iter().copied());
            if !load.is_admissible() {
                trace!(
                    room,
                    timeslot,
                    full = load.full,
                    half = load.half,
                    "room double-booked"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Labs sit in lab rooms; lectures, tutorials and projects in lecture
/// rooms or classrooms. Unknown rooms fail.
#[derive(Debug, Clone, Default)]
pub struct RoomTypeConstraint {
    room_types: HashMap<String, RoomType>,
}

impl RoomTypeConstraint {
    pub fn new(rooms: &[RoomRecord]) -> Self {
        let room_types = rooms
            .iter()
            .map(|r| (r.room_id.trim().to_string(), RoomType::parse(&r.room_type)))
            .collect();
        Self { room_types }
    }
}

impl Constraint for RoomTypeConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::RoomType
    }

    fn check(
        &self,
        variables: &BTreeMap<String, Variable>,
        assignment: &Assignment,
    ) -> CheckResult {
        for (id, value) in assignment {
            let variable = lookup(variables, id)?;
            let accepted = self
                .room_types
                .get(&value.room)
                .is_some_and(|t| t.accepts(variable.session_type()));
            if !accepted {
                trace!(
                    session = id.as_str(),
                    room = value.room.as_str(),
                    "room type incompatible"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
}
