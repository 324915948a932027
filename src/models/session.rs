//! Session and room type classification.
//!
//! Type strings from the input are normalized once (trim + lowercase) into
//! closed enums; constraints and the builder only ever match on variants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of class session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    /// Whole-group session, full slot.
    Lecture,
    /// Per-section session in a lab room, full slot.
    Lab,
    /// Per-section session, half slot.
    Tutorial,
    /// Whole-group session, full slot.
    Project,
}

impl SessionType {
    /// All session types.
    pub const ALL: [SessionType; 4] = [Self::Lecture, Self::Lab, Self::Tutorial, Self::Project];

    /// Parses a session type, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lecture" => Some(Self::Lecture),
            "lab" => Some(Self::Lab),
            "tutorial" => Some(Self::Tutorial),
            "project" => Some(Self::Project),
            _ => None,
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lecture => "lecture",
            Self::Lab => "lab",
            Self::Tutorial => "tutorial",
            Self::Project => "project",
        }
    }

    /// Slot fraction occupied: 0.5 for tutorials, 1.0 otherwise.
    pub fn duration(&self) -> f64 {
        match self {
            Self::Tutorial => 0.5,
            _ => 1.0,
        }
    }

    /// Whether sessions of this type are scheduled per group rather than per section.
    pub fn is_group_level(&self) -> bool {
        matches!(self, Self::Lecture | Self::Project)
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of teaching room.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoomType {
    Lecture,
    Classroom,
    Tutorial,
    Lab,
    /// Any other type, normalized to lowercase.
    Other(String),
}

impl RoomType {
    /// Parses a room type, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Self {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "lecture" => Self::Lecture,
            "classroom" => Self::Classroom,
            "tutorial" => Self::Tutorial,
            "lab" => Self::Lab,
            _ => Self::Other(normalized),
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Lecture => "lecture",
            Self::Classroom => "classroom",
            Self::Tutorial => "tutorial",
            Self::Lab => "lab",
            Self::Other(s) => s,
        }
    }

    /// Whether rooms of this type enter a session's candidate domain.
    ///
    /// Labs need a lab room; every other session accepts lecture,
    /// classroom and tutorial rooms.
    pub fn is_candidate_for(&self, session: SessionType) -> bool {
        match session {
            SessionType::Lab => *self == Self::Lab,
            _ => matches!(self, Self::Lecture | Self::Classroom | Self::Tutorial),
        }
    }

    /// Whether the room-type constraint accepts this room for a session.
    ///
    /// Stricter than [`is_candidate_for`](Self::is_candidate_for): tutorial
    /// rooms are not accepted for non-lab sessions.
    pub fn accepts(&self, session: SessionType) -> bool {
        match session {
            SessionType::Lab => *self == Self::Lab,
            _ => matches!(self, Self::Lecture | Self::Classroom),
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
