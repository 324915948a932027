//! Generation settings.
//!
//! Load from TOML to change the teaching week, search budget, or the
//! active constraint set without code changes.
//!
//! ```
//! use u_timetable::config::TimetableConfig;
//! use u_timetable::constraints::ConstraintKind;
//! use std::time::Duration;
//!
//! let config = TimetableConfig::from_toml_str(r#"
//!     days = ["Monday", "Tuesday", "Wednesday"]
//!     time_limit_ms = 5000
//!     constraints = ["instructor_conflict", "room_conflict", "student_conflict"]
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Duration::from_secs(5));
//! assert_eq!(config.rest_day(2), Some("Tuesday"));
//! assert!(config.is_enabled(ConstraintKind::StudentConflict));
//! assert!(!config.is_enabled(ConstraintKind::RoomType));
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constraints::ConstraintKind;
use crate::error::Result;

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TimetableConfig {
    /// Teaching days, in week order. Year `Y` rests on `days[(Y - 1) % len]`.
    pub days: Vec<String>,
    /// Wall-clock search budget in milliseconds.
    pub time_limit_ms: u64,
    /// Seats consumed by a lecture session.
    pub lecture_seats: u32,
    /// Seats consumed by any other session.
    pub session_seats: u32,
    /// Capacity assumed for rooms whose capacity is missing or unparseable.
    pub default_room_capacity: u32,
    /// Log search progress every N iterations (0 disables).
    pub progress_interval: u64,
    /// Enabled constraints. Evaluation order is fixed, not list order.
    pub constraints: Vec<ConstraintKind>,
    /// Reject unknown instructors/roles in the role constraint.
    pub strict_roles: bool,
    /// Seed for permuting candidate order before search. `None` keeps build order.
    pub shuffle_seed: Option<u64>,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            days: ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            time_limit_ms: 30_000,
            lecture_seats: 45,
            session_seats: 15,
            default_room_capacity: 15,
            progress_interval: 1000,
            constraints: ConstraintKind::DEFAULT_ENABLED.to_vec(),
            strict_roles: false,
            shuffle_seed: None,
        }
    }
}

impl TimetableConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Sets the teaching days.
    pub fn with_days<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.days = days.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the search time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the fallback room capacity.
    pub fn with_default_room_capacity(mut self, capacity: u32) -> Self {
        self.default_room_capacity = capacity;
        self
    }

    /// Enables a constraint.
    pub fn with_constraint(mut self, kind: ConstraintKind) -> Self {
        if !self.constraints.contains(&kind) {
            self.constraints.push(kind);
        }
        self
    }

    /// Disables a constraint.
    pub fn without_constraint(mut self, kind: ConstraintKind) -> Self {
        self.constraints.retain(|k| *k != kind);
        self
    }

    /// Rejects assignments whose instructor role is unknown.
    pub fn with_strict_roles(mut self, strict: bool) -> Self {
        self.strict_roles = strict;
        self
    }

    /// Permutes candidate order with the given seed before search.
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Search time limit.
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }

    /// Whether a constraint is enabled.
    pub fn is_enabled(&self, kind: ConstraintKind) -> bool {
        self.constraints.contains(&kind)
    }

    /// The rest day for an academic year: `days[(year - 1) % len]`.
    ///
    /// Returns `None` when no days are configured.
    pub fn rest_day(&self, year: u32) -> Option<&str> {
        if self.days.is_empty() {
            return None;
        }
        let index = year.saturating_sub(1) as usize % self.days.len();
        Some(self.days[index].as_str())
    }

    /// Teaching days available to an academic year (all days minus its rest day).
    pub fn available_days(&self, year: u32) -> Vec<&str> {
        let rest = self.rest_day(year);
        self.days
            .iter()
            .map(String::as_str)
            .filter(|d| Some(*d) != rest)
            .collect()
    }
}
