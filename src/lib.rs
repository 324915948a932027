//! Constraint-based weekly timetable generation for academic departments.
//!
//! Assigns every class session (lecture, lab, tutorial, project) a
//! timeslot, a room and an instructor so that no hard constraint is
//! violated, using depth-first backtracking with course-aware
//! minimum-remaining-values selection and cost-ordered candidates.
//!
//! # Modules
//!
//! - **`models`**: Input records, session variables, candidate values, the
//!   assignment model, and the output `Timetable`
//! - **`validation`**: Record integrity checks (duplicate IDs, bad years, unknown types)
//! - **`builder`**: Variables and candidate domains from the records
//! - **`constraints`**: The six hard constraints and the `ConstraintSet`
//! - **`search`**: `BacktrackingSolver`, cost terms, termination
//! - **`formatter`**: Solved model → timetable rows
//! - **`summary`**: Record counts for display
//! - **`generator`**: The end-to-end pipeline
//! - **`config`**: `TimetableConfig`, loadable from TOML
//!
//! # Pipeline
//!
//! ```text
//! RecordSet ─validate─▶ TimetableBuilder ─▶ Model ─▶ BacktrackingSolver
//!                                                    ▲
//!                                              ConstraintSet
//!
//! BacktrackingSolver ─▶ format_solution ─▶ Timetable
//! ```
//!
//! # References
//!
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Schaerf (1999), "A Survey of Automated Timetabling"

pub mod builder;
pub mod config;
pub mod constraints;
pub mod error;
pub mod formatter;
pub mod generator;
pub mod models;
pub mod search;
pub mod summary;
pub mod validation;

pub use builder::TimetableBuilder;
pub use config::TimetableConfig;
pub use constraints::{ConstraintKind, ConstraintSet};
pub use error::{Result, TimetableError, UnsatisfiableReason};
pub use formatter::format_solution;
pub use generator::TimetableGenerator;
pub use models::{Model, RecordSet, Timetable, TimetableRow};
pub use search::{BacktrackingSolver, SearchState, SolveOutcome, SolverStats};
pub use summary::DataSummary;
