//! Cost-guided value ordering.
//!
//! Each candidate value is scored by a weighted sum of [`CostTerm`]s
//! evaluated against the current partial assignment. Lower cost is tried
//! first. The ordering never prunes: every candidate stays in the list.
//!
//! # Standard terms
//!
//! | Term | Cost |
//! |------|------|
//! | [`TimePreference`] | 1.0 for every slot |
//! | [`RoomFit`] | 0.5 when the room matches the session type, else 1.5 |
//! | [`InstructorLoad`] | 0.3 × sessions already given to the instructor |
//! | [`DayDistribution`] | 0.0 for every day |
//! | [`TimeslotDistribution`] | 0.2 × sessions already in the slot |

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::models::{Assignment, DomainValue, Model, RoomRecord, SessionType, Variable};

/// Cost returned by a term. Lower is preferred.
pub type Cost = f64;

/// Load counts derived from a partial assignment.
///
/// Built fresh for every ordering call so it always reflects the
/// assignment as it is at that point in the search.
#[derive(Debug, Clone, Default)]
pub struct CostContext {
    /// Instructor → sessions assigned.
    pub instructor_load: HashMap<String, usize>,
    /// Timeslot → sessions assigned.
    pub timeslot_load: HashMap<String, usize>,
}

impl CostContext {
    /// Counts instructor and timeslot usage in an assignment.
    pub fn from_assignment(assignment: &Assignment) -> Self {
        let mut ctx = Self::default();
        for value in assignment.values() {
            *ctx.instructor_load.entry(value.instructor.clone()).or_default() += 1;
            *ctx.timeslot_load.entry(value.timeslot.clone()).or_default() += 1;
        }
        ctx
    }

    pub fn instructor_load(&self, instructor: &str) -> usize {
        self.instructor_load.get(instructor).copied().unwrap_or(0)
    }

    pub fn timeslot_load(&self, timeslot: &str) -> usize {
        self.timeslot_load.get(timeslot).copied().unwrap_or(0)
    }
}

/// One component of a candidate's cost.
pub trait CostTerm: Send + Sync + Debug {
    /// Term name.
    fn name(&self) -> &'static str;

    /// Cost of giving `value` to `variable` under the current context.
    fn evaluate(&self, variable: &Variable, value: &DomainValue, context: &CostContext) -> Cost;

    /// Term description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Flat cost per timeslot.
#[derive(Debug, Clone, Copy)]
pub struct TimePreference;

impl CostTerm for TimePreference {
    fn name(&self) -> &'static str {
        "time_preference"
    }

    fn evaluate(&self, _variable: &Variable, _value: &DomainValue, _context: &CostContext) -> Cost {
        1.0
    }

    fn description(&self) -> &'static str {
        "Timeslot preference (uniform)"
    }
}

/// Prefers rooms whose id or type reads like the session type.
///
/// Labs want "lab"; lectures want "lecture" or "classroom"; tutorials want
/// "tutorial" or "classroom". Projects never match.
#[derive(Debug, Clone, Default)]
pub struct RoomFit {
    /// Room id → lowercase "type id" text.
    labels: HashMap<String, String>,
}

impl RoomFit {
    const MATCH: Cost = 0.5;
    const MISMATCH: Cost = 1.5;

    pub fn new(rooms: &[RoomRecord]) -> Self {
        let labels = rooms
            .iter()
            .map(|r| {
                let id = r.room_id.trim();
                (
                    id.to_string(),
                    format!("{} {}", r.room_type.trim(), id).to_lowercase(),
                )
            })
            .collect();
        Self { labels }
    }

    fn label(&self, room: &str) -> String {
        self.labels
            .get(room)
            .cloned()
            .unwrap_or_else(|| room.to_lowercase())
    }
}

impl CostTerm for RoomFit {
    fn name(&self) -> &'static str {
        "room_fit"
    }

    fn evaluate(&self, variable: &Variable, value: &DomainValue, _context: &CostContext) -> Cost {
        let label = self.label(&value.room);
        let fits = match variable.session_type() {
            SessionType::Lab => label.contains("lab"),
            SessionType::Lecture => label.contains("lecture") || label.contains("classroom"),
            SessionType::Tutorial => label.contains("tutorial") || label.contains("classroom"),
            SessionType::Project => false,
        };
        if fits {
            Self::MATCH
        } else {
            Self::MISMATCH
        }
    }

    fn description(&self) -> &'static str {
        "Room type matches session type"
    }
}

/// Spreads sessions across instructors.
#[derive(Debug, Clone, Copy)]
pub struct InstructorLoad;

impl CostTerm for InstructorLoad {
    fn name(&self) -> &'static str {
        "instructor_load"
    }

    fn evaluate(&self, _variable: &Variable, value: &DomainValue, context: &CostContext) -> Cost {
        context.instructor_load(&value.instructor) as Cost * 0.3
    }

    fn description(&self) -> &'static str {
        "Instructor workload balance"
    }
}

/// Flat cost per day.
#[derive(Debug, Clone, Copy)]
pub struct DayDistribution;

impl CostTerm for DayDistribution {
    fn name(&self) -> &'static str {
        "day_distribution"
    }

    fn evaluate(&self, _variable: &Variable, _value: &DomainValue, _context: &CostContext) -> Cost {
        0.0
    }
}

/// Spreads sessions across timeslots.
#[derive(Debug, Clone, Copy)]
pub struct TimeslotDistribution;

impl CostTerm for TimeslotDistribution {
    fn name(&self) -> &'static str {
        "timeslot_distribution"
    }

    fn evaluate(&self, _variable: &Variable, value: &DomainValue, context: &CostContext) -> Cost {
        context.timeslot_load(&value.timeslot) as Cost * 0.2
    }

    fn description(&self) -> &'static str {
        "Timeslot usage balance"
    }
}

#[derive(Clone)]
struct WeightedTerm {
    term: Arc<dyn CostTerm>,
    weight: f64,
}

/// Weighted sum of cost terms.
#[derive(Clone, Default)]
pub struct CostModel {
    terms: Vec<WeightedTerm>,
}

impl CostModel {
    /// Creates a model with no terms; every candidate costs 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// The five standard terms at weight 1.0.
    pub fn standard(rooms: &[RoomRecord]) -> Self {
        Self::new()
            .with_term(TimePreference)
            .with_term(RoomFit::new(rooms))
            .with_term(InstructorLoad)
            .with_term(DayDistribution)
            .with_term(TimeslotDistribution)
    }

    /// Adds a term (weight 1.0).
    pub fn with_term<T: CostTerm + 'static>(self, term: T) -> Self {
        self.with_weighted_term(term, 1.0)
    }

    /// Adds a weighted term.
    pub fn with_weighted_term<T: CostTerm + 'static>(mut self, term: T, weight: f64) -> Self {
        self.terms.push(WeightedTerm {
            term: Arc::new(term),
            weight,
        });
        self
    }

    /// Term names, in insertion order.
    pub fn term_names(&self) -> Vec<&'static str> {
        self.terms.iter().map(|wt| wt.term.name()).collect()
    }

    /// Total cost of one candidate.
    pub fn cost(&self, variable: &Variable, value: &DomainValue, context: &CostContext) -> Cost {
        self.terms
            .iter()
            .map(|wt| wt.term.evaluate(variable, value, context) * wt.weight)
            .sum()
    }

    /// The variable's domain, cheapest first. Equal costs keep domain order.
    pub fn order(&self, model: &Model, variable: &Variable) -> Vec<DomainValue> {
        let context = CostContext::from_assignment(model.assignment());
        let mut scored: Vec<(Cost, &DomainValue)> = model
            .domain(variable.id())
            .iter()
            .map(|value| (self.cost(variable, value, &context), value))
            .collect();
        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().map(|(_, value)| value.clone()).collect()
    }
}

impl std::fmt::Debug for CostModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostModel")
            .field("terms", &self.term_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooms() -> Vec<RoomRecord> {
        vec![
            RoomRecord::new("R1", "lecture", 60),
            RoomRecord::new("C1", "classroom", 30),
            RoomRecord::new("LAB1", "lab", 20),
            RoomRecord::new("X9", "", 20),
        ]
    }

    fn lecture() -> Variable {
        Variable::group("CSC101L", 1, SessionType::Lecture, 1)
    }

    #[test]
    fn test_room_fit() {
        let fit = RoomFit::new(&rooms());
        let ctx = CostContext::default();
        let v = |room: &str| DomainValue::new("Monday 09:00", room, "A");

        assert_eq!(fit.evaluate(&lecture(), &v("R1"), &ctx), 0.5);
        assert_eq!(fit.evaluate(&lecture(), &v("C1"), &ctx), 0.5);
        assert_eq!(fit.evaluate(&lecture(), &v("LAB1"), &ctx), 1.5);
        assert_eq!(fit.evaluate(&lecture(), &v("X9"), &ctx), 1.5);

        let lab = Variable::section("CSC101B", "1", SessionType::Lab, 1);
        assert_eq!(fit.evaluate(&lab, &v("LAB1"), &ctx), 0.5);

        let project = Variable::group("MTH201P", 1, SessionType::Project, 2);
        assert_eq!(fit.evaluate(&project, &v("R1"), &ctx), 1.5);
    }

    #[test]
    fn test_load_terms_follow_assignment() {
        let mut asg = Assignment::new();
        asg.insert("a".into(), DomainValue::new("Monday 09:00", "R1", "A"));
        asg.insert("b".into(), DomainValue::new("Monday 09:00", "C1", "A"));
        asg.insert("c".into(), DomainValue::new("Monday 11:00", "C1", "B"));
        let ctx = CostContext::from_assignment(&asg);

        let value = DomainValue::new("Monday 09:00", "R1", "A");
        let load = InstructorLoad.evaluate(&lecture(), &value, &ctx);
        let spread = TimeslotDistribution.evaluate(&lecture(), &value, &ctx);
        assert!((load - 0.6).abs() < 1e-9);
        assert!((spread - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_standard_cost_of_empty_assignment() {
        let model = CostModel::standard(&rooms());
        let ctx = CostContext::default();
        let cost = model.cost(&lecture(), &DomainValue::new("Monday 09:00", "R1", "A"), &ctx);
        assert!((cost - 1.5).abs() < 1e-9);
        assert_eq!(model.term_names().len(), 5);
    }

    #[test]
    fn test_order_is_stable_and_cheapest_first() {
        let mut model = Model::new();
        let variable = lecture();
        model.add_variable(variable.clone()).unwrap();
        for value in [
            DomainValue::new("Monday 09:00", "LAB1", "A"),
            DomainValue::new("Monday 09:00", "R1", "A"),
            DomainValue::new("Monday 11:00", "C1", "A"),
        ] {
            model.add_domain_value(variable.id(), value).unwrap();
        }

        let ordered = CostModel::standard(&rooms()).order(&model, &variable);
        let rooms: Vec<_> = ordered.iter().map(|v| v.room.as_str()).collect();
        // R1 and C1 tie and keep domain order; the lab room goes last
        assert_eq!(rooms, vec!["R1", "C1", "LAB1"]);
    }

    #[test]
    fn test_weighted_term() {
        let model = CostModel::new().with_weighted_term(TimePreference, 2.5);
        let cost = model.cost(
            &lecture(),
            &DomainValue::new("Monday 09:00", "R1", "A"),
            &CostContext::default(),
        );
        assert!((cost - 2.5).abs() < 1e-9);
        let empty = CostModel::new().cost(
            &lecture(),
            &DomainValue::new("x", "y", "z"),
            &CostContext::default(),
        );
        assert_eq!(empty, 0.0);
    }
}
