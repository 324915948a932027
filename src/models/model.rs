//! The assignment problem's state container.
//!
//! A [`Model`] owns the session variables, each variable's candidate
//! domain, and the (partial) assignment the search builds up.
//!
//! # Invariants
//! - Every assignment key is a known variable id.
//! - Domain contents never change after construction; only their order
//!   may be permuted ([`Model::shuffle_domains`]).

use std::collections::{BTreeMap, HashMap};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{DomainValue, Variable};
use crate::error::{Result, TimetableError};

/// Variable id → chosen domain value.
pub type Assignment = HashMap<String, DomainValue>;

/// Variables, their candidate domains, and the current assignment.
#[derive(Debug, Clone, Default)]
pub struct Model {
    variables: BTreeMap<String, Variable>,
    domains: BTreeMap<String, Vec<DomainValue>>,
    assignment: Assignment,
}

impl Model {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable with an empty domain.
    ///
    /// # Errors
    /// [`TimetableError::DuplicateVariable`] if the id is already present.
    pub fn add_variable(&mut self, variable: Variable) -> Result<()> {
        if self.variables.contains_key(variable.id()) {
            return Err(TimetableError::DuplicateVariable(variable.id().to_string()));
        }
        self.domains.insert(variable.id().to_string(), Vec::new());
        self.variables.insert(variable.id().to_string(), variable);
        Ok(())
    }

    /// Appends a candidate value to a variable's domain.
    pub fn add_domain_value(&mut self, variable_id: &str, value: DomainValue) -> Result<()> {
        self.domains
            .get_mut(variable_id)
            .ok_or_else(|| TimetableError::UnknownVariable(variable_id.to_string()))?
            .push(value);
        Ok(())
    }

    /// Looks up a variable.
    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variables.get(id)
    }

    /// All variables, ordered by id.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    /// The id → variable map.
    pub fn variable_map(&self) -> &BTreeMap<String, Variable> {
        &self.variables
    }

    /// Candidate values for a variable (empty for unknown ids).
    pub fn domain(&self, id: &str) -> &[DomainValue] {
        self.domains.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Domain size for a variable.
    pub fn domain_count(&self, id: &str) -> usize {
        self.domain(id).len()
    }

    /// Sum of all domain sizes.
    pub fn total_domain_values(&self) -> usize {
        self.domains.values().map(Vec::len).sum()
    }

    /// The current assignment.
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// The value assigned to a variable, if any.
    pub fn assigned(&self, id: &str) -> Option<&DomainValue> {
        self.assignment.get(id)
    }

    /// Assigns a value, returning the previous one.
    ///
    /// # Errors
    /// [`TimetableError::UnknownVariable`] if the id is not in the model.
    pub fn assign(&mut self, id: &str, value: DomainValue) -> Result<Option<DomainValue>> {
        if !self.variables.contains_key(id) {
            return Err(TimetableError::UnknownVariable(id.to_string()));
        }
        Ok(self.assignment.insert(id.to_string(), value))
    }

    /// Removes a variable's assignment.
    pub fn unassign(&mut self, id: &str) -> Option<DomainValue> {
        self.assignment.remove(id)
    }

    /// Clears the whole assignment.
    pub fn clear_assignment(&mut self) {
        self.assignment.clear();
    }

    /// Unassigned variables, ordered by id.
    pub fn unassigned_variables(&self) -> Vec<&Variable> {
        self.variables
            .values()
            .filter(|v| !self.assignment.contains_key(v.id()))
            .collect()
    }

    /// Whether every variable is assigned.
    pub fn is_complete(&self) -> bool {
        self.assignment.len() == self.variables.len()
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn assigned_count(&self) -> usize {
        self.assignment.len()
    }

    /// Permutes every domain's candidate order, reproducibly for a seed.
    pub fn shuffle_domains(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        for values in self.domains.values_mut() {
            values.shuffle(&mut rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionType;

    fn sample_model() -> Model {
        let mut model = Model::new();
        model
            .add_variable(Variable::group("CSC101L", 1, SessionType::Lecture, 1))
            .unwrap();
        model
            .add_variable(Variable::section("CSC101B", "1", SessionType::Lab, 1))
            .unwrap();
        model
            .add_domain_value("CSC101L|1|lecture", DomainValue::new("Monday 09:00", "R1", "A"))
            .unwrap();
        model
            .add_domain_value("CSC101L|1|lecture", DomainValue::new("Monday 11:00", "R1", "A"))
            .unwrap();
        model
            .add_domain_value("CSC101B|1|lab", DomainValue::new("Monday 09:00", "LAB1", "B"))
            .unwrap();
        model
    }

    #[test]
    fn test_duplicate_variable_rejected() {
        let mut model = sample_model();
        let err = model
            .add_variable(Variable::group("CSC101L", 1, SessionType::Lecture, 1))
            .unwrap_err();
        assert!(matches!(err, TimetableError::DuplicateVariable(id) if id == "CSC101L|1|lecture"));
    }

    #[test]
    fn test_domain_counts() {
        let model = sample_model();
        assert_eq!(model.variable_count(), 2);
        assert_eq!(model.domain_count("CSC101L|1|lecture"), 2);
        assert_eq!(model.domain_count("CSC101B|1|lab"), 1);
        assert_eq!(model.domain_count("missing"), 0);
        assert_eq!(model.total_domain_values(), 3);
    }

    #[test]
    fn test_assign_and_unassign() {
        let mut model = sample_model();
        assert!(!model.is_complete());
        assert_eq!(model.unassigned_variables().len(), 2);

        let v = DomainValue::new("Monday 09:00", "R1", "A");
        assert_eq!(model.assign("CSC101L|1|lecture", v.clone()).unwrap(), None);
        assert_eq!(model.assigned("CSC101L|1|lecture"), Some(&v));
        assert_eq!(model.unassigned_variables().len(), 1);

        model
            .assign("CSC101B|1|lab", DomainValue::new("Monday 09:00", "LAB1", "B"))
            .unwrap();
        assert!(model.is_complete());

        assert_eq!(model.unassign("CSC101L|1|lecture"), Some(v));
        assert!(!model.is_complete());
        assert_eq!(model.assigned_count(), 1);
    }

    #[test]
    fn test_assign_unknown_variable() {
        let mut model = sample_model();
        let err = model
            .assign("nope", DomainValue::new("Monday 09:00", "R1", "A"))
            .unwrap_err();
        assert!(matches!(err, TimetableError::UnknownVariable(_)));
        assert_eq!(model.assigned_count(), 0);
    }

    #[test]
    fn test_shuffle_preserves_domain_contents() {
        let mut model = Model::new();
        model
            .add_variable(Variable::group("CSC101L", 1, SessionType::Lecture, 1))
            .unwrap();
        for hour in 8..20 {
            model
                .add_domain_value(
                    "CSC101L|1|lecture",
                    DomainValue::new(format!("Monday {hour}:00"), "R1", "A"),
                )
                .unwrap();
        }
        let mut before = model.domain("CSC101L|1|lecture").to_vec();

        let mut a = model.clone();
        let mut b = model.clone();
        a.shuffle_domains(7);
        b.shuffle_domains(7);
        // Same seed, same order
        assert_eq!(a.domain("CSC101L|1|lecture"), b.domain("CSC101L|1|lecture"));

        let mut after = a.domain("CSC101L|1|lecture").to_vec();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }
}
