//! Expansion of Boolean assignments into grounded state lists.
//!
//! The set algebra engine answers which combinations of states make a set of contingencies
//! true, but a "false" state in such a combination is not something a rule-based model can
//! express. `PositiveSolver` replaces every false state by the concrete alternatives which
//! can hold in its place (its *complementary states*), gives every molecule a struct index
//! and keeps only combinations in which no two states are mutually exclusive.

use crate::traits::StateUniverse;
use crate::State;

pub use crate::venn_set::ComplexityLimitExceeded;

/// **(internal)** The positivization algorithm.
mod _impl_positive_solver;

/// A fully concrete list of states: every spec carries a struct index and no two states
/// are mutually exclusive.
pub type GroundedSolution = Vec<State>;

/// Resource limits of a `PositiveSolver`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SolverSettings {
    max_assignments: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            max_assignments: 1 << 16,
        }
    }
}

impl SolverSettings {
    pub fn new() -> SolverSettings {
        SolverSettings::default()
    }

    /// Limit the number of Boolean assignments (and candidate positivizations of one
    /// assignment) the solver is allowed to enumerate.
    pub fn with_max_assignments(mut self, max_assignments: usize) -> SolverSettings {
        self.max_assignments = max_assignments;
        self
    }

    pub fn get_max_assignments(&self) -> usize {
        self.max_assignments
    }
}

/// Computes grounded solutions of contingency sets over the states of a `StateUniverse`.
pub struct PositiveSolver<'a, U: StateUniverse> {
    universe: &'a U,
    settings: SolverSettings,
}

/// True if no two of the given states are mutually exclusive.
pub fn is_consistent(states: &[State]) -> bool {
    for (i, first) in states.iter().enumerate() {
        for second in &states[(i + 1)..] {
            if first.is_mutually_exclusive_with(second) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::solver::{is_consistent, SolverSettings};
    use crate::State;
    use std::convert::TryFrom;

    #[test]
    fn settings_builder() {
        assert_eq!(65_536, SolverSettings::default().get_max_assignments());
        let settings = SolverSettings::new().with_max_assignments(10);
        assert_eq!(10, settings.get_max_assignments());
    }

    #[test]
    fn state_consistency() {
        let free = State::try_from("A@0_[x]--0").unwrap();
        let bound = State::try_from("A@0_[x]--B@1_[y]").unwrap();
        let other = State::try_from("A@1_[x]--0").unwrap();
        assert!(is_consistent(&[]));
        assert!(is_consistent(&[free.clone(), other.clone()]));
        assert!(is_consistent(&[bound.clone(), bound.clone()]));
        assert!(!is_consistent(&[other, free, bound]));
    }
}
