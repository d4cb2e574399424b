//! Interfaces through which the grounding algorithms consume the entity model.
//!
//! `RxnConSystem` is the canonical implementation, but the solver and the rule builder
//! only depend on these traits, so any other representation of reactions and states can
//! be plugged in.

use crate::{Contingency, Locus, Reaction, Spec, State};
use std::collections::{BTreeMap, BTreeSet};

/// Knowledge about the states individual components can be in.
pub trait StateUniverse {
    /// All states which reference the given (unstructured, component-level) spec.
    fn states_for_component(&self, component: &Spec) -> Vec<State>;

    /// States of `component` which are mutually exclusive with `state` on one of the sites
    /// of `component` that `state` references. These are the concrete alternatives that
    /// can hold for `component` when `state` does not.
    fn complementary_states_for_component(&self, component: &Spec, state: &State) -> Vec<State>;

    /// States of `component` grouped by the locus at which they reference the component.
    fn states_for_component_grouped(&self, component: &Spec) -> BTreeMap<Locus, Vec<State>> {
        let mut result: BTreeMap<Locus, Vec<State>> = BTreeMap::new();
        for state in self.states_for_component(component) {
            for spec in state.specs() {
                if spec.to_non_struct_spec().to_component_spec() == *component {
                    let group = result.entry(spec.get_locus().clone()).or_default();
                    if !group.contains(&state) {
                        group.push(state.clone());
                    }
                }
            }
        }
        result
    }
}

/// A full reaction network: reactions and the contingencies regulating them.
pub trait ReactionSystem: StateUniverse {
    fn reactions(&self) -> &[Reaction];

    fn contingencies_for_reaction(&self, reaction: &Reaction) -> Vec<&Contingency>;

    /// All (unstructured) components referenced by reactions or their contingencies.
    fn components(&self) -> BTreeSet<Spec> {
        let mut result: BTreeSet<Spec> = BTreeSet::new();
        for reaction in self.reactions() {
            result.extend(reaction.components_lhs());
            result.extend(reaction.components_rhs());
            for contingency in self.contingencies_for_reaction(reaction) {
                for state in contingency.get_effector().states() {
                    let components = state.components().into_iter();
                    result.extend(components.map(|it| it.to_non_struct_spec()));
                }
            }
        }
        result
    }
}
