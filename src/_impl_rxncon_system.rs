use crate::traits::{ReactionSystem, StateUniverse};
use crate::{Contingency, Reaction, RxnConSystem, Spec, State};
use std::collections::{BTreeSet, HashSet};

impl RxnConSystem {
    /// Create a new system from the given reactions and contingencies.
    ///
    /// Fails if two reactions share a name or if a contingency regulates an unknown
    /// reaction.
    pub fn new(
        reactions: Vec<Reaction>,
        contingencies: Vec<Contingency>,
    ) -> Result<RxnConSystem, String> {
        let mut names = HashSet::new();
        for reaction in &reactions {
            if !names.insert(reaction.get_name()) {
                return Err(format!("Duplicate reaction `{}`.", reaction.get_name()));
            }
        }
        for contingency in &contingencies {
            if !names.contains(contingency.get_reaction()) {
                return Err(format!(
                    "Contingency `{}` regulates unknown reaction `{}`.",
                    contingency,
                    contingency.get_reaction()
                ));
            }
        }
        Ok(RxnConSystem {
            reactions,
            contingencies,
        })
    }

    pub fn get_reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn get_contingencies(&self) -> &[Contingency] {
        &self.contingencies
    }

    pub fn reaction_by_name(&self, name: &str) -> Option<&Reaction> {
        self.reactions.iter().find(|it| it.get_name() == name)
    }

    /// Every (unstructured) state mentioned in a reaction or contingency, together with
    /// its neutral counterparts, in sorted order.
    pub fn states(&self) -> Vec<State> {
        let mut result: BTreeSet<State> = BTreeSet::new();
        let reaction_states = self.reactions.iter().flat_map(|reaction| {
            reaction
                .get_terms_lhs()
                .iter()
                .chain(reaction.get_terms_rhs().iter())
                .flat_map(|term| term.get_states().iter())
        });
        let contingency_states = self
            .contingencies
            .iter()
            .flat_map(|it| it.get_effector().states());
        for state in reaction_states.chain(contingency_states) {
            let state = state.to_non_structured();
            result.extend(state.neutral_states());
            result.insert(state);
        }
        result.into_iter().collect()
    }
}

/// True if `spec` is a (possibly structured) reference to `component`.
fn is_site_of(spec: &Spec, component: &Spec) -> bool {
    spec.to_non_struct_spec().to_component_spec() == *component
}

impl StateUniverse for RxnConSystem {
    fn states_for_component(&self, component: &Spec) -> Vec<State> {
        let component = component.to_non_struct_spec().to_component_spec();
        self.states()
            .into_iter()
            .filter(|state| state.specs().iter().any(|it| is_site_of(it, &component)))
            .collect()
    }

    fn complementary_states_for_component(&self, component: &Spec, state: &State) -> Vec<State> {
        let component = component.to_non_struct_spec().to_component_spec();
        let state = state.to_non_structured();
        let sites: Vec<&Spec> = state
            .specs()
            .into_iter()
            .filter(|it| is_site_of(it, &component))
            .collect();
        self.states_for_component(&component)
            .into_iter()
            .filter(|candidate| candidate.is_mutually_exclusive_with(&state))
            .filter(|candidate| {
                candidate
                    .specs()
                    .iter()
                    .filter(|it| is_site_of(it, &component))
                    .any(|it| sites.iter().any(|site| site.overlaps_with(it)))
            })
            .collect()
    }
}

impl ReactionSystem for RxnConSystem {
    fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    fn contingencies_for_reaction(&self, reaction: &Reaction) -> Vec<&Contingency> {
        self.contingencies
            .iter()
            .filter(|it| it.get_reaction() == reaction.get_name())
            .collect()
    }
}
