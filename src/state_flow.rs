//! Boolean state flows of a reaction.
//!
//! A state flow describes one way in which a reaction moves the system from a set of
//! *source* worlds into a set of *target* worlds. The strict contingencies of a reaction
//! are split into their DNF terms (one flow per term), quantitative contingencies split
//! every flow further into the worlds where the contingency holds and where it does not.

use crate::solver::SolverSettings;
use crate::venn_set::VennSet;
use crate::{Contingency, ContingencyType, Reaction, State};
use std::fmt::{Display, Error, Formatter};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StateFlow {
    reaction: String,
    source: VennSet<State>,
    target: VennSet<State>,
}

impl StateFlow {
    pub fn new(reaction: &str, source: VennSet<State>, target: VennSet<State>) -> StateFlow {
        StateFlow {
            reaction: reaction.to_string(),
            source,
            target,
        }
    }

    pub fn get_reaction(&self) -> &str {
        &self.reaction
    }

    pub fn get_source(&self) -> &VennSet<State> {
        &self.source
    }

    pub fn get_target(&self) -> &VennSet<State> {
        &self.target
    }

    /// Restrict both the source and the target of this flow to `set`.
    fn restrict(&self, set: &VennSet<State>) -> StateFlow {
        StateFlow {
            reaction: self.reaction.clone(),
            source: VennSet::mk_intersection(vec![self.source.clone(), set.clone()]),
            target: VennSet::mk_intersection(vec![self.target.clone(), set.clone()]),
        }
    }
}

impl Display for StateFlow {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "{}: Source:{}, Target:{}",
            self.reaction, self.source, self.target
        )
    }
}

/// **(internal)** Fail unless every contingency is of one of the `allowed` types.
fn check_types(contingencies: &[Contingency], allowed: &[ContingencyType]) -> Result<(), String> {
    for contingency in contingencies {
        if !allowed.contains(&contingency.get_type()) {
            return Err(format!("Unexpected contingency type in `{}`.", contingency));
        }
    }
    Ok(())
}

/// Flows of `reaction` under its `strict` contingencies: one flow per DNF term of the
/// strict contingency set. The source of a flow is the term restricted to the `source`
/// contingencies, its target is the term restricted to their complement.
///
/// All contingencies have to be requirements or inhibitions. Fails when the DNF needs more
/// than `settings.get_max_assignments()` terms.
pub fn boolean_state_flows(
    reaction: &Reaction,
    strict: &[Contingency],
    source: &[Contingency],
    settings: SolverSettings,
) -> Result<Vec<StateFlow>, String> {
    let allowed = [ContingencyType::Requirement, ContingencyType::Inhibition];
    check_types(strict, &allowed)?;
    check_types(source, &allowed)?;

    let source_set = Contingency::mk_venn_set(source);
    let target_set = VennSet::mk_complement(source_set.clone());
    let terms = Contingency::mk_venn_set(strict)
        .to_dnf_list_with_limit(settings.get_max_assignments())
        .map_err(|e| format!("Reaction `{}`: {}", reaction.get_name(), e))?;
    let flows = terms
        .into_iter()
        .map(|term| {
            StateFlow::new(
                reaction.get_name(),
                VennSet::mk_intersection(vec![term.clone(), source_set.clone()]),
                VennSet::mk_intersection(vec![term, target_set.clone()]),
            )
        })
        .collect();
    Ok(flows)
}

/// Split `flow` by every `quantitative` contingency into a flow where the contingency's
/// effector holds and a flow where it does not (`2^n` flows for `n` contingencies).
///
/// All contingencies have to be positive or negative.
pub fn quantified_state_flows(
    flow: &StateFlow,
    quantitative: &[Contingency],
) -> Result<Vec<StateFlow>, String> {
    check_types(
        quantitative,
        &[ContingencyType::Positive, ContingencyType::Negative],
    )?;
    let mut flows = vec![flow.clone()];
    for contingency in quantitative {
        let holds = contingency.get_effector().to_venn_set();
        let fails = VennSet::mk_complement(holds.clone());
        flows = flows
            .iter()
            .flat_map(|it| vec![it.restrict(&holds), it.restrict(&fails)])
            .collect();
    }
    Ok(flows)
}
