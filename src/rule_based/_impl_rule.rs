use crate::rule_based::{
    Complex, ComplexBuilder, GroundingFailure, InitialCondition, MolDef, Parameter, Rule,
    RuleBasedModel,
};
use crate::solver::{is_consistent, PositiveSolver, SolverSettings};
use crate::traits::ReactionSystem;
use crate::{Contingency, Reaction, ReactionTerm, State};
use std::fmt::{Display, Error, Formatter};

impl Rule {
    pub fn new(lhs: Vec<Complex>, rhs: Vec<Complex>, rate: Parameter, reaction: &str) -> Rule {
        Rule {
            lhs,
            rhs,
            rate,
            reaction: reaction.to_string(),
        }
    }

    /// Build the rule of `reaction` under one grounded `solution` of its contingencies.
    ///
    /// Reactants are the reaction's structured left-hand side terms together with every
    /// molecule bound to them in the solution. On the right-hand side, solution states of
    /// degraded molecules and solution states conflicting with the products are dropped,
    /// and synthesised molecules receive fresh indices above all indices in use.
    ///
    /// Panics if the solution contains an unstructured state.
    pub fn from_solution(reaction: &Reaction, solution: &[State]) -> Rule {
        let unstructured: Vec<String> = solution
            .iter()
            .filter(|it| !it.is_structured())
            .map(|it| it.to_string())
            .collect();
        if !unstructured.is_empty() {
            panic!(
                "Cannot build a rule for reaction {}: states {} are unstructured.",
                reaction,
                unstructured.join(", ")
            );
        }

        let terms_lhs = reaction.structured_terms_lhs();
        let terms_rhs = structured_products(reaction, solution);

        let lhs = calc_complexes(&terms_lhs, solution);
        let degraded = reaction.degraded_states(solution);
        let products: Vec<&State> = terms_rhs.iter().flat_map(|it| it.get_states()).collect();
        let remaining: Vec<State> = solution
            .iter()
            .filter(|it| !degraded.contains(it))
            .filter(|it| !products.iter().any(|p| p.is_mutually_exclusive_with(it)))
            .cloned()
            .collect();
        let rhs = calc_complexes(&terms_rhs, &remaining);

        Rule::new(lhs, rhs, default_rate(), reaction.get_name())
    }

    pub fn get_lhs(&self) -> &[Complex] {
        &self.lhs
    }

    pub fn get_rhs(&self) -> &[Complex] {
        &self.rhs
    }

    pub fn get_rate(&self) -> &Parameter {
        &self.rate
    }

    /// Name of the reaction this rule was built for.
    pub fn get_reaction(&self) -> &str {
        &self.reaction
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let lhs: Vec<String> = self.lhs.iter().map(|it| it.to_string()).collect();
        let rhs: Vec<String> = self.rhs.iter().map(|it| it.to_string()).collect();
        write!(
            f,
            "{} -> {} {} {}",
            lhs.join(" + "),
            rhs.join(" + "),
            self.rate,
            self.reaction
        )
    }
}

/// **(internal)** Every rule has the same mass-action rate.
fn default_rate() -> Parameter {
    Parameter {
        name: "k".to_string(),
        value: "1.0".to_string(),
    }
}

/// **(internal)** Complexes formed by the molecules of `terms` (the reactants) and the
/// molecules connected to them by the `states`.
fn calc_complexes(terms: &[ReactionTerm], states: &[State]) -> Vec<Complex> {
    let mut builder = ComplexBuilder::new();
    for term in terms {
        for spec in term.get_specs() {
            builder.add_entity(spec, true);
        }
    }
    let term_states = terms.iter().flat_map(|it| it.get_states());
    for state in states.iter().chain(term_states) {
        builder.add_state(state);
    }
    builder.build_reactants()
}

/// **(internal)** Structured product terms of `reaction`. Molecules which are not among the
/// reactants are moved above every struct index used by `solution` or the reactants.
fn structured_products(reaction: &Reaction, solution: &[State]) -> Vec<ReactionTerm> {
    let reactant_count = reaction.structured_reactants().len() as u32;
    let first_free = solution
        .iter()
        .flat_map(|it| it.specs())
        .filter_map(|it| it.get_struct_index())
        .max()
        .map(|it| it + 1)
        .unwrap_or(0)
        .max(reactant_count);
    let shift = |index: u32| {
        if index < reactant_count {
            index
        } else {
            index - reactant_count + first_free
        }
    };
    reaction
        .structured_terms_rhs()
        .iter()
        .map(|term| {
            let specs = term
                .get_specs()
                .iter()
                .map(|spec| match spec.get_struct_index() {
                    Some(index) => spec.with_struct_index(shift(index)),
                    None => spec.clone(),
                })
                .collect();
            let states = term
                .get_states()
                .iter()
                .map(|state| {
                    state.map_specs(|spec| match spec.get_struct_index() {
                        Some(index) => spec.with_struct_index(shift(index)),
                        None => spec.clone(),
                    })
                })
                .collect();
            ReactionTerm::new(specs, states)
        })
        .collect()
}

/// Compute the rules of `reaction`: one rule for every grounded solution of its
/// contingencies in which the reactants can actually be found.
pub fn rules_for_reaction<S: ReactionSystem>(
    system: &S,
    reaction: &Reaction,
    settings: SolverSettings,
) -> Result<Vec<Rule>, GroundingFailure> {
    let contingencies =
        Contingency::to_structured_all(&system.contingencies_for_reaction(reaction), reaction)
            .map_err(GroundingFailure::InconsistentStructure)?;
    let solver = PositiveSolver::with_settings(system, settings);
    let solutions = solver.solve(&contingencies)?;

    let reactant_states: Vec<State> = reaction
        .structured_terms_lhs()
        .iter()
        .flat_map(|it| it.get_states().to_vec())
        .collect();
    let rules = solutions
        .iter()
        .filter(|solution| {
            let mut states = reactant_states.clone();
            states.extend(solution.iter().cloned());
            is_consistent(&states)
        })
        .map(|solution| Rule::from_solution(reaction, solution))
        .collect();
    Ok(rules)
}

impl RuleBasedModel {
    /// Build the rule-based model of a whole reaction system.
    ///
    /// A reaction which cannot be grounded (its contingencies are structurally
    /// inconsistent or exceed the complexity limit) contributes no rules and is recorded
    /// in `get_failures` instead.
    pub fn from_system<S: ReactionSystem>(
        system: &S,
        settings: SolverSettings,
    ) -> Result<RuleBasedModel, String> {
        let mol_defs: Vec<MolDef> = system
            .components()
            .iter()
            .map(|it| MolDef::for_component(system, it))
            .collect();
        let mut initial_conditions = Vec::new();
        for mol_def in &mol_defs {
            initial_conditions.push(InitialCondition::for_mol_def(mol_def)?);
        }

        let mut rules = Vec::new();
        let mut failures = Vec::new();
        for reaction in system.reactions() {
            match rules_for_reaction(system, reaction, settings) {
                Ok(mut reaction_rules) => {
                    if cfg!(feature = "print-progress") {
                        println!(
                            "Reaction {}: {} rule(s).",
                            reaction.get_name(),
                            reaction_rules.len()
                        );
                    }
                    rules.append(&mut reaction_rules);
                }
                Err(error) => {
                    if cfg!(feature = "print-progress") {
                        println!("Reaction {}: {}", reaction.get_name(), error);
                    }
                    failures.push((reaction.get_name().to_string(), error));
                }
            }
        }

        Ok(RuleBasedModel {
            mol_defs,
            initial_conditions,
            rules,
            failures,
        })
    }

    pub fn get_mol_defs(&self) -> &[MolDef] {
        &self.mol_defs
    }

    pub fn get_initial_conditions(&self) -> &[InitialCondition] {
        &self.initial_conditions
    }

    pub fn get_rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Reactions (by name) which could not be grounded, with the reason.
    pub fn get_failures(&self) -> &[(String, GroundingFailure)] {
        &self.failures
    }

    /// All parameters of the model: initial amounts and rates, sorted by name.
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut result: Vec<Parameter> = self
            .initial_conditions
            .iter()
            .map(|it| it.get_value().clone())
            .chain(self.rules.iter().map(|it| it.get_rate().clone()))
            .collect();
        result.sort();
        result.dedup();
        result
    }
}
