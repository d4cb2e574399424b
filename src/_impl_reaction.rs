use crate::{Reaction, ReactionTerm, Spec, State, StateModifier};
use std::fmt::{Display, Error, Formatter};

impl ReactionTerm {
    pub fn new(specs: Vec<Spec>, states: Vec<State>) -> ReactionTerm {
        ReactionTerm { specs, states }
    }

    /// Component specs of the molecules forming this term.
    pub fn get_specs(&self) -> &[Spec] {
        &self.specs
    }

    pub fn get_states(&self) -> &[State] {
        &self.states
    }
}

impl Reaction {
    /// Create a new reaction, validating that every term consists of unstructured
    /// component specs and only contains states of its own components.
    pub fn new(
        name: &str,
        terms_lhs: Vec<ReactionTerm>,
        terms_rhs: Vec<ReactionTerm>,
    ) -> Result<Reaction, String> {
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(format!("Invalid reaction name `{}`.", name));
        }
        for term in terms_lhs.iter().chain(terms_rhs.iter()) {
            for spec in &term.specs {
                if !spec.is_component_spec() || spec.is_structured() {
                    return Err(format!(
                        "Invalid reactant {} in reaction {}: expected an unstructured component.",
                        spec, name
                    ));
                }
            }
            for state in &term.states {
                for component in state.components() {
                    if !term.specs.contains(&component.to_non_struct_spec()) {
                        return Err(format!(
                            "Invalid state {} in reaction {}: unknown component {}.",
                            state, name, component
                        ));
                    }
                }
            }
        }
        Ok(Reaction {
            name: name.to_string(),
            terms_lhs,
            terms_rhs,
        })
    }

    /// Protein-protein interaction: two free binding sites become bound.
    pub fn mk_ppi(first: &Spec, second: &Spec) -> Result<Reaction, String> {
        let name = format!("{}_ppi+_{}", first, second);
        let lhs = vec![
            ReactionTerm::new(
                vec![first.to_component_spec()],
                vec![State::mk_empty_binding(first.clone())],
            ),
            ReactionTerm::new(
                vec![second.to_component_spec()],
                vec![State::mk_empty_binding(second.clone())],
            ),
        ];
        let rhs = vec![ReactionTerm::new(
            vec![first.to_component_spec(), second.to_component_spec()],
            vec![State::mk_interaction(first.clone(), second.clone())],
        )];
        Reaction::new(&name, lhs, rhs)
    }

    /// Intra-protein interaction: two free sites of one molecule become bound.
    pub fn mk_ipi(first: &Spec, second: &Spec) -> Result<Reaction, String> {
        let name = format!("{}_ipi+_{}", first, second);
        let component = first.to_component_spec();
        let lhs = vec![ReactionTerm::new(
            vec![component.clone()],
            vec![
                State::mk_empty_binding(first.clone()),
                State::mk_empty_binding(second.clone()),
            ],
        )];
        let rhs = vec![ReactionTerm::new(
            vec![component],
            vec![State::mk_self_interaction(first.clone(), second.clone())?],
        )];
        Reaction::new(&name, lhs, rhs)
    }

    /// Covalent modification of the `target` residue by `enzyme`, from one modifier
    /// value to another.
    pub fn mk_modification(
        enzyme: &Spec,
        target: &Spec,
        from: StateModifier,
        to: StateModifier,
    ) -> Result<Reaction, String> {
        if from == to {
            return Err(format!("Modification of {} does not change {}.", target, from));
        }
        let verb = if to.is_neutral() {
            format!("{}-", from)
        } else {
            format!("{}+", to)
        };
        let name = format!("{}_{}_{}", enzyme, verb, target);
        let enzyme_term = ReactionTerm::new(vec![enzyme.to_component_spec()], Vec::new());
        let lhs = vec![
            enzyme_term.clone(),
            ReactionTerm::new(
                vec![target.to_component_spec()],
                vec![State::mk_modification(target.clone(), from)?],
            ),
        ];
        let rhs = vec![
            enzyme_term,
            ReactionTerm::new(
                vec![target.to_component_spec()],
                vec![State::mk_modification(target.clone(), to)?],
            ),
        ];
        Reaction::new(&name, lhs, rhs)
    }

    /// Synthesis of a new `product` molecule by `enzyme`.
    pub fn mk_synthesis(enzyme: &Spec, product: &Spec) -> Result<Reaction, String> {
        let name = format!("{}_syn_{}", enzyme, product);
        let enzyme_term = ReactionTerm::new(vec![enzyme.to_component_spec()], Vec::new());
        let product_term = ReactionTerm::new(vec![product.to_component_spec()], Vec::new());
        Reaction::new(&name, vec![enzyme_term.clone()], vec![enzyme_term, product_term])
    }

    /// Degradation of a `target` molecule by `enzyme`.
    pub fn mk_degradation(enzyme: &Spec, target: &Spec) -> Result<Reaction, String> {
        let name = format!("{}_deg_{}", enzyme, target);
        let enzyme_term = ReactionTerm::new(vec![enzyme.to_component_spec()], Vec::new());
        let target_term = ReactionTerm::new(vec![target.to_component_spec()], Vec::new());
        Reaction::new(&name, vec![enzyme_term.clone(), target_term], vec![enzyme_term])
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_terms_lhs(&self) -> &[ReactionTerm] {
        &self.terms_lhs
    }

    pub fn get_terms_rhs(&self) -> &[ReactionTerm] {
        &self.terms_rhs
    }

    /// Component specs of all reactants, in term order (repeated for every molecule).
    pub fn components_lhs(&self) -> Vec<Spec> {
        self.terms_lhs.iter().flat_map(|it| it.specs.clone()).collect()
    }

    /// Component specs of all products, in term order (repeated for every molecule).
    pub fn components_rhs(&self) -> Vec<Spec> {
        self.terms_rhs.iter().flat_map(|it| it.specs.clone()).collect()
    }

    /// States which hold after the reaction but not before.
    pub fn produced_states(&self) -> Vec<State> {
        let lhs = all_states(&self.terms_lhs);
        all_states(&self.terms_rhs)
            .into_iter()
            .filter(|it| !lhs.contains(it))
            .collect()
    }

    /// States which hold before the reaction but not after.
    pub fn consumed_states(&self) -> Vec<State> {
        let rhs = all_states(&self.terms_rhs);
        all_states(&self.terms_lhs)
            .into_iter()
            .filter(|it| !rhs.contains(it))
            .collect()
    }

    /// Components which only appear among the products.
    pub fn synthesised_components(&self) -> Vec<Spec> {
        let lhs = self.components_lhs();
        let mut result: Vec<Spec> = Vec::new();
        for component in self.components_rhs() {
            if !lhs.contains(&component) && !result.contains(&component) {
                result.push(component);
            }
        }
        result
    }

    /// Components which only appear among the reactants.
    pub fn degraded_components(&self) -> Vec<Spec> {
        let rhs = self.components_rhs();
        let mut result: Vec<Spec> = Vec::new();
        for component in self.components_lhs() {
            if !rhs.contains(&component) && !result.contains(&component) {
                result.push(component);
            }
        }
        result
    }

    /// States synthesised together with new molecules: the neutral states of every
    /// synthesised component that appear among the given `states`.
    pub fn synthesised_states<'a>(&self, states: &'a [State]) -> Vec<&'a State> {
        let synthesised = self.synthesised_components();
        states
            .iter()
            .filter(|state| state.is_neutral())
            .filter(|state| {
                state
                    .components()
                    .iter()
                    .any(|it| synthesised.contains(&it.to_non_struct_spec()))
            })
            .collect()
    }

    /// States of degraded molecules among the given `states`.
    pub fn degraded_states<'a>(&self, states: &'a [State]) -> Vec<&'a State> {
        let degraded = self.degraded_components();
        states
            .iter()
            .filter(|state| {
                state
                    .components()
                    .iter()
                    .any(|it| degraded.contains(&it.to_non_struct_spec()))
            })
            .collect()
    }

    /// Reactant molecules with struct indices `0, 1, ...` in term order.
    pub fn structured_reactants(&self) -> Vec<Spec> {
        structured_terms(&self.terms_lhs)
            .into_iter()
            .flat_map(|it| it.specs)
            .collect()
    }

    /// Reactant terms where every spec (including the specs of states) is structured.
    pub fn structured_terms_lhs(&self) -> Vec<ReactionTerm> {
        structured_terms(&self.terms_lhs)
    }

    /// Product terms where every spec (including the specs of states) is structured.
    /// Product molecules are numbered in the same way as reactants, so a molecule which
    /// keeps its position in the term order keeps its index.
    pub fn structured_terms_rhs(&self) -> Vec<ReactionTerm> {
        structured_terms(&self.terms_rhs)
    }
}

/// **(internal)** All states of the given terms.
fn all_states(terms: &[ReactionTerm]) -> Vec<State> {
    terms.iter().flat_map(|it| it.states.clone()).collect()
}

/// **(internal)** Assign struct indices `0, 1, ...` to the molecules of the given terms.
fn structured_terms(terms: &[ReactionTerm]) -> Vec<ReactionTerm> {
    let mut index = 0;
    let mut result = Vec::new();
    for term in terms {
        let mut specs = Vec::new();
        let mut states = term.states.clone();
        for spec in &term.specs {
            let structured = spec.with_struct_index(index);
            states = states
                .iter()
                .map(|it| it.to_structured_from_spec(&structured))
                .collect();
            specs.push(structured);
            index += 1;
        }
        result.push(ReactionTerm::new(specs, states));
    }
    result
}

impl Display for Reaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.name)
    }
}
