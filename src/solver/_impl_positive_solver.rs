use crate::solver::{
    is_consistent, ComplexityLimitExceeded, GroundedSolution, PositiveSolver, SolverSettings,
};
use crate::traits::StateUniverse;
use crate::venn_set::Solution;
use crate::{Contingency, Spec, State};
use fxhash::FxBuildHasher;
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};
use std::collections::HashMap;

impl<'a, U: StateUniverse> PositiveSolver<'a, U> {
    pub fn new(universe: &'a U) -> PositiveSolver<'a, U> {
        PositiveSolver::with_settings(universe, SolverSettings::default())
    }

    pub fn with_settings(universe: &'a U, settings: SolverSettings) -> PositiveSolver<'a, U> {
        PositiveSolver { universe, settings }
    }

    pub fn get_settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Compute all grounded solutions of the given (structured) contingencies.
    ///
    /// Requirements contribute their effector, inhibitions its complement, quantitative
    /// contingencies are ignored. The result is sorted and contains no duplicates; it is
    /// empty when no consistent world exists.
    pub fn solve(
        &self,
        contingencies: &[Contingency],
    ) -> Result<Vec<GroundedSolution>, ComplexityLimitExceeded> {
        let set = Contingency::mk_venn_set(contingencies);
        let assignments = set.calc_solutions_with_limit(self.settings.max_assignments)?;

        if cfg!(feature = "print-progress") {
            println!(
                "Positivizing {} assignment(s) of {} literal(s).",
                assignments.len(),
                set.values().len()
            );
        }

        let mut result = Vec::new();
        for assignment in &assignments {
            result.append(&mut self.calc_positive_solutions(assignment)?);
        }
        result.sort();
        result.dedup();

        if cfg!(feature = "print-progress") {
            println!(" >> Found {} grounded solution(s).", result.len());
        }

        Ok(result)
    }

    /// Expand one Boolean assignment into grounded solutions.
    ///
    /// False states which are already contradicted by a true state carry no information and
    /// are dropped. Every remaining false state is replaced by one combination of its
    /// complementary states (one alternative per referenced spec), for every possible choice
    /// of such combinations. Each candidate is then structured, deduplicated and kept only
    /// if it is consistent.
    pub fn calc_positive_solutions(
        &self,
        assignment: &Solution<State>,
    ) -> Result<Vec<GroundedSolution>, ComplexityLimitExceeded> {
        let trues: Vec<State> = assignment
            .iter()
            .filter(|(_, value)| **value)
            .map(|(state, _)| state.clone())
            .collect();
        let falses: Vec<&State> = assignment
            .iter()
            .filter(|(_, value)| !**value)
            .map(|(state, _)| state)
            .filter(|state| !trues.iter().any(|it| it.is_mutually_exclusive_with(state)))
            .collect();

        if falses.is_empty() {
            return Ok(finish_solution(trues).into_iter().collect());
        }

        let alternatives: Vec<Vec<Vec<State>>> = falses
            .iter()
            .map(|state| self.complementary_state_combos(state))
            .collect();

        let mut count = BigUint::one();
        for options in &alternatives {
            count *= BigUint::from(options.len());
        }
        let limit = self.settings.max_assignments;
        if count.to_usize().map(|it| it > limit).unwrap_or(true) {
            return Err(ComplexityLimitExceeded::new(limit));
        }

        let mut result = Vec::new();
        for choice in cartesian_product(&alternatives) {
            let mut candidate = trues.clone();
            for combo in choice {
                candidate.extend(combo);
            }
            if let Some(solution) = finish_solution(candidate) {
                result.push(solution);
            }
        }
        Ok(result)
    }

    /// **(internal)** All consistent ways in which `state` can be false: for every spec of
    /// the state one of its complementary states, re-attached to the spec's molecule.
    fn complementary_state_combos(&self, state: &State) -> Vec<Vec<State>> {
        let per_spec: Vec<Vec<State>> = state
            .specs()
            .into_iter()
            .map(|spec| {
                self.universe
                    .complementary_states_for_component(&spec.to_component_spec(), state)
                    .iter()
                    .map(|it| it.to_structured_from_spec(spec))
                    .collect()
            })
            .collect();
        cartesian_product(&per_spec)
            .into_iter()
            .filter(|combo| is_consistent(combo))
            .collect()
    }
}

/// **(internal)** Structure, sort and deduplicate `states`; `None` if the result is not
/// consistent.
fn finish_solution(states: Vec<State>) -> Option<GroundedSolution> {
    let mut states = structure_states(&states);
    states.sort();
    states.dedup();
    if is_consistent(&states) {
        Some(states)
    } else {
        None
    }
}

/// **(internal)** Give a struct index to every unstructured spec. All unstructured
/// references to one component denote the same molecule, which receives the smallest
/// index above all indices already in use.
fn structure_states(states: &[State]) -> Vec<State> {
    let mut next = states
        .iter()
        .flat_map(|it| it.specs())
        .filter_map(|it| it.get_struct_index())
        .max()
        .map(|it| it + 1)
        .unwrap_or(0);
    let mut assigned: HashMap<Spec, u32, FxBuildHasher> = HashMap::default();
    states
        .iter()
        .map(|state| {
            let mut state = state.clone();
            loop {
                let spec = match state.specs().into_iter().find(|it| !it.is_structured()) {
                    Some(spec) => spec.clone(),
                    None => break,
                };
                let index = *assigned.entry(spec.to_component_spec()).or_insert_with(|| {
                    next += 1;
                    next - 1
                });
                let structured = spec.with_struct_index(index);
                state = state.to_structured_from_spec(&structured);
            }
            state
        })
        .collect()
}

/// **(internal)** All ways of choosing one item from every list (in order).
fn cartesian_product<T: Clone>(lists: &[Vec<T>]) -> Vec<Vec<T>> {
    let mut result: Vec<Vec<T>> = vec![Vec::new()];
    for list in lists {
        let mut extended = Vec::with_capacity(result.len() * list.len());
        for prefix in &result {
            for item in list {
                let mut next = prefix.clone();
                next.push(item.clone());
                extended.push(next);
            }
        }
        result = extended;
    }
    result
}

#[cfg(test)]
mod tests {
    use crate::solver::{is_consistent, PositiveSolver, SolverSettings};
    use crate::traits::StateUniverse;
    use crate::venn_set::Solution;
    use crate::{Contingency, ContingencyType, Effector, Reaction, RxnConSystem, Spec, State};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::convert::TryFrom;

    fn spec(value: &str) -> Spec {
        Spec::try_from(value).unwrap()
    }

    fn state(value: &str) -> State {
        State::try_from(value).unwrap()
    }

    /// A universe where complementary states are given explicitly.
    struct FixedUniverse {
        complements: HashMap<State, Vec<State>>,
    }

    impl StateUniverse for FixedUniverse {
        fn states_for_component(&self, _component: &Spec) -> Vec<State> {
            Vec::new()
        }

        fn complementary_states_for_component(
            &self,
            component: &Spec,
            state: &State,
        ) -> Vec<State> {
            let component = component.to_non_struct_spec();
            self.complements
                .get(&state.to_non_structured())
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .filter(|it| it.components().contains(&component))
                .collect()
        }
    }

    /// A binds B and C on the same domain, K phosphorylates A.
    fn make_system() -> RxnConSystem {
        let ab = Reaction::mk_ppi(&spec("A_[x]"), &spec("B_[a]")).unwrap();
        let ac = Reaction::mk_ppi(&spec("A_[x]"), &spec("C_[a]")).unwrap();
        let ka = Reaction::mk_modification(
            &spec("K"),
            &spec("A_[(r)]"),
            crate::StateModifier::Unmodified,
            crate::StateModifier::Phosphorylated,
        )
        .unwrap();
        RxnConSystem::new(vec![ab, ac, ka], vec![]).unwrap()
    }

    fn contingency(reaction: &str, kind: ContingencyType, effector: Effector) -> Contingency {
        Contingency::new(reaction, kind, effector)
    }

    #[test]
    fn no_contingencies_give_one_empty_solution() {
        let system = make_system();
        let solver = PositiveSolver::new(&system);
        assert_eq!(vec![Vec::<State>::new()], solver.solve(&[]).unwrap());
        let quantitative = contingency(
            "r",
            ContingencyType::Positive,
            Effector::mk_state(state("A@0_[(r)]-{p}")),
        );
        assert_eq!(vec![Vec::<State>::new()], solver.solve(&[quantitative]).unwrap());
    }

    #[test]
    fn inhibited_modification_is_positivized() {
        let system = make_system();
        let solver = PositiveSolver::new(&system);
        let inhibition = contingency(
            "r",
            ContingencyType::Inhibition,
            Effector::mk_state(state("A@0_[(r)]-{p}")),
        );
        assert_eq!(
            vec![vec![state("A@0_[(r)]-{0}")]],
            solver.solve(&[inhibition]).unwrap()
        );
    }

    #[test]
    fn inhibited_binding_is_positivized() {
        let system = make_system();
        let solver = PositiveSolver::new(&system);
        let inhibition = contingency(
            "r",
            ContingencyType::Inhibition,
            Effector::mk_state(state("A@1_[x]--B@2_[a]")),
        );
        let expected = vec![
            vec![state("A@1_[x]--C@3_[a]"), state("B@2_[a]--0")],
            vec![state("A@1_[x]--0"), state("B@2_[a]--0")],
        ];
        assert_eq!(expected, solver.solve(&[inhibition]).unwrap());
    }

    #[test]
    fn disjunction_yields_consistent_solutions() {
        let system = make_system();
        let solver = PositiveSolver::new(&system);
        let requirement = contingency(
            "r",
            ContingencyType::Requirement,
            Effector::mk_or(vec![
                Effector::mk_state(state("A@0_[x]--B@1_[a]")),
                Effector::mk_state(state("A@0_[(r)]-{p}")),
            ]),
        );
        let solutions = solver.solve(&[requirement]).unwrap();
        assert!(!solutions.is_empty());
        for solution in &solutions {
            assert!(is_consistent(solution));
            assert!(solution.iter().all(|it| it.is_structured()));
        }
        // Both states hold, or exactly one of them holds and the other one is positivized.
        assert!(solutions.contains(&vec![
            state("A@0_[x]--B@1_[a]"),
            state("A@0_[(r)]-{p}")
        ]));
        assert!(solutions.contains(&vec![
            state("A@0_[x]--B@1_[a]"),
            state("A@0_[(r)]-{0}")
        ]));
        assert!(solutions.contains(&vec![
            state("A@0_[x]--0"),
            state("B@1_[a]--0"),
            state("A@0_[(r)]-{p}")
        ]));
        let mut deduplicated = solutions.clone();
        deduplicated.dedup();
        assert_eq!(deduplicated, solutions);
    }

    #[test]
    fn contradicted_alternative_gives_no_solution() {
        // The only way for S to be false is S', but S' conflicts with the required T.
        let s = state("B@1_[(r)]-{p}");
        let s_alternative = state("B_[y]--0");
        let t = state("A@0_[x]--B@1_[y]");
        let mut complements = HashMap::new();
        complements.insert(s.to_non_structured(), vec![s_alternative]);
        let universe = FixedUniverse { complements };
        let solver = PositiveSolver::new(&universe);

        let contingencies = vec![
            contingency("r", ContingencyType::Requirement, Effector::mk_state(t)),
            contingency("r", ContingencyType::Inhibition, Effector::mk_state(s)),
        ];
        assert!(solver.solve(&contingencies).unwrap().is_empty());
    }

    #[test]
    fn contradicted_falses_are_dropped() {
        let system = make_system();
        let solver = PositiveSolver::new(&system);
        let assignment: Solution<State> = vec![
            (state("A@0_[x]--B@1_[a]"), true),
            (state("A@0_[x]--0"), false),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            vec![vec![state("A@0_[x]--B@1_[a]")]],
            solver.calc_positive_solutions(&assignment).unwrap()
        );

        let inconsistent: Solution<State> = vec![
            (state("A@0_[x]--B@1_[a]"), true),
            (state("A@0_[x]--0"), true),
        ]
        .into_iter()
        .collect();
        assert!(solver.calc_positive_solutions(&inconsistent).unwrap().is_empty());
    }

    #[test]
    fn unstructured_states_are_structured() {
        let system = make_system();
        let solver = PositiveSolver::new(&system);
        let assignment: Solution<State> = vec![
            (state("A@0_[x]--C_[a]"), true),
            (state("C_[a]--0"), false),
        ]
        .into_iter()
        .collect();
        let solutions = solver.calc_positive_solutions(&assignment).unwrap();
        assert_eq!(vec![vec![state("A@0_[x]--C@1_[a]")]], solutions);
    }

    #[test]
    fn complexity_limit() {
        let system = make_system();
        let settings = SolverSettings::new().with_max_assignments(2);
        let solver = PositiveSolver::with_settings(&system, settings);
        let requirement = contingency(
            "r",
            ContingencyType::Requirement,
            Effector::mk_or(vec![
                Effector::mk_state(state("A@0_[x]--B@1_[a]")),
                Effector::mk_state(state("A@0_[(r)]-{p}")),
            ]),
        );
        let error = solver.solve(&[requirement]).unwrap_err();
        assert_eq!(2, error.limit());
        assert_eq!(2, solver.get_settings().get_max_assignments());
    }
}
