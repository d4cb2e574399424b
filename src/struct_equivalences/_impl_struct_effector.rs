use crate::struct_equivalences::{EquivalenceResolver, StructCounter, StructEquivalences};
use crate::{BooleanContingencyName, Effector, QualSpec, State};

impl Effector {
    /// Convert this effector into a structured form where every referenced spec carries a
    /// struct index.
    ///
    /// References are resolved through `resolver`: a reference which already belongs to a
    /// class with a canonical spec receives its index, other references receive a fresh
    /// index from `counter` (which becomes the canonical spec of the reference's class).
    /// A reference that already carries an index which the resolver does not know denotes
    /// that molecule in every scope and keeps its index.
    ///
    /// The declared equivalences of a named node are merged into `resolver` (relative to
    /// `namespace`) before its child is converted in the extended namespace. Fails if the
    /// equivalences identify two distinct molecules.
    pub fn to_struct_effector<E: EquivalenceResolver>(
        &self,
        resolver: &mut E,
        counter: &mut StructCounter,
        namespace: &[BooleanContingencyName],
    ) -> Result<Effector, String> {
        Ok(match self {
            Effector::State(state) => {
                Effector::State(structure_state(state, resolver, counter, namespace)?)
            }
            Effector::Not(inner) => {
                Effector::mk_not(inner.to_struct_effector(resolver, counter, namespace)?)
            }
            Effector::And(operands) => Effector::And(
                operands
                    .iter()
                    .map(|it| it.to_struct_effector(resolver, counter, namespace))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Effector::Or(operands) => Effector::Or(
                operands
                    .iter()
                    .map(|it| it.to_struct_effector(resolver, counter, namespace))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Effector::Named(name, equivalences, inner) => {
                let scope = [name.clone()];
                let mut local = StructEquivalences::new();
                for (outer, inner) in equivalences {
                    local.add_equivalence(outer.clone(), inner.with_prepended_namespace(&scope))?;
                }
                resolver.merge_with(&local, namespace)?;

                let mut inner_namespace = namespace.to_vec();
                inner_namespace.push(name.clone());
                let inner = inner.to_struct_effector(resolver, counter, &inner_namespace)?;
                Effector::Named(name.clone(), equivalences.clone(), Box::new(inner))
            }
        })
    }
}

/// **(internal)** Replace every spec of `state` by its structured counterpart.
fn structure_state<E: EquivalenceResolver>(
    state: &State,
    resolver: &mut E,
    counter: &mut StructCounter,
    namespace: &[BooleanContingencyName],
) -> Result<State, String> {
    let mut specs = Vec::new();
    for spec in state.specs() {
        let structured = if let Some(found) = resolver.find(namespace, spec) {
            found
        } else if spec.is_structured() {
            let root = QualSpec::root(spec.clone());
            resolver.add_equivalence(root.clone(), root)?;
            spec.clone()
        } else {
            let index = counter.next_free(&resolver.indices_in_root_namespace());
            let structured = spec.with_struct_index(index);
            resolver.add_equivalence(
                QualSpec::root(structured.clone()),
                QualSpec::new(namespace.to_vec(), spec.clone()),
            )?;
            structured
        };
        specs.push(structured);
    }
    Ok(state.with_specs(&specs))
}

#[cfg(test)]
mod tests {
    use crate::struct_equivalences::{
        EquivalenceResolver, StructCounter, StructEquivalences, TrivialStructEquivalences,
    };
    use crate::{BooleanContingencyName, Effector, QualSpec, Spec, State};
    use pretty_assertions::assert_eq;
    use std::convert::TryFrom;

    fn leaf(value: &str) -> Effector {
        Effector::mk_state(State::try_from(value).unwrap())
    }

    fn name(value: &str) -> BooleanContingencyName {
        BooleanContingencyName::new(value).unwrap()
    }

    fn bridge(outer: &str, inner: &str) -> (QualSpec, QualSpec) {
        (
            QualSpec::try_from(outer).unwrap(),
            QualSpec::try_from(inner).unwrap(),
        )
    }

    /// Struct index of the first spec of `component` in the given state leaf.
    fn index_of(effector: &Effector, component: &str) -> Option<u32> {
        effector
            .states()
            .iter()
            .flat_map(|it| it.specs())
            .find(|it| it.get_component_name() == component)
            .and_then(|it| it.get_struct_index())
    }

    #[test]
    fn root_references_are_resolved() {
        let mut eq = StructEquivalences::new();
        eq.add_equivalence(
            QualSpec::try_from("A@0").unwrap(),
            QualSpec::try_from("A").unwrap(),
        )
        .unwrap();
        let mut counter = StructCounter::new();
        let effector = Effector::mk_and(vec![leaf("A_[x]--B_[y]"), leaf("B_[(r)]-{p}")]);
        let structured = effector.to_struct_effector(&mut eq, &mut counter, &[]).unwrap();

        let expected = Effector::mk_and(vec![leaf("A@0_[x]--B@1_[y]"), leaf("B@1_[(r)]-{p}")]);
        assert_eq!(expected, structured);
        assert!(structured.is_structured());
    }

    #[test]
    fn bridged_scopes_share_indices() {
        // <c1> and <c2> both reference "the" C of the enclosing scope.
        let effector = Effector::mk_and(vec![
            Effector::mk_named(name("<c1>"), vec![bridge("C", "C")], leaf("A_[x]--C_[y]"))
                .unwrap(),
            Effector::mk_named(name("<c2>"), vec![bridge("C", "C")], leaf("B_[x]--C_[z]"))
                .unwrap(),
        ]);
        let mut eq = StructEquivalences::new();
        let structured = effector.to_struct_effector(&mut eq, &mut StructCounter::new(), &[])
            .unwrap();
        let (first, second) = match &structured {
            Effector::And(operands) => (operands[0].clone(), operands[1].clone()),
            other => panic!("Unexpected effector {}", other),
        };
        assert!(structured.is_structured());
        assert!(index_of(&first, "C").is_some());
        assert_eq!(index_of(&first, "C"), index_of(&second, "C"));
        assert_ne!(index_of(&first, "A"), index_of(&second, "B"));
        assert_ne!(index_of(&first, "A"), index_of(&first, "C"));

        // The outer reference is bound to the same molecule as well.
        let outer_c = eq.find(&[], &Spec::try_from("C_[w]").unwrap()).unwrap();
        assert_eq!(index_of(&first, "C"), outer_c.get_struct_index());
    }

    #[test]
    fn unbridged_scopes_are_isolated() {
        let effector = Effector::mk_and(vec![
            Effector::mk_named(name("<c1>"), vec![], leaf("A_[x]--C_[y]")).unwrap(),
            Effector::mk_named(name("<c2>"), vec![], leaf("B_[x]--C_[z]")).unwrap(),
        ]);
        let mut eq = StructEquivalences::new();
        let structured = effector.to_struct_effector(&mut eq, &mut StructCounter::new(), &[])
            .unwrap();
        match &structured {
            Effector::And(operands) => {
                assert_ne!(index_of(&operands[0], "C"), index_of(&operands[1], "C"))
            }
            other => panic!("Unexpected effector {}", other),
        }
    }

    #[test]
    fn nested_scopes_resolve_through_bridges() {
        // <outer> binds its B to the root B, <inner> binds its B to the <outer> B.
        let effector = Effector::mk_named(
            name("<outer>"),
            vec![bridge("B", "B")],
            Effector::mk_or(vec![
                leaf("A_[x]--B_[y]"),
                Effector::mk_named(
                    name("<inner>"),
                    vec![bridge("B", "B")],
                    Effector::mk_not(leaf("B_[(r)]-{p}")),
                )
                .unwrap(),
            ]),
        )
        .unwrap();
        let mut eq = StructEquivalences::new();
        eq.add_equivalence(
            QualSpec::try_from("B@1").unwrap(),
            QualSpec::try_from("B").unwrap(),
        )
        .unwrap();
        let structured = effector.to_struct_effector(&mut eq, &mut StructCounter::new(), &[])
            .unwrap();
        let states: Vec<String> = structured.states().iter().map(|it| it.to_string()).collect();
        assert_eq!(vec!["A@0_[x]--B@1_[y]", "B@1_[(r)]-{p}"], states);
    }

    #[test]
    fn trivial_resolver_keeps_structured_specs() {
        let effector = Effector::mk_and(vec![leaf("A@3_[x]--B@1_[y]"), leaf("C_[(r)]-{p}")]);
        let mut eq = TrivialStructEquivalences::new();
        let mut counter = StructCounter::new();
        let structured = effector.to_struct_effector(&mut eq, &mut counter, &[]).unwrap();
        // Unresolved references get fresh indices, the existing ones are not reused.
        assert_eq!(
            Effector::mk_and(vec![leaf("A@3_[x]--B@1_[y]"), leaf("C@0_[(r)]-{p}")]),
            structured
        );
        let again = effector.to_struct_effector(&mut eq, &mut counter, &[]).unwrap();
        assert_eq!(Some(2), index_of(&again, "C"));
    }

    #[test]
    fn indexed_references_keep_their_index_in_every_scope() {
        // `A@0` inside <x> is not bridged, but it still denotes the molecule A@0.
        let effector = Effector::mk_and(vec![
            Effector::mk_named(name("<x>"), vec![], leaf("A@0_[x]--C_[a]")).unwrap(),
            leaf("A_[(r)]-{p}"),
        ]);
        let mut eq = StructEquivalences::new();
        let structured = effector.to_struct_effector(&mut eq, &mut StructCounter::new(), &[]);
        let states: Vec<String> = structured
            .unwrap()
            .states()
            .iter()
            .map(|it| it.to_string())
            .collect();
        assert_eq!(vec!["A@0_[x]--C@1_[a]", "A@2_[(r)]-{p}"], states);
        // The written molecule is registered in the root namespace.
        assert_eq!(
            Some(Spec::try_from("A@0_[y]").unwrap()),
            eq.find(&[], &Spec::try_from("A@0_[y]").unwrap())
        );
    }

    #[test]
    fn bridged_inputs_never_identify_distinct_molecules() {
        // Reactant-like root molecules A@0 and B@1, reached through nested bridges.
        let mut eq = StructEquivalences::new();
        for (structured, plain) in [("A@0", "A"), ("B@1", "B")] {
            eq.add_equivalence(
                QualSpec::try_from(structured).unwrap(),
                QualSpec::try_from(plain).unwrap(),
            )
            .unwrap();
        }
        let effector = Effector::mk_named(
            name("<outer>"),
            vec![bridge("A", "A"), bridge("B_[a]", "B_[b]")],
            Effector::mk_and(vec![
                leaf("A_[x]--B_[y]"),
                Effector::mk_named(
                    name("<inner>"),
                    vec![bridge("A", "A"), bridge("C", "C")],
                    Effector::mk_or(vec![leaf("A_[x]--C_[z]"), leaf("C_[(r)]-{p}")]),
                )
                .unwrap(),
                leaf("C_[(r)]-{ub}"),
            ]),
        )
        .unwrap();
        let structured = effector.to_struct_effector(&mut eq, &mut StructCounter::new(), &[]);
        let states: Vec<String> = structured
            .unwrap()
            .states()
            .iter()
            .map(|it| it.to_string())
            .collect();
        assert_eq!(
            vec![
                "A@0_[x]--B@1_[y]",
                "A@0_[x]--C@2_[z]",
                "C@2_[(r)]-{p}",
                "C@2_[(r)]-{ub}"
            ],
            states
        );
    }

    #[test]
    fn conflicting_bridges_are_reported() {
        // Homodimer reactants A@0 and A@1: the scope claims both are its A.
        let mut eq = StructEquivalences::new();
        let root = |value: &str| QualSpec::try_from(value).unwrap();
        eq.add_equivalence(root("A@0"), root("A@0")).unwrap();
        eq.add_equivalence(root("A@1"), root("A@1")).unwrap();
        let effector = Effector::mk_named(
            name("<x>"),
            vec![bridge("A@0", "A"), bridge("A@1", "A")],
            leaf("A_[(r)]-{p}"),
        )
        .unwrap();
        let result = effector.to_struct_effector(&mut eq, &mut StructCounter::new(), &[]);
        assert!(result.is_err());
    }
}
