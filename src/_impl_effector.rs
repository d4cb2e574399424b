use crate::venn_set::VennSet;
use crate::{BooleanContingencyName, Effector, QualSpec, State};
use std::fmt::{Display, Error, Formatter};

/// Constructor and destructor utility methods. These mainly avoid unnecessary boxing.
impl Effector {
    pub fn mk_state(state: State) -> Effector {
        Effector::State(state)
    }

    pub fn mk_not(inner: Effector) -> Effector {
        Effector::Not(Box::new(inner))
    }

    pub fn mk_and(operands: Vec<Effector>) -> Effector {
        Effector::And(operands)
    }

    pub fn mk_or(operands: Vec<Effector>) -> Effector {
        Effector::Or(operands)
    }

    /// Open a new named scope. The `equivalences` are pairs of an outer spec (relative to
    /// the enclosing scope) and an inner spec (relative to `name`) denoting the same entity.
    ///
    /// Fails if the two sides of an equivalence refer to different components.
    pub fn mk_named(
        name: BooleanContingencyName,
        equivalences: Vec<(QualSpec, QualSpec)>,
        inner: Effector,
    ) -> Result<Effector, String> {
        for (outer, inner) in &equivalences {
            let outer_component = outer.get_spec().to_component_spec().to_non_struct_spec();
            let inner_component = inner.get_spec().to_component_spec().to_non_struct_spec();
            if outer_component != inner_component {
                return Err(format!(
                    "Scope {} cannot identify {} with {}: they are different components.",
                    name, outer, inner
                ));
            }
        }
        Ok(Effector::Named(name, equivalences, Box::new(inner)))
    }

    pub fn as_state(&self) -> Option<&State> {
        match self {
            Effector::State(state) => Some(state),
            _ => None,
        }
    }

    /// Name of the scope opened by this node, if any.
    pub fn name(&self) -> Option<&BooleanContingencyName> {
        match self {
            Effector::Named(name, _, _) => Some(name),
            _ => None,
        }
    }

    /// All distinct states referenced in this effector, in the order of first appearance.
    pub fn states(&self) -> Vec<&State> {
        fn recursion<'a>(effector: &'a Effector, result: &mut Vec<&'a State>) {
            match effector {
                Effector::State(state) => {
                    if !result.contains(&state) {
                        result.push(state);
                    }
                }
                Effector::Not(inner) | Effector::Named(_, _, inner) => recursion(inner, result),
                Effector::And(operands) | Effector::Or(operands) => {
                    for operand in operands {
                        recursion(operand, result);
                    }
                }
            }
        }
        let mut result = Vec::new();
        recursion(self, &mut result);
        result
    }

    /// True if every referenced state carries struct indices.
    pub fn is_structured(&self) -> bool {
        self.states().iter().all(|it| it.is_structured())
    }

    /// Translate the effector into a set expression over its states. Names do not have any
    /// semantic meaning in the set algebra and are dropped.
    pub fn to_venn_set(&self) -> VennSet<State> {
        match self {
            Effector::State(state) => VennSet::mk_value(state.clone()),
            Effector::Not(inner) => VennSet::mk_complement(inner.to_venn_set()),
            Effector::And(operands) => {
                VennSet::mk_intersection(operands.iter().map(|it| it.to_venn_set()).collect())
            }
            Effector::Or(operands) => {
                VennSet::mk_union(operands.iter().map(|it| it.to_venn_set()).collect())
            }
            Effector::Named(_, _, inner) => inner.to_venn_set(),
        }
    }
}

impl Display for Effector {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        fn write_operands(
            f: &mut Formatter<'_>,
            operands: &[Effector],
            separator: &str,
        ) -> Result<(), Error> {
            write!(f, "(")?;
            for (i, operand) in operands.iter().enumerate() {
                if i > 0 {
                    write!(f, " {} ", separator)?;
                }
                write!(f, "{}", operand)?;
            }
            write!(f, ")")
        }

        match self {
            Effector::State(state) => write!(f, "{}", state),
            Effector::Not(inner) => write!(f, "!{}", inner),
            Effector::And(operands) => write_operands(f, operands, "&"),
            Effector::Or(operands) => write_operands(f, operands, "|"),
            Effector::Named(name, _, inner) => write!(f, "{}{}", name, inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::venn_set::VennSet;
    use crate::{BooleanContingencyName, Effector, QualSpec, State};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use std::convert::TryFrom;

    fn state(value: &str) -> State {
        State::try_from(value).unwrap()
    }

    fn leaf(value: &str) -> Effector {
        Effector::mk_state(state(value))
    }

    #[test]
    fn and_effector_has_single_solution() {
        let x = state("A_[x]--B_[y]");
        let y = state("A_[(r)]-{p}");
        let effector = Effector::mk_and(vec![
            Effector::mk_state(x.clone()),
            Effector::mk_state(y.clone()),
        ]);
        let set = effector.to_venn_set();
        assert_eq!(
            VennSet::Intersection(vec![
                VennSet::mk_value(x.clone()),
                VennSet::mk_value(y.clone())
            ]),
            set
        );
        let expected: BTreeMap<State, bool> = vec![(x, true), (y, true)].into_iter().collect();
        assert_eq!(vec![expected], set.calc_solutions());
    }

    #[test]
    fn or_effector_has_three_solutions() {
        let x = state("A_[x]--B_[y]");
        let y = state("A_[(r)]-{p}");
        let effector = Effector::mk_or(vec![
            Effector::mk_state(x.clone()),
            Effector::mk_state(y.clone()),
        ]);
        let solutions = effector.to_venn_set().calc_solutions();
        assert_eq!(3, solutions.len());
        for (vx, vy) in [(true, true), (true, false), (false, true)] {
            let expected: BTreeMap<State, bool> =
                vec![(x.clone(), vx), (y.clone(), vy)].into_iter().collect();
            assert!(solutions.contains(&expected));
        }
    }

    #[test]
    fn n_ary_translation_is_flat() {
        let effector = Effector::mk_and(vec![
            leaf("A_[x]--0"),
            leaf("B_[y]--0"),
            Effector::mk_not(leaf("C_[(r)]-{p}")),
        ]);
        match effector.to_venn_set() {
            VennSet::Intersection(operands) => assert_eq!(3, operands.len()),
            other => panic!("Unexpected translation {:?}", other),
        }
        assert_eq!(VennSet::mk_universal(), Effector::mk_and(vec![]).to_venn_set());
        assert_eq!(VennSet::mk_empty(), Effector::mk_or(vec![]).to_venn_set());
    }

    #[test]
    fn effector_states_and_names() {
        let name = BooleanContingencyName::new("<bind>").unwrap();
        let effector = Effector::mk_named(
            name.clone(),
            vec![],
            Effector::mk_or(vec![
                leaf("A_[x]--B_[y]"),
                leaf("A_[x]--B_[y]"),
                leaf("A@0_[x]--0"),
            ]),
        )
        .unwrap();
        assert_eq!(Some(&name), effector.name());
        assert_eq!(2, effector.states().len());
        assert!(!effector.is_structured());
        assert_eq!("<bind>(A_[x]--B_[y] | A_[x]--B_[y] | A@0_[x]--0)", effector.to_string());
        assert_eq!(
            VennSet::Union(vec![
                VennSet::mk_value(state("A_[x]--B_[y]")),
                VennSet::mk_value(state("A_[x]--B_[y]")),
                VennSet::mk_value(state("A@0_[x]--0")),
            ]),
            effector.to_venn_set()
        );
        assert!(leaf("A@0_[x]--B@1_[y]").is_structured());
    }

    #[test]
    fn named_scope_bridges_are_validated() {
        let name = BooleanContingencyName::new("<x>").unwrap();
        let qual = |value: &str| QualSpec::try_from(value).unwrap();
        let inner = leaf("A_[(r)]-{p}");
        let same = vec![(qual("A@0"), qual("A_[d]")), (qual("<y>.B"), qual("B"))];
        assert!(Effector::mk_named(name.clone(), same, inner.clone()).is_ok());
        let different = vec![(qual("A"), qual("A")), (qual("B"), qual("A"))];
        assert!(Effector::mk_named(name.clone(), different, inner.clone()).is_err());
        let kinds = vec![(qual("A"), qual("AmRNA"))];
        assert!(Effector::mk_named(name, kinds, inner).is_err());
    }
}
