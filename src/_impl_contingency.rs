use crate::struct_equivalences::{EquivalenceResolver, StructCounter, StructEquivalences};
use crate::venn_set::VennSet;
use crate::{Contingency, ContingencyType, Effector, QualSpec, Reaction, State};
use std::convert::TryFrom;
use std::fmt::{Display, Error, Formatter};

impl ContingencyType {
    /// Requirements and inhibitions determine whether a reaction can take place at all.
    pub fn is_strict(&self) -> bool {
        matches!(self, ContingencyType::Requirement | ContingencyType::Inhibition)
    }

    /// Positive and negative contingencies only modulate the rate of a reaction.
    pub fn is_quantitative(&self) -> bool {
        !self.is_strict()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContingencyType::Requirement => "!",
            ContingencyType::Inhibition => "x",
            ContingencyType::Positive => "k+",
            ContingencyType::Negative => "k-",
        }
    }
}

impl TryFrom<&str> for ContingencyType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "!" => Ok(ContingencyType::Requirement),
            "x" => Ok(ContingencyType::Inhibition),
            "k+" => Ok(ContingencyType::Positive),
            "k-" => Ok(ContingencyType::Negative),
            other => Err(format!("Unknown contingency type `{}`.", other)),
        }
    }
}

impl Display for ContingencyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.as_str())
    }
}

impl Contingency {
    pub fn new(
        reaction: &str,
        contingency_type: ContingencyType,
        effector: Effector,
    ) -> Contingency {
        Contingency {
            reaction: reaction.to_string(),
            contingency_type,
            effector,
        }
    }

    /// Name of the regulated reaction.
    pub fn get_reaction(&self) -> &str {
        &self.reaction
    }

    pub fn get_type(&self) -> ContingencyType {
        self.contingency_type
    }

    pub fn get_effector(&self) -> &Effector {
        &self.effector
    }

    /// The set of worlds in which this contingency allows the reaction to take place.
    ///
    /// A requirement contributes its effector, an inhibition its complement. Quantitative
    /// contingencies do not restrict the reaction at all and give the universal set.
    pub fn to_venn_set(&self) -> VennSet<State> {
        match self.contingency_type {
            ContingencyType::Requirement => self.effector.to_venn_set(),
            ContingencyType::Inhibition => VennSet::mk_complement(self.effector.to_venn_set()),
            ContingencyType::Positive | ContingencyType::Negative => VennSet::mk_universal(),
        }
    }

    /// Intersection of the sets of all `contingencies`.
    pub fn mk_venn_set(contingencies: &[Contingency]) -> VennSet<State> {
        VennSet::mk_intersection(contingencies.iter().map(|it| it.to_venn_set()).collect())
    }

    /// Structure this contingency in the context of its `reaction`.
    ///
    /// The reactants of the reaction are registered first (`A@0 == A`, ...), so that
    /// references to reactants in the effector resolve to the reactant molecules. If a
    /// component appears more than once among the reactants, the unqualified reference
    /// is ambiguous and it is not registered.
    ///
    /// Fails if the named scopes of the effector identify two distinct molecules.
    pub fn to_structured(&self, reaction: &Reaction) -> Result<Contingency, String> {
        let mut equivalences = reactant_equivalences(reaction)?;
        self.to_structured_with(&mut equivalences, &mut StructCounter::new())
    }

    /// Structure all `contingencies` of one `reaction` with a shared resolver, so that an
    /// unqualified reference denotes the same molecule in every contingency.
    pub fn to_structured_all(
        contingencies: &[&Contingency],
        reaction: &Reaction,
    ) -> Result<Vec<Contingency>, String> {
        let mut equivalences = reactant_equivalences(reaction)?;
        let mut counter = StructCounter::new();
        contingencies
            .iter()
            .map(|it| it.to_structured_with(&mut equivalences, &mut counter))
            .collect()
    }

    /// Structure the effector of this contingency using the given resolver.
    pub fn to_structured_with<E: EquivalenceResolver>(
        &self,
        resolver: &mut E,
        counter: &mut StructCounter,
    ) -> Result<Contingency, String> {
        let effector = self
            .effector
            .to_struct_effector(resolver, counter, &[])
            .map_err(|error| format!("Contingency `{}`: {}", self, error))?;
        Ok(Contingency {
            reaction: self.reaction.clone(),
            contingency_type: self.contingency_type,
            effector,
        })
    }
}

/// **(internal)** Equivalences binding the unqualified references to the reactants of
/// `reaction` to their structured counterparts.
fn reactant_equivalences(reaction: &Reaction) -> Result<StructEquivalences, String> {
    let mut equivalences = StructEquivalences::new();
    let reactants = reaction.structured_reactants();
    for reactant in &reactants {
        let plain = reactant.to_non_struct_spec();
        let occurrences = reactants
            .iter()
            .filter(|it| it.to_non_struct_spec() == plain)
            .count();
        let root = QualSpec::root(reactant.clone());
        if occurrences == 1 {
            equivalences.add_equivalence(root, QualSpec::root(plain))?;
        } else {
            equivalences.add_equivalence(root.clone(), root)?;
        }
    }
    Ok(equivalences)
}

impl Display for Contingency {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "{}; {} {}",
            self.reaction, self.contingency_type, self.effector
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::venn_set::VennSet;
    use crate::{
        BooleanContingencyName, Contingency, ContingencyType, Effector, QualSpec, Reaction, Spec,
        State,
    };
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use std::convert::TryFrom;

    fn state(value: &str) -> State {
        State::try_from(value).unwrap()
    }

    fn spec(value: &str) -> Spec {
        Spec::try_from(value).unwrap()
    }

    #[test]
    fn contingency_types() {
        for string in ["!", "x", "k+", "k-"] {
            let parsed = ContingencyType::try_from(string).unwrap();
            assert_eq!(string, parsed.to_string());
        }
        assert!(ContingencyType::try_from("?").is_err());
        assert!(ContingencyType::Requirement.is_strict());
        assert!(ContingencyType::Negative.is_quantitative());
    }

    #[test]
    fn contingency_sets() {
        let x = state("A_[(r)]-{p}");
        let mk = |t: ContingencyType| {
            Contingency::new("A_ppi+_B", t, Effector::mk_state(x.clone()))
        };
        let requirement = mk(ContingencyType::Requirement);
        let inhibition = mk(ContingencyType::Inhibition);
        let positive = mk(ContingencyType::Positive);

        assert_eq!(VennSet::mk_value(x.clone()), requirement.to_venn_set());
        assert_eq!(
            VennSet::mk_complement(VennSet::mk_value(x.clone())),
            inhibition.to_venn_set()
        );
        assert_eq!(VennSet::mk_universal(), positive.to_venn_set());
        assert_eq!("A_ppi+_B; x A_[(r)]-{p}", inhibition.to_string());

        let all = Contingency::mk_venn_set(&[requirement.clone(), inhibition, positive]);
        assert!(all.calc_solutions().is_empty());
        assert_eq!(VennSet::mk_universal(), Contingency::mk_venn_set(&[]));
        let expected: BTreeMap<State, bool> = vec![(x, true)].into_iter().collect();
        assert_eq!(
            vec![expected],
            Contingency::mk_venn_set(&[requirement]).calc_solutions()
        );
    }

    #[test]
    fn contingency_is_structured_by_reactants() {
        let reaction = Reaction::mk_ppi(&spec("A_[b]"), &spec("B_[a]")).unwrap();
        let contingency = Contingency::new(
            reaction.get_name(),
            ContingencyType::Requirement,
            Effector::mk_and(vec![
                Effector::mk_state(state("B_[(r)]-{p}")),
                Effector::mk_state(state("A_[c]--C_[a]")),
            ]),
        );
        let structured = contingency.to_structured(&reaction).unwrap();
        assert_eq!(
            Effector::mk_and(vec![
                Effector::mk_state(state("B@1_[(r)]-{p}")),
                Effector::mk_state(state("A@0_[c]--C@2_[a]")),
            ]),
            *structured.get_effector()
        );
        assert_eq!(ContingencyType::Requirement, structured.get_type());
    }

    #[test]
    fn contingencies_share_unqualified_references() {
        let reaction = Reaction::mk_ppi(&spec("A_[b]"), &spec("B_[a]")).unwrap();
        let first = Contingency::new(
            reaction.get_name(),
            ContingencyType::Requirement,
            Effector::mk_state(state("A_[c]--C_[a]")),
        );
        let second = Contingency::new(
            reaction.get_name(),
            ContingencyType::Inhibition,
            Effector::mk_state(state("C_[(r)]-{p}")),
        );
        let structured = Contingency::to_structured_all(&[&first, &second], &reaction).unwrap();
        assert_eq!(
            Effector::mk_state(state("A@0_[c]--C@2_[a]")),
            *structured[0].get_effector()
        );
        assert_eq!(
            Effector::mk_state(state("C@2_[(r)]-{p}")),
            *structured[1].get_effector()
        );
        // Structured separately, each contingency starts from scratch.
        assert_eq!(
            Effector::mk_state(state("C@2_[(r)]-{p}")),
            *second.to_structured(&reaction).unwrap().get_effector()
        );
    }

    #[test]
    fn homodimer_reactants_are_not_aliased() {
        let reaction = Reaction::mk_ppi(&spec("A_[x]"), &spec("A_[x]")).unwrap();
        let contingency = Contingency::new(
            reaction.get_name(),
            ContingencyType::Requirement,
            Effector::mk_state(state("A_[(r)]-{p}")),
        );
        let structured = contingency.to_structured(&reaction).unwrap();
        // Neither of the two reactant molecules is "the" A, so a fresh molecule is used.
        assert_eq!(
            Effector::mk_state(state("A@2_[(r)]-{p}")),
            *structured.get_effector()
        );
    }

    #[test]
    fn conflicting_scopes_fail_to_structure() {
        let reaction = Reaction::mk_ppi(&spec("A_[x]"), &spec("B_[a]")).unwrap();
        let qual = |value: &str| QualSpec::try_from(value).unwrap();
        let name = BooleanContingencyName::new("<x>").unwrap();
        // Bypasses the validation of `Effector::mk_named`: both reactants become <x>.A.
        let effector = Effector::Named(
            name,
            vec![(qual("A"), qual("A")), (qual("B"), qual("A"))],
            Box::new(Effector::mk_state(state("A_[(r)]-{p}"))),
        );
        let contingency =
            Contingency::new(reaction.get_name(), ContingencyType::Requirement, effector);
        assert!(contingency.to_structured(&reaction).is_err());
        assert!(Contingency::to_structured_all(&[&contingency], &reaction).is_err());
    }
}
