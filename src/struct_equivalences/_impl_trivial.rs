use crate::struct_equivalences::{
    EquivalenceResolver, StructEquivalences, TrivialStructEquivalences,
};
use crate::{BooleanContingencyName, QualSpec, Spec};
use std::collections::BTreeSet;

impl TrivialStructEquivalences {
    pub fn new() -> TrivialStructEquivalences {
        TrivialStructEquivalences::default()
    }
}

impl EquivalenceResolver for TrivialStructEquivalences {
    fn find(&mut self, _namespace: &[BooleanContingencyName], spec: &Spec) -> Option<Spec> {
        if let Some(index) = spec.get_struct_index() {
            self.claimed.insert(index);
            Some(spec.clone())
        } else {
            None
        }
    }

    /// Nothing is merged, but indices of root-namespace specs are still reserved so that
    /// fresh indices do not collide with them.
    fn add_equivalence(&mut self, first: QualSpec, second: QualSpec) -> Result<(), String> {
        for qual_spec in [first, second] {
            if qual_spec.has_trivial_namespace() {
                if let Some(index) = qual_spec.get_spec().get_struct_index() {
                    self.claimed.insert(index);
                }
            }
        }
        Ok(())
    }

    fn merge_with(
        &mut self,
        _other: &StructEquivalences,
        _prefix: &[BooleanContingencyName],
    ) -> Result<(), String> {
        Ok(())
    }

    fn indices_in_root_namespace(&self) -> BTreeSet<u32> {
        self.claimed.clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::struct_equivalences::{
        EquivalenceResolver, StructEquivalences, TrivialStructEquivalences,
    };
    use crate::{BooleanContingencyName, QualSpec, Spec};
    use std::convert::TryFrom;

    #[test]
    fn trivial_resolver_does_not_merge() {
        let name = BooleanContingencyName::new("<x>").unwrap();
        let mut eq = TrivialStructEquivalences::new();
        let structured = Spec::try_from("A@2_[d]").unwrap();
        let plain = Spec::try_from("A_[d]").unwrap();

        assert_eq!(
            Some(structured.clone()),
            eq.find(&[name.clone()], &structured)
        );
        assert_eq!(None, eq.find(&[], &plain));

        eq.add_equivalence(
            QualSpec::try_from("B@5").unwrap(),
            QualSpec::try_from("<x>.B").unwrap(),
        )
        .unwrap();
        let mut local = StructEquivalences::new();
        local
            .add_equivalence(
                QualSpec::try_from("A@0").unwrap(),
                QualSpec::try_from("<y>.A").unwrap(),
            )
            .unwrap();
        eq.merge_with(&local, &[]).unwrap();
        assert_eq!(None, eq.find(&[name], &plain));
        assert_eq!(
            vec![2, 5],
            eq.indices_in_root_namespace().into_iter().collect::<Vec<_>>()
        );
    }
}
