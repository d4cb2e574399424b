use crate::struct_equivalences::{EquivalenceResolver, StructEquivalences};
use crate::util::union_find_classes;
use crate::{BooleanContingencyName, QualSpec, Spec};
use fxhash::FxBuildHasher;
use petgraph::unionfind::UnionFind;
use std::collections::{BTreeSet, HashMap};
use std::fmt::{Display, Error, Formatter};

impl Default for StructEquivalences {
    fn default() -> Self {
        StructEquivalences {
            members: Vec::new(),
            index: HashMap::with_hasher(FxBuildHasher::default()),
            classes: UnionFind::new_empty(),
            canonical: Vec::new(),
        }
    }
}

impl StructEquivalences {
    pub fn new() -> StructEquivalences {
        StructEquivalences::default()
    }

    /// Number of distinct qualified component specs known to this resolver.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// All equivalence classes, each sorted, in the order of their first member.
    pub fn classes(&self) -> Vec<Vec<QualSpec>> {
        union_find_classes(&self.classes, self.members.len())
            .into_iter()
            .map(|set| {
                let mut class: Vec<QualSpec> =
                    set.into_iter().map(|i| self.members[i].clone()).collect();
                class.sort();
                class
            })
            .collect()
    }

    /// The root-namespace structured spec of the class containing `qual_spec`, if known.
    pub fn canonical_spec(&self, qual_spec: &QualSpec) -> Option<Spec> {
        let element = *self.index.get(&qual_spec.to_component_qual_spec())?;
        self.canonical[self.classes.find(element)].clone()
    }

    /// **(internal)** Element of the (component-reduced) `qual_spec`, created if necessary.
    fn element(&mut self, qual_spec: QualSpec) -> usize {
        let qual_spec = qual_spec.to_component_qual_spec();
        if let Some(element) = self.index.get(&qual_spec) {
            return *element;
        }
        let element = self.classes.new_set();
        let is_canonical =
            qual_spec.has_trivial_namespace() && qual_spec.get_spec().is_structured();
        if is_canonical {
            self.canonical.push(Some(qual_spec.get_spec().clone()));
        } else {
            self.canonical.push(None);
        }
        self.members.push(qual_spec.clone());
        self.index.insert(qual_spec, element);
        element
    }

    /// **(internal)** Merge the classes of two elements.
    ///
    /// Fails (and leaves both classes untouched) if each class already has a different
    /// canonical spec: two references to distinct molecules can never be identified.
    fn union(&mut self, first: usize, second: usize) -> Result<(), String> {
        let (first, second) = (self.classes.find_mut(first), self.classes.find_mut(second));
        if first == second {
            return Ok(());
        }
        let canonical = match (&self.canonical[first], &self.canonical[second]) {
            (Some(a), Some(b)) if a != b => {
                return Err(format!(
                    "Cannot identify distinct molecules {} and {} ({} == {}).",
                    a, b, self.members[first], self.members[second]
                ))
            }
            (Some(a), _) => Some(a.clone()),
            (None, b) => b.clone(),
        };
        self.classes.union(first, second);
        let root = self.classes.find_mut(first);
        self.canonical[root] = canonical;
        Ok(())
    }
}

impl EquivalenceResolver for StructEquivalences {
    fn find(&mut self, namespace: &[BooleanContingencyName], spec: &Spec) -> Option<Spec> {
        let query = QualSpec::new(namespace.to_vec(), spec.clone());
        self.canonical_spec(&query)
            .map(|canonical| canonical.with_locus(spec.get_locus().clone()))
    }

    fn add_equivalence(&mut self, first: QualSpec, second: QualSpec) -> Result<(), String> {
        let first = self.element(first);
        let second = self.element(second);
        self.union(first, second)
    }

    fn merge_with(
        &mut self,
        other: &StructEquivalences,
        prefix: &[BooleanContingencyName],
    ) -> Result<(), String> {
        for class in other.classes() {
            let mut members = class.iter().map(|it| it.with_prepended_namespace(prefix));
            if let Some(first) = members.next() {
                let first = self.element(first);
                for member in members {
                    let member = self.element(member);
                    self.union(first, member)?;
                }
            }
        }
        Ok(())
    }

    fn indices_in_root_namespace(&self) -> BTreeSet<u32> {
        self.members
            .iter()
            .filter(|it| it.has_trivial_namespace())
            .filter_map(|it| it.get_spec().get_struct_index())
            .collect()
    }
}

impl Display for StructEquivalences {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        for (i, class) in self.classes().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let members: Vec<String> = class.iter().map(|it| it.to_string()).collect();
            write!(f, "{{{}}}", members.join(" == "))?;
        }
        Ok(())
    }
}
