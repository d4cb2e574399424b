//! Assignment of structural indices to the specs referenced by effectors.
//!
//! An effector refers to molecules by their (unstructured) specs, possibly nested inside
//! named scopes (`<name>`). Before a contingency can be grounded, every such reference has
//! to be mapped to a concrete molecule, i.e. a spec with a structural index. References
//! which denote the same molecule must receive the same index, references to different
//! molecules must receive different ones.
//!
//! A `StructEquivalences` instance remembers which namespace-qualified references are known
//! to denote the same molecule. Every equivalence class has at most one *canonical* member:
//! the structured spec in the root namespace which supplies the index for the whole class.
//!
//! `TrivialStructEquivalences` is a fast path for effectors which are already structured
//! and do not need any identity merging across scopes.

use crate::{BooleanContingencyName, QualSpec, Spec};
use fxhash::FxBuildHasher;
use petgraph::unionfind::UnionFind;
use std::collections::{BTreeSet, HashMap};

/// **(internal)** Disjoint-set implementation of `StructEquivalences`.
mod _impl_struct_equivalences;
/// **(internal)** Conversion of effectors and contingencies into their structured form.
mod _impl_struct_effector;
/// **(internal)** The non-merging `TrivialStructEquivalences`.
mod _impl_trivial;

/// Common interface of the structural equivalence resolvers.
pub trait EquivalenceResolver {
    /// Find the structured spec which `spec` (referenced from `namespace`) resolves to.
    ///
    /// The match is performed at component resolution, but the locus of `spec` is
    /// re-attached to the result.
    fn find(&mut self, namespace: &[BooleanContingencyName], spec: &Spec) -> Option<Spec>;

    /// Declare that `first` and `second` denote the same molecule.
    ///
    /// Fails if the two specs are already known to denote two distinct molecules.
    fn add_equivalence(&mut self, first: QualSpec, second: QualSpec) -> Result<(), String>;

    /// Import all equivalences of `other`, moving them into the `prefix` namespace.
    ///
    /// Fails if an imported class would identify two distinct molecules.
    fn merge_with(
        &mut self,
        other: &StructEquivalences,
        prefix: &[BooleanContingencyName],
    ) -> Result<(), String>;

    /// Struct indices already claimed by root-namespace references.
    fn indices_in_root_namespace(&self) -> BTreeSet<u32>;
}

/// Equivalence classes of namespace-qualified component specs.
#[derive(Clone, Debug)]
pub struct StructEquivalences {
    members: Vec<QualSpec>,
    index: HashMap<QualSpec, usize, FxBuildHasher>,
    classes: UnionFind<usize>,
    // Canonical spec of each class, only valid for class representatives.
    canonical: Vec<Option<Spec>>,
}

/// A resolver which never merges anything: structured specs resolve to themselves and
/// unstructured specs do not resolve at all.
#[derive(Clone, Debug, Default)]
pub struct TrivialStructEquivalences {
    claimed: BTreeSet<u32>,
}

/// Source of fresh structural indices.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StructCounter {
    next: u32,
}

impl StructCounter {
    pub fn new() -> StructCounter {
        StructCounter::default()
    }

    /// A counter which will not yield indices smaller than `first`.
    pub fn starting_at(first: u32) -> StructCounter {
        StructCounter { next: first }
    }

    /// Return the next index which is not in `claimed`. Indices are never repeated.
    pub fn next_free(&mut self, claimed: &BTreeSet<u32>) -> u32 {
        while claimed.contains(&self.next) {
            self.next += 1;
        }
        let result = self.next;
        self.next += 1;
        result
    }
}
