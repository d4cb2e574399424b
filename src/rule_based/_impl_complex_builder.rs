use crate::rule_based::{site_name, Complex, ComplexBuilder, Mol};
use crate::util::union_find_classes;
use crate::{Spec, State, StateModifier};
use fxhash::FxBuildHasher;
use petgraph::unionfind::UnionFind;
use std::collections::HashMap;

impl Default for ComplexBuilder {
    fn default() -> Self {
        ComplexBuilder {
            mols: Vec::new(),
            index: HashMap::with_hasher(FxBuildHasher::default()),
            groups: UnionFind::new_empty(),
            bonds: HashMap::with_hasher(FxBuildHasher::default()),
        }
    }
}

impl ComplexBuilder {
    pub fn new() -> ComplexBuilder {
        ComplexBuilder::default()
    }

    /// Add the molecule of `spec` (reduced to its component) unless it is already known.
    /// Adding a known molecule as a reactant marks it as a reactant.
    pub fn add_entity(&mut self, spec: &Spec, is_reactant: bool) {
        let component = spec.to_component_spec();
        if let Some(position) = self.index.get(&component) {
            if is_reactant {
                self.mols[*position].mark_reactant();
            }
            return;
        }
        let position = self.groups.new_set();
        self.mols.push(Mol::new(&component, is_reactant));
        self.index.insert(component, position);
    }

    /// Bind the sites of `first` and `second` and merge the complexes of their molecules.
    ///
    /// Returns the index of the bond. Declaring the same bond again returns the original
    /// index. Unknown molecules are added as non-reactants.
    pub fn set_bond(&mut self, first: &Spec, second: &Spec) -> usize {
        let key = if first <= second {
            (first.clone(), second.clone())
        } else {
            (second.clone(), first.clone())
        };
        if let Some(bond) = self.bonds.get(&key) {
            return *bond;
        }
        let bond = self.bonds.len() + 1;
        self.bonds.insert(key, bond);

        let first_mol = self.position(first);
        let second_mol = self.position(second);
        self.mols[first_mol].set_bond(site_name(first), Some(bond));
        self.mols[second_mol].set_bond(site_name(second), Some(bond));
        self.groups.union(first_mol, second_mol);
        bond
    }

    /// Mark the binding site of `spec` as free.
    pub fn set_free_site(&mut self, spec: &Spec) {
        let mol = self.position(spec);
        self.mols[mol].set_bond(site_name(spec), None);
    }

    /// Set the modification of the residue of `spec`.
    pub fn set_modification(&mut self, spec: &Spec, modifier: StateModifier) {
        let mol = self.position(spec);
        self.mols[mol].set_modification(site_name(spec), modifier);
    }

    /// Record the sites and bonds described by a (structured) state.
    pub fn add_state(&mut self, state: &State) {
        match state {
            State::Interaction(first, second) | State::SelfInteraction(first, second) => {
                self.set_bond(first, second);
            }
            State::EmptyBinding(site) => self.set_free_site(site),
            State::Modification(site, modifier) => self.set_modification(site, *modifier),
        }
    }

    /// All complexes, in the order of their first added molecule. Molecules within a
    /// complex keep the order in which they were added.
    pub fn build(&self) -> Vec<Complex> {
        union_find_classes(&self.groups, self.mols.len())
            .into_iter()
            .map(|group| Complex::new(group.into_iter().map(|i| self.mols[i].clone()).collect()))
            .collect()
    }

    /// Only the complexes which contain at least one reactant molecule.
    pub fn build_reactants(&self) -> Vec<Complex> {
        self.build()
            .into_iter()
            .filter(|it| it.is_reactant())
            .collect()
    }

    /// **(internal)** Position of the molecule of `spec`, added as a non-reactant if needed.
    fn position(&mut self, spec: &Spec) -> usize {
        self.add_entity(spec, false);
        self.index[&spec.to_component_spec()]
    }
}
