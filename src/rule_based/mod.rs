//! Rule-based models built from grounded solutions.
//!
//! Every grounded solution of a reaction's contingencies, together with the reaction's
//! own terms, determines which molecules take part in the reaction and how they are bound
//! together. `ComplexBuilder` groups the molecules into complexes (connected components of
//! the bond graph) and `Rule` pairs the reactant complexes with the product complexes.
//!
//! The textual representation of molecules and complexes follows BNGL conventions, e.g.
//! `A(rR~p,xD!1).B(aD!1)`. Site names are derived from loci: domain `x` becomes `xD`,
//! subdomain `s` becomes `sS` and residue `r` becomes `rR`.

use crate::solver::ComplexityLimitExceeded;
use crate::{Spec, StateModifier};
use fxhash::FxBuildHasher;
use petgraph::unionfind::UnionFind;
use std::collections::{BTreeMap, HashMap};

/// **(internal)** `ComplexBuilder` and the translation of states into sites and bonds.
mod _impl_complex_builder;
/// **(internal)** Molecules, complexes, molecule types and parameters.
mod _impl_mol;
/// **(internal)** Rules and the assembly of a whole `RuleBasedModel`.
mod _impl_rule;
/// **(internal)** Reasons why a reaction has no rules.
mod _impl_grounding_failure;

pub use _impl_rule::rules_for_reaction;

/// Number of molecules of every type in the initial state of the model.
pub const INITIAL_MOLECULE_COUNT: u32 = 100;

/// One molecule of a complex: its component, the values of its modification sites and the
/// bonds of its binding sites (`None` for a free site).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mol {
    spec: Spec,
    site_to_mod: BTreeMap<String, StateModifier>,
    site_to_bond: BTreeMap<String, Option<usize>>,
    is_reactant: bool,
}

/// A group of molecules connected by bonds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Complex {
    mols: Vec<Mol>,
}

/// The type of a molecule: its sites and the values its modification sites can take.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MolDef {
    name: String,
    site_defs: BTreeMap<String, Vec<StateModifier>>,
}

/// A named model parameter.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Parameter {
    name: String,
    value: String,
}

/// Initial amount of a complex.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitialCondition {
    complex: Complex,
    value: Parameter,
}

/// A reaction rule: reactant complexes are turned into product complexes at a given rate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rule {
    lhs: Vec<Complex>,
    rhs: Vec<Complex>,
    rate: Parameter,
    reaction: String,
}

/// Incrementally collects molecules, bonds and modifications and splits them into
/// complexes.
///
/// Molecules are identified by their structured component spec (`A@0`). Bond indices are
/// assigned from `1` in the order in which the bonds are declared.
#[derive(Clone, Debug)]
pub struct ComplexBuilder {
    mols: Vec<Mol>,
    index: HashMap<Spec, usize, FxBuildHasher>,
    groups: UnionFind<usize>,
    bonds: HashMap<(Spec, Spec), usize, FxBuildHasher>,
}

/// Reason why the contingencies of a reaction could not be grounded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GroundingFailure {
    /// The named scopes of the contingencies identify two distinct molecules.
    InconsistentStructure(String),
    /// Too many grounded solutions.
    TooComplex(ComplexityLimitExceeded),
}

/// A complete rule-based model of a reaction system.
///
/// Reactions which could not be grounded have no rules; they are listed in `failures`
/// instead.
#[derive(Clone, Debug)]
pub struct RuleBasedModel {
    mol_defs: Vec<MolDef>,
    initial_conditions: Vec<InitialCondition>,
    rules: Vec<Rule>,
    failures: Vec<(String, GroundingFailure)>,
}

/// BNGL site name of the locus of `spec`.
pub fn site_name(spec: &Spec) -> String {
    let locus = spec.get_locus();
    let mut result = String::new();
    if let Some(domain) = locus.get_domain() {
        result.push_str(domain);
        result.push('D');
    }
    if let Some(subdomain) = locus.get_subdomain() {
        result.push_str(subdomain);
        result.push('S');
    }
    if let Some(residue) = locus.get_residue() {
        result.push_str(residue);
        result.push('R');
    }
    result
}
