//! A library for grounding rxncon regulatory contingencies into concrete model states.
//!
//! An rxncon system consists of *reactions* (e.g. `A_ppi+_B`) and *contingencies* which
//! describe the conditions under which a reaction takes place (e.g. `A_ppi+_B; x A_[(r)]-{p}`).
//! A contingency is a Boolean formula over abstract molecular *states* (an `Effector`).
//! Before a rule-based (or Boolean) model can be generated, every such formula has to be
//! resolved into fully concrete combinations of states, where each molecule reference carries
//! a *structural index* and no two states contradict each other.
//!
//! The crate is organised bottom-up:
//!
//!  - The entity model (`Locus`, `Spec`, `State`, `Effector`, `Contingency`, `Reaction`) is
//!    declared in this module.
//!  - [venn_set] implements the symbolic set algebra (simplification, DNF, solutions).
//!  - [struct_equivalences] resolves structural identity across named Boolean scopes.
//!  - [solver] expands Boolean assignments into grounded, mutually consistent state lists.
//!  - [rule_based] groups grounded states into complexes and reaction rules.
//!  - [state_flow] splits contingency sets into source/target state flows.

use lazy_static::lazy_static;
use regex::Regex;

pub mod rule_based;
pub mod solver;
pub mod state_flow;
pub mod struct_equivalences;
pub mod traits;
pub mod util;
pub mod venn_set;

/// **(internal)** Utility methods for `Contingency` and `ContingencyType`.
mod _impl_contingency;
/// **(internal)** Utility methods for `Effector`, including the translation into `VennSet`.
mod _impl_effector;
/// **(internal)** Utility methods and parsing of `Locus`.
mod _impl_locus;
/// **(internal)** Utility methods for `BooleanContingencyName` and `QualSpec`.
mod _impl_qual_spec;
/// **(internal)** Utility methods for `Reaction` and `ReactionTerm`.
mod _impl_reaction;
/// **(internal)** Implementation of the `RxnConSystem` entity model.
mod _impl_rxncon_system;
/// **(internal)** Utility methods and parsing of `Spec`.
mod _impl_spec;
/// **(internal)** Utility methods, parsing and mutual exclusivity of `State`.
mod _impl_state;
/// **(internal)** Utility methods and parsing of `StateModifier`.
mod _impl_state_modifier;

lazy_static! {
    /// A valid component name (alphanumeric, the `_` character is reserved as a locus separator).
    static ref COMPONENT_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9]+$").unwrap();
    /// A valid domain, subdomain or residue token.
    static ref LOCUS_TOKEN_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_:]+$").unwrap();
    /// A valid name of a Boolean contingency (namespace token).
    static ref BOOLEAN_NAME_REGEX: Regex = Regex::new(r"^<[a-zA-Z0-9_]+>$").unwrap();
}

/// Resolution at which a `Locus` (and hence a `Spec`) addresses a molecule.
///
/// The order of the variants follows the specificity: a `Residue` locus is more specific
/// than a `Domain` locus.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum LocusResolution {
    Component,
    Domain,
    Subdomain,
    Residue,
}

/// Addressing within a molecule: an optional domain, subdomain and residue.
///
/// A subdomain can only be given together with a domain. The string representation follows
/// the rxncon conventions: `d`, `d/s`, `d/s(r)`, `d(r)` or `(r)`.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Locus {
    domain: Option<String>,
    subdomain: Option<String>,
    residue: Option<String>,
}

/// The type of molecule referenced by a `Spec`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SpecKind {
    Dna,
    MRna,
    Protein,
}

/// Identifies a molecular entity (or a part of it, depending on the `Locus`).
///
/// The optional `struct_index` disambiguates otherwise identical references once the
/// entity is grounded in a concrete complex (`A@0` and `A@1` are two different molecules
/// of `A`). Note that a spec with an index is never equal to its unindexed counterpart,
/// the two can only be unified through the `struct_equivalences` machinery.
///
/// String format: `Name[mRNA|DNA][@index][_[locus]]`, for example `A@0_[d/s(r)]`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Spec {
    component_name: String,
    kind: SpecKind,
    struct_index: Option<u32>,
    locus: Locus,
}

/// Possible values of a covalent modification.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum StateModifier {
    Unmodified,
    Phosphorylated,
    Ubiquitinated,
    Guanylated,
    Truncated,
}

/// An atomic proposition about one or two `Spec`s.
///
///  - `Interaction`: `A_[x]--B_[y]`, two sites bound together. The two specs are stored
///    in a canonical order, so `A--B` and `B--A` are the same state.
///  - `SelfInteraction`: `A_[x]--[y]`, two sites of the same molecule bound together.
///  - `EmptyBinding`: `A_[x]--0`, a free binding site.
///  - `Modification`: `A_[(r)]-{p}`, a residue carrying a modification.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum State {
    Interaction(Spec, Spec),
    SelfInteraction(Spec, Spec),
    EmptyBinding(Spec),
    Modification(Spec, StateModifier),
}

/// Name of a Boolean contingency (e.g. `<comp>`), used as a namespace token.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BooleanContingencyName(String);

/// A `Spec` qualified by the namespace (path of Boolean contingency names) it was
/// referenced from. String format: `<a>.<b>.A_[x]`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct QualSpec {
    namespace: Vec<BooleanContingencyName>,
    spec: Spec,
}

/// A Boolean formula over `State`s describing a regulatory condition.
///
/// A `Named` node opens a new namespace scope for the specs referenced below it. It also
/// carries the declared identity *bridges* of the scope: pairs of an outer `QualSpec`
/// (relative to the enclosing scope) and an inner `QualSpec` (relative to the named scope)
/// which denote the same molecule.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Effector {
    State(State),
    Not(Box<Effector>),
    And(Vec<Effector>),
    Or(Vec<Effector>),
    Named(
        BooleanContingencyName,
        Vec<(QualSpec, QualSpec)>,
        Box<Effector>,
    ),
}

/// The regulatory role of a `Contingency`.
///
/// Requirements (`!`) and inhibitions (`x`) are strict, positive (`k+`) and negative (`k-`)
/// contingencies only influence the rate of a reaction.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ContingencyType {
    Requirement,
    Inhibition,
    Positive,
    Negative,
}

/// A regulatory condition attached to a reaction (identified by its name).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Contingency {
    reaction: String,
    contingency_type: ContingencyType,
    effector: Effector,
}

/// One reactant (or product) of a `Reaction`: the component specs forming it and the
/// states it is in.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ReactionTerm {
    specs: Vec<Spec>,
    states: Vec<State>,
}

/// An elemental reaction, given by its left- and right-hand side terms.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Reaction {
    name: String,
    terms_lhs: Vec<ReactionTerm>,
    terms_rhs: Vec<ReactionTerm>,
}

/// A collection of reactions together with their contingencies. This is the entity model
/// that the rest of the crate consumes through the traits in [traits].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RxnConSystem {
    reactions: Vec<Reaction>,
    contingencies: Vec<Contingency>,
}
