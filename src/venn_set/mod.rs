//! Symbolic set algebra over an opaque literal type.
//!
//! A `VennSet` denotes the set of "worlds" (Boolean assignments of its literals) in which
//! the expression holds. All transformations in this module (`simplify`, `to_dnf_list`)
//! change only the syntactic form of an expression, never the denoted set.
//!
//! Semantic queries (`is_equivalent_to`, `calc_solutions`) are answered using BDDs from
//! `biodivine-lib-bdd`: every literal of the expression is mapped to one BDD variable and
//! the whole expression is translated into a single `Bdd`.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

/// **(internal)** Constructors, evaluation and display of `VennSet`.
mod _impl_venn_set;
/// **(internal)** Boolean simplification of `VennSet` expressions.
mod _impl_simplify;
/// **(internal)** Negation normal form and disjunctive normal form of `VennSet` expressions.
mod _impl_dnf;
/// **(internal)** BDD based equivalence checking and solution enumeration.
mod _impl_solutions;

mod error;

pub use error::ComplexityLimitExceeded;

/// Anything that can appear as a leaf of a `VennSet`.
pub trait Literal: Clone + Debug + Eq + Hash + Ord {}

impl<T: Clone + Debug + Eq + Hash + Ord> Literal for T {}

/// One satisfying assignment of the literals of a `VennSet`.
pub type Solution<T> = BTreeMap<T, bool>;

/// An expression of the set algebra.
///
/// Use the `mk_*` constructors to build expressions: an intersection (union) with zero
/// operands degrades to the universal (empty) set and a single operand to the operand
/// itself. Variants constructed directly are still valid, but some of them are not in this
/// normalised form.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum VennSet<T: Literal> {
    Value(T),
    Complement(Box<VennSet<T>>),
    Intersection(Vec<VennSet<T>>),
    Union(Vec<VennSet<T>>),
    Universal,
    Empty,
}

/// A small corpus of expressions covering all simplification rules, shared by the tests
/// of this module.
#[cfg(test)]
pub(crate) fn test_corpus() -> Vec<VennSet<&'static str>> {
    fn v(name: &'static str) -> VennSet<&'static str> {
        VennSet::mk_value(name)
    }
    fn not(set: VennSet<&'static str>) -> VennSet<&'static str> {
        VennSet::mk_complement(set)
    }
    vec![
        v("a"),
        not(VennSet::mk_universal()),
        not(not(v("a"))),
        not(not(not(v("b")))),
        VennSet::Intersection(vec![v("a"), VennSet::Intersection(vec![v("b"), v("a")])]),
        VennSet::Union(vec![v("a"), VennSet::mk_empty(), not(v("a"))]),
        VennSet::Intersection(vec![v("b"), not(v("b")), v("c")]),
        VennSet::Union(vec![
            VennSet::Intersection(vec![v("a"), VennSet::mk_universal()]),
            VennSet::Union(vec![v("c"), not(VennSet::Union(vec![v("a"), v("b")]))]),
        ]),
        VennSet::Intersection(vec![
            VennSet::Union(vec![v("a"), v("b")]),
            not(VennSet::Intersection(vec![v("a"), v("c")])),
            VennSet::Union(vec![not(v("b")), v("c")]),
        ]),
        VennSet::Intersection(vec![VennSet::Union(vec![VennSet::Intersection(vec![
            v("a"),
            v("b"),
        ])])]),
        VennSet::Union(vec![]),
        VennSet::Intersection(vec![]),
        VennSet::Union(vec![VennSet::mk_universal(), v("d")]),
        not(VennSet::Union(vec![
            VennSet::Intersection(vec![v("a"), not(v("d"))]),
            VennSet::Intersection(vec![v("b"), v("c"), v("d")]),
        ])),
    ]
}
