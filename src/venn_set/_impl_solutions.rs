use crate::util::build_index_map;
use crate::venn_set::VennSet::*;
use crate::venn_set::{ComplexityLimitExceeded, Literal, Solution, VennSet};
use biodivine_lib_bdd::{Bdd, BddVariable, BddVariableSet};
use num_traits::ToPrimitive;
use std::collections::HashMap;
use std::convert::TryFrom;

/// **(internal)** A symbolic encoding of a `VennSet` over a fixed list of literals.
struct SymbolicEncoding<T: Literal> {
    literals: Vec<T>,
    variables: Vec<BddVariable>,
    bdd: Bdd,
}

impl<T: Literal> SymbolicEncoding<T> {
    /// Encode `sets` using one BDD variable per literal in `literals`.
    fn encode_all(literals: Vec<T>, sets: &[&VennSet<T>]) -> (BddVariableSet, Vec<Bdd>) {
        let num_vars = u16::try_from(literals.len())
            .unwrap_or_else(|_| panic!("Too many literals: {}.", literals.len()));
        let context = BddVariableSet::new_anonymous(num_vars);
        let variables = context.variables();
        let mapping = build_index_map(&literals, |_, i| variables[i]);
        let bdds = sets
            .iter()
            .map(|set| Self::encode(&context, &mapping, set))
            .collect();
        (context, bdds)
    }

    fn encode(
        context: &BddVariableSet,
        mapping: &HashMap<T, BddVariable>,
        set: &VennSet<T>,
    ) -> Bdd {
        match set {
            Value(value) => context.mk_var(mapping[value]),
            Complement(inner) => Self::encode(context, mapping, inner).not(),
            Intersection(operands) => operands.iter().fold(context.mk_true(), |acc, it| {
                acc.and(&Self::encode(context, mapping, it))
            }),
            Union(operands) => operands.iter().fold(context.mk_false(), |acc, it| {
                acc.or(&Self::encode(context, mapping, it))
            }),
            Universal => context.mk_true(),
            Empty => context.mk_false(),
        }
    }

    fn of_set(set: &VennSet<T>) -> SymbolicEncoding<T> {
        let literals: Vec<T> = set.values().into_iter().collect();
        let (context, mut bdds) = Self::encode_all(literals.clone(), &[set]);
        SymbolicEncoding {
            literals,
            variables: context.variables(),
            bdd: bdds.remove(0),
        }
    }

    /// Number of satisfying assignments, `None` if it does not fit into `usize`.
    fn cardinality(&self) -> Option<usize> {
        if self.literals.is_empty() {
            Some(usize::from(self.bdd.is_true()))
        } else {
            self.bdd.exact_cardinality().to_usize()
        }
    }

    fn solutions(&self) -> Vec<Solution<T>> {
        if self.literals.is_empty() {
            return if self.bdd.is_true() {
                vec![Solution::new()]
            } else {
                Vec::new()
            };
        }
        self.bdd
            .sat_valuations()
            .map(|valuation| {
                self.literals
                    .iter()
                    .zip(self.variables.iter())
                    .map(|(literal, var)| (literal.clone(), valuation.value(*var)))
                    .collect()
            })
            .collect()
    }
}

impl<T: Literal> VennSet<T> {
    /// Two expressions are equivalent if they denote the same set of worlds, i.e. they
    /// admit exactly the same assignments over the union of their literals.
    pub fn is_equivalent_to(&self, other: &VennSet<T>) -> bool {
        let mut literals = self.values();
        literals.extend(other.values());
        let literals = literals.into_iter().collect();
        let (_, bdds) = SymbolicEncoding::encode_all(literals, &[self, other]);
        bdds[0].xor(&bdds[1]).is_false()
    }

    /// True if no world belongs to this set.
    pub fn is_unsatisfiable(&self) -> bool {
        SymbolicEncoding::of_set(self).bdd.is_false()
    }

    /// Number of satisfying assignments over the literals of this expression (`None` if it
    /// does not fit into `usize`).
    pub fn cardinality(&self) -> Option<usize> {
        SymbolicEncoding::of_set(self).cardinality()
    }

    /// Enumerate all assignments of the literals of this expression (every literal is
    /// present in every assignment) for which the expression holds.
    ///
    /// An expression without literals has a single empty solution if it is universal
    /// and no solutions otherwise. Solutions are returned in a deterministic order.
    pub fn calc_solutions(&self) -> Vec<Solution<T>> {
        let mut solutions = SymbolicEncoding::of_set(self).solutions();
        solutions.sort();
        solutions
    }

    /// Same as `calc_solutions`, but fails instead of materializing more than `limit`
    /// solutions.
    pub fn calc_solutions_with_limit(
        &self,
        limit: usize,
    ) -> Result<Vec<Solution<T>>, ComplexityLimitExceeded> {
        let encoding = SymbolicEncoding::of_set(self);
        match encoding.cardinality() {
            Some(count) if count <= limit => {
                let mut solutions = encoding.solutions();
                solutions.sort();
                Ok(solutions)
            }
            _ => Err(ComplexityLimitExceeded::new(limit)),
        }
    }
}
