use crate::venn_set::VennSet::*;
use crate::venn_set::{ComplexityLimitExceeded, Literal, Solution, VennSet};

impl<T: Literal> VennSet<T> {
    /// Transform the expression into a list of intersection-only terms whose union is
    /// equivalent to this expression. Every term is an intersection of literals and
    /// complemented literals (or the universal set for an empty term).
    ///
    /// Contradictory terms (containing both `x` and `!x`) and duplicate terms are dropped,
    /// hence `Universal` gives `[Universal]` and `Empty` gives an empty list.
    pub fn to_dnf_list(&self) -> Vec<VennSet<T>> {
        // No list longer than `usize::MAX` can be built, so the limit is never reached.
        match self.to_dnf_list_with_limit(usize::MAX) {
            Ok(terms) => terms,
            Err(error) => unreachable!("{}", error),
        }
    }

    /// Same as `to_dnf_list`, but fails instead of building more than `limit` terms at
    /// any stage of the distribution.
    pub fn to_dnf_list_with_limit(
        &self,
        limit: usize,
    ) -> Result<Vec<VennSet<T>>, ComplexityLimitExceeded> {
        let mut clauses: Vec<Solution<T>> = Vec::new();
        for clause in Self::dnf_clauses(self, false, limit)? {
            if !clauses.contains(&clause) {
                clauses.push(clause);
            }
        }
        let terms = clauses
            .into_iter()
            .map(|clause| {
                let literals = clause
                    .into_iter()
                    .map(|(value, polarity)| {
                        if polarity {
                            VennSet::mk_value(value)
                        } else {
                            VennSet::mk_complement(VennSet::mk_value(value))
                        }
                    })
                    .collect();
                VennSet::mk_intersection(literals)
            })
            .collect();
        Ok(terms)
    }

    /// The union of all `to_dnf_list` terms.
    pub fn to_dnf(&self) -> VennSet<T> {
        VennSet::mk_union(self.to_dnf_list())
    }

    /// **(internal)** Compute DNF clauses of `set` (or its complement if `invert` is set).
    ///
    /// Negation is pushed towards the leaves on the fly, conjunctions are distributed
    /// over disjunctions as a cartesian product of operand clauses. Fails as soon as
    /// an intermediate list has more than `limit` clauses.
    fn dnf_clauses(
        set: &VennSet<T>,
        invert: bool,
        limit: usize,
    ) -> Result<Vec<Solution<T>>, ComplexityLimitExceeded> {
        let clauses = match set {
            Value(value) => {
                let mut clause = Solution::new();
                clause.insert(value.clone(), !invert);
                vec![clause]
            }
            Complement(inner) => Self::dnf_clauses(inner, !invert, limit)?,
            Universal | Empty => {
                if (*set == Universal) != invert {
                    vec![Solution::new()]
                } else {
                    Vec::new()
                }
            }
            Intersection(operands) | Union(operands) => {
                let is_conjunction = matches!(set, Intersection(_)) != invert;
                if is_conjunction {
                    let mut result = vec![Solution::new()];
                    for operand in operands {
                        let operand_clauses = Self::dnf_clauses(operand, invert, limit)?;
                        let mut product = Vec::new();
                        for left in &result {
                            for right in &operand_clauses {
                                if let Some(clause) = merge_clauses(left, right) {
                                    if product.len() == limit {
                                        return Err(ComplexityLimitExceeded::new(limit));
                                    }
                                    product.push(clause);
                                }
                            }
                        }
                        result = product;
                        if result.is_empty() {
                            break;
                        }
                    }
                    result
                } else {
                    let mut result = Vec::new();
                    for operand in operands {
                        result.extend(Self::dnf_clauses(operand, invert, limit)?);
                        if result.len() > limit {
                            return Err(ComplexityLimitExceeded::new(limit));
                        }
                    }
                    result
                }
            }
        };
        if clauses.len() > limit {
            return Err(ComplexityLimitExceeded::new(limit));
        }
        Ok(clauses)
    }
}

/// **(internal)** Conjunction of two clauses, or `None` if they contradict each other.
fn merge_clauses<T: Literal>(left: &Solution<T>, right: &Solution<T>) -> Option<Solution<T>> {
    let mut result = left.clone();
    for (value, polarity) in right {
        if let Some(existing) = result.insert(value.clone(), *polarity) {
            if existing != *polarity {
                return None;
            }
        }
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use crate::venn_set::{test_corpus, VennSet};
    use pretty_assertions::assert_eq;

    fn v(name: &'static str) -> VennSet<&'static str> {
        VennSet::mk_value(name)
    }

    fn not(set: VennSet<&'static str>) -> VennSet<&'static str> {
        VennSet::mk_complement(set)
    }

    #[test]
    fn dnf_of_constants() {
        assert_eq!(
            Vec::<VennSet<&str>>::new(),
            VennSet::<&str>::mk_empty().to_dnf_list()
        );
        assert_eq!(
            vec![VennSet::<&str>::mk_universal()],
            VennSet::<&str>::mk_universal().to_dnf_list()
        );
        // !true == false
        let complement = not(VennSet::mk_universal());
        assert_eq!(VennSet::mk_empty(), complement.simplify());
        assert!(complement.to_dnf_list().is_empty());
    }

    #[test]
    fn dnf_distribution() {
        // (a | b) & !(a & c)  ==  (a & !c) | (b & !a) | (b & !c)
        let set = VennSet::mk_intersection(vec![
            VennSet::mk_union(vec![v("a"), v("b")]),
            not(VennSet::mk_intersection(vec![v("a"), v("c")])),
        ]);
        let expected = vec![
            VennSet::Intersection(vec![v("a"), not(v("c"))]),
            VennSet::Intersection(vec![not(v("a")), v("b")]),
            VennSet::Intersection(vec![v("b"), not(v("c"))]),
        ];
        assert_eq!(expected, set.to_dnf_list());
    }

    #[test]
    fn dnf_drops_contradictions_and_duplicates() {
        let set = VennSet::mk_intersection(vec![
            VennSet::mk_union(vec![v("a"), v("b")]),
            VennSet::mk_union(vec![not(v("a")), v("b")]),
        ]);
        // a & !a is dropped, b & b collapses to b, a & b and !a & b are kept.
        let expected = vec![
            VennSet::Intersection(vec![v("a"), v("b")]),
            VennSet::Intersection(vec![not(v("a")), v("b")]),
            v("b"),
        ];
        assert_eq!(expected, set.to_dnf_list());
    }

    #[test]
    fn dnf_is_sound() {
        for set in test_corpus() {
            let dnf = set.to_dnf_list();
            for term in &dnf {
                let is_literal = |it: &VennSet<&str>| {
                    it.as_value().is_some()
                        || it.as_complement().and_then(|it| it.as_value()).is_some()
                };
                let is_term = match term {
                    VennSet::Intersection(operands) => operands.iter().all(is_literal),
                    VennSet::Universal => true,
                    other => is_literal(other),
                };
                assert!(is_term, "Not a DNF term: {}", term);
            }
            assert!(set.is_equivalent_to(&VennSet::mk_union(dnf)), "{}", set);
        }
    }

    #[test]
    fn dnf_with_limit() {
        // (a | b) & (c | d) & (e | f) has 8 terms.
        let set = VennSet::mk_intersection(vec![
            VennSet::mk_union(vec![v("a"), v("b")]),
            VennSet::mk_union(vec![v("c"), v("d")]),
            VennSet::mk_union(vec![v("e"), v("f")]),
        ]);
        assert_eq!(8, set.to_dnf_list_with_limit(8).unwrap().len());
        assert_eq!(set.to_dnf_list(), set.to_dnf_list_with_limit(8).unwrap());
        assert!(set.to_dnf_list_with_limit(7).is_err());
        assert!(set.to_dnf_list_with_limit(0).is_err());
        // Contradictory terms are dropped before they count.
        let contradiction = VennSet::mk_intersection(vec![v("a"), not(v("a"))]);
        assert!(contradiction.to_dnf_list_with_limit(0).unwrap().is_empty());
    }
}
