use crate::venn_set::VennSet::*;
use crate::venn_set::{Literal, VennSet};

impl<T: Literal> VennSet<T> {
    /// Rewrite the expression using standard Boolean identities:
    ///
    ///  - double complement elimination and complements of constants;
    ///  - flattening of nested intersections (unions);
    ///  - removal of identity elements and absorption by annihilators;
    ///  - idempotence (duplicate operands are removed, the rest is sorted);
    ///  - complementation (`x & !x = false`, `x | !x = true`).
    ///
    /// The result is a fixed point: simplifying it again returns the same expression.
    pub fn simplify(&self) -> VennSet<T> {
        match self {
            Value(_) | Universal | Empty => self.clone(),
            Complement(inner) => match inner.simplify() {
                Universal => Empty,
                Empty => Universal,
                Complement(inner) => *inner,
                inner => VennSet::mk_complement(inner),
            },
            Intersection(operands) => Self::simplify_operands(operands, true),
            Union(operands) => Self::simplify_operands(operands, false),
        }
    }

    /// **(internal)** Simplify operands of an intersection (or a union if `is_intersection`
    /// is false).
    fn simplify_operands(operands: &[VennSet<T>], is_intersection: bool) -> VennSet<T> {
        let (identity, annihilator) = if is_intersection {
            (Universal, Empty)
        } else {
            (Empty, Universal)
        };

        let mut result: Vec<VennSet<T>> = Vec::new();
        for operand in operands {
            let operand = operand.simplify();
            let flattened = match operand {
                Intersection(inner) if is_intersection => inner,
                Union(inner) if !is_intersection => inner,
                operand => vec![operand],
            };
            for operand in flattened {
                if operand == annihilator {
                    return annihilator;
                }
                if operand != identity {
                    result.push(operand);
                }
            }
        }
        result.sort();
        result.dedup();

        let is_complemented = result.iter().any(|operand| match operand {
            Complement(inner) => result.binary_search(inner).is_ok(),
            _ => false,
        });
        if is_complemented {
            return annihilator;
        }

        if is_intersection {
            VennSet::mk_intersection(result)
        } else {
            VennSet::mk_union(result)
        }
    }
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
    fn simplify_rules() {
        assert_eq!(VennSet::mk_empty(), not(VennSet::<&str>::mk_universal()).simplify());
        assert_eq!(VennSet::mk_universal(), not(VennSet::<&str>::mk_empty()).simplify());
        assert_eq!(v("a"), not(not(v("a"))).simplify());
        assert_eq!(not(v("b")), not(not(not(v("b")))).simplify());
        assert_eq!(
            VennSet::Intersection(vec![v("a"), v("b")]),
            VennSet::Intersection(vec![v("b"), VennSet::Intersection(vec![v("a"), v("b")])])
                .simplify()
        );
        assert_eq!(
            v("a"),
            VennSet::Union(vec![v("a"), VennSet::mk_empty(), v("a")]).simplify()
        );
        assert_eq!(
            VennSet::mk_empty(),
            VennSet::Intersection(vec![v("b"), not(v("b")), v("c")]).simplify()
        );
        assert_eq!(
            VennSet::mk_universal(),
            VennSet::Union(vec![v("a"), not(v("a"))]).simplify()
        );
        assert_eq!(
            VennSet::mk_universal(),
            VennSet::Union(vec![v("d"), VennSet::mk_universal()]).simplify()
        );
        assert_eq!(VennSet::<&str>::mk_universal(), VennSet::Intersection(vec![]).simplify());
    }

    #[test]
    fn simplify_is_idempotent() {
        for set in test_corpus() {
            let once = set.simplify();
            assert_eq!(once, once.simplify());
        }
    }

    #[test]
    fn simplify_preserves_denotation() {
        for set in test_corpus() {
            assert!(set.is_equivalent_to(&set.simplify()), "Changed: {}", set);
        }
    }
}
