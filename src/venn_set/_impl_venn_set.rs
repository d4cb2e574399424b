use crate::venn_set::VennSet::*;
use crate::venn_set::{Literal, Solution, VennSet};
use std::collections::BTreeSet;
use std::fmt::{Display, Error, Formatter};

/// Constructor and destructor utility methods. These mainly avoid unnecessary boxing
/// and degrade n-ary operations with less than two operands.
impl<T: Literal> VennSet<T> {
    pub fn mk_value(value: T) -> VennSet<T> {
        Value(value)
    }

    pub fn mk_complement(inner: VennSet<T>) -> VennSet<T> {
        Complement(Box::new(inner))
    }

    /// Intersection of all `operands`; zero operands give the universal set.
    pub fn mk_intersection(mut operands: Vec<VennSet<T>>) -> VennSet<T> {
        match operands.len() {
            0 => Universal,
            1 => operands.remove(0),
            _ => Intersection(operands),
        }
    }

    /// Union of all `operands`; zero operands give the empty set.
    pub fn mk_union(mut operands: Vec<VennSet<T>>) -> VennSet<T> {
        match operands.len() {
            0 => Empty,
            1 => operands.remove(0),
            _ => Union(operands),
        }
    }

    pub fn mk_universal() -> VennSet<T> {
        Universal
    }

    pub fn mk_empty() -> VennSet<T> {
        Empty
    }

    /// Return the wrapped literal if this is a `Value` leaf.
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Value(value) => Some(value),
            _ => None,
        }
    }

    /// Return the inner expression if this is a `Complement`.
    pub fn as_complement(&self) -> Option<&VennSet<T>> {
        match self {
            Complement(inner) => Some(inner),
            _ => None,
        }
    }

    /// All distinct literals appearing anywhere in this expression.
    pub fn values(&self) -> BTreeSet<T> {
        fn recursion<T: Literal>(set: &VennSet<T>, result: &mut BTreeSet<T>) {
            match set {
                Value(value) => {
                    result.insert(value.clone());
                }
                Complement(inner) => recursion(inner, result),
                Intersection(operands) | Union(operands) => {
                    for operand in operands {
                        recursion(operand, result);
                    }
                }
                Universal | Empty => (),
            }
        }
        let mut result = BTreeSet::new();
        recursion(self, &mut result);
        result
    }

    /// Evaluate membership of the world given by `values`. If some literal is missing and
    /// the result depends on it, the result is `None`.
    pub fn evaluate(&self, values: &Solution<T>) -> Option<bool> {
        match self {
            Value(value) => values.get(value).cloned(),
            Complement(inner) => inner.evaluate(values).map(|it| !it),
            Intersection(operands) => {
                let mut result = Some(true);
                for operand in operands {
                    match operand.evaluate(values) {
                        Some(false) => return Some(false),
                        None => result = None,
                        Some(true) => (),
                    }
                }
                result
            }
            Union(operands) => {
                let mut result = Some(false);
                for operand in operands {
                    match operand.evaluate(values) {
                        Some(true) => return Some(true),
                        None => result = None,
                        Some(false) => (),
                    }
                }
                result
            }
            Universal => Some(true),
            Empty => Some(false),
        }
    }
}

impl<T: Literal + Display> Display for VennSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        fn write_operands<T: Literal + Display>(
            f: &mut Formatter<'_>,
            operands: &[VennSet<T>],
            separator: &str,
        ) -> Result<(), Error> {
            write!(f, "(")?;
            for (i, operand) in operands.iter().enumerate() {
                if i > 0 {
                    write!(f, " {} ", separator)?;
                }
                write!(f, "{}", operand)?;
            }
            write!(f, ")")
        }

        match self {
            Value(value) => write!(f, "{}", value),
            Complement(inner) => write!(f, "!{}", inner),
            Intersection(operands) => write_operands(f, operands, "&"),
            Union(operands) => write_operands(f, operands, "|"),
            Universal => write!(f, "true"),
            Empty => write!(f, "false"),
        }
    }
}
