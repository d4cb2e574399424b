use crate::StateModifier;
use std::convert::TryFrom;
use std::fmt::{Display, Error, Formatter};

impl StateModifier {
    /// All modifier values, in declaration order.
    pub const ALL: [StateModifier; 5] = [
        StateModifier::Unmodified,
        StateModifier::Phosphorylated,
        StateModifier::Ubiquitinated,
        StateModifier::Guanylated,
        StateModifier::Truncated,
    ];

    pub fn is_neutral(&self) -> bool {
        *self == StateModifier::Unmodified
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StateModifier::Unmodified => "0",
            StateModifier::Phosphorylated => "p",
            StateModifier::Ubiquitinated => "ub",
            StateModifier::Guanylated => "gtp",
            StateModifier::Truncated => "truncated",
        }
    }
}

impl TryFrom<&str> for StateModifier {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        StateModifier::ALL
            .into_iter()
            .find(|it| it.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| format!("Unknown state modifier `{}`.", value))
    }
}

impl Display for StateModifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::StateModifier;
    use std::convert::TryFrom;

    #[test]
    fn modifier_parsing() {
        for modifier in StateModifier::ALL {
            assert_eq!(
                modifier,
                StateModifier::try_from(modifier.to_string().as_str()).unwrap()
            );
        }
        assert_eq!(
            StateModifier::Phosphorylated,
            StateModifier::try_from("P").unwrap()
        );
        assert!(StateModifier::try_from("methyl").is_err());
        assert!(StateModifier::Unmodified.is_neutral());
        assert!(!StateModifier::Truncated.is_neutral());
    }
}
