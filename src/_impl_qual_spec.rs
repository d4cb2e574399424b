use crate::{BooleanContingencyName, QualSpec, Spec, BOOLEAN_NAME_REGEX};
use std::convert::TryFrom;
use std::fmt::{Display, Error, Formatter};

impl BooleanContingencyName {
    /// Create a new name, which must have the form `<name>`.
    pub fn new(name: &str) -> Result<BooleanContingencyName, String> {
        if BOOLEAN_NAME_REGEX.is_match(name) {
            Ok(BooleanContingencyName(name.to_string()))
        } else {
            Err(format!("Invalid boolean contingency name `{}`.", name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for BooleanContingencyName {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        BooleanContingencyName::new(value.trim())
    }
}

impl Display for BooleanContingencyName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.0)
    }
}

impl QualSpec {
    pub fn new(namespace: Vec<BooleanContingencyName>, spec: Spec) -> QualSpec {
        QualSpec { namespace, spec }
    }

    /// A spec in the root (empty) namespace.
    pub fn root(spec: Spec) -> QualSpec {
        QualSpec::new(Vec::new(), spec)
    }

    pub fn get_namespace(&self) -> &[BooleanContingencyName] {
        &self.namespace
    }

    pub fn get_spec(&self) -> &Spec {
        &self.spec
    }

    pub fn has_trivial_namespace(&self) -> bool {
        self.namespace.is_empty()
    }

    pub fn to_component_qual_spec(&self) -> QualSpec {
        QualSpec::new(self.namespace.clone(), self.spec.to_component_spec())
    }

    /// Move this spec into a scope nested under `prefix`.
    pub fn with_prepended_namespace(&self, prefix: &[BooleanContingencyName]) -> QualSpec {
        let mut namespace = prefix.to_vec();
        namespace.extend(self.namespace.iter().cloned());
        QualSpec::new(namespace, self.spec.clone())
    }
}

impl TryFrom<&str> for QualSpec {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut namespace = Vec::new();
        let mut rest = value.trim();
        while rest.starts_with('<') {
            let end = rest
                .find(">.")
                .ok_or_else(|| format!("Invalid qualified spec `{}`.", value))?;
            namespace.push(BooleanContingencyName::new(&rest[..=end])?);
            rest = &rest[end + 2..];
        }
        Ok(QualSpec::new(namespace, Spec::try_from(rest)?))
    }
}

impl Display for QualSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        for name in &self.namespace {
            write!(f, "{}.", name)?;
        }
        write!(f, "{}", self.spec)
    }
}
