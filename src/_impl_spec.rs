use crate::{Locus, LocusResolution, Spec, SpecKind, COMPONENT_REGEX};
use std::convert::TryFrom;
use std::fmt::{Display, Error, Formatter};

impl SpecKind {
    /// The suffix appended to a component name in the string representation.
    pub fn suffix(&self) -> &'static str {
        match self {
            SpecKind::Dna => "DNA",
            SpecKind::MRna => "mRNA",
            SpecKind::Protein => "",
        }
    }
}

impl Spec {
    /// Create a new `Spec`, validating the component name.
    pub fn new(
        kind: SpecKind,
        component_name: &str,
        struct_index: Option<u32>,
        locus: Locus,
    ) -> Result<Spec, String> {
        if !COMPONENT_REGEX.is_match(component_name) {
            return Err(format!("Invalid component name `{}`.", component_name));
        }
        Ok(Spec {
            component_name: component_name.to_string(),
            kind,
            struct_index,
            locus,
        })
    }

    /// Shorthand for an unstructured, component-level protein spec.
    pub fn protein(component_name: &str) -> Result<Spec, String> {
        Spec::new(SpecKind::Protein, component_name, None, Locus::empty())
    }

    pub fn get_component_name(&self) -> &str {
        &self.component_name
    }

    pub fn get_kind(&self) -> SpecKind {
        self.kind
    }

    pub fn get_struct_index(&self) -> Option<u32> {
        self.struct_index
    }

    pub fn get_locus(&self) -> &Locus {
        &self.locus
    }

    pub fn resolution(&self) -> LocusResolution {
        self.locus.resolution()
    }

    pub fn is_structured(&self) -> bool {
        self.struct_index.is_some()
    }

    pub fn is_component_spec(&self) -> bool {
        self.locus.is_empty()
    }

    /// The same entity at component resolution (struct index is preserved).
    pub fn to_component_spec(&self) -> Spec {
        self.with_locus(Locus::empty())
    }

    /// The same spec without a struct index.
    pub fn to_non_struct_spec(&self) -> Spec {
        Spec {
            struct_index: None,
            ..self.clone()
        }
    }

    pub fn with_struct_index(&self, struct_index: u32) -> Spec {
        Spec {
            struct_index: Some(struct_index),
            ..self.clone()
        }
    }

    pub fn with_locus(&self, locus: Locus) -> Spec {
        Spec {
            locus,
            ..self.clone()
        }
    }

    /// True if both specs reference the same entity (name, kind and struct index).
    pub fn is_same_entity(&self, other: &Spec) -> bool {
        self.kind == other.kind
            && self.struct_index == other.struct_index
            && self.component_name == other.component_name
    }

    /// A sub-spec addresses a (non-strict) part of the same entity as its super-spec.
    pub fn is_subspec_of(&self, other: &Spec) -> bool {
        self.is_same_entity(other) && self.locus.is_sublocus_of(&other.locus)
    }

    pub fn is_superspec_of(&self, other: &Spec) -> bool {
        other.is_subspec_of(self)
    }

    /// Both specs address the same site of the same entity, see `Locus::overlaps_with`.
    pub fn overlaps_with(&self, other: &Spec) -> bool {
        self.is_same_entity(other) && self.locus.overlaps_with(&other.locus)
    }
}

impl TryFrom<&str> for Spec {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        let (name, locus) = match value.split_once('_') {
            None => (value, Locus::empty()),
            Some((name, locus)) => {
                if !locus.starts_with('[') || !locus.ends_with(']') {
                    return Err(format!("Expected `[locus]` in spec string `{}`.", value));
                }
                (name, Locus::try_from(&locus[1..locus.len() - 1])?)
            }
        };
        let (name, struct_index) = match name.split_once('@') {
            None => (name, None),
            Some((name, index)) => {
                let index = index
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid struct index in spec string `{}`.", value))?;
                (name, Some(index))
            }
        };
        let kind = [SpecKind::MRna, SpecKind::Dna, SpecKind::Protein]
            .into_iter()
            .find(|kind| name.ends_with(kind.suffix()))
            .unwrap_or(SpecKind::Protein);
        let name = &name[..name.len() - kind.suffix().len()];
        Spec::new(kind, name, struct_index, locus)
    }
}

impl Display for Spec {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}{}", self.component_name, self.kind.suffix())?;
        if let Some(index) = self.struct_index {
            write!(f, "@{}", index)?;
        }
        if !self.locus.is_empty() {
            write!(f, "_[{}]", self.locus)?;
        }
        Ok(())
    }
}
