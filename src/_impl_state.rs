use crate::{Locus, Spec, State, StateModifier};
use lazy_static::lazy_static;
use regex::Regex;
use std::convert::TryFrom;
use std::fmt::{Display, Error, Formatter};

lazy_static! {
    static ref MODIFICATION_STATE: Regex = Regex::new(r"^(?P<s>.+)-\{(?P<m>\w+)\}$").unwrap();
    static ref EMPTY_BINDING_STATE: Regex = Regex::new(r"^(?P<s>.+)--0$").unwrap();
    static ref SELF_INTERACTION_STATE: Regex =
        Regex::new(r"^(?P<s>[^-]+)--\[(?P<l>[^\]]*)\]$").unwrap();
    static ref INTERACTION_STATE: Regex = Regex::new(r"^(?P<a>[^-]+)--(?P<b>[^-]+)$").unwrap();
}

impl State {
    /// Create an interaction between two binding sites. The specs are stored in canonical
    /// order, so the result does not depend on the order of arguments.
    pub fn mk_interaction(first: Spec, second: Spec) -> State {
        if first <= second {
            State::Interaction(first, second)
        } else {
            State::Interaction(second, first)
        }
    }

    /// Create an intra-molecular interaction between two sites of the same entity.
    pub fn mk_self_interaction(first: Spec, second: Spec) -> Result<State, String> {
        if !first.is_same_entity(&second) {
            return Err(format!(
                "Self-interaction between different entities `{}` and `{}`.",
                first, second
            ));
        }
        Ok(State::SelfInteraction(first, second))
    }

    pub fn mk_empty_binding(site: Spec) -> State {
        State::EmptyBinding(site)
    }

    /// Create a modification state. The spec must be resolved to a residue.
    pub fn mk_modification(site: Spec, modifier: StateModifier) -> Result<State, String> {
        if site.get_locus().get_residue().is_none() {
            return Err(format!(
                "Modification `{}` requires a residue-level spec, got `{}`.",
                modifier, site
            ));
        }
        Ok(State::Modification(site, modifier))
    }

    /// All specs referenced by this state, in positional order.
    pub fn specs(&self) -> Vec<&Spec> {
        match self {
            State::Interaction(a, b) | State::SelfInteraction(a, b) => vec![a, b],
            State::EmptyBinding(s) | State::Modification(s, _) => vec![s],
        }
    }

    /// Component-level specs of the referenced entities, without duplicates.
    pub fn components(&self) -> Vec<Spec> {
        let mut result: Vec<Spec> = Vec::new();
        for spec in self.specs() {
            let component = spec.to_component_spec();
            if !result.contains(&component) {
                result.push(component);
            }
        }
        result
    }

    pub fn is_structured(&self) -> bool {
        self.specs().iter().all(|it| it.is_structured())
    }

    pub fn is_binding(&self) -> bool {
        !matches!(self, State::Modification(_, _))
    }

    /// Neutral states are the "default" states of a molecule: free binding sites and
    /// unmodified residues.
    pub fn is_neutral(&self) -> bool {
        match self {
            State::EmptyBinding(_) => true,
            State::Modification(_, modifier) => modifier.is_neutral(),
            _ => false,
        }
    }

    /// The neutral counterparts of this state, one per occupied site.
    pub fn neutral_states(&self) -> Vec<State> {
        match self {
            State::Interaction(a, b) | State::SelfInteraction(a, b) => {
                vec![State::EmptyBinding(a.clone()), State::EmptyBinding(b.clone())]
            }
            State::EmptyBinding(_) => vec![self.clone()],
            State::Modification(s, _) => {
                vec![State::Modification(s.clone(), StateModifier::Unmodified)]
            }
        }
    }

    /// Positionally replace the specs of this state. Interactions are re-sorted into
    /// canonical order.
    ///
    /// Panics if the number of specs does not match `State::specs`.
    pub fn with_specs(&self, specs: &[Spec]) -> State {
        assert_eq!(
            self.specs().len(),
            specs.len(),
            "Invalid spec substitution for state {}.",
            self
        );
        match self {
            State::Interaction(_, _) => State::mk_interaction(specs[0].clone(), specs[1].clone()),
            State::SelfInteraction(_, _) => {
                State::SelfInteraction(specs[0].clone(), specs[1].clone())
            }
            State::EmptyBinding(_) => State::EmptyBinding(specs[0].clone()),
            State::Modification(_, modifier) => State::Modification(specs[0].clone(), *modifier),
        }
    }

    /// Apply `action` to every spec of this state.
    pub fn map_specs<F>(&self, action: F) -> State
    where
        F: FnMut(&Spec) -> Spec,
    {
        let specs: Vec<Spec> = self.specs().into_iter().map(action).collect();
        self.with_specs(&specs)
    }

    pub fn to_non_structured(&self) -> State {
        self.map_specs(|it| it.to_non_struct_spec())
    }

    /// Attach the struct index of `spec` to the unstructured specs of this state that
    /// reference the same component. In an interaction, only the first such spec is
    /// replaced (the other one is a different molecule of the same component), in other
    /// states all of them are.
    pub fn to_structured_from_spec(&self, spec: &Spec) -> State {
        let index = match spec.get_struct_index() {
            Some(index) => index,
            None => return self.clone(),
        };
        let target = spec.to_non_struct_spec().to_component_spec();
        let only_first = matches!(self, State::Interaction(_, _));
        let mut replaced = false;
        self.map_specs(|it| {
            let matches = !it.is_structured() && it.to_component_spec() == target;
            if matches && !(only_first && replaced) {
                replaced = true;
                it.with_struct_index(index)
            } else {
                it.clone()
            }
        })
    }

    /// Specs occupied by a binding state (`None` for modifications).
    fn binding_sites(&self) -> Option<Vec<&Spec>> {
        if self.is_binding() {
            Some(self.specs())
        } else {
            None
        }
    }

    /// Two different binding states are exclusive when they occupy an overlapping site of
    /// the same entity. Two modifications are exclusive when they assign different values
    /// to an overlapping residue. Bindings and modifications never conflict.
    pub fn is_mutually_exclusive_with(&self, other: &State) -> bool {
        if self == other {
            return false;
        }
        match (self, other) {
            (State::Modification(a, m_a), State::Modification(b, m_b)) => {
                m_a != m_b && a.overlaps_with(b)
            }
            _ => match (self.binding_sites(), other.binding_sites()) {
                (Some(mine), Some(theirs)) => mine
                    .iter()
                    .any(|a| theirs.iter().any(|b| a.overlaps_with(b))),
                _ => false,
            },
        }
    }
}

impl TryFrom<&str> for State {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if let Some(c) = MODIFICATION_STATE.captures(value) {
            let spec = Spec::try_from(&c["s"])?;
            State::mk_modification(spec, StateModifier::try_from(&c["m"])?)
        } else if let Some(c) = EMPTY_BINDING_STATE.captures(value) {
            Ok(State::mk_empty_binding(Spec::try_from(&c["s"])?))
        } else if let Some(c) = SELF_INTERACTION_STATE.captures(value) {
            let first = Spec::try_from(&c["s"])?;
            let second = first.with_locus(Locus::try_from(&c["l"])?);
            State::mk_self_interaction(first, second)
        } else if let Some(c) = INTERACTION_STATE.captures(value) {
            Ok(State::mk_interaction(
                Spec::try_from(&c["a"])?,
                Spec::try_from(&c["b"])?,
            ))
        } else {
            Err(format!("Could not parse state string `{}`.", value))
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            State::Interaction(a, b) => write!(f, "{}--{}", a, b),
            State::SelfInteraction(a, b) => write!(f, "{}--[{}]", a, b.get_locus()),
            State::EmptyBinding(s) => write!(f, "{}--0", s),
            State::Modification(s, m) => write!(f, "{}-{{{}}}", s, m),
        }
    }
}
