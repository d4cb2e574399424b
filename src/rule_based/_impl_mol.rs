use crate::rule_based::{
    site_name, Complex, InitialCondition, Mol, MolDef, Parameter, INITIAL_MOLECULE_COUNT,
};
use crate::traits::StateUniverse;
use crate::{Spec, State, StateModifier};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Error, Formatter};

impl Mol {
    /// A molecule of the component of `spec` with no sites.
    pub fn new(spec: &Spec, is_reactant: bool) -> Mol {
        Mol {
            spec: spec.to_component_spec(),
            site_to_mod: BTreeMap::new(),
            site_to_bond: BTreeMap::new(),
            is_reactant,
        }
    }

    /// The (structured) component spec of this molecule.
    pub fn get_spec(&self) -> &Spec {
        &self.spec
    }

    pub fn get_name(&self) -> &str {
        self.spec.get_component_name()
    }

    pub fn is_reactant(&self) -> bool {
        self.is_reactant
    }

    pub fn get_modification(&self, site: &str) -> Option<StateModifier> {
        self.site_to_mod.get(site).cloned()
    }

    /// `None` if the site is not known, `Some(None)` if it is free.
    pub fn get_bond(&self, site: &str) -> Option<Option<usize>> {
        self.site_to_bond.get(site).cloned()
    }

    pub fn sites(&self) -> BTreeSet<&str> {
        self.site_to_mod
            .keys()
            .chain(self.site_to_bond.keys())
            .map(|it| it.as_str())
            .collect()
    }

    pub(super) fn set_modification(&mut self, site: String, modifier: StateModifier) {
        self.site_to_mod.insert(site, modifier);
    }

    pub(super) fn set_bond(&mut self, site: String, bond: Option<usize>) {
        self.site_to_bond.insert(site, bond);
    }

    pub(super) fn mark_reactant(&mut self) {
        self.is_reactant = true;
    }
}

impl Display for Mol {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let mods = self
            .site_to_mod
            .iter()
            .map(|(site, modifier)| format!("{}~{}", site, modifier));
        let bonds = self.site_to_bond.iter().map(|(site, bond)| match bond {
            Some(bond) => format!("{}!{}", site, bond),
            None => site.clone(),
        });
        let sites: Vec<String> = mods.chain(bonds).collect();
        write!(f, "{}({})", self.get_name(), sites.join(","))
    }
}

impl Complex {
    pub fn new(mols: Vec<Mol>) -> Complex {
        Complex { mols }
    }

    pub fn get_mols(&self) -> &[Mol] {
        &self.mols
    }

    /// A complex is a reactant if it contains at least one reactant molecule.
    pub fn is_reactant(&self) -> bool {
        self.mols.iter().any(|it| it.is_reactant)
    }
}

impl Display for Complex {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let mols: Vec<String> = self.mols.iter().map(|it| it.to_string()).collect();
        write!(f, "{}", mols.join("."))
    }
}

impl MolDef {
    /// Collect the sites of `component` (and the values of its modification sites) from
    /// all states the `universe` knows for it.
    pub fn for_component<U: StateUniverse>(universe: &U, component: &Spec) -> MolDef {
        let component = component.to_non_struct_spec().to_component_spec();
        let mut site_defs: BTreeMap<String, Vec<StateModifier>> = BTreeMap::new();
        for state in universe.states_for_component(&component) {
            for spec in state.specs() {
                if spec.to_component_spec() != component {
                    continue;
                }
                let modifiers = site_defs.entry(site_name(spec)).or_default();
                if let State::Modification(_, modifier) = &state {
                    if !modifiers.contains(modifier) {
                        modifiers.push(*modifier);
                    }
                }
            }
        }
        for modifiers in site_defs.values_mut() {
            modifiers.sort();
        }
        MolDef {
            name: component.get_component_name().to_string(),
            site_defs,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn sites(&self) -> Vec<&str> {
        self.site_defs.keys().map(|it| it.as_str()).collect()
    }

    /// Possible values of a modification site (empty for binding sites).
    pub fn mods_for_site(&self, site: &str) -> Option<&[StateModifier]> {
        self.site_defs.get(site).map(|it| it.as_slice())
    }

    /// A single molecule of this type with all residues unmodified and all binding
    /// sites free.
    pub fn create_neutral_complex(&self) -> Result<Complex, String> {
        let mut mol = Mol::new(&Spec::protein(&self.name)?, false);
        for (site, modifiers) in &self.site_defs {
            if modifiers.is_empty() {
                mol.set_bond(site.clone(), None);
            } else {
                mol.set_modification(site.clone(), StateModifier::Unmodified);
            }
        }
        Ok(Complex::new(vec![mol]))
    }
}

impl Display for MolDef {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let sites: Vec<String> = self
            .site_defs
            .iter()
            .map(|(site, modifiers)| {
                let mut site = site.clone();
                for modifier in modifiers {
                    site.push_str(&format!("~{}", modifier));
                }
                site
            })
            .collect();
        write!(f, "{}({})", self.name, sites.join(","))
    }
}

impl Parameter {
    pub fn new(name: &str, value: &str) -> Result<Parameter, String> {
        if name.is_empty() || value.is_empty() {
            return Err(format!("Invalid parameter `{}` = `{}`.", name, value));
        }
        Ok(Parameter {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_value(&self) -> &str {
        &self.value
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.name)
    }
}

impl InitialCondition {
    pub fn new(complex: Complex, value: Parameter) -> InitialCondition {
        InitialCondition { complex, value }
    }

    /// `INITIAL_MOLECULE_COUNT` neutral molecules of the given type.
    pub fn for_mol_def(mol_def: &MolDef) -> Result<InitialCondition, String> {
        let value = Parameter::new(
            &format!("Num{}", mol_def.get_name()),
            &INITIAL_MOLECULE_COUNT.to_string(),
        )?;
        Ok(InitialCondition::new(mol_def.create_neutral_complex()?, value))
    }

    pub fn get_complex(&self) -> &Complex {
        &self.complex
    }

    pub fn get_value(&self) -> &Parameter {
        &self.value
    }
}

impl Display for InitialCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} {}", self.complex, self.value)
    }
}
